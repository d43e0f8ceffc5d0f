//! Mesh generation for chunk rendering.
//!
//! Meshes are built on worker threads and handed to the renderer as plain
//! buffers; nothing in here talks to a GPU.

mod mesh;

pub use mesh::*;
