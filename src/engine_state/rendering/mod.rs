//! Rendering-facing half of the pipeline.
//!
//! Turns lit chunks into [`meshing::ChunkMesh`] buffers. Uploading and drawing
//! them is left to whoever drains `EngineState::drain_mesh_uploads`.

pub mod meshing;
pub mod tasks;
