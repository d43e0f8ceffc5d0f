//! Mesh generation for voxel rendering.
//!
//! Converts a chunk's block array into vertex, normal, UV and index buffers.
//!
//! # Architecture
//! - [`ChunkMesh`]: the finished buffers, with byte views for upload
//! - [`Face`]: one visible quad of a voxel
//! - [`build_mesh`]: the face-culling mesher
//!
//! # Usage
//! ```
//! use voxel_terrain::engine_state::rendering::meshing::{build_mesh, MeshInput};
//! use voxel_terrain::engine_state::voxels::coords::ChunkDimensions;
//!
//! let dims = ChunkDimensions::new(4, 4);
//! let mut blocks = vec![0u8; dims.volume()];
//! blocks[dims.index(1, 1, 1)] = 2;
//! let mesh = build_mesh(&MeshInput { dims, blocks: &blocks, neighbours: [None; 4], atlas_size: 16 });
//! assert_eq!(mesh.face_count(), 6);
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::{build_mesh, MeshInput};
pub use face::Face;
pub use mesh::ChunkMesh;
