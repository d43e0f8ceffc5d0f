#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A streaming voxel terrain engine: deterministic noise-driven terrain,
//! sunlight, face-culled meshing and an observer-centred chunk window, with
//! every heavy step running on a worker pool.
//!
//! ## Key Modules
//!
//! * `core` - Shared concurrency primitives
//! * `engine_state` - Configuration, voxel data, the pipeline and its workers
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_terrain::{EngineState, WorldConfig};
//!
//! voxel_terrain::init_logging();
//! let mut engine = EngineState::new(WorldConfig::default()).unwrap();
//! engine.process_tasks();
//! for upload in engine.drain_mesh_uploads() {
//!     println!("{:?}: {} faces", upload.coord, upload.mesh.face_count());
//! }
//! ```
//!
//! Rendering is left to the host: meshes come out as plain vertex, normal,
//! UV and index buffers with byte views ready for upload.

use log::info;

pub mod core;
pub mod engine_state;

pub use engine_state::config::{ConfigError, NoiseLayer, WorldConfig};
pub use engine_state::rendering::meshing::ChunkMesh;
pub use engine_state::voxels::biome::Biome;
pub use engine_state::voxels::block::BlockType;
pub use engine_state::voxels::chunk_manager::{
    ChunkManager, ChunkStatus, MeshUpload, PipelineStats, ReconcileReport, VisibilityChange,
};
pub use engine_state::voxels::coords::ChunkCoord;
pub use engine_state::EngineState;

/// Installs an `env_logger` writing to stdout, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if installed {
        info!("Logger initialized");
    }
}
