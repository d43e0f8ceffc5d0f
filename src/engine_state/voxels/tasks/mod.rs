//! # Voxel Task System
//!
//! Worker-side pipeline steps that operate on a single chunk's own buffers:
//! terrain fill and sunlight. Meshing lives with the rendering code.

pub mod chunk_generation_task;
pub mod chunk_lighting_task;

pub use chunk_generation_task::ChunkGenerationTask;
pub use chunk_lighting_task::ChunkLightingTask;
