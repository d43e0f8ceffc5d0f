//! # Voxel World
//!
//! Everything that describes and produces the voxel world.
//!
//! ## Architecture
//!
//! * **Block** and **Biome**: the closed sets of voxel and climate kinds
//! * **Coords**: chunk coordinates, chunk dimensions and world bounds
//! * **Noise engine** and **Generation**: deterministic terrain and sunlight
//! * **Chunk**: one column of voxels plus its pipeline bookkeeping
//! * **World**: the concurrent chunk store
//! * **Chunk manager**: streaming, scheduling and eviction
//! * **Tasks**: the terrain and lighting steps run on workers
//!
//! ## Data Flow
//!
//! 1. The observer moves; the chunk manager reconciles the active set
//! 2. Missing chunks are inserted into the world and queued for terrain
//! 3. Lighting and meshing follow once their inputs are ready
//! 4. Finished meshes are queued for the renderer
//!
//! ## Thread Safety
//!
//! Locks are always taken world first, then chunk. Workers only ever hold the
//! lock of the chunk they were handed.

pub mod biome;
pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod coords;
pub mod generation;
pub mod noise_engine;
pub mod tasks;
pub mod world;
