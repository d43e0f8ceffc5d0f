//! # Engine State Module
//!
//! The frame-loop facade over the terrain pipeline.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container, driven once per frame
//! * `config` - World and pipeline configuration
//! * `rendering` - Mesh generation and its worker task
//! * `task_management` - The worker pool
//! * `voxels` - Voxel data, generation, the chunk store and streaming
//!
//! ## Architecture
//!
//! `EngineState` owns a [`ChunkManager`] and forwards observer movement to it.
//! Each frame the host calls `process_input` with the observer position,
//! `process_tasks` to fold back finished work, then drains mesh uploads and
//! visibility changes into its renderer.

use cgmath::Point3;
use log::info;

use config::{ConfigError, WorldConfig};
use voxels::{
    block::BlockType,
    chunk_manager::{ChunkManager, MeshUpload, ReconcileReport, VisibilityChange},
    coords::ChunkCoord,
};

pub mod config;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container for the terrain engine
///
/// # Examples
///
/// ```no_run
/// use voxel_terrain::{EngineState, WorldConfig};
///
/// let mut engine_state = EngineState::new(WorldConfig::default()).unwrap();
/// let mut observer = engine_state.spawn_point();
///
/// loop {
///     observer.x += 0.5;
///     engine_state.process_input(observer);
///     engine_state.process_tasks();
///     for upload in engine_state.drain_mesh_uploads() {
///         // hand upload.mesh to the renderer
///         let _ = upload;
///     }
/// }
/// ```
pub struct EngineState {
    chunk_manager: ChunkManager,
    /// Chunk the observer stood in at the last `process_input`
    current_player_chunk_position: Option<ChunkCoord>,
}

impl EngineState {
    /// Validates `config`, starts the workers and populates the view window
    /// around the spawn point.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let spawn = config.spawn_point();
        let mut state = Self {
            chunk_manager: ChunkManager::new(config)?,
            current_player_chunk_position: None,
        };
        if let Some(report) = state.process_input(spawn) {
            info!(
                "Spawned at {:?}: {} chunks requested",
                state.current_player_chunk_position, report.created
            );
        }
        Ok(state)
    }

    /// Moves the observer. Returns the reconcile summary when the observer
    /// crossed into a different chunk.
    pub fn process_input(&mut self, observer: Point3<f32>) -> Option<ReconcileReport> {
        let report = self.chunk_manager.update_observer(observer)?;
        self.current_player_chunk_position = self.chunk_manager.observer();
        Some(report)
    }

    /// Folds back finished worker results. Call once per frame.
    pub fn process_tasks(&mut self) -> usize {
        self.chunk_manager.process_tasks()
    }

    /// Meshes finished since the last drain, oldest first.
    pub fn drain_mesh_uploads(&mut self) -> Vec<MeshUpload> {
        self.chunk_manager.drain_mesh_uploads()
    }

    /// Show/hide notices raised by reconciles and completed meshes.
    pub fn drain_visibility_changes(&mut self) -> Vec<VisibilityChange> {
        self.chunk_manager.drain_visibility_changes()
    }

    /// Chunks destroyed by eviction since the last drain. The host should
    /// release any GPU buffers it still holds for them.
    pub fn drain_evictions(&mut self) -> Vec<ChunkCoord> {
        self.chunk_manager.drain_evictions()
    }

    /// Block at a world position.
    ///
    /// # Arguments
    ///
    /// * `position` - World-space voxel position
    ///
    /// # Returns
    ///
    /// `BlockType::Air` outside the world, outside the vertical range, or for
    /// chunks without terrain yet.
    pub fn get_block(&self, position: Point3<i32>) -> BlockType {
        self.chunk_manager.get_block(position)
    }

    /// Writes one block, generating its chunk first when needed. Returns
    /// `false` when the position is outside the world or nothing changed.
    pub fn set_block(&mut self, position: Point3<i32>, block: BlockType) -> bool {
        self.chunk_manager.set_block(position, block)
    }

    /// Where a fresh observer is placed; see `WorldConfig::spawn_point`.
    pub fn spawn_point(&self) -> Point3<f32> {
        self.chunk_manager.config().spawn_point()
    }

    /// Chunk the observer currently stands in.
    pub fn current_chunk(&self) -> Option<ChunkCoord> {
        self.current_player_chunk_position
    }

    /// Direct access to the streaming controller, for queries the facade does
    /// not forward.
    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    pub fn chunk_manager_mut(&mut self) -> &mut ChunkManager {
        &mut self.chunk_manager
    }
}
