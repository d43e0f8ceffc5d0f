//! # Chunk Generation Task
//!
//! Fills an `Empty` chunk with terrain on a worker thread.

use std::sync::Arc;

use log::debug;
use web_time::{Duration, Instant};

use crate::{
    core::MtResource,
    engine_state::{
        task_management::task::{Task, TaskResult},
        voxels::{
            chunk::{Chunk, PipelineStep},
            chunk_manager::ChunkManager,
            coords::ChunkCoord,
            generation::TerrainGenerator,
        },
    },
};

/// Generates terrain for one chunk.
///
/// The fill is computed without holding any lock; the chunk is only locked to
/// move the finished arrays in. If terrain already arrived by another path
/// (a synchronous `ensure_resident`), this result is discarded.
pub struct ChunkGenerationTask {
    generator: Arc<TerrainGenerator>,
    chunk: MtResource<Chunk>,
    coord: ChunkCoord,
}

impl ChunkGenerationTask {
    pub fn new(generator: Arc<TerrainGenerator>, chunk: MtResource<Chunk>, coord: ChunkCoord) -> Self {
        ChunkGenerationTask {
            generator,
            chunk,
            coord,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();
        let fill = self.generator.generate(self.coord);
        let applied = self.chunk.get_mut().apply_terrain(fill);

        Box::new(ChunkGenerationTaskResult {
            coord: self.coord,
            applied,
            elapsed: start.elapsed(),
        })
    }
}

pub struct ChunkGenerationTaskResult {
    coord: ChunkCoord,
    applied: bool,
    elapsed: Duration,
}

impl TaskResult for ChunkGenerationTaskResult {
    fn handle_result(self: Box<Self>, manager: &mut ChunkManager) {
        debug!(
            "Terrain for {:?} in {:?}{}",
            self.coord,
            self.elapsed,
            if self.applied { "" } else { " (discarded)" }
        );
        manager.on_step_complete(self.coord, PipelineStep::Terrain);
    }
}
