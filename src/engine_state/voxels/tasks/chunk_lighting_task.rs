//! # Chunk Lighting Task
//!
//! Runs the sunlight sweep for a chunk, either fully or for the columns an
//! edit touched.

use log::debug;
use web_time::{Duration, Instant};

use crate::{
    core::MtResource,
    engine_state::{
        task_management::task::{Task, TaskResult},
        voxels::{
            chunk::{Chunk, LightingScope, PipelineStep},
            chunk_manager::ChunkManager,
            coords::ChunkCoord,
        },
    },
};

pub struct ChunkLightingTask {
    chunk: MtResource<Chunk>,
    coord: ChunkCoord,
    scope: LightingScope,
}

impl ChunkLightingTask {
    pub fn new(chunk: MtResource<Chunk>, coord: ChunkCoord, scope: LightingScope) -> Self {
        ChunkLightingTask {
            chunk,
            coord,
            scope,
        }
    }
}

impl Task for ChunkLightingTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();
        self.chunk.get_mut().apply_lighting(&self.scope);

        Box::new(ChunkLightingTaskResult {
            coord: self.coord,
            columns: match &self.scope {
                LightingScope::Full => None,
                LightingScope::Columns(columns) => Some(columns.len()),
            },
            elapsed: start.elapsed(),
        })
    }
}

pub struct ChunkLightingTaskResult {
    coord: ChunkCoord,
    columns: Option<usize>,
    elapsed: Duration,
}

impl TaskResult for ChunkLightingTaskResult {
    fn handle_result(self: Box<Self>, manager: &mut ChunkManager) {
        match self.columns {
            None => debug!("Lit {:?} in {:?}", self.coord, self.elapsed),
            Some(n) => debug!("Relit {n} columns of {:?} in {:?}", self.coord, self.elapsed),
        }
        manager.on_step_complete(self.coord, PipelineStep::Lighting);
    }
}
