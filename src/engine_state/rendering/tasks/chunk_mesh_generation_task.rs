//! Task for generating mesh data for chunks in a background thread.
//!
//! The chunk and its four cardinal neighbours are copied under short read
//! locks, so no lock is held while the mesher runs and nothing borrowed from a
//! neighbour outlives the task.

use log::{debug, warn};
use web_time::{Duration, Instant};

use crate::{
    core::MtResource,
    engine_state::{
        rendering::meshing::{build_mesh, ChunkMesh, MeshInput},
        task_management::task::{Task, TaskResult},
        voxels::{
            chunk::{Chunk, GenerationStage},
            chunk_manager::ChunkManager,
            coords::ChunkCoord,
        },
    },
};

/// Builds the mesh for one chunk.
///
/// `neighbours` is indexed by `Cardinal`; `None` marks a side outside the world.
pub struct ChunkMeshGenerationTask {
    chunk: MtResource<Chunk>,
    coord: ChunkCoord,
    neighbours: [Option<MtResource<Chunk>>; 4],
    atlas_size: u32,
}

impl ChunkMeshGenerationTask {
    pub fn new(
        chunk: MtResource<Chunk>,
        coord: ChunkCoord,
        neighbours: [Option<MtResource<Chunk>>; 4],
        atlas_size: u32,
    ) -> Self {
        ChunkMeshGenerationTask {
            chunk,
            coord,
            neighbours,
            atlas_size,
        }
    }
}

impl Task for ChunkMeshGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();

        let (dims, blocks, version) = {
            let chunk = self.chunk.get();
            (chunk.dimensions(), chunk.blocks().to_vec(), chunk.data_version())
        };
        let neighbour_blocks: [Option<Vec<u8>>; 4] = std::array::from_fn(|i| {
            let neighbour = self.neighbours[i].as_ref()?.get();
            if neighbour.stage() == GenerationStage::Empty {
                warn!(
                    "Neighbour {:?} of {:?} has no terrain, hiding that border",
                    neighbour.coord, self.coord
                );
                return None;
            }
            Some(neighbour.blocks().to_vec())
        });

        let mesh = build_mesh(&MeshInput {
            dims,
            blocks: &blocks,
            neighbours: std::array::from_fn(|i| neighbour_blocks[i].as_deref()),
            atlas_size: self.atlas_size,
        });

        Box::new(ChunkMeshGenerationTaskResult {
            coord: self.coord,
            version,
            mesh,
            elapsed: start.elapsed(),
        })
    }
}

pub struct ChunkMeshGenerationTaskResult {
    coord: ChunkCoord,
    /// Block data version the mesh was built from
    version: u64,
    mesh: ChunkMesh,
    elapsed: Duration,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    fn handle_result(self: Box<Self>, manager: &mut ChunkManager) {
        debug!(
            "Meshed {:?}: {} faces in {:?}",
            self.coord,
            self.mesh.face_count(),
            self.elapsed
        );
        manager.on_mesh_complete(self.coord, self.version, self.mesh);
    }
}
