//! # Chunk Manager
//!
//! The streaming controller. It owns the chunk store, the worker pool and the
//! observer-relative active set, and it is the only place that creates,
//! advances, deactivates or destroys chunks.
//!
//! ## Scheduling
//!
//! Each chunk has at most one pipeline step in flight. A step is submitted only
//! after its predecessor's result has been folded back on the main thread:
//!
//! - terrain runs for any resident chunk without terrain
//! - lighting runs once terrain exists, and again for the columns an edit touched
//! - meshing runs only for active chunks, and only once every in-world
//!   cardinal neighbour has terrain; missing neighbours are requested and the
//!   chunk waits in `awaiting_neighbours` until their terrain lands
//!
//! Nothing here blocks on a worker. `process_tasks()` is polled once per tick
//! and folds back at most `max_completions_per_tick` results.
//!
//! ## Residency
//!
//! Leaving the view window only deactivates a chunk. Inactive chunks sit in an
//! LRU and are destroyed, oldest first, once the store grows past
//! `max_resident_chunks`. A chunk with work in flight is never destroyed.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::thread;

use cgmath::Point3;
use log::{debug, info, warn};
use lru::LruCache;
use web_time::{Duration, Instant};

use crate::core::MtResource;
use crate::engine_state::config::{ConfigError, WorldConfig};
use crate::engine_state::rendering::meshing::ChunkMesh;
use crate::engine_state::rendering::tasks::ChunkMeshGenerationTask;
use crate::engine_state::task_management::{task::Task, TaskManager};

use super::block::BlockType;
use super::chunk::{Chunk, GenerationStage, LightingScope, PipelineStep, StructurePlacement};
use super::coords::{Cardinal, ChunkCoord, WorldBounds};
use super::generation::TerrainGenerator;
use super::tasks::{ChunkGenerationTask, ChunkLightingTask};
use super::world::{get_or_insert_shared, World};

/// A finished mesh waiting for the external renderer.
#[derive(Debug, Clone)]
pub struct MeshUpload {
    /// Chunk the mesh belongs to. Replaces any mesh uploaded for it before.
    pub coord: ChunkCoord,
    /// Chunk-local geometry; offset by `coord.origin(chunk_width)` to place it.
    pub mesh: ChunkMesh,
}

/// A flip of the "chunk should be visible" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub coord: ChunkCoord,
    /// New state of the signal.
    pub visible: bool,
}

/// Where a coordinate stands in the pipeline, as seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    /// Not resident: never requested, or evicted.
    NotTracked,
    /// Resident and waiting for its next step to be submitted.
    Queued,
    /// Resident and lit but inactive, so nothing is scheduled until it is
    /// activated again. Chunks in the neighbour ring around the view window
    /// sit here.
    Parked,
    /// A worker is running this step.
    Generating(PipelineStep),
    /// Meshed. Only active chunks are shown.
    Ready { active: bool },
}

/// What one reconcile changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Chunks newly inserted into the store, the neighbour ring included.
    pub created: usize,
    /// Desired chunks that were not active before.
    pub activated: usize,
    /// Active chunks that left the desired set. They stay resident.
    pub deactivated: usize,
    /// Inactive chunks destroyed to get back under `max_resident_chunks`.
    pub evicted: usize,
}

/// Running totals, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Terrain steps folded back from workers.
    pub terrain: u64,
    /// Terrain fills run on the calling thread by `ensure_resident`.
    pub sync_terrain: u64,
    pub lighting: u64,
    /// Meshes accepted and queued for upload.
    pub meshes: u64,
    /// Meshes dropped because the chunk changed while they were built.
    pub stale_meshes: u64,
    pub evictions: u64,
}

/// Every in-world chunk within the inclusive square `center ± view_distance`.
pub fn desired_set(bounds: &WorldBounds, center: ChunkCoord, view_distance: i32) -> HashSet<ChunkCoord> {
    let r = view_distance.max(0);
    (center.x - r..=center.x + r)
        .flat_map(|x| (center.z - r..=center.z + r).map(move |z| ChunkCoord::new(x, z)))
        .filter(|coord| bounds.is_chunk_in_world(*coord))
        .collect()
}

enum NextStep {
    Terrain,
    Lighting(LightingScope),
    Mesh,
}

/// Streams chunks around one observer. See the module docs for the pipeline.
///
/// Besides the active window it keeps a ring of inactive neighbours that
/// meshing reads borders from. All methods run on the owning thread.
pub struct ChunkManager {
    config: WorldConfig,
    bounds: WorldBounds,
    world: MtResource<World>,
    generator: Arc<TerrainGenerator>,
    task_manager: TaskManager,
    observer: Option<ChunkCoord>,
    active: HashSet<ChunkCoord>,
    /// Active chunks whose visible signal is currently on.
    visible: HashSet<ChunkCoord>,
    awaiting_neighbours: HashSet<ChunkCoord>,
    inactive: LruCache<ChunkCoord, ()>,
    uploads: VecDeque<MeshUpload>,
    visibility: VecDeque<VisibilityChange>,
    /// Destroyed chunks whose meshes the renderer should release.
    evictions: VecDeque<ChunkCoord>,
    stats: PipelineStats,
}

impl ChunkManager {
    /// Validates `config` and starts the worker pool.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let dims = config.dimensions();
        let bounds = WorldBounds::new(config.world_size_in_chunks, dims);
        info!(
            "World {}x{} chunks of {}x{}x{}, seed {}, view distance {}",
            config.world_size_in_chunks,
            config.world_size_in_chunks,
            dims.width,
            dims.height,
            dims.width,
            config.seed,
            config.view_distance
        );

        Ok(ChunkManager {
            bounds,
            world: MtResource::new(World::new(dims)),
            generator: Arc::new(TerrainGenerator::new(&config)),
            task_manager: TaskManager::new(config.worker_threads),
            observer: None,
            active: HashSet::new(),
            visible: HashSet::new(),
            awaiting_neighbours: HashSet::new(),
            inactive: LruCache::unbounded(),
            uploads: VecDeque::new(),
            visibility: VecDeque::new(),
            evictions: VecDeque::new(),
            stats: PipelineStats::default(),
            config,
        })
    }

    /// The validated configuration this manager was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// World extent in chunks and blocks, used for every in-world check.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Shared handle to the chunk store.
    pub fn world(&self) -> MtResource<World> {
        self.world.clone()
    }

    /// Terrain generator shared with the terrain workers.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Running pipeline totals since construction.
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Chunk the last reconcile was centred on. `None` before the first
    /// `update_observer`.
    pub fn observer(&self) -> Option<ChunkCoord> {
        self.observer
    }

    /// Number of chunks in the store, active or not.
    pub fn resident_count(&self) -> usize {
        self.world.get().len()
    }

    /// Coordinates in the current desired set, in no particular order.
    pub fn active_chunks(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.active.iter().copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, coord: ChunkCoord) -> bool {
        self.active.contains(&coord)
    }

    /// `true` when no pipeline work is queued or running.
    pub fn is_idle(&self) -> bool {
        self.task_manager.is_idle()
    }

    fn chunk(&self, coord: ChunkCoord) -> Option<MtResource<Chunk>> {
        self.world.get().get_chunk_at(coord)
    }

    fn insert_if_absent(&mut self, coord: ChunkCoord) -> (MtResource<Chunk>, bool) {
        let (chunk, created) = get_or_insert_shared(&self.world, coord);
        if created && !self.active.contains(&coord) {
            self.inactive.put(coord, ());
        }
        (chunk, created)
    }

    /// Returns the chunk at `coord`, generating its terrain on this thread if
    /// it has none yet. Never returns a chunk at `Empty`.
    ///
    /// Out-of-world coordinates yield `None`.
    pub fn ensure_resident(&mut self, coord: ChunkCoord) -> Option<MtResource<Chunk>> {
        if !self.bounds.is_chunk_in_world(coord) {
            return None;
        }
        let (chunk, _) = self.insert_if_absent(coord);

        let needs_terrain = chunk.get().stage() == GenerationStage::Empty;
        if needs_terrain {
            let start = Instant::now();
            let fill = self.generator.generate(coord);
            let applied = chunk.get_mut().apply_terrain(fill);
            if applied {
                self.stats.sync_terrain += 1;
                debug!("Generated {:?} synchronously in {:?}", coord, start.elapsed());
            }
            self.advance(coord);
            self.wake_awaiting(coord);
        }
        Some(chunk)
    }

    /// Makes `coord` resident and queues its terrain without waiting.
    ///
    /// Returns `false` for out-of-world coordinates.
    pub fn request_async(&mut self, coord: ChunkCoord) -> bool {
        if !self.bounds.is_chunk_in_world(coord) {
            return false;
        }
        self.insert_if_absent(coord);
        self.advance(coord);
        true
    }

    /// Desired set around `center`, clipped to this manager's world.
    ///
    /// # Arguments
    ///
    /// * `center` - Chunk the observer stands in
    /// * `view_distance` - Radius in chunks; negative values act as zero
    ///
    /// # Returns
    ///
    /// Every in-world coordinate within `center ± view_distance` on both axes.
    pub fn compute_desired_set(&self, center: ChunkCoord, view_distance: i32) -> HashSet<ChunkCoord> {
        desired_set(&self.bounds, center, view_distance)
    }

    /// Reconciles around a new observer position. Does nothing while the
    /// observer stays inside the same chunk.
    pub fn update_observer(&mut self, position: Point3<f32>) -> Option<ReconcileReport> {
        let center = ChunkCoord::from_world_position(position, self.config.chunk_width);
        if self.observer == Some(center) {
            return None;
        }
        self.observer = Some(center);
        let desired = self.compute_desired_set(center, self.config.view_distance);
        Some(self.reconcile(&desired))
    }

    /// Makes the active set equal to `desired`.
    ///
    /// Entering chunks are created or resumed nearest-first. Leaving chunks are
    /// deactivated and stay resident until eviction.
    pub fn reconcile(&mut self, desired: &HashSet<ChunkCoord>) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let leaving: Vec<ChunkCoord> = self
            .active
            .iter()
            .filter(|coord| !desired.contains(*coord))
            .copied()
            .collect();
        for coord in leaving {
            self.deactivate(coord);
            report.deactivated += 1;
        }

        let mut entering: Vec<ChunkCoord> = desired
            .iter()
            .filter(|coord| {
                !self.active.contains(*coord) && self.bounds.is_chunk_in_world(**coord)
            })
            .copied()
            .collect();
        let center = self.observer;
        entering.sort_by_key(|coord| {
            (
                center.map_or(0, |c| c.chebyshev_distance(*coord)),
                coord.x,
                coord.z,
            )
        });

        for coord in entering {
            let (chunk, created) = self.insert_if_absent(coord);
            if created {
                report.created += 1;
            }
            self.inactive.pop(&coord);
            self.active.insert(coord);
            report.activated += 1;

            let ready = {
                let mut chunk = chunk.get_mut();
                chunk.is_active = true;
                chunk.stage() == GenerationStage::Meshed && !chunk.is_dirty()
            };
            if ready {
                self.show(coord);
            } else {
                self.advance(coord);
            }
        }

        report.evicted = self.evict_over_budget();
        debug!(
            "Reconciled around {:?}: {:?} ({} resident)",
            self.observer,
            report,
            self.resident_count()
        );
        report
    }

    fn deactivate(&mut self, coord: ChunkCoord) {
        self.active.remove(&coord);
        self.awaiting_neighbours.remove(&coord);
        if let Some(chunk) = self.chunk(coord) {
            chunk.get_mut().is_active = false;
        }
        self.inactive.put(coord, ());
        if self.visible.remove(&coord) {
            self.visibility.push_back(VisibilityChange {
                coord,
                visible: false,
            });
        }
    }

    fn show(&mut self, coord: ChunkCoord) {
        if self.visible.insert(coord) {
            self.visibility.push_back(VisibilityChange {
                coord,
                visible: true,
            });
        }
    }

    fn publish(&mut self, task: Box<dyn Task + Send>) {
        self.task_manager.publish_task(task);
    }

    /// Submits the next pipeline step for `coord` if nothing is in flight.
    fn advance(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunk(coord) else {
            return;
        };

        let next = {
            let mut c = chunk.get_mut();
            if c.in_flight.is_some() {
                return;
            }
            match c.stage() {
                GenerationStage::Empty => {
                    c.in_flight = Some(PipelineStep::Terrain);
                    NextStep::Terrain
                }
                GenerationStage::Terrain => match c.take_pending_light() {
                    Some(scope) => {
                        c.in_flight = Some(PipelineStep::Lighting);
                        NextStep::Lighting(scope)
                    }
                    None => {
                        warn!("{:?} has terrain but no lighting work recorded", coord);
                        return;
                    }
                },
                GenerationStage::Lighting if c.is_active => NextStep::Mesh,
                _ => return,
            }
        };

        match next {
            NextStep::Terrain => {
                let task = ChunkGenerationTask::new(self.generator.clone(), chunk, coord);
                self.publish(Box::new(task));
            }
            NextStep::Lighting(scope) => {
                self.publish(Box::new(ChunkLightingTask::new(chunk, coord, scope)));
            }
            NextStep::Mesh => self.try_schedule_mesh(coord, chunk),
        }
    }

    /// Submits the mesh task once every in-world neighbour has terrain,
    /// otherwise requests the missing ones and parks the chunk.
    fn try_schedule_mesh(&mut self, coord: ChunkCoord, chunk: MtResource<Chunk>) {
        let mut neighbours: [Option<MtResource<Chunk>>; 4] = Default::default();
        let mut missing = Vec::new();

        let around = coord.cardinal_neighbours();
        for direction in Cardinal::ALL {
            let neighbour = around[direction as usize];
            if !self.bounds.is_chunk_in_world(neighbour) {
                continue;
            }
            match self.chunk(neighbour) {
                Some(handle) if handle.get().stage() >= GenerationStage::Terrain => {
                    neighbours[direction as usize] = Some(handle);
                }
                _ => missing.push(neighbour),
            }
        }

        if !missing.is_empty() {
            self.awaiting_neighbours.insert(coord);
            for neighbour in missing {
                self.request_async(neighbour);
            }
            return;
        }

        self.awaiting_neighbours.remove(&coord);
        chunk.get_mut().in_flight = Some(PipelineStep::Mesh);
        let task = ChunkMeshGenerationTask::new(chunk, coord, neighbours, self.config.atlas_size);
        self.publish(Box::new(task));
    }

    /// Folds a finished terrain or lighting step back and moves the chunk on.
    pub fn on_step_complete(&mut self, coord: ChunkCoord, step: PipelineStep) {
        let Some(chunk) = self.chunk(coord) else {
            warn!("{:?} finished for {:?}, which is no longer resident", step, coord);
            return;
        };
        chunk.get_mut().in_flight = None;

        match step {
            PipelineStep::Terrain => self.stats.terrain += 1,
            PipelineStep::Lighting => self.stats.lighting += 1,
            PipelineStep::Mesh => {}
        }

        self.advance(coord);
        if step == PipelineStep::Terrain {
            self.wake_awaiting(coord);
        }
    }

    /// Retries meshing for chunks parked on `coord`'s terrain.
    fn wake_awaiting(&mut self, coord: ChunkCoord) {
        for neighbour in coord.cardinal_neighbours() {
            if self.awaiting_neighbours.remove(&neighbour) {
                self.advance(neighbour);
            }
        }
    }

    /// Folds a finished mesh back. A mesh built from outdated blocks is
    /// dropped and the chunk goes round again.
    pub fn on_mesh_complete(&mut self, coord: ChunkCoord, version: u64, mesh: ChunkMesh) {
        let Some(chunk) = self.chunk(coord) else {
            warn!("Mesh finished for {:?}, which is no longer resident", coord);
            return;
        };

        let (current, active) = {
            let mut c = chunk.get_mut();
            c.in_flight = None;
            (c.complete_mesh(version), c.is_active)
        };

        if !current {
            self.stats.stale_meshes += 1;
            debug!("Discarded stale mesh for {:?}", coord);
            self.advance(coord);
            return;
        }

        self.stats.meshes += 1;
        self.uploads.push_back(MeshUpload { coord, mesh });
        if active {
            self.show(coord);
        }
    }

    /// Polls the worker pool. Never blocks.
    ///
    /// Returns the number of results folded back this tick.
    pub fn process_tasks(&mut self) -> usize {
        let results = self
            .task_manager
            .collect_completed(self.config.max_completions_per_tick);
        let handled = results.len();
        for result in results {
            result.handle_result(self);
        }
        self.task_manager.process_queued_tasks();
        if handled > 0 {
            self.evict_over_budget();
        }
        handled
    }

    /// Pumps `process_tasks` until the pipeline drains or `timeout` passes.
    ///
    /// For start-up population and tests; a frame loop should call
    /// `process_tasks` instead.
    pub fn run_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_tasks();
            if self.is_idle() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// Destroys least-recently deactivated chunks until the store fits the budget.
    fn evict_over_budget(&mut self) -> usize {
        let budget = self.config.max_resident_chunks;
        let mut evicted = 0;
        let mut busy = Vec::new();

        while self.resident_count() > budget {
            let Some((coord, ())) = self.inactive.pop_lru() else {
                break;
            };
            let Some(chunk) = self.chunk(coord) else {
                continue;
            };
            // The store and `chunk` hold two handles; any more belong to a task.
            if chunk.get().in_flight.is_some() || MtResource::handle_count(&chunk) > 2 {
                busy.push(coord);
                continue;
            }
            drop(chunk);
            self.world.get_mut().remove(coord);
            self.awaiting_neighbours.remove(&coord);
            self.evictions.push_back(coord);
            evicted += 1;
        }

        for coord in busy.into_iter().rev() {
            self.inactive.put(coord, ());
            self.inactive.demote(&coord);
        }

        if evicted > 0 {
            self.stats.evictions += evicted as u64;
            debug!("Evicted {} chunks, {} resident", evicted, self.resident_count());
        }
        evicted
    }

    /// Pipeline position of a coordinate.
    ///
    /// # Arguments
    ///
    /// * `coord` - Any chunk coordinate, in or out of the world
    ///
    /// # Returns
    ///
    /// `NotTracked` when nothing is resident there. Otherwise the running
    /// step, `Ready` once meshed, `Parked` for lit chunks held back while
    /// inactive, or `Queued`.
    pub fn status(&self, coord: ChunkCoord) -> ChunkStatus {
        let Some(chunk) = self.chunk(coord) else {
            return ChunkStatus::NotTracked;
        };
        let c = chunk.get();
        match c.in_flight {
            Some(step) => ChunkStatus::Generating(step),
            None if c.stage() == GenerationStage::Meshed && !c.is_dirty() => ChunkStatus::Ready {
                active: c.is_active,
            },
            None if !c.is_active && c.stage() >= GenerationStage::Terrain => ChunkStatus::Parked,
            None => ChunkStatus::Queued,
        }
    }

    /// Block at a world position. Air for anything outside the world or not
    /// yet generated.
    pub fn get_block(&self, position: Point3<i32>) -> BlockType {
        if !self.bounds.is_block_in_world(position) {
            return BlockType::Air;
        }
        let (coord, local) = self.bounds.dimensions.split(position);
        let Some(chunk) = self.chunk(coord) else {
            return BlockType::Air;
        };
        let c = chunk.get();
        if c.stage() == GenerationStage::Empty {
            return BlockType::Air;
        }
        c.block_at(local.x, local.y, local.z)
    }

    /// Highest non-air block of a world column, for map views.
    pub fn surface_block(&self, x: i32, z: i32) -> BlockType {
        let height = self.bounds.dimensions.height as i32;
        (0..height)
            .rev()
            .map(|y| self.get_block(Point3::new(x, y, z)))
            .find(|block| *block != BlockType::Air)
            .unwrap_or(BlockType::Air)
    }

    /// Writes a block, generating the owning chunk first if needed.
    ///
    /// The chunk is relit for that column and remeshed; a cardinal neighbour
    /// sharing the edited border is remeshed too. Returns `false` for
    /// out-of-world positions and no-op writes.
    pub fn set_block(&mut self, position: Point3<i32>, block: BlockType) -> bool {
        if !self.bounds.is_block_in_world(position) {
            return false;
        }
        let (coord, local) = self.bounds.dimensions.split(position);
        let Some(chunk) = self.ensure_resident(coord) else {
            return false;
        };
        if !chunk.get_mut().set_block(local, block) {
            return false;
        }

        let last = self.config.chunk_width - 1;
        let [north, east, south, west] = coord.cardinal_neighbours();
        let mut borders = Vec::new();
        if local.z == last {
            borders.push(north);
        }
        if local.x == last {
            borders.push(east);
        }
        if local.z == 0 {
            borders.push(south);
        }
        if local.x == 0 {
            borders.push(west);
        }

        self.advance(coord);
        for neighbour in borders {
            if let Some(handle) = self.chunk(neighbour) {
                handle.get_mut().require_remesh();
                self.advance(neighbour);
            }
        }
        true
    }

    /// Queues a structure block at a world position.
    ///
    /// Before terrain exists the override is stored on the chunk and stamped
    /// after the fill; afterwards it behaves like `set_block`.
    pub fn place_structure(&mut self, position: Point3<i32>, block: BlockType) -> bool {
        if !self.bounds.is_block_in_world(position) {
            return false;
        }
        let (coord, local) = self.bounds.dimensions.split(position);
        let (chunk, _) = self.insert_if_absent(coord);

        let has_terrain = chunk.get().stage() != GenerationStage::Empty;
        if has_terrain {
            return self.set_block(position, block);
        }
        let placed = chunk.get_mut().add_structure(StructurePlacement { local, block });
        self.advance(coord);
        placed
    }

    /// Takes the meshes finished since the last call, oldest first. A chunk
    /// meshed twice between drains appears twice; the later entry wins.
    pub fn drain_mesh_uploads(&mut self) -> Vec<MeshUpload> {
        self.uploads.drain(..).collect()
    }

    /// Takes the show/hide notices raised since the last call, in order.
    pub fn drain_visibility_changes(&mut self) -> Vec<VisibilityChange> {
        self.visibility.drain(..).collect()
    }

    /// Takes the coordinates destroyed since the last call, oldest first.
    ///
    /// A coordinate may appear here without a mesh ever having been uploaded
    /// for it. It can also come back later: it is then regenerated and its new
    /// mesh arrives through `drain_mesh_uploads`.
    pub fn drain_evictions(&mut self) -> Vec<ChunkCoord> {
        self.evictions.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::new(8, crate::engine_state::voxels::coords::ChunkDimensions::new(16, 256))
    }

    #[test]
    fn desired_set_is_an_inclusive_square() {
        let set = desired_set(&bounds(), ChunkCoord::new(4, 4), 1);
        assert_eq!(set.len(), 9);
        assert!(set.contains(&ChunkCoord::new(3, 5)));
        assert!(set.contains(&ChunkCoord::new(5, 3)));
        assert!(!set.contains(&ChunkCoord::new(6, 4)));
    }

    #[test]
    fn desired_set_is_clipped_to_the_world() {
        let set = desired_set(&bounds(), ChunkCoord::new(0, 0), 2);
        assert_eq!(set.len(), 9);
        assert!(set.iter().all(|c| c.x >= 0 && c.z >= 0));

        assert!(desired_set(&bounds(), ChunkCoord::new(-10, 3), 2).is_empty());
    }

    #[test]
    fn zero_view_distance_keeps_only_the_centre() {
        let set = desired_set(&bounds(), ChunkCoord::new(2, 2), 0);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![ChunkCoord::new(2, 2)]);
    }
}
