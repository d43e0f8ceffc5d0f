//! # Chunk Module
//!
//! The `Chunk` is the unit of generation, storage and meshing: a `W x H x W`
//! column of voxels with parallel per-voxel light, per-column biome and
//! height arrays, and the bookkeeping the streaming controller needs to drive
//! it through the pipeline.
//!
//! ## Pipeline
//!
//! ```text
//! Empty --terrain--> Terrain --lighting--> Lighting --mesh--> Meshed
//!                       ^                                       |
//!                       +------------ block edit ---------------+
//! ```
//!
//! A block edit drops the stage back to `Terrain` with the touched columns
//! recorded, so only those columns are relit before the chunk is remeshed.
//!
//! ## Storage
//!
//! Every array is flat. Voxels use the linearisation described on
//! [`ChunkDimensions`]; per-column arrays use `x + z * W`.

use cgmath::Point3;

use super::biome::Biome;
use super::block::BlockType;
use super::coords::{ChunkCoord, ChunkDimensions};
use super::generation::{propagate_sunlight, relight_columns, TerrainFill};

/// Progress of a chunk through the generation pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenerationStage {
    Empty,
    Terrain,
    Lighting,
    Meshed,
}

/// A unit of pipeline work that can be in flight for a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    Terrain,
    Lighting,
    Mesh,
}

impl PipelineStep {
    /// The stage a chunk reaches once this step completes.
    pub const fn target_stage(self) -> GenerationStage {
        match self {
            PipelineStep::Terrain => GenerationStage::Terrain,
            PipelineStep::Lighting => GenerationStage::Lighting,
            PipelineStep::Mesh => GenerationStage::Meshed,
        }
    }
}

/// Which columns the next lighting run must recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LightingScope {
    Full,
    Columns(Vec<usize>),
}

impl LightingScope {
    fn add_column(&mut self, column: usize) {
        if let LightingScope::Columns(columns) = self {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
}

/// A single block override applied on top of the terrain fill.
///
/// Placements are produced by an external structure pass; the chunk only
/// stores them until its terrain exists and then stamps them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructurePlacement {
    pub local: Point3<usize>,
    pub block: BlockType,
}

/// One column of the world: flat block, light, biome and height arrays plus
/// its place in the generation pipeline.
pub struct Chunk {
    /// Identity. Never changes after construction.
    pub coord: ChunkCoord,
    dims: ChunkDimensions,
    blocks: Vec<u8>,
    light: Vec<u8>,
    biome: Vec<u8>,
    height_map: Vec<u16>,
    structures: Vec<StructurePlacement>,
    dirty: bool,
    stage: GenerationStage,
    /// Inside the observer's window. Only active chunks are meshed.
    pub is_active: bool,
    /// Step currently queued or running on a worker, if any.
    pub in_flight: Option<PipelineStep>,
    data_version: u64,
    pending_light: Option<LightingScope>,
}

impl Chunk {
    /// Creates an `Empty` chunk. Buffers are allocated but hold only air.
    pub fn new(coord: ChunkCoord, dims: ChunkDimensions) -> Self {
        Chunk {
            coord,
            dims,
            blocks: vec![BlockType::Air.id(); dims.volume()],
            light: vec![0; dims.volume()],
            biome: vec![Biome::Plains.id(); dims.columns()],
            height_map: vec![0; dims.columns()],
            structures: Vec::new(),
            dirty: false,
            stage: GenerationStage::Empty,
            is_active: false,
            in_flight: None,
            data_version: 0,
            pending_light: None,
        }
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    pub fn stage(&self) -> GenerationStage {
        self.stage
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the mesh stale. Idempotent.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Bumped whenever the inputs of this chunk's mesh change. Meshes
    /// remember the version they were built from.
    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    pub fn blocks(&self) -> &[u8] {
        &self.blocks
    }

    pub fn light(&self) -> &[u8] {
        &self.light
    }

    pub fn biomes(&self) -> &[u8] {
        &self.biome
    }

    pub fn height_map(&self) -> &[u16] {
        &self.height_map
    }

    pub fn pending_structures(&self) -> &[StructurePlacement] {
        &self.structures
    }

    pub fn pending_light(&self) -> Option<&LightingScope> {
        self.pending_light.as_ref()
    }

    pub fn block_at(&self, x: usize, y: usize, z: usize) -> BlockType {
        BlockType::from_id(self.blocks[self.dims.index(x, y, z)])
    }

    pub fn light_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.light[self.dims.index(x, y, z)]
    }

    pub fn biome_at(&self, x: usize, z: usize) -> Biome {
        Biome::from_id(self.biome[self.dims.column_index(x, z)])
    }

    pub fn height_at(&self, x: usize, z: usize) -> usize {
        self.height_map[self.dims.column_index(x, z)] as usize
    }

    /// Moves a terrain fill into an `Empty` chunk and stamps pending structures.
    ///
    /// Returns `false` and leaves the chunk untouched if terrain already
    /// exists; the first fill wins.
    pub fn apply_terrain(&mut self, fill: TerrainFill) -> bool {
        if self.stage != GenerationStage::Empty {
            return false;
        }
        self.blocks = fill.blocks;
        self.biome = fill.biomes;
        self.height_map = fill.heights;

        for placement in std::mem::take(&mut self.structures) {
            self.write_structure(placement);
        }

        self.stage = GenerationStage::Terrain;
        self.pending_light = Some(LightingScope::Full);
        self.data_version += 1;
        true
    }

    /// Queues a structure override. Applied immediately when terrain exists.
    pub fn add_structure(&mut self, placement: StructurePlacement) -> bool {
        if !self.dims.contains(
            placement.local.x as i32,
            placement.local.y as i32,
            placement.local.z as i32,
        ) {
            return false;
        }
        if self.stage == GenerationStage::Empty {
            self.structures.push(placement);
        } else {
            self.set_block(placement.local, placement.block);
        }
        true
    }

    fn write_structure(&mut self, placement: StructurePlacement) {
        let p = placement.local;
        self.blocks[self.dims.index(p.x, p.y, p.z)] = placement.block.id();
    }

    /// Writes a block after terrain generation.
    ///
    /// Records the column for relighting, drops the stage back to `Terrain`
    /// and sets `dirty`. Returns `false` if the chunk has no terrain yet or the
    /// block is unchanged.
    pub fn set_block(&mut self, local: Point3<usize>, block: BlockType) -> bool {
        if self.stage == GenerationStage::Empty {
            return false;
        }
        let index = self.dims.index(local.x, local.y, local.z);
        if self.blocks[index] == block.id() {
            return false;
        }
        self.blocks[index] = block.id();
        self.data_version += 1;

        let column = self.dims.column_index(local.x, local.z);
        match &mut self.pending_light {
            Some(scope) => scope.add_column(column),
            None => self.pending_light = Some(LightingScope::Columns(vec![column])),
        }
        self.stage = GenerationStage::Terrain;
        self.dirty = true;
        true
    }

    /// Hands the pending lighting work to a task.
    pub fn take_pending_light(&mut self) -> Option<LightingScope> {
        self.pending_light.take()
    }

    /// Recomputes sunlight for `scope` from the current blocks.
    ///
    /// The stage only advances when no further edits arrived since the scope
    /// was taken.
    pub fn apply_lighting(&mut self, scope: &LightingScope) {
        match scope {
            LightingScope::Full => propagate_sunlight(&self.blocks, &mut self.light, self.dims),
            LightingScope::Columns(columns) => {
                relight_columns(&self.blocks, &mut self.light, self.dims, columns)
            }
        }
        if self.pending_light.is_none() && self.stage == GenerationStage::Terrain {
            self.stage = GenerationStage::Lighting;
        }
    }

    /// Records a finished mesh built from `version`.
    ///
    /// Clears `dirty` and reaches `Meshed` only if the blocks did not change
    /// while the mesh was being built. Returns whether the mesh is current.
    pub fn complete_mesh(&mut self, version: u64) -> bool {
        if version != self.data_version || self.stage != GenerationStage::Lighting {
            return false;
        }
        self.dirty = false;
        self.stage = GenerationStage::Meshed;
        true
    }

    /// Drops the stage to `Lighting` so the chunk is remeshed without relighting.
    ///
    /// Used when a border edit in a neighbour changes which faces are visible
    /// here. Bumps the data version so a mesh already in flight is discarded.
    pub fn require_remesh(&mut self) {
        if self.stage == GenerationStage::Empty {
            return;
        }
        self.dirty = true;
        self.data_version += 1;
        if self.stage == GenerationStage::Meshed {
            self.stage = GenerationStage::Lighting;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: ChunkDimensions = ChunkDimensions::new(4, 8);

    fn flat_fill() -> TerrainFill {
        let mut blocks = vec![0u8; DIMS.volume()];
        for z in 0..4 {
            for x in 0..4 {
                blocks[DIMS.index(x, 0, z)] = BlockType::Bedrock.id();
                blocks[DIMS.index(x, 1, z)] = BlockType::Grass.id();
            }
        }
        TerrainFill {
            blocks,
            biomes: vec![Biome::Plains.id(); DIMS.columns()],
            heights: vec![1; DIMS.columns()],
        }
    }

    #[test]
    fn first_terrain_fill_wins() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        assert!(chunk.apply_terrain(flat_fill()));
        let mut other = flat_fill();
        other.blocks.fill(BlockType::Stone.id());
        assert!(!chunk.apply_terrain(other));
        assert_eq!(chunk.block_at(0, 1, 0), BlockType::Grass);
        assert_eq!(chunk.stage(), GenerationStage::Terrain);
    }

    #[test]
    fn structures_are_stamped_after_terrain() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        let placement = StructurePlacement {
            local: Point3::new(2, 2, 2),
            block: BlockType::Dirt,
        };
        assert!(chunk.add_structure(placement));
        assert_eq!(chunk.pending_structures().len(), 1);
        chunk.apply_terrain(flat_fill());
        assert!(chunk.pending_structures().is_empty());
        assert_eq!(chunk.block_at(2, 2, 2), BlockType::Dirt);
    }

    #[test]
    fn edit_reenters_pipeline_at_lighting() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        chunk.apply_terrain(flat_fill());
        let scope = chunk.take_pending_light().unwrap();
        chunk.apply_lighting(&scope);
        let version = chunk.data_version();
        assert!(chunk.complete_mesh(version));
        assert!(!chunk.is_dirty());

        assert!(chunk.set_block(Point3::new(1, 1, 3), BlockType::Air));
        assert!(chunk.is_dirty());
        assert_eq!(chunk.stage(), GenerationStage::Terrain);
        assert_eq!(
            chunk.pending_light(),
            Some(&LightingScope::Columns(vec![DIMS.column_index(1, 3)]))
        );
    }

    #[test]
    fn stale_mesh_keeps_chunk_dirty() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        chunk.apply_terrain(flat_fill());
        let scope = chunk.take_pending_light().unwrap();
        chunk.apply_lighting(&scope);
        chunk.mark_dirty();
        let seen = chunk.data_version();

        chunk.set_block(Point3::new(0, 3, 0), BlockType::Stone);
        let scope = chunk.take_pending_light().unwrap();
        chunk.apply_lighting(&scope);

        assert!(!chunk.complete_mesh(seen));
        assert!(chunk.is_dirty());
        assert!(chunk.complete_mesh(chunk.data_version()));
    }

    #[test]
    fn edit_during_lighting_holds_stage() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        chunk.apply_terrain(flat_fill());
        let scope = chunk.take_pending_light().unwrap();
        chunk.set_block(Point3::new(0, 2, 0), BlockType::Stone);
        chunk.apply_lighting(&scope);
        assert_eq!(chunk.stage(), GenerationStage::Terrain);
        assert!(chunk.pending_light().is_some());
    }

    #[test]
    fn lighting_advances_stage_and_fills_sky() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        chunk.apply_terrain(flat_fill());
        let scope = chunk.take_pending_light().unwrap();
        assert_eq!(scope, LightingScope::Full);
        chunk.apply_lighting(&scope);
        assert_eq!(chunk.stage(), GenerationStage::Lighting);
        assert_eq!(chunk.light_at(3, 2, 3), 15);
        assert_eq!(chunk.light_at(3, 1, 3), 0);
    }

    #[test]
    fn edits_before_terrain_are_rejected() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DIMS);
        assert!(!chunk.set_block(Point3::new(0, 0, 0), BlockType::Stone));
        assert_eq!(chunk.data_version(), 0);
    }
}
