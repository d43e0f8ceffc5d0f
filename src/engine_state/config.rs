//! # World Configuration
//!
//! Startup parameters for terrain generation and chunk streaming. A
//! `WorldConfig` is loaded once (from JSON or from defaults), validated, and
//! then shared read-only by every part of the engine. Validation is the only
//! place where fatal errors exist; once a world has been constructed the
//! pipeline is total.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::voxels::coords::ChunkDimensions;

/// Default horizontal chunk extent in blocks.
pub const DEFAULT_CHUNK_WIDTH: usize = 16;
/// Default vertical chunk extent in blocks.
pub const DEFAULT_CHUNK_HEIGHT: usize = 256;
/// Default edge length of the square world, in chunks.
pub const DEFAULT_WORLD_SIZE_IN_CHUNKS: i32 = 1024;
/// Default streaming radius, in chunks.
pub const DEFAULT_VIEW_DISTANCE: i32 = 8;
/// Default sea level.
pub const DEFAULT_WATER_LEVEL: usize = 63;

/// Fatal configuration problems, detected before any chunk is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk width must be greater than zero")]
    ZeroChunkWidth,
    #[error("chunk height must be greater than zero")]
    ZeroChunkHeight,
    #[error("world size must be at least one chunk, got {0}")]
    InvalidWorldSize(i32),
    #[error("view distance must not be negative, got {0}")]
    NegativeViewDistance(i32),
    #[error("at least one worker thread is required")]
    ZeroWorkers,
    #[error("at least one completed task must be folded back per tick")]
    ZeroCompletionBudget,
    #[error("texture atlas must have at least one cell per row")]
    ZeroAtlasSize,
    #[error("terrain band {min}..={max} does not fit in a chunk of height {height}")]
    TerrainExceedsHeight { min: usize, max: usize, height: usize },
    #[error("water level {level} is outside the chunk height {height}")]
    WaterLevelOutOfRange { level: usize, height: usize },
    #[error("resident budget {budget} is below the {required} chunks a view window keeps loaded")]
    ResidentBudgetTooSmall { budget: usize, required: usize },
    #[error("noise layer `{0}` must have a positive scale")]
    InvalidNoiseScale(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Offset and scale of one 2-D climate noise field.
///
/// `scale` is expressed in chunk-widths: a scale of 1.0 means one noise unit
/// per chunk, independent of the block resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Shift in noise space, added after scaling.
    pub offset: f64,
    pub scale: f64,
}

impl NoiseLayer {
    pub const fn new(offset: f64, scale: f64) -> Self {
        NoiseLayer { offset, scale }
    }
}

/// Every tunable of the terrain engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Process-wide world seed.
    pub seed: u32,
    /// Chunk footprint in blocks along x and z.
    pub chunk_width: usize,
    pub chunk_height: usize,
    /// Side length of the square world, in chunks.
    pub world_size_in_chunks: i32,
    /// Radius of the active window, in chunks.
    pub view_distance: i32,
    /// Height of the single water layer placed over low columns.
    pub water_level: usize,
    pub min_terrain_height: usize,
    pub max_terrain_height: usize,
    /// Continentalness layer; drives height and the ocean/land split.
    pub land: NoiseLayer,
    pub temperature: NoiseLayer,
    pub humidity: NoiseLayer,
    /// Number of cells per row of the square texture atlas.
    pub atlas_size: u32,
    /// Resident chunk budget. Inactive chunks beyond it are destroyed.
    pub max_resident_chunks: usize,
    /// Worker pool size. Defaults to the available parallelism.
    pub worker_threads: usize,
    /// Upper bound on completed jobs folded back per tick.
    pub max_completions_per_tick: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 69,
            chunk_width: DEFAULT_CHUNK_WIDTH,
            chunk_height: DEFAULT_CHUNK_HEIGHT,
            world_size_in_chunks: DEFAULT_WORLD_SIZE_IN_CHUNKS,
            view_distance: DEFAULT_VIEW_DISTANCE,
            water_level: DEFAULT_WATER_LEVEL,
            min_terrain_height: 16,
            max_terrain_height: 128,
            land: NoiseLayer::new(0.37, 0.08),
            temperature: NoiseLayer::new(113.41, 0.05),
            humidity: NoiseLayer::new(271.93, 0.05),
            atlas_size: 16,
            max_resident_chunks: 1024,
            worker_threads: std::thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1).max(1))
                .unwrap_or(2),
            max_completions_per_tick: 64,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every fatal condition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_width == 0 {
            return Err(ConfigError::ZeroChunkWidth);
        }
        if self.chunk_height == 0 {
            return Err(ConfigError::ZeroChunkHeight);
        }
        if self.world_size_in_chunks <= 0 {
            return Err(ConfigError::InvalidWorldSize(self.world_size_in_chunks));
        }
        if self.view_distance < 0 {
            return Err(ConfigError::NegativeViewDistance(self.view_distance));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.max_completions_per_tick == 0 {
            return Err(ConfigError::ZeroCompletionBudget);
        }
        if self.atlas_size == 0 {
            return Err(ConfigError::ZeroAtlasSize);
        }
        if self.min_terrain_height + self.max_terrain_height >= self.chunk_height {
            return Err(ConfigError::TerrainExceedsHeight {
                min: self.min_terrain_height,
                max: self.max_terrain_height,
                height: self.chunk_height,
            });
        }
        if self.water_level >= self.chunk_height {
            return Err(ConfigError::WaterLevelOutOfRange {
                level: self.water_level,
                height: self.chunk_height,
            });
        }
        let required = self.required_resident_chunks();
        if self.max_resident_chunks < required {
            return Err(ConfigError::ResidentBudgetTooSmall {
                budget: self.max_resident_chunks,
                required,
            });
        }
        for (name, layer) in [
            ("land", &self.land),
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
        ] {
            if !(layer.scale > 0.0 && layer.scale.is_finite()) {
                return Err(ConfigError::InvalidNoiseScale(name));
            }
        }
        Ok(())
    }

    /// Chunks resident around a stationary observer: the view square plus the
    /// ring of neighbours its border meshes read from.
    pub fn required_resident_chunks(&self) -> usize {
        let side = (2 * self.view_distance.max(0) as usize) + 3;
        side * side
    }

    /// Per-chunk block layout derived from `chunk_width` and `chunk_height`.
    pub fn dimensions(&self) -> ChunkDimensions {
        ChunkDimensions::new(self.chunk_width, self.chunk_height)
    }

    pub fn world_size_in_blocks(&self) -> i64 {
        self.world_size_in_chunks as i64 * self.chunk_width as i64
    }

    /// Spawn point at the centre of the world, well above the terrain band.
    pub fn spawn_point(&self) -> cgmath::Point3<f32> {
        let half = self.world_size_in_blocks() as f32 / 2.0;
        cgmath::Point3::new(half, 128.0f32.min(self.chunk_height as f32 - 1.0), half)
    }
}
