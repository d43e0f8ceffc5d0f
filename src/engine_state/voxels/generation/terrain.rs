//! # Terrain Generator
//!
//! Turns a chunk coordinate into a complete block, biome and height fill.
//!
//! For each column the generator samples three climate fields (land,
//! temperature, humidity), classifies a biome, derives a terrain height from
//! the land fraction and fills the column bottom-up:
//!
//! | y                              | block                 |
//! |--------------------------------|-----------------------|
//! | `0`                            | bedrock               |
//! | `0 < y < height`               | stone                 |
//! | `height`                       | biome surface block   |
//! | `y > height`, `y == water`     | water                 |
//! | above both                     | air (left unfilled)   |
//!
//! Output depends only on `(coordinate, seed)` and the world config.

use crate::engine_state::config::{NoiseLayer, WorldConfig};
use crate::engine_state::voxels::biome::Biome;
use crate::engine_state::voxels::block::BlockType;
use crate::engine_state::voxels::coords::{ChunkCoord, ChunkDimensions};
use crate::engine_state::voxels::noise_engine::NoiseEngine;

/// Block, biome and height arrays for one chunk, ready to move into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainFill {
    /// Block ids in `ChunkDimensions::index` order.
    pub blocks: Vec<u8>,
    /// One biome id per column.
    pub biomes: Vec<u8>,
    /// Surface height per column.
    pub heights: Vec<u16>,
}

/// Climate of one column, each field in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnClimate {
    pub land: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl ColumnClimate {
    pub fn biome(&self) -> Biome {
        Biome::classify(self.land, self.temperature, self.humidity)
    }
}

/// Deterministic column filler. Shared read-only across workers.
pub struct TerrainGenerator {
    noise: NoiseEngine,
    dims: ChunkDimensions,
    land: NoiseLayer,
    temperature: NoiseLayer,
    humidity: NoiseLayer,
    min_terrain_height: usize,
    max_terrain_height: usize,
    water_level: usize,
}

impl TerrainGenerator {
    /// Builds a generator from an already validated config.
    pub fn new(config: &WorldConfig) -> Self {
        TerrainGenerator {
            noise: NoiseEngine::new(config.seed, config.chunk_width),
            dims: config.dimensions(),
            land: config.land,
            temperature: config.temperature,
            humidity: config.humidity,
            min_terrain_height: config.min_terrain_height,
            max_terrain_height: config.max_terrain_height,
            water_level: config.water_level,
        }
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    pub fn water_level(&self) -> usize {
        self.water_level
    }

    pub fn noise(&self) -> &NoiseEngine {
        &self.noise
    }

    /// Samples the climate of the column at world block `(x, z)`.
    pub fn climate_at(&self, x: i32, z: i32) -> ColumnClimate {
        let pos = [x as f64, z as f64];

        let land = blend(
            self.noise.sample_2d(pos, self.land),
            self.noise.sample_2d(pos, scaled(self.land, 8.0)),
            5.0,
        );
        let temperature = blend(
            self.noise.sample_2d(pos, self.temperature),
            self.noise.sample_2d(pos, scaled(self.temperature, 6.0)),
            4.0,
        );
        let humidity = blend(
            self.noise.sample_2d(pos, self.humidity),
            self.noise.sample_2d(pos, scaled(self.humidity, 6.0)),
            4.0,
        );

        ColumnClimate {
            land,
            temperature,
            humidity,
        }
    }

    /// Terrain height for a land fraction, clamped inside the chunk.
    pub fn column_height(&self, land: f64) -> usize {
        let h = (self.max_terrain_height as f64 * land).floor().max(0.0) as usize
            + self.min_terrain_height;
        h.min(self.dims.height - 1)
    }

    pub fn generate(&self, coord: ChunkCoord) -> TerrainFill {
        let dims = self.dims;
        let origin = coord.origin(dims.width);

        let mut blocks = vec![BlockType::Air.id(); dims.volume()];
        let mut biomes = vec![Biome::Plains.id(); dims.columns()];
        let mut heights = vec![0u16; dims.columns()];

        for z in 0..dims.width {
            for x in 0..dims.width {
                let climate = self.climate_at(origin.x + x as i32, origin.z + z as i32);
                let biome = climate.biome();
                let height = self.column_height(climate.land);

                self.fill_column(&mut blocks, x, z, height, biome.surface_block());

                let column = dims.column_index(x, z);
                biomes[column] = biome.id();
                heights[column] = height as u16;
            }
        }

        TerrainFill {
            blocks,
            biomes,
            heights,
        }
    }

    /// Writes one column bottom-up. Cells above both the surface and the
    /// water level are left untouched.
    pub fn fill_column(
        &self,
        blocks: &mut [u8],
        x: usize,
        z: usize,
        height: usize,
        surface: BlockType,
    ) {
        for y in 0..self.dims.height {
            let block = if y == 0 {
                BlockType::Bedrock
            } else if y < height {
                BlockType::Stone
            } else if y == height {
                surface
            } else if y == self.water_level {
                BlockType::Water
            } else if y > self.water_level {
                break;
            } else {
                continue;
            };
            blocks[self.dims.index(x, y, z)] = block.id();
        }
    }
}

#[inline]
fn scaled(layer: NoiseLayer, factor: f64) -> NoiseLayer {
    NoiseLayer::new(layer.offset, layer.scale * factor)
}

/// Two-octave blend `(a + b / weight) / (1 + 1 / weight)`.
#[inline]
fn blend(a: f64, b: f64, weight: f64) -> f64 {
    (a + b / weight) / (1.0 + 1.0 / weight)
}
