//! Top-down sunlight propagation.
//!
//! Light only travels straight down inside a column. Lateral bleed between
//! columns or across chunk borders is not modelled.

use crate::engine_state::voxels::block::BlockType;
use crate::engine_state::voxels::coords::ChunkDimensions;

/// Full sunlight.
pub const MAX_LIGHT: u8 = 15;

/// Lights every column of a chunk. `light` is overwritten.
pub fn propagate_sunlight(blocks: &[u8], light: &mut [u8], dims: ChunkDimensions) {
    light.fill(0);
    for z in 0..dims.width {
        for x in 0..dims.width {
            sweep_column(blocks, light, dims, x, z);
        }
    }
}

/// Relights only the listed columns (indices from [`ChunkDimensions::column_index`]).
pub fn relight_columns(blocks: &[u8], light: &mut [u8], dims: ChunkDimensions, columns: &[usize]) {
    for &column in columns {
        let x = column % dims.width;
        let z = column / dims.width;
        for y in 0..dims.height {
            light[dims.index(x, y, z)] = 0;
        }
        sweep_column(blocks, light, dims, x, z);
    }
}

fn sweep_column(blocks: &[u8], light: &mut [u8], dims: ChunkDimensions, x: usize, z: usize) {
    for y in (0..dims.height).rev() {
        let index = dims.index(x, y, z);
        if !BlockType::from_id(blocks[index]).passes_sunlight() {
            break;
        }
        light[index] = MAX_LIGHT;
    }
}
