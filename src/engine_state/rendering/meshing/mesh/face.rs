use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::{BlockSide, CUBE_CORNERS, FACE_UVS};
use crate::engine_state::voxels::block::BlockType;

/// A single visible quad of a voxel.
///
/// Corners come from the shared cube template for `block_side`, offset by the
/// voxel's chunk-local position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Voxel position in chunk coordinates
    pub position: Point3<usize>,
    pub block_type: BlockType,
    pub block_side: BlockSide,
}

impl Face {
    pub fn new(x: usize, y: usize, z: usize, block_type: BlockType, block_side: BlockSide) -> Self {
        Face {
            position: Point3::new(x, y, z),
            block_type,
            block_side,
        }
    }

    /// The four corner positions, in template order.
    pub fn vertices(&self) -> [[f32; 3]; 4] {
        let p = self.position;
        self.block_side.corners().map(|corner| {
            let [cx, cy, cz] = CUBE_CORNERS[corner];
            [p.x as f32 + cx, p.y as f32 + cy, p.z as f32 + cz]
        })
    }

    /// Atlas UVs for the four corners, in template order.
    ///
    /// The unit UV template is shrunk to one atlas cell and moved to the
    /// block's cell.
    pub fn uvs(&self, atlas_size: u32) -> [[f32; 2]; 4] {
        let cell = 1.0 / atlas_size as f32;
        let (cx, cy) = self.block_type.atlas_cell(atlas_size);
        FACE_UVS.map(|[u, v]| [(cx as f32 + u) * cell, (cy as f32 + v) * cell])
    }

    /// Faces of liquids and foliage go to the transparent pass.
    pub fn is_transparent(&self) -> bool {
        self.block_type.is_translucent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_face_sits_one_above_the_voxel() {
        let face = Face::new(2, 5, 3, BlockType::Stone, BlockSide::Top);
        for [_, y, _] in face.vertices() {
            assert_eq!(y, 6.0);
        }
    }

    #[test]
    fn uvs_stay_inside_the_block_cell() {
        let face = Face::new(0, 0, 0, BlockType::Sand, BlockSide::Front);
        let (cx, cy) = BlockType::Sand.atlas_cell(4);
        for [u, v] in face.uvs(4) {
            assert!(u >= cx as f32 * 0.25 && u <= (cx + 1) as f32 * 0.25);
            assert!(v >= cy as f32 * 0.25 && v <= (cy + 1) as f32 * 0.25);
        }
    }
}
