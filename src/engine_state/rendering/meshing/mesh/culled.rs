//! Face-culled meshing.
//!
//! One quad is emitted per voxel face whose far side is not hidden. Border
//! faces look into the four cardinal neighbours' block arrays.

use crate::engine_state::voxels::block::{BlockSide, BlockType};
use crate::engine_state::voxels::coords::{Cardinal, ChunkDimensions};

use super::face::Face;
use super::mesh::ChunkMesh;

/// Borrowed input for one meshing call.
///
/// `neighbours` is indexed by [`Cardinal`]. A `None` neighbour hides every
/// face on that border.
pub struct MeshInput<'a> {
    pub dims: ChunkDimensions,
    pub blocks: &'a [u8],
    pub neighbours: [Option<&'a [u8]>; 4],
    /// Cells per atlas row, used to turn block ids into UVs.
    pub atlas_size: u32,
}

/// What lies on the far side of a face.
enum Across {
    Block(BlockType),
    /// Above the top or below the bottom of the world.
    OutsideColumn,
    /// Horizontal neighbour that is not available.
    Missing,
}

impl MeshInput<'_> {
    fn across(&self, x: usize, y: usize, z: usize, side: BlockSide) -> Across {
        let dims = self.dims;
        let [dx, dy, dz] = side.offset();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        let nz = z as i32 + dz;

        if ny < 0 || ny >= dims.height as i32 {
            return Across::OutsideColumn;
        }
        if dims.contains(nx, ny, nz) {
            return Across::Block(BlockType::from_id(
                self.blocks[dims.index(nx as usize, ny as usize, nz as usize)],
            ));
        }

        let w = dims.width as i32;
        let (direction, lx, lz) = if nz >= w {
            (Cardinal::North, nx, 0)
        } else if nz < 0 {
            (Cardinal::South, nx, w - 1)
        } else if nx >= w {
            (Cardinal::East, 0, nz)
        } else {
            (Cardinal::West, w - 1, nz)
        };

        match self.neighbours[direction as usize] {
            Some(blocks) => Across::Block(BlockType::from_id(
                blocks[dims.index(lx as usize, ny as usize, lz as usize)],
            )),
            None => Across::Missing,
        }
    }
}

/// A face is drawn when the block across it is neither opaque nor the same
/// see-through block (no walls between two water cells).
fn face_visible(block: BlockType, across: Across) -> bool {
    match across {
        Across::OutsideColumn => true,
        Across::Missing => false,
        Across::Block(other) => !other.is_opaque() && other != block,
    }
}

/// Builds the mesh for one chunk.
pub fn build_mesh(input: &MeshInput) -> ChunkMesh {
    let dims = input.dims;
    let mut mesh = ChunkMesh::new();

    for y in 0..dims.height {
        for z in 0..dims.width {
            for x in 0..dims.width {
                let block = BlockType::from_id(input.blocks[dims.index(x, y, z)]);
                if block == BlockType::Air {
                    continue;
                }
                for side in BlockSide::all() {
                    if face_visible(block, input.across(x, y, z, side)) {
                        mesh.push_face(&Face::new(x, y, z, block, side), input.atlas_size);
                    }
                }
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: ChunkDimensions = ChunkDimensions::new(4, 4);

    fn air() -> Vec<u8> {
        vec![BlockType::Air.id(); DIMS.volume()]
    }

    fn mesh(blocks: &[u8], neighbours: [Option<&[u8]>; 4]) -> ChunkMesh {
        build_mesh(&MeshInput {
            dims: DIMS,
            blocks,
            neighbours,
            atlas_size: 16,
        })
    }

    #[test]
    fn isolated_voxel_has_six_faces() {
        let mut blocks = air();
        blocks[DIMS.index(1, 1, 1)] = BlockType::Stone.id();
        let m = mesh(&blocks, [None; 4]);
        assert_eq!(m.face_count(), 6);
        assert_eq!(m.opaque_indices.len(), 36);
        assert_eq!(m.vertices.len(), 24);
    }

    #[test]
    fn adjacent_voxels_hide_shared_faces() {
        let mut blocks = air();
        blocks[DIMS.index(1, 1, 1)] = BlockType::Stone.id();
        blocks[DIMS.index(2, 1, 1)] = BlockType::Dirt.id();
        assert_eq!(mesh(&blocks, [None; 4]).face_count(), 10);
    }

    #[test]
    fn border_faces_follow_neighbour_blocks() {
        let mut blocks = air();
        blocks[DIMS.index(3, 1, 1)] = BlockType::Stone.id();

        let open = air();
        let mut solid = air();
        solid[DIMS.index(0, 1, 1)] = BlockType::Stone.id();

        let east = Cardinal::East as usize;
        let mut neighbours: [Option<&[u8]>; 4] = [Some(&open); 4];
        assert_eq!(mesh(&blocks, neighbours).face_count(), 6);

        neighbours[east] = Some(&solid);
        assert_eq!(mesh(&blocks, neighbours).face_count(), 5);

        neighbours[east] = None;
        assert_eq!(mesh(&blocks, neighbours).face_count(), 5);
    }

    #[test]
    fn water_surface_is_transparent_and_internal_water_is_culled() {
        let mut blocks = air();
        for x in 0..DIMS.width {
            for z in 0..DIMS.width {
                blocks[DIMS.index(x, 0, z)] = BlockType::Stone.id();
                blocks[DIMS.index(x, 1, z)] = BlockType::Water.id();
            }
        }
        let m = mesh(&blocks, [None; 4]);
        // Water shows only its surface. Stone shows its bottom and the floor under the water.
        assert_eq!(m.transparent_face_count(), 16);
        assert_eq!(m.opaque_face_count(), 32);
    }

    #[test]
    fn top_and_bottom_of_column_are_emitted() {
        let mut blocks = air();
        blocks[DIMS.index(1, 0, 1)] = BlockType::Bedrock.id();
        blocks[DIMS.index(1, 3, 1)] = BlockType::Stone.id();
        let m = mesh(&blocks, [None; 4]);
        assert_eq!(m.face_count(), 12);
    }
}
