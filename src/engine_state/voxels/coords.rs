//! # Coordinate Model
//!
//! The world is column-stacked: chunks are addressed by a 2-D `(x, z)`
//! coordinate and span the full vertical extent. Blocks are addressed by 3-D
//! integer world positions. This module owns the index math between the two.

use cgmath::Point3;

/// Identity of a chunk column. Equality and hashing are by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Chunk containing a continuous world position (floor division by width).
    pub fn from_world_position(position: Point3<f32>, width: usize) -> Self {
        let width = width as f32;
        ChunkCoord {
            x: (position.x / width).floor() as i32,
            z: (position.z / width).floor() as i32,
        }
    }

    /// Chunk containing an integer block position.
    pub fn from_block(block: Point3<i32>, width: usize) -> Self {
        let width = width as i32;
        ChunkCoord {
            x: block.x.div_euclid(width),
            z: block.z.div_euclid(width),
        }
    }

    /// World-space block position of this chunk's `(0, 0, 0)` corner.
    pub fn origin(&self, width: usize) -> Point3<i32> {
        let width = width as i32;
        Point3::new(self.x * width, 0, self.z * width)
    }

    /// Cardinal neighbours, in the order north (+z), east (+x), south (-z), west (-x).
    pub fn cardinal_neighbours(&self) -> [ChunkCoord; 4] {
        [
            ChunkCoord::new(self.x, self.z + 1),
            ChunkCoord::new(self.x + 1, self.z),
            ChunkCoord::new(self.x, self.z - 1),
            ChunkCoord::new(self.x - 1, self.z),
        ]
    }

    /// All eight surrounding chunks, clockwise from north.
    pub fn all_neighbours(&self) -> [ChunkCoord; 8] {
        [
            ChunkCoord::new(self.x, self.z + 1),
            ChunkCoord::new(self.x + 1, self.z + 1),
            ChunkCoord::new(self.x + 1, self.z),
            ChunkCoord::new(self.x + 1, self.z - 1),
            ChunkCoord::new(self.x, self.z - 1),
            ChunkCoord::new(self.x - 1, self.z - 1),
            ChunkCoord::new(self.x - 1, self.z),
            ChunkCoord::new(self.x - 1, self.z + 1),
        ]
    }

    /// Chebyshev distance in chunks.
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// Cardinal directions used to address the four neighbours a mesh depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [Cardinal::North, Cardinal::East, Cardinal::South, Cardinal::West];
}

/// Fixed extent of every chunk.
///
/// Voxels are linearised as `x + z * W + y * W * W`, so one horizontal slice
/// is contiguous and a column is strided by `W * W`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkDimensions {
    pub width: usize,
    pub height: usize,
}

impl ChunkDimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        ChunkDimensions { width, height }
    }

    /// Blocks in one horizontal slice (`W * W`).
    pub const fn columns(&self) -> usize {
        self.width * self.width
    }

    /// Blocks in the whole chunk (`W * W * H`).
    pub const fn volume(&self) -> usize {
        self.columns() * self.height
    }

    #[inline]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + z * self.width + y * self.width * self.width
    }

    #[inline]
    pub const fn column_index(&self, x: usize, z: usize) -> usize {
        x + z * self.width
    }

    /// Whether a signed local position lies inside the chunk.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && z >= 0
            && y >= 0
            && (x as usize) < self.width
            && (z as usize) < self.width
            && (y as usize) < self.height
    }

    /// Splits a world block position into its chunk and local offset.
    pub fn split(&self, block: Point3<i32>) -> (ChunkCoord, Point3<usize>) {
        let coord = ChunkCoord::from_block(block, self.width);
        let width = self.width as i32;
        let local = Point3::new(
            block.x.rem_euclid(width) as usize,
            block.y.max(0) as usize,
            block.z.rem_euclid(width) as usize,
        );
        (coord, local)
    }
}

/// Square, finite world extent, `0..size` chunks along x and z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldBounds {
    pub size_in_chunks: i32,
    pub dimensions: ChunkDimensions,
}

impl WorldBounds {
    pub const fn new(size_in_chunks: i32, dimensions: ChunkDimensions) -> Self {
        WorldBounds {
            size_in_chunks,
            dimensions,
        }
    }

    pub fn size_in_blocks(&self) -> i64 {
        self.size_in_chunks as i64 * self.dimensions.width as i64
    }

    pub fn is_chunk_in_world(&self, coord: ChunkCoord) -> bool {
        coord.x >= 0
            && coord.x < self.size_in_chunks
            && coord.z >= 0
            && coord.z < self.size_in_chunks
    }

    pub fn is_block_in_world(&self, block: Point3<i32>) -> bool {
        let size = self.size_in_blocks();
        (block.x as i64) >= 0
            && (block.x as i64) < size
            && block.y >= 0
            && (block.y as usize) < self.dimensions.height
            && (block.z as i64) >= 0
            && (block.z as i64) < size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearisation_is_x_then_z_then_y() {
        let dims = ChunkDimensions::new(16, 256);
        assert_eq!(dims.index(0, 0, 0), 0);
        assert_eq!(dims.index(1, 0, 0), 1);
        assert_eq!(dims.index(0, 0, 1), 16);
        assert_eq!(dims.index(0, 1, 0), 256);
        assert_eq!(dims.index(15, 255, 15), dims.volume() - 1);
    }

    #[test]
    fn world_position_floors_toward_negative_infinity() {
        assert_eq!(
            ChunkCoord::from_world_position(Point3::new(-0.5, 10.0, 17.0), 16),
            ChunkCoord::new(-1, 1)
        );
        assert_eq!(
            ChunkCoord::from_block(Point3::new(-1, 0, 16), 16),
            ChunkCoord::new(-1, 1)
        );
    }

    #[test]
    fn split_returns_local_offsets() {
        let dims = ChunkDimensions::new(16, 256);
        let (coord, local) = dims.split(Point3::new(35, 70, -3));
        assert_eq!(coord, ChunkCoord::new(2, -1));
        assert_eq!(local, Point3::new(3, 70, 13));
    }

    #[test]
    fn bounds_reject_outside_coordinates() {
        let bounds = WorldBounds::new(4, ChunkDimensions::new(16, 256));
        assert!(bounds.is_chunk_in_world(ChunkCoord::new(0, 3)));
        assert!(!bounds.is_chunk_in_world(ChunkCoord::new(-1, 0)));
        assert!(!bounds.is_chunk_in_world(ChunkCoord::new(4, 0)));
        assert!(bounds.is_block_in_world(Point3::new(63, 255, 0)));
        assert!(!bounds.is_block_in_world(Point3::new(64, 0, 0)));
        assert!(!bounds.is_block_in_world(Point3::new(0, 256, 0)));
        assert!(!bounds.is_block_in_world(Point3::new(0, -1, 0)));
    }

    #[test]
    fn cardinal_order_matches_enum() {
        let n = ChunkCoord::new(5, 5).cardinal_neighbours();
        assert_eq!(n[Cardinal::North as usize], ChunkCoord::new(5, 6));
        assert_eq!(n[Cardinal::East as usize], ChunkCoord::new(6, 5));
        assert_eq!(n[Cardinal::South as usize], ChunkCoord::new(5, 4));
        assert_eq!(n[Cardinal::West as usize], ChunkCoord::new(4, 5));
    }
}
