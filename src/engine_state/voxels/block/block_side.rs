//! # Block Side Module
//!
//! The six faces of a voxel cube, with the geometry each face contributes to a
//! mesh: its outward normal, the neighbour it faces, and which of the eight
//! shared cube corners it spans.

use cgmath::Vector3;

/// The eight corners of a unit cube, shared by every face template.
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// UVs for the four corners of a face, in template order.
pub const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

/// Two triangles over the four template corners.
pub const FACE_TRIANGLES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// Represents the six possible faces of a voxel block.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// Facing negative Z
    Back = 0,
    /// Facing positive Z
    Front = 1,
    /// Facing positive Y
    Top = 2,
    /// Facing negative Y
    Bottom = 3,
    /// Facing negative X
    Left = 4,
    /// Facing positive X
    Right = 5,
}

impl BlockSide {
    /// All six faces in template order.
    pub const fn all() -> [BlockSide; 6] {
        [
            BlockSide::Back,
            BlockSide::Front,
            BlockSide::Top,
            BlockSide::Bottom,
            BlockSide::Left,
            BlockSide::Right,
        ]
    }

    /// Offset from a voxel to the voxel this face looks at.
    pub const fn offset(self) -> [i32; 3] {
        match self {
            BlockSide::Back => [0, 0, -1],
            BlockSide::Front => [0, 0, 1],
            BlockSide::Top => [0, 1, 0],
            BlockSide::Bottom => [0, -1, 0],
            BlockSide::Left => [-1, 0, 0],
            BlockSide::Right => [1, 0, 0],
        }
    }

    pub fn normal(self) -> Vector3<f32> {
        let [x, y, z] = self.offset();
        Vector3::new(x as f32, y as f32, z as f32)
    }

    /// Indices into [`CUBE_CORNERS`] for this face, ordered to match
    /// [`FACE_UVS`] and [`FACE_TRIANGLES`].
    pub const fn corners(self) -> [usize; 4] {
        match self {
            BlockSide::Back => [0, 3, 1, 2],
            BlockSide::Front => [5, 6, 4, 7],
            BlockSide::Top => [3, 7, 2, 6],
            BlockSide::Bottom => [1, 5, 0, 4],
            BlockSide::Left => [4, 7, 0, 3],
            BlockSide::Right => [1, 2, 5, 6],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let offset = side.offset();
            let axis = offset.iter().position(|c| *c != 0).unwrap();
            let plane = if offset[axis] > 0 { 1.0 } else { 0.0 };
            for corner in side.corners() {
                assert_eq!(CUBE_CORNERS[corner][axis], plane, "{side:?}");
            }
        }
    }

    #[test]
    fn both_triangles_face_along_the_normal() {
        for side in BlockSide::all() {
            let c = side.corners().map(|i| Vector3::from(CUBE_CORNERS[i]));
            for tri in FACE_TRIANGLES.chunks(3) {
                let (a, b, d) = (c[tri[0] as usize], c[tri[1] as usize], c[tri[2] as usize]);
                let n = (b - a).cross(d - a);
                assert!(cgmath::dot(n, side.normal()) > 0.0, "{side:?}");
            }
        }
    }
}
