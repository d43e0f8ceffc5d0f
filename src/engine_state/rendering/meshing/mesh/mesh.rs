//! Mesh buffers handed to the external renderer.

use crate::engine_state::voxels::block::block_side::FACE_TRIANGLES;

use super::face::Face;

/// Geometry for one chunk, ready for upload.
///
/// Positions are chunk-local; the renderer places the mesh at the chunk's
/// world origin. Opaque and transparent faces share the vertex buffers but use
/// separate index lists so they can be drawn in two passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Four corners per face, chunk-local.
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Atlas coordinates, parallel to `vertices`.
    pub uvs: Vec<[f32; 2]>,
    /// Two triangles per opaque face.
    pub opaque_indices: Vec<u32>,
    /// Two triangles per see-through face, drawn after the opaque pass.
    pub transparent_indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one quad (four vertices, two triangles).
    pub fn push_face(&mut self, face: &Face, atlas_size: u32) {
        let base = self.vertices.len() as u32;
        let normal: [f32; 3] = face.block_side.normal().into();

        self.vertices.extend_from_slice(&face.vertices());
        self.uvs.extend_from_slice(&face.uvs(atlas_size));
        self.normals.extend_from_slice(&[normal; 4]);

        let indices = if face.is_transparent() {
            &mut self.transparent_indices
        } else {
            &mut self.opaque_indices
        };
        indices.extend(FACE_TRIANGLES.iter().map(|i| base + i));
    }

    pub fn face_count(&self) -> usize {
        (self.opaque_indices.len() + self.transparent_indices.len()) / 6
    }

    pub fn opaque_face_count(&self) -> usize {
        self.opaque_indices.len() / 6
    }

    pub fn transparent_face_count(&self) -> usize {
        self.transparent_indices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn opaque_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.opaque_indices)
    }

    pub fn transparent_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transparent_indices)
    }
}
