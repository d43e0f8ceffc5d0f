//! # Block Type Module
//!
//! This module defines the catalogue of block types that can occupy a voxel,
//! along with the per-type properties the generator, the lighting pass and the
//! mesher need: opacity, atlas placement and a minimap colour.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// How a block interacts with light and with neighbouring faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opacity {
    /// Nothing there. Never emits faces.
    Empty,
    /// A full cube that hides faces behind it and stops sunlight.
    Opaque,
    /// A see-through liquid, rendered in the transparent pass.
    Liquid,
    /// Short foliage: lets sunlight through and does not hide neighbouring faces.
    Foliage,
}

/// Enumerates all block types in the voxel world.
///
/// The discriminant is the block ID stored in chunk buffers, so variants must
/// never be reordered. `FromPrimitive` gives the checked conversion back from
/// the stored byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Default)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Bedrock = 1,
    Stone = 2,
    Dirt = 3,
    Grass = 4,
    Sand = 5,
    Water = 6,
    Gravel = 7,
    Snow = 8,
    CoarseDirt = 9,
    Podzol = 10,
    Mud = 11,
    GrassPlant = 12,
}

impl BlockType {
    /// Every block type, in ID order.
    pub const ALL: [BlockType; 13] = [
        BlockType::Air,
        BlockType::Bedrock,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Sand,
        BlockType::Water,
        BlockType::Gravel,
        BlockType::Snow,
        BlockType::CoarseDirt,
        BlockType::Podzol,
        BlockType::Mud,
        BlockType::GrassPlant,
    ];

    /// Decodes a stored block ID. Unknown IDs decode to `Air`.
    #[inline]
    pub fn from_id(id: BlockTypeSize) -> Self {
        <BlockType as FromPrimitive>::from_u8(id).unwrap_or(BlockType::Air)
    }

    #[inline]
    pub const fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    pub const fn opacity(self) -> Opacity {
        match self {
            BlockType::Air => Opacity::Empty,
            BlockType::Water => Opacity::Liquid,
            BlockType::GrassPlant => Opacity::Foliage,
            _ => Opacity::Opaque,
        }
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        matches!(self.opacity(), Opacity::Opaque)
    }

    /// Whether sunlight keeps travelling down through this block.
    #[inline]
    pub const fn passes_sunlight(self) -> bool {
        !self.is_opaque()
    }

    /// Whether faces of this block belong in the transparent render pass.
    #[inline]
    pub const fn is_translucent(self) -> bool {
        matches!(self.opacity(), Opacity::Liquid | Opacity::Foliage)
    }

    /// Cell of the square texture atlas holding this block's texture.
    ///
    /// Cells are laid out row-major by block ID.
    pub fn atlas_cell(self, atlas_size: u32) -> (u32, u32) {
        let id = self.id() as u32;
        (id % atlas_size, id / atlas_size)
    }

    /// RGBA colour used by external map visualisations.
    pub const fn map_color(self) -> [u8; 4] {
        match self {
            BlockType::Air => [255, 255, 255, 255],
            BlockType::Bedrock => [41, 41, 41, 255],
            BlockType::Stone => [115, 115, 115, 255],
            BlockType::Dirt => [108, 83, 47, 255],
            BlockType::Grass => [66, 104, 47, 255],
            BlockType::Sand => [227, 213, 142, 255],
            BlockType::Water => [80, 172, 220, 255],
            BlockType::Gravel => [136, 126, 126, 255],
            BlockType::Snow => [240, 250, 255, 255],
            BlockType::CoarseDirt => [119, 85, 59, 255],
            BlockType::Podzol => [91, 63, 24, 255],
            BlockType::Mud => [60, 57, 60, 255],
            BlockType::GrassPlant => [80, 140, 60, 255],
        }
    }
}
