//! # Biomes
//!
//! Column classification from the `(land, temperature, humidity)` climate
//! triple, and the surface block each biome lays on top of its stone.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::block::BlockType;

/// Land fraction below which a column is ocean.
pub const OCEAN_THRESHOLD: f64 = 0.3;
/// Upper bound (exclusive) of the beach strip above the ocean threshold.
pub const BEACH_THRESHOLD: f64 = 0.32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Default)]
#[repr(u8)]
pub enum Biome {
    ColdOcean = 0,
    Ocean = 1,
    WarmOcean = 2,
    Beach = 3,
    Tundra = 4,
    #[default]
    Plains = 5,
    Savanna = 6,
    Desert = 7,
    BorealForest = 8,
    Taiga = 9,
    Shrubland = 10,
    TemperateForest = 11,
    Swamp = 12,
    SeasonalForest = 13,
    TropicalForest = 14,
}

impl Biome {
    /// Decodes a stored biome ID. Unknown IDs decode to `Plains`.
    pub fn from_id(id: u8) -> Self {
        <Biome as FromPrimitive>::from_u8(id).unwrap_or_default()
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn surface_block(self) -> BlockType {
        match self {
            Biome::ColdOcean => BlockType::Gravel,
            Biome::Ocean | Biome::WarmOcean | Biome::Beach | Biome::Desert => BlockType::Sand,
            Biome::Tundra | Biome::BorealForest => BlockType::Snow,
            Biome::Savanna => BlockType::CoarseDirt,
            Biome::Taiga => BlockType::Podzol,
            Biome::Swamp => BlockType::Mud,
            Biome::Plains
            | Biome::Shrubland
            | Biome::TemperateForest
            | Biome::SeasonalForest
            | Biome::TropicalForest => BlockType::Grass,
        }
    }

    pub const fn is_ocean(self) -> bool {
        matches!(self, Biome::ColdOcean | Biome::Ocean | Biome::WarmOcean)
    }

    /// Classifies a column. All three inputs are expected in `[0, 1]`.
    ///
    /// Plains is returned for any triple the bands do not cover.
    pub fn classify(land: f64, temperature: f64, humidity: f64) -> Biome {
        let t = temperature;
        let h = humidity;

        if land < OCEAN_THRESHOLD {
            if (0.0..0.33).contains(&t) {
                return Biome::ColdOcean;
            }
            if (0.33..0.66).contains(&t) {
                return Biome::Ocean;
            }
            if (0.66..=1.0).contains(&t) {
                return Biome::WarmOcean;
            }
        } else if land < BEACH_THRESHOLD {
            return Biome::Beach;
        }

        let band = |t_lo: f64, t_hi: f64, t_closed: bool, h_lo: f64, h_hi: f64, h_closed: bool| {
            let t_in = t >= t_lo && if t_closed { t <= t_hi } else { t < t_hi };
            let h_in = h >= h_lo && if h_closed { h <= h_hi } else { h < h_hi };
            t_in && h_in
        };

        if band(0.0, 0.2, false, 0.0, 0.6, false) {
            Biome::Tundra
        } else if band(0.2, 0.6, false, 0.0, 0.4, false) {
            Biome::Plains
        } else if band(0.6, 0.8, false, 0.0, 0.4, false) {
            Biome::Savanna
        } else if band(0.8, 1.0, true, 0.0, 0.6, false) {
            Biome::Desert
        } else if band(0.0, 0.2, false, 0.6, 1.0, true) {
            Biome::BorealForest
        } else if band(0.2, 0.4, false, 0.4, 1.0, true) {
            Biome::Taiga
        } else if band(0.4, 0.8, false, 0.4, 0.6, false) {
            Biome::Shrubland
        } else if band(0.4, 0.8, false, 0.6, 0.8, false) {
            Biome::TemperateForest
        } else if band(0.4, 0.6, false, 0.8, 1.0, true) {
            Biome::Swamp
        } else if band(0.8, 1.0, true, 0.6, 0.8, false) {
            Biome::SeasonalForest
        } else if band(0.6, 1.0, true, 0.8, 1.0, true) {
            Biome::TropicalForest
        } else {
            Biome::Plains
        }
    }
}
