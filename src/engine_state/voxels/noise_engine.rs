//! # Noise Engine
//!
//! Deterministic coherent-noise primitives used by terrain generation.
//!
//! Every sampler is a pure function of `(position, seed)`: the underlying
//! permutation tables are built once from the world seed and never change, so
//! one `NoiseEngine` can be shared by any number of worker threads.
//!
//! Positions are divided by the chunk width before `scale` and `offset` are
//! applied, which keeps the tuning parameters expressed in chunk-widths rather
//! than raw blocks.

use noise::{NoiseFn, Perlin, Simplex};

use crate::engine_state::config::NoiseLayer;

/// Native-range saturation of the base noise, used to remap into `[0, 1]`.
pub const SATURATION: f64 = 0.75;

/// Quantisation levels for biome noise, one per band of width 0.2.
pub const BIOME_BANDS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// Shape of a layered (fractal) noise field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveParams {
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Frequency of the roughness layer blended in at 1/10 weight.
    pub fuzziness: f64,
    /// Rescale applied after averaging to win back the amplitude lost to it.
    pub normalize_factor: f64,
}

impl Default for OctaveParams {
    fn default() -> Self {
        OctaveParams {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            fuzziness: 15.0,
            normalize_factor: 2.0,
        }
    }
}

/// Seeded samplers shared by every terrain worker.
pub struct NoiseEngine {
    perlin: Perlin,
    simplex: Simplex,
    chunk_width: f64,
}

impl NoiseEngine {
    /// Builds the permutation tables for `seed`.
    ///
    /// # Arguments
    ///
    /// * `seed` - World seed; equal seeds give equal fields
    /// * `chunk_width` - Divisor applied to block positions before each layer's scale
    pub fn new(seed: u32, chunk_width: usize) -> Self {
        NoiseEngine {
            perlin: Perlin::new(seed),
            simplex: Simplex::new(seed),
            chunk_width: chunk_width as f64,
        }
    }

    #[inline]
    fn transform<const N: usize>(&self, pos: [f64; N], layer: NoiseLayer) -> [f64; N] {
        pos.map(|c| c / self.chunk_width * layer.scale + layer.offset)
    }

    /// Single-octave Perlin noise remapped into `[0, 1]`.
    pub fn sample_2d(&self, pos: [f64; 2], layer: NoiseLayer) -> f64 {
        let v = self.perlin.get(self.transform(pos, layer));
        remap_unit(v)
    }

    /// Single-octave simplex noise remapped into `[0, 1]`.
    pub fn simplex_2d(&self, pos: [f64; 2], layer: NoiseLayer) -> f64 {
        let v = self.simplex.get(self.transform(pos, layer));
        remap_unit(v)
    }

    /// Octave-summed 2-D noise with a high-frequency roughness layer.
    ///
    /// The result is signed and roughly within `[-1, 1]` once
    /// `normalize_factor` has compensated for the averaging.
    pub fn layered_2d(&self, pos: [f64; 2], layer: NoiseLayer, params: &OctaveParams) -> f64 {
        let p = self.transform(pos, layer);
        let octaves = params.octaves.max(1);

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            total += self.perlin.get(p.map(|c| c * frequency)) * amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        let fuzz = self.perlin.get(p.map(|c| c * params.fuzziness));
        total = (total + fuzz / 10.0) / 1.1;

        total / octaves as f64 * params.normalize_factor
    }

    /// Biome field: `[0, 1]` noise quantised into one of [`BIOME_BANDS`].
    pub fn biome_2d(&self, pos: [f64; 2], layer: NoiseLayer, fuzzy: bool) -> f64 {
        let p = self.transform(pos, layer);
        let mut v = self.perlin.get(p);
        if fuzzy {
            let fuzz = self.perlin.get(p.map(|c| c * 15.0));
            v = (v + fuzz / 10.0) / 1.1;
        }
        quantize_biome((v + 1.0) / 2.0)
    }

    /// Unsigned 3-D density for cave carving. Zero marks the centre of a tunnel.
    pub fn cave_3d(&self, pos: [f64; 3], layer: NoiseLayer, octaves: u32) -> f64 {
        self.fixed_decay_3d(pos, layer, octaves.max(1)).abs()
    }

    /// Signed two-octave 3-D field used to thread ore veins through stone.
    pub fn ore_vein_3d(&self, pos: [f64; 3], layer: NoiseLayer) -> f64 {
        self.fixed_decay_3d(pos, layer, 2)
    }

    fn fixed_decay_3d(&self, pos: [f64; 3], layer: NoiseLayer, octaves: u32) -> f64 {
        let p = self.transform(pos, layer);
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            total += self.perlin.get(p.map(|c| c * frequency)) * amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        total / octaves as f64
    }
}

#[inline]
fn remap_unit(v: f64) -> f64 {
    ((v + SATURATION) / (2.0 * SATURATION)).clamp(0.0, 1.0)
}

/// Snaps a `[0, 1]` value onto the centre of its 0.2-wide band.
pub fn quantize_biome(v: f64) -> f64 {
    match v {
        v if v < 0.2 => BIOME_BANDS[0],
        v if v < 0.4 => BIOME_BANDS[1],
        v if v < 0.6 => BIOME_BANDS[2],
        v if v < 0.8 => BIOME_BANDS[3],
        _ => BIOME_BANDS[4],
    }
}
