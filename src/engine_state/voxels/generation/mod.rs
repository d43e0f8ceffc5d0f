//! # Generation
//!
//! Pure per-chunk generation stages: the terrain fill and the sunlight pass.
//! Neither stage looks at any other chunk.

pub mod lighting;
pub mod terrain;

pub use lighting::{propagate_sunlight, relight_columns, MAX_LIGHT};
pub use terrain::{ColumnClimate, TerrainFill, TerrainGenerator};
