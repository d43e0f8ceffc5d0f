//! # Block Module
//!
//! Block type definitions and the face geometry shared by the mesher.

pub mod block_side;
pub mod block_type;

pub use block_side::BlockSide;
pub use block_type::{BlockType, Opacity};

/// The underlying integer type used to represent block types in chunk buffers.
pub type BlockTypeSize = u8;
