//! # World Module
//!
//! The `World` is the chunk store: the one mapping from [`ChunkCoord`] to
//! [`Chunk`]. It is shared between the main thread and the workers as an
//! `MtResource<World>`; each chunk inside it is its own `MtResource<Chunk>` so
//! that work on different chunks never contends on the same lock.
//!
//! Insertion is insert-if-absent under the store's write lock, so two racing
//! requests for the same missing coordinate always end up with one chunk.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::core::MtResource;
use crate::engine_state::voxels::chunk::Chunk;
use crate::engine_state::voxels::coords::{ChunkCoord, ChunkDimensions};

/// Every resident chunk, keyed by coordinate.
///
/// Lock the world before any chunk it holds, never the other way round.
pub struct World {
    dims: ChunkDimensions,
    chunks: HashMap<ChunkCoord, MtResource<Chunk>>,
}

impl World {
    pub fn new(dims: ChunkDimensions) -> Self {
        World {
            dims,
            chunks: HashMap::new(),
        }
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    /// Returns the chunk at `coord`, creating an `Empty` one if absent.
    ///
    /// The boolean is `true` only for the caller that created the chunk.
    pub fn get_or_insert(&mut self, coord: ChunkCoord) -> (MtResource<Chunk>, bool) {
        match self.chunks.entry(coord) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let chunk = MtResource::new(Chunk::new(coord, self.dims));
                entry.insert(chunk.clone());
                (chunk, true)
            }
        }
    }

    /// A new handle to the chunk at `coord`, if resident.
    pub fn get_chunk_at(&self, coord: ChunkCoord) -> Option<MtResource<Chunk>> {
        self.chunks.get(&coord).cloned()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Drops a chunk from the store. Outstanding handles keep it alive until released.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<MtResource<Chunk>> {
        self.chunks.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }
}

/// Insert-if-absent through a shared store handle.
///
/// The lookup and the insert happen under one write lock, so concurrent
/// callers for the same coordinate all receive the same chunk.
pub fn get_or_insert_shared(
    world: &MtResource<World>,
    coord: ChunkCoord,
) -> (MtResource<Chunk>, bool) {
    if let Some(chunk) = world.get().get_chunk_at(coord) {
        return (chunk, false);
    }
    world.get_mut().get_or_insert(coord)
}
