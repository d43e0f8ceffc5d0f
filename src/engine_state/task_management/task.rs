//! # Task System Core Traits
//!
//! ## Task Lifecycle
//! 1. A `Task` is published via `TaskManager::publish_task()`
//! 2. Its `process()` method runs on a worker thread
//! 3. It returns a boxed `TaskResult`
//! 4. The result's `handle_result()` runs on the main thread against the
//!    `ChunkManager`, which may schedule the next pipeline step
//!
//! ## Thread Safety
//! Tasks own everything they touch: shared chunk buffers are reached through
//! `MtResource` handles and locked only for the duration of a copy or a write.

use crate::engine_state::voxels::chunk_manager::ChunkManager;

/// A unit of work that runs on a worker thread.
///
/// Implementations must be self-contained and must never wait on another
/// task; ordering between pipeline steps is enforced by the main thread.
pub trait Task: Send {
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`, consumed on the main thread.
///
/// Handlers should be cheap: they fold data back into the store and decide
/// what runs next.
pub trait TaskResult: Send {
    fn handle_result(self: Box<Self>, manager: &mut ChunkManager);
}
