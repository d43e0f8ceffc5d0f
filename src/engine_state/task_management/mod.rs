//! # Task Management System
//!
//! A small worker pool that runs pipeline tasks (terrain, lighting, meshing)
//! off the main thread and hands their results back to it.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: owns the workers, distributes tasks round-robin and
//!   collects results
//! - `Task`: a unit of work executed on a worker thread
//! - `TaskResult`: the outcome of a task, folded back into the chunk manager
//!   on the main thread
//! - `TaskChannel`: the pair of channels linking the main thread to one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager sends each task to a worker with spare capacity, or queues it
//! 3. Workers run `Task::process` and send back the result
//! 4. The main thread polls `collect_completed()` once per tick, never blocking
//! 5. Each result's handler may publish follow-up tasks
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut task_manager = TaskManager::new(num_workers);
//! task_manager.publish_task(Box::new(MyTask::new()));
//!
//! // In the frame loop:
//! for result in task_manager.collect_completed(64) {
//!     result.handle_result(&mut chunk_manager);
//! }
//! task_manager.process_queued_tasks();
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use task::{Task, TaskResult};

/// A communication channel between the main thread and one worker thread.
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// Tasks that cannot be sent immediately wait in a FIFO queue and are sent by
/// `process_queued_tasks()` as workers free up. Dropping the manager closes
/// every channel and joins the workers once they finish their current task.
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Spawns `num_workers` worker threads.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    // Release the task's chunk handles before the result is observable.
                    drop(task);
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = thread::Builder::new()
                .name(format!("chunk-worker-{index}"))
                .spawn(task_closure);

            match worker {
                Ok(worker) => channels.push(TaskChannel {
                    task_sender: task_tx,
                    result_receiver: result_rx,
                    num_tasks_in_flight: 0,
                    worker,
                }),
                Err(err) => warn!("Failed to spawn worker {index}: {err}"),
            }
        }

        debug!("Task manager started with {} workers", channels.len());

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    pub fn num_workers(&self) -> usize {
        self.channels.len()
    }

    /// Tasks waiting for a free worker.
    pub fn queued_len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Tasks currently sent to a worker whose result has not been collected.
    pub fn in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// `true` when nothing is queued or running.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.in_flight() == 0
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// Returns the task back if the worker has gone away.
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => Err(task.0),
        }
    }

    /// Finds a worker with spare capacity, round-robin from the last one used.
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        let start_channel = self.current_channel % self.channels.len();
        let mut current = start_channel;

        loop {
            if self.channels[current].num_tasks_in_flight < MAX_TASKS_IN_FLIGHT {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                return None;
            }
        }
    }

    /// Publishes a task for execution.
    ///
    /// Returns `true` if the task went straight to a worker and `false` if it
    /// was queued. Never blocks.
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        // Keep FIFO order behind anything already waiting.
        if !self.queued_tasks.is_empty() {
            self.queued_tasks.push_back(task);
            return false;
        }

        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Sends queued tasks, oldest first, until the queue is empty or every
    /// worker is busy.
    pub fn process_queued_tasks(&mut self) {
        while !self.queued_tasks.is_empty() {
            let Some(channel_idx) = self.find_available_channel() else {
                break;
            };
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => {
                    // Channel is disconnected, put task back and stop processing
                    self.queued_tasks.push_front(task);
                    break;
                }
            }
        }
    }

    /// Collects up to `limit` finished results without blocking.
    ///
    /// The caller folds each result back on the main thread.
    pub fn collect_completed(&mut self, limit: usize) -> Vec<Box<dyn TaskResult + Send>> {
        let mut results = Vec::new();
        for channel in &mut self.channels {
            while results.len() < limit {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        results.push(result);
                    }
                    Err(_) => break,
                }
            }
        }
        results
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.queued_tasks.clear();
        for channel in self.channels.drain(..) {
            let TaskChannel {
                task_sender,
                result_receiver,
                worker,
                ..
            } = channel;
            drop(task_sender);
            drop(result_receiver);
            if worker.join().is_err() {
                warn!("A worker thread panicked");
            }
        }
    }
}
