//! Standard runtime services backed by Rust's `std` library.
//!
//! [`StdTaskExecutor`] owns a UI queue drained by the thread that created it
//! and a pool of worker threads for background layout. [`StdScheduler`]
//! records frame requests and optionally wakes the host loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use ace_core::{FrameScheduler, Task, TaskExecutor, TaskType};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::{Mutex, RwLock};
use web_time::Instant;

const WORKER_NAME_PREFIX: &str = "ace-layout-worker";

struct DelayedTask {
    due: Instant,
    task_type: TaskType,
    task: Task,
}

/// Task executor with a UI queue and a background worker pool.
///
/// The UI queue is never drained automatically: the owning thread calls
/// [`StdTaskExecutor::run_ui_tasks`] from its loop. With zero workers,
/// background tasks land on the UI queue instead.
pub struct StdTaskExecutor {
    ui_thread: ThreadId,
    ui_sender: Sender<Task>,
    ui_receiver: Receiver<Task>,
    background: Mutex<Option<Sender<Task>>>,
    delayed: Mutex<Vec<DelayedTask>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    shut_down: AtomicBool,
}

impl StdTaskExecutor {
    /// Creates the executor; the calling thread becomes its UI thread.
    pub fn new(worker_count: usize) -> Arc<Self> {
        let (ui_sender, ui_receiver) = channel::unbounded();
        let mut workers = Vec::with_capacity(worker_count);
        let background = if worker_count == 0 {
            None
        } else {
            let (sender, receiver) = channel::unbounded::<Task>();
            for index in 0..worker_count {
                let receiver = receiver.clone();
                let spawned = thread::Builder::new()
                    .name(format!("{WORKER_NAME_PREFIX}-{index}"))
                    .spawn(move || {
                        for task in receiver.iter() {
                            task();
                        }
                    });
                match spawned {
                    Ok(handle) => workers.push(handle),
                    Err(err) => log::warn!("failed to spawn layout worker {index}: {err}"),
                }
            }
            if workers.is_empty() {
                None
            } else {
                Some(sender)
            }
        };
        Arc::new(Self {
            ui_thread: thread::current().id(),
            ui_sender,
            ui_receiver,
            background: Mutex::new(background),
            delayed: Mutex::new(Vec::new()),
            workers: Mutex::new(workers),
            shut_down: AtomicBool::new(false),
        })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.lock().len()
    }

    pub fn has_pending_ui_tasks(&self) -> bool {
        !self.ui_receiver.is_empty()
    }

    pub fn has_delayed_tasks(&self) -> bool {
        !self.delayed.lock().is_empty()
    }

    /// Moves delayed tasks whose deadline passed onto their queues.
    pub fn promote_due_tasks(&self) {
        let now = Instant::now();
        let due: Vec<DelayedTask> = {
            let mut delayed = self.delayed.lock();
            let (due, pending): (Vec<DelayedTask>, Vec<DelayedTask>) =
                delayed.drain(..).partition(|entry| entry.due <= now);
            *delayed = pending;
            due
        };
        for entry in due {
            self.dispatch(entry.task, entry.task_type);
        }
    }

    /// Runs every UI task queued so far, including tasks those tasks post.
    /// Returns the number of tasks run.
    pub fn run_ui_tasks(&self) -> usize {
        self.promote_due_tasks();
        let mut ran = 0;
        loop {
            match self.ui_receiver.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ran
    }

    /// Blocks until a UI task arrives or `timeout` elapses, then drains the queue.
    pub fn wait_and_run_ui_tasks(&self, timeout: Duration) -> usize {
        match self.ui_receiver.recv_timeout(timeout) {
            Ok(task) => {
                task();
                1 + self.run_ui_tasks()
            }
            Err(_) => self.run_ui_tasks(),
        }
    }

    /// Stops accepting work and joins the worker pool. Queued background
    /// tasks still run before the workers exit.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.background.lock().take();
        self.delayed.lock().clear();
        let workers: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
        let current = thread::current().id();
        for worker in workers {
            // The last handle can be dropped by a task running on a worker.
            if worker.thread().id() == current {
                continue;
            }
            if worker.join().is_err() {
                log::warn!("layout worker panicked during shutdown");
            }
        }
    }

    fn dispatch(&self, task: Task, task_type: TaskType) -> bool {
        if task_type == TaskType::Background {
            let background = self.background.lock();
            if let Some(sender) = background.as_ref() {
                return sender.send(task).is_ok();
            }
        }
        self.ui_sender.send(task).is_ok()
    }
}

impl TaskExecutor for StdTaskExecutor {
    fn post_task(&self, task: Task, task_type: TaskType) -> bool {
        if self.shut_down.load(Ordering::SeqCst) {
            log::warn!("dropping {task_type:?} task posted after shutdown");
            return false;
        }
        self.dispatch(task, task_type)
    }

    fn post_delayed_task(&self, task: Task, task_type: TaskType, delay_ms: u64) -> bool {
        if self.shut_down.load(Ordering::SeqCst) {
            log::warn!("dropping delayed {task_type:?} task posted after shutdown");
            return false;
        }
        if delay_ms == 0 {
            return self.dispatch(task, task_type);
        }
        self.delayed.lock().push(DelayedTask {
            due: Instant::now() + Duration::from_millis(delay_ms),
            task_type,
            task,
        });
        true
    }

    fn will_run_on_current_thread(&self, task_type: TaskType) -> bool {
        let current = thread::current();
        match task_type {
            TaskType::Ui | TaskType::Platform => current.id() == self.ui_thread,
            TaskType::Background => {
                if self.worker_count() == 0 {
                    current.id() == self.ui_thread
                } else {
                    current
                        .name()
                        .is_some_and(|name| name.starts_with(WORKER_NAME_PREFIX))
                }
            }
        }
    }
}

impl Drop for StdTaskExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for StdTaskExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdTaskExecutor")
            .field("workers", &self.worker_count())
            .field("pending_ui_tasks", &self.ui_receiver.len())
            .field("delayed_tasks", &self.delayed.lock().len())
            .field("shut_down", &self.shut_down.load(Ordering::SeqCst))
            .finish()
    }
}

/// Scheduler that records frame requests and wakes the host loop.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: RwLock<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker that will be invoked whenever a new frame is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.frame_waker.write() = Some(Arc::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        *self.frame_waker.write() = None;
    }

    fn wake(&self) {
        let waker = self.frame_waker.read().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl FrameScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
