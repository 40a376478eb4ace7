//! Host services the engine schedules work through.
//!
//! The engine never spawns threads or drives frames itself. It posts
//! closures to a [`TaskExecutor`] and asks a [`FrameScheduler`] for the
//! next vsync; hosts decide how either is serviced.

use std::ops::{BitOr, BitOrAssign};

/// A unit of work handed to a [`TaskExecutor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Queue a task is posted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// The thread that owns the live node tree.
    Ui,
    /// Worker pool for detached computation.
    Background,
    Platform,
}

/// Set of thread classes a piece of work tolerates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskThread(u8);

impl TaskThread {
    pub const UNDEFINED: Self = Self(0);
    pub const MAIN: Self = Self(1 << 0);
    pub const BACKGROUND: Self = Self(1 << 1);

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Narrows to the threads both sides tolerate.
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn is_undefined(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TaskThread {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TaskThread {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Posts work to the host's queues. Must be usable from worker threads so a
/// background layout pass can post its result back to the UI queue.
pub trait TaskExecutor: Send + Sync {
    /// Returns false when the task was rejected (executor shut down).
    fn post_task(&self, task: Task, task_type: TaskType) -> bool;

    fn post_delayed_task(&self, task: Task, task_type: TaskType, delay_ms: u64) -> bool;

    /// Whether tasks of `task_type` would run on the calling thread.
    fn will_run_on_current_thread(&self, task_type: TaskType) -> bool;
}

/// Requests frames from the host.
pub trait FrameScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
