use std::collections::VecDeque;

use ace_core::{Task, TaskExecutor, TaskType};
use parking_lot::Mutex;

/// Executor whose queues only move when a test drains them.
///
/// Background tasks wait in their own queue until
/// [`ManualTaskExecutor::run_background_tasks`], which lets tests observe
/// the state between a detached layout pass and its mount.
#[derive(Default)]
pub struct ManualTaskExecutor {
    ui: Mutex<VecDeque<Task>>,
    background: Mutex<VecDeque<Task>>,
    delayed: Mutex<Vec<(u64, TaskType, Task)>>,
    rejecting: Mutex<bool>,
}

impl ManualTaskExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_ui_tasks(&self) -> usize {
        self.ui.lock().len()
    }

    pub fn pending_background_tasks(&self) -> usize {
        self.background.lock().len()
    }

    pub fn pending_delayed_tasks(&self) -> usize {
        self.delayed.lock().len()
    }

    /// Makes every later post fail, as a shut-down executor would.
    pub fn reject_new_tasks(&self) {
        *self.rejecting.lock() = true;
    }

    /// Runs UI tasks until the queue is empty, including tasks posted while
    /// draining. Returns the number run.
    pub fn run_ui_tasks(&self) -> usize {
        Self::drain(&self.ui)
    }

    pub fn run_background_tasks(&self) -> usize {
        Self::drain(&self.background)
    }

    /// Moves delayed tasks with a delay of at most `elapsed_ms` onto their
    /// queues.
    pub fn advance_delayed(&self, elapsed_ms: u64) {
        let due: Vec<(u64, TaskType, Task)> = {
            let mut delayed = self.delayed.lock();
            let (due, pending): (Vec<_>, Vec<_>) = delayed
                .drain(..)
                .partition(|(delay, _, _)| *delay <= elapsed_ms);
            *delayed = pending;
            due
        };
        for (_, task_type, task) in due {
            self.enqueue(task, task_type);
        }
    }

    fn drain(queue: &Mutex<VecDeque<Task>>) -> usize {
        let mut ran = 0;
        loop {
            let next = queue.lock().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    fn enqueue(&self, task: Task, task_type: TaskType) {
        match task_type {
            TaskType::Background => self.background.lock().push_back(task),
            TaskType::Ui | TaskType::Platform => self.ui.lock().push_back(task),
        }
    }
}

impl TaskExecutor for ManualTaskExecutor {
    fn post_task(&self, task: Task, task_type: TaskType) -> bool {
        if *self.rejecting.lock() {
            return false;
        }
        self.enqueue(task, task_type);
        true
    }

    fn post_delayed_task(&self, task: Task, task_type: TaskType, delay_ms: u64) -> bool {
        if *self.rejecting.lock() {
            return false;
        }
        self.delayed.lock().push((delay_ms, task_type, task));
        true
    }

    fn will_run_on_current_thread(&self, task_type: TaskType) -> bool {
        task_type != TaskType::Background
    }
}

impl std::fmt::Debug for ManualTaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTaskExecutor")
            .field("ui", &self.pending_ui_tasks())
            .field("background", &self.pending_background_tasks())
            .field("delayed", &self.pending_delayed_tasks())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/manual_executor_tests.rs"]
mod tests;
