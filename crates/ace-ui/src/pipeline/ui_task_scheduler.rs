use std::cell::RefCell;
use std::rc::Rc;

use ace_core::{NodeId, Task, TaskExecutor, TaskThread, TaskType};
use indexmap::IndexMap;

use crate::frame_node::FrameNode;

/// A layout or render task created from a dirty node.
pub enum UiTask {
    /// Runs inline on the UI thread.
    Main(Box<dyn FnOnce()>),
    /// May run on any thread in `threads`; posts its own result back.
    Background { task: Task, threads: TaskThread },
}

impl UiTask {
    pub fn main(task: impl FnOnce() + 'static) -> Self {
        UiTask::Main(Box::new(task))
    }

    pub fn background(task: impl FnOnce() + Send + 'static, threads: TaskThread) -> Self {
        UiTask::Background {
            task: Box::new(task),
            threads,
        }
    }

    pub fn is_main_task(&self) -> bool {
        matches!(self, UiTask::Main(_))
    }

    pub fn task_thread(&self) -> TaskThread {
        match self {
            UiTask::Main(_) => TaskThread::MAIN,
            UiTask::Background { threads, .. } => *threads,
        }
    }

    /// Runs main tasks now and hands background tasks to `executor`.
    pub fn dispatch(self, executor: &dyn TaskExecutor) {
        match self {
            UiTask::Main(task) => task(),
            UiTask::Background { task, .. } => {
                if !executor.post_task(task, TaskType::Background) {
                    log::warn!("background layout task rejected by executor");
                }
            }
        }
    }
}

impl std::fmt::Debug for UiTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiTask")
            .field("thread", &self.task_thread())
            .finish()
    }
}

/// Dirty node sets of one pipeline. Each node is kept once; flushes visit
/// nodes parent-first by depth.
#[derive(Default)]
pub struct UiTaskScheduler {
    dirty_layout_nodes: RefCell<IndexMap<NodeId, Rc<FrameNode>>>,
    dirty_render_nodes: RefCell<IndexMap<NodeId, Rc<FrameNode>>>,
}

impl UiTaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dirty_layout_node(&self, node: Rc<FrameNode>) {
        self.dirty_layout_nodes.borrow_mut().insert(node.id(), node);
    }

    pub fn add_dirty_render_node(&self, node: Rc<FrameNode>) {
        self.dirty_render_nodes.borrow_mut().insert(node.id(), node);
    }

    pub fn dirty_layout_count(&self) -> usize {
        self.dirty_layout_nodes.borrow().len()
    }

    pub fn dirty_render_count(&self) -> usize {
        self.dirty_render_nodes.borrow().len()
    }

    pub fn is_layout_dirty(&self, id: NodeId) -> bool {
        self.dirty_layout_nodes.borrow().contains_key(&id)
    }

    pub fn is_render_dirty(&self, id: NodeId) -> bool {
        self.dirty_render_nodes.borrow().contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_layout_nodes.borrow().is_empty() && self.dirty_render_nodes.borrow().is_empty()
    }

    pub fn flush_layout_task(&self, force_use_main_thread: bool, executor: &dyn TaskExecutor) {
        let nodes = Self::take_ordered(&self.dirty_layout_nodes);
        log::debug!("flushing {} dirty layout nodes", nodes.len());
        for node in nodes {
            if let Some(task) = node.create_layout_task(force_use_main_thread) {
                task.dispatch(executor);
            }
        }
    }

    pub fn flush_render_task(&self, force_use_main_thread: bool, executor: &dyn TaskExecutor) {
        let nodes = Self::take_ordered(&self.dirty_render_nodes);
        log::debug!("flushing {} dirty render nodes", nodes.len());
        for node in nodes {
            if let Some(task) = node.create_render_task(force_use_main_thread) {
                task.dispatch(executor);
            }
        }
    }

    fn take_ordered(set: &RefCell<IndexMap<NodeId, Rc<FrameNode>>>) -> Vec<Rc<FrameNode>> {
        let taken = std::mem::take(&mut *set.borrow_mut());
        let mut nodes: Vec<_> = taken.into_values().collect();
        nodes.sort_by_key(|node| (node.depth(), node.id()));
        nodes
    }
}

impl std::fmt::Debug for UiTaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiTaskScheduler")
            .field("dirty_layout_nodes", &self.dirty_layout_count())
            .field("dirty_render_nodes", &self.dirty_render_count())
            .finish()
    }
}
