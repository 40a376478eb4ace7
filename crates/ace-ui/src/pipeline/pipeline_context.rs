use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use ace_core::{FrameScheduler, Task, TaskExecutor, TaskType};
use ace_runtime_std::StdTaskExecutor;
use ace_ui_graphics::{PointF, ScaleProperty};
use ace_ui_layout::LayoutConstraintF;
use ace_ui_layout::PropertyChangeFlag;
use web_time::{Duration, Instant};

use super::{HitPathTracker, PipelineConfig, UiTaskScheduler};
use crate::event::{
    HitTestResult, HoverTestResult, MouseEvent, MouseTestResult, PointerId, TouchEvent, TouchRestrict,
    TouchTestResult, TouchType,
};
use crate::frame_node::FrameNode;
use crate::render::{RenderContext, RetainedRenderContext};

/// Builds the render context for every node created under a pipeline.
pub type RenderContextFactory = Rc<dyn Fn() -> Rc<dyn RenderContext>>;

// Thread-local stack of pipelines; the innermost entered one is current.
thread_local! {
    static PIPELINE_STACK: RefCell<Vec<Rc<PipelineContext>>> = const { RefCell::new(Vec::new()) };
}

/// Guard that pops the pipeline stack on drop.
#[must_use = "PipelineScopeGuard pops the pipeline stack on drop"]
pub struct PipelineScopeGuard;

impl Drop for PipelineScopeGuard {
    fn drop(&mut self) {
        let _ = PIPELINE_STACK.try_with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// One UI thread's frame driver.
///
/// Owns the dirty node sets, the root node and the executor tasks are
/// posted to. Nodes find their pipeline through [`PipelineContext::current`];
/// code running outside an entered scope sees no pipeline and every dirty
/// mark becomes a no-op.
pub struct PipelineContext {
    config: PipelineConfig,
    root_width: Cell<f32>,
    root_height: Cell<f32>,
    scheduler: UiTaskScheduler,
    executor: Arc<dyn TaskExecutor>,
    frame_scheduler: RefCell<Option<Arc<dyn FrameScheduler>>>,
    ui_task_runner: RefCell<Option<Box<dyn Fn() -> usize>>>,
    render_context_factory: RefCell<Option<RenderContextFactory>>,
    root_node: RefCell<Option<Rc<FrameNode>>>,
    frame_requested: Cell<bool>,
    last_frame_duration: Cell<Duration>,
    hit_path_tracker: RefCell<HitPathTracker>,
    hover_targets: RefCell<HoverTestResult>,
    hover_node: RefCell<Weak<FrameNode>>,
}

impl PipelineContext {
    pub fn new(config: PipelineConfig, executor: Arc<dyn TaskExecutor>) -> Rc<Self> {
        Rc::new(Self {
            root_width: Cell::new(config.root_width),
            root_height: Cell::new(config.root_height),
            config,
            scheduler: UiTaskScheduler::new(),
            executor,
            frame_scheduler: RefCell::new(None),
            ui_task_runner: RefCell::new(None),
            render_context_factory: RefCell::new(None),
            root_node: RefCell::new(None),
            frame_requested: Cell::new(false),
            last_frame_duration: Cell::new(Duration::ZERO),
            hit_path_tracker: RefCell::new(HitPathTracker::new()),
            hover_targets: RefCell::new(Vec::new()),
            hover_node: RefCell::new(Weak::new()),
        })
    }

    /// Pipeline backed by [`StdTaskExecutor`] with `config.layout_workers`
    /// background threads. The calling thread becomes the UI thread.
    pub fn with_std_runtime(config: PipelineConfig) -> Rc<Self> {
        let executor = StdTaskExecutor::new(config.layout_workers);
        let runner = Arc::clone(&executor);
        let pipeline = Self::new(config, executor);
        pipeline.set_ui_task_runner(move || runner.run_ui_tasks());
        pipeline
    }

    /// Makes this pipeline current until the guard drops.
    pub fn enter(self: &Rc<Self>) -> PipelineScopeGuard {
        PIPELINE_STACK.with(|stack| stack.borrow_mut().push(Rc::clone(self)));
        PipelineScopeGuard
    }

    pub fn current() -> Option<Rc<Self>> {
        PIPELINE_STACK
            .try_with(|stack| stack.borrow().last().cloned())
            .ok()
            .flatten()
    }

    pub fn with_current<R>(f: impl FnOnce(&Rc<Self>) -> R) -> Option<R> {
        Self::current().map(|pipeline| f(&pipeline))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_frame_scheduler(&self, scheduler: Arc<dyn FrameScheduler>) {
        *self.frame_scheduler.borrow_mut() = Some(scheduler);
    }

    /// Installs the closure that drains the executor's UI queue.
    pub fn set_ui_task_runner(&self, runner: impl Fn() -> usize + 'static) {
        *self.ui_task_runner.borrow_mut() = Some(Box::new(runner));
    }

    pub fn set_render_context_factory(&self, factory: RenderContextFactory) {
        *self.render_context_factory.borrow_mut() = Some(factory);
    }

    pub fn create_render_context(&self) -> Rc<dyn RenderContext> {
        let factory = self.render_context_factory.borrow().clone();
        match factory {
            Some(factory) => factory(),
            None => Rc::new(RetainedRenderContext::new()),
        }
    }

    pub fn scheduler(&self) -> &UiTaskScheduler {
        &self.scheduler
    }

    pub fn add_dirty_layout_node(&self, node: Rc<FrameNode>) {
        log::trace!("dirty layout node {}#{}", node.tag(), node.id());
        self.scheduler.add_dirty_layout_node(node);
        self.request_frame();
    }

    pub fn add_dirty_render_node(&self, node: Rc<FrameNode>) {
        log::trace!("dirty render node {}#{}", node.tag(), node.id());
        self.scheduler.add_dirty_render_node(node);
        self.request_frame();
    }

    pub fn request_frame(&self) {
        self.frame_requested.set(true);
        let scheduler = self.frame_scheduler.borrow().clone();
        if let Some(scheduler) = scheduler {
            scheduler.schedule_frame();
        }
    }

    pub fn has_frame_request(&self) -> bool {
        self.frame_requested.get()
    }

    /// Returns whether a frame was requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.replace(false)
    }

    pub fn task_executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::clone(&self.executor)
    }

    pub fn post_task(&self, task: Task, task_type: TaskType) -> bool {
        self.executor.post_task(task, task_type)
    }

    pub fn post_delayed_task(&self, task: Task, task_type: TaskType, delay_ms: u64) -> bool {
        self.executor.post_delayed_task(task, task_type, delay_ms)
    }

    pub fn current_root_width(&self) -> f32 {
        self.root_width.get()
    }

    pub fn current_root_height(&self) -> f32 {
        self.root_height.get()
    }

    /// Resizes the root and re-measures from the root node.
    pub fn set_root_size(self: &Rc<Self>, width: f32, height: f32) {
        if self.root_width.get() == width && self.root_height.get() == height {
            return;
        }
        self.root_width.set(width);
        self.root_height.set(height);
        if let Some(root) = self.root_node() {
            let _scope = self.enter();
            root.mark_dirty_node(PropertyChangeFlag::MEASURE);
        }
    }

    pub fn scale_property(&self) -> ScaleProperty {
        self.config.scale_property()
    }

    /// Constraint used for nodes that were never measured by a parent.
    pub fn root_layout_constraint(&self) -> LayoutConstraintF {
        LayoutConstraintF::root(
            self.root_width.get(),
            self.root_height.get(),
            self.scale_property(),
        )
    }

    pub fn set_root_node(self: &Rc<Self>, root: Rc<FrameNode>) {
        let _scope = self.enter();
        let previous = self.root_node.borrow_mut().replace(Rc::clone(&root));
        if let Some(previous) = previous {
            previous.detach_from_main_tree();
        }
        root.attach_to_main_tree();
        root.mark_need_sync_render_tree();
        root.mark_dirty_node(PropertyChangeFlag::MEASURE);
    }

    pub fn root_node(&self) -> Option<Rc<FrameNode>> {
        self.root_node.borrow().clone()
    }

    /// Runs one frame: layout tasks, the UI queue (mounts of finished
    /// layout passes), then render tasks and the root render tree.
    pub fn flush_vsync(self: &Rc<Self>) {
        let _scope = self.enter();
        let start = Instant::now();
        self.frame_requested.set(false);
        let force_main = self.config.force_main_thread;
        log::debug!("vsync: {:?}", self.scheduler);

        self.scheduler.flush_layout_task(force_main, &*self.executor);
        self.run_ui_tasks();
        self.scheduler.flush_render_task(force_main, &*self.executor);

        if let Some(root) = self.root_node() {
            root.rebuild_render_context_tree();
        }
        let elapsed = start.elapsed();
        self.last_frame_duration.set(elapsed);
        log::trace!("vsync done in {elapsed:?}");
    }

    /// Wall time spent in the last [`PipelineContext::flush_vsync`].
    pub fn last_frame_duration(&self) -> Duration {
        self.last_frame_duration.get()
    }

    /// Drains the executor's UI queue inside this pipeline's scope.
    /// Returns the number of tasks run.
    pub fn run_ui_tasks(self: &Rc<Self>) -> usize {
        let _scope = self.enter();
        let runner = self.ui_task_runner.borrow();
        match runner.as_ref() {
            Some(runner) => runner(),
            None => 0,
        }
    }

    /// Touch test from the root at a global point.
    pub fn touch_test(&self, point: PointF, restrict: &TouchRestrict) -> TouchTestResult {
        let mut result = TouchTestResult::new();
        if let Some(root) = self.root_node() {
            let outcome = root.touch_test(point, point, restrict, &mut result);
            log::trace!("touch test at {point:?}: {outcome:?}, {} targets", result.len());
        }
        result
    }

    /// Mouse test from the root; returns mouse targets, hover targets and
    /// the node that shows a hover effect.
    pub fn mouse_test(
        &self,
        point: PointF,
    ) -> (MouseTestResult, HoverTestResult, Option<Rc<FrameNode>>) {
        let mut mouse_result = MouseTestResult::new();
        let mut hover_result = HoverTestResult::new();
        let mut hover_node = None;
        if let Some(root) = self.root_node() {
            let outcome: HitTestResult = root.mouse_test(
                point,
                point,
                &mut mouse_result,
                &mut hover_result,
                &mut hover_node,
            );
            log::trace!("mouse test at {point:?}: {outcome:?}");
        }
        (mouse_result, hover_result, hover_node)
    }

    /// Dispatches a touch event. A down event runs a touch test and records
    /// the hit path for its pointer; later events of the sequence go to the
    /// recorded path. Returns whether any target handled the event.
    pub fn on_touch_event(self: &Rc<Self>, event: &TouchEvent) -> bool {
        let _scope = self.enter();
        if event.touch_type == TouchType::Down {
            let targets = self.touch_test(event.global_location, &TouchRestrict::default());
            self.hit_path_tracker
                .borrow_mut()
                .add_hit_path(event.id, targets);
        }

        let targets = match event.touch_type {
            TouchType::Up | TouchType::Cancel => {
                self.hit_path_tracker.borrow_mut().remove_path(event.id)
            }
            TouchType::Down | TouchType::Move => {
                self.hit_path_tracker.borrow().get_path(event.id).cloned()
            }
        };
        let Some(targets) = targets else {
            log::trace!("no hit path for pointer {:?}", event.id);
            return false;
        };
        let mut handled = false;
        for target in &targets {
            handled |= target.dispatch_event(event);
        }
        handled
    }

    /// Dispatches a mouse event and updates hover state.
    pub fn on_mouse_event(self: &Rc<Self>, event: &MouseEvent) {
        let _scope = self.enter();
        let (mouse_targets, hover_targets, hover_node) = self.mouse_test(event.global_location);
        for target in &mouse_targets {
            target.dispatch_event(event);
        }

        let previous = std::mem::take(&mut *self.hover_targets.borrow_mut());
        for target in &previous {
            if !hover_targets.iter().any(|next| Rc::ptr_eq(next, target)) {
                target.dispatch_hover(false);
            }
        }
        for target in &hover_targets {
            if !previous.iter().any(|prev| Rc::ptr_eq(prev, target)) {
                target.dispatch_hover(true);
            }
        }
        *self.hover_targets.borrow_mut() = hover_targets;
        *self.hover_node.borrow_mut() = hover_node
            .as_ref()
            .map(Rc::downgrade)
            .unwrap_or_default();
    }

    /// Node currently showing a hover effect.
    pub fn hover_node(&self) -> Option<Rc<FrameNode>> {
        self.hover_node.borrow().upgrade()
    }

    pub fn has_touch_path(&self, pointer: PointerId) -> bool {
        self.hit_path_tracker.borrow().has_path(pointer)
    }
}

impl std::fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineContext")
            .field("root_width", &self.root_width.get())
            .field("root_height", &self.root_height.get())
            .field("scheduler", &self.scheduler)
            .field("frame_requested", &self.frame_requested.get())
            .finish()
    }
}
