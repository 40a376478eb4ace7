use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ace_core::{NodeId, TaskThread};
use ace_ui::layout::{BoxLayoutAlgorithm, LayoutAlgorithm};
use ace_ui::{
    DirtySwapConfig, DrawFunction, LayoutWrapper, NodePaintMethod, PaintWrapper, Pattern,
    PatternHost,
};
use ace_ui_graphics::{Color, DrawScope, SizeF};
use ace_ui_layout::LayoutConstraintF;

/// Hook calls seen by a [`RecordingPattern`].
///
/// Shared through an `Rc` so it stays readable after the node is dropped.
/// Measure and layout counts are atomic because algorithms may run on a
/// worker thread.
#[derive(Debug, Default)]
pub struct PatternLog {
    host_id: Cell<Option<NodeId>>,
    attach: Cell<usize>,
    detach: Cell<usize>,
    active: Cell<usize>,
    inactive: Cell<usize>,
    modify_done: Cell<usize>,
    mount_done: Cell<usize>,
    before_layout_wrapper: Cell<usize>,
    before_paint_wrapper: Cell<usize>,
    swaps: Cell<usize>,
    last_swap: Cell<Option<DirtySwapConfig>>,
    measures: Arc<AtomicUsize>,
    layouts: Arc<AtomicUsize>,
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl PatternLog {
    pub fn host_id(&self) -> Option<NodeId> {
        self.host_id.get()
    }

    pub fn attach_count(&self) -> usize {
        self.attach.get()
    }

    pub fn detach_count(&self) -> usize {
        self.detach.get()
    }

    pub fn active_count(&self) -> usize {
        self.active.get()
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive.get()
    }

    pub fn modify_done_count(&self) -> usize {
        self.modify_done.get()
    }

    pub fn mount_done_count(&self) -> usize {
        self.mount_done.get()
    }

    pub fn before_layout_wrapper_count(&self) -> usize {
        self.before_layout_wrapper.get()
    }

    pub fn before_paint_wrapper_count(&self) -> usize {
        self.before_paint_wrapper.get()
    }

    pub fn swap_count(&self) -> usize {
        self.swaps.get()
    }

    pub fn last_swap(&self) -> Option<DirtySwapConfig> {
        self.last_swap.get()
    }

    pub fn measure_count(&self) -> usize {
        self.measures.load(Ordering::SeqCst)
    }

    pub fn layout_count(&self) -> usize {
        self.layouts.load(Ordering::SeqCst)
    }
}

/// Configurable pattern that lays out like a box and logs every hook.
///
/// ```rust,ignore
/// let pattern = RecordingPattern::new().measure_boundary(true);
/// let log = pattern.log();
/// let node = rule.create_node("Stack", pattern);
/// rule.flush();
/// assert_eq!(log.measure_count(), 1);
/// ```
#[derive(Debug)]
pub struct RecordingPattern {
    log: Rc<PatternLog>,
    measure_boundary: bool,
    render_boundary: bool,
    atomic: bool,
    surface_name: Option<String>,
    swap_verdict: bool,
    legacy_swap_verdict: bool,
    content_size: Option<SizeF>,
    threads: Option<TaskThread>,
    paint_color: Option<Color>,
}

impl Default for RecordingPattern {
    fn default() -> Self {
        Self {
            log: Rc::default(),
            measure_boundary: false,
            render_boundary: true,
            atomic: false,
            surface_name: None,
            swap_verdict: false,
            legacy_swap_verdict: false,
            content_size: None,
            threads: None,
            paint_color: None,
        }
    }
}

impl RecordingPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Rc<PatternLog> {
        Rc::clone(&self.log)
    }

    pub fn measure_boundary(mut self, boundary: bool) -> Self {
        self.measure_boundary = boundary;
        self
    }

    pub fn render_boundary(mut self, boundary: bool) -> Self {
        self.render_boundary = boundary;
        self
    }

    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn surface(mut self, name: impl Into<String>) -> Self {
        self.surface_name = Some(name.into());
        self
    }

    /// Value returned from every swap hook call.
    pub fn swap_verdict(mut self, need_render: bool) -> Self {
        self.swap_verdict = need_render;
        self
    }

    pub fn legacy_swap_verdict(mut self, need_render: bool) -> Self {
        self.legacy_swap_verdict = need_render;
        self
    }

    /// Intrinsic content size reported by the algorithm.
    pub fn content_size(mut self, size: SizeF) -> Self {
        self.content_size = Some(size);
        self
    }

    /// Overrides the thread classes the algorithm tolerates.
    pub fn threads(mut self, threads: TaskThread) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Paints the content box with `color`.
    pub fn paint(mut self, color: Color) -> Self {
        self.paint_color = Some(color);
        self
    }
}

impl Pattern for RecordingPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(RecordingLayoutAlgorithm {
            inner: BoxLayoutAlgorithm::new(),
            content_size: self.content_size,
            threads: self.threads,
            measures: Arc::clone(&self.log.measures),
            layouts: Arc::clone(&self.log.layouts),
        })
    }

    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        self.paint_color
            .map(|color| Box::new(SolidColorPaintMethod::new(color)) as Box<dyn NodePaintMethod>)
    }

    fn is_measure_boundary(&self) -> bool {
        self.measure_boundary
    }

    fn is_render_boundary(&self) -> bool {
        self.render_boundary
    }

    fn is_atomic_node(&self) -> bool {
        self.atomic
    }

    fn surface_node_name(&self) -> Option<String> {
        self.surface_name.clone()
    }

    fn on_attach_to_frame_node(&self, host: PatternHost) {
        self.log.host_id.set(host.id());
        bump(&self.log.attach);
    }

    fn on_detach_from_frame_node(&self) {
        bump(&self.log.detach);
    }

    fn on_modify_done(&self) {
        bump(&self.log.modify_done);
    }

    fn on_mount_to_parent_done(&self) {
        bump(&self.log.mount_done);
    }

    fn before_create_layout_wrapper(&self) {
        bump(&self.log.before_layout_wrapper);
    }

    fn before_create_paint_wrapper(&self) {
        bump(&self.log.before_paint_wrapper);
    }

    fn on_active(&self) {
        bump(&self.log.active);
    }

    fn on_in_active(&self) {
        bump(&self.log.inactive);
    }

    fn on_dirty_layout_wrapper_swap(&self, _dirty: &LayoutWrapper, config: &DirtySwapConfig) -> bool {
        bump(&self.log.swaps);
        self.log.last_swap.set(Some(*config));
        self.swap_verdict
    }

    fn on_dirty_layout_wrapper_swap_legacy(
        &self,
        _dirty: &LayoutWrapper,
        _skip_measure: bool,
        _skip_layout: bool,
    ) -> bool {
        self.legacy_swap_verdict
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct RecordingLayoutAlgorithm {
    inner: BoxLayoutAlgorithm,
    content_size: Option<SizeF>,
    threads: Option<TaskThread>,
    measures: Arc<AtomicUsize>,
    layouts: Arc<AtomicUsize>,
}

impl LayoutAlgorithm for RecordingLayoutAlgorithm {
    fn measure_content(
        &mut self,
        content_constraint: &LayoutConstraintF,
        _wrapper: &LayoutWrapper,
    ) -> Option<SizeF> {
        self.content_size
            .map(|size| size.constrain(content_constraint.min_size, content_constraint.max_size))
    }

    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        self.measures.fetch_add(1, Ordering::SeqCst);
        self.inner.measure(wrapper);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        self.layouts.fetch_add(1, Ordering::SeqCst);
        self.inner.layout(wrapper);
    }

    fn can_run_on_which_thread(&self) -> TaskThread {
        self.threads
            .unwrap_or_else(|| self.inner.can_run_on_which_thread())
    }
}

/// Fills the content area with one color.
#[derive(Clone, Copy, Debug)]
pub struct SolidColorPaintMethod {
    color: Color,
}

impl SolidColorPaintMethod {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl NodePaintMethod for SolidColorPaintMethod {
    fn content_draw_function(&self, _wrapper: &PaintWrapper) -> Option<DrawFunction> {
        let color = self.color;
        Some(Rc::new(move |scope: &mut dyn DrawScope| scope.draw_rect(color)))
    }
}
