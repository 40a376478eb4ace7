use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ace_core::NodeId;
use ace_ui::render::{DrawFunction, RenderContext, RetainedRenderContext};
use ace_ui::{FrameNode, GeometryNode};
use ace_ui_graphics::{DrawPrimitive, EdgesF};
use ace_ui_layout::{BorderColorProperty, BorderStyleProperty};

/// Render context that keeps everything it is handed and counts calls.
#[derive(Default)]
pub struct MockRenderContext {
    retained: RetainedRenderContext,
    init_calls: Cell<usize>,
    sync_calls: Cell<usize>,
    synced_geometry: RefCell<Option<GeometryNode>>,
    rebuild_calls: Cell<usize>,
    next_frame_requests: Cell<usize>,
    content_flushes: Cell<usize>,
    foreground_flushes: Cell<usize>,
    overlay_flushes: Cell<usize>,
}

impl MockRenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mock behind `node`, if its render context is one.
    pub fn of(node: &FrameNode) -> Option<&MockRenderContext> {
        node.render_context()
            .as_any()
            .downcast_ref::<MockRenderContext>()
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.get()
    }

    pub fn is_root(&self) -> bool {
        self.retained.is_root()
    }

    pub fn surface_name(&self) -> Option<String> {
        self.retained.surface_name()
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.get()
    }

    pub fn synced_geometry(&self) -> Option<GeometryNode> {
        self.synced_geometry.borrow().clone()
    }

    pub fn rebuild_calls(&self) -> usize {
        self.rebuild_calls.get()
    }

    /// Ids of the children handed over by the last rebuild.
    pub fn children(&self) -> Vec<NodeId> {
        self.retained.children()
    }

    pub fn next_frame_requests(&self) -> usize {
        self.next_frame_requests.get()
    }

    pub fn content_flushes(&self) -> usize {
        self.content_flushes.get()
    }

    pub fn foreground_flushes(&self) -> usize {
        self.foreground_flushes.get()
    }

    pub fn overlay_flushes(&self) -> usize {
        self.overlay_flushes.get()
    }

    pub fn border_color(&self) -> Option<BorderColorProperty> {
        self.retained.border_color()
    }

    pub fn border_style(&self) -> Option<BorderStyleProperty> {
        self.retained.border_style()
    }

    pub fn border_width(&self) -> Option<EdgesF> {
        self.retained.border_width()
    }

    pub fn record(&self) -> Vec<DrawPrimitive> {
        self.retained.record()
    }

    pub fn reset_counts(&self) {
        for counter in [
            &self.init_calls,
            &self.sync_calls,
            &self.rebuild_calls,
            &self.next_frame_requests,
            &self.content_flushes,
            &self.foreground_flushes,
            &self.overlay_flushes,
        ] {
            counter.set(0);
        }
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl RenderContext for MockRenderContext {
    fn init_context(&self, is_root: bool, surface_name: Option<&str>) {
        bump(&self.init_calls);
        self.retained.init_context(is_root, surface_name);
    }

    fn sync_geometry_properties(&self, geometry: &GeometryNode) {
        bump(&self.sync_calls);
        *self.synced_geometry.borrow_mut() = Some(geometry.clone());
        self.retained.sync_geometry_properties(geometry);
    }

    fn rebuild_frame(&self, host: &FrameNode, children: &[Rc<FrameNode>]) {
        bump(&self.rebuild_calls);
        self.retained.rebuild_frame(host, children);
    }

    fn request_next_frame(&self) {
        bump(&self.next_frame_requests);
        self.retained.request_next_frame();
    }

    fn set_request_frame(&self, callback: Rc<dyn Fn()>) {
        self.retained.set_request_frame(callback);
    }

    fn has_border_color(&self) -> bool {
        self.retained.has_border_color()
    }

    fn update_border_color(&self, color: BorderColorProperty) {
        self.retained.update_border_color(color);
    }

    fn has_border_style(&self) -> bool {
        self.retained.has_border_style()
    }

    fn update_border_style(&self, style: BorderStyleProperty) {
        self.retained.update_border_style(style);
    }

    fn update_border_width(&self, widths: EdgesF) {
        self.retained.update_border_width(widths);
    }

    fn flush_content_draw_function(&self, draw: DrawFunction) {
        bump(&self.content_flushes);
        self.retained.flush_content_draw_function(draw);
    }

    fn flush_foreground_draw_function(&self, draw: DrawFunction) {
        bump(&self.foreground_flushes);
        self.retained.flush_foreground_draw_function(draw);
    }

    fn flush_overlay_draw_function(&self, draw: DrawFunction) {
        bump(&self.overlay_flushes);
        self.retained.flush_overlay_draw_function(draw);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for MockRenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRenderContext")
            .field("sync_calls", &self.sync_calls.get())
            .field("rebuild_calls", &self.rebuild_calls.get())
            .field("next_frame_requests", &self.next_frame_requests.get())
            .finish()
    }
}
