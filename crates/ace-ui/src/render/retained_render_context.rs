use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ace_core::NodeId;
use ace_ui_graphics::{Color, DrawPrimitive, DrawScope, DrawScopeDefault, EdgesF, RectF};
use ace_ui_layout::{BorderColorProperty, BorderStyleProperty};

use super::{DrawFunction, RenderContext};
use crate::frame_node::FrameNode;
use crate::geometry_node::GeometryNode;

/// Backend-free render context that keeps the last synced state in memory.
///
/// Used when no backend installs its own factory. `record` replays the
/// stored draw functions into a [`DrawScopeDefault`].
#[derive(Default)]
pub struct RetainedRenderContext {
    is_root: Cell<bool>,
    surface_name: RefCell<Option<String>>,
    frame: Cell<RectF>,
    children: RefCell<Vec<NodeId>>,
    border_color: Cell<Option<BorderColorProperty>>,
    border_style: Cell<Option<BorderStyleProperty>>,
    border_width: Cell<Option<EdgesF>>,
    content_draw: RefCell<Option<DrawFunction>>,
    foreground_draw: RefCell<Option<DrawFunction>>,
    overlay_draw: RefCell<Option<DrawFunction>>,
    request_frame: RefCell<Option<Rc<dyn Fn()>>>,
}

impl RetainedRenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.is_root.get()
    }

    pub fn surface_name(&self) -> Option<String> {
        self.surface_name.borrow().clone()
    }

    pub fn frame(&self) -> RectF {
        self.frame.get()
    }

    /// Ids of the render children set by the last rebuild.
    pub fn children(&self) -> Vec<NodeId> {
        self.children.borrow().clone()
    }

    pub fn border_width(&self) -> Option<EdgesF> {
        self.border_width.get()
    }

    pub fn border_color(&self) -> Option<BorderColorProperty> {
        self.border_color.get()
    }

    pub fn border_style(&self) -> Option<BorderStyleProperty> {
        self.border_style.get()
    }

    /// Replays content, foreground and overlay layers, then the border.
    pub fn record(&self) -> Vec<DrawPrimitive> {
        let mut scope = DrawScopeDefault::new(self.frame.get().size());
        for layer in [&self.content_draw, &self.foreground_draw, &self.overlay_draw] {
            let draw = layer.borrow().clone();
            if let Some(draw) = draw {
                draw(&mut scope);
            }
        }
        if let Some(widths) = self.border_width.get() {
            let color = self
                .border_color
                .get()
                .and_then(|color| color.top)
                .unwrap_or(Color::BLACK);
            scope.draw_border(widths, color);
        }
        scope.primitives().to_vec()
    }
}

impl RenderContext for RetainedRenderContext {
    fn init_context(&self, is_root: bool, surface_name: Option<&str>) {
        self.is_root.set(is_root);
        *self.surface_name.borrow_mut() = surface_name.map(str::to_owned);
    }

    fn sync_geometry_properties(&self, geometry: &GeometryNode) {
        self.frame.set(geometry.frame_rect());
    }

    fn rebuild_frame(&self, _host: &FrameNode, children: &[Rc<FrameNode>]) {
        *self.children.borrow_mut() = children.iter().map(|child| child.id()).collect();
    }

    fn request_next_frame(&self) {
        let callback = self.request_frame.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn set_request_frame(&self, callback: Rc<dyn Fn()>) {
        *self.request_frame.borrow_mut() = Some(callback);
    }

    fn has_border_color(&self) -> bool {
        self.border_color.get().is_some()
    }

    fn update_border_color(&self, color: BorderColorProperty) {
        self.border_color.set(Some(color));
    }

    fn has_border_style(&self) -> bool {
        self.border_style.get().is_some()
    }

    fn update_border_style(&self, style: BorderStyleProperty) {
        self.border_style.set(Some(style));
    }

    fn update_border_width(&self, widths: EdgesF) {
        self.border_width.set(Some(widths));
    }

    fn flush_content_draw_function(&self, draw: DrawFunction) {
        *self.content_draw.borrow_mut() = Some(draw);
    }

    fn flush_foreground_draw_function(&self, draw: DrawFunction) {
        *self.foreground_draw.borrow_mut() = Some(draw);
    }

    fn flush_overlay_draw_function(&self, draw: DrawFunction) {
        *self.overlay_draw.borrow_mut() = Some(draw);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
