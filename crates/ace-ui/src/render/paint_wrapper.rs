use std::any::Any;
use std::rc::Rc;

use ace_ui_graphics::{OffsetF, SizeF};

use super::{NodePaintMethod, RenderContext};
use crate::geometry_node::GeometryNode;
use crate::property::PaintProperty;

/// Snapshot handed to a paint method for one render task.
pub struct PaintWrapper {
    render_context: Rc<dyn RenderContext>,
    geometry_node: GeometryNode,
    paint_property: PaintProperty,
    node_paint_method: Option<Box<dyn NodePaintMethod>>,
}

impl PaintWrapper {
    pub fn new(
        render_context: Rc<dyn RenderContext>,
        geometry_node: GeometryNode,
        paint_property: PaintProperty,
    ) -> Self {
        Self {
            render_context,
            geometry_node,
            paint_property,
            node_paint_method: None,
        }
    }

    pub fn set_node_paint_method(&mut self, method: Box<dyn NodePaintMethod>) {
        self.node_paint_method = Some(method);
    }

    pub fn has_node_paint_method(&self) -> bool {
        self.node_paint_method.is_some()
    }

    pub fn render_context(&self) -> &Rc<dyn RenderContext> {
        &self.render_context
    }

    pub fn geometry_node(&self) -> &GeometryNode {
        &self.geometry_node
    }

    pub fn paint_property(&self) -> &PaintProperty {
        &self.paint_property
    }

    pub fn paint_property_extension<T: Any>(&self) -> Option<&T> {
        self.paint_property.extension::<T>()
    }

    pub fn content_size(&self) -> SizeF {
        self.geometry_node.content_size()
    }

    pub fn content_offset(&self) -> OffsetF {
        self.geometry_node.content_offset()
    }

    /// Hands the paint method's draw functions to the render context and
    /// asks the backend for a frame.
    pub fn flush_render(&self) {
        let Some(method) = self.node_paint_method.as_deref() else {
            return;
        };
        if let Some(draw) = method.content_draw_function(self) {
            self.render_context.flush_content_draw_function(draw);
        }
        if let Some(draw) = method.foreground_draw_function(self) {
            self.render_context.flush_foreground_draw_function(draw);
        }
        if let Some(draw) = method.overlay_draw_function(self) {
            self.render_context.flush_overlay_draw_function(draw);
        }
        self.render_context.request_next_frame();
    }
}

impl std::fmt::Debug for PaintWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintWrapper")
            .field("geometry_node", &self.geometry_node)
            .field("paint_property", &self.paint_property)
            .field("has_node_paint_method", &self.node_paint_method.is_some())
            .finish()
    }
}
