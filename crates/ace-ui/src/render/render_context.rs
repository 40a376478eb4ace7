use std::any::Any;
use std::rc::Rc;

use ace_ui_graphics::{DrawScope, EdgesF};
use ace_ui_layout::{BorderColorProperty, BorderStyleProperty};

use crate::frame_node::FrameNode;
use crate::geometry_node::GeometryNode;

/// Records draw operations into a scope sized to the node's content.
pub type DrawFunction = Rc<dyn Fn(&mut dyn DrawScope)>;

/// Per-node handle into the rendering backend.
///
/// The engine only talks to the backend through this trait. Implementations
/// live on the UI thread and use interior mutability.
pub trait RenderContext: Any {
    fn init_context(&self, is_root: bool, surface_name: Option<&str>);

    /// Pushes committed geometry to the backend node.
    fn sync_geometry_properties(&self, geometry: &GeometryNode);

    /// Replaces the backend children of `host` with `children`, in order.
    fn rebuild_frame(&self, host: &FrameNode, children: &[Rc<FrameNode>]);

    fn request_next_frame(&self);

    /// Installs the callback the backend invokes when it needs a frame.
    fn set_request_frame(&self, callback: Rc<dyn Fn()>);

    fn has_border_color(&self) -> bool;
    fn update_border_color(&self, color: BorderColorProperty);

    fn has_border_style(&self) -> bool;
    fn update_border_style(&self, style: BorderStyleProperty);

    /// Border widths already resolved to pixels.
    fn update_border_width(&self, widths: EdgesF);

    fn flush_content_draw_function(&self, draw: DrawFunction);
    fn flush_foreground_draw_function(&self, draw: DrawFunction);
    fn flush_overlay_draw_function(&self, draw: DrawFunction);

    fn as_any(&self) -> &dyn Any;
}
