//! Paint side of the engine: the render-context seam, paint methods and the
//! paint wrapper that flushes them.

mod node_paint_method;
mod paint_wrapper;
mod render_context;
mod retained_render_context;

pub use node_paint_method::NodePaintMethod;
pub use paint_wrapper::PaintWrapper;
pub use render_context::{DrawFunction, RenderContext};
pub use retained_render_context::RetainedRenderContext;

#[cfg(test)]
#[path = "tests/paint_wrapper_tests.rs"]
mod tests;
