use super::{DrawFunction, PaintWrapper};

/// Widget-specific painting, created fresh for each render task.
///
/// Every layer is optional; a layer returning `None` leaves the backend's
/// previous draw function in place.
pub trait NodePaintMethod {
    fn content_draw_function(&self, _wrapper: &PaintWrapper) -> Option<DrawFunction> {
        None
    }

    fn foreground_draw_function(&self, _wrapper: &PaintWrapper) -> Option<DrawFunction> {
        None
    }

    fn overlay_draw_function(&self, _wrapper: &PaintWrapper) -> Option<DrawFunction> {
        None
    }
}
