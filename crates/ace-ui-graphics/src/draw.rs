//! Recorded drawing: primitives and the scope paint methods draw into

use crate::{Color, EdgesF, RectF, SizeF};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    Rect { rect: RectF, color: Color },
    Border { rect: RectF, widths: EdgesF, color: Color },
}

pub trait DrawScope {
    fn size(&self) -> SizeF;
    fn draw_rect(&mut self, color: Color);
    /// Draws a rectangle at the specified position and size.
    fn draw_rect_at(&mut self, rect: RectF, color: Color);
    fn draw_border(&mut self, widths: EdgesF, color: Color);
    fn into_primitives(self) -> Vec<DrawPrimitive>
    where
        Self: Sized;
}

#[derive(Default)]
pub struct DrawScopeDefault {
    size: SizeF,
    primitives: Vec<DrawPrimitive>,
}

impl DrawScopeDefault {
    pub fn new(size: SizeF) -> Self {
        Self {
            size,
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }
}

impl DrawScope for DrawScopeDefault {
    fn size(&self) -> SizeF {
        self.size
    }

    fn draw_rect(&mut self, color: Color) {
        self.primitives.push(DrawPrimitive::Rect {
            rect: RectF::new(0.0, 0.0, self.size.width, self.size.height),
            color,
        });
    }

    fn draw_rect_at(&mut self, rect: RectF, color: Color) {
        self.primitives.push(DrawPrimitive::Rect { rect, color });
    }

    fn draw_border(&mut self, widths: EdgesF, color: Color) {
        self.primitives.push(DrawPrimitive::Border {
            rect: RectF::new(0.0, 0.0, self.size.width, self.size.height),
            widths,
            color,
        });
    }

    fn into_primitives(self) -> Vec<DrawPrimitive> {
        self.primitives
    }
}
