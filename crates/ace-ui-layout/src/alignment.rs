//! Alignment of a child inside its parent's content box

use ace_ui_graphics::{OffsetF, SizeF};

/// Fractional alignment: `-1.0` is the leading edge, `1.0` the trailing edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Alignment {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Offset of a `child` box aligned inside `parent`.
    pub fn align(&self, parent: SizeF, child: SizeF) -> OffsetF {
        let free_width = parent.width - child.width;
        let free_height = parent.height - child.height;
        OffsetF::new(
            free_width / 2.0 * (1.0 + self.horizontal),
            free_height / 2.0 * (1.0 + self.vertical),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}
