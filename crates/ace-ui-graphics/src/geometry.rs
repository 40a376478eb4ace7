//! Geometric primitives: OffsetF, SizeF, RectF, EdgesF

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D offset in pixels. Also used for points in global space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct OffsetF {
    pub x: f32,
    pub y: f32,
}

/// Points and offsets share one representation.
pub type PointF = OffsetF;

impl OffsetF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: OffsetF = OffsetF { x: 0.0, y: 0.0 };

    pub fn non_negative(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

impl Add for OffsetF {
    type Output = OffsetF;

    fn add(self, rhs: Self) -> Self::Output {
        OffsetF::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for OffsetF {
    type Output = OffsetF;

    fn sub(self, rhs: Self) -> Self::Output {
        OffsetF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for OffsetF {
    type Output = OffsetF;

    fn neg(self) -> Self::Output {
        OffsetF::new(-self.x, -self.y)
    }
}

impl AddAssign for OffsetF {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for OffsetF {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: SizeF = SizeF {
        width: 0.0,
        height: 0.0,
    };

    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn is_non_negative(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Clamps each axis into `[min, max]`. A non-finite max leaves the axis unclamped above.
    pub fn constrain(&self, min: SizeF, max: SizeF) -> SizeF {
        SizeF::new(
            clamp_axis(self.width, min.width, max.width),
            clamp_axis(self.height, min.height, max.height),
        )
    }

    pub fn add_edges(&self, edges: &EdgesF) -> SizeF {
        SizeF::new(
            self.width + edges.horizontal_sum(),
            self.height + edges.vertical_sum(),
        )
    }

    pub fn minus_edges(&self, edges: &EdgesF) -> SizeF {
        SizeF::new(
            (self.width - edges.horizontal_sum()).max(0.0),
            (self.height - edges.vertical_sum()).max(0.0),
        )
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    let value = if max.is_finite() { value.min(max) } else { value };
    value.max(min)
}

/// A rectangle expressed as an offset plus a size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_offset_size(offset: OffsetF, size: SizeF) -> Self {
        Self::new(offset.x, offset.y, size.width, size.height)
    }

    pub fn offset(&self) -> OffsetF {
        OffsetF::new(self.x, self.y)
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }

    pub fn set_offset(&mut self, offset: OffsetF) {
        self.x = offset.x;
        self.y = offset.y;
    }

    pub fn set_size(&mut self, size: SizeF) {
        self.width = size.width;
        self.height = size.height;
    }

    pub fn translate(&self, delta: OffsetF) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Edges count as inside.
    pub fn is_in_region(&self, point: PointF) -> bool {
        point.x >= self.x && point.y >= self.y && point.x <= self.right() && point.y <= self.bottom()
    }
}

/// Per-edge widths (padding, margin, border) in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgesF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgesF {
    pub fn uniform(all: f32) -> Self {
        Self {
            left: all,
            top: all,
            right: all,
            bottom: all,
        }
    }

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn offset(&self) -> OffsetF {
        OffsetF::new(self.left, self.top)
    }
}

impl AddAssign for EdgesF {
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.top += rhs.top;
        self.right += rhs.right;
        self.bottom += rhs.bottom;
    }
}

impl Add for EdgesF {
    type Output = EdgesF;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
