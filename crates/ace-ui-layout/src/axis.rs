/// Main axis of a linear layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Children placed left to right.
    Horizontal,
    /// Children placed top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Picks the main-axis component of a `(width, height)` pair.
    #[inline]
    pub fn main(self, width: f32, height: f32) -> f32 {
        if self.is_horizontal() {
            width
        } else {
            height
        }
    }

    #[inline]
    pub fn cross(self, width: f32, height: f32) -> f32 {
        self.cross_axis().main(width, height)
    }
}
