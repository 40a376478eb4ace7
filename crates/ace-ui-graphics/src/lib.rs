//! Pure math/data for the Ace frame engine
//!
//! Geometry primitives, colors, dimensions and the recorded draw scope used
//! by paint methods. Nothing in here knows about nodes or pipelines.

mod color;
mod dimension;
mod draw;
mod geometry;

pub use color::*;
pub use dimension::*;
pub use draw::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::dimension::{Dimension, DimensionUnit};
    pub use crate::geometry::{EdgesF, OffsetF, PointF, RectF, SizeF};
}
