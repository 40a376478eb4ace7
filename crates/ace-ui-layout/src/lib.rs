//! Layout contracts & policies for the Ace frame engine

mod alignment;
mod axis;
mod constraint;
mod edges;
mod measure_property;
mod property_change_flag;
mod visibility;

pub use alignment::*;
pub use axis::*;
pub use constraint::*;
pub use edges::*;
pub use measure_property::*;
pub use property_change_flag::*;
pub use visibility::*;

pub use ace_ui_graphics::ScaleProperty;

pub mod prelude {
    pub use crate::alignment::Alignment;
    pub use crate::constraint::{LayoutConstraintF, OptionalSizeF};
    pub use crate::property_change_flag::PropertyChangeFlag;
    pub use crate::visibility::VisibleType;
}
