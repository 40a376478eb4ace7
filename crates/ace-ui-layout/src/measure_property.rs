//! User-declared sizes, unresolved until a constraint is known

use crate::OptionalSizeF;
use ace_ui_graphics::{Dimension, ScaleProperty, SizeF};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CalcSize {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

impl CalcSize {
    pub const fn new(width: Option<Dimension>, height: Option<Dimension>) -> Self {
        Self { width, height }
    }

    /// Resolves each axis against the matching axis of `percent_reference`.
    pub fn resolve(&self, scale: &ScaleProperty, percent_reference: SizeF) -> OptionalSizeF {
        OptionalSizeF::new(
            self.width
                .and_then(|width| width.convert_to_px(scale, percent_reference.width)),
            self.height
                .and_then(|height| height.convert_to_px(scale, percent_reference.height)),
        )
    }
}

/// Ideal, min and max size as declared by the widget layer.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MeasureProperty {
    pub self_ideal_size: Option<CalcSize>,
    pub min_size: Option<CalcSize>,
    pub max_size: Option<CalcSize>,
}

impl MeasureProperty {
    pub fn update_self_ideal_size(&mut self, size: CalcSize) -> bool {
        let changed = self.self_ideal_size != Some(size);
        self.self_ideal_size = Some(size);
        changed
    }

    pub fn update_min_size(&mut self, size: CalcSize) -> bool {
        let changed = self.min_size != Some(size);
        self.min_size = Some(size);
        changed
    }

    pub fn update_max_size(&mut self, size: CalcSize) -> bool {
        let changed = self.max_size != Some(size);
        self.max_size = Some(size);
        changed
    }
}
