//! Layout constraints handed from parent to child during measure

use ace_ui_graphics::{EdgesF, ScaleProperty, SizeF};

/// A size whose axes may be unset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct OptionalSizeF {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl OptionalSizeF {
    pub const fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    pub fn from_size(size: SizeF) -> Self {
        Self::new(Some(size.width), Some(size.height))
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    pub fn is_null(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn size(&self) -> Option<SizeF> {
        Some(SizeF::new(self.width?, self.height?))
    }

    /// Fills only the axes that are still unset.
    pub fn update_illegal_size_with_check(&mut self, size: &OptionalSizeF) {
        if self.width.is_none() {
            self.width = size.width;
        }
        if self.height.is_none() {
            self.height = size.height;
        }
    }

    /// Resolved size, falling back to `fallback` for each unset axis.
    pub fn convert_to_size_or(&self, fallback: SizeF) -> SizeF {
        SizeF::new(
            self.width.unwrap_or(fallback.width),
            self.height.unwrap_or(fallback.height),
        )
    }

    pub fn minus_edges(&mut self, edges: &EdgesF) {
        if let Some(width) = self.width.as_mut() {
            *width = (*width - edges.horizontal_sum()).max(0.0);
        }
        if let Some(height) = self.height.as_mut() {
            *height = (*height - edges.vertical_sum()).max(0.0);
        }
    }
}

/// The constraint a parent hands to a child for measuring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstraintF {
    pub scale_property: ScaleProperty,
    pub min_size: SizeF,
    pub max_size: SizeF,
    /// Base used to resolve percent dimensions.
    pub percent_reference: SizeF,
    pub parent_ideal_size: OptionalSizeF,
    pub self_ideal_size: OptionalSizeF,
}

impl Default for LayoutConstraintF {
    fn default() -> Self {
        Self {
            scale_property: ScaleProperty::default(),
            min_size: SizeF::ZERO,
            max_size: SizeF::new(f32::INFINITY, f32::INFINITY),
            percent_reference: SizeF::ZERO,
            parent_ideal_size: OptionalSizeF::default(),
            self_ideal_size: OptionalSizeF::default(),
        }
    }
}

impl LayoutConstraintF {
    /// The fallback constraint used for a subtree root: the root size caps
    /// the node and is the percent reference.
    pub fn root(width: f32, height: f32, scale_property: ScaleProperty) -> Self {
        let root = SizeF::new(width, height);
        Self {
            scale_property,
            max_size: root,
            percent_reference: root,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            scale_property: self.scale_property,
            ..Self::default()
        };
    }

    /// Shrinks every size by `edges`, used for padding, border and margin.
    pub fn minus_edges(&mut self, edges: &EdgesF) {
        self.min_size = self.min_size.minus_edges(edges);
        self.max_size = deflate_max(self.max_size, edges);
        self.percent_reference = self.percent_reference.minus_edges(edges);
        self.self_ideal_size.minus_edges(edges);
        self.parent_ideal_size.minus_edges(edges);
    }

    /// Clamps `size` into `[min_size, max_size]`.
    pub fn constrain(&self, size: SizeF) -> SizeF {
        size.constrain(self.min_size, self.max_size)
    }

    /// Pins the ideal size into range, keeping min/max consistent with it.
    pub fn update_self_ideal_size_with_check(&mut self, ideal: &OptionalSizeF) {
        if let Some(width) = ideal.width {
            let width = clamp_to(width, self.min_size.width, self.max_size.width);
            self.self_ideal_size.width = Some(width);
        }
        if let Some(height) = ideal.height {
            let height = clamp_to(height, self.min_size.height, self.max_size.height);
            self.self_ideal_size.height = Some(height);
        }
    }

    pub fn update_max_size_with_check(&mut self, max: &OptionalSizeF) {
        if let Some(width) = max.width {
            self.max_size.width = self.max_size.width.min(width).max(self.min_size.width);
        }
        if let Some(height) = max.height {
            self.max_size.height = self.max_size.height.min(height).max(self.min_size.height);
        }
    }

    pub fn update_min_size_with_check(&mut self, min: &OptionalSizeF) {
        if let Some(width) = min.width {
            self.min_size.width = width.min(self.max_size.width).max(self.min_size.width);
        }
        if let Some(height) = min.height {
            self.min_size.height = height.min(self.max_size.height).max(self.min_size.height);
        }
    }
}

fn deflate_max(max: SizeF, edges: &EdgesF) -> SizeF {
    let deflate = |value: f32, amount: f32| {
        if value.is_finite() {
            (value - amount).max(0.0)
        } else {
            value
        }
    };
    SizeF::new(
        deflate(max.width, edges.horizontal_sum()),
        deflate(max.height, edges.vertical_sum()),
    )
}

fn clamp_to(value: f32, min: f32, max: f32) -> f32 {
    let value = if max.is_finite() { value.min(max) } else { value };
    value.max(min)
}

#[cfg(test)]
#[path = "tests/constraint_tests.rs"]
mod tests;
