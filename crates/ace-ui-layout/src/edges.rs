//! Padding, margin and border property bags

use ace_ui_graphics::{Color, Dimension, EdgesF, ScaleProperty};

/// Per-edge dimensions; unset edges resolve to zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EdgesProperty {
    pub left: Option<Dimension>,
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
}

pub type PaddingProperty = EdgesProperty;
pub type MarginProperty = EdgesProperty;
pub type BorderWidthProperty = EdgesProperty;

impl EdgesProperty {
    pub fn uniform(value: Dimension) -> Self {
        Self {
            left: Some(value),
            top: Some(value),
            right: Some(value),
            bottom: Some(value),
        }
    }

    pub fn any_set(&self) -> bool {
        self.left.is_some() || self.top.is_some() || self.right.is_some() || self.bottom.is_some()
    }

    /// Resolves every edge against `percent_reference` (a width: percent
    /// padding and border are relative to the parent width on all edges).
    pub fn resolve(&self, scale: &ScaleProperty, percent_reference: f32) -> EdgesF {
        let px = |edge: Option<Dimension>| {
            edge.and_then(|value| value.convert_to_px(scale, percent_reference))
                .unwrap_or(0.0)
        };
        EdgesF::new(px(self.left), px(self.top), px(self.right), px(self.bottom))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BorderColorProperty {
    pub left: Option<Color>,
    pub top: Option<Color>,
    pub right: Option<Color>,
    pub bottom: Option<Color>,
}

impl BorderColorProperty {
    pub fn uniform(color: Color) -> Self {
        Self {
            left: Some(color),
            top: Some(color),
            right: Some(color),
            bottom: Some(color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BorderStyleProperty {
    pub left: Option<BorderStyle>,
    pub top: Option<BorderStyle>,
    pub right: Option<BorderStyle>,
    pub bottom: Option<BorderStyle>,
}

impl BorderStyleProperty {
    pub fn uniform(style: BorderStyle) -> Self {
        Self {
            left: Some(style),
            top: Some(style),
            right: Some(style),
            bottom: Some(style),
        }
    }
}
