//! Layout and paint property bags carried by every frame node.
//!
//! Both bags accumulate a [`PropertyChangeFlag`] as they are updated. The
//! flag is consumed by dirty propagation and cleared when the matching task
//! commits. Widget-specific fields live in an optional extension that is
//! cloned together with the bag.

use std::any::Any;
use std::fmt;

use ace_ui_graphics::EdgesF;
use ace_ui_layout::{
    Alignment, BorderWidthProperty, CalcSize, LayoutConstraintF, MarginProperty,
    MeasureProperty, PaddingProperty, PropertyChangeFlag, VisibleType,
};

/// Widget-specific property fields.
///
/// Implemented for every `Clone + Send + Sync` type, so widgets only supply
/// a plain struct.
pub trait PropertyExtension: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn PropertyExtension>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Clone + Send + Sync> PropertyExtension for T {
    fn clone_box(&self) -> Box<dyn PropertyExtension> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub struct LayoutProperty {
    layout_constraint: Option<LayoutConstraintF>,
    content_constraint: Option<LayoutConstraintF>,
    calc_layout_constraint: Option<MeasureProperty>,
    padding: Option<PaddingProperty>,
    margin: Option<MarginProperty>,
    border_width: Option<BorderWidthProperty>,
    visibility: Option<VisibleType>,
    alignment: Option<Alignment>,
    property_change_flag: PropertyChangeFlag,
    extension: Option<Box<dyn PropertyExtension>>,
}

impl Clone for LayoutProperty {
    fn clone(&self) -> Self {
        Self {
            layout_constraint: self.layout_constraint,
            content_constraint: self.content_constraint,
            calc_layout_constraint: self.calc_layout_constraint,
            padding: self.padding,
            margin: self.margin,
            border_width: self.border_width,
            visibility: self.visibility,
            alignment: self.alignment,
            property_change_flag: self.property_change_flag,
            extension: self.extension.as_deref().map(|extension| extension.clone_box()),
        }
    }
}

impl fmt::Debug for LayoutProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutProperty")
            .field("layout_constraint", &self.layout_constraint)
            .field("visibility", &self.visibility)
            .field("property_change_flag", &self.property_change_flag)
            .field("has_extension", &self.extension.is_some())
            .finish()
    }
}

impl LayoutProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension<T: PropertyExtension>(extension: T) -> Self {
        Self {
            extension: Some(Box::new(extension)),
            ..Self::default()
        }
    }

    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.extension.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn extension_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.extension.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    pub fn property_change_flag(&self) -> PropertyChangeFlag {
        self.property_change_flag
    }

    pub fn update_property_change_flag(&mut self, flag: PropertyChangeFlag) {
        self.property_change_flag |= flag;
    }

    pub fn clean_dirty(&mut self) {
        self.property_change_flag = PropertyChangeFlag::NORMAL;
    }

    pub fn layout_constraint(&self) -> Option<LayoutConstraintF> {
        self.layout_constraint
    }

    pub fn content_constraint(&self) -> Option<LayoutConstraintF> {
        self.content_constraint
    }

    /// Takes over the constraints resolved by a committed layout pass.
    pub fn sync_constraints_from(&mut self, committed: &LayoutProperty) {
        self.layout_constraint = committed.layout_constraint;
        self.content_constraint = committed.content_constraint;
    }

    pub fn calc_layout_constraint(&self) -> Option<MeasureProperty> {
        self.calc_layout_constraint
    }

    pub fn update_calc_layout_property(&mut self, constraint: MeasureProperty) {
        if self.calc_layout_constraint == Some(constraint) {
            return;
        }
        self.calc_layout_constraint = Some(constraint);
        self.property_change_flag |= PropertyChangeFlag::MEASURE;
    }

    pub fn update_user_defined_ideal_size(&mut self, size: CalcSize) {
        let calc = self.calc_layout_constraint.get_or_insert_with(Default::default);
        if calc.update_self_ideal_size(size) {
            self.property_change_flag |= PropertyChangeFlag::MEASURE;
        }
    }

    pub fn padding(&self) -> Option<PaddingProperty> {
        self.padding
    }

    pub fn update_padding(&mut self, padding: PaddingProperty) {
        if self.padding == Some(padding) {
            return;
        }
        self.padding = Some(padding);
        self.property_change_flag |= PropertyChangeFlag::MEASURE;
    }

    pub fn margin(&self) -> Option<MarginProperty> {
        self.margin
    }

    pub fn update_margin(&mut self, margin: MarginProperty) {
        if self.margin == Some(margin) {
            return;
        }
        self.margin = Some(margin);
        self.property_change_flag |= PropertyChangeFlag::MEASURE;
    }

    pub fn border_width(&self) -> Option<BorderWidthProperty> {
        self.border_width
    }

    pub fn update_border_width(&mut self, border_width: BorderWidthProperty) {
        if self.border_width == Some(border_width) {
            return;
        }
        self.border_width = Some(border_width);
        self.property_change_flag |= PropertyChangeFlag::MEASURE;
    }

    pub fn visibility(&self) -> VisibleType {
        self.visibility.unwrap_or_default()
    }

    pub fn update_visibility(&mut self, visibility: VisibleType) {
        if self.visibility == Some(visibility) {
            return;
        }
        self.visibility = Some(visibility);
        self.property_change_flag |= PropertyChangeFlag::MEASURE;
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn update_alignment(&mut self, alignment: Alignment) {
        if self.alignment == Some(alignment) {
            return;
        }
        self.alignment = Some(alignment);
        self.property_change_flag |= PropertyChangeFlag::LAYOUT;
    }

    /// Resolves the parent constraint into this node's own constraint:
    /// margin is taken off, then user min/max/ideal sizes are applied.
    pub fn update_layout_constraint(&mut self, parent: &LayoutConstraintF) {
        let mut constraint = *parent;
        if let Some(margin) = self.margin {
            let margin = margin.resolve(&constraint.scale_property, constraint.percent_reference.width);
            constraint.minus_edges(&margin);
        }
        if let Some(calc) = self.calc_layout_constraint {
            let scale = constraint.scale_property;
            let reference = constraint.percent_reference;
            if let Some(max) = calc.max_size {
                constraint.update_max_size_with_check(&max.resolve(&scale, reference));
            }
            if let Some(min) = calc.min_size {
                constraint.update_min_size_with_check(&min.resolve(&scale, reference));
            }
            if let Some(ideal) = calc.self_ideal_size {
                constraint.update_self_ideal_size_with_check(&ideal.resolve(&scale, reference));
            }
        }
        self.layout_constraint = Some(constraint);
    }

    /// Derives the content constraint: the layout constraint minus padding
    /// and border, with a known ideal size becoming the percent reference.
    pub fn update_content_constraint(&mut self) {
        let Some(mut content) = self.layout_constraint else {
            return;
        };
        if let Some(width) = content.self_ideal_size.width {
            content.percent_reference.width = width;
        }
        if let Some(height) = content.self_ideal_size.height {
            content.percent_reference.height = height;
        }
        if let Some(padding) = self.create_padding_and_border() {
            content.minus_edges(&padding);
        }
        self.content_constraint = Some(content);
    }

    /// Constraint handed to children by layout algorithms.
    pub fn create_child_constraint(&self) -> LayoutConstraintF {
        let Some(mut child) = self.content_constraint else {
            return LayoutConstraintF::default();
        };
        child.parent_ideal_size = child.self_ideal_size;
        child.self_ideal_size = Default::default();
        child
    }

    pub fn create_margin(&self) -> Option<EdgesF> {
        let margin = self.margin?;
        let (scale, reference) = self.percent_base();
        Some(margin.resolve(&scale, reference))
    }

    pub fn create_padding_and_border(&self) -> Option<EdgesF> {
        if self.padding.is_none() && self.border_width.is_none() {
            return None;
        }
        let (scale, reference) = self.percent_base();
        let padding = self
            .padding
            .map(|padding| padding.resolve(&scale, reference))
            .unwrap_or_default();
        let border = self
            .border_width
            .map(|border| border.resolve(&scale, reference))
            .unwrap_or_default();
        Some(padding + border)
    }

    fn percent_base(&self) -> (ace_ui_graphics::ScaleProperty, f32) {
        self.layout_constraint
            .map(|constraint| (constraint.scale_property, constraint.percent_reference.width))
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub struct PaintProperty {
    property_change_flag: PropertyChangeFlag,
    extension: Option<Box<dyn PropertyExtension>>,
}

impl Clone for PaintProperty {
    fn clone(&self) -> Self {
        Self {
            property_change_flag: self.property_change_flag,
            extension: self.extension.as_deref().map(|extension| extension.clone_box()),
        }
    }
}

impl fmt::Debug for PaintProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintProperty")
            .field("property_change_flag", &self.property_change_flag)
            .field("has_extension", &self.extension.is_some())
            .finish()
    }
}

impl PaintProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension<T: PropertyExtension>(extension: T) -> Self {
        Self {
            extension: Some(Box::new(extension)),
            ..Self::default()
        }
    }

    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.extension.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn extension_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.extension.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    pub fn property_change_flag(&self) -> PropertyChangeFlag {
        self.property_change_flag
    }

    pub fn update_property_change_flag(&mut self, flag: PropertyChangeFlag) {
        self.property_change_flag |= flag;
    }

    pub fn clean_dirty(&mut self) {
        self.property_change_flag = PropertyChangeFlag::NORMAL;
    }
}

#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod tests;
