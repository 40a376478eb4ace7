use ace_core::TaskThread;
use ace_ui_graphics::{Dimension, OffsetF, SizeF};
use ace_ui_layout::Axis;

use super::{LayoutAlgorithm, LayoutWrapper};

/// Layout-property extension read by [`LinearLayoutAlgorithm`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearLayoutProperty {
    pub axis: Axis,
    /// Gap between consecutive children.
    pub space: Dimension,
}

impl LinearLayoutProperty {
    pub fn new(axis: Axis, space: Dimension) -> Self {
        Self { axis, space }
    }

    pub fn row() -> Self {
        Self::new(Axis::Horizontal, Dimension::px(0.0))
    }

    pub fn column() -> Self {
        Self::new(Axis::Vertical, Dimension::px(0.0))
    }
}

impl Default for LinearLayoutProperty {
    fn default() -> Self {
        Self::column()
    }
}

/// Places children one after another along the main axis. The node's
/// alignment positions each child on the cross axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearLayoutAlgorithm;

impl LinearLayoutAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    fn property(wrapper: &LayoutWrapper) -> LinearLayoutProperty {
        wrapper
            .layout_property()
            .extension::<LinearLayoutProperty>()
            .copied()
            .unwrap_or_default()
    }

    fn space_px(wrapper: &LayoutWrapper, property: &LinearLayoutProperty) -> f32 {
        let child_constraint = wrapper.layout_property().create_child_constraint();
        let (main_reference, _) = main_cross(property.axis, child_constraint.percent_reference);
        property
            .space
            .convert_to_px(&child_constraint.scale_property, main_reference)
            .unwrap_or(0.0)
    }
}

fn main_cross(axis: Axis, size: SizeF) -> (f32, f32) {
    (axis.main(size.width, size.height), axis.cross(size.width, size.height))
}

fn from_main_cross(axis: Axis, main: f32, cross: f32) -> SizeF {
    if axis.is_horizontal() {
        SizeF::new(main, cross)
    } else {
        SizeF::new(cross, main)
    }
}

impl LayoutAlgorithm for LinearLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let property = Self::property(wrapper);
        let axis = property.axis;
        let child_constraint = wrapper.layout_property().create_child_constraint();
        let space = Self::space_px(wrapper, &property);

        let mut main_total = 0.0_f32;
        let mut cross_max = 0.0_f32;
        let mut count = 0_usize;
        for child in wrapper.all_children_with_build() {
            child.measure(Some(child_constraint));
            let (main, cross) = main_cross(axis, child.geometry_node().margin_frame_size());
            main_total += main;
            cross_max = cross_max.max(cross);
            count += 1;
        }
        if count > 1 {
            main_total += space * (count - 1) as f32;
        }

        let padding = wrapper.geometry_node().padding().unwrap_or_default();
        let constraint = wrapper
            .layout_property()
            .layout_constraint()
            .unwrap_or_default();
        let content = from_main_cross(axis, main_total, cross_max);
        let size = constraint
            .self_ideal_size
            .convert_to_size_or(content.add_edges(&padding));
        wrapper
            .geometry_node_mut()
            .set_frame_size(constraint.constrain(size));
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        let property = Self::property(wrapper);
        let axis = property.axis;
        let padding = wrapper.geometry_node().padding().unwrap_or_default();
        let content_box = wrapper.geometry_node().frame_size().minus_edges(&padding);
        let alignment = wrapper.layout_property().alignment().unwrap_or_default();
        let origin = padding.offset();
        let space = Self::space_px(wrapper, &property);

        let mut cursor = 0.0_f32;
        for child in wrapper.all_children_with_build() {
            let child_size = child.geometry_node().margin_frame_size();
            let aligned = alignment.align(content_box, child_size);
            let offset = if axis.is_horizontal() {
                OffsetF::new(cursor, aligned.y)
            } else {
                OffsetF::new(aligned.x, cursor)
            };
            child.geometry_node_mut().set_margin_frame_offset(origin + offset);
            cursor += main_cross(axis, child_size).0 + space;
        }
    }

    fn can_run_on_which_thread(&self) -> TaskThread {
        TaskThread::MAIN | TaskThread::BACKGROUND
    }
}
