use ace_core::TaskThread;
use ace_ui_graphics::SizeF;

use super::{LayoutAlgorithm, LayoutWrapper};

/// Stacks children on top of each other and aligns them inside the padded
/// content box. Default algorithm for patterns that do not supply one.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxLayoutAlgorithm;

impl BoxLayoutAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutAlgorithm for BoxLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let child_constraint = wrapper.layout_property().create_child_constraint();
        let mut children_size = SizeF::ZERO;
        for child in wrapper.all_children_with_build() {
            child.measure(Some(child_constraint));
            let size = child.geometry_node().margin_frame_size();
            children_size.width = children_size.width.max(size.width);
            children_size.height = children_size.height.max(size.height);
        }

        let geometry = wrapper.geometry_node();
        let mut content = children_size;
        if geometry.has_content() {
            let own = geometry.content_size();
            content.width = content.width.max(own.width);
            content.height = content.height.max(own.height);
        }
        let padding = geometry.padding().unwrap_or_default();
        let constraint = wrapper
            .layout_property()
            .layout_constraint()
            .unwrap_or_default();
        let size = constraint
            .self_ideal_size
            .convert_to_size_or(content.add_edges(&padding));
        let size = constraint.constrain(size);
        log::trace!("box #{} measured {:?}", wrapper.host_id(), size);
        wrapper.geometry_node_mut().set_frame_size(size);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        let geometry = wrapper.geometry_node();
        let padding = geometry.padding().unwrap_or_default();
        let content_box = geometry.frame_size().minus_edges(&padding);
        let alignment = wrapper.layout_property().alignment().unwrap_or_default();
        let origin = padding.offset();

        if geometry.has_content() {
            let offset = origin + alignment.align(content_box, geometry.content_size());
            wrapper.geometry_node_mut().set_content_offset(offset);
        }
        for child in wrapper.all_children_with_build() {
            let child_size = child.geometry_node().margin_frame_size();
            child
                .geometry_node_mut()
                .set_margin_frame_offset(origin + alignment.align(content_box, child_size));
        }
    }

    fn can_run_on_which_thread(&self) -> TaskThread {
        TaskThread::MAIN | TaskThread::BACKGROUND
    }
}
