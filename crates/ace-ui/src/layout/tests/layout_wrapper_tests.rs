use super::*;
use std::rc::Rc;

use ace_core::{ElementRegister, NodeId, TaskThread};
use ace_ui_graphics::{Dimension, OffsetF, RectF, ScaleProperty, SizeF};
use ace_ui_layout::{Axis, CalcSize, EdgesProperty, LayoutConstraintF, VisibleType};

use crate::frame_node::FrameNode;
use crate::geometry_node::GeometryNode;
use crate::pattern::DefaultPattern;
use crate::property::LayoutProperty;

/// Reports a fixed intrinsic size and only tolerates the given threads.
struct FixedContent {
    size: SizeF,
    threads: TaskThread,
}

impl LayoutAlgorithm for FixedContent {
    fn measure_content(
        &mut self,
        content_constraint: &LayoutConstraintF,
        _wrapper: &LayoutWrapper,
    ) -> Option<SizeF> {
        Some(content_constraint.constrain(self.size))
    }

    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        BoxLayoutAlgorithm::new().measure(wrapper);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        BoxLayoutAlgorithm::new().layout(wrapper);
    }

    fn can_run_on_which_thread(&self) -> TaskThread {
        self.threads
    }
}

fn root_constraint() -> LayoutConstraintF {
    LayoutConstraintF::root(400.0, 800.0, ScaleProperty::from_density(1.0, 1.0))
}

fn wrapper_with(id: NodeId, property: LayoutProperty, algorithm: Box<dyn LayoutAlgorithm>) -> LayoutWrapper {
    let mut wrapper = LayoutWrapper::new(id, "Test", GeometryNode::new(), property, root_constraint());
    wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::new(algorithm));
    wrapper
}

fn boxed(property: LayoutProperty) -> LayoutWrapper {
    wrapper_with(ElementRegister::make_unique_id(), property, Box::new(BoxLayoutAlgorithm::new()))
}

fn sized(width: f32, height: f32) -> LayoutProperty {
    let mut property = LayoutProperty::new();
    property.update_user_defined_ideal_size(CalcSize::new(
        Some(Dimension::px(width)),
        Some(Dimension::px(height)),
    ));
    property
}

fn frame(wrapper: &LayoutWrapper) -> RectF {
    wrapper.geometry_node().frame_rect()
}

#[test]
fn box_wraps_and_centers_children() {
    let mut parent = boxed(LayoutProperty::new());
    parent.append_child(boxed(sized(100.0, 50.0)));
    parent.append_child(boxed(sized(60.0, 80.0)));

    parent.measure(Some(root_constraint()));
    parent.layout(OffsetF::ZERO);

    assert_eq!(parent.geometry_node().frame_size(), SizeF::new(100.0, 80.0));
    assert_eq!(frame(&parent.children()[0]), RectF::new(0.0, 15.0, 100.0, 50.0));
    assert_eq!(frame(&parent.children()[1]), RectF::new(20.0, 0.0, 60.0, 80.0));
    assert!(parent.children().iter().all(LayoutWrapper::is_active));
}

#[test]
fn gone_children_stay_inactive_and_take_no_space() {
    let mut gone = sized(300.0, 300.0);
    gone.update_visibility(VisibleType::Gone);
    let mut parent = boxed(LayoutProperty::new());
    parent.append_child(boxed(sized(40.0, 40.0)));
    parent.append_child(boxed(gone));

    parent.measure(Some(root_constraint()));
    parent.layout(OffsetF::ZERO);

    assert_eq!(parent.geometry_node().frame_size(), SizeF::new(40.0, 40.0));
    assert!(parent.children()[0].is_active());
    assert!(!parent.children()[1].is_active());
    assert_eq!(frame(&parent.children()[1]), RectF::default());
}

#[test]
fn row_places_children_along_the_main_axis() {
    let mut parent = boxed(LayoutProperty::with_extension(LinearLayoutProperty::new(
        Axis::Horizontal,
        Dimension::px(10.0),
    )));
    parent.set_layout_algorithm(LayoutAlgorithmWrapper::new(Box::new(LinearLayoutAlgorithm::new())));
    parent.append_child(boxed(sized(100.0, 50.0)));
    parent.append_child(boxed(sized(60.0, 80.0)));

    parent.measure(Some(root_constraint()));
    parent.layout(OffsetF::ZERO);

    assert_eq!(parent.geometry_node().frame_size(), SizeF::new(170.0, 80.0));
    assert_eq!(frame(&parent.children()[0]), RectF::new(0.0, 15.0, 100.0, 50.0));
    assert_eq!(frame(&parent.children()[1]), RectF::new(110.0, 0.0, 60.0, 80.0));
}

#[test]
fn padding_and_margin_shift_the_child() {
    let mut parent_property = LayoutProperty::new();
    parent_property.update_padding(EdgesProperty::uniform(Dimension::px(10.0)));
    let mut child_property = sized(50.0, 50.0);
    child_property.update_margin(EdgesProperty::uniform(Dimension::px(5.0)));
    let mut parent = boxed(parent_property);
    parent.append_child(boxed(child_property));

    parent.measure(Some(root_constraint()));
    parent.layout(OffsetF::ZERO);

    // 50 + 2 * 5 margin + 2 * 10 padding.
    assert_eq!(parent.geometry_node().frame_size(), SizeF::new(80.0, 80.0));
    let child = &parent.children()[0];
    assert_eq!(child.geometry_node().frame_offset(), OffsetF::new(15.0, 15.0));
    assert_eq!(child.geometry_node().margin_frame_size(), SizeF::new(60.0, 60.0));
}

#[test]
fn layout_records_global_offsets_down_the_tree() {
    let mut inner = boxed(sized(20.0, 20.0));
    inner.append_child(boxed(sized(10.0, 10.0)));
    let mut outer = boxed(sized(100.0, 100.0));
    outer.append_child(inner);

    outer.measure(Some(root_constraint()));
    outer.layout(OffsetF::new(5.0, 5.0));

    let inner = &outer.children()[0];
    let leaf = &inner.children()[0];
    assert_eq!(outer.geometry_node().global_offset(), OffsetF::new(5.0, 5.0));
    assert_eq!(inner.geometry_node().parent_global_offset(), OffsetF::new(5.0, 5.0));
    assert_eq!(inner.geometry_node().global_offset(), OffsetF::new(45.0, 45.0));
    assert_eq!(leaf.geometry_node().global_offset(), OffsetF::new(50.0, 50.0));
}

#[test]
fn measure_content_sets_and_centers_content() {
    let mut wrapper = wrapper_with(
        ElementRegister::make_unique_id(),
        sized(100.0, 100.0),
        Box::new(FixedContent {
            size: SizeF::new(40.0, 20.0),
            threads: TaskThread::MAIN,
        }),
    );

    wrapper.measure(Some(root_constraint()));
    wrapper.layout(OffsetF::ZERO);

    let geometry = wrapper.geometry_node();
    assert_eq!(geometry.frame_size(), SizeF::new(100.0, 100.0));
    assert_eq!(geometry.content_size(), SizeF::new(40.0, 20.0));
    assert_eq!(geometry.content_offset(), OffsetF::new(30.0, 40.0));
}

#[test]
fn measure_without_a_parent_uses_the_fallback() {
    let mut wrapper = boxed(LayoutProperty::new());
    wrapper.measure(None);

    assert_eq!(wrapper.layout_property().layout_constraint(), Some(root_constraint()));
    assert_eq!(wrapper.geometry_node().parent_layout_constraint(), None);
}

#[test]
fn placeholders_leave_geometry_untouched() {
    let mut geometry = GeometryNode::new();
    geometry.set_frame_rect(RectF::new(1.0, 2.0, 3.0, 4.0));
    let mut wrapper = LayoutWrapper::new(
        ElementRegister::make_unique_id(),
        "Clean",
        geometry.clone(),
        LayoutProperty::new(),
        root_constraint(),
    );

    wrapper.measure(Some(root_constraint()));
    wrapper.layout(OffsetF::new(9.0, 9.0));

    assert!(wrapper.skip_measure());
    assert!(wrapper.skip_layout());
    assert_eq!(wrapper.geometry_node(), &geometry);
    assert_eq!(wrapper.layout_property().layout_constraint(), None);
}

#[test]
fn layout_only_wrappers_keep_the_measured_size() {
    let mut geometry = GeometryNode::new();
    geometry.set_frame_size(SizeF::new(30.0, 30.0));
    let mut wrapper = LayoutWrapper::new(
        ElementRegister::make_unique_id(),
        "Moved",
        geometry,
        sized(90.0, 90.0),
        root_constraint(),
    );
    wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::with_skip(
        Some(Box::new(BoxLayoutAlgorithm::new())),
        true,
        false,
    ));

    wrapper.measure(Some(root_constraint()));
    wrapper.layout(OffsetF::new(2.0, 3.0));

    assert_eq!(wrapper.geometry_node().frame_size(), SizeF::new(30.0, 30.0));
    assert_eq!(wrapper.geometry_node().parent_global_offset(), OffsetF::new(2.0, 3.0));
}

#[test]
fn thread_affinity_is_the_intersection_of_the_subtree() {
    let fixed = |threads| -> Box<dyn LayoutAlgorithm> {
        Box::new(FixedContent {
            size: SizeF::ZERO,
            threads,
        })
    };

    let mut anywhere = boxed(LayoutProperty::new());
    anywhere.append_child(boxed(LayoutProperty::new()));
    assert_eq!(anywhere.can_run_on_which_thread(), TaskThread::MAIN | TaskThread::BACKGROUND);
    assert!(anywhere.check_should_run_on_main());

    let mut worker_only = boxed(LayoutProperty::new());
    worker_only.append_child(wrapper_with(1, LayoutProperty::new(), fixed(TaskThread::BACKGROUND)));
    assert_eq!(worker_only.can_run_on_which_thread(), TaskThread::BACKGROUND);
    assert!(!worker_only.check_should_run_on_main());

    let mut conflicting = wrapper_with(2, LayoutProperty::new(), fixed(TaskThread::MAIN));
    conflicting.append_child(wrapper_with(3, LayoutProperty::new(), fixed(TaskThread::BACKGROUND)));
    assert!(conflicting.can_run_on_which_thread().is_undefined());
    assert!(conflicting.check_should_run_on_main());

    worker_only.set_should_run_on_main(true);
    assert_eq!(worker_only.can_run_on_which_thread(), TaskThread::MAIN);
}

#[test]
fn mounting_commits_into_live_nodes_and_skips_missing_ones() {
    let parent = FrameNode::create_frame_node(
        "Parent",
        ElementRegister::make_unique_id(),
        Box::new(DefaultPattern),
        false,
    );
    let child = FrameNode::create_frame_node(
        "Child",
        ElementRegister::make_unique_id(),
        Box::new(DefaultPattern),
        false,
    );
    parent.add_child(Rc::clone(&child), None);
    child.update_layout_property(|property| {
        property.update_user_defined_ideal_size(CalcSize::new(
            Some(Dimension::px(40.0)),
            Some(Dimension::px(40.0)),
        ))
    });

    let mut wrapper = parent.create_layout_wrapper(false, false);
    wrapper.append_child(boxed(sized(10.0, 10.0)));
    wrapper.set_active(true);
    wrapper.measure(Some(root_constraint()));
    wrapper.layout(OffsetF::ZERO);
    assert!(wrapper.children()[1].host_node().is_none());
    wrapper.mount_to_host_on_main_thread();

    assert!(parent.is_active());
    assert!(child.is_active());
    assert_eq!(parent.frame_rect().size(), SizeF::new(40.0, 40.0));
    assert_eq!(child.frame_rect(), RectF::new(0.0, 0.0, 40.0, 40.0));
}
