use super::*;

use ace_core::INVALID_NODE_ID;
use ace_ui_graphics::{Dimension, EdgesF, PointF, ScaleProperty, SizeF};
use ace_ui_layout::{CalcSize, EdgesProperty};

use crate::event::{HitTestResult, TouchEvent, TouchRestrict, TouchTestResult};
use crate::pipeline::PipelineConfig;

/// Retained context that also counts geometry syncs and rebuilds.
#[derive(Default)]
struct CountingContext {
    inner: RetainedRenderContext,
    syncs: Cell<usize>,
    rebuilds: Cell<usize>,
}

impl RenderContext for CountingContext {
    fn init_context(&self, is_root: bool, surface_name: Option<&str>) {
        self.inner.init_context(is_root, surface_name);
    }

    fn sync_geometry_properties(&self, geometry: &GeometryNode) {
        self.syncs.set(self.syncs.get() + 1);
        self.inner.sync_geometry_properties(geometry);
    }

    fn rebuild_frame(&self, host: &FrameNode, children: &[Rc<FrameNode>]) {
        self.rebuilds.set(self.rebuilds.get() + 1);
        self.inner.rebuild_frame(host, children);
    }

    fn request_next_frame(&self) {
        self.inner.request_next_frame();
    }

    fn set_request_frame(&self, callback: Rc<dyn Fn()>) {
        self.inner.set_request_frame(callback);
    }

    fn has_border_color(&self) -> bool {
        self.inner.has_border_color()
    }

    fn update_border_color(&self, color: BorderColorProperty) {
        self.inner.update_border_color(color);
    }

    fn has_border_style(&self) -> bool {
        self.inner.has_border_style()
    }

    fn update_border_style(&self, style: BorderStyleProperty) {
        self.inner.update_border_style(style);
    }

    fn update_border_width(&self, widths: EdgesF) {
        self.inner.update_border_width(widths);
    }

    fn flush_content_draw_function(&self, draw: crate::render::DrawFunction) {
        self.inner.flush_content_draw_function(draw);
    }

    fn flush_foreground_draw_function(&self, draw: crate::render::DrawFunction) {
        self.inner.flush_foreground_draw_function(draw);
    }

    fn flush_overlay_draw_function(&self, draw: crate::render::DrawFunction) {
        self.inner.flush_overlay_draw_function(draw);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
struct Probe {
    active: Cell<usize>,
    inactive: Cell<usize>,
    detached: Cell<usize>,
}

/// Pattern with switchable predicates that counts lifecycle hooks.
#[derive(Default)]
struct ProbePattern {
    probe: Rc<Probe>,
    measure_boundary: bool,
    not_render_boundary: bool,
    atomic: bool,
    surface: Option<&'static str>,
    verdict: bool,
    legacy_verdict: bool,
}

impl Pattern for ProbePattern {
    fn is_measure_boundary(&self) -> bool {
        self.measure_boundary
    }

    fn is_render_boundary(&self) -> bool {
        !self.not_render_boundary
    }

    fn is_atomic_node(&self) -> bool {
        self.atomic
    }

    fn surface_node_name(&self) -> Option<String> {
        self.surface.map(str::to_owned)
    }

    fn on_detach_from_frame_node(&self) {
        self.probe.detached.set(self.probe.detached.get() + 1);
    }

    fn on_active(&self) {
        self.probe.active.set(self.probe.active.get() + 1);
    }

    fn on_in_active(&self) {
        self.probe.inactive.set(self.probe.inactive.get() + 1);
    }

    fn on_dirty_layout_wrapper_swap(&self, _dirty: &LayoutWrapper, _config: &DirtySwapConfig) -> bool {
        self.verdict
    }

    fn on_dirty_layout_wrapper_swap_legacy(
        &self,
        _dirty: &LayoutWrapper,
        _skip_measure: bool,
        _skip_layout: bool,
    ) -> bool {
        self.legacy_verdict
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn inline_pipeline() -> Rc<PipelineContext> {
    PipelineContext::with_std_runtime(PipelineConfig {
        layout_workers: 0,
        ..PipelineConfig::default().with_root_size(400.0, 800.0)
    })
}

fn node(tag: &str) -> Rc<FrameNode> {
    node_with(tag, ProbePattern::default())
}

fn node_with(tag: &str, pattern: ProbePattern) -> Rc<FrameNode> {
    FrameNode::create_frame_node(tag, ElementRegister::make_unique_id(), Box::new(pattern), false)
}

fn node_with_context(pattern: ProbePattern) -> (Rc<FrameNode>, Rc<CountingContext>) {
    let context = Rc::new(CountingContext::default());
    let node = FrameNode::create_frame_node_with_render_context(
        "Probe",
        ElementRegister::make_unique_id(),
        Box::new(pattern),
        false,
        context.clone(),
    );
    (node, context)
}

fn root() -> Rc<FrameNode> {
    FrameNode::create_frame_node_with_tree(
        "root",
        ElementRegister::make_unique_id(),
        Box::new(ProbePattern::default()),
    )
}

fn fixed_size(node: &FrameNode, width: f32, height: f32) {
    node.update_layout_property(|property| {
        property.update_user_defined_ideal_size(CalcSize::new(
            Some(Dimension::px(width)),
            Some(Dimension::px(height)),
        ))
    });
}

fn place(node: &FrameNode, rect: RectF) {
    let mut geometry = GeometryNode::new();
    geometry.set_frame_rect(rect);
    node.set_geometry_node(geometry);
}

/// Root with one child, laid out once so every dirty set starts empty.
fn settled_tree(pipeline: &Rc<PipelineContext>, child: &Rc<FrameNode>) -> Rc<FrameNode> {
    let root = root();
    root.add_child(Rc::clone(child), None);
    pipeline.set_root_node(Rc::clone(&root));
    pipeline.flush_vsync();
    assert!(pipeline.scheduler().is_empty());
    root
}

// ========== Dirty Propagation ==========

#[test]
fn marking_twice_schedules_once() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node("Leaf");
    let root = settled_tree(&pipeline, &leaf);

    root.mark_dirty_node(PropertyChangeFlag::MEASURE);
    root.mark_dirty_node(PropertyChangeFlag::MEASURE);

    assert_eq!(pipeline.scheduler().dirty_layout_count(), 1);
    assert!(pipeline.scheduler().is_layout_dirty(root.id()));
    assert!(root.is_layout_dirty_marked());
}

#[test]
fn measure_boundary_absorbs_child_requests() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let boundary = node_with(
        "Boundary",
        ProbePattern {
            measure_boundary: true,
            ..ProbePattern::default()
        },
    );
    let leaf = node("Leaf");
    boundary.add_child(Rc::clone(&leaf), None);
    let root = settled_tree(&pipeline, &boundary);

    fixed_size(&leaf, 10.0, 10.0);

    assert!(pipeline.scheduler().is_layout_dirty(boundary.id()));
    assert!(!pipeline.scheduler().is_layout_dirty(root.id()));
    assert!(!pipeline.scheduler().is_layout_dirty(leaf.id()));
    assert!(leaf.is_layout_dirty_marked());
}

#[test]
fn child_requests_climb_to_the_nearest_measure_boundary() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let middle = node("Middle");
    let leaf = node("Leaf");
    middle.add_child(Rc::clone(&leaf), None);
    let root = settled_tree(&pipeline, &middle);

    fixed_size(&leaf, 10.0, 10.0);

    assert_eq!(pipeline.scheduler().dirty_layout_count(), 1);
    assert!(pipeline.scheduler().is_layout_dirty(root.id()));
    assert!(!pipeline.scheduler().is_layout_dirty(middle.id()));
    assert!(root.is_layout_dirty_marked());
    assert!(middle.is_layout_dirty_marked());
    assert!(leaf.is_layout_dirty_marked());
}

#[test]
fn a_forwarded_request_remeasures_the_whole_chain() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let middle = node("Middle");
    let leaf = node("Leaf");
    middle.add_child(Rc::clone(&leaf), None);
    let _root = settled_tree(&pipeline, &middle);
    fixed_size(&leaf, 10.0, 10.0);

    pipeline.flush_vsync();

    assert!(pipeline.scheduler().is_empty());
    assert!(!middle.is_layout_dirty_marked());
    assert!(!leaf.is_layout_dirty_marked());
    assert_eq!(leaf.frame_rect().size(), SizeF::new(10.0, 10.0));
}

#[test]
fn measure_self_does_not_disturb_the_parent() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node("Leaf");
    let root = settled_tree(&pipeline, &leaf);

    leaf.mark_dirty_node(PropertyChangeFlag::MEASURE_SELF);

    assert!(pipeline.scheduler().is_layout_dirty(leaf.id()));
    assert!(!pipeline.scheduler().is_layout_dirty(root.id()));
}

#[test]
fn orphan_layout_requests_schedule_the_node_itself() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let orphan = node("Orphan");

    orphan.mark_dirty_node(PropertyChangeFlag::MEASURE);

    assert!(pipeline.scheduler().is_layout_dirty(orphan.id()));
}

#[test]
fn render_changes_climb_past_non_render_boundaries() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node_with(
        "Leaf",
        ProbePattern {
            not_render_boundary: true,
            ..ProbePattern::default()
        },
    );
    let root = settled_tree(&pipeline, &leaf);

    leaf.mark_dirty_node(PropertyChangeFlag::RENDER);

    assert!(leaf.is_render_dirty_marked());
    assert!(pipeline.scheduler().is_render_dirty(root.id()));
    assert!(!pipeline.scheduler().is_render_dirty(leaf.id()));
    assert_eq!(pipeline.scheduler().dirty_layout_count(), 0);
}

#[test]
fn render_requests_wait_for_a_pending_layout() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node("Leaf");
    let root = settled_tree(&pipeline, &leaf);

    root.mark_dirty_node(PropertyChangeFlag::MEASURE);
    root.mark_dirty_node(PropertyChangeFlag::RENDER);

    assert_eq!(pipeline.scheduler().dirty_render_count(), 0);
    assert!(!root.is_render_dirty_marked());
}

#[test]
fn marks_without_a_pipeline_are_ignored() {
    let orphan = node("Detached");
    orphan.mark_dirty_node(PropertyChangeFlag::MEASURE);
    orphan.mark_dirty_node(PropertyChangeFlag::RENDER);
    assert!(!orphan.is_layout_dirty_marked());
    assert!(!orphan.is_render_dirty_marked());
}

#[test]
fn child_measure_requests_fold_into_the_parent_flag() {
    let parent = node("Parent");
    let child = node("Child");
    parent.add_child(Rc::clone(&child), None);
    parent.update_layout_property(|property| property.clean_dirty());
    parent
        .layout_property
        .borrow_mut()
        .update_property_change_flag(PropertyChangeFlag::BY_CHILD_REQUEST);

    parent.update_layout_property_flag();

    assert!(parent
        .layout_property()
        .property_change_flag()
        .contains(PropertyChangeFlag::MEASURE));
}

// ========== Layout Wrappers and Swap ==========

#[test]
fn gone_nodes_produce_childless_placeholders() {
    let parent = node("Parent");
    parent.add_child(node("Child"), None);
    parent.update_layout_property(|property| property.update_visibility(VisibleType::Gone));

    let wrapper = parent.create_layout_wrapper(true, true);

    assert!(wrapper.skip_measure());
    assert!(wrapper.skip_layout());
    assert!(!wrapper.layout_algorithm().has_algorithm());
    assert_eq!(wrapper.total_child_count(), 0);
    assert!(!parent.is_layout_dirty_marked());
}

#[test]
fn creating_a_wrapper_consumes_the_layout_mark() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node("Leaf");
    leaf.mark_dirty_node(PropertyChangeFlag::MEASURE);
    assert!(leaf.is_layout_dirty_marked());

    let wrapper = leaf.create_layout_wrapper(false, false);

    assert!(!leaf.is_layout_dirty_marked());
    assert!(!wrapper.skip_measure());
    assert!(leaf.create_layout_task(false).is_none());
}

#[test]
fn layout_only_changes_skip_measure() {
    let leaf = node("Leaf");
    leaf.update_layout_property(|property| property.clean_dirty());
    leaf.update_layout_property(|property| {
        property.update_property_change_flag(PropertyChangeFlag::LAYOUT)
    });

    let wrapper = leaf.create_layout_wrapper(false, false);

    assert!(wrapper.skip_measure());
    assert!(!wrapper.skip_layout());
    assert!(wrapper.layout_algorithm().has_algorithm());
}

#[test]
fn an_unchanged_pass_is_a_fixed_point() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let leaf = node("Leaf");
    fixed_size(&leaf, 30.0, 20.0);
    let _root = settled_tree(&pipeline, &leaf);
    let before = leaf.geometry_node();

    let mut wrapper = leaf.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert!(!leaf.is_layout_dirty_marked());
    assert_eq!(leaf.geometry_node(), before);
}

#[test]
fn swap_commits_the_whole_geometry() {
    let leaf = node("Leaf");
    let mut wrapper = leaf.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    {
        let geometry = wrapper.geometry_node_mut();
        geometry.set_frame_rect(RectF::new(5.0, 6.0, 70.0, 80.0));
        geometry.set_content_size(SizeF::new(60.0, 70.0));
        geometry.set_parent_global_offset(OffsetF::new(1.0, 2.0));
    }

    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert_eq!(&leaf.geometry_node(), wrapper.geometry_node());
}

#[test]
fn activation_notifies_the_pattern_and_the_parent() {
    let parent = node("Parent");
    let probe = Rc::new(Probe::default());
    let child = node_with(
        "Child",
        ProbePattern {
            probe: Rc::clone(&probe),
            ..ProbePattern::default()
        },
    );
    parent.add_child(Rc::clone(&child), None);
    parent.rebuild_render_context_tree();
    assert!(!parent.need_sync_render_tree());
    assert!(!child.is_active());

    let mut wrapper = child.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    child.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert!(child.is_active());
    assert_eq!(probe.active.get(), 1);
    assert_eq!(probe.inactive.get(), 0);
    assert!(parent.need_sync_render_tree());

    // Same state again: no further notification.
    parent.rebuild_render_context_tree();
    child.swap_dirty_layout_wrapper_on_main_thread(&wrapper);
    assert_eq!(probe.active.get(), 1);
    assert!(!parent.need_sync_render_tree());
}

#[test]
fn root_measure_nodes_do_not_resync_the_parent() {
    let parent = node("Parent");
    let child = node("Child");
    parent.add_child(Rc::clone(&child), None);
    parent.rebuild_render_context_tree();

    let mut wrapper = child.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    wrapper.set_root_measure_node();
    child.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert!(child.is_active());
    assert!(!parent.need_sync_render_tree());
}

#[test]
fn inactive_swaps_leave_geometry_alone() {
    let (leaf, context) = node_with_context(ProbePattern::default());
    let mut wrapper = leaf.create_layout_wrapper(false, false);
    wrapper
        .geometry_node_mut()
        .set_frame_rect(RectF::new(0.0, 0.0, 10.0, 10.0));

    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert_eq!(leaf.frame_rect(), RectF::default());
    assert_eq!(context.syncs.get(), 0);
}

#[test]
fn frame_changes_sync_geometry() {
    let (leaf, context) = node_with_context(ProbePattern::default());
    let mut wrapper = leaf.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    wrapper
        .geometry_node_mut()
        .set_frame_rect(RectF::new(0.0, 0.0, 40.0, 40.0));

    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert_eq!(context.syncs.get(), 1);
    assert_eq!(context.inner.frame(), RectF::new(0.0, 0.0, 40.0, 40.0));
}

#[test]
fn content_only_changes_sync_only_surface_nodes() {
    let (plain, plain_context) = node_with_context(ProbePattern::default());
    let (surface, surface_context) = node_with_context(ProbePattern {
        surface: Some("video"),
        ..ProbePattern::default()
    });
    assert_eq!(surface_context.inner.surface_name().as_deref(), Some("video"));

    for target in [&plain, &surface] {
        let mut wrapper = target.create_layout_wrapper(false, false);
        wrapper.set_active(true);
        wrapper
            .geometry_node_mut()
            .set_content_size(SizeF::new(12.0, 12.0));
        target.swap_dirty_layout_wrapper_on_main_thread(&wrapper);
    }

    assert_eq!(plain_context.syncs.get(), 0);
    assert_eq!(surface_context.syncs.get(), 1);
}

#[test]
fn area_changes_report_old_and_new_rects() {
    let leaf = node("Leaf");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    leaf.event_hub()
        .set_on_area_changed(move |old_rect, _, new_rect, new_origin| {
            sink.borrow_mut().push((old_rect, new_rect, new_origin));
        });

    let mut wrapper = leaf.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    {
        let geometry = wrapper.geometry_node_mut();
        geometry.set_frame_rect(RectF::new(1.0, 1.0, 5.0, 5.0));
        geometry.set_parent_global_offset(OffsetF::new(10.0, 0.0));
    }
    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);
    // Nothing moved the second time.
    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert_eq!(
        *seen.borrow(),
        vec![(
            RectF::default(),
            RectF::new(1.0, 1.0, 5.0, 5.0),
            OffsetF::new(10.0, 0.0)
        )]
    );
}

#[test]
fn either_swap_verdict_schedules_a_render() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let current = node_with(
        "Current",
        ProbePattern {
            verdict: true,
            ..ProbePattern::default()
        },
    );
    let legacy = node_with(
        "Legacy",
        ProbePattern {
            legacy_verdict: true,
            ..ProbePattern::default()
        },
    );
    let quiet = node("Quiet");

    for target in [&current, &legacy, &quiet] {
        let mut wrapper = target.create_layout_wrapper(false, false);
        wrapper.set_active(true);
        target.swap_dirty_layout_wrapper_on_main_thread(&wrapper);
    }

    assert!(pipeline.scheduler().is_render_dirty(current.id()));
    assert!(pipeline.scheduler().is_render_dirty(legacy.id()));
    assert!(!pipeline.scheduler().is_render_dirty(quiet.id()));
}

#[test]
fn border_width_fills_in_color_and_style() {
    let (leaf, context) = node_with_context(ProbePattern::default());
    leaf.update_layout_property(|property| {
        property.update_border_width(EdgesProperty::uniform(Dimension::px(2.0)))
    });

    let mut wrapper = leaf.create_layout_wrapper(true, false);
    wrapper.set_active(true);
    wrapper.measure(Some(LayoutConstraintF::root(
        100.0,
        100.0,
        ScaleProperty::from_density(1.0, 1.0),
    )));
    leaf.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert_eq!(context.inner.border_width(), Some(EdgesF::uniform(2.0)));
    assert_eq!(
        context.inner.border_color(),
        Some(BorderColorProperty::uniform(Color::BLACK))
    );
    assert_eq!(
        context.inner.border_style(),
        Some(BorderStyleProperty::uniform(BorderStyle::Solid))
    );
}

// ========== Render Tree ==========

#[test]
fn only_active_visible_children_reach_the_render_tree() {
    let (parent, context) = node_with_context(ProbePattern::default());
    let shown = node("Shown");
    let hidden = node("Hidden");
    let asleep = node("Asleep");
    for child in [&shown, &hidden, &asleep] {
        parent.add_child(Rc::clone(child), None);
    }
    for child in [&shown, &hidden] {
        let mut wrapper = child.create_layout_wrapper(false, false);
        wrapper.set_active(true);
        child.swap_dirty_layout_wrapper_on_main_thread(&wrapper);
    }
    hidden.update_layout_property(|property| property.update_visibility(VisibleType::Invisible));

    parent.rebuild_render_context_tree();

    assert_eq!(context.rebuilds.get(), 1);
    assert_eq!(context.inner.children(), vec![shown.id()]);
    parent.rebuild_render_context_tree();
    assert_eq!(context.rebuilds.get(), 1);
}

#[test]
fn atomic_nodes_hide_their_children() {
    let parent = node_with(
        "Atomic",
        ProbePattern {
            atomic: true,
            ..ProbePattern::default()
        },
    );
    let child = node("Child");
    parent.add_child(Rc::clone(&child), None);
    let mut wrapper = child.create_layout_wrapper(false, false);
    wrapper.set_active(true);
    child.swap_dirty_layout_wrapper_on_main_thread(&wrapper);

    assert!(parent.generate_one_depth_visible_frame().is_empty());
}

// ========== Tree and Registry ==========

#[test]
fn add_child_moves_between_parents_and_updates_depth() {
    let first = node("First");
    let second = node("Second");
    let child = node("Child");
    let grandchild = node("Grandchild");
    child.add_child(Rc::clone(&grandchild), None);
    first.add_child(Rc::clone(&child), None);
    assert_eq!(grandchild.depth(), 3);

    second.add_child(node("Sibling"), None);
    second.add_child(Rc::clone(&child), Some(0));

    assert_eq!(first.child_count(), 0);
    assert_eq!(second.children()[0].id(), child.id());
    assert!(Rc::ptr_eq(&child.parent().expect("parent"), &second));

    second.add_child(Rc::clone(&child), None);
    assert_eq!(second.child_count(), 2);
}

#[test]
fn main_tree_membership_fires_appear_and_disappear() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let root = root();
    let child = node("Child");
    let events = Rc::new(RefCell::new(Vec::new()));
    let appear = Rc::clone(&events);
    let disappear = Rc::clone(&events);
    child.event_hub().set_on_appear(move || appear.borrow_mut().push("appear"));
    child
        .event_hub()
        .set_on_disappear(move || disappear.borrow_mut().push("disappear"));

    root.add_child(Rc::clone(&child), None);
    assert!(events.borrow().is_empty());
    pipeline.set_root_node(Rc::clone(&root));
    assert!(child.on_main_tree());
    assert!(root.remove_child(&child));

    assert!(!child.on_main_tree());
    assert_eq!(*events.borrow(), vec!["appear", "disappear"]);
}

#[test]
fn frame_requests_off_the_main_tree_wait_for_attach() {
    let pipeline = inline_pipeline();
    let _scope = pipeline.enter();
    let root = root();
    let child = node("Child");

    child.render_context().request_next_frame();
    assert!(child.has_pending_request());
    assert!(!pipeline.has_frame_request());

    root.add_child(Rc::clone(&child), None);
    pipeline.set_root_node(Rc::clone(&root));
    pipeline.take_frame_request();
    // Attaching replayed the request; a fresh one goes straight through.
    assert!(!child.has_pending_request());
    child.render_context().request_next_frame();
    assert!(pipeline.has_frame_request());
}

#[test]
fn tag_mismatch_drops_the_old_node() {
    let parent = node("Parent");
    let child = node("Text");
    parent.add_child(Rc::clone(&child), None);

    assert!(FrameNode::get_frame_node("Text", child.id()).is_some());
    assert!(FrameNode::get_frame_node("Image", child.id()).is_none());

    assert_eq!(parent.child_count(), 0);
    assert!(!ElementRegister::contains(child.id()));
}

#[test]
fn get_or_create_reuses_live_nodes() {
    let id = ElementRegister::make_unique_id();
    let created = FrameNode::get_or_create_frame_node("Column", id, None);
    let again = FrameNode::get_or_create_frame_node(
        "Column",
        id,
        Some(Box::new(|| Box::new(ProbePattern::default()) as Box<dyn Pattern>)),
    );

    assert!(Rc::ptr_eq(&created, &again));
    assert!(created.pattern::<DefaultPattern>().is_some());
}

#[test]
fn dropping_a_node_detaches_its_pattern() {
    let probe = Rc::new(Probe::default());
    let leaf = node_with(
        "Leaf",
        ProbePattern {
            probe: Rc::clone(&probe),
            ..ProbePattern::default()
        },
    );
    let id = leaf.id();
    drop(leaf);

    assert_eq!(probe.detached.get(), 1);
    assert!(FrameNode::get_frame_node("Leaf", id).is_none());
}

#[test]
fn typed_access_reports_mismatches() {
    let leaf = node("Leaf");
    assert!(leaf.try_pattern::<ProbePattern>().is_ok());
    assert_eq!(
        leaf.try_pattern::<DefaultPattern>().err(),
        Some(NodeError::TypeMismatch {
            id: leaf.id(),
            expected: std::any::type_name::<DefaultPattern>(),
        })
    );
    assert!(leaf
        .update_layout_property_extension::<String>(PropertyChangeFlag::MEASURE, |_| {})
        .is_err());
}

#[test]
fn dump_info_reports_depth_and_constraint() {
    let leaf = node("Leaf");
    let info = leaf.dump_info();
    assert_eq!(info[0], "Depth: 1");
    assert!(info[1].starts_with("FrameRect: "));
    assert_eq!(info[2], "LayoutConstraint: NA");
}

// ========== Hit Testing ==========

fn touch_probe(node: &FrameNode, name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) {
    let log = Rc::clone(log);
    node.event_hub()
        .get_or_create_gesture_event_hub()
        .add_touch_event(move |_| log.borrow_mut().push(name));
}

fn dispatch(result: &TouchTestResult, point: PointF) {
    for target in result {
        target.dispatch_event(&TouchEvent::down(point));
    }
}

#[test]
fn topmost_hit_child_blocks_lower_siblings() {
    let parent = node("Parent");
    place(&parent, RectF::new(0.0, 0.0, 100.0, 100.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut layers = Vec::new();
    for name in ["a", "b", "c"] {
        let child = node(name);
        place(&child, RectF::new(0.0, 0.0, 100.0, 100.0));
        touch_probe(&child, name, &log);
        parent.add_child(Rc::clone(&child), None);
        layers.push(child);
    }
    let point = PointF::new(50.0, 50.0);

    let mut result = TouchTestResult::new();
    let outcome = parent.touch_test(point, point, &TouchRestrict::default(), &mut result);
    dispatch(&result, point);
    assert_eq!(outcome, HitTestResult::Bubbling);
    assert_eq!(*log.borrow(), vec!["c"]);

    // Once the top layer moves away the next one down is hit.
    place(&layers[2], RectF::new(200.0, 200.0, 10.0, 10.0));
    log.borrow_mut().clear();
    let mut result = TouchTestResult::new();
    parent.touch_test(point, point, &TouchRestrict::default(), &mut result);
    dispatch(&result, point);
    assert_eq!(*log.borrow(), vec!["b"]);
}

#[test]
fn transparent_children_let_siblings_below_be_hit() {
    let parent = node("Parent");
    place(&parent, RectF::new(0.0, 0.0, 100.0, 100.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    let below = node("Below");
    let above = node("Above");
    for (child, name) in [(&below, "below"), (&above, "above")] {
        place(child, RectF::new(0.0, 0.0, 100.0, 100.0));
        touch_probe(child, name, &log);
        parent.add_child(Rc::clone(child), None);
    }
    above
        .event_hub()
        .get_or_create_gesture_event_hub()
        .set_hit_test_mode(HitTestMode::Transparent);
    let point = PointF::new(10.0, 10.0);

    let mut result = TouchTestResult::new();
    parent.touch_test(point, point, &TouchRestrict::default(), &mut result);
    dispatch(&result, point);

    assert_eq!(*log.borrow(), vec!["above", "below"]);
}

#[test]
fn blocking_child_stops_bubbling_past_the_parent() {
    let grandparent = node("Grandparent");
    let parent = node("Parent");
    let child = node("Child");
    for target in [&grandparent, &parent, &child] {
        place(target, RectF::new(0.0, 0.0, 50.0, 50.0));
    }
    grandparent.add_child(Rc::clone(&parent), None);
    parent.add_child(Rc::clone(&child), None);
    let log = Rc::new(RefCell::new(Vec::new()));
    touch_probe(&child, "child", &log);
    touch_probe(&parent, "parent", &log);
    child
        .event_hub()
        .get_or_create_gesture_event_hub()
        .set_hit_test_mode(HitTestMode::Block);
    let point = PointF::new(5.0, 5.0);

    let mut result = TouchTestResult::new();
    let outcome = grandparent.touch_test(point, point, &TouchRestrict::default(), &mut result);
    dispatch(&result, point);

    assert_eq!(outcome, HitTestResult::StopBubbling);
    assert_eq!(*log.borrow(), vec!["child"]);
}

#[test]
fn points_outside_the_frame_are_out_of_region() {
    let leaf = node("Leaf");
    place(&leaf, RectF::new(10.0, 10.0, 5.0, 5.0));
    let mut result = TouchTestResult::new();
    let point = PointF::new(0.0, 0.0);
    assert_eq!(
        leaf.touch_test(point, point, &TouchRestrict::default(), &mut result),
        HitTestResult::OutOfRegion
    );
    assert!(result.is_empty());
}

#[test]
fn targets_are_rebased_into_node_space() {
    let parent = node("Parent");
    let child = node("Child");
    place(&parent, RectF::new(10.0, 10.0, 100.0, 100.0));
    place(&child, RectF::new(20.0, 20.0, 10.0, 10.0));
    parent.add_child(Rc::clone(&child), None);
    let seen = Rc::new(Cell::new(PointF::default()));
    let sink = Rc::clone(&seen);
    let target = child
        .event_hub()
        .get_or_create_gesture_event_hub()
        .add_touch_event(move |event| sink.set(event.local_location));
    let point = PointF::new(35.0, 35.0);

    let mut result = TouchTestResult::new();
    parent.touch_test(point, point, &TouchRestrict::default(), &mut result);
    dispatch(&result, point);

    assert_eq!(target.node_id(), child.id());
    assert_ne!(target.node_id(), INVALID_NODE_ID);
    assert_eq!(seen.get(), PointF::new(5.0, 5.0));
}

#[test]
fn disabled_hubs_are_skipped() {
    let leaf = node("Leaf");
    place(&leaf, RectF::new(0.0, 0.0, 10.0, 10.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    touch_probe(&leaf, "leaf", &log);
    leaf.event_hub().set_enabled(false);
    let point = PointF::new(1.0, 1.0);

    let mut result = TouchTestResult::new();
    let outcome = leaf.touch_test(point, point, &TouchRestrict::default(), &mut result);

    assert_eq!(outcome, HitTestResult::Bubbling);
    assert!(result.is_empty());
}
