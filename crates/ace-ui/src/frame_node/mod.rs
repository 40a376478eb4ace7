//! The live node of the UI tree.
//!
//! A [`FrameNode`] owns its committed geometry, its property bags and the
//! pattern that supplies widget behaviour. It turns property changes into
//! dirty marks, dirty marks into layout and render tasks, and commits the
//! results of those tasks back into the tree.


use std::any::Any;
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use ace_core::{ElementRegister, NodeError, NodeId, Task, TaskType};
use ace_ui_graphics::{Color, OffsetF, RectF};
use ace_ui_layout::{
    BorderColorProperty, BorderStyle, BorderStyleProperty, LayoutConstraintF, MeasureProperty,
    PropertyChangeFlag, VisibleType,
};
use smallvec::SmallVec;

use crate::event::{EventHub, HitTestMode};
use crate::geometry_node::GeometryNode;
use crate::layout::{LayoutAlgorithmWrapper, LayoutWrapper};
use crate::pattern::{DefaultPattern, DirtySwapConfig, Pattern, PatternHost};
use crate::pipeline::{PipelineContext, UiTask};
use crate::property::{LayoutProperty, PaintProperty};
use crate::render::{PaintWrapper, RenderContext, RetainedRenderContext};

/// Children of a node in paint order (last child paints on top).
pub type FrameChildren = SmallVec<[Rc<FrameNode>; 4]>;

/// Creates the pattern for a node that does not exist yet.
pub type PatternCreator = Box<dyn FnOnce() -> Box<dyn Pattern>>;

pub struct FrameNode {
    tag: String,
    node_id: NodeId,
    self_weak: Weak<FrameNode>,
    is_root: bool,
    pattern: Box<dyn Pattern>,
    layout_property: RefCell<LayoutProperty>,
    paint_property: RefCell<PaintProperty>,
    event_hub: EventHub,
    render_context: Rc<dyn RenderContext>,
    geometry_node: RefCell<GeometryNode>,
    children: RefCell<FrameChildren>,
    parent: RefCell<Weak<FrameNode>>,
    depth: Cell<i32>,
    is_measure_boundary: Cell<bool>,
    is_active: Cell<bool>,
    is_layout_dirty_marked: Cell<bool>,
    is_render_dirty_marked: Cell<bool>,
    need_sync_render_tree: Cell<bool>,
    has_pending_request: Cell<bool>,
    on_main_tree: Cell<bool>,
}

impl FrameNode {
    /// Creates and registers a node. The render context comes from the
    /// current pipeline's factory, or is a [`RetainedRenderContext`].
    pub fn create_frame_node(
        tag: impl Into<String>,
        node_id: NodeId,
        pattern: Box<dyn Pattern>,
        is_root: bool,
    ) -> Rc<FrameNode> {
        let render_context = PipelineContext::current()
            .map(|pipeline| pipeline.create_render_context())
            .unwrap_or_else(|| Rc::new(RetainedRenderContext::new()));
        Self::create_frame_node_with_render_context(tag, node_id, pattern, is_root, render_context)
    }

    pub fn create_frame_node_with_render_context(
        tag: impl Into<String>,
        node_id: NodeId,
        pattern: Box<dyn Pattern>,
        is_root: bool,
        render_context: Rc<dyn RenderContext>,
    ) -> Rc<FrameNode> {
        let surface_name = pattern.surface_node_name();
        render_context.init_context(is_root, surface_name.as_deref());

        let mut layout_property = pattern.create_layout_property();
        // A fresh node has never been measured.
        layout_property.update_property_change_flag(PropertyChangeFlag::MEASURE);
        let paint_property = pattern.create_paint_property();
        let event_hub = pattern.create_event_hub();

        let node = Rc::new_cyclic(|self_weak| FrameNode {
            tag: tag.into(),
            node_id,
            self_weak: self_weak.clone(),
            is_root,
            pattern,
            layout_property: RefCell::new(layout_property),
            paint_property: RefCell::new(paint_property),
            event_hub,
            render_context,
            geometry_node: RefCell::new(GeometryNode::new()),
            children: RefCell::new(FrameChildren::new()),
            parent: RefCell::new(Weak::new()),
            depth: Cell::new(1),
            is_measure_boundary: Cell::new(false),
            is_active: Cell::new(false),
            is_layout_dirty_marked: Cell::new(false),
            is_render_dirty_marked: Cell::new(false),
            need_sync_render_tree: Cell::new(false),
            has_pending_request: Cell::new(false),
            on_main_tree: Cell::new(false),
        });
        node.initialize_pattern_and_context();

        let item: Rc<dyn Any> = node.clone();
        ElementRegister::add_item(node_id, &item);
        log::trace!("created {}#{}", node.tag, node_id);
        node
    }

    /// Root of a tree: depth 1, and measured on its own.
    pub fn create_frame_node_with_tree(
        tag: impl Into<String>,
        node_id: NodeId,
        pattern: Box<dyn Pattern>,
    ) -> Rc<FrameNode> {
        let node = Self::create_frame_node(tag, node_id, pattern, true);
        node.set_depth(1);
        node.set_measure_boundary(true);
        node
    }

    /// Looks up a live node. A node registered under `node_id` with a
    /// different tag is unregistered and detached from its parent.
    pub fn get_frame_node(tag: &str, node_id: NodeId) -> Option<Rc<FrameNode>> {
        let node = ElementRegister::get_specific_item_by_id::<FrameNode>(node_id)?;
        if node.tag != tag {
            log::warn!(
                "node {node_id} changed tag from {} to {tag}; dropping the old node",
                node.tag
            );
            ElementRegister::remove_item_silently(node_id);
            if let Some(parent) = node.parent() {
                parent.remove_child(&node);
            }
            return None;
        }
        Some(node)
    }

    pub fn get_or_create_frame_node(
        tag: &str,
        node_id: NodeId,
        pattern_creator: Option<PatternCreator>,
    ) -> Rc<FrameNode> {
        if let Some(node) = Self::get_frame_node(tag, node_id) {
            return node;
        }
        let pattern = match pattern_creator {
            Some(create) => create(),
            None => Box::new(DefaultPattern),
        };
        Self::create_frame_node(tag, node_id, pattern, false)
    }

    fn initialize_pattern_and_context(&self) {
        let host = PatternHost::new(self.node_id, self.self_weak.clone());
        self.event_hub.attach_host(host.clone());
        self.pattern.on_attach_to_frame_node(host);

        let weak = self.self_weak.clone();
        self.render_context.set_request_frame(Rc::new(move || {
            let Some(node) = weak.upgrade() else {
                return;
            };
            if node.on_main_tree.get() {
                PipelineContext::with_current(|pipeline| pipeline.request_frame());
                return;
            }
            node.has_pending_request.set(true);
        }));
    }

    pub fn id(&self) -> NodeId {
        self.node_id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn depth(&self) -> i32 {
        self.depth.get()
    }

    fn set_depth(&self, depth: i32) {
        self.depth.set(depth);
        for child in self.children.borrow().iter() {
            child.set_depth(depth + 1);
        }
    }

    // ========== Tree ==========

    pub fn children(&self) -> FrameChildren {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn parent(&self) -> Option<Rc<FrameNode>> {
        self.parent.borrow().upgrade()
    }

    /// Nearest ancestor that is a frame node.
    pub fn ancestor_node_of_frame(&self) -> Option<Rc<FrameNode>> {
        self.parent()
    }

    /// Inserts `child` at `slot` (appends when `None` or out of range). A
    /// child that already has another parent is moved.
    pub fn add_child(&self, child: Rc<FrameNode>, slot: Option<usize>) {
        if self
            .children
            .borrow()
            .iter()
            .any(|existing| Rc::ptr_eq(existing, &child))
        {
            return;
        }
        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(&child);
        }
        {
            let mut children = self.children.borrow_mut();
            let index = slot.map_or(children.len(), |slot| slot.min(children.len()));
            children.insert(index, Rc::clone(&child));
        }
        *child.parent.borrow_mut() = self.self_weak.clone();
        child.set_depth(self.depth() + 1);
        if self.on_main_tree.get() {
            child.attach_to_main_tree();
        }
        self.mark_need_sync_render_tree();
        self.mark_dirty_node(PropertyChangeFlag::MEASURE);
    }

    pub fn remove_child(&self, child: &Rc<FrameNode>) -> bool {
        let removed = {
            let mut children = self.children.borrow_mut();
            match children.iter().position(|existing| Rc::ptr_eq(existing, child)) {
                Some(index) => Some(children.remove(index)),
                None => None,
            }
        };
        let Some(removed) = removed else {
            return false;
        };
        *removed.parent.borrow_mut() = Weak::new();
        if removed.on_main_tree.get() {
            removed.detach_from_main_tree();
        }
        self.mark_need_sync_render_tree();
        self.mark_dirty_node(PropertyChangeFlag::MEASURE);
        true
    }

    pub fn mount_to_parent(self: &Rc<Self>, parent: &Rc<FrameNode>, slot: Option<usize>) {
        parent.add_child(Rc::clone(self), slot);
        self.on_mount_to_parent_done();
    }

    pub fn on_mount_to_parent_done(&self) {
        self.pattern.on_mount_to_parent_done();
    }

    pub fn on_main_tree(&self) -> bool {
        self.on_main_tree.get()
    }

    pub fn attach_to_main_tree(&self) {
        if self.on_main_tree.replace(true) {
            return;
        }
        self.event_hub.fire_on_appear();
        if self.has_pending_request.replace(false) {
            PipelineContext::with_current(|pipeline| pipeline.request_frame());
        }
        for child in self.children() {
            child.attach_to_main_tree();
        }
    }

    pub fn detach_from_main_tree(&self) {
        if !self.on_main_tree.replace(false) {
            return;
        }
        self.event_hub.fire_on_disappear();
        for child in self.children() {
            child.detach_from_main_tree();
        }
    }

    // ========== Pattern, Properties, Hubs ==========

    pub fn pattern<T: Pattern>(&self) -> Option<&T> {
        self.pattern.as_any().downcast_ref::<T>()
    }

    pub fn try_pattern<T: Pattern>(&self) -> Result<&T, NodeError> {
        self.pattern::<T>().ok_or(NodeError::TypeMismatch {
            id: self.node_id,
            expected: std::any::type_name::<T>(),
        })
    }

    pub fn pattern_dyn(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    pub fn layout_property(&self) -> Ref<'_, LayoutProperty> {
        self.layout_property.borrow()
    }

    pub fn layout_property_extension<T: Any>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.layout_property.borrow(), |property| property.extension::<T>()).ok()
    }

    /// Mutates the layout property, then marks the node dirty with
    /// whatever flags the update recorded.
    pub fn update_layout_property(&self, update: impl FnOnce(&mut LayoutProperty)) {
        update(&mut self.layout_property.borrow_mut());
        self.flush_update_and_mark_dirty();
    }

    /// Like [`FrameNode::update_layout_property`] for the widget extension;
    /// the caller supplies the flag the change needs.
    pub fn update_layout_property_extension<T: Any>(
        &self,
        flag: PropertyChangeFlag,
        update: impl FnOnce(&mut T),
    ) -> Result<(), NodeError> {
        {
            let mut property = self.layout_property.borrow_mut();
            let extension = property
                .extension_mut::<T>()
                .ok_or(NodeError::TypeMismatch {
                    id: self.node_id,
                    expected: std::any::type_name::<T>(),
                })?;
            update(extension);
            property.update_property_change_flag(flag);
        }
        self.flush_update_and_mark_dirty();
        Ok(())
    }

    pub fn paint_property(&self) -> Ref<'_, PaintProperty> {
        self.paint_property.borrow()
    }

    pub fn paint_property_extension<T: Any>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.paint_property.borrow(), |property| property.extension::<T>()).ok()
    }

    pub fn update_paint_property(&self, update: impl FnOnce(&mut PaintProperty)) {
        update(&mut self.paint_property.borrow_mut());
        self.flush_update_and_mark_dirty();
    }

    pub fn update_paint_property_extension<T: Any>(
        &self,
        update: impl FnOnce(&mut T),
    ) -> Result<(), NodeError> {
        {
            let mut property = self.paint_property.borrow_mut();
            let extension = property
                .extension_mut::<T>()
                .ok_or(NodeError::TypeMismatch {
                    id: self.node_id,
                    expected: std::any::type_name::<T>(),
                })?;
            update(extension);
            property.update_property_change_flag(PropertyChangeFlag::RENDER);
        }
        self.flush_update_and_mark_dirty();
        Ok(())
    }

    pub fn event_hub(&self) -> &EventHub {
        &self.event_hub
    }

    pub fn event_hub_extension<T: Any>(&self) -> Option<&T> {
        self.event_hub.extension::<T>()
    }

    pub fn render_context(&self) -> &Rc<dyn RenderContext> {
        &self.render_context
    }

    /// Copy of the committed geometry.
    pub fn geometry_node(&self) -> GeometryNode {
        self.geometry_node.borrow().clone()
    }

    pub fn set_geometry_node(&self, geometry: GeometryNode) {
        *self.geometry_node.borrow_mut() = geometry;
    }

    pub fn frame_rect(&self) -> RectF {
        self.geometry_node.borrow().frame_rect()
    }

    pub fn update_layout_constraint(&self, calc_layout_constraint: MeasureProperty) {
        self.layout_property
            .borrow_mut()
            .update_calc_layout_property(calc_layout_constraint);
    }

    pub fn hit_test_mode(&self) -> HitTestMode {
        self.event_hub
            .gesture_event_hub()
            .map(|hub| hub.hit_test_mode())
            .unwrap_or_default()
    }

    pub fn mark_modify_done(&self) {
        self.pattern.on_modify_done();
    }

    /// Posts `task` through the current pipeline; dropped without one.
    pub fn post_task(&self, task: Task, task_type: TaskType) {
        match PipelineContext::current() {
            Some(pipeline) => {
                pipeline.post_task(task, task_type);
            }
            None => log::debug!("{}#{}: no pipeline, task dropped", self.tag, self.node_id),
        }
    }

    // ========== State ==========

    pub fn is_measure_boundary(&self) -> bool {
        self.is_measure_boundary.get() || self.pattern.is_measure_boundary()
    }

    pub fn set_measure_boundary(&self, boundary: bool) {
        self.is_measure_boundary.set(boundary);
    }

    pub fn is_render_boundary(&self) -> bool {
        self.pattern.is_render_boundary()
    }

    pub fn is_atomic_node(&self) -> bool {
        self.pattern.is_atomic_node()
    }

    pub fn is_visible(&self) -> bool {
        self.layout_property.borrow().visibility() == VisibleType::Visible
    }

    pub fn is_active(&self) -> bool {
        self.is_active.get()
    }

    pub fn is_layout_dirty_marked(&self) -> bool {
        self.is_layout_dirty_marked.get()
    }

    pub fn is_render_dirty_marked(&self) -> bool {
        self.is_render_dirty_marked.get()
    }

    pub fn need_sync_render_tree(&self) -> bool {
        self.need_sync_render_tree.get()
    }

    pub fn has_pending_request(&self) -> bool {
        self.has_pending_request.get()
    }

    // ========== Dirty Propagation ==========

    pub fn flush_update_and_mark_dirty(&self) {
        self.mark_dirty_node(PropertyChangeFlag::NORMAL);
    }

    pub fn mark_dirty_node(&self, extra_flag: PropertyChangeFlag) {
        self.mark_dirty_node_with(self.is_measure_boundary(), self.is_render_boundary(), extra_flag);
    }

    /// Merges `extra_flag` into both property bags and schedules whichever
    /// task the accumulated flags call for.
    ///
    /// A layout request coalesces on the layout dirty mark and is forwarded
    /// to the parent while this node is not a measure boundary and the
    /// change affects the parent's size. Forwarded requests keep climbing
    /// until a measure boundary or a parentless node schedules itself; the
    /// task then folds MEASURE back down the chain. A render-only request is dropped
    /// while a layout task is pending, since the swap re-marks render.
    pub fn mark_dirty_node_with(
        &self,
        is_measure_boundary: bool,
        is_render_boundary: bool,
        extra_flag: PropertyChangeFlag,
    ) {
        let layout_flag = {
            let mut property = self.layout_property.borrow_mut();
            property.update_property_change_flag(extra_flag);
            property.property_change_flag()
        };
        let paint_flag = {
            let mut property = self.paint_property.borrow_mut();
            property.update_property_change_flag(extra_flag);
            property.property_change_flag()
        };
        if (layout_flag | paint_flag).is_no_changed() {
            return;
        }
        let Some(pipeline) = PipelineContext::current() else {
            return;
        };
        let Some(this) = self.self_weak.upgrade() else {
            return;
        };

        if layout_flag.needs_request_measure_and_layout() {
            if self.is_layout_dirty_marked.get() {
                return;
            }
            self.is_layout_dirty_marked.set(true);
            let forward = layout_flag.needs_request_parent_measure()
                || layout_flag.is_update_by_child_request();
            if !is_measure_boundary && forward {
                if let Some(parent) = self.ancestor_node_of_frame() {
                    log::trace!("{}#{}: measure forwarded to parent", self.tag, self.node_id);
                    parent.mark_dirty_node(PropertyChangeFlag::BY_CHILD_REQUEST);
                    return;
                }
            }
            pipeline.add_dirty_layout_node(this);
            return;
        }
        self.layout_property.borrow_mut().clean_dirty();

        if self.is_render_dirty_marked.get() || self.is_layout_dirty_marked.get() {
            return;
        }
        self.is_render_dirty_marked.set(true);
        if is_render_boundary {
            pipeline.add_dirty_render_node(this);
            return;
        }
        if let Some(parent) = self.ancestor_node_of_frame() {
            parent.mark_dirty_node(PropertyChangeFlag::RENDER_BY_CHILD_REQUEST);
        }
    }

    /// Folds the flags of descendants into a node that was dirtied by a
    /// child request, so a child's measure forces this node to measure.
    pub fn update_layout_property_flag(&self) {
        if !self
            .layout_property
            .borrow()
            .property_change_flag()
            .is_update_by_child_request()
        {
            return;
        }
        let mut flag = PropertyChangeFlag::NORMAL;
        for child in self.children() {
            child.update_layout_property_flag();
            child.adjust_parent_layout_flag(&mut flag);
        }
        if flag.contains(PropertyChangeFlag::MEASURE) {
            self.layout_property
                .borrow_mut()
                .update_property_change_flag(PropertyChangeFlag::MEASURE);
        }
    }

    fn adjust_parent_layout_flag(&self, flag: &mut PropertyChangeFlag) {
        *flag |= self.layout_property.borrow().property_change_flag();
    }

    // ========== Layout ==========

    fn fallback_constraint() -> LayoutConstraintF {
        PipelineContext::current()
            .map(|pipeline| pipeline.root_layout_constraint())
            .unwrap_or_default()
    }

    /// Constraint this node was last measured under. Nodes without a frame
    /// parent always use the current root constraint, so a resized window
    /// reaches the root.
    pub fn layout_constraint(&self) -> LayoutConstraintF {
        if self.ancestor_node_of_frame().is_none() {
            return Self::fallback_constraint();
        }
        self.geometry_node
            .borrow()
            .parent_layout_constraint()
            .unwrap_or_else(Self::fallback_constraint)
    }

    /// Global origin of the parent's frame.
    pub fn parent_global_offset(&self) -> OffsetF {
        self.ancestor_node_of_frame()
            .map(|parent| parent.geometry_node.borrow().global_offset())
            .unwrap_or_default()
    }

    /// Builds the wrapper tree for one layout pass.
    ///
    /// A GONE node yields an inactive placeholder with no children. Other
    /// nodes get an algorithm that measures (when their flag or the parent
    /// asks), only lays out, or skips both, and children are wrapped
    /// accordingly.
    pub fn create_layout_wrapper(&self, force_measure: bool, force_layout: bool) -> LayoutWrapper {
        let fallback = Self::fallback_constraint();
        if self.layout_property.borrow().visibility() == VisibleType::Gone {
            self.is_layout_dirty_marked.set(false);
            let mut property = LayoutProperty::new();
            property.update_visibility(VisibleType::Gone);
            property.clean_dirty();
            let mut wrapper =
                LayoutWrapper::new(self.node_id, self.tag.clone(), GeometryNode::new(), property, fallback);
            wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::placeholder());
            return wrapper;
        }

        self.pattern.before_create_layout_wrapper();
        self.is_layout_dirty_marked.set(false);
        let flag = self.layout_property.borrow().property_change_flag();
        let mut wrapper = LayoutWrapper::new(
            self.node_id,
            self.tag.clone(),
            self.geometry_node.borrow().clone(),
            self.layout_property.borrow().clone(),
            fallback,
        );
        log::trace!(
            "{}#{}: layout wrapper for {flag:?}, force measure {force_measure}, force layout {force_layout}",
            self.tag,
            self.node_id
        );

        if flag.needs_measure() || force_measure {
            wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::new(
                self.pattern.create_layout_algorithm(),
            ));
            let force_child_measure = flag.has_measure_flag() || force_measure;
            self.update_children_layout_wrapper(&mut wrapper, force_child_measure, false);
        } else if flag.needs_layout() || force_layout {
            wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::with_skip(
                Some(self.pattern.create_layout_algorithm()),
                true,
                false,
            ));
            self.update_children_layout_wrapper(&mut wrapper, false, false);
        } else {
            wrapper.set_layout_algorithm(LayoutAlgorithmWrapper::placeholder());
        }
        wrapper
    }

    fn update_children_layout_wrapper(
        &self,
        wrapper: &mut LayoutWrapper,
        force_measure: bool,
        force_layout: bool,
    ) {
        for child in self.children() {
            wrapper.append_child(child.create_layout_wrapper(force_measure, force_layout));
        }
    }

    /// Layout task for a dirty node, or `None` when the node is clean.
    ///
    /// The constraint and parent offset are read now; the wrapper tree is
    /// detached, so the task may run on a worker. The result is mounted on
    /// the UI thread: directly when the task runs there, otherwise through
    /// the executor's UI queue.
    pub fn create_layout_task(&self, force_use_main_thread: bool) -> Option<UiTask> {
        if !self.is_layout_dirty_marked.get() {
            return None;
        }
        self.update_layout_property_flag();
        let mut wrapper = self.create_layout_wrapper(false, false);
        let layout_constraint = self.layout_constraint();
        let offset = self.parent_global_offset();
        let run_on_main = force_use_main_thread || wrapper.check_should_run_on_main();
        let threads = wrapper.can_run_on_which_thread();
        let executor = PipelineContext::current().map(|pipeline| pipeline.task_executor());
        log::debug!(
            "{}#{}: layout task on {}",
            self.tag,
            self.node_id,
            if run_on_main { "main" } else { "background" }
        );

        let task = move || {
            wrapper.set_active(true);
            wrapper.set_root_measure_node();
            wrapper.measure(Some(layout_constraint));
            wrapper.layout(offset);
            if run_on_main {
                wrapper.mount_to_host_on_main_thread();
                return;
            }
            let Some(executor) = executor else {
                log::debug!("no executor to mount {}#{}", wrapper.host_tag(), wrapper.host_id());
                return;
            };
            let posted = executor.post_task(
                Box::new(move || wrapper.mount_to_host_on_main_thread()),
                TaskType::Ui,
            );
            if !posted {
                log::warn!("layout result dropped: UI queue rejected the mount task");
            }
        };
        if run_on_main {
            Some(UiTask::main(task))
        } else {
            Some(UiTask::background(task, threads))
        }
    }

    /// Snapshot for one paint pass. Consumes the render dirty mark.
    pub fn create_paint_wrapper(&self) -> PaintWrapper {
        self.pattern.before_create_paint_wrapper();
        self.is_render_dirty_marked.set(false);
        let mut wrapper = PaintWrapper::new(
            Rc::clone(&self.render_context),
            self.geometry_node.borrow().clone(),
            self.paint_property.borrow().clone(),
        );
        if let Some(method) = self.pattern.create_node_paint_method() {
            wrapper.set_node_paint_method(method);
        }
        wrapper
    }

    /// Render task for a render-dirty node. Render contexts are bound to the
    /// UI thread, so the task always runs there.
    pub fn create_render_task(&self, _force_use_main_thread: bool) -> Option<UiTask> {
        if !self.is_render_dirty_marked.get() {
            return None;
        }
        let wrapper = self.create_paint_wrapper();
        let node = self.self_weak.clone();
        Some(UiTask::main(move || {
            wrapper.flush_render();
            if let Some(node) = node.upgrade() {
                node.paint_property.borrow_mut().clean_dirty();
            }
        }))
    }

    /// Commits a finished layout pass into this node.
    pub fn swap_dirty_layout_wrapper_on_main_thread(&self, dirty: &LayoutWrapper) {
        log::debug!("{}#{}: swap layout result", self.tag, self.node_id);

        if self.is_active.get() != dirty.is_active() {
            self.is_active.set(dirty.is_active());
            if dirty.is_active() {
                self.pattern.on_active();
            } else {
                self.pattern.on_in_active();
            }
            if !dirty.is_root_measure_node() {
                if let Some(parent) = self.ancestor_node_of_frame() {
                    parent.mark_need_sync_render_tree();
                }
            }
        }
        if !self.is_active.get() {
            return;
        }

        let new_geometry = dirty.geometry_node();
        let (old_rect, old_parent_offset, config) = {
            let old = self.geometry_node.borrow();
            let config = DirtySwapConfig {
                frame_size_change: old.frame_size() != new_geometry.frame_size(),
                frame_offset_change: old.frame_offset() != new_geometry.frame_offset(),
                content_size_change: old.content_size() != new_geometry.content_size(),
                content_offset_change: old.content_offset() != new_geometry.content_offset(),
                skip_measure: dirty.skip_measure(),
                skip_layout: dirty.skip_layout(),
            };
            (old.frame_rect(), old.parent_global_offset(), config)
        };

        if config.frame_size_change
            || config.frame_offset_change
            || (config.content_size_change && self.pattern.surface_node_name().is_some())
        {
            self.render_context.sync_geometry_properties(new_geometry);
        }

        let new_parent_offset = new_geometry.parent_global_offset();
        if self.event_hub.has_on_area_changed()
            && (config.frame_size_change
                || config.frame_offset_change
                || old_parent_offset != new_parent_offset)
        {
            self.event_hub.fire_on_area_changed(
                old_rect,
                old_parent_offset,
                new_geometry.frame_rect(),
                new_parent_offset,
            );
        }

        *self.geometry_node.borrow_mut() = new_geometry.clone();
        {
            let mut property = self.layout_property.borrow_mut();
            property.sync_constraints_from(dirty.layout_property());
            property.clean_dirty();
        }

        let need_render = self.pattern.on_dirty_layout_wrapper_swap(dirty, &config);
        let need_render_legacy =
            self.pattern
                .on_dirty_layout_wrapper_swap_legacy(dirty, config.skip_measure, config.skip_layout);
        let paint_needs_render = self
            .paint_property
            .borrow()
            .property_change_flag()
            .needs_render();
        if need_render || need_render_legacy || paint_needs_render {
            self.mark_dirty_node_with(true, true, PropertyChangeFlag::RENDER);
        }

        self.update_border_defaults();
        self.rebuild_render_context_tree();
    }

    fn update_border_defaults(&self) {
        let (border_width, constraint) = {
            let property = self.layout_property.borrow();
            (property.border_width(), property.layout_constraint())
        };
        let Some(border_width) = border_width else {
            return;
        };
        if !self.render_context.has_border_color() {
            self.render_context
                .update_border_color(BorderColorProperty::uniform(Color::BLACK));
        }
        if !self.render_context.has_border_style() {
            self.render_context
                .update_border_style(BorderStyleProperty::uniform(BorderStyle::Solid));
        }
        let (scale, reference) = match constraint {
            Some(constraint) => (constraint.scale_property, constraint.percent_reference.width),
            None => PipelineContext::current()
                .map(|pipeline| (pipeline.scale_property(), pipeline.current_root_width()))
                .unwrap_or_default(),
        };
        self.render_context
            .update_border_width(border_width.resolve(&scale, reference));
    }

    // ========== Render Tree ==========

    pub fn mark_need_sync_render_tree(&self) {
        self.need_sync_render_tree.set(true);
    }

    /// Hands the visible children to the render context if the child set
    /// changed since the last rebuild.
    pub fn rebuild_render_context_tree(&self) {
        if !self.need_sync_render_tree.get() {
            return;
        }
        let children = self.generate_one_depth_visible_frame();
        self.render_context.rebuild_frame(self, &children);
        self.need_sync_render_tree.set(false);
    }

    /// Direct children that are active and visible. Atomic nodes have none.
    pub fn generate_one_depth_visible_frame(&self) -> Vec<Rc<FrameNode>> {
        if self.is_atomic_node() {
            return Vec::new();
        }
        self.children
            .borrow()
            .iter()
            .filter(|child| child.is_active() && child.is_visible())
            .cloned()
            .collect()
    }

    // ========== Inspector ==========

    /// One inspector line per attribute.
    pub fn dump_info(&self) -> Vec<String> {
        let constraint = self
            .layout_property
            .borrow()
            .layout_constraint()
            .map_or_else(|| "NA".to_string(), |constraint| format!("{constraint:?}"));
        vec![
            format!("Depth: {}", self.depth()),
            format!("FrameRect: {:?}", self.frame_rect()),
            format!("LayoutConstraint: {constraint}"),
        ]
    }
}

impl Drop for FrameNode {
    fn drop(&mut self) {
        self.pattern.on_detach_from_frame_node();
        ElementRegister::remove_stale_item(self.node_id);
    }
}

impl std::fmt::Debug for FrameNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameNode")
            .field("tag", &self.tag)
            .field("id", &self.node_id)
            .field("depth", &self.depth.get())
            .field("frame", &self.frame_rect())
            .field("is_active", &self.is_active.get())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/frame_node_tests.rs"]
mod tests;
