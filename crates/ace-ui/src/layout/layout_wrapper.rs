use std::rc::Rc;

use ace_core::{ElementRegister, NodeId, TaskThread};
use ace_ui_graphics::OffsetF;
use ace_ui_layout::{LayoutConstraintF, VisibleType};

use super::LayoutAlgorithmWrapper;
use crate::frame_node::FrameNode;
use crate::geometry_node::GeometryNode;
use crate::property::LayoutProperty;

/// Detached view of one node for a single layout pass.
///
/// Holds only cloned data plus the host id, so a whole wrapper tree can be
/// measured on a worker thread. The host is resolved through the registry
/// when the result is mounted back on the UI thread; a host that went away
/// in the meantime turns the mount into a no-op.
pub struct LayoutWrapper {
    host_id: NodeId,
    host_tag: String,
    geometry_node: GeometryNode,
    layout_property: LayoutProperty,
    layout_algorithm: LayoutAlgorithmWrapper,
    children: Vec<LayoutWrapper>,
    is_active: bool,
    is_root_measure_node: bool,
    should_run_on_main: bool,
    /// Used when measure gets no parent constraint.
    fallback_constraint: LayoutConstraintF,
}

impl LayoutWrapper {
    pub fn new(
        host_id: NodeId,
        host_tag: impl Into<String>,
        geometry_node: GeometryNode,
        layout_property: LayoutProperty,
        fallback_constraint: LayoutConstraintF,
    ) -> Self {
        Self {
            host_id,
            host_tag: host_tag.into(),
            geometry_node,
            layout_property,
            layout_algorithm: LayoutAlgorithmWrapper::placeholder(),
            children: Vec::new(),
            is_active: false,
            is_root_measure_node: false,
            should_run_on_main: false,
            fallback_constraint,
        }
    }

    pub fn host_id(&self) -> NodeId {
        self.host_id
    }

    pub fn host_tag(&self) -> &str {
        &self.host_tag
    }

    /// Resolves the live host. UI thread only.
    pub fn host_node(&self) -> Option<Rc<FrameNode>> {
        ElementRegister::get_specific_item_by_id::<FrameNode>(self.host_id)
    }

    pub fn geometry_node(&self) -> &GeometryNode {
        &self.geometry_node
    }

    pub fn geometry_node_mut(&mut self) -> &mut GeometryNode {
        &mut self.geometry_node
    }

    pub fn layout_property(&self) -> &LayoutProperty {
        &self.layout_property
    }

    pub fn layout_property_mut(&mut self) -> &mut LayoutProperty {
        &mut self.layout_property
    }

    pub fn layout_algorithm(&self) -> &LayoutAlgorithmWrapper {
        &self.layout_algorithm
    }

    pub fn set_layout_algorithm(&mut self, algorithm: LayoutAlgorithmWrapper) {
        self.layout_algorithm = algorithm;
    }

    pub fn skip_measure(&self) -> bool {
        self.layout_algorithm.skip_measure()
    }

    pub fn skip_layout(&self) -> bool {
        self.layout_algorithm.skip_layout()
    }

    pub fn append_child(&mut self, child: LayoutWrapper) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[LayoutWrapper] {
        &self.children
    }

    pub fn total_child_count(&self) -> usize {
        self.children.len()
    }

    /// Children taking part in this pass. Every child that is not GONE is
    /// marked active; GONE children stay inactive and are left out.
    pub fn all_children_with_build(&mut self) -> impl Iterator<Item = &mut LayoutWrapper> {
        self.children.iter_mut().filter_map(|child| {
            if child.layout_property.visibility() == VisibleType::Gone {
                return None;
            }
            child.is_active = true;
            Some(child)
        })
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn is_root_measure_node(&self) -> bool {
        self.is_root_measure_node
    }

    pub fn set_root_measure_node(&mut self) {
        self.is_root_measure_node = true;
    }

    pub fn set_should_run_on_main(&mut self, main: bool) {
        self.should_run_on_main = main;
    }

    /// Thread classes every algorithm in this subtree tolerates.
    pub fn can_run_on_which_thread(&self) -> TaskThread {
        if self.should_run_on_main {
            return TaskThread::MAIN;
        }
        self.children
            .iter()
            .fold(self.layout_algorithm.can_run_on_which_thread(), |threads, child| {
                threads.intersect(child.can_run_on_which_thread())
            })
    }

    pub fn check_should_run_on_main(&self) -> bool {
        let threads = self.can_run_on_which_thread();
        threads.is_undefined() || threads.contains(TaskThread::MAIN)
    }

    /// Measures this node under `parent_constraint`, or under the frozen
    /// root constraint when there is none.
    pub fn measure(&mut self, parent_constraint: Option<LayoutConstraintF>) {
        if self.layout_algorithm.skip_measure() {
            log::trace!("{}#{}: measure skipped", self.host_tag, self.host_id);
            return;
        }
        match parent_constraint {
            Some(constraint) => {
                self.geometry_node.set_parent_layout_constraint(constraint);
                self.layout_property.update_layout_constraint(&constraint);
            }
            None => {
                let fallback = self.fallback_constraint;
                self.layout_property.update_layout_constraint(&fallback);
            }
        }
        self.layout_property.update_content_constraint();
        self.geometry_node
            .update_margin(self.layout_property.create_margin());
        self.geometry_node
            .update_padding_with_border(self.layout_property.create_padding_and_border());

        let Some(mut algorithm) = self.layout_algorithm.take() else {
            return;
        };
        if let Some(content_constraint) = self.layout_property.content_constraint() {
            if let Some(size) = algorithm.measure_content(&content_constraint, self) {
                self.geometry_node.set_content_size(size);
            }
        }
        algorithm.measure(self);
        self.layout_algorithm.restore(algorithm);
    }

    /// Positions children and records `parent_global_offset`, then lays out
    /// every active child relative to this node's global origin.
    pub fn layout(&mut self, parent_global_offset: OffsetF) {
        if self.layout_algorithm.skip_layout() {
            log::trace!("{}#{}: layout skipped", self.host_tag, self.host_id);
            return;
        }
        if self.layout_property.layout_constraint().is_none() {
            let constraint = self
                .geometry_node
                .parent_layout_constraint()
                .unwrap_or(self.fallback_constraint);
            self.layout_property.update_layout_constraint(&constraint);
            self.layout_property.update_content_constraint();
        }
        self.geometry_node.set_parent_global_offset(parent_global_offset);

        if let Some(mut algorithm) = self.layout_algorithm.take() {
            algorithm.layout(self);
            self.layout_algorithm.restore(algorithm);
        }

        let origin = self.geometry_node.global_offset();
        for child in self.children.iter_mut().filter(|child| child.is_active) {
            child.layout(origin);
        }
    }

    /// Commits this wrapper tree into the live nodes, children first.
    pub fn mount_to_host_on_main_thread(&self) {
        self.swap_dirty_layout_wrapper_on_main_thread();
    }

    fn swap_dirty_layout_wrapper_on_main_thread(&self) {
        for child in &self.children {
            child.swap_dirty_layout_wrapper_on_main_thread();
        }
        match self.host_node() {
            Some(host) => host.swap_dirty_layout_wrapper_on_main_thread(self),
            None => log::debug!(
                "{}#{}: host gone before mount, dropping layout result",
                self.host_tag,
                self.host_id
            ),
        }
    }
}

impl std::fmt::Debug for LayoutWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutWrapper")
            .field("host", &format_args!("{}#{}", self.host_tag, self.host_id))
            .field("frame", &self.geometry_node.frame_rect())
            .field("algorithm", &self.layout_algorithm)
            .field("is_active", &self.is_active)
            .field("children", &self.children.len())
            .finish()
    }
}
