//! Widget behaviour plugged into a [`FrameNode`].

use std::any::Any;
use std::rc::{Rc, Weak};

use ace_core::NodeId;

use crate::event::EventHub;
use crate::frame_node::FrameNode;
use crate::layout::{
    BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper, LinearLayoutAlgorithm,
    LinearLayoutProperty,
};
use crate::property::{LayoutProperty, PaintProperty};
use crate::render::NodePaintMethod;

/// Which parts of the committed geometry a swap changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtySwapConfig {
    pub frame_size_change: bool,
    pub frame_offset_change: bool,
    pub content_size_change: bool,
    pub content_offset_change: bool,
    pub skip_measure: bool,
    pub skip_layout: bool,
}

/// Weak handle from a pattern back to the node that owns it.
#[derive(Clone, Debug, Default)]
pub struct PatternHost {
    id: Option<NodeId>,
    node: Weak<FrameNode>,
}

impl PatternHost {
    pub(crate) fn new(id: NodeId, node: Weak<FrameNode>) -> Self {
        Self { id: Some(id), node }
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// The host, unless it has been dropped.
    pub fn node(&self) -> Option<Rc<FrameNode>> {
        self.node.upgrade()
    }
}

/// Capability interface a node delegates all widget-specific logic to.
///
/// Factories are called once per node (properties, event hub) or once per
/// pass (layout algorithm, paint method). Hooks take `&self`; patterns keep
/// their own state in cells.
pub trait Pattern: Any {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::new()
    }

    fn create_paint_property(&self) -> PaintProperty {
        PaintProperty::new()
    }

    fn create_event_hub(&self) -> EventHub {
        EventHub::new()
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(BoxLayoutAlgorithm::new())
    }

    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        None
    }

    fn is_measure_boundary(&self) -> bool {
        false
    }

    fn is_render_boundary(&self) -> bool {
        true
    }

    /// Atomic nodes contribute no children to the render tree.
    fn is_atomic_node(&self) -> bool {
        false
    }

    /// Name of the backend surface this node renders into, if any.
    fn surface_node_name(&self) -> Option<String> {
        None
    }

    fn on_attach_to_frame_node(&self, _host: PatternHost) {}

    fn on_detach_from_frame_node(&self) {}

    fn on_modify_done(&self) {}

    fn on_mount_to_parent_done(&self) {}

    fn before_create_layout_wrapper(&self) {}

    fn before_create_paint_wrapper(&self) {}

    fn on_active(&self) {}

    fn on_in_active(&self) {}

    /// Returns true when the committed layout requires a repaint.
    fn on_dirty_layout_wrapper_swap(
        &self,
        _dirty: &LayoutWrapper,
        _config: &DirtySwapConfig,
    ) -> bool {
        false
    }

    /// Older form of [`Pattern::on_dirty_layout_wrapper_swap`]; both are
    /// consulted on every swap.
    fn on_dirty_layout_wrapper_swap_legacy(
        &self,
        _dirty: &LayoutWrapper,
        _skip_measure: bool,
        _skip_layout: bool,
    ) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

/// Pattern used when a caller supplies none.
#[derive(Debug, Default)]
pub struct DefaultPattern;

impl Pattern for DefaultPattern {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Row/column container.
#[derive(Debug, Clone, Copy)]
pub struct LinearPattern {
    property: LinearLayoutProperty,
}

impl LinearPattern {
    pub fn new(property: LinearLayoutProperty) -> Self {
        Self { property }
    }

    pub fn row() -> Self {
        Self::new(LinearLayoutProperty::row())
    }

    pub fn column() -> Self {
        Self::new(LinearLayoutProperty::column())
    }
}

impl Pattern for LinearPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_extension(self.property)
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(LinearLayoutAlgorithm::new())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
