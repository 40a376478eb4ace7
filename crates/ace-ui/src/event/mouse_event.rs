use std::cell::Cell;
use std::rc::Rc;

use ace_core::{NodeId, INVALID_NODE_ID};
use ace_ui_graphics::{OffsetF, PointF};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseAction {
    #[default]
    None,
    Press,
    Release,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub action: MouseAction,
    pub global_location: PointF,
    pub local_location: PointF,
}

impl MouseEvent {
    pub fn new(button: MouseButton, action: MouseAction, location: PointF) -> Self {
        Self {
            button,
            action,
            global_location: location,
            local_location: location,
        }
    }

    pub fn rebased(&self, coordinate_offset: OffsetF) -> Self {
        Self {
            local_location: self.global_location - coordinate_offset,
            ..*self
        }
    }
}

/// Visual feedback a node shows while hovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverEffect {
    #[default]
    None,
    Auto,
    Scale,
    Highlight,
}

pub struct MouseEventTarget {
    node_id: Cell<NodeId>,
    coordinate_offset: Cell<OffsetF>,
    callback: Rc<dyn Fn(&MouseEvent)>,
}

impl MouseEventTarget {
    pub fn new(callback: impl Fn(&MouseEvent) + 'static) -> Self {
        Self {
            node_id: Cell::new(INVALID_NODE_ID),
            coordinate_offset: Cell::new(OffsetF::ZERO),
            callback: Rc::new(callback),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id.get()
    }

    pub fn coordinate_offset(&self) -> OffsetF {
        self.coordinate_offset.get()
    }

    pub(crate) fn attach(&self, node_id: NodeId, coordinate_offset: OffsetF) {
        self.node_id.set(node_id);
        self.coordinate_offset.set(coordinate_offset);
    }

    pub fn dispatch_event(&self, event: &MouseEvent) {
        (self.callback)(&event.rebased(self.coordinate_offset.get()));
    }
}

impl std::fmt::Debug for MouseEventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseEventTarget")
            .field("node_id", &self.node_id.get())
            .finish()
    }
}

/// Receives `true` when the pointer enters the node and `false` on exit.
pub struct HoverEventTarget {
    node_id: Cell<NodeId>,
    callback: Rc<dyn Fn(bool)>,
}

impl HoverEventTarget {
    pub fn new(callback: impl Fn(bool) + 'static) -> Self {
        Self {
            node_id: Cell::new(INVALID_NODE_ID),
            callback: Rc::new(callback),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id.get()
    }

    pub(crate) fn attach(&self, node_id: NodeId) {
        self.node_id.set(node_id);
    }

    pub fn dispatch_hover(&self, is_hovered: bool) {
        (self.callback)(is_hovered);
    }
}

impl std::fmt::Debug for HoverEventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoverEventTarget")
            .field("node_id", &self.node_id.get())
            .finish()
    }
}

pub type MouseTestResult = Vec<Rc<MouseEventTarget>>;
pub type HoverTestResult = Vec<Rc<HoverEventTarget>>;
