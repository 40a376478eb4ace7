use std::cell::Cell;
use std::rc::Rc;

use ace_core::{NodeId, INVALID_NODE_ID};
use ace_ui_graphics::{OffsetF, PointF};

use super::recognizer::{GestureKind, Recognizer};

/// Identifies one finger or pointer across a down/move/up sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    pub const PRIMARY: PointerId = PointerId(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchType {
    Down,
    Move,
    Up,
    Cancel,
}

/// A touch point. `local_location` is relative to the receiving node and
/// equals `global_location` until a target rebases it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub id: PointerId,
    pub touch_type: TouchType,
    pub global_location: PointF,
    pub local_location: PointF,
}

impl TouchEvent {
    pub fn new(id: PointerId, touch_type: TouchType, location: PointF) -> Self {
        Self {
            id,
            touch_type,
            global_location: location,
            local_location: location,
        }
    }

    pub fn down(location: PointF) -> Self {
        Self::new(PointerId::PRIMARY, TouchType::Down, location)
    }

    pub fn moved(location: PointF) -> Self {
        Self::new(PointerId::PRIMARY, TouchType::Move, location)
    }

    pub fn up(location: PointF) -> Self {
        Self::new(PointerId::PRIMARY, TouchType::Up, location)
    }

    /// Copy of this event expressed relative to a node whose local origin
    /// sits at `coordinate_offset` in global space.
    pub fn rebased(&self, coordinate_offset: OffsetF) -> Self {
        Self {
            local_location: self.global_location - coordinate_offset,
            ..*self
        }
    }
}

/// Gesture kinds the input source does not allow for this touch sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchRestrict {
    pub forbidden_type: u32,
}

impl TouchRestrict {
    pub const NONE: u32 = 0;
    pub const CLICK: u32 = 1 << 0;
    pub const LONG_PRESS: u32 = 1 << 1;
    pub const PAN: u32 = 1 << 2;
    pub const SWIPE: u32 = 1 << 3;
    pub const PINCH: u32 = 1 << 4;
    pub const ROTATION: u32 = 1 << 5;
    pub const ALL: u32 = u32::MAX;

    pub fn new(forbidden_type: u32) -> Self {
        Self { forbidden_type }
    }

    pub fn forbids(&self, kind: GestureKind) -> bool {
        self.forbidden_type & kind.restrict_bit() != 0
    }
}

/// How a node takes part in hit testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitTestMode {
    /// Hit nodes block lower siblings.
    #[default]
    Default,
    /// Like `Default`, and the node also stops bubbling to its parent.
    Block,
    /// A hit does not block lower siblings.
    Transparent,
    /// The node's own targets are skipped; children are still tested.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTestResult {
    OutOfRegion,
    Bubbling,
    StopBubbling,
}

/// Raw touch callback registered on a node.
pub struct TouchEventTarget {
    node_id: Cell<NodeId>,
    coordinate_offset: Cell<OffsetF>,
    callback: Rc<dyn Fn(&TouchEvent)>,
}

impl TouchEventTarget {
    pub fn new(callback: impl Fn(&TouchEvent) + 'static) -> Self {
        Self {
            node_id: Cell::new(INVALID_NODE_ID),
            coordinate_offset: Cell::new(OffsetF::ZERO),
            callback: Rc::new(callback),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id.get()
    }

    pub(crate) fn set_node_id(&self, id: NodeId) {
        self.node_id.set(id);
    }

    pub fn coordinate_offset(&self) -> OffsetF {
        self.coordinate_offset.get()
    }

    pub(crate) fn set_coordinate_offset(&self, offset: OffsetF) {
        self.coordinate_offset.set(offset);
    }

    pub fn dispatch_event(&self, event: &TouchEvent) -> bool {
        (self.callback)(&event.rebased(self.coordinate_offset.get()));
        true
    }
}

impl std::fmt::Debug for TouchEventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchEventTarget")
            .field("node_id", &self.node_id.get())
            .field("coordinate_offset", &self.coordinate_offset.get())
            .finish()
    }
}

/// One entry of a touch test result.
#[derive(Clone, Debug)]
pub enum TouchTarget {
    Touch(Rc<TouchEventTarget>),
    Recognizer(Recognizer),
}

impl TouchTarget {
    pub fn as_recognizer(&self) -> Option<&Recognizer> {
        match self {
            TouchTarget::Recognizer(recognizer) => Some(recognizer),
            TouchTarget::Touch(_) => None,
        }
    }

    /// Delivers `event`; returns whether any handler accepted it.
    pub fn dispatch_event(&self, event: &TouchEvent) -> bool {
        match self {
            TouchTarget::Touch(target) => target.dispatch_event(event),
            TouchTarget::Recognizer(recognizer) => recognizer.handle_event(event),
        }
    }
}

/// Ordered targets collected by a touch test, innermost first.
pub type TouchTestResult = Vec<TouchTarget>;
