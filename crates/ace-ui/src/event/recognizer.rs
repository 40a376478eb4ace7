use std::cell::Cell;
use std::rc::Rc;

use ace_core::{NodeId, INVALID_NODE_ID};
use ace_ui_graphics::OffsetF;

use super::touch_event::{TouchEvent, TouchRestrict};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Click,
    LongPress,
    Pan,
    Swipe,
    Pinch,
    Rotation,
    Custom,
}

impl GestureKind {
    /// Bit checked against [`TouchRestrict::forbidden_type`]. Custom
    /// gestures cannot be forbidden.
    pub fn restrict_bit(self) -> u32 {
        match self {
            GestureKind::Click => TouchRestrict::CLICK,
            GestureKind::LongPress => TouchRestrict::LONG_PRESS,
            GestureKind::Pan => TouchRestrict::PAN,
            GestureKind::Swipe => TouchRestrict::SWIPE,
            GestureKind::Pinch => TouchRestrict::PINCH,
            GestureKind::Rotation => TouchRestrict::ROTATION,
            GestureKind::Custom => TouchRestrict::NONE,
        }
    }
}

/// How a gesture attached to a node competes with its children's gestures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePriority {
    /// Children win.
    #[default]
    Low,
    /// The node's gesture wins.
    High,
    /// Both recognize together.
    Parallel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureMask {
    #[default]
    Normal,
    /// Drops the children's recognizers entirely.
    IgnoreInternal,
}

/// A leaf recognizer. Recognition state lives in the callback; the engine
/// only places the recognizer and feeds it events.
pub struct GestureRecognizer {
    kind: GestureKind,
    node_id: Cell<NodeId>,
    coordinate_offset: Cell<OffsetF>,
    on_event: Rc<dyn Fn(&TouchEvent) -> bool>,
}

impl GestureRecognizer {
    /// `on_event` returns whether the recognizer accepted the event.
    pub fn new(kind: GestureKind, on_event: impl Fn(&TouchEvent) -> bool + 'static) -> Self {
        Self {
            kind,
            node_id: Cell::new(INVALID_NODE_ID),
            coordinate_offset: Cell::new(OffsetF::ZERO),
            on_event: Rc::new(on_event),
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id.get()
    }

    pub(crate) fn assign_node_id(&self, id: NodeId) {
        self.node_id.set(id);
    }

    pub fn coordinate_offset(&self) -> OffsetF {
        self.coordinate_offset.get()
    }

    pub(crate) fn set_coordinate_offset(&self, offset: OffsetF) {
        self.coordinate_offset.set(offset);
    }

    pub fn handle_event(&self, event: &TouchEvent) -> bool {
        (self.on_event)(&event.rebased(self.coordinate_offset.get()))
    }
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("kind", &self.kind)
            .field("node_id", &self.node_id.get())
            .finish()
    }
}

/// A recognizer or a group of them, as packed by hit testing.
#[derive(Clone, Debug)]
pub enum Recognizer {
    Single(Rc<GestureRecognizer>),
    /// Every member sees every event.
    Parallel(Vec<Recognizer>),
    /// Members are tried in order; the first to accept an event wins it.
    Exclusive(Vec<Recognizer>),
}

impl Recognizer {
    pub fn single(recognizer: GestureRecognizer) -> Self {
        Recognizer::Single(Rc::new(recognizer))
    }

    pub fn handle_event(&self, event: &TouchEvent) -> bool {
        match self {
            Recognizer::Single(recognizer) => recognizer.handle_event(event),
            Recognizer::Parallel(members) => members
                .iter()
                .fold(false, |accepted, member| member.handle_event(event) || accepted),
            Recognizer::Exclusive(members) => {
                members.iter().any(|member| member.handle_event(event))
            }
        }
    }

    /// Leaf recognizers in depth-first order.
    pub fn leaves(&self) -> Vec<Rc<GestureRecognizer>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Rc<GestureRecognizer>>) {
        match self {
            Recognizer::Single(recognizer) => out.push(Rc::clone(recognizer)),
            Recognizer::Parallel(members) | Recognizer::Exclusive(members) => {
                for member in members {
                    member.collect_leaves(out);
                }
            }
        }
    }

    pub(crate) fn attach(&self, node_id: NodeId, coordinate_offset: OffsetF) {
        match self {
            Recognizer::Single(recognizer) => {
                recognizer.assign_node_id(node_id);
                recognizer.set_coordinate_offset(coordinate_offset);
            }
            Recognizer::Parallel(members) | Recognizer::Exclusive(members) => {
                for member in members {
                    member.attach(node_id, coordinate_offset);
                }
            }
        }
    }
}
