use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ace_core::INVALID_NODE_ID;
use ace_ui_graphics::OffsetF;

use super::recognizer::{GestureMask, GesturePriority, GestureRecognizer, Recognizer};
use super::touch_event::{
    HitTestMode, TouchEvent, TouchEventTarget, TouchRestrict, TouchTarget, TouchTestResult,
};
use crate::pattern::PatternHost;

/// A gesture attached to a node together with how it competes with the
/// recognizers collected from the node's subtree.
#[derive(Clone, Debug)]
pub struct GestureHierarchyEntry {
    pub recognizer: Recognizer,
    pub priority: GesturePriority,
    pub mask: GestureMask,
}

/// Touch-side event registration of one node.
#[derive(Default)]
pub struct GestureEventHub {
    host: RefCell<PatternHost>,
    hit_test_mode: Cell<HitTestMode>,
    touch_targets: RefCell<Vec<Rc<TouchEventTarget>>>,
    recognizers: RefCell<Vec<Rc<GestureRecognizer>>>,
    gesture_hierarchy: RefCell<Vec<GestureHierarchyEntry>>,
}

impl GestureEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach_host(&self, host: PatternHost) {
        *self.host.borrow_mut() = host;
    }

    pub fn hit_test_mode(&self) -> HitTestMode {
        self.hit_test_mode.get()
    }

    pub fn set_hit_test_mode(&self, mode: HitTestMode) {
        self.hit_test_mode.set(mode);
    }

    pub fn add_touch_event(&self, callback: impl Fn(&TouchEvent) + 'static) -> Rc<TouchEventTarget> {
        let target = Rc::new(TouchEventTarget::new(callback));
        self.touch_targets.borrow_mut().push(Rc::clone(&target));
        target
    }

    pub fn remove_touch_event(&self, target: &Rc<TouchEventTarget>) {
        self.touch_targets
            .borrow_mut()
            .retain(|existing| !Rc::ptr_eq(existing, target));
    }

    /// Adds a recognizer owned by the node itself, such as a click handler.
    /// It competes with children's recognizers on equal terms.
    pub fn add_recognizer(&self, recognizer: GestureRecognizer) -> Rc<GestureRecognizer> {
        let recognizer = Rc::new(recognizer);
        self.recognizers.borrow_mut().push(Rc::clone(&recognizer));
        recognizer
    }

    /// Adds a user gesture that is packed around the subtree's recognizers
    /// according to `priority` and `mask`.
    pub fn add_gesture(&self, recognizer: Recognizer, priority: GesturePriority, mask: GestureMask) {
        self.gesture_hierarchy.borrow_mut().push(GestureHierarchyEntry {
            recognizer,
            priority,
            mask,
        });
    }

    pub fn clear_gestures(&self) {
        self.gesture_hierarchy.borrow_mut().clear();
    }

    pub fn has_targets(&self) -> bool {
        !self.touch_targets.borrow().is_empty()
            || !self.recognizers.borrow().is_empty()
            || !self.gesture_hierarchy.borrow().is_empty()
    }

    /// Adds this node's own targets to `inner_targets` (which already holds
    /// the targets collected from children), then moves plain targets into
    /// `final_result` and packs every recognizer into one group.
    ///
    /// Returns true when the node blocks bubbling to its parent.
    pub fn process_touch_test_hit(
        &self,
        coordinate_offset: OffsetF,
        touch_restrict: &TouchRestrict,
        inner_targets: &mut TouchTestResult,
        final_result: &mut TouchTestResult,
    ) -> bool {
        let node_id = self.host.borrow().id().unwrap_or(INVALID_NODE_ID);
        for target in self.touch_targets.borrow().iter() {
            target.set_node_id(node_id);
            target.set_coordinate_offset(coordinate_offset);
            inner_targets.push(TouchTarget::Touch(Rc::clone(target)));
        }
        for recognizer in self.recognizers.borrow().iter() {
            if touch_restrict.forbids(recognizer.kind()) {
                log::trace!("node {node_id}: {:?} forbidden by touch restrict", recognizer.kind());
                continue;
            }
            recognizer.assign_node_id(node_id);
            recognizer.set_coordinate_offset(coordinate_offset);
            inner_targets.push(TouchTarget::Recognizer(Recognizer::Single(Rc::clone(recognizer))));
        }

        let mut inner_recognizers = Vec::new();
        for target in inner_targets.drain(..) {
            match target {
                TouchTarget::Recognizer(recognizer) => inner_recognizers.push(recognizer),
                plain => final_result.push(plain),
            }
        }
        self.process_touch_test_hierarchy(coordinate_offset, inner_recognizers, final_result);

        self.hit_test_mode() == HitTestMode::Block
    }

    fn process_touch_test_hierarchy(
        &self,
        coordinate_offset: OffsetF,
        mut inner_recognizers: Vec<Recognizer>,
        final_result: &mut TouchTestResult,
    ) {
        let node_id = self.host.borrow().id().unwrap_or(INVALID_NODE_ID);
        let mut current = match inner_recognizers.len() {
            0 => None,
            1 => inner_recognizers.pop(),
            _ => Some(Recognizer::Parallel(inner_recognizers)),
        };

        for entry in self.gesture_hierarchy.borrow().iter() {
            let recognizer = entry.recognizer.clone();
            recognizer.attach(node_id, coordinate_offset);
            if entry.mask == GestureMask::IgnoreInternal {
                current = Some(recognizer);
                continue;
            }
            current = Some(match current.take() {
                None => recognizer,
                Some(inner) => match entry.priority {
                    GesturePriority::Low => Recognizer::Exclusive(vec![inner, recognizer]),
                    GesturePriority::High => Recognizer::Exclusive(vec![recognizer, inner]),
                    GesturePriority::Parallel => Recognizer::Parallel(vec![inner, recognizer]),
                },
            });
        }

        if let Some(current) = current {
            final_result.push(TouchTarget::Recognizer(current));
        }
    }
}

impl std::fmt::Debug for GestureEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEventHub")
            .field("hit_test_mode", &self.hit_test_mode.get())
            .field("touch_targets", &self.touch_targets.borrow().len())
            .field("recognizers", &self.recognizers.borrow().len())
            .field("gesture_hierarchy", &self.gesture_hierarchy.borrow().len())
            .finish()
    }
}
