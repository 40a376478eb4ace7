use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ace_core::INVALID_NODE_ID;
use ace_ui_graphics::OffsetF;

use super::mouse_event::{
    HoverEffect, HoverEventTarget, HoverTestResult, MouseEvent, MouseEventTarget, MouseTestResult,
};
use crate::frame_node::FrameNode;
use crate::pattern::PatternHost;

/// Mouse and hover registration of one node.
#[derive(Default)]
pub struct InputEventHub {
    host: RefCell<PatternHost>,
    mouse_targets: RefCell<Vec<Rc<MouseEventTarget>>>,
    hover_targets: RefCell<Vec<Rc<HoverEventTarget>>>,
    hover_effect: Cell<HoverEffect>,
}

impl InputEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach_host(&self, host: PatternHost) {
        *self.host.borrow_mut() = host;
    }

    pub fn add_on_mouse_event(&self, callback: impl Fn(&MouseEvent) + 'static) -> Rc<MouseEventTarget> {
        let target = Rc::new(MouseEventTarget::new(callback));
        self.mouse_targets.borrow_mut().push(Rc::clone(&target));
        target
    }

    pub fn add_on_hover_event(&self, callback: impl Fn(bool) + 'static) -> Rc<HoverEventTarget> {
        let target = Rc::new(HoverEventTarget::new(callback));
        self.hover_targets.borrow_mut().push(Rc::clone(&target));
        target
    }

    pub fn hover_effect(&self) -> HoverEffect {
        self.hover_effect.get()
    }

    pub fn set_hover_effect(&self, effect: HoverEffect) {
        self.hover_effect.set(effect);
    }

    /// Collects this node's mouse and hover targets. The topmost node with
    /// a hover effect becomes `hover_node`. Never blocks bubbling.
    pub fn process_mouse_test_hit(
        &self,
        coordinate_offset: OffsetF,
        mouse_result: &mut MouseTestResult,
        hover_result: &mut HoverTestResult,
        hover_node: &mut Option<Rc<FrameNode>>,
    ) -> bool {
        let host = self.host.borrow();
        let node_id = host.id().unwrap_or(INVALID_NODE_ID);
        for target in self.mouse_targets.borrow().iter() {
            target.attach(node_id, coordinate_offset);
            mouse_result.push(Rc::clone(target));
        }
        for target in self.hover_targets.borrow().iter() {
            target.attach(node_id);
            hover_result.push(Rc::clone(target));
        }
        if self.hover_effect.get() != HoverEffect::None && hover_node.is_none() {
            *hover_node = host.node();
        }
        false
    }
}

impl std::fmt::Debug for InputEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputEventHub")
            .field("mouse_targets", &self.mouse_targets.borrow().len())
            .field("hover_targets", &self.hover_targets.borrow().len())
            .field("hover_effect", &self.hover_effect.get())
            .finish()
    }
}
