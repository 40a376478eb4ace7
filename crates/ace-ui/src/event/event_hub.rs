use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ace_ui_graphics::{OffsetF, RectF};

use super::{GestureEventHub, InputEventHub};
use crate::frame_node::FrameNode;
use crate::pattern::PatternHost;

/// Receives `(old_rect, old_parent_origin, new_rect, new_parent_origin)`.
pub type AreaChangedCallback = Rc<dyn Fn(RectF, OffsetF, RectF, OffsetF)>;

/// Per-node event registration: lifecycle callbacks plus lazily created
/// gesture and input hubs.
pub struct EventHub {
    host: RefCell<PatternHost>,
    gesture_event_hub: RefCell<Option<Rc<GestureEventHub>>>,
    input_event_hub: RefCell<Option<Rc<InputEventHub>>>,
    on_appear: RefCell<Option<Rc<dyn Fn()>>>,
    on_disappear: RefCell<Option<Rc<dyn Fn()>>>,
    on_area_changed: RefCell<Option<AreaChangedCallback>>,
    enabled: Cell<bool>,
    extension: Option<Box<dyn Any>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self {
            host: RefCell::default(),
            gesture_event_hub: RefCell::default(),
            input_event_hub: RefCell::default(),
            on_appear: RefCell::default(),
            on_disappear: RefCell::default(),
            on_area_changed: RefCell::default(),
            enabled: Cell::new(true),
            extension: None,
        }
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event hub carrying widget-specific event state.
    pub fn with_extension<T: Any>(extension: T) -> Self {
        Self {
            extension: Some(Box::new(extension)),
            ..Self::default()
        }
    }

    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.extension.as_deref()?.downcast_ref::<T>()
    }

    pub(crate) fn attach_host(&self, host: PatternHost) {
        if let Some(hub) = self.gesture_event_hub.borrow().as_ref() {
            hub.attach_host(host.clone());
        }
        if let Some(hub) = self.input_event_hub.borrow().as_ref() {
            hub.attach_host(host.clone());
        }
        *self.host.borrow_mut() = host;
    }

    pub fn host(&self) -> Option<Rc<FrameNode>> {
        self.host.borrow().node()
    }

    pub fn gesture_event_hub(&self) -> Option<Rc<GestureEventHub>> {
        self.gesture_event_hub.borrow().clone()
    }

    pub fn get_or_create_gesture_event_hub(&self) -> Rc<GestureEventHub> {
        let mut slot = self.gesture_event_hub.borrow_mut();
        Rc::clone(slot.get_or_insert_with(|| {
            let hub = GestureEventHub::new();
            hub.attach_host(self.host.borrow().clone());
            Rc::new(hub)
        }))
    }

    pub fn input_event_hub(&self) -> Option<Rc<InputEventHub>> {
        self.input_event_hub.borrow().clone()
    }

    pub fn get_or_create_input_event_hub(&self) -> Rc<InputEventHub> {
        let mut slot = self.input_event_hub.borrow_mut();
        Rc::clone(slot.get_or_insert_with(|| {
            let hub = InputEventHub::new();
            hub.attach_host(self.host.borrow().clone());
            Rc::new(hub)
        }))
    }

    pub fn set_on_appear(&self, callback: impl Fn() + 'static) {
        *self.on_appear.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn fire_on_appear(&self) {
        let callback = self.on_appear.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn set_on_disappear(&self, callback: impl Fn() + 'static) {
        *self.on_disappear.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn fire_on_disappear(&self) {
        let callback = self.on_disappear.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn set_on_area_changed(&self, callback: impl Fn(RectF, OffsetF, RectF, OffsetF) + 'static) {
        *self.on_area_changed.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn has_on_area_changed(&self) -> bool {
        self.on_area_changed.borrow().is_some()
    }

    pub fn fire_on_area_changed(
        &self,
        old_rect: RectF,
        old_origin: OffsetF,
        rect: RectF,
        origin: OffsetF,
    ) {
        let callback = self.on_area_changed.borrow().clone();
        if let Some(callback) = callback {
            callback(old_rect, old_origin, rect, origin);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("enabled", &self.enabled.get())
            .field("gesture_event_hub", &self.gesture_event_hub.borrow())
            .field("input_event_hub", &self.input_event_hub.borrow())
            .field("has_on_area_changed", &self.has_on_area_changed())
            .finish()
    }
}
