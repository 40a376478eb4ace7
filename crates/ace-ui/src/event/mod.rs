//! Event registration on nodes and the targets a hit test collects.

mod event_hub;
mod gesture_event_hub;
mod input_event_hub;
mod mouse_event;
mod recognizer;
mod touch_event;

pub use event_hub::{AreaChangedCallback, EventHub};
pub use gesture_event_hub::{GestureEventHub, GestureHierarchyEntry};
pub use input_event_hub::InputEventHub;
pub use mouse_event::{
    HoverEffect, HoverEventTarget, HoverTestResult, MouseAction, MouseButton, MouseEvent,
    MouseEventTarget, MouseTestResult,
};
pub use recognizer::{GestureKind, GestureMask, GesturePriority, GestureRecognizer, Recognizer};
pub use touch_event::{
    HitTestMode, HitTestResult, PointerId, TouchEvent, TouchEventTarget, TouchRestrict,
    TouchTarget, TouchTestResult, TouchType,
};

#[cfg(test)]
#[path = "tests/gesture_event_hub_tests.rs"]
mod tests;
