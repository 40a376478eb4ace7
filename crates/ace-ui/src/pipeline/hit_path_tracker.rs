//! Touch targets captured on pointer down, replayed until the pointer lifts.

use ace_core::collections::map::HashMap;

use crate::event::{PointerId, TouchTestResult};

/// Keeps the touch test result of each active pointer.
///
/// Targets are resolved once, on down; move and up events go to the same
/// targets even if layout moved them in between.
#[derive(Default)]
pub struct HitPathTracker {
    paths: HashMap<PointerId, TouchTestResult>,
}

impl HitPathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hit_path(&mut self, pointer: PointerId, targets: TouchTestResult) {
        self.paths.insert(pointer, targets);
    }

    pub fn get_path(&self, pointer: PointerId) -> Option<&TouchTestResult> {
        self.paths.get(&pointer)
    }

    pub fn remove_path(&mut self, pointer: PointerId) -> Option<TouchTestResult> {
        self.paths.remove(&pointer)
    }

    pub fn has_path(&self, pointer: PointerId) -> bool {
        self.paths.contains_key(&pointer)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
