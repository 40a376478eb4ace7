//! Id-keyed lookup of live nodes.
//!
//! Every UI thread owns one registry. It holds weak handles only, so a node
//! dropped elsewhere simply resolves to `None` here. Ids come from a
//! process-wide counter so they stay unique across UI threads.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicI32, Ordering};

use crate::collections::map::{HashMap, HashSet};
use crate::{NodeError, NodeId};

static NEXT_UNIQUE_ID: AtomicI32 = AtomicI32::new(0);

#[derive(Default)]
struct Registry {
    items: HashMap<NodeId, Weak<dyn Any>>,
    removed: HashSet<NodeId>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Namespace for the calling thread's registry.
pub struct ElementRegister;

impl ElementRegister {
    pub fn make_unique_id() -> NodeId {
        NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed)
    }

    pub fn add_item(id: NodeId, item: &Rc<dyn Any>) {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            registry.items.insert(id, Rc::downgrade(item));
            registry.removed.remove(&id);
        });
    }

    pub fn contains(id: NodeId) -> bool {
        REGISTRY.with(|registry| {
            registry
                .borrow()
                .items
                .get(&id)
                .is_some_and(|item| item.strong_count() > 0)
        })
    }

    /// Resolves `id` to a live item of type `T`.
    pub fn get_specific_item_by_id<T: Any>(id: NodeId) -> Option<Rc<T>> {
        Self::try_get_specific_item_by_id(id).ok()
    }

    pub fn try_get_specific_item_by_id<T: Any>(id: NodeId) -> Result<Rc<T>, NodeError> {
        let item = REGISTRY
            .with(|registry| registry.borrow().items.get(&id).and_then(Weak::upgrade))
            .ok_or(NodeError::Missing { id })?;
        item.downcast::<T>().map_err(|_| NodeError::TypeMismatch {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    /// Removes `id` and records it so the pipeline can report removals.
    pub fn remove_item(id: NodeId) -> bool {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            let removed = registry.items.remove(&id).is_some();
            if removed {
                registry.removed.insert(id);
                log::trace!("element {id} removed from registry");
            }
            removed
        })
    }

    /// Removes `id` without recording it as removed.
    pub fn remove_item_silently(id: NodeId) -> bool {
        REGISTRY.with(|registry| registry.borrow_mut().items.remove(&id).is_some())
    }

    /// Drops the entry for `id` only if it no longer resolves, so a node
    /// re-registered under the same id survives. Safe to call while the
    /// thread-local is being torn down.
    pub fn remove_stale_item(id: NodeId) {
        let _ = REGISTRY.try_with(|registry| {
            let Ok(mut registry) = registry.try_borrow_mut() else {
                return;
            };
            if registry
                .items
                .get(&id)
                .is_some_and(|item| item.strong_count() == 0)
            {
                registry.items.remove(&id);
            }
        });
    }

    pub fn take_removed_items() -> HashSet<NodeId> {
        REGISTRY.with(|registry| std::mem::take(&mut registry.borrow_mut().removed))
    }

    pub fn len() -> usize {
        REGISTRY.with(|registry| registry.borrow().items.len())
    }

    pub fn clear() {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            registry.items.clear();
            registry.removed.clear();
        });
    }
}

#[cfg(test)]
#[path = "tests/element_register_tests.rs"]
mod tests;
