//! Scripted scope-lifecycle source.

use std::cell::RefCell;

use prowl_core::{LifecycleEvent, LifecycleObserver, ScopeRegistry};

/// A [`ScopeRegistry`] that dispatches events on demand, standing in for a
/// host's fragment/screen lifecycle plumbing.
#[derive(Default)]
pub struct FakeScopes {
    observers: RefCell<Vec<Box<dyn LifecycleObserver>>>,
}

impl FakeScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one event to every registered observer.
    pub fn emit(&self, type_name: &str, event: LifecycleEvent, nested: bool) {
        for observer in self.observers.borrow().iter() {
            observer.on_lifecycle_event(type_name, event, nested);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl ScopeRegistry for FakeScopes {
    fn register_lifecycle_observer(&self, observer: Box<dyn LifecycleObserver>) {
        self.observers.borrow_mut().push(observer);
    }
}
