//! Drive helpers for walks over a [`FakeTree`].

use std::cell::RefCell;
use std::rc::Rc;

use prowl_core::{NodeId, Verdict, ViewCallbacks};

use crate::fake_tree::FakeTree;

/// Settles layout repeatedly until no one-shot callbacks remain, letting a
/// suspended walk resume itself to completion.
///
/// Panics after `max_passes` so a walk that never stops suspending fails the
/// test instead of hanging it. Returns how many settle passes ran.
pub fn pump(tree: &FakeTree, max_passes: usize) -> usize {
    let mut passes = 0;
    while tree.has_pending_settles() {
        assert!(
            passes < max_passes,
            "walk did not settle within {max_passes} layout passes"
        );
        tree.settle_layout();
        passes += 1;
    }
    passes
}

/// Shared visit log plus ready-made callbacks that append to it.
#[derive(Clone, Default)]
pub struct Recorder {
    visits: Rc<RefCell<Vec<(NodeId, &'static str)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every (node, hook) invocation in order.
    pub fn visits(&self) -> Vec<(NodeId, &'static str)> {
        self.visits.borrow().clone()
    }

    /// Nodes that received the given hook, in order.
    pub fn nodes_for(&self, hook: &str) -> Vec<NodeId> {
        self.visits
            .borrow()
            .iter()
            .filter(|(_, h)| *h == hook)
            .map(|(node, _)| *node)
            .collect()
    }

    /// How many times the given hook ran on the given node.
    pub fn count(&self, node: NodeId, hook: &str) -> usize {
        self.visits
            .borrow()
            .iter()
            .filter(|(n, h)| *n == node && *h == hook)
            .count()
    }

    /// Callbacks recording all three hooks and always continuing.
    pub fn callbacks(&self) -> ViewCallbacks<FakeTree> {
        let on_view = Rc::clone(&self.visits);
        let on_clickable = Rc::clone(&self.visits);
        let on_long_clickable = Rc::clone(&self.visits);
        ViewCallbacks::new()
            .on_view(move |_tree, details| {
                on_view.borrow_mut().push((details.node, "on_view"));
                Ok(Verdict::Continue)
            })
            .on_clickable_view(move |_tree, details| {
                on_clickable
                    .borrow_mut()
                    .push((details.node, "on_clickable_view"));
                Ok(Verdict::Continue)
            })
            .on_long_clickable_view(move |_tree, details| {
                on_long_clickable
                    .borrow_mut()
                    .push((details.node, "on_long_clickable_view"));
                Ok(Verdict::Continue)
            })
    }
}
