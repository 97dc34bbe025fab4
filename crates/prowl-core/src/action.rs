//! Action registration and the record handed to callbacks.
//!
//! Actions are declared once, in order, when the engine is built. Each one
//! pairs a qualifier (does this action apply to this node?) with a callback
//! that runs before the walk descends into the node's children.

use crate::tree::{HostTree, NodeId};

/// What an action wants the walk to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Keep walking.
    Continue,
    /// Abort the entire walk. Nothing else is visited and the end callback
    /// never runs.
    Stop,
}

/// Callback result. An `Err` fails the walk fast; the engine wraps it with
/// the position it happened at.
pub type ActionResult = Result<Verdict, Box<dyn std::error::Error + Send + Sync>>;

/// Position record handed to an action callback.
#[derive(Clone, Copy, Debug)]
pub struct ViewDetails<'a> {
    /// The node the action is being invoked on.
    pub node: NodeId,
    /// Nodes from the root down to (not including) `node`.
    pub ancestors: &'a [NodeId],
    /// Child index taken at each depth to reach `node`.
    pub branches: &'a [usize],
}

type Qualifier<T> = Box<dyn Fn(&T, NodeId) -> bool>;
type Callback<T> = Box<dyn FnMut(&T, ViewDetails<'_>) -> ActionResult>;

/// A (qualifier, callback) pair in the engine's ordered action list.
pub struct Action<T> {
    label: &'static str,
    qualifier: Qualifier<T>,
    callback: Callback<T>,
}

impl<T: HostTree> Action<T> {
    pub fn new(
        label: &'static str,
        qualifier: impl Fn(&T, NodeId) -> bool + 'static,
        callback: impl FnMut(&T, ViewDetails<'_>) -> ActionResult + 'static,
    ) -> Self {
        Self {
            label,
            qualifier: Box::new(qualifier),
            callback: Box::new(callback),
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn matches(&self, tree: &T, node: NodeId) -> bool {
        (self.qualifier)(tree, node)
    }

    pub(crate) fn invoke(&mut self, tree: &T, details: ViewDetails<'_>) -> ActionResult {
        (self.callback)(tree, details)
    }
}

/// The canonical three-hook registration: every view, clickable views,
/// long-clickable views, applied in that order. Hooks left unset simply
/// don't register an action.
pub struct ViewCallbacks<T> {
    on_view: Option<Callback<T>>,
    on_clickable_view: Option<Callback<T>>,
    on_long_clickable_view: Option<Callback<T>>,
}

impl<T: HostTree> ViewCallbacks<T> {
    pub fn new() -> Self {
        Self {
            on_view: None,
            on_clickable_view: None,
            on_long_clickable_view: None,
        }
    }

    /// Runs on every node.
    pub fn on_view(
        mut self,
        callback: impl FnMut(&T, ViewDetails<'_>) -> ActionResult + 'static,
    ) -> Self {
        self.on_view = Some(Box::new(callback));
        self
    }

    /// Runs on nodes the host reports as clickable.
    pub fn on_clickable_view(
        mut self,
        callback: impl FnMut(&T, ViewDetails<'_>) -> ActionResult + 'static,
    ) -> Self {
        self.on_clickable_view = Some(Box::new(callback));
        self
    }

    /// Runs on nodes the host reports as long-clickable.
    pub fn on_long_clickable_view(
        mut self,
        callback: impl FnMut(&T, ViewDetails<'_>) -> ActionResult + 'static,
    ) -> Self {
        self.on_long_clickable_view = Some(Box::new(callback));
        self
    }

    /// Fuzzing preset: click everything clickable and long-click everything
    /// long-clickable, logging each dispatch.
    pub fn clicking() -> Self {
        Self::new()
            .on_clickable_view(|tree: &T, details| {
                let handled = tree.perform_click(details.node);
                log::debug!(
                    "clicked {} (handled: {handled})",
                    tree.node_label(details.node)
                );
                Ok(Verdict::Continue)
            })
            .on_long_clickable_view(|tree: &T, details| {
                let handled = tree.perform_long_click(details.node);
                log::debug!(
                    "long-clicked {} (handled: {handled})",
                    tree.node_label(details.node)
                );
                Ok(Verdict::Continue)
            })
    }

    pub(crate) fn into_actions(self) -> Vec<Action<T>> {
        let mut actions = Vec::new();
        if let Some(callback) = self.on_view {
            actions.push(Action {
                label: "on_view",
                qualifier: Box::new(|_, _| true),
                callback,
            });
        }
        if let Some(callback) = self.on_clickable_view {
            actions.push(Action {
                label: "on_clickable_view",
                qualifier: Box::new(|tree: &T, node| tree.is_clickable(node)),
                callback,
            });
        }
        if let Some(callback) = self.on_long_clickable_view {
            actions.push(Action {
                label: "on_long_clickable_view",
                qualifier: Box::new(|tree: &T, node| tree.is_long_clickable(node)),
                callback,
            });
        }
        actions
    }
}

impl<T: HostTree> Default for ViewCallbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}
