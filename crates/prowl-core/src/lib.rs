//! Prowl core: a resumable, depth-first walk over a live view hierarchy.
//!
//! The engine linearizes a mutating, possibly virtualized tree into a
//! deterministic visitation order, applies registered actions to each node
//! before descending into its children, and survives scroll-induced
//! re-layout by suspending and later retracing its recorded branch chain.
//!
//! Everything the engine needs from the UI toolkit goes through the
//! [`HostTree`] trait, so a walk can run against a scripted tree with no
//! live UI behind it.

pub mod action;
pub mod collections;
mod context;
pub mod error;
pub mod explorer;
pub mod lifecycle;
pub mod tree;

pub use action::{Action, ActionResult, Verdict, ViewCallbacks, ViewDetails};
pub use error::ExploreError;
pub use explorer::{HierarchyExplorer, WalkStatus};
pub use lifecycle::{
    monitor_scopes, LifecycleEvent, LifecycleObserver, LogObserver, ScopeRegistry,
};
pub use tree::{HostTree, NodeId, NodeKind};
