//! The resumable depth-first hierarchy walk.
//!
//! Actions run on a node before the walk descends into its children. When a
//! virtual list needs an off-screen item, the walk asks the host to scroll,
//! hands control back to the event loop, and retraces its branch chain once
//! the host reports the next layout as settled, without re-invoking anything
//! it already did on the way down.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::{Action, Verdict, ViewCallbacks, ViewDetails};
use crate::context::TraversalContext;
use crate::error::ExploreError;
use crate::tree::{HostTree, NodeId, NodeKind};

/// Outcome of a single `start`/`resume_from_last_view` pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Every reachable node was visited and the end callback has run.
    Completed,
    /// An action asked the walk to stop. The walk is over for good; a
    /// suspended position cannot be resumed out of an abort.
    Aborted,
    /// A virtual list needs a scroll. The walk resumes by itself after the
    /// next layout settles.
    Suspended,
}

/// Result of one recursive visit.
///
/// Splits the two conditions that bubble up the recursion besides plain
/// progress: an action-requested abort and a scroll-induced suspension.
/// Collapsing these into one value is what made the walk ambiguous to
/// resume, so they stay distinct all the way up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    Continue,
    Abort,
    Suspended,
}

struct ExplorerState<T> {
    tree: Rc<T>,
    root: NodeId,
    actions: Vec<Action<T>>,
    ctx: TraversalContext,
    on_end: Option<Box<dyn FnMut()>>,
    aborted: bool,
    complete: bool,
    change_listener_installed: bool,
}

/// Cheaply cloneable handle to one walk in flight.
///
/// Clones share the same walk state; the engine hands a clone of itself to
/// the host's layout-settled notification so a suspended walk can pick
/// itself back up.
pub struct HierarchyExplorer<T> {
    state: Rc<RefCell<ExplorerState<T>>>,
}

impl<T> Clone for HierarchyExplorer<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: HostTree + 'static> HierarchyExplorer<T> {
    /// Engine over `tree`, walking from `root`, with the canonical
    /// three-hook callbacks. `on_end` runs exactly once, when the walk has
    /// fully completed (not merely suspended).
    pub fn new(
        tree: Rc<T>,
        root: NodeId,
        callbacks: ViewCallbacks<T>,
        on_end: impl FnMut() + 'static,
    ) -> Self {
        Self::with_actions(tree, root, callbacks.into_actions(), on_end)
    }

    /// Engine with a custom ordered action list.
    pub fn with_actions(
        tree: Rc<T>,
        root: NodeId,
        actions: Vec<Action<T>>,
        on_end: impl FnMut() + 'static,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(ExplorerState {
                tree,
                root,
                actions,
                ctx: TraversalContext::new(),
                on_end: Some(Box::new(on_end)),
                aborted: false,
                complete: false,
                change_listener_installed: false,
            })),
        }
    }

    /// Starts the walk from the root with empty chains.
    pub fn start(&self) -> Result<WalkStatus, ExploreError> {
        self.install_change_listener();
        self.run_pass()
    }

    /// Re-runs the walk, retracing the branch chain captured at suspension
    /// before taking any new action.
    ///
    /// The engine schedules this itself when it suspends; calling it on an
    /// aborted or completed walk is a no-op reporting that state.
    pub fn resume_from_last_view(&self) -> Result<WalkStatus, ExploreError> {
        {
            let mut state = self.state.borrow_mut();
            if state.aborted {
                return Ok(WalkStatus::Aborted);
            }
            if state.complete {
                return Ok(WalkStatus::Completed);
            }
            state.ctx.begin_resume();
        }
        self.run_pass()
    }

    /// Branch chain snapshot: the child index taken at each depth to reach
    /// the current position.
    pub fn branch_chain(&self) -> Vec<usize> {
        self.state.borrow().ctx.branch_chain.to_vec()
    }

    /// Ancestor chain snapshot for the current position.
    pub fn ancestor_chain(&self) -> Vec<NodeId> {
        self.state.borrow().ctx.view_chain.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().complete
    }

    pub fn is_aborted(&self) -> bool {
        self.state.borrow().aborted
    }

    fn install_change_listener(&self) {
        let tree = {
            let mut state = self.state.borrow_mut();
            if state.change_listener_installed {
                return;
            }
            state.change_listener_installed = true;
            Rc::clone(&state.tree)
        };
        // Diagnostic only: a change the walk did not cause means the host
        // moved under us, and any mismatch surfaces later as a warn.
        tree.add_change_listener(Box::new(|| {
            log::debug!("layout changed outside the walk");
        }));
    }

    fn run_pass(&self) -> Result<WalkStatus, ExploreError> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            if state.aborted {
                return Ok(WalkStatus::Aborted);
            }
            if state.complete {
                return Ok(WalkStatus::Completed);
            }
            let state = &mut *state;
            let tree = Rc::clone(&state.tree);
            let root = state.root;
            let mut walk = Walk {
                tree: &tree,
                actions: &mut state.actions,
                ctx: &mut state.ctx,
                explorer: self,
            };
            walk.visit(root)
        };

        match outcome {
            Ok(Visit::Continue) => {
                let on_end = {
                    let mut state = self.state.borrow_mut();
                    state.complete = true;
                    state.on_end.take()
                };
                if let Some(mut on_end) = on_end {
                    on_end();
                }
                Ok(WalkStatus::Completed)
            }
            Ok(Visit::Abort) => {
                self.state.borrow_mut().aborted = true;
                Ok(WalkStatus::Aborted)
            }
            Ok(Visit::Suspended) => Ok(WalkStatus::Suspended),
            Err(err) => {
                // Fail fast: a broken action leaves the walk unresumable.
                self.state.borrow_mut().aborted = true;
                Err(err)
            }
        }
    }
}

struct Walk<'a, T: HostTree + 'static> {
    tree: &'a Rc<T>,
    actions: &'a mut Vec<Action<T>>,
    ctx: &'a mut TraversalContext,
    explorer: &'a HierarchyExplorer<T>,
}

impl<T: HostTree + 'static> Walk<'_, T> {
    fn visit(&mut self, node: NodeId) -> Result<Visit, ExploreError> {
        let resuming = self.ctx.is_resuming();

        if !resuming {
            for index in 0..self.actions.len() {
                if self.ctx.actions_taken.contains(&index) {
                    continue;
                }
                if !self.actions[index].matches(self.tree, node) {
                    continue;
                }
                self.ctx.actions_taken.insert(index);
                let label = self.actions[index].label();
                let details = ViewDetails {
                    node,
                    ancestors: self.ctx.view_chain.as_slice(),
                    branches: self.ctx.branch_chain.as_slice(),
                };
                match self.actions[index].invoke(self.tree, details) {
                    Ok(Verdict::Continue) => {}
                    Ok(Verdict::Stop) => {
                        log::debug!(
                            "action {label} stopped the walk at {}",
                            self.tree.node_label(node)
                        );
                        return Ok(Visit::Abort);
                    }
                    Err(source) => {
                        return Err(ExploreError {
                            action: label,
                            node,
                            ancestors: self.ctx.view_chain.clone(),
                            branches: self.ctx.branch_chain.to_vec(),
                            source,
                        });
                    }
                }
            }

            // Done with this node itself; from here on it is an ancestor.
            self.ctx.actions_taken.clear();
            self.ctx.view_chain.push(node);
        }

        let outcome = match self.tree.kind(node) {
            NodeKind::VirtualList => self.visit_virtual_list(node)?,
            NodeKind::Container => self.visit_container(node)?,
            NodeKind::Leaf => Visit::Continue,
        };
        if outcome != Visit::Continue {
            // Abort or suspension: the chains stay exactly as they are.
            return Ok(outcome);
        }

        if let Some(position) = self.ctx.view_chain.iter().rposition(|&entry| entry == node) {
            self.ctx.view_chain.remove(position);
        }
        Ok(Visit::Continue)
    }

    fn visit_container(&mut self, node: NodeId) -> Result<Visit, ExploreError> {
        let resume_index = self.ctx.next_resume_index();
        let child_count = self.tree.child_count(node);
        if let Some(resume) = resume_index {
            if resume >= child_count {
                log::warn!(
                    "resume index {resume} out of range for {} ({child_count} children); \
                     the hierarchy changed while suspended",
                    self.tree.node_label(node)
                );
            }
        }

        for index in resume_index.unwrap_or(0)..child_count {
            // The consumed resume entry is already on the branch chain from
            // before the suspension.
            if resume_index != Some(index) {
                self.ctx.branch_chain.push(index);
            }
            let Some(child) = self.tree.child_at(node, index) else {
                log::warn!(
                    "child {index} of {} vanished mid-walk",
                    self.tree.node_label(node)
                );
                if resume_index != Some(index) {
                    self.ctx.branch_chain.pop();
                }
                continue;
            };
            let outcome = self.visit(child)?;
            if outcome != Visit::Continue {
                return Ok(outcome);
            }
            self.ctx.branch_chain.pop();
        }
        Ok(Visit::Continue)
    }

    fn visit_virtual_list(&mut self, list: NodeId) -> Result<Visit, ExploreError> {
        // A list with no data source walks like a leaf.
        let Some(item_count) = self.tree.item_count(list) else {
            return Ok(Visit::Continue);
        };

        let resume_index = self.ctx.next_resume_index();
        if let Some(resume) = resume_index {
            if resume >= item_count {
                log::warn!(
                    "resume index {resume} out of range for {} ({item_count} items); \
                     the hierarchy changed while suspended",
                    self.tree.node_label(list)
                );
            }
        }

        for index in resume_index.unwrap_or(0)..item_count {
            if resume_index != Some(index) {
                self.ctx.branch_chain.push(index);
            }
            match self.tree.realized_child(list, index) {
                Some(item) => {
                    let outcome = self.visit(item)?;
                    if outcome != Visit::Continue {
                        return Ok(outcome);
                    }
                    self.ctx.branch_chain.pop();
                }
                None => {
                    // Bring the item on screen and hand control back to the
                    // event loop. The branch chain keeps this exact
                    // position; the settle callback walks us back to it.
                    log::debug!(
                        "item {index} of {} not realized; scrolling and suspending",
                        self.tree.node_label(list)
                    );
                    self.tree.scroll_to_index(list, index);
                    let explorer = self.explorer.clone();
                    self.tree.on_next_layout_settled(Box::new(move || {
                        if let Err(err) = explorer.resume_from_last_view() {
                            log::error!("resume after layout settled failed: {err}");
                        }
                    }));
                    return Ok(Visit::Suspended);
                }
            }
        }
        Ok(Visit::Continue)
    }
}
