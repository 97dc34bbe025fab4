//! Scripted in-memory host tree.
//!
//! Nodes are declared up front; virtual lists realize a sliding window of
//! their items; scrolls are recorded immediately but only move the window at
//! the next [`FakeTree::settle_layout`], which then drains the one-shot
//! settle callbacks: the same deferred order a real toolkit gives the walk.

use std::cell::RefCell;

use prowl_core::{HostTree, NodeId, NodeKind};

/// Which click primitive a node received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    Click,
    LongClick,
}

enum FakeNodeKind {
    Leaf,
    Container { children: Vec<NodeId> },
    VirtualList {
        /// Logical items in order; `None` means no data source attached.
        items: Option<Vec<NodeId>>,
        window_start: usize,
        window_size: usize,
    },
}

struct FakeNode {
    label: String,
    clickable: bool,
    long_clickable: bool,
    kind: FakeNodeKind,
}

#[derive(Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    clicks: Vec<(NodeId, ClickKind)>,
    scroll_requests: Vec<(NodeId, usize)>,
    pending_scrolls: Vec<(NodeId, usize)>,
    settle_callbacks: Vec<Box<dyn FnOnce()>>,
    change_listeners: Vec<Box<dyn Fn()>>,
}

/// Deterministic [`HostTree`] stand-in.
#[derive(Default)]
pub struct FakeTree {
    state: RefCell<FakeState>,
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&self, node: FakeNode) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(node);
        state.nodes.len() - 1
    }

    pub fn leaf(&self, label: &str) -> NodeId {
        self.interactive_leaf(label, false, false)
    }

    pub fn clickable_leaf(&self, label: &str) -> NodeId {
        self.interactive_leaf(label, true, false)
    }

    pub fn interactive_leaf(&self, label: &str, clickable: bool, long_clickable: bool) -> NodeId {
        self.add_node(FakeNode {
            label: label.to_owned(),
            clickable,
            long_clickable,
            kind: FakeNodeKind::Leaf,
        })
    }

    pub fn container(&self, label: &str, children: Vec<NodeId>) -> NodeId {
        self.add_node(FakeNode {
            label: label.to_owned(),
            clickable: false,
            long_clickable: false,
            kind: FakeNodeKind::Container { children },
        })
    }

    /// Virtual list realizing `window_size` items at a time, starting at
    /// item 0.
    pub fn virtual_list(&self, label: &str, items: Vec<NodeId>, window_size: usize) -> NodeId {
        self.add_node(FakeNode {
            label: label.to_owned(),
            clickable: false,
            long_clickable: false,
            kind: FakeNodeKind::VirtualList {
                items: Some(items),
                window_start: 0,
                window_size,
            },
        })
    }

    /// Virtual list with no data source: reports no item count at all.
    pub fn adapterless_list(&self, label: &str) -> NodeId {
        self.add_node(FakeNode {
            label: label.to_owned(),
            clickable: false,
            long_clickable: false,
            kind: FakeNodeKind::VirtualList {
                items: None,
                window_start: 0,
                window_size: 0,
            },
        })
    }

    /// Shrinks a virtual list's logical items, simulating a data source
    /// mutation behind a suspended walk.
    pub fn truncate_items(&self, list: NodeId, len: usize) {
        let mut state = self.state.borrow_mut();
        match &mut state.nodes[list].kind {
            FakeNodeKind::VirtualList {
                items: Some(items), ..
            } => items.truncate(len),
            _ => panic!("node {list} is not a virtual list with items"),
        }
    }

    /// Applies pending scrolls, then runs every one-shot settle callback
    /// registered so far. Returns how many callbacks ran.
    pub fn settle_layout(&self) -> usize {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            let pending = std::mem::take(&mut state.pending_scrolls);
            for (list, index) in pending {
                if let FakeNodeKind::VirtualList {
                    items: Some(items),
                    window_start,
                    window_size,
                } = &mut state.nodes[list].kind
                {
                    // Bring `index` to the top of the window, clamped so the
                    // window stays within the data.
                    let max_start = items.len().saturating_sub(*window_size);
                    *window_start = index.min(max_start);
                }
            }
            std::mem::take(&mut state.settle_callbacks)
        };
        let count = callbacks.len();
        log::debug!("layout settled, running {count} one-shot callbacks");
        for callback in callbacks {
            callback();
        }
        count
    }

    pub fn has_pending_settles(&self) -> bool {
        !self.state.borrow().settle_callbacks.is_empty()
    }

    /// Fires every registered change listener, simulating a layout change
    /// the walk did not cause.
    pub fn fire_change_listeners(&self) {
        let listeners = std::mem::take(&mut self.state.borrow_mut().change_listeners);
        for listener in &listeners {
            listener();
        }
        self.state.borrow_mut().change_listeners.extend(listeners);
    }

    pub fn change_listener_count(&self) -> usize {
        self.state.borrow().change_listeners.len()
    }

    /// Every click and long-click dispatched so far, in order.
    pub fn clicks(&self) -> Vec<(NodeId, ClickKind)> {
        self.state.borrow().clicks.clone()
    }

    /// Every scroll request issued so far, in order.
    pub fn scroll_requests(&self) -> Vec<(NodeId, usize)> {
        self.state.borrow().scroll_requests.clone()
    }

    /// Item indices currently realized by a virtual list.
    pub fn realized_range(&self, list: NodeId) -> std::ops::Range<usize> {
        let state = self.state.borrow();
        match &state.nodes[list].kind {
            FakeNodeKind::VirtualList {
                items: Some(items),
                window_start,
                window_size,
            } => *window_start..(window_start + window_size).min(items.len()),
            _ => 0..0,
        }
    }
}

impl HostTree for FakeTree {
    fn kind(&self, node: NodeId) -> NodeKind {
        match self.state.borrow().nodes[node].kind {
            FakeNodeKind::Leaf => NodeKind::Leaf,
            FakeNodeKind::Container { .. } => NodeKind::Container,
            FakeNodeKind::VirtualList { .. } => NodeKind::VirtualList,
        }
    }

    fn child_count(&self, node: NodeId) -> usize {
        match &self.state.borrow().nodes[node].kind {
            FakeNodeKind::Container { children } => children.len(),
            _ => 0,
        }
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        match &self.state.borrow().nodes[node].kind {
            FakeNodeKind::Container { children } => children.get(index).copied(),
            _ => None,
        }
    }

    fn is_clickable(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node].clickable
    }

    fn is_long_clickable(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node].long_clickable
    }

    fn perform_click(&self, node: NodeId) -> bool {
        let mut state = self.state.borrow_mut();
        state.clicks.push((node, ClickKind::Click));
        state.nodes[node].clickable
    }

    fn perform_long_click(&self, node: NodeId) -> bool {
        let mut state = self.state.borrow_mut();
        state.clicks.push((node, ClickKind::LongClick));
        state.nodes[node].long_clickable
    }

    fn item_count(&self, list: NodeId) -> Option<usize> {
        match &self.state.borrow().nodes[list].kind {
            FakeNodeKind::VirtualList {
                items: Some(items), ..
            } => Some(items.len()),
            _ => None,
        }
    }

    fn realized_child(&self, list: NodeId, index: usize) -> Option<NodeId> {
        let state = self.state.borrow();
        match &state.nodes[list].kind {
            FakeNodeKind::VirtualList {
                items: Some(items),
                window_start,
                window_size,
            } => {
                if index >= *window_start && index < window_start + window_size {
                    items.get(index).copied()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn scroll_to_index(&self, list: NodeId, index: usize) {
        let mut state = self.state.borrow_mut();
        state.scroll_requests.push((list, index));
        state.pending_scrolls.push((list, index));
    }

    fn on_next_layout_settled(&self, callback: Box<dyn FnOnce()>) {
        self.state.borrow_mut().settle_callbacks.push(callback);
    }

    fn add_change_listener(&self, listener: Box<dyn Fn()>) {
        self.state.borrow_mut().change_listeners.push(listener);
    }

    fn node_label(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node].label.clone()
    }
}
