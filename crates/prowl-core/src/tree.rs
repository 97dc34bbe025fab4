//! Host tree abstraction.
//!
//! The engine never owns the hierarchy it walks. Child access, interactivity
//! predicates, click dispatch and the asynchronous scroll/settle surface of
//! the toolkit are all reached through [`HostTree`].

/// Opaque handle to a position in the host tree.
///
/// Nodes are created, recycled and destroyed by the host; the engine only
/// reads them and invokes actions on them.
pub type NodeId = usize;

/// How a node participates in child traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// No children.
    Leaf,
    /// Ordered children, all realized at all times.
    Container,
    /// A container that only materializes a window of its logical items and
    /// scrolls the rest in on demand.
    VirtualList,
}

/// Capability surface the engine consumes from the UI toolkit.
///
/// Implementations are expected to be single-threaded; every method is
/// called from the thread driving the walk.
pub trait HostTree {
    fn kind(&self, node: NodeId) -> NodeKind;

    /// Number of realized children of a regular container. Zero for leaves.
    fn child_count(&self, node: NodeId) -> usize;

    /// Realized child at `index`, or `None` if the hierarchy changed since
    /// `child_count` was read.
    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId>;

    fn is_clickable(&self, node: NodeId) -> bool;

    fn is_long_clickable(&self, node: NodeId) -> bool;

    /// Dispatches a click. Returns whether the host reported it as handled.
    fn perform_click(&self, node: NodeId) -> bool;

    /// Dispatches a long-click. Returns whether the host reported it as
    /// handled.
    fn perform_long_click(&self, node: NodeId) -> bool;

    /// Logical item count of a virtual list, or `None` while the list has no
    /// data source attached.
    fn item_count(&self, list: NodeId) -> Option<usize>;

    /// Realized node for a logical item index, or `None` while the item is
    /// off-screen.
    fn realized_child(&self, list: NodeId, index: usize) -> Option<NodeId>;

    /// Asks the host to bring item `index` into the realized window. Takes
    /// effect asynchronously, before the next layout settles.
    fn scroll_to_index(&self, list: NodeId, index: usize);

    /// One-shot notification after the next layout pass settles.
    ///
    /// The callback must not be invoked synchronously from inside this call;
    /// it runs later, from the host event loop.
    fn on_next_layout_settled(&self, callback: Box<dyn FnOnce()>);

    /// Persistent listener for layout changes the walk did not cause.
    /// Diagnostic only.
    fn add_change_listener(&self, listener: Box<dyn Fn()>);

    /// Human-readable label for diagnostics.
    fn node_label(&self, node: NodeId) -> String {
        format!("#{node}")
    }
}
