//! Walk failure type.

use std::fmt;

use crate::tree::NodeId;

/// An action callback failed. The walk stops where it stood; the chains
/// pinpoint the node for diagnosis.
#[derive(Debug)]
pub struct ExploreError {
    /// Label of the action whose callback failed.
    pub action: &'static str,
    /// Node the action was being invoked on.
    pub node: NodeId,
    /// Ancestor chain at the time of failure.
    pub ancestors: Vec<NodeId>,
    /// Branch chain at the time of failure.
    pub branches: Vec<usize>,
    /// The callback's own error.
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl fmt::Display for ExploreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "action {} failed on node {} (branch path {:?}): {}",
            self.action, self.node, self.branches, self.source
        )
    }
}

impl std::error::Error for ExploreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
