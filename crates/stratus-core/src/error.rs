//! Construction errors for the diagram model.

use thiserror::Error;

use crate::semantic::{ClusterId, NodeId};

/// Errors raised while declaring a diagram.
///
/// These are reported before anything is handed to the rendering engine, so a
/// failed construction never produces an output file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("node {0} does not belong to this diagram")]
    UnknownNode(NodeId),

    #[error("cluster {0} does not belong to this diagram")]
    UnknownCluster(ClusterId),

    #[error("cluster label must not be blank")]
    BlankClusterLabel,

    #[error("`{operation}` needs at least {required} node(s), got {actual}")]
    TooFewEndpoints {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
}
