//! Error types for the graphkit library.

use thiserror::Error;

use super::Id;

/// All errors that can occur in the graphkit library.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Node not found by ID.
    #[error("Node {0} not found")]
    NodeNotFound(Id),

    /// A node with this ID is already registered.
    #[error("Node {0} already exists")]
    NodeAlreadyExists(Id),

    /// Both endpoints exist but no edge connects them.
    #[error("Edge {from} --> {to} not found")]
    EdgeNotFound { from: Id, to: Id },

    /// An edge already connects this ordered pair.
    #[error("Edge {from} --> {to} already exists")]
    EdgeAlreadyExists { from: Id, to: Id },

    /// Shortest-path search ran out of reachable nodes while this one was still pending.
    #[error("Infinite distance: node {0} is unreachable from the start node")]
    InfiniteDistance(Id),

    /// Named graph missing from a fixture document.
    #[error("Graph {0:?} not found in fixture document")]
    GraphNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for graphkit operations.
pub type GraphResult<T> = Result<T, GraphError>;
