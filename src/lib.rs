//! graphkit: in-memory weighted directed graph.
//!
//! A thread-safe node/edge store with mirrored outgoing and incoming
//! adjacency indexes, plus breadth-first and depth-first traversal and
//! Dijkstra single-source shortest paths on top of it.

pub mod cli;
pub mod engine;
pub mod format;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{dijkstra, shortest_paths, ShortestPaths};
pub use format::{graph_from_adjacency, to_adjacency, Adjacency, FixtureSet, FixtureWriter};
pub use graph::{bfs, dfs, Graph, GraphBuilder};
pub use types::{Edge, GraphError, GraphResult, Id, Node};
