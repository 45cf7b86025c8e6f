//! Graph algorithms that read a [`Graph`](crate::graph::Graph) without mutating it.

pub mod shortest_path;

pub use shortest_path::{dijkstra, shortest_paths, ShortestPaths};
