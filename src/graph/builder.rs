//! Fluent API for building Graph instances.

use std::collections::BTreeMap;

use crate::types::{Edge, GraphResult, Id, Node};

use super::Graph;

/// Fluent builder for constructing a [`Graph`].
///
/// Edges may name nodes that were never declared; those endpoints are created
/// with a default payload when the graph is built. Nodes are added before
/// edges, so declaration order does not matter.
pub struct GraphBuilder<T = ()> {
    nodes: BTreeMap<Id, T>,
    edges: Vec<(Id, Id, f64)>,
}

impl<T> GraphBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Declare a node with a payload. Redeclaring replaces the payload.
    pub fn node_with(&mut self, id: impl Into<Id>, data: T) -> &mut Self {
        self.nodes.insert(id.into(), data);
        self
    }

    /// Add an edge between two nodes.
    pub fn edge(&mut self, src: impl Into<Id>, tgt: impl Into<Id>, weight: f64) -> &mut Self {
        self.edges.push((src.into(), tgt.into(), weight));
        self
    }
}

impl<T: Default> GraphBuilder<T> {
    /// Declare a node with the default payload.
    pub fn node(&mut self, id: impl Into<Id>) -> &mut Self {
        self.nodes.entry(id.into()).or_default();
        self
    }

    /// Build the final Graph.
    ///
    /// Fails with `EdgeAlreadyExists` if the same ordered pair was linked twice.
    pub fn build(self) -> GraphResult<Graph<T>> {
        let Self { mut nodes, edges } = self;
        for (src, tgt, _) in &edges {
            nodes.entry(src.clone()).or_default();
            nodes.entry(tgt.clone()).or_default();
        }

        let graph = Graph::with_capacity(nodes.len());
        for (id, data) in nodes {
            graph.add_node(Node::with_data(id, data))?;
        }
        for (src, tgt, weight) in edges {
            graph.add_edge(src.as_str(), tgt.as_str(), Edge::new(weight))?;
        }
        Ok(graph)
    }
}

impl<T> Default for GraphBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
