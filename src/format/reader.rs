//! Reads JSON fixture documents into in-memory graphs.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphBuilder};
use crate::types::{GraphError, GraphResult};

use super::Adjacency;

/// A set of named graphs, as stored in one fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureSet {
    graphs: BTreeMap<String, Adjacency>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a fixture file.
    pub fn read_from_file(path: &Path) -> GraphResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_from(std::io::BufReader::new(file))
    }

    /// Read from any reader.
    pub fn read_from(reader: impl Read) -> GraphResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Graph names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Raw adjacency of the named graph.
    pub fn adjacency(&self, name: &str) -> GraphResult<&Adjacency> {
        self.graphs
            .get(name)
            .ok_or_else(|| GraphError::GraphNotFound(name.to_string()))
    }

    /// Build the named graph.
    pub fn graph(&self, name: &str) -> GraphResult<Graph> {
        graph_from_adjacency(self.adjacency(name)?)
    }

    /// Add or replace a named graph.
    pub fn insert(&mut self, name: impl Into<String>, adjacency: Adjacency) {
        self.graphs.insert(name.into(), adjacency);
    }

    pub(crate) fn graphs(&self) -> &BTreeMap<String, Adjacency> {
        &self.graphs
    }
}

/// Build a graph from a nested adjacency map.
///
/// Every node named as a source or a neighbor is created once, with the
/// default payload.
pub fn graph_from_adjacency<T: Default>(adjacency: &Adjacency) -> GraphResult<Graph<T>> {
    let mut builder = GraphBuilder::new();
    for (src, neighbors) in adjacency {
        builder.node(src.clone());
        for (tgt, weight) in neighbors {
            builder.edge(src.clone(), tgt.clone(), *weight);
        }
    }
    let graph = builder.build()?;
    log::debug!(
        "loaded graph with {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
