//! Core graph structure: node registry + two mirrored adjacency indexes behind one lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::types::{Edge, GraphError, GraphResult, Id, Node};

/// Adjacency rows keyed by node, each mapping a neighbor to the shared edge.
type Adjacency = HashMap<Id, HashMap<Id, Edge>>;

/// Everything guarded by the graph lock.
struct Inner<T> {
    /// All nodes, indexed by ID.
    nodes: HashMap<Id, T>,
    /// Outgoing index: source -> (target -> edge).
    targets: Adjacency,
    /// Incoming index: target -> (source -> edge). Same `Edge` handles as `targets`.
    sources: Adjacency,
}

impl<T> Inner<T> {
    fn require(&self, id: &str) -> GraphResult<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(Id::from(id)))
        }
    }

    fn edge(&self, src: &str, tgt: &str) -> Option<&Edge> {
        self.targets.get(src).and_then(|row| row.get(tgt))
    }
}

impl<T: Clone> Inner<T> {
    /// Resolve every key of an adjacency row to a node snapshot.
    fn resolve(&self, row: Option<&HashMap<Id, Edge>>) -> HashMap<Id, Node<T>> {
        row.map(|row| {
            row.keys()
                .filter_map(|id| {
                    self.nodes
                        .get(id)
                        .map(|data| (id.clone(), Node::with_data(id.clone(), data.clone())))
                })
                .collect()
        })
        .unwrap_or_default()
    }
}

/// A weighted directed graph, safe to share between threads.
///
/// A single reader/writer lock covers the node registry and both adjacency
/// indexes, so readers never observe an edge present on one side only. Every
/// accessor copies what it returns while holding the read lock. Sequences of
/// calls are not atomic as a whole.
pub struct Graph<T = ()> {
    inner: RwLock<Inner<T>>,
}

impl<T> Graph<T> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                nodes: HashMap::with_capacity(node_count),
                targets: HashMap::with_capacity(node_count),
                sources: HashMap::with_capacity(node_count),
            }),
        }
    }

    // Mutations validate before touching state, so a panic cannot leave the
    // indexes half-updated and a poisoned lock is safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.read().nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.read().targets.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.read().nodes.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.read().nodes.contains_key(id)
    }

    pub fn contains_edge(&self, src: &str, tgt: &str) -> bool {
        self.read().edge(src, tgt).is_some()
    }

    /// Add a node. Fails without mutation if the ID is taken.
    pub fn add_node(&self, node: Node<T>) -> GraphResult<()> {
        let (id, data) = node.into_parts();
        let mut inner = self.write();
        if inner.nodes.contains_key(&id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        log::debug!("add node {}", id);
        inner.nodes.insert(id, data);
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn delete_node(&self, id: &str) -> GraphResult<()> {
        let mut inner = self.write();
        inner.require(id)?;

        inner.nodes.remove(id);
        let outgoing = inner.targets.remove(id).unwrap_or_default();
        let incoming = inner.sources.remove(id).unwrap_or_default();

        for row in inner.targets.values_mut() {
            row.remove(id);
        }
        for row in inner.sources.values_mut() {
            row.remove(id);
        }
        // Drop rows emptied by the cascade so no key outlives its last edge.
        inner.targets.retain(|_, row| !row.is_empty());
        inner.sources.retain(|_, row| !row.is_empty());

        log::debug!(
            "delete node {} ({} outgoing, {} incoming edges removed)",
            id,
            outgoing.len(),
            incoming.len()
        );
        Ok(())
    }

    /// Look up the edge `src --> tgt`.
    ///
    /// The returned handle shares its weight with the stored edge.
    pub fn get_edge(&self, src: &str, tgt: &str) -> GraphResult<Edge> {
        let inner = self.read();
        inner.require(src)?;
        inner.require(tgt)?;
        inner
            .edge(src, tgt)
            .cloned()
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: Id::from(src),
                to: Id::from(tgt),
            })
    }

    /// Add the edge `src --> tgt` to both indexes.
    pub fn add_edge(&self, src: &str, tgt: &str, edge: Edge) -> GraphResult<()> {
        let mut inner = self.write();
        inner.require(src)?;
        inner.require(tgt)?;

        let exists = inner.edge(src, tgt).is_some()
            || inner
                .sources
                .get(tgt)
                .is_some_and(|row| row.contains_key(src));
        if exists {
            return Err(GraphError::EdgeAlreadyExists {
                from: Id::from(src),
                to: Id::from(tgt),
            });
        }

        log::debug!("add edge {} -- {} --> {}", src, edge, tgt);
        inner
            .targets
            .entry(Id::from(src))
            .or_default()
            .insert(Id::from(tgt), edge.clone());
        inner
            .sources
            .entry(Id::from(tgt))
            .or_default()
            .insert(Id::from(src), edge);
        Ok(())
    }

    /// Remove the edge `src --> tgt`. Absent edges are not an error.
    pub fn delete_edge(&self, src: &str, tgt: &str) -> GraphResult<()> {
        let mut inner = self.write();
        inner.require(src)?;
        inner.require(tgt)?;

        let mut removed = false;
        if let Some(row) = inner.targets.get_mut(src) {
            removed |= row.remove(tgt).is_some();
            if row.is_empty() {
                inner.targets.remove(src);
            }
        }
        if let Some(row) = inner.sources.get_mut(tgt) {
            removed |= row.remove(src).is_some();
            if row.is_empty() {
                inner.sources.remove(tgt);
            }
        }

        if removed {
            log::debug!("delete edge {} --> {}", src, tgt);
        }
        Ok(())
    }

    /// Weights of every outgoing edge of `id`, keyed by target.
    pub fn target_weights(&self, id: &str) -> GraphResult<HashMap<Id, f64>> {
        let inner = self.read();
        inner.require(id)?;
        Ok(inner
            .targets
            .get(id)
            .map(|row| {
                row.iter()
                    .map(|(tgt, edge)| (tgt.clone(), edge.weight()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Every edge as a `(source, target, weight)` triple, sorted by endpoints.
    pub fn edges(&self) -> Vec<(Id, Id, f64)> {
        let inner = self.read();
        let mut edges: Vec<(Id, Id, f64)> = inner
            .targets
            .iter()
            .flat_map(|(src, row)| {
                row.iter()
                    .map(move |(tgt, edge)| (src.clone(), tgt.clone(), edge.weight()))
            })
            .collect();
        edges.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        edges
    }

    /// All node IDs, sorted.
    pub fn node_ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.read().nodes.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl<T: Clone> Graph<T> {
    /// Get a node by ID.
    pub fn get_node(&self, id: &str) -> GraphResult<Node<T>> {
        let inner = self.read();
        inner
            .nodes
            .get_key_value(id)
            .map(|(id, data)| Node::with_data(id.clone(), data.clone()))
            .ok_or_else(|| GraphError::NodeNotFound(Id::from(id)))
    }

    /// Direct predecessors of `id`.
    pub fn get_sources(&self, id: &str) -> GraphResult<HashMap<Id, Node<T>>> {
        let inner = self.read();
        inner.require(id)?;
        Ok(inner.resolve(inner.sources.get(id)))
    }

    /// Direct successors of `id`.
    pub fn get_targets(&self, id: &str) -> GraphResult<HashMap<Id, Node<T>>> {
        let inner = self.read();
        inner.require(id)?;
        Ok(inner.resolve(inner.targets.get(id)))
    }

    /// Snapshot of every node.
    pub fn all_nodes(&self) -> HashMap<Id, Node<T>> {
        self.read()
            .nodes
            .iter()
            .map(|(id, data)| (id.clone(), Node::with_data(id.clone(), data.clone())))
            .collect()
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per edge, `src -- weight --> tgt`, sorted by endpoints.
impl<T> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (src, tgt, weight) in self.edges() {
            writeln!(f, "{} -- {:.2} --> {}", src, weight, tgt)?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Graph {
        let graph = Graph::new();
        for id in ["A", "B", "C"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge("A", "B", Edge::new(1.0)).unwrap();
        graph.add_edge("B", "C", Edge::new(2.0)).unwrap();
        graph.add_edge("C", "A", Edge::new(3.0)).unwrap();
        graph
    }

    #[test]
    fn indexes_share_edge_handles() {
        let graph = abc();
        let inner = graph.read();
        let out = &inner.targets["A"]["B"];
        let inc = &inner.sources["B"]["A"];
        assert!(out.same_edge(inc));
    }

    #[test]
    fn delete_node_leaves_no_dangling_rows() {
        let graph = abc();
        graph.delete_node("B").unwrap();
        let inner = graph.read();
        assert!(!inner.targets.contains_key("B"));
        assert!(!inner.sources.contains_key("B"));
        for row in inner.targets.values().chain(inner.sources.values()) {
            assert!(!row.contains_key("B"));
        }
        // C --> A survives, A --> B and B --> C are gone.
        assert_eq!(inner.targets.len(), 1);
        assert_eq!(inner.sources.len(), 1);
    }

    #[test]
    fn delete_edge_drops_empty_rows() {
        let graph = abc();
        graph.delete_edge("A", "B").unwrap();
        let inner = graph.read();
        assert!(!inner.targets.contains_key("A"));
        assert!(!inner.sources.contains_key("B"));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let graph = std::sync::Arc::new(abc());
        let g = graph.clone();
        let _ = std::thread::spawn(move || {
            let _guard = g.write();
            panic!("poison the lock");
        })
        .join();
        assert!(graph.inner.is_poisoned());
        assert_eq!(graph.node_count(), 3);
        graph.add_node(Node::new("D")).unwrap();
        assert_eq!(graph.node_count(), 4);
    }
}
