//! Single-source shortest paths (Dijkstra) over non-negative weights.

use std::collections::HashMap;

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, Id};

/// Result of a shortest-path search: final distances plus the predecessor of
/// each node on one shortest route from the start.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: Id,
    distances: HashMap<Id, f64>,
    previous: HashMap<Id, Id>,
}

impl ShortestPaths {
    pub fn start(&self) -> &Id {
        &self.start
    }

    /// Minimum distance from the start to `id`.
    pub fn distance(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    pub fn distances(&self) -> &HashMap<Id, f64> {
        &self.distances
    }

    pub fn into_distances(self) -> HashMap<Id, f64> {
        self.distances
    }

    /// Nodes on a shortest route from the start to `id`, both ends included.
    pub fn path_to(&self, id: &str) -> Option<Vec<Id>> {
        let (mut current, _) = self.distances.get_key_value(id)?;
        let mut path = vec![current.clone()];
        while *current != self.start {
            current = self.previous.get(current)?;
            path.push(current.clone());
        }
        path.reverse();
        Some(path)
    }
}

/// Minimum distance from `start_id` to every node of `graph`.
///
/// Every node must be reachable: if the search runs out of finite distances
/// while nodes remain, it fails with [`GraphError::InfiniteDistance`] instead
/// of returning a partial map.
pub fn dijkstra<T>(graph: &Graph<T>, start_id: &str) -> GraphResult<HashMap<Id, f64>> {
    shortest_paths(graph, start_id).map(ShortestPaths::into_distances)
}

/// Like [`dijkstra`], also recording predecessors for path reconstruction.
///
/// Among equal tentative distances the smallest ID is finalized first.
pub fn shortest_paths<T>(graph: &Graph<T>, start_id: &str) -> GraphResult<ShortestPaths> {
    if !graph.contains_node(start_id) {
        return Err(GraphError::NodeNotFound(Id::from(start_id)));
    }
    let start = Id::from(start_id);
    log::debug!("dijkstra from {}", start);

    let mut tentative: HashMap<Id, f64> = graph
        .node_ids()
        .into_iter()
        .map(|id| (id, f64::INFINITY))
        .collect();
    tentative.insert(start.clone(), 0.0);

    let mut distances: HashMap<Id, f64> = HashMap::with_capacity(tentative.len());
    let mut previous: HashMap<Id, Id> = HashMap::new();

    while let Some((current, dist)) = closest(&tentative) {
        if dist == f64::INFINITY {
            log::warn!(
                "dijkstra from {}: {} node(s) unreachable, first is {}",
                start,
                tentative.len(),
                current
            );
            return Err(GraphError::InfiniteDistance(current));
        }

        tentative.remove(&current);
        distances.insert(current.clone(), dist);

        let weights = match graph.target_weights(current.as_str()) {
            Ok(weights) => weights,
            Err(e) => {
                log::warn!("dijkstra: no adjacency for {}: {}", current, e);
                continue;
            }
        };

        for (target, weight) in weights {
            // Finalized targets are gone from `tentative`, so they are skipped here too.
            let Some(best) = tentative.get_mut(&target) else {
                continue;
            };
            let candidate = dist + weight;
            if candidate < *best {
                *best = candidate;
                previous.insert(target, current.clone());
            }
        }
    }

    log::debug!("dijkstra from {} finalized {} nodes", start, distances.len());
    Ok(ShortestPaths {
        start,
        distances,
        previous,
    })
}

/// The pending node with the smallest tentative distance, ties by smallest ID.
fn closest(tentative: &HashMap<Id, f64>) -> Option<(Id, f64)> {
    tentative
        .iter()
        .min_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(id, dist)| (id.clone(), *dist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn ties_finalize_smallest_id_first() {
        let mut tentative = HashMap::new();
        tentative.insert(Id::from("b"), 1.0);
        tentative.insert(Id::from("a"), 1.0);
        tentative.insert(Id::from("c"), 0.5);
        assert_eq!(closest(&tentative), Some((Id::from("c"), 0.5)));
        tentative.remove("c");
        assert_eq!(closest(&tentative), Some((Id::from("a"), 1.0)));
    }

    #[test]
    fn sink_node_does_not_end_search() {
        // A -> B (sink), A -> C -> D: B is finalized first and has no targets.
        let mut builder = GraphBuilder::<()>::new();
        builder
            .edge("A", "B", 1.0)
            .edge("A", "C", 2.0)
            .edge("C", "D", 2.0);
        let graph = builder.build().unwrap();
        let dist = dijkstra(&graph, "A").unwrap();
        assert_eq!(dist.len(), 4);
        assert_eq!(dist["D"], 4.0);
    }

    #[test]
    fn path_to_start_is_single_node() {
        let mut builder = GraphBuilder::<()>::new();
        builder.edge("A", "B", 1.0);
        let graph = builder.build().unwrap();
        let paths = shortest_paths(&graph, "A").unwrap();
        assert_eq!(paths.path_to("A"), Some(vec![Id::from("A")]));
        assert_eq!(paths.path_to("B"), Some(vec![Id::from("A"), Id::from("B")]));
        assert_eq!(paths.path_to("missing"), None);
    }
}
