//! Graph traversal algorithms (BFS, DFS).
//!
//! Both walks follow outgoing edges only and hand every newly reached node to
//! a visitor. Returning [`ControlFlow::Break`] from the visitor ends the walk
//! at once; the nodes visited so far are still returned.

use std::collections::{HashMap, HashSet, VecDeque};
use std::ops::ControlFlow;

use crate::types::{GraphError, GraphResult, Id, Node};

use super::Graph;

/// Targets of `id`, or nothing if the node vanished since it was discovered.
///
/// `get_targets` fails only with `NodeNotFound`, which mid-walk can only mean
/// a concurrent `delete_node`.
fn successors<T: Clone>(graph: &Graph<T>, id: &Id) -> HashMap<Id, Node<T>> {
    graph.get_targets(id.as_str()).unwrap_or_else(|e| {
        debug_assert!(matches!(e, GraphError::NodeNotFound(_)), "{}", e);
        log::warn!("node {} removed during traversal, skipping its targets", id);
        HashMap::new()
    })
}

/// Breadth-first traversal from `start_id`.
///
/// The start node is visited first. Each node's targets are visited in
/// unspecified order before any of them is expanded.
pub fn bfs<T, F>(graph: &Graph<T>, start_id: &str, mut visit: F) -> GraphResult<HashSet<Id>>
where
    T: Clone,
    F: FnMut(&Node<T>) -> ControlFlow<()>,
{
    let start = graph.get_node(start_id)?;
    log::debug!("bfs from {}", start_id);

    let mut visited: HashSet<Id> = HashSet::new();
    let mut queue: VecDeque<Id> = VecDeque::new();

    visited.insert(start.id().clone());
    if visit(&start).is_break() {
        return Ok(visited);
    }
    queue.push_back(start.id().clone());

    while let Some(current) = queue.pop_front() {
        for (id, node) in successors(graph, &current) {
            if visited.contains(&id) {
                continue;
            }
            visited.insert(id.clone());
            if visit(&node).is_break() {
                log::debug!("bfs stopped by visitor at {}", id);
                return Ok(visited);
            }
            queue.push_back(id);
        }
    }

    log::debug!("bfs from {} visited {} nodes", start_id, visited.len());
    Ok(visited)
}

/// Depth-first pre-order traversal from `start_id`.
///
/// Uses an explicit stack of pending siblings, so depth is bounded by heap
/// rather than call stack.
pub fn dfs<T, F>(graph: &Graph<T>, start_id: &str, mut visit: F) -> GraphResult<HashSet<Id>>
where
    T: Clone,
    F: FnMut(&Node<T>) -> ControlFlow<()>,
{
    let start = graph.get_node(start_id)?;
    log::debug!("dfs from {}", start_id);

    let mut visited: HashSet<Id> = HashSet::new();

    visited.insert(start.id().clone());
    if visit(&start).is_break() {
        return Ok(visited);
    }

    // Each frame holds the targets of one node on the current path that have
    // not been tried yet. Visited checks happen when a target is popped, since
    // a deeper branch may have reached it in the meantime.
    let mut stack: Vec<Vec<Node<T>>> = vec![frame(graph, start.id())];

    while let Some(pending) = stack.last_mut() {
        let Some(node) = pending.pop() else {
            stack.pop();
            continue;
        };
        if visited.contains(node.id()) {
            continue;
        }
        visited.insert(node.id().clone());
        if visit(&node).is_break() {
            log::debug!("dfs stopped by visitor at {}", node.id());
            return Ok(visited);
        }
        stack.push(frame(graph, node.id()));
    }

    log::debug!("dfs from {} visited {} nodes", start_id, visited.len());
    Ok(visited)
}

fn frame<T: Clone>(graph: &Graph<T>, id: &Id) -> Vec<Node<T>> {
    successors(graph, id).into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edge;

    fn chain(n: usize) -> Graph {
        let graph = Graph::new();
        for i in 0..n {
            graph.add_node(Node::new(format!("n{}", i))).unwrap();
        }
        for i in 1..n {
            graph
                .add_edge(&format!("n{}", i - 1), &format!("n{}", i), Edge::new(1.0))
                .unwrap();
        }
        graph
    }

    #[test]
    fn dfs_deep_chain_does_not_recurse() {
        let graph = chain(50_000);
        let visited = dfs(&graph, "n0", |_| ControlFlow::Continue(())).unwrap();
        assert_eq!(visited.len(), 50_000);
    }

    #[test]
    fn dfs_on_chain_is_preorder() {
        let graph = chain(5);
        let mut order = Vec::new();
        dfs(&graph, "n0", |n| {
            order.push(n.id().to_string());
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(order, vec!["n0", "n1", "n2", "n3", "n4"]);
    }

    #[test]
    fn bfs_levels_come_in_order() {
        // root -> {a, b}, a -> c, b -> d
        let graph = Graph::new();
        for id in ["root", "a", "b", "c", "d"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge("root", "a", Edge::new(1.0)).unwrap();
        graph.add_edge("root", "b", Edge::new(1.0)).unwrap();
        graph.add_edge("a", "c", Edge::new(1.0)).unwrap();
        graph.add_edge("b", "d", Edge::new(1.0)).unwrap();

        let mut order = Vec::new();
        bfs(&graph, "root", |n| {
            order.push(n.id().to_string());
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_eq!(order[0], "root");
        let level1: HashSet<&str> = order[1..3].iter().map(String::as_str).collect();
        let level2: HashSet<&str> = order[3..5].iter().map(String::as_str).collect();
        assert_eq!(level1, HashSet::from(["a", "b"]));
        assert_eq!(level2, HashSet::from(["c", "d"]));
    }

    #[test]
    fn node_deleted_mid_walk_is_skipped() {
        // n0 -> n1 -> n2; n1 disappears after it is visited but before it is expanded.
        let graph = chain(3);
        let visited = bfs(&graph, "n0", |n| {
            if n.id() == "n1" {
                graph.delete_node("n1").unwrap();
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(visited.len(), 2);
        assert!(!visited.contains("n2"));

        let graph = chain(3);
        let visited = dfs(&graph, "n0", |n| {
            if n.id() == "n1" {
                graph.delete_node("n1").unwrap();
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(visited.len(), 2);
    }
}
