//! CLI command implementations.

use std::ops::ControlFlow;
use std::path::Path;

use crate::engine::shortest_paths;
use crate::format::{to_adjacency, FixtureSet, FixtureWriter};
use crate::graph::{bfs, dfs, Graph};
use crate::types::{GraphError, GraphResult, Id, Node};

/// Which traversal a `bfs`/`dfs` command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Breadth,
    Depth,
}

impl Walk {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Breadth => "bfs",
            Self::Depth => "dfs",
        }
    }
}

fn load(path: &Path, name: &str) -> GraphResult<Graph> {
    FixtureSet::read_from_file(path)?.graph(name)
}

/// List the graphs in a fixture file.
pub fn cmd_list(path: &Path, json: bool) -> GraphResult<()> {
    let fixtures = FixtureSet::read_from_file(path)?;
    let mut rows = Vec::with_capacity(fixtures.len());
    for name in fixtures.names() {
        let graph = fixtures.graph(name)?;
        rows.push((name.to_string(), graph.node_count(), graph.edge_count()));
    }

    if json {
        let list: Vec<serde_json::Value> = rows
            .iter()
            .map(|(name, nodes, edges)| {
                serde_json::json!({"name": name, "nodes": nodes, "edges": edges})
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&list).unwrap_or_default()
        );
    } else {
        println!("{} graphs in {}", rows.len(), path.display());
        for (name, nodes, edges) in rows {
            println!("  {}: {} nodes, {} edges", name, nodes, edges);
        }
    }
    Ok(())
}

/// Print every edge of a graph.
pub fn cmd_show(path: &Path, name: &str, json: bool) -> GraphResult<()> {
    let graph = load(path, name)?;
    if json {
        let edges: Vec<serde_json::Value> = graph
            .edges()
            .into_iter()
            .map(|(src, tgt, weight)| {
                serde_json::json!({"source": src, "target": tgt, "weight": weight})
            })
            .collect();
        let info = serde_json::json!({
            "name": name,
            "nodes": graph.node_ids(),
            "edges": edges,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("Graph: {}", name);
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
        print!("{}", graph);
    }
    Ok(())
}

/// Run a traversal and print nodes in visit order.
pub fn cmd_walk(path: &Path, name: &str, start: &str, walk: Walk, json: bool) -> GraphResult<()> {
    let graph = load(path, name)?;
    let mut order: Vec<Id> = Vec::new();
    let record = |node: &Node| {
        order.push(node.id().clone());
        ControlFlow::Continue(())
    };
    match walk {
        Walk::Breadth => bfs(&graph, start, record)?,
        Walk::Depth => dfs(&graph, start, record)?,
    };

    if json {
        let result = serde_json::json!({
            "algorithm": walk.name(),
            "start": start,
            "visited": order,
            "total_nodes": graph.node_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        );
    } else {
        println!("{} from {}:", walk.name().to_uppercase(), start);
        for id in &order {
            println!("  {}", id);
        }
        println!(
            "Visited {} of {} nodes",
            order.len(),
            graph.node_count()
        );
    }
    Ok(())
}

/// Print shortest distances from `start`, or the route to a single node.
pub fn cmd_dijkstra(
    path: &Path,
    name: &str,
    start: &str,
    to: Option<&str>,
    json: bool,
) -> GraphResult<()> {
    let graph = load(path, name)?;
    let paths = shortest_paths(&graph, start)?;

    if let Some(target) = to {
        // A successful search covers every node, so a miss means no such node.
        let (Some(distance), Some(route)) = (paths.distance(target), paths.path_to(target))
        else {
            return Err(GraphError::NodeNotFound(Id::from(target)));
        };
        if json {
            let result = serde_json::json!({
                "start": start,
                "target": target,
                "distance": distance,
                "path": route,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&result).unwrap_or_default()
            );
        } else {
            let hops: Vec<&str> = route.iter().map(Id::as_str).collect();
            println!("{} ({:.2})", hops.join(" -> "), distance);
        }
        return Ok(());
    }

    let mut distances: Vec<(&Id, f64)> = paths
        .distances()
        .iter()
        .map(|(id, dist)| (id, *dist))
        .collect();
    distances.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    if json {
        let map: serde_json::Map<String, serde_json::Value> = distances
            .iter()
            .map(|(id, dist)| (id.to_string(), serde_json::json!(dist)))
            .collect();
        let result = serde_json::json!({"start": start, "distances": map});
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        );
    } else {
        println!("Shortest distances from {}:", start);
        for (id, dist) in distances {
            println!("  {}: {:.2}", id, dist);
        }
    }
    Ok(())
}

/// Re-emit one graph as a fixture document containing only that graph.
pub fn cmd_export(path: &Path, name: &str, pretty: bool) -> GraphResult<()> {
    let graph = load(path, name)?;
    let mut fixtures = FixtureSet::new();
    fixtures.insert(name, to_adjacency(&graph));
    print!("{}", FixtureWriter::new(pretty).render(&fixtures)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/graphs.json")
    }

    #[test]
    fn dijkstra_to_unknown_node_is_not_found() {
        let err = cmd_dijkstra(&fixture_path(), "via_c", "A", Some("Z"), false).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(ref id) if id == "Z"));
    }

    #[test]
    fn dijkstra_to_known_node_succeeds() {
        cmd_dijkstra(&fixture_path(), "via_c", "A", Some("B"), true).unwrap();
    }

    #[test]
    fn unknown_graph_name_is_reported() {
        let err = cmd_show(&fixture_path(), "nope", false).unwrap_err();
        assert!(matches!(err, GraphError::GraphNotFound(ref n) if n == "nope"));
    }
}
