//! Fixture format tests: loading named graphs from JSON and writing them back.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use graphkit::engine::dijkstra;
use graphkit::format::{to_adjacency, FixtureSet, FixtureWriter};
use graphkit::graph::{bfs, dfs, GraphBuilder};
use graphkit::types::{GraphError, Id};

// ==================== Helper ====================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/graphs.json")
}

fn fixtures() -> FixtureSet {
    let _ = env_logger::builder().is_test(true).try_init();
    FixtureSet::read_from_file(&fixture_path()).unwrap()
}

// ==================== Reading ====================

#[test]
fn test_fixture_names() {
    let set = fixtures();
    let names: Vec<&str> = set.names().collect();
    assert_eq!(
        names,
        vec!["cycle", "graph_00", "isolated", "unreachable", "via_c"]
    );
}

#[test]
fn test_neighbors_become_nodes() {
    let graph = fixtures().graph("graph_00").unwrap();
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 13);
    assert_eq!(graph.get_edge("D", "E").unwrap().weight(), 2.0);
}

#[test]
fn test_graph_00_distances() {
    let graph = fixtures().graph("graph_00").unwrap();
    let dist = dijkstra(&graph, "A").unwrap();
    let expected: HashMap<Id, f64> = [
        ("A", 0.0),
        ("B", 5.0),
        ("S", 15.0),
        ("D", 20.0),
        ("E", 22.0),
        ("F", 28.0),
        ("T", 34.0),
        ("C", 46.0),
    ]
    .into_iter()
    .map(|(id, d)| (Id::from(id), d))
    .collect();
    assert_eq!(dist, expected);
}

#[test]
fn test_unreachable_fixture() {
    let graph = fixtures().graph("unreachable").unwrap();
    assert!(matches!(
        dijkstra(&graph, "A"),
        Err(GraphError::InfiniteDistance(_))
    ));
}

#[test]
fn test_cycle_fixture_traversals() {
    let graph = fixtures().graph("cycle").unwrap();
    let all = bfs(&graph, "A", |_| ControlFlow::Continue(())).unwrap();
    assert_eq!(all.len(), 3);
    let all = dfs(&graph, "C", |_| ControlFlow::Continue(())).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_isolated_fixture() {
    let graph = fixtures().graph("isolated").unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_missing_graph_name() {
    assert!(matches!(
        fixtures().graph("graph_99"),
        Err(GraphError::GraphNotFound(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/absent.json");
    assert!(matches!(
        FixtureSet::read_from_file(&path),
        Err(GraphError::Io(_))
    ));
}

// ==================== Writing ====================

#[test]
fn test_export_keeps_isolated_nodes() {
    let mut builder = GraphBuilder::<()>::new();
    builder.node("lonely").edge("A", "B", 1.25);
    let graph = builder.build().unwrap();

    let adjacency = to_adjacency(&graph);
    assert_eq!(adjacency.len(), 3);
    assert!(adjacency[&Id::from("lonely")].is_empty());
    assert!(adjacency[&Id::from("B")].is_empty());
    assert_eq!(adjacency[&Id::from("A")][&Id::from("B")], 1.25);
}

#[test]
fn test_file_round_trip() {
    let original = fixtures();
    let tmp = NamedTempFile::new().unwrap();

    FixtureWriter::new(true)
        .write_to_file(&original, tmp.path())
        .unwrap();
    let reloaded = FixtureSet::read_from_file(tmp.path()).unwrap();
    assert_eq!(reloaded, original);

    let graph = reloaded.graph("via_c").unwrap();
    assert_eq!(dijkstra(&graph, "A").unwrap()["B"], 3.0);
}

#[test]
fn test_compact_output_is_single_line() {
    let mut set = FixtureSet::new();
    let mut builder = GraphBuilder::<()>::new();
    builder.edge("A", "B", 2.0);
    set.insert("pair", to_adjacency(&builder.build().unwrap()));

    let text = FixtureWriter::default().render(&set).unwrap();
    assert_eq!(text, "{\"pair\":{\"A\":{\"B\":2.0},\"B\":{}}}\n");
}

#[test]
fn test_in_memory_round_trip() {
    let original = fixtures();
    let mut buf = Vec::new();
    FixtureWriter::default().write_to(&original, &mut buf).unwrap();

    let from_reader = FixtureSet::read_from(buf.as_slice()).unwrap();
    let from_text = FixtureSet::from_json(std::str::from_utf8(&buf).unwrap()).unwrap();
    assert_eq!(from_reader, original);
    assert_eq!(from_text, original);
}
