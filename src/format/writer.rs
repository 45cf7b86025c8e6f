//! Writes graphs back out as JSON fixture documents.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use crate::graph::Graph;
use crate::types::GraphResult;

use super::{Adjacency, FixtureSet};

/// Export a graph as a nested adjacency map.
///
/// Every node gets an entry, so nodes without outgoing edges survive a round trip.
pub fn to_adjacency<T>(graph: &Graph<T>) -> Adjacency {
    let mut adjacency: Adjacency = graph
        .node_ids()
        .into_iter()
        .map(|id| (id, BTreeMap::new()))
        .collect();
    for (src, tgt, weight) in graph.edges() {
        adjacency.entry(src).or_default().insert(tgt, weight);
    }
    adjacency
}

/// Writer for JSON fixture documents.
pub struct FixtureWriter {
    pretty: bool,
}

impl FixtureWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Write a fixture set to a file, replacing it.
    pub fn write_to_file(&self, fixtures: &FixtureSet, path: &Path) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(fixtures, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a fixture set to any writer.
    pub fn write_to(&self, fixtures: &FixtureSet, writer: &mut impl Write) -> GraphResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, fixtures.graphs())?;
        } else {
            serde_json::to_writer(&mut *writer, fixtures.graphs())?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Render a fixture set as a string.
    pub fn render(&self, fixtures: &FixtureSet) -> GraphResult<String> {
        let mut buf = Vec::new();
        self.write_to(fixtures, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for FixtureWriter {
    fn default() -> Self {
        Self::new(false)
    }
}
