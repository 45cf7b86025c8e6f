//! JSON fixture documents: named graphs written as `node -> neighbor -> weight`.
//!
//! ```json
//! { "triangle": { "A": { "B": 1.0 }, "B": { "C": 2.5 }, "C": {} } }
//! ```

use std::collections::BTreeMap;

use crate::types::Id;

pub mod reader;
pub mod writer;

pub use reader::{graph_from_adjacency, FixtureSet};
pub use writer::{to_adjacency, FixtureWriter};

/// One graph as nested mapping: source -> (target -> weight).
pub type Adjacency = BTreeMap<Id, BTreeMap<Id, f64>>;
