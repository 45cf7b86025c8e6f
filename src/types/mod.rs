//! All data types for the graphkit library.

pub mod edge;
pub mod error;
pub mod node;

pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use node::{Id, Node};
