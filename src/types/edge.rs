//! The weighted edge handle.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A directed edge's weight cell.
///
/// An `Edge` is a shared handle: clones point at the same weight, so the copy
/// stored in the outgoing index and the copy stored in the incoming index can
/// never disagree. `set_weight` on a handle returned by
/// [`Graph::get_edge`](crate::graph::Graph::get_edge) updates the edge inside
/// the graph without taking the graph's lock. If another thread deletes the
/// edge in between, the write lands on a detached cell; callers that need
/// lookup-then-update atomicity must serialize those calls themselves.
#[derive(Clone)]
pub struct Edge {
    weight: Arc<AtomicU64>,
}

impl Edge {
    /// Create a new edge with the given weight.
    pub fn new(weight: f64) -> Self {
        Self {
            weight: Arc::new(AtomicU64::new(weight.to_bits())),
        }
    }

    pub fn weight(&self) -> f64 {
        f64::from_bits(self.weight.load(Ordering::Acquire))
    }

    pub fn set_weight(&self, weight: f64) {
        self.weight.store(weight.to_bits(), Ordering::Release);
    }

    /// True if both handles refer to the same edge.
    pub fn same_edge(&self, other: &Edge) -> bool {
        Arc::ptr_eq(&self.weight, &other.weight)
    }

    /// A handle with the same weight that shares nothing with `self`.
    pub fn detached(&self) -> Self {
        Self::new(self.weight())
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl From<f64> for Edge {
    fn from(weight: f64) -> Self {
        Self::new(weight)
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge").field("weight", &self.weight()).finish()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_weight() {
        let edge = Edge::new(1.5);
        let alias = edge.clone();
        alias.set_weight(222.22);
        assert_eq!(edge.weight(), 222.22);
        assert!(edge.same_edge(&alias));
    }

    #[test]
    fn detached_copy_is_independent() {
        let edge = Edge::new(3.0);
        let copy = edge.detached();
        copy.set_weight(4.0);
        assert_eq!(edge.weight(), 3.0);
        assert!(!edge.same_edge(&copy));
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Edge::new(1.0).to_string(), "1.00");
        assert_eq!(format!("{:?}", Edge::new(0.5)), "Edge { weight: 0.5 }");
    }
}
