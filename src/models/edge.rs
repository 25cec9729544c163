//! Weighted edge type.

use serde::{Deserialize, Serialize};

/// A weighted edge between two matrix indices.
///
/// Directed in spanning-tree output (`from` is the already-attached vertex),
/// stored in both directions when an undirected adjacency view is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex.
    pub from: usize,
    /// Target vertex.
    pub to: usize,
    /// Traversal cost.
    pub weight: f64,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// The same edge traversed the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}
