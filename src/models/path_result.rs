//! Heuristic output type.

use serde::{Deserialize, Serialize};

use super::Node;

/// An ordered visiting sequence with its estimated cost.
///
/// Closed tours repeat the start node at the end. `route`, when present, is
/// the turn-by-turn route obtained by stitching the stored per-edge routes
/// in path order.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Node, PathResult};
///
/// let result = PathResult::new(vec![Node::at(0.0, 0.0), Node::at(1.0, 0.0)], 1.0);
/// assert_eq!(result.len(), 2);
/// assert!(result.route().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResult {
    path: Vec<Node>,
    estimated_cost: f64,
    route: Option<Vec<Node>>,
}

impl PathResult {
    /// Creates a result without a reconstructed route.
    pub fn new(path: Vec<Node>, estimated_cost: f64) -> Self {
        Self {
            path,
            estimated_cost,
            route: None,
        }
    }

    /// Attaches a reconstructed route.
    pub fn with_route(mut self, route: Vec<Node>) -> Self {
        self.route = Some(route);
        self
    }

    /// Visiting order.
    pub fn path(&self) -> &[Node] {
        &self.path
    }

    /// Sum of matrix costs along consecutive pairs of the path.
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    /// Reconstructed route, if requested.
    pub fn route(&self) -> Option<&[Node]> {
        self.route.as_deref()
    }

    /// Number of entries in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Identifiers of the path nodes in order.
    pub fn ids(&self) -> Vec<&str> {
        self.path.iter().map(|n| n.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_empty() {
        let r = PathResult::new(vec![], 0.0);
        assert!(r.is_empty());
        assert_eq!(r.estimated_cost(), 0.0);
    }

    #[test]
    fn test_with_route() {
        let r = PathResult::new(vec![Node::new("A", 0.0, 0.0), Node::new("B", 2.0, 0.0)], 2.0)
            .with_route(vec![
                Node::new("A", 0.0, 0.0),
                Node::at(1.0, 0.0),
                Node::new("B", 2.0, 0.0),
            ]);
        assert_eq!(r.ids(), vec!["A", "B"]);
        assert_eq!(r.route().map(|route| route.len()), Some(3));
    }
}
