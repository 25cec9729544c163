//! Vertex roles and problem topology.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Node;

/// The part a matrix index plays in the problem.
///
/// Resolved once when the vertex set is laid out; algorithms ask for the
/// role (or for [`VertexSet::start`] / [`VertexSet::end`]) instead of
/// assuming fixed low indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexRole {
    /// Where every tour or path begins.
    Start,
    /// Fixed terminal of an open path.
    End,
    /// Any other location to visit.
    Regular,
}

/// Closed tour (TSP) or fixed-endpoint path (HPP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Return to the start after visiting every vertex.
    Tour,
    /// Run from the start to a distinct end vertex.
    Path,
}

/// Ordered vertex layout backing a distance matrix.
///
/// Index 0 is the start. For a path problem the end takes index 1. The
/// remaining locations follow in input order, with any location sharing an
/// identifier with an earlier one dropped.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Node, Topology, VertexRole, VertexSet};
///
/// let nodes = vec![Node::at(1.0, 5.0), Node::at(2.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), Some(Node::at(2.0, 0.0)), &nodes);
/// assert_eq!(set.topology(), Topology::Path);
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.end(), Some(1));
/// assert_eq!(set.role(2), VertexRole::Regular);
/// ```
#[derive(Debug, Clone)]
pub struct VertexSet {
    nodes: Vec<Node>,
    roles: Vec<VertexRole>,
    end: Option<usize>,
}

impl VertexSet {
    /// Lays out the vertices for a problem.
    ///
    /// The problem is a path iff `end` is given and its id differs from the
    /// start's.
    pub fn new(start: Node, end: Option<Node>, nodes: &[Node]) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(start.id().to_string());

        let mut laid_out = vec![start];
        let mut roles = vec![VertexRole::Start];
        let mut end_index = None;

        if let Some(end) = end {
            if seen.insert(end.id().to_string()) {
                end_index = Some(laid_out.len());
                laid_out.push(end);
                roles.push(VertexRole::End);
            }
        }

        for node in nodes {
            if seen.insert(node.id().to_string()) {
                laid_out.push(node.clone());
                roles.push(VertexRole::Regular);
            }
        }

        Self {
            nodes: laid_out,
            roles,
            end: end_index,
        }
    }

    /// Number of vertices, start and end included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a vertex set holds at least its start.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in matrix-index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at the given matrix index.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Role of the vertex at the given matrix index.
    pub fn role(&self, index: usize) -> VertexRole {
        self.roles[index]
    }

    /// Index of the start vertex.
    pub fn start(&self) -> usize {
        0
    }

    /// Index of the end vertex, for path problems.
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// [`Topology::Path`] when a distinct end exists, else [`Topology::Tour`].
    pub fn topology(&self) -> Topology {
        if self.end.is_some() {
            Topology::Path
        } else {
            Topology::Tour
        }
    }

    /// `true` for a fixed-endpoint path problem.
    pub fn is_path(&self) -> bool {
        self.end.is_some()
    }

    /// Indices of the vertices with [`VertexRole::Regular`].
    pub fn regular(&self) -> impl Iterator<Item = usize> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, &r)| r == VertexRole::Regular)
            .map(|(i, _)| i)
    }

    /// Maps a sequence of matrix indices to nodes.
    pub fn to_nodes(&self, indices: &[usize]) -> Vec<Node> {
        indices.iter().map(|&i| self.nodes[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_without_end() {
        let nodes = vec![Node::at(1.0, 0.0), Node::at(2.0, 0.0)];
        let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
        assert_eq!(set.topology(), Topology::Tour);
        assert_eq!(set.len(), 3);
        assert_eq!(set.start(), 0);
        assert_eq!(set.end(), None);
        assert_eq!(set.regular().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_end_equal_to_start_is_tour() {
        let set = VertexSet::new(Node::at(0.0, 0.0), Some(Node::at(0.0, 0.0)), &[]);
        assert_eq!(set.topology(), Topology::Tour);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_path_reserves_index_one() {
        let nodes = vec![Node::at(5.0, 5.0)];
        let set = VertexSet::new(Node::at(0.0, 0.0), Some(Node::at(9.0, 0.0)), &nodes);
        assert_eq!(set.role(0), VertexRole::Start);
        assert_eq!(set.role(1), VertexRole::End);
        assert_eq!(set.role(2), VertexRole::Regular);
        assert_eq!(set.node(1).id(), "9,0");
    }

    #[test]
    fn test_duplicates_dropped() {
        let nodes = vec![
            Node::at(0.0, 0.0),
            Node::at(1.0, 1.0),
            Node::at(9.0, 0.0),
            Node::at(1.0, 1.0),
        ];
        let set = VertexSet::new(Node::at(0.0, 0.0), Some(Node::at(9.0, 0.0)), &nodes);
        assert_eq!(set.len(), 3);
        assert_eq!(set.regular().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_to_nodes() {
        let nodes = vec![Node::new("B", 1.0, 0.0)];
        let set = VertexSet::new(Node::new("A", 0.0, 0.0), None, &nodes);
        let ids: Vec<String> = set
            .to_nodes(&[0, 1, 0])
            .iter()
            .map(|n| n.id().to_string())
            .collect();
        assert_eq!(ids, vec!["A", "B", "A"]);
    }
}
