//! Adjacency view of a spanning tree or multigraph.

use serde::{Deserialize, Serialize};

use crate::models::Edge;

/// How each vertex's outgoing edges are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPolicy {
    /// Keep insertion order.
    #[default]
    Unsorted,
    /// Cheapest edge first.
    ByWeight,
    /// Child with the fewest descendants first, the parent edge last.
    ///
    /// A walk then exhausts short branches before descending into
    /// high fan-out subtrees.
    LeafPriority,
}

/// Arena of per-vertex edge lists indexed by vertex id.
///
/// Parallel edges are kept: after a matching is merged in, the same pair
/// can appear more than once and each copy is a separate edge to traverse.
///
/// # Examples
///
/// ```
/// use u_tour::models::Edge;
/// use u_tour::mst::{AdjacencyTree, SortPolicy};
///
/// let edges = vec![Edge::new(0, 1, 2.0), Edge::new(0, 2, 1.0)];
/// let tree = AdjacencyTree::from_edges(3, &edges, true, SortPolicy::ByWeight);
/// assert_eq!(tree.degree(0), 2);
/// assert_eq!(tree.edges(0)[0].to, 2);
/// assert_eq!(tree.odd_degree_vertices(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyTree {
    adjacency: Vec<Vec<Edge>>,
    undirected: bool,
    root: usize,
}

impl AdjacencyTree {
    /// Folds an edge list into an adjacency view over `size` vertices.
    ///
    /// With `undirected`, each edge is stored in both directions. The root
    /// used by [`SortPolicy::LeafPriority`] is the source of the first edge.
    pub fn from_edges(size: usize, edges: &[Edge], undirected: bool, policy: SortPolicy) -> Self {
        let mut tree = Self {
            adjacency: vec![Vec::new(); size],
            undirected,
            root: edges.first().map_or(0, |e| e.from),
        };
        tree.merge(edges);
        tree.sort(policy);
        tree
    }

    /// Adds edges, keeping any duplicates already present.
    pub fn merge(&mut self, edges: &[Edge]) {
        for edge in edges {
            self.adjacency[edge.from].push(*edge);
            if self.undirected {
                self.adjacency[edge.to].push(edge.reversed());
            }
        }
    }

    /// Reorders every vertex's outgoing edges.
    pub fn sort(&mut self, policy: SortPolicy) {
        match policy {
            SortPolicy::Unsorted => {}
            SortPolicy::ByWeight => {
                for list in &mut self.adjacency {
                    list.sort_by(|a, b| a.weight.total_cmp(&b.weight));
                }
            }
            SortPolicy::LeafPriority => {
                let (parent, descendants) = self.subtree_sizes();
                for (v, list) in self.adjacency.iter_mut().enumerate() {
                    list.sort_by_key(|e| {
                        if parent[v] == Some(e.to) {
                            usize::MAX
                        } else {
                            descendants[e.to]
                        }
                    });
                }
            }
        }
    }

    /// Parent and descendant count of every vertex when the tree hangs from
    /// its root.
    fn subtree_sizes(&self) -> (Vec<Option<usize>>, Vec<usize>) {
        let n = self.adjacency.len();
        let mut parent = vec![None; n];
        let mut descendants = vec![0usize; n];
        if n == 0 {
            return (parent, descendants);
        }

        let mut seen = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut stack = vec![self.root];
        seen[self.root] = true;
        while let Some(v) = stack.pop() {
            order.push(v);
            for e in &self.adjacency[v] {
                if !seen[e.to] {
                    seen[e.to] = true;
                    parent[e.to] = Some(v);
                    stack.push(e.to);
                }
            }
        }

        for &v in order.iter().rev() {
            if let Some(p) = parent[v] {
                descendants[p] += descendants[v] + 1;
            }
        }
        (parent, descendants)
    }

    /// Number of vertex slots.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// `true` if every edge is stored in both directions.
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Outgoing edges of `vertex` in their current order.
    pub fn edges(&self, vertex: usize) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Outgoing edge count of `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Number of edges, each undirected edge counted once.
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.undirected {
            stored / 2
        } else {
            stored
        }
    }

    /// Number of vertices touched by at least one edge.
    pub fn vertex_count(&self) -> usize {
        let mut touched = vec![false; self.adjacency.len()];
        for list in &self.adjacency {
            for e in list {
                touched[e.from] = true;
                touched[e.to] = true;
            }
        }
        touched.iter().filter(|&&t| t).count()
    }

    /// Vertices with an odd number of outgoing edges, ascending.
    pub fn odd_degree_vertices(&self) -> Vec<usize> {
        (0..self.adjacency.len())
            .filter(|&v| self.adjacency[v].len() % 2 == 1)
            .collect()
    }

    pub(crate) fn adjacency(&self) -> &[Vec<Edge>] {
        &self.adjacency
    }
}
