//! Eulerian walks and first-visit shortcutting.
//!
//! # Algorithm
//!
//! Hierholzer's edge-depletion walk: follow the first unused edge out of
//! the current vertex, deleting it (and its mirror) as it is crossed. When a
//! vertex has no edges left it is emitted and the walk backs up to the
//! previous vertex on the stack. The emitted sequence, reversed, traverses
//! every edge exactly once.
//!
//! With all degrees even the walk is a closed circuit. With exactly two odd
//! vertices and the walk seeded at one of them, it is an open trail ending
//! at the other.
//!
//! # Reference
//!
//! Hierholzer, C. & Wiener, C. (1873). "Über die Möglichkeit, einen
//! Linienzug ohne Wiederholung und ohne Unterbrechung zu umfahren",
//! *Mathematische Annalen* 6(1), 30-32.

use std::collections::VecDeque;

use super::AdjacencyTree;

/// Walks every edge of `tree` exactly once, starting at `start`.
///
/// Edges are taken in each vertex's current list order, so a weight-sorted
/// tree favours cheap edges first. Returns `edge_count + 1` vertices for a
/// connected graph.
///
/// # Examples
///
/// ```
/// use u_tour::models::Edge;
/// use u_tour::mst::{eulerian_tour, AdjacencyTree, SortPolicy};
///
/// let triangle = vec![Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0), Edge::new(2, 0, 1.0)];
/// let tree = AdjacencyTree::from_edges(3, &triangle, true, SortPolicy::Unsorted);
/// let walk = eulerian_tour(&tree, 0);
/// assert_eq!(walk.len(), 4);
/// assert_eq!(walk.first(), walk.last());
/// ```
pub fn eulerian_tour(tree: &AdjacencyTree, start: usize) -> Vec<usize> {
    let mut remaining: Vec<VecDeque<_>> = tree
        .adjacency()
        .iter()
        .map(|list| list.iter().copied().collect())
        .collect();
    if start >= remaining.len() {
        return Vec::new();
    }

    let mut stack = Vec::new();
    let mut emitted = Vec::with_capacity(tree.edge_count() + 1);
    let mut current = start;

    loop {
        if let Some(edge) = remaining[current].pop_front() {
            if tree.is_undirected() {
                let mirror = &mut remaining[edge.to];
                if let Some(pos) = mirror
                    .iter()
                    .position(|e| e.to == current && e.weight == edge.weight)
                {
                    mirror.remove(pos);
                }
            }
            stack.push(current);
            current = edge.to;
        } else {
            emitted.push(current);
            match stack.pop() {
                Some(prev) => current = prev,
                None => break,
            }
        }
    }

    emitted.reverse();
    emitted
}

/// Keeps the first occurrence of every vertex in `walk`.
///
/// # Examples
///
/// ```
/// use u_tour::mst::hamiltonian_path;
///
/// assert_eq!(hamiltonian_path(&[0, 2, 1, 2, 3, 0]), vec![0, 2, 1, 3]);
/// ```
pub fn hamiltonian_path(walk: &[usize]) -> Vec<usize> {
    let size = walk.iter().max().map_or(0, |&m| m + 1);
    let mut seen = vec![false; size];
    let mut path = Vec::with_capacity(size);
    for &v in walk {
        if !seen[v] {
            seen[v] = true;
            path.push(v);
        }
    }
    path
}

/// Puts `start` first and, for a path, moves `end` to the last position.
pub(crate) fn anchor_endpoints(order: Vec<usize>, start: usize, end: Option<usize>) -> Vec<usize> {
    let mut order = order;
    if let Some(pos) = order.iter().position(|&v| v == start) {
        order.rotate_left(pos);
    }
    if let Some(end) = end {
        order.retain(|&v| v != end);
        order.push(end);
    }
    order
}
