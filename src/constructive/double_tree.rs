//! Double-tree heuristic.
//!
//! Doubles every spanning-tree edge so all degrees are even, walks the
//! result with leaf-priority ordering (short branches are exhausted before
//! high fan-out subtrees) and shortcuts to first visits. Within 2× optimal
//! on metric instances.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::distance::DistanceMatrix;
use crate::models::VertexSet;
use crate::mst::{
    anchor_endpoints, build_mst, eulerian_tour, hamiltonian_path, AdjacencyTree, SortPolicy,
};

/// Orders the vertices by a shortcut walk around the doubled spanning tree.
///
/// Returns every vertex exactly once, start first and, for a path, end
/// last. The closing return of a tour is not included.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::models::{Node, VertexSet};
/// use u_tour::constructive::double_tree;
///
/// let nodes = vec![Node::at(1.0, 0.0), Node::at(2.0, 0.0), Node::at(3.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
///
/// assert_eq!(double_tree(prepared.matrix(), prepared.vertices()), vec![0, 1, 2, 3]);
/// ```
pub fn double_tree(distances: &DistanceMatrix, vertices: &VertexSet) -> Vec<usize> {
    let n = distances.size();
    let start = vertices.start();
    let end = vertices.end();
    if n <= 2 {
        return anchor_endpoints((0..n).collect(), start, end);
    }

    let mst = build_mst(distances);
    let mut tree = AdjacencyTree::from_edges(n, &mst, true, SortPolicy::Unsorted);
    tree.merge(&mst);
    tree.sort(SortPolicy::LeafPriority);

    let walk = eulerian_tour(&tree, start);
    anchor_endpoints(hamiltonian_path(&walk), start, end)
}
