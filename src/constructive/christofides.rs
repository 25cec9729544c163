//! Christofides approximation.
//!
//! # Algorithm
//!
//! 1. Build a minimum spanning tree and view it as a weight-sorted
//!    undirected multigraph.
//! 2. Collect the odd-degree vertices. For a path problem, toggle the start
//!    and end in that set so that afterwards exactly they are odd.
//! 3. Add a minimum-weight perfect matching over the collected vertices,
//!    keeping parallel edges.
//! 4. Re-sort by weight, walk an Eulerian circuit (or start→end trail) and
//!    shortcut it to first visits.
//!
//! On metric instances the tour is within 3/2 of optimal (5/3 for the
//! fixed-endpoint path).
//!
//! # Complexity
//!
//! O(n²) plus the cost of the matching provider.
//!
//! # References
//!
//! - Christofides, N. (1976). "Worst-case analysis of a new heuristic for
//!   the travelling salesman problem", Report 388, GSIA, Carnegie Mellon.
//! - Hoogeveen, J.A. (1991). "Analysis of Christofides' heuristic: Some
//!   paths are more difficult than cycles", *Operations Research Letters*
//!   10(5), 291-295.

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::matching::PerfectMatching;
use crate::models::VertexSet;
use crate::mst::{
    anchor_endpoints, build_mst, eulerian_tour, hamiltonian_path, AdjacencyTree, SortPolicy,
};

/// Orders the vertices with Christofides' algorithm.
///
/// Returns every vertex exactly once, start first and, for a path, end
/// last. The closing return of a tour is not included.
///
/// # Errors
///
/// [`TourError::UnsupportedTopology`] if the matrix is not symmetric, and
/// [`TourError::InvalidInput`] if the matcher leaves an odd vertex unpaired.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::matching::AutoMatching;
/// use u_tour::models::{Node, VertexSet};
/// use u_tour::constructive::christofides;
///
/// let nodes = vec![Node::at(1.0, 1.0), Node::at(0.0, 1.0), Node::at(1.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
///
/// let mut order = christofides(prepared.matrix(), prepared.vertices(), &AutoMatching::default()).unwrap();
/// order.push(0);
/// assert!((prepared.matrix().path_cost(&order) - 4.0).abs() < 1e-10);
/// ```
pub fn christofides<M>(distances: &DistanceMatrix, vertices: &VertexSet, matcher: &M) -> Result<Vec<usize>>
where
    M: PerfectMatching + ?Sized,
{
    let n = distances.size();
    let start = vertices.start();
    let end = vertices.end();
    if n <= 2 {
        return Ok(anchor_endpoints((0..n).collect(), start, end));
    }
    if !distances.is_symmetric(1e-9) {
        return Err(TourError::unsupported(
            "christofides requires a symmetric cost matrix",
        ));
    }

    let mst = build_mst(distances);
    let mut graph = AdjacencyTree::from_edges(n, &mst, true, SortPolicy::ByWeight);

    let mut odd = graph.odd_degree_vertices();
    if let Some(end) = end {
        for terminal in [start, end] {
            match odd.iter().position(|&v| v == terminal) {
                Some(pos) => {
                    odd.remove(pos);
                }
                None => odd.push(terminal),
            }
        }
        odd.sort_unstable();
    }

    let matching = matcher.solve(&odd, &|u, v| distances.get(u, v));
    let mut covered: Vec<usize> = matching.iter().flat_map(|e| [e.from, e.to]).collect();
    covered.sort_unstable();
    if covered != odd {
        return Err(TourError::invalid_input(format!(
            "matching covers {} of {} odd-degree vertices",
            covered.len(),
            odd.len()
        )));
    }

    graph.merge(&matching);
    graph.sort(SortPolicy::ByWeight);

    let walk = eulerian_tour(&graph, start);
    log::trace!(
        "christofides: {} tree edges, {} matched pairs, walk of {}",
        mst.len(),
        matching.len(),
        walk.len()
    );

    Ok(anchor_endpoints(hamiltonian_path(&walk), start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{build_matrix, Metric, PreparedMatrix, StraightLine};
    use crate::matching::{AutoMatching, GreedyMatching};
    use crate::models::{Edge, Node};

    fn prepare(start: Node, end: Option<Node>, nodes: &[Node]) -> PreparedMatrix {
        let set = VertexSet::new(start, end, nodes);
        build_matrix(set, &StraightLine, Metric::Euclidean, false).expect("finite")
    }

    fn ring(count: usize) -> Vec<Node> {
        (1..count)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / count as f64;
                Node::at(10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect()
    }

    #[test]
    fn test_ring_is_optimal() {
        let p = prepare(Node::at(10.0, 0.0), None, &ring(8));
        let mut order = christofides(p.matrix(), p.vertices(), &AutoMatching::default()).expect("tour");
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
        order.push(0);
        let perimeter: f64 = (0..8).map(|i| p.matrix().get(i, (i + 1) % 8)).sum();
        assert!((p.matrix().path_cost(&order) - perimeter).abs() < 1e-9);
    }

    #[test]
    fn test_path_runs_start_to_end() {
        let p = prepare(Node::at(0.0, 0.0), Some(Node::at(2.0, 0.0)), &[Node::at(1.0, 5.0)]);
        let order = christofides(p.matrix(), p.vertices(), &GreedyMatching).expect("path");
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_path_many_vertices() {
        let nodes: Vec<Node> = (1..6).map(|i| Node::at(i as f64, (i % 2) as f64)).collect();
        let p = prepare(Node::at(0.0, 0.0), Some(Node::at(6.0, 0.0)), &nodes);
        let order = christofides(p.matrix(), p.vertices(), &AutoMatching::default()).expect("path");
        assert_eq!(order.len(), 7);
        assert_eq!(order[0], 0);
        assert_eq!(order[6], 1);
        assert!(p.matrix().path_cost(&order).is_finite());
    }

    #[test]
    fn test_asymmetric_rejected() {
        let set = VertexSet::new(Node::at(0.0, 0.0), None, &[Node::at(1.0, 0.0), Node::at(2.0, 0.0)]);
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 2.0, 5.0, 0.0, 1.0, 2.0, 1.0, 0.0])
            .expect("valid");
        let err = christofides(&dm, &set, &AutoMatching::default()).expect_err("asymmetric");
        assert!(matches!(err, TourError::UnsupportedTopology(_)));
    }

    struct Lazy;

    impl PerfectMatching for Lazy {
        fn solve(&self, _vertices: &[usize], _weight: &dyn Fn(usize, usize) -> f64) -> Vec<Edge> {
            Vec::new()
        }
    }

    #[test]
    fn test_incomplete_matching_rejected() {
        let p = prepare(Node::at(0.0, 0.0), None, &ring(5));
        let err = christofides(p.matrix(), p.vertices(), &Lazy).expect_err("unmatched");
        assert!(matches!(err, TourError::InvalidInput(_)));
    }

    #[test]
    fn test_trivial_sizes() {
        let p = prepare(Node::at(0.0, 0.0), None, &[]);
        assert_eq!(christofides(p.matrix(), p.vertices(), &GreedyMatching).expect("one"), vec![0]);
        let p = prepare(Node::at(0.0, 0.0), Some(Node::at(1.0, 0.0)), &[]);
        assert_eq!(christofides(p.matrix(), p.vertices(), &GreedyMatching).expect("two"), vec![0, 1]);
    }
}
