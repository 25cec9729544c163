//! Prim's minimum spanning tree.
//!
//! # Algorithm
//!
//! Grow the tree from vertex 0. Each unattached vertex keeps the cheapest
//! edge reaching it from the tree; every round attaches the vertex whose
//! edge is cheapest and relaxes the keys of the rest through it.
//!
//! # Complexity
//!
//! O(n²) on a dense matrix.
//!
//! # Reference
//!
//! Prim, R.C. (1957). "Shortest connection networks and some
//! generalizations", *Bell System Technical Journal* 36(6), 1389-1401.

use crate::distance::DistanceMatrix;
use crate::models::Edge;

/// Builds a minimum spanning tree rooted at vertex 0.
///
/// Returns the n−1 tree edges in attachment order, each directed from the
/// vertex already in the tree to the vertex it attached. Among equally
/// cheap edges the first one met when scanning the tree vertices in
/// attachment order, and each one's neighbours by index, wins.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::mst::build_mst;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 4.0,
///     1.0, 0.0, 2.0,
///     4.0, 2.0, 0.0,
/// ]).unwrap();
/// let edges = build_mst(&dm);
/// assert_eq!(edges.len(), 2);
/// assert_eq!((edges[0].from, edges[0].to), (0, 1));
/// assert_eq!((edges[1].from, edges[1].to), (1, 2));
/// ```
pub fn build_mst(distances: &DistanceMatrix) -> Vec<Edge> {
    let n = distances.size();
    if n < 2 {
        return Vec::new();
    }

    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    // Position of each tree vertex in attachment order.
    let mut rank = vec![0usize; n];
    let mut edges = Vec::with_capacity(n - 1);

    in_tree[0] = true;
    for v in 1..n {
        key[v] = distances.get(0, v);
    }

    for _ in 1..n {
        // Cheapest attachable vertex; an all-infinite frontier still
        // attaches the first candidate so the tree keeps n−1 edges.
        let mut next: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            match next {
                Some(best)
                    if key[v] > key[best]
                        || (key[v] == key[best] && rank[parent[v]] >= rank[parent[best]]) => {}
                _ => next = Some(v),
            }
        }
        let Some(v) = next else { break };

        in_tree[v] = true;
        rank[v] = edges.len() + 1;
        edges.push(Edge::new(parent[v], v, key[v]));

        for u in 0..n {
            if in_tree[u] {
                continue;
            }
            let d = distances.get(v, u);
            if d < key[u] {
                key[u] = d;
                parent[u] = v;
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                dm.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        dm
    }

    #[test]
    fn test_mst_line() {
        let edges = build_mst(&line(4));
        assert_eq!(edges.len(), 3);
        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
        let total: f64 = edges.iter().map(|e| e.weight).sum();
        assert!((total - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_mst_trivial() {
        assert!(build_mst(&DistanceMatrix::new(0)).is_empty());
        assert!(build_mst(&DistanceMatrix::new(1)).is_empty());
    }

    #[test]
    fn test_mst_avoids_infinite_edge() {
        // 0 and 1 may not be joined directly; 2 bridges them.
        let dm = DistanceMatrix::from_data(
            3,
            vec![
                0.0,
                f64::INFINITY,
                3.0, //
                f64::INFINITY,
                0.0,
                4.0, //
                3.0,
                4.0,
                0.0,
            ],
        )
        .expect("valid");
        let edges = build_mst(&dm);
        assert!(edges.iter().all(|e| e.weight.is_finite()));
        assert_eq!((edges[0].from, edges[0].to), (0, 2));
        assert_eq!((edges[1].from, edges[1].to), (2, 1));
    }

    #[test]
    fn test_mst_tie_goes_to_earlier_parent() {
        // After 0 and 2 are in the tree, 0→3 and 2→1 cost the same; the
        // scan reaches 0's edges first.
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    dm.set(i, j, 5.0);
                }
            }
        }
        for (a, b, w) in [(0, 2, 1.0), (0, 3, 2.0), (2, 1, 2.0)] {
            dm.set(a, b, w);
            dm.set(b, a, w);
        }
        let pairs: Vec<(usize, usize)> = build_mst(&dm).iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(pairs, vec![(0, 2), (0, 3), (2, 1)]);
    }

    #[test]
    fn test_mst_star() {
        // Hub at 0, spokes cheaper than any spoke-to-spoke edge.
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    dm.set(i, j, if i == 0 || j == 0 { 1.0 } else { 5.0 });
                }
            }
        }
        let edges = build_mst(&dm);
        assert!(edges.iter().all(|e| e.from == 0));
        assert_eq!(edges.iter().map(|e| e.to).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
