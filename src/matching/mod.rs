//! Minimum-weight perfect matching providers.
//!
//! Christofides pairs up the odd-degree vertices of the spanning tree. The
//! pairing is supplied through [`PerfectMatching`]:
//!
//! - [`BitmaskMatching`]: exact subset DP, O(2^k · k)
//! - [`GreedyMatching`]: cheapest available pair first, O(k² log k)
//! - [`AutoMatching`]: exact up to a vertex limit, greedy above it

mod bitmask;
mod greedy;

pub use bitmask::BitmaskMatching;
pub use greedy::GreedyMatching;

use crate::models::Edge;

/// Pairs every vertex of a set with exactly one partner.
pub trait PerfectMatching: Send + Sync {
    /// Returns one edge per matched pair, weighted by `weight`.
    ///
    /// With an odd number of vertices, one vertex is left unmatched.
    fn solve(&self, vertices: &[usize], weight: &dyn Fn(usize, usize) -> f64) -> Vec<Edge>;
}

/// Exact matching for small vertex sets, greedy for larger ones.
///
/// # Examples
///
/// ```
/// use u_tour::matching::{AutoMatching, PerfectMatching};
///
/// let pos = [0.0f64, 1.0, 10.0, 11.0];
/// let pairs = AutoMatching::default().solve(&[0, 1, 2, 3], &|u, v| (pos[u] - pos[v]).abs());
/// let total: f64 = pairs.iter().map(|e| e.weight).sum();
/// assert!((total - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AutoMatching {
    exact_limit: usize,
}

impl AutoMatching {
    /// Vertex count up to which the exact solver is used by default.
    pub const DEFAULT_EXACT_LIMIT: usize = 18;

    /// Uses the exact solver for sets of at most `exact_limit` vertices.
    pub fn new(exact_limit: usize) -> Self {
        Self { exact_limit }
    }

    /// Largest vertex set handed to the exact solver.
    pub fn exact_limit(&self) -> usize {
        self.exact_limit
    }
}

impl Default for AutoMatching {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXACT_LIMIT)
    }
}

impl PerfectMatching for AutoMatching {
    fn solve(&self, vertices: &[usize], weight: &dyn Fn(usize, usize) -> f64) -> Vec<Edge> {
        if vertices.len() <= self.exact_limit {
            BitmaskMatching.solve(vertices, weight)
        } else {
            log::warn!(
                "{} odd vertices exceed exact matching limit {}, using greedy matching",
                vertices.len(),
                self.exact_limit
            );
            GreedyMatching.solve(vertices, weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing() -> impl Fn(usize, usize) -> f64 {
        // Greedy grabs 1-2 (cost 1) and is then forced into 0-3 (cost 10);
        // the optimum pairs 0-1 and 2-3 for 4 total.
        |u, v| {
            let (a, b) = (u.min(v), u.max(v));
            match (a, b) {
                (1, 2) => 1.0,
                (0, 1) | (2, 3) => 2.0,
                (0, 3) => 10.0,
                _ => 50.0,
            }
        }
    }

    fn total(edges: &[Edge]) -> f64 {
        edges.iter().map(|e| e.weight).sum()
    }

    #[test]
    fn test_auto_uses_exact_under_limit() {
        let w = crossing();
        let pairs = AutoMatching::default().solve(&[0, 1, 2, 3], &w);
        assert!((total(&pairs) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_auto_falls_back_to_greedy() {
        let w = crossing();
        let pairs = AutoMatching::new(2).solve(&[0, 1, 2, 3], &w);
        assert!((total(&pairs) - 11.0).abs() < 1e-10);
    }
}
