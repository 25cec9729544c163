//! Exact matching by dynamic programming over subsets.
//!
//! # Algorithm
//!
//! `cost[mask]` is the cheapest way to match exactly the vertices in
//! `mask`. From each reachable mask, the lowest unmatched vertex is paired
//! with every other unmatched vertex. Fixing the lowest vertex means each
//! matching is built along exactly one chain of masks.
//!
//! # Complexity
//!
//! O(2^k · k) time and O(2^k) memory for k vertices.

use super::{GreedyMatching, PerfectMatching};
use crate::models::Edge;

/// Exact minimum-weight perfect matching.
///
/// Memory grows as 2^k. Sets larger than [`BitmaskMatching::MAX_VERTICES`]
/// are handed to [`GreedyMatching`] instead.
///
/// # Examples
///
/// ```
/// use u_tour::matching::{BitmaskMatching, PerfectMatching};
///
/// let pos = [0.0f64, 4.0, 5.0, 9.0];
/// let pairs = BitmaskMatching.solve(&[0, 1, 2, 3], &|u, v| (pos[u] - pos[v]).abs());
/// let total: f64 = pairs.iter().map(|e| e.weight).sum();
/// assert!((total - 8.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmaskMatching;

impl BitmaskMatching {
    /// Largest vertex set solved exactly.
    pub const MAX_VERTICES: usize = 24;
}

impl PerfectMatching for BitmaskMatching {
    fn solve(&self, vertices: &[usize], weight: &dyn Fn(usize, usize) -> f64) -> Vec<Edge> {
        let k = vertices.len();
        if k > Self::MAX_VERTICES {
            log::warn!(
                "{k} vertices exceed exact matching limit {}, using greedy matching",
                Self::MAX_VERTICES
            );
            return GreedyMatching.solve(vertices, weight);
        }
        if k % 2 == 1 {
            return GreedyMatching.solve(vertices, weight);
        }
        if k == 0 {
            return Vec::new();
        }

        let mut w = vec![0.0; k * k];
        for i in 0..k {
            for j in (i + 1)..k {
                let d = weight(vertices[i], vertices[j]);
                w[i * k + j] = d;
                w[j * k + i] = d;
            }
        }

        let full = (1usize << k) - 1;
        let mut cost = vec![f64::INFINITY; full + 1];
        let mut reached = vec![false; full + 1];
        let mut choice = vec![(0usize, 0usize); full + 1];
        cost[0] = 0.0;
        reached[0] = true;

        for mask in 0..full {
            if !reached[mask] {
                continue;
            }
            let i = mask.trailing_ones() as usize;
            for j in (i + 1)..k {
                if mask & (1 << j) != 0 {
                    continue;
                }
                let next = mask | (1 << i) | (1 << j);
                let candidate = cost[mask] + w[i * k + j];
                if !reached[next] || candidate < cost[next] {
                    reached[next] = true;
                    cost[next] = candidate;
                    choice[next] = (i, j);
                }
            }
        }

        let mut pairs = Vec::with_capacity(k / 2);
        let mut mask = full;
        while mask != 0 {
            let (i, j) = choice[mask];
            pairs.push(Edge::new(vertices[i], vertices[j], w[i * k + j]));
            mask &= !((1 << i) | (1 << j));
        }
        pairs.reverse();
        pairs
    }
}
