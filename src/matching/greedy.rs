//! Greedy matching.

use super::PerfectMatching;
use crate::models::Edge;

/// Repeatedly matches the cheapest pair of still-unmatched vertices.
///
/// Not optimal, but cheap enough for odd-vertex sets far beyond the reach of
/// the exact solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatching;

impl PerfectMatching for GreedyMatching {
    fn solve(&self, vertices: &[usize], weight: &dyn Fn(usize, usize) -> f64) -> Vec<Edge> {
        let k = vertices.len();
        let mut candidates = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for i in 0..k {
            for j in (i + 1)..k {
                let (u, v) = (vertices[i], vertices[j]);
                candidates.push(Edge::new(u, v, weight(u, v)));
            }
        }
        candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let size = vertices.iter().max().map_or(0, |&m| m + 1);
        let mut matched = vec![false; size];
        let mut pairs = Vec::with_capacity(k / 2);
        for edge in candidates {
            if matched[edge.from] || matched[edge.to] {
                continue;
            }
            matched[edge.from] = true;
            matched[edge.to] = true;
            pairs.push(edge);
        }
        pairs
    }
}
