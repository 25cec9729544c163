//! Nearest and farthest insertion heuristics.
//!
//! # Algorithm
//!
//! Start from a two-vertex path (start plus its nearest neighbor, or start
//! plus end for a path problem). Each round:
//!
//! 1. For every vertex already placed, find its nearest (or farthest)
//!    unvisited neighbor; among those candidates take the globally nearest
//!    (or farthest).
//! 2. Splice it into the placed edge `(a, b)` with the smallest increase
//!
//! ```text
//! delta = d(a, v) + d(v, b) - d(a, b)
//! ```
//!
//! Splitting a forbidden (infinite) edge costs only the two new legs. For a
//! tour the closing edge back to the start is a splice candidate too.
//!
//! # Complexity
//!
//! O(n³): each of n rounds scans O(n²) candidate pairs.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::VertexSet;

/// Which unvisited vertex an insertion round picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertionMode {
    /// Closest to the partial path.
    Nearest,
    /// Farthest from the partial path.
    Farthest,
}

impl InsertionMode {
    /// `true` if `candidate` should replace the current best distance.
    fn prefers(self, candidate: f64, best: f64) -> bool {
        match self {
            InsertionMode::Nearest => candidate < best,
            InsertionMode::Farthest => candidate > best,
        }
    }
}

/// Orders the vertices by repeated cheapest-splice insertion.
///
/// Returns every vertex exactly once, start first and, for a path, end
/// last. The closing return of a tour is not included.
///
/// # Errors
///
/// [`TourError::NoSplicePoint`] if a selected vertex cannot be spliced into
/// any placed edge with finite cost, and [`TourError::UnreachableLocation`]
/// if no unvisited vertex can be reached at all.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::models::{Node, VertexSet};
/// use u_tour::constructive::{insertion, InsertionMode};
///
/// let nodes = vec![Node::at(0.0, 1.0), Node::at(1.0, 1.0), Node::at(1.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
///
/// let mut order = insertion(prepared.matrix(), prepared.vertices(), InsertionMode::Farthest).unwrap();
/// order.push(0);
/// assert!((prepared.matrix().path_cost(&order) - 4.0).abs() < 1e-10);
/// ```
pub fn insertion(
    distances: &DistanceMatrix,
    vertices: &VertexSet,
    mode: InsertionMode,
) -> Result<Vec<usize>> {
    let n = distances.size();
    let start = vertices.start();
    if n == 1 {
        return Ok(vec![start]);
    }

    let mut visited = vec![false; n];
    visited[start] = true;

    let mut path = match vertices.end() {
        Some(end) => vec![start, end],
        None => {
            let candidates: Vec<usize> = (0..n).filter(|&v| v != start).collect();
            let first = distances.nearest(start, &candidates).ok_or_else(|| {
                TourError::unreachable(vertices.node(start).id(), vertices.node(candidates[0]).id())
            })?;
            vec![start, first]
        }
    };
    for &v in &path {
        visited[v] = true;
    }
    let closed = vertices.end().is_none();

    while path.len() < n {
        let next = select_candidate(distances, &path, &visited, mode).ok_or_else(|| {
            let stranded = (0..n).find(|&v| !visited[v]).unwrap_or(start);
            TourError::unreachable(vertices.node(start).id(), vertices.node(stranded).id())
        })?;

        let at = cheapest_splice(distances, &path, next, closed)
            .ok_or(TourError::NoSplicePoint { vertex: next })?;
        path.insert(at, next);
        visited[next] = true;
    }

    Ok(path)
}

/// Picks the unvisited vertex to insert next.
fn select_candidate(
    distances: &DistanceMatrix,
    path: &[usize],
    visited: &[bool],
    mode: InsertionMode,
) -> Option<usize> {
    let mut global: Option<(usize, f64)> = None;
    for &p in path {
        let mut local: Option<(usize, f64)> = None;
        for (v, &seen) in visited.iter().enumerate() {
            if seen {
                continue;
            }
            let d = distances.get(p, v);
            if !d.is_finite() {
                continue;
            }
            match local {
                Some((_, ld)) if !mode.prefers(d, ld) => {}
                _ => local = Some((v, d)),
            }
        }
        if let Some((v, d)) = local {
            match global {
                Some((_, gd)) if !mode.prefers(d, gd) => {}
                _ => global = Some((v, d)),
            }
        }
    }
    global.map(|(v, _)| v)
}

/// Returns the insert position splitting the cheapest placed edge.
fn cheapest_splice(distances: &DistanceMatrix, path: &[usize], v: usize, closed: bool) -> Option<usize> {
    let edges = path.len() - 1 + usize::from(closed);
    let mut best: Option<(usize, f64)> = None;
    for k in 0..edges {
        let a = path[k];
        let b = path[(k + 1) % path.len()];
        let added = distances.get(a, v) + distances.get(v, b);
        if !added.is_finite() {
            continue;
        }
        let removed = distances.get(a, b);
        let delta = if removed.is_finite() { added - removed } else { added };
        match best {
            Some((_, bd)) if delta >= bd => {}
            _ => best = Some((k + 1, delta)),
        }
    }
    best.map(|(at, _)| at)
}
