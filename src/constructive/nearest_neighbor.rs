//! Nearest-neighbor constructive heuristic.
//!
//! Builds the order greedily: starting from the start vertex, always move
//! to the nearest unvisited vertex. For a path problem the end vertex is
//! held back and appended once everything else is visited, so the walk
//! never closes start→end early.
//!
//! # Complexity
//!
//! O(n²) where n = number of vertices.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. While solution
//! quality is typically 20-25% above optimal, it provides a fast baseline.

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::VertexSet;

/// Orders the vertices with the nearest-neighbor heuristic.
///
/// Returns every vertex exactly once, start first and, for a path, end
/// last. The closing return of a tour is not included. Ties between equally
/// near vertices go to the lower index.
///
/// # Errors
///
/// [`TourError::UnreachableLocation`] if the walk gets stuck with vertices
/// left unvisited.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::models::{Node, VertexSet};
/// use u_tour::constructive::nearest_neighbor;
///
/// let nodes = vec![Node::at(3.0, 0.0), Node::at(1.0, 0.0), Node::at(2.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
///
/// let order = nearest_neighbor(prepared.matrix(), prepared.vertices()).unwrap();
/// assert_eq!(order, vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, vertices: &VertexSet) -> Result<Vec<usize>> {
    let n = distances.size();
    let start = vertices.start();
    let end = vertices.end();

    let mut visited = vec![false; n];
    visited[start] = true;
    if let Some(e) = end {
        visited[e] = true;
    }

    let mut stack = vec![start];
    let mut path = Vec::with_capacity(n);

    while let Some(current) = stack.pop() {
        path.push(current);

        // Find nearest unvisited vertex
        let mut best: Option<(usize, f64)> = None;
        for v in 0..n {
            if visited[v] {
                continue;
            }
            let d = distances.get(current, v);
            if !d.is_finite() {
                continue;
            }
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((v, d)),
            }
        }

        if let Some((next, _)) = best {
            visited[next] = true;
            stack.push(next);
        }
    }

    if let Some(e) = end {
        path.push(e);
    }

    if path.len() != n {
        let stranded = (0..n).find(|v| !path.contains(v)).unwrap_or(start);
        let last = path.last().copied().unwrap_or(start);
        return Err(TourError::unreachable(
            vertices.node(last).id(),
            vertices.node(stranded).id(),
        ));
    }

    Ok(path)
}
