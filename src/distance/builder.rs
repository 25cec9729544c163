//! Cost-matrix construction.
//!
//! Every ordered pair of vertices is priced by a [`DistanceProvider`]. The
//! queries are independent, so they are fanned out over the rayon pool and
//! joined before any cell is read. The first unreachable pair fails the
//! whole build: no partial matrix is ever returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use super::{DistanceMatrix, DistanceProvider, Leg, Metric};
use crate::error::{Result, TourError};
use crate::models::{Node, VertexSet};

/// Per-pair routes kept for turn-by-turn reconstruction.
#[derive(Debug, Clone)]
pub struct RouteTable {
    size: usize,
    legs: Vec<Option<Vec<Node>>>,
}

impl RouteTable {
    fn new(size: usize) -> Self {
        Self {
            size,
            legs: vec![None; size * size],
        }
    }

    /// Stored route from `from` to `to`, both endpoints included.
    pub fn get(&self, from: usize, to: usize) -> Option<&[Node]> {
        self.legs[from * self.size + to].as_deref()
    }

    /// Concatenates the stored routes along `path`, dropping the repeated
    /// junction node between consecutive legs.
    pub fn stitch(&self, path: &[usize]) -> Result<Vec<Node>> {
        let mut route: Vec<Node> = Vec::new();
        for w in path.windows(2) {
            let leg = self.get(w[0], w[1]).ok_or_else(|| {
                TourError::ReconstructionUnavailable(format!(
                    "no stored route from vertex {} to vertex {}",
                    w[0], w[1]
                ))
            })?;
            let skip = usize::from(!route.is_empty());
            route.extend(leg.iter().skip(skip).cloned());
        }
        Ok(route)
    }
}

/// A vertex layout together with its fully populated cost matrix.
#[derive(Debug, Clone)]
pub struct PreparedMatrix {
    vertices: VertexSet,
    matrix: DistanceMatrix,
    routes: Option<RouteTable>,
}

impl PreparedMatrix {
    /// Vertex layout the matrix is indexed by.
    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    /// Pairwise costs.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Stored routes, when they were requested at build time.
    pub fn routes(&self) -> Option<&RouteTable> {
        self.routes.as_ref()
    }
}

/// Builds the cost matrix for a vertex layout.
///
/// For path problems with at least one intermediate vertex, the start↔end
/// cells are forced to infinity so no heuristic can use that pair as an
/// internal edge.
///
/// # Errors
///
/// [`TourError::UnreachableLocation`] if any pair is priced at infinity.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::models::{Node, VertexSet};
///
/// let set = VertexSet::new(
///     Node::at(0.0, 0.0),
///     Some(Node::at(2.0, 0.0)),
///     &[Node::at(1.0, 5.0)],
/// );
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
/// assert!(prepared.matrix().get(0, 1).is_infinite());
/// assert!((prepared.matrix().get(0, 2) - 26f64.sqrt()).abs() < 1e-10);
/// ```
pub fn build_matrix<P>(
    vertices: VertexSet,
    provider: &P,
    metric: Metric,
    want_routes: bool,
) -> Result<PreparedMatrix>
where
    P: DistanceProvider + ?Sized,
{
    let started = Instant::now();
    let n = vertices.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|r| (0..n).filter(move |&c| c != r).map(move |c| (r, c)))
        .collect();

    let failed = AtomicBool::new(false);
    let legs: Vec<Option<(usize, usize, Leg)>> = pairs
        .into_par_iter()
        .map(|(r, c)| {
            if failed.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let (from, to) = (vertices.node(r), vertices.node(c));
            let leg = provider.query(from, to, want_routes, metric);
            if !leg.is_reachable() || leg.cost < 0.0 {
                failed.store(true, Ordering::Relaxed);
                log::warn!("unreachable pair {} -> {}", from.id(), to.id());
                return Err(TourError::unreachable(from.id(), to.id()));
            }
            Ok(Some((r, c, leg)))
        })
        .collect::<Result<_>>()?;

    let mut matrix = DistanceMatrix::new(n);
    let mut routes = want_routes.then(|| RouteTable::new(n));
    for (r, c, leg) in legs.into_iter().flatten() {
        matrix.set(r, c, leg.cost);
        if let Some(table) = routes.as_mut() {
            table.legs[r * n + c] = leg.route;
        }
    }

    if let Some(end) = vertices.end() {
        if n > 2 {
            let start = vertices.start();
            matrix.set(start, end, f64::INFINITY);
            matrix.set(end, start, f64::INFINITY);
        }
    }

    log::debug!(
        "built {n}x{n} cost matrix ({:?}) in {:?}",
        vertices.topology(),
        started.elapsed()
    );

    Ok(PreparedMatrix {
        vertices,
        matrix,
        routes,
    })
}
