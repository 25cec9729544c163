//! Pairwise cost providers.

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// How a single step or straight leg is priced.
///
/// On an obstacle grid the metric also picks the move set: Manhattan moves
/// only along axes, the others also move diagonally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Straight-line distance; diagonal grid steps cost √2.
    #[default]
    Euclidean,
    /// Axis-aligned distance; no diagonal grid steps.
    Manhattan,
    /// Maximum axis offset; diagonal grid steps cost 1.
    Chebyshev,
}

impl Metric {
    /// Distance between two points under this metric.
    pub fn between(self, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
        let dx = (ax - bx).abs();
        let dy = (ay - by).abs();
        match self {
            Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
            Metric::Manhattan => dx + dy,
            Metric::Chebyshev => dx.max(dy),
        }
    }

    /// Distance between two nodes under this metric.
    pub fn distance(self, a: &Node, b: &Node) -> f64 {
        self.between(a.x(), a.y(), b.x(), b.y())
    }
}

/// The answer to one pairwise cost query.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Minimum cost, `f64::INFINITY` when unreachable.
    pub cost: f64,
    /// Reconstructed route from source to target, both included.
    pub route: Option<Vec<Node>>,
}

impl Leg {
    /// A leg with a cost and no route.
    pub fn new(cost: f64) -> Self {
        Self { cost, route: None }
    }

    /// A leg that cannot be travelled.
    pub fn unreachable() -> Self {
        Self::new(f64::INFINITY)
    }

    /// Attaches a route.
    pub fn with_route(mut self, route: Vec<Node>) -> Self {
        self.route = Some(route);
        self
    }

    /// `true` for a finite cost.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Computes the cost of travelling between two nodes.
///
/// Queries are independent of each other and may be issued from several
/// threads at once.
pub trait DistanceProvider: Send + Sync {
    /// Returns the minimum cost from `from` to `to`, with the route when
    /// `want_route` is set and the provider can produce one.
    fn query(&self, from: &Node, to: &Node, want_route: bool, metric: Metric) -> Leg;
}

/// Metric distance with no obstacles.
///
/// Produces no routes: a straight leg has no turn-by-turn content.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceProvider, Metric, StraightLine};
/// use u_tour::models::Node;
///
/// let leg = StraightLine.query(&Node::at(0.0, 0.0), &Node::at(3.0, 4.0), false, Metric::Euclidean);
/// assert!((leg.cost - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl DistanceProvider for StraightLine {
    fn query(&self, from: &Node, to: &Node, _want_route: bool, metric: Metric) -> Leg {
        Leg::new(metric.distance(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let a = Node::at(0.0, 0.0);
        let b = Node::at(3.0, 4.0);
        assert!((Metric::Euclidean.distance(&a, &b) - 5.0).abs() < 1e-10);
        assert!((Metric::Manhattan.distance(&a, &b) - 7.0).abs() < 1e-10);
        assert!((Metric::Chebyshev.distance(&a, &b) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_default_metric() {
        assert_eq!(Metric::default(), Metric::Euclidean);
    }

    #[test]
    fn test_straight_line_has_no_route() {
        let leg = StraightLine.query(&Node::at(0.0, 0.0), &Node::at(1.0, 0.0), true, Metric::Manhattan);
        assert!(leg.is_reachable());
        assert!(leg.route.is_none());
    }

    #[test]
    fn test_unreachable_leg() {
        assert!(!Leg::unreachable().is_reachable());
    }
}
