//! Tour planner.
//!
//! Two phases: configure (start, optional end, locations, optional grid,
//! metric) and then [`TourPlanner::build`] the cost matrix once. Every
//! heuristic afterwards reads the same matrix. A failed build is kept and
//! handed back unchanged by every later call.

use std::collections::HashMap;

use super::PlannerConfig;
use crate::constructive::{christofides, double_tree, insertion, nearest_neighbor, InsertionMode};
use crate::distance::{
    build_matrix, DistanceProvider, GridSearch, Metric, ObstacleGrid, PreparedMatrix, StraightLine,
};
use crate::error::{Result, TourError};
use crate::local_search::{anneal, AnnealingConfig};
use crate::matching::{AutoMatching, PerfectMatching};
use crate::models::{Node, PathResult, Topology, VertexSet};

#[derive(Debug, Clone)]
enum MatrixState {
    Pending,
    Ready(PreparedMatrix),
    Failed(TourError),
}

/// Builds visiting orders over a fixed set of locations.
///
/// # Examples
///
/// ```
/// use u_tour::models::Node;
/// use u_tour::TourPlanner;
///
/// let nodes = vec![Node::at(0.0, 1.0), Node::at(1.0, 1.0), Node::at(1.0, 0.0)];
/// let mut planner = TourPlanner::new(Node::at(0.0, 0.0), nodes);
/// planner.build().unwrap();
///
/// let tour = planner.nearest_neighbor().unwrap();
/// assert_eq!(tour.len(), 5);
/// assert!((tour.estimated_cost() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct TourPlanner {
    start: Node,
    end: Option<Node>,
    nodes: Vec<Node>,
    grid: Option<ObstacleGrid>,
    config: PlannerConfig,
    state: MatrixState,
}

impl TourPlanner {
    /// Creates a closed-tour planner starting and ending at `start`.
    pub fn new(start: Node, nodes: Vec<Node>) -> Self {
        Self {
            start,
            end: None,
            nodes,
            grid: None,
            config: PlannerConfig::default(),
            state: MatrixState::Pending,
        }
    }

    /// Fixes the end of an open path.
    ///
    /// An end with the same id as the start keeps the problem a closed tour.
    pub fn with_end(mut self, end: Node) -> Self {
        self.end = Some(end);
        self.state = MatrixState::Pending;
        self
    }

    /// Prices legs by A* search over `grid` instead of straight lines.
    pub fn with_grid(mut self, grid: ObstacleGrid) -> Self {
        self.grid = Some(grid);
        self.state = MatrixState::Pending;
        self
    }

    /// Sets the distance metric used when pricing legs.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self.state = MatrixState::Pending;
        self
    }

    /// Stores per-pair routes and attaches the stitched route to every result.
    pub fn with_route_reconstruction(mut self, enabled: bool) -> Self {
        self.config.reconstruct_route = enabled;
        self.state = MatrixState::Pending;
        self
    }

    /// Replaces the whole planner configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self.state = MatrixState::Pending;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Tour when no distinct end was given, path otherwise.
    pub fn topology(&self) -> Topology {
        match &self.end {
            Some(end) if end.id() != self.start.id() => Topology::Path,
            _ => Topology::Tour,
        }
    }

    /// Builds the cost matrix with [`GridSearch`] when a grid was supplied,
    /// otherwise with [`StraightLine`].
    ///
    /// # Errors
    ///
    /// [`TourError::UnreachableLocation`] if any pair of locations cannot
    /// be connected. The error is kept and returned by every heuristic.
    pub fn build(&mut self) -> Result<()> {
        match self.grid.clone() {
            Some(grid) => self.build_with(&GridSearch::new(grid)),
            None => self.build_with(&StraightLine),
        }
    }

    /// Builds the cost matrix with a caller-supplied provider.
    pub fn build_with<P>(&mut self, provider: &P) -> Result<()>
    where
        P: DistanceProvider + ?Sized,
    {
        let vertices = VertexSet::new(self.start.clone(), self.end.clone(), &self.nodes);
        match build_matrix(vertices, provider, self.config.metric, self.config.reconstruct_route) {
            Ok(prepared) => {
                self.state = MatrixState::Ready(prepared);
                Ok(())
            }
            Err(e) => {
                self.state = MatrixState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// `true` once a build has succeeded.
    pub fn is_built(&self) -> bool {
        matches!(self.state, MatrixState::Ready(_))
    }

    /// The built matrix and vertex layout.
    ///
    /// # Errors
    ///
    /// [`TourError::NotInitialized`] before [`build`](Self::build), or the
    /// stored build error.
    pub fn prepared(&self) -> Result<&PreparedMatrix> {
        match &self.state {
            MatrixState::Ready(prepared) => Ok(prepared),
            MatrixState::Failed(e) => Err(e.clone()),
            MatrixState::Pending => Err(TourError::NotInitialized),
        }
    }

    /// Greedy nearest-neighbor walk.
    ///
    /// # Errors
    ///
    /// The errors of [`prepared`](Self::prepared), or
    /// [`TourError::UnreachableLocation`] if the walk gets stuck.
    pub fn nearest_neighbor(&self) -> Result<PathResult> {
        let prepared = self.prepared()?;
        let order = nearest_neighbor(prepared.matrix(), prepared.vertices())?;
        self.finish(prepared, order, "nearest neighbor")
    }

    /// Insertion that always adds the unvisited vertex closest to the path.
    ///
    /// # Errors
    ///
    /// The errors of [`prepared`](Self::prepared), or
    /// [`TourError::NoSplicePoint`] if a vertex fits nowhere.
    pub fn nearest_insertion(&self) -> Result<PathResult> {
        let prepared = self.prepared()?;
        let order = insertion(prepared.matrix(), prepared.vertices(), InsertionMode::Nearest)?;
        self.finish(prepared, order, "nearest insertion")
    }

    /// Insertion that always adds the unvisited vertex farthest from the path.
    ///
    /// # Errors
    ///
    /// As for [`nearest_insertion`](Self::nearest_insertion).
    pub fn farthest_insertion(&self) -> Result<PathResult> {
        let prepared = self.prepared()?;
        let order = insertion(prepared.matrix(), prepared.vertices(), InsertionMode::Farthest)?;
        self.finish(prepared, order, "farthest insertion")
    }

    /// Christofides with [`AutoMatching`].
    pub fn christofides(&self) -> Result<PathResult> {
        self.christofides_with(&AutoMatching::default())
    }

    /// Christofides with a caller-supplied matcher.
    pub fn christofides_with<M>(&self, matcher: &M) -> Result<PathResult>
    where
        M: PerfectMatching + ?Sized,
    {
        let prepared = self.prepared()?;
        let order = christofides(prepared.matrix(), prepared.vertices(), matcher)?;
        self.finish(prepared, order, "christofides")
    }

    /// Shortcut walk around the doubled spanning tree.
    pub fn double_tree(&self) -> Result<PathResult> {
        let prepared = self.prepared()?;
        let order = double_tree(prepared.matrix(), prepared.vertices());
        self.finish(prepared, order, "double tree")
    }

    /// Simulated annealing from the identity order.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidInput`] for an invalid cooling schedule, plus the
    /// errors of [`prepared`](Self::prepared).
    pub fn simulated_annealing(&self, config: &AnnealingConfig) -> Result<PathResult> {
        let prepared = self.prepared()?;
        let result = anneal(prepared.matrix(), prepared.vertices(), config)?;
        log::debug!(
            "annealing: {} moves over {} temperature steps",
            result.iterations,
            result.temperature_steps
        );
        self.finish(prepared, result.order, "simulated annealing")
    }

    /// Sums matrix costs along consecutive nodes of `path`.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidInput`] if a node id is not part of the problem.
    pub fn estimate_total_path_cost(&self, path: &[Node]) -> Result<f64> {
        let prepared = self.prepared()?;
        let index: HashMap<&str, usize> = prepared
            .vertices()
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id(), i))
            .collect();
        let indices = path
            .iter()
            .map(|node| {
                index
                    .get(node.id())
                    .copied()
                    .ok_or_else(|| TourError::invalid_input(format!("unknown node {}", node.id())))
            })
            .collect::<Result<Vec<usize>>>()?;
        Ok(prepared.matrix().path_cost(&indices))
    }

    fn finish(&self, prepared: &PreparedMatrix, mut order: Vec<usize>, heuristic: &str) -> Result<PathResult> {
        let vertices = prepared.vertices();
        if !vertices.is_path() {
            order.push(vertices.start());
        }

        let cost = prepared.matrix().path_cost(&order);
        log::debug!("{heuristic}: {} stops, cost {cost:.4}", order.len());
        let result = PathResult::new(vertices.to_nodes(&order), cost);

        if !self.config.reconstruct_route {
            return Ok(result);
        }
        let routes = prepared.routes().ok_or_else(|| {
            TourError::ReconstructionUnavailable("routes were not stored at build time".into())
        })?;
        let route = if vertices.len() == 1 {
            vec![vertices.node(vertices.start()).clone()]
        } else {
            routes.stitch(&order)?
        };
        Ok(result.with_route(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Node> {
        vec![Node::at(0.0, 1.0), Node::at(1.0, 1.0), Node::at(1.0, 0.0)]
    }

    fn built(planner: TourPlanner) -> TourPlanner {
        let mut planner = planner;
        planner.build().expect("reachable");
        planner
    }

    #[test]
    fn test_not_initialized() {
        let planner = TourPlanner::new(Node::at(0.0, 0.0), square());
        assert!(!planner.is_built());
        assert_eq!(planner.nearest_neighbor().unwrap_err(), TourError::NotInitialized);
        assert_eq!(planner.christofides().unwrap_err(), TourError::NotInitialized);
        assert_eq!(
            planner.estimate_total_path_cost(&square()).unwrap_err(),
            TourError::NotInitialized
        );
    }

    #[test]
    fn test_topology() {
        let start = Node::at(0.0, 0.0);
        assert_eq!(TourPlanner::new(start.clone(), square()).topology(), Topology::Tour);
        assert_eq!(
            TourPlanner::new(start.clone(), square()).with_end(Node::at(0.0, 0.0)).topology(),
            Topology::Tour
        );
        assert_eq!(
            TourPlanner::new(start, square()).with_end(Node::at(5.0, 5.0)).topology(),
            Topology::Path
        );
    }

    #[test]
    fn test_tour_closes_at_start() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()));
        let result = planner.nearest_insertion().expect("tour");
        assert_eq!(result.len(), 5);
        assert_eq!(result.path()[0], result.path()[4]);
        assert!((result.estimated_cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_estimate_matches_result() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()));
        let result = planner.double_tree().expect("tour");
        let estimate = planner.estimate_total_path_cost(result.path()).expect("known nodes");
        assert!((estimate - result.estimated_cost()).abs() < 1e-10);
    }

    #[test]
    fn test_estimate_unknown_node() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()));
        let err = planner
            .estimate_total_path_cost(&[Node::at(0.0, 0.0), Node::at(9.0, 9.0)])
            .expect_err("unknown");
        assert!(matches!(err, TourError::InvalidInput(_)));
    }

    #[test]
    fn test_reconfigure_resets_build() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()));
        assert!(planner.is_built());
        let planner = planner.with_metric(Metric::Manhattan);
        assert!(!planner.is_built());
    }

    #[test]
    fn test_reconstruction_without_routes() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()).with_route_reconstruction(true));
        let err = planner.nearest_neighbor().expect_err("straight legs carry no route");
        assert!(matches!(err, TourError::ReconstructionUnavailable(_)));
    }

    #[test]
    fn test_single_location() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), Vec::new()));
        let result = planner.farthest_insertion().expect("trivial");
        assert_eq!(result.len(), 2);
        assert_eq!(result.estimated_cost(), 0.0);
    }

    #[test]
    fn test_annealing_matches_square() {
        let planner = built(TourPlanner::new(Node::at(0.0, 0.0), square()));
        let result = planner
            .simulated_annealing(&AnnealingConfig::default().with_cooling_rate(0.9))
            .expect("valid config");
        assert_eq!(result.len(), 5);
        assert!((result.estimated_cost() - 4.0).abs() < 1e-10);
    }
}
