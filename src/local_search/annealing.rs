//! Simulated annealing over a full visiting order.
//!
//! # Algorithm
//!
//! Start from the identity order (start, regular vertices by index, then the
//! start again for a tour or the end for a path). Each move picks interior
//! positions `i < j` (the first and last entries never move) and, on a fair
//! coin flip, either reverses `path[i..=j]` or cuts it out and reinserts it
//! at another interior position.
//!
//! A move that lowers the cost is always taken. Otherwise it is taken with
//! probability `exp(-delta / T)`. The temperature is multiplied by the
//! cooling rate once enough improving moves, or enough attempts, have
//! happened at the current temperature; the run ends when it drops below
//! the minimum temperature.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::VertexSet;

/// Cooling schedule and stopping rules.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_cooling_rate(0.95)
///     .with_seed(7);
/// assert_eq!(config.initial_temperature, 1.0);
/// assert_eq!(config.max_attempts_per_temperature, 1500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Temperature at the first step.
    pub initial_temperature: f64,
    /// The run ends once the temperature falls below this.
    pub min_temperature: f64,
    /// Multiplier applied at each cooling step, in (0, 1).
    pub cooling_rate: f64,
    /// Improving moves before cooling; `None` means 10 × vertex count.
    pub successes_per_temperature: Option<usize>,
    /// Attempted moves before cooling.
    pub max_attempts_per_temperature: usize,
    /// Hard cap on attempted moves over the whole run.
    pub max_iterations: Option<u64>,
    /// Seed for the random source.
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            cooling_rate: 0.99,
            successes_per_temperature: None,
            max_attempts_per_temperature: 1500,
            max_iterations: None,
            seed: 42,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the temperature below which the run stops.
    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Sets the cooling multiplier.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the improving moves per temperature.
    pub fn with_successes_per_temperature(mut self, n: usize) -> Self {
        self.successes_per_temperature = Some(n);
        self
    }

    /// Sets the attempted moves per temperature.
    pub fn with_max_attempts_per_temperature(mut self, n: usize) -> Self {
        self.max_attempts_per_temperature = n;
        self
    }

    /// Caps the attempted moves over the whole run.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Improving moves that trigger cooling for `vertices` vertices.
    fn successes_target(&self, vertices: usize) -> usize {
        self.successes_per_temperature
            .unwrap_or(10 * vertices)
            .max(1)
    }

    fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(TourError::invalid_input("initial temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(TourError::invalid_input("minimum temperature must be positive"));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(TourError::invalid_input("cooling rate must lie in (0, 1)"));
        }
        if self.max_attempts_per_temperature == 0 {
            return Err(TourError::invalid_input("attempts per temperature must be positive"));
        }
        Ok(())
    }
}

/// Outcome of an annealing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealingResult {
    /// Best order found; for a tour the closing return is not included.
    pub order: Vec<usize>,
    /// Cost of `order`, including the closing return of a tour.
    pub cost: f64,
    /// Best cost recorded after each temperature step.
    pub best_history: Vec<f64>,
    /// Attempted moves.
    pub iterations: u64,
    /// Cooling steps taken.
    pub temperature_steps: usize,
}

/// Anneals with a generator seeded from `config.seed`.
///
/// # Errors
///
/// [`TourError::InvalidInput`] for a non-positive temperature or a cooling
/// rate outside (0, 1).
///
/// # Examples
///
/// ```
/// use u_tour::distance::{build_matrix, Metric, StraightLine};
/// use u_tour::local_search::{anneal, AnnealingConfig};
/// use u_tour::models::{Node, VertexSet};
///
/// let nodes = vec![Node::at(1.0, 1.0), Node::at(0.0, 1.0), Node::at(1.0, 0.0)];
/// let set = VertexSet::new(Node::at(0.0, 0.0), None, &nodes);
/// let prepared = build_matrix(set, &StraightLine, Metric::Euclidean, false).unwrap();
///
/// let result = anneal(prepared.matrix(), prepared.vertices(), &AnnealingConfig::default()).unwrap();
/// assert!((result.cost - 4.0).abs() < 1e-10);
/// ```
pub fn anneal(
    distances: &DistanceMatrix,
    vertices: &VertexSet,
    config: &AnnealingConfig,
) -> Result<AnnealingResult> {
    let mut rng = u_numflow::random::create_rng(config.seed);
    anneal_with_rng(distances, vertices, config, &mut rng)
}

/// Anneals drawing every random decision from `rng`.
pub fn anneal_with_rng<R: Rng>(
    distances: &DistanceMatrix,
    vertices: &VertexSet,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<AnnealingResult> {
    config.validate()?;

    let start = vertices.start();
    let mut current: Vec<usize> = std::iter::once(start).chain(vertices.regular()).collect();
    current.push(vertices.end().unwrap_or(start));
    if distances.size() == 1 {
        current.truncate(1);
    }

    let mut current_cost = distances.path_cost(&current);
    let mut best = current.clone();
    let mut best_cost = current_cost;
    let mut best_history = Vec::new();
    let mut iterations = 0u64;
    let mut temperature_steps = 0usize;

    // At least two interior positions are needed for any move.
    if current.len() >= 4 {
        let successes_needed = config.successes_target(distances.size());
        let mut temperature = config.initial_temperature;
        let mut successes = 0usize;
        let mut attempts = 0usize;

        'outer: while temperature >= config.min_temperature {
            if config.max_iterations.is_some_and(|cap| iterations >= cap) {
                break 'outer;
            }
            iterations += 1;
            attempts += 1;

            let candidate = neighbor(&current, rng);
            let candidate_cost = distances.path_cost(&candidate);
            let delta = candidate_cost - current_cost;

            if delta < 0.0 {
                current = candidate;
                current_cost = candidate_cost;
                successes += 1;
                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            } else if rng.random::<f64>() < (-delta / temperature).exp() {
                current = candidate;
                current_cost = candidate_cost;
            }

            if successes >= successes_needed || attempts >= config.max_attempts_per_temperature {
                temperature *= config.cooling_rate;
                temperature_steps += 1;
                best_history.push(best_cost);
                log::trace!(
                    "anneal step {temperature_steps}: T={temperature:.6} current={current_cost:.4} best={best_cost:.4} ({successes} improving / {attempts} tried)"
                );
                successes = 0;
                attempts = 0;
            }
        }
    }

    if vertices.end().is_none() && best.len() > 1 {
        best.pop();
    }

    Ok(AnnealingResult {
        order: best,
        cost: best_cost,
        best_history,
        iterations,
        temperature_steps,
    })
}

/// Reverses or relocates a random interior segment.
fn neighbor<R: Rng>(path: &[usize], rng: &mut R) -> Vec<usize> {
    let last = path.len() - 1;
    let i = rng.random_range(1..last - 1);
    let j = rng.random_range(i + 1..last);

    let mut next = path.to_vec();
    if rng.random_bool(0.5) {
        next[i..=j].reverse();
        return next;
    }

    let segment: Vec<usize> = next.drain(i..=j).collect();
    // Interior insert positions in what remains are 1..=rest_last, except i.
    let rest_last = next.len() - 1;
    if rest_last < 2 {
        next.splice(i..i, segment.into_iter().rev());
        return next;
    }
    let mut at = rng.random_range(1..rest_last);
    if at >= i {
        at += 1;
    }
    next.splice(at..at, segment);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{build_matrix, Metric, PreparedMatrix, StraightLine};
    use crate::models::Node;

    fn prepare(start: Node, end: Option<Node>, nodes: &[Node]) -> PreparedMatrix {
        let set = VertexSet::new(start, end, nodes);
        build_matrix(set, &StraightLine, Metric::Euclidean, false).expect("finite")
    }

    fn scattered() -> Vec<Node> {
        vec![
            Node::at(4.0, 7.0),
            Node::at(9.0, 1.0),
            Node::at(2.0, 3.0),
            Node::at(8.0, 8.0),
            Node::at(5.0, 0.0),
            Node::at(1.0, 9.0),
            Node::at(7.0, 4.0),
        ]
    }

    fn quick() -> AnnealingConfig {
        AnnealingConfig::default()
            .with_cooling_rate(0.9)
            .with_max_attempts_per_temperature(200)
    }

    #[test]
    fn test_order_is_permutation() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        let mut sorted = result.order.clone();
        sorted.sort();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
        assert_eq!(result.order[0], 0);

        let mut closed = result.order.clone();
        closed.push(0);
        assert!((p.matrix().path_cost(&closed) - result.cost).abs() < 1e-9);
    }

    #[test]
    fn test_improves_on_identity() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let identity: Vec<usize> = (0..8).chain(std::iter::once(0)).collect();
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        assert!(result.cost <= p.matrix().path_cost(&identity) + 1e-10);
    }

    #[test]
    fn test_path_endpoints_fixed() {
        let p = prepare(Node::at(0.0, 0.0), Some(Node::at(10.0, 0.0)), &scattered());
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        assert_eq!(result.order.len(), 9);
        assert_eq!(result.order[0], 0);
        assert_eq!(result.order[8], 1);
        assert!(result.cost.is_finite());
    }

    #[test]
    fn test_best_history_non_increasing() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        assert!(!result.best_history.is_empty());
        assert!(result.best_history.windows(2).all(|w| w[1] <= w[0]));
        assert!((result.best_history[result.best_history.len() - 1] - result.cost).abs() < 1e-10);
    }

    #[test]
    fn test_same_seed_same_result() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let a = anneal(p.matrix(), p.vertices(), &quick().with_seed(3)).expect("valid config");
        let b = anneal(p.matrix(), p.vertices(), &quick().with_seed(3)).expect("valid config");
        assert_eq!(a.order, b.order);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_iteration_cap() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let result = anneal(p.matrix(), p.vertices(), &quick().with_max_iterations(50)).expect("valid");
        assert_eq!(result.iterations, 50);
    }

    #[test]
    fn test_too_small_to_move() {
        let p = prepare(Node::at(0.0, 0.0), None, &[Node::at(1.0, 0.0)]);
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        assert_eq!(result.order, vec![0, 1]);
        assert!((result.cost - 2.0).abs() < 1e-10);
        assert_eq!(result.iterations, 0);

        let p = prepare(Node::at(0.0, 0.0), None, &[]);
        let result = anneal(p.matrix(), p.vertices(), &quick()).expect("valid config");
        assert_eq!(result.order, vec![0]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_successes_default_scales_with_vertices() {
        assert_eq!(AnnealingConfig::default().successes_target(4), 40);
        assert_eq!(AnnealingConfig::default().successes_target(0), 1);
        let config = AnnealingConfig::default().with_successes_per_temperature(7);
        assert_eq!(config.successes_target(4), 7);
    }

    #[test]
    fn test_invalid_config() {
        let p = prepare(Node::at(0.0, 0.0), None, &scattered());
        let bad = AnnealingConfig::default().with_cooling_rate(1.5);
        assert!(matches!(
            anneal(p.matrix(), p.vertices(), &bad),
            Err(TourError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_neighbor_keeps_ends() {
        let mut rng = u_numflow::random::create_rng(42);
        let path = vec![0, 2, 3, 4, 5, 6, 1];
        for _ in 0..200 {
            let next = neighbor(&path, &mut rng);
            assert_eq!(next.len(), path.len());
            assert_eq!(next[0], 0);
            assert_eq!(next[6], 1);
            let mut sorted = next.clone();
            sorted.sort();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: AnnealingConfig =
            serde_json::from_str(r#"{"cooling_rate": 0.9}"#).expect("partial config");
        assert_eq!(config.cooling_rate, 0.9);
        assert_eq!(config.min_temperature, 1e-4);
        assert_eq!(config.successes_per_temperature, None);
    }
}
