//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::distance::Metric;

/// Settings fixed before the cost matrix is built.
///
/// # Examples
///
/// ```
/// use u_tour::distance::Metric;
/// use u_tour::planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_metric(Metric::Manhattan)
///     .with_route_reconstruction(true);
/// assert_eq!(config.metric, Metric::Manhattan);
/// assert!(config.reconstruct_route);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Distance metric handed to the provider.
    pub metric: Metric,
    /// Keep per-pair routes and stitch them into every result.
    pub reconstruct_route: bool,
}

impl PlannerConfig {
    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Turns per-pair route storage and stitching on or off.
    pub fn with_route_reconstruction(mut self, enabled: bool) -> Self {
        self.reconstruct_route = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = PlannerConfig::default();
        assert_eq!(config.metric, Metric::Euclidean);
        assert!(!config.reconstruct_route);
    }

    #[test]
    fn test_partial_json() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"reconstruct_route": true}"#).expect("partial config");
        assert_eq!(config.metric, Metric::Euclidean);
        assert!(config.reconstruct_route);
    }
}
