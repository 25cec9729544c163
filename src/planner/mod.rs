//! Public entry point: configure once, build the cost matrix, then ask for
//! tours from any heuristic.

mod config;
mod tour_planner;

pub use config::PlannerConfig;
pub use tour_planner::TourPlanner;
