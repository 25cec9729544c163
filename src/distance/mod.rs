//! Cost matrices and the providers that fill them.
//!
//! - [`DistanceMatrix`]: dense n×n cost table
//! - [`DistanceProvider`]: pairwise cost query, with [`StraightLine`] and
//!   [`GridSearch`] implementations
//! - [`build_matrix`]: parallel construction of a [`PreparedMatrix`]

mod builder;
mod grid;
mod matrix;
mod provider;

pub use builder::{build_matrix, PreparedMatrix, RouteTable};
pub use grid::{GridSearch, ObstacleGrid};
pub use matrix::DistanceMatrix;
pub use provider::{DistanceProvider, Leg, Metric, StraightLine};
