//! Stochastic improvement of a complete visiting order.
//!
//! - [`anneal`]: simulated annealing with segment reversal and segment
//!   relocation moves

mod annealing;

pub use annealing::{anneal, anneal_with_rng, AnnealingConfig, AnnealingResult};
