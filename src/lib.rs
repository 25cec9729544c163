//! # u-tour
//!
//! Visiting-order construction for closed tours (TSP) and fixed-endpoint
//! paths (HPP) over a set of planar locations, optionally routed around
//! obstacles on a grid.
//!
//! ## Modules
//!
//! - [`models`]: locations, vertex roles, edges and results
//! - [`distance`]: cost matrix, distance providers and parallel matrix
//!   construction
//! - [`mst`]: Prim spanning tree, adjacency multigraph, Eulerian walk and
//!   shortcutting
//! - [`matching`]: minimum-weight perfect matching providers
//! - [`constructive`]: nearest neighbor, insertion, Christofides and double
//!   tree
//! - [`local_search`]: simulated annealing
//! - [`planner`]: [`TourPlanner`], the entry point tying it together
//!
//! ## Example
//!
//! ```
//! use u_tour::models::Node;
//! use u_tour::TourPlanner;
//!
//! let nodes = vec![Node::at(1.0, 5.0)];
//! let mut planner = TourPlanner::new(Node::at(0.0, 0.0), nodes).with_end(Node::at(2.0, 0.0));
//! planner.build().unwrap();
//!
//! let path = planner.christofides().unwrap();
//! assert_eq!(path.ids(), vec!["0,0", "1,5", "2,0"]);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod matching;
pub mod models;
pub mod mst;
pub mod planner;

pub use error::{Result, TourError};
pub use planner::TourPlanner;
