//! Minimum spanning tree engine.
//!
//! - [`build_mst`]: Prim's algorithm over a dense cost matrix, O(n²)
//! - [`AdjacencyTree`]: per-vertex edge arena with weight or leaf-priority
//!   ordering and degree analysis
//! - [`eulerian_tour`] / [`hamiltonian_path`]: edge-depletion walk and
//!   first-visit shortcutting

mod euler;
mod prim;
mod tree;

pub(crate) use euler::anchor_endpoints;
pub use euler::{eulerian_tour, hamiltonian_path};
pub use prim::build_mst;
pub use tree::{AdjacencyTree, SortPolicy};
