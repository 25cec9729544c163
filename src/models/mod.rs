//! Domain model types for tour construction.
//!
//! Provides the core abstractions: location nodes, the role each matrix
//! index plays (start, end, regular), weighted edges, and the result type
//! returned by every heuristic.

mod edge;
mod node;
mod path_result;
mod vertex;

pub use edge::Edge;
pub use node::Node;
pub use path_result::PathResult;
pub use vertex::{Topology, VertexRole, VertexSet};
