//! Constructive heuristics producing a visiting order from a cost matrix.
//!
//! - [`nearest_neighbor`]: Greedy nearest-neighbor walk, O(n²)
//! - [`insertion`]: Nearest / farthest insertion with cheapest splice, O(n³)
//! - [`christofides`]: MST + odd-vertex matching + Eulerian shortcut
//! - [`double_tree`]: Doubled MST with leaf-priority Eulerian shortcut, O(n²)
//!
//! Every heuristic returns each vertex index exactly once, starting at the
//! start vertex and, for a path problem, ending at the end vertex.

mod christofides;
mod double_tree;
mod insertion;
mod nearest_neighbor;

pub use christofides::christofides;
pub use double_tree::double_tree;
pub use insertion::{insertion, InsertionMode};
pub use nearest_neighbor::nearest_neighbor;
