//! Location node type.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A location in the plane with a stable identifier.
///
/// Equality, hashing and ordering use only the identifier: two nodes at the
/// same coordinates but from different source labels are distinct, and a
/// node list sorts lexically by id.
///
/// # Examples
///
/// ```
/// use u_tour::models::Node;
///
/// let a = Node::new("A1", 0.0, 0.0);
/// let b = Node::new("B1", 3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// assert!(a < b);
/// assert_eq!(a, Node::new("A1", 9.0, 9.0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: String,
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Creates a node whose identifier is its coordinate pair, `"x,y"`.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(format!("{x},{y}"), x, y)
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
