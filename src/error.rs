//! Error type shared by matrix construction and every heuristic.

use thiserror::Error as ThisError;

/// Failure raised by the tour-construction engine.
///
/// `Clone` so that a failed matrix construction can be stored once and
/// handed back verbatim on every later call.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum TourError {
    /// A pairwise cost resolved to infinity (no route between the two).
    #[error("location {to} is unreachable from {from}")]
    UnreachableLocation {
        /// Identifier of the source node.
        from: String,
        /// Identifier of the target node.
        to: String,
    },
    /// A heuristic was invoked before the cost matrix was built.
    #[error("cost matrix has not been built")]
    NotInitialized,
    /// The insertion heuristic found no edge to split for a vertex.
    #[error("no finite splice point for vertex {vertex}")]
    NoSplicePoint {
        /// Matrix index of the vertex that could not be inserted.
        vertex: usize,
    },
    /// Route reconstruction was requested but no routes are stored.
    #[error("route reconstruction unavailable: {0}")]
    ReconstructionUnavailable(String),
    /// The problem shape is not supported by the requested algorithm.
    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),
    /// The caller supplied malformed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    /// Builds [`TourError::UnreachableLocation`] from two node ids.
    pub fn unreachable(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnreachableLocation {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Builds [`TourError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Builds [`TourError::UnsupportedTopology`].
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedTopology(message.into())
    }
}
