//! Error types for graph mutation and lookup.
//!
//! Every failure is a caller precondition error: nothing is transient, nothing
//! is retried internally, and nothing terminates the process.

use core::fmt;
use thiserror::Error;

/// Which argument of an operation referred to a vertex outside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The single vertex argument of a lookup (`get_children`, `get_parents`).
    Vertex,
    /// The parent side of an edge declaration.
    Parent,
    /// The child side of an edge declaration.
    Child,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Vertex => "vertex",
            Endpoint::Parent => "parent vertex",
            Endpoint::Child => "child vertex",
        })
    }
}

/// Errors returned by [`Dag`](crate::Dag) and [`LockedDag`](crate::LockedDag).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DagError {
    /// `add_vertex` was given a vertex that is already a member.
    ///
    /// The graph is left exactly as it was before the call.
    #[error("vertex already in graph at index {index}")]
    DuplicateVertex {
        /// Index the vertex was assigned when it was first added.
        index: usize,
    },

    /// An argument vertex is not a member of the graph.
    ///
    /// For multi-target edge declarations, edges applied before the unknown
    /// target are kept.
    #[error("{endpoint} not in graph")]
    UnknownVertex {
        /// The argument that was not recognised.
        endpoint: Endpoint,
    },
}

impl DagError {
    /// Returns the offending endpoint for [`DagError::UnknownVertex`].
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            DagError::UnknownVertex { endpoint } => Some(*endpoint),
            DagError::DuplicateVertex { .. } => None,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DagError>;
