//! `Vertex` — an identity-bearing handle around one opaque payload.
//!
//! A vertex's identity is its allocation, not its value: two vertices built
//! from equal payloads are distinct, while clones of one vertex are the same
//! vertex. Graphs key their membership tables on this identity and never embed
//! any graph state in the vertex itself.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::Result;
use crate::graph::Dag;

/// A graph vertex carrying an immutable payload.
///
/// Cloning is cheap (one reference-count increment) and preserves identity.
/// The payload is dropped once the last handle goes away, which in practice
/// means once every graph holding it has been dropped.
pub struct Vertex<T> {
    inner: Arc<T>,
}

impl<T> Vertex<T> {
    /// Creates a new vertex with a fresh identity.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn value(&self) -> &T {
        &self.inner
    }

    /// Returns `true` if both handles refer to the same vertex.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Children of this vertex in `dag`, in index order.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex) if
    /// this vertex is not a member of `dag`.
    pub fn children(&self, dag: &Dag<T>) -> Result<Vec<Vertex<T>>> {
        dag.get_children(self)
    }

    /// Parents of this vertex in `dag`, in index order.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex) if
    /// this vertex is not a member of `dag`.
    pub fn parents(&self, dag: &Dag<T>) -> Result<Vec<Vertex<T>>> {
        dag.get_parents(self)
    }

    #[inline]
    fn addr(&self) -> *const T {
        Arc::as_ptr(&self.inner)
    }
}

impl<T> Clone for Vertex<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Vertex<T> {}

impl<T> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("addr", &self.addr())
            .field("value", self.value())
            .finish()
    }
}

impl<T> From<T> for Vertex<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
