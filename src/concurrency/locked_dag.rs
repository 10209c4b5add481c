//! `LockedDag` — a [`Dag`] behind one exclusive lock.
//!
//! Every operation acquires the lock for its whole duration and releases it on
//! return, error paths included. Traversals hold the lock across the entire
//! walk, so the caller's per-vertex callback runs while the lock is held: no
//! other thread can mutate or query the graph mid-walk, and the callback must
//! not call back into the same `LockedDag` (the lock is not reentrant, so that
//! deadlocks).
//!
//! Callbacks that do need to re-enter can walk a [`LockedDag::snapshot`]
//! instead, trading "consistent during the walk" for "consistent as of the
//! snapshot".

use std::borrow::Borrow;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::graph::{Dag, Vertex};

/// A thread-safe, lock-serialised DAG.
///
/// Share it by reference across scoped threads or behind an `Arc`.
/// `LockedDag<T>` is `Send + Sync` whenever `T: Send + Sync`.
pub struct LockedDag<T> {
    lock: Mutex<Dag<T>>,
}

impl<T> LockedDag<T> {
    /// Creates an empty locked graph.
    pub fn new() -> Self {
        Self::from(Dag::new())
    }

    /// Creates an empty locked graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(Dag::with_capacity(capacity))
    }

    /// Acquires the lock and returns a guard giving exclusive access to the
    /// underlying graph, for running several operations as one critical
    /// section.
    ///
    /// A lock poisoned by a panicking callback is recovered: traversals never
    /// mutate, and every mutation leaves the graph consistent edge by edge.
    pub fn lock(&self) -> LockedDagGuard<'_, T> {
        LockedDagGuard {
            guard: self.lock.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Consumes the wrapper and returns the graph.
    pub fn into_inner(self) -> Dag<T> {
        self.lock.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clones the graph under the lock and releases it.
    ///
    /// Vertex identities are shared with the locked graph.
    pub fn snapshot(&self) -> Dag<T> {
        let dag = self.lock().clone();
        #[cfg(feature = "tracing")]
        tracing::trace!(vertices = dag.len(), "snapshot taken");
        dag
    }

    /// See [`Dag::add_vertex`].
    ///
    /// # Errors
    /// Returns [`DagError::DuplicateVertex`](crate::DagError::DuplicateVertex)
    /// if the vertex is already a member.
    pub fn add_vertex(&self, vertex: Vertex<T>) -> Result<usize> {
        self.lock().add_vertex(vertex)
    }

    /// See [`Dag::contains`].
    pub fn contains(&self, vertex: &Vertex<T>) -> bool {
        self.lock().contains(vertex)
    }

    /// See [`Dag::index_of`].
    pub fn index_of(&self, vertex: &Vertex<T>) -> Option<usize> {
        self.lock().index_of(vertex)
    }

    /// See [`Dag::len`].
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// See [`Dag::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// See [`Dag::edge_count`].
    pub fn edge_count(&self) -> usize {
        self.lock().edge_count()
    }

    /// See [`Dag::has_edge`].
    pub fn has_edge(&self, from: &Vertex<T>, to: &Vertex<T>) -> bool {
        self.lock().has_edge(from, to)
    }

    /// See [`Dag::get_children`].
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex) if
    /// `vertex` is not a member.
    pub fn get_children(&self, vertex: &Vertex<T>) -> Result<Vec<Vertex<T>>> {
        self.lock().get_children(vertex)
    }

    /// See [`Dag::get_parents`].
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex) if
    /// `vertex` is not a member.
    pub fn get_parents(&self, vertex: &Vertex<T>) -> Result<Vec<Vertex<T>>> {
        self.lock().get_parents(vertex)
    }

    /// See [`Dag::set_children`]. The whole call is one critical section.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex)
    /// naming the unknown endpoint; earlier edges of the call stay applied.
    pub fn set_children<I>(&self, parent: &Vertex<T>, children: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Vertex<T>>,
    {
        self.lock().set_children(parent, children)
    }

    /// See [`Dag::set_parents`]. The whole call is one critical section.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`](crate::DagError::UnknownVertex)
    /// naming the unknown endpoint; earlier edges of the call stay applied.
    pub fn set_parents<I>(&self, child: &Vertex<T>, parents: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Vertex<T>>,
    {
        self.lock().set_parents(child, parents)
    }

    /// See [`Dag::sources`].
    pub fn sources(&self) -> Vec<Vertex<T>> {
        self.lock().sources()
    }

    /// See [`Dag::sinks`].
    pub fn sinks(&self) -> Vec<Vertex<T>> {
        self.lock().sinks()
    }

    /// See [`Dag::bfs`]. `operation` runs with the lock held and must not
    /// call into this `LockedDag`.
    pub fn bfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.lock().bfs(operation);
    }

    /// See [`Dag::preorder_dfs`]. `operation` runs with the lock held and must
    /// not call into this `LockedDag`.
    pub fn preorder_dfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.lock().preorder_dfs(operation);
    }

    /// See [`Dag::postorder_dfs`]. `operation` runs with the lock held and
    /// must not call into this `LockedDag`.
    pub fn postorder_dfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.lock().postorder_dfs(operation);
    }
}

impl<T> Default for LockedDag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Dag<T>> for LockedDag<T> {
    fn from(dag: Dag<T>) -> Self {
        Self {
            lock: Mutex::new(dag),
        }
    }
}

/// RAII guard for exclusive access to a [`LockedDag`]'s graph.
pub struct LockedDagGuard<'a, T> {
    guard: MutexGuard<'a, Dag<T>>,
}

impl<T> Deref for LockedDagGuard<'_, T> {
    type Target = Dag<T>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for LockedDagGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
