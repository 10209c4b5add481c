//! The graph store: vertices, forward/backward adjacency and source/sink sets.
//!
//! Vertices are keyed by identity and assigned a stable positional index on
//! insertion. Edges are kept twice, as forward (children) and backward
//! (parents) adjacency lists sorted by index, so both directions answer in
//! index order without a scan. Source and sink sets are maintained
//! incrementally on every edge insertion.
//!
//! Acyclicity is **not** checked: callers are trusted to only declare edges
//! that keep the structure a DAG.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};

use crate::error::{DagError, Endpoint, Result};
use crate::graph::traversal::{Bfs, DagTopology, PostorderDfs, PreorderDfs};
use crate::graph::Vertex;

#[cfg(debug_assertions)]
mod math_assert;

#[cfg(debug_assertions)]
use math_assert::math_assert_msg;

/// An in-memory directed acyclic graph over identity-keyed vertices.
///
/// Not synchronised; wrap it in a [`LockedDag`](crate::LockedDag) to share it
/// between threads.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(\log n)\) amortized | hash insert plus source/sink sets |
/// | `contains` / `index_of` | \(O(1)\) | identity hash lookup |
/// | `set_children` / `set_parents` | \(O(k \cdot d)\) | `k` targets, sorted insert into degree-`d` lists |
/// | `get_children` / `get_parents` | \(O(d)\) | clones `d` handles |
/// | `sources` / `sinks` | \(O(s)\) | reads the maintained set, no graph scan |
/// | `bfs` / `preorder_dfs` / `postorder_dfs` | \(O(n + m)\) | one expansion per vertex |
pub struct Dag<T> {
    vertices: Vec<Vertex<T>>,
    index: HashMap<Vertex<T>, usize>,
    forward: Vec<Vec<usize>>,
    backward: Vec<Vec<usize>>,
    sources: BTreeSet<usize>,
    sinks: BTreeSet<usize>,
    edges: usize,
}

impl<T> Dag<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            forward: Vec::with_capacity(capacity),
            backward: Vec::with_capacity(capacity),
            sources: BTreeSet::new(),
            sinks: BTreeSet::new(),
            edges: 0,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Adds `vertex` and returns its positional index.
    ///
    /// A new vertex has no edges, so it starts out as both a source and a sink.
    ///
    /// # Errors
    /// Returns [`DagError::DuplicateVertex`] if the same vertex (by identity)
    /// is already a member; the graph is left unchanged.
    pub fn add_vertex(&mut self, vertex: Vertex<T>) -> Result<usize> {
        if let Some(&index) = self.index.get(&vertex) {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, "rejected duplicate vertex");
            return Err(DagError::DuplicateVertex { index });
        }

        let idx = self.vertices.len();
        self.index.insert(vertex.clone(), idx);
        self.vertices.push(vertex);
        self.forward.push(Vec::new());
        self.backward.push(Vec::new());
        self.sources.insert(idx);
        self.sinks.insert(idx);

        #[cfg(feature = "tracing")]
        tracing::trace!(index = idx, "vertex added");
        #[cfg(debug_assertions)]
        self.debug_validate();
        Ok(idx)
    }

    /// Returns `true` if `vertex` (by identity) is a member.
    #[inline]
    pub fn contains(&self, vertex: &Vertex<T>) -> bool {
        self.index.contains_key(vertex)
    }

    /// Positional index assigned to `vertex` when it was added.
    #[inline]
    pub fn index_of(&self, vertex: &Vertex<T>) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Vertex stored at positional `index`.
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<&Vertex<T>> {
        self.vertices.get(index)
    }

    /// All vertices in index (insertion) order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex<T>> + '_ {
        self.vertices.iter()
    }

    /// Children of `vertex`, in index order.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`] if `vertex` is not a member.
    pub fn get_children(&self, vertex: &Vertex<T>) -> Result<Vec<Vertex<T>>> {
        let idx = self.lookup(vertex, Endpoint::Vertex)?;
        Ok(self.resolve(&self.forward[idx]))
    }

    /// Parents of `vertex`, in index order.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`] if `vertex` is not a member.
    pub fn get_parents(&self, vertex: &Vertex<T>) -> Result<Vec<Vertex<T>>> {
        let idx = self.lookup(vertex, Endpoint::Vertex)?;
        Ok(self.resolve(&self.backward[idx]))
    }

    /// Returns `true` if the edge `from -> to` exists.
    ///
    /// Vertices outside the graph have no edges.
    pub fn has_edge(&self, from: &Vertex<T>, to: &Vertex<T>) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(u), Some(v)) => self.forward[u].binary_search(&v).is_ok(),
            _ => false,
        }
    }

    /// Declares an edge `parent -> child` for every vertex in `children`.
    ///
    /// Re-declaring an existing edge is a no-op.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`] naming [`Endpoint::Parent`] if
    /// `parent` is not a member (nothing is applied), or [`Endpoint::Child`]
    /// at the first unknown child. Edges to the children before it stay
    /// applied; the call is not transactional.
    pub fn set_children<I>(&mut self, parent: &Vertex<T>, children: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Vertex<T>>,
    {
        let p = self.lookup(parent, Endpoint::Parent)?;
        for child in children {
            let c = self.lookup(child.borrow(), Endpoint::Child)?;
            self.insert_edge(p, c);
        }
        #[cfg(debug_assertions)]
        self.debug_validate();
        Ok(())
    }

    /// Declares an edge `parent -> child` for every vertex in `parents`.
    ///
    /// Re-declaring an existing edge is a no-op.
    ///
    /// # Errors
    /// Returns [`DagError::UnknownVertex`] naming [`Endpoint::Child`] if
    /// `child` is not a member (nothing is applied), or [`Endpoint::Parent`]
    /// at the first unknown parent. Edges from the parents before it stay
    /// applied; the call is not transactional.
    pub fn set_parents<I>(&mut self, child: &Vertex<T>, parents: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Vertex<T>>,
    {
        let c = self.lookup(child, Endpoint::Child)?;
        for parent in parents {
            let p = self.lookup(parent.borrow(), Endpoint::Parent)?;
            self.insert_edge(p, c);
        }
        #[cfg(debug_assertions)]
        self.debug_validate();
        Ok(())
    }

    /// Vertices with no incoming edge, in index order.
    pub fn sources(&self) -> Vec<Vertex<T>> {
        self.sources.iter().map(|&i| self.vertices[i].clone()).collect()
    }

    /// Vertices with no outgoing edge, in index order.
    pub fn sinks(&self) -> Vec<Vertex<T>> {
        self.sinks.iter().map(|&i| self.vertices[i].clone()).collect()
    }

    /// Breadth-first walk from every source, calling `operation` once per
    /// reachable vertex.
    pub fn bfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.walk("bfs", Bfs::new(self), operation);
    }

    /// Preorder depth-first walk from every source, calling `operation` on a
    /// vertex before anything reachable only through it.
    pub fn preorder_dfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.walk("preorder_dfs", PreorderDfs::new(self), operation);
    }

    /// Postorder depth-first walk from every source, calling `operation` on a
    /// vertex after the descendants it discovered.
    pub fn postorder_dfs<F>(&self, operation: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.walk("postorder_dfs", PostorderDfs::new(self), operation);
    }

    /// Lazy breadth-first walk; see [`Dag::bfs`].
    pub fn bfs_iter(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        Bfs::new(self).map(move |i| &self.vertices[i])
    }

    /// Lazy preorder walk; see [`Dag::preorder_dfs`].
    pub fn preorder_iter(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        PreorderDfs::new(self).map(move |i| &self.vertices[i])
    }

    /// Lazy postorder walk; see [`Dag::postorder_dfs`].
    pub fn postorder_iter(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        PostorderDfs::new(self).map(move |i| &self.vertices[i])
    }

    /// Checks the structural invariants by full scan.
    ///
    /// 1. forward and backward adjacency mirror each other
    /// 2. a vertex is a source iff it has no parents, a sink iff no children
    /// 3. the identity table and the positional index agree
    ///
    /// Returns `true` if all invariants hold.
    pub fn validate_invariants(&self) -> bool {
        self.invariant_violation().is_none()
    }

    fn invariant_violation(&self) -> Option<&'static str> {
        let n = self.vertices.len();
        if self.forward.len() != n || self.backward.len() != n || self.index.len() != n {
            return Some("storage lengths must match vertex count");
        }
        for (i, v) in self.vertices.iter().enumerate() {
            if self.index.get(v) != Some(&i) {
                return Some("identity table must map each vertex to its position");
            }
        }

        let mut forward_edges = 0;
        for u in 0..n {
            let children = &self.forward[u];
            if children.windows(2).any(|w| w[0] >= w[1]) {
                return Some("adjacency lists must be sorted and duplicate-free");
            }
            for &v in children {
                if v >= n || self.backward[v].binary_search(&u).is_err() {
                    return Some("every forward edge needs its backward mirror");
                }
            }
            forward_edges += children.len();
        }
        let backward_edges: usize = self.backward.iter().map(Vec::len).sum();
        if forward_edges != backward_edges || forward_edges != self.edges {
            return Some("forward and backward edge counts must match");
        }

        for u in 0..n {
            if self.sources.contains(&u) != self.backward[u].is_empty() {
                return Some("source set must equal the parentless vertices");
            }
            if self.sinks.contains(&u) != self.forward[u].is_empty() {
                return Some("sink set must equal the childless vertices");
            }
        }
        None
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        let violation = self.invariant_violation();
        math_assert_msg(violation.is_none(), violation.unwrap_or_default());
    }

    fn lookup(&self, vertex: &Vertex<T>, endpoint: Endpoint) -> Result<usize> {
        self.index_of(vertex).ok_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(%endpoint, "vertex not in graph");
            DagError::UnknownVertex { endpoint }
        })
    }

    fn resolve(&self, indices: &[usize]) -> Vec<Vertex<T>> {
        indices.iter().map(|&i| self.vertices[i].clone()).collect()
    }

    /// Inserts `p -> c` into both adjacency views and updates source/sink
    /// membership for this one edge.
    fn insert_edge(&mut self, p: usize, c: usize) {
        let Err(at) = self.forward[p].binary_search(&c) else {
            return;
        };
        self.forward[p].insert(at, c);
        if let Err(at) = self.backward[c].binary_search(&p) {
            self.backward[c].insert(at, p);
        }
        self.edges += 1;
        self.sinks.remove(&p);
        self.sources.remove(&c);

        #[cfg(feature = "tracing")]
        tracing::trace!(parent = p, child = c, "edge added");
    }

    fn walk<I, F>(&self, name: &'static str, order: I, mut operation: F)
    where
        I: Iterator<Item = usize>,
        F: FnMut(&Vertex<T>),
    {
        let mut visited = 0usize;
        for i in order {
            operation(&self.vertices[i]);
            visited += 1;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(walk = name, visited, "traversal finished");
        #[cfg(not(feature = "tracing"))]
        let _ = (name, visited);
    }
}

impl<T> DagTopology for Dag<T> {
    type Sources<'a> = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>
    where
        Self: 'a;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn source_indices(&self) -> Self::Sources<'_> {
        self.sources.iter().copied()
    }

    fn child_indices(&self, index: usize) -> &[usize] {
        &self.forward[index]
    }
}

impl<T> Default for Dag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Dag<T> {
    /// Clones the structure; vertex handles are shared, so identities carry
    /// over to the copy.
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            index: self.index.clone(),
            forward: self.forward.clone(),
            backward: self.backward.clone(),
            sources: self.sources.clone(),
            sinks: self.sinks.clone(),
            edges: self.edges,
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Dag<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dag")
            .field("vertices", &self.vertices)
            .field("forward", &self.forward)
            .field("sources", &self.sources)
            .field("sinks", &self.sinks)
            .finish()
    }
}
