//! Multi-root DAG walks: breadth-first, preorder DFS and postorder DFS.
//!
//! The walks are stateless algorithms over the [`DagTopology`] query surface
//! (vertex count, sources, children by positional index). Each one seeds from
//! every source, and keeps a visited set so a vertex with several parents is
//! expanded exactly once. None of them check for cycles; a cyclic edge set
//! still terminates, it just loses the ancestor/descendant ordering contract.
//!
//! ### Ordering guarantees
//! | Walk | Guarantee |
//! |------|-----------|
//! | [`Bfs`] | vertices come out in non-decreasing depth from the nearest source |
//! | [`PreorderDfs`] | a vertex comes out before anything reachable only through it |
//! | [`PostorderDfs`] | a vertex comes out after every descendant it discovered |
//!
//! Order among siblings and among sources is not part of the contract.

use std::collections::VecDeque;

use crate::graph::access::visited::VisitedSet;

/// Index-level view of a DAG, as needed by the walks.
///
/// Indices are dense in `0..vertex_count()`.
pub trait DagTopology {
    /// Iterator over source indices.
    type Sources<'a>: Iterator<Item = usize> + 'a
    where
        Self: 'a;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Indices of vertices with no incoming edge.
    fn source_indices(&self) -> Self::Sources<'_>;

    /// Out-neighbours of `index`, in index order.
    fn child_indices(&self, index: usize) -> &[usize];
}

/// Plain adjacency lists: `adjacency[u]` holds the children of `u`.
///
/// Sources are recomputed by a full scan on every walk.
impl DagTopology for [Vec<usize>] {
    type Sources<'a> = std::vec::IntoIter<usize>;

    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn source_indices(&self) -> Self::Sources<'_> {
        let mut has_parent = vec![false; self.len()];
        for &v in self.iter().flatten() {
            if let Some(flag) = has_parent.get_mut(v) {
                *flag = true;
            }
        }
        has_parent
            .iter()
            .enumerate()
            .filter_map(|(u, &p)| (!p).then_some(u))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn child_indices(&self, index: usize) -> &[usize] {
        &self[index]
    }
}

/// Breadth-first walk seeded with every source.
///
/// A vertex is yielded when it is dequeued; its unvisited children are
/// enqueued right after.
pub struct Bfs<'g, G: ?Sized> {
    graph: &'g G,
    visited: VisitedSet,
    queue: VecDeque<usize>,
}

impl<'g, G: DagTopology + ?Sized> Bfs<'g, G> {
    /// Creates a walk over `graph`.
    pub fn new(graph: &'g G) -> Self {
        let mut visited = VisitedSet::new(graph.vertex_count());
        let queue = graph
            .source_indices()
            .filter(|&s| visited.try_visit(s))
            .collect();
        Self {
            graph,
            visited,
            queue,
        }
    }
}

impl<G: DagTopology + ?Sized> Iterator for Bfs<'_, G> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let u = self.queue.pop_front()?;
        for &v in self.graph.child_indices(u) {
            if self.visited.try_visit(v) {
                self.queue.push_back(v);
            }
        }
        Some(u)
    }
}

/// Preorder depth-first walk (LIFO stack) seeded with every source.
///
/// A vertex is yielded when popped, before its children are pushed.
pub struct PreorderDfs<'g, G: ?Sized> {
    graph: &'g G,
    visited: VisitedSet,
    stack: Vec<usize>,
}

impl<'g, G: DagTopology + ?Sized> PreorderDfs<'g, G> {
    /// Creates a walk over `graph`.
    pub fn new(graph: &'g G) -> Self {
        let mut visited = VisitedSet::new(graph.vertex_count());
        let stack = graph
            .source_indices()
            .filter(|&s| visited.try_visit(s))
            .collect();
        Self {
            graph,
            visited,
            stack,
        }
    }
}

impl<G: DagTopology + ?Sized> Iterator for PreorderDfs<'_, G> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let u = self.stack.pop()?;
        for &v in self.graph.child_indices(u) {
            if self.visited.try_visit(v) {
                self.stack.push(v);
            }
        }
        Some(u)
    }
}

/// Postorder depth-first walk seeded with every source.
///
/// The first time a vertex reaches the top of the stack its unvisited
/// children are pushed over it and it is marked expanded; it is yielded the
/// next time it surfaces, once all of those children have been yielded. A
/// vertex with nothing left to push is yielded immediately.
pub struct PostorderDfs<'g, G: ?Sized> {
    graph: &'g G,
    visited: VisitedSet,
    expanded: VisitedSet,
    stack: Vec<usize>,
}

impl<'g, G: DagTopology + ?Sized> PostorderDfs<'g, G> {
    /// Creates a walk over `graph`.
    pub fn new(graph: &'g G) -> Self {
        let n = graph.vertex_count();
        let mut visited = VisitedSet::new(n);
        let stack = graph
            .source_indices()
            .filter(|&s| visited.try_visit(s))
            .collect();
        Self {
            graph,
            visited,
            expanded: VisitedSet::new(n),
            stack,
        }
    }
}

impl<G: DagTopology + ?Sized> Iterator for PostorderDfs<'_, G> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            let u = *self.stack.last()?;
            if self.expanded.is_visited(u) {
                self.stack.pop();
                return Some(u);
            }

            let height = self.stack.len();
            for &v in self.graph.child_indices(u) {
                if self.visited.try_visit(v) {
                    self.stack.push(v);
                }
            }
            if self.stack.len() == height {
                self.stack.pop();
                return Some(u);
            }
            self.expanded.try_visit(u);
        }
    }
}
