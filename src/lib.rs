//! # `dagstore` - In-Memory Directed Acyclic Graphs
//!
//! A small graph store for DAGs whose vertices carry opaque payloads, with
//! three traversal orders and an optional lock-wrapped variant for sharing a
//! graph between threads.
//!
//! ## Key Features
//!
//! - **Identity-keyed vertices**: a [`Vertex`] is its allocation, not its
//!   value; each member gets a stable positional index on insertion
//! - **Symmetric adjacency**: forward and backward edges are kept in step on
//!   every mutation, and the source/sink sets are maintained incrementally
//! - **Multi-root walks**: breadth-first, preorder and postorder depth-first,
//!   each visiting a vertex once however many parents it has
//! - **Coarse locking**: [`LockedDag`] holds one exclusive lock per call,
//!   across the whole walk for traversals
//!
//! ## Trust model
//!
//! Acyclicity is the caller's responsibility. Edges are never checked for
//! cycles; a cyclic edge set still traverses to completion, without a
//! meaningful ancestor/descendant order.
//!
//! ## Example
//!
//! ```rust
//! use dagstore::{Dag, Vertex};
//!
//! // v1 -> v2 -> v4
//! //   \-> v3 -/
//! let [v1, v2, v3, v4] = [1, 2, 3, 4].map(Vertex::new);
//! let mut dag = Dag::new();
//! for v in [&v1, &v2, &v3, &v4] {
//!     dag.add_vertex(v.clone()).unwrap();
//! }
//! dag.set_children(&v1, [&v2, &v3]).unwrap();
//! dag.set_parents(&v4, [&v2, &v3]).unwrap();
//!
//! assert_eq!(dag.sources(), vec![v1.clone()]);
//! assert_eq!(dag.sinks(), vec![v4.clone()]);
//!
//! let mut order = Vec::new();
//! dag.postorder_dfs(|v| order.push(*v.value()));
//! assert_eq!(order.first(), Some(&4));
//! assert_eq!(order.last(), Some(&1));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod error;
pub mod graph;

pub use concurrency::{LockedDag, LockedDagGuard};
pub use error::{DagError, Endpoint, Result};
pub use graph::{Bfs, Dag, DagTopology, PostorderDfs, PreorderDfs, Vertex};
