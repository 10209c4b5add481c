//! Graph storage and traversal.
//!
//! - `vertex`: identity-bearing vertex handles
//! - `dag`: the graph store (adjacency, source/sink bookkeeping)
//! - `traversal`: BFS, preorder DFS and postorder DFS over any [`DagTopology`]

pub mod dag;
pub mod traversal;
pub mod vertex;
pub(crate) mod access;

pub use dag::Dag;
pub use traversal::{Bfs, DagTopology, PostorderDfs, PreorderDfs};
pub use vertex::Vertex;
