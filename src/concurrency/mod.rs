//! Thread-safe wrappers for sharing graphs.
//!
//! Important: [`Dag`](crate::Dag) itself has no internal synchronization.
//! This module serializes every operation on one exclusive lock, traversals
//! included.

pub mod locked_dag;

pub use locked_dag::{LockedDag, LockedDagGuard};
