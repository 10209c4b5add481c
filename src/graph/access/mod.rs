//! Internal graph accessors and low-level building blocks.
//!
//! This module is intentionally `pub(crate)` so the traversal engine can share
//! scratch primitives (visited sets) without exposing them as part of the
//! public API surface.

pub(crate) mod visited;
