//! Debug-only invariant assertion helpers.
//!
//! Mutations run a full structural check through these helpers in debug
//! builds; release builds compile them out.

/// Debug-asserts a structural invariant with a message.
#[inline(always)]
pub(crate) fn math_assert_msg(condition: bool, message: &str) {
    debug_assert!(condition, "Graph invariant violated: {}", message);
}
