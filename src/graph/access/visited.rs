//! Visited sets for graph traversals.
//!
//! Vertices are identified by their stable positional index, so "visited by
//! identity" reduces to a dense, word-packed bitset over indices.

const WORD_BITS: usize = u64::BITS as usize;

/// A dense, word-packed visited set sized for one walk.
pub(crate) struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Returns `true` iff `node` was not yet visited, marking it visited.
    ///
    /// Out-of-range indices are never visitable.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, node: usize) -> bool {
        if node >= self.len {
            return false;
        }
        let (word, mask) = (node / WORD_BITS, 1u64 << (node % WORD_BITS));
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, node: usize) -> bool {
        node < self.len && self.words[node / WORD_BITS] & (1u64 << (node % WORD_BITS)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_visit_marks_once() {
        let mut set = VisitedSet::new(130);
        assert!(set.try_visit(0));
        assert!(set.try_visit(64));
        assert!(set.try_visit(129));
        assert!(!set.try_visit(64));
        assert!(set.is_visited(129));
        assert!(!set.is_visited(1));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut set = VisitedSet::new(3);
        assert!(!set.try_visit(3));
        assert!(!set.is_visited(3));
    }
}
