//! Caret and selection representation.

use serde::{Deserialize, Serialize};

/// A selection inside a masked value, in character positions.
///
/// The range is always normalized such that `start <= end`. The masked
/// editor only ever produces collapsed selections (`start == end`); hosts
/// may hand it a non-empty range as the prior selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Start character position of the selection (inclusive).
    pub start: usize,
    /// End character position of the selection (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A zero-width selection: a plain caret at `pos`.
    #[inline]
    pub const fn collapsed(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends to `len`.
    #[inline]
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_range_normalizes() {
        let range = SelectionRange::new(10, 5);
        assert_eq!(range, SelectionRange { start: 5, end: 10 });
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn collapsed_is_empty() {
        assert!(SelectionRange::collapsed(4).is_empty());
        assert!(!SelectionRange::new(3, 5).is_empty());
    }

    #[test]
    fn clamped_keeps_order() {
        assert_eq!(
            SelectionRange::new(3, 40).clamped(15),
            SelectionRange { start: 3, end: 15 }
        );
        assert_eq!(
            SelectionRange::new(20, 40).clamped(15),
            SelectionRange::collapsed(15)
        );
    }
}
