//! Iteration over index windows of an [`OrderStatistics`] container.
//!
//! Two flavours exist:
//!
//! - [`Between`]: a borrowing iterator. The borrow checker already rules out
//!   mutation while it is alive.
//! - [`RangeCursor`]: a detached window (indices + version stamp) that holds
//!   no borrow. Each pull through
//!   [`OrderStatistics::advance`](super::OrderStatistics::advance) compares
//!   the stamp with the container's current version and fails fast after any
//!   mutation.
//!
//! [`OrderStatistics`]: super::OrderStatistics

use std::iter::FusedIterator;
use std::ops::Range;

/// Iterator over the elements of a value window, in order.
///
/// Produced by
/// [`OrderStatistics::enumerate_between`](super::OrderStatistics::enumerate_between).
#[derive(Debug, Clone)]
pub struct Between<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Between<'a, T> {
    pub(super) fn new(window: &'a [T]) -> Self {
        Self {
            inner: window.iter(),
        }
    }

    /// Returns the elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        self.inner.as_slice()
    }
}

impl<'a, T> Iterator for Between<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Between<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Between<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Between<'_, T> {}

/// A detached index window over a container, stamped with the container
/// version it was created against.
///
/// A cursor is finite and not restartable: once it has yielded its last
/// element it stays exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCursor {
    pub(super) position: usize,
    pub(super) end: usize,
    pub(super) version: u64,
}

impl RangeCursor {
    pub(super) const fn new(window: Range<usize>, version: u64) -> Self {
        Self {
            position: window.start,
            end: window.end,
            version,
        }
    }

    /// Returns the number of elements the cursor has yet to yield.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.end.saturating_sub(self.position)
    }

    /// Returns `true` once every element has been yielded.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position >= self.end
    }

    /// Returns the container version this cursor expects.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_between_is_double_ended_and_exact() {
        let data = [1, 2, 3, 4];
        let mut between = Between::new(&data[1..3]);
        assert_eq!(between.len(), 2);
        assert_eq!(between.next_back(), Some(&3));
        assert_eq!(between.as_slice(), &[2]);
        assert_eq!(between.next(), Some(&2));
        assert_eq!(between.next(), None);
        assert_eq!(between.next(), None);
    }

    #[rstest]
    fn test_cursor_remaining() {
        let cursor = RangeCursor::new(2..5, 7);
        assert_eq!(cursor.remaining(), 3);
        assert!(!cursor.is_exhausted());
        assert_eq!(cursor.version(), 7);

        let empty = RangeCursor::new(4..4, 0);
        assert!(empty.is_exhausted());
    }
}
