//! Order-agnostic alternation of sequences.

use std::iter::{Fuse, FusedIterator};

use smallvec::SmallVec;

/// Alternates between two sequences, starting with the left one.
///
/// When one side is exhausted the other is drained verbatim.
///
/// Created by [`interleave`](super::interleave).
#[derive(Debug, Clone)]
pub struct Interleave<A, B> {
    left: Fuse<A>,
    right: Fuse<B>,
    left_turn: bool,
}

impl<A: Iterator, B: Iterator> Interleave<A, B> {
    pub(super) fn new(left: A, right: B) -> Self {
        Self {
            left: left.fuse(),
            right: right.fuse(),
            left_turn: true,
        }
    }
}

impl<T, A, B> Iterator for Interleave<A, B>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = if self.left_turn {
            self.left.next().or_else(|| self.right.next())
        } else {
            self.right.next().or_else(|| self.left.next())
        };
        self.left_turn = !self.left_turn;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        super::sum_hints(self.left.size_hint(), self.right.size_hint())
    }
}

impl<T, A, B> FusedIterator for Interleave<A, B>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
{
}

/// Inline capacity of the cursor list before it spills to the heap.
const INLINE_CURSORS: usize = 4;

/// Round-robin over any number of sequences.
///
/// A cursor leaves the rotation the first time it reports exhaustion; the
/// remaining cursors keep their relative order.
///
/// Created by [`interleave_all`](super::interleave_all).
#[derive(Debug, Clone)]
pub struct InterleaveAll<I> {
    cursors: SmallVec<[I; INLINE_CURSORS]>,
    position: usize,
}

impl<I: Iterator> InterleaveAll<I> {
    pub(super) fn new(cursors: impl IntoIterator<Item = I>) -> Self {
        Self {
            cursors: cursors.into_iter().collect(),
            position: 0,
        }
    }

    /// Returns the number of cursors still in rotation.
    #[must_use]
    pub fn live_cursors(&self) -> usize {
        self.cursors.len()
    }
}

impl<I: Iterator> Iterator for InterleaveAll<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while !self.cursors.is_empty() {
            if self.position >= self.cursors.len() {
                self.position = 0;
            }
            if let Some(item) = self.cursors[self.position].next() {
                self.position += 1;
                return Some(item);
            }
            self.cursors.remove(self.position);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursors
            .iter()
            .map(Iterator::size_hint)
            .fold((0, Some(0)), super::sum_hints)
    }
}

impl<I: Iterator> FusedIterator for InterleaveAll<I> {}
