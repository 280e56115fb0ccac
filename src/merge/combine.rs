//! Keyed combination of two unique-keyed sorted sequences.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::{Head, head, sum_hints};
use crate::order::Order;

/// Compares the key halves of two heads; exhausted sides sort last.
fn compare_keys<K, V, O: Order<K>>(
    order: &O,
    left: Option<&(K, V)>,
    right: Option<&(K, V)>,
) -> Option<Ordering> {
    match (left, right) {
        (Some(left), Some(right)) => Some(order.compare(&left.0, &right.0)),
        (Some(_), None) => Some(Ordering::Less),
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => None,
    }
}

fn keyed_hint(left: (usize, Option<usize>), right: (usize, Option<usize>)) -> (usize, Option<usize>) {
    let (_, high) = sum_hints(left, right);
    (left.0.max(right.0), high)
}

// =============================================================================
// Combine
// =============================================================================

/// Joins `(key, value)` sequences by key, padding missing values with
/// `V::default()` and passing every key through the combiner.
///
/// For a key on both sides the left key is kept and the combiner receives
/// `(left_value, right_value)`; solitary keys produce
/// `combiner(value, default)` or `combiner(default, value)`.
///
/// Created by [`combine`](super::combine).
pub struct Combine<A: Iterator, B: Iterator, O, F> {
    left: Head<A>,
    right: Head<B>,
    order: O,
    combiner: F,
}

two_input_impls!(Combine<F> { left, right, order });

impl<A: Iterator, B: Iterator, O, F> Combine<A, B, O, F> {
    pub(super) fn new(left: A, right: B, order: O, combiner: F) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
            combiner,
        }
    }
}

impl<K, V, A, B, O, F> Iterator for Combine<A, B, O, F>
where
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
    O: Order<K>,
    V: Default,
    F: FnMut(V, V) -> V,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        match compare_keys(&self.order, self.left.peek(), self.right.peek())? {
            Ordering::Less => {
                let (key, value) = self.left.next()?;
                Some((key, (self.combiner)(value, V::default())))
            }
            Ordering::Greater => {
                let (key, value) = self.right.next()?;
                Some((key, (self.combiner)(V::default(), value)))
            }
            Ordering::Equal => {
                let (key, left) = self.left.next()?;
                let (_, right) = self.right.next()?;
                Some((key, (self.combiner)(left, right)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        keyed_hint(self.left.size_hint(), self.right.size_hint())
    }
}

impl<K, V, A, B, O, F> FusedIterator for Combine<A, B, O, F>
where
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
    O: Order<K>,
    V: Default,
    F: FnMut(V, V) -> V,
{
}

// =============================================================================
// CombineWith
// =============================================================================

/// Joins `(key, value)` sequences by key, calling the combiner only for keys
/// present on both sides.
///
/// Solitary pairs are emitted unmodified, so `V` needs no default.
///
/// Created by [`combine_with`](super::combine_with).
pub struct CombineWith<A: Iterator, B: Iterator, O, F> {
    left: Head<A>,
    right: Head<B>,
    order: O,
    combiner: F,
}

two_input_impls!(CombineWith<F> { left, right, order });

impl<A: Iterator, B: Iterator, O, F> CombineWith<A, B, O, F> {
    pub(super) fn new(left: A, right: B, order: O, combiner: F) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
            combiner,
        }
    }
}

impl<K, V, A, B, O, F> Iterator for CombineWith<A, B, O, F>
where
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
    O: Order<K>,
    F: FnMut(V, V) -> V,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        match compare_keys(&self.order, self.left.peek(), self.right.peek())? {
            Ordering::Less => self.left.next(),
            Ordering::Greater => self.right.next(),
            Ordering::Equal => {
                let (key, left) = self.left.next()?;
                let (_, right) = self.right.next()?;
                Some((key, (self.combiner)(left, right)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        keyed_hint(self.left.size_hint(), self.right.size_hint())
    }
}

impl<K, V, A, B, O, F> FusedIterator for CombineWith<A, B, O, F>
where
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
    O: Order<K>,
    F: FnMut(V, V) -> V,
{
}
