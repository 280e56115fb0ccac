//! Lazy algebra over sorted sequences.
//!
//! Every adaptor in this module is a plain iterator struct holding its input
//! cursors and at most one read-ahead element per input:
//!
//! - [`Merge`]: stable multiset union
//! - [`Join`]: three-way classification of keys ([`Joined`])
//! - [`Union`], [`Intersection`], [`Difference`], [`SymmetricDifference`]:
//!   key-set forms over unique-keyed inputs
//! - [`Combine`], [`CombineWith`]: key-matched `(key, value)` combination
//! - [`Interleave`], [`InterleaveAll`]: order-agnostic alternation
//! - [`SortedDistinct`]: run collapsing
//! - [`ToRanges`]: successor-run summaries
//!
//! # Laziness
//!
//! Constructing an adaptor only calls `into_iter` on its inputs; no element is
//! pulled before the first `next`. Calling the constructor again on fresh
//! inputs is the only way to restart. All adaptors are fused.
//!
//! # Tie-break
//!
//! When two heads compare equal, the element from the first (left) sequence
//! is considered to come first.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::merge::{SortedIteratorExt, merge};
//! use ordkit::order::Natural;
//!
//! let merged: Vec<i32> = merge([1, 3, 5], [2, 3, 4], Natural).collect();
//! assert_eq!(merged, vec![1, 2, 3, 3, 4, 5]);
//!
//! let common: Vec<i32> = [1, 2, 3].into_iter().intersect_sorted([2, 3, 4], Natural).collect();
//! assert_eq!(common, vec![2, 3]);
//! ```

/// Implements `Clone` and `Debug` for a two-input adaptor.
///
/// `Peekable` holds a buffered item, so both impls need bounds on the input
/// item types that `#[derive]` cannot express. The `F` form skips the
/// combiner in `Debug`, since closures carry no `Debug` impl.
macro_rules! two_input_impls {
    ($name:ident { $($field:ident),+ }) => {
        impl<A, B, O> Clone for $name<A, B, O>
        where
            A: Iterator + Clone,
            A::Item: Clone,
            B: Iterator + Clone,
            B::Item: Clone,
            O: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $($field: self.$field.clone()),+
                }
            }
        }

        impl<A, B, O> std::fmt::Debug for $name<A, B, O>
        where
            A: Iterator + std::fmt::Debug,
            A::Item: std::fmt::Debug,
            B: Iterator + std::fmt::Debug,
            B::Item: std::fmt::Debug,
            O: std::fmt::Debug,
        {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    $(.field(stringify!($field), &self.$field))+
                    .finish()
            }
        }
    };
    ($name:ident<F> { $($field:ident),+ }) => {
        impl<A, B, O, F> Clone for $name<A, B, O, F>
        where
            A: Iterator + Clone,
            A::Item: Clone,
            B: Iterator + Clone,
            B::Item: Clone,
            O: Clone,
            F: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $($field: self.$field.clone()),+,
                    combiner: self.combiner.clone(),
                }
            }
        }

        impl<A, B, O, F> std::fmt::Debug for $name<A, B, O, F>
        where
            A: Iterator + std::fmt::Debug,
            A::Item: std::fmt::Debug,
            B: Iterator + std::fmt::Debug,
            B::Item: std::fmt::Debug,
            O: std::fmt::Debug,
        {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    $(.field(stringify!($field), &self.$field))+
                    .finish_non_exhaustive()
            }
        }
    };
}

mod combine;
mod distinct;
mod interleave;
mod join;

pub use combine::{Combine, CombineWith};
pub use distinct::{SortedDistinct, ToRanges};
pub use interleave::{Interleave, InterleaveAll};
pub use join::{Difference, Intersection, Join, Joined, Merge, SymmetricDifference, Union};

use std::iter::{Fuse, Peekable};

use crate::order::{Equivalence, Order, OrderEquivalence};

/// A fused input cursor with one element of read-ahead.
pub(crate) type Head<I> = Peekable<Fuse<I>>;

pub(crate) fn head<I: Iterator>(iterator: I) -> Head<I> {
    iterator.fuse().peekable()
}

pub(crate) fn sum_hints(
    (left_low, left_high): (usize, Option<usize>),
    (right_low, right_high): (usize, Option<usize>),
) -> (usize, Option<usize>) {
    let high = match (left_high, right_high) {
        (Some(left), Some(right)) => left.checked_add(right),
        _ => None,
    };
    (left_low.saturating_add(right_low), high)
}

// =============================================================================
// Constructors
// =============================================================================

/// Stable multiset union of two sorted sequences.
///
/// # Examples
///
/// ```rust
/// use ordkit::merge::merge;
/// use ordkit::order::Natural;
///
/// assert_eq!(merge(Vec::<i32>::new(), [1, 2], Natural).collect::<Vec<_>>(), vec![1, 2]);
/// ```
pub fn merge<T, A, B, O>(left: A, right: B, order: O) -> Merge<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    Merge::new(left.into_iter(), right.into_iter(), order)
}

/// Three-way join of two sorted sequences.
pub fn join<T, A, B, O>(left: A, right: B, order: O) -> Join<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    Join::new(left.into_iter(), right.into_iter(), order)
}

/// Keys present in either of two sorted, unique-keyed sequences.
pub fn union<T, A, B, O>(left: A, right: B, order: O) -> Union<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    Union::new(left.into_iter(), right.into_iter(), order)
}

/// Keys present in both of two sorted, unique-keyed sequences.
pub fn intersection<T, A, B, O>(
    left: A,
    right: B,
    order: O,
) -> Intersection<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    Intersection::new(left.into_iter(), right.into_iter(), order)
}

/// Keys of `left` absent from `right`.
pub fn difference<T, A, B, O>(left: A, right: B, order: O) -> Difference<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    Difference::new(left.into_iter(), right.into_iter(), order)
}

/// Keys present in exactly one of two sorted, unique-keyed sequences.
pub fn symmetric_difference<T, A, B, O>(
    left: A,
    right: B,
    order: O,
) -> SymmetricDifference<A::IntoIter, B::IntoIter, O>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    O: Order<T>,
{
    SymmetricDifference::new(left.into_iter(), right.into_iter(), order)
}

/// Key-matched combination with default padding for solitary keys.
///
/// # Examples
///
/// ```rust
/// use ordkit::merge::combine;
/// use ordkit::order::Natural;
///
/// let totals: Vec<(char, u32)> =
///     combine([('a', 1), ('c', 3)], [('b', 20), ('c', 30)], Natural, |x, y| x + y).collect();
/// assert_eq!(totals, vec![('a', 1), ('b', 20), ('c', 33)]);
/// ```
pub fn combine<K, V, A, B, O, F>(
    left: A,
    right: B,
    order: O,
    combiner: F,
) -> Combine<A::IntoIter, B::IntoIter, O, F>
where
    A: IntoIterator<Item = (K, V)>,
    B: IntoIterator<Item = (K, V)>,
    O: Order<K>,
    V: Default,
    F: FnMut(V, V) -> V,
{
    Combine::new(left.into_iter(), right.into_iter(), order, combiner)
}

/// Key-matched combination that passes solitary pairs through unchanged.
pub fn combine_with<K, V, A, B, O, F>(
    left: A,
    right: B,
    order: O,
    combiner: F,
) -> CombineWith<A::IntoIter, B::IntoIter, O, F>
where
    A: IntoIterator<Item = (K, V)>,
    B: IntoIterator<Item = (K, V)>,
    O: Order<K>,
    F: FnMut(V, V) -> V,
{
    CombineWith::new(left.into_iter(), right.into_iter(), order, combiner)
}

/// Alternates between two sequences, draining the longer one at the end.
pub fn interleave<T, A, B>(left: A, right: B) -> Interleave<A::IntoIter, B::IntoIter>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    Interleave::new(left.into_iter(), right.into_iter())
}

/// Round-robin over any number of sequences.
pub fn interleave_all<S>(sequences: S) -> InterleaveAll<<S::Item as IntoIterator>::IntoIter>
where
    S: IntoIterator,
    S::Item: IntoIterator,
{
    InterleaveAll::new(sequences.into_iter().map(IntoIterator::into_iter))
}

/// Collapses runs of equivalent elements in a sorted sequence.
pub fn sorted_distinct<S, E>(source: S, equivalence: E) -> SortedDistinct<S::IntoIter, E>
where
    S: IntoIterator,
    E: Equivalence<S::Item>,
{
    SortedDistinct::new(source.into_iter(), equivalence)
}

/// Collapses runs of elements that compare equal under `order`.
pub fn sorted_distinct_by_order<S, O>(
    source: S,
    order: O,
) -> SortedDistinct<S::IntoIter, OrderEquivalence<O>>
where
    S: IntoIterator,
    O: Order<S::Item>,
{
    SortedDistinct::new(source.into_iter(), OrderEquivalence(order))
}

/// Collapses successor runs into `factory(start, end)` summaries.
///
/// # Examples
///
/// ```rust
/// use ordkit::merge::to_ranges;
///
/// let ranges: Vec<(u8, u8)> =
///     to_ranges([1, 2, 3, 7], |a: &u8, b: &u8| a + 1 == *b, |s, e| (s, e)).collect();
/// assert_eq!(ranges, vec![(1, 3), (7, 7)]);
/// ```
pub fn to_ranges<T, R, S, P, F>(values: S, is_successor: P, factory: F) -> ToRanges<S::IntoIter, P, F>
where
    T: Clone,
    S: IntoIterator<Item = T>,
    P: FnMut(&T, &T) -> bool,
    F: FnMut(T, T) -> R,
{
    ToRanges::new(values.into_iter(), is_successor, factory)
}

// =============================================================================
// SortedIteratorExt
// =============================================================================

/// Method-call forms of the constructors in this module.
///
/// Implemented for every [`Iterator`]; the receiver is the left sequence.
pub trait SortedIteratorExt: Iterator + Sized {
    /// See [`merge`].
    fn merge_sorted<B, O>(self, other: B, order: O) -> Merge<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        Merge::new(self, other.into_iter(), order)
    }

    /// See [`join`].
    fn join_sorted<B, O>(self, other: B, order: O) -> Join<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        Join::new(self, other.into_iter(), order)
    }

    /// See [`union`].
    fn union_sorted<B, O>(self, other: B, order: O) -> Union<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        Union::new(self, other.into_iter(), order)
    }

    /// See [`intersection`].
    fn intersect_sorted<B, O>(self, other: B, order: O) -> Intersection<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        Intersection::new(self, other.into_iter(), order)
    }

    /// See [`difference`].
    fn difference_sorted<B, O>(self, other: B, order: O) -> Difference<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        Difference::new(self, other.into_iter(), order)
    }

    /// See [`symmetric_difference`].
    fn symmetric_difference_sorted<B, O>(
        self,
        other: B,
        order: O,
    ) -> SymmetricDifference<Self, B::IntoIter, O>
    where
        B: IntoIterator<Item = Self::Item>,
        O: Order<Self::Item>,
    {
        SymmetricDifference::new(self, other.into_iter(), order)
    }

    /// See [`combine`].
    fn combine_sorted<K, V, B, O, F>(
        self,
        other: B,
        order: O,
        combiner: F,
    ) -> Combine<Self, B::IntoIter, O, F>
    where
        Self: Iterator<Item = (K, V)>,
        B: IntoIterator<Item = (K, V)>,
        O: Order<K>,
        V: Default,
        F: FnMut(V, V) -> V,
    {
        Combine::new(self, other.into_iter(), order, combiner)
    }

    /// See [`combine_with`].
    fn combine_sorted_with<K, V, B, O, F>(
        self,
        other: B,
        order: O,
        combiner: F,
    ) -> CombineWith<Self, B::IntoIter, O, F>
    where
        Self: Iterator<Item = (K, V)>,
        B: IntoIterator<Item = (K, V)>,
        O: Order<K>,
        F: FnMut(V, V) -> V,
    {
        CombineWith::new(self, other.into_iter(), order, combiner)
    }

    /// See [`interleave`].
    fn interleave<B>(self, other: B) -> Interleave<Self, B::IntoIter>
    where
        B: IntoIterator<Item = Self::Item>,
    {
        Interleave::new(self, other.into_iter())
    }

    /// See [`sorted_distinct`].
    fn sorted_distinct<E>(self, equivalence: E) -> SortedDistinct<Self, E>
    where
        E: Equivalence<Self::Item>,
    {
        SortedDistinct::new(self, equivalence)
    }

    /// See [`sorted_distinct_by_order`].
    fn sorted_distinct_by_order<O>(self, order: O) -> SortedDistinct<Self, OrderEquivalence<O>>
    where
        O: Order<Self::Item>,
    {
        SortedDistinct::new(self, OrderEquivalence(order))
    }

    /// See [`to_ranges`].
    fn to_ranges<R, P, F>(self, is_successor: P, factory: F) -> ToRanges<Self, P, F>
    where
        Self::Item: Clone,
        P: FnMut(&Self::Item, &Self::Item) -> bool,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        ToRanges::new(self, is_successor, factory)
    }
}

impl<I: Iterator> SortedIteratorExt for I {}
