//! Cheap, non-consuming facts about a set-algebra operand.
//!
//! A [`SortedSet`](super::SortedSet) mutator asks its operand what it can
//! prove about itself before touching any element. The answer decides the
//! algorithm, never the outcome:
//!
//! | Operand                       | count | sorted                 | unique        |
//! |-------------------------------|-------|------------------------|---------------|
//! | `SortedSet` / `&SortedSet`    | yes   | if orders equivalent   | if sorted     |
//! | `&OrderStatistics`            | yes   | if orders equivalent   | no            |
//! | `SortedRange`                 | yes   | if orders equivalent   | if recorded   |
//! | `Vec<T>` / `&[T]`             | yes   | no                     | no            |
//! | [`Unprobed`]                  | exact `size_hint` only | no    | no            |
//!
//! "Orders equivalent" is [`Order::is_equivalent_to`]: closure-based orders
//! never claim it, so their operands always take the materializing path.

use std::iter::{Cloned, FusedIterator};

use crate::order::Order;
use crate::search::SortedRange;
use crate::statistics::OrderStatistics;

use super::SortedSet;

/// What an operand can cheaply prove about its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SequenceTraits {
    /// Number of elements, if known without enumeration.
    pub count: Option<usize>,
    /// `true` if the elements are sorted under the receiver's order.
    pub sorted: bool,
    /// `true` if no two elements compare equal under the receiver's order.
    pub unique: bool,
}

impl SequenceTraits {
    /// Nothing is known.
    pub const UNKNOWN: Self = Self {
        count: None,
        sorted: false,
        unique: false,
    };

    /// A counted operand with no ordering guarantees.
    #[must_use]
    pub const fn counted(count: usize) -> Self {
        Self {
            count: Some(count),
            sorted: false,
            unique: false,
        }
    }

    /// Returns `true` if the operand can feed a single-pass merge directly.
    #[must_use]
    pub const fn permits_merge(&self) -> bool {
        self.count.is_some() && self.sorted && self.unique
    }

    /// Returns `true` if the operand is known to hold no elements.
    #[must_use]
    pub const fn is_known_empty(&self) -> bool {
        matches!(self.count, Some(0))
    }
}

/// An operand of the sorted-set predicates and mutators.
pub trait SetOperand<T, O> {
    /// The element stream produced by [`into_items`](SetOperand::into_items).
    type Items: Iterator<Item = T>;

    /// Reports what is known about the operand relative to `order`.
    ///
    /// Must not enumerate the operand.
    fn probe(&self, order: &O) -> SequenceTraits;

    /// Consumes the operand into its elements, in storage order.
    fn into_items(self) -> Self::Items;
}

impl<T, O: Order<T>> SetOperand<T, O> for SortedSet<T, O> {
    type Items = std::vec::IntoIter<T>;

    fn probe(&self, order: &O) -> SequenceTraits {
        let sorted = order.is_equivalent_to(self.order());
        SequenceTraits {
            count: Some(self.len()),
            sorted,
            unique: sorted,
        }
    }

    fn into_items(self) -> Self::Items {
        self.into_vec().into_iter()
    }
}

impl<'a, T: Clone, O: Order<T>> SetOperand<T, O> for &'a SortedSet<T, O> {
    type Items = Cloned<std::slice::Iter<'a, T>>;

    fn probe(&self, order: &O) -> SequenceTraits {
        (*self).probe(order)
    }

    fn into_items(self) -> Self::Items {
        self.iter().cloned()
    }
}

impl<'a, T: Clone, O: Order<T>> SetOperand<T, O> for &'a OrderStatistics<T, O> {
    type Items = Cloned<std::slice::Iter<'a, T>>;

    fn probe(&self, order: &O) -> SequenceTraits {
        SequenceTraits {
            count: Some(self.len()),
            sorted: order.is_equivalent_to(self.order()),
            unique: false,
        }
    }

    fn into_items(self) -> Self::Items {
        self.iter().cloned()
    }
}

impl<'a, T: Clone, O: Order<T>> SetOperand<T, O> for SortedRange<'a, T, O> {
    type Items = Cloned<std::slice::Iter<'a, T>>;

    fn probe(&self, order: &O) -> SequenceTraits {
        let sorted = order.is_equivalent_to(self.order());
        SequenceTraits {
            count: Some(self.len()),
            sorted,
            unique: sorted && self.is_unique(),
        }
    }

    fn into_items(self) -> Self::Items {
        self.as_slice().iter().cloned()
    }
}

impl<T, O> SetOperand<T, O> for Vec<T> {
    type Items = std::vec::IntoIter<T>;

    fn probe(&self, _order: &O) -> SequenceTraits {
        SequenceTraits::counted(self.len())
    }

    fn into_items(self) -> Self::Items {
        self.into_iter()
    }
}

impl<'a, T: Clone, O> SetOperand<T, O> for &'a [T] {
    type Items = Cloned<std::slice::Iter<'a, T>>;

    fn probe(&self, _order: &O) -> SequenceTraits {
        SequenceTraits::counted(self.len())
    }

    fn into_items(self) -> Self::Items {
        self.iter().cloned()
    }
}

/// Wraps an arbitrary iterator as a set operand.
///
/// The count is taken from an exact `size_hint`; the elements are never
/// assumed sorted or unique.
#[derive(Debug, Clone)]
pub struct Unprobed<I> {
    inner: I,
}

/// Wraps `items` as a [`SetOperand`] about which nothing is assumed.
///
/// # Examples
///
/// ```rust
/// use ordkit::set::{SortedSet, unprobed};
///
/// let mut set: SortedSet<i32> = [1, 2, 3].into_iter().collect();
/// set.except_with(unprobed((0..10).filter(|value| value % 2 == 0)));
/// assert_eq!(set.as_slice(), &[1, 3]);
/// ```
pub fn unprobed<I: IntoIterator>(items: I) -> Unprobed<I::IntoIter> {
    Unprobed {
        inner: items.into_iter(),
    }
}

impl<I: Iterator> Iterator for Unprobed<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: FusedIterator> FusedIterator for Unprobed<I> {}

impl<T, O, I: Iterator<Item = T>> SetOperand<T, O> for Unprobed<I> {
    type Items = I;

    fn probe(&self, _order: &O) -> SequenceTraits {
        match self.inner.size_hint() {
            (low, Some(high)) if low == high => SequenceTraits::counted(low),
            _ => SequenceTraits::UNKNOWN,
        }
    }

    fn into_items(self) -> Self::Items {
        self.inner
    }
}
