//! Sorted sets with comparator-defined identity.
//!
//! [`SortedSet`] stores unique elements in a sorted buffer and layers set
//! predicates and in-place set algebra on top of the order-statistics queries
//! of [`OrderStatistics`].
//!
//! # Identity
//!
//! Two elements are "the same" exactly when the set's [`Order`] compares them
//! `Equal`. Structural equality of `T` is never consulted, so two sets built
//! with different orders may disagree about what counts as a duplicate.
//!
//! # Choosing an Algorithm
//!
//! Each predicate and mutator first [probes](SetOperand::probe) its operand:
//!
//! - a counted operand proven sorted and unique under an equivalent order is
//!   merged directly in one O(n + m) pass;
//! - anything else is first materialized into a sorted, deduplicated buffer
//!   (O(m log m)) and then merged.
//!
//! Both paths produce identical results; only the cost differs.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::set::SortedSet;
//!
//! let mut set: SortedSet<i32> = [1, 2, 3].into_iter().collect();
//! let other: SortedSet<i32> = [2, 3, 4].into_iter().collect();
//! set.union_with(&other);
//! assert_eq!(set.as_slice(), &[1, 2, 3, 4]);
//! assert_eq!(set.len(), 4);
//! ```

mod probe;

pub use probe::{SequenceTraits, SetOperand, Unprobed, unprobed};

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use crate::error::{OrderError, OrderResult};
use crate::merge::{difference, intersection, symmetric_difference, union};
use crate::order::{Natural, Order};
use crate::search::{SearchResult, SortedRange};
use crate::statistics::{Between, OrderStatistics, RangeCursor};

/// Sorts `items` and keeps the first element of every equal run.
fn sort_unique<T, O: Order<T>>(mut items: Vec<T>, order: &O) -> Vec<T> {
    items.sort_by(|left, right| order.compare(left, right));
    items.dedup_by(|later, earlier| order.equal(earlier, later));
    items
}

/// Operand elements in sorted, unique form.
enum Prepared<I, T> {
    Direct(I),
    Materialized(std::vec::IntoIter<T>),
}

impl<T, I: Iterator<Item = T>> Iterator for Prepared<I, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            Self::Direct(items) => items.next(),
            Self::Materialized(items) => items.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Direct(items) => items.size_hint(),
            Self::Materialized(items) => items.size_hint(),
        }
    }
}

/// Element counts from one pass over two sorted, unique sequences.
#[derive(Debug, Default)]
struct Overlap {
    mine_only: usize,
    theirs_only: usize,
    shared: usize,
}

/// Sorted collection of unique elements under an [`Order`].
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `O` - The order defining both sort position and identity. Defaults to
///   [`Natural`].
pub struct SortedSet<T, O = Natural> {
    inner: OrderStatistics<T, O>,
}

impl<T: Ord> SortedSet<T, Natural> {
    /// Creates an empty set ordered by `T: Ord`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<T, O> SortedSet<T, O> {
    /// Creates an empty set under `order`.
    #[inline]
    #[must_use]
    pub const fn with_order(order: O) -> Self {
        Self {
            inner: OrderStatistics::with_order(order),
        }
    }

    /// Creates an empty set with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        Self {
            inner: OrderStatistics::with_capacity_and_order(capacity, order),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the elements in sorted order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Iterates over the elements in sorted order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.inner.iter()
    }

    /// Returns the order of the set.
    #[inline]
    pub const fn order(&self) -> &O {
        self.inner.order()
    }

    /// Returns the underlying order-statistics container.
    #[inline]
    pub const fn as_statistics(&self) -> &OrderStatistics<T, O> {
        &self.inner
    }

    /// Returns the version stamp cursors are checked against.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.inner.version()
    }

    /// Consumes the set, returning its sorted elements.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.inner.into_vec()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Retains only the elements for which `keep` returns `true`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.inner.retain(keep);
    }

    /// See [`OrderStatistics::select`].
    ///
    /// # Errors
    ///
    /// Fails like [`OrderStatistics::select`].
    pub fn select(&self, rank: usize) -> OrderResult<&T> {
        self.inner.select(rank)
    }

    /// See [`OrderStatistics::min`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if the set is empty.
    pub fn min(&self) -> OrderResult<&T> {
        self.inner.min()
    }

    /// See [`OrderStatistics::max`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if the set is empty.
    pub fn max(&self) -> OrderResult<&T> {
        self.inner.max()
    }

    /// Removes and returns the smallest element.
    pub fn remove_min(&mut self) -> Option<T> {
        self.inner.remove_min()
    }

    /// Removes and returns the largest element.
    pub fn remove_max(&mut self) -> Option<T> {
        self.inner.remove_max()
    }

    /// Creates a detached cursor over every element.
    #[must_use]
    pub fn cursor(&self) -> RangeCursor {
        self.inner.cursor()
    }

    /// See [`OrderStatistics::advance`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ConcurrentModification`] if the set was mutated
    /// after the cursor was created.
    pub fn advance(&self, cursor: &mut RangeCursor) -> OrderResult<Option<&T>> {
        self.inner.advance(cursor)
    }
}

impl<T, O: Order<T>> SortedSet<T, O> {
    /// Creates a set from arbitrary elements.
    ///
    /// Of several equal elements, the first in input order is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::order::by_key;
    /// use ordkit::set::SortedSet;
    ///
    /// let set = SortedSet::from_vec_with_order(
    ///     vec![(2, "b"), (1, "a"), (2, "z")],
    ///     by_key(|pair: &(i32, &str)| pair.0),
    /// );
    /// assert_eq!(set.as_slice(), &[(1, "a"), (2, "b")]);
    /// ```
    pub fn from_vec_with_order(items: Vec<T>, order: O) -> Self {
        trace_event!(length = items.len(), "building sorted set");
        let items = sort_unique(items, &order);
        Self {
            inner: OrderStatistics::from_sorted_unchecked(items, order),
        }
    }

    /// Creates a set from elements already strictly increasing under `order`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `items` is unsorted or holds
    /// equal elements.
    pub fn from_sorted_vec_with_order(items: Vec<T>, order: O) -> OrderResult<Self> {
        let strictly_increasing = items
            .windows(2)
            .all(|pair| order.compare(&pair[0], &pair[1]) == Ordering::Less);
        if !strictly_increasing {
            return Err(OrderError::invalid_argument(
                "items",
                "elements are not strictly increasing under the supplied order",
            ));
        }
        Ok(Self {
            inner: OrderStatistics::from_sorted_unchecked(items, order),
        })
    }

    /// Returns a [`SortedRange`] view over the elements.
    pub fn as_sorted_range(&self) -> SortedRange<'_, T, &O> {
        SortedRange::from_sorted_unchecked(self.as_slice(), self.order(), true)
    }

    /// Adds `item` unless an equal element is already present.
    ///
    /// Returns `true` if the set changed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::set::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, item: T) -> bool {
        match self.inner.binary_search(&item) {
            SearchResult::Found(_) => false,
            SearchResult::NotFound(index) => {
                self.inner.insert_at(index, item);
                true
            }
        }
    }

    /// Adds `item`, replacing and returning an equal element if present.
    pub fn replace(&mut self, item: T) -> Option<T> {
        match self.inner.binary_search(&item) {
            SearchResult::Found(index) => Some(self.inner.replace_at(index, item)),
            SearchResult::NotFound(index) => {
                self.inner.insert_at(index, item);
                None
            }
        }
    }

    /// Removes the element equal to `item`. Returns `false` if absent.
    pub fn remove(&mut self, item: &T) -> bool {
        self.inner.remove(item)
    }

    /// Removes and returns the element equal to `item`.
    pub fn take(&mut self, item: &T) -> Option<T> {
        self.inner.take(item)
    }

    /// Returns the stored element equal to `item`.
    ///
    /// The stored element may differ structurally from `item`.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.inner
            .binary_search(item)
            .found()
            .map(|index| &self.as_slice()[index])
    }

    /// Returns `true` if an element equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.inner.contains(item)
    }

    /// Returns the number of elements less than `value`.
    pub fn rank(&self, value: &T) -> usize {
        self.inner.rank(value)
    }

    /// See [`OrderStatistics::lower_bound`].
    pub fn lower_bound(&self, value: &T) -> usize {
        self.inner.lower_bound(value)
    }

    /// See [`OrderStatistics::upper_bound`].
    pub fn upper_bound(&self, value: &T) -> usize {
        self.inner.upper_bound(value)
    }

    /// See [`OrderStatistics::equal_range`].
    pub fn equal_range(&self, value: &T) -> Range<usize> {
        self.inner.equal_range(value)
    }

    /// See [`OrderStatistics::binary_search`].
    pub fn binary_search(&self, value: &T) -> SearchResult {
        self.inner.binary_search(value)
    }

    /// See [`OrderStatistics::floor`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if no element is `<= value`.
    pub fn floor(&self, value: &T) -> OrderResult<&T> {
        self.inner.floor(value)
    }

    /// See [`OrderStatistics::ceiling`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if no element is `>= value`.
    pub fn ceiling(&self, value: &T) -> OrderResult<&T> {
        self.inner.ceiling(value)
    }

    /// See [`OrderStatistics::count_between`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn count_between(&self, low: &T, high: &T) -> OrderResult<usize> {
        self.inner.count_between(low, high)
    }

    /// See [`OrderStatistics::enumerate_between`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn enumerate_between(&self, low: &T, high: &T) -> OrderResult<Between<'_, T>> {
        self.inner.enumerate_between(low, high)
    }

    /// See [`OrderStatistics::cursor_between`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn cursor_between(&self, low: &T, high: &T) -> OrderResult<RangeCursor> {
        self.inner.cursor_between(low, high)
    }

    // =========================================================================
    // Operand preparation
    // =========================================================================

    /// Probes `other` and yields its elements sorted and unique under this
    /// set's order, materializing them only when that cannot be proven.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn prepare<S>(&self, operation: &'static str, other: S) -> (SequenceTraits, Prepared<S::Items, T>)
    where
        S: SetOperand<T, O>,
    {
        let traits = other.probe(self.order());
        let merge = traits.permits_merge();
        trace_event!(
            operation,
            count = ?traits.count,
            sorted = traits.sorted,
            unique = traits.unique,
            path = if merge { "merge" } else { "materialize" },
            "sorted set operand dispatch"
        );
        let items = if merge {
            Prepared::Direct(other.into_items())
        } else {
            Prepared::Materialized(
                sort_unique(other.into_items().collect(), self.order()).into_iter(),
            )
        };
        (traits, items)
    }

    /// Counts shared and solitary elements, stopping once `settled` holds.
    fn overlap<I>(&self, theirs: I, settled: impl Fn(&Overlap) -> bool) -> Overlap
    where
        I: Iterator<Item = T>,
    {
        let mine = self.as_slice();
        let order = self.order();
        let mut overlap = Overlap::default();
        let mut index = 0;
        for item in theirs {
            while index < mine.len() && order.less(&mine[index], &item) {
                overlap.mine_only += 1;
                index += 1;
            }
            if index < mine.len() && order.equal(&mine[index], &item) {
                overlap.shared += 1;
                index += 1;
            } else {
                overlap.theirs_only += 1;
            }
            if settled(&overlap) {
                return overlap;
            }
        }
        overlap.mine_only += mine.len() - index;
        overlap
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Returns `true` if every element of this set is in `other`.
    pub fn is_subset_of<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if self.is_empty() {
            return true;
        }
        if self
            .counted_unique(&other)
            .is_some_and(|count| self.len() > count)
        {
            return false;
        }
        let (_, theirs) = self.prepare("is_subset_of", other);
        self.overlap(theirs, |overlap| overlap.mine_only > 0)
            .mine_only
            == 0
    }

    /// Returns `true` if this set is a subset of `other` and `other` has more
    /// elements.
    pub fn is_proper_subset_of<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if self
            .counted_unique(&other)
            .is_some_and(|count| self.len() >= count)
        {
            return false;
        }
        let (_, theirs) = self.prepare("is_proper_subset_of", other);
        let overlap = self.overlap(theirs, |overlap| overlap.mine_only > 0);
        overlap.mine_only == 0 && overlap.theirs_only > 0
    }

    /// Returns `true` if every element of `other` is in this set.
    pub fn is_superset_of<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if other.probe(self.order()).is_known_empty() {
            return true;
        }
        if self
            .counted_unique(&other)
            .is_some_and(|count| self.len() < count)
        {
            return false;
        }
        let (_, theirs) = self.prepare("is_superset_of", other);
        self.overlap(theirs, |overlap| overlap.theirs_only > 0)
            .theirs_only
            == 0
    }

    /// Returns `true` if this set is a superset of `other` and has more
    /// elements.
    pub fn is_proper_superset_of<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if self.is_empty() {
            return false;
        }
        if self
            .counted_unique(&other)
            .is_some_and(|count| self.len() <= count)
        {
            return false;
        }
        let (_, theirs) = self.prepare("is_proper_superset_of", other);
        let overlap = self.overlap(theirs, |overlap| overlap.theirs_only > 0);
        overlap.theirs_only == 0 && overlap.mine_only > 0
    }

    /// Returns `true` if this set and `other` share at least one element.
    pub fn overlaps<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if self.is_empty() {
            return false;
        }
        let (_, theirs) = self.prepare("overlaps", other);
        self.overlap(theirs, |overlap| overlap.shared > 0).shared > 0
    }

    /// Returns `true` if this set and `other` hold the same elements.
    pub fn set_equals<S: SetOperand<T, O>>(&self, other: S) -> bool {
        if self
            .counted_unique(&other)
            .is_some_and(|count| self.len() != count)
        {
            return false;
        }
        let (_, theirs) = self.prepare("set_equals", other);
        let overlap = self.overlap(theirs, |overlap| {
            overlap.mine_only > 0 || overlap.theirs_only > 0
        });
        overlap.mine_only == 0 && overlap.theirs_only == 0
    }

    /// Returns the operand's element count when it is proven unique.
    fn counted_unique<S: SetOperand<T, O>>(&self, other: &S) -> Option<usize> {
        let traits = other.probe(self.order());
        if traits.permits_merge() {
            traits.count
        } else {
            None
        }
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Adds every element of `other`.
    ///
    /// Existing elements win over equal elements of `other`.
    pub fn union_with<S: SetOperand<T, O>>(&mut self, other: S) {
        let (traits, theirs) = self.prepare("union_with", other);
        if traits.is_known_empty() {
            return;
        }
        self.inner
            .rebuild(|mine, order| union(mine, theirs, order).collect());
    }

    /// Keeps only the elements also in `other`.
    ///
    /// On an empty set this returns without touching `other`.
    pub fn intersect_with<S: SetOperand<T, O>>(&mut self, other: S) {
        if self.is_empty() {
            trace_event!("intersect_with on empty set, operand untouched");
            return;
        }
        let (traits, theirs) = self.prepare("intersect_with", other);
        if traits.is_known_empty() {
            self.clear();
            return;
        }
        self.inner
            .rebuild(|mine, order| intersection(mine, theirs, order).collect());
    }

    /// Removes every element that is in `other`.
    pub fn except_with<S: SetOperand<T, O>>(&mut self, other: S) {
        if self.is_empty() {
            return;
        }
        let (traits, theirs) = self.prepare("except_with", other);
        if traits.is_known_empty() {
            return;
        }
        self.inner
            .rebuild(|mine, order| difference(mine, theirs, order).collect());
    }

    /// Keeps the elements in exactly one of this set and `other`.
    pub fn symmetric_except_with<S: SetOperand<T, O>>(&mut self, other: S) {
        let (traits, theirs) = self.prepare("symmetric_except_with", other);
        if traits.is_known_empty() {
            return;
        }
        self.inner
            .rebuild(|mine, order| symmetric_difference(mine, theirs, order).collect());
    }
}

impl<T: Ord> Default for SortedSet<T, Natural> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O: Clone> Clone for SortedSet<T, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for SortedSet<T, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

/// Sets are equal when their elements pair up under the left set's order.
impl<T, O: Order<T>> PartialEq for SortedSet<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| self.order().equal(left, right))
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec_with_order(iter.into_iter().collect(), Natural)
    }
}

impl<T, O: Order<T>> Extend<T> for SortedSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T, O> IntoIterator for &'a SortedSet<T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O> IntoIterator for SortedSet<T, O> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

static_assertions::assert_impl_all!(SortedSet<String>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Reversed, by_key, from_fn};
    use rstest::rstest;

    fn set_of(items: &[i32]) -> SortedSet<i32> {
        items.iter().copied().collect()
    }

    #[rstest]
    fn test_from_iter_sorts_and_deduplicates() {
        assert_eq!(set_of(&[3, 1, 3, 2, 1]).as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn test_from_sorted_rejects_duplicates() {
        let error = SortedSet::from_sorted_vec_with_order(vec![1, 1, 2], Natural).unwrap_err();
        assert!(matches!(error, OrderError::InvalidArgument { .. }));
    }

    #[rstest]
    fn test_add_is_idempotent() {
        let mut set = set_of(&[1, 2]);
        assert!(set.add(5));
        assert!(!set.add(5));
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn test_identity_follows_the_order() {
        let mut set = SortedSet::with_order(by_key(|word: &&str| word.len()));
        assert!(set.add("one"));
        assert!(!set.add("two"));
        assert!(set.add("three"));
        assert_eq!(set.get(&"six"), Some(&"one"));
        assert_eq!(set.replace("six"), Some("one"));
        assert_eq!(set.as_slice(), &["six", "three"]);
    }

    #[rstest]
    fn test_take_and_remove() {
        let mut set = set_of(&[1, 2, 3]);
        assert_eq!(set.take(&2), Some(2));
        assert!(!set.remove(&2));
        assert!(set.remove(&3));
        assert_eq!(set.as_slice(), &[1]);
    }

    #[rstest]
    fn test_union_with_scenario() {
        let mut set = set_of(&[1, 2, 3]);
        set.union_with(&set_of(&[2, 3, 4]));
        assert_eq!(set.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(set.len(), 4);
    }

    #[rstest]
    #[case::sorted_set(true)]
    #[case::unsorted_vec(false)]
    fn test_mutators_agree_across_paths(#[case] direct: bool) {
        let run = |apply: fn(&mut SortedSet<i32>, Vec<i32>)| {
            let mut set = set_of(&[1, 2, 3, 5]);
            apply(&mut set, vec![6, 4, 3, 2, 2]);
            set.into_vec()
        };
        let union = if direct {
            run(|set, other| set.union_with(other.into_iter().collect::<SortedSet<i32>>()))
        } else {
            run(|set, other| set.union_with(other))
        };
        let intersection = if direct {
            run(|set, other| set.intersect_with(other.into_iter().collect::<SortedSet<i32>>()))
        } else {
            run(|set, other| set.intersect_with(other))
        };
        let difference = if direct {
            run(|set, other| set.except_with(other.into_iter().collect::<SortedSet<i32>>()))
        } else {
            run(|set, other| set.except_with(other))
        };
        let symmetric = if direct {
            run(|set, other| set.symmetric_except_with(other.into_iter().collect::<SortedSet<i32>>()))
        } else {
            run(|set, other| set.symmetric_except_with(other))
        };
        assert_eq!(union, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(intersection, vec![2, 3]);
        assert_eq!(difference, vec![1, 5]);
        assert_eq!(symmetric, vec![1, 4, 5, 6]);
    }

    #[rstest]
    fn test_closure_order_takes_materializing_path() {
        let order = from_fn(|left: &i32, right: &i32| right.cmp(left));
        let mut set = SortedSet::from_vec_with_order(vec![1, 2, 3], order);
        let other = SortedSet::from_vec_with_order(vec![4, 3], order);
        set.union_with(&other);
        assert_eq!(set.as_slice(), &[4, 3, 2, 1]);
    }

    #[rstest]
    fn test_intersect_with_empty_receiver_does_not_enumerate() {
        let mut set: SortedSet<i32> = SortedSet::new();
        set.intersect_with(unprobed(std::iter::from_fn(|| -> Option<i32> {
            panic!("operand must not be enumerated")
        })));
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_intersect_with_known_empty_operand_clears() {
        let mut set = set_of(&[1, 2]);
        set.intersect_with(Vec::new());
        assert!(set.is_empty());
    }

    #[rstest]
    #[case::subset(&[1, 2], &[1, 2, 3], true, true, false, false)]
    #[case::equal(&[1, 2], &[1, 2], true, false, true, false)]
    #[case::superset(&[1, 2, 3], &[2], false, false, true, true)]
    #[case::disjoint(&[1], &[2], false, false, false, false)]
    #[case::empty_receiver(&[], &[1], true, true, false, false)]
    #[case::empty_operand(&[1], &[], false, false, true, true)]
    fn test_subset_predicates(
        #[case] mine: &[i32],
        #[case] theirs: &[i32],
        #[case] subset: bool,
        #[case] proper_subset: bool,
        #[case] superset: bool,
        #[case] proper_superset: bool,
    ) {
        let set = set_of(mine);
        let other = set_of(theirs);
        assert_eq!(set.is_subset_of(&other), subset);
        assert_eq!(set.is_proper_subset_of(&other), proper_subset);
        assert_eq!(set.is_superset_of(&other), superset);
        assert_eq!(set.is_proper_superset_of(&other), proper_superset);

        let unsorted: Vec<i32> = theirs.iter().rev().copied().collect();
        assert_eq!(set.is_subset_of(unsorted.clone()), subset);
        assert_eq!(set.is_proper_subset_of(unsorted.clone()), proper_subset);
        assert_eq!(set.is_superset_of(unsorted.clone()), superset);
        assert_eq!(set.is_proper_superset_of(unsorted), proper_superset);
    }

    #[rstest]
    fn test_predicates_ignore_operand_duplicates() {
        let set = set_of(&[1, 2]);
        assert!(set.set_equals(vec![2, 1, 2, 1]));
        assert!(set.is_superset_of(vec![1, 1, 1]));
        assert!(!set.is_proper_subset_of(vec![1, 2, 2]));
    }

    #[rstest]
    fn test_overlaps_and_set_equals() {
        let set = set_of(&[1, 3, 5]);
        assert!(set.overlaps(vec![5, 7]));
        assert!(!set.overlaps(vec![2, 4]));
        assert!(set.set_equals(&set_of(&[5, 3, 1])));
        assert!(!set.set_equals(&set_of(&[1, 3])));
        assert!(!SortedSet::<i32>::new().overlaps(vec![1]));
    }

    #[rstest]
    fn test_sorted_range_operand() {
        let data = [2, 3];
        let range = SortedRange::new(&data, Natural).unwrap();
        let mut set = set_of(&[1, 2]);
        set.union_with(range);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn test_statistics_operand_is_deduplicated() {
        let statistics: OrderStatistics<i32> = [4, 4, 2].into_iter().collect();
        let mut set = set_of(&[1, 2]);
        set.symmetric_except_with(&statistics);
        assert_eq!(set.as_slice(), &[1, 4]);
    }

    #[rstest]
    fn test_partial_eq_uses_order() {
        let order = by_key(|value: &i32| value / 10);
        let left = SortedSet::from_vec_with_order(vec![11, 22], order);
        let right = SortedSet::from_vec_with_order(vec![19, 28], order);
        assert!(left == right);
    }

    #[rstest]
    fn test_reversed_set_queries() {
        let set = SortedSet::from_vec_with_order(vec![1, 5, 3], Reversed(Natural));
        assert_eq!(set.as_slice(), &[5, 3, 1]);
        assert_eq!(set.min().unwrap(), &5);
        assert_eq!(set.floor(&4).unwrap(), &5);
        assert_eq!(set.ceiling(&4).unwrap(), &3);
        assert_eq!(set.rank(&3), 1);
    }

    #[rstest]
    fn test_mutation_invalidates_cursor() {
        let mut set = set_of(&[1, 2, 3]);
        let mut cursor = set.cursor();
        assert_eq!(set.advance(&mut cursor).unwrap(), Some(&1));
        set.union_with(vec![9]);
        assert!(matches!(
            set.advance(&mut cursor),
            Err(OrderError::ConcurrentModification { .. })
        ));
    }

    #[rstest]
    fn test_debug_formats_as_set() {
        assert_eq!(format!("{:?}", set_of(&[2, 1])), "{1, 2}");
    }
}
