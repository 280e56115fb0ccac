//! Order statistics over a sorted, growable buffer.
//!
//! This module provides [`OrderStatistics`], a mutable sequence kept sorted
//! under an [`Order`] at every point between public calls.
//!
//! # Overview
//!
//! - Elements live in a contiguous `Vec<T>` with amortized doubling growth.
//! - Every insertion lands at the [`upper_bound`] of the new element, so equal
//!   elements keep their insertion order: a newly added element always goes
//!   after the elements already equal to it.
//! - Rank, select, floor, ceiling and range counting are answered with bound
//!   searches over the buffer.
//!
//! # Time Complexity
//!
//! | Operation              | Complexity                       |
//! |------------------------|----------------------------------|
//! | `add`                  | O(log n) search + O(n) shift     |
//! | `remove`               | O(log n) search + O(n) shift     |
//! | `remove_min`           | O(n) shift                       |
//! | `remove_max`           | O(1)                             |
//! | `min` / `max`          | O(1)                             |
//! | `floor` / `ceiling`    | O(log n)                         |
//! | `rank`                 | O(log n)                         |
//! | `select`               | O(1)                             |
//! | `count_between`        | O(log n)                         |
//! | `enumerate_between`    | O(log n) + O(k) to consume       |
//!
//! The O(n) shift on insertion/removal is inherent to a contiguous buffer and
//! is not hidden behind amortization.
//!
//! # Iteration Safety
//!
//! Borrowing iterators ([`iter`](OrderStatistics::iter),
//! [`enumerate_between`](OrderStatistics::enumerate_between)) make mutation
//! during iteration a compile error. Detached [`RangeCursor`]s carry a version
//! stamp instead; [`advance`](OrderStatistics::advance) fails with
//! [`OrderError::ConcurrentModification`] after any mutation.
//!
//! Stamps come from a process-wide counter, so no two containers share a
//! non-zero stamp, and a clone gets its own. Zero is reserved for containers
//! that were created empty and never mutated, where every cursor is already
//! exhausted.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::statistics::OrderStatistics;
//!
//! let statistics: OrderStatistics<i32> = [5, 1, 4, 2, 3].into_iter().collect();
//! assert_eq!(statistics.as_slice(), &[1, 2, 3, 4, 5]);
//! assert_eq!(statistics.rank(&3), 2);
//! assert_eq!(statistics.select(0).unwrap(), &1);
//! assert_eq!(statistics.floor(&3).unwrap(), &3);
//! assert_eq!(statistics.ceiling(&4).unwrap(), &4);
//! ```

mod cursor;

pub use cursor::Between;
pub use cursor::RangeCursor;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::{OrderError, OrderResult};
use crate::order::{Natural, Order};
use crate::search::{SearchResult, SortedRange, binary_search, equal_range, lower_bound, upper_bound};

static STAMPS: AtomicU64 = AtomicU64::new(1);

/// Draws a version stamp no other container state has used.
fn next_stamp() -> u64 {
    STAMPS.fetch_add(1, AtomicOrdering::Relaxed)
}

/// A mutable sequence kept sorted under an [`Order`], with rank/select
/// queries.
///
/// Duplicates are allowed and keep their insertion order.
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `O` - The order the buffer is sorted under. Defaults to [`Natural`].
pub struct OrderStatistics<T, O = Natural> {
    items: Vec<T>,
    order: O,
    version: u64,
}

impl<T: Ord> OrderStatistics<T, Natural> {
    /// Creates an empty container ordered by `T: Ord`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::statistics::OrderStatistics;
    ///
    /// let statistics: OrderStatistics<i32> = OrderStatistics::new();
    /// assert!(statistics.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<T, O> OrderStatistics<T, O> {
    /// Creates an empty container sorted under `order`.
    #[inline]
    #[must_use]
    pub const fn with_order(order: O) -> Self {
        Self {
            items: Vec::new(),
            order,
            version: 0,
        }
    }

    /// Creates an empty container with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            order,
            version: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the elements in sorted order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the elements in sorted order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the order the container is sorted under.
    #[inline]
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Returns the version stamp.
    ///
    /// The stamp changes on every successful mutation and is unique to this
    /// container unless it is `0` (created empty, never mutated).
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Consumes the container, returning the sorted buffer.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Consumes the container, returning the buffer and the order.
    #[inline]
    pub fn into_parts(self) -> (Vec<T>, O) {
        (self.items, self.order)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.touch();
        }
    }

    /// Returns the element at rank `rank` (0-based).
    ///
    /// # Errors
    ///
    /// - [`OrderError::NoSuchElement`] if the container is empty
    /// - [`OrderError::IndexOutOfRange`] if `rank >= len()`
    pub fn select(&self, rank: usize) -> OrderResult<&T> {
        if self.items.is_empty() {
            return Err(OrderError::no_such_element("select"));
        }
        self.items.get(rank).ok_or(OrderError::IndexOutOfRange {
            parameter: "rank",
            index: rank,
            length: self.items.len(),
        })
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if the container is empty.
    pub fn min(&self) -> OrderResult<&T> {
        self.items
            .first()
            .ok_or(OrderError::no_such_element("min"))
    }

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if the container is empty.
    pub fn max(&self) -> OrderResult<&T> {
        self.items.last().ok_or(OrderError::no_such_element("max"))
    }

    /// Removes and returns the smallest element, or `None` if empty.
    pub fn remove_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let removed = self.items.remove(0);
        self.touch();
        Some(removed)
    }

    /// Removes and returns the largest element, or `None` if empty.
    pub fn remove_max(&mut self) -> Option<T> {
        let removed = self.items.pop()?;
        self.touch();
        Some(removed)
    }

    /// Retains only the elements for which `keep` returns `true`.
    ///
    /// Relative order is preserved, so the buffer stays sorted.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(keep);
        if self.items.len() != before {
            self.touch();
        }
    }

    /// Creates a detached cursor over every element.
    #[must_use]
    pub fn cursor(&self) -> RangeCursor {
        RangeCursor::new(0..self.items.len(), self.version)
    }

    /// Pulls the next element through a detached cursor.
    ///
    /// Returns `Ok(None)` once the cursor is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ConcurrentModification`] if the container was
    /// mutated after the cursor was created, or if the cursor was created by
    /// a different container.
    pub fn advance(&self, cursor: &mut RangeCursor) -> OrderResult<Option<&T>> {
        if cursor.version != self.version {
            return Err(self.stale_cursor(cursor));
        }
        if cursor.position >= cursor.end {
            return Ok(None);
        }
        let element = self
            .items
            .get(cursor.position)
            .ok_or_else(|| self.stale_cursor(cursor))?;
        cursor.position += 1;
        Ok(Some(element))
    }

    fn stale_cursor(&self, cursor: &RangeCursor) -> OrderError {
        debug_event!(
            expected = cursor.version,
            found = self.version,
            "cursor does not match container state"
        );
        OrderError::ConcurrentModification {
            expected: cursor.version,
            found: self.version,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.version = next_stamp();
    }

    pub(crate) fn insert_at(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
        self.touch();
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> T {
        let removed = self.items.remove(index);
        self.touch();
        removed
    }

    #[cfg_attr(not(feature = "set"), allow(dead_code))]
    pub(crate) fn replace_at(&mut self, index: usize, item: T) -> T {
        let replaced = std::mem::replace(&mut self.items[index], item);
        self.touch();
        replaced
    }

    /// Rebuilds the buffer from its previous contents.
    ///
    /// `rebuild` must return elements sorted under the container's order.
    #[cfg_attr(not(feature = "set"), allow(dead_code))]
    pub(crate) fn rebuild<F>(&mut self, rebuild: F)
    where
        F: FnOnce(Vec<T>, &O) -> Vec<T>,
    {
        let items = std::mem::take(&mut self.items);
        self.items = rebuild(items, &self.order);
        self.touch();
    }

    /// Wraps a buffer the caller guarantees to be sorted.
    #[cfg_attr(not(feature = "set"), allow(dead_code))]
    pub(crate) fn from_sorted_unchecked(items: Vec<T>, order: O) -> Self {
        Self {
            items,
            order,
            version: next_stamp(),
        }
    }
}

impl<T, O: Order<T>> OrderStatistics<T, O> {
    /// Creates a container from arbitrary elements, sorting them once.
    ///
    /// The sort is stable, so equal elements keep their relative input
    /// order, exactly as if they had been added one at a time.
    pub fn from_vec_with_order(mut items: Vec<T>, order: O) -> Self {
        let already_sorted = is_sorted(&items, &order);
        trace_event!(
            length = items.len(),
            already_sorted,
            "building order statistics container"
        );
        if !already_sorted {
            items.sort_by(|left, right| order.compare(left, right));
        }
        Self {
            items,
            order,
            version: next_stamp(),
        }
    }

    /// Creates a container from elements already sorted under `order`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `items` is not sorted.
    pub fn from_sorted_vec_with_order(items: Vec<T>, order: O) -> OrderResult<Self> {
        if !is_sorted(&items, &order) {
            return Err(OrderError::invalid_argument(
                "items",
                "elements are not sorted under the supplied order",
            ));
        }
        Ok(Self {
            items,
            order,
            version: next_stamp(),
        })
    }

    /// Returns a [`SortedRange`] view over the buffer.
    pub fn as_sorted_range(&self) -> SortedRange<'_, T, &O> {
        SortedRange::from_sorted_unchecked(&self.items, &self.order, false)
    }

    /// Inserts `item` after every element equal to it and returns its index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::order::by_key;
    /// use ordkit::statistics::OrderStatistics;
    ///
    /// let mut statistics = OrderStatistics::with_order(by_key(|pair: &(i32, char)| pair.0));
    /// statistics.add((1, 'a'));
    /// statistics.add((0, 'b'));
    /// statistics.add((1, 'c'));
    /// assert_eq!(statistics.as_slice(), &[(0, 'b'), (1, 'a'), (1, 'c')]);
    /// ```
    pub fn add(&mut self, item: T) -> usize {
        let index = upper_bound(&self.items, &item, &self.order);
        self.insert_at(index, item);
        index
    }

    /// Removes one element equal to `item`, returning it.
    ///
    /// When several elements are equal, the earliest inserted one is removed.
    pub fn take(&mut self, item: &T) -> Option<T> {
        match binary_search(&self.items, item, &self.order) {
            SearchResult::Found(index) => Some(self.remove_at(index)),
            SearchResult::NotFound(_) => None,
        }
    }

    /// Removes one element equal to `item`. Returns `false` if none exists.
    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Returns `true` if an element equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        binary_search(&self.items, item, &self.order).is_found()
    }

    /// Returns the number of elements equal to `item`.
    pub fn count(&self, item: &T) -> usize {
        equal_range(&self.items, item, &self.order).len()
    }

    /// Returns the number of elements strictly less than `value`.
    pub fn rank(&self, value: &T) -> usize {
        lower_bound(&self.items, value, &self.order)
    }

    /// See [`lower_bound`](crate::search::lower_bound).
    pub fn lower_bound(&self, value: &T) -> usize {
        lower_bound(&self.items, value, &self.order)
    }

    /// See [`upper_bound`](crate::search::upper_bound).
    pub fn upper_bound(&self, value: &T) -> usize {
        upper_bound(&self.items, value, &self.order)
    }

    /// See [`equal_range`](crate::search::equal_range).
    pub fn equal_range(&self, value: &T) -> Range<usize> {
        equal_range(&self.items, value, &self.order)
    }

    /// See [`binary_search`](crate::search::binary_search).
    pub fn binary_search(&self, value: &T) -> SearchResult {
        binary_search(&self.items, value, &self.order)
    }

    /// Returns the largest element less than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if every element is greater than
    /// `value`, including when the container is empty.
    pub fn floor(&self, value: &T) -> OrderResult<&T> {
        match upper_bound(&self.items, value, &self.order) {
            0 => Err(OrderError::no_such_element("floor")),
            index => Ok(&self.items[index - 1]),
        }
    }

    /// Returns the smallest element greater than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoSuchElement`] if every element is less than
    /// `value`, including when the container is empty.
    pub fn ceiling(&self, value: &T) -> OrderResult<&T> {
        let index = lower_bound(&self.items, value, &self.order);
        self.items
            .get(index)
            .ok_or(OrderError::no_such_element("ceiling"))
    }

    /// Returns the index window of elements in the half-open value range
    /// `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn window_between(&self, low: &T, high: &T) -> OrderResult<Range<usize>> {
        if self.order.compare(low, high) == Ordering::Greater {
            return Err(OrderError::invalid_argument(
                "high",
                "upper value sorts before lower value",
            ));
        }
        let start = lower_bound(&self.items, low, &self.order);
        let end = start + lower_bound(&self.items[start..], high, &self.order);
        Ok(start..end)
    }

    /// Counts the elements in the half-open value range `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn count_between(&self, low: &T, high: &T) -> OrderResult<usize> {
        self.window_between(low, high).map(|window| window.len())
    }

    /// Iterates over the elements in the half-open value range `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::statistics::OrderStatistics;
    ///
    /// let statistics: OrderStatistics<i32> = (1..=10).collect();
    /// let between: Vec<i32> = statistics.enumerate_between(&3, &6).unwrap().copied().collect();
    /// assert_eq!(between, vec![3, 4, 5]);
    /// ```
    pub fn enumerate_between(&self, low: &T, high: &T) -> OrderResult<Between<'_, T>> {
        self.window_between(low, high)
            .map(|window| Between::new(&self.items[window]))
    }

    /// Creates a detached cursor over the half-open value range
    /// `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if `high` sorts before `low`.
    pub fn cursor_between(&self, low: &T, high: &T) -> OrderResult<RangeCursor> {
        self.window_between(low, high)
            .map(|window| RangeCursor::new(window, self.version))
    }
}

fn is_sorted<T, O: Order<T>>(items: &[T], order: &O) -> bool {
    items
        .windows(2)
        .all(|pair| order.compare(&pair[0], &pair[1]) != Ordering::Greater)
}

impl<T: Ord> Default for OrderStatistics<T, Natural> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O: Clone> Clone for OrderStatistics<T, O> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            order: self.order.clone(),
            version: next_stamp(),
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for OrderStatistics<T, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq, O> PartialEq for OrderStatistics<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq, O> Eq for OrderStatistics<T, O> {}

impl<T: Ord> FromIterator<T> for OrderStatistics<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec_with_order(iter.into_iter().collect(), Natural)
    }
}

impl<T, O: Order<T>> Extend<T> for OrderStatistics<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T, O> IntoIterator for &'a OrderStatistics<T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, O> IntoIterator for OrderStatistics<T, O> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

static_assertions::assert_impl_all!(OrderStatistics<i32>: Send, Sync);
