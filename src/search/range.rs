//! A borrowed view over a slice known to be sorted under an order.

use std::cmp::Ordering;
use std::ops::Range;

use super::{SearchResult, binary_search, equal_range, lower_bound, upper_bound, window};
use crate::error::{OrderError, OrderResult};
use crate::order::Order;

/// A slice paired with the [`Order`] it is sorted under.
///
/// The view never owns its storage. Construction through [`SortedRange::new`]
/// verifies sortedness once (O(n)) and records whether the elements are also
/// strictly increasing, so later consumers can rely on both facts without
/// re-checking.
///
/// # Examples
///
/// ```rust
/// use ordkit::order::Natural;
/// use ordkit::search::SortedRange;
///
/// let data = [1, 3, 3, 3, 5];
/// let range = SortedRange::new(&data, Natural).unwrap();
/// assert_eq!(range.equal_range(&3), 1..4);
/// assert!(!range.is_unique());
///
/// assert!(SortedRange::new(&[2, 1], Natural).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SortedRange<'a, T, O> {
    items: &'a [T],
    order: O,
    unique: bool,
}

impl<'a, T, O: Order<T>> SortedRange<'a, T, O> {
    /// Creates a view after verifying that `items` is sorted under `order`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if any adjacent pair is out of
    /// order.
    pub fn new(items: &'a [T], order: O) -> OrderResult<Self> {
        let mut unique = true;
        for pair in items.windows(2) {
            match order.compare(&pair[0], &pair[1]) {
                Ordering::Less => {}
                Ordering::Equal => unique = false,
                Ordering::Greater => {
                    return Err(OrderError::invalid_argument(
                        "items",
                        "elements are not sorted under the supplied order",
                    ));
                }
            }
        }
        Ok(Self {
            items,
            order,
            unique,
        })
    }

    /// Creates a view over `items` that the caller guarantees to be sorted
    /// and, if `unique` is `true`, strictly increasing.
    ///
    /// The guarantee is checked with `debug_assert!` only.
    pub fn from_sorted_unchecked(items: &'a [T], order: O, unique: bool) -> Self {
        debug_assert!(
            items.windows(2).all(|pair| {
                let ordering = order.compare(&pair[0], &pair[1]);
                ordering == Ordering::Less || (!unique && ordering == Ordering::Equal)
            }),
            "SortedRange::from_sorted_unchecked requires sorted input"
        );
        Self {
            items,
            order,
            unique,
        }
    }

    /// Returns the underlying slice.
    #[inline]
    #[must_use]
    pub const fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Returns the order the slice is sorted under.
    #[inline]
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if no two elements compare equal.
    #[inline]
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the element at `index`, if in bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index)
    }

    /// See [`lower_bound`](super::lower_bound).
    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize {
        lower_bound(self.items, value, &self.order)
    }

    /// See [`upper_bound`](super::upper_bound).
    #[inline]
    pub fn upper_bound(&self, value: &T) -> usize {
        upper_bound(self.items, value, &self.order)
    }

    /// See [`equal_range`](super::equal_range).
    #[inline]
    pub fn equal_range(&self, value: &T) -> Range<usize> {
        equal_range(self.items, value, &self.order)
    }

    /// See [`binary_search`](super::binary_search).
    #[inline]
    pub fn binary_search(&self, value: &T) -> SearchResult {
        binary_search(self.items, value, &self.order)
    }

    /// See [`rank`](super::rank).
    #[inline]
    pub fn rank(&self, value: &T) -> usize {
        self.lower_bound(value)
    }

    /// Returns `true` if an element equal to `value` is present.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.binary_search(value).is_found()
    }

    /// Iterates over the elements in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }

    /// Returns the sub-view `start..start + length`.
    ///
    /// Indices reported by the sub-view are relative to `start`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] if the window does not fit.
    pub fn window(&self, start: usize, length: usize) -> OrderResult<Self>
    where
        O: Clone,
    {
        window(self.items, start, length).map(|items| Self {
            items,
            order: self.order.clone(),
            unique: self.unique,
        })
    }
}

impl<'a, T, O> IntoIterator for &SortedRange<'a, T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
