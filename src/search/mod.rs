//! Bound search over sorted slices.
//!
//! All functions in this module are pure: they read a slice that is already
//! sorted under the supplied [`Order`] and never allocate or mutate.
//!
//! # Contracts
//!
//! For a slice `list` of length `n` sorted under `order`:
//!
//! | Function        | Returns                                              |
//! |-----------------|------------------------------------------------------|
//! | [`lower_bound`] | first `i` with `list[i] >= value`, or `n`            |
//! | [`upper_bound`] | first `i` with `list[i] > value`, or `n`             |
//! | [`equal_range`] | `lower_bound..upper_bound`                           |
//! | [`binary_search`] | [`SearchResult::Found`] or the insertion point     |
//! | [`rank`]        | number of elements strictly less than `value`        |
//!
//! The `*_by` variants take a *finder* instead of a value and an order: a
//! closure reporting how an element compares with the (implicit) target.
//! This allows probing by a key without materializing a full `T`.
//!
//! The `try_*_by` variants accept a fallible finder. Any error it returns, or
//! any panic raised inside it, is caught at the search boundary and surfaced as
//! [`OrderError::ComparatorFailed`] naming the callback.
//!
//! # Complexity
//!
//! Every search is O(log n) finder/comparator calls. Midpoints are computed as
//! `low + (high - low) / 2`.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::order::Natural;
//! use ordkit::search::{SearchResult, binary_search, equal_range, lower_bound, upper_bound};
//!
//! let list = [1, 3, 3, 3, 5];
//! assert_eq!(lower_bound(&list, &3, &Natural), 1);
//! assert_eq!(upper_bound(&list, &3, &Natural), 4);
//! assert_eq!(equal_range(&list, &3, &Natural), 1..4);
//!
//! let result = binary_search(&[10, 20, 30], &25, &Natural);
//! assert_eq!(result, SearchResult::NotFound(2));
//! assert_eq!(result.to_encoded(), Some(!2));
//! ```

mod range;

pub use range::SortedRange;

use std::any::Any;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{BoxedSource, CallbackPanicked, ComparatorFailedError, OrderError, OrderResult};
use crate::order::Order;

// =============================================================================
// SearchResult
// =============================================================================

/// Outcome of [`binary_search`]: either the index of an equal element or the
/// position where the value would be inserted to keep the slice sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// An equal element lives at this index.
    Found(usize),
    /// No equal element; inserting at this index keeps the slice sorted.
    NotFound(usize),
}

impl SearchResult {
    /// Returns `true` for [`SearchResult::Found`].
    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the carried index, whichever variant this is.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Found(index) | Self::NotFound(index) => index,
        }
    }

    /// Returns the found index, if any.
    #[inline]
    #[must_use]
    pub const fn found(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::NotFound(_) => None,
        }
    }

    /// Returns the insertion point when nothing was found.
    #[inline]
    #[must_use]
    pub const fn insertion_point(self) -> Option<usize> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(index) => Some(index),
        }
    }

    /// Encodes the result as a single signed integer: the index when found,
    /// the one's complement (`!index`) of the insertion point otherwise.
    ///
    /// Returns `None` if the index exceeds `isize::MAX`, which only slices of
    /// zero-sized elements can reach.
    #[must_use]
    pub fn to_encoded(self) -> Option<isize> {
        match self {
            Self::Found(index) => isize::try_from(index).ok(),
            Self::NotFound(index) => isize::try_from(index).ok().map(|index| !index),
        }
    }

    /// Decodes the integer form produced by [`to_encoded`](Self::to_encoded).
    #[must_use]
    pub const fn from_encoded(encoded: isize) -> Self {
        if encoded >= 0 {
            Self::Found(encoded.unsigned_abs())
        } else {
            Self::NotFound((!encoded).unsigned_abs())
        }
    }
}

impl From<SearchResult> for Result<usize, usize> {
    fn from(result: SearchResult) -> Self {
        match result {
            SearchResult::Found(index) => Ok(index),
            SearchResult::NotFound(index) => Err(index),
        }
    }
}

// =============================================================================
// Core boundary search
// =============================================================================

/// Returns the first index whose element does not satisfy `is_before`.
///
/// `is_before` must be `true` for a (possibly empty) prefix of `list` and
/// `false` for the rest.
#[inline]
fn boundary<T, E>(
    list: &[T],
    mut is_before: impl FnMut(&T) -> Result<bool, E>,
) -> Result<usize, E> {
    let mut low = 0;
    let mut high = list.len();
    while low < high {
        let middle = low + (high - low) / 2;
        if is_before(&list[middle])? {
            low = middle + 1;
        } else {
            high = middle;
        }
    }
    Ok(low)
}

#[inline]
fn infallible<A>(result: Result<A, Infallible>) -> A {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// =============================================================================
// Order-based searches
// =============================================================================

/// Returns the first index `i` such that `list[i]` is not less than `value`.
///
/// Returns `list.len()` when every element is less than `value`.
#[inline]
pub fn lower_bound<T, O>(list: &[T], value: &T, order: &O) -> usize
where
    O: Order<T> + ?Sized,
{
    lower_bound_by(list, |element| order.compare(element, value))
}

/// Returns the first index `i` such that `list[i]` is greater than `value`.
///
/// This is one past the last element equal to `value`.
#[inline]
pub fn upper_bound<T, O>(list: &[T], value: &T, order: &O) -> usize
where
    O: Order<T> + ?Sized,
{
    upper_bound_by(list, |element| order.compare(element, value))
}

/// Returns the range of indices whose elements compare equal to `value`.
///
/// The upper search only covers `lower_bound..list.len()`.
#[inline]
pub fn equal_range<T, O>(list: &[T], value: &T, order: &O) -> Range<usize>
where
    O: Order<T> + ?Sized,
{
    equal_range_by(list, |element| order.compare(element, value))
}

/// Searches for `value`, reporting either an equal element or the insertion
/// point.
///
/// When several elements are equal, the first of them is reported.
#[inline]
pub fn binary_search<T, O>(list: &[T], value: &T, order: &O) -> SearchResult
where
    O: Order<T> + ?Sized,
{
    binary_search_by(list, |element| order.compare(element, value))
}

/// Returns the number of elements strictly less than `value`.
#[inline]
pub fn rank<T, O>(list: &[T], value: &T, order: &O) -> usize
where
    O: Order<T> + ?Sized,
{
    lower_bound(list, value, order)
}

// =============================================================================
// Finder-based searches
// =============================================================================

/// [`lower_bound`] driven by a finder reporting `element` vs. target.
#[inline]
pub fn lower_bound_by<T, F>(list: &[T], mut finder: F) -> usize
where
    F: FnMut(&T) -> Ordering,
{
    infallible(boundary(list, |element| Ok(finder(element) == Ordering::Less)))
}

/// [`upper_bound`] driven by a finder reporting `element` vs. target.
#[inline]
pub fn upper_bound_by<T, F>(list: &[T], mut finder: F) -> usize
where
    F: FnMut(&T) -> Ordering,
{
    infallible(boundary(list, |element| {
        Ok(finder(element) != Ordering::Greater)
    }))
}

/// [`equal_range`] driven by a finder reporting `element` vs. target.
#[inline]
pub fn equal_range_by<T, F>(list: &[T], mut finder: F) -> Range<usize>
where
    F: FnMut(&T) -> Ordering,
{
    let lower = lower_bound_by(list, &mut finder);
    let upper = lower + upper_bound_by(&list[lower..], &mut finder);
    lower..upper
}

/// [`binary_search`] driven by a finder reporting `element` vs. target.
#[inline]
pub fn binary_search_by<T, F>(list: &[T], mut finder: F) -> SearchResult
where
    F: FnMut(&T) -> Ordering,
{
    let lower = lower_bound_by(list, &mut finder);
    match list.get(lower) {
        Some(element) if finder(element) == Ordering::Equal => SearchResult::Found(lower),
        _ => SearchResult::NotFound(lower),
    }
}

/// [`lower_bound_by`] driven by a key projection instead of a finder.
#[inline]
pub fn lower_bound_by_key<T, K, F>(list: &[T], key: &K, mut project: F) -> usize
where
    K: Ord + ?Sized,
    F: FnMut(&T) -> &K,
{
    lower_bound_by(list, |element| project(element).cmp(key))
}

/// [`upper_bound_by`] driven by a key projection instead of a finder.
#[inline]
pub fn upper_bound_by_key<T, K, F>(list: &[T], key: &K, mut project: F) -> usize
where
    K: Ord + ?Sized,
    F: FnMut(&T) -> &K,
{
    upper_bound_by(list, |element| project(element).cmp(key))
}

// =============================================================================
// Fallible finder searches
// =============================================================================

const LOWER_BOUND_FINDER: &str = "lower_bound finder";
const UPPER_BOUND_FINDER: &str = "upper_bound finder";
const EQUAL_RANGE_FINDER: &str = "equal_range finder";
const BINARY_SEARCH_FINDER: &str = "binary_search finder";
const ORDER_CALLBACK: &str = "order";

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<non-string panic payload>".to_string())
}

/// Runs `search`, converting finder errors and panics into
/// [`OrderError::ComparatorFailed`] attributed to `callback`.
fn guarded<A>(
    callback: &'static str,
    search: impl FnOnce() -> Result<A, BoxedSource>,
) -> OrderResult<A> {
    match panic::catch_unwind(AssertUnwindSafe(search)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => {
            debug_event!(callback, error = %source, "search callback returned an error");
            Err(OrderError::ComparatorFailed(ComparatorFailedError::new(
                callback, source,
            )))
        }
        Err(payload) => {
            let fault = CallbackPanicked::new(panic_message(payload.as_ref()));
            debug_event!(callback, message = fault.message(), "search callback panicked");
            Err(OrderError::ComparatorFailed(ComparatorFailedError::new(
                callback, fault,
            )))
        }
    }
}

/// [`lower_bound_by`] with a fallible finder.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] if `finder` returns an error or
/// panics.
///
/// # Examples
///
/// ```rust
/// use ordkit::search::try_lower_bound_by;
///
/// let rows = ["3", "x", "7"];
/// let result = try_lower_bound_by(&rows, |row| row.parse::<i32>().map(|value| value.cmp(&5)));
/// assert!(result.unwrap_err().is_comparator_failure());
/// ```
pub fn try_lower_bound_by<T, F, E>(list: &[T], mut finder: F) -> OrderResult<usize>
where
    F: FnMut(&T) -> Result<Ordering, E>,
    E: Into<BoxedSource>,
{
    guarded(LOWER_BOUND_FINDER, || {
        boundary(list, |element| {
            finder(element)
                .map(|ordering| ordering == Ordering::Less)
                .map_err(Into::into)
        })
    })
}

/// [`upper_bound_by`] with a fallible finder.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] if `finder` returns an error or
/// panics.
pub fn try_upper_bound_by<T, F, E>(list: &[T], mut finder: F) -> OrderResult<usize>
where
    F: FnMut(&T) -> Result<Ordering, E>,
    E: Into<BoxedSource>,
{
    guarded(UPPER_BOUND_FINDER, || {
        boundary(list, |element| {
            finder(element)
                .map(|ordering| ordering != Ordering::Greater)
                .map_err(Into::into)
        })
    })
}

/// [`equal_range_by`] with a fallible finder.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] if `finder` returns an error or
/// panics.
pub fn try_equal_range_by<T, F, E>(list: &[T], mut finder: F) -> OrderResult<Range<usize>>
where
    F: FnMut(&T) -> Result<Ordering, E>,
    E: Into<BoxedSource>,
{
    guarded(EQUAL_RANGE_FINDER, || {
        let lower = boundary::<_, BoxedSource>(list, |element| {
            finder(element)
                .map(|ordering| ordering == Ordering::Less)
                .map_err(Into::into)
        })?;
        let upper = boundary::<_, BoxedSource>(&list[lower..], |element| {
            finder(element)
                .map(|ordering| ordering != Ordering::Greater)
                .map_err(Into::into)
        })?;
        Ok(lower..lower + upper)
    })
}

/// [`binary_search_by`] with a fallible finder.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] if `finder` returns an error or
/// panics.
pub fn try_binary_search_by<T, F, E>(list: &[T], mut finder: F) -> OrderResult<SearchResult>
where
    F: FnMut(&T) -> Result<Ordering, E>,
    E: Into<BoxedSource>,
{
    guarded(BINARY_SEARCH_FINDER, || {
        let lower = boundary::<_, BoxedSource>(list, |element| {
            finder(element)
                .map(|ordering| ordering == Ordering::Less)
                .map_err(Into::into)
        })?;
        match list.get(lower) {
            Some(element) if finder(element).map_err(Into::<BoxedSource>::into)? == Ordering::Equal => {
                Ok(SearchResult::Found(lower))
            }
            _ => Ok(SearchResult::NotFound(lower)),
        }
    })
}

/// [`lower_bound`] with an order whose comparisons may panic.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] naming `"order"` if a comparison
/// panics.
pub fn try_lower_bound<T, O>(list: &[T], value: &T, order: &O) -> OrderResult<usize>
where
    O: Order<T> + ?Sized,
{
    guarded(ORDER_CALLBACK, || Ok(lower_bound(list, value, order)))
}

/// [`upper_bound`] with an order whose comparisons may panic.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] naming `"order"` if a comparison
/// panics.
pub fn try_upper_bound<T, O>(list: &[T], value: &T, order: &O) -> OrderResult<usize>
where
    O: Order<T> + ?Sized,
{
    guarded(ORDER_CALLBACK, || Ok(upper_bound(list, value, order)))
}

/// [`equal_range`] with an order whose comparisons may panic.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] naming `"order"` if a comparison
/// panics.
///
/// # Examples
///
/// ```rust
/// use ordkit::order::from_fn;
/// use ordkit::search::try_equal_range;
///
/// let order = from_fn(|left: &f64, right: &f64| {
///     left.partial_cmp(right).unwrap_or_else(|| panic!("NaN in input"))
/// });
/// assert_eq!(try_equal_range(&[1.0, 2.0, 2.0], &2.0, &order).unwrap(), 1..3);
/// assert!(try_equal_range(&[1.0, f64::NAN], &2.0, &order).is_err());
/// ```
pub fn try_equal_range<T, O>(list: &[T], value: &T, order: &O) -> OrderResult<Range<usize>>
where
    O: Order<T> + ?Sized,
{
    guarded(ORDER_CALLBACK, || Ok(equal_range(list, value, order)))
}

/// [`binary_search`] with an order whose comparisons may panic.
///
/// # Errors
///
/// Returns [`OrderError::ComparatorFailed`] naming `"order"` if a comparison
/// panics.
pub fn try_binary_search<T, O>(list: &[T], value: &T, order: &O) -> OrderResult<SearchResult>
where
    O: Order<T> + ?Sized,
{
    guarded(ORDER_CALLBACK, || Ok(binary_search(list, value, order)))
}

// =============================================================================
// Windowed searches
// =============================================================================

/// Validates `start..start + length` against `list` and returns the window.
///
/// # Errors
///
/// Returns [`OrderError::InvalidArgument`] if the window overflows or extends
/// past the end of `list`.
pub fn window<T>(list: &[T], start: usize, length: usize) -> OrderResult<&[T]> {
    let end = start
        .checked_add(length)
        .ok_or_else(|| OrderError::invalid_argument("length", "start + length overflows"))?;
    if start > list.len() {
        return Err(OrderError::invalid_argument(
            "start",
            "start offset is past the end of the list",
        ));
    }
    if end > list.len() {
        return Err(OrderError::invalid_argument(
            "length",
            "window extends past the end of the list",
        ));
    }
    Ok(&list[start..end])
}

/// [`lower_bound`] over `list[start..start + length]`, returning an absolute
/// index.
///
/// An empty window yields `start`.
///
/// # Errors
///
/// Returns [`OrderError::InvalidArgument`] for an invalid window.
pub fn lower_bound_in<T, O>(
    list: &[T],
    start: usize,
    length: usize,
    value: &T,
    order: &O,
) -> OrderResult<usize>
where
    O: Order<T> + ?Sized,
{
    window(list, start, length).map(|range| start + lower_bound(range, value, order))
}

/// [`upper_bound`] over `list[start..start + length]`, returning an absolute
/// index.
///
/// # Errors
///
/// Returns [`OrderError::InvalidArgument`] for an invalid window.
pub fn upper_bound_in<T, O>(
    list: &[T],
    start: usize,
    length: usize,
    value: &T,
    order: &O,
) -> OrderResult<usize>
where
    O: Order<T> + ?Sized,
{
    window(list, start, length).map(|range| start + upper_bound(range, value, order))
}

/// [`equal_range`] over `list[start..start + length]`, returning absolute
/// indices.
///
/// # Errors
///
/// Returns [`OrderError::InvalidArgument`] for an invalid window.
pub fn equal_range_in<T, O>(
    list: &[T],
    start: usize,
    length: usize,
    value: &T,
    order: &O,
) -> OrderResult<Range<usize>>
where
    O: Order<T> + ?Sized,
{
    window(list, start, length).map(|range| {
        let found = equal_range(range, value, order);
        start + found.start..start + found.end
    })
}

/// [`binary_search`] over `list[start..start + length]`, returning absolute
/// indices.
///
/// # Errors
///
/// Returns [`OrderError::InvalidArgument`] for an invalid window.
pub fn binary_search_in<T, O>(
    list: &[T],
    start: usize,
    length: usize,
    value: &T,
    order: &O,
) -> OrderResult<SearchResult>
where
    O: Order<T> + ?Sized,
{
    window(list, start, length).map(|range| match binary_search(range, value, order) {
        SearchResult::Found(index) => SearchResult::Found(start + index),
        SearchResult::NotFound(index) => SearchResult::NotFound(start + index),
    })
}
