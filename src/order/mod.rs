//! Total orders and equivalences supplied by callers.
//!
//! Every algorithm in this crate is parameterized by one of two capability
//! traits:
//!
//! - [`Order`]: a three-way comparison defining a strict weak ordering
//! - [`Equivalence`]: an equality predicate paired with a consistent hash
//!
//! Orders are generic type parameters, so each call site is monomorphized and
//! no comparator is ever boxed.
//!
//! # Provided Orders
//!
//! | Order          | Compares by                     | `is_equivalent_to` |
//! |----------------|---------------------------------|--------------------|
//! | [`Natural`]    | `Ord`                           | always `true`      |
//! | [`Reversed`]   | the inner order, reversed       | inner order's      |
//! | [`ByKey`]      | `Ord` on a projected key        | `false`            |
//! | [`FnOrder`]    | a closure                       | `false`            |
//!
//! `is_equivalent_to` is how containers decide that two operands are sorted
//! "under the same order" without inspecting concrete types. Orders that
//! cannot prove equality answer `false`, which only ever costs performance.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::order::{ByKey, Natural, Order, Reversed};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
//!
//! let by_length = ByKey::new(|word: &&str| word.len());
//! assert_eq!(by_length.compare(&"pear", &"fig"), Ordering::Greater);
//! ```

mod equivalence;

pub use equivalence::Equivalence;
pub use equivalence::EquivalenceByKey;
pub use equivalence::NaturalEquivalence;
pub use equivalence::OrderEquivalence;

use std::cmp::Ordering;
use std::fmt;

/// A total order over `T`.
///
/// Implementations must be a strict weak ordering (irreflexive, transitive,
/// consistent) for as long as any structure built on them is alive. Violating
/// this does not cause memory unsafety, but leaves the structure's contents in
/// an unspecified order.
pub trait Order<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if `left` sorts strictly before `right`.
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Less
    }

    /// Returns `true` if `left` and `right` compare equal.
    #[inline]
    fn equal(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Equal
    }

    /// Returns `true` if `other` is known to order every pair of values
    /// exactly as `self` does.
    ///
    /// The default answer is `false`: an order that cannot prove equality
    /// disables merge-based fast paths but never changes results.
    #[inline]
    fn is_equivalent_to(&self, other: &Self) -> bool {
        let _ = other;
        false
    }
}

impl<T: ?Sized, O: Order<T> + ?Sized> Order<T> for &O {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (**self).compare(left, right)
    }

    #[inline]
    fn is_equivalent_to(&self, other: &Self) -> bool {
        (**self).is_equivalent_to(*other)
    }
}

// =============================================================================
// Natural
// =============================================================================

/// The order given by `T: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Order<T> for Natural {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }

    #[inline]
    fn is_equivalent_to(&self, _other: &Self) -> bool {
        true
    }
}

// =============================================================================
// Reversed
// =============================================================================

/// Reverses an inner order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed<O>(pub O);

impl<T: ?Sized, O: Order<T>> Order<T> for Reversed<O> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }

    #[inline]
    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.0.is_equivalent_to(&other.0)
    }
}

// =============================================================================
// ByKey
// =============================================================================

/// Orders values by an `Ord` key projected out of them.
#[derive(Clone, Copy)]
pub struct ByKey<F> {
    key: F,
}

impl<F> ByKey<F> {
    /// Creates an order comparing `key(value)`.
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K> Order<T> for ByKey<F> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.key)(left).cmp(&(self.key)(right))
    }
}

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ByKey").finish_non_exhaustive()
    }
}

// =============================================================================
// FnOrder
// =============================================================================

/// Wraps a comparison closure as an [`Order`].
///
/// # Examples
///
/// ```rust
/// use ordkit::order::{FnOrder, Order};
/// use std::cmp::Ordering;
///
/// let case_insensitive =
///     FnOrder::new(|left: &str, right: &str| left.to_lowercase().cmp(&right.to_lowercase()));
/// assert_eq!(case_insensitive.compare("Apple", "apple"), Ordering::Equal);
/// ```
#[derive(Clone, Copy)]
pub struct FnOrder<F> {
    compare: F,
}

impl<F> FnOrder<F> {
    /// Creates an order backed by `compare`.
    pub const fn new(compare: F) -> Self {
        Self { compare }
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Order<T> for FnOrder<F> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.compare)(left, right)
    }
}

impl<F> fmt::Debug for FnOrder<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FnOrder").finish_non_exhaustive()
    }
}

/// Shorthand for [`FnOrder::new`].
pub const fn from_fn<F>(compare: F) -> FnOrder<F> {
    FnOrder::new(compare)
}

/// Shorthand for [`ByKey::new`].
pub const fn by_key<F>(key: F) -> ByKey<F> {
    ByKey::new(key)
}

// Orders are zero-cost when they carry no state.
static_assertions::assert_eq_size!(Natural, ());
static_assertions::assert_eq_size!(Reversed<Natural>, ());
static_assertions::assert_impl_all!(Natural: Send, Sync, Copy);
