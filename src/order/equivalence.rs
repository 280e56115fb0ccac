//! Equality + hash capability.
//!
//! An [`Equivalence`] pairs `equals` with a `hash` that is consistent with it:
//! `equals(a, b)` implies `hash(a) == hash(b)`.
//!
//! The hasher behind [`NaturalEquivalence`] is selected at compile time:
//!
//! | Feature   | Hasher                                 |
//! |-----------|----------------------------------------|
//! | (none)    | `std::collections::hash_map::DefaultHasher` |
//! | `fxhash`  | `rustc_hash::FxHasher`                 |
//! | `ahash`   | `ahash::AHasher` (fixed keys)          |
//!
//! Whatever the hasher, results are deterministic for the lifetime of the
//! process.

use std::hash::{Hash, Hasher};

use super::Order;

/// An equality predicate with a consistent hash.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `left` and `right` are equivalent.
    fn equals(&self, left: &T, right: &T) -> bool;

    /// Hashes `value` consistently with [`equals`](Equivalence::equals).
    fn hash(&self, value: &T) -> u64;
}

#[cfg(feature = "fxhash")]
fn new_hasher() -> impl Hasher {
    rustc_hash::FxHasher::default()
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
fn new_hasher() -> impl Hasher {
    ahash::AHasher::default()
}

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
fn new_hasher() -> impl Hasher {
    std::collections::hash_map::DefaultHasher::new()
}

/// Computes the hash of `value` with the configured hasher.
fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = new_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// NaturalEquivalence
// =============================================================================

/// The equivalence given by `T: Eq + Hash`.
///
/// # Examples
///
/// ```rust
/// use ordkit::order::{Equivalence, NaturalEquivalence};
///
/// assert!(NaturalEquivalence.equals("a", "a"));
/// assert_eq!(NaturalEquivalence.hash("a"), NaturalEquivalence.hash("a"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalEquivalence;

impl<T: Eq + Hash + ?Sized> Equivalence<T> for NaturalEquivalence {
    #[inline]
    fn equals(&self, left: &T, right: &T) -> bool {
        left == right
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        hash_value(value)
    }
}

// =============================================================================
// EquivalenceByKey
// =============================================================================

/// Compares and hashes values through a projected key.
#[derive(Clone, Copy)]
pub struct EquivalenceByKey<F> {
    key: F,
}

impl<F> EquivalenceByKey<F> {
    /// Creates an equivalence over `key(value)`.
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T: ?Sized, K: Eq + Hash, F: Fn(&T) -> K> Equivalence<T> for EquivalenceByKey<F> {
    #[inline]
    fn equals(&self, left: &T, right: &T) -> bool {
        (self.key)(left) == (self.key)(right)
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        hash_value(&(self.key)(value))
    }
}

impl<F> std::fmt::Debug for EquivalenceByKey<F> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("EquivalenceByKey").finish_non_exhaustive()
    }
}

// =============================================================================
// OrderEquivalence
// =============================================================================

/// Views an [`Order`] as an equality predicate: `equals` is `compare == Equal`.
///
/// An order carries no hash, so `hash` returns a constant. That is consistent
/// with `equals` but degenerate; use this adapter for run collapsing over
/// sorted input, not for hash-based lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderEquivalence<O>(pub O);

impl<T: ?Sized, O: Order<T>> Equivalence<T> for OrderEquivalence<O> {
    #[inline]
    fn equals(&self, left: &T, right: &T) -> bool {
        self.0.equal(left, right)
    }

    #[inline]
    fn hash(&self, _value: &T) -> u64 {
        0
    }
}
