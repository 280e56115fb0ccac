//! # ordkit
//!
//! Comparator-parameterized ordered containers and sorted-sequence algorithms.
//!
//! ## Overview
//!
//! Everything in this crate is driven by an explicit [`Order`](order::Order)
//! (a three-way comparison) or [`Equivalence`](order::Equivalence)
//! (equality + hash) supplied by the caller. Nothing assumes a default order
//! beyond the one it is handed.
//!
//! - **Bound Search**: `lower_bound`, `upper_bound`, `equal_range`,
//!   `binary_search` and `rank` over sorted slices
//! - **Order Statistics**: a sorted, growable container with rank, select,
//!   floor, ceiling and range counting
//! - **Sorted Set**: the same storage with uniqueness and set algebra
//! - **Merge Algebra**: lazy single-pass merge, union, intersection,
//!   difference, symmetric difference, combine, interleave, distinct and
//!   run-to-range compression of sorted sequences
//!
//! ## Feature Flags
//!
//! - `search`: Bound search primitives and the `SortedRange` view
//! - `statistics`: The order statistics container
//! - `merge`: Lazy merge algebra over sorted iterators
//! - `set`: Sorted set and the sequence traits probe
//! - `tracing`: Emit `tracing` events at algorithm dispatch points
//! - `fxhash` / `ahash`: Hasher used by the natural equivalence
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordkit::prelude::*;
//!
//! let merged: Vec<i32> = merge([1, 3, 5], [2, 3, 4], Natural).collect();
//! assert_eq!(merged, vec![1, 2, 3, 3, 4, 5]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

#[macro_use]
mod logging;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and functions.
///
/// # Usage
///
/// ```rust
/// use ordkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::order::*;

    #[cfg(feature = "search")]
    pub use crate::search::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::*;

    #[cfg(feature = "merge")]
    pub use crate::merge::*;

    #[cfg(feature = "set")]
    pub use crate::set::*;
}

pub mod error;
pub mod order;

#[cfg(feature = "search")]
pub mod search;

#[cfg(feature = "statistics")]
pub mod statistics;

#[cfg(feature = "merge")]
pub mod merge;

#[cfg(feature = "set")]
pub mod set;
