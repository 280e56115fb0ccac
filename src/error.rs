//! Error types for ordered containers and search primitives.
//!
//! Failures fall into a small taxonomy:
//!
//! - precondition violations ([`OrderError::InvalidArgument`],
//!   [`OrderError::IndexOutOfRange`]) detected before any state is touched
//! - empty answers ([`OrderError::NoSuchElement`]) where no sentinel value
//!   exists for `T`
//! - faults raised by caller-supplied comparators or finders
//!   ([`OrderError::ComparatorFailed`])
//! - fail-fast iteration over a container that was mutated
//!   ([`OrderError::ConcurrentModification`])
//!
//! "Not found" is never an error: searches return
//! [`SearchResult`](crate::search::SearchResult) and removals return `bool`.

use std::error::Error;
use std::fmt;

/// Boxed error type carried as the source of a [`ComparatorFailedError`].
pub type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type OrderResult<A> = Result<A, OrderError>;

// =============================================================================
// ComparatorFailedError
// =============================================================================

/// A caller-supplied comparator or finder faulted during an algorithm step.
///
/// The original fault is preserved and available through
/// [`Error::source`].
///
/// # Examples
///
/// ```rust
/// use ordkit::error::{CallbackPanicked, ComparatorFailedError};
///
/// let error = ComparatorFailedError::new(
///     "finder",
///     CallbackPanicked::new("index out of bounds".to_string()),
/// );
/// assert_eq!(error.callback(), "finder");
/// assert_eq!(
///     format!("{error}"),
///     "comparator callback `finder` failed: callback panicked: index out of bounds"
/// );
/// ```
#[derive(Debug)]
pub struct ComparatorFailedError {
    callback: &'static str,
    source: BoxedSource,
}

impl ComparatorFailedError {
    /// Wraps `source` as a fault of the callback named `callback`.
    pub fn new<E>(callback: &'static str, source: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        Self {
            callback,
            source: source.into(),
        }
    }

    /// Returns the name of the callback that failed.
    #[must_use]
    pub const fn callback(&self) -> &'static str {
        self.callback
    }

    /// Returns the original fault.
    #[must_use]
    pub fn fault(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl fmt::Display for ComparatorFailedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "comparator callback `{}` failed: {}",
            self.callback, self.source
        )
    }
}

impl Error for ComparatorFailedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// The fault recorded when a callback panics instead of returning an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPanicked {
    message: String,
}

impl CallbackPanicked {
    /// Creates a record of a panic with the given message.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self { message }
    }

    /// Returns the panic message, or `"<non-string panic payload>"`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CallbackPanicked {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "callback panicked: {}", self.message)
    }
}

impl Error for CallbackPanicked {}

// =============================================================================
// OrderError
// =============================================================================

/// Errors produced by search primitives and ordered containers.
#[derive(Debug)]
pub enum OrderError {
    /// A required argument violated its precondition.
    InvalidArgument {
        /// The offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// An index or rank was outside the valid range.
    IndexOutOfRange {
        /// The offending parameter.
        parameter: &'static str,
        /// The requested index.
        index: usize,
        /// The number of addressable elements.
        length: usize,
    },

    /// The query has no answer in the current contents.
    ///
    /// Raised by `min`/`max` on an empty container, and by `floor`/`ceiling`
    /// when no element lies on the requested side of the probe value.
    NoSuchElement {
        /// The operation that found nothing.
        operation: &'static str,
    },

    /// A caller-supplied comparator or finder faulted.
    ComparatorFailed(ComparatorFailedError),

    /// The container was mutated after a cursor over it was created.
    ConcurrentModification {
        /// The version the cursor was created against.
        expected: u64,
        /// The version observed at the failed pull.
        found: u64,
    },
}

impl OrderError {
    /// Shorthand for [`OrderError::InvalidArgument`].
    #[must_use]
    pub const fn invalid_argument(parameter: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { parameter, reason }
    }

    /// Shorthand for [`OrderError::NoSuchElement`].
    #[must_use]
    pub const fn no_such_element(operation: &'static str) -> Self {
        Self::NoSuchElement { operation }
    }

    /// Returns `true` for the empty-container class of errors.
    #[must_use]
    pub const fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement { .. })
    }

    /// Returns `true` if a caller-supplied callback faulted.
    #[must_use]
    pub const fn is_comparator_failure(&self) -> bool {
        matches!(self, Self::ComparatorFailed(_))
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { parameter, reason } => {
                write!(formatter, "invalid argument `{parameter}`: {reason}")
            }
            Self::IndexOutOfRange {
                parameter,
                index,
                length,
            } => write!(
                formatter,
                "`{parameter}` out of range: index {index} but length is {length}"
            ),
            Self::NoSuchElement { operation } => {
                write!(formatter, "{operation}: no such element")
            }
            Self::ComparatorFailed(error) => write!(formatter, "{error}"),
            Self::ConcurrentModification { expected, found } => write!(
                formatter,
                "container modified during iteration (version {expected} -> {found})"
            ),
        }
    }
}

impl Error for OrderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ComparatorFailed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ComparatorFailedError> for OrderError {
    fn from(error: ComparatorFailedError) -> Self {
        Self::ComparatorFailed(error)
    }
}
