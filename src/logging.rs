//! Internal logging shims.
//!
//! Algorithms report dispatch decisions through these macros. With the
//! `tracing` feature enabled they forward to `tracing`; without it they
//! expand to nothing and the crate carries no logging dependency.

/// Emits a `trace`-level event when the `tracing` feature is enabled.
#[allow(unused_macros)]
macro_rules! trace_event {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($argument)*);
    };
}

/// Emits a `debug`-level event when the `tracing` feature is enabled.
#[allow(unused_macros)]
macro_rules! debug_event {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($argument)*);
    };
}
