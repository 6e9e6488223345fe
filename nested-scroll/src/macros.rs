//! Crate-private logging macros.
//!
//! With the `tracing` feature they emit events under the `nested_scroll` target (filter with
//! `RUST_LOG=nested_scroll=trace`); without it they expand to nothing and their arguments are
//! not evaluated.

#[cfg(feature = "tracing")]
macro_rules! strace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "nested_scroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! strace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! sdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "nested_scroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! swarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "nested_scroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! swarn {
    ($($tt:tt)*) => {};
}
