//! Logging macros for the adapter, emitting under the `nested_scroll_adapter` target when the
//! `tracing` feature is on.

#[cfg(feature = "tracing")]
macro_rules! adebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "nested_scroll_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! awarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "nested_scroll_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! awarn {
    ($($tt:tt)*) => {};
}
