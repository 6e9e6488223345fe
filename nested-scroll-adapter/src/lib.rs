//! Adapter utilities for the `nested-scroll` crate.
//!
//! The `nested-scroll` crate is UI-agnostic and owns arbitration, sessions and trajectories.
//! This crate provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - String-keyed scroll configuration with lenient fallbacks
//! - A pointer/frame driver (`Controller`) with tween and spring scroll helpers
//! - An in-memory surface (`SimSurface`) and an event recorder (`EventLog`) for headless hosts
//!
//! This crate is intentionally framework-agnostic (no platform view bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod config;
mod controller;
mod recorder;
mod sim;

#[cfg(test)]
mod tests;

pub use config::{HostConfig, PROPERTY_KEYS, parse_flag};
pub use controller::{Controller, PointerEvent, PointerResponse};
pub use recorder::EventLog;
pub use sim::SimSurface;
