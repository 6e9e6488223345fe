//! A headless nested-scroll coordination engine.
//!
//! For host-side utilities (configuration parsing, a pointer-driven controller, a simulated
//! surface), see the `nested-scroll-adapter` crate.
//!
//! When scrollable surfaces are nested (a list inside a pager inside a page), every drag,
//! fling and programmatic scroll has to be split between the surface under the finger and its
//! ancestors. This crate owns that arbitration: per-direction nested-scroll modes, layout
//! drift compensation, release velocity estimation, and spring/tween trajectories with
//! stale-tick protection.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - per-surface extent, offset and a way to apply offset deltas ([`HostSurface`])
//! - touch events already resolved to the surface that claimed them
//! - layout repositioning notifications
//! - frame ticks
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animation;
mod arbitrator;
mod compensation;
mod engine;
mod error;
mod event;
mod gesture;
mod options;
mod physics;
mod registry;
mod surface;
mod tree;
mod types;
mod velocity;


pub use animation::{
    AnimationManager, TickSample, TickTicket, Trajectory, TrajectoryId, TrajectoryPurpose,
};
pub use arbitrator::{Arbitration, AxisArbitration, OverscrollHandler};
pub use compensation::{CompensationOffset, Reconciled, reconcile};
pub use engine::{ReleaseOutcome, ScrollAnimation, ScrollEngine};
pub use error::ConfigError;
pub use event::{ScrollEvent, ScrollEventCallback};
pub use gesture::{GesturePhase, GestureSession};
pub use options::ScrollOptions;
pub use physics::{
    Curve, Easing, LinearTween, Spring, SpringParams, TrajectoryKind, stiffness_for_duration,
};
pub use registry::SessionRegistry;
pub use surface::{HostSurface, ScrollSurface};
pub use types::{AxisLock, Axis, InputKind, PointerId, ScrollDirection, ScrollMode, SurfaceId, Vec2};
pub use velocity::{DEFAULT_SAMPLE_WINDOW, VelocityTracker};
