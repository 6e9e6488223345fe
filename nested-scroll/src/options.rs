use std::sync::Arc;

use crate::{AxisLock, ScrollDirection, ScrollEvent, ScrollEventCallback, ScrollMode, SurfaceId};

/// Configuration for one scroll surface.
///
/// This type is cheap to clone: the event callback is stored in an `Arc`, so hosts can tweak a
/// few fields and call [`crate::ScrollEngine::set_options`] without reallocating closures.
pub struct ScrollOptions {
    /// When disabled, touch and fling deltas are not consumed by this surface (they still
    /// escalate). Programmatic scrolls are unaffected.
    pub scroll_enabled: bool,
    /// Whether unconsumed touch deltas reaching this surface are handed to the
    /// [`crate::OverscrollHandler`].
    pub bounces_enabled: bool,
    /// Releasing a drag settles on a page boundary (page size = host viewport size).
    pub paging_enabled: bool,
    /// Whether released drags fling. This is also the surface's `supports_fling` capability
    /// consulted when a child escalates a fling delta to it.
    pub fling_enabled: bool,
    /// Whether deltas may escalate to the nesting parent at all.
    pub scroll_with_parent: bool,

    /// Mode applied to forward (negative) deltas.
    pub forward_mode: ScrollMode,
    /// Mode applied to backward (positive) deltas.
    pub backward_mode: ScrollMode,
    pub axis_lock: AxisLock,

    /// Release speed (px/ms) under which a drag does not fling.
    pub fling_threshold: f64,
    /// Release speeds are clamped to this (px/ms).
    pub max_fling_velocity: f64,
    /// Deceleration (px/ms²) used to project the distance a fling travels.
    pub fling_deceleration: f64,
    pub fling_damping_ratio: f64,

    /// Duration of the spring used for paging settles.
    pub settle_duration_ms: u64,
    /// Duration of the linear trajectory used by animated scroll-to without spring params.
    pub scroll_to_duration_ms: u64,

    /// Optional callback fired for every event on this surface.
    pub on_event: Option<ScrollEventCallback>,
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self {
            scroll_enabled: true,
            bounces_enabled: true,
            paging_enabled: false,
            fling_enabled: true,
            scroll_with_parent: true,
            forward_mode: ScrollMode::SelfFirst,
            backward_mode: ScrollMode::SelfFirst,
            axis_lock: AxisLock::Vertical,
            fling_threshold: 0.1,
            max_fling_velocity: 8.0,
            fling_deceleration: 0.002,
            fling_damping_ratio: 1.0,
            settle_duration_ms: 250,
            scroll_to_duration_ms: 300,
            on_event: None,
        }
    }

    pub fn mode_for(&self, direction: ScrollDirection) -> ScrollMode {
        match direction {
            ScrollDirection::Forward => self.forward_mode,
            ScrollDirection::Backward => self.backward_mode,
        }
    }

    pub fn with_scroll_enabled(mut self, scroll_enabled: bool) -> Self {
        self.scroll_enabled = scroll_enabled;
        self
    }

    pub fn with_bounces_enabled(mut self, bounces_enabled: bool) -> Self {
        self.bounces_enabled = bounces_enabled;
        self
    }

    pub fn with_paging_enabled(mut self, paging_enabled: bool) -> Self {
        self.paging_enabled = paging_enabled;
        self
    }

    pub fn with_fling_enabled(mut self, fling_enabled: bool) -> Self {
        self.fling_enabled = fling_enabled;
        self
    }

    pub fn with_scroll_with_parent(mut self, scroll_with_parent: bool) -> Self {
        self.scroll_with_parent = scroll_with_parent;
        self
    }

    pub fn with_nested_modes(mut self, forward: ScrollMode, backward: ScrollMode) -> Self {
        self.forward_mode = forward;
        self.backward_mode = backward;
        self
    }

    pub fn with_axis_lock(mut self, axis_lock: AxisLock) -> Self {
        self.axis_lock = axis_lock;
        self
    }

    pub fn with_fling_threshold(mut self, px_per_ms: f64) -> Self {
        self.fling_threshold = px_per_ms.max(0.0);
        self
    }

    pub fn with_max_fling_velocity(mut self, px_per_ms: f64) -> Self {
        self.max_fling_velocity = px_per_ms.max(0.0);
        self
    }

    pub fn with_fling_deceleration(mut self, px_per_ms2: f64) -> Self {
        self.fling_deceleration = px_per_ms2;
        self
    }

    pub fn with_fling_damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.fling_damping_ratio = damping_ratio.max(0.0);
        self
    }

    pub fn with_settle_duration_ms(mut self, duration_ms: u64) -> Self {
        self.settle_duration_ms = duration_ms;
        self
    }

    pub fn with_scroll_to_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_to_duration_ms = duration_ms;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(SurfaceId, &ScrollEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_event_callback(mut self, on_event: Option<ScrollEventCallback>) -> Self {
        self.on_event = on_event;
        self
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ScrollOptions {
    fn clone(&self) -> Self {
        Self {
            scroll_enabled: self.scroll_enabled,
            bounces_enabled: self.bounces_enabled,
            paging_enabled: self.paging_enabled,
            fling_enabled: self.fling_enabled,
            scroll_with_parent: self.scroll_with_parent,
            forward_mode: self.forward_mode,
            backward_mode: self.backward_mode,
            axis_lock: self.axis_lock,
            fling_threshold: self.fling_threshold,
            max_fling_velocity: self.max_fling_velocity,
            fling_deceleration: self.fling_deceleration,
            fling_damping_ratio: self.fling_damping_ratio,
            settle_duration_ms: self.settle_duration_ms,
            scroll_to_duration_ms: self.scroll_to_duration_ms,
            on_event: self.on_event.clone(),
        }
    }
}

impl core::fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("scroll_enabled", &self.scroll_enabled)
            .field("bounces_enabled", &self.bounces_enabled)
            .field("paging_enabled", &self.paging_enabled)
            .field("fling_enabled", &self.fling_enabled)
            .field("scroll_with_parent", &self.scroll_with_parent)
            .field("forward_mode", &self.forward_mode)
            .field("backward_mode", &self.backward_mode)
            .field("axis_lock", &self.axis_lock)
            .field("fling_threshold", &self.fling_threshold)
            .field("max_fling_velocity", &self.max_fling_velocity)
            .field("fling_deceleration", &self.fling_deceleration)
            .field("fling_damping_ratio", &self.fling_damping_ratio)
            .field("settle_duration_ms", &self.settle_duration_ms)
            .field("scroll_to_duration_ms", &self.scroll_to_duration_ms)
            .finish_non_exhaustive()
    }
}
