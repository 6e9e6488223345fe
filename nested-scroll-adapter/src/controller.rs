use nested_scroll::{
    Arbitration, Easing, HostSurface, PointerId, ReleaseOutcome, ScrollAnimation, ScrollEngine,
    ScrollOptions, SpringParams, SurfaceId, Vec2,
};

/// A raw pointer event, before it has been resolved to a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEvent {
    Down { pointer: PointerId, position: Vec2 },
    Move { pointer: PointerId, position: Vec2 },
    Up { pointer: PointerId, position: Vec2 },
    Cancel { pointer: PointerId },
}

/// What the engine did with one [`PointerEvent`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerResponse {
    /// The event reached a surface (a hit-tested down, or a known pointer).
    pub handled: bool,
    /// Arbitration of the move delta. Zero for other events.
    pub arbitration: Arbitration,
    /// Set for `Up` events that reached a session.
    pub release: Option<ReleaseOutcome>,
}

type HitTest = Box<dyn FnMut(Vec2) -> Option<SurfaceId>>;

/// A framework-neutral frame driver around a [`ScrollEngine`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_pointer` for every pointer event (downs are routed with the hit-test callback)
/// - `on_layout` when layout moves a surface
/// - `tick(now_ms)` each frame while `is_idle()` is `false`
///
/// Offsets are applied to the attached [`HostSurface`]s directly; the controller only keeps
/// the last frame time.
pub struct Controller {
    engine: ScrollEngine,
    hit_test: Option<HitTest>,
    last_tick_ms: Option<u64>,
}

impl Controller {
    pub fn new() -> Self {
        Self::from_engine(ScrollEngine::new())
    }

    pub fn from_engine(engine: ScrollEngine) -> Self {
        Self {
            engine,
            hit_test: None,
            last_tick_ms: None,
        }
    }

    /// Sets the callback that resolves a pointer-down position to the topmost scroll surface
    /// claiming it.
    pub fn with_hit_test(
        mut self,
        hit_test: impl FnMut(Vec2) -> Option<SurfaceId> + 'static,
    ) -> Self {
        self.hit_test = Some(Box::new(hit_test));
        self
    }

    pub fn set_hit_test(&mut self, hit_test: impl FnMut(Vec2) -> Option<SurfaceId> + 'static) {
        self.hit_test = Some(Box::new(hit_test));
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ScrollEngine {
        self.engine
    }

    pub fn attach(
        &mut self,
        host: impl HostSurface + 'static,
        options: ScrollOptions,
        parent: Option<SurfaceId>,
    ) -> SurfaceId {
        self.engine.attach(host, options, parent)
    }

    pub fn detach(&mut self, id: SurfaceId) -> bool {
        self.engine.detach(id)
    }

    /// Routes a pointer event. Downs that hit no surface are dropped.
    pub fn on_pointer(&mut self, event: PointerEvent, now_ms: u64) -> PointerResponse {
        match event {
            PointerEvent::Down { pointer, position } => {
                let target = self.hit_test.as_mut().and_then(|hit| hit(position));
                let Some(target) = target else {
                    adebug!(pointer = pointer.0, "pointer down hit no surface");
                    return PointerResponse::default();
                };
                PointerResponse {
                    handled: self
                        .engine
                        .on_gesture_begin(target, pointer, position, now_ms),
                    ..PointerResponse::default()
                }
            }
            PointerEvent::Move { pointer, position } => PointerResponse {
                handled: self.engine.session(pointer).is_some(),
                arbitration: self.engine.on_gesture_move(pointer, position, now_ms),
                release: None,
            },
            PointerEvent::Up { pointer, position } => {
                let outcome = self.engine.on_gesture_end(pointer, position, now_ms);
                PointerResponse {
                    handled: outcome != ReleaseOutcome::Ignored,
                    release: Some(outcome).filter(|o| *o != ReleaseOutcome::Ignored),
                    ..PointerResponse::default()
                }
            }
            PointerEvent::Cancel { pointer } => PointerResponse {
                handled: self.engine.on_gesture_cancel(pointer),
                ..PointerResponse::default()
            },
        }
    }

    pub fn on_layout(&mut self, id: SurfaceId, dx: f64, dy: f64) -> bool {
        self.engine.on_host_repositioned(id, dx, dy)
    }

    /// Advances every trajectory. Returns `true` while motion remains.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.last_tick_ms = Some(now_ms);
        self.engine.tick(now_ms)
    }

    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    /// No pointer is down and nothing is animating.
    pub fn is_idle(&self) -> bool {
        self.engine.gesturing_surfaces().is_empty() && !self.engine.has_animations()
    }

    pub fn is_animating(&self, id: SurfaceId) -> bool {
        self.engine.is_animating(id)
    }

    pub fn cancel_animation(&mut self, id: SurfaceId) -> bool {
        self.engine.abort_animation(id)
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, id: SurfaceId, offset: Vec2) -> Option<Vec2> {
        self.engine
            .scroll_to_with(id, offset, ScrollAnimation::Immediate)
            .then(|| self.engine.offset(id))
            .flatten()
    }

    /// Starts a tween to an offset. The first `tick` after this call is time zero.
    pub fn start_tween_to_offset(
        &mut self,
        id: SurfaceId,
        offset: Vec2,
        duration_ms: u64,
        easing: Easing,
    ) -> bool {
        self.engine.scroll_to_with(
            id,
            offset,
            ScrollAnimation::Linear {
                duration_ms,
                easing,
            },
        )
    }

    /// Starts a spring to an offset. The first `tick` after this call is time zero.
    pub fn start_spring_to_offset(
        &mut self,
        id: SurfaceId,
        offset: Vec2,
        params: SpringParams,
    ) -> bool {
        self.engine
            .scroll_to_with(id, offset, ScrollAnimation::Spring(params))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Controller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("hit_test", &self.hit_test.is_some())
            .field("last_tick_ms", &self.last_tick_ms)
            .finish()
    }
}
