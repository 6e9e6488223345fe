use crate::{Axis, PointerId, SurfaceId, Vec2, VelocityTracker};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Settling,
    Cancelled,
}

impl GesturePhase {
    /// Phase transitions are monotonic, except that a settle may complete (`Settling → Idle`)
    /// or be aborted (`Settling → Cancelled`).
    pub fn can_transition_to(self, next: GesturePhase) -> bool {
        use GesturePhase::*;
        matches!(
            (self, next),
            (Idle, Dragging)
                | (Dragging, Settling)
                | (Dragging, Idle)
                | (Dragging, Cancelled)
                | (Settling, Idle)
                | (Settling, Cancelled)
                | (Cancelled, Idle)
        )
    }
}

/// One drag-to-release cycle of a pointer, scoped to the surface that claimed the touch.
///
/// The phase is owned here and can be read by the host at any time.
#[derive(Clone, Debug)]
pub struct GestureSession {
    surface: SurfaceId,
    pointer: PointerId,
    start_position: Vec2,
    last_position: Vec2,
    accumulated_delta: Vec2,
    velocity: Vec2,
    phase: GesturePhase,
    tracker: VelocityTracker,
    /// The surface and its nesting ancestors, captured when the session began.
    pub(crate) chain: Vec<SurfaceId>,
    /// Last non-zero offset motion per axis of each ancestor this session moved.
    ancestor_motion: Vec<(SurfaceId, Vec2)>,
}

impl GestureSession {
    /// Starts a session in the `Dragging` phase.
    pub fn begin(surface: SurfaceId, pointer: PointerId, position: Vec2, time_ms: u64) -> Self {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(position, time_ms);
        let mut session = Self {
            surface,
            pointer,
            start_position: position,
            last_position: position,
            accumulated_delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            phase: GesturePhase::Idle,
            tracker,
            chain: Vec::new(),
            ancestor_motion: Vec::new(),
        };
        session.transition(GesturePhase::Dragging);
        session
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    pub fn accumulated_delta(&self) -> Vec2 {
        self.accumulated_delta
    }

    /// The resolved release velocity (px/ms, pointer space). Zero until released.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Ancestors moved by this session, with their last offset motion per axis.
    pub fn ancestor_motion(&self) -> &[(SurfaceId, Vec2)] {
        &self.ancestor_motion
    }

    /// Merges one routed delta's ancestor motion. Zero components keep the previous value.
    pub(crate) fn note_ancestor_motion(&mut self, moved: &[(SurfaceId, Vec2)]) {
        for &(id, motion) in moved {
            let index = match self.ancestor_motion.iter().position(|(a, _)| *a == id) {
                Some(index) => index,
                None => {
                    self.ancestor_motion.push((id, Vec2::ZERO));
                    self.ancestor_motion.len() - 1
                }
            };
            let slot = &mut self.ancestor_motion[index].1;
            for axis in Axis::ALL {
                if motion.get(axis) != 0.0 {
                    slot.set(axis, motion.get(axis));
                }
            }
        }
    }

    /// Records a pointer move and returns the delta since the previous position.
    ///
    /// Returns zero when the session is not dragging.
    pub fn move_to(&mut self, position: Vec2, time_ms: u64) -> Vec2 {
        if self.phase != GesturePhase::Dragging {
            return Vec2::ZERO;
        }
        let delta = position - self.last_position;
        self.last_position = position;
        self.accumulated_delta += delta;
        self.tracker.add_sample(position, time_ms);
        delta
    }

    /// Records the release sample and resolves the release velocity.
    ///
    /// Components whose magnitude is below `threshold` resolve to zero; the rest are clamped
    /// to `max_velocity`. The phase is left at `Dragging`; the caller decides between
    /// [`GestureSession::settle`] and [`GestureSession::finish`].
    pub fn release(
        &mut self,
        position: Vec2,
        time_ms: u64,
        threshold: f64,
        max_velocity: f64,
    ) -> Vec2 {
        if self.phase != GesturePhase::Dragging {
            return Vec2::ZERO;
        }
        let delta = position - self.last_position;
        self.last_position = position;
        self.accumulated_delta += delta;
        self.tracker.add_sample(position, time_ms);

        let raw = self.tracker.velocity();
        let resolve = |v: f64| {
            if !v.is_finite() || v.abs() < threshold || v == 0.0 {
                0.0
            } else {
                v.clamp(-max_velocity, max_velocity)
            }
        };
        self.velocity = Vec2::new(resolve(raw.x), resolve(raw.y));
        self.velocity
    }

    pub fn settle(&mut self) -> bool {
        self.transition(GesturePhase::Settling)
    }

    /// Moves to `Idle` (natural completion).
    pub fn finish(&mut self) -> bool {
        self.transition(GesturePhase::Idle)
    }

    /// Aborts the session. A cancelled session ends in `Idle`.
    pub fn cancel(&mut self) -> bool {
        if !self.transition(GesturePhase::Cancelled) {
            return false;
        }
        self.transition(GesturePhase::Idle)
    }

    fn transition(&mut self, next: GesturePhase) -> bool {
        if !self.phase.can_transition_to(next) {
            swarn!(
                surface = %self.surface,
                from = ?self.phase,
                to = ?next,
                "ignored invalid gesture phase transition"
            );
            return false;
        }
        sdebug!(
            surface = %self.surface,
            pointer = self.pointer.0,
            from = ?self.phase,
            to = ?next,
            "gesture phase"
        );
        self.phase = next;
        true
    }
}
