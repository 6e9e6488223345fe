use crate::{Axis, Vec2};

/// The outcome of reconciling a parent-bound delta against accumulated layout drift.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reconciled {
    /// Motion satisfied by the drift itself (not by scrolling).
    pub consumed: f64,
    /// What is left to forward to the parent.
    pub forwarded: f64,
    /// Drift remaining after reconciliation.
    pub remaining: f64,
}

/// Reconciles a proposed parent-bound delta `delta` against accumulated drift `offset`.
///
/// - Same sign: `min(|o|, |d|)` is consumed (with the sign of `d`) and removed from the drift.
/// - Opposite signs: they cancel. If the drift covers the whole delta, nothing is forwarded;
///   otherwise the drift is exhausted and the rest is forwarded.
/// - Zero drift: the delta passes through.
pub fn reconcile(offset: f64, delta: f64) -> Reconciled {
    if offset == 0.0 || delta == 0.0 {
        return Reconciled {
            consumed: 0.0,
            forwarded: delta,
            remaining: offset,
        };
    }

    if offset.signum() == delta.signum() {
        let consumed = offset.abs().min(delta.abs()).copysign(delta);
        Reconciled {
            consumed,
            forwarded: delta - consumed,
            remaining: offset - consumed,
        }
    } else if offset.abs() >= delta.abs() {
        Reconciled {
            consumed: delta,
            forwarded: 0.0,
            remaining: offset + delta,
        }
    } else {
        Reconciled {
            consumed: -offset,
            forwarded: delta + offset,
            remaining: 0.0,
        }
    }
}

/// Per-surface accumulator of layout-origin drift during nested-scroll sessions.
///
/// Drift is only recorded while at least one nested-scroll session is active on the surface.
/// The accumulator is reset when the first session starts and when the last one ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompensationOffset {
    offset: Vec2,
    sessions: u32,
}

impl CompensationOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.sessions > 0
    }

    pub fn session_depth(&self) -> u32 {
        self.sessions
    }

    pub fn begin_session(&mut self) {
        if self.sessions == 0 {
            self.offset = Vec2::ZERO;
        }
        self.sessions = self.sessions.saturating_add(1);
    }

    pub fn end_session(&mut self) {
        if self.sessions == 0 {
            return;
        }
        self.sessions -= 1;
        if self.sessions == 0 {
            self.offset = Vec2::ZERO;
        }
    }

    /// Records a layout repositioning. Ignored when no session is active.
    ///
    /// Returns `true` if the drift was recorded.
    pub fn accumulate(&mut self, delta: Vec2) -> bool {
        if !self.is_active() || !delta.x.is_finite() || !delta.y.is_finite() {
            return false;
        }
        self.offset += delta;
        true
    }

    pub fn reconcile(&mut self, axis: Axis, delta: f64) -> Reconciled {
        let r = reconcile(self.offset.get(axis), delta);
        self.offset.set(axis, r.remaining);
        r
    }

    /// Discards all drift and session state (used on detach).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
