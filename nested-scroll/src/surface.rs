use crate::{Axis, ScrollDirection, TickTicket};

/// What the engine needs from a platform scroll view.
///
/// Offsets are in content space: `0` is the start, `axis_extent` the end. The engine never
/// assigns an offset directly; it only applies clamped deltas.
pub trait HostSurface {
    /// Content size minus viewport size. Negative values mean there is no room to scroll.
    fn axis_extent(&self, axis: Axis) -> f64;

    fn offset(&self, axis: Axis) -> f64;

    fn apply_offset_delta(&mut self, axis: Axis, delta: f64);

    /// Viewport size on `axis`, used as the page size when paging. `0` disables paging.
    fn viewport_size(&self, axis: Axis) -> f64 {
        let _ = axis;
        0.0
    }

    /// Asks the host to call [`crate::ScrollEngine::on_tick`] with `ticket` on the next frame.
    ///
    /// Hosts that drive every frame through [`crate::ScrollEngine::tick`] can ignore this.
    fn request_tick(&mut self, ticket: TickTicket) {
        let _ = ticket;
    }

    /// The trajectory behind `ticket` was cancelled; a pending tick for it may be dropped.
    fn cancel_tick(&mut self, ticket: TickTicket) {
        let _ = ticket;
    }
}

/// The consumption contract the arbitrator relies on.
///
/// Deltas are gesture deltas: negative deltas move forward (grow the offset). Implementations
/// only need `offset`, `max_offset` and `apply_offset_delta`; consumption is clamped to the
/// remaining extent and has no other side effects.
pub trait ScrollSurface {
    fn offset(&self, axis: Axis) -> f64;

    /// The largest reachable offset (never negative).
    fn max_offset(&self, axis: Axis) -> f64;

    fn apply_offset_delta(&mut self, axis: Axis, delta: f64);

    fn extent_remaining(&self, axis: Axis, direction: ScrollDirection) -> f64 {
        let offset = self.offset(axis);
        match direction {
            ScrollDirection::Forward => (self.max_offset(axis) - offset).max(0.0),
            ScrollDirection::Backward => offset.max(0.0),
        }
    }

    fn can_consume(&self, axis: Axis, delta: f64) -> bool {
        match ScrollDirection::of_delta(delta) {
            Some(direction) => self.extent_remaining(axis, direction) > 0.0,
            None => false,
        }
    }

    /// Consumes as much of `delta` as the remaining extent allows and returns the consumed
    /// part (same sign as `delta`).
    fn consume(&mut self, axis: Axis, delta: f64) -> f64 {
        let Some(direction) = ScrollDirection::of_delta(delta) else {
            return 0.0;
        };
        let amount = delta.abs().min(self.extent_remaining(axis, direction));
        if amount <= 0.0 {
            return 0.0;
        }
        let offset_delta = match direction {
            ScrollDirection::Forward => amount,
            ScrollDirection::Backward => -amount,
        };
        self.apply_offset_delta(axis, offset_delta);
        amount.copysign(delta)
    }
}
