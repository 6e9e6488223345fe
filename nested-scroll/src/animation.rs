use std::collections::BTreeMap;

use crate::{Axis, Curve, InputKind, SurfaceId, TrajectoryKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryId(u64);

/// Identifies one scheduled tick of one trajectory.
///
/// A ticket goes stale as soon as its trajectory is cancelled, replaced or completed; stale
/// tickets have no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickTicket {
    pub surface: SurfaceId,
    pub axis: Axis,
    pub trajectory: TrajectoryId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrajectoryPurpose {
    /// Momentum after a released drag. May escalate to eligible parents.
    Fling,
    /// Paging settle after a released drag.
    Settle,
    /// Animated programmatic scroll.
    ScrollTo,
}

impl TrajectoryPurpose {
    /// The input kind tick deltas are arbitrated as.
    pub fn input(self) -> InputKind {
        match self {
            Self::Fling => InputKind::Fling,
            Self::Settle | Self::ScrollTo => InputKind::Programmatic,
        }
    }
}

/// An active animation of one axis of one surface.
///
/// Values are displacements in offset space (positive grows the offset).
#[derive(Clone, Debug)]
pub struct Trajectory {
    id: TrajectoryId,
    surface: SurfaceId,
    axis: Axis,
    purpose: TrajectoryPurpose,
    curve: Curve,
    start_ms: Option<u64>,
    last_value: f64,
    consumed_so_far: f64,
}

impl Trajectory {
    pub fn id(&self) -> TrajectoryId {
        self.id
    }

    pub fn ticket(&self) -> TickTicket {
        TickTicket {
            surface: self.surface,
            axis: self.axis,
            trajectory: self.id,
        }
    }

    pub fn kind(&self) -> TrajectoryKind {
        self.curve.kind()
    }

    pub fn purpose(&self) -> TrajectoryPurpose {
        self.purpose
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn start_value(&self) -> f64 {
        self.curve.start_value()
    }

    pub fn end_value(&self) -> f64 {
        self.curve.end_value()
    }

    /// Offset motion actually applied by this trajectory so far.
    pub fn consumed_so_far(&self) -> f64 {
        self.consumed_so_far
    }
}

/// The result of advancing a trajectory to a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSample {
    /// Offset delta since the previous tick.
    pub delta: f64,
    pub elapsed_ms: u64,
    /// The curve reached its end value on this tick.
    pub done: bool,
}

/// Owns at most one trajectory per surface axis.
#[derive(Clone, Debug, Default)]
pub struct AnimationManager {
    active: BTreeMap<(SurfaceId, Axis), Trajectory>,
    next_id: u64,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a trajectory, atomically replacing any trajectory on the same surface axis.
    ///
    /// When `start_ms` is `None` the first tick defines time zero. Returns the new ticket and,
    /// if one was replaced, the ticket of the replaced trajectory.
    pub fn start(
        &mut self,
        surface: SurfaceId,
        axis: Axis,
        curve: Curve,
        purpose: TrajectoryPurpose,
        start_ms: Option<u64>,
    ) -> (TickTicket, Option<TickTicket>) {
        self.next_id = self.next_id.wrapping_add(1);
        let trajectory = Trajectory {
            id: TrajectoryId(self.next_id),
            surface,
            axis,
            purpose,
            curve,
            start_ms,
            last_value: curve.start_value(),
            consumed_so_far: 0.0,
        };
        let ticket = trajectory.ticket();
        sdebug!(
            surface = %surface,
            ?axis,
            ?purpose,
            kind = ?curve.kind(),
            from = curve.start_value(),
            to = curve.end_value(),
            "trajectory started"
        );
        let replaced = self
            .active
            .insert((surface, axis), trajectory)
            .map(|t| t.ticket());
        (ticket, replaced)
    }

    pub fn get(&self, surface: SurfaceId, axis: Axis) -> Option<&Trajectory> {
        self.active.get(&(surface, axis))
    }

    pub fn is_current(&self, ticket: TickTicket) -> bool {
        self.active
            .get(&(ticket.surface, ticket.axis))
            .is_some_and(|t| t.id == ticket.trajectory)
    }

    pub fn has_active(&self, surface: SurfaceId) -> bool {
        Axis::ALL
            .iter()
            .any(|axis| self.active.contains_key(&(surface, *axis)))
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn tickets(&self) -> Vec<TickTicket> {
        self.active.values().map(Trajectory::ticket).collect()
    }

    pub fn cancel(&mut self, surface: SurfaceId, axis: Axis) -> Option<TickTicket> {
        let ticket = self.active.remove(&(surface, axis)).map(|t| t.ticket())?;
        sdebug!(surface = %surface, ?axis, "trajectory cancelled");
        Some(ticket)
    }

    pub fn cancel_surface(&mut self, surface: SurfaceId) -> Vec<TickTicket> {
        Axis::ALL
            .iter()
            .filter_map(|axis| self.cancel(surface, *axis))
            .collect()
    }

    /// Samples the trajectory behind `ticket` at `now_ms`.
    ///
    /// Fling deltas are incremental between samples. Settle and scroll-to deltas are the
    /// curve displacement minus what [`AnimationManager::record_consumed`] reported as
    /// applied. Returns `None` for stale tickets.
    pub fn advance(&mut self, ticket: TickTicket, now_ms: u64) -> Option<TickSample> {
        let trajectory = self
            .active
            .get_mut(&(ticket.surface, ticket.axis))
            .filter(|t| t.id == ticket.trajectory)?;
        let start = *trajectory.start_ms.get_or_insert(now_ms);
        let elapsed_ms = now_ms.saturating_sub(start);
        let done = trajectory.curve.is_complete(elapsed_ms);
        let value = if done {
            trajectory.curve.end_value()
        } else {
            trajectory.curve.value_at(elapsed_ms)
        };
        let delta = match trajectory.purpose {
            TrajectoryPurpose::Fling => value - trajectory.last_value,
            // Offset-targeted motion requests what is still missing, so overshoot that was
            // clamped at an edge is never paid back on the return swing.
            TrajectoryPurpose::Settle | TrajectoryPurpose::ScrollTo => {
                value - trajectory.curve.start_value() - trajectory.consumed_so_far
            }
        };
        trajectory.last_value = value;
        strace!(
            surface = %ticket.surface,
            axis = ?ticket.axis,
            elapsed_ms,
            value,
            delta,
            "trajectory tick"
        );
        Some(TickSample {
            delta,
            elapsed_ms,
            done,
        })
    }

    pub fn record_consumed(&mut self, ticket: TickTicket, consumed: f64) {
        if let Some(t) = self
            .active
            .get_mut(&(ticket.surface, ticket.axis))
            .filter(|t| t.id == ticket.trajectory)
        {
            t.consumed_so_far += consumed;
        }
    }

    /// Removes a completed trajectory. Returns `false` for stale tickets.
    pub fn finish(&mut self, ticket: TickTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.active.remove(&(ticket.surface, ticket.axis));
        sdebug!(surface = %ticket.surface, axis = ?ticket.axis, "trajectory completed");
        true
    }
}
