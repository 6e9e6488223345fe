use crate::tree::SurfaceTree;
use crate::{Axis, InputKind, ScrollDirection, ScrollMode, ScrollSurface, SurfaceId, Vec2};

/// Receives touch deltas that no surface in the chain could consume.
///
/// This is the extension point for bounce and pull-to-refresh affordances. It is only
/// consulted for touch drags, and only when the outermost surface the delta could reach has
/// `bounces_enabled`.
pub trait OverscrollHandler {
    /// Returns how much of `delta` the affordance absorbed (same sign as `delta`).
    fn on_overscroll(&mut self, surface: SurfaceId, axis: Axis, delta: f64) -> f64;
}

/// How one axis of a delta was split between the originating surface and its ancestors.
///
/// All values are gesture deltas (negative = forward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisArbitration {
    pub delta: f64,
    pub consumed_by_self: f64,
    /// Satisfied by the originating surface's accumulated layout drift.
    pub consumed_by_compensation: f64,
    /// Offered to the parent (after compensation).
    pub escalated: f64,
    /// Consumed anywhere above the originating surface.
    pub consumed_by_ancestors: f64,
    pub consumed_by_overscroll: f64,
}

impl AxisArbitration {
    pub fn consumed(&self) -> f64 {
        self.consumed_by_self
            + self.consumed_by_compensation
            + self.consumed_by_ancestors
            + self.consumed_by_overscroll
    }

    /// Motion that actually moved a surface.
    pub fn scrolled(&self) -> f64 {
        self.consumed_by_self + self.consumed_by_ancestors
    }

    pub fn unconsumed(&self) -> f64 {
        self.delta - self.consumed()
    }
}

/// The per-axis result of arbitrating one delta.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Arbitration {
    pub x: AxisArbitration,
    pub y: AxisArbitration,
}

impl Arbitration {
    pub fn axis(&self, axis: Axis) -> &AxisArbitration {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisArbitration {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// `{consumedX, consumedY}`.
    pub fn consumed(&self) -> Vec2 {
        Vec2::new(self.x.consumed(), self.y.consumed())
    }

    pub fn consumed_by_self(&self) -> Vec2 {
        Vec2::new(self.x.consumed_by_self, self.y.consumed_by_self)
    }

    pub fn escalated(&self) -> Vec2 {
        Vec2::new(self.x.escalated, self.y.escalated)
    }

    pub fn scrolled(&self) -> Vec2 {
        Vec2::new(self.x.scrolled(), self.y.scrolled())
    }

    pub fn unconsumed(&self) -> Vec2 {
        Vec2::new(self.x.unconsumed(), self.y.unconsumed())
    }
}

/// Splits deltas along a chain of nested surfaces.
///
/// Each axis is arbitrated independently. Consumption order is child before parent for
/// `SelfFirst`/`SelfOnly` and parent before child for `ParentFirst`. Compensation is reconciled
/// on the parent-bound part of a delta before the parent sees it.
pub(crate) struct Arbitrator<'a> {
    tree: &'a mut SurfaceTree,
    overscroll: Option<&'a mut (dyn OverscrollHandler + 'static)>,
    moved: Vec<SurfaceId>,
}

impl<'a> Arbitrator<'a> {
    pub(crate) fn new(
        tree: &'a mut SurfaceTree,
        overscroll: Option<&'a mut (dyn OverscrollHandler + 'static)>,
    ) -> Self {
        Self {
            tree,
            overscroll,
            moved: Vec::new(),
        }
    }

    /// Surfaces whose offset changed, in the order they first moved.
    pub(crate) fn into_moved(self) -> Vec<SurfaceId> {
        self.moved
    }

    pub(crate) fn arbitrate(
        &mut self,
        origin: SurfaceId,
        delta: Vec2,
        input: InputKind,
    ) -> Arbitration {
        let mut out = Arbitration::default();
        for axis in Axis::ALL {
            *out.axis_mut(axis) = self.arbitrate_axis(origin, axis, delta.get(axis), input);
        }
        out
    }

    fn arbitrate_axis(
        &mut self,
        origin: SurfaceId,
        axis: Axis,
        delta: f64,
        input: InputKind,
    ) -> AxisArbitration {
        let mut result = self.dispatch(origin, axis, delta, input);
        if input == InputKind::Touch {
            let rest = result.unconsumed();
            if let Some(direction) = ScrollDirection::of_delta(rest) {
                let target = self.overscroll_target(origin, direction, input);
                result.consumed_by_overscroll = self.hand_off(target, axis, rest);
            }
        }
        if result.delta != 0.0 {
            strace!(
                surface = %origin,
                ?axis,
                ?input,
                delta,
                by_self = result.consumed_by_self,
                by_compensation = result.consumed_by_compensation,
                escalated = result.escalated,
                by_ancestors = result.consumed_by_ancestors,
                by_overscroll = result.consumed_by_overscroll,
                "arbitrated"
            );
        }
        result
    }

    fn dispatch(
        &mut self,
        id: SurfaceId,
        axis: Axis,
        delta: f64,
        input: InputKind,
    ) -> AxisArbitration {
        let mut result = AxisArbitration {
            delta,
            ..AxisArbitration::default()
        };
        let Some(direction) = ScrollDirection::of_delta(delta) else {
            return result;
        };
        let Some(node) = self.tree.get(id) else {
            return result;
        };
        let (mode, parent) = if input == InputKind::Programmatic {
            (ScrollMode::SelfOnly, None)
        } else {
            (node.options.mode_for(direction), self.eligible_parent(id, input))
        };

        match (mode, parent) {
            (ScrollMode::SelfFirst, Some(parent)) => {
                result.consumed_by_self = self.consume_self(id, axis, delta, input);
                let rest = delta - result.consumed_by_self;
                self.escalate(id, parent, axis, rest, input, &mut result);
            }
            (ScrollMode::ParentFirst, Some(parent)) => {
                if self.chain_has_room(parent, axis, direction, input) {
                    self.escalate(id, parent, axis, delta, input, &mut result);
                }
                let rest = delta - result.consumed_by_compensation - result.consumed_by_ancestors;
                result.consumed_by_self = self.consume_self(id, axis, rest, input);
            }
            _ => {
                result.consumed_by_self = self.consume_self(id, axis, delta, input);
            }
        }
        result
    }

    fn escalate(
        &mut self,
        child: SurfaceId,
        parent: SurfaceId,
        axis: Axis,
        delta: f64,
        input: InputKind,
        result: &mut AxisArbitration,
    ) {
        if delta == 0.0 {
            return;
        }
        let Some(node) = self.tree.get_mut(child) else {
            return;
        };
        let reconciled = node.compensation.reconcile(axis, delta);
        result.consumed_by_compensation += reconciled.consumed;
        if reconciled.forwarded == 0.0 {
            return;
        }
        result.escalated += reconciled.forwarded;
        let upstream = self.dispatch(parent, axis, reconciled.forwarded, input);
        result.consumed_by_ancestors += upstream.consumed();
    }

    /// A parent only receives delta if it supports fling and the child is not paging, or if
    /// the input is a direct touch drag.
    fn eligible_parent(&self, child: SurfaceId, input: InputKind) -> Option<SurfaceId> {
        let node = self.tree.get(child)?;
        if !node.options.scroll_with_parent {
            return None;
        }
        let parent_id = node.parent?;
        let parent = self.tree.get(parent_id)?;
        let eligible = (parent.options.fling_enabled && !node.options.paging_enabled)
            || input == InputKind::Touch;
        eligible.then_some(parent_id)
    }

    fn self_room(
        &self,
        id: SurfaceId,
        axis: Axis,
        direction: ScrollDirection,
        input: InputKind,
    ) -> f64 {
        match self.tree.get(id) {
            Some(node) if node.options.scroll_enabled || input == InputKind::Programmatic => {
                node.extent_remaining(axis, direction)
            }
            _ => 0.0,
        }
    }

    fn chain_has_room(
        &self,
        id: SurfaceId,
        axis: Axis,
        direction: ScrollDirection,
        input: InputKind,
    ) -> bool {
        let mut cur = Some(id);
        let mut steps = 0usize;
        while let Some(c) = cur {
            if self.self_room(c, axis, direction, input) > 0.0 {
                return true;
            }
            steps += 1;
            if steps > self.tree.len() {
                break;
            }
            cur = match self.tree.get(c) {
                Some(node) if node.options.mode_for(direction) != ScrollMode::SelfOnly => {
                    self.eligible_parent(c, input)
                }
                _ => None,
            };
        }
        false
    }

    /// The outermost surface a delta in `direction` can reach from `origin`.
    fn overscroll_target(
        &self,
        origin: SurfaceId,
        direction: ScrollDirection,
        input: InputKind,
    ) -> SurfaceId {
        let mut cur = origin;
        for _ in 0..self.tree.len() {
            let Some(node) = self.tree.get(cur) else {
                break;
            };
            if node.options.mode_for(direction) == ScrollMode::SelfOnly {
                break;
            }
            match self.eligible_parent(cur, input) {
                Some(parent) => cur = parent,
                None => break,
            }
        }
        cur
    }

    fn consume_self(&mut self, id: SurfaceId, axis: Axis, delta: f64, input: InputKind) -> f64 {
        if delta == 0.0 {
            return 0.0;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return 0.0;
        };
        if !node.options.scroll_enabled && input != InputKind::Programmatic {
            return 0.0;
        }
        let consumed = node.consume(axis, delta);
        if consumed != 0.0 && !self.moved.contains(&id) {
            self.moved.push(id);
        }
        consumed
    }

    fn hand_off(&mut self, target: SurfaceId, axis: Axis, rest: f64) -> f64 {
        match self.tree.get(target) {
            Some(node) if node.options.bounces_enabled => {}
            _ => return 0.0,
        }
        let Some(handler) = self.overscroll.as_deref_mut() else {
            return 0.0;
        };
        let taken = handler.on_overscroll(target, axis, rest);
        if !taken.is_finite() || taken.signum() != rest.signum() {
            return 0.0;
        }
        taken.abs().min(rest.abs()).copysign(rest)
    }
}
