use crate::arbitrator::Arbitrator;
use crate::tree::{SurfaceNode, SurfaceTree};
use crate::{
    AnimationManager, Arbitration, Axis, Curve, Easing, GesturePhase, GestureSession,
    HostSurface, InputKind, LinearTween, OverscrollHandler, PointerId, ScrollEvent, ScrollMode,
    ScrollOptions, ScrollSurface, SessionRegistry, Spring, SpringParams, SurfaceId, TickTicket,
    Trajectory, TrajectoryPurpose, Vec2,
};

/// How a programmatic scroll reaches its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollAnimation {
    Immediate,
    Spring(SpringParams),
    Linear { duration_ms: u64, easing: Easing },
}

/// What happened when a drag was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The pointer had no dragging session (or its surface is gone).
    Ignored,
    /// Motion stopped immediately.
    Stopped,
    /// A fling trajectory was started.
    Fling,
    /// A paging settle trajectory was started.
    Settle,
}

/// The nested-scroll coordination engine for one render tree.
///
/// The engine owns the surface tree, every gesture session, per-surface compensation and
/// every trajectory. It is single-threaded and frame-driven; the host feeds it:
/// - touch events (`on_gesture_*`), already resolved to the surface that claimed the touch
/// - layout notifications (`on_host_repositioned`)
/// - frame ticks (`on_tick` for requested tickets, or `tick` to drive everything)
///
/// Offsets only change through arbitrated deltas, never by direct assignment.
#[derive(Default)]
pub struct ScrollEngine {
    tree: SurfaceTree,
    sessions: SessionRegistry,
    animations: AnimationManager,
    overscroll: Option<Box<dyn OverscrollHandler>>,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a surface, optionally nested under `parent`.
    ///
    /// An unknown parent (or one that would form a cycle) is ignored and the surface is
    /// attached as a root.
    pub fn attach(
        &mut self,
        host: impl HostSurface + 'static,
        options: ScrollOptions,
        parent: Option<SurfaceId>,
    ) -> SurfaceId {
        self.attach_boxed(Box::new(host), options, parent)
    }

    pub fn attach_boxed(
        &mut self,
        host: Box<dyn HostSurface>,
        options: ScrollOptions,
        parent: Option<SurfaceId>,
    ) -> SurfaceId {
        let id = self.tree.insert(SurfaceNode::new(host, options));
        if parent.is_some() && !self.tree.link(id, parent) {
            swarn!(surface = %id, parent = ?parent, "ignored invalid parent on attach");
        }
        sdebug!(surface = %id, parent = ?parent, "surface attached");
        id
    }

    /// Detaches a surface, discarding its sessions, trajectories and compensation.
    ///
    /// Its children become roots until they are re-linked.
    pub fn detach(&mut self, id: SurfaceId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        for session in self.sessions.remove_surface(id) {
            self.end_nested(&session.chain);
        }
        let tickets = self.animations.cancel_surface(id);
        if let Some(node) = self.tree.get_mut(id) {
            for ticket in tickets {
                node.host.cancel_tick(ticket);
            }
            node.compensation.clear();
        }
        self.tree.remove(id);
        sdebug!(surface = %id, "surface detached");
        true
    }

    /// Re-links `id` under `parent` (or makes it a root).
    ///
    /// Returns `false` if either surface is unknown or the link would create a cycle.
    pub fn set_parent(&mut self, id: SurfaceId, parent: Option<SurfaceId>) -> bool {
        let linked = self.tree.link(id, parent);
        if !linked {
            swarn!(surface = %id, parent = ?parent, "ignored invalid parent link");
        }
        linked
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.tree.contains(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    pub fn parent(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.tree.get(id)?.parent
    }

    pub fn children(&self, id: SurfaceId) -> &[SurfaceId] {
        match self.tree.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Descendants whose active gestures currently delegate to `id`.
    pub fn nested_children(&self, id: SurfaceId) -> Vec<SurfaceId> {
        self.tree
            .get(id)
            .map(|n| n.nested_children.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn host(&self, id: SurfaceId) -> Option<&dyn HostSurface> {
        self.tree.get(id).map(|n| n.host.as_ref())
    }

    /// Current offset as seen by the engine (zero on locked-out axes).
    pub fn offset(&self, id: SurfaceId) -> Option<Vec2> {
        self.tree.get(id).map(SurfaceNode::offsets)
    }

    pub fn options(&self, id: SurfaceId) -> Option<&ScrollOptions> {
        self.tree.get(id).map(|n| &n.options)
    }

    pub fn set_options(&mut self, id: SurfaceId, options: ScrollOptions) -> bool {
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        strace!(surface = %id, ?options, "set_options");
        node.options = options;
        true
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, id: SurfaceId, f: impl FnOnce(&mut ScrollOptions)) -> bool {
        let Some(mut next) = self.options(id).cloned() else {
            return false;
        };
        f(&mut next);
        self.set_options(id, next)
    }

    pub fn set_nested_scroll_modes(
        &mut self,
        id: SurfaceId,
        forward: ScrollMode,
        backward: ScrollMode,
    ) -> bool {
        self.update_options(id, |o| {
            o.forward_mode = forward;
            o.backward_mode = backward;
        })
    }

    pub fn set_overscroll_handler(&mut self, handler: impl OverscrollHandler + 'static) {
        self.overscroll = Some(Box::new(handler));
    }

    pub fn clear_overscroll_handler(&mut self) {
        self.overscroll = None;
    }

    /// The core-owned phase of `id`.
    ///
    /// A surface without a released session but with a running programmatic trajectory is
    /// reported as `Settling`.
    pub fn phase(&self, id: SurfaceId) -> GesturePhase {
        match self.sessions.phase(id) {
            GesturePhase::Idle if self.animations.has_active(id) => GesturePhase::Settling,
            phase => phase,
        }
    }

    pub fn is_gesturing(&self, id: SurfaceId) -> bool {
        self.sessions.is_gesturing(id)
    }

    pub fn gesturing_surfaces(&self) -> Vec<SurfaceId> {
        self.sessions.gesturing().collect()
    }

    pub fn session(&self, pointer: PointerId) -> Option<&GestureSession> {
        self.sessions.dragging(pointer)
    }

    pub fn is_animating(&self, id: SurfaceId) -> bool {
        self.animations.has_active(id)
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn trajectory(&self, id: SurfaceId, axis: Axis) -> Option<&Trajectory> {
        self.animations.get(id, axis)
    }

    pub fn compensation(&self, id: SurfaceId) -> Option<Vec2> {
        self.tree.get(id).map(|n| n.compensation.offset())
    }

    /// Number of nested-scroll sessions currently active on `id`.
    pub fn nested_session_depth(&self, id: SurfaceId) -> u32 {
        self.tree
            .get(id)
            .map_or(0, |n| n.compensation.session_depth())
    }

    /// Layout moved the surface's origin by `(dx, dy)`.
    ///
    /// Recorded only while a nested-scroll session is active on the surface.
    pub fn on_host_repositioned(&mut self, id: SurfaceId, dx: f64, dy: f64) -> bool {
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        let recorded = node.compensation.accumulate(Vec2::new(dx, dy));
        if recorded {
            strace!(surface = %id, dx, dy, "compensation accumulated");
        }
        recorded
    }

    /// A pointer went down on `id` (the topmost surface claiming the touch).
    pub fn on_gesture_begin(
        &mut self,
        id: SurfaceId,
        pointer: PointerId,
        position: Vec2,
        time_ms: u64,
    ) -> bool {
        if !self.tree.contains(id) {
            swarn!(surface = %id, "gesture began on an unknown surface");
            return false;
        }
        if let Some(mut stale) = self.sessions.take_dragging(pointer) {
            stale.cancel();
            self.end_nested(&stale.chain);
        }
        self.interrupt_motion(id);

        let mut session = GestureSession::begin(id, pointer, position, time_ms);
        session.chain = self.tree.nested_chain(id);
        self.begin_nested(&session.chain);
        self.sessions.insert_dragging(session);

        if let Some(offset) = self.offset(id) {
            self.emit(id, ScrollEvent::DragBegin { offset });
        }
        true
    }

    /// Routes a pointer move through the arbitrator.
    pub fn on_gesture_move(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        time_ms: u64,
    ) -> Arbitration {
        let Some(session) = self.sessions.dragging_mut(pointer) else {
            return Arbitration::default();
        };
        let delta = session.move_to(position, time_ms);
        if delta.is_zero() {
            return Arbitration::default();
        }
        let chain = session.chain.clone();
        let (result, moved) = self.route_in_chain(&chain, delta, InputKind::Touch);
        if let Some(session) = self.sessions.dragging_mut(pointer) {
            session.note_ancestor_motion(&moved);
        }
        result
    }

    /// Releases a drag: resolves velocity, fires `WillEndDrag` and `DragEnd`, then flings,
    /// settles on a page, or stops.
    pub fn on_gesture_end(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        time_ms: u64,
    ) -> ReleaseOutcome {
        let Some(mut session) = self.sessions.take_dragging(pointer) else {
            swarn!(pointer = pointer.0, "gesture end without a session");
            return ReleaseOutcome::Ignored;
        };
        let origin = session.surface();
        let Some(options) = self.options(origin).cloned() else {
            self.end_nested(&session.chain);
            return ReleaseOutcome::Ignored;
        };

        let trailing = position - session.last_position();
        let threshold = if options.fling_enabled {
            options.fling_threshold
        } else {
            f64::INFINITY
        };
        let pointer_velocity =
            session.release(position, time_ms, threshold, options.max_fling_velocity);
        if !trailing.is_zero() {
            let chain = session.chain.clone();
            let (_, moved) = self.route_in_chain(&chain, trailing, InputKind::Touch);
            session.note_ancestor_motion(&moved);
        }

        // Content moves against the finger.
        let velocity = -pointer_velocity;
        self.emit(origin, ScrollEvent::WillEndDrag { velocity });
        if let Some(offset) = self.offset(origin) {
            self.emit(origin, ScrollEvent::DragEnd { offset });
        }
        self.notify_ancestors_released(&session, velocity);

        let outcome = if options.paging_enabled {
            if self.start_page_settle(origin, velocity, &options, Some(time_ms)) {
                ReleaseOutcome::Settle
            } else {
                ReleaseOutcome::Stopped
            }
        } else if !velocity.is_zero() && self.start_fling(origin, velocity, &options, time_ms) {
            ReleaseOutcome::Fling
        } else {
            ReleaseOutcome::Stopped
        };

        if outcome == ReleaseOutcome::Stopped {
            session.finish();
            self.end_nested(&session.chain);
            self.emit(origin, ScrollEvent::ScrollEnd);
            self.snap_paging_ancestors(&session, velocity, Some(time_ms));
        } else {
            session.settle();
            if let Some(mut replaced) = self.sessions.park_settling(session) {
                replaced.cancel();
                self.end_nested(&replaced.chain);
            }
        }
        sdebug!(surface = %origin, ?outcome, vx = velocity.x, vy = velocity.y, "drag released");
        outcome
    }

    /// Touch cancel: the session is aborted without a release velocity.
    pub fn on_gesture_cancel(&mut self, pointer: PointerId) -> bool {
        let Some(mut session) = self.sessions.take_dragging(pointer) else {
            return false;
        };
        let origin = session.surface();
        session.cancel();
        self.end_nested(&session.chain);
        if let Some(offset) = self.offset(origin) {
            self.emit(origin, ScrollEvent::DragEnd { offset });
            self.emit(origin, ScrollEvent::ScrollEnd);
        }
        self.snap_paging_ancestors(&session, Vec2::ZERO, None);
        true
    }

    /// Applies an immediate delta (e.g. a wheel step) through the arbitrator.
    pub fn dispatch_delta(&mut self, id: SurfaceId, delta: Vec2, input: InputKind) -> Arbitration {
        self.route(id, delta, input)
    }

    /// Scrolls `id` to `(x, y)`, clamped to its extent.
    ///
    /// Animated scrolls use a spring when `spring` is given, otherwise a tween over the
    /// surface's `scroll_to_duration_ms`.
    pub fn scroll_to(
        &mut self,
        id: SurfaceId,
        x: f64,
        y: f64,
        animate: bool,
        spring: Option<SpringParams>,
    ) -> bool {
        let Some(options) = self.options(id) else {
            return false;
        };
        let animation = match (animate, spring) {
            (false, _) => ScrollAnimation::Immediate,
            (true, Some(params)) => ScrollAnimation::Spring(params),
            (true, None) => ScrollAnimation::Linear {
                duration_ms: options.scroll_to_duration_ms,
                easing: Easing::default(),
            },
        };
        self.scroll_to_with(id, Vec2::new(x, y), animation)
    }

    pub fn scroll_by(&mut self, id: SurfaceId, delta: Vec2, animation: ScrollAnimation) -> bool {
        let Some(offset) = self.offset(id) else {
            return false;
        };
        self.scroll_to_with(id, offset + delta, animation)
    }

    pub fn scroll_to_with(
        &mut self,
        id: SurfaceId,
        target: Vec2,
        animation: ScrollAnimation,
    ) -> bool {
        let Some(node) = self.tree.get(id) else {
            return false;
        };
        let mut distance = Vec2::ZERO;
        for axis in Axis::ALL {
            let t = target.get(axis);
            if t.is_finite() {
                distance.set(axis, t.clamp(0.0, node.max_offset(axis)) - node.offset(axis));
            }
        }
        strace!(surface = %id, ?target, ?animation, dx = distance.x, dy = distance.y, "scroll_to");

        match animation {
            ScrollAnimation::Immediate => {
                let stopped = self.stop_motion(id);
                if !distance.is_zero() {
                    self.route(id, -distance, InputKind::Programmatic);
                }
                if stopped || !distance.is_zero() {
                    self.emit(id, ScrollEvent::ScrollEnd);
                }
            }
            ScrollAnimation::Spring(params) => {
                self.animate_distance(id, distance, |d| {
                    Curve::Spring(Spring::new(0.0, d, 0.0, params))
                });
            }
            ScrollAnimation::Linear {
                duration_ms,
                easing,
            } => {
                self.animate_distance(id, distance, |d| {
                    Curve::Linear(LinearTween::new(0.0, d, duration_ms, easing))
                });
            }
        }
        true
    }

    /// Stops every trajectory on `id`. Idempotent: returns `false` (and fires nothing) when
    /// nothing was running.
    pub fn abort_animation(&mut self, id: SurfaceId) -> bool {
        if !self.stop_motion(id) {
            return false;
        }
        self.emit(id, ScrollEvent::ScrollEnd);
        true
    }

    /// Advances the trajectory behind `ticket`.
    ///
    /// Stale tickets (cancelled, replaced or completed trajectories) are ignored and return
    /// `false`. Returns `true` while the trajectory keeps running; in that case the next tick
    /// has already been requested from the host.
    pub fn on_tick(&mut self, ticket: TickTicket, now_ms: u64) -> bool {
        let Some(purpose) = self
            .animations
            .get(ticket.surface, ticket.axis)
            .filter(|t| t.id() == ticket.trajectory)
            .map(Trajectory::purpose)
        else {
            return false;
        };
        let Some(sample) = self.animations.advance(ticket, now_ms) else {
            return false;
        };

        let delta = Vec2::ZERO.with(ticket.axis, -sample.delta);
        let fling_chain = match purpose {
            TrajectoryPurpose::Fling => self
                .sessions
                .settling(ticket.surface)
                .map(|s| s.chain.clone()),
            _ => None,
        };
        let result = match fling_chain {
            Some(chain) => {
                let (result, moved) = self.route_in_chain(&chain, delta, purpose.input());
                if let Some(session) = self.sessions.settling_mut(ticket.surface) {
                    session.note_ancestor_motion(&moved);
                }
                result
            }
            None => self.route(ticket.surface, delta, purpose.input()),
        };
        let consumed = result.axis(ticket.axis).consumed();
        self.animations.record_consumed(ticket, -consumed);

        let hit_edge =
            purpose == TrajectoryPurpose::Fling && sample.delta != 0.0 && consumed == 0.0;
        if sample.done || hit_edge {
            self.animations.finish(ticket);
            self.on_motion_complete(ticket.surface);
            return false;
        }
        if let Some(node) = self.tree.get_mut(ticket.surface) {
            node.host.request_tick(ticket);
        }
        true
    }

    /// Advances every active trajectory. Returns `true` while any remains.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        for ticket in self.animations.tickets() {
            self.on_tick(ticket, now_ms);
        }
        !self.animations.is_empty()
    }

    fn route(&mut self, origin: SurfaceId, delta: Vec2, input: InputKind) -> Arbitration {
        let mut arbitrator = Arbitrator::new(&mut self.tree, self.overscroll.as_deref_mut());
        let result = arbitrator.arbitrate(origin, delta, input);
        let moved = arbitrator.into_moved();

        let is_dragging = input == InputKind::Touch;
        for id in moved {
            if let Some(offset) = self.offset(id) {
                self.emit(id, ScrollEvent::Scroll {
                    offset,
                    is_dragging,
                });
            }
        }
        result
    }

    /// Routes a delta from the first surface of `chain` and reports how each of its
    /// ancestors moved.
    fn route_in_chain(
        &mut self,
        chain: &[SurfaceId],
        delta: Vec2,
        input: InputKind,
    ) -> (Arbitration, Vec<(SurfaceId, Vec2)>) {
        let Some((&origin, ancestors)) = chain.split_first() else {
            return (Arbitration::default(), Vec::new());
        };
        let before: Vec<_> = ancestors.iter().map(|id| (*id, self.offset(*id))).collect();
        let result = self.route(origin, delta, input);
        let moved = before
            .into_iter()
            .filter_map(|(id, before)| {
                let motion = self.offset(id)? - before?;
                (!motion.is_zero()).then_some((id, motion))
            })
            .collect();
        (result, moved)
    }

    fn start_trajectory(
        &mut self,
        id: SurfaceId,
        axis: Axis,
        curve: Curve,
        purpose: TrajectoryPurpose,
        start_ms: Option<u64>,
    ) {
        let (ticket, replaced) = self.animations.start(id, axis, curve, purpose, start_ms);
        if let Some(node) = self.tree.get_mut(id) {
            if let Some(replaced) = replaced {
                node.host.cancel_tick(replaced);
            }
            node.host.request_tick(ticket);
        }
    }

    fn animate_distance(&mut self, id: SurfaceId, distance: Vec2, curve: impl Fn(f64) -> Curve) {
        let mut cancelled = false;
        for axis in Axis::ALL {
            let d = distance.get(axis);
            if d == 0.0 {
                if let Some(ticket) = self.animations.cancel(id, axis) {
                    if let Some(node) = self.tree.get_mut(id) {
                        node.host.cancel_tick(ticket);
                    }
                    cancelled = true;
                }
                continue;
            }
            self.start_trajectory(id, axis, curve(d), TrajectoryPurpose::ScrollTo, None);
        }
        if cancelled {
            self.on_motion_complete(id);
        }
    }

    /// Projects a fling from the release velocity (content px/ms).
    fn start_fling(
        &mut self,
        id: SurfaceId,
        velocity: Vec2,
        options: &ScrollOptions,
        time_ms: u64,
    ) -> bool {
        let decel = if options.fling_deceleration > 0.0 {
            options.fling_deceleration
        } else {
            ScrollOptions::new().fling_deceleration
        };
        let mut started = false;
        for axis in Axis::ALL {
            let v = velocity.get(axis);
            if v == 0.0 {
                continue;
            }
            let distance = (v * v / (2.0 * decel)).copysign(v);
            let duration_ms = (v.abs() / decel).round().max(1.0) as u64;
            let params = SpringParams::from_duration(duration_ms, options.fling_damping_ratio);
            let spring = Spring::new(0.0, distance, v * 1000.0, params);
            self.start_trajectory(
                id,
                axis,
                Curve::Spring(spring),
                TrajectoryPurpose::Fling,
                Some(time_ms),
            );
            started = true;
        }
        started
    }

    /// Settles on the nearest page boundary, one page further in the direction of a
    /// fling-grade velocity.
    fn start_page_settle(
        &mut self,
        id: SurfaceId,
        velocity: Vec2,
        options: &ScrollOptions,
        start_ms: Option<u64>,
    ) -> bool {
        let mut settles = Vec::new();
        if let Some(node) = self.tree.get(id) {
            for axis in Axis::ALL {
                if !options.axis_lock.allows(axis) {
                    continue;
                }
                let page = node.host.viewport_size(axis);
                if !page.is_finite() || page <= 0.0 {
                    continue;
                }
                let offset = node.offset(axis);
                let v = velocity.get(axis);
                let index = if v > 0.0 {
                    (offset / page).floor() + 1.0
                } else if v < 0.0 {
                    (offset / page).ceil() - 1.0
                } else {
                    (offset / page).round()
                };
                let target = (index * page).clamp(0.0, node.max_offset(axis));
                let distance = target - offset;
                if distance.abs() > f64::EPSILON {
                    settles.push((axis, distance, v));
                }
            }
        }

        let started = !settles.is_empty();
        for (axis, distance, v) in settles {
            let params = SpringParams::from_duration(options.settle_duration_ms, 1.0);
            let spring = Spring::new(0.0, distance, v * 1000.0, params);
            self.start_trajectory(
                id,
                axis,
                Curve::Spring(spring),
                TrajectoryPurpose::Settle,
                start_ms,
            );
        }
        started
    }

    /// Non-paging ancestors the drag moved get their own `WillEndDrag`.
    fn notify_ancestors_released(&self, session: &GestureSession, velocity: Vec2) {
        for &(id, motion) in session.ancestor_motion() {
            if self.options(id).is_some_and(|o| !o.paging_enabled) {
                let velocity = on_moved_axes(velocity, motion);
                self.emit(id, ScrollEvent::WillEndDrag { velocity });
            }
        }
    }

    /// Paging ancestors the session moved settle on a page once the session is over.
    fn snap_paging_ancestors(
        &mut self,
        session: &GestureSession,
        velocity: Vec2,
        start_ms: Option<u64>,
    ) {
        for &(id, motion) in session.ancestor_motion() {
            let Some(options) = self.options(id).filter(|o| o.paging_enabled).cloned() else {
                continue;
            };
            if self.animations.has_active(id) || self.sessions.is_gesturing(id) {
                continue;
            }
            let velocity = on_moved_axes(velocity, motion);
            if self.start_page_settle(id, velocity, &options, start_ms) {
                sdebug!(surface = %id, origin = %session.surface(), "paging ancestor settling");
            }
        }
    }

    /// Terminal callback of a surface's motion: once no trajectory is left, the parked
    /// session completes, its nested-scroll session is torn down and `ScrollEnd` fires.
    fn on_motion_complete(&mut self, id: SurfaceId) {
        if self.animations.has_active(id) {
            return;
        }
        let mut session = self.sessions.take_settling(id);
        if let Some(session) = session.as_mut() {
            session.finish();
            self.end_nested(&session.chain);
        }
        self.emit(id, ScrollEvent::ScrollEnd);
        if let Some(session) = session {
            self.snap_paging_ancestors(&session, Vec2::ZERO, None);
        }
    }

    /// Cancels trajectories and any settling session on `id` without firing events.
    fn stop_motion(&mut self, id: SurfaceId) -> bool {
        let tickets = self.animations.cancel_surface(id);
        if let Some(node) = self.tree.get_mut(id) {
            for ticket in &tickets {
                node.host.cancel_tick(*ticket);
            }
        }
        let settling = match self.sessions.take_settling(id) {
            Some(mut session) => {
                session.cancel();
                self.end_nested(&session.chain);
                true
            }
            None => false,
        };
        !tickets.is_empty() || settling
    }

    /// A new touch overrides motion on its own chain and on descendants animating into it.
    fn interrupt_motion(&mut self, id: SurfaceId) {
        let chain = self.tree.nested_chain(id);
        let mut animated: Vec<SurfaceId> = self
            .animations
            .tickets()
            .iter()
            .map(|t| t.surface)
            .collect();
        animated.dedup();
        for surface in animated {
            if chain.contains(&surface) || self.tree.nested_chain(surface).contains(&id) {
                self.stop_motion(surface);
            }
        }
    }

    fn begin_nested(&mut self, chain: &[SurfaceId]) {
        let Some((&origin, ancestors)) = chain.split_first() else {
            return;
        };
        for id in chain {
            if let Some(node) = self.tree.get_mut(*id) {
                node.compensation.begin_session();
            }
        }
        for id in ancestors {
            if let Some(node) = self.tree.get_mut(*id) {
                node.nested_children.insert(origin);
            }
        }
    }

    fn end_nested(&mut self, chain: &[SurfaceId]) {
        let Some((&origin, ancestors)) = chain.split_first() else {
            return;
        };
        for id in chain {
            if let Some(node) = self.tree.get_mut(*id) {
                node.compensation.end_session();
            }
        }
        for id in ancestors {
            if let Some(node) = self.tree.get_mut(*id) {
                node.nested_children.remove(&origin);
            }
        }
    }

    fn emit(&self, id: SurfaceId, event: ScrollEvent) {
        if let Some(cb) = self.tree.get(id).and_then(|n| n.options.on_event.as_ref()) {
            cb(id, &event);
        }
    }
}

/// Keeps the components of `velocity` on axes where `motion` is non-zero.
fn on_moved_axes(velocity: Vec2, motion: Vec2) -> Vec2 {
    let mut out = Vec2::ZERO;
    for axis in Axis::ALL {
        if motion.get(axis) != 0.0 {
            out.set(axis, velocity.get(axis));
        }
    }
    out
}

impl core::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("surfaces", &self.tree.len())
            .field("sessions", &self.sessions)
            .field("animations", &self.animations)
            .field("overscroll_handler", &self.overscroll.is_some())
            .finish()
    }
}
