use std::cell::RefCell;
use std::rc::Rc;

use nested_scroll::{Axis, HostSurface, TickTicket, Vec2};

#[derive(Clone, Debug, Default)]
struct SimState {
    content: Vec2,
    viewport: Vec2,
    offset: Vec2,
    requested: Vec<TickTicket>,
    cancelled: Vec<TickTicket>,
}

/// An in-memory scroll view.
///
/// Clones share state, so a host can attach one handle to a [`nested_scroll::ScrollEngine`]
/// and keep another to read offsets and drain tick requests.
#[derive(Clone, Debug, Default)]
pub struct SimSurface {
    state: Rc<RefCell<SimState>>,
}

impl SimSurface {
    pub fn new(content: Vec2, viewport: Vec2) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                content,
                viewport,
                ..SimState::default()
            })),
        }
    }

    pub fn vertical(content_height: f64, viewport_height: f64) -> Self {
        Self::new(Vec2::new(0.0, content_height), Vec2::new(0.0, viewport_height))
    }

    pub fn horizontal(content_width: f64, viewport_width: f64) -> Self {
        Self::new(Vec2::new(content_width, 0.0), Vec2::new(viewport_width, 0.0))
    }

    pub fn with_offset(self, offset: Vec2) -> Self {
        self.state.borrow_mut().offset = offset;
        self
    }

    pub fn current_offset(&self) -> Vec2 {
        self.state.borrow().offset
    }

    pub fn content(&self) -> Vec2 {
        self.state.borrow().content
    }

    pub fn viewport(&self) -> Vec2 {
        self.state.borrow().viewport
    }

    /// Resizes the content. The offset is clamped to the new extent.
    pub fn set_content(&self, content: Vec2) {
        let mut state = self.state.borrow_mut();
        state.content = content;
        clamp_offset(&mut state);
    }

    pub fn set_viewport(&self, viewport: Vec2) {
        let mut state = self.state.borrow_mut();
        state.viewport = viewport;
        clamp_offset(&mut state);
    }

    pub fn requested_ticks(&self) -> Vec<TickTicket> {
        self.state.borrow().requested.clone()
    }

    pub fn cancelled_ticks(&self) -> Vec<TickTicket> {
        self.state.borrow().cancelled.clone()
    }

    /// Drains pending tick requests (one frame's worth for a host scheduler).
    pub fn take_requested_ticks(&self) -> Vec<TickTicket> {
        std::mem::take(&mut self.state.borrow_mut().requested)
    }
}

fn clamp_offset(state: &mut SimState) {
    for axis in Axis::ALL {
        let max = (state.content.get(axis) - state.viewport.get(axis)).max(0.0);
        let clamped = state.offset.get(axis).clamp(0.0, max);
        state.offset.set(axis, clamped);
    }
}

impl HostSurface for SimSurface {
    fn axis_extent(&self, axis: Axis) -> f64 {
        let state = self.state.borrow();
        state.content.get(axis) - state.viewport.get(axis)
    }

    fn offset(&self, axis: Axis) -> f64 {
        self.state.borrow().offset.get(axis)
    }

    fn apply_offset_delta(&mut self, axis: Axis, delta: f64) {
        let mut state = self.state.borrow_mut();
        let next = state.offset.get(axis) + delta;
        state.offset.set(axis, next);
    }

    fn viewport_size(&self, axis: Axis) -> f64 {
        self.state.borrow().viewport.get(axis)
    }

    fn request_tick(&mut self, ticket: TickTicket) {
        self.state.borrow_mut().requested.push(ticket);
    }

    fn cancel_tick(&mut self, ticket: TickTicket) {
        let mut state = self.state.borrow_mut();
        state.requested.retain(|t| *t != ticket);
        state.cancelled.push(ticket);
    }
}
