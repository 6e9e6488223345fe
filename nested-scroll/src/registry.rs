use std::collections::{BTreeMap, BTreeSet};

use crate::{GesturePhase, GestureSession, PointerId, SurfaceId};

/// Tracks every live gesture session of one render tree.
///
/// Dragging sessions are keyed by pointer (one per pointer stream). Released sessions that
/// went on to settle are parked per surface until their motion completes. The set of
/// surfaces currently under a finger is maintained at every phase transition.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    dragging: BTreeMap<PointerId, GestureSession>,
    settling: BTreeMap<SurfaceId, GestureSession>,
    gesturing: BTreeSet<SurfaceId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dragging session, returning the session it replaced for the same pointer.
    pub fn insert_dragging(&mut self, session: GestureSession) -> Option<GestureSession> {
        self.gesturing.insert(session.surface());
        let replaced = self.dragging.insert(session.pointer(), session);
        if let Some(prev) = &replaced {
            self.refresh(prev.surface());
        }
        replaced
    }

    pub fn dragging(&self, pointer: PointerId) -> Option<&GestureSession> {
        self.dragging.get(&pointer)
    }

    pub fn dragging_mut(&mut self, pointer: PointerId) -> Option<&mut GestureSession> {
        self.dragging.get_mut(&pointer)
    }

    pub fn take_dragging(&mut self, pointer: PointerId) -> Option<GestureSession> {
        let session = self.dragging.remove(&pointer)?;
        self.refresh(session.surface());
        Some(session)
    }

    /// Parks a released session while its surface settles.
    pub fn park_settling(&mut self, session: GestureSession) -> Option<GestureSession> {
        self.settling.insert(session.surface(), session)
    }

    pub fn settling(&self, surface: SurfaceId) -> Option<&GestureSession> {
        self.settling.get(&surface)
    }

    pub fn settling_mut(&mut self, surface: SurfaceId) -> Option<&mut GestureSession> {
        self.settling.get_mut(&surface)
    }

    pub fn take_settling(&mut self, surface: SurfaceId) -> Option<GestureSession> {
        self.settling.remove(&surface)
    }

    pub fn is_gesturing(&self, surface: SurfaceId) -> bool {
        self.gesturing.contains(&surface)
    }

    pub fn gesturing(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.gesturing.iter().copied()
    }

    /// The phase of the most active session on `surface`.
    pub fn phase(&self, surface: SurfaceId) -> GesturePhase {
        if self.gesturing.contains(&surface) {
            GesturePhase::Dragging
        } else if let Some(session) = self.settling.get(&surface) {
            session.phase()
        } else {
            GesturePhase::Idle
        }
    }

    /// Removes every session owned by `surface` and drops it from other sessions' chains.
    pub fn remove_surface(&mut self, surface: SurfaceId) -> Vec<GestureSession> {
        let pointers: Vec<PointerId> = self
            .dragging
            .iter()
            .filter(|(_, s)| s.surface() == surface)
            .map(|(p, _)| *p)
            .collect();
        let mut removed: Vec<GestureSession> = pointers
            .into_iter()
            .filter_map(|p| self.dragging.remove(&p))
            .collect();
        removed.extend(self.settling.remove(&surface));
        self.gesturing.remove(&surface);

        for session in self.dragging.values_mut().chain(self.settling.values_mut()) {
            session.chain.retain(|id| *id != surface);
        }
        removed
    }

    fn refresh(&mut self, surface: SurfaceId) {
        if !self.dragging.values().any(|s| s.surface() == surface) {
            self.gesturing.remove(&surface);
        }
    }
}
