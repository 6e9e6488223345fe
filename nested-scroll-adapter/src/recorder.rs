use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nested_scroll::{ScrollEvent, ScrollEventCallback, ScrollOptions, SurfaceId};

/// A clonable recorder of [`ScrollEvent`]s.
///
/// Install it with [`EventLog::install`] (or pass [`EventLog::callback`] to
/// [`ScrollOptions::with_on_event_callback`]); clones share one log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<(SurfaceId, ScrollEvent)>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> ScrollEventCallback {
        let events = Arc::clone(&self.events);
        Arc::new(move |id: SurfaceId, event: &ScrollEvent| {
            events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((id, *event));
        })
    }

    /// Returns `options` with this log as its event callback.
    pub fn install(&self, options: ScrollOptions) -> ScrollOptions {
        options.with_on_event_callback(Some(self.callback()))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<(SurfaceId, ScrollEvent)> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<(SurfaceId, ScrollEvent)> {
        std::mem::take(&mut *self.lock())
    }

    /// Events recorded for one surface, in order.
    pub fn for_surface(&self, id: SurfaceId) -> Vec<ScrollEvent> {
        self.lock()
            .iter()
            .filter(|(s, _)| *s == id)
            .map(|(_, e)| *e)
            .collect()
    }

    pub fn count(&self, id: SurfaceId, pred: impl Fn(&ScrollEvent) -> bool) -> usize {
        self.lock()
            .iter()
            .filter(|(s, e)| *s == id && pred(e))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SurfaceId, ScrollEvent)>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
