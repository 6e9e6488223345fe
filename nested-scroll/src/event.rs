use std::sync::Arc;

use crate::{SurfaceId, Vec2};

/// Notifications the engine sends to its host, per surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEvent {
    /// The surface offset changed.
    Scroll { offset: Vec2, is_dragging: bool },
    /// A drag started on the surface.
    DragBegin { offset: Vec2 },
    /// Fired exactly once per released drag, before [`ScrollEvent::DragEnd`].
    ///
    /// `velocity` is the content velocity in px/ms (positive grows the offset). Components
    /// below the fling threshold are reported as zero.
    WillEndDrag { velocity: Vec2 },
    /// The drag was released (or cancelled).
    DragEnd { offset: Vec2 },
    /// All motion on the surface has settled.
    ScrollEnd,
}

/// A callback fired for every [`ScrollEvent`] on a surface.
pub type ScrollEventCallback = Arc<dyn Fn(SurfaceId, &ScrollEvent) + Send + Sync>;
