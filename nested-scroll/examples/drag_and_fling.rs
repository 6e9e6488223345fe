// Example: a list nested in a page. Dragging past the end of the list hands the rest of the
// gesture to the page, and the release fling keeps scrolling the page.
use nested_scroll::{
    Axis, HostSurface, PointerId, ReleaseOutcome, ScrollEngine, ScrollEvent, ScrollOptions,
    SurfaceId, Vec2,
};

struct Pane {
    extent: f64,
    offset: f64,
}

impl HostSurface for Pane {
    fn axis_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => 0.0,
            Axis::Y => self.extent,
        }
    }

    fn offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => 0.0,
            Axis::Y => self.offset,
        }
    }

    fn apply_offset_delta(&mut self, axis: Axis, delta: f64) {
        if axis == Axis::Y {
            self.offset += delta;
        }
    }
}

fn main() {
    let mut engine = ScrollEngine::new();
    let page = engine.attach(
        Pane {
            extent: 3_000.0,
            offset: 0.0,
        },
        ScrollOptions::new(),
        None,
    );
    let list = engine.attach(
        Pane {
            extent: 120.0,
            offset: 0.0,
        },
        ScrollOptions::new().with_on_event(Some(|id: SurfaceId, e: &ScrollEvent| {
            println!("{id}: {e:?}");
        })),
        Some(page),
    );

    let finger = PointerId(0);
    engine.on_gesture_begin(list, finger, Vec2::new(0.0, 600.0), 0);
    let mut y = 600.0;
    for t in (16..=160).step_by(16) {
        y -= 30.0;
        let r = engine.on_gesture_move(finger, Vec2::new(0.0, y), t);
        println!(
            "t={t} self={} escalated={} list={:?} page={:?}",
            r.y.consumed_by_self,
            r.y.escalated,
            engine.offset(list),
            engine.offset(page),
        );
    }

    let outcome = engine.on_gesture_end(finger, Vec2::new(0.0, y - 30.0), 176);
    println!("release: {outcome:?}");
    if outcome == ReleaseOutcome::Fling {
        let mut now_ms = 176;
        while engine.tick(now_ms) {
            now_ms += 16;
            if now_ms % 160 == 0 {
                println!("t={now_ms} page={:?}", engine.offset(page));
            }
        }
        println!("settled at t={now_ms}");
    }
    println!("done: list={:?} page={:?}", engine.offset(list), engine.offset(page));
}
