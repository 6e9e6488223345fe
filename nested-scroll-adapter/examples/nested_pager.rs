use nested_scroll::{PointerId, ScrollEvent, ScrollOptions, Vec2};
use nested_scroll_adapter::{Controller, EventLog, HostConfig, PointerEvent, SimSurface};

fn main() {
    // Example: a horizontal pager whose pages are vertical lists, configured from host
    // properties and driven by a frame loop without holding any UI objects.
    //
    // A host would:
    // - attach one surface per native scroll view, nested like the view tree
    // - forward pointer events (the hit-test picks the topmost surface under the finger)
    // - call tick(now_ms) every frame until the controller is idle
    let log = EventLog::new();
    let pager_config = HostConfig::from_properties([
        ("axisLock", "horizontal"),
        ("pagingEnabled", "true"),
        ("bouncesEnabled", "false"),
    ]);
    let list_config = HostConfig::from_properties([
        ("scrollForwardMode", "SELF_FIRST"),
        ("scrollBackwardMode", "PARENT_FIRST"),
        ("scrollWithParent", "true"),
    ]);

    let pager = SimSurface::horizontal(1_080.0, 360.0);
    let list = SimSurface::vertical(2_000.0, 640.0);

    let mut c = Controller::new();
    let pager_id = c.attach(
        pager.clone(),
        log.install(pager_config.apply(ScrollOptions::new())),
        None,
    );
    let list_id = c.attach(
        list.clone(),
        log.install(list_config.apply(ScrollOptions::new())),
        Some(pager_id),
    );
    c.set_hit_test(move |_| Some(list_id));

    // A quick horizontal swipe: the list cannot scroll sideways, so the pager takes it.
    let finger = PointerId(1);
    let mut now_ms = 0u64;
    let mut x = 300.0;
    c.on_pointer(
        PointerEvent::Down {
            pointer: finger,
            position: Vec2::new(x, 320.0),
        },
        now_ms,
    );
    for _ in 0..4 {
        now_ms += 8;
        x -= 24.0;
        let r = c.on_pointer(
            PointerEvent::Move {
                pointer: finger,
                position: Vec2::new(x, 320.0),
            },
            now_ms,
        );
        println!(
            "t={now_ms} by_list={} by_pager={}",
            r.arbitration.x.consumed_by_self, r.arbitration.x.consumed_by_ancestors
        );
    }
    let up = c.on_pointer(
        PointerEvent::Up {
            pointer: finger,
            position: Vec2::new(x, 320.0),
        },
        now_ms,
    );
    println!("release: {:?}", up.release);

    while c.tick(now_ms) {
        now_ms += 16;
    }
    println!(
        "settled at t={now_ms}: pager={:?} list={:?}",
        pager.current_offset(),
        list.current_offset()
    );

    for (id, event) in log.take() {
        if !matches!(event, ScrollEvent::Scroll { .. }) {
            println!("{id}: {event:?}");
        }
    }
}
