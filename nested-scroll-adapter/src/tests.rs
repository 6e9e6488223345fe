use crate::*;

use nested_scroll::{
    Axis, AxisLock, ConfigError, Easing, GesturePhase, HostSurface, PointerId, ReleaseOutcome,
    ScrollEvent, ScrollMode, ScrollOptions, SurfaceId, Vec2,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn run(c: &mut Controller, mut now_ms: u64) -> u64 {
    for _ in 0..2_000 {
        if !c.tick(now_ms) {
            return now_ms;
        }
        now_ms += 16;
    }
    panic!("controller did not go idle");
}

#[test]
fn strict_properties_reject_bad_values() {
    let mut config = HostConfig::new();
    config.set_property("scrollForwardMode", "PARENT_FIRST").unwrap();
    config.set_property("axisLock", "horizontal").unwrap();
    config.set_property("pagingEnabled", "yes").unwrap();

    assert_eq!(config.scroll_forward_mode, Some(ScrollMode::ParentFirst));
    assert_eq!(config.axis_lock, Some(AxisLock::Horizontal));
    assert_eq!(config.paging_enabled, Some(true));

    assert_eq!(
        config.set_property("flingEnabled", "maybe"),
        Err(ConfigError::InvalidFlag {
            key: "flingEnabled".to_owned(),
            value: "maybe".to_owned(),
        })
    );
    assert_eq!(
        config.set_property("color", "red"),
        Err(ConfigError::UnknownKey("color".to_owned()))
    );
    assert!(matches!(
        config.set_property("scrollBackwardMode", "sideways"),
        Err(ConfigError::UnknownScrollMode(_))
    ));
    assert_eq!(config.fling_enabled, None);
    assert_eq!(config.scroll_backward_mode, None);
}

#[test]
fn lenient_properties_fall_back_to_defaults() {
    let config = HostConfig::from_properties([
        ("scrollForwardMode", "sideways"),
        ("scrollBackwardMode", "selfOnly"),
        ("axisLock", "diagonal"),
        ("bouncesEnabled", "maybe"),
        ("scrollWithParent", "false"),
        ("color", "red"),
    ]);

    assert_eq!(config.scroll_forward_mode, Some(ScrollMode::SelfFirst));
    assert_eq!(config.scroll_backward_mode, Some(ScrollMode::SelfOnly));
    assert_eq!(config.axis_lock, Some(AxisLock::Vertical));
    assert_eq!(config.bounces_enabled, None);
    assert_eq!(config.scroll_with_parent, Some(false));

    let mut config = HostConfig::new();
    assert!(config.set_property_lenient("scrollEnabled", "0"));
    assert!(!config.set_property_lenient("scrollBackwardMode", "upward"));
    assert_eq!(config.scroll_enabled, Some(false));
    assert_eq!(config.scroll_backward_mode, Some(ScrollMode::SelfFirst));
}

#[test]
fn config_applies_only_set_fields() {
    let config = HostConfig {
        paging_enabled: Some(true),
        axis_lock: Some(AxisLock::Both),
        ..HostConfig::default()
    };
    let options = config.apply(ScrollOptions::new().with_fling_threshold(0.3));

    assert!(options.paging_enabled);
    assert_eq!(options.axis_lock, AxisLock::Both);
    assert_eq!(options.fling_threshold, 0.3);
    assert!(options.scroll_enabled);
    assert_eq!(options.forward_mode, ScrollMode::SelfFirst);
}

#[test]
fn flags_accept_common_spellings() {
    assert_eq!(parse_flag("k", "TRUE"), Ok(true));
    assert_eq!(parse_flag("k", " no "), Ok(false));
    assert_eq!(parse_flag("k", "1"), Ok(true));
    assert!(parse_flag("k", "").is_err());
    assert!(PROPERTY_KEYS.contains(&"scrollWithParent"));
}

#[test]
fn sim_surface_reports_extent_and_clamps_on_resize() {
    let sim = SimSurface::vertical(1_000.0, 400.0).with_offset(Vec2::new(0.0, 500.0));
    assert_eq!(sim.axis_extent(Axis::Y), 600.0);
    assert_eq!(sim.viewport_size(Axis::Y), 400.0);
    assert_eq!(sim.axis_extent(Axis::X), 0.0);

    sim.set_content(Vec2::new(0.0, 700.0));
    assert_eq!(sim.current_offset(), Vec2::new(0.0, 300.0));
    sim.set_viewport(Vec2::new(0.0, 800.0));
    assert_eq!(sim.current_offset(), Vec2::ZERO);
    assert_eq!(sim.content(), Vec2::new(0.0, 700.0));
    assert_eq!(sim.viewport(), Vec2::new(0.0, 800.0));
}

#[test]
fn event_log_records_a_drag() {
    let log = EventLog::new();
    let sim = SimSurface::vertical(1_000.0, 400.0);
    let mut c = Controller::new();
    let id = c.attach(sim.clone(), log.install(ScrollOptions::new()), None);
    c.set_hit_test(move |_| Some(id));

    let p = PointerId(7);
    let down = c.on_pointer(
        PointerEvent::Down {
            pointer: p,
            position: Vec2::new(0.0, 300.0),
        },
        0,
    );
    assert!(down.handled);
    let moved = c.on_pointer(
        PointerEvent::Move {
            pointer: p,
            position: Vec2::new(0.0, 250.0),
        },
        16,
    );
    assert!(moved.handled);
    assert_eq!(moved.arbitration.y.consumed_by_self, -50.0);
    assert_eq!(c.engine().phase(id), GesturePhase::Dragging);

    let up = c.on_pointer(
        PointerEvent::Up {
            pointer: p,
            position: Vec2::new(0.0, 250.0),
        },
        400,
    );
    assert_eq!(up.release, Some(ReleaseOutcome::Stopped));
    assert_eq!(sim.current_offset(), Vec2::new(0.0, 50.0));

    assert_eq!(
        log.for_surface(id).first(),
        Some(&ScrollEvent::DragBegin { offset: Vec2::ZERO })
    );
    assert_eq!(log.count(id, |e| matches!(e, ScrollEvent::ScrollEnd)), 1);
    assert_eq!(log.count(id, |e| matches!(e, ScrollEvent::WillEndDrag { .. })), 1);

    let taken = log.take();
    assert_eq!(taken.len(), 5);
    assert!(log.is_empty());
}

#[test]
fn pointer_down_outside_any_surface_is_dropped() {
    let mut c = Controller::new();
    let id = c.attach(SimSurface::vertical(1_000.0, 400.0), ScrollOptions::new(), None);
    c.set_hit_test(move |p: Vec2| (p.y < 400.0).then_some(id));

    let miss = c.on_pointer(
        PointerEvent::Down {
            pointer: PointerId(1),
            position: Vec2::new(0.0, 900.0),
        },
        0,
    );
    assert_eq!(miss, PointerResponse::default());

    let moved = c.on_pointer(
        PointerEvent::Move {
            pointer: PointerId(1),
            position: Vec2::new(0.0, 800.0),
        },
        16,
    );
    assert!(!moved.handled);
    assert!(!c.on_pointer(PointerEvent::Cancel { pointer: PointerId(1) }, 32).handled);
    assert!(c.is_idle());
}

#[test]
fn controller_without_hit_test_ignores_downs() {
    let mut c = Controller::default();
    c.attach(SimSurface::vertical(1_000.0, 400.0), ScrollOptions::new(), None);
    let r = c.on_pointer(
        PointerEvent::Down {
            pointer: PointerId(1),
            position: Vec2::ZERO,
        },
        0,
    );
    assert!(!r.handled);
}

#[test]
fn controller_tween_drives_offset() {
    let sim = SimSurface::vertical(1_000.0, 400.0);
    let mut c = Controller::new();
    let id = c.attach(sim.clone(), ScrollOptions::new(), None);

    assert!(c.start_tween_to_offset(id, Vec2::new(0.0, 500.0), 100, Easing::SmoothStep));
    assert!(c.is_animating(id));
    assert_eq!(sim.requested_ticks().len(), 1);

    let mut last = 0.0;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        c.tick(now_ms);
        let off = sim.current_offset().y;
        assert!(off >= last);
        last = off;
    }
    assert!(!c.is_animating(id));
    assert!(c.is_idle());
    assert!(approx(sim.current_offset().y, 500.0));
    assert_eq!(c.last_tick_ms(), Some(120));
}

#[test]
fn controller_spring_converges() {
    let sim = SimSurface::vertical(1_000.0, 400.0);
    let mut c = Controller::new();
    let id = c.attach(sim.clone(), ScrollOptions::new(), None);

    let params = nested_scroll::SpringParams::from_duration(200, 0.8);
    assert!(c.start_spring_to_offset(id, Vec2::new(0.0, 300.0), params));
    run(&mut c, 0);
    assert!(approx(sim.current_offset().y, 300.0));
}

#[test]
fn scroll_to_offset_clamps() {
    let mut c = Controller::new();
    let id = c.attach(SimSurface::vertical(1_000.0, 400.0), ScrollOptions::new(), None);

    assert_eq!(
        c.scroll_to_offset(id, Vec2::new(0.0, 5_000.0)),
        Some(Vec2::new(0.0, 600.0))
    );
    assert!(c.detach(id));
    assert_eq!(c.scroll_to_offset(id, Vec2::ZERO), None);
}

#[test]
fn cancel_animation_drops_pending_ticks() {
    let sim = SimSurface::vertical(1_000.0, 400.0);
    let mut c = Controller::new();
    let id = c.attach(sim.clone(), ScrollOptions::new(), None);

    c.start_tween_to_offset(id, Vec2::new(0.0, 500.0), 300, Easing::Linear);
    let pending = sim.take_requested_ticks();
    assert_eq!(pending.len(), 1);

    c.tick(0);
    assert_eq!(sim.requested_ticks(), pending);
    assert!(c.cancel_animation(id));
    assert!(!c.cancel_animation(id));
    assert!(sim.requested_ticks().is_empty());
    assert_eq!(sim.cancelled_ticks(), pending);
    assert!(!c.engine_mut().on_tick(pending[0], 100));
}

#[test]
fn horizontal_pager_settles_on_next_page() {
    let pager = SimSurface::horizontal(3_000.0, 1_000.0);
    let log = EventLog::new();
    let mut c = Controller::new();
    let id = c.attach(
        pager.clone(),
        log.install(
            ScrollOptions::new()
                .with_axis_lock(AxisLock::Horizontal)
                .with_paging_enabled(true),
        ),
        None,
    );
    c.set_hit_test(move |_| Some(id));

    let p = PointerId(1);
    c.on_pointer(
        PointerEvent::Down {
            pointer: p,
            position: Vec2::new(500.0, 0.0),
        },
        0,
    );
    c.on_pointer(
        PointerEvent::Move {
            pointer: p,
            position: Vec2::new(480.0, 0.0),
        },
        10,
    );
    let up = c.on_pointer(
        PointerEvent::Up {
            pointer: p,
            position: Vec2::new(460.0, 0.0),
        },
        20,
    );
    assert_eq!(up.release, Some(ReleaseOutcome::Settle));
    assert_eq!(c.engine().phase(id), GesturePhase::Settling);
    assert!(!c.is_idle());

    run(&mut c, 20);
    assert!(approx(pager.current_offset().x, 1_000.0));
    assert_eq!(c.engine().phase(id), GesturePhase::Idle);
    assert_eq!(log.count(id, |e| matches!(e, ScrollEvent::ScrollEnd)), 1);
}

#[test]
fn nested_pager_hands_vertical_drag_to_page() {
    let page = SimSurface::vertical(2_000.0, 800.0);
    let list = SimSurface::vertical(500.0, 400.0);
    let mut c = Controller::new();
    let page_id = c.attach(page.clone(), ScrollOptions::new(), None);
    let list_id: SurfaceId = c.attach(list.clone(), ScrollOptions::new(), Some(page_id));
    c.set_hit_test(move |_| Some(list_id));

    let p = PointerId(3);
    c.on_pointer(
        PointerEvent::Down {
            pointer: p,
            position: Vec2::new(0.0, 600.0),
        },
        0,
    );
    c.on_layout(list_id, 0.0, -10.0);
    let r = c.on_pointer(
        PointerEvent::Move {
            pointer: p,
            position: Vec2::new(0.0, 450.0),
        },
        16,
    );

    assert_eq!(r.arbitration.y.consumed_by_self, -100.0);
    assert_eq!(r.arbitration.y.consumed_by_compensation, -10.0);
    assert_eq!(r.arbitration.y.consumed_by_ancestors, -40.0);
    assert_eq!(list.current_offset().y, 100.0);
    assert_eq!(page.current_offset().y, 40.0);
}

#[test]
fn list_drag_leaves_horizontal_pager_on_a_page() {
    let pager = SimSurface::horizontal(3_000.0, 1_000.0);
    let list = SimSurface::vertical(2_000.0, 600.0);
    let log = EventLog::new();
    let mut c = Controller::new();
    let pager_id = c.attach(
        pager.clone(),
        log.install(
            ScrollOptions::new()
                .with_axis_lock(AxisLock::Horizontal)
                .with_paging_enabled(true),
        ),
        None,
    );
    let list_id = c.attach(list.clone(), ScrollOptions::new(), Some(pager_id));
    c.set_hit_test(move |_| Some(list_id));

    // A slow sideways drag: the list cannot take it, so it moves the pager.
    let p = PointerId(4);
    c.on_pointer(
        PointerEvent::Down {
            pointer: p,
            position: Vec2::new(900.0, 300.0),
        },
        0,
    );
    for (x, t) in [(550.0, 500), (200.0, 1_000)] {
        c.on_pointer(
            PointerEvent::Move {
                pointer: p,
                position: Vec2::new(x, 300.0),
            },
            t,
        );
    }
    let up = c.on_pointer(
        PointerEvent::Up {
            pointer: p,
            position: Vec2::new(200.0, 300.0),
        },
        1_500,
    );

    assert_eq!(up.release, Some(ReleaseOutcome::Stopped));
    assert_eq!(pager.current_offset().x, 700.0);
    assert!(c.is_animating(pager_id));
    assert!(!c.is_idle());

    run(&mut c, 1_500);
    assert!(approx(pager.current_offset().x, 1_000.0));
    assert_eq!(list.current_offset(), Vec2::ZERO);
    assert_eq!(c.engine().phase(pager_id), GesturePhase::Idle);
    assert_eq!(log.count(pager_id, |e| matches!(e, ScrollEvent::ScrollEnd)), 1);
}
