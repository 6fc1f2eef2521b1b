// Host-side tests for frame timing and viewport tracking.

use neural_hangar::core::{Clock, FrameClock, Viewport, ViewportMonitor};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn first_frame_uses_nominal_delta() {
    let frame = FrameClock::default();
    assert_eq!(frame.delta, 16.0);
    assert_eq!(frame.elapsed, 0.0);
}

#[test]
fn tick_advances_delta_and_elapsed() {
    let mut clock = Clock::starting_at(1000.0);
    let f = clock.tick_at(1016.0);
    assert_eq!(f.delta, 16.0);
    assert_eq!(f.elapsed, 16.0);
    let f = clock.tick_at(1050.0);
    assert_eq!(f.delta, 34.0);
    assert_eq!(f.elapsed, 50.0);
    assert_eq!(clock.frame(), f);
}

#[test]
fn stale_timestamp_never_runs_time_backwards() {
    let mut clock = Clock::starting_at(0.0);
    clock.tick_at(100.0);
    let f = clock.tick_at(40.0);
    assert_eq!(f.delta, 0.0);
    assert_eq!(f.elapsed, 100.0);
    let f = clock.tick_at(120.0);
    assert_eq!(f.delta, 20.0);
    assert_eq!(f.elapsed, 120.0);
}

#[test]
fn tick_notifies_subscribers() {
    let mut clock = Clock::starting_at(0.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = seen.clone();
        clock
            .tick_signal()
            .subscribe(move |f: &FrameClock| seen.borrow_mut().push(f.elapsed))
    };
    clock.tick_at(10.0);
    clock.tick_at(25.0);
    assert_eq!(*seen.borrow(), vec![10.0, 25.0]);
}

#[test]
fn wall_clock_is_monotonic() {
    let clock = Clock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
}

#[test]
fn pixel_ratio_is_clamped() {
    assert_eq!(Viewport::new(800, 600, 3.0).pixel_ratio, 2.0);
    assert_eq!(Viewport::new(800, 600, 1.5).pixel_ratio, 1.5);
    assert_eq!(Viewport::new(800, 600, 0.0).pixel_ratio, 1.0);
    assert_eq!(Viewport::new(800, 600, -2.0).pixel_ratio, 1.0);
}

#[test]
fn mobile_breakpoint_and_sizes() {
    assert!(Viewport::new(767, 1000, 1.0).is_mobile());
    assert!(!Viewport::new(768, 1000, 1.0).is_mobile());

    let v = Viewport::new(800, 400, 2.0);
    assert_eq!(v.aspect(), 2.0);
    assert_eq!(v.physical_size(), (1600, 800));
    assert_eq!(Viewport::new(0, 0, 1.0).physical_size(), (1, 1));
}

#[test]
fn monitor_emits_only_on_change() {
    let mut monitor = ViewportMonitor::new(Viewport::new(1280, 720, 1.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = seen.clone();
        monitor
            .resize_signal()
            .subscribe(move |v: &Viewport| seen.borrow_mut().push(v.width))
    };

    assert!(!monitor.observe(1280, 720, 1.0));
    assert!(monitor.observe(500, 720, 1.0));
    // 4.0 clamps to 2.0, so repeating with 2.0 is not a change.
    assert!(monitor.observe(500, 720, 4.0));
    assert!(!monitor.observe(500, 720, 2.0));
    assert_eq!(*seen.borrow(), vec![500, 500]);
    assert_eq!(monitor.current().pixel_ratio, 2.0);
}
