//! Notification lifecycle driven on the virtual event loop
//!
//! These tests verify that:
//! - The per-window count only moves on reveal and close, never below zero
//! - Delays, countdown, fades and auto-close happen at the expected ticks
//! - Hide and close are idempotent and never double-release a slot
//! - Notifications follow a moving parent and close with a hidden one
//! - Surfaces can read the notification while it updates them

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use qflow_core::{
    Callback, EmbeddedIcons, EventLoop, HeadlessSurface, ParentWindow, Point, Rect, Scheduler,
    Size, Surface, TimerId, Window,
};
use qflow_widgets::notify::{notify, placement, NotifyType, Position, TICK_INTERVAL};
use qflow_widgets::{Notify, Session};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn setup() -> (EventLoop, Session, Rc<Window>) {
    let event_loop = EventLoop::new();
    let session = Session::headless(&event_loop);
    let window = Rc::new(Window::new("main", Rect::new(0, 0, 800, 600)));
    (event_loop, session, window)
}

/// Scheduler that counts every stop / is-active query
struct CountingScheduler {
    inner: EventLoop,
    timer_ops: Cell<usize>,
}

impl Scheduler for CountingScheduler {
    fn start(&self, interval: Duration, callback: Callback) -> TimerId {
        self.inner.start(interval, callback)
    }

    fn single_shot(&self, delay: Duration, callback: Callback) -> TimerId {
        self.inner.single_shot(delay, callback)
    }

    fn stop(&self, id: TimerId) {
        self.timer_ops.set(self.timer_ops.get() + 1);
        self.inner.stop(id);
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.timer_ops.set(self.timer_ops.get() + 1);
        self.inner.is_active(id)
    }

    fn now(&self) -> Duration {
        self.inner.now()
    }
}

#[test]
fn test_auto_show_reveals_immediately() {
    let (_event_loop, session, window) = setup();
    let toast = notify("Hello", window.clone()).build(&session);

    assert!(toast.is_notification_shown());
    assert!(toast.is_notification_visible());
    assert!(!toast.limit_exceeded());
    assert_eq!(toast.ordinal(), 1);
    assert_eq!(session.registry().count(window.id()), 1);
}

#[test]
fn test_limit_of_seven_rejects_the_eighth() {
    let (_event_loop, session, window) = setup();

    let toasts: Vec<_> = (0..8)
        .map(|i| {
            notify(format!("Message {i}"), window.clone())
                .notifications_limit(7)
                .build(&session)
        })
        .collect();

    for (i, toast) in toasts.iter().take(7).enumerate() {
        assert!(!toast.limit_exceeded());
        assert!(toast.is_notification_visible());
        assert_eq!(toast.ordinal(), i as u32 + 1);
    }

    let eighth = &toasts[7];
    assert!(eighth.limit_exceeded());
    assert!(!eighth.is_notification_visible());
    assert!(eighth.content().is_none());
    assert_eq!(session.registry().count(window.id()), 7);

    // Rejected notifications stay inert
    eighth.show();
    assert!(!eighth.is_notification_shown());
    assert!(!eighth.is_notification_visible());
    eighth.close();
    assert_eq!(session.registry().count(window.id()), 7);
}

#[test]
fn test_stacked_notifications_do_not_overlap() {
    let (_event_loop, session, window) = setup();
    let size = Size::new(270, 80);
    let first = notify("one", window.clone()).size(size).build(&session);
    let second = notify("two", window.clone()).size(size).build(&session);

    assert_eq!(first.geometry(), Rect::new(510, 40, 270, 80));
    assert_eq!(second.geometry(), Rect::new(510, 140, 270, 80));

    let bottom = notify("three", window.clone())
        .position(Position::BottomLeft)
        .size(size)
        .build(&session);
    assert_eq!(
        bottom.geometry().origin(),
        placement(Position::BottomLeft, window.geometry(), size, 3)
    );
}

#[test]
fn test_delayed_show() {
    let (event_loop, session, window) = setup();
    let toast = notify("Later", window.clone()).delay_ms(500).build(&session);

    assert!(toast.is_notification_shown());
    assert!(!toast.is_notification_visible());
    assert_eq!(session.registry().count(window.id()), 0);

    event_loop.advance(ms(499));
    assert!(!toast.is_notification_visible());

    event_loop.advance(ms(1));
    assert!(toast.is_notification_visible());
    assert_eq!(session.registry().count(window.id()), 1);

    // Showing again is a no-op
    toast.show();
    assert_eq!(session.registry().count(window.id()), 1);
}

#[test]
fn test_countdown_with_fade_out_closes_after_grace() {
    let (event_loop, session, window) = setup();
    let toast = notify("Bye", window.clone()).duration_ms(3000).build(&session);

    event_loop.advance(TICK_INTERVAL * 99);
    assert_eq!(toast.elapsed(), ms(2970));
    assert!(toast.is_notification_visible());

    event_loop.advance(TICK_INTERVAL);
    assert_eq!(toast.elapsed(), ms(3000));
    assert_eq!(toast.progress(), 1.0);
    assert!(toast.is_notification_visible());
    assert!(toast.is_fading());

    // Progress ticker is gone: elapsed stays put
    event_loop.advance(ms(199));
    assert_eq!(toast.elapsed(), ms(3000));
    assert!(toast.is_notification_visible());
    assert!(toast.opacity() < 1.0);

    event_loop.advance(ms(1));
    assert!(toast.is_closed());
    assert!(!toast.is_notification_visible());
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_countdown_without_fade_out_closes_immediately() {
    let (event_loop, session, window) = setup();
    let toast = notify("Bye", window.clone())
        .duration_ms(3000)
        .fade_out(false)
        .build(&session);

    event_loop.advance(TICK_INTERVAL * 100);
    assert!(toast.is_closed());
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_fade_in_takes_18_ticks() {
    let (event_loop, session, window) = setup();
    let toast = notify("Fade", window).build(&session);
    assert!((toast.opacity() - 0.1).abs() < 1e-6);

    event_loop.advance(TICK_INTERVAL * 17);
    assert!(toast.opacity() < 1.0);
    assert!(toast.is_fading());

    event_loop.advance(TICK_INTERVAL);
    assert_eq!(toast.opacity(), 1.0);
    assert!(!toast.is_fading());
}

#[test]
fn test_fade_in_stops_at_configured_opacity() {
    let (event_loop, session, window) = setup();
    let toast = notify("Dim", window)
        .opacity(0.6)
        .opacity_increased_in(0.1)
        .build(&session);

    event_loop.advance(TICK_INTERVAL * 10);
    assert_eq!(toast.opacity(), 0.6);
    assert!(!toast.is_fading());
}

#[test]
fn test_close_twice_releases_once() {
    let (_event_loop, session, window) = setup();
    let first = notify("one", window.clone()).build(&session);
    let _second = notify("two", window.clone()).build(&session);
    assert_eq!(session.registry().count(window.id()), 2);

    first.close();
    first.close();
    assert_eq!(session.registry().count(window.id()), 1);
}

#[test]
fn test_hide_when_hidden_touches_no_timers() {
    let event_loop = EventLoop::new();
    let scheduler = Rc::new(CountingScheduler {
        inner: event_loop.clone(),
        timer_ops: Cell::new(0),
    });
    let session = Session::new(scheduler.clone());
    let window = Rc::new(Window::new("main", Rect::new(0, 0, 800, 600)));

    let toast = notify("Hide me", window).build(&session);
    toast.hide();
    assert!(!toast.is_notification_visible());

    let before = scheduler.timer_ops.get();
    toast.hide();
    assert_eq!(scheduler.timer_ops.get(), before);
}

#[test]
fn test_hide_stops_tickers_but_keeps_the_slot() {
    let (event_loop, session, window) = setup();
    let toast = notify("Paused", window.clone()).build(&session);

    event_loop.advance(TICK_INTERVAL * 10);
    toast.hide();
    let elapsed = toast.elapsed();
    event_loop.advance(TICK_INTERVAL * 10);
    assert_eq!(toast.elapsed(), elapsed);
    assert_eq!(session.registry().count(window.id()), 1);

    // The auto-close timer still releases the slot
    event_loop.run_until_idle(Duration::from_secs(10));
    assert!(toast.is_closed());
    assert_eq!(session.registry().count(window.id()), 0);
}

#[test]
fn test_close_before_delayed_reveal() {
    let (event_loop, session, window) = setup();
    let toast = notify("Never", window.clone())
        .delay_ms(500)
        .build(&session);

    toast.close();
    event_loop.run_until_idle(Duration::from_secs(10));
    assert!(!toast.is_notification_visible());
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_delayed_notifications_are_admitted_at_build_time() {
    let (event_loop, session, window) = setup();
    let toasts: Vec<_> = (0..3)
        .map(|_| {
            notify("queued", window.clone())
                .delay_ms(100)
                .notifications_limit(2)
                .build(&session)
        })
        .collect();

    assert!(toasts.iter().all(|toast| !toast.limit_exceeded()));
    event_loop.advance(ms(100));
    assert_eq!(session.registry().count(window.id()), 3);
}

#[test]
fn test_follows_moving_parent() {
    let (event_loop, session, window) = setup();
    let toast = notify("Sticky", window.clone())
        .size(Size::new(270, 80))
        .build(&session);
    assert_eq!(toast.geometry().origin(), Point::new(510, 40));

    window.set_geometry(Rect::new(200, 100, 1000, 700));
    event_loop.advance(TICK_INTERVAL);
    assert_eq!(toast.geometry().origin(), Point::new(910, 140));
}

#[test]
fn test_hidden_parent_closes_notification() {
    let (event_loop, session, window) = setup();
    let toast = notify("Gone", window.clone()).build(&session);

    window.set_visible(false);
    event_loop.advance(TICK_INTERVAL);
    assert!(toast.is_closed());
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_reveal_on_hidden_parent_releases_slot() {
    let (event_loop, session, window) = setup();
    window.set_visible(false);
    let toast = notify("Hidden", window.clone()).build(&session);

    assert!(toast.is_closed());
    assert!(!toast.is_notification_visible());
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_dropped_handle_still_runs_to_completion() {
    let (event_loop, session, window) = setup();
    notify("Fire and forget", window.clone()).build(&session);
    assert_eq!(session.registry().count(window.id()), 1);

    event_loop.run_until_idle(Duration::from_secs(10));
    assert_eq!(session.registry().count(window.id()), 0);
    assert!(event_loop.is_idle());
}

#[test]
fn test_parents_are_counted_separately() {
    let (_event_loop, session, window) = setup();
    let other = Rc::new(Window::new("other", Rect::new(0, 0, 400, 300)));

    notify("a", window.clone()).notifications_limit(1).build(&session);
    let second = notify("b", window.clone())
        .notifications_limit(1)
        .build(&session);
    let elsewhere = notify("c", other.clone())
        .notifications_limit(1)
        .build(&session);

    assert!(second.limit_exceeded());
    assert!(!elsewhere.limit_exceeded());
    assert_eq!(session.registry().count(other.id()), 1);
}

#[test]
fn test_surface_receives_state() {
    let (event_loop, session, window) = setup();
    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let toast = notify("Drawn", window)
        .size(Size::new(270, 80))
        .surface(surface.clone())
        .build(&session);

    assert!(surface.borrow().visible);
    assert_eq!(surface.borrow().geometry, toast.geometry());

    event_loop.run_until_idle(Duration::from_secs(10));
    assert!(surface.borrow().closed);
    assert!(!surface.borrow().visible);
}

#[test]
fn test_default_icons_resolve_from_session() {
    let event_loop = EventLoop::new();
    let icons = EmbeddedIcons::new().with(NotifyType::Info.icon_path(), vec![0x89u8, b'P', b'N', b'G']);
    let session = Session::headless(&event_loop).with_icons(Rc::new(icons));
    let window = Rc::new(Window::new("main", Rect::new(0, 0, 800, 600)));

    let info = notify("Info", window.clone())
        .kind(NotifyType::Info)
        .auto_show(false)
        .build(&session);
    assert!(info.content().unwrap().icon.is_loaded());

    // Missing resources degrade to an empty icon
    let success = notify("Success", window)
        .auto_show(false)
        .build(&session);
    assert!(!success.content().unwrap().icon.is_loaded());
}

#[test]
fn test_fade_out_below_floor_never_raises_opacity() {
    let (event_loop, session, window) = setup();
    let toast = notify("Faint", window.clone())
        .opacity(0.05)
        .fade_in(false)
        .duration_ms(300)
        .build(&session);
    assert_eq!(toast.opacity(), 0.05);

    // Countdown ends on the 10th progress tick
    event_loop.advance(TICK_INTERVAL * 10);
    assert!(toast.is_notification_visible());
    assert!(!toast.is_fading());

    for _ in 0..11 {
        event_loop.advance(TICK_INTERVAL);
        assert!(toast.opacity() <= 0.05, "opacity rose to {}", toast.opacity());
    }
    assert!(toast.is_closed());
    assert_eq!(session.registry().count(window.id()), 0);
}

#[test]
fn test_fade_in_below_floor_never_lowers_opacity() {
    let (event_loop, session, window) = setup();
    let toast = notify("Faint", window).opacity(0.05).build(&session);
    let start = toast.opacity();
    assert!((start - 0.1).abs() < 1e-6);

    event_loop.advance(TICK_INTERVAL);
    assert!(toast.opacity() >= start, "opacity fell to {}", toast.opacity());
    assert!(!toast.is_fading());

    event_loop.advance(TICK_INTERVAL * 3);
    assert!(toast.opacity() >= start);
}

#[test]
fn test_fade_out_from_partial_opacity() {
    let (event_loop, session, window) = setup();
    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let toast = notify("Half", window)
        .opacity(0.5)
        .fade_in(false)
        .duration_ms(300)
        .surface(surface.clone())
        .build(&session);
    assert_eq!(surface.borrow().opacity, 0.5);

    event_loop.advance(TICK_INTERVAL * 10);
    assert!(toast.is_fading());

    let mut last = toast.opacity();
    for _ in 0..8 {
        event_loop.advance(TICK_INTERVAL);
        let opacity = toast.opacity();
        assert!(opacity < last, "{opacity} did not drop below {last}");
        assert_eq!(surface.borrow().opacity, opacity);
        last = opacity;
    }
    assert!((last - 0.1).abs() < 1e-6);
    assert!(!toast.is_fading());
    assert!(!toast.is_closed());

    event_loop.run_until_idle(Duration::from_secs(1));
    assert!(toast.is_closed());
}

/// Surface that reads the notification back on every update
struct ReadingSurface {
    notify: Rc<RefCell<Option<Notify>>>,
    reads: Rc<Cell<usize>>,
}

impl ReadingSurface {
    fn read(&self) {
        if let Some(notify) = self.notify.borrow().as_ref() {
            let _ = (notify.opacity(), notify.geometry(), notify.is_notification_visible());
            self.reads.set(self.reads.get() + 1);
        }
    }
}

impl Surface for ReadingSurface {
    fn set_geometry(&mut self, _rect: Rect) {
        self.read();
    }

    fn set_opacity(&mut self, _opacity: f32) {
        self.read();
    }

    fn set_visible(&mut self, _visible: bool) {
        self.read();
    }

    fn close(&mut self) {
        self.read();
    }
}

#[test]
fn test_surface_may_query_the_notification() {
    let (event_loop, session, window) = setup();
    let slot = Rc::new(RefCell::new(None));
    let reads = Rc::new(Cell::new(0));
    let toast = notify("Observed", window)
        .auto_show(false)
        .surface(ReadingSurface {
            notify: slot.clone(),
            reads: reads.clone(),
        })
        .build(&session);
    *slot.borrow_mut() = Some(toast.clone());

    toast.show();
    event_loop.run_until_idle(Duration::from_secs(10));

    assert!(toast.is_closed());
    assert!(reads.get() > 0);
    slot.borrow_mut().take();
}

#[test]
fn test_clearing_the_loop_releases_pending_notifications() {
    let (event_loop, session, window) = setup();
    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let toast = notify("Waiting", window)
        .surface(surface.clone())
        .build(&session);

    // Hidden: only the auto-close timer still refers to it
    toast.hide();
    drop(toast);
    assert_eq!(Rc::strong_count(&surface), 2);

    event_loop.clear();
    assert_eq!(Rc::strong_count(&surface), 1);
}

#[test]
fn test_tickers_do_not_keep_a_closed_notification_alive() {
    let (event_loop, session, window) = setup();
    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let toast = notify("Short", window)
        .surface(surface.clone())
        .build(&session);

    event_loop.advance(TICK_INTERVAL * 3);
    toast.close();
    drop(toast);
    assert_eq!(Rc::strong_count(&surface), 1);
    assert!(event_loop.is_idle());
}
