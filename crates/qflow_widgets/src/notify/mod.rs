//! Toast notifications anchored to a parent window
//!
//! A notification is admitted against the per-window limit when it is built,
//! revealed (optionally after a delay) and then driven entirely by scheduler
//! callbacks: one ticker keeps it glued to the moving parent, another advances
//! the countdown, and independent tickers run the fades. When the countdown
//! runs out it fades away and closes, releasing its slot in the registry.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use qflow_core::{EventLoop, ParentWindow, Rect, Window};
//! use qflow_widgets::notify::{notify, NotifyType};
//! use qflow_widgets::Session;
//!
//! let event_loop = EventLoop::new();
//! let session = Session::headless(&event_loop);
//! let window: Rc<dyn ParentWindow> = Rc::new(Window::new("main", Rect::new(0, 0, 800, 600)));
//!
//! let toast = notify("Saved", window.clone())
//!     .kind(NotifyType::Success)
//!     .duration_ms(3000)
//!     .build(&session);
//!
//! assert!(toast.is_notification_visible());
//! assert_eq!(session.registry().count(window.id()), 1);
//!
//! event_loop.run_until_idle(Duration::from_secs(10));
//! assert!(toast.is_closed());
//! assert_eq!(session.registry().count(window.id()), 0);
//! ```

pub mod config;
pub mod layout;

pub use config::{AnimatedEvents, AnimationValues, NotifyConfig};
pub use layout::{placement, truncate_message, ContentItem, NotifyContent, ProgressBar};

pub use crate::style::{NotifyType, Position, ThemeColor};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use qflow_animation::{Fade, FadeDirection};
use qflow_core::{
    HeadlessSurface, Icon, ParentWindow, Rect, Scheduler, Size, Surface, TimerId, WindowId,
};

use crate::registry::NotificationRegistry;
use crate::session::Session;
use crate::style::NOTIFY_ICON_SIZE;

/// Interval of the position, progress and fade tickers (about 60 per second)
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
/// Countdown advance per progress tick
pub const PROGRESS_STEP_MS: u64 = 30;
/// Time the fade-out gets before the notification closes
pub const FADE_OUT_GRACE: Duration = Duration::from_millis(200);

/// Timers owned by one notification
#[derive(Default)]
struct Timers {
    reveal: Option<TimerId>,
    position: Option<TimerId>,
    progress: Option<TimerId>,
    auto_close: Option<TimerId>,
    fade_in: Option<TimerId>,
    fade_out: Option<TimerId>,
    grace: Option<TimerId>,
}

impl Timers {
    fn into_ids(self) -> impl Iterator<Item = TimerId> {
        [
            self.reveal,
            self.position,
            self.progress,
            self.auto_close,
            self.fade_in,
            self.fade_out,
            self.grace,
        ]
        .into_iter()
        .flatten()
    }
}

struct NotifyState {
    config: NotifyConfig,
    message: String,
    /// `None` when the notification was rejected at admission
    content: Option<NotifyContent>,
    size: Size,
    geometry: Rect,
    opacity: f32,
    elapsed_ms: u64,
    ordinal: u32,
    shown: bool,
    visible: bool,
    closed: bool,
    limit_exceeded: bool,
    /// Counted in the registry; released exactly once on close
    holds_slot: bool,
    fade_in: Option<Fade>,
    fade_out: Option<Fade>,
    timers: Timers,
}

struct Inner {
    state: RefCell<NotifyState>,
    /// Only borrowed while `state` is not, so surfaces can query the handle
    surface: RefCell<Box<dyn Surface>>,
    parent: Rc<dyn ParentWindow>,
    scheduler: Rc<dyn Scheduler>,
    registry: NotificationRegistry,
}

impl Inner {
    fn stop_timer(&self, id: TimerId) {
        if self.scheduler.is_active(id) {
            self.scheduler.stop(id);
        }
    }

    /// Periodic work holds a weak handle; the one-shot timers (reveal,
    /// auto-close, fade-out grace) keep the notification alive.
    fn start_ticker(self: &Rc<Self>, tick: fn(&Rc<Inner>)) -> TimerId {
        let weak: Weak<Inner> = Rc::downgrade(self);
        self.scheduler.start(
            TICK_INTERVAL,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    tick(&inner);
                }
            }),
        )
    }

    fn show(self: &Rc<Self>) {
        let delay = {
            let mut state = self.state.borrow_mut();
            if state.shown || state.limit_exceeded || state.closed {
                return;
            }
            state.shown = true;
            state.config.delay()
        };

        if delay.is_zero() {
            self.reveal();
            return;
        }

        let this = Rc::clone(self);
        let id = self
            .scheduler
            .single_shot(delay, Box::new(move || this.reveal()));
        self.state.borrow_mut().timers.reveal = Some(id);
        tracing::debug!(parent = ?self.parent.id(), ?delay, "notification reveal scheduled");
    }

    fn reveal(self: &Rc<Self>) {
        {
            let mut state = self.state.borrow_mut();
            state.timers.reveal = None;
            if state.closed || state.visible {
                return;
            }
        }

        let ordinal = self.registry.increment(self.parent.id());
        {
            let mut state = self.state.borrow_mut();
            state.ordinal = ordinal;
            state.holds_slot = true;
        }

        self.update_position();
        if self.state.borrow().closed {
            return;
        }

        let position = self.start_ticker(|inner| inner.update_position());
        let progress = self.start_ticker(|inner| inner.update_progress());
        let duration = self.state.borrow().config.duration();
        let this = Rc::clone(self);
        let auto_close = self
            .scheduler
            .single_shot(duration, Box::new(move || this.close()));

        let (fade_in_enabled, opacity) = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            state.timers.position = Some(position);
            state.timers.progress = Some(progress);
            state.timers.auto_close = Some(auto_close);

            let target = state.config.opacity;
            state.opacity = target;
            if state.config.animated_events.fade_in {
                let fade = Fade::fade_in(target, state.config.animation_values.opacity_increased_in);
                state.opacity = fade.opacity();
                state.fade_in = Some(fade);
            }
            (state.config.animated_events.fade_in, state.opacity)
        };

        if fade_in_enabled {
            let id = self.start_ticker(|inner| inner.step_fade(FadeDirection::In));
            self.state.borrow_mut().timers.fade_in = Some(id);
        }

        let geometry = {
            let mut state = self.state.borrow_mut();
            state.visible = true;
            state.geometry
        };
        {
            let mut surface = self.surface.borrow_mut();
            surface.set_opacity(opacity);
            surface.set_visible(true);
        }
        tracing::debug!(
            parent = ?self.parent.id(),
            ordinal,
            ?geometry,
            "notification revealed"
        );
    }

    fn update_position(self: &Rc<Self>) {
        if !self.parent.is_visible() {
            tracing::debug!(parent = ?self.parent.id(), "parent window hidden; closing notification");
            self.close();
            return;
        }

        let bounds = self.parent.geometry();
        let geometry = {
            let mut state = self.state.borrow_mut();
            let origin = placement(state.config.position, bounds, state.size, state.ordinal);
            state.geometry = Rect::from_origin_size(origin, state.size);
            state.geometry
        };
        self.surface.borrow_mut().set_geometry(geometry);
        tracing::trace!(?geometry, "notification position updated");
    }

    fn update_progress(self: &Rc<Self>) {
        let finished = {
            let mut state = self.state.borrow_mut();
            state.elapsed_ms += PROGRESS_STEP_MS;
            let elapsed = state.elapsed_ms;
            if let Some(content) = state.content.as_mut() {
                content.progress.value = elapsed.min(content.progress.maximum);
            }
            tracing::trace!(elapsed_ms = elapsed, "notification progress");
            elapsed >= state.config.duration_ms
        };
        if !finished {
            return;
        }

        let (progress, fade_out) = {
            let mut state = self.state.borrow_mut();
            (
                state.timers.progress.take(),
                state.config.animated_events.fade_out,
            )
        };
        if let Some(id) = progress {
            self.stop_timer(id);
        }

        if fade_out {
            self.start_fade_out();
            let this = Rc::clone(self);
            let grace = self
                .scheduler
                .single_shot(FADE_OUT_GRACE, Box::new(move || this.close()));
            self.state.borrow_mut().timers.grace = Some(grace);
        } else {
            self.close();
        }
    }

    fn start_fade_out(self: &Rc<Self>) {
        let (fade_in, running) = {
            let mut state = self.state.borrow_mut();
            let fade = Fade::fade_out(
                state.opacity,
                state.config.animation_values.opacity_reduction_out,
            );
            let running = fade.is_running();
            state.fade_out = running.then_some(fade);
            state.fade_in = None;
            (state.timers.fade_in.take(), running)
        };
        // The fade-out takes over from an unfinished fade-in
        if let Some(id) = fade_in {
            self.stop_timer(id);
        }

        if !running {
            tracing::trace!("opacity already at the fade-out floor");
            return;
        }
        let id = self.start_ticker(|inner| inner.step_fade(FadeDirection::Out));
        self.state.borrow_mut().timers.fade_out = Some(id);
    }

    fn step_fade(self: &Rc<Self>, direction: FadeDirection) {
        let (opacity, finished) = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let (fade, timer) = match direction {
                FadeDirection::In => (&mut state.fade_in, &mut state.timers.fade_in),
                FadeDirection::Out => (&mut state.fade_out, &mut state.timers.fade_out),
            };
            let Some(fade) = fade.as_mut() else {
                return;
            };

            let opacity = fade.tick();
            let finished = if fade.is_running() { None } else { timer.take() };
            state.opacity = opacity;
            (opacity, finished)
        };

        self.surface.borrow_mut().set_opacity(opacity);
        if let Some(id) = finished {
            tracing::trace!(?direction, "fade finished");
            self.stop_timer(id);
        }
    }

    fn hide(&self) {
        let tickers = {
            let mut state = self.state.borrow_mut();
            if !state.visible {
                return;
            }
            state.visible = false;
            [state.timers.position.take(), state.timers.progress.take()]
        };

        self.surface.borrow_mut().set_visible(false);
        for id in tickers.into_iter().flatten() {
            self.stop_timer(id);
        }
        tracing::debug!(parent = ?self.parent.id(), "notification hidden");
    }

    fn close(&self) {
        let release = {
            let mut state = self.state.borrow_mut();
            if state.closed {
                return;
            }
            state.closed = true;
            std::mem::take(&mut state.holds_slot)
        };

        if release {
            let remaining = self.registry.decrement(self.parent.id());
            tracing::debug!(parent = ?self.parent.id(), remaining, "notification closed");
        }

        self.hide();

        let timers = {
            let mut state = self.state.borrow_mut();
            state.fade_in = None;
            state.fade_out = None;
            std::mem::take(&mut state.timers)
        };
        self.surface.borrow_mut().close();
        for id in timers.into_ids() {
            self.stop_timer(id);
        }
    }
}

/// Handle to a notification
///
/// Clones refer to the same notification. A revealed notification keeps
/// itself alive through its timers, so dropping every handle does not cut it
/// short.
#[derive(Clone)]
pub struct Notify {
    inner: Rc<Inner>,
}

impl Notify {
    pub fn builder(message: impl Into<String>, parent: Rc<dyn ParentWindow>) -> NotifyBuilder {
        NotifyBuilder::new(message, parent)
    }

    /// Show the notification, after the configured delay if any
    ///
    /// Does nothing if it was already shown, was rejected at admission or has
    /// been closed.
    pub fn show(&self) {
        self.inner.show();
    }

    /// Hide without closing; stops the position and progress tickers
    pub fn hide(&self) {
        self.inner.hide();
    }

    /// Dismiss the notification and release its registry slot
    ///
    /// Safe to call any number of times.
    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_notification_visible(&self) -> bool {
        self.inner.state.borrow().visible
    }

    /// Whether `show()` has been accepted
    pub fn is_notification_shown(&self) -> bool {
        self.inner.state.borrow().shown
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.borrow().closed
    }

    /// True when the parent was already at its limit at build time
    pub fn limit_exceeded(&self) -> bool {
        self.inner.state.borrow().limit_exceeded
    }

    /// Message after truncation
    pub fn message(&self) -> String {
        self.inner.state.borrow().message.clone()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.inner.state.borrow().elapsed_ms)
    }

    /// Countdown progress from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        let state = self.inner.state.borrow();
        match state.config.duration_ms {
            0 => 1.0,
            duration => (state.elapsed_ms as f32 / duration as f32).min(1.0),
        }
    }

    pub fn opacity(&self) -> f32 {
        self.inner.state.borrow().opacity
    }

    /// Last placement applied to the surface
    pub fn geometry(&self) -> Rect {
        self.inner.state.borrow().geometry
    }

    pub fn size(&self) -> Size {
        self.inner.state.borrow().size
    }

    /// 1-based stacking rank, zero until revealed
    pub fn ordinal(&self) -> u32 {
        self.inner.state.borrow().ordinal
    }

    pub fn is_fading(&self) -> bool {
        let state = self.inner.state.borrow();
        state.timers.fade_in.is_some() || state.timers.fade_out.is_some()
    }

    pub fn parent_id(&self) -> WindowId {
        self.inner.parent.id()
    }

    pub fn config(&self) -> NotifyConfig {
        self.inner.state.borrow().config.clone()
    }

    /// Displayed content; `None` for notifications rejected at admission
    pub fn content(&self) -> Option<NotifyContent> {
        self.inner.state.borrow().content.clone()
    }
}

impl fmt::Debug for Notify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Notify")
            .field("parent", &self.inner.parent.id())
            .field("message", &state.message)
            .field("shown", &state.shown)
            .field("visible", &state.visible)
            .field("closed", &state.closed)
            .field("limit_exceeded", &state.limit_exceeded)
            .field("ordinal", &state.ordinal)
            .finish()
    }
}

/// Builder for notifications
pub struct NotifyBuilder {
    message: String,
    parent: Rc<dyn ParentWindow>,
    config: NotifyConfig,
    custom_icon: Option<Icon>,
    items: Vec<ContentItem>,
    surface: Option<Box<dyn Surface>>,
    size: Option<Size>,
}

impl NotifyBuilder {
    pub fn new(message: impl Into<String>, parent: Rc<dyn ParentWindow>) -> Self {
        Self {
            message: message.into(),
            parent,
            config: NotifyConfig::default(),
            custom_icon: None,
            items: Vec::new(),
            surface: None,
            size: None,
        }
    }

    /// Replace every setting at once
    pub fn config(mut self, config: NotifyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.config.duration_ms = ms;
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.config.delay_ms = ms;
        self
    }

    pub fn kind(mut self, kind: NotifyType) -> Self {
        self.config.kind = kind;
        self
    }

    pub fn color(mut self, color: ThemeColor) -> Self {
        self.config.color = color;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.config.position = position;
        self
    }

    pub fn notifications_limit(mut self, limit: u32) -> Self {
        self.config.notifications_limit = limit;
        self
    }

    pub fn character_limit(mut self, limit: usize) -> Self {
        self.config.character_limit = limit;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.config.opacity = opacity;
        self
    }

    pub fn fade_in(mut self, enabled: bool) -> Self {
        self.config.animated_events.fade_in = enabled;
        self
    }

    pub fn fade_out(mut self, enabled: bool) -> Self {
        self.config.animated_events.fade_out = enabled;
        self
    }

    pub fn opacity_increased_in(mut self, step: f32) -> Self {
        self.config.animation_values.opacity_increased_in = step;
        self
    }

    pub fn opacity_reduction_out(mut self, step: f32) -> Self {
        self.config.animation_values.opacity_reduction_out = step;
        self
    }

    pub fn auto_show(mut self, auto_show: bool) -> Self {
        self.config.auto_show = auto_show;
        self
    }

    /// Use this icon instead of the type's default
    pub fn custom_icon(mut self, icon: Icon) -> Self {
        self.custom_icon = Some(icon);
        self
    }

    /// Append a host element below the progress bar
    pub fn item(mut self, item: ContentItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = ContentItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Native element the notification drives (headless by default)
    ///
    /// The surface may read the notification through a [`Notify`] handle
    /// while it is being updated, but must not call back into the surface.
    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Size measured by the host, overriding the built-in estimate
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Build the notification, showing it right away when `auto_show` is set
    pub fn build(self, session: &Session) -> Notify {
        let config = self.config;
        let parent = self.parent;
        let parent_id = parent.id();
        let message = truncate_message(&self.message, config.character_limit);

        let admitted = session
            .registry()
            .try_admit(parent_id, config.notifications_limit);

        let content = if admitted {
            let icon = self.custom_icon.unwrap_or_else(|| {
                let path = config.kind.icon_path();
                session
                    .icons()
                    .resolve(path, NOTIFY_ICON_SIZE)
                    .unwrap_or_else(|err| {
                        tracing::warn!(%err, "using an empty notification icon");
                        Icon::empty(path, NOTIFY_ICON_SIZE)
                    })
            });
            Some(NotifyContent::new(
                icon,
                message.clone(),
                config.kind,
                config.color,
                config.duration_ms,
                self.items,
            ))
        } else {
            tracing::debug!(
                parent = ?parent_id,
                limit = config.notifications_limit,
                "notification limit reached; not displaying"
            );
            None
        };

        let size = match (self.size, &content) {
            (Some(size), _) => size,
            (None, Some(content)) => content.preferred_size(parent.geometry().width),
            (None, None) => Size::default(),
        };

        let auto_show = config.auto_show;
        let state = NotifyState {
            config,
            message,
            content,
            size,
            geometry: Rect::default(),
            opacity: 1.0,
            elapsed_ms: 0,
            ordinal: 0,
            shown: false,
            visible: false,
            closed: false,
            limit_exceeded: !admitted,
            holds_slot: false,
            fade_in: None,
            fade_out: None,
            timers: Timers::default(),
        };

        let notify = Notify {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                surface: RefCell::new(
                    self.surface
                        .unwrap_or_else(|| Box::new(HeadlessSurface::default())),
                ),
                parent,
                scheduler: Rc::clone(session.scheduler()),
                registry: session.registry().clone(),
            }),
        };

        if admitted && auto_show {
            notify.show();
        }
        notify
    }
}

/// Start building a notification for `parent`
pub fn notify(message: impl Into<String>, parent: Rc<dyn ParentWindow>) -> NotifyBuilder {
    NotifyBuilder::new(message, parent)
}

/// Convenience builder for error notifications
pub fn notify_error(message: impl Into<String>, parent: Rc<dyn ParentWindow>) -> NotifyBuilder {
    NotifyBuilder::new(message, parent).kind(NotifyType::Error)
}

/// Convenience builder for informational notifications
pub fn notify_info(message: impl Into<String>, parent: Rc<dyn ParentWindow>) -> NotifyBuilder {
    NotifyBuilder::new(message, parent).kind(NotifyType::Info)
}
