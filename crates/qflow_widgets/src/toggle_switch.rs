//! Animated on/off switch
//!
//! A click flips the state and slides the thumb between its two extremes over
//! 150 ms. Painting is left to the host: [`ToggleSwitch::paint`] describes the
//! track and thumb for the current frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use qflow_animation::{Easing, Tween};
use qflow_core::{Color, Rect, Scheduler, Size, TimerId};

use crate::session::Session;

/// Duration of the thumb slide
pub const SLIDE_DURATION: Duration = Duration::from_millis(150);
/// Tick interval of the slide animation
pub const SLIDE_TICK: Duration = Duration::from_millis(16);
/// Gap between the thumb and the track edge
pub const THUMB_INSET: f32 = 2.0;

/// Track and thumb colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleColors {
    pub off: Color,
    pub on: Color,
    pub thumb: Color,
}

impl Default for ToggleColors {
    fn default() -> Self {
        Self {
            off: Color::rgb(0xcc, 0xcc, 0xcc),
            on: Color::rgb(0x00, 0xc8, 0x53),
            thumb: Color::WHITE,
        }
    }
}

/// Rounded track rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPaint {
    pub rect: Rect,
    pub radius: f32,
    pub color: Color,
}

/// Circular thumb
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbPaint {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    pub color: Color,
}

/// Draw commands for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchPaint {
    pub track: TrackPaint,
    pub thumb: ThumbPaint,
}

struct SwitchState {
    checked: bool,
    position: f32,
    slide: Option<Tween>,
    timer: Option<TimerId>,
}

struct Inner {
    size: Size,
    colors: ToggleColors,
    easing: Easing,
    state: RefCell<SwitchState>,
    scheduler: Rc<dyn Scheduler>,
}

impl Inner {
    fn off_position(&self) -> f32 {
        THUMB_INSET
    }

    fn on_position(&self) -> f32 {
        (self.size.width - self.size.height) as f32 + THUMB_INSET
    }

    fn animate(self: &Rc<Self>) {
        let previous = {
            let mut state = self.state.borrow_mut();
            let end = if state.checked {
                self.on_position()
            } else {
                self.off_position()
            };
            state.slide =
                Some(Tween::new(state.position, end, SLIDE_DURATION).with_easing(self.easing));
            state.timer.take()
        };
        if let Some(id) = previous {
            if self.scheduler.is_active(id) {
                self.scheduler.stop(id);
            }
        }

        let this = Rc::clone(self);
        let id = self
            .scheduler
            .start(SLIDE_TICK, Box::new(move || this.step()));
        self.state.borrow_mut().timer = Some(id);
    }

    fn step(&self) {
        let finished = {
            let mut state = self.state.borrow_mut();
            let Some(slide) = state.slide.as_mut() else {
                return;
            };
            let position = slide.tick(SLIDE_TICK);
            let running = slide.is_running();
            state.position = position;
            if running {
                None
            } else {
                state.slide = None;
                state.timer.take()
            }
        };
        if let Some(id) = finished {
            if self.scheduler.is_active(id) {
                self.scheduler.stop(id);
            }
        }
    }
}

/// Handle to a toggle switch; clones share state
#[derive(Clone)]
pub struct ToggleSwitch {
    inner: Rc<Inner>,
}

impl ToggleSwitch {
    pub fn builder() -> ToggleSwitchBuilder {
        ToggleSwitchBuilder::default()
    }

    /// Flip the state, as a pointer press does
    pub fn click(&self) {
        let checked = {
            let mut state = self.inner.state.borrow_mut();
            state.checked = !state.checked;
            state.checked
        };
        tracing::debug!(checked, "toggle switch clicked");
        self.inner.animate();
    }

    /// Set the state and slide the thumb to match
    pub fn set_checked(&self, checked: bool) {
        self.inner.state.borrow_mut().checked = checked;
        self.inner.animate();
    }

    pub fn is_checked(&self) -> bool {
        self.inner.state.borrow().checked
    }

    /// Current thumb x position
    pub fn circle_position(&self) -> f32 {
        self.inner.state.borrow().position
    }

    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().slide.is_some()
    }

    pub fn size(&self) -> Size {
        self.inner.size
    }

    /// Thumb positions for the off and on states
    pub fn extremes(&self) -> (f32, f32) {
        (self.inner.off_position(), self.inner.on_position())
    }

    pub fn paint(&self) -> SwitchPaint {
        let state = self.inner.state.borrow();
        let Size { width, height } = self.inner.size;
        let colors = self.inner.colors;
        SwitchPaint {
            track: TrackPaint {
                rect: Rect::new(0, 0, width, height),
                radius: height as f32 / 2.0,
                color: if state.checked { colors.on } else { colors.off },
            },
            thumb: ThumbPaint {
                x: state.position,
                y: THUMB_INSET,
                diameter: (height - 4) as f32,
                color: colors.thumb,
            },
        }
    }
}

/// Builder for toggle switches
#[derive(Clone, Debug)]
pub struct ToggleSwitchBuilder {
    size: Size,
    colors: ToggleColors,
    easing: Easing,
    checked: bool,
}

impl Default for ToggleSwitchBuilder {
    fn default() -> Self {
        Self {
            size: Size::new(50, 25),
            colors: ToggleColors::default(),
            easing: Easing::Linear,
            checked: false,
        }
    }
}

impl ToggleSwitchBuilder {
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Track colors for the off and on states
    pub fn bg_colors(mut self, off: Color, on: Color) -> Self {
        self.colors.off = off;
        self.colors.on = on;
        self
    }

    pub fn circle_color(mut self, color: Color) -> Self {
        self.colors.thumb = color;
        self
    }

    /// Curve of the thumb slide (linear by default)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Build the switch; the initial state animates in from the off position
    pub fn build(self, session: &Session) -> ToggleSwitch {
        let switch = ToggleSwitch {
            inner: Rc::new(Inner {
                size: self.size,
                colors: self.colors,
                easing: self.easing,
                state: RefCell::new(SwitchState {
                    checked: false,
                    position: THUMB_INSET,
                    slide: None,
                    timer: None,
                }),
                scheduler: Rc::clone(session.scheduler()),
            }),
        };
        switch.set_checked(self.checked);
        switch
    }
}
