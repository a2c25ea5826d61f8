//! Time-based interpolation between two values

use std::time::Duration;

use crate::easing::Easing;

/// Interpolates from `start` to `end` over a fixed duration
///
/// The value always lies between the two endpoints, whatever the elapsed time.
#[derive(Clone, Debug)]
pub struct Tween {
    start: f32,
    end: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    running: bool,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
            running: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn end_value(&self) -> f32 {
        self.end
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the duration that has elapsed
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.elapsed >= self.duration {
            return self.end;
        }
        let t = self.easing.apply(self.progress());
        let value = self.start + (self.end - self.start) * t;
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        value.clamp(lo, hi)
    }

    /// Advance by `dt`, returning the new value
    pub fn tick(&mut self, dt: Duration) -> f32 {
        if self.running {
            self.elapsed = (self.elapsed + dt).min(self.duration);
            if self.elapsed >= self.duration {
                self.running = false;
            }
        }
        self.value()
    }

    /// Jump to the end value
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
        self.running = false;
    }
}
