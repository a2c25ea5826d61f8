//! Opacity fades advanced one tick at a time
//!
//! A [`Fade`] owns its whole state (start, step, target, tick count), so the
//! timer driving it only has to call [`Fade::tick`] and apply the result.
//! Opacity is computed from the tick count rather than accumulated, which
//! keeps the number of ticks to reach the target exact.

/// Opacity a fade-in starts from and a fade-out stops at
pub const FADE_FLOOR: f32 = 0.1;

/// Tolerance when comparing against the target opacity
const EPSILON: f64 = 1e-4;

/// Which way the opacity moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

#[derive(Clone, Debug)]
pub struct Fade {
    direction: FadeDirection,
    start: f32,
    step: f32,
    target: f32,
    ticks: u32,
    opacity: f32,
    running: bool,
}

impl Fade {
    /// Fade from [`FADE_FLOOR`] up to `target`, adding `step` per tick
    pub fn fade_in(target: f32, step: f32) -> Self {
        Self::new(FadeDirection::In, FADE_FLOOR, target, step)
    }

    /// Fade from `from` down to [`FADE_FLOOR`], removing `step` per tick
    ///
    /// Starting at or below the floor yields a finished fade that keeps `from`.
    pub fn fade_out(from: f32, step: f32) -> Self {
        let mut fade = Self::new(FadeDirection::Out, from, FADE_FLOOR, step);
        if f64::from(from) <= f64::from(FADE_FLOOR) + EPSILON {
            fade.opacity = from;
            fade.running = false;
        }
        fade
    }

    fn new(direction: FadeDirection, start: f32, target: f32, step: f32) -> Self {
        let mut fade = Self {
            direction,
            start,
            step,
            target,
            ticks: 0,
            opacity: start,
            running: true,
        };
        // A non-positive step would never arrive
        if step <= 0.0 {
            tracing::warn!(step, ?direction, "fade step must be positive; jumping to target");
            if fade.moves_toward(target) {
                fade.opacity = target;
            }
            fade.running = false;
        }
        fade
    }

    /// Whether setting `opacity` keeps moving in the fade's direction
    fn moves_toward(&self, opacity: f32) -> bool {
        match self.direction {
            FadeDirection::In => opacity >= self.start,
            FadeDirection::Out => opacity <= self.start,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one tick and return the opacity to apply
    pub fn tick(&mut self) -> f32 {
        if !self.running {
            return self.opacity;
        }

        self.ticks += 1;
        let delta = f64::from(self.step) * f64::from(self.ticks);
        let start = f64::from(self.start);
        let target = f64::from(self.target);

        let (raw, done) = match self.direction {
            FadeDirection::In => {
                let raw = start + delta;
                (raw, raw >= target - EPSILON)
            }
            FadeDirection::Out => {
                let raw = start - delta;
                (raw, raw <= target + EPSILON)
            }
        };

        if !done {
            self.opacity = raw as f32;
            return self.opacity;
        }

        // Snapping to a target on the wrong side of the start would reverse
        // the fade; keep the stepped value instead.
        self.opacity = if self.moves_toward(self.target) {
            self.target
        } else {
            match self.direction {
                FadeDirection::In => raw as f32,
                FadeDirection::Out => raw.max(0.0) as f32,
            }
        };
        self.running = false;
        self.opacity
    }
}
