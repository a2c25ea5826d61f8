//! Notification settings
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Nested tables merge field by field over their defaults.

use std::time::Duration;

use qflow_core::QFlowError;
use serde::{Deserialize, Serialize};

use crate::style::{NotifyType, Position, ThemeColor};

/// Which lifecycle events animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimatedEvents {
    pub fade_in: bool,
    pub fade_out: bool,
}

impl Default for AnimatedEvents {
    fn default() -> Self {
        Self {
            fade_in: true,
            fade_out: true,
        }
    }
}

/// Per-tick opacity steps of the fade animations
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationValues {
    pub opacity_increased_in: f32,
    pub opacity_reduction_out: f32,
}

impl Default for AnimationValues {
    fn default() -> Self {
        Self {
            opacity_increased_in: 0.05,
            opacity_reduction_out: 0.05,
        }
    }
}

/// Settings for a single notification
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Time until the notification closes on its own
    pub duration_ms: u64,
    /// Time between `show()` and the notification appearing
    pub delay_ms: u64,
    /// Maximum notifications shown at once for one parent window
    pub notifications_limit: u32,
    /// Longer messages are cut down to this many characters
    pub character_limit: usize,
    pub position: Position,
    #[serde(rename = "type")]
    pub kind: NotifyType,
    pub color: ThemeColor,
    /// Target window opacity (1.0 = opaque)
    pub opacity: f32,
    /// Show as soon as the notification is built
    pub auto_show: bool,
    pub animated_events: AnimatedEvents,
    pub animation_values: AnimationValues,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            delay_ms: 0,
            notifications_limit: 7,
            character_limit: 60,
            position: Position::TopRight,
            kind: NotifyType::Success,
            color: ThemeColor::Black,
            opacity: 1.0,
            auto_show: true,
            animated_events: AnimatedEvents::default(),
            animation_values: AnimationValues::default(),
        }
    }
}

impl NotifyConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Reject values a config file can get wrong
    pub fn validate(&self) -> qflow_core::Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(QFlowError::Config(format!(
                "opacity must be within 0.0..=1.0, got {}",
                self.opacity
            )));
        }
        let steps = [
            ("opacity_increased_in", self.animation_values.opacity_increased_in),
            ("opacity_reduction_out", self.animation_values.opacity_reduction_out),
        ];
        for (name, step) in steps {
            if step <= 0.0 {
                return Err(QFlowError::Config(format!(
                    "{name} must be positive, got {step}"
                )));
            }
        }
        Ok(())
    }
}
