//! QFlow Animation
//!
//! Small, explicit animation state objects advanced by scheduler ticks.
//!
//! - **Easing**: progress curves for tweens
//! - **Tween**: duration-based interpolation between two values
//! - **Fade**: fixed-step opacity fades for fade-in / fade-out effects

pub mod easing;
pub mod fade;
pub mod tween;

pub use easing::{Curve, Easing};
pub use fade::{Fade, FadeDirection, FADE_FLOOR};
pub use tween::Tween;
