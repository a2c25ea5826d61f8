//! QFlow Core
//!
//! Foundational pieces shared by every QFlow widget:
//!
//! - **Geometry**: integer points, sizes and rectangles in host coordinates
//! - **Scheduler**: periodic and one-shot callbacks driven by the host event loop
//! - **Host collaborators**: parent windows and the surfaces widgets draw into
//! - **Icons**: resource resolution from embedded tables or loose files
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use qflow_core::{EventLoop, Scheduler};
//!
//! let event_loop = EventLoop::new();
//! let timer = event_loop.single_shot(Duration::from_millis(500), Box::new(|| {}));
//!
//! event_loop.advance(Duration::from_millis(500));
//! assert!(!event_loop.is_active(timer));
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod host;
pub mod icon;
pub mod scheduler;

pub use color::Color;
pub use error::{QFlowError, Result};
pub use geometry::{Point, Rect, Size};
pub use host::{HeadlessSurface, ParentWindow, Surface, Window, WindowId};
pub use icon::{EmbeddedIcons, FileIcons, Icon, IconResolver};
pub use scheduler::{Callback, EventLoop, Scheduler, TimerId};
