//! QFlow Widgets
//!
//! Reusable widgets for desktop applications, driven by a host toolkit's
//! windows and timers:
//!
//! - **Notify**: stacked toast notifications with delay, countdown, fades and
//!   a per-window limit
//! - **Dialog**: centered floating dialog with a click-to-dismiss backdrop
//! - **ToggleSwitch**: animated on/off switch
//!
//! Widgets are built against a [`Session`], which carries the scheduler, the
//! notification registry and the icon resolver for one application.

pub mod dialog;
pub mod notify;
pub mod registry;
pub mod session;
pub mod style;
pub mod toggle_switch;

pub use dialog::{Dialog, DialogBuilder};
pub use notify::{Notify, NotifyBuilder, NotifyConfig};
pub use registry::NotificationRegistry;
pub use session::Session;
pub use style::{NotifyType, Position, ThemeColor};
pub use toggle_switch::{ToggleSwitch, ToggleSwitchBuilder};

pub mod prelude {
    pub use crate::dialog::{dialog, Dialog, LayoutDirection};
    pub use crate::notify::{notify, notify_error, notify_info, ContentItem, Notify, NotifyConfig};
    pub use crate::session::Session;
    pub use crate::style::{NotifyType, Position, ThemeColor};
    pub use crate::toggle_switch::ToggleSwitch;
}
