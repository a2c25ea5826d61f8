//! Closed style vocabularies shared by QFlow widgets
//!
//! Each enum maps to the object names a host stylesheet targets. Parsing from
//! strings (config files, CLI flags) fails fast with an error naming the
//! offending key.

use std::fmt;
use std::str::FromStr;

use qflow_core::{QFlowError, Size};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size of the built-in notification icons
pub const NOTIFY_ICON_SIZE: Size = Size::new(25, 25);

/// Notification kind: selects the default icon and progress bar color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotifyType {
    /// Green check icon and progress bar
    #[default]
    Success,
    /// Red close icon and progress bar
    Error,
    /// Blue information icon and progress bar
    Info,
}

impl NotifyType {
    pub const ALL: [NotifyType; 3] = [NotifyType::Success, NotifyType::Error, NotifyType::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyType::Success => "success",
            NotifyType::Error => "error",
            NotifyType::Info => "info",
        }
    }

    /// Resource path of the default icon
    pub fn icon_path(&self) -> &'static str {
        match self {
            NotifyType::Success => "notify/icons/check.png",
            NotifyType::Error => "notify/icons/close.png",
            NotifyType::Info => "notify/icons/information.png",
        }
    }

    /// Object name of the progress bar
    pub fn progress_bar_style(&self) -> &'static str {
        match self {
            NotifyType::Success => "success-QProgressBar",
            NotifyType::Error => "error-QProgressBar",
            NotifyType::Info => "info-QProgressBar",
        }
    }
}

impl FromStr for NotifyType {
    type Err = QFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotifyType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| QFlowError::UnknownType(s.to_string()))
    }
}

/// Theme color of a widget's frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Black frame with white labels
    #[default]
    Black,
    /// White frame with black labels
    White,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 2] = [ThemeColor::Black, ThemeColor::White];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::Black => "black",
            ThemeColor::White => "white",
        }
    }

    /// Object name of the notification frame
    pub fn frame_style(&self) -> &'static str {
        match self {
            ThemeColor::Black => "black-QFrame",
            ThemeColor::White => "white-QFrame",
        }
    }

    /// Object name of labels drawn on the frame
    pub fn label_style(&self) -> &'static str {
        match self {
            ThemeColor::Black => "white-QLabel",
            ThemeColor::White => "black-QLabel",
        }
    }

    /// Object name of the floating dialog
    pub fn dialog_style(&self) -> &'static str {
        match self {
            ThemeColor::Black => "black-floatingDialog",
            ThemeColor::White => "white-floatingDialog",
        }
    }
}

impl FromStr for ThemeColor {
    type Err = QFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeColor::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| QFlowError::UnknownColor(s.to_string()))
    }
}

/// Corner of the parent window notifications stack from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::TopRight,
        Position::TopLeft,
        Position::BottomRight,
        Position::BottomLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Position::TopRight | Position::BottomRight)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Position::TopRight | Position::TopLeft)
    }
}

impl FromStr for Position {
    type Err = QFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| QFlowError::UnknownPosition(s.to_string()))
    }
}

macro_rules! string_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let key = String::deserialize(deserializer)?;
                    key.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

string_keyed!(NotifyType, ThemeColor, Position);
