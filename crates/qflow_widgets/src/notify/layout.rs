//! Notification content and placement

use qflow_core::{Icon, Point, Rect, Size};
use smallvec::SmallVec;

use crate::style::{NotifyType, Position, ThemeColor};

/// Gap between a notification and the parent's edge
pub const MARGIN: i32 = 20;
/// Gap between stacked notifications
pub const BETWEEN_MARGIN: i32 = 20;
/// Distance of the first top-anchored notification from the parent's top
pub const TOP_OFFSET: i32 = 40;

pub const MIN_WIDTH: i32 = 270;
pub const PROGRESS_BAR_HEIGHT: i32 = 10;
/// Container margins: left, top, right, bottom
pub const CONTAINER_MARGINS: (i32, i32, i32, i32) = (20, 10, 20, 10);
/// Space between the icon and the message
pub const CONTENT_SPACING: i32 = 8;
/// Space between rows of the container
pub const ROW_SPACING: i32 = 6;

const LINE_HEIGHT: i32 = 18;
const APPROX_CHAR_WIDTH: i32 = 7;

/// Marker appended to truncated messages
pub const ELLIPSIS: char = '…';

/// Cut `message` down to at most `limit` characters
///
/// Longer messages keep their first `limit - 1` characters followed by
/// [`ELLIPSIS`]. A limit of zero is treated as one.
pub fn truncate_message(message: &str, limit: usize) -> String {
    let limit = limit.max(1);
    if message.chars().count() <= limit {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(limit - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Top-left corner of a notification
///
/// `ordinal` is the 1-based rank among the parent's shown notifications.
/// Top anchored notifications stack downwards, bottom anchored ones upwards.
pub fn placement(position: Position, parent: Rect, size: Size, ordinal: u32) -> Point {
    let ordinal = ordinal as i32;
    let slot = size.height + BETWEEN_MARGIN;

    let x = if position.is_right() {
        parent.x + parent.width - size.width - MARGIN
    } else {
        parent.x + MARGIN
    };

    let y = if position.is_top() {
        parent.y + TOP_OFFSET + (ordinal - 1) * slot
    } else {
        parent.y + parent.height - ordinal * slot
    };

    Point::new(x, y)
}

/// Extra host element stacked under the progress bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub name: String,
    pub size: Size,
}

impl ContentItem {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Countdown indicator; `value` runs from zero to `maximum`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressBar {
    pub style: &'static str,
    pub maximum: u64,
    pub value: u64,
}

impl ProgressBar {
    pub fn fraction(&self) -> f32 {
        if self.maximum == 0 {
            return 1.0;
        }
        (self.value as f32 / self.maximum as f32).min(1.0)
    }
}

/// Everything a notification displays
#[derive(Clone, Debug)]
pub struct NotifyContent {
    pub icon: Icon,
    pub message: String,
    pub frame_style: &'static str,
    pub label_style: &'static str,
    pub progress: ProgressBar,
    pub items: SmallVec<[ContentItem; 2]>,
}

impl NotifyContent {
    pub fn new(
        icon: Icon,
        message: String,
        kind: NotifyType,
        color: ThemeColor,
        duration_ms: u64,
        items: impl IntoIterator<Item = ContentItem>,
    ) -> Self {
        Self {
            icon,
            message,
            frame_style: color.frame_style(),
            label_style: color.label_style(),
            progress: ProgressBar {
                style: kind.progress_bar_style(),
                maximum: duration_ms,
                value: 0,
            },
            items: items.into_iter().collect(),
        }
    }

    /// Size the container asks for inside a parent of `parent_width`
    ///
    /// Text is measured with a fixed average glyph width; hosts with real
    /// font metrics override the size on the builder.
    pub fn preferred_size(&self, parent_width: i32) -> Size {
        let (left, top, right, bottom) = CONTAINER_MARGINS;

        let text_width = self.message.chars().count() as i32 * APPROX_CHAR_WIDTH;
        let row_width = self.icon.size.width + CONTENT_SPACING + text_width;
        let items_width = self.items.iter().map(|item| item.size.width).max().unwrap_or(0);
        let mut width = (left + row_width.max(items_width) + right).max(MIN_WIDTH);
        if parent_width > 0 {
            width = width.min(parent_width);
        }

        let row_height = self.icon.size.height.max(LINE_HEIGHT);
        let items_height: i32 = self
            .items
            .iter()
            .map(|item| ROW_SPACING + item.size.height)
            .sum();
        let height =
            top + row_height + ROW_SPACING + PROGRESS_BAR_HEIGHT + items_height + bottom;

        Size::new(width, height)
    }
}
