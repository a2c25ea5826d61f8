//! Floating dialog with a dismissing backdrop
//!
//! The dialog is centered inside its parent each time it is shown, and a
//! backdrop covering the whole parent is shown and hidden together with it.
//! Clicking the backdrop closes the dialog.
//!
//! All geometry is parent-local.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use qflow_core::{Point, Rect, Size, Window};
//! use qflow_widgets::dialog::dialog;
//!
//! let window = Rc::new(Window::new("main", Rect::new(0, 0, 800, 600)));
//! let mut confirm = dialog(window.clone()).fixed_size(Size::new(300, 200)).build();
//!
//! confirm.show();
//! assert_eq!(confirm.geometry(), Rect::new(250, 200, 300, 200));
//!
//! confirm.click(Point::new(5, 5));
//! assert!(!confirm.is_visible());
//! ```

use std::rc::Rc;

use qflow_core::{HeadlessSurface, ParentWindow, Point, Rect, Size, Surface};

use crate::notify::ContentItem;
use crate::style::ThemeColor;

/// Default backdrop stylesheet
pub const DEFAULT_BACKDROP: &str = "background-color: rgba(0, 0, 0, 0.5);";
pub const DEFAULT_DIALOG_SIZE: Size = Size::new(300, 200);

/// Direction a nested layout arranges its items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Child content of a dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogChild {
    Widget(ContentItem),
    Layout {
        direction: LayoutDirection,
        items: Vec<ContentItem>,
    },
}

/// Overlay covering the parent while the dialog is open
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backdrop {
    pub style: String,
    pub geometry: Rect,
    pub visible: bool,
}

pub struct Dialog {
    parent: Rc<dyn ParentWindow>,
    color: ThemeColor,
    size: Size,
    geometry: Rect,
    visible: bool,
    backdrop: Backdrop,
    children: Vec<DialogChild>,
    surface: Box<dyn Surface>,
    backdrop_surface: Box<dyn Surface>,
}

impl Dialog {
    pub fn builder(parent: Rc<dyn ParentWindow>) -> DialogBuilder {
        DialogBuilder::new(parent)
    }

    /// Object name of the dialog frame
    pub fn style_name(&self) -> &'static str {
        self.color.dialog_style()
    }

    pub fn add_widget(&mut self, item: ContentItem) {
        self.children.push(DialogChild::Widget(item));
    }

    pub fn add_layout(&mut self, direction: LayoutDirection, items: Vec<ContentItem>) {
        self.children.push(DialogChild::Layout { direction, items });
    }

    pub fn children(&self) -> &[DialogChild] {
        &self.children
    }

    /// Center inside the parent's current bounds and show with the backdrop
    pub fn show(&mut self) {
        let bounds = self.parent.geometry();
        // Floored so oversized dialogs overhang evenly to the top-left
        let origin = Point::new(
            (bounds.width - self.size.width).div_euclid(2),
            (bounds.height - self.size.height).div_euclid(2),
        );
        self.geometry = Rect::from_origin_size(origin, self.size);
        self.backdrop.geometry = Rect::new(0, 0, bounds.width, bounds.height);

        self.backdrop.visible = true;
        self.backdrop_surface.set_geometry(self.backdrop.geometry);
        self.backdrop_surface.set_visible(true);

        self.visible = true;
        self.surface.set_geometry(self.geometry);
        self.surface.set_visible(true);
        tracing::debug!(parent = ?self.parent.id(), geometry = ?self.geometry, "dialog shown");
    }

    /// Hide the dialog and its backdrop
    pub fn close(&mut self) {
        self.backdrop.visible = false;
        self.backdrop_surface.set_visible(false);
        self.visible = false;
        self.surface.set_visible(false);
        tracing::debug!(parent = ?self.parent.id(), "dialog closed");
    }

    /// Route a click in parent-local coordinates
    ///
    /// Clicks on the backdrop outside the dialog close it. Returns whether the
    /// click was consumed.
    pub fn click(&mut self, point: Point) -> bool {
        if !self.visible {
            return false;
        }
        if self.geometry.contains(point) {
            return true;
        }
        if self.backdrop.geometry.contains(point) {
            self.close();
            return true;
        }
        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }
}

/// Builder for dialogs
pub struct DialogBuilder {
    parent: Rc<dyn ParentWindow>,
    color: ThemeColor,
    size: Size,
    backdrop_style: String,
    children: Vec<DialogChild>,
    surface: Option<Box<dyn Surface>>,
    backdrop_surface: Option<Box<dyn Surface>>,
}

impl DialogBuilder {
    pub fn new(parent: Rc<dyn ParentWindow>) -> Self {
        Self {
            parent,
            color: ThemeColor::White,
            size: DEFAULT_DIALOG_SIZE,
            backdrop_style: DEFAULT_BACKDROP.to_string(),
            children: Vec::new(),
            surface: None,
            backdrop_surface: None,
        }
    }

    pub fn color(mut self, color: ThemeColor) -> Self {
        self.color = color;
        self
    }

    pub fn fixed_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn backdrop(mut self, style: impl Into<String>) -> Self {
        self.backdrop_style = style.into();
        self
    }

    /// Initial child layout
    pub fn layout(mut self, direction: LayoutDirection, items: Vec<ContentItem>) -> Self {
        self.children.push(DialogChild::Layout { direction, items });
        self
    }

    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    pub fn backdrop_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.backdrop_surface = Some(Box::new(surface));
        self
    }

    /// Build the dialog, initially hidden
    pub fn build(self) -> Dialog {
        let bounds = self.parent.geometry();
        Dialog {
            parent: self.parent,
            color: self.color,
            size: self.size,
            geometry: Rect::from_origin_size(Point::default(), self.size),
            visible: false,
            backdrop: Backdrop {
                style: self.backdrop_style,
                geometry: Rect::new(0, 0, bounds.width, bounds.height),
                visible: false,
            },
            children: self.children,
            surface: self
                .surface
                .unwrap_or_else(|| Box::new(HeadlessSurface::default())),
            backdrop_surface: self
                .backdrop_surface
                .unwrap_or_else(|| Box::new(HeadlessSurface::default())),
        }
    }
}

/// Start building a dialog over `parent`
pub fn dialog(parent: Rc<dyn ParentWindow>) -> DialogBuilder {
    DialogBuilder::new(parent)
}
