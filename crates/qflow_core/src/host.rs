//! Host toolkit collaborators
//!
//! QFlow widgets do not draw or own native windows themselves. They read the
//! geometry of a [`ParentWindow`] and push their own placement, opacity and
//! visibility into a [`Surface`]. The headless implementations here back the
//! CLI and the test suites.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;

/// Stable identity of a parent window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl WindowId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A window that hosts widgets
pub trait ParentWindow {
    fn id(&self) -> WindowId;

    /// Current bounds in screen coordinates
    fn geometry(&self) -> Rect;

    /// False while minimized or hidden
    fn is_visible(&self) -> bool;
}

/// The native element a widget drives
pub trait Surface {
    fn set_geometry(&mut self, rect: Rect);
    fn set_opacity(&mut self, opacity: f32);
    fn set_visible(&mut self, visible: bool);

    /// Release the native element
    fn close(&mut self);
}

/// Lets the host keep a handle to a surface it gives away
impl<S: Surface> Surface for Rc<RefCell<S>> {
    fn set_geometry(&mut self, rect: Rect) {
        self.borrow_mut().set_geometry(rect);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.borrow_mut().set_opacity(opacity);
    }

    fn set_visible(&mut self, visible: bool) {
        self.borrow_mut().set_visible(visible);
    }

    fn close(&mut self) {
        self.borrow_mut().close();
    }
}

/// Headless top-level window with mutable bounds
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    title: String,
    geometry: Cell<Rect>,
    visible: Cell<bool>,
}

impl Window {
    pub fn new(title: impl Into<String>, geometry: Rect) -> Self {
        Self {
            id: WindowId::next(),
            title: title.into(),
            geometry: Cell::new(geometry),
            visible: Cell::new(true),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_geometry(&self, geometry: Rect) {
        self.geometry.set(geometry);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

impl ParentWindow for Window {
    fn id(&self) -> WindowId {
        self.id
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// Surface that only remembers what was applied to it
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSurface {
    pub geometry: Rect,
    pub opacity: f32,
    pub visible: bool,
    pub closed: bool,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            geometry: Rect::default(),
            opacity: 1.0,
            visible: false,
            closed: false,
        }
    }
}

impl Surface for HeadlessSurface {
    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn close(&mut self) {
        self.visible = false;
        self.closed = true;
    }
}
