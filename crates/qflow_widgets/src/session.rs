//! Application context shared by widgets
//!
//! A [`Session`] bundles the host scheduler, the notification registry and the
//! icon resolver. Widgets receive it explicitly at build time instead of
//! reaching for process-wide state, so two sessions never share counters.

use std::rc::Rc;

use qflow_core::{EmbeddedIcons, EventLoop, IconResolver, Scheduler};

use crate::registry::NotificationRegistry;

#[derive(Clone)]
pub struct Session {
    scheduler: Rc<dyn Scheduler>,
    registry: NotificationRegistry,
    icons: Rc<dyn IconResolver>,
}

impl Session {
    /// Session over a host scheduler, with no icon resources
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            registry: NotificationRegistry::new(),
            icons: Rc::new(EmbeddedIcons::new()),
        }
    }

    /// Session driven by a virtual-time [`EventLoop`]
    pub fn headless(event_loop: &EventLoop) -> Self {
        Self::new(Rc::new(event_loop.clone()))
    }

    /// Replace the icon resolver
    pub fn with_icons(mut self, icons: Rc<dyn IconResolver>) -> Self {
        self.icons = icons;
        self
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn registry(&self) -> &NotificationRegistry {
        &self.registry
    }

    pub fn icons(&self) -> &Rc<dyn IconResolver> {
        &self.icons
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
