//! Headless run of the widgets on the virtual event loop

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use qflow_core::{EventLoop, ParentWindow, Point, Window};
use qflow_widgets::dialog::dialog;
use qflow_widgets::notify::{notify, FADE_OUT_GRACE};
use qflow_widgets::{Notify, Session, ToggleSwitch};

use crate::config::QFlowConfig;

/// Virtual time allowed beyond the configured delay and duration
const SETTLE_TIME: Duration = Duration::from_secs(5);

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub admitted: usize,
    pub rejected: usize,
    /// Registry count left for the window once the loop went idle
    pub remaining: u32,
    pub virtual_time: Duration,
    pub dialog_dismissed: bool,
    pub switch_checked: bool,
}

/// Spawn `count` notifications plus a dialog and a toggle switch, then run
/// the loop until every timer has finished
pub fn run(config: &QFlowConfig, count: u32, message: &str) -> Result<Summary> {
    let event_loop = EventLoop::new();
    let session = Session::headless(&event_loop);
    let window = Rc::new(Window::new(
        config.window.title.clone(),
        config.window.geometry(),
    ));
    let parent: Rc<dyn ParentWindow> = window.clone();

    let toasts: Vec<Notify> = (1..=count)
        .map(|i| {
            notify(format!("{message} #{i}"), parent.clone())
                .config(config.notify.clone())
                .build(&session)
        })
        .collect();

    let mut rejected = 0;
    for toast in &toasts {
        if toast.limit_exceeded() {
            rejected += 1;
            tracing::warn!(message = %toast.message(), "notification rejected by the limit");
            continue;
        }
        toast.show();
        tracing::info!(
            message = %toast.message(),
            ordinal = toast.ordinal(),
            geometry = ?toast.geometry(),
            "notification built"
        );
    }

    let mut confirm = dialog(parent.clone()).color(config.notify.color).build();
    confirm.show();
    tracing::info!(geometry = ?confirm.geometry(), style = confirm.style_name(), "dialog shown");
    let dialog_dismissed = confirm.click(Point::new(0, 0)) && !confirm.is_visible();

    let switch = ToggleSwitch::builder().build(&session);
    switch.click();

    let limit = config.notify.delay() + config.notify.duration() + FADE_OUT_GRACE + SETTLE_TIME;
    let virtual_time = event_loop.run_until_idle(limit);
    if !event_loop.is_idle() {
        anyhow::bail!(
            "{} timers still pending after {:?} of virtual time",
            event_loop.pending(),
            limit
        );
    }

    let summary = Summary {
        admitted: toasts.len() - rejected,
        rejected,
        remaining: session.registry().count(window.id()),
        virtual_time,
        dialog_dismissed,
        switch_checked: switch.is_checked(),
    };
    tracing::debug!(?summary, "simulation finished");
    Ok(summary)
}
