//! Timer scheduling
//!
//! Widgets never block: every delayed or recurring piece of work is handed to a
//! [`Scheduler`] as a callback and re-invoked later by the host event loop.
//!
//! [`EventLoop`] is the reference implementation. It runs on virtual time, so
//! the host (or a test) decides how far the clock moves with
//! [`EventLoop::advance`]. Callbacks are dispatched on the caller's thread and
//! may start or stop any timer, including their own, while they run.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a periodic or one-shot timer
    pub struct TimerId;
}

/// Work scheduled on the event loop
pub type Callback = Box<dyn FnMut()>;

/// Host timer primitive consumed by widgets
pub trait Scheduler {
    /// Invoke `callback` every `interval` until stopped
    fn start(&self, interval: Duration, callback: Callback) -> TimerId;

    /// Invoke `callback` once after `delay`
    fn single_shot(&self, delay: Duration, callback: Callback) -> TimerId;

    /// Stop a timer. Unknown, fired or already-stopped ids are ignored.
    fn stop(&self, id: TimerId);

    /// Whether the timer will fire again
    fn is_active(&self, id: TimerId) -> bool;

    /// Current scheduler time
    fn now(&self) -> Duration;
}

/// Smallest interval a periodic timer may use
const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct TimerEntry {
    due: Duration,
    interval: Option<Duration>,
    /// Taken out while the callback runs
    callback: Option<Callback>,
    seq: u64,
}

#[derive(Default)]
struct LoopState {
    now: Duration,
    timers: SlotMap<TimerId, TimerEntry>,
    next_seq: u64,
}

impl LoopState {
    fn insert(&mut self, due: Duration, interval: Option<Duration>, callback: Callback) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(TimerEntry {
            due,
            interval,
            callback: Some(callback),
            seq,
        })
    }

    /// Earliest timer due at or before `limit`, ties broken by creation order
    fn next_due(&self, limit: Duration) -> Option<(TimerId, Duration)> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.callback.is_some() && entry.due <= limit)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(id, entry)| (id, entry.due))
    }
}

/// Deterministic single-threaded event loop over virtual time
///
/// Cloning yields another handle to the same loop.
#[derive(Clone, Default)]
pub struct EventLoop {
    state: Rc<RefCell<LoopState>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Move the clock forward by `delta`, firing every timer that falls due
    ///
    /// Returns the number of callbacks dispatched.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.state.borrow().now + delta;
        let mut fired = 0;

        while let Some(id) = self.take_due(target) {
            self.dispatch(id);
            fired += 1;
        }

        self.state.borrow_mut().now = target;
        fired
    }

    /// Fire timers until none remain or `limit` of virtual time has passed
    ///
    /// Returns the virtual time that elapsed.
    pub fn run_until_idle(&self, limit: Duration) -> Duration {
        let start = self.now();
        let deadline = start + limit;

        loop {
            let next = {
                let state = self.state.borrow();
                state.next_due(deadline).map(|(_, due)| due)
            };
            match next {
                Some(due) => {
                    let delta = due.saturating_sub(self.now());
                    self.advance(delta);
                }
                None => break,
            }
        }

        if !self.is_idle() {
            self.state.borrow_mut().now = deadline;
        }
        self.now() - start
    }

    /// Drop every pending timer along with its callback
    ///
    /// Hosts call this when shutting the loop down so that callbacks owning
    /// widget handles are released. Returns the number of timers removed.
    pub fn clear(&self) -> usize {
        // Drained rather than replaced so stale ids never alias new timers
        let removed: Vec<_> = self.state.borrow_mut().timers.drain().collect();
        tracing::debug!(removed = removed.len(), "event loop cleared");
        removed.len()
    }

    /// Pick the next due timer and advance the clock to its deadline
    fn take_due(&self, target: Duration) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        let (id, due) = state.next_due(target)?;
        state.now = state.now.max(due);
        Some(id)
    }

    fn dispatch(&self, id: TimerId) {
        let callback = {
            let mut state = self.state.borrow_mut();
            state.timers.get_mut(id).and_then(|entry| entry.callback.take())
        };
        let Some(mut callback) = callback else {
            return;
        };

        // The loop is not borrowed here so the callback can reschedule freely.
        callback();

        let mut state = self.state.borrow_mut();
        let now = state.now;
        let rearm = match state.timers.get_mut(id) {
            // Stopped from inside its own callback
            None => return,
            Some(entry) => match entry.interval {
                Some(interval) => {
                    entry.due = now + interval;
                    entry.callback = Some(callback);
                    true
                }
                None => false,
            },
        };
        if !rearm {
            state.timers.remove(id);
        }
    }
}

impl Scheduler for EventLoop {
    fn start(&self, interval: Duration, callback: Callback) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        let mut state = self.state.borrow_mut();
        let due = state.now + interval;
        let id = state.insert(due, Some(interval), callback);
        tracing::trace!(?id, ?interval, "periodic timer started");
        id
    }

    fn single_shot(&self, delay: Duration, callback: Callback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let id = state.insert(due, None, callback);
        tracing::trace!(?id, ?delay, "single-shot timer scheduled");
        id
    }

    fn stop(&self, id: TimerId) {
        // Dropped after the borrow ends; the callback may own widget handles.
        let removed = self.state.borrow_mut().timers.remove(id);
        if removed.is_some() {
            tracing::trace!(?id, "timer stopped");
        }
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(id)
    }

    fn now(&self) -> Duration {
        self.state.borrow().now
    }
}
