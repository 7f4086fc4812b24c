//! Monitor lifecycle events and their subscribers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;

use crate::packager::BuildResult;

/// Snapshot handed to `AfterRegenerate` subscribers.
#[derive(Debug)]
pub struct RegenerateState {
    /// Completion time of the cycle.
    pub watermark: SystemTime,
    pub result: BuildResult,
}

#[derive(Debug, Clone)]
pub enum MonitorEvent {
    MonitorStarted,
    AfterRegenerate(Arc<RegenerateState>),
    FileChanged(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MonitorStarted,
    AfterRegenerate,
    FileChanged,
}

impl MonitorEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::MonitorStarted => EventKind::MonitorStarted,
            Self::AfterRegenerate(_) => EventKind::AfterRegenerate,
            Self::FileChanged(_) => EventKind::FileChanged,
        }
    }
}

type Listener = Box<dyn FnMut(&MonitorEvent) + Send>;

struct Subscription {
    kind: EventKind,
    once: bool,
    listener: Listener,
}

/// Listener registry. Listeners run on the emitting task, in
/// subscription order.
#[derive(Default)]
pub struct EventHub {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every future event of `kind`.
    pub fn on(&self, kind: EventKind, listener: impl FnMut(&MonitorEvent) + Send + 'static) {
        self.subscribe(kind, false, Box::new(listener));
    }

    /// Subscribe to the next event of `kind` only.
    pub fn once(&self, kind: EventKind, listener: impl FnMut(&MonitorEvent) + Send + 'static) {
        self.subscribe(kind, true, Box::new(listener));
    }

    fn subscribe(&self, kind: EventKind, once: bool, listener: Listener) {
        self.subscriptions.lock().push(Subscription {
            kind,
            once,
            listener,
        });
    }

    pub fn emit(&self, event: &MonitorEvent) {
        let kind = event.kind();
        // released while listeners run, so they may subscribe again
        let mut current = std::mem::take(&mut *self.subscriptions.lock());
        current.retain_mut(|sub| {
            if sub.kind != kind {
                return true;
            }
            (sub.listener)(event);
            !sub.once
        });

        let mut subscriptions = self.subscriptions.lock();
        current.append(&mut subscriptions);
        *subscriptions = current;
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.lock().len()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
