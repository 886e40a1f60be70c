//! Transient status messages with automatic expiry.

use serde::Serialize;

use crate::scheduler::{Scheduler, TimerId};

/// Message currently shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    /// Bumped on every `notify`; expiry timers carry the value they were
    /// scheduled for.
    pub generation: u64,
}

/// Holds at most one message. A newer message replaces the current one and
/// restarts the expiry timer.
#[derive(Clone, Debug, Default)]
pub struct NotificationSink {
    current: Option<Notification>,
    generation: u64,
    timer: Option<TimerId>,
}

impl NotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    /// Shows `message` and schedules its removal after `ttl_ms`.
    ///
    /// `expired` builds the timer event from the notification generation.
    pub fn notify<E>(
        &mut self,
        scheduler: &mut Scheduler<E>,
        message: impl Into<String>,
        ttl_ms: u64,
        expired: impl FnOnce(u64) -> E,
    ) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.generation += 1;
        self.current = Some(Notification {
            message: message.into(),
            generation: self.generation,
        });
        self.timer = Some(scheduler.schedule(ttl_ms, expired(self.generation)));
    }

    /// Clears the message if `generation` still identifies it.
    ///
    /// Returns `false` for expiries of already-replaced messages.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(current) if current.generation == generation => {
                self.current = None;
                self.timer = None;
                true
            }
            _ => false,
        }
    }
}
