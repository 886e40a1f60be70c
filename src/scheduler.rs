//! Single-threaded timer queue driven by a virtual millisecond clock.
//!
//! Delayed transitions (notification expiry, simulated email delivery) are
//! scheduled here instead of blocking. Time only moves when the owner calls
//! [`Scheduler::pop_due`] with a target instant, which keeps tests
//! deterministic.

use std::collections::BTreeMap;

/// Handle returned by [`Scheduler::schedule`], used to cancel a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_id: u64,
    /// Pending timers keyed by (due time, id) so equal deadlines fire in
    /// scheduling order.
    pending: BTreeMap<(u64, TimerId), E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queues `event` to fire `delay_ms` after the current instant.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, id), event);
        id
    }

    /// Drops a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, timer)| *timer == id).copied();
        key.and_then(|key| self.pending.remove(&key)).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|(_, timer)| *timer == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its deadline. When nothing is due the clock moves to `until_ms` and
    /// `None` is returned.
    ///
    /// Callers loop on this so that timers scheduled while handling an event
    /// still fire within the same advance window.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<E> {
        match self.pending.first_key_value() {
            Some((&(due, _), _)) if due <= until_ms => {
                let ((due, _), event) = self.pending.pop_first()?;
                self.now_ms = self.now_ms.max(due);
                Some(event)
            }
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }

    /// Fires everything due within the next `elapsed_ms`, in deadline order.
    ///
    /// Unlike a [`Scheduler::pop_due`] loop, events scheduled by the caller
    /// while handling the returned batch are not included.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<E> {
        let until = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(event) = self.pop_due(until) {
            fired.push(event);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, "late");
        scheduler.schedule(100, "early");
        scheduler.schedule(100, "early-second");

        assert_eq!(scheduler.advance(99), Vec::<&str>::new());
        assert_eq!(scheduler.now_ms(), 99);
        assert_eq!(scheduler.advance(1), vec!["early", "early-second"]);
        assert_eq!(scheduler.advance(1000), vec!["late"]);
        assert_eq!(scheduler.now_ms(), 1100);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(50, 1);
        scheduler.schedule(60, 2);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));
        assert_eq!(scheduler.advance(100), vec![2]);
    }

    #[test]
    fn pop_due_moves_clock_to_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1500, "sent");

        assert_eq!(scheduler.pop_due(5000), Some("sent"));
        assert_eq!(scheduler.now_ms(), 1500);

        // Scheduled relative to the deadline, still inside the window.
        scheduler.schedule(1500, "closed");
        assert_eq!(scheduler.pop_due(5000), Some("closed"));
        assert_eq!(scheduler.now_ms(), 3000);
        assert_eq!(scheduler.pop_due(5000), None);
        assert_eq!(scheduler.now_ms(), 5000);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
