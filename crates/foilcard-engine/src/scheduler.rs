//! Cancellable one-shot timers polled against a [`Clock`](crate::Clock).
//!
//! Nothing runs on its own. The owner calls [`Scheduler::pop_due`] with the
//! current time and handles whatever comes back, which keeps every state
//! change on the caller's thread.

/// Identifies a scheduled timer for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<E> {
    handle: TimerHandle,
    due_ms: u64,
    event: E,
}

/// One-shot timers carrying an event payload.
#[derive(Debug)]
pub struct Scheduler<E> {
    timers: Vec<Timer<E>>,
    next_handle: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<E> Scheduler<E> {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to become due at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            due_ms,
            event,
        });
        handle
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    ///
    /// Timers due at the same time come out in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, E)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        Some((timer.handle, timer.event))
    }

    /// When the next timer is due.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(200, "late");
        s.schedule(100, "early");
        s.schedule(100, "early-second");

        assert_eq!(s.next_deadline(), Some(100));
        assert!(s.pop_due(50).is_none());
        assert_eq!(s.pop_due(300).map(|(_, e)| e), Some("early"));
        assert_eq!(s.pop_due(300).map(|(_, e)| e), Some("early-second"));
        assert_eq!(s.pop_due(300).map(|(_, e)| e), Some("late"));
        assert!(s.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let a = s.schedule(10, 1);
        let b = s.schedule(20, 2);

        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_deadline(), Some(20));
        assert_eq!(s.pop_due(100), Some((b, 2)));
        assert!(s.pop_due(100).is_none());
    }
}
