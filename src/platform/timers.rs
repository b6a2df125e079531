//! Deferred callbacks for feedback windows
//!
//! Timers are plain values: the owner drains due entries with the current
//! time and cancels everything when the screen they belong to goes away.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    due_ms: u64,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Fire `payload` once `delay_ms` has passed since `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due_ms: now_ms.saturating_add(delay_ms),
            payload,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Drop every pending timer, returning how many were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Remove and return due payloads in firing order
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by_key(|p| (p.due_ms, p.id));
        due.into_iter().map(|p| p.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_in_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, 3000, "late");
        q.schedule(0, 1000, "early");
        q.schedule(0, 1000, "early-second");
        assert!(q.drain_due(999).is_empty());
        assert_eq!(q.drain_due(1000), vec!["early", "early-second"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(10_000), vec!["late"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 10, 1);
        q.schedule(0, 10, 2);
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.cancel_all(), 1);
        assert!(q.drain_due(100).is_empty());
    }
}
