//! Debounced task scheduling with cancel-and-replace semantics
//!
//! The host pumps time into the engine; nothing here owns a timer. Each
//! `schedule` replaces any pending deadline for the same key, so a burst of
//! calls within the window collapses into one task firing after the last
//! call's delay.

use std::collections::HashMap;

/// The two debounced work categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKey {
    /// Pointer-move probing, coalesced at roughly one frame.
    PointerProbe,
    /// Full reconversion of the registry.
    UpdateAll,
}

#[derive(Debug, Default)]
pub struct Debouncer {
    deadlines: HashMap<TaskKey, u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `now_ms + delay_ms`, replacing any pending
    /// deadline for the same key.
    pub fn schedule(&mut self, key: TaskKey, now_ms: u64, delay_ms: u64) {
        self.deadlines.insert(key, now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self, key: TaskKey) {
        self.deadlines.remove(&key);
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Drains every key whose deadline has passed, ordered by deadline.
    pub fn due(&mut self, now_ms: u64) -> Vec<TaskKey> {
        let mut fired: Vec<(u64, TaskKey)> = self
            .deadlines
            .iter()
            .filter(|(_, &deadline)| deadline <= now_ms)
            .map(|(&key, &deadline)| (deadline, key))
            .collect();
        fired.sort();
        for (_, key) in &fired {
            self.deadlines.remove(key);
        }
        fired.into_iter().map(|(_, key)| key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending_deadline() {
        let mut d = Debouncer::new();
        d.schedule(TaskKey::UpdateAll, 0, 100);
        d.schedule(TaskKey::UpdateAll, 50, 100);
        assert!(d.due(120).is_empty());
        assert_eq!(d.due(150), vec![TaskKey::UpdateAll]);
    }

    #[test]
    fn test_due_drains() {
        let mut d = Debouncer::new();
        d.schedule(TaskKey::PointerProbe, 0, 16);
        assert_eq!(d.due(16), vec![TaskKey::PointerProbe]);
        assert!(d.due(1_000).is_empty());
    }

    #[test]
    fn test_independent_keys() {
        let mut d = Debouncer::new();
        d.schedule(TaskKey::PointerProbe, 0, 16);
        d.schedule(TaskKey::UpdateAll, 0, 100);
        assert_eq!(d.due(20), vec![TaskKey::PointerProbe]);
        assert!(d.is_pending(TaskKey::UpdateAll));
        assert_eq!(d.due(100), vec![TaskKey::UpdateAll]);
    }

    #[test]
    fn test_cancel() {
        let mut d = Debouncer::new();
        d.schedule(TaskKey::UpdateAll, 0, 100);
        d.cancel(TaskKey::UpdateAll);
        assert!(d.due(1_000).is_empty());
    }
}
