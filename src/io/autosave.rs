use std::time::{Duration, Instant};

/// Decides when the store's pending changes should be written.
///
/// With a zero delay every change is due immediately. With a positive delay
/// changes are coalesced until the delay has passed since the first unsaved
/// change, or until a flush is forced (gesture end, exit).
#[derive(Debug, Clone)]
pub struct AutoSave {
    delay: Duration,
    saved_revision: u64,
    dirty_since: Option<Instant>,
}

impl AutoSave {
    /// Start in sync with a store at `revision`
    pub fn new(delay: Duration, revision: u64) -> Self {
        AutoSave {
            delay,
            saved_revision: revision,
            dirty_since: None,
        }
    }

    /// Note the store's current revision
    pub fn observe(&mut self, revision: u64, now: Instant) {
        if revision != self.saved_revision && self.dirty_since.is_none() {
            self.dirty_since = Some(now);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Whether a write is owed now
    pub fn due(&self, now: Instant) -> bool {
        match self.dirty_since {
            None => false,
            Some(since) => now.saturating_duration_since(since) >= self.delay,
        }
    }

    /// Record a successful write of `revision`
    pub fn saved(&mut self, revision: u64) {
        self.saved_revision = revision;
        self.dirty_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_is_due_at_once() {
        let now = Instant::now();
        let mut save = AutoSave::new(Duration::ZERO, 0);
        assert!(!save.due(now));
        save.observe(1, now);
        assert!(save.due(now));
        save.saved(1);
        assert!(!save.is_dirty());
        save.observe(1, now);
        assert!(!save.due(now));
    }

    #[test]
    fn delay_coalesces_bursts() {
        let t0 = Instant::now();
        let mut save = AutoSave::new(Duration::from_millis(200), 0);
        save.observe(1, t0);
        save.observe(2, t0 + Duration::from_millis(50));
        save.observe(3, t0 + Duration::from_millis(100));
        assert!(!save.due(t0 + Duration::from_millis(150)));
        assert!(save.due(t0 + Duration::from_millis(200)));
        save.saved(3);
        assert!(!save.due(t0 + Duration::from_millis(400)));
    }
}
