//! Transient toast queue
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parley_core::Notice;

/// Most notices shown at once
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
struct Entry {
    notice: Notice,
    shown_at: Instant,
}

/// Notices that expire after a fixed time to live
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    ttl: Duration,
    entries: VecDeque<Entry>,
}

impl NoticeQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        self.entries.push_front(Entry {
            notice,
            shown_at: now,
        });
        // Older notices beyond the visible window would never be seen
        self.entries.truncate(MAX_VISIBLE);
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.push(notice);
        }
    }

    /// Drop expired notices
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|entry| now.saturating_duration_since(entry.shown_at) < ttl);
    }

    /// Newest first
    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().map(|entry| &entry.notice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_newest_first_and_capped() {
        let mut queue = NoticeQueue::new(Duration::from_secs(4));
        let now = Instant::now();
        for title in ["one", "two", "three", "four"] {
            queue.push_at(Notice::info(title, None), now);
        }

        let titles: Vec<_> = queue.visible().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["four", "three", "two"]);
    }

    #[test]
    fn test_prune_expires_old_notices() {
        let mut queue = NoticeQueue::new(Duration::from_secs(4));
        let start = Instant::now();
        queue.push_at(Notice::info("old", None), start);
        queue.push_at(Notice::info("new", None), start + Duration::from_secs(3));

        queue.prune(start + Duration::from_secs(5));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible().next().unwrap().title, "new");
    }
}
