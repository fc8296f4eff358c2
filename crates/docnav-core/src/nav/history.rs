//! Recently visited navigation targets.

use std::collections::VecDeque;

/// One visit. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    target_id: String,
    visited_at_seq: u64,
}

impl HistoryEntry {
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Monotonic visit counter; later visits have larger values.
    pub fn visited_at_seq(&self) -> u64 {
        self.visited_at_seq
    }
}

/// Bounded, most-recent-first visit history without duplicates.
///
/// Re-visiting a target moves it to the front. When the buffer grows past
/// its capacity the oldest entries are evicted; the entry just recorded is
/// never the one dropped.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_seq: u64,
}

impl HistoryTracker {
    /// Creates an empty tracker holding at most `capacity` entries.
    ///
    /// A capacity of `0` is raised to `1`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
            next_seq: 0,
        }
    }

    /// Records a visit to `target_id` and returns the new entry.
    pub fn record_visit(&mut self, target_id: impl Into<String>) -> &HistoryEntry {
        let target_id = target_id.into();
        self.entries.retain(|e| e.target_id != target_id);

        let entry = HistoryEntry {
            target_id,
            visited_at_seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.push_front(entry);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!(target_id = %evicted.target_id, "history entry evicted");
            }
        }

        &self.entries[0]
    }

    /// Snapshot of the history, most recent first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Iterates the history, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn most_recent(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn contains(&self, target_id: &str) -> bool {
        self.entries.iter().any(|e| e.target_id == target_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets every entry. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
