//! Bounded rolling history of past verdicts.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::PredictionLevel;

/// Number of verdict summaries retained.
pub const HISTORY_CAPACITY: usize = 10;

/// Trimmed summary of one evaluation, kept for trend display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    // ---
    pub score: u32,
    pub level: PredictionLevel,
    /// Local wall-clock label, e.g. `14:05:32`.
    pub time: String,
}

/// Fixed-capacity FIFO. Oldest entry first, newest last.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append an entry, evicting the oldest one when the buffer is full.
    pub fn append(&mut self, entry: HistoryEntry) {
        // ---
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Owned copy of the buffer, oldest to newest.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
