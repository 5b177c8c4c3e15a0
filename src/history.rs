//! Bounded undo/redo over full-graph snapshots.
//!
//! Snapshots live in a deque; `cursor` points at the active one. Recording
//! after an undo drops everything past the cursor, and the oldest snapshot
//! falls off the front once the deque is longer than `max_size`.

use crate::json::GraphDocument;
use crate::settings::Settings;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Monotonic step number; the initial empty state is 0.
    pub index: u64,
    pub data: GraphDocument,
}

#[derive(Clone, Debug)]
pub struct ProgressRecorder {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    max_size: usize,
}

impl ProgressRecorder {
    pub fn new(max_size: usize) -> Self {
        let mut r = Self { snapshots: VecDeque::new(), cursor: 0, max_size: max_size.max(Settings::MIN_HISTORY_SIZE) };
        r.reset();
        r
    }

    /// Forget everything; the history becomes a single empty snapshot.
    pub fn reset(&mut self) {
        self.reset_to(GraphDocument::default());
    }

    /// Forget everything; `data` becomes snapshot 0.
    pub fn reset_to(&mut self, data: GraphDocument) {
        self.snapshots.clear();
        self.snapshots.push_back(Snapshot { index: 0, data });
        self.cursor = 0;
    }

    pub fn record(&mut self, data: GraphDocument) {
        self.snapshots.truncate(self.cursor + 1);
        let index = self.snapshots.get(self.cursor).map_or(0, |s| s.index + 1);
        self.snapshots.push_back(Snapshot { index, data });
        self.cursor = self.snapshots.len() - 1;
        self.trim();
        log::trace!("history record -> {}", self.stringify());
    }

    fn trim(&mut self) {
        while self.snapshots.len() > self.max_size {
            if self.cursor > 0 {
                self.snapshots.pop_front();
                self.cursor -= 1;
            } else {
                self.snapshots.pop_back();
            }
        }
    }

    /// Step back; returns the snapshot to restore, `None` at the oldest one.
    pub fn undo(&mut self) -> Option<&GraphDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        log::trace!("history undo -> {}", self.stringify());
        self.snapshots.get(self.cursor).map(|s| &s.data)
    }

    pub fn redo(&mut self) -> Option<&GraphDocument> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        log::trace!("history redo -> {}", self.stringify());
        self.snapshots.get(self.cursor).map(|s| &s.data)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Step number of the active snapshot.
    pub fn current_index(&self) -> u64 {
        self.snapshots.get(self.cursor).map_or(0, |s| s.index)
    }

    pub fn current(&self) -> Option<&GraphDocument> {
        self.snapshots.get(self.cursor).map(|s| &s.data)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Values below 3 are raised to 3. Shrinking drops the oldest snapshots
    /// (or the newest redo ones when the cursor sits at the front).
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(Settings::MIN_HISTORY_SIZE);
        self.trim();
    }

    /// `0 > 1 > [2] > 3 > ` with the active snapshot bracketed.
    pub fn stringify(&self) -> String {
        let mut out = String::new();
        for (i, s) in self.snapshots.iter().enumerate() {
            if i == self.cursor {
                out.push_str(&format!("[{}] > ", s.index));
            } else {
                out.push_str(&format!("{} > ", s.index));
            }
        }
        out
    }
}
