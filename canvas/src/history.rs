//! Undo/redo history of full canvas checkpoints.
//!
//! Linear discipline: a new checkpoint clears the redo stack, so there is
//! never a branch. The top of the undo stack is always the state currently
//! on screen (once any pending restore has landed).

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::consts::MAX_HISTORY_ENTRIES;
use crate::doc::HistoryEntry;

/// Bounded undo/redo stacks of [`HistoryEntry`] checkpoints.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_ENTRIES)
    }
}

impl History {
    /// Create an empty history retaining at most `max_entries` undo steps.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Push `entry` as the new current state and drop all forward history.
    ///
    /// Returns `false` when `entry` equals the current top: no undo step is
    /// added, so repeated saves do not create empty steps, but forward
    /// history is still dropped.
    pub fn checkpoint(&mut self, entry: HistoryEntry) -> bool {
        self.redo.clear();
        if self.undo.last() == Some(&entry) {
            return false;
        }
        self.undo.push(entry);
        if self.undo.len() > self.max_entries {
            let excess = self.undo.len() - self.max_entries;
            self.undo.drain(..excess);
        }
        true
    }

    /// Step back one checkpoint.
    ///
    /// Returns the entry to restore: the new top, or the empty state when the
    /// stack becomes empty. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let top = self.undo.pop()?;
        self.redo.push(top);
        Some(self.undo.last().cloned().unwrap_or_default())
    }

    /// Re-apply the most recently undone checkpoint.
    ///
    /// Returns the entry to restore, or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry.clone());
        Some(entry)
    }

    /// The current checkpoint, if any.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.undo.last()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget all checkpoints.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
