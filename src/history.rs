//! Linear undo/redo history of full-canvas snapshots
//!
//! Invariants: the log is never empty and `cursor < len`. Committing after an
//! undo truncates the undone entries, so there is never a redo branch.

use image::RgbaImage;
use std::collections::VecDeque;

/// Snapshot log with a cursor marking the current state
#[derive(Debug, Clone)]
pub struct History<S = RgbaImage> {
    entries: VecDeque<S>,
    cursor: usize,
    limit: Option<usize>,
}

impl<S> History<S> {
    /// Start a log whose only entry is `initial`.
    ///
    /// `limit` bounds the number of entries kept (values below 1 are raised to
    /// 1); `None` keeps everything.
    pub fn new(initial: S, limit: Option<usize>) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Entry under the cursor
    pub fn current(&self) -> &S {
        &self.entries[self.cursor]
    }

    /// Drop everything after the cursor, append `snapshot` and move onto it
    pub fn commit(&mut self, snapshot: S) {
        let discarded = self.entries.len() - (self.cursor + 1);
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
        self.cursor = self.entries.len() - 1;

        tracing::debug!(
            "History commit: {} entries, cursor {}, {} redo entries discarded",
            self.entries.len(),
            self.cursor,
            discarded
        );
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&S> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&S> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Forget everything and start over from `initial`
    pub fn reset(&mut self, initial: S) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entries(history: &History<char>) -> Vec<char> {
        history.entries.iter().copied().collect()
    }

    #[test]
    fn test_fresh_history_cannot_move() {
        let mut history = History::new('A', None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(*history.current(), 'A');
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut history = History::new('A', None);
        history.commit('B');
        history.commit('C');
        assert_eq!(history.cursor(), 2);
        assert_eq!(*history.current(), 'C');
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo_returns_to_same_entry() {
        let mut history = History::new('A', None);
        history.commit('B');
        assert_eq!(history.undo(), Some(&'A'));
        assert_eq!(history.redo(), Some(&'B'));
        assert_eq!(*history.current(), 'B');
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_commit_after_undo_truncates_future() {
        let mut history = History::new('A', None);
        history.commit('B');
        history.commit('C');
        history.undo();
        history.commit('D');

        assert_eq!(entries(&history), vec!['A', 'B', 'D']);
        assert_eq!(history.cursor(), 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_limit_drops_oldest_entries() {
        let mut history = History::new('A', Some(3));
        history.commit('B');
        history.commit('C');
        history.commit('D');

        assert_eq!(entries(&history), vec!['B', 'C', 'D']);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.undo(), Some(&'C'));
        assert_eq!(history.undo(), Some(&'B'));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_limit_of_zero_keeps_current_entry() {
        let mut history = History::new('A', Some(0));
        history.commit('B');
        assert_eq!(history.len(), 1);
        assert_eq!(*history.current(), 'B');
        assert!(!history.can_undo());
    }

    #[test]
    fn test_cursor_stays_in_range_across_mixed_operations() {
        let mut history = History::new(0u32, Some(5));
        for step in 1..40u32 {
            match step % 4 {
                0 => {
                    history.undo();
                }
                1 => {
                    history.redo();
                }
                _ => history.commit(step),
            }
            assert!(history.cursor() < history.len());
            assert!(history.len() <= 5);
        }
    }

    #[test]
    fn test_reset() {
        let mut history = History::new('A', None);
        history.commit('B');
        history.reset('Z');
        assert_eq!(entries(&history), vec!['Z']);
        assert_eq!(history.cursor(), 0);
    }
}
