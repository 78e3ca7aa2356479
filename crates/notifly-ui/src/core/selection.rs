//! Index-based table selection with all/indeterminate tri-state.
//!
//! Indices refer to the rows currently displayed; the derived flags are
//! recomputed against the caller-supplied row count on every access, so
//! indices left over from a longer page never count as selected.

use std::collections::BTreeSet;

/// Selection set over the rows of one table page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: BTreeSet<usize>,
}

impl SelectionState {
    /// Empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    /// Flip membership of a single row index.
    pub fn toggle_row(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Toggle the header checkbox: clear when every row is selected,
    /// otherwise clear and fill the whole page. Invoking twice always
    /// returns to empty.
    pub fn toggle_all(&mut self, row_count: usize) {
        if self.all_selected(row_count) {
            self.clear();
        } else {
            self.select_all(row_count);
        }
    }

    /// Select every row on the current page.
    pub fn select_all(&mut self, row_count: usize) {
        self.selected = (0..row_count).collect();
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether a row index is currently selected.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Indices within the current page, ascending.
    #[must_use]
    pub fn live_indices(&self, row_count: usize) -> Vec<usize> {
        self.selected
            .iter()
            .copied()
            .filter(|&index| index < row_count)
            .collect()
    }

    /// Number of selected rows within the current page.
    #[must_use]
    pub fn live_count(&self, row_count: usize) -> usize {
        self.selected
            .iter()
            .filter(|&&index| index < row_count)
            .count()
    }

    /// Whether every row of a non-empty page is selected.
    #[must_use]
    pub fn all_selected(&self, row_count: usize) -> bool {
        row_count > 0 && self.live_count(row_count) == row_count
    }

    /// Whether some but not all rows are selected.
    #[must_use]
    pub fn indeterminate(&self, row_count: usize) -> bool {
        let live = self.live_count(row_count);
        live > 0 && live < row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_row_flips_membership() {
        let mut selection = SelectionState::new();
        selection.toggle_row(1);
        assert!(selection.is_selected(1));
        selection.toggle_row(1);
        assert!(!selection.is_selected(1));
    }

    #[test]
    fn double_toggle_all_returns_to_empty() {
        let mut selection = SelectionState::new();
        selection.toggle_row(1);
        selection.toggle_all(3);
        assert!(selection.all_selected(3));
        selection.toggle_all(3);
        assert_eq!(selection.live_count(3), 0);
    }

    #[test]
    fn partial_selection_is_indeterminate() {
        let mut selection = SelectionState::new();
        selection.toggle_row(0);
        selection.toggle_row(1);
        assert!(selection.indeterminate(3));
        assert!(!selection.all_selected(3));
    }

    #[test]
    fn stale_indices_do_not_count_after_shrink() {
        let mut selection = SelectionState::new();
        selection.select_all(3);
        assert!(selection.all_selected(3));
        // Page shrank to two rows; index 2 is stale.
        assert!(selection.all_selected(2));
        assert_eq!(selection.live_indices(2), vec![0, 1]);
        // Page grew to four rows; selection is now partial.
        assert!(selection.indeterminate(4));
        assert!(!selection.all_selected(4));
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection = SelectionState::new();
        assert!(!selection.all_selected(0));
        assert!(!selection.indeterminate(0));
    }
}
