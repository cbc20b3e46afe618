//! Row selection state.

use crate::value::RowId;
use std::collections::BTreeSet;

/// State of the select-all checkbox in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderCheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Selection phase driving the bulk-edit command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionPhase {
    NoRowsSelected,
    SomeRowsSelected,
}

/// Set of selected rows, independent of sort, filter and pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeSet<RowId>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Flip one row; returns the new selected state.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn set(&mut self, id: RowId, selected: bool) {
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.selected.iter().copied().collect()
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.is_empty() {
            SelectionPhase::NoRowsSelected
        } else {
            SelectionPhase::SomeRowsSelected
        }
    }

    /// Every row of a non-empty page is selected.
    pub fn all_selected(&self, page: &[RowId]) -> bool {
        !page.is_empty() && page.iter().all(|id| self.is_selected(*id))
    }

    /// Number of selected rows among `rows`.
    pub fn count_in(&self, rows: &[RowId]) -> usize {
        rows.iter().filter(|id| self.is_selected(**id)).count()
    }

    /// Header checkbox state: checked when the whole page is selected,
    /// indeterminate when some (but not all) filtered rows are selected.
    pub fn header_state(&self, page: &[RowId], filtered: &[RowId]) -> HeaderCheckState {
        if self.all_selected(page) {
            return HeaderCheckState::Checked;
        }
        let selected = self.count_in(filtered);
        if selected > 0 && selected < filtered.len() {
            HeaderCheckState::Indeterminate
        } else {
            HeaderCheckState::Unchecked
        }
    }

    /// Header checkbox click: clears the page when it is fully selected,
    /// otherwise selects every row on it.
    pub fn toggle_page(&mut self, page: &[RowId]) {
        if self.all_selected(page) {
            for id in page {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(page.iter().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<usize>) -> Vec<RowId> {
        range.map(RowId).collect()
    }

    #[test]
    fn test_toggle_row() {
        let mut sel = RowSelection::new();
        assert!(sel.toggle(RowId(3)));
        assert!(sel.is_selected(RowId(3)));
        assert_eq!(sel.phase(), SelectionPhase::SomeRowsSelected);
        assert!(!sel.toggle(RowId(3)));
        assert_eq!(sel.phase(), SelectionPhase::NoRowsSelected);
    }

    #[test]
    fn test_header_cycle() {
        let page = ids(0..3);
        let filtered = ids(0..6);
        let mut sel = RowSelection::new();
        assert_eq!(sel.header_state(&page, &filtered), HeaderCheckState::Unchecked);

        sel.set(RowId(1), true);
        assert_eq!(
            sel.header_state(&page, &filtered),
            HeaderCheckState::Indeterminate
        );

        // Indeterminate click selects the whole page.
        sel.toggle_page(&page);
        assert_eq!(sel.header_state(&page, &filtered), HeaderCheckState::Checked);
        assert_eq!(sel.len(), 3);

        // Checked click clears it.
        sel.toggle_page(&page);
        assert!(sel.is_empty());
        assert_eq!(sel.header_state(&page, &filtered), HeaderCheckState::Unchecked);
    }

    #[test]
    fn test_empty_page_never_checked() {
        let sel = RowSelection::new();
        assert!(!sel.all_selected(&[]));
        assert_eq!(sel.header_state(&[], &[]), HeaderCheckState::Unchecked);
    }
}
