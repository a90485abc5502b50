use serde::{Deserialize, Serialize};

use super::Entry;
use crate::error::{Error, Result};

/// How imported entries combine with the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Concatenate the imported entries after the current ones.
    Append,
    /// Discard the current list entirely.
    Replace,
}

const QUICK_SELECT_KEYS: &str = "0123456789ABCDEF";

/// Ordered snippet list with a tracked last-selected position.
///
/// Display order is list order. `selected` is revalidated after every
/// structural mutation: it is `None` whenever it no longer points inside
/// the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetList {
    pub entries: Vec<Entry>,
    #[serde(skip)]
    selected: Option<usize>,
}

impl SnippetList {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            selected: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Sets the selected row; out-of-range positions clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    /// Inserts right after the selected row so related items stay adjacent
    /// to what the user was last looking at; appends when nothing is
    /// selected.
    pub fn add(&mut self, entry: Entry) {
        match self.selected {
            Some(i) if i < self.entries.len() => self.entries.insert(i + 1, entry),
            _ => self.entries.push(entry),
        }
    }

    /// Replaces the entry at `index` in place.
    pub fn edit(&mut self, index: usize, entry: Entry) -> Result<()> {
        let slot = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Error::Validation(format!("no entry at index {index}")))?;
        *slot = entry;
        Ok(())
    }

    /// Removes and returns the entry at `index`. Confirmation is the
    /// caller's responsibility; the model itself never prompts.
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        if index >= self.entries.len() {
            return Err(Error::Validation(format!("no entry at index {index}")));
        }
        let removed = self.entries.remove(index);
        self.revalidate_selection();
        Ok(removed)
    }

    /// Swaps the entry with its predecessor. No-op at the top. Returns
    /// whether anything moved; the selection follows the moved entry.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        self.selected = match self.selected {
            Some(i) if i == index => Some(index - 1),
            Some(i) if i == index - 1 => Some(index),
            other => other,
        };
        true
    }

    /// Swaps the entry with its successor. No-op at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if self.entries.is_empty() || index >= self.entries.len() - 1 {
            return false;
        }
        self.entries.swap(index, index + 1);
        self.selected = match self.selected {
            Some(i) if i == index => Some(index + 1),
            Some(i) if i == index + 1 => Some(index),
            other => other,
        };
        true
    }

    /// Bulk import. `Replace` clears the selection since the old positions
    /// are meaningless against the new list; `Append` keeps it.
    pub fn import(&mut self, new_entries: Vec<Entry>, mode: ImportMode) {
        match mode {
            ImportMode::Append => self.entries.extend(new_entries),
            ImportMode::Replace => {
                self.entries = new_entries;
                self.selected = None;
            }
        }
        self.revalidate_selection();
    }

    /// Mnemonic quick-select token for the first 16 rows. Purely
    /// positional: labels shift with the rows they happen to land on.
    pub fn quick_select_label(index: usize) -> Option<char> {
        QUICK_SELECT_KEYS.chars().nth(index)
    }

    fn revalidate_selection(&mut self) {
        if let Some(i) = self.selected {
            if i >= self.entries.len() {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str) -> Entry {
        Entry::new(name, &format!("{name} data"), None).unwrap()
    }

    fn list_of(names: &[&str]) -> SnippetList {
        SnippetList::new(names.iter().map(|n| entry(n)).collect())
    }

    fn names(list: &SnippetList) -> Vec<String> {
        list.entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_add_appends_without_selection() {
        let mut list = list_of(&["a", "b"]);
        list.add(entry("c"));
        assert_eq!(names(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_inserts_after_selected() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select(Some(1));
        list.add(entry("x"));
        assert_eq!(names(&list), ["a", "b", "x", "c"]);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut list = list_of(&["a", "b"]);
        list.edit(1, entry("z")).unwrap();
        assert_eq!(names(&list), ["a", "z"]);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut list = list_of(&["a"]);
        let err = list.edit(3, entry("z")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        let removed = list.remove(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&list), ["a", "c", "d"]);
    }

    #[test]
    fn test_remove_resets_invalid_selection() {
        let mut list = list_of(&["a", "b"]);
        list.select(Some(1));
        list.remove(1).unwrap();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_remove_keeps_still_valid_selection() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select(Some(0));
        list.remove(2).unwrap();
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut list = list_of(&["a", "b"]);
        list.select(Some(0));
        assert!(!list.move_up(0));
        assert_eq!(names(&list), ["a", "b"]);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut list = list_of(&["a", "b"]);
        list.select(Some(1));
        assert!(!list.move_down(1));
        assert_eq!(names(&list), ["a", "b"]);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_move_up_swaps_and_follows_selection() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select(Some(2));
        assert!(list.move_up(2));
        assert_eq!(names(&list), ["a", "c", "b"]);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_move_down_swaps_and_follows_selection() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select(Some(0));
        assert!(list.move_down(0));
        assert_eq!(names(&list), ["b", "a", "c"]);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_import_append_preserves_both_orders() {
        let mut list = list_of(&["a", "b"]);
        list.import(vec![entry("x"), entry("y")], ImportMode::Append);
        assert_eq!(names(&list), ["a", "b", "x", "y"]);
    }

    #[test]
    fn test_import_replace_discards_current() {
        let mut list = list_of(&["a", "b"]);
        list.select(Some(1));
        list.import(vec![entry("x")], ImportMode::Replace);
        assert_eq!(names(&list), ["x"]);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_select_out_of_range_clears() {
        let mut list = list_of(&["a"]);
        list.select(Some(5));
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_quick_select_labels_are_positional() {
        assert_eq!(SnippetList::quick_select_label(0), Some('0'));
        assert_eq!(SnippetList::quick_select_label(9), Some('9'));
        assert_eq!(SnippetList::quick_select_label(10), Some('A'));
        assert_eq!(SnippetList::quick_select_label(15), Some('F'));
        assert_eq!(SnippetList::quick_select_label(16), None);
    }
}
