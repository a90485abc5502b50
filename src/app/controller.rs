use tracing::{debug, error};

use super::mode::Visibility;
use super::state::AppState;
use crate::platform::Desktop;
use crate::snippet::{Entry, ImportMode};
use crate::storage::{Geometry, Store};

/// Orchestrates show/hide/tray transitions and the copy-or-open action.
///
/// Owns the live state and the store; every mutating operation is followed
/// by a synchronous whole-document rewrite. All calls happen on the UI
/// thread -- background listeners only post events back into it.
pub struct Controller<D: Desktop> {
    state: AppState,
    store: Store,
    desktop: D,
}

impl<D: Desktop> Controller<D> {
    pub fn new(state: AppState, store: Store, desktop: D) -> Self {
        Self {
            state,
            store,
            desktop,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut D {
        &mut self.desktop
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Hidden -> Visible, restoring the last selected row as the focused
    /// one (first row when nothing was selected and the list is non-empty).
    pub fn show(&mut self) {
        self.state.restore_selection();
        self.state.visibility = Visibility::Visible;
        self.desktop.show_window();
    }

    /// Visible -> Hidden. Re-entering Hidden with the tray already up is a
    /// no-op for the tray.
    pub fn hide(&mut self) {
        self.state.visibility = Visibility::Hidden;
        self.desktop.hide_window();
        self.ensure_tray();
    }

    pub fn toggle(&mut self) {
        match self.state.visibility {
            Visibility::Hidden => self.show(),
            Visibility::Visible => self.hide(),
        }
    }

    /// Copies the focused entry to the clipboard, or opens it in the
    /// default browser when it looks like an absolute HTTP/HTTPS URL.
    /// Either way: audible cue, then hide. No focused row means no-op.
    pub fn activate_selected(&mut self) {
        let Some(entry) = self.state.list.selected_entry() else {
            return;
        };

        if entry.is_url() {
            debug!(name = %entry.name, "opening entry in browser");
            self.desktop.open_in_browser(&entry.data);
        } else {
            debug!(name = %entry.name, "copying entry to clipboard");
            self.desktop.set_clipboard_text(&entry.data);
        }
        self.desktop.play_cue();
        self.hide();
    }

    /// Quick-select: focus one of the first 16 rows by its mnemonic token
    /// and activate it in one step.
    pub fn quick_select(&mut self, index: usize) {
        if index < self.state.list.len() {
            self.state.list.select(Some(index));
            self.activate_selected();
        }
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.state.list.select(index);
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.state.list.selected() {
            if i > 0 {
                self.state.list.select(Some(i - 1));
            }
        } else {
            self.state.restore_selection();
        }
    }

    pub fn select_next(&mut self) {
        match self.state.list.selected() {
            Some(i) if i + 1 < self.state.list.len() => self.state.list.select(Some(i + 1)),
            Some(_) => {}
            None => self.state.restore_selection(),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.state.list.add(entry);
        self.persist();
    }

    pub fn edit_entry(&mut self, index: usize, entry: Entry) -> crate::error::Result<()> {
        self.state.list.edit(index, entry)?;
        self.persist();
        Ok(())
    }

    /// Deletes the focused row after a yes/no confirmation at the desktop
    /// boundary. Declining leaves everything untouched.
    pub fn delete_selected(&mut self) {
        let Some(index) = self.state.list.selected() else {
            return;
        };
        let name = match self.state.list.entries.get(index) {
            Some(entry) => entry.name.clone(),
            None => return,
        };
        if !self.desktop.confirm(&format!("Delete {name:?}?")) {
            return;
        }
        if self.state.list.remove(index).is_ok() {
            self.persist();
        }
    }

    pub fn move_selected_up(&mut self) {
        if let Some(i) = self.state.list.selected() {
            if self.state.list.move_up(i) {
                self.persist();
            }
        }
    }

    pub fn move_selected_down(&mut self) {
        if let Some(i) = self.state.list.selected() {
            if self.state.list.move_down(i) {
                self.persist();
            }
        }
    }

    pub fn import_entries(&mut self, entries: Vec<Entry>, mode: ImportMode) {
        self.state.list.import(entries, mode);
        self.persist();
    }

    /// Persists a hotkey the registration service already accepted.
    pub fn hotkey_changed(&mut self, label: &str) {
        self.state.hotkey = label.to_string();
        self.persist();
    }

    /// Geometry changes persist immediately; saves are cheap relative to
    /// how often windows get dragged around.
    pub fn window_moved(&mut self, x: i32, y: i32) {
        self.state.geometry.x = x;
        self.state.geometry.y = y;
        self.persist();
    }

    pub fn window_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.state.geometry.width = width;
        self.state.geometry.height = height;
        self.persist();
    }

    pub fn clamp_geometry(&mut self, screen_width: u32, screen_height: u32) -> Geometry {
        let before = self.state.geometry;
        self.state.geometry.clamp_to_screen(screen_width, screen_height);
        if self.state.geometry != before {
            self.persist();
        }
        self.state.geometry
    }

    /// Swaps in an externally modified document (file watcher).
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(outcome) => {
                if let Some(recovered) = outcome.recovered {
                    self.desktop.notify(&recovered.to_string());
                }
                self.state.replace_document(outcome.document);
            }
            Err(error) => {
                error!(%error, "failed to reload data file");
                self.desktop.notify(&format!("Failed to reload data file: {error}"));
            }
        }
    }

    /// Tray icon must be gone before the process exits, or the OS keeps an
    /// orphaned icon around.
    pub fn quit(&mut self) {
        if self.state.tray_present {
            self.desktop.remove_tray_icon();
            self.state.tray_present = false;
        }
        self.state.should_quit = true;
    }

    fn ensure_tray(&mut self) {
        if !self.state.tray_present {
            self.desktop.show_tray_icon();
            self.state.tray_present = true;
        }
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.state.to_document()) {
            error!(%error, "failed to save data file");
            self.desktop.notify(&format!("Failed to save data file: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Document;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeDesktop {
        shows: usize,
        hides: usize,
        copied: Vec<String>,
        opened: Vec<String>,
        cues: usize,
        tray_shows: usize,
        tray_removes: usize,
        confirm_answer: bool,
        notifications: Vec<String>,
    }

    impl Desktop for FakeDesktop {
        fn show_window(&mut self) {
            self.shows += 1;
        }
        fn hide_window(&mut self) {
            self.hides += 1;
        }
        fn set_clipboard_text(&mut self, text: &str) {
            self.copied.push(text.to_string());
        }
        fn open_in_browser(&mut self, url: &str) {
            self.opened.push(url.to_string());
        }
        fn play_cue(&mut self) {
            self.cues += 1;
        }
        fn show_tray_icon(&mut self) {
            self.tray_shows += 1;
        }
        fn remove_tray_icon(&mut self) {
            self.tray_removes += 1;
        }
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.confirm_answer
        }
        fn notify(&mut self, message: &str) {
            self.notifications.push(message.to_string());
        }
    }

    fn controller_with(
        dir: &TempDir,
        entries: &[(&str, &str)],
    ) -> Controller<FakeDesktop> {
        let store = Store::new(dir.path().join("data.json"));
        let mut document = Document::default();
        document.data = entries
            .iter()
            .map(|(name, data)| Entry::new(name, data, None).unwrap())
            .collect();
        store.save(&document).unwrap();
        Controller::new(
            AppState::from_document(document),
            store,
            FakeDesktop::default(),
        )
    }

    fn reload_names(controller: &Controller<FakeDesktop>) -> Vec<String> {
        controller
            .store
            .load()
            .unwrap()
            .document
            .data
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[test]
    fn test_activate_url_opens_browser_not_clipboard() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("link", "https://example.com")]);
        controller.show();
        controller.activate_selected();

        assert_eq!(controller.desktop.opened, vec!["https://example.com"]);
        assert!(controller.desktop.copied.is_empty());
        assert_eq!(controller.desktop.cues, 1);
        assert_eq!(controller.state.visibility, Visibility::Hidden);
    }

    #[test]
    fn test_activate_text_copies_not_opens() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("note", "plain text")]);
        controller.show();
        controller.activate_selected();

        assert_eq!(controller.desktop.copied, vec!["plain text"]);
        assert!(controller.desktop.opened.is_empty());
        assert_eq!(controller.desktop.cues, 1);
    }

    #[test]
    fn test_activate_with_no_selection_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[]);
        controller.activate_selected();

        assert!(controller.desktop.copied.is_empty());
        assert!(controller.desktop.opened.is_empty());
        assert_eq!(controller.desktop.cues, 0);
        assert_eq!(controller.desktop.hides, 0);
    }

    #[test]
    fn test_tray_creation_is_idempotent_across_hides() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);

        controller.hide();
        controller.show();
        controller.hide();
        controller.hide();

        assert_eq!(controller.desktop.tray_shows, 1);
    }

    #[test]
    fn test_quit_removes_tray_before_exit() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);
        controller.hide();
        controller.quit();

        assert_eq!(controller.desktop.tray_removes, 1);
        assert!(controller.should_quit());
    }

    #[test]
    fn test_quit_without_tray_removes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);
        controller.quit();
        assert_eq!(controller.desktop.tray_removes, 0);
    }

    #[test]
    fn test_show_focuses_first_row_when_unselected() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b"), ("c", "d")]);
        controller.show();
        assert_eq!(controller.state.list.selected(), Some(0));
        assert_eq!(controller.state.visibility, Visibility::Visible);
    }

    #[test]
    fn test_show_restores_last_selection() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b"), ("c", "d")]);
        controller.select(Some(1));
        controller.hide();
        controller.show();
        assert_eq!(controller.state.list.selected(), Some(1));
    }

    #[test]
    fn test_delete_declined_leaves_list_untouched() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b"), ("c", "d")]);
        controller.select(Some(0));
        controller.desktop.confirm_answer = false;
        controller.delete_selected();

        assert_eq!(controller.state.list.len(), 2);
        assert_eq!(reload_names(&controller), ["a", "c"]);
    }

    #[test]
    fn test_delete_confirmed_removes_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b"), ("c", "d")]);
        controller.select(Some(0));
        controller.desktop.confirm_answer = true;
        controller.delete_selected();

        assert_eq!(reload_names(&controller), ["c"]);
    }

    #[test]
    fn test_mutations_rewrite_document() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);

        controller.add_entry(Entry::new("new", "data", None).unwrap());
        assert_eq!(reload_names(&controller), ["a", "new"]);

        controller.select(Some(1));
        controller.move_selected_up();
        assert_eq!(reload_names(&controller), ["new", "a"]);

        controller
            .edit_entry(0, Entry::new("renamed", "data", None).unwrap())
            .unwrap();
        assert_eq!(reload_names(&controller), ["renamed", "a"]);
    }

    #[test]
    fn test_move_at_boundary_does_not_rewrite() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b"), ("c", "d")]);
        controller.select(Some(0));
        controller.move_selected_up();
        assert_eq!(reload_names(&controller), ["a", "c"]);
        assert_eq!(controller.state.list.selected(), Some(0));
    }

    #[test]
    fn test_quick_select_activates_row() {
        let dir = TempDir::new().unwrap();
        let mut controller =
            controller_with(&dir, &[("a", "text a"), ("b", "text b"), ("c", "text c")]);
        controller.show();
        controller.quick_select(2);

        assert_eq!(controller.desktop.copied, vec!["text c"]);
        assert_eq!(controller.state.visibility, Visibility::Hidden);
    }

    #[test]
    fn test_quick_select_out_of_range_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "text a")]);
        controller.quick_select(7);
        assert!(controller.desktop.copied.is_empty());
    }

    #[test]
    fn test_geometry_changes_persist_immediately() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);
        controller.window_moved(40, 50);
        controller.window_resized(640, 480);

        let document = controller.store.load().unwrap().document;
        assert_eq!(document.window_x, 40);
        assert_eq!(document.window_y, 50);
        assert_eq!(document.window_width, 640);
        assert_eq!(document.window_height, 480);
    }

    #[test]
    fn test_import_append_and_replace() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);

        controller.import_entries(
            vec![Entry::new("x", "y", None).unwrap()],
            ImportMode::Append,
        );
        assert_eq!(reload_names(&controller), ["a", "x"]);

        controller.import_entries(
            vec![Entry::new("only", "one", None).unwrap()],
            ImportMode::Replace,
        );
        assert_eq!(reload_names(&controller), ["only"]);
    }

    #[test]
    fn test_selection_navigation() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "1"), ("b", "2"), ("c", "3")]);

        controller.select_next();
        assert_eq!(controller.state.list.selected(), Some(0));
        controller.select_next();
        assert_eq!(controller.state.list.selected(), Some(1));
        controller.select_previous();
        assert_eq!(controller.state.list.selected(), Some(0));
        controller.select_previous();
        assert_eq!(controller.state.list.selected(), Some(0));
    }

    #[test]
    fn test_hotkey_change_persists() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_with(&dir, &[("a", "b")]);
        controller.hotkey_changed("ctrl+alt+m");

        let document = controller.store.load().unwrap().document;
        assert_eq!(document.hotkey, "ctrl+alt+m");
    }
}
