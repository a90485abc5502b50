use super::mode::Visibility;
use crate::snippet::SnippetList;
use crate::storage::{Document, Geometry};

/// Live application state. The controller owns this exclusively; the
/// store never keeps its own copy.
#[derive(Debug)]
pub struct AppState {
    pub list: SnippetList,
    pub hotkey: String,
    pub geometry: Geometry,
    pub visibility: Visibility,
    pub tray_present: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn from_document(document: Document) -> Self {
        Self {
            hotkey: document.hotkey.clone(),
            geometry: document.geometry(),
            list: SnippetList::new(document.data),
            visibility: Visibility::Hidden,
            tray_present: false,
            should_quit: false,
        }
    }

    /// Snapshot for persistence and export. Rebuilt in full on every save;
    /// the document is always rewritten wholesale.
    pub fn to_document(&self) -> Document {
        let mut document = Document {
            hotkey: self.hotkey.clone(),
            data: self.list.entries.clone(),
            ..Document::default()
        };
        document.set_geometry(self.geometry);
        document
    }

    /// Swaps in a freshly loaded document (external change), keeping the
    /// selection where it still points at a row.
    pub fn replace_document(&mut self, document: Document) {
        let selected = self.list.selected();
        self.hotkey = document.hotkey.clone();
        self.geometry = document.geometry();
        self.list = SnippetList::new(document.data);
        self.list.select(selected);
    }

    /// The row to focus when the window comes up: the last selected one,
    /// or the first row when nothing was selected yet.
    pub fn restore_selection(&mut self) {
        if self.list.selected().is_none() && !self.list.is_empty() {
            self.list.select(Some(0));
        }
    }
}
