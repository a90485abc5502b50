use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed color palette offered for entries. Not persisted; the first color
/// is the default for entries loaded without one.
pub const PALETTE: [&str; 9] = [
    "#D3D3D3", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#D1BAFF", "#FFB3E6", "#FFB3FF",
    "#E6B3FF",
];

/// One clipboard/URL snippet. Identity is positional: an entry is
/// identified by its index in the list, so reordering changes identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub data: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    PALETTE[0].to_string()
}

impl Entry {
    /// Builds an entry, rejecting empty name or data. Whitespace-only input
    /// counts as empty, matching what the add/edit dialogs accepted.
    pub fn new(name: &str, data: &str, color: Option<&str>) -> Result<Self> {
        let name = name.trim();
        let data = data.trim();
        if name.is_empty() || data.is_empty() {
            return Err(Error::Validation(
                "name and data cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            data: data.to_string(),
            color: color.unwrap_or(PALETTE[0]).to_string(),
        })
    }

    /// Whether activating this entry opens a browser rather than copying.
    pub fn is_url(&self) -> bool {
        self.data.starts_with("http://") || self.data.starts_with("https://")
    }
}
