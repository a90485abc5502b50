use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::snippet::Entry;

pub const DEFAULT_HOTKEY: &str = "ctrl+alt+p";
pub const DEFAULT_WIDTH: u32 = 850;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_X: i32 = 100;
pub const DEFAULT_Y: i32 = 100;

/// Window placement, persisted alongside the entries. `clamp_to_screen`
/// keeps the window fully on-screen after a load from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: DEFAULT_X,
            y: DEFAULT_Y,
        }
    }
}

impl Geometry {
    /// Recenters an overflowing window, then pins negative origins to the
    /// screen edge. Same adjustment the window does at startup.
    pub fn clamp_to_screen(&mut self, screen_width: u32, screen_height: u32) {
        if self.x as i64 + self.width as i64 > screen_width as i64 {
            self.x = (screen_width as i64 - self.width as i64) as i32 / 2;
        }
        if self.y as i64 + self.height as i64 > screen_height as i64 {
            self.y = (screen_height as i64 - self.height as i64) as i32 / 2;
        }
        if self.x < 0 {
            self.x = 0;
        }
        if self.y < 0 {
            self.y = 0;
        }
    }
}

/// The on-disk JSON document: hotkey, window geometry, and the ordered
/// entry list. Rewritten wholesale on every mutating operation; unknown
/// top-level keys are ignored on read and absent keys fall back to
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    #[serde(default = "default_width")]
    pub window_width: u32,
    #[serde(default = "default_height")]
    pub window_height: u32,
    #[serde(default = "default_x")]
    pub window_x: i32,
    #[serde(default = "default_y")]
    pub window_y: i32,
    #[serde(default)]
    pub data: Vec<Entry>,
}

fn default_hotkey() -> String {
    DEFAULT_HOTKEY.to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_x() -> i32 {
    DEFAULT_X
}

fn default_y() -> i32 {
    DEFAULT_Y
}

impl Default for Document {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
            window_x: DEFAULT_X,
            window_y: DEFAULT_Y,
            data: Vec::new(),
        }
    }
}

impl Document {
    /// The document written on first run: defaults plus one example entry.
    pub fn first_run() -> Self {
        Self {
            data: vec![example_entry()],
            ..Self::default()
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.window_width,
            height: self.window_height,
            x: self.window_x,
            y: self.window_y,
        }
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.window_width = geometry.width;
        self.window_height = geometry.height;
        self.window_x = geometry.x;
        self.window_y = geometry.y;
    }

    /// Parses a document from already-valid JSON. Fails with
    /// `CorruptDataFile` when the top level is not an object or `data` is
    /// present but not a list.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::CorruptDataFile("top level is not an object".to_string()))?;

        let data = match obj.get("data") {
            None => Vec::new(),
            Some(raw) if raw.is_array() => {
                serde_json::from_value::<Vec<Entry>>(raw.clone()).map_err(|e| {
                    Error::CorruptDataFile(format!("entry list failed to parse: {e}"))
                })?
            }
            Some(_) => {
                return Err(Error::CorruptDataFile("`data` is not a list".to_string()));
            }
        };

        let mut document = Self::salvage(value);
        document.data = data;
        Ok(document)
    }

    /// Best-effort reset after a corrupt load: defaults, keeping whichever
    /// top-level scalar fields still parse, and the example entry in place
    /// of whatever `data` held.
    pub fn recovered_from(value: &Value) -> Self {
        let mut document = Self::salvage(value);
        document.data = vec![example_entry()];
        document
    }

    fn salvage(value: &Value) -> Self {
        let mut document = Self::default();
        if let Some(hotkey) = value.get("hotkey").and_then(Value::as_str) {
            document.hotkey = hotkey.to_string();
        }
        if let Some(width) = read_u32(value, "window_width") {
            document.window_width = width;
        }
        if let Some(height) = read_u32(value, "window_height") {
            document.window_height = height;
        }
        if let Some(x) = value.get("window_x").and_then(Value::as_i64) {
            document.window_x = x as i32;
        }
        if let Some(y) = value.get("window_y").and_then(Value::as_i64) {
            document.window_y = y as i32;
        }
        document
    }
}

// Width and height are contractually positive; junk values fall back to
// the defaults instead of producing a zero-sized window.
fn read_u32(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .filter(|&v| v > 0 && v <= u32::MAX as u64)
        .map(|v| v as u32)
}

pub fn example_entry() -> Entry {
    Entry {
        name: "Example".to_string(),
        data: "http://example.com".to_string(),
        color: "#FFB3BA".to_string(),
    }
}
