use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use super::document::Document;
use crate::error::{Error, Result};
use crate::snippet::Entry;

/// Serialization boundary for the persisted document. Holds no state of
/// its own: the controller owns the live document and calls back in after
/// every mutation.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

/// What `load` produced. `recovered` carries the corruption error when the
/// file had to be reset to defaults; the caller surfaces it to the user.
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: Document,
    pub recovered: Option<Error>,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, creating it with defaults on first run and
    /// resetting it (best-effort salvage, then persist) when corrupt.
    /// Only real I/O failures are hard errors.
    pub fn load(&self) -> Result<LoadOutcome> {
        if !self.path.exists() {
            let document = Document::first_run();
            self.save(&document)?;
            return Ok(LoadOutcome {
                document,
                recovered: None,
            });
        }

        let content = fs::read_to_string(&self.path)?;

        let (value, parsed) = match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                let parsed = Document::from_value(&value);
                (value, parsed)
            }
            Err(e) => (
                Value::Null,
                Err(Error::CorruptDataFile(format!("not valid JSON: {e}"))),
            ),
        };

        match parsed {
            Ok(document) => Ok(LoadOutcome {
                document,
                recovered: None,
            }),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "resetting corrupt data file");
                let document = Document::recovered_from(&value);
                self.save(&document)?;
                Ok(LoadOutcome {
                    document,
                    recovered: Some(error),
                })
            }
        }
    }

    /// Rewrites the whole document. Temp file plus rename, so a reader
    /// never observes a partial write.
    pub fn save(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| Error::Validation(format!("document failed to serialize: {e}")))?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Writes a pretty-printed snapshot of the full document to an
    /// arbitrary external path.
    pub fn export(document: &Document, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| Error::Validation(format!("document failed to serialize: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reads entries from an external file. The source must be a JSON
    /// object with a list-typed `data` field; anything else is rejected
    /// without touching existing data.
    pub fn import(path: &Path) -> Result<Vec<Entry>> {
        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str::<Value>(&content)
            .map_err(|e| Error::Validation(format!("import source is not valid JSON: {e}")))?;

        let data = value
            .as_object()
            .and_then(|obj| obj.get("data"))
            .filter(|raw| raw.is_array())
            .ok_or_else(|| {
                Error::Validation(
                    "import source must be an object with a `data` list".to_string(),
                )
            })?;

        serde_json::from_value::<Vec<Entry>>(data.clone())
            .map_err(|e| Error::Validation(format!("imported entries failed to parse: {e}")))
    }
}
