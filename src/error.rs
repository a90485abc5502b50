use thiserror::Error;

/// Failure modes of the snippet store and hotkey registration.
///
/// All of these are recoverable: they are reported to the user and the
/// in-memory state is left untouched (or reset to defaults, for a corrupt
/// data file). None of them terminate the process.
#[derive(Debug, Error)]
pub enum Error {
    /// The data file exists but is not valid JSON, or its `data` field is
    /// not a list. Recovered by resetting to defaults.
    #[error("corrupt data file: {0}")]
    CorruptDataFile(String),

    /// Rejected user input: empty name/data on add or edit, or an import
    /// source without a list-typed `data` field.
    #[error("{0}")]
    Validation(String),

    /// Unparseable, denylisted, or already-claimed hotkey combination.
    /// The previously registered hotkey stays active.
    #[error("invalid hotkey {0:?}")]
    InvalidHotkey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_corrupt_data_file(&self) -> bool {
        matches!(self, Error::CorruptDataFile(_))
    }
}
