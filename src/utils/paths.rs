use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_multiclip_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".multiclip"))
}

/// Default location of the persisted document, overridable per invocation
/// with `--data-file`.
pub fn get_data_file_path() -> Result<PathBuf> {
    Ok(get_multiclip_dir()?.join("data.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_multiclip_dir() {
        let dir = get_multiclip_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".multiclip"));
    }

    #[test]
    fn test_get_data_file_path() {
        let path = get_data_file_path().unwrap();
        assert!(path.to_string_lossy().contains(".multiclip"));
        assert!(path.to_string_lossy().ends_with("data.json"));
    }
}
