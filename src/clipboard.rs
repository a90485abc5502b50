use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::warn;

/// Copy text to the system clipboard.
///
/// Returns Ok(()) on success, or an error if clipboard is unavailable.
/// On Linux, clipboard contents persist while the application is running.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy text to clipboard")?;
    Ok(())
}

/// Fire-and-forget copy on a detached thread. Used on activation so the
/// window can hide without waiting on the clipboard; a failure is only
/// logged.
pub fn copy_detached(text: &str) {
    let text = text.to_string();
    std::thread::spawn(move || {
        if let Err(error) = copy_to_clipboard(&text) {
            warn!(%error, "clipboard copy failed");
        }
    });
}
