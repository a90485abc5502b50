/// Capability surface the activation controller drives. Everything the
/// desktop toolkit does for us goes through here, so the controller can be
/// tested against a fake and the shell stays a thin adapter.
pub trait Desktop {
    fn show_window(&mut self);
    fn hide_window(&mut self);

    /// Fire-and-forget: the copy may still be in flight when the window
    /// hides, and may be abandoned if the process exits right after.
    fn set_clipboard_text(&mut self, text: &str);

    fn open_in_browser(&mut self, url: &str);

    /// Audible confirmation after an activation. Fire-and-forget.
    fn play_cue(&mut self);

    /// Puts the tray icon up. Implementations are idempotent; the
    /// controller additionally guards against repeat calls.
    fn show_tray_icon(&mut self);

    fn remove_tray_icon(&mut self);

    /// Yes/no prompt for destructive actions (delete).
    fn confirm(&mut self, prompt: &str) -> bool;

    /// User-visible report of a recoverable error.
    fn notify(&mut self, message: &str);
}
