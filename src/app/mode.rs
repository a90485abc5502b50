use std::fmt;

/// Whether the popup window is on screen. The app is tray-resident
/// whenever it is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Hidden => write!(f, "HIDDEN"),
            Visibility::Visible => write!(f, "VISIBLE"),
        }
    }
}
