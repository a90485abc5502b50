use winit::keyboard::{Key, NamedKey};

use super::controller::Controller;
use crate::platform::Desktop;

const QUICK_SELECT_KEYS: &str = "0123456789abcdef";

/// Symbolic actions the popup responds to. Keeping the key table separate
/// from the handlers means the controller never sees toolkit event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hide,
    Activate,
    SelectPrevious,
    SelectNext,
    MoveUp,
    MoveDown,
    Delete,
    QuickSelect(usize),
    Quit,
}

/// Key table for the visible popup:
/// Escape hides, Enter activates, arrows move the focus, Ctrl+arrows
/// reorder, Delete removes (confirmed), Ctrl+0-9/A-F quick-selects,
/// Ctrl+X quits.
pub fn action_for_key(key: &Key, ctrl: bool) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Action::Hide),
        Key::Named(NamedKey::Enter) => Some(Action::Activate),
        Key::Named(NamedKey::ArrowUp) if ctrl => Some(Action::MoveUp),
        Key::Named(NamedKey::ArrowDown) if ctrl => Some(Action::MoveDown),
        Key::Named(NamedKey::ArrowUp) => Some(Action::SelectPrevious),
        Key::Named(NamedKey::ArrowDown) => Some(Action::SelectNext),
        Key::Named(NamedKey::Delete) => Some(Action::Delete),
        Key::Character(c) if ctrl => {
            let c = c.to_lowercase();
            if c == "x" {
                Some(Action::Quit)
            } else if c.len() == 1 {
                QUICK_SELECT_KEYS.find(c.as_str()).map(Action::QuickSelect)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub fn apply<D: Desktop>(action: Action, controller: &mut Controller<D>) {
    match action {
        Action::Hide => controller.hide(),
        Action::Activate => controller.activate_selected(),
        Action::SelectPrevious => controller.select_previous(),
        Action::SelectNext => controller.select_next(),
        Action::MoveUp => controller.move_selected_up(),
        Action::MoveDown => controller.move_selected_down(),
        Action::Delete => controller.delete_selected(),
        Action::QuickSelect(index) => controller.quick_select(index),
        Action::Quit => controller.quit(),
    }
}
