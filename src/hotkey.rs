use std::fmt;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::GlobalHotKeyManager;
use tracing::info;

use crate::error::{Error, Result};

/// Plain-Ctrl combinations that stay with the applications they belong to.
/// Registering any of these globally would hijack common editing shortcuts.
const DENYLISTED_CTRL_KEYS: &[char] = &[
    'c', 'v', 'x', 'a', 's', 'z', 'y', 'p', 'n', 'o', 'f', 'h', 'g', 't', 'w', 'q', 'r', 'e',
    'd', 'b', 'u', 'i', 'k', 'l', 'm',
];

/// A parsed global hotkey: modifier set plus one key. The canonical string
/// form (`ctrl+alt+p`) is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    modifiers: Modifiers,
    code: Code,
    label: String,
}

impl Binding {
    /// Parses a `+`-separated combination, case-insensitively. Fails with
    /// `InvalidHotkey` on unknown tokens, missing or repeated keys, and
    /// denylisted combinations.
    pub fn parse(combo: &str) -> Result<Self> {
        let invalid = || Error::InvalidHotkey(combo.to_string());

        let mut modifiers = Modifiers::empty();
        let mut key: Option<(Code, String)> = None;

        for part in combo.split('+').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
                "alt" | "option" => modifiers |= Modifiers::ALT,
                "shift" => modifiers |= Modifiers::SHIFT,
                "cmd" | "command" | "meta" | "win" | "super" => modifiers |= Modifiers::META,
                token => {
                    let code = key_code(token).ok_or_else(invalid)?;
                    if key.replace((code, token.to_string())).is_some() {
                        return Err(invalid());
                    }
                }
            }
        }

        let (code, key_token) = key.ok_or_else(invalid)?;

        let denylisted = modifiers == Modifiers::CONTROL
            && key_token
                .chars()
                .next()
                .is_some_and(|c| key_token.len() == 1 && DENYLISTED_CTRL_KEYS.contains(&c));
        if denylisted {
            return Err(invalid());
        }

        Ok(Self {
            modifiers,
            code,
            label: canonical_label(modifiers, &key_token),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hotkey(&self) -> HotKey {
        HotKey::new(Some(self.modifiers), self.code)
    }

    pub fn id(&self) -> u32 {
        self.hotkey().id()
    }

}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn canonical_label(modifiers: Modifiers, key: &str) -> String {
    let mut parts = Vec::new();
    if modifiers.contains(Modifiers::CONTROL) {
        parts.push("ctrl");
    }
    if modifiers.contains(Modifiers::ALT) {
        parts.push("alt");
    }
    if modifiers.contains(Modifiers::SHIFT) {
        parts.push("shift");
    }
    if modifiers.contains(Modifiers::META) {
        parts.push("meta");
    }
    parts.push(key);
    parts.join("+")
}

fn key_code(token: &str) -> Option<Code> {
    let code = match token {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "f13" => Code::F13,
        "f14" => Code::F14,
        "f15" => Code::F15,
        "f16" => Code::F16,
        "f17" => Code::F17,
        "f18" => Code::F18,
        "f19" => Code::F19,
        "f20" => Code::F20,
        "f21" => Code::F21,
        "f22" => Code::F22,
        "f23" => Code::F23,
        "f24" => Code::F24,
        _ => return None,
    };
    Some(code)
}

/// The OS-level registration surface, split out so tests run against a
/// fake instead of the real process-wide manager.
pub trait HotkeyBackend {
    fn register(&mut self, binding: &Binding) -> Result<()>;
    fn unregister(&mut self, binding: &Binding) -> Result<()>;
}

/// Real backend over `global_hotkey`. One manager per process.
pub struct GlobalHotKeyBackend {
    manager: GlobalHotKeyManager,
}

impl GlobalHotKeyBackend {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| Error::InvalidHotkey(format!("hotkey manager unavailable: {e}")))?;
        Ok(Self { manager })
    }
}

impl HotkeyBackend for GlobalHotKeyBackend {
    fn register(&mut self, binding: &Binding) -> Result<()> {
        self.manager
            .register(binding.hotkey())
            .map_err(|_| Error::InvalidHotkey(binding.label().to_string()))
    }

    fn unregister(&mut self, binding: &Binding) -> Result<()> {
        self.manager
            .unregister(binding.hotkey())
            .map_err(|_| Error::InvalidHotkey(binding.label().to_string()))
    }
}

/// Keeps at most one global hotkey registered at a time. The new binding
/// is registered before the old one is torn down, so a failed registration
/// (denylisted, unparseable, or claimed elsewhere) leaves the previous
/// hotkey active.
pub struct HotkeyService<B: HotkeyBackend> {
    backend: B,
    active: Option<Binding>,
}

impl<B: HotkeyBackend> HotkeyService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&Binding> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<u32> {
        self.active.as_ref().map(Binding::id)
    }

    pub fn register(&mut self, combo: &str) -> Result<()> {
        let binding = Binding::parse(combo)?;

        if self.active.as_ref() == Some(&binding) {
            return Ok(());
        }

        self.backend.register(&binding)?;
        if let Some(previous) = self.active.take() {
            // The new binding already works; losing the teardown would at
            // worst leak a dead registration, so don't fail over it.
            if let Err(error) = self.backend.unregister(&previous) {
                info!(%error, "failed to unregister previous hotkey");
            }
        }
        info!(hotkey = %binding, "global hotkey registered");
        self.active = Some(binding);
        Ok(())
    }

    /// Explicit teardown half of the registration lifecycle.
    pub fn clear(&mut self) {
        if let Some(previous) = self.active.take() {
            let _ = self.backend.unregister(&previous);
        }
    }
}
