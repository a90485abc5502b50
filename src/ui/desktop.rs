use std::io::{self, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};
use tracing::warn;
use winit::window::Window;

use crate::clipboard;
use crate::platform::Desktop;

const TRAY_TOOLTIP: &str = "multiclip";

pub struct TrayHandle {
    _tray: TrayIcon,
    pub show_id: MenuId,
    pub quit_id: MenuId,
}

/// Real `Desktop` over winit + tray-icon. Holds the (single) popup window
/// and the tray icon; dropping the tray handle takes the icon down.
pub struct SystemDesktop {
    window: Rc<Window>,
    tray: Option<TrayHandle>,
}

impl SystemDesktop {
    pub fn new(window: Rc<Window>) -> Self {
        Self { window, tray: None }
    }

    pub fn tray_ids(&self) -> Option<(MenuId, MenuId)> {
        self.tray
            .as_ref()
            .map(|t| (t.show_id.clone(), t.quit_id.clone()))
    }
}

impl Desktop for SystemDesktop {
    fn show_window(&mut self) {
        self.window.set_visible(true);
        self.window.focus_window();
    }

    fn hide_window(&mut self) {
        self.window.set_visible(false);
    }

    fn set_clipboard_text(&mut self, text: &str) {
        clipboard::copy_detached(text);
    }

    fn open_in_browser(&mut self, url: &str) {
        if let Err(error) = open::that(url) {
            warn!(%error, url, "failed to open browser");
        }
    }

    fn play_cue(&mut self) {
        // Terminal bell from a detached thread; see DESIGN.md for why
        // there is no audio backend here.
        std::thread::spawn(|| {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        });
    }

    fn show_tray_icon(&mut self) {
        if self.tray.is_some() {
            return;
        }
        match build_tray() {
            Ok(handle) => self.tray = Some(handle),
            Err(error) => warn!(%error, "failed to create tray icon"),
        }
    }

    fn remove_tray_icon(&mut self) {
        self.tray = None;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} (y/N): ");
        let _ = io::stderr().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        let input = input.trim().to_lowercase();
        input == "y" || input == "yes"
    }

    fn notify(&mut self, message: &str) {
        warn!("{message}");
        eprintln!("{message}");
    }
}

fn build_tray() -> Result<TrayHandle> {
    let menu = Menu::new();
    let show_item = MenuItem::new("Show", true, None);
    let quit_item = MenuItem::new("Quit", true, None);
    let show_id = show_item.id().clone();
    let quit_id = quit_item.id().clone();
    menu.append(&show_item).context("tray menu append")?;
    menu.append(&quit_item).context("tray menu append")?;

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(TRAY_TOOLTIP)
        .with_icon(tray_icon_image())
        .build()
        .context("tray icon build")?;

    Ok(TrayHandle {
        _tray: tray,
        show_id,
        quit_id,
    })
}

/// Flat two-tone icon drawn in code: teal fill, pale green border, the
/// colors the popup window frame uses.
fn tray_icon_image() -> tray_icon::Icon {
    const SIZE: u32 = 32;
    const BORDER: u32 = 3;
    const FILL: [u8; 4] = [0x66, 0x99, 0x99, 0xFF];
    const EDGE: [u8; 4] = [0x77, 0xDD, 0x77, 0xFF];

    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let on_edge =
                x < BORDER || y < BORDER || x >= SIZE - BORDER || y >= SIZE - BORDER;
            rgba.extend_from_slice(if on_edge { &EDGE } else { &FILL });
        }
    }

    // Infallible for a well-formed buffer of this size.
    tray_icon::Icon::from_rgba(rgba, SIZE, SIZE).expect("static icon dimensions")
}
