pub mod desktop;

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tray_icon::menu::MenuEvent;
use tray_icon::TrayIconEvent;
use tracing::{info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

use crate::app::event::{action_for_key, apply};
use crate::app::{AppState, Controller, Visibility};
use crate::hotkey::{GlobalHotKeyBackend, HotkeyService};
use crate::platform::Desktop;
use crate::storage::Store;
use desktop::SystemDesktop;

/// Events posted into the UI loop by the background listeners. The
/// listeners themselves never touch app state.
#[derive(Debug)]
enum UserEvent {
    Hotkey(u32),
    Menu(MenuEvent),
    Tray(TrayIconEvent),
    DataFileChanged,
}

/// Runs the tray-resident shell: frameless popup window, tray icon,
/// global hotkey, and a watcher that picks up CLI edits to the data file.
pub fn run_shell(store: Store) -> Result<()> {
    let outcome = store.load()?;
    let recovered = outcome.recovered;
    let state = AppState::from_document(outcome.document);
    let geometry = state.geometry;

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event()
        .build()
        .context("event loop")?;

    let window = Rc::new(
        WindowBuilder::new()
            .with_title("multiclip")
            .with_decorations(false)
            .with_visible(false)
            .with_inner_size(LogicalSize::new(
                geometry.width as f64,
                geometry.height as f64,
            ))
            .build(&event_loop)
            .context("window")?,
    );

    let mut controller = Controller::new(state, store.clone(), SystemDesktop::new(window.clone()));
    if let Some(error) = recovered {
        controller
            .desktop_mut()
            .notify(&format!("{error}; data file was reset to defaults."));
    }

    // Keep the persisted placement fully on-screen before first show.
    if let Some(monitor) = event_loop.primary_monitor() {
        let screen = monitor.size();
        let clamped = controller.clamp_geometry(screen.width, screen.height);
        window.set_outer_position(PhysicalPosition::new(clamped.x, clamped.y));
        let _ = window.request_inner_size(PhysicalSize::new(clamped.width, clamped.height));
    }

    let mut hotkeys = HotkeyService::new(GlobalHotKeyBackend::new()?);
    let startup_hotkey = controller.state().hotkey.clone();
    if let Err(error) = hotkeys.register(&startup_hotkey) {
        controller
            .desktop_mut()
            .notify(&format!("Could not register global hotkey: {error}"));
    }

    spawn_listeners(event_loop.create_proxy());
    let _watcher = setup_data_file_watcher(store.path(), event_loop.create_proxy());

    // Start tray-resident, same as the original: tray up, window hidden.
    controller.hide();
    info!(hotkey = %startup_hotkey, "multiclip resident; press the hotkey to open");

    let mut ctrl_pressed = false;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(UserEvent::Hotkey(id)) => {
                    if hotkeys.active_id() == Some(id) {
                        controller.show();
                    }
                }
                Event::UserEvent(UserEvent::Menu(menu_event)) => {
                    if let Some((show_id, quit_id)) = controller.desktop().tray_ids() {
                        if menu_event.id == show_id {
                            controller.show();
                        } else if menu_event.id == quit_id {
                            controller.quit();
                        }
                    }
                }
                Event::UserEvent(UserEvent::Tray(TrayIconEvent::DoubleClick { .. })) => {
                    controller.show();
                }
                Event::UserEvent(UserEvent::Tray(_)) => {}
                Event::UserEvent(UserEvent::DataFileChanged) => {
                    // Our own saves land here too; reloading is idempotent.
                    controller.reload();
                    let label = controller.state().hotkey.clone();
                    let active = hotkeys.active().map(|b| b.label().to_string());
                    if active.as_deref() != Some(label.as_str()) {
                        if let Err(error) = hotkeys.register(&label) {
                            controller
                                .desktop_mut()
                                .notify(&format!("Could not register global hotkey: {error}"));
                        }
                    }
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => controller.quit(),
                    WindowEvent::Resized(size)
                        if controller.state().visibility == Visibility::Visible =>
                    {
                        controller.window_resized(size.width, size.height);
                    }
                    WindowEvent::Moved(position)
                        if controller.state().visibility == Visibility::Visible =>
                    {
                        controller.window_moved(position.x, position.y);
                    }
                    WindowEvent::ModifiersChanged(modifiers) => {
                        ctrl_pressed = modifiers.state().control_key();
                    }
                    WindowEvent::KeyboardInput {
                        event: key_event, ..
                    } => {
                        if key_event.state == ElementState::Pressed && !key_event.repeat {
                            if let Some(action) =
                                action_for_key(&key_event.logical_key, ctrl_pressed)
                            {
                                apply(action, &mut controller);
                            }
                        }
                    }
                    _ => {}
                },
                _ => {}
            }

            if controller.should_quit() {
                elwt.exit();
            }
        })
        .context("event loop run")?;

    Ok(())
}

/// Forwarder threads for the process-global hotkey, tray-menu and
/// tray-icon receivers. Notify-only: they post into the loop and never
/// mutate state themselves.
fn spawn_listeners(proxy: EventLoopProxy<UserEvent>) {
    let hotkey_proxy = proxy.clone();
    std::thread::spawn(move || {
        let rx = GlobalHotKeyEvent::receiver();
        while let Ok(event) = rx.recv() {
            if event.state() == HotKeyState::Pressed {
                let _ = hotkey_proxy.send_event(UserEvent::Hotkey(event.id()));
            }
        }
    });

    let menu_proxy = proxy.clone();
    std::thread::spawn(move || {
        let rx = MenuEvent::receiver();
        while let Ok(event) = rx.recv() {
            let _ = menu_proxy.send_event(UserEvent::Menu(event));
        }
    });

    std::thread::spawn(move || {
        let rx = TrayIconEvent::receiver();
        while let Ok(event) = rx.recv() {
            let _ = proxy.send_event(UserEvent::Tray(event));
        }
    });
}

/// Watches the data file so CLI edits show up in the resident shell.
/// The parent directory is watched because saves replace the file by
/// rename.
fn setup_data_file_watcher(
    path: &Path,
    proxy: EventLoopProxy<UserEvent>,
) -> Option<RecommendedWatcher> {
    let data_path = path.to_path_buf();
    let watch_dir = data_path.parent()?.to_path_buf();

    let watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let relevant = (event.kind.is_modify() || event.kind.is_create())
                    && event.paths.iter().any(|p| p == &data_path);
                if relevant {
                    let _ = proxy.send_event(UserEvent::DataFileChanged);
                }
            }
        },
        notify::Config::default(),
    );

    match watcher {
        Ok(mut w) => {
            if let Err(error) = w.watch(&watch_dir, RecursiveMode::NonRecursive) {
                warn!(%error, "data file watcher unavailable");
                return None;
            }
            Some(w)
        }
        Err(error) => {
            warn!(%error, "data file watcher unavailable");
            None
        }
    }
}
