pub mod app;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod hotkey;
pub mod platform;
pub mod snippet;
pub mod storage;
pub mod ui;
pub mod utils;
