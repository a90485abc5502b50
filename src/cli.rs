use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "multiclip")]
#[command(about = "A tray-resident clipboard snippet launcher", long_about = None)]
pub struct Cli {
    /// Path of the data file (default: ~/.multiclip/data.json)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the entries with their quick-select tokens
    List,
    /// Add an entry (inserted at the end)
    Add {
        name: String,
        /// Text to copy, or an http(s) URL to open
        data: String,
        /// Hex color, e.g. #BAFFC9
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit the entry at the given position
    Edit {
        index: usize,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        data: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove the entry at the given position
    Remove {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import entries from a JSON file
    Import {
        path: PathBuf,
        /// Discard the current entries instead of appending
        #[arg(long)]
        replace: bool,
    },
    /// Export the full document, pretty-printed
    Export { path: PathBuf },
    /// Validate and persist a new global hotkey, e.g. "ctrl+alt+p"
    Hotkey { combo: String },
}
