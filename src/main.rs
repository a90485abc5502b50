use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use multiclip::cli::{Cli, Commands};
use multiclip::hotkey::Binding;
use multiclip::snippet::{Entry, ImportMode, SnippetList};
use multiclip::storage::{Document, Store};
use multiclip::{ui, utils};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let data_file = match cli.data_file {
        Some(path) => path,
        None => utils::paths::get_data_file_path()?,
    };
    let store = Store::new(data_file);

    match cli.command {
        Some(Commands::List) => handle_list(&store)?,
        Some(Commands::Add { name, data, color }) => handle_add(&store, &name, &data, color)?,
        Some(Commands::Edit {
            index,
            name,
            data,
            color,
        }) => handle_edit(&store, index, name, data, color)?,
        Some(Commands::Remove { index, yes }) => handle_remove(&store, index, yes)?,
        Some(Commands::Import { path, replace }) => handle_import(&store, &path, replace)?,
        Some(Commands::Export { path }) => handle_export(&store, &path)?,
        Some(Commands::Hotkey { combo }) => handle_hotkey(&store, &combo)?,
        None => ui::run_shell(store)?,
    }

    Ok(())
}

fn load_document(store: &Store) -> Result<Document> {
    let outcome = store.load()?;
    if let Some(recovered) = outcome.recovered {
        eprintln!("Warning: {recovered}; data file was reset to defaults.");
    }
    Ok(outcome.document)
}

fn handle_list(store: &Store) -> Result<()> {
    let document = load_document(store)?;

    if document.data.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    for (idx, entry) in document.data.iter().enumerate() {
        let token = SnippetList::quick_select_label(idx)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let kind = if entry.is_url() { "url" } else { "text" };
        println!("{token} {:<20} [{kind}] {}", entry.name, entry.data);
    }

    Ok(())
}

fn handle_add(store: &Store, name: &str, data: &str, color: Option<String>) -> Result<()> {
    let mut document = load_document(store)?;
    let entry = Entry::new(name, data, color.as_deref())?;

    let mut list = SnippetList::new(document.data);
    list.add(entry);
    document.data = list.entries;

    store.save(&document)?;
    println!("✓ Entry added.");
    Ok(())
}

fn handle_edit(
    store: &Store,
    index: usize,
    name: Option<String>,
    data: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let mut document = load_document(store)?;
    let mut list = SnippetList::new(document.data);

    let current = list
        .entries
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("no entry at index {index}"))?
        .clone();
    let entry = Entry::new(
        name.as_deref().unwrap_or(&current.name),
        data.as_deref().unwrap_or(&current.data),
        Some(color.as_deref().unwrap_or(&current.color)),
    )?;

    list.edit(index, entry)?;
    document.data = list.entries;

    store.save(&document)?;
    println!("✓ Entry {index} updated.");
    Ok(())
}

fn handle_remove(store: &Store, index: usize, yes: bool) -> Result<()> {
    let mut document = load_document(store)?;
    let mut list = SnippetList::new(document.data);

    let name = list
        .entries
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("no entry at index {index}"))?
        .name
        .clone();

    if !yes && !prompt_yes_no(&format!("Delete {name:?}? (y/N): "))? {
        println!("Aborted.");
        return Ok(());
    }

    list.remove(index)?;
    document.data = list.entries;

    store.save(&document)?;
    println!("✓ Removed {name:?}.");
    Ok(())
}

fn handle_import(store: &Store, path: &PathBuf, replace: bool) -> Result<()> {
    let mut document = load_document(store)?;
    let entries = Store::import(path)?;
    let count = entries.len();

    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };
    let mut list = SnippetList::new(document.data);
    list.import(entries, mode);
    document.data = list.entries;

    store.save(&document)?;
    println!(
        "✓ Imported {count} entr{} ({}).",
        if count == 1 { "y" } else { "ies" },
        if replace { "replaced" } else { "appended" }
    );
    Ok(())
}

fn handle_export(store: &Store, path: &PathBuf) -> Result<()> {
    let document = load_document(store)?;
    Store::export(&document, path)?;
    println!("✓ Exported to {}.", path.display());
    Ok(())
}

fn handle_hotkey(store: &Store, combo: &str) -> Result<()> {
    let binding = Binding::parse(combo)?;

    let mut document = load_document(store)?;
    document.hotkey = binding.label().to_string();
    store.save(&document)?;

    println!("✓ Hotkey set to {binding}.");
    Ok(())
}

fn prompt_yes_no(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
