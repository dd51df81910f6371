//! Blockdown - a block-structured markdown editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! blockdown
//! blockdown notes.md
//! blockdown --theme sepia --width 100 notes.md
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockdown::app::App;
use blockdown::config::{
    ConfigFlags, Settings, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use blockdown::document::{Document, welcome};
use blockdown::io::{FileHost, LocalFiles, ReadOnlyFiles};

/// A block-structured markdown editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "blockdown", version, about, long_about = None)]
struct Cli {
    /// Markdown file to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Content column width in cells (40-160)
    #[arg(long, value_name = "N")]
    width: Option<u16>,

    /// Blank rows between blocks (0-3)
    #[arg(long, value_name = "N")]
    spacing: Option<u8>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Open files but refuse to save
    #[arg(long)]
    read_only: bool,

    /// Write logs to this file (the terminal is taken by the editor)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Read `path`, or start an empty document if it does not exist yet.
fn load_document(files: &dyn FileHost, path: &Path) -> Result<Document> {
    match files.open(&path.to_string_lossy()) {
        Ok(opened) => Ok(Document::parse(&opened.content)),
        Err(err) if err.is_not_found() => {
            tracing::info!(path = %path.display(), "file does not exist yet; starting empty");
            Ok(Document::empty())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to open {}", path.display())),
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "resolved flags");

    let files: Box<dyn FileHost> = if effective.read_only {
        Box::new(ReadOnlyFiles::new(LocalFiles::new()))
    } else {
        Box::new(LocalFiles::new())
    };

    let app = match cli.file {
        Some(path) => App::new(load_document(files.as_ref(), &path)?).with_file_path(path),
        None => App::new(welcome()),
    };
    let app = app
        .with_file_host(files, effective.read_only)
        .with_settings(Settings::from_flags(&effective))
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    app.run().context("Application error")
}
