//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
pub mod menu;
mod model;
mod update;

pub use model::{GUTTER_WIDTH, Model, PathPrompt, PromptKind, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::Settings;
use crate::document::{DEFAULT_FILE_NAME, Document};
use crate::io::{FileHost, LocalFiles};

/// Main application struct that owns the file host and runs the event loop.
pub struct App {
    document: Document,
    file_name: String,
    file_path: Option<PathBuf>,
    files: Box<dyn FileHost>,
    settings: Settings,
    read_only: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application editing `document`.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_path: None,
            files: Box::new(LocalFiles::new()),
            settings: Settings::default(),
            read_only: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Name the document after `path`; saving suggests it.
    #[must_use]
    pub fn with_file_path(mut self, path: PathBuf) -> Self {
        self.file_name = crate::io::display_name(&path);
        self.file_path = Some(path);
        self
    }

    /// Use a different file host for open and save.
    #[must_use]
    pub fn with_file_host(mut self, files: Box<dyn FileHost>, read_only: bool) -> Self {
        self.files = files;
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub const fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Initial model for a terminal of `size`.
    fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(self.file_name.clone(), self.document.clone(), size)
            .with_settings(self.settings);
        model.file_path.clone_from(&self.file_path);
        model.read_only = self.read_only;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}
