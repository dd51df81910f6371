//! File open/save collaborators.
//!
//! The editor talks to the filesystem only through [`FileHost`], so the app
//! can run read-only or against a test double.

use std::fs;
use std::path::{Path, PathBuf};

/// Errors from opening or saving a file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The host cannot perform this operation at all.
    #[error("{0}")]
    CapabilityUnsupported(String),
    /// The user dismissed the prompt. Not reported.
    #[error("cancelled")]
    UserCancelled,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Whether the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A file read from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    pub content: String,
    /// Display name (final path component).
    pub name: String,
    pub path: PathBuf,
}

/// Open and save through whatever the host provides.
pub trait FileHost {
    /// Write `content` to the location named by `suggested_name` and return
    /// the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UserCancelled`] for an empty name and
    /// [`FileError::Io`] if the write fails.
    fn save(&self, content: &str, suggested_name: &str) -> Result<PathBuf, FileError>;

    /// Read the file named by `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UserCancelled`] for an empty name and
    /// [`FileError::Io`] if the read fails.
    fn open(&self, name: &str) -> Result<OpenedFile, FileError>;
}

/// Reads and writes local files with `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct LocalFiles {
    base_dir: Option<PathBuf>,
}

impl LocalFiles {
    pub const fn new() -> Self {
        Self { base_dir: None }
    }

    /// Resolve relative names against `dir` instead of the working directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FileError::UserCancelled);
        }
        let path = Path::new(name);
        Ok(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl FileHost for LocalFiles {
    fn save(&self, content: &str, suggested_name: &str) -> Result<PathBuf, FileError> {
        let path = self.resolve(suggested_name)?;
        fs::write(&path, content).map_err(|source| FileError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = content.len(), "saved file");
        Ok(path)
    }

    fn open(&self, name: &str) -> Result<OpenedFile, FileError> {
        let path = self.resolve(name)?;
        let content = fs::read_to_string(&path).map_err(|source| FileError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = content.len(), "opened file");
        Ok(OpenedFile {
            content,
            name: display_name(&path),
            path,
        })
    }
}

/// Opens local files but refuses to write.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyFiles {
    inner: LocalFiles,
}

impl ReadOnlyFiles {
    pub const fn new(inner: LocalFiles) -> Self {
        Self { inner }
    }
}

impl FileHost for ReadOnlyFiles {
    fn save(&self, _content: &str, _suggested_name: &str) -> Result<PathBuf, FileError> {
        Err(FileError::CapabilityUnsupported(
            "Saving is not available in read-only mode".to_string(),
        ))
    }

    fn open(&self, name: &str) -> Result<OpenedFile, FileError> {
        self.inner.open(name)
    }
}

/// Last path component, or the whole path if there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
