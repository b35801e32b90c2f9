//! File-system actions.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::content::FileContentType;
use crate::document::write_element;
use crate::element::Element;
use crate::error::Result;

/// A single file-system intent.
///
/// Replaying an action gives the same result as running it once.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Create a file and any missing parent directories.
    ///
    /// With `clear_content` an existing file may be truncated; without it
    /// an existing file is a simulation violation.
    CreatePath { path: PathBuf, clear_content: bool },

    /// Serialize an element into a file created by an earlier action.
    WriteFile {
        path: PathBuf,
        element: Element,
        content_type: FileContentType,
    },
}

impl Action {
    #[must_use]
    pub fn create_path(path: impl Into<PathBuf>) -> Self {
        Self::CreatePath {
            path: path.into(),
            clear_content: false,
        }
    }

    /// Create path that may replace an existing file's content.
    #[must_use]
    pub fn create_path_clearing(path: impl Into<PathBuf>) -> Self {
        Self::CreatePath {
            path: path.into(),
            clear_content: true,
        }
    }

    #[must_use]
    pub fn write_file(
        path: impl Into<PathBuf>,
        element: Element,
        content_type: FileContentType,
    ) -> Self {
        Self::WriteFile {
            path: path.into(),
            element,
            content_type,
        }
    }

    /// Target path of the action.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::CreatePath { path, .. } | Self::WriteFile { path, .. } => path,
        }
    }

    /// Perform the action against storage.
    ///
    /// # Errors
    ///
    /// Returns `Io` or serialization errors from the file system write.
    pub fn execute(&self) -> Result<()> {
        match self {
            Self::CreatePath {
                path,
                clear_content,
            } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                if *clear_content {
                    File::create(path)?;
                } else {
                    // Creates the file if missing, leaves existing content alone
                    OpenOptions::new().create(true).append(true).open(path)?;
                }
                Ok(())
            }
            Self::WriteFile {
                path,
                element,
                content_type,
            } => write_element(element, path, *content_type),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatePath {
                path,
                clear_content: false,
            } => write!(f, "create {}", path.display()),
            Self::CreatePath {
                path,
                clear_content: true,
            } => write!(f, "create {} (clear content)", path.display()),
            Self::WriteFile {
                path,
                element,
                content_type,
            } => write!(
                f,
                "write {} as {} to {}",
                element.alias(),
                content_type,
                path.display()
            ),
        }
    }
}
