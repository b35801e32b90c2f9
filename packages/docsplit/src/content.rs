//! File content types selected by file extension.

use std::fmt;
use std::path::Path;

use crate::error::{Result, SplitError};

/// Serialization format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileContentType {
    Json,
    Yaml,
}

impl FileContentType {
    /// Map a file extension (with or without the leading dot) to a content type.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnsupportedContentType` for anything but
    /// `json`, `yaml` and `yml`.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(SplitError::UnsupportedContentType(ext.to_string())),
        }
    }

    /// Content type of a file path, derived from its extension.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnsupportedContentType` when the path has no
    /// extension or an unknown one.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| SplitError::UnsupportedContentType(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Canonical file extension, including the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Yaml => ".yaml",
        }
    }

    /// Whether `path` carries an extension belonging to this content type.
    #[must_use]
    pub fn matches_path(self, path: &Path) -> bool {
        matches!(Self::from_path(path), Ok(ct) if ct == self)
    }
}

impl fmt::Display for FileContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
