//! Workspace discovery.
//!
//! A workspace is any directory containing a `.docsplit` directory. It holds
//! the trash and optional alias overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Settings, WORKSPACE_DIR};
use crate::error::{Result, SplitError};

/// Find the nearest ancestor of `start` (itself included) that is a workspace root.
#[must_use]
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(WORKSPACE_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Workspace root for `file`: the configured root if any, else the nearest
/// enclosing workspace.
///
/// The returned path is canonical.
///
/// # Errors
///
/// Returns `SplitError::NotInWorkspace` when no workspace encloses `file`.
pub fn resolve_workspace_root(file: &Path, settings: &Settings) -> Result<PathBuf> {
    let file = fs::canonicalize(file)?;

    let root = match &settings.workspace_root {
        Some(root) => fs::canonicalize(root)?,
        None => find_workspace_root(&file).ok_or_else(|| SplitError::NotInWorkspace(file.clone()))?,
    };

    if !file.starts_with(&root) {
        return Err(SplitError::NotInWorkspace(file));
    }

    tracing::debug!(root = %root.display(), "resolved workspace root");
    Ok(root)
}
