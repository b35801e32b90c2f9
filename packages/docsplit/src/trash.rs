//! Trash: a recovery location for documents replaced by a split.
//!
//! Trashed files keep their path relative to the workspace root, under
//! `.docsplit/_trash/`, with a `.bk` extension appended.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{TRASH_DIR, TRASH_FILE_EXT};
use crate::error::{Result, SplitError};

/// Location in the trash for `file`.
///
/// Both paths must be in the same form (both canonical, or both relative
/// to the same directory).
///
/// # Errors
///
/// Returns `SplitError::NotInWorkspace` if `file` is not below `root`.
pub fn to_trash_path(file: &Path, root: &Path) -> Result<PathBuf> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| SplitError::NotInWorkspace(file.to_path_buf()))?;

    let mut name = relative.as_os_str().to_owned();
    name.push(TRASH_FILE_EXT);
    Ok(root.join(TRASH_DIR).join(name))
}

/// Move `file` into the trash of the workspace at `root`.
///
/// The file is relocated, never deleted. An older trashed copy of the same
/// file is replaced. Returns the trash location.
///
/// # Errors
///
/// * `NotInWorkspace` if `file` is not below `root`.
/// * `Io` if `file` is not a regular file or cannot be moved.
pub fn move_to_trash(file: &Path, root: &Path) -> Result<PathBuf> {
    let file = fs::canonicalize(file)?;
    let root = fs::canonicalize(root)?;

    if !file.is_file() {
        return Err(SplitError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Only files can be moved to the trash: {}", file.display()),
        )));
    }

    let trash_path = to_trash_path(&file, &root)?;
    if let Some(parent) = trash_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if trash_path.is_file() {
        fs::remove_file(&trash_path)?;
    }
    fs::rename(&file, &trash_path)?;

    tracing::info!(
        file = %file.display(),
        trash = %trash_path.display(),
        "moved original to trash"
    );
    Ok(trash_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WORKSPACE_DIR;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_to_trash_path() {
        let root = Path::new("/ws");
        let trash = to_trash_path(&root.join("catalogs").join("nist.json"), root).unwrap();
        assert_eq!(
            trash,
            root.join(TRASH_DIR).join("catalogs").join("nist.json.bk")
        );
    }

    #[test]
    fn test_to_trash_path_outside_root() {
        let result = to_trash_path(Path::new("/elsewhere/doc.json"), Path::new("/ws"));
        assert!(matches!(result, Err(SplitError::NotInWorkspace(_))));
    }

    #[test]
    fn test_move_to_trash_preserves_content() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(WORKSPACE_DIR)).unwrap();
        let file = dir.path().join("doc.json");
        fs::write(&file, r#"{"doc": {}}"#).unwrap();

        let trash = move_to_trash(&file, dir.path()).unwrap();

        assert!(!file.exists());
        assert_eq!(fs::read_to_string(&trash).unwrap(), r#"{"doc": {}}"#);
        assert!(trash.ends_with(Path::new("_trash").join("doc.json.bk")));
    }

    #[test]
    fn test_move_to_trash_replaces_older_copy() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("doc.json");

        fs::write(&file, "first").unwrap();
        move_to_trash(&file, dir.path()).unwrap();
        fs::write(&file, "second").unwrap();
        let trash = move_to_trash(&file, dir.path()).unwrap();

        assert_eq!(fs::read_to_string(trash).unwrap(), "second");
    }

    #[test]
    fn test_move_directory_to_trash_fails() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        assert!(move_to_trash(&sub, dir.path()).is_err());
        assert!(sub.is_dir());
    }
}
