//! Configuration constants and runtime settings for docsplit.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

/// Separator between segments of an element path (`catalog.groups.*`).
pub const PATH_SEPARATOR: char = '.';

/// Wildcard segment meaning "every child of this collection".
pub const ELEMENT_WILDCARD: &str = "*";

/// Separator between the prefix and the alias in split file names
/// (`00000__group.json`).
pub const IDX_SEP: &str = "__";

/// Width of the zero-padded index prefix for sequence items.
pub const FILE_DIGIT_PREFIX_LENGTH: usize = 5;

/// Field name used to strip the whole value of a root-level collection.
pub const ROOT_MARKER: &str = "__root__";

/// Directory that marks the root of a docsplit workspace.
pub const WORKSPACE_DIR: &str = ".docsplit";

/// Trash directory, relative to the workspace root.
pub const TRASH_DIR: &str = ".docsplit/_trash";

/// Extension appended to trashed files.
pub const TRASH_FILE_EXT: &str = ".bk";

/// Alias overrides file, relative to the workspace directory.
pub const ALIASES_FILE: &str = "aliases.yaml";

/// Environment variable overriding workspace discovery.
pub const ROOT_ENV_VAR: &str = "DOCSPLIT_ROOT";

/// Field segment pattern: identifier-like, hyphens allowed after the first character.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FIELD_ALIAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$-]*$").expect("valid regex"));

/// Check whether a path segment is a valid field alias.
///
/// # Examples
/// ```
/// use docsplit::config::is_valid_field_alias;
///
/// assert!(is_valid_field_alias("target-definition"));
/// assert!(!is_valid_field_alias("1st"));
/// assert!(!is_valid_field_alias(""));
/// ```
#[must_use]
pub fn is_valid_field_alias(alias: &str) -> bool {
    FIELD_ALIAS_PATTERN.is_match(alias)
}

/// Format a sequence index as a file prefix (`7` -> `00007`).
#[must_use]
pub fn index_prefix(index: usize) -> String {
    format!("{index:0width$}", width = FILE_DIGIT_PREFIX_LENGTH)
}

/// Runtime settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Explicit workspace root; discovered from the source file when unset.
    pub workspace_root: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the environment.
    pub fn from_env() -> Self {
        let workspace_root = std::env::var(ROOT_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self { workspace_root }
    }

    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_prefix_is_zero_padded() {
        assert_eq!(index_prefix(0), "00000");
        assert_eq!(index_prefix(42), "00042");
        assert_eq!(index_prefix(123_456), "123456");
    }

    #[test]
    fn test_field_alias_validation() {
        assert!(is_valid_field_alias("groups"));
        assert!(is_valid_field_alias("target-control-implementations"));
        assert!(is_valid_field_alias("_private"));
        assert!(is_valid_field_alias("$schema"));

        assert!(!is_valid_field_alias("-leading"));
        assert!(!is_valid_field_alias("has space"));
        assert!(!is_valid_field_alias("a/b"));
        assert!(!is_valid_field_alias("*"));
    }

    #[test]
    fn test_settings_builder() {
        let settings = Settings::default().with_workspace_root("/tmp/ws");
        assert_eq!(settings.workspace_root, Some(PathBuf::from("/tmp/ws")));
    }
}
