//! Types for the split engine.

use std::path::{Path, PathBuf};

use crate::content::FileContentType;

/// Context for one level of a split.
///
/// Carries state through the recursive chain walk.
#[derive(Debug, Clone)]
pub struct SplitContext {
    /// Directory the current level writes into.
    pub base_dir: PathBuf,

    /// Format of every file written.
    pub content_type: FileContentType,

    /// Whether this level writes a stripped copy of its element.
    ///
    /// The top level leaves this to the final root write.
    pub strip_root: bool,

    /// Nesting depth (0 = top-level document).
    pub depth: usize,
}

impl SplitContext {
    /// Create the context for the top-level document.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, content_type: FileContentType) -> Self {
        Self {
            base_dir: base_dir.into(),
            content_type,
            strip_root: false,
            depth: 0,
        }
    }

    /// Create the context for an element split into `dir`.
    #[must_use]
    pub fn nested(&self, dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
            content_type: self.content_type,
            strip_root: true,
            depth: self.depth + 1,
        }
    }

    /// Resolve a path relative to this level's directory.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_context_nested() {
        let ctx = SplitContext::new("/ws", FileContentType::Yaml);
        assert_eq!(ctx.depth, 0);
        assert!(!ctx.strip_root);

        let nested = ctx.nested(ctx.join("catalog/groups/00000__group"));
        assert_eq!(nested.depth, 1);
        assert!(nested.strip_root);
        assert_eq!(nested.content_type, FileContentType::Yaml);
        assert_eq!(
            nested.base_dir,
            PathBuf::from("/ws/catalog/groups/00000__group")
        );
    }
}
