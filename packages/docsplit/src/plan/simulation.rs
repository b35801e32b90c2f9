//! Dry-run validation of plan actions.
//!
//! Storage is only ever inspected through metadata lookups; the effects of
//! earlier actions are tracked in memory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::action::Action;
use crate::error::Violation;

/// Virtual view of the files and directories a plan would create.
#[derive(Debug, Default)]
struct VirtualTree {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl VirtualTree {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path) || path.is_file()
    }

    fn create_file(&mut self, path: &Path) {
        self.files.insert(path.to_path_buf());
        for ancestor in parents(path) {
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// Non-empty ancestors of `path`, nearest first.
fn parents(path: &Path) -> impl Iterator<Item = &Path> {
    path.ancestors()
        .skip(1)
        .filter(|p| !p.as_os_str().is_empty())
}

/// Check every action's preconditions, in order, and collect all violations.
///
/// Existing files may only be cleared when they are listed in `replaceable`.
pub(super) fn check_actions(actions: &[Action], replaceable: &HashSet<PathBuf>) -> Vec<Violation> {
    let mut tree = VirtualTree::default();
    let mut violations = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        match action {
            Action::CreatePath {
                path,
                clear_content,
            } => {
                let display = path.display();
                if tree.files.contains(path) {
                    violations.push(Violation::new(
                        index,
                        format!("'{display}' is created more than once"),
                    ));
                    continue;
                }
                if tree.dirs.contains(path) || path.is_dir() {
                    violations.push(Violation::new(
                        index,
                        format!("'{display}' is a directory"),
                    ));
                    continue;
                }
                if path.is_file() {
                    if !clear_content {
                        violations.push(Violation::new(
                            index,
                            format!("'{display}' already exists and would be overwritten"),
                        ));
                    } else if !replaceable.contains(path) {
                        violations.push(Violation::new(
                            index,
                            format!("'{display}' already exists and is not the document being replaced"),
                        ));
                    }
                }
                if let Some(blocking) = parents(path).find(|p| tree.is_file(p)) {
                    violations.push(Violation::new(
                        index,
                        format!(
                            "cannot create '{display}': '{}' is a file",
                            blocking.display()
                        ),
                    ));
                    continue;
                }
                tree.create_file(path);
            }
            Action::WriteFile {
                path, content_type, ..
            } => {
                let display = path.display();
                if !content_type.matches_path(path) {
                    violations.push(Violation::new(
                        index,
                        format!("'{display}' does not have a {content_type} extension"),
                    ));
                }
                if !tree.is_file(path) {
                    violations.push(Violation::new(
                        index,
                        format!("'{display}' is written before it is created"),
                    ));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FileContentType;
    use crate::element::Element;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path) -> Action {
        Action::write_file(path, Element::new(json!({}), "doc"), FileContentType::Json)
    }

    #[test]
    fn test_valid_actions_pass() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("doc").join("metadata.json");
        let actions = vec![Action::create_path(&file), write(&file)];
        assert!(check_actions(&actions, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_collects_all_violations() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("existing.json");
        fs::write(&existing, "{}").unwrap();
        let unplanned = dir.path().join("unplanned.json");

        let actions = vec![
            Action::create_path(&existing),
            write(&unplanned),
            Action::create_path(dir.path().join("a.json")),
            Action::create_path(dir.path().join("a.json")),
        ];

        let violations = check_actions(&actions, &HashSet::new());
        let indexes: Vec<usize> = violations.iter().map(|v| v.action_index).collect();
        assert_eq!(indexes, vec![0, 1, 3]);
    }

    #[test]
    fn test_clear_content_allows_existing_file() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("doc.json");
        fs::write(&existing, "{}").unwrap();

        let actions = vec![Action::create_path_clearing(&existing), write(&existing)];
        let replaceable = HashSet::from([existing.clone()]);
        assert!(check_actions(&actions, &replaceable).is_empty());
    }

    #[test]
    fn test_clear_content_protects_other_existing_file() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("catalog.json");
        fs::write(&existing, "unrelated").unwrap();

        let replaceable = HashSet::from([dir.path().join("mycatalog.json")]);
        let violations = check_actions(&[Action::create_path_clearing(&existing)], &replaceable);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("not the document being replaced"));
    }

    #[test]
    fn test_file_blocking_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("doc");
        let nested = file.join("items.json");

        let actions = vec![Action::create_path(&file), Action::create_path(&nested)];
        let violations = check_actions(&actions, &HashSet::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].action_index, 1);
        assert!(violations[0].message.contains("is a file"));
    }

    #[test]
    fn test_existing_directory_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("doc.json");
        fs::create_dir(&target).unwrap();

        let violations = check_actions(&[Action::create_path_clearing(&target)], &HashSet::new());
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("is a directory"));
    }

    #[test]
    fn test_extension_mismatch() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("doc.yaml");
        let actions = vec![Action::create_path(&target), write(&target)];

        let violations = check_actions(&actions, &HashSet::new());
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("json extension"));
    }
}
