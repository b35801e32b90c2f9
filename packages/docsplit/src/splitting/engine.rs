//! Split engine that turns element path chains into a plan.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::strategy::AliasStrategy;
use super::types::SplitContext;
use crate::config::{index_prefix, IDX_SEP};
use crate::content::FileContentType;
use crate::element::{Element, SubValue};
use crate::error::{Result, SplitError};
use crate::path::ElementPath;
use crate::plan::{Action, Plan};

/// Engine for splitting a document along element paths.
///
/// Walks chains of element paths and produces the `CreatePath` and
/// `WriteFile` actions for every extracted element and stripped parent.
pub struct SplitEngine<S: AliasStrategy> {
    strategy: S,
}

/// Last index of the chain that starts at `index`.
fn chain_end(paths: &[ElementPath], index: usize) -> usize {
    let mut end = index;
    while end + 1 < paths.len() && paths[end + 1].is_chain_child_of(&paths[end]) {
        end += 1;
    }
    end
}

/// Reject paths the engine cannot split before anything is planned.
fn validate_paths(paths: &[ElementPath]) -> Result<()> {
    if paths.is_empty() {
        return Err(SplitError::MalformedPath {
            path: String::new(),
            reason: "no element paths given".to_string(),
        });
    }
    for path in paths {
        let depth = path.depth();
        if depth > 1 {
            return Err(SplitError::UnsupportedPathDepth {
                path: path.to_string(),
                depth,
            });
        }
        if depth == 0 && !path.is_wildcard_terminated() {
            return Err(SplitError::MalformedPath {
                path: path.to_string(),
                reason: format!(
                    "path must address a field or '*' below '{}'",
                    path.anchor()
                ),
            });
        }
    }
    Ok(())
}

/// Check that a mapping key can be used as a single file name component.
fn validate_key_prefix(path: &ElementPath, key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(SplitError::UnsplittableType {
            path: path.to_string(),
            reason: format!("key '{key}' cannot be used as a file name"),
        });
    }
    Ok(())
}

fn push_write(actions: &mut Vec<Action>, file: PathBuf, element: Element, content_type: FileContentType) {
    actions.push(Action::create_path(&file));
    actions.push(Action::write_file(file, element, content_type));
}

impl<S: AliasStrategy> SplitEngine<S> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Split a whole document at the given element paths.
    ///
    /// Returns a plan that writes every extracted element plus the stripped
    /// document at `base_dir/<anchor><ext>`. The root write may replace the
    /// source document's content.
    ///
    /// # Errors
    ///
    /// * `UnsupportedPathDepth` / `MalformedPath` for paths that cannot be split.
    /// * `PathNotFound` / `UnsplittableType` from resolving a path.
    pub fn split_model(
        &self,
        model: &Element,
        paths: &[ElementPath],
        base_dir: &Path,
        content_type: FileContentType,
    ) -> Result<Plan> {
        validate_paths(paths)?;

        let context = SplitContext::new(base_dir, content_type);
        let mut plan = Plan::new();
        let mut stripped_fields: Vec<&str> = Vec::new();

        let mut index = 0;
        while index < paths.len() {
            let path = &paths[index];
            let actions = self.split_at_path_chain(model, paths, index, &context)?;
            // Fields with nothing written elsewhere stay in the root
            if path.chain_parent().is_none() && !actions.is_empty() {
                stripped_fields.push(path.stripped_field());
            }

            plan.add_actions(actions)?;
            index = chain_end(paths, index) + 1;
        }

        let stripped_root = model.strip_fields(&stripped_fields);
        let root_file = context.join(paths[0].to_root_file_name(content_type));
        plan.add_action(Action::create_path_clearing(&root_file))?;
        plan.add_action(Action::write_file(root_file, stripped_root, content_type))?;

        tracing::info!(
            alias = model.alias(),
            paths = paths.len(),
            actions = plan.len(),
            "split plan built"
        );
        Ok(plan)
    }

    /// Split `element` at the chain of paths starting at `index`.
    ///
    /// Returns the actions for this path and everything below it. Nested
    /// levels also get a stripped copy of `element`.
    ///
    /// # Errors
    ///
    /// * `IllegalState` if `index` is out of range.
    /// * `PathNotFound` / `UnsplittableType` from resolving a path, including
    ///   a chained path whose anchor does not name the element it is applied to.
    pub fn split_at_path_chain(
        &self,
        element: &Element,
        paths: &[ElementPath],
        index: usize,
        context: &SplitContext,
    ) -> Result<Vec<Action>> {
        let Some(path) = paths.get(index) else {
            return Err(SplitError::IllegalState(format!(
                "path index {index} is out of range for {} paths",
                paths.len()
            )));
        };
        let child = paths.get(index + 1).filter(|next| next.is_chain_child_of(path));

        tracing::debug!(path = %path, depth = context.depth, dir = %context.base_dir.display(), "splitting path");

        let content_type = context.content_type;
        let mut actions = Vec::new();

        match (element.get_at(path, true)?, child) {
            (None, _) => {
                tracing::debug!(path = %path, "nothing to split");
            }
            (Some(SubValue::Scalar(value)), Some(_)) => {
                let sub_element = Element::new(value, path.element_name());
                let sub_context = context.nested(context.join(path.anchor()));
                actions.extend(self.split_at_path_chain(&sub_element, paths, index + 1, &sub_context)?);
            }
            (Some(SubValue::Scalar(value)), None) => {
                let file = context.join(path.to_file_name(content_type));
                push_write(&mut actions, file, Element::new(value, path.element_name()), content_type);
            }
            (Some(SubValue::Sequence(items)), child) => {
                let items = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (index_prefix(i), item))
                    .collect();
                actions.extend(self.split_items(path, items, child.is_some(), paths, index, context)?);
            }
            (Some(SubValue::Keyed(map)), child) => {
                for key in map.keys() {
                    validate_key_prefix(path, key)?;
                }
                let items = map.into_iter().collect();
                actions.extend(self.split_items(path, items, child.is_some(), paths, index, context)?);
            }
        }

        if context.strip_root {
            // Keep absent, null and empty fields in place
            let stripped = if actions.is_empty() {
                element.clone()
            } else {
                element.strip_fields(&[path.stripped_field()])
            };
            let root_file = context.join(path.to_root_file_name(content_type));
            push_write(&mut actions, root_file, stripped, content_type);
        }

        Ok(actions)
    }

    /// Write the items of a wildcard path, each into its own file or, when
    /// the chain continues, its own directory.
    fn split_items(
        &self,
        path: &ElementPath,
        items: Vec<(String, Value)>,
        chained: bool,
        paths: &[ElementPath],
        index: usize,
        context: &SplitContext,
    ) -> Result<Vec<Action>> {
        let items_dir = context.join(path.to_directory_name());
        let content_type = context.content_type;
        let alias = self.strategy.item_alias(path.anchor(), path.stripped_field());
        let mut actions = Vec::new();

        if chained {
            for (prefix, value) in items {
                let item = Element::new(value, alias.clone());
                let item_dir = items_dir.join(format!("{prefix}{IDX_SEP}{alias}"));
                let item_context = context.nested(item_dir);
                actions.extend(self.split_at_path_chain(&item, paths, index + 1, &item_context)?);
            }
        } else {
            for (prefix, value) in items {
                let file = items_dir.join(format!(
                    "{prefix}{IDX_SEP}{alias}{}",
                    content_type.extension()
                ));
                push_write(&mut actions, file, Element::new(value, alias.clone()), content_type);
            }
        }

        Ok(actions)
    }
}
