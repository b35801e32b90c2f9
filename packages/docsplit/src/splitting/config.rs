//! Alias overrides loaded from the workspace.
//!
//! ```yaml
//! aliases:
//!   catalog.params: parameter
//!   catalog.back-matter: resource
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::registry::AliasRegistry;
use crate::config::{ALIASES_FILE, PATH_SEPARATOR, WORKSPACE_DIR};
use crate::error::{Result, SplitError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Load an alias registry from a YAML file.
///
/// Keys are `<owner>.<field>`; values are the item alias.
///
/// # Errors
///
/// * `Io` / `Yaml` if the file cannot be read or parsed.
/// * `InvalidDocument` for a key without an owner.
pub fn load_alias_registry(path: &Path) -> Result<AliasRegistry> {
    let text = fs::read_to_string(path)?;
    let file: AliasFile = serde_yaml_ng::from_str(&text)?;

    let mut registry = AliasRegistry::new();
    for (key, alias) in file.aliases {
        let Some((owner, field)) = key.split_once(PATH_SEPARATOR) else {
            return Err(SplitError::InvalidDocument {
                path: path.to_path_buf(),
                reason: format!("alias key '{key}' must have the form <owner>.<field>"),
            });
        };
        registry.register(owner, field, alias);
    }

    tracing::debug!(path = %path.display(), aliases = registry.len(), "loaded alias overrides");
    Ok(registry)
}

/// Load `.docsplit/aliases.yaml` from a workspace, or an empty registry if
/// the workspace has none.
///
/// # Errors
///
/// Anything `load_alias_registry` returns for an existing file.
pub fn load_workspace_aliases(workspace_root: &Path) -> Result<AliasRegistry> {
    let path = workspace_root.join(WORKSPACE_DIR).join(ALIASES_FILE);
    if !path.is_file() {
        return Ok(AliasRegistry::new());
    }
    load_alias_registry(&path)
}
