//! Alias strategies for collection items.

use crate::config::ROOT_MARKER;

/// Trait for naming the items of a split collection.
///
/// The alias names the wrapper key and the file suffix of every item
/// written as its own leaf file (`00000__<alias>.json`).
pub trait AliasStrategy {
    /// Alias for the items of collection `field` owned by element `owner`.
    ///
    /// `field` is the root marker when the owner itself is the collection.
    fn item_alias(&self, owner: &str, field: &str) -> String;
}

/// Strategy that derives the item alias from the collection name.
///
/// `groups` -> `group`, `policies` -> `policy`, `classes` -> `class`.
pub struct SingularAliasStrategy;

impl SingularAliasStrategy {
    /// Naive English singular of a collection name.
    #[must_use]
    pub fn singularize(word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{stem}ss");
        }
        if word.ends_with("ss") {
            return word.to_string();
        }
        match word.strip_suffix('s').filter(|s| !s.is_empty()) {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

impl AliasStrategy for SingularAliasStrategy {
    fn item_alias(&self, owner: &str, field: &str) -> String {
        if field == ROOT_MARKER {
            Self::singularize(owner)
        } else {
            Self::singularize(field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(SingularAliasStrategy::singularize("groups"), "group");
        assert_eq!(SingularAliasStrategy::singularize("controls"), "control");
        assert_eq!(SingularAliasStrategy::singularize("policies"), "policy");
        assert_eq!(SingularAliasStrategy::singularize("classes"), "class");
        assert_eq!(SingularAliasStrategy::singularize("address"), "address");
        assert_eq!(
            SingularAliasStrategy::singularize("target-control-implementations"),
            "target-control-implementation"
        );
        assert_eq!(SingularAliasStrategy::singularize("metadata"), "metadata");
        assert_eq!(SingularAliasStrategy::singularize("s"), "s");
    }

    #[test]
    fn test_item_alias_for_root_collection_uses_owner() {
        let strategy = SingularAliasStrategy;
        assert_eq!(strategy.item_alias("catalog", "groups"), "group");
        assert_eq!(strategy.item_alias("numbers", ROOT_MARKER), "number");
    }
}
