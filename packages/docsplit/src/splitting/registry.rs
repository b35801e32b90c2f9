//! Alias registry for collection items.

use std::collections::HashMap;

use super::strategy::{AliasStrategy, SingularAliasStrategy};

/// Registry of explicit item aliases, keyed by owner alias and field.
///
/// Unregistered collections fall back to [`SingularAliasStrategy`].
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    aliases: HashMap<(String, String), String>,
}

impl AliasRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the item alias of collection `field` owned by `owner`.
    pub fn register(
        &mut self,
        owner: impl Into<String>,
        field: impl Into<String>,
        alias: impl Into<String>,
    ) {
        self.aliases
            .insert((owner.into(), field.into()), alias.into());
    }

    /// Get the registered alias, if any.
    #[must_use]
    pub fn get(&self, owner: &str, field: &str) -> Option<&str> {
        self.aliases
            .get(&(owner.to_string(), field.to_string()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl AliasStrategy for AliasRegistry {
    fn item_alias(&self, owner: &str, field: &str) -> String {
        match self.get(owner, field) {
            Some(alias) => alias.to_string(),
            None => SingularAliasStrategy.item_alias(owner, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = AliasRegistry::new();
        registry.register("catalog", "params", "parameter");

        assert_eq!(registry.get("catalog", "params"), Some("parameter"));
        assert_eq!(registry.get("profile", "params"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_falls_back_to_singular() {
        let mut registry = AliasRegistry::new();
        registry.register("catalog", "params", "parameter");

        assert_eq!(registry.item_alias("catalog", "params"), "parameter");
        assert_eq!(registry.item_alias("catalog", "groups"), "group");
    }
}
