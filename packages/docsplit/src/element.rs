//! Document elements and sub-value access by element path.

use serde_json::{Map, Value};

use crate::config::ROOT_MARKER;
use crate::error::{Result, SplitError};
use crate::path::ElementPath;

/// What an element path resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubValue {
    /// A single value addressed without a wildcard, written as one file.
    Scalar(Value),
    /// Items of an array addressed with a trailing wildcard.
    Sequence(Vec<Value>),
    /// Entries of an object addressed with a trailing wildcard.
    Keyed(Map<String, Value>),
}

/// A document value together with its declared alias.
///
/// On disk an element is always wrapped as `{ "<alias>": <value> }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    alias: String,
    value: Value,
}

/// Short description of a value's shape for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

impl Element {
    #[must_use]
    pub fn new(value: Value, alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            value,
        }
    }

    /// Unwrap a `{ "<alias>": <value> }` wrapper.
    ///
    /// Returns `None` unless `wrapper` is an object with exactly one key.
    #[must_use]
    pub fn from_wrapper(wrapper: Value) -> Option<Self> {
        let Value::Object(map) = wrapper else {
            return None;
        };
        if map.len() != 1 {
            return None;
        }
        map.into_iter().next().map(|(alias, value)| Self { alias, value })
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The `{ "<alias>": <value> }` wrapper written to disk.
    #[must_use]
    pub fn wrap(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.alias.clone(), self.value.clone());
        Value::Object(map)
    }

    /// A top-level field, if the value is an object that has it.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.value.as_object().and_then(|map| map.get(name))
    }

    /// Resolve an element path against this element.
    ///
    /// Returns `Ok(None)` when the terminal field is absent or `null`; there
    /// is nothing to split there.
    ///
    /// # Errors
    ///
    /// * `PathNotFound` if the anchor does not match this element's alias, an
    ///   intermediate field is missing, or a wildcard path is given while
    ///   `allow_collection` is false.
    /// * `UnsplittableType` if a wildcard addresses neither a sequence nor a mapping.
    pub fn get_at(&self, path: &ElementPath, allow_collection: bool) -> Result<Option<SubValue>> {
        let not_found = |reason: String| SplitError::PathNotFound {
            path: path.to_string(),
            reason,
        };

        if path.anchor() != self.alias {
            return Err(not_found(format!(
                "anchor '{}' does not match element '{}'",
                path.anchor(),
                self.alias
            )));
        }
        if path.is_wildcard_terminated() && !allow_collection {
            return Err(not_found(
                "a collection is addressed where a single element is required".to_string(),
            ));
        }

        let fields: Vec<&str> = path.fields().collect();
        let mut current = &self.value;
        for (i, field) in fields.iter().enumerate() {
            let Value::Object(map) = current else {
                return Err(not_found(format!(
                    "cannot look up '{field}' in a {} value",
                    value_kind(current)
                )));
            };
            match map.get(*field) {
                None | Some(Value::Null) if i + 1 == fields.len() => return Ok(None),
                None | Some(Value::Null) => {
                    return Err(not_found(format!("field '{field}' is missing")));
                }
                Some(value) => current = value,
            }
        }

        if !path.is_wildcard_terminated() {
            return Ok(Some(SubValue::Scalar(current.clone())));
        }

        match current {
            Value::Array(items) => Ok(Some(SubValue::Sequence(items.clone()))),
            Value::Object(map) => Ok(Some(SubValue::Keyed(map.clone()))),
            other => Err(SplitError::UnsplittableType {
                path: path.to_string(),
                reason: format!("expected a sequence or mapping, found {}", value_kind(other)),
            }),
        }
    }

    /// Copy of this element without the named top-level fields.
    ///
    /// Field order and the alias are preserved. The root marker empties the
    /// whole value while keeping its shape.
    #[must_use]
    pub fn strip_fields<S: AsRef<str>>(&self, fields: &[S]) -> Element {
        let is_stripped = |name: &str| fields.iter().any(|f| f.as_ref() == name);

        let value = match &self.value {
            Value::Object(_) if is_stripped(ROOT_MARKER) => Value::Object(Map::new()),
            Value::Array(_) if is_stripped(ROOT_MARKER) => Value::Array(Vec::new()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(key, _)| !is_stripped(key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            other => other.clone(),
        };

        Element {
            alias: self.alias.clone(),
            value,
        }
    }
}
