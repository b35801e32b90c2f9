//! Document reader.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::content::FileContentType;
use crate::element::Element;
use crate::error::{Result, SplitError};

/// Parse document text into an element.
///
/// `origin` is only used in error messages.
///
/// # Errors
///
/// * `Json` / `Yaml` if the text does not parse.
/// * `InvalidDocument` unless it is a mapping with exactly one key.
pub fn parse_element(text: &str, content_type: FileContentType, origin: &Path) -> Result<Element> {
    let value: Value = match content_type {
        FileContentType::Json => serde_json::from_str(text)?,
        FileContentType::Yaml => serde_yaml_ng::from_str(text)?,
    };

    Element::from_wrapper(value).ok_or_else(|| SplitError::InvalidDocument {
        path: origin.to_path_buf(),
        reason: "expected a mapping with exactly one top-level key naming the element".to_string(),
    })
}

/// Read a JSON or YAML file into an element, choosing the format by extension.
///
/// # Errors
///
/// Returns `UnsupportedContentType` or `Io` before parsing, then anything
/// `parse_element` returns.
pub fn read_element(path: &Path) -> Result<Element> {
    let content_type = FileContentType::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let element = parse_element(&text, content_type, path)?;

    tracing::debug!(
        path = %path.display(),
        alias = element.alias(),
        content_type = %content_type,
        "read element"
    );

    Ok(element)
}
