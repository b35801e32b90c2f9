//! Error types for docsplit.
//!
//! Path and resolution errors are raised before a plan exists, simulation
//! errors before anything is written, and execution errors carry the
//! position of the action that failed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single precondition violated during plan simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Position of the offending action in its plan.
    pub action_index: usize,
    /// What is wrong with it.
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(action_index: usize, message: impl Into<String>) -> Self {
        Self {
            action_index,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action {}: {}", self.action_index, self.message)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("\n  - {v}"))
        .collect::<String>()
}

/// Main error type for the docsplit library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Element path text could not be parsed.
    #[error("Malformed element path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// Element path reaches deeper than first-level children.
    #[error(
        "Only first-level children can be split, found path '{path}' with {depth} levels below its anchor"
    )]
    UnsupportedPathDepth { path: String, depth: usize },

    /// Element path does not resolve against the document.
    #[error("Element path '{path}' not found: {reason}")]
    PathNotFound { path: String, reason: String },

    /// Wildcard applied to something that is not a sequence or mapping.
    #[error("Element at '{path}' cannot be split further: {reason}")]
    UnsplittableType { path: String, reason: String },

    /// Plan simulation found one or more violations.
    #[error("Plan validation failed with {} violation(s):{}", .0.len(), format_violations(.0))]
    PlanValidation(Vec<Violation>),

    /// A plan action failed while executing.
    #[error("Action {index} ({action}) failed: {source}")]
    ActionFailed {
        index: usize,
        action: String,
        #[source]
        source: Box<SplitError>,
    },

    /// Operation called in the wrong plan state.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// File lives outside any docsplit workspace.
    #[error("Not inside a docsplit workspace (no .docsplit directory found): {}", .0.display())]
    NotInWorkspace(PathBuf),

    /// File extension does not map to a known content type.
    #[error("Unsupported file content type: '{0}'. Expected .json, .yaml or .yml")]
    UnsupportedContentType(String),

    /// Document is not a single-key wrapper object.
    #[error("Invalid document {}: {reason}", .path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for docsplit operations.
pub type Result<T> = std::result::Result<T, SplitError>;
