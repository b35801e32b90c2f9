//! Element paths: dotted addresses into a document.
//!
//! The first segment is an anchor naming the alias of the element the path
//! applies to. It is checked, never traversed. The remaining segments are
//! field names, optionally followed by a trailing wildcard.
//!
//! # Examples
//!
//! ```
//! use docsplit::path::{parse_element_args, ElementPath};
//! use docsplit::FileContentType;
//!
//! let path = ElementPath::parse("catalog.groups.*").unwrap();
//! assert!(path.is_wildcard_terminated());
//! assert_eq!(path.anchor(), "catalog");
//! assert_eq!(path.element_name(), "groups");
//! assert_eq!(path.to_root_file_name(FileContentType::Json).to_str(), Some("catalog.json"));
//!
//! // Later expressions with a different anchor continue the one before them
//! let paths = parse_element_args("catalog.groups.*,group.controls.*").unwrap();
//! assert!(paths[1].is_chain_child_of(&paths[0]));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use crate::config::{is_valid_field_alias, ELEMENT_WILDCARD, PATH_SEPARATOR, ROOT_MARKER};
use crate::content::FileContentType;
use crate::error::{Result, SplitError};

/// One segment of an element path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A field alias.
    Field(String),
    /// All children of the collection addressed so far.
    Wildcard,
}

impl Segment {
    fn parse(text: &str, path: &str) -> Result<Self> {
        if text == ELEMENT_WILDCARD {
            return Ok(Self::Wildcard);
        }
        if text.is_empty() {
            return Err(malformed(path, "empty segment"));
        }
        if !is_valid_field_alias(text) {
            return Err(malformed(path, format!("invalid field name '{text}'")));
        }
        Ok(Self::Field(text.to_string()))
    }

    /// Field name, or `None` for the wildcard.
    #[must_use]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Wildcard => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Wildcard => f.write_str(ELEMENT_WILDCARD),
        }
    }
}

fn malformed(path: &str, reason: impl Into<String>) -> SplitError {
    SplitError::MalformedPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// A parsed element path.
///
/// Equality and hashing only look at the segments; the chain parent is
/// bookkeeping for split chains.
#[derive(Debug, Clone)]
pub struct ElementPath {
    segments: Vec<Segment>,
    chain_parent: Option<Box<ElementPath>>,
}

impl ElementPath {
    /// Parse dotted path text.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::MalformedPath` for empty text, empty or invalid
    /// segments, a wildcard anchor, or a wildcard that is not the last segment.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed(text, "path is empty"));
        }

        let segments = text
            .split(PATH_SEPARATOR)
            .map(|part| Segment::parse(part, text))
            .collect::<Result<Vec<_>>>()?;

        if segments[0] == Segment::Wildcard {
            return Err(malformed(text, "the first segment must name an element"));
        }
        if let Some(pos) = segments.iter().position(|s| *s == Segment::Wildcard) {
            if pos != segments.len() - 1 {
                return Err(malformed(
                    text,
                    format!("wildcard '{ELEMENT_WILDCARD}' is only allowed as the last segment"),
                ));
            }
        }

        Ok(Self {
            segments,
            chain_parent: None,
        })
    }

    /// All segments, anchor first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The anchor: alias of the element this path applies to.
    #[must_use]
    pub fn anchor(&self) -> &str {
        // The parser guarantees a leading field segment
        self.segments[0].as_field().unwrap_or_default()
    }

    #[must_use]
    pub fn last_segment(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    #[must_use]
    pub fn is_wildcard_terminated(&self) -> bool {
        *self.last_segment() == Segment::Wildcard
    }

    /// Field segments below the anchor, wildcard excluded.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments[1..].iter().filter_map(Segment::as_field)
    }

    /// Number of field segments below the anchor.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.fields().count()
    }

    /// Last non-wildcard segment: the field being split out, or the anchor
    /// for a bare `anchor.*` path.
    #[must_use]
    pub fn element_name(&self) -> &str {
        self.segments
            .iter()
            .rev()
            .find_map(Segment::as_field)
            .unwrap_or_default()
    }

    /// Field to strip from the owning element once this path is split out.
    #[must_use]
    pub fn stripped_field(&self) -> &str {
        if self.depth() == 0 {
            ROOT_MARKER
        } else {
            self.element_name()
        }
    }

    /// The path with its last segment dropped, or `None` if only the anchor is left.
    #[must_use]
    pub fn parent(&self) -> Option<ElementPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
            chain_parent: None,
        })
    }

    /// Append a segment.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::MalformedPath` when appending after a wildcard.
    pub fn join(&self, segment: Segment) -> Result<ElementPath> {
        if self.is_wildcard_terminated() {
            return Err(malformed(
                &format!("{self}{PATH_SEPARATOR}{segment}"),
                "cannot append to a wildcard-terminated path",
            ));
        }
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self {
            segments,
            chain_parent: None,
        })
    }

    /// The path this one continues in a split chain.
    #[must_use]
    pub fn chain_parent(&self) -> Option<&ElementPath> {
        self.chain_parent.as_deref()
    }

    #[must_use]
    pub fn with_chain_parent(mut self, parent: ElementPath) -> Self {
        self.chain_parent = Some(Box::new(parent));
        self
    }

    /// Whether this path continues `other` in a split chain.
    #[must_use]
    pub fn is_chain_child_of(&self, other: &ElementPath) -> bool {
        self.chain_parent() == Some(other)
    }

    /// Relative directory for the elements addressed by this path
    /// (`catalog.groups.*` -> `catalog/groups`).
    #[must_use]
    pub fn to_directory_name(&self) -> PathBuf {
        self.segments.iter().filter_map(Segment::as_field).collect()
    }

    /// Relative file for the element addressed by this path
    /// (`catalog.metadata` -> `catalog/metadata.json`).
    #[must_use]
    pub fn to_file_name(&self, content_type: FileContentType) -> PathBuf {
        let mut path = self.to_directory_name().into_os_string();
        path.push(content_type.extension());
        PathBuf::from(path)
    }

    /// File holding the stripped anchor element (`catalog.json`).
    #[must_use]
    pub fn to_root_file_name(&self, content_type: FileContentType) -> PathBuf {
        PathBuf::from(format!("{}{}", self.anchor(), content_type.extension()))
    }
}

impl PartialEq for ElementPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for ElementPath {}

impl Hash for ElementPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ElementPath {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a comma-separated list of element paths and link split chains.
///
/// The anchor of the first expression is taken as the document anchor. Any
/// later expression anchored elsewhere continues the expression right
/// before it, e.g. `catalog.groups.*,group.controls.*`.
///
/// # Errors
///
/// Returns `SplitError::MalformedPath` for an empty list or any malformed expression.
pub fn parse_element_args(text: &str) -> Result<Vec<ElementPath>> {
    let mut paths: Vec<ElementPath> = Vec::new();

    for expr in text.split(',') {
        let path = ElementPath::parse(expr)?;
        let continues_previous = paths
            .first()
            .is_some_and(|first| first.anchor() != path.anchor());
        let path = match paths.last() {
            Some(prev) if continues_previous => path.with_chain_parent(prev.clone()),
            _ => path,
        };
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(malformed(text, "no element paths given"));
    }

    Ok(paths)
}
