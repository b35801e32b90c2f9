//! Docsplit - Split structured documents into a tree of smaller files.
//!
//! A document is a single root element stored as JSON or YAML. Element
//! path expressions such as `catalog.groups.*,group.controls.*` select the
//! parts to extract; each extracted part is written to its own file and
//! removed from its parent, so the tree can later be recombined into the
//! original document.
//!
//! # Example
//!
//! ```
//! use docsplit::path::parse_element_args;
//!
//! let paths = parse_element_args("catalog.groups.*,group.controls.*").unwrap();
//! assert_eq!(paths.len(), 2);
//! assert!(paths[1].is_chain_child_of(&paths[0]));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and runtime settings
//! - [`error`]: Error types and Result alias
//! - [`content`]: JSON/YAML content types
//! - [`path`]: Element path language
//! - [`element`]: Document elements and sub-element access
//! - [`document`]: Reading and writing element files
//! - [`plan`]: Actions and the simulate/execute plan
//! - [`splitting`]: Split engine and item alias strategies
//! - [`workspace`]: Workspace discovery
//! - [`trash`]: Recovery location for replaced documents
//! - [`split`]: The split entry point
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod content;
pub mod document;
pub mod element;
pub mod error;
pub mod path;
pub mod plan;
pub mod split;
pub mod splitting;
pub mod trash;
pub mod workspace;

// Re-export commonly used items
pub use content::FileContentType;
pub use element::{Element, SubValue};
pub use error::{Result, SplitError};
pub use path::{parse_element_args, ElementPath};
pub use plan::{Action, Plan, PlanState};
pub use split::{plan_split, split, split_file, SplitReport};
pub use splitting::{AliasRegistry, AliasStrategy, SingularAliasStrategy, SplitEngine};
