//! Splitting a document into per-element files.
//!
//! Element paths are processed as chains: a wildcard path followed by the
//! paths that apply to each of its matched children. Every level writes its
//! children to separate files plus a stripped copy of itself.

mod config;
mod engine;
mod registry;
mod strategy;
mod types;

pub use config::{load_alias_registry, load_workspace_aliases};
pub use engine::SplitEngine;
pub use registry::AliasRegistry;
pub use strategy::{AliasStrategy, SingularAliasStrategy};
pub use types::SplitContext;
