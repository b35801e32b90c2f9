//! Splitting a document on disk.
//!
//! The flow is: parse the expressions, build a plan, simulate it, move the
//! source document to the trash and execute the plan. Nothing on disk
//! changes unless the simulation succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::content::FileContentType;
use crate::document::read_element;
use crate::element::Element;
use crate::error::{Result, SplitError};
use crate::path::parse_element_args;
use crate::plan::{Action, Plan};
use crate::splitting::{load_workspace_aliases, AliasStrategy, SplitEngine};
use crate::trash::move_to_trash;
use crate::workspace::resolve_workspace_root;

/// Outcome of a completed split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Every file written, in write order. The stripped root comes last.
    pub files_written: Vec<PathBuf>,

    /// Where the source document was moved.
    pub trash_path: PathBuf,
}

/// Build and simulate the plan for splitting `root`, read from `source_file`.
///
/// Output files go next to `source_file` and use its format. Only
/// `source_file` itself may be replaced by the stripped root; any other
/// existing file in the way is a simulation violation.
///
/// # Errors
///
/// Returns path, resolution and `PlanValidation` errors. Never touches the
/// filesystem beyond reading it.
pub fn plan_split<S: AliasStrategy>(
    engine: &SplitEngine<S>,
    root: &Element,
    expressions: &str,
    source_file: &Path,
) -> Result<Plan> {
    let content_type = FileContentType::from_path(source_file)?;
    let base_dir = source_file.parent().unwrap_or_else(|| Path::new(""));
    let paths = parse_element_args(expressions)?;

    let mut plan = engine.split_model(root, &paths, base_dir, content_type)?;
    plan.allow_replacing(source_file)?;
    plan.simulate()?;
    Ok(plan)
}

/// Split `root`, read from `source_file`, at `expressions`.
///
/// The source must live inside a workspace. On success its content is in
/// the trash and the split files are on disk.
///
/// # Errors
///
/// * `NotInWorkspace` if no workspace encloses `source_file`.
/// * Anything `plan_split` returns, with nothing changed on disk.
/// * `ActionFailed` if execution fails; the source stays in the trash.
pub fn split(
    root: &Element,
    expressions: &str,
    source_file: &Path,
    settings: &Settings,
) -> Result<SplitReport> {
    let source_file = fs::canonicalize(source_file)?;
    let workspace_root = resolve_workspace_root(&source_file, settings)?;
    let engine = SplitEngine::new(load_workspace_aliases(&workspace_root)?);

    let mut plan = plan_split(&engine, root, expressions, &source_file)?;
    let trash_path = move_to_trash(&source_file, &workspace_root)?;

    if let Err(e) = plan.execute() {
        tracing::error!(
            error = %e,
            trash = %trash_path.display(),
            "split failed after the source was trashed"
        );
        return Err(e);
    }

    let files_written: Vec<PathBuf> = plan
        .actions()
        .iter()
        .filter(|action| matches!(action, Action::WriteFile { .. }))
        .map(|action| action.path().to_path_buf())
        .collect();

    tracing::info!(
        source = %source_file.display(),
        files = files_written.len(),
        "split complete"
    );

    Ok(SplitReport {
        files_written,
        trash_path,
    })
}

/// Check that `source_file` is an existing regular file.
///
/// # Errors
///
/// Returns `SplitError::InvalidDocument` otherwise.
pub fn check_source_file(source_file: &Path) -> Result<()> {
    if !source_file.is_file() {
        return Err(SplitError::InvalidDocument {
            path: source_file.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }
    Ok(())
}

/// Read `source_file` and split it at `expressions`.
///
/// # Errors
///
/// * `InvalidDocument` if the file is missing or not a wrapped element.
/// * `UnsupportedContentType`, `Io`, `Json` or `Yaml` from reading it.
/// * Anything `split` returns.
pub fn split_file(source_file: &Path, expressions: &str, settings: &Settings) -> Result<SplitReport> {
    check_source_file(source_file)?;
    let root = read_element(source_file)?;
    split(&root, expressions, source_file, settings)
}
