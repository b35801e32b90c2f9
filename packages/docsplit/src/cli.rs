//! Command-line interface for docsplit.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::Settings;
use crate::document::read_element;
use crate::error::{Result, SplitError};
use crate::split::{check_source_file, plan_split, split_file};
use crate::splitting::{load_workspace_aliases, AliasRegistry, SplitEngine};
use crate::workspace::resolve_workspace_root;

/// Docsplit - Split structured documents into a tree of smaller files.
#[derive(Parser)]
#[command(name = "docsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document at one or more element paths.
    Split {
        /// Document to split (.json, .yaml or .yml)
        #[arg(short, long)]
        file: PathBuf,

        /// Comma-separated element paths (e.g., catalog.groups.*,group.controls.*)
        #[arg(short, long)]
        element: String,

        /// Workspace root (default: $DOCSPLIT_ROOT or the nearest directory with .docsplit)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Show the actions a split would take without changing anything.
    Plan {
        /// Document to split (.json, .yaml or .yml)
        #[arg(short, long)]
        file: PathBuf,

        /// Comma-separated element paths
        #[arg(short, long)]
        element: String,

        /// Workspace root, used for alias overrides (same default as split)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            file,
            element,
            root,
        } => split_command(&file, &element, &settings(root)),
        Commands::Plan {
            file,
            element,
            root,
        } => plan_command(&file, &element, &settings(root)),
    }
}

/// Settings from the environment, with an explicit root taking precedence.
fn settings(root: Option<PathBuf>) -> Settings {
    let settings = Settings::from_env();
    match root {
        Some(root) => settings.with_workspace_root(root),
        None => settings,
    }
}

/// Execute the split command.
fn split_command(file: &Path, expressions: &str, settings: &Settings) -> Result<()> {
    println!(
        "{} {} at {}",
        style("Splitting").bold(),
        style(file.display()).cyan(),
        style(expressions).green()
    );

    let report = split_file(file, expressions, settings)?;

    println!("  Files written: {}", report.files_written.len());
    println!();
    println!(
        "{} {}",
        style("Original moved to:").green().bold(),
        report.trash_path.display()
    );

    Ok(())
}

/// Execute the plan command.
///
/// Uses the workspace's alias overrides when the file is inside one.
fn plan_command(file: &Path, expressions: &str, settings: &Settings) -> Result<()> {
    check_source_file(file)?;

    let aliases = match resolve_workspace_root(file, settings) {
        Ok(root) => load_workspace_aliases(&root)?,
        Err(SplitError::NotInWorkspace(_)) => AliasRegistry::new(),
        Err(e) => return Err(e),
    };
    let engine = SplitEngine::new(aliases);

    let source = std::fs::canonicalize(file)?;
    let root = read_element(&source)?;
    let plan = plan_split(&engine, &root, expressions, &source)?;

    println!(
        "{} {} actions",
        style("Plan:").bold(),
        style(plan.len()).cyan()
    );
    for (index, action) in plan.actions().iter().enumerate() {
        println!("  {:>4}  {action}", style(index).dim());
    }

    Ok(())
}
