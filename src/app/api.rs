//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together source-tree
//! discovery, command execution and the shell make adapter.

use std::path::{Path, PathBuf};

use crate::app::commands::{build, compile, inspect};
use crate::services::ShellMakeRunner;

pub use crate::app::commands::build::{BuildOptions, BuildReport, BuildSession};
pub use crate::domain::{AppError, TargetDecl, TargetGroup};

// =============================================================================
// Build Command API
// =============================================================================

/// Build the project in the current directory.
pub fn build(options: BuildOptions) -> Result<BuildReport, AppError> {
    build_at(std::env::current_dir()?, options)
}

/// Build the project rooted at `root`.
///
/// A non-zero make exit is reported through [`BuildReport::exit_code`], not
/// as an error.
pub fn build_at(root: impl AsRef<Path>, options: BuildOptions) -> Result<BuildReport, AppError> {
    build::execute(root.as_ref(), options, &ShellMakeRunner::new())
}

// =============================================================================
// Compile Command API
// =============================================================================

/// Build the objects produced by `files` in the project rooted at `root`.
pub fn compile_at(
    root: impl AsRef<Path>,
    files: &[PathBuf],
    options: BuildOptions,
) -> Result<BuildReport, AppError> {
    compile::execute(root.as_ref(), files, options, &ShellMakeRunner::new())
}

// =============================================================================
// Inspection API
// =============================================================================

/// Render the build variable file for the project rooted at `root`.
pub fn vars_at(root: impl AsRef<Path>, color: bool) -> Result<String, AppError> {
    inspect::vars(root.as_ref(), color)
}

/// List targets declared in the project rooted at `root`.
pub fn targets_at(root: impl AsRef<Path>) -> Result<Vec<TargetDecl>, AppError> {
    inspect::targets(root.as_ref())
}
