//! Build pipeline: resolve variables, write the variable file, run make,
//! normalize event files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::make::{self, DEFAULT_BOB_PATH, DEFAULT_MAKE_PROGRAM, DEFAULT_TARGET};
use crate::domain::{AppError, BuildVars, MakeInvocation};
use crate::ports::{MakeExit, MakeRunner};
use crate::services::ProjectTree;
use crate::services::event_files::normalize_event_files;

/// Options for a single build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Targets to build; `all` when empty.
    pub targets: Vec<String>,
    /// Extra options passed through to make verbatim.
    pub make_options: Option<String>,
    /// Build engine root.
    pub bob_path: PathBuf,
    /// Make program to invoke.
    pub make_program: String,
    /// Whether make output goes to a color-capable terminal.
    pub color: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            targets: vec![DEFAULT_TARGET.to_string()],
            make_options: None,
            bob_path: PathBuf::from(DEFAULT_BOB_PATH),
            make_program: DEFAULT_MAKE_PROGRAM.to_string(),
            color: false,
        }
    }
}

/// Outcome of a build that reached make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub command: String,
    pub exit_code: i32,
    pub normalized_events: usize,
}

impl BuildReport {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Render the variable file content for `tree`.
///
/// Descriptor, override and rule-file errors all surface here, before any
/// file is written.
pub fn render_build_vars(tree: &ProjectTree, color: bool) -> Result<String, AppError> {
    let project = tree.load_descriptor()?;
    let dirs = tree.resolve_configs(&project)?;
    let targets = tree.target_ownership()?;

    tracing::info!(dirs = dirs.len(), targets = targets.len(), "resolved build variables");
    Ok(BuildVars { project: &project, dirs: &dirs, targets: &targets, color }.render())
}

/// One build against one source tree.
///
/// The session owns the temporary variable file; [`BuildSession::run`]
/// deletes it whether make succeeds, fails or cannot be started.
#[derive(Debug)]
pub struct BuildSession {
    root: PathBuf,
    options: BuildOptions,
    vars_file: NamedTempFile,
}

impl BuildSession {
    /// Resolve the tree and write a fresh variable file.
    pub fn prepare(tree: &ProjectTree, options: BuildOptions) -> Result<Self, AppError> {
        let content = render_build_vars(tree, options.color)?;

        let mut vars_file =
            tempfile::Builder::new().prefix("makei-buildvars-").suffix(".mk").tempfile()?;
        vars_file.write_all(content.as_bytes())?;
        vars_file.flush()?;
        tracing::debug!(path = %vars_file.path().display(), "wrote build variables");

        Ok(Self { root: tree.root().to_path_buf(), options, vars_file })
    }

    pub fn vars_path(&self) -> &Path {
        self.vars_file.path()
    }

    pub fn make_command(&self) -> String {
        MakeInvocation {
            make_program: &self.options.make_program,
            vars_path: self.vars_file.path(),
            bob_path: &self.options.bob_path,
            make_options: self.options.make_options.as_deref(),
            targets: &self.options.targets,
        }
        .command_line()
    }

    /// Run make and normalize event files, then release the variable file.
    ///
    /// An interrupt while make runs surfaces as [`AppError::Interrupted`]
    /// once the variable file is gone.
    pub fn run(self, runner: &impl MakeRunner) -> Result<BuildReport, AppError> {
        let outcome = self.invoke(runner);
        self.release();
        outcome
    }

    fn invoke(&self, runner: &impl MakeRunner) -> Result<BuildReport, AppError> {
        clear_build_logs(&self.root)?;

        let command = self.make_command();
        tracing::info!(%command, "running make");
        let exit = runner.run(&command, &self.root);

        // Logs must stay inspectable after failed or interrupted builds too.
        let normalized_events = normalize_event_files(&self.root);

        match exit? {
            MakeExit::Code(exit_code) => Ok(BuildReport { command, exit_code, normalized_events }),
            MakeExit::Interrupted => Err(AppError::Interrupted),
        }
    }

    fn release(self) {
        let path = self.vars_file.path().to_path_buf();
        match self.vars_file.close() {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(path = %path.display(), %err, "failed to remove build variables"),
        }
    }
}

/// Remove the job log and output log left by a previous build.
fn clear_build_logs(root: &Path) -> Result<(), AppError> {
    for log in make::build_logs(root) {
        match fs::remove_file(&log) {
            Ok(()) => tracing::debug!(path = %log.display(), "removed stale log"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Run the full pipeline for the project at `root`.
pub fn execute(
    root: &Path,
    options: BuildOptions,
    runner: &impl MakeRunner,
) -> Result<BuildReport, AppError> {
    let tree = ProjectTree::discover(root)?;
    let session = BuildSession::prepare(&tree, options)?;
    session.run(runner)
}
