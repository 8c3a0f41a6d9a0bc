use std::path::Path;

use crate::domain::AppError;

/// How a make run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeExit {
    /// make ran to completion with this exit code.
    Code(i32),
    /// The user interrupted the build (SIGINT, SIGTERM or SIGHUP) while make was running.
    Interrupted,
}

/// Port for running the external make engine.
pub trait MakeRunner {
    /// Run `command` through the shell in `cwd` and block until it exits.
    ///
    /// Failing to start the process is an error; a non-zero exit is not.
    /// An interrupt received while make runs must not terminate the caller:
    /// it is reported as [`MakeExit::Interrupted`] so the caller can clean up.
    fn run(&self, command: &str, cwd: &Path) -> Result<MakeExit, AppError>;
}
