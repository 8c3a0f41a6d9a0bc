use std::path::Path;
use std::process::{Command, ExitStatus};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::AppError;
use crate::ports::{MakeExit, MakeRunner};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Route SIGINT, SIGTERM and SIGHUP to a flag instead of the default
/// terminate action, once per process.
///
/// make shares the terminal's process group and still receives the signal
/// itself, so an interrupted build ends when make does and the caller gets to
/// run its cleanup.
fn install_interrupt_handler() -> bool {
    *HANDLER_INSTALLED.get_or_init(|| {
        match ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "could not install interrupt handler");
                false
            }
        }
    })
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    // SIGHUP, SIGINT, SIGTERM
    matches!(status.signal(), Some(1 | 2 | 15))
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

/// Runs make through `sh -c`, streaming its output to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ShellMakeRunner;

impl ShellMakeRunner {
    /// Creating a runner installs the process interrupt handler, so a Ctrl-C
    /// anywhere in the build no longer kills the process outright.
    pub fn new() -> Self {
        install_interrupt_handler();
        Self
    }
}

impl MakeRunner for ShellMakeRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<MakeExit, AppError> {
        tracing::debug!(command, cwd = %cwd.display(), "spawning make");
        let handler = install_interrupt_handler();
        INTERRUPTED.store(false, Ordering::SeqCst);

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .status()
            .map_err(|e| AppError::MakeSpawn { command: command.to_string(), details: e.to_string() })?;

        if (handler && INTERRUPTED.swap(false, Ordering::SeqCst)) || killed_by_interrupt(&status) {
            tracing::warn!(command, "make interrupted");
            return Ok(MakeExit::Interrupted);
        }

        match status.code() {
            Some(code) => Ok(MakeExit::Code(code)),
            None => {
                tracing::warn!(command, "make terminated by a signal");
                Ok(MakeExit::Code(1))
            }
        }
    }
}
