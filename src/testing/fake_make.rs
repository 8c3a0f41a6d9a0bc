use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{MakeExit, MakeRunner};

/// Records make invocations instead of running them.
///
/// Each call also snapshots the variable file named by `BUILDVARSMKPATH`, so
/// tests can check what make would have read.
#[derive(Default)]
pub struct FakeMakeRunner {
    pub commands: Mutex<Vec<String>>,
    pub vars_snapshots: Mutex<Vec<Option<String>>>,
    pub cwds: Mutex<Vec<PathBuf>>,
    exit_code: i32,
    spawn_failure: bool,
    interrupted: bool,
}

impl FakeMakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exiting_with(exit_code: i32) -> Self {
        Self { exit_code, ..Self::default() }
    }

    pub fn failing_to_spawn() -> Self {
        Self { spawn_failure: true, ..Self::default() }
    }

    /// Behaves as if the user hit Ctrl-C while make was running.
    pub fn interrupted() -> Self {
        Self { interrupted: true, ..Self::default() }
    }

    pub fn last_command(&self) -> Option<String> {
        self.commands.lock().unwrap().last().cloned()
    }

    pub fn last_vars(&self) -> Option<String> {
        self.vars_snapshots.lock().unwrap().last().cloned().flatten()
    }
}

fn vars_path(command: &str) -> Option<&str> {
    let rest = command.split("BUILDVARSMKPATH=\"").nth(1)?;
    rest.split('"').next()
}

impl MakeRunner for FakeMakeRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<MakeExit, AppError> {
        self.commands.lock().unwrap().push(command.to_string());
        self.cwds.lock().unwrap().push(cwd.to_path_buf());
        let snapshot = vars_path(command).and_then(|path| fs::read_to_string(path).ok());
        self.vars_snapshots.lock().unwrap().push(snapshot);

        if self.spawn_failure {
            return Err(AppError::MakeSpawn {
                command: command.to_string(),
                details: "No such file or directory".into(),
            });
        }
        if self.interrupted {
            return Ok(MakeExit::Interrupted);
        }
        Ok(MakeExit::Code(self.exit_code))
    }
}
