//! Make command line for the Better Object Builder engine.

use std::path::{Path, PathBuf};

/// Install location of the build engine on IBM i.
pub const DEFAULT_BOB_PATH: &str = "/QOpenSys/pkgs/lib/bob";
pub const DEFAULT_MAKE_PROGRAM: &str = "make";
/// Target that builds the whole project.
pub const DEFAULT_TARGET: &str = "all";

pub const LOG_DIR: &str = ".logs";
pub const JOBLOG_FILE: &str = "joblog.json";
pub const OUTPUT_LOG_FILE: &str = "output.log";

/// Entry makefile relative to the engine root.
pub fn entry_makefile(bob_path: &Path) -> PathBuf {
    bob_path.join("mk").join("Makefile")
}

/// Logs the engine writes during a build and that are cleared before the next one.
pub fn build_logs(source_root: &Path) -> [PathBuf; 2] {
    let dir = source_root.join(LOG_DIR);
    [dir.join(JOBLOG_FILE), dir.join(OUTPUT_LOG_FILE)]
}

/// Pieces of one make invocation.
#[derive(Debug, Clone, Copy)]
pub struct MakeInvocation<'a> {
    pub make_program: &'a str,
    pub vars_path: &'a Path,
    pub bob_path: &'a Path,
    pub make_options: Option<&'a str>,
    pub targets: &'a [String],
}

impl MakeInvocation<'_> {
    /// Shell command line; an empty target list builds `all`.
    pub fn command_line(&self) -> String {
        let mut cmd = format!(
            "{} -k BUILDVARSMKPATH=\"{}\" -k BOB=\"{}\" -f \"{}\"",
            self.make_program,
            self.vars_path.display(),
            self.bob_path.display(),
            entry_makefile(self.bob_path).display()
        );

        if let Some(options) = self.make_options.map(str::trim).filter(|o| !o.is_empty()) {
            cmd.push(' ');
            cmd.push_str(options);
        }

        cmd.push(' ');
        if self.targets.is_empty() {
            cmd.push_str(DEFAULT_TARGET);
        } else {
            cmd.push_str(&self.targets.join(" "));
        }
        cmd
    }
}
