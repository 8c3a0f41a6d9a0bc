//! Shared testing harness for `makei` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for make: records its arguments, copies the variable file it was
/// pointed at, optionally sends `$FAKE_MAKE_SIGNAL` to the makei process (as a
/// terminal Ctrl-C would), and exits with `$FAKE_MAKE_EXIT`.
const FAKE_MAKE: &str = r#"#!/bin/sh
out="$(dirname "$0")/.."
printf '%s\n' "$@" > "$out/make-args.txt"
for arg in "$@"; do
  case "$arg" in
    BUILDVARSMKPATH=*) cp "${arg#BUILDVARSMKPATH=}" "$out/vars-snapshot.mk" ;;
  esac
done
if [ -n "$FAKE_MAKE_SIGNAL" ]; then
  target=$PPID
  case "$(ps -o comm= -p "$target" 2>/dev/null)" in
    sh|dash|bash) target=$(ps -o ppid= -p "$target" | tr -d ' ') ;;
  esac
  kill -"$FAKE_MAKE_SIGNAL" "$target"
  sleep 1
fi
exit "${FAKE_MAKE_EXIT:-0}"
"#;

/// Testing harness providing an isolated environment for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment with an empty project directory,
    /// a build engine root, and a fake make program.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let mk_dir = root.path().join("bob").join("mk");
        fs::create_dir_all(&mk_dir).expect("Failed to create bob directory");
        fs::write(mk_dir.join("Makefile"), "all:\n").expect("Failed to write Makefile");

        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin directory");
        let fake_make = bin_dir.join("fake-make");
        fs::write(&fake_make, FAKE_MAKE).expect("Failed to write fake make");
        make_executable(&fake_make);

        Self { root, work_dir }
    }

    /// Path to the project directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Canonical project path, as it appears in generated variables.
    pub(crate) fn canonical_work_dir(&self) -> PathBuf {
        fs::canonicalize(&self.work_dir).expect("Failed to canonicalize work directory")
    }

    pub(crate) fn bob_path(&self) -> PathBuf {
        self.root.path().join("bob")
    }

    pub(crate) fn fake_make(&self) -> PathBuf {
        self.root.path().join("bin").join("fake-make")
    }

    /// Build a command for invoking the compiled `makei` binary within the project.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("makei").expect("Failed to locate makei binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("RUST_LOG")
            .env_remove("FAKE_MAKE_EXIT")
            .env_remove("FAKE_MAKE_SIGNAL");
        cmd
    }

    /// `makei <subcommand>` wired to the fake make and local engine root.
    pub(crate) fn engine_cli(&self, subcommand: &str) -> Command {
        let mut cmd = self.cli();
        cmd.arg(subcommand)
            .arg("--make")
            .arg(self.fake_make())
            .arg("--bob-path")
            .arg(self.bob_path());
        cmd
    }

    /// Write a file relative to the project directory.
    pub(crate) fn write(&self, relative: &str, content: &str) {
        super::project::write(&self.work_dir, relative, content);
    }

    pub(crate) fn write_sample_project(&self) {
        super::project::write_sample(&self.work_dir);
    }

    /// Arguments the fake make received, one per line; `None` if make never ran.
    pub(crate) fn make_args(&self) -> Option<Vec<String>> {
        let content = fs::read_to_string(self.root.path().join("make-args.txt")).ok()?;
        Some(content.lines().map(str::to_string).collect())
    }

    /// Copy of the variable file taken while make was running.
    pub(crate) fn vars_snapshot(&self) -> String {
        fs::read_to_string(self.root.path().join("vars-snapshot.mk"))
            .expect("make should have seen a variable file")
    }

    /// Path of the variable file handed to make.
    pub(crate) fn vars_path(&self) -> PathBuf {
        let args = self.make_args().expect("make was not invoked");
        args.iter()
            .find_map(|arg| arg.strip_prefix("BUILDVARSMKPATH="))
            .map(PathBuf::from)
            .expect("BUILDVARSMKPATH argument missing")
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).expect("Failed to stat fake make").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to chmod fake make");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
