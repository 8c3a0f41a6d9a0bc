//! Build and compile command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::app::api::{self, BuildOptions, BuildReport};
use crate::domain::AppError;
use crate::domain::make::{DEFAULT_BOB_PATH, DEFAULT_MAKE_PROGRAM};

#[derive(Args)]
pub struct EngineArgs {
    /// Extra options passed to make, e.g. "-j4"
    #[arg(short = 'e', long = "make-options", allow_hyphen_values = true)]
    make_options: Option<String>,
    /// Better Object Builder installation root
    #[arg(long, default_value = DEFAULT_BOB_PATH)]
    bob_path: PathBuf,
    /// Make program to run
    #[arg(long = "make", default_value = DEFAULT_MAKE_PROGRAM)]
    make_program: String,
    /// Project directory (defaults to current directory)
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,
}

impl EngineArgs {
    fn into_options(self, targets: Vec<String>) -> (Option<PathBuf>, BuildOptions) {
        let defaults = BuildOptions::default();
        let options = BuildOptions {
            targets: if targets.is_empty() { defaults.targets } else { targets },
            make_options: self.make_options,
            bob_path: self.bob_path,
            make_program: self.make_program,
            color: super::stdout_is_terminal(),
        };
        (self.dir, options)
    }
}

pub fn run_build(targets: Vec<String>, engine: EngineArgs) -> Result<i32, AppError> {
    let (dir, options) = engine.into_options(targets);
    let report = api::build_at(super::project_dir(dir)?, options)?;
    Ok(finish(&report))
}

pub fn run_compile(files: Vec<PathBuf>, engine: EngineArgs) -> Result<i32, AppError> {
    let (dir, options) = engine.into_options(Vec::new());
    let report = api::compile_at(super::project_dir(dir)?, &files, options)?;
    Ok(finish(&report))
}

fn finish(report: &BuildReport) -> i32 {
    if report.success() {
        println!("✅ Build completed");
    } else {
        eprintln!("❌ Build failed: make exited with status {}", report.exit_code);
    }
    if report.normalized_events > 0 {
        println!("  Normalized {} event file(s)", report.normalized_events);
    }
    report.exit_code
}
