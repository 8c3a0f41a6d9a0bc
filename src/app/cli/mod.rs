//! CLI Adapter.

mod build;
mod inspect;

use crate::domain::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conventional shell status for a process stopped by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(name = "makei")]
#[command(version)]
#[command(
    about = "Resolve IBM i build variables and drive Better Object Builder builds",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project (all targets unless some are given)
    #[clap(visible_alias = "b")]
    Build {
        /// Targets to build, e.g. HELLO.PGM
        targets: Vec<String>,
        #[command(flatten)]
        engine: build::EngineArgs,
    },
    /// Build the objects produced by the given source files
    #[clap(visible_alias = "c")]
    Compile {
        /// Source files, e.g. qrpglesrc/hello.pgm.rpgle
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        engine: build::EngineArgs,
    },
    /// Print the build variable file make would receive
    Vars {
        /// Project directory (defaults to current directory)
        #[arg(short = 'C', long)]
        dir: Option<PathBuf>,
    },
    /// List targets declared in Rules.mk files
    #[clap(visible_alias = "ls")]
    Targets {
        /// Project directory (defaults to current directory)
        #[arg(short = 'C', long)]
        dir: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    crate::app::init_tracing();
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Build { targets, engine } => build::run_build(targets, engine),
        Commands::Compile { files, engine } => build::run_compile(files, engine),
        Commands::Vars { dir } => inspect::run_vars(dir).map(|_| 0),
        Commands::Targets { dir } => inspect::run_targets(dir).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(AppError::Interrupted) => {
            eprintln!("Build interrupted");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn project_dir(dir: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match dir {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

fn stdout_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
