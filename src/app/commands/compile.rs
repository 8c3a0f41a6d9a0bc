//! Build the objects for individual source files.

use std::path::{Path, PathBuf};

use crate::app::commands::build::{self, BuildOptions, BuildReport};
use crate::domain::AppError;
use crate::domain::target_groups::target_for_source;
use crate::ports::MakeRunner;

/// Map source files to the targets that build them, keeping input order.
pub fn targets_for_sources(files: &[PathBuf]) -> Result<Vec<String>, AppError> {
    files
        .iter()
        .map(|file| {
            file.file_name()
                .and_then(|name| target_for_source(&name.to_string_lossy()))
                .ok_or_else(|| AppError::UnknownSourceType(file.display().to_string()))
        })
        .collect()
}

/// Build the targets produced by `files`, ignoring any targets already in `options`.
pub fn execute(
    root: &Path,
    files: &[PathBuf],
    options: BuildOptions,
    runner: &impl MakeRunner,
) -> Result<BuildReport, AppError> {
    if files.is_empty() {
        return Err(AppError::config_error("No source files given to compile"));
    }
    let targets = targets_for_sources(files)?;
    tracing::info!(?targets, "compiling source files");
    build::execute(root, BuildOptions { targets, ..options }, runner)
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::*;
    use crate::testing::FakeMakeRunner;

    #[test]
    fn maps_each_file_to_its_target() {
        let files = vec![
            PathBuf::from("qrpglesrc/hello.pgm.rpgle"),
            PathBuf::from("/abs/qsqlsrc/cust.table"),
        ];
        assert_eq!(targets_for_sources(&files).unwrap(), vec!["HELLO.PGM", "CUST.FILE"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = targets_for_sources(&[PathBuf::from("notes.md")]).unwrap_err();
        assert!(matches!(err, AppError::UnknownSourceType(name) if name == "notes.md"));
    }

    #[test]
    fn builds_mapped_targets() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("iproj.json").write_str(r#"{"objlib":"LIBA","tgtCcsid":37}"#).unwrap();
        temp.child("qrpglesrc/Rules.mk").write_str("HELLO.PGM: hello.pgm.rpgle\n").unwrap();
        let runner = FakeMakeRunner::new();

        execute(
            temp.path(),
            &[PathBuf::from("qrpglesrc/hello.pgm.rpgle")],
            BuildOptions::default(),
            &runner,
        )
        .unwrap();

        assert!(runner.last_command().unwrap().ends_with(" HELLO.PGM"));
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let runner = FakeMakeRunner::new();
        let err = execute(temp.path(), &[], BuildOptions::default(), &runner).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
