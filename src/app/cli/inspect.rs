//! Vars and targets command implementation.

use std::path::PathBuf;

use crate::app::api;
use crate::domain::AppError;

pub fn run_vars(dir: Option<PathBuf>) -> Result<(), AppError> {
    let root = super::project_dir(dir)?;
    print!("{}", api::vars_at(&root, super::stdout_is_terminal())?);
    Ok(())
}

pub fn run_targets(dir: Option<PathBuf>) -> Result<(), AppError> {
    let root = super::project_dir(dir)?;
    let decls = api::targets_at(&root)?;
    let root = std::fs::canonicalize(&root)?;

    if decls.is_empty() {
        println!("No targets declared");
        return Ok(());
    }

    for decl in decls {
        let dir = decl.dir.strip_prefix(&root).unwrap_or(&decl.dir);
        let dir = if dir.as_os_str().is_empty() { ".".to_string() } else { dir.display().to_string() };
        let group = decl.group.map(|g| g.as_str()).unwrap_or("-");
        println!("{:<24} {:<8} {}", decl.name, group, dir);
    }
    Ok(())
}
