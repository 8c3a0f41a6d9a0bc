//! Read-only views of the resolved build: the variable file and the target list.

use std::path::Path;

use crate::app::commands::build::render_build_vars;
use crate::domain::{AppError, TargetDecl};
use crate::services::ProjectTree;

/// Variable file content a build of `root` would hand to make.
pub fn vars(root: &Path, color: bool) -> Result<String, AppError> {
    let tree = ProjectTree::discover(root)?;
    render_build_vars(&tree, color)
}

/// Targets declared across all `Rules.mk` files, in scan order.
pub fn targets(root: &Path) -> Result<Vec<TargetDecl>, AppError> {
    ProjectTree::discover(root)?.scan_targets()
}
