//! Filesystem side of build-variable resolution.
//!
//! Discovers build-unit directories, reads their overrides and rule files,
//! and hands the contents to the pure domain logic.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::dir_config::{self, DirConfig, DirectoryOverride, OVERRIDE_FILE, ResolvedDirConfig};
use crate::domain::project::{PROJECT_DESCRIPTOR_FILE, ProjectDescriptor};
use crate::domain::rules::{RULES_FILE, TargetDecl, TargetOwnership, scan_rules};
use crate::domain::AppError;

/// A source tree with its build-unit directories.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    root: PathBuf,
    build_dirs: Vec<PathBuf>,
}

impl ProjectTree {
    /// Walk `root` for directories holding a `Rules.mk`.
    ///
    /// `root` is canonicalized so every key emitted later is absolute.
    pub fn discover(root: &Path) -> Result<Self, AppError> {
        let root = fs::canonicalize(root).map_err(|e| discovery_error(root, e))?;
        let mut build_dirs = Vec::new();
        collect_build_dirs(&root, &mut build_dirs)?;
        dir_config::sort_by_depth(&mut build_dirs);

        tracing::debug!(root = %root.display(), count = build_dirs.len(), "discovered build units");
        Ok(Self { root, build_dirs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build-unit directories, shallowest first.
    pub fn build_dirs(&self) -> &[PathBuf] {
        &self.build_dirs
    }

    /// Read and validate `iproj.json` at the root.
    pub fn load_descriptor(&self) -> Result<ProjectDescriptor, AppError> {
        let path = self.root.join(PROJECT_DESCRIPTOR_FILE);
        let content = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                AppError::ProjectDescriptorMissing(path.display().to_string())
            } else {
                AppError::config_error(format!("Failed to read {}: {}", path.display(), err))
            }
        })?;
        ProjectDescriptor::parse_json(&content, &path.display().to_string())
    }

    /// Cascade project defaults and `.ibmi.json` overrides over every build unit.
    pub fn resolve_configs(
        &self,
        descriptor: &ProjectDescriptor,
    ) -> Result<ResolvedDirConfig, AppError> {
        let mut overrides = HashMap::new();
        for dir in self.build_dirs.iter().filter(|dir| dir.as_path() != self.root) {
            if let Some(local) = read_override(dir)? {
                overrides.insert(dir.clone(), local);
            }
        }
        dir_config::cascade(
            &self.root,
            DirConfig::from_project(descriptor),
            &self.build_dirs,
            &overrides,
        )
    }

    /// Scan every `Rules.mk` in directory order.
    pub fn scan_targets(&self) -> Result<Vec<TargetDecl>, AppError> {
        let mut decls = Vec::new();
        for dir in &self.build_dirs {
            let path = dir.join(RULES_FILE);
            let content = fs::read_to_string(&path).map_err(|e| discovery_error(&path, e))?;
            decls.extend(scan_rules(&content, dir));
        }
        Ok(decls)
    }

    /// Ownership map for the scanned declarations.
    pub fn target_ownership(&self) -> Result<TargetOwnership, AppError> {
        Ok(TargetOwnership::from_declarations(&self.scan_targets()?))
    }
}

fn collect_build_dirs(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), AppError> {
    let entries = fs::read_dir(dir).map_err(|e| discovery_error(dir, e))?;
    let mut has_rules = false;

    for entry in entries {
        let entry = entry.map_err(|e| discovery_error(dir, e))?;
        let file_type = entry.file_type().map_err(|e| discovery_error(&entry.path(), e))?;
        let name = entry.file_name();

        if name == RULES_FILE && !file_type.is_dir() {
            // A symlinked Rules.mk counts when it resolves to a regular file.
            has_rules = entry.path().is_file();
        } else if file_type.is_dir() && !name.to_string_lossy().starts_with('.') {
            collect_build_dirs(&entry.path(), found)?;
        }
    }

    if has_rules {
        found.push(dir.to_path_buf());
    }
    Ok(())
}

fn read_override(dir: &Path) -> Result<Option<DirectoryOverride>, AppError> {
    let path = dir.join(OVERRIDE_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(discovery_error(&path, err)),
    };
    let local = DirectoryOverride::parse_json(&content, &path.display().to_string(), |name| {
        std::env::var(name).ok()
    })?;
    tracing::debug!(dir = %dir.display(), ?local, "applying directory override");
    Ok(Some(local))
}

fn discovery_error(path: &Path, err: io::Error) -> AppError {
    AppError::Discovery { path: path.display().to_string(), details: err.to_string() }
}
