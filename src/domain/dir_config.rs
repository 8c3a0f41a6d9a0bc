//! Per-directory build settings and their cascade down the source tree.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::objlib::expand_variables;
use crate::domain::project::{Ccsid, ProjectDescriptor};

pub const OVERRIDE_FILE: &str = ".ibmi.json";

/// Effective object library and target CCSID for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirConfig {
    pub objlib: String,
    pub tgt_ccsid: Ccsid,
}

impl DirConfig {
    pub fn new(objlib: impl Into<String>, tgt_ccsid: Ccsid) -> Self {
        Self { objlib: objlib.into(), tgt_ccsid }
    }

    pub fn from_project(descriptor: &ProjectDescriptor) -> Self {
        Self { objlib: descriptor.objlib.clone(), tgt_ccsid: descriptor.tgt_ccsid.clone() }
    }

    /// Apply a local override; fields it leaves out keep this config's values.
    pub fn with_override(&self, local: &DirectoryOverride) -> Self {
        Self {
            objlib: local.objlib.clone().unwrap_or_else(|| self.objlib.clone()),
            tgt_ccsid: local.tgt_ccsid.clone().unwrap_or_else(|| self.tgt_ccsid.clone()),
        }
    }
}

/// Directory-local `.ibmi.json` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOverride {
    pub objlib: Option<String>,
    pub tgt_ccsid: Option<Ccsid>,
}

#[derive(Debug, Deserialize)]
struct OverrideFile {
    #[serde(default)]
    build: DirectoryOverride,
}

impl DirectoryOverride {
    /// Parse override JSON, expanding `&NAME` references in `objlib` via `lookup`.
    pub fn parse_json<F>(content: &str, origin: &str, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: OverrideFile =
            serde_json::from_str(content).map_err(|e| AppError::parse_error(origin, e))?;
        let mut local = file.build;
        local.objlib = local.objlib.map(|lib| expand_variables(&lib, &lookup));
        Ok(local)
    }
}

/// Resolved settings for every build-unit directory, keyed by absolute path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDirConfig {
    entries: BTreeMap<PathBuf, DirConfig>,
}

impl ResolvedDirConfig {
    pub fn get(&self, dir: &Path) -> Option<&DirConfig> {
        self.entries.get(dir)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order; a parent always precedes its descendants.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &DirConfig)> {
        self.entries.iter()
    }

    /// Resolved config of the closest ancestor of `dir` that has an entry.
    fn nearest_ancestor(&self, dir: &Path) -> Option<&DirConfig> {
        dir.ancestors().skip(1).find_map(|ancestor| self.entries.get(ancestor))
    }
}

/// Number of path components, used to order directories shallowest-first.
pub fn path_depth(path: &Path) -> usize {
    path.components().count()
}

/// Sort directories by depth, breaking ties by path.
pub fn sort_by_depth(dirs: &mut [PathBuf]) {
    dirs.sort_by(|a, b| path_depth(a).cmp(&path_depth(b)).then_with(|| a.cmp(b)));
}

/// Cascade settings from `root` down through `dirs`.
///
/// `dirs` must be in non-decreasing depth order so every ancestor resolves
/// before its descendants. The root always takes `defaults`; each other
/// directory takes its override (if any) on top of its nearest resolved
/// ancestor.
pub fn cascade(
    root: &Path,
    defaults: DirConfig,
    dirs: &[PathBuf],
    overrides: &HashMap<PathBuf, DirectoryOverride>,
) -> Result<ResolvedDirConfig, AppError> {
    let mut resolved = ResolvedDirConfig::default();
    resolved.entries.insert(root.to_path_buf(), defaults);

    for dir in dirs.iter().filter(|dir| dir.as_path() != root) {
        if !dir.starts_with(root) {
            return Err(AppError::config_error(format!(
                "Directory {} is outside project root {}",
                dir.display(),
                root.display()
            )));
        }
        let inherited = resolved.nearest_ancestor(dir).cloned().ok_or_else(|| {
            AppError::config_error(format!("No resolved ancestor for {}", dir.display()))
        })?;
        let config = match overrides.get(dir) {
            Some(local) => inherited.with_override(local),
            None => inherited,
        };
        resolved.entries.insert(dir.clone(), config);
    }

    Ok(resolved)
}
