//! Target declarations in `Rules.mk` files.
//!
//! This is a syntactic scan, not a make parser: it only recovers enough to
//! know which directory owns which target name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::target_groups::TargetGroup;

pub const RULES_FILE: &str = "Rules.mk";

/// A target declared in a `Rules.mk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDecl {
    pub name: String,
    pub dir: PathBuf,
    pub group: Option<TargetGroup>,
}

/// Whether a `Rules.mk` line declares a top-level target.
///
/// Comments, indented recipe/continuation lines, and variable assignments are
/// skipped.
pub fn is_target_line(line: &str) -> bool {
    let line = line.trim_end();
    !line.is_empty()
        && !line.starts_with('#')
        && !line.starts_with([' ', '\t'])
        && !line.contains('=')
}

/// Extract target declarations from `content`, all owned by `dir`.
pub fn scan_rules(content: &str, dir: &Path) -> Vec<TargetDecl> {
    content
        .lines()
        .filter(|line| is_target_line(line))
        .filter_map(|line| {
            let name = line.split(':').next().unwrap_or_default().trim_end();
            if name.is_empty() {
                return None;
            }
            Some(TargetDecl {
                name: name.to_string(),
                dir: dir.to_path_buf(),
                group: TargetGroup::classify_target(name),
            })
        })
        .collect()
}

/// Target name to owning directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOwnership {
    owners: BTreeMap<String, PathBuf>,
}

impl TargetOwnership {
    /// Build the map from declarations in processing order; later
    /// declarations of the same name replace earlier ones.
    pub fn from_declarations<'a>(decls: impl IntoIterator<Item = &'a TargetDecl>) -> Self {
        let mut ownership = Self::default();
        for decl in decls {
            ownership.insert(&decl.name, &decl.dir);
        }
        ownership
    }

    /// Record `name` as owned by `dir`, returning the previous owner if it differed.
    pub fn insert(&mut self, name: &str, dir: &Path) -> Option<PathBuf> {
        let previous = self.owners.insert(name.to_string(), dir.to_path_buf())?;
        if previous == dir {
            return None;
        }
        tracing::warn!(
            target_name = name,
            previous = %previous.display(),
            owner = %dir.display(),
            "target declared in more than one directory; last declaration wins"
        );
        Some(previous)
    }

    pub fn owner(&self, name: &str) -> Option<&Path> {
        self.owners.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Entries sorted by target name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.owners.iter()
    }
}
