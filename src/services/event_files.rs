//! Post-build rewrite of compiler event files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::event_log::{EVENT_DIR, EVENT_EXTENSION, normalize_event_bytes};

/// Rewrite every event file under `<source_root>/.evfevent` with the
/// absolute source-root prefix removed. Returns how many files changed.
///
/// Runs after make whatever its outcome, so nothing here fails the build: an
/// unreadable directory or file is logged and skipped.
pub fn normalize_event_files(source_root: &Path) -> usize {
    let dir = source_root.join(EVENT_DIR);
    if !dir.is_dir() {
        return 0;
    }

    let mut files = Vec::new();
    collect_event_files(&dir, &mut files);
    files.sort();

    let mut rewritten = 0;
    for path in files {
        match normalize_file(&path, source_root) {
            Ok(true) => rewritten += 1,
            Ok(false) => {}
            Err(err) => tracing::warn!(path = %path.display(), %err, "skipped event file"),
        }
    }

    tracing::debug!(rewritten, "normalized event files");
    rewritten
}

fn normalize_file(path: &Path, source_root: &Path) -> io::Result<bool> {
    let content = fs::read(path)?;
    let normalized = normalize_event_bytes(&content, source_root);
    if normalized == content {
        return Ok(false);
    }
    fs::write(path, normalized)?;
    Ok(true)
}

fn collect_event_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(path = %dir.display(), %err, "skipped event directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            collect_event_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == EVENT_EXTENSION) {
            files.push(path);
        }
    }
}
