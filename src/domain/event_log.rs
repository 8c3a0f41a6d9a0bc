//! Host-independent compiler event content.

use std::path::Path;

pub const EVENT_DIR: &str = ".evfevent";
pub const EVENT_EXTENSION: &str = "evfevent";

/// Strip every `<source_root>/` prefix from event file content.
///
/// Works on raw bytes: event files are not guaranteed to be UTF-8. Removal
/// repeats until no prefix remains, since stripping one occurrence can splice
/// a new one together. Normalizing already-normalized content returns it
/// unchanged.
pub fn normalize_event_bytes(content: &[u8], source_root: &Path) -> Vec<u8> {
    let prefix = format!("{}/", source_root.display()).into_bytes();
    let mut bytes = strip_all(content, &prefix);
    while find(&bytes, &prefix).is_some() {
        bytes = strip_all(&bytes, &prefix);
    }
    bytes
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn strip_all(haystack: &[u8], needle: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find(rest, needle) {
        out.extend_from_slice(&rest[..pos]);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}
