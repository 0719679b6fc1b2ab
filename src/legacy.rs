//! Cleanup of artifacts left by earlier releases
//!
//! Two static removal lists, revised each release: file paths a previous
//! version produced that the current one no longer does, and substrings
//! identifying hook registrations that must be unregistered. Missing
//! entries are skipped silently; removals are reported by the caller.

use std::path::Path;

/// Paths relative to the install root that earlier versions produced
pub const OBSOLETE_FILES: &[&str] = &[
    "gsd-statusline.sh",
    "hooks/gsd-session-start.js",
    "commands/gsd/update.md",
    "gsd/UPDATES.md",
];

/// Substrings identifying hook registrations from earlier versions
pub const OBSOLETE_HOOK_MARKERS: &[&str] = &["gsd-session-start.js", "statusline-gsd.sh"];

/// Remove known-obsolete files under the install root.
///
/// Returns the relative paths that were actually removed. Entries that do
/// not exist, or cannot be removed, are skipped.
pub fn remove_obsolete_files(root: &Path) -> Vec<String> {
    let mut removed = Vec::new();
    for relative in OBSOLETE_FILES {
        let path = root.join(relative);
        if path.is_file() && std::fs::remove_file(&path).is_ok() {
            removed.push((*relative).to_string());
        }
    }
    removed
}
