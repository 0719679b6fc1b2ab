//! Tree synchronization
//!
//! Mirrors one payload subtree into a destination directory. The sync unit
//! is a hard replace: the destination is deleted first so nothing from a
//! previous version lingers after a content shape change. The agents group
//! instead removes only entries owned by this tool (`gsd-` prefix), so
//! user-authored files in the same directory survive.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::error::{InstallError, Result};
use crate::paths::InstallTarget;
use crate::transform;

/// File-name prefix marking entries owned by this tool
pub const OWNED_PREFIX: &str = "gsd-";

/// How existing destination content is cleared before copying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// Delete the whole destination directory first
    Directory,
    /// Delete only entries whose name carries [`OWNED_PREFIX`]
    OwnedEntries,
}

fn file_read_error(path: &Path, e: std::io::Error) -> InstallError {
    InstallError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn file_write_error(path: &Path, e: std::io::Error) -> InstallError {
    InstallError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| file_write_error(parent, e))?;
    }
    Ok(())
}

/// Synchronize `source` into `dest`, rewriting text documents for the
/// target. Returns the number of files written.
pub fn sync_tree(
    source: &Path,
    dest: &Path,
    target: &InstallTarget,
    strategy: ReplaceStrategy,
) -> Result<usize> {
    match strategy {
        ReplaceStrategy::Directory => {
            if dest.exists() {
                fs::remove_dir_all(dest).map_err(|e| file_write_error(dest, e))?;
            }
        }
        ReplaceStrategy::OwnedEntries => remove_owned_entries(dest)?,
    }
    fs::create_dir_all(dest).map_err(|e| file_write_error(dest, e))?;

    let files = collect_files(source)?;

    let progress = ProgressBar::new(files.len() as u64);
    #[allow(clippy::unwrap_used)]
    progress.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for relative in &files {
        let from = source.join(relative);
        let to = dest.join(relative);
        ensure_parent_dir(&to)?;

        if transform::is_text_document(&from) {
            let content = fs::read_to_string(&from).map_err(|e| file_read_error(&from, e))?;
            let rewritten = transform::rewrite_document(&content, target);
            fs::write(&to, rewritten).map_err(|e| file_write_error(&to, e))?;
        } else {
            fs::copy(&from, &to).map_err(|e| file_write_error(&to, e))?;
        }

        progress.set_message(relative.display().to_string());
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(files.len())
}

/// Collect all regular files under `source`, as paths relative to it.
fn collect_files(source: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| InstallError::IoError {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| InstallError::IoError {
                message: e.to_string(),
            })?;
        files.push(relative.to_path_buf());
    }
    Ok(files)
}

/// Delete destination entries owned by this tool, leaving everything else.
fn remove_owned_entries(dest: &Path) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dest).map_err(|e| file_read_error(dest, e))? {
        let entry = entry.map_err(|e| file_read_error(dest, e))?;
        let name = entry.file_name();
        let owned = name
            .to_str()
            .is_some_and(|n| n.starts_with(OWNED_PREFIX));
        if !owned {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| file_write_error(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| file_write_error(&path, e))?;
        }
    }
    Ok(())
}
