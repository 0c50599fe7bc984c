//! Creation-time resolution for collected documents.
//!
//! A document's "creation time" is the best of three sources, probed in
//! order: the timestamp of the commit that first added the file to git
//! (rename tracking enabled), the filesystem creation time, and finally the
//! filesystem modification time. Each probe recovers its own failures and
//! falls through to the next; a file that defeats all three simply has no
//! known creation time.

use chrono::{DateTime, Local, TimeZone};
use std::path::Path;
use std::process::{Command, Stdio};

/// Resolve the effective creation time of `path`, which lives under the
/// collection root at `root`. Returns `None` only when every tier fails.
pub fn resolve_created(root: &Path, path: &Path) -> Option<DateTime<Local>> {
    first_added_in_git(root, path)
        .or_else(|| filesystem_created(path))
        .or_else(|| filesystem_modified(path))
}

/// Tier 1: the commit date of the file's first recorded addition.
///
/// Runs `git log --diff-filter=A --follow --format=%ct -- <path>` from the
/// collection root. The output must be a single Unix timestamp: a file that
/// was added more than once produces several lines, which fails the parse
/// and falls through, the same as a missing `git` binary, a non-zero exit,
/// or no history at all.
fn first_added_in_git(root: &Path, path: &Path) -> Option<DateTime<Local>> {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let output = Command::new("git")
        .arg("log")
        .arg("--diff-filter=A")
        .arg("--follow")
        .arg("--format=%ct")
        .arg("--")
        .arg(relative)
        .current_dir(root)
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        log::debug!("git log failed for {}", relative.display());
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let seconds: i64 = stdout.trim().parse().ok()?;
    Local.timestamp_opt(seconds, 0).single()
}

/// Tier 2: filesystem creation time (not available on all platforms).
fn filesystem_created(path: &Path) -> Option<DateTime<Local>> {
    let created = std::fs::metadata(path).ok()?.created().ok()?;
    Some(DateTime::<Local>::from(created))
}

/// Tier 3: filesystem modification time.
fn filesystem_modified(path: &Path) -> Option<DateTime<Local>> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Local>::from(modified))
}
