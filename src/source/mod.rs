//! Document collection: walk a directory tree and keep the Markdown files
//! that pass the configured name and creation-date filters.

mod dates;
pub use dates::*;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The `[source]` section of `md-press.toml`: where the book's documents
/// come from and which ones qualify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Root directory of the Markdown tree
    pub root: PathBuf,

    /// The title of the book (used for the document title of the output)
    #[serde(default)]
    pub title: Option<String>,

    /// File-name globs to leave out of the book. A literal name such as
    /// `README.md` excludes exactly that file wherever it appears.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Keep only files created at or after this date
    /// (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`, local time)
    #[serde(default)]
    pub created_after: Option<String>,

    /// Keep only files created at or before this date
    #[serde(default)]
    pub created_before: Option<String>,
}

impl Source {
    /// Compile the exclusion globs and parse the date bounds.
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let exclude = self
            .exclude
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .with_context(|| format!("Invalid exclusion glob: {}", pattern))
                    .map(|glob| glob.compile_matcher())
            })
            .collect::<Result<Vec<_>>>()?;

        let created_after = self
            .created_after
            .as_deref()
            .map(parse_bound)
            .transpose()
            .with_context(|| "Failed to parse created_after bound")?;
        let created_before = self
            .created_before
            .as_deref()
            .map(parse_bound)
            .transpose()
            .with_context(|| "Failed to parse created_before bound")?;

        Ok(FilterCriteria {
            exclude,
            created_after,
            created_before,
        })
    }
}

/// Parse a date-bound string as local time. Accepts `YYYY-MM-DD` (midnight)
/// or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_bound(input: &str) -> Result<DateTime<Local>> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
        })
        .with_context(|| {
            format!("Failed to parse date '{input}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)")
        })?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| anyhow!("Date '{input}' doesn't exist in the local timezone"))
}

/// Compiled filters a file must pass to be collected.
#[derive(Debug)]
pub struct FilterCriteria {
    exclude: Vec<GlobMatcher>,
    created_after: Option<DateTime<Local>>,
    created_before: Option<DateTime<Local>>,
}

impl FilterCriteria {
    /// Does the exclusion list block this file name?
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.iter().any(|glob| glob.is_match(name))
    }

    /// Does a file with this creation time fall inside the date window?
    ///
    /// With no bounds set everything is admitted. With any bound set, a file
    /// whose creation time is unknown is dropped: an absent timestamp can't
    /// satisfy a comparison. Files exactly at a bound are kept.
    pub fn admits(&self, created: Option<DateTime<Local>>) -> bool {
        if self.created_after.is_none() && self.created_before.is_none() {
            return true;
        }
        let Some(created) = created else {
            return false;
        };
        if let Some(after) = self.created_after {
            if created < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if created > before {
                return false;
            }
        }
        true
    }
}

/// A collected Markdown document, immutable once read.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub contents: String,
    pub created: Option<DateTime<Local>>,
}

/// Walk the source tree and collect every qualifying document, in traversal
/// order. The order is whatever the walker yields; the book preserves it.
pub fn gather(source: &Source) -> Result<Vec<Document>> {
    let root = &source.root;
    if !root.is_dir() {
        return Err(anyhow!(
            "Source path {} isn't a directory!",
            root.display()
        ));
    }
    let root = std::fs::canonicalize(root)
        .with_context(|| format!("Failed to canonicalize {}", root.display()))?;

    let criteria = source.criteria()?;

    let mut documents: Vec<Document> = Vec::default();
    // the whole tree is in scope, so hidden-file and gitignore filtering is off
    for entry in WalkBuilder::new(&root).standard_filters(false).build() {
        let entry = entry.with_context(|| "Failed to walk source directory")?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if criteria.excludes(name) {
            log::debug!("{}: excluded by name", path.display());
            continue;
        }

        let created = resolve_created(&root, path);
        if !criteria.admits(created) {
            log::debug!("{}: outside the creation-date window", path.display());
            continue;
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read contents of {}", path.display()))?;

        documents.push(Document {
            path: path.to_path_buf(),
            contents,
            created,
        });
    }

    Ok(documents)
}
