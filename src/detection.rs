//! Auto-detection of project defaults for the config wizard.
//!
//! Probes the source tree to suggest a book title and a starting exclusion
//! list based on common documentation conventions.

use std::path::Path;

/// Detected default values for a source tree.
#[derive(Debug, Default)]
pub struct DetectedDefaults {
    pub title: Option<String>,
    pub exclusions: Vec<String>,
}

/// Detect sensible defaults from the root of the Markdown tree.
pub fn detect_defaults(root: &Path) -> DetectedDefaults {
    DetectedDefaults {
        title: detect_title(root),
        exclusions: detect_exclusions(root),
    }
}

/// Detect a book title from the directory name.
///
/// Replaces hyphens and underscores with spaces and applies title case.
fn detect_title(root: &Path) -> Option<String> {
    let canonical = root.canonicalize().ok()?;
    let dir_name = canonical.file_name()?.to_str()?;

    let title = dir_name
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Suggest exclusions: conventional navigation and meta files that exist at
/// the root and don't belong in the body of a book.
fn detect_exclusions(root: &Path) -> Vec<String> {
    let candidates = [
        "README.md",
        "SUMMARY.md",
        "CHANGELOG.md",
        "CONTRIBUTING.md",
        "CODE_OF_CONDUCT.md",
        "LICENSE.md",
        "TODO.md",
    ];

    candidates
        .into_iter()
        .filter(|name| root.join(name).is_file())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_title_case_simple_word() {
        assert_eq!(title_case_word("hello"), "Hello");
        assert_eq!(title_case_word("WORLD"), "WORLD");
        assert_eq!(title_case_word(""), "");
    }

    #[test]
    fn title_comes_from_the_directory_name() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let root = dir.path().join("field-notes_2025");
        std::fs::create_dir(&root).unwrap();

        assert_eq!(detect_title(&root), Some("Field Notes 2025".to_string()));
    }

    #[test]
    fn only_existing_meta_files_are_suggested() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        std::fs::write(dir.path().join("SUMMARY.md"), "").unwrap();
        std::fs::write(dir.path().join("chapter.md"), "").unwrap();

        let exclusions = detect_exclusions(dir.path());
        assert_eq!(exclusions, vec!["README.md", "SUMMARY.md"]);
    }
}
