//! Image reference rewriting: relative `<img>` sources become absolute
//! `file:///` URIs so the PDF engine can load them with local file access.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};

// only tags whose src is the first attribute are rewritten
static RE_IMG_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<img src="(.*?)""#).unwrap());

/// Rewrite every `<img src="...">` in `html` to an absolute, forward-slash
/// `file:///` URI resolved against `base` (the document's directory).
/// Attributes after `src` are left untouched.
pub fn absolutize_image_paths(html: &str, base: &Path) -> String {
    RE_IMG_SRC
        .replace_all(html, |caps: &Captures<'_>| {
            let target = normalize(&base.join(&caps[1]));
            let target = target.display().to_string().replace('\\', "/");
            format!(r#"<img src="file:///{}""#, target.trim_start_matches('/'))
        })
        .into_owned()
}

/// Lexically absolutize a path: anchor it to the current directory when
/// relative and resolve `.`/`..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            component => normalized.push(component),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_source_becomes_absolute_file_uri() {
        let html = r#"<p>pic</p><img src="img/a.png">"#;
        let rewritten = absolutize_image_paths(html, Path::new("/books/vol1"));
        assert!(rewritten.contains(r#"<img src="file:///books/vol1/img/a.png""#));
    }

    #[test]
    fn parent_segments_are_resolved() {
        let html = r#"<img src="../shared/logo.png">"#;
        let rewritten = absolutize_image_paths(html, Path::new("/books/vol1"));
        assert!(rewritten.contains(r#"<img src="file:///books/shared/logo.png""#));
    }

    #[test]
    fn backslash_separators_come_out_forward() {
        let html = "<img src=\"img\\a.png\">";
        let rewritten = absolutize_image_paths(html, Path::new("/books/vol1"));
        assert!(rewritten.contains("file:///books/vol1/img/a.png"));
        assert!(!rewritten.contains('\\'));
    }

    #[test]
    fn attributes_after_src_survive() {
        let html = r#"<img src="a.png" alt="diagram" width="40">"#;
        let rewritten = absolutize_image_paths(html, Path::new("/books"));
        assert!(rewritten.contains(r#" alt="diagram" width="40">"#));
    }

    #[test]
    fn src_not_in_first_position_is_left_alone() {
        let html = r#"<img class="wide" src="a.png">"#;
        assert_eq!(absolutize_image_paths(html, Path::new("/books")), html);
    }

    #[test]
    fn every_image_in_the_fragment_is_rewritten() {
        let html = r#"<img src="a.png"><p>between</p><img src="b.png">"#;
        let rewritten = absolutize_image_paths(html, Path::new("/books"));
        assert!(rewritten.contains("file:///books/a.png"));
        assert!(rewritten.contains("file:///books/b.png"));
    }
}
