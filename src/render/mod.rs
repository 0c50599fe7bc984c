//! The per-document rendering pipeline.
//!
//! Every collected document runs the same fixed sequence: strip front-matter,
//! render the Markdown to an HTML fragment, rewrite relative image references
//! to absolute `file:///` URIs, and optionally restructure the fragment for
//! page-break control. The assembler then concatenates the fragments into
//! the one HTML document the PDF engine receives.

mod assemble;
pub use assemble::*;

mod breaks;
pub use breaks::*;

mod images;
pub use images::*;

mod markdown;
pub use markdown::*;

use crate::source::Document;
use std::path::Path;

/// Render one document into its processed HTML fragment.
pub fn document_fragment(document: &Document, isolate: bool) -> String {
    let markdown = strip_front_matter(&document.contents);
    let fragment = markdown_to_html(&markdown);

    let base = document.path.parent().unwrap_or_else(|| Path::new(""));
    let fragment = absolutize_image_paths(&fragment, base);

    if isolate {
        isolate_sections(&fragment)
    } else {
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn pipeline_runs_all_stages_in_order() {
        let document = Document {
            path: PathBuf::from("/books/vol1/ch1.md"),
            contents: "---\ntitle: ch1\n---\n## Art\n\n<figure><img src=\"img/a.png\"></figure>\n"
                .to_string(),
            created: None,
        };

        let fragment = document_fragment(&document, true);

        // front-matter gone, heading rendered, image absolute, section wrapped
        assert!(!fragment.contains("title: ch1"));
        assert!(fragment.contains("<h2>Art</h2>"));
        assert!(fragment.contains("file:///books/vol1/img/a.png"));
        assert!(fragment.contains("<section class=\"break\">"));
    }

    #[test]
    fn restructuring_can_be_disabled() {
        let document = Document {
            path: PathBuf::from("/books/ch1.md"),
            contents: "## A\n\n<figure>f</figure>\n".to_string(),
            created: None,
        };

        let fragment = document_fragment(&document, false);
        assert!(!fragment.contains("<section"));
    }
}
