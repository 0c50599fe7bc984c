//! Markdown preparation and rendering: strip front-matter metadata, then
//! hand the text to pulldown-cmark for the HTML fragment.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use std::borrow::Cow;

// one leading block fenced by `---` lines, plus the blank space after it
static RE_FRONT_MATTER: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?s)\A---.*?---\s+").unwrap());

/// Remove a single front-matter block from the start of a document.
///
/// The block may span many lines; only the first block, and only at the very
/// start of the text, is removed. Documents without one pass through
/// untouched.
pub fn strip_front_matter(markdown: &str) -> Cow<'_, str> {
    RE_FRONT_MATTER.replace(markdown, "")
}

/// Render Markdown to an HTML fragment.
///
/// Tables are enabled as an extension; fenced code blocks are core
/// CommonMark and need no flag.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut fragment, parser);
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_leading_block_and_preserves_the_rest() {
        let input = "---\ntitle: Chapter One\ndate: 2025-03-01\n---\n\n# Chapter One\n\nBody text.\n";
        assert_eq!(
            strip_front_matter(input),
            "# Chapter One\n\nBody text.\n"
        );
    }

    #[test]
    fn document_without_front_matter_is_untouched() {
        let input = "# Chapter One\n\nBody text.\n";
        assert_eq!(strip_front_matter(input), input);
    }

    #[test]
    fn block_not_at_the_start_is_untouched() {
        let input = "intro\n---\ntitle: x\n---\nrest\n";
        assert_eq!(strip_front_matter(input), input);
    }

    #[test]
    fn only_the_first_block_is_removed() {
        let input = "---\na: 1\n---\nbody\n\n---\nb: 2\n---\nmore\n";
        let stripped = strip_front_matter(input);
        assert!(stripped.starts_with("body"));
        assert!(stripped.contains("---\nb: 2\n---"));
    }

    #[test]
    fn renders_tables() {
        let html = markdown_to_html("| a | b |\n| --- | --- |\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn renders_fenced_code_blocks() {
        let html = markdown_to_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre><code"));
        assert!(html.contains("fn main() {}"));
    }
}
