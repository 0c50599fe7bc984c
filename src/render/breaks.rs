//! Page-break structuring of rendered HTML fragments.
//!
//! Printed books want chapter and illustrated sections isolated on their own
//! pages, but wrapping *every* heading-delimited section in a break container
//! pads the output with blank pages. The structuring therefore runs in two
//! passes: first every heading-anchored section is wrapped in
//! `<section class="break">`, then sections that contain neither a figure nor
//! a top-level heading are unwrapped again. The wrap pass stays shape-based
//! and simple; the content-based exceptions live entirely in the second pass.

use once_cell::sync::Lazy;
use regex::Regex;

// a chapter head: <h1> immediately followed (whitespace only) by an <h2>
static RE_CHAPTER_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<h1>.*?</h1>\s*<h2>.*?</h2>").unwrap());

// a plain section head
static RE_SECTION_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h2>.*?</h2>").unwrap());

static RE_BREAK_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<section class="break">(.*?)</section>"#).unwrap());

/// Restructure a fragment for page-break control.
///
/// Sections are anchored at heading boundaries and read greedily through to
/// the next `<h2>` or the end of the fragment. After wrapping, sections
/// without a `<figure>` or `<h1>` inside are unwrapped so plain sub-sections
/// flow normally. A fragment with no matching headings passes through
/// unchanged.
pub fn isolate_sections(html: &str) -> String {
    unwrap_plain_sections(&wrap_sections(html))
}

/// Pass 1: wrap each heading-anchored span in a break container.
///
/// At each step the earliest of the two section shapes wins: a chapter head
/// (`<h1>` + `<h2>`) or a bare section head (`<h2>`). The span extends to
/// the next literal `<h2>`, which is not consumed and anchors the next
/// section. Text between sections is passed through verbatim, and each
/// wrapped span is trimmed of surrounding whitespace.
fn wrap_sections(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + 128);
    let mut pos = 0;

    loop {
        let chapter = RE_CHAPTER_HEAD.find_at(html, pos);
        let section = RE_SECTION_HEAD.find_at(html, pos);

        let head = match (chapter, section) {
            (Some(chapter), Some(section)) if chapter.start() <= section.start() => chapter,
            (_, Some(section)) => section,
            (Some(chapter), None) => chapter,
            (None, None) => break,
        };

        let span_end = html[head.end()..]
            .find("<h2>")
            .map(|offset| head.end() + offset)
            .unwrap_or(html.len());

        out.push_str(&html[pos..head.start()]);
        out.push_str(r#"<section class="break">"#);
        out.push_str(html[head.start()..span_end].trim());
        out.push_str("</section>");

        pos = span_end;
    }

    out.push_str(&html[pos..]);
    out
}

/// Pass 2: unwrap break containers whose content doesn't need page
/// isolation (no figure, no top-level heading inside).
fn unwrap_plain_sections(html: &str) -> String {
    RE_BREAK_SECTION
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let inner = &caps[1];
            if inner.contains("<figure>") || inner.contains("<h1>") {
                caps[0].to_string()
            } else {
                inner.trim().to_string()
            }
        })
        .into_owned()
}
