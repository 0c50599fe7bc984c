//! Assembly of per-document fragments into the combined HTML book.

/// Build the single HTML document handed to the PDF engine.
///
/// The stylesheet is inlined into the head, the optional book title is
/// escaped into `<title>`, and each fragment lands in its own `<div>` in the
/// order supplied. With `page_breaks` set, a `<div class="page-break">`
/// marker follows every fragment's container so the stylesheet can force a
/// break between documents.
pub fn assemble(
    fragments: &[String],
    styles: &str,
    title: Option<&str>,
    page_breaks: bool,
) -> String {
    let size: usize = fragments.iter().map(String::len).sum::<usize>() + styles.len() + 256;
    let mut book = String::with_capacity(size);

    book.push_str("<html><head><meta charset=\"UTF-8\">");
    if let Some(title) = title {
        book.push_str("<title>");
        book.push_str(&html_escape::encode_text(title));
        book.push_str("</title>");
    }
    book.push_str("<style>");
    book.push_str(styles);
    book.push_str("</style></head><body>");

    for fragment in fragments {
        book.push_str("<div>");
        book.push_str(fragment);
        book.push_str("</div>");
        if page_breaks {
            book.push_str("<div class=\"page-break\"></div>");
        }
    }

    book.push_str("</body></html>");
    book
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_break_marker_follows_each_fragment() {
        let fragments = vec![
            "<p>one</p>".to_string(),
            "<p>two</p>".to_string(),
            "<p>three</p>".to_string(),
        ];
        let book = assemble(&fragments, "", None, true);

        assert_eq!(book.matches("<div class=\"page-break\"></div>").count(), 3);
        for fragment in &fragments {
            let container = format!("<div>{}</div><div class=\"page-break\"></div>", fragment);
            assert!(book.contains(&container));
        }
    }

    #[test]
    fn fragments_appear_in_input_order() {
        let fragments = vec!["<p>one</p>".to_string(), "<p>two</p>".to_string()];
        let book = assemble(&fragments, "", None, false);

        let first = book.find("<p>one</p>").unwrap();
        let second = book.find("<p>two</p>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn breaks_disabled_leaves_no_markers() {
        let fragments = vec!["<p>one</p>".to_string()];
        let book = assemble(&fragments, "", None, false);
        assert!(!book.contains("page-break"));
    }

    #[test]
    fn stylesheet_is_inlined_into_the_head() {
        let book = assemble(&[], "body { margin: 0; }", None, true);
        assert!(book.contains("<style>body { margin: 0; }</style>"));
    }

    #[test]
    fn title_is_escaped() {
        let book = assemble(&[], "", Some("War & <Peace>"), false);
        assert!(book.contains("<title>War &amp; &lt;Peace&gt;</title>"));
    }
}
