//! HTML to plain text extraction
//!
//! Strips markup from a whole document, drops the contents of non-visible
//! elements, collapses whitespace and truncates by character count.

use scraper::{Html, Node};

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract plain text from an HTML document
///
/// # Arguments
/// * `html` - Raw HTML string
/// * `max_chars` - Maximum characters to return
///
/// # Returns
/// Whitespace-collapsed text, at most `max_chars` characters long
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }

        raw.push_str(text);
        raw.push(' ');
    }

    truncate_chars(&collapse_whitespace(&raw), max_chars)
}

/// Normalize all runs of whitespace to a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
