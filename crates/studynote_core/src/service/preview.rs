//! Sidebar preview derivation.
//!
//! # Invariants
//! - Previews are single-line, whitespace-collapsed, and at most
//!   `PREVIEW_MAX_CHARS` characters.

use crate::model::document::Document;
use once_cell::sync::Lazy;
use regex::Regex;

pub const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives a short plain-text preview from a document, `None` when blank.
pub fn derive_preview(document: &Document) -> Option<String> {
    let text = document.plain_text();
    let collapsed = WHITESPACE_RE.replace_all(&text, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_preview, PREVIEW_MAX_CHARS};
    use crate::model::document::{Document, Node};

    #[test]
    fn preview_joins_blocks_on_one_line() {
        let doc = Document::from_blocks(vec![
            Node::heading(1, vec![Node::text("Johannes  1")]),
            Node::paragraph(vec![Node::text("I begynnelsen"), Node::hard_break(), Node::text("var Ordet")]),
        ])
        .unwrap();
        assert_eq!(
            derive_preview(&doc).as_deref(),
            Some("Johannes 1 I begynnelsen var Ordet")
        );
    }

    #[test]
    fn blank_document_has_no_preview_and_long_text_is_capped() {
        assert_eq!(derive_preview(&Document::empty()), None);

        let long = "å".repeat(PREVIEW_MAX_CHARS * 2);
        let doc = Document::from_blocks(vec![Node::paragraph(vec![Node::text(long)])]).unwrap();
        assert_eq!(
            derive_preview(&doc).unwrap().chars().count(),
            PREVIEW_MAX_CHARS
        );
    }
}
