//! Plain-text rendering of documents and toolbars for the terminal.

use studynote_core::{Document, MarkKind, Node, NodeKind, ToolbarButton};

/// Renders `document` as markdown-flavoured text, one line per textblock.
pub fn document(document: &Document) -> String {
    let mut out = String::new();
    for block in document.blocks() {
        block_lines(block, "", &mut out);
    }
    out
}

fn block_lines(node: &Node, prefix: &str, out: &mut String) {
    match node.kind {
        NodeKind::Paragraph => line(out, prefix, &inline(&node.content)),
        NodeKind::Heading => {
            let hashes = "#".repeat(usize::from(node.heading_level().unwrap_or(1)));
            line(out, prefix, &format!("{hashes} {}", inline(&node.content)));
        }
        NodeKind::HorizontalRule => line(out, prefix, "---"),
        NodeKind::Blockquote => {
            let nested = format!("{prefix}> ");
            for child in &node.content {
                block_lines(child, &nested, out);
            }
        }
        NodeKind::BulletList | NodeKind::OrderedList => {
            let start = node.attrs.start.unwrap_or(1);
            for (offset, item) in node.content.iter().enumerate() {
                let marker = if node.kind == NodeKind::BulletList {
                    "- ".to_string()
                } else {
                    format!("{}. ", start as usize + offset)
                };
                let indent = " ".repeat(marker.chars().count());
                for (index, child) in item.content.iter().enumerate() {
                    let lead = if index == 0 { &marker } else { &indent };
                    block_lines(child, &format!("{prefix}{lead}"), out);
                }
            }
        }
        _ => {}
    }
}

fn line(out: &mut String, prefix: &str, body: &str) {
    out.push_str(prefix);
    out.push_str(body);
    out.push('\n');
}

fn inline(content: &[Node]) -> String {
    content
        .iter()
        .map(|node| match node.kind {
            NodeKind::HardBreak => "\\n".to_string(),
            _ => {
                let mut text = node.text.clone().unwrap_or_default();
                for kind in node.mark_kinds() {
                    let fence = match kind {
                        MarkKind::Bold => "**",
                        MarkKind::Italic => "_",
                        MarkKind::Underline => "__",
                        MarkKind::Strike => "~~",
                        MarkKind::Code => "`",
                    };
                    text = format!("{fence}{text}{fence}");
                }
                text
            }
        })
        .collect()
}

/// One line of buttons: `[B]` pressed, `(↶)` disabled, plain otherwise.
pub fn toolbar(buttons: &[ToolbarButton]) -> String {
    buttons
        .iter()
        .map(|button| {
            if !button.enabled {
                format!("({})", button.label)
            } else if button.pressed {
                format!("[{}]", button.label)
            } else {
                button.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::document;
    use studynote_core::{Document, MarkKind, Node};

    #[test]
    fn renders_nested_structure() {
        let doc = Document::from_blocks(vec![
            Node::heading(2, vec![Node::text("Psalm")]),
            Node::ordered_list(vec![
                Node::list_item(vec![Node::paragraph(vec![Node::text("ett")])]),
                Node::list_item(vec![Node::paragraph(vec![Node::marked_text(
                    "två",
                    &[MarkKind::Bold],
                )])]),
            ]),
            Node::blockquote(vec![Node::paragraph(vec![Node::text("citat")])]),
            Node::horizontal_rule(),
            Node::paragraph(Vec::new()),
        ])
        .unwrap();

        assert_eq!(
            document(&doc),
            "## Psalm\n1. ett\n2. **två**\n> citat\n---\n\n"
        );
    }
}
