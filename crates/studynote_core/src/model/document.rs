//! Rich-text document tree.
//!
//! # Responsibility
//! - Define the JSON-compatible node/mark shape stored inside every note.
//! - Guarantee that a `Document` handed out by core is always structurally valid.
//!
//! # Invariants
//! - The root node is always `doc` with at least one block child.
//! - Textblocks (`paragraph`, `heading`) only hold inline nodes.
//! - Normalized documents never contain empty text nodes, and adjacent text
//!   nodes always carry different mark sets.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Highest heading level accepted by the editor.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Node categories understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    HorizontalRule,
    HardBreak,
    Text,
}

impl NodeKind {
    /// Blocks whose children are inline content.
    pub fn is_textblock(self) -> bool {
        matches!(self, Self::Paragraph | Self::Heading)
    }

    pub fn is_list(self) -> bool {
        matches!(self, Self::BulletList | Self::OrderedList)
    }

    pub fn is_inline(self) -> bool {
        matches!(self, Self::Text | Self::HardBreak)
    }

    /// Blocks whose children are other blocks.
    pub fn is_block_container(self) -> bool {
        matches!(self, Self::Doc | Self::ListItem | Self::Blockquote)
    }
}

/// Inline formatting marks, declared in canonical sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
}

/// One mark applied to a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
}

impl From<MarkKind> for Mark {
    fn from(kind: MarkKind) -> Self {
        Self { kind }
    }
}

/// Node attributes used by the supported schema.
///
/// Unknown attributes written by other editors are ignored on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
}

impl NodeAttrs {
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.start.is_none()
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "NodeAttrs::is_empty")]
    pub attrs: NodeAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    fn bare(kind: NodeKind, content: Vec<Node>) -> Self {
        Self {
            kind,
            attrs: NodeAttrs::default(),
            content,
            marks: Vec::new(),
            text: None,
        }
    }

    pub fn doc(blocks: Vec<Node>) -> Self {
        Self::bare(NodeKind::Doc, blocks)
    }

    pub fn paragraph(inline: Vec<Node>) -> Self {
        Self::bare(NodeKind::Paragraph, inline)
    }

    pub fn heading(level: u8, inline: Vec<Node>) -> Self {
        let mut node = Self::bare(NodeKind::Heading, inline);
        node.attrs.level = Some(level.clamp(1, MAX_HEADING_LEVEL));
        node
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Self::bare(NodeKind::BulletList, items)
    }

    pub fn ordered_list(items: Vec<Node>) -> Self {
        let mut node = Self::bare(NodeKind::OrderedList, items);
        node.attrs.start = Some(1);
        node
    }

    pub fn list_item(blocks: Vec<Node>) -> Self {
        Self::bare(NodeKind::ListItem, blocks)
    }

    pub fn blockquote(blocks: Vec<Node>) -> Self {
        Self::bare(NodeKind::Blockquote, blocks)
    }

    pub fn horizontal_rule() -> Self {
        Self::bare(NodeKind::HorizontalRule, Vec::new())
    }

    pub fn hard_break() -> Self {
        Self::bare(NodeKind::HardBreak, Vec::new())
    }

    /// Plain text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::marked_text(value, &[])
    }

    /// Text node carrying `marks`.
    pub fn marked_text(value: impl Into<String>, marks: &[MarkKind]) -> Self {
        let mut node = Self::bare(NodeKind::Text, Vec::new());
        node.text = Some(value.into());
        node.marks = marks.iter().copied().map(Mark::from).collect();
        node
    }

    /// Heading level for `heading` nodes, `None` otherwise.
    pub fn heading_level(&self) -> Option<u8> {
        if self.kind == NodeKind::Heading {
            Some(self.attrs.level.unwrap_or(1))
        } else {
            None
        }
    }

    pub fn mark_kinds(&self) -> Vec<MarkKind> {
        self.marks.iter().map(|mark| mark.kind).collect()
    }

    pub fn has_mark(&self, kind: MarkKind) -> bool {
        self.marks.iter().any(|mark| mark.kind == kind)
    }

    /// Concatenated text of this subtree; hard breaks become spaces.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node.kind {
        NodeKind::Text => out.push_str(node.text.as_deref().unwrap_or_default()),
        NodeKind::HardBreak => out.push(' '),
        kind => {
            for child in &node.content {
                collect_text(child, out);
            }
            if kind.is_textblock() {
                out.push('\n');
            }
        }
    }
}

/// Structural validation failure for persisted document payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Root node is not `doc`.
    InvalidRoot(NodeKind),
    /// Root `doc` has no block children.
    EmptyDocument,
    /// A node appears where the schema does not allow it.
    Misplaced { parent: NodeKind, child: NodeKind },
    /// Text node without text.
    MissingText,
    /// Heading level outside `1..=6`.
    InvalidHeadingLevel(u8),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot(kind) => write!(f, "document root must be `doc`, got `{kind:?}`"),
            Self::EmptyDocument => write!(f, "document must contain at least one block"),
            Self::Misplaced { parent, child } => {
                write!(f, "`{child:?}` is not allowed inside `{parent:?}`")
            }
            Self::MissingText => write!(f, "text node is missing its text"),
            Self::InvalidHeadingLevel(level) => {
                write!(f, "heading level {level} is outside 1..={MAX_HEADING_LEVEL}")
            }
        }
    }
}

impl Error for DocumentError {}

/// Validated document tree whose root is always a non-empty `doc` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Node", into = "Node")]
pub struct Document {
    root: Node,
}

impl Document {
    /// Empty document: one empty paragraph.
    pub fn empty() -> Self {
        Self {
            root: Node::doc(vec![Node::paragraph(Vec::new())]),
        }
    }

    /// Builds a document from top-level blocks, validating and normalizing them.
    pub fn from_blocks(blocks: Vec<Node>) -> Result<Self, DocumentError> {
        Self::try_from(Node::doc(blocks))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn blocks(&self) -> &[Node] {
        &self.root.content
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Text content with one line per textblock.
    pub fn plain_text(&self) -> String {
        self.root.plain_text()
    }

    /// Whether the document holds nothing but one empty paragraph.
    pub fn is_blank(&self) -> bool {
        matches!(
            self.root.content.as_slice(),
            [only] if only.kind == NodeKind::Paragraph && only.content.is_empty()
        )
    }

    /// Node at `path` (child indexes from the root).
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = &self.root;
        for index in path {
            node = node.content.get(*index)?;
        }
        Some(node)
    }

    /// Paths of every textblock in document order.
    pub fn textblock_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_textblocks(&self.root, &mut prefix, &mut paths);
        paths
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Restores the normalized-form invariants after an in-place edit.
    pub(crate) fn normalize(&mut self) {
        normalize_node(&mut self.root);
        if self.textblock_paths().is_empty() {
            self.root.content.push(Node::paragraph(Vec::new()));
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Node> for Document {
    type Error = DocumentError;

    fn try_from(root: Node) -> Result<Self, Self::Error> {
        if root.kind != NodeKind::Doc {
            return Err(DocumentError::InvalidRoot(root.kind));
        }
        if root.content.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        validate_children(&root)?;
        let mut document = Self { root };
        document.normalize();
        Ok(document)
    }
}

impl From<Document> for Node {
    fn from(value: Document) -> Self {
        value.root
    }
}

fn collect_textblocks(node: &Node, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if node.kind.is_textblock() {
        out.push(prefix.clone());
        return;
    }
    for (index, child) in node.content.iter().enumerate() {
        prefix.push(index);
        collect_textblocks(child, prefix, out);
        prefix.pop();
    }
}

fn child_allowed(parent: NodeKind, child: NodeKind) -> bool {
    match parent {
        NodeKind::Doc | NodeKind::ListItem | NodeKind::Blockquote => {
            !child.is_inline() && !matches!(child, NodeKind::Doc | NodeKind::ListItem)
        }
        NodeKind::BulletList | NodeKind::OrderedList => child == NodeKind::ListItem,
        NodeKind::Paragraph | NodeKind::Heading => child.is_inline(),
        NodeKind::HorizontalRule | NodeKind::HardBreak | NodeKind::Text => false,
    }
}

fn validate_children(node: &Node) -> Result<(), DocumentError> {
    if node.kind == NodeKind::Text && node.text.is_none() {
        return Err(DocumentError::MissingText);
    }
    if let Some(level) = node.attrs.level.filter(|_| node.kind == NodeKind::Heading) {
        if level == 0 || level > MAX_HEADING_LEVEL {
            return Err(DocumentError::InvalidHeadingLevel(level));
        }
    }
    for child in &node.content {
        if !child_allowed(node.kind, child.kind) {
            return Err(DocumentError::Misplaced {
                parent: node.kind,
                child: child.kind,
            });
        }
        validate_children(child)?;
    }
    Ok(())
}

fn normalize_node(node: &mut Node) {
    if node.kind.is_textblock() {
        if node.kind == NodeKind::Heading {
            node.attrs.level.get_or_insert(1);
        }
        normalize_inline(&mut node.content);
        return;
    }

    for child in &mut node.content {
        normalize_node(child);
    }

    if node.kind.is_list() {
        return;
    }

    if node.kind.is_block_container() {
        // Lists emptied by an edit disappear instead of lingering as husks.
        node.content
            .retain(|child| !(child.kind.is_list() && child.content.is_empty()));
        if node.content.is_empty() {
            node.content.push(Node::paragraph(Vec::new()));
        }
    }
}

/// Sorts marks, drops empty text, and merges equally-marked neighbours.
pub(crate) fn normalize_inline(inline: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(inline.len());
    for mut node in inline.drain(..) {
        if node.kind == NodeKind::Text {
            if node.text.as_deref().map_or(true, str::is_empty) {
                continue;
            }
            node.marks.sort_by_key(|mark| mark.kind);
            node.marks.dedup();
            if let Some(last) = merged.last_mut() {
                if last.kind == NodeKind::Text && last.marks == node.marks {
                    let tail = node.text.take().unwrap_or_default();
                    last.text.get_or_insert_with(String::new).push_str(&tail);
                    continue;
                }
            }
        }
        merged.push(node);
    }
    *inline = merged;
}
