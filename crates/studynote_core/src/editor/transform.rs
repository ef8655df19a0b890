//! Pure tree and inline-content transforms used by the editing surface.
//!
//! Inline offsets count characters; a hard break occupies one position.
//! Structural helpers address nodes by child-index paths from the root and
//! never change the document order of textblocks.

use crate::model::document::{normalize_inline, MarkKind, Node, NodeKind};

fn node_len(node: &Node) -> usize {
    match node.kind {
        NodeKind::Text => node.text.as_deref().map_or(0, |text| text.chars().count()),
        NodeKind::HardBreak => 1,
        _ => 0,
    }
}

pub(crate) fn inline_len(inline: &[Node]) -> usize {
    inline.iter().map(node_len).sum()
}

fn split_text(text: &str, at: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(at)
        .map_or(text.len(), |(index, _)| index);
    text.split_at(byte)
}

/// Splits inline content at `offset`, cutting a straddling text node in two.
pub(crate) fn split_inline(inline: &[Node], offset: usize) -> (Vec<Node>, Vec<Node>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut pos = 0;
    for node in inline {
        let len = node_len(node);
        if pos + len <= offset {
            left.push(node.clone());
        } else if pos >= offset {
            right.push(node.clone());
        } else {
            let text = node.text.as_deref().unwrap_or_default();
            let (head, tail) = split_text(text, offset - pos);
            let marks = node.mark_kinds();
            left.push(Node::marked_text(head, &marks));
            right.push(Node::marked_text(tail, &marks));
        }
        pos += len;
    }
    (left, right)
}

fn slice_inline(inline: &[Node], from: usize, to: usize) -> (Vec<Node>, Vec<Node>, Vec<Node>) {
    let (before, rest) = split_inline(inline, from);
    let (middle, after) = split_inline(&rest, to.saturating_sub(from));
    (before, middle, after)
}

fn join(parts: [Vec<Node>; 3]) -> Vec<Node> {
    let mut joined: Vec<Node> = parts.into_iter().flatten().collect();
    normalize_inline(&mut joined);
    joined
}

/// Marks that typing at `offset` inherits: those of the preceding character,
/// or of the first character when at the start.
pub(crate) fn marks_at(inline: &[Node], offset: usize) -> Vec<MarkKind> {
    let target = offset.saturating_sub(1);
    let mut pos = 0;
    for node in inline {
        let len = node_len(node);
        if target < pos + len {
            return match node.kind {
                NodeKind::Text => node.mark_kinds(),
                _ => Vec::new(),
            };
        }
        pos += len;
    }
    Vec::new()
}

/// Whether every text character in `from..to` carries `mark`.
pub(crate) fn range_has_mark(inline: &[Node], from: usize, to: usize, mark: MarkKind) -> bool {
    let (_, middle, _) = slice_inline(inline, from, to);
    let mut texts = middle
        .iter()
        .filter(|node| node.kind == NodeKind::Text)
        .peekable();
    texts.peek().is_some() && texts.all(|node| node.has_mark(mark))
}

pub(crate) fn set_mark(inline: &mut Vec<Node>, from: usize, to: usize, mark: MarkKind, on: bool) {
    let (before, mut middle, after) = slice_inline(inline, from, to);
    for node in middle.iter_mut().filter(|node| node.kind == NodeKind::Text) {
        if on {
            if !node.has_mark(mark) {
                node.marks.push(mark.into());
            }
        } else {
            node.marks.retain(|existing| existing.kind != mark);
        }
    }
    *inline = join([before, middle, after]);
}

pub(crate) fn insert_text(inline: &mut Vec<Node>, offset: usize, text: &str, marks: &[MarkKind]) {
    let (before, after) = split_inline(inline, offset);
    *inline = join([before, vec![Node::marked_text(text, marks)], after]);
}

pub(crate) fn delete_range(inline: &mut Vec<Node>, from: usize, to: usize) {
    let (before, _, after) = slice_inline(inline, from, to);
    *inline = join([before, Vec::new(), after]);
}

pub(crate) fn node_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for index in path {
        node = node.content.get_mut(*index)?;
    }
    Some(node)
}

pub(crate) fn node_at<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    let mut node = root;
    for index in path {
        node = node.content.get(*index)?;
    }
    Some(node)
}

/// Nearest strict ancestor of `path` (excluding the root) matching `kind`.
pub(crate) fn nearest_ancestor(
    root: &Node,
    path: &[usize],
    matches: impl Fn(NodeKind) -> bool,
) -> Option<Vec<usize>> {
    (1..path.len())
        .rev()
        .map(|depth| &path[..depth])
        .find(|prefix| node_at(root, prefix).is_some_and(|node| matches(node.kind)))
        .map(<[usize]>::to_vec)
}

/// Replaces the node at `path` with `wrap(node)`, then joins the wrapper with
/// same-kind neighbours.
pub(crate) fn wrap_in(root: &mut Node, path: &[usize], wrap: impl FnOnce(Node) -> Node) -> bool {
    let Some((&index, parent_path)) = path.split_last() else {
        return false;
    };
    let Some(parent) = node_mut(root, parent_path) else {
        return false;
    };
    if index >= parent.content.len() {
        return false;
    }
    let target = parent.content.remove(index);
    parent.content.insert(index, wrap(target));
    join_neighbours(parent, index);
    true
}

/// Merges the container at `index` with adjacent siblings of the same kind.
///
/// When merging forward the survivor adopts the follower's attrs, so that a
/// list split by `lift_child` and re-wrapped keeps its original attrs.
fn join_neighbours(parent: &mut Node, index: usize) {
    let kind = parent.content[index].kind;
    if parent.content.get(index + 1).is_some_and(|next| next.kind == kind) {
        let next = parent.content.remove(index + 1);
        let current = &mut parent.content[index];
        current.attrs = next.attrs;
        current.content.extend(next.content);
    }
    if index > 0 && parent.content[index - 1].kind == kind {
        let current = parent.content.remove(index);
        parent.content[index - 1].content.extend(current.content);
    }
}

/// Moves child `child_index` of the container at `container_path` out into
/// the container's parent, splitting the container around it.
///
/// List items are dissolved into their blocks; other children move as-is.
pub(crate) fn lift_child(root: &mut Node, container_path: &[usize], child_index: usize) -> bool {
    let Some((&index, parent_path)) = container_path.split_last() else {
        return false;
    };
    let Some(parent) = node_mut(root, parent_path) else {
        return false;
    };
    if index >= parent.content.len() || child_index >= parent.content[index].content.len() {
        return false;
    }

    let container = parent.content.remove(index);
    let (kind, attrs) = (container.kind, container.attrs);
    let shell = |content: Vec<Node>| Node {
        kind,
        attrs,
        content,
        marks: Vec::new(),
        text: None,
    };
    let mut before = container.content;
    let after = before.split_off(child_index + 1);
    let Some(child) = before.pop() else {
        return false;
    };

    let mut replacement = Vec::new();
    if !before.is_empty() {
        replacement.push(shell(before));
    }
    if child.kind == NodeKind::ListItem {
        replacement.extend(child.content);
    } else {
        replacement.push(child);
    }
    if !after.is_empty() {
        replacement.push(shell(after));
    }
    parent.content.splice(index..index, replacement);
    true
}

/// Removes the node at `path` and any ancestors left empty (the root stays).
pub(crate) fn remove_pruning(root: &mut Node, path: &[usize]) {
    let mut current = path.to_vec();
    while let Some(index) = current.pop() {
        let Some(parent) = node_mut(root, &current) else {
            return;
        };
        if index < parent.content.len() {
            parent.content.remove(index);
        }
        if !parent.content.is_empty() || current.is_empty() {
            return;
        }
    }
}
