//! In-process rich-text editing surface.
//!
//! # Responsibility
//! - Apply formatting commands and direct input to a `Document`.
//! - Keep a bounded snapshot history for undo/redo.
//! - Queue one change notification per document mutation.
//!
//! # Invariants
//! - The selection always points at an existing textblock with in-range offsets.
//! - Toggle commands preserve textblock order, so the selection survives them.
//! - A command that leaves the document unchanged records no history and
//!   emits no notification.

use crate::config::DEFAULT_HISTORY_DEPTH;
use crate::editor::capability::{EditorCapability, EditorSurface, Selection};
use crate::editor::command::{Command, Format};
use crate::editor::transform::{
    delete_range, inline_len, insert_text, lift_child, marks_at, nearest_ancestor, node_at,
    node_mut, range_has_mark, remove_pruning, set_mark, split_inline, wrap_in,
};
use crate::model::document::{Document, MarkKind, Node, NodeAttrs, NodeKind, MAX_HEADING_LEVEL};
use log::trace;

#[derive(Debug, Clone)]
struct Snapshot {
    document: Document,
    selection: Selection,
}

/// Default `EditorSurface` implementation operating on `Document` trees.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    selection: Selection,
    stored_marks: Option<Vec<MarkKind>>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    history_depth: usize,
    pending: Vec<Document>,
}

impl DocumentEditor {
    pub fn new(history_depth: usize) -> Self {
        Self {
            document: Document::empty(),
            selection: Selection::default(),
            stored_marks: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_depth,
            pending: Vec::new(),
        }
    }

    /// Editor preloaded with `document`, without history or notifications.
    pub fn with_document(document: Document) -> Self {
        let mut editor = Self::default();
        editor.document = document;
        editor
    }

    /// Number of undo steps currently available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.selection = snapshot.selection;
        self.stored_marks = None;
        self.clamp_selection();
    }

    fn emit(&mut self) {
        self.pending.push(self.document.clone());
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.history_depth == 0 {
            return;
        }
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.history_depth {
            let overflow = self.undo_stack.len() - self.history_depth;
            self.undo_stack.drain(..overflow);
        }
    }

    /// Runs one edit as a single undoable step.
    fn transact(&mut self, edit: impl FnOnce(&mut Self) -> bool) -> bool {
        let before = self.snapshot();
        if !edit(self) {
            self.document = before.document;
            self.selection = before.selection;
            return false;
        }
        self.document.normalize();
        self.clamp_selection();
        if self.document == before.document {
            return false;
        }
        self.push_undo(before);
        self.redo_stack.clear();
        self.stored_marks = None;
        self.emit();
        true
    }

    fn block_path(&self) -> Option<Vec<usize>> {
        self.document
            .textblock_paths()
            .into_iter()
            .nth(self.selection.block)
    }

    fn block(&self) -> Option<&Node> {
        self.block_path()
            .and_then(|path| self.document.node_at(&path))
    }

    fn block_mut(&mut self) -> Option<&mut Node> {
        let path = self.block_path()?;
        node_mut(self.document.root_mut(), &path)
    }

    fn ordinal_of(&self, path: &[usize]) -> Option<usize> {
        self.document
            .textblock_paths()
            .iter()
            .position(|candidate| candidate.as_slice() == path)
    }

    fn clamp_selection(&mut self) {
        let count = self.document.textblock_paths().len();
        self.selection.block = self.selection.block.min(count.saturating_sub(1));
        let len = self.block().map_or(0, |block| inline_len(&block.content));
        self.selection.anchor = self.selection.anchor.min(len);
        self.selection.head = self.selection.head.min(len);
    }

    /// Marks the next typed character would carry.
    fn current_marks(&self) -> Vec<MarkKind> {
        if let Some(marks) = &self.stored_marks {
            return marks.clone();
        }
        self.block()
            .map(|block| marks_at(&block.content, self.selection.from()))
            .unwrap_or_default()
    }

    fn toggle_mark(&mut self, mark: MarkKind) -> bool {
        let selection = self.selection;
        if selection.is_empty() {
            let mut marks = self.current_marks();
            match marks.iter().position(|existing| *existing == mark) {
                Some(index) => {
                    marks.remove(index);
                }
                None => {
                    marks.push(mark);
                    marks.sort();
                }
            }
            self.stored_marks = Some(marks);
            return true;
        }

        self.transact(|editor| {
            let Some(block) = editor.block_mut() else {
                return false;
            };
            let on = !range_has_mark(&block.content, selection.from(), selection.to(), mark);
            set_mark(&mut block.content, selection.from(), selection.to(), mark, on);
            true
        })
    }

    fn toggle_heading(&mut self, level: u8) -> bool {
        let level = level.clamp(1, MAX_HEADING_LEVEL);
        self.transact(|editor| {
            let Some(block) = editor.block_mut() else {
                return false;
            };
            if block.heading_level() == Some(level) {
                block.kind = NodeKind::Paragraph;
                block.attrs = NodeAttrs::default();
            } else {
                block.kind = NodeKind::Heading;
                block.attrs = NodeAttrs {
                    level: Some(level),
                    start: None,
                };
            }
            true
        })
    }

    /// Path of the innermost list or blockquote around the cursor.
    fn innermost_wrapper(&self) -> Option<(Vec<usize>, NodeKind)> {
        let path = self.block_path()?;
        let root = self.document.root();
        let wrapper = nearest_ancestor(root, &path, is_wrapper)?;
        let kind = node_at(root, &wrapper)?.kind;
        Some((wrapper, kind))
    }

    /// Lists and blockquotes toggle against the innermost wrapper only, so a
    /// toggle pair always wraps and lifts the same textblock.
    fn toggle_list(&mut self, kind: NodeKind) -> bool {
        self.transact(|editor| {
            let Some(path) = editor.block_path() else {
                return false;
            };
            let wrapper = editor.innermost_wrapper();
            let root = editor.document.root_mut();
            let list_path = match wrapper {
                Some((list_path, wrapper_kind)) if wrapper_kind.is_list() => list_path,
                _ => {
                    return wrap_in(root, &path, |block| {
                        let item = Node::list_item(vec![block]);
                        match kind {
                            NodeKind::OrderedList => Node::ordered_list(vec![item]),
                            _ => Node::bullet_list(vec![item]),
                        }
                    });
                }
            };

            let Some(list) = node_mut(root, &list_path) else {
                return false;
            };
            if list.kind == kind {
                return lift_child(root, &list_path, path[list_path.len()]);
            }
            list.kind = kind;
            list.attrs.start = match kind {
                NodeKind::OrderedList => Some(1),
                _ => None,
            };
            true
        })
    }

    fn toggle_blockquote(&mut self) -> bool {
        self.transact(|editor| {
            let Some(path) = editor.block_path() else {
                return false;
            };
            let wrapper = editor.innermost_wrapper();
            let root = editor.document.root_mut();
            match wrapper {
                Some((quote_path, NodeKind::Blockquote)) => {
                    lift_child(root, &quote_path, path[quote_path.len()])
                }
                _ => wrap_in(root, &path, |block| Node::blockquote(vec![block])),
            }
        })
    }

    fn insert_horizontal_rule(&mut self) -> bool {
        self.transact(|editor| {
            let Some(path) = editor.block_path() else {
                return false;
            };
            let Some((&index, parent_path)) = path.split_last() else {
                return false;
            };
            let Some(parent) = node_mut(editor.document.root_mut(), parent_path) else {
                return false;
            };
            parent.content.insert(index + 1, Node::horizontal_rule());
            if index + 2 == parent.content.len() {
                parent.content.push(Node::paragraph(Vec::new()));
            }

            let mut rule_path = parent_path.to_vec();
            rule_path.push(index + 1);
            let next = editor
                .document
                .textblock_paths()
                .iter()
                .position(|candidate| candidate.as_slice() > rule_path.as_slice());
            if let Some(ordinal) = next {
                editor.selection = Selection::cursor(ordinal, 0);
            }
            true
        })
    }

    fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(previous);
        self.emit();
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.push_undo(current);
        self.restore(next);
        self.emit();
        true
    }

    /// Replaces the selection with `text`, leaving the cursor after it.
    fn replace_selection(&mut self, text: &str, marks: &[MarkKind]) -> bool {
        let selection = self.selection;
        let Some(block) = self.block_mut() else {
            return false;
        };
        delete_range(&mut block.content, selection.from(), selection.to());
        if !text.is_empty() {
            insert_text(&mut block.content, selection.from(), text, marks);
        }
        self.selection = Selection::cursor(selection.block, selection.from() + text.chars().count());
        true
    }

    fn split_at_cursor(&mut self) -> bool {
        if !self.replace_selection("", &[]) {
            return false;
        }
        let Some(path) = self.block_path() else {
            return false;
        };
        let Some((&index, parent_path)) = path.split_last() else {
            return false;
        };
        let offset = self.selection.head;
        let root = self.document.root_mut();
        let Some(block) = node_at(root, &path).cloned() else {
            return false;
        };
        let Some(parent) = node_at(root, parent_path) else {
            return false;
        };
        let in_list_item = parent.kind == NodeKind::ListItem;

        // Enter on an empty, single-block list item leaves the list.
        if in_list_item && block.content.is_empty() && parent.content.len() == 1 {
            let Some((&item_index, list_path)) = parent_path.split_last() else {
                return false;
            };
            return lift_child(root, list_path, item_index);
        }

        let (left, right) = split_inline(&block.content, offset);
        let mut tail = Node {
            content: right,
            ..block
        };
        if tail.kind == NodeKind::Heading && tail.content.is_empty() {
            tail.kind = NodeKind::Paragraph;
            tail.attrs = NodeAttrs::default();
        }
        if let Some(current) = node_mut(root, &path) {
            current.content = left;
        }

        let new_path = match parent_path.split_last() {
            Some((&item_index, list_path)) if in_list_item && index == 0 => {
                let Some(list) = node_mut(root, list_path) else {
                    return false;
                };
                list.content
                    .insert(item_index + 1, Node::list_item(vec![tail]));
                let mut new_path = list_path.to_vec();
                new_path.extend([item_index + 1, 0]);
                new_path
            }
            _ => {
                let Some(parent) = node_mut(root, parent_path) else {
                    return false;
                };
                parent.content.insert(index + 1, tail);
                let mut new_path = parent_path.to_vec();
                new_path.push(index + 1);
                new_path
            }
        };

        if let Some(ordinal) = self.ordinal_of(&new_path) {
            self.selection = Selection::cursor(ordinal, 0);
        }
        true
    }

    fn delete_backward_inner(&mut self) -> bool {
        let selection = self.selection;
        if !selection.is_empty() {
            return self.replace_selection("", &[]);
        }
        let Some(path) = self.block_path() else {
            return false;
        };
        if selection.head > 0 {
            if let Some(block) = self.block_mut() {
                delete_range(&mut block.content, selection.head - 1, selection.head);
            }
            self.selection = Selection::cursor(selection.block, selection.head - 1);
            return true;
        }

        let Some((&index, parent_path)) = path.split_last() else {
            return false;
        };
        let root = self.document.root_mut();
        let Some(parent) = node_at(root, parent_path) else {
            return false;
        };

        if index == 0 && matches!(parent.kind, NodeKind::ListItem | NodeKind::Blockquote) {
            let (container_path, child_index) = match parent.kind {
                NodeKind::ListItem => match parent_path.split_last() {
                    Some((&item_index, list_path)) => (list_path, item_index),
                    None => return false,
                },
                _ => (parent_path, index),
            };
            return lift_child(root, container_path, child_index);
        }

        if index > 0 && parent.content[index - 1].kind == NodeKind::HorizontalRule {
            let mut rule_path = parent_path.to_vec();
            rule_path.push(index - 1);
            remove_pruning(root, &rule_path);
            return true;
        }

        if selection.block == 0 {
            let Some(block) = node_mut(root, &path) else {
                return false;
            };
            if block.kind != NodeKind::Heading {
                return false;
            }
            block.kind = NodeKind::Paragraph;
            block.attrs = NodeAttrs::default();
            return true;
        }

        // Join into the previous textblock. Earlier paths are unaffected by
        // removing a later node.
        let Some(previous_path) = self
            .document
            .textblock_paths()
            .into_iter()
            .nth(selection.block - 1)
        else {
            return false;
        };
        let root = self.document.root_mut();
        let Some(inline) = node_at(root, &path).map(|block| block.content.clone()) else {
            return false;
        };
        remove_pruning(root, &path);
        let Some(previous) = node_mut(root, &previous_path) else {
            return false;
        };
        let joined_at = inline_len(&previous.content);
        previous.content.extend(inline);
        self.selection = Selection::cursor(selection.block - 1, joined_at);
        true
    }
}

fn is_wrapper(kind: NodeKind) -> bool {
    kind.is_list() || kind == NodeKind::Blockquote
}

impl Default for DocumentEditor {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl EditorCapability for DocumentEditor {
    fn run(&mut self, command: Command) -> bool {
        let changed = match command {
            Command::Toggle(format) => match format {
                Format::Bold => self.toggle_mark(MarkKind::Bold),
                Format::Italic => self.toggle_mark(MarkKind::Italic),
                Format::Underline => self.toggle_mark(MarkKind::Underline),
                Format::Heading(level) => self.toggle_heading(level),
                Format::BulletList => self.toggle_list(NodeKind::BulletList),
                Format::OrderedList => self.toggle_list(NodeKind::OrderedList),
                Format::Blockquote => self.toggle_blockquote(),
            },
            Command::HorizontalRule => self.insert_horizontal_rule(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        };
        trace!("event=editor_command module=editor command={command} changed={changed}");
        changed
    }

    fn is_active(&self, format: Format) -> bool {
        let Some(path) = self.block_path() else {
            return false;
        };
        let root = self.document.root();
        match format {
            Format::Heading(level) => {
                node_at(root, &path).and_then(Node::heading_level) == Some(level)
            }
            Format::BulletList => {
                self.innermost_wrapper().map(|(_, kind)| kind) == Some(NodeKind::BulletList)
            }
            Format::OrderedList => {
                self.innermost_wrapper().map(|(_, kind)| kind) == Some(NodeKind::OrderedList)
            }
            Format::Blockquote => {
                self.innermost_wrapper().map(|(_, kind)| kind) == Some(NodeKind::Blockquote)
            }
            Format::Bold | Format::Italic | Format::Underline => {
                let Some(mark) = format.mark() else {
                    return false;
                };
                if self.selection.is_empty() {
                    return self.current_marks().contains(&mark);
                }
                self.block().is_some_and(|block| {
                    range_has_mark(&block.content, self.selection.from(), self.selection.to(), mark)
                })
            }
        }
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl EditorSurface for DocumentEditor {
    fn document(&self) -> &Document {
        &self.document
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_content(&mut self, document: Document) {
        self.document = document;
        self.selection = Selection::default();
        self.stored_marks = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.emit();
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.stored_marks = None;
        self.clamp_selection();
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let marks = self.current_marks();
        self.transact(|editor| {
            for (index, line) in text.split('\n').enumerate() {
                if index > 0 && !editor.split_at_cursor() {
                    return false;
                }
                if !editor.replace_selection(line, &marks) {
                    return false;
                }
            }
            true
        })
    }

    fn split_block(&mut self) -> bool {
        self.transact(Self::split_at_cursor)
    }

    fn delete_backward(&mut self) -> bool {
        self.transact(Self::delete_backward_inner)
    }

    fn take_changes(&mut self) -> Vec<Document> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentEditor;
    use crate::editor::capability::{EditorCapability, EditorSurface, Selection};
    use crate::editor::command::{Command, Format};
    use crate::model::document::{Document, MarkKind, Node, NodeKind};

    fn editor_with(blocks: Vec<Node>) -> DocumentEditor {
        DocumentEditor::with_document(Document::from_blocks(blocks).unwrap())
    }

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    #[test]
    fn typing_with_stored_bold_produces_bold_text() {
        let mut editor = DocumentEditor::default();
        assert!(editor.run(Command::Toggle(Format::Bold)));
        assert!(editor.is_active(Format::Bold));
        assert!(editor.insert_text("Amen"));

        let block = &editor.document().blocks()[0];
        assert_eq!(block.content, vec![Node::marked_text("Amen", &[MarkKind::Bold])]);
        assert!(editor.is_active(Format::Bold));
    }

    #[test]
    fn mark_toggle_pair_over_range_restores_document() {
        let mut editor = editor_with(vec![para("Saliga de som sörjer")]);
        editor.set_selection(Selection::range(0, 7, 13));
        let before = editor.document().clone();

        assert!(editor.run(Command::Toggle(Format::Italic)));
        assert!(editor.is_active(Format::Italic));
        assert_ne!(editor.document(), &before);
        assert!(editor.run(Command::Toggle(Format::Italic)));
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn structural_toggle_pairs_restore_document() {
        let formats = [
            Format::Heading(1),
            Format::Heading(2),
            Format::BulletList,
            Format::OrderedList,
            Format::Blockquote,
        ];
        for format in formats {
            let mut editor = editor_with(vec![para("ett"), para("två"), para("tre")]);
            editor.set_selection(Selection::cursor(1, 1));
            let before = editor.document().clone();

            assert!(editor.run(format.into()), "{format} should apply");
            assert!(editor.is_active(format), "{format} should be active");
            assert!(editor.run(format.into()), "{format} should revert");
            assert_eq!(editor.document(), &before, "{format} pair must be neutral");
            assert!(!editor.is_active(format));
        }
    }

    #[test]
    fn structural_toggle_pairs_restore_nested_documents() {
        let nested = [
            Node::bullet_list(vec![Node::list_item(vec![Node::blockquote(vec![para("a")])])]),
            Node::blockquote(vec![Node::bullet_list(vec![Node::list_item(vec![para("a")])])]),
            Node::ordered_list(vec![Node::list_item(vec![Node::blockquote(vec![para("a")])])]),
        ];
        let formats = [Format::BulletList, Format::OrderedList, Format::Blockquote];
        for start in nested {
            for format in formats {
                let mut editor = editor_with(vec![start.clone()]);
                let before = editor.document().clone();
                let was_active = editor.is_active(format);

                assert!(editor.run(format.into()), "{format} should apply");
                assert_ne!(editor.is_active(format), was_active, "{format} should flip");
                assert!(editor.run(format.into()), "{format} should revert");
                assert_eq!(editor.document(), &before, "{format} pair must be neutral");
                assert_eq!(editor.is_active(format), was_active);
            }
        }
    }

    #[test]
    fn list_then_quote_from_toolbar_toggles_back_cleanly() {
        let mut editor = editor_with(vec![para("a")]);
        editor.run(Format::BulletList.into());
        editor.run(Format::Blockquote.into());
        let quoted_item = editor.document().clone();
        assert_eq!(
            quoted_item.blocks(),
            &[Node::bullet_list(vec![Node::list_item(vec![Node::blockquote(vec![para("a")])])])]
        );
        assert!(editor.is_active(Format::Blockquote));
        assert!(!editor.is_active(Format::BulletList));

        editor.run(Format::BulletList.into());
        editor.run(Format::BulletList.into());
        assert_eq!(editor.document(), &quoted_item);
    }

    #[test]
    fn toggling_middle_list_item_out_and_back_rejoins_list() {
        let item = |text: &str| Node::list_item(vec![para(text)]);
        let mut editor = editor_with(vec![Node::bullet_list(vec![
            item("a"),
            item("b"),
            item("c"),
        ])]);
        editor.set_selection(Selection::cursor(1, 0));
        let before = editor.document().clone();

        editor.run(Format::BulletList.into());
        assert_eq!(editor.document().blocks().len(), 3);
        assert!(!editor.is_active(Format::BulletList));
        editor.run(Format::BulletList.into());
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn switching_list_kind_keeps_items() {
        let mut editor = editor_with(vec![para("punkt")]);
        editor.run(Format::BulletList.into());
        editor.run(Format::OrderedList.into());
        assert!(editor.is_active(Format::OrderedList));
        assert!(!editor.is_active(Format::BulletList));
        assert_eq!(editor.document().blocks()[0].kind, NodeKind::OrderedList);
    }

    #[test]
    fn undo_and_redo_walk_history() {
        let mut editor = DocumentEditor::default();
        assert!(!editor.can_undo());
        editor.insert_text("Fader vår");
        editor.run(Format::Heading(1).into());
        assert!(editor.can_undo());

        assert!(editor.run(Command::Undo));
        assert!(!editor.is_active(Format::Heading(1)));
        assert!(editor.can_redo());
        assert!(editor.run(Command::Redo));
        assert!(editor.is_active(Format::Heading(1)));
        assert!(!editor.can_redo());

        editor.run(Command::Undo);
        editor.run(Command::Undo);
        assert!(editor.document().is_blank());
        assert!(!editor.run(Command::Undo));
    }

    #[test]
    fn history_depth_is_bounded() {
        let mut editor = DocumentEditor::new(2);
        for text in ["a", "b", "c", "d"] {
            editor.insert_text(text);
        }
        assert_eq!(editor.undo_depth(), 2);
    }

    #[test]
    fn horizontal_rule_adds_trailing_paragraph_and_moves_cursor() {
        let mut editor = editor_with(vec![para("ovan")]);
        assert!(editor.run(Command::HorizontalRule));
        let kinds: Vec<_> = editor.document().blocks().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::HorizontalRule, NodeKind::Paragraph]
        );
        assert_eq!(editor.selection(), Selection::cursor(1, 0));
    }

    #[test]
    fn split_and_backspace_join_blocks_again() {
        let mut editor = editor_with(vec![para("Herren är min herde")]);
        editor.set_selection(Selection::cursor(0, 9));
        assert!(editor.split_block());
        assert_eq!(editor.document().blocks().len(), 2);
        assert_eq!(editor.selection(), Selection::cursor(1, 0));

        assert!(editor.delete_backward());
        assert_eq!(
            editor.document().blocks(),
            &[para("Herren är min herde")]
        );
        assert_eq!(editor.selection(), Selection::cursor(0, 9));
    }

    #[test]
    fn enter_on_empty_list_item_leaves_list() {
        let mut editor = editor_with(vec![para("punkt")]);
        editor.set_selection(Selection::cursor(0, 5));
        editor.run(Format::BulletList.into());
        editor.split_block();
        assert_eq!(editor.document().blocks()[0].content.len(), 2);

        editor.split_block();
        let blocks = editor.document().blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, NodeKind::BulletList);
        assert_eq!(blocks[1], Node::paragraph(Vec::new()));
    }

    #[test]
    fn set_content_resets_history_and_emits_change() {
        let mut editor = DocumentEditor::default();
        editor.insert_text("x");
        editor.take_changes();

        let doc = Document::from_blocks(vec![para("ny")]).unwrap();
        editor.set_content(doc.clone());
        assert!(!editor.can_undo());
        assert_eq!(editor.take_changes(), vec![doc]);
        assert!(editor.take_changes().is_empty());
    }

    #[test]
    fn multi_line_insert_is_one_undo_step() {
        let mut editor = DocumentEditor::default();
        editor.insert_text("rad ett\nrad två");
        assert_eq!(editor.document().blocks().len(), 2);
        assert_eq!(editor.undo_depth(), 1);
        assert_eq!(editor.take_changes().len(), 1);
    }
}
