//! Formatting toolbar as a pure view over `EditorCapability`.

use crate::editor::capability::EditorCapability;
use crate::editor::command::{Command, Format};
use log::debug;

/// Fixed button layout, left to right.
const LAYOUT: [(&str, Command); 11] = [
    ("↶", Command::Undo),
    ("↷", Command::Redo),
    ("B", Command::Toggle(Format::Bold)),
    ("i", Command::Toggle(Format::Italic)),
    ("U", Command::Toggle(Format::Underline)),
    ("H1", Command::Toggle(Format::Heading(1))),
    ("H2", Command::Toggle(Format::Heading(2))),
    ("• Lista", Command::Toggle(Format::BulletList)),
    ("1. Lista", Command::Toggle(Format::OrderedList)),
    ("“ Citat", Command::Toggle(Format::Blockquote)),
    ("―", Command::HorizontalRule),
];

/// One rendered toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub label: &'static str,
    pub command: Command,
    pub enabled: bool,
    /// Toggle buttons only: the format is active at the selection.
    pub pressed: bool,
}

/// Renders every button against the current capability state.
pub fn render(editor: &impl EditorCapability) -> Vec<ToolbarButton> {
    LAYOUT
        .iter()
        .map(|&(label, command)| ToolbarButton {
            label,
            command,
            enabled: editor.can_run(command),
            pressed: match command {
                Command::Toggle(format) => editor.is_active(format),
                _ => false,
            },
        })
        .collect()
}

/// Runs `command` as if its button was clicked; disabled buttons do nothing.
pub fn activate(editor: &mut impl EditorCapability, command: Command) -> bool {
    if !editor.can_run(command) {
        debug!("event=toolbar_activate module=toolbar status=skipped reason=disabled command={command}");
        return false;
    }
    editor.run(command)
}
