//! Line-oriented shell driving a `NotesApp`.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use studynote_core::{AppView, Command, EditorSurface, KeyValueRepository, NotesApp, Selection};

use crate::render;

const HELP: &str = "\
commands:
  new                      create a note and open it
  list                     list notes (newest first, * marks the active one)
  open <n>                 open note number n from `list`
  type <text>              insert text at the cursor
  enter | back             split block / delete backward
  select <block> <a> [h]   move the selection inside a textblock
  run <command>            bold, italic, underline, heading1.., bulletList,
                           orderedList, blockquote, hr, undo, redo
  toolbar | show | json    render the toolbar / document / document JSON
  help | quit";

/// Outcome of one shell line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` until EOF or `quit`. Command errors are
/// printed and the loop keeps going.
pub fn run_shell<R: KeyValueRepository>(
    app: &mut NotesApp<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    writeln!(output, "studynote {} (type `help`)", studynote_core::core_version())?;
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match execute(app, line.trim(), &mut output) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => writeln!(output, "error: {err:#}")?,
        }
    }
    Ok(())
}

fn execute<R: KeyValueRepository>(
    app: &mut NotesApp<R>,
    line: &str,
    out: &mut impl Write,
) -> Result<Flow> {
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "" => {}
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => writeln!(out, "{HELP}")?,
        "new" => {
            app.create_note()?;
            show(app, out)?;
        }
        "list" => {
            for (index, item) in app.sidebar().iter().enumerate() {
                let marker = if item.active { '*' } else { ' ' };
                let preview = item.preview.as_deref().unwrap_or("");
                writeln!(out, "{marker}{:>3}  {}  {preview}", index + 1, item.title)?;
            }
        }
        "open" => {
            let position: usize = rest.trim().parse().context("usage: open <n>")?;
            let Some(item) = position.checked_sub(1).and_then(|i| app.sidebar().get(i).cloned())
            else {
                bail!("no note number {position}");
            };
            app.select_note(item.id);
            show(app, out)?;
        }
        "type" => report(app.insert_text(rest)?, out)?,
        "enter" => report(app.split_block()?, out)?,
        "back" => report(app.delete_backward()?, out)?,
        "select" => {
            let numbers = rest
                .split_whitespace()
                .map(str::parse::<usize>)
                .collect::<Result<Vec<_>, _>>()
                .context("usage: select <block> <anchor> [head]")?;
            let selection = match numbers.as_slice() {
                [block, anchor] => Selection::cursor(*block, *anchor),
                [block, anchor, head] => Selection::range(*block, *anchor, *head),
                _ => bail!("usage: select <block> <anchor> [head]"),
            };
            if !app.set_selection(selection) {
                bail!("no active note");
            }
        }
        "run" => {
            let command: Command = rest.parse()?;
            report(app.run(command)?, out)?;
        }
        "toolbar" => writeln!(out, "{}", render::toolbar(&app.toolbar()))?,
        "show" => show(app, out)?,
        "json" => {
            let json = serde_json::to_string_pretty(app.editor().document())?;
            writeln!(out, "{json}")?;
        }
        other => bail!("unknown command `{other}`; try `help`"),
    }
    Ok(Flow::Continue)
}

fn report(changed: bool, out: &mut impl Write) -> Result<()> {
    if !changed {
        writeln!(out, "(no change)")?;
    }
    Ok(())
}

fn show<R: KeyValueRepository>(app: &NotesApp<R>, out: &mut impl Write) -> Result<()> {
    match app.view() {
        AppView::Placeholder(message) => writeln!(out, "{message}")?,
        AppView::Editor {
            title,
            document,
            selection,
            toolbar,
            ..
        } => {
            writeln!(out, "== {title} ==")?;
            writeln!(out, "{}", render::toolbar(&toolbar))?;
            write!(out, "{}", render::document(&document))?;
            writeln!(
                out,
                "-- block {} offset {}..{}",
                selection.block,
                selection.from(),
                selection.to()
            )?;
        }
    }
    Ok(())
}
