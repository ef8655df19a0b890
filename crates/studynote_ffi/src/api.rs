//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the notes app (sidebar, editor, toolbar) to Dart via FRB.
//! - Keep one process-wide `NotesApp` behind a mutex so host calls serialize.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back inside response envelopes, never as panics.
//! - Note ids cross the boundary as hyphenated UUID strings.

use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use studynote_core::db::open_db;
use studynote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, AppView, Command, NoteId, NotesApp, Selection, SqliteKeyValueRepository,
    ToolbarButton,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "studynote.sqlite3";
const DB_PATH_ENV: &str = "STUDYNOTE_DB_PATH";

type HostApp = NotesApp<SqliteKeyValueRepository>;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP: Mutex<Option<HostApp>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub note_id: String,
    pub title: String,
    /// Single-line plain-text summary; `None` for blank notes.
    pub preview: Option<String>,
    pub active: bool,
}

/// Sidebar envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    pub items: Vec<NoteListItem>,
    pub active_note_id: Option<String>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Whether the call changed the active note's document.
    pub changed: bool,
    /// Note the action applied to, when any.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<NoteId>, changed: bool) -> Self {
        Self {
            ok: true,
            changed,
            note_id: note_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Toolbar button as rendered by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButtonItem {
    pub label: String,
    /// Command name accepted by `editor_run`.
    pub command: String,
    pub enabled: bool,
    pub pressed: bool,
}

/// Main pane envelope: either an editor or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorViewResponse {
    pub ok: bool,
    pub note_id: Option<String>,
    pub title: Option<String>,
    /// Set when no note is selected.
    pub placeholder: Option<String>,
    /// Document as TipTap-compatible JSON; empty for the placeholder.
    pub document_json: String,
    pub selection_block: u32,
    pub selection_anchor: u32,
    pub selection_head: u32,
    pub toolbar: Vec<ToolbarButtonItem>,
    pub message: String,
}

impl EditorViewResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            title: None,
            placeholder: None,
            document_json: String::new(),
            selection_block: 0,
            selection_anchor: 0,
            selection_head: 0,
            toolbar: Vec::new(),
            message: message.into(),
        }
    }
}

/// (Re)opens the notes app on the host database.
///
/// `config_json` optionally overrides `AppConfig` fields, e.g.
/// `{"title_prefix":"Anteckning"}`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Replaces any previously opened app instance.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_open(config_json: Option<String>) -> ActionResponse {
    let config = match config_json.as_deref().map(str::trim) {
        None | Some("") => AppConfig::default(),
        Some(raw) => match AppConfig::from_json(raw) {
            Ok(config) => config,
            Err(err) => return ActionResponse::failure(format!("invalid config: {err}")),
        },
    };
    let app = match open_app(config) {
        Ok(app) => app,
        Err(err) => {
            warn!("event=ffi_notes_open module=ffi status=error");
            return ActionResponse::failure(err);
        }
    };
    let active = app.store().active_id();
    let count = app.store().len();
    *lock_app() = Some(app);
    info!("event=ffi_notes_open module=ffi status=ok count={count}");
    ActionResponse::success(format!("Opened {count} note(s)."), active, false)
}

/// Lists notes newest-first for the sidebar.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    let result = with_app(|app| {
        let items = app
            .sidebar()
            .into_iter()
            .map(|item| NoteListItem {
                note_id: item.id.to_string(),
                title: item.title,
                preview: item.preview,
                active: item.active,
            })
            .collect::<Vec<_>>();
        Ok((items, app.store().active_id()))
    });
    match result {
        Ok((items, active)) => NotesListResponse {
            ok: true,
            message: format!("{} note(s).", items.len()),
            items,
            active_note_id: active.map(|id| id.to_string()),
        },
        Err(err) => NotesListResponse {
            ok: false,
            items: Vec::new(),
            active_note_id: None,
            message: err,
        },
    }
}

/// Creates a note, makes it active and loads it into the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create() -> ActionResponse {
    action(|app| {
        let id = app.create_note().map_err(|err| err.to_string())?;
        Ok(ActionResponse::success("Note created.", Some(id), false))
    })
}

/// Selects a note by id and loads it into the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn note_select(note_id: String) -> ActionResponse {
    let id = match Uuid::parse_str(note_id.trim()) {
        Ok(id) => id,
        Err(_) => return ActionResponse::failure(format!("invalid note_id `{note_id}`")),
    };
    action(|app| {
        if app.select_note(id) {
            Ok(ActionResponse::success("Note selected.", Some(id), false))
        } else {
            Ok(ActionResponse::failure(format!("note not found: {id}")))
        }
    })
}

/// Current main pane: active note editor or placeholder.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_view() -> EditorViewResponse {
    let result = with_app(|app| match app.view() {
        AppView::Placeholder(message) => Ok(EditorViewResponse {
            ok: true,
            placeholder: Some(message),
            message: "No note selected.".to_string(),
            ..EditorViewResponse::failure(String::new())
        }),
        AppView::Editor {
            note_id,
            title,
            document,
            selection,
            toolbar,
        } => {
            let document_json = serde_json::to_string(&document)
                .map_err(|err| format!("document encode failed: {err}"))?;
            Ok(EditorViewResponse {
                ok: true,
                note_id: Some(note_id.to_string()),
                title: Some(title),
                placeholder: None,
                document_json,
                selection_block: to_u32(selection.block),
                selection_anchor: to_u32(selection.anchor),
                selection_head: to_u32(selection.head),
                toolbar: toolbar.into_iter().map(to_toolbar_item).collect(),
                message: String::new(),
            })
        }
    });
    result.unwrap_or_else(EditorViewResponse::failure)
}

/// Runs a toolbar command by name (`bold`, `heading2`, `bulletList`, `undo`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn editor_run(command: String) -> ActionResponse {
    let command: Command = match command.parse() {
        Ok(command) => command,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };
    edit(|app| app.run(command))
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_insert_text(text: String) -> ActionResponse {
    edit(|app| app.insert_text(&text))
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_split_block() -> ActionResponse {
    edit(HostApp::split_block)
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete_backward() -> ActionResponse {
    edit(HostApp::delete_backward)
}

/// Moves the selection to `anchor..head` inside textblock `block`.
///
/// Out-of-range values are clamped by the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_selection(block: u32, anchor: u32, head: u32) -> ActionResponse {
    let selection = Selection::range(block as usize, anchor as usize, head as usize);
    action(|app| {
        if app.set_selection(selection) {
            Ok(ActionResponse::success(
                "Selection updated.",
                app.store().active_id(),
                false,
            ))
        } else {
            Ok(ActionResponse::failure("no active note"))
        }
    })
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Some(path) = std::env::var_os(DB_PATH_ENV) {
                if !path.is_empty() {
                    return PathBuf::from(path);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_app(config: AppConfig) -> Result<HostApp, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("notes DB open failed: {err}"))?;
    let repo = SqliteKeyValueRepository::try_new(conn)
        .map_err(|err| format!("notes repo init failed: {err}"))?;
    Ok(NotesApp::open(repo, config))
}

fn lock_app() -> MutexGuard<'static, Option<HostApp>> {
    APP.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` on the shared app, opening it with defaults on first use.
fn with_app<T>(f: impl FnOnce(&mut HostApp) -> Result<T, String>) -> Result<T, String> {
    let mut guard = lock_app();
    if guard.is_none() {
        info!("event=ffi_notes_open module=ffi status=start reason=lazy");
        *guard = Some(open_app(AppConfig::default())?);
    }
    match guard.as_mut() {
        Some(app) => f(app),
        None => Err("notes app unavailable".to_string()),
    }
}

fn action(f: impl FnOnce(&mut HostApp) -> Result<ActionResponse, String>) -> ActionResponse {
    with_app(f).unwrap_or_else(ActionResponse::failure)
}

fn edit(f: impl FnOnce(&mut HostApp) -> studynote_core::StoreResult<bool>) -> ActionResponse {
    action(|app| {
        let Some(active) = app.store().active_id() else {
            return Ok(ActionResponse::failure("no active note"));
        };
        let changed = f(app).map_err(|err| err.to_string())?;
        let message = if changed { "Updated." } else { "No change." };
        Ok(ActionResponse::success(message, Some(active), changed))
    })
}

fn to_toolbar_item(button: ToolbarButton) -> ToolbarButtonItem {
    ToolbarButtonItem {
        label: button.label.to_string(),
        command: button.command.name(),
        enabled: button.enabled,
        pressed: button.pressed,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
