use studynote_core::{
    AppConfig, AppView, Command, Document, EditorCapability, EditorSurface, Format,
    MemoryKeyValueRepository, Node, NotesApp, Selection,
};

fn config(load_grace_ms: u64) -> AppConfig {
    AppConfig {
        load_grace_ms,
        ..AppConfig::default()
    }
}

fn app_with_two_notes() -> NotesApp<MemoryKeyValueRepository> {
    let mut app = NotesApp::open(MemoryKeyValueRepository::new(), config(60_000));
    app.create_note().unwrap();
    app.insert_text("äldre").unwrap();
    app.create_note().unwrap();
    app.insert_text("nyare").unwrap();
    app
}

#[test]
fn startup_on_empty_storage_shows_placeholder() {
    let app = NotesApp::open(MemoryKeyValueRepository::new(), AppConfig::default());
    match app.view() {
        AppView::Placeholder(message) => {
            assert_eq!(message, "Välj en anteckning eller skapa en ny för att börja skriva.")
        }
        other => panic!("expected placeholder, got {other:?}"),
    }
}

#[test]
fn startup_shows_first_persisted_note() {
    let app = app_with_two_notes();
    let repo = app.store().repo().clone();
    let newest = app.store().notes()[0].id;

    let reopened = NotesApp::open(repo, AppConfig::default());
    match reopened.view() {
        AppView::Editor {
            note_id, document, ..
        } => {
            assert_eq!(note_id, newest);
            assert_eq!(document.plain_text(), "nyare\n");
        }
        other => panic!("expected editor, got {other:?}"),
    }
}

#[test]
fn edits_during_loading_do_not_reach_the_store() {
    let mut app = app_with_two_notes();
    let older = app.store().notes()[1].id;
    let before = app.store().notes().to_vec();

    let ticket = app.begin_select(older).expect("known id should start loading");
    assert!(app.is_loading());
    app.insert_text("spöke ").unwrap();
    assert_eq!(app.store().notes(), before.as_slice());

    assert!(app.finish_select(ticket));
    assert_eq!(app.store().notes(), before.as_slice());

    app.insert_text("!").unwrap();
    let updated = app.store().get(older).unwrap().content.plain_text();
    assert!(updated.contains('!'));
    assert!(updated.contains("äldre"));
}

#[test]
fn stale_ticket_keeps_suppressing_changes() {
    let mut app = app_with_two_notes();
    let newer = app.store().notes()[0].id;
    let older = app.store().notes()[1].id;

    let stale = app.begin_select(older).unwrap();
    let current = app.begin_select(newer).unwrap();
    assert!(!app.finish_select(stale));
    assert!(app.is_loading());

    let before = app.store().get(newer).unwrap().content.clone();
    app.insert_text("x").unwrap();
    assert_eq!(app.store().get(newer).unwrap().content, before);

    assert!(app.finish_select(current));
    assert!(!app.is_loading());
}

#[test]
fn unconfirmed_load_expires_after_grace_period() {
    let mut app = NotesApp::open(MemoryKeyValueRepository::new(), config(0));
    let id = app.create_note().unwrap();
    let other = app.create_note().unwrap();

    app.begin_select(id).unwrap();
    assert!(!app.is_loading());

    assert!(app.insert_text("efter").unwrap());
    assert_eq!(app.store().get(id).unwrap().content.plain_text(), "efter\n");
    assert!(app.store().get(other).unwrap().content.is_blank());
}

#[test]
fn selecting_unknown_id_keeps_current_note() {
    let mut app = app_with_two_notes();
    let active = app.store().active_id();

    assert!(!app.select_note(uuid::Uuid::new_v4()));
    assert_eq!(app.store().active_id(), active);
}

#[test]
fn switching_notes_edits_only_the_selected_one() {
    let mut app = app_with_two_notes();
    let newer = app.store().notes()[0].id;
    let older = app.store().notes()[1].id;

    assert!(app.select_note(older));
    app.set_selection(Selection::cursor(0, 5));
    app.insert_text(" text").unwrap();

    assert_eq!(app.store().get(older).unwrap().content.plain_text(), "äldre text\n");
    assert_eq!(app.store().get(newer).unwrap().content.plain_text(), "nyare\n");
    let sidebar = app.sidebar();
    assert!(sidebar[1].active && !sidebar[0].active);
}

#[test]
fn every_toggle_twice_restores_the_document() {
    let toggles = [
        Format::Bold,
        Format::Italic,
        Format::Underline,
        Format::Heading(1),
        Format::Heading(2),
        Format::BulletList,
        Format::OrderedList,
        Format::Blockquote,
    ];
    for format in toggles {
        let mut app = NotesApp::open(MemoryKeyValueRepository::new(), config(60_000));
        let id = app.create_note().unwrap();
        app.insert_text("Psalm 23").unwrap();
        app.set_selection(Selection::range(0, 0, 5));
        let original = app.store().get(id).unwrap().content.clone();

        assert!(app.run(Command::Toggle(format)).unwrap(), "{format} should apply");
        assert_ne!(app.store().get(id).unwrap().content, original);
        assert!(app.run(Command::Toggle(format)).unwrap(), "{format} should revert");
        assert_eq!(
            app.store().get(id).unwrap().content,
            original,
            "{format} twice should restore"
        );
    }
}

#[test]
fn undo_redo_are_persisted_like_other_edits() {
    let mut app = NotesApp::open(MemoryKeyValueRepository::new(), config(60_000));
    let id = app.create_note().unwrap();
    app.insert_text("a").unwrap();
    app.run(Command::HorizontalRule).unwrap();
    let with_rule = app.store().get(id).unwrap().content.clone();

    assert!(app.run(Command::Undo).unwrap());
    assert_eq!(app.store().get(id).unwrap().content.blocks().len(), 1);
    assert!(app.run(Command::Redo).unwrap());
    assert_eq!(app.store().get(id).unwrap().content, with_rule);
}

/// Minimal surface without formatting support, standing in for another editor.
#[derive(Default)]
struct PlainSurface {
    document: Document,
    text: String,
    pending: Vec<Document>,
}

impl PlainSurface {
    fn publish(&mut self) {
        self.document =
            Document::from_blocks(vec![Node::paragraph(vec![Node::text(self.text.clone())])])
                .unwrap_or_default();
        self.pending.push(self.document.clone());
    }
}

impl EditorCapability for PlainSurface {
    fn run(&mut self, _command: Command) -> bool {
        false
    }

    fn is_active(&self, _format: Format) -> bool {
        false
    }

    fn can_undo(&self) -> bool {
        false
    }

    fn can_redo(&self) -> bool {
        false
    }
}

impl EditorSurface for PlainSurface {
    fn document(&self) -> &Document {
        &self.document
    }

    fn selection(&self) -> Selection {
        Selection::cursor(0, self.text.chars().count())
    }

    fn set_content(&mut self, document: Document) {
        self.text = document.plain_text().trim_end().to_string();
        self.document = document;
        self.pending.push(self.document.clone());
    }

    fn set_selection(&mut self, _selection: Selection) {}

    fn insert_text(&mut self, text: &str) -> bool {
        self.text.push_str(text);
        self.publish();
        true
    }

    fn split_block(&mut self) -> bool {
        false
    }

    fn delete_backward(&mut self) -> bool {
        self.text.pop().is_some() && {
            self.publish();
            true
        }
    }

    fn take_changes(&mut self) -> Vec<Document> {
        std::mem::take(&mut self.pending)
    }
}

#[test]
fn alternative_surface_plugs_into_store_and_toolbar() {
    let mut app = NotesApp::with_surface(
        MemoryKeyValueRepository::new(),
        PlainSurface::default(),
        config(60_000),
    );
    let id = app.create_note().unwrap();
    app.insert_text("hej").unwrap();
    assert!(app.delete_backward().unwrap());

    assert_eq!(app.store().get(id).unwrap().content.plain_text(), "he\n");
    let toolbar = app.toolbar();
    assert!(toolbar.iter().all(|button| !button.pressed));
    assert!(!toolbar[0].enabled && !toolbar[1].enabled);
    assert!(!app.run(Command::Toggle(Format::Bold)).unwrap());
}
