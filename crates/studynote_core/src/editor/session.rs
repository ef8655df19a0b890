//! Editor session: gates change notifications while content is being loaded.
//!
//! # Responsibility
//! - Push note content into the editing surface programmatically.
//! - Suppress the surface's change notifications until the load is confirmed.
//!
//! # Invariants
//! - While `Loading`, `poll_changes` never yields a document.
//! - Only the ticket of the most recent load can confirm it.
//! - An unconfirmed load stops suppressing once its grace period elapses; the
//!   first poll after that forwards the latest queued document.
//! - `state` and `is_loading` agree: an expired load reads as `Editing`.

use crate::editor::capability::EditorSurface;
use crate::model::document::Document;
use log::{debug, warn};
use std::time::{Duration, Instant};

/// Token identifying one programmatic content load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Content is being pushed into the surface; changes are dropped.
    Loading {
        ticket: LoadTicket,
        deadline: Instant,
    },
    /// Changes come from direct user input and are forwarded.
    Editing,
}

/// Wraps an editing surface with the Loading/Editing gate.
pub struct EditorSession<S: EditorSurface> {
    surface: S,
    state: SessionState,
    last_ticket: u64,
    load_grace: Duration,
}

impl<S: EditorSurface> EditorSession<S> {
    pub fn new(surface: S, load_grace: Duration) -> Self {
        Self {
            surface,
            state: SessionState::Editing,
            last_ticket: 0,
            load_grace,
        }
    }

    /// Enters `Loading` and replaces the surface content with `document`.
    pub fn begin_load(&mut self, document: Document) -> LoadTicket {
        self.last_ticket += 1;
        let ticket = LoadTicket(self.last_ticket);
        self.state = SessionState::Loading {
            ticket,
            deadline: Instant::now() + self.load_grace,
        };
        self.surface.set_content(document);
        debug!("event=editor_load module=session status=start ticket={}", ticket.0);
        ticket
    }

    /// Confirms that the load identified by `ticket` completed.
    ///
    /// Changes queued during the load are discarded. Returns `false` for a
    /// stale ticket or when no load is in progress.
    pub fn finish_load(&mut self, ticket: LoadTicket) -> bool {
        match self.state {
            SessionState::Loading { ticket: current, .. } if current == ticket => {
                let dropped = self.surface.take_changes().len();
                self.state = SessionState::Editing;
                debug!(
                    "event=editor_load module=session status=ok ticket={} dropped_changes={dropped}",
                    ticket.0
                );
                true
            }
            _ => {
                debug!(
                    "event=editor_load module=session status=rejected reason=stale_ticket ticket={}",
                    ticket.0
                );
                false
            }
        }
    }

    /// Drains surface notifications and returns the latest document to persist.
    ///
    /// Yields `None` while loading or when nothing changed. After an expired
    /// load the latest queued document is forwarded like any other edit.
    pub fn poll_changes(&mut self) -> Option<Document> {
        let mut changes = self.surface.take_changes();
        if let SessionState::Loading { ticket, deadline } = self.state {
            if Instant::now() < deadline {
                if !changes.is_empty() {
                    debug!(
                        "event=editor_change module=session status=suppressed ticket={} count={}",
                        ticket.0,
                        changes.len()
                    );
                }
                return None;
            }
            warn!(
                "event=editor_load module=session status=expired ticket={} grace_ms={}",
                ticket.0,
                self.load_grace.as_millis()
            );
            self.state = SessionState::Editing;
        }
        changes.pop()
    }

    /// Current gate state, with an expired load reported as `Editing`.
    pub fn state(&self) -> SessionState {
        match self.state {
            SessionState::Loading { deadline, .. } if Instant::now() >= deadline => {
                SessionState::Editing
            }
            state => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading { deadline, .. } if Instant::now() < deadline)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for input and commands; changes surface via
    /// `poll_changes`.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorSession, SessionState};
    use crate::editor::capability::EditorSurface;
    use crate::editor::surface::DocumentEditor;
    use crate::model::document::{Document, Node};
    use std::time::Duration;

    fn doc(text: &str) -> Document {
        Document::from_blocks(vec![Node::paragraph(vec![Node::text(text)])]).unwrap()
    }

    fn session(grace: Duration) -> EditorSession<DocumentEditor> {
        EditorSession::new(DocumentEditor::default(), grace)
    }

    #[test]
    fn changes_during_loading_are_suppressed() {
        let mut session = session(Duration::from_secs(60));
        session.begin_load(doc("laddad"));
        assert!(session.is_loading());

        session.surface_mut().insert_text("stale ");
        assert_eq!(session.poll_changes(), None);
    }

    #[test]
    fn finish_load_drops_queued_changes_and_enables_forwarding() {
        let mut session = session(Duration::from_secs(60));
        let ticket = session.begin_load(doc("laddad"));
        assert!(session.finish_load(ticket));
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.poll_changes(), None);

        session.surface_mut().insert_text("x");
        let forwarded = session.poll_changes().expect("edit should be forwarded");
        assert_eq!(forwarded.plain_text(), "xladdad\n");
    }

    #[test]
    fn stale_ticket_does_not_end_loading() {
        let mut session = session(Duration::from_secs(60));
        let first = session.begin_load(doc("a"));
        let second = session.begin_load(doc("b"));

        assert!(!session.finish_load(first));
        assert!(session.is_loading());
        assert!(session.finish_load(second));
        assert!(!session.finish_load(second));
    }

    #[test]
    fn expired_grace_period_falls_back_to_editing() {
        let mut session = session(Duration::ZERO);
        session.begin_load(doc("a"));
        assert!(!session.is_loading());
        assert_eq!(session.state(), SessionState::Editing);

        session.surface_mut().insert_text("b");
        let forwarded = session.poll_changes().expect("first edit after expiry is kept");
        assert_eq!(forwarded.plain_text(), "ba\n");
        assert_eq!(session.poll_changes(), None);
    }

    #[test]
    fn state_reports_loading_until_deadline() {
        let mut session = session(Duration::from_secs(60));
        let ticket = session.begin_load(doc("a"));
        assert!(matches!(
            session.state(),
            SessionState::Loading { ticket: current, .. } if current == ticket
        ));
        assert_eq!(session.is_loading(), session.state() != SessionState::Editing);
    }

    #[test]
    fn only_latest_change_is_forwarded() {
        let mut session = session(Duration::from_secs(60));
        let ticket = session.begin_load(Document::empty());
        session.finish_load(ticket);

        session.surface_mut().insert_text("a");
        session.surface_mut().insert_text("b");
        assert_eq!(session.poll_changes().unwrap().plain_text(), "ab\n");
        assert_eq!(session.poll_changes(), None);
    }
}
