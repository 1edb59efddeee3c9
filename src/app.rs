//! Application state and event handling.
//!
//! `App` owns the session state machine, the query input, and the channel
//! that delivers generation results back from the spawned request task.
//! All mutation happens on the single event-loop task; the only suspension
//! point is the generation client's network call, which runs in its own
//! task and reports back as an [`AppMessage`].

use crate::config::GeminiConfig;
use crate::export;
use crate::gemini::{GeminiClient, GenerationError};
use crate::models::{ConceptQuery, VisualizationArtifact};
use crate::preview;
use crate::session::{SessionState, ViewMode};
use crate::widgets::InputBox;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Landing-screen suggestion chips.
pub const SUGGESTIONS: [&str; 6] = [
    "Fourier Series",
    "Quaternion Rotation",
    "Pathfinding A* Algorithm",
    "Lorenz Attractor",
    "Double Pendulum Chaos",
    "Eigenvectors and Eigenvalues",
];

/// Messages delivered to the event loop from background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// A generation request finished, successfully or not.
    GenerationFinished {
        query: ConceptQuery,
        result: Result<VisualizationArtifact, GenerationError>,
    },
}

/// Top-level application state.
pub struct App {
    /// The generation life-cycle state machine.
    pub session: SessionState,
    /// Query input on the landing screen.
    pub input: InputBox,
    /// Highlighted suggestion chip, if any.
    pub selected_suggestion: Option<usize>,
    /// Transient status line ("Copied source", "Exported to ...").
    pub status: Option<String>,
    /// Scroll offset for the source view.
    pub source_scroll: u16,
    /// Animation frame counter for the loading spinner.
    pub spinner_frame: usize,
    /// Whether the next loop iteration should redraw.
    pub needs_redraw: bool,
    client: Arc<GeminiClient>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(config: GeminiConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            session: SessionState::new(),
            input: InputBox::new(),
            selected_suggestion: None,
            status: None,
            source_scroll: 0,
            spinner_frame: 0,
            needs_redraw: true,
            client: Arc::new(GeminiClient::new(config)),
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Take the message receiver for use in the event loop's `select!`.
    pub fn take_message_rx(&mut self) -> mpsc::UnboundedReceiver<AppMessage> {
        self.message_rx.take().expect("message receiver already taken")
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations. Called on the event-loop tick.
    pub fn tick(&mut self) {
        if self.session.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            self.mark_dirty();
        }
    }

    /// Handle a key press. Returns `true` when the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.mark_dirty();

        match &self.session {
            SessionState::Idle | SessionState::Failed { .. } => self.handle_landing_key(key),
            SessionState::Loading { .. } => false, // submit surface is disabled while loading
            SessionState::Ready { .. } => self.handle_viewer_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                if let Some(query) = self.pending_query() {
                    self.submit(query);
                } else if let SessionState::Failed { query, .. } = &self.session {
                    // "Try Again": re-issue the same query.
                    let retry = query.clone();
                    self.submit(retry);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.cycle_suggestion(1),
            KeyCode::BackTab | KeyCode::Up => self.cycle_suggestion(-1),
            KeyCode::Esc => {
                if matches!(self.session, SessionState::Failed { .. }) {
                    self.session.reset();
                    self.status = None;
                } else if !self.input.is_empty() || self.selected_suggestion.is_some() {
                    self.input.clear();
                    self.selected_suggestion = None;
                } else {
                    return true;
                }
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => {
                self.selected_suggestion = None;
                self.input.insert_char(c);
            }
            _ => {}
        }
        false
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('v') => {
                self.session.toggle_view();
                self.source_scroll = 0;
            }
            KeyCode::Char('e') => self.session.toggle_explanation(),
            KeyCode::Char('o') => self.open_preview(),
            KeyCode::Char('c') => self.copy_source(),
            KeyCode::Char('x') => self.export_artifact(),
            KeyCode::Char('n') | KeyCode::Char('/') | KeyCode::Esc => {
                self.session.reset();
                self.status = None;
                self.input.clear();
                self.selected_suggestion = None;
            }
            KeyCode::Up => self.scroll_source(-1),
            KeyCode::Down => self.scroll_source(1),
            KeyCode::PageUp => self.scroll_source(-20),
            KeyCode::PageDown => self.scroll_source(20),
            KeyCode::Home => self.source_scroll = 0,
            _ => {}
        }
        false
    }

    /// The query that would be submitted from the landing screen, if any.
    fn pending_query(&self) -> Option<ConceptQuery> {
        if let Some(index) = self.selected_suggestion {
            if self.input.is_empty() {
                return ConceptQuery::parse(SUGGESTIONS[index]);
            }
        }
        ConceptQuery::parse(self.input.content())
    }

    fn cycle_suggestion(&mut self, step: isize) {
        if !self.input.is_empty() {
            return;
        }
        let count = SUGGESTIONS.len() as isize;
        let next = match self.selected_suggestion {
            None => {
                if step > 0 {
                    0
                } else {
                    count - 1
                }
            }
            Some(current) => (current as isize + step).rem_euclid(count),
        };
        self.selected_suggestion = Some(next as usize);
    }

    /// Submit a query, spawning the single generation task.
    ///
    /// A no-op when a request is already in flight; the state machine is
    /// the authority on that.
    pub fn submit(&mut self, query: ConceptQuery) {
        if !self.session.submit(query.clone()) {
            return;
        }
        tracing::info!(query = %query, "submitting generation request");
        self.input.clear();
        self.selected_suggestion = None;
        self.status = None;
        self.source_scroll = 0;

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.generate(&query).await;
            // The receiver only drops on shutdown; nothing to do then.
            let _ = tx.send(AppMessage::GenerationFinished { query, result });
        });
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::GenerationFinished { query, result } => {
                // Drop results that no longer match the active query.
                if !self.session.is_loading_for(&query) {
                    tracing::debug!(query = %query, "dropping stale generation result");
                    return;
                }
                match result {
                    Ok(artifact) => {
                        tracing::info!(title = %artifact.title, "generation succeeded");
                        self.session.succeed(artifact);
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "generation failed");
                        self.session.fail(error.to_string());
                    }
                }
                self.mark_dirty();
            }
        }
    }

    fn open_preview(&mut self) {
        let Some(artifact) = self.session.artifact() else {
            return;
        };
        self.status = Some(match preview::open_preview(artifact) {
            Ok(path) => format!("Preview opened: {}", path.display()),
            Err(e) => format!("Could not open preview: {}", e),
        });
    }

    fn copy_source(&mut self) {
        let Some(artifact) = self.session.artifact() else {
            return;
        };
        self.status = Some(match export::copy_source(artifact) {
            Ok(()) => "Source copied to clipboard".to_string(),
            Err(e) => format!("Clipboard unavailable: {}", e),
        });
    }

    fn export_artifact(&mut self) {
        let Some(artifact) = self.session.artifact() else {
            return;
        };
        let dir = export::default_export_dir();
        self.status = Some(match export::write_artifact(artifact, &dir) {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {}", e),
        });
    }

    fn scroll_source(&mut self, delta: i32) {
        if let SessionState::Ready { view, .. } = &self.session {
            if *view == ViewMode::Source {
                self.source_scroll = self.source_scroll.saturating_add_signed(delta as i16);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn app() -> App {
        App::new(GeminiConfig::default().with_api_key("test-key"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn query(text: &str) -> ConceptQuery {
        ConceptQuery::parse(text).unwrap()
    }

    fn artifact() -> VisualizationArtifact {
        VisualizationArtifact::new(
            "T".to_string(),
            "E".to_string(),
            "<html></html>".to_string(),
        )
    }

    #[tokio::test]
    async fn test_submit_enters_loading() {
        let mut app = app();
        app.submit(query("Lorenz Attractor"));
        assert!(app.session.is_loading());
        assert_eq!(app.session.query().unwrap().as_str(), "Lorenz Attractor");
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let mut app = app();
        app.submit(query("A"));
        app.submit(query("B"));
        assert_eq!(app.session.query().unwrap().as_str(), "A");
    }

    #[tokio::test]
    async fn test_enter_submits_typed_query() {
        let mut app = app();
        for c in "gradient descent".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.is_loading());
        assert_eq!(app.session.query().unwrap().as_str(), "gradient descent");
        assert!(app.input.is_empty());
    }

    #[tokio::test]
    async fn test_enter_with_empty_input_does_nothing_when_idle() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session, SessionState::Idle);
    }

    #[tokio::test]
    async fn test_keys_ignored_while_loading() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.is_loading_for(&query("A")));
    }

    #[tokio::test]
    async fn test_suggestion_cycling_and_submit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.selected_suggestion, Some(0));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.selected_suggestion, Some(1));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.selected_suggestion, Some(0));

        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.is_loading_for(&query(SUGGESTIONS[0])));
    }

    #[tokio::test]
    async fn test_typing_clears_suggestion_selection() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.selected_suggestion, None);
    }

    #[tokio::test]
    async fn test_matching_result_is_applied() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Ok(artifact()),
        });
        assert!(app.session.artifact().is_some());
    }

    #[tokio::test]
    async fn test_stale_result_is_dropped() {
        let mut app = app();
        app.submit(query("B"));
        // A result for an earlier query must never overwrite B's slot.
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Ok(artifact()),
        });
        assert!(app.session.is_loading_for(&query("B")));
        assert!(app.session.artifact().is_none());
    }

    #[tokio::test]
    async fn test_failure_message_recorded() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Err(GenerationError::EmptyResponse),
        });
        match &app.session {
            SessionState::Failed { message, .. } => {
                assert!(message.contains("empty response"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retry_resubmits_same_query() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Err(GenerationError::EmptyResponse),
        });
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.is_loading_for(&query("A")));
    }

    #[tokio::test]
    async fn test_view_toggle_in_ready() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Ok(artifact()),
        });
        app.handle_key(key(KeyCode::Char('v')));
        match &app.session {
            SessionState::Ready { view, .. } => assert_eq!(*view, ViewMode::Source),
            other => panic!("Expected Ready, got {:?}", other),
        }
        app.handle_key(key(KeyCode::Char('v')));
        match &app.session {
            SessionState::Ready { view, .. } => assert_eq!(*view, ViewMode::Rendered),
            other => panic!("Expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_query_resets_from_ready() {
        let mut app = app();
        app.submit(query("A"));
        app.handle_message(AppMessage::GenerationFinished {
            query: query("A"),
            result: Ok(artifact()),
        });
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.session, SessionState::Idle);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert!(app.handle_key(ctrl_c));
        app.submit(query("A"));
        assert!(app.handle_key(ctrl_c));
    }
}
