//! Session state machine for the generation life-cycle.
//!
//! The session is exactly one of `Idle`, `Loading`, `Ready`, or `Failed`.
//! Every UI action maps to exactly one transition, and `submit` is the only
//! entry into `Loading`, which cannot be re-entered until the in-flight
//! request resolves. That single rule is what enforces the
//! at-most-one-outstanding-request property for the whole application.

use crate::models::{ConceptQuery, VisualizationArtifact};

/// How the held artifact is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The artifact runs in the sandboxed preview context.
    Rendered,
    /// The artifact's source is shown as inert text.
    Source,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Rendered => ViewMode::Source,
            ViewMode::Source => ViewMode::Rendered,
        }
    }
}

/// The generation life-cycle state for one session.
///
/// An artifact is held only by `Ready` and is discarded when the next
/// submit or reset replaces the state. Nothing outlives the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No query submitted yet (or after an explicit reset).
    Idle,
    /// One generation request is in flight.
    Loading { query: ConceptQuery },
    /// The last generation succeeded.
    Ready {
        query: ConceptQuery,
        artifact: VisualizationArtifact,
        view: ViewMode,
        show_explanation: bool,
    },
    /// The last generation failed.
    Failed { query: ConceptQuery, message: String },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a new submit is currently allowed.
    ///
    /// False only while a request is in flight; the control surface for new
    /// submissions is hidden in that state.
    pub fn can_submit(&self) -> bool {
        !matches!(self, SessionState::Loading { .. })
    }

    /// Submit a query, entering `Loading`.
    ///
    /// Returns `false` (and leaves the state untouched) if a request is
    /// already in flight. The caller starts the actual generation call only
    /// when this returns `true`.
    pub fn submit(&mut self, query: ConceptQuery) -> bool {
        if !self.can_submit() {
            return false;
        }
        *self = SessionState::Loading { query };
        true
    }

    /// Record a successful generation.
    ///
    /// Only meaningful in `Loading`; the view resets to rendered and the
    /// explanation panel becomes visible. Returns `false` if ignored.
    pub fn succeed(&mut self, artifact: VisualizationArtifact) -> bool {
        match std::mem::take(self) {
            SessionState::Loading { query } => {
                *self = SessionState::Ready {
                    query,
                    artifact,
                    view: ViewMode::Rendered,
                    show_explanation: true,
                };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Record a failed generation.
    ///
    /// Only meaningful in `Loading`. The failure pairs with the query that
    /// produced it; it never touches a previously displayed artifact.
    pub fn fail(&mut self, message: String) -> bool {
        match std::mem::take(self) {
            SessionState::Loading { query } => {
                *self = SessionState::Failed { query, message };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Discard any held query and artifact, returning to `Idle`.
    ///
    /// A no-op while `Loading`: the in-flight request must resolve first.
    pub fn reset(&mut self) {
        if self.can_submit() {
            *self = SessionState::Idle;
        }
    }

    /// Flip between rendered and source presentation.
    ///
    /// Pure presentation toggle over the already-held artifact; never
    /// re-triggers generation. No-op outside `Ready`.
    pub fn toggle_view(&mut self) {
        if let SessionState::Ready { view, .. } = self {
            *view = view.toggled();
        }
    }

    /// Show or hide the explanation panel. No-op outside `Ready`.
    pub fn toggle_explanation(&mut self) {
        if let SessionState::Ready {
            show_explanation, ..
        } = self
        {
            *show_explanation = !*show_explanation;
        }
    }

    /// The query the session is currently about, if any.
    pub fn query(&self) -> Option<&ConceptQuery> {
        match self {
            SessionState::Idle => None,
            SessionState::Loading { query }
            | SessionState::Ready { query, .. }
            | SessionState::Failed { query, .. } => Some(query),
        }
    }

    /// The held artifact, if the session is `Ready`.
    pub fn artifact(&self) -> Option<&VisualizationArtifact> {
        match self {
            SessionState::Ready { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    /// Whether the session is waiting on a result for exactly this query.
    ///
    /// Guards result delivery: a completion message for a query that is no
    /// longer the active one is dropped instead of applied.
    pub fn is_loading_for(&self, query: &ConceptQuery) -> bool {
        matches!(self, SessionState::Loading { query: active } if active == query)
    }
}
