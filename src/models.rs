//! Core data types shared across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-supplied concept to visualize.
///
/// Guaranteed non-empty after trimming. Construct via [`ConceptQuery::parse`];
/// whitespace-only input is rejected there so the generation client never has
/// to re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptQuery(String);

impl ConceptQuery {
    /// Parse raw input into a query, trimming surrounding whitespace.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConceptQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The result of a successful generation.
///
/// All three text fields are non-empty strings (enforced by the generation
/// client before this type is constructed). `html` is assumed, not verified,
/// to be a complete standalone document with inline styling and scripting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationArtifact {
    /// Short title for the visualization.
    pub title: String,
    /// 2-3 sentence explanation of the concept for a general audience.
    pub explanation: String,
    /// Complete self-contained HTML document.
    pub html: String,
    /// When the artifact was received.
    pub generated_at: DateTime<Utc>,
}

impl VisualizationArtifact {
    pub fn new(title: String, explanation: String, html: String) -> Self {
        Self {
            title,
            explanation,
            html,
            generated_at: Utc::now(),
        }
    }
}
