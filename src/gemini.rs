//! Gemini API client for visualization generation.
//!
//! This module owns the full generation-request contract: the prompt, the
//! structured-output schema, and the parsing of the response into a typed
//! artifact. One invocation of [`GeminiClient::generate`] makes exactly one
//! network call; there is no internal retry, caching, or streaming.

use crate::config::GeminiConfig;
use crate::models::{ConceptQuery, VisualizationArtifact};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Thinking-token budget passed through to the model.
const THINKING_BUDGET: u32 = 2048;

/// Error type for generation client operations.
///
/// All variants are surfaced to the session layer as a single human-readable
/// message; the UI does not branch on the kind.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured; no network call was attempted.
    #[error("no API key configured (set GEMINI_API_KEY and restart)")]
    Configuration,
    /// The network call itself failed (connectivity, timeout, TLS).
    #[error("request to the generation service failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("generation service returned status {status}: {message}")]
    Server { status: u16, message: String },
    /// The call completed but carried no generated content.
    #[error("the generation service returned an empty response")]
    EmptyResponse,
    /// Content was returned but failed structured parsing or schema validation.
    #[error("malformed generation response: {reason}")]
    Malformed { reason: String },
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generate a visualization for the given concept.
    ///
    /// Issues a single structured-output request and validates the response.
    /// A missing credential fails immediately, before any network traffic.
    pub async fn generate(
        &self,
        query: &ConceptQuery,
    ) -> Result<VisualizationArtifact, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::Configuration)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let request = GenerateContentRequest::for_query(query);

        tracing::debug!(query = %query, model = %self.config.model, "sending generation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), "generation request rejected");
            return Err(GenerationError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Malformed {
                reason: format!("invalid response envelope: {}", e),
            })?;

        let text = envelope.first_text().ok_or(GenerationError::EmptyResponse)?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        parse_artifact(text)
    }
}

/// Parse the model's structured JSON output into an artifact.
///
/// Rejects any payload with a missing or empty required field rather than
/// assuming shape. Field values are passed through unmodified.
fn parse_artifact(text: &str) -> Result<VisualizationArtifact, GenerationError> {
    let raw: RawArtifact = serde_json::from_str(text).map_err(|e| GenerationError::Malformed {
        reason: format!("output is not valid JSON: {}", e),
    })?;

    let title = require_field("title", raw.title)?;
    let explanation = require_field("explanation", raw.explanation)?;
    let html = require_field("html", raw.html)?;

    Ok(VisualizationArtifact::new(title, explanation, html))
}

fn require_field(name: &str, value: Option<String>) -> Result<String, GenerationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GenerationError::Malformed {
            reason: format!("missing or empty required field `{}`", name),
        }),
    }
}

/// Build the natural-language instruction for a concept.
///
/// The layout constraints matter: generated controls must stay in the top
/// corners because the bottom of the viewport belongs to the hosting page's
/// explanation panel.
fn build_prompt(query: &ConceptQuery) -> String {
    format!(
        r#"You are an expert frontend engineer and data visualization specialist inspired by the style of 3Blue1Brown.
Create an interactive web visualization to explain the concept: "{concept}".

Requirements:
1. Technical Stack: Use vanilla HTML5, CSS3, and JavaScript.
2. Libraries: You MAY use D3.js (version 7 via https://d3js.org/d3.v7.min.js) or HTML5 Canvas API.
3. Interactivity: The visualization MUST be highly interactive. Users should be able to drag elements, change parameters via sliders (styled elegantly), or click to trigger animations.
4. Aesthetics (CRITICAL):
   - Style: Dark mode, mathematical elegance, minimalist.
   - Background: Transparent or #0f172a (Slate 900).
   - Colors: Use specific high-contrast "neon pastel" colors against the dark background: Cyan (#22d3ee), Yellow (#facc15), Pink (#f472b6), Purple (#c084fc).
   - Typography: Sans-serif, clean, white text.
5. Layout & Readability (CRITICAL):
   - The visualization MUST NOT have text or UI controls overlapping the main graphical elements.
   - Place internal controls (sliders, buttons) in a semi-transparent floating panel in the TOP-LEFT or TOP-RIGHT corner.
   - Do NOT place controls at the bottom of the screen, as this area is reserved for the hosting application's UI.
   - Ensure labels are positioned dynamically or have sufficient offset to avoid overlapping lines or shapes.
   - The main animation/visualization should be centered and have ample padding from the edges.
6. Code Structure: Return a SINGLE string containing the full HTML file structure (<!DOCTYPE html>...</html>).
7. Content: Ensure the visualization intuitively explains "{concept}" through motion. Focus on the "Aha!" moment.

Important: Ensure the generated HTML body has 'margin: 0', 'overflow: hidden', and 'background-color: transparent' (or #0f172a) so it blends seamlessly."#,
        concept = query.as_str()
    )
}

/// The required-fields schema imposed on the model's response.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "html": {
                "type": "STRING",
                "description": "The complete, self-contained HTML5 code (including CSS and JS) to render the interactive visualization. The CSS should be embedded in <style> tags and JS in <script> tags. Do not use external CSS files.",
            },
            "explanation": {
                "type": "STRING",
                "description": "A concise, 2-3 sentence explanation of the concept being visualized, written for a general audience.",
            },
            "title": {
                "type": "STRING",
                "description": "A short, catchy title for the visualization.",
            },
        },
        "required": ["html", "explanation", "title"],
    })
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn for_query(query: &ConceptQuery) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(query),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
                thinking_config: ThinkingConfig {
                    thinking_budget: THINKING_BUDGET,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// The model's structured output, before validation.
#[derive(Debug, Deserialize)]
struct RawArtifact {
    title: Option<String>,
    explanation: Option<String>,
    html: Option<String>,
}
