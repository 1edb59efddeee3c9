//! Sandboxed render surface for generated artifacts.
//!
//! The generated HTML is fully untrusted and is never opened directly.
//! Instead it is embedded via `srcdoc` into a host page whose iframe grants
//! exactly the declared capability set: scripts and popups/modals are
//! allowed, top-level navigation and same-origin storage/cookie access are
//! denied. This is a security boundary, not cosmetics.
//!
//! Every preview writes a fresh uniquely-named wrapper file, so each
//! artifact executes in a newly created context and no script state leaks
//! from a previous one.

use crate::models::VisualizationArtifact;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

/// The exact iframe permission set for untrusted artifacts.
///
/// Anything not listed here is denied by the sandbox default.
pub const SANDBOX_PERMISSIONS: &str = "allow-scripts allow-popups allow-modals";

/// Escape text for embedding inside a double-quoted HTML attribute.
fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

/// Escape text for embedding as HTML element content.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build the host document that embeds the artifact in a sandboxed iframe.
pub fn wrapper_document(artifact: &VisualizationArtifact) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  html, body {{ margin: 0; height: 100%; background: #0f172a; }}
  iframe {{ display: block; width: 100%; height: 100%; border: none; }}
</style>
</head>
<body>
<iframe title="{title}" sandbox="{sandbox}" srcdoc="{srcdoc}"></iframe>
</body>
</html>
"#,
        title = escape_text(&artifact.title),
        sandbox = SANDBOX_PERMISSIONS,
        srcdoc = escape_attribute(&artifact.html),
    )
}

/// Write a fresh wrapper file for the artifact and return its path.
///
/// Each call produces a new file under the system temp directory; wrapper
/// files are never reused or mutated in place.
pub fn write_preview(artifact: &VisualizationArtifact) -> io::Result<PathBuf> {
    let dir = std::env::temp_dir().join("conceptviz");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("preview-{}.html", Uuid::new_v4()));
    std::fs::write(&path, wrapper_document(artifact))?;
    Ok(path)
}

/// Write a wrapper file and open it in the system browser.
pub fn open_preview(artifact: &VisualizationArtifact) -> io::Result<PathBuf> {
    let path = write_preview(artifact)?;
    tracing::info!(path = %path.display(), "opening sandboxed preview");
    open::that(&path)?;
    Ok(path)
}
