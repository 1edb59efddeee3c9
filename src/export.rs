//! Export and clipboard surfaces for the held artifact.
//!
//! Pure functions of the artifact: the exported file's content is exactly
//! the `html` field, and the filename derives deterministically from the
//! title. No generation side effects.

use crate::models::VisualizationArtifact;
use std::io;
use std::path::{Path, PathBuf};

/// Fallback stem when a title collapses to nothing usable.
const FALLBACK_STEM: &str = "visualization";

/// Derive the export filename from an artifact title.
///
/// Lower-cased, whitespace runs collapsed to a single `_`, with no leading
/// or trailing separators, and an `.html` extension.
pub fn export_filename(title: &str) -> String {
    let stem = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        format!("{}.html", FALLBACK_STEM)
    } else {
        format!("{}.html", stem)
    }
}

/// Directory exports are written to by default.
///
/// The user's download directory when the platform reports one, otherwise
/// the current working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write the artifact's HTML to `dir`, returning the full path.
///
/// The file content is byte-for-byte the artifact's `html` field.
pub fn write_artifact(artifact: &VisualizationArtifact, dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(&artifact.title));
    std::fs::write(&path, &artifact.html)?;
    tracing::info!(path = %path.display(), "exported artifact");
    Ok(path)
}

/// Copy the artifact's raw HTML to the system clipboard, untransformed.
pub fn copy_source(artifact: &VisualizationArtifact) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(artifact.html.clone())
}
