//! Color palette for the ConceptViz UI.
//!
//! Dark slate background with the same neon-pastel accents the generation
//! prompt asks the model to use, so the TUI and the artifacts feel like one
//! surface.

use ratatui::style::Color;

/// Application background - slate 900 (#0f172a).
pub const COLOR_BG: Color = Color::Rgb(15, 23, 42);

/// Primary accent - neon cyan (#22d3ee).
pub const COLOR_ACCENT: Color = Color::Rgb(34, 211, 238);

/// Secondary accent - neon yellow (#facc15).
pub const COLOR_HIGHLIGHT: Color = Color::Rgb(250, 204, 21);

/// Panel accent - neon purple (#c084fc).
pub const COLOR_PANEL: Color = Color::Rgb(192, 132, 252);

/// Body text - slate 200.
pub const COLOR_TEXT: Color = Color::Rgb(226, 232, 240);

/// Dim text for hints and placeholders - slate 500.
pub const COLOR_DIM: Color = Color::Rgb(100, 116, 139);

/// Borders - slate 700.
pub const COLOR_BORDER: Color = Color::Rgb(51, 65, 85);

/// Error text - red 400 (#f87171).
pub const COLOR_ERROR: Color = Color::Rgb(248, 113, 113);
