//! ConceptViz - a TUI that turns concept names into generated interactive
//! visualizations.
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod export;
pub mod gemini;
pub mod models;
pub mod preview;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod widgets;
