// src/core/mod.rs

// The core knows nothing about terminals: it validates input, runs the
// simulated tools and renders their reports. Both the TUI and the headless
// CLI sit on top of it.

/// Shared value types and the `ToolReport` envelope.
pub mod models;

pub mod error;

/// The static table of tools shown on the dashboard.
pub mod catalog;

pub mod validate;

/// One module per tool, plus the request type and `run_tool` orchestrator.
pub mod tools;

/// Plain-text rendering and file export.
pub mod report;
