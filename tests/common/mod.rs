//! Common test utilities and helpers
//!
//! Shared fixtures for integration tests: scratch projects with a `dist/`
//! directory laid out like a bundler's output.

pub mod fixtures;

/// Read the history file of a project as JSON
#[allow(dead_code)]
pub fn read_history(project: &std::path::Path) -> serde_json::Value {
    let text = std::fs::read_to_string(project.join("size-plugin.json"))
        .expect("history file should exist");
    serde_json::from_str(&text).expect("history file should be valid JSON")
}
