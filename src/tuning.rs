//! Data-driven game balance
//!
//! Every knob has a serde default, so a partial JSON document only overrides
//! what it names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Questions in one quiz game
    pub quiz_rounds: u32,
    /// Equations in one keypad game
    pub keypad_rounds: u32,
    /// Feedback window before the next quiz question (ms)
    pub quiz_feedback_ms: u64,
    /// Feedback window before the next equation (ms)
    pub keypad_feedback_ms: u64,
    /// Delay before a matching selection is cleared (ms)
    pub matching_reset_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            quiz_rounds: 10,
            keypad_rounds: 10,
            quiz_feedback_ms: 3000,
            keypad_feedback_ms: 3000,
            matching_reset_ms: 1000,
        }
    }
}

impl Tuning {
    /// Parse a tuning document, falling back to defaults when it is unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning document: {}", e);
                Self::default()
            }
        }
    }

    /// Load from a file next to the native binary
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => Self::default(),
        }
    }
}
