//! Player settings and difficulty tiers
//!
//! Persisted as the `settings` section of the game state.

use serde::{Deserialize, Serialize};

/// Difficulty tier controlling content generation and reward size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// (xp, coins) for a correct quiz answer
    pub fn quiz_reward(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (50, 10),
            Difficulty::Medium => (75, 15),
            Difficulty::Hard => (100, 20),
        }
    }

    /// (xp, coins) for a solved keypad equation
    pub fn equation_reward(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (75, 15),
            Difficulty::Medium => (100, 20),
            Difficulty::Hard => (150, 30),
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Play sound cues
    pub sound_enabled: bool,
    /// Dark colour scheme
    pub night_mode: bool,
    /// Preferred tier (informational; sessions adapt from accuracy)
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            night_mode: false,
            difficulty: Difficulty::Easy,
        }
    }
}

impl Settings {
    /// Copy with night mode flipped
    pub fn toggled_night_mode(&self) -> Self {
        Self {
            night_mode: !self.night_mode,
            ..self.clone()
        }
    }

    /// Copy with sound flipped
    pub fn toggled_sound(&self) -> Self {
        Self {
            sound_enabled: !self.sound_enabled,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str(" med "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("extreme"), None);
    }

    #[test]
    fn test_rewards_scale_with_tier() {
        assert_eq!(Difficulty::Easy.quiz_reward(), (50, 10));
        assert_eq!(Difficulty::Hard.quiz_reward(), (100, 20));
        assert_eq!(Difficulty::Medium.equation_reward(), (100, 20));
        assert_eq!(Difficulty::Hard.equation_reward(), (150, 30));
    }

    #[test]
    fn test_settings_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{"nightMode":true}"#).unwrap();
        assert!(settings.night_mode);
        assert!(settings.sound_enabled);
        assert_eq!(settings.difficulty, Difficulty::Easy);
    }
}
