//! LearnQuest - educational mini-game suite
//!
//! Core modules:
//! - `sim`: Game state, reducer, badge and difficulty rules
//! - `content`: Question, equation and puzzle generators plus static catalogs
//! - `screens`: Per-mini-game transient session state
//! - `session`: Wires store, audio, clock and timers together
//! - `platform`: Browser/native abstraction (storage, clock, timers)
//! - `audio` / `hardware`: Injected output services (sound cues, serial controller)
//! - `persistence`: Lenient load/save of the game state document
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod content;
pub mod hardware;
pub mod persistence;
pub mod platform;
pub mod screens;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{Intent, Session};
pub use settings::{Difficulty, Settings};
pub use sim::{Action, GameEvent, GameState, GameStore, Rejection};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// LocalStorage key of the game state document
    pub const STORAGE_KEY: &str = "learnquest-game-state";

    /// City grid dimensions (always square)
    pub const GRID_SIZE: usize = 10;

    /// XP per player level
    pub const XP_PER_LEVEL: u32 = 1500;

    /// Coins a brand-new player starts with
    pub const STARTING_COINS: u32 = 50;
    /// Daily login bonus
    pub const DAILY_BONUS_COINS: u32 = 5;

    /// Correct answers per subject level
    pub const ANSWERS_PER_SUBJECT_LEVEL: u32 = 10;

    /// Below this many answers accuracy is not trusted
    pub const MIN_QUESTIONS_FOR_ADJUST: u32 = 5;
}

/// Player level for a given XP total (1-based)
#[inline]
pub fn calculate_level(xp: u32) -> u32 {
    xp / consts::XP_PER_LEVEL + 1
}

/// XP total at which the next level is reached
#[inline]
pub fn xp_for_next_level(xp: u32) -> u32 {
    calculate_level(xp) * consts::XP_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_curve() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(1499), 1);
        assert_eq!(calculate_level(1500), 2);
        assert_eq!(xp_for_next_level(0), 1500);
        assert_eq!(xp_for_next_level(3200), 4500);
    }
}
