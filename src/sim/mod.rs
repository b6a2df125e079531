//! Game rules
//!
//! Everything here is pure apart from the store's write-through:
//! - State changes go through `reduce`
//! - Time and randomness are passed in, never read
//! - No rendering or platform dependencies

pub mod badges;
pub mod difficulty;
pub mod rules;
pub mod state;
pub mod store;

pub use badges::check_badge_eligibility;
pub use difficulty::{adjust_difficulty, overall_difficulty, subject_difficulty};
pub use rules::{Action, GameEvent, Rejection, Transition, reduce};
pub use state::{
    Avatar, AvatarSlot, Badge, CityGrid, GameHistory, GameState, Subject, User, UserProgress,
};
pub use store::{GameStatePatch, GameStore};
