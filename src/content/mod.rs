//! Gameplay content
//!
//! Generators are pure functions of their inputs and an injected RNG; every
//! table they draw from lives in this module tree and nowhere else.

pub mod catalog;
pub mod equation;
pub mod puzzles;
pub mod quiz;

pub use catalog::{AvatarOption, BadgeDef, BadgeRule, Building, ShopItem, ShopKind};
pub use equation::{EquationForm, KeypadEquation, generate_keypad_equation};
pub use puzzles::{FillBlank, MatchingPair, PuzzleKind, PuzzleReward, SpellingWord};
pub use quiz::{QuizQuestion, generate_quiz_question};
