//! Word puzzle banks: matching, spelling, fill in the blank

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PuzzleKind {
    Matching,
    Spelling,
    FillBlanks,
}

/// Reward for one solved step of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleReward {
    pub xp: u32,
    pub coins: u32,
    /// Points on the puzzle screen's own scoreboard
    pub points: u32,
}

impl PuzzleKind {
    pub fn reward(&self) -> PuzzleReward {
        match self {
            PuzzleKind::Matching => PuzzleReward { xp: 25, coins: 5, points: 10 },
            PuzzleKind::Spelling => PuzzleReward { xp: 50, coins: 10, points: 20 },
            PuzzleKind::FillBlanks => PuzzleReward { xp: 35, coins: 7, points: 15 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchingPair {
    pub id: &'static str,
    pub word: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpellingWord {
    pub word: &'static str,
    pub scrambled: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillBlank {
    /// Sentence with `___` where the answer goes
    pub sentence: &'static str,
    pub answer: &'static str,
    pub options: [&'static str; 4],
}

pub const MATCHING_PAIRS: &[MatchingPair] = &[
    MatchingPair { id: "1", word: "Cat", icon: "🐱" },
    MatchingPair { id: "2", word: "Dog", icon: "🐕" },
    MatchingPair { id: "3", word: "Fish", icon: "🐠" },
    MatchingPair { id: "4", word: "Bird", icon: "🐦" },
    MatchingPair { id: "5", word: "Tree", icon: "🌳" },
];

pub const SPELLING_WORDS: &[SpellingWord] = &[
    SpellingWord { word: "BUTTERFLY", scrambled: "TERFLYBUT", hint: "Colorful flying insect" },
    SpellingWord { word: "ELEPHANT", scrambled: "PHANTELE", hint: "Large gray animal with trunk" },
    SpellingWord { word: "MOUNTAIN", scrambled: "TAINMOUN", hint: "Very tall hill" },
    SpellingWord { word: "SANDWICH", scrambled: "WICHSAND", hint: "Food between two bread slices" },
    SpellingWord { word: "RAINBOW", scrambled: "WAINBOR", hint: "Colors in the sky after rain" },
    SpellingWord { word: "NOTEBOOK", scrambled: "BOOKNOTE", hint: "Used to write notes" },
    SpellingWord { word: "GIRAFFE", scrambled: "RAFFEGI", hint: "Tall animal with a long neck" },
    SpellingWord { word: "UMBRELLA", scrambled: "RELLAUMB", hint: "Used when it rains" },
    SpellingWord { word: "PINEAPPLE", scrambled: "APPLEPINE", hint: "A tropical fruit with a crown" },
    SpellingWord { word: "KANGAROO", scrambled: "ROOKANGA", hint: "Jumps and carries baby in pouch" },
];

pub const FILL_BLANKS: &[FillBlank] = &[
    FillBlank { sentence: "The ___ swims in the ocean.", answer: "fish", options: ["fish", "bird", "cat", "dog"] },
    FillBlank { sentence: "I like to ___ books.", answer: "read", options: ["read", "eat", "sleep", "run"] },
    FillBlank { sentence: "The ___ is very hot.", answer: "fire", options: ["fire", "ice", "water", "air"] },
    FillBlank { sentence: "The ___ is shining brightly today.", answer: "sun", options: ["sun", "moon", "star", "cloud"] },
    FillBlank { sentence: "Birds build their ___ in trees.", answer: "nests", options: ["nests", "homes", "beds", "eggs"] },
    FillBlank { sentence: "We wear ___ on our feet.", answer: "shoes", options: ["shoes", "gloves", "hats", "shirts"] },
    FillBlank { sentence: "The ___ barks at strangers.", answer: "dog", options: ["dog", "cat", "bird", "cow"] },
    FillBlank { sentence: "She drank a glass of ___.", answer: "milk", options: ["milk", "water", "juice", "tea"] },
    FillBlank { sentence: "Stars twinkle in the ___.", answer: "sky", options: ["sky", "ground", "sea", "sun"] },
    FillBlank { sentence: "The ___ rings when the class ends.", answer: "bell", options: ["bell", "clock", "whistle", "alarm"] },
];

impl SpellingWord {
    pub fn check(&self, guess: &str) -> bool {
        guess.trim().eq_ignore_ascii_case(self.word)
    }
}

impl FillBlank {
    pub fn check(&self, guess: &str) -> bool {
        guess.trim().eq_ignore_ascii_case(self.answer)
    }

    /// Options in random display order
    pub fn shuffled_options<R: Rng + ?Sized>(&self, rng: &mut R) -> [&'static str; 4] {
        let mut options = self.options;
        options.shuffle(rng);
        options
    }
}

/// A fresh random ordering of a bank
pub fn shuffled<T: Copy, R: Rng + ?Sized>(bank: &[T], rng: &mut R) -> Vec<T> {
    let mut deck = bank.to_vec();
    deck.shuffle(rng);
    deck
}
