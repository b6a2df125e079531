//! Multiple-choice question banks and generator

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::settings::Difficulty;
use crate::sim::state::Subject;

/// Bank entry: question, four answers, index of the right one
type Entry = (&'static str, [&'static str; 4], usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer: usize,
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub coin_reward: u32,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer
    }

    pub fn correct_text(&self) -> &str {
        self.answers
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

const MATH_EASY: &[Entry] = &[
    ("What is 5 + 3?", ["6", "7", "8", "9"], 2),
    ("What is 10 - 4?", ["5", "6", "7", "8"], 1),
    ("What is 2 × 4?", ["6", "7", "8", "9"], 2),
    ("What is 12 ÷ 3?", ["3", "4", "5", "6"], 1),
    ("What is 7 + 6?", ["12", "13", "14", "15"], 1),
];

const MATH_MEDIUM: &[Entry] = &[
    ("What is 15 + 27?", ["32", "42", "52", "41"], 1),
    ("What is 56 - 19?", ["37", "38", "39", "35"], 0),
    ("What is 8 × 7?", ["54", "56", "58", "52"], 1),
    ("What is 72 ÷ 8?", ["8", "9", "10", "7"], 1),
    ("What is 25 + 48?", ["71", "72", "73", "74"], 2),
];

const MATH_HARD: &[Entry] = &[
    ("What is 123 + 89?", ["210", "211", "212", "213"], 2),
    ("What is 15 × 12?", ["180", "185", "175", "170"], 0),
    ("What is 144 ÷ 12?", ["11", "12", "13", "14"], 1),
    ("What is 75% of 200?", ["150", "160", "140", "170"], 0),
    ("What is 2³?", ["6", "8", "9", "12"], 1),
];

const LANGUAGE_EASY: &[Entry] = &[
    ("What is the opposite of 'hot'?", ["warm", "cold", "cool", "freezing"], 1),
    ("Which word rhymes with 'cat'?", ["dog", "hat", "car", "sun"], 1),
    ("How many letters are in 'dog'?", ["2", "3", "4", "5"], 1),
    ("What is the first letter of 'apple'?", ["A", "B", "C", "D"], 0),
    ("Which is a color?", ["happy", "blue", "fast", "loud"], 1),
];

const LANGUAGE_MEDIUM: &[Entry] = &[
    ("What is the plural of 'child'?", ["childs", "children", "childes", "child"], 1),
    ("Which word is a noun?", ["run", "quickly", "house", "beautiful"], 2),
    ("What is a synonym for 'happy'?", ["sad", "angry", "joyful", "tired"], 2),
    (
        "Which sentence is correct?",
        ["I are happy", "I is happy", "I am happy", "I be happy"],
        2,
    ),
    ("What is the past tense of 'go'?", ["goes", "went", "going", "gone"], 1),
];

const LANGUAGE_HARD: &[Entry] = &[
    ("What is an antonym for 'enormous'?", ["huge", "tiny", "big", "large"], 1),
    ("Which is a compound word?", ["beautiful", "sunshine", "running", "jumped"], 1),
    ("What type of word is 'quickly'?", ["noun", "verb", "adjective", "adverb"], 3),
    (
        "Which sentence uses correct punctuation?",
        ["Hello world", "Hello, world!", "Hello world.", "hello world"],
        1,
    ),
    (
        "What is a metaphor?",
        [
            "A comparison using 'like'",
            "A direct comparison",
            "A rhyming word",
            "A loud sound",
        ],
        1,
    ),
];

const GENERAL_EASY: &[Entry] = &[
    ("How many days are in a week?", ["5", "6", "7", "8"], 2),
    (
        "What color do you get when you mix red and yellow?",
        ["green", "orange", "purple", "blue"],
        1,
    ),
    ("Which animal says 'moo'?", ["pig", "cow", "sheep", "horse"], 1),
    ("How many wheels does a bicycle have?", ["1", "2", "3", "4"], 1),
    ("What do bees make?", ["milk", "honey", "eggs", "wool"], 1),
];

const GENERAL_MEDIUM: &[Entry] = &[
    ("What is the capital of France?", ["London", "Berlin", "Paris", "Rome"], 2),
    ("How many continents are there?", ["5", "6", "7", "8"], 2),
    (
        "What do plants need to grow?",
        ["Only water", "Only sunlight", "Water and sunlight", "Only soil"],
        2,
    ),
    ("Which planet is closest to the sun?", ["Venus", "Mercury", "Earth", "Mars"], 1),
    ("What is the largest ocean?", ["Atlantic", "Indian", "Arctic", "Pacific"], 3),
];

const GENERAL_HARD: &[Entry] = &[
    ("Who painted the Mona Lisa?", ["Picasso", "Van Gogh", "Da Vinci", "Monet"], 2),
    ("What is the chemical symbol for water?", ["H2O", "CO2", "NaCl", "O2"], 0),
    (
        "Which is the longest river in the world?",
        ["Amazon", "Nile", "Mississippi", "Yangtze"],
        1,
    ),
    (
        "What is the speed of light?",
        ["300,000 km/s", "150,000 km/s", "450,000 km/s", "200,000 km/s"],
        0,
    ),
    ("Who wrote Romeo and Juliet?", ["Dickens", "Shakespeare", "Austen", "Twain"], 1),
];

/// Subject whose bank is actually used, and the bank itself
fn bank(subject: Subject, difficulty: Difficulty) -> (Subject, &'static [Entry]) {
    use Difficulty::*;
    match (subject, difficulty) {
        (Subject::Mathematics, Easy) => (subject, MATH_EASY),
        (Subject::Mathematics, Medium) => (subject, MATH_MEDIUM),
        (Subject::Mathematics, Hard) => (subject, MATH_HARD),
        (Subject::LanguageArts, Easy) => (subject, LANGUAGE_EASY),
        (Subject::LanguageArts, Medium) => (subject, LANGUAGE_MEDIUM),
        (Subject::LanguageArts, Hard) => (subject, LANGUAGE_HARD),
        (_, Easy) => (Subject::GeneralKnowledge, GENERAL_EASY),
        (_, Medium) => (Subject::GeneralKnowledge, GENERAL_MEDIUM),
        (_, Hard) => (Subject::GeneralKnowledge, GENERAL_HARD),
    }
}

/// Pick one question for `subject` at `difficulty`
///
/// Subjects without a bank of their own draw from General Knowledge and the
/// question is labelled accordingly.
pub fn generate_quiz_question<R: Rng + ?Sized>(
    subject: Subject,
    difficulty: Difficulty,
    rng: &mut R,
) -> QuizQuestion {
    let (subject, entries) = bank(subject, difficulty);
    let (question, answers, correct) = entries.choose(rng).copied().unwrap_or(entries[0]);
    let (xp_reward, coin_reward) = difficulty.quiz_reward();

    QuizQuestion {
        id: format!("{:09x}", rng.random::<u64>() & 0xf_ffff_ffff),
        question: question.to_string(),
        answers: answers.iter().map(|a| a.to_string()).collect(),
        correct_answer: correct,
        subject,
        difficulty,
        xp_reward,
        coin_reward,
    }
}
