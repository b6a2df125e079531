//! Game state and persisted record types
//!
//! Everything that survives a page reload lives here. Field names serialize
//! in camelCase so documents written by older builds keep loading.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::lenient;
use crate::settings::Settings;

/// A subject with its own progress counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Mathematics,
    #[serde(rename = "Language Arts")]
    LanguageArts,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "General Knowledge")]
    GeneralKnowledge,
}

impl Subject {
    /// Subjects a new player starts with
    pub const DEFAULTS: [Subject; 3] = [
        Subject::Mathematics,
        Subject::LanguageArts,
        Subject::ProblemSolving,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::LanguageArts => "Language Arts",
            Subject::ProblemSolving => "Problem Solving",
            Subject::GeneralKnowledge => "General Knowledge",
        }
    }
}

/// Per-subject counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub subject: Subject,
    /// Derived from `correct_answers`; recomputed on load
    #[serde(deserialize_with = "lenient::or_default", default)]
    pub level: u32,
    /// Percent toward the next subject level
    #[serde(deserialize_with = "lenient::or_default", default)]
    pub progress: u32,
    #[serde(deserialize_with = "lenient::or_default", default)]
    pub stars: u32,
    #[serde(deserialize_with = "lenient::or_default", default)]
    pub total_questions: u32,
    #[serde(deserialize_with = "lenient::or_default", default)]
    pub correct_answers: u32,
}

impl UserProgress {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            level: 1,
            progress: 0,
            stars: 0,
            total_questions: 0,
            correct_answers: 0,
        }
    }

    /// Count one answered question
    pub fn record(&mut self, correct: bool) {
        self.total_questions += 1;
        if correct {
            self.correct_answers += 1;
            self.stars += 1;
        }
        self.recompute();
    }

    /// Restore `correct <= total` and the derived level/percentage
    pub fn recompute(&mut self) {
        self.correct_answers = self.correct_answers.min(self.total_questions);
        self.level = self.correct_answers / ANSWERS_PER_SUBJECT_LEVEL + 1;
        self.progress = (self.correct_answers % ANSWERS_PER_SUBJECT_LEVEL) * 100
            / ANSWERS_PER_SUBJECT_LEVEL;
    }

    /// Accuracy in 0.0..=1.0 (0 when nothing was answered)
    pub fn accuracy(&self) -> f32 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f32 / self.total_questions as f32
        }
    }
}

/// An earned achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub earned: bool,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub earned_date: Option<DateTime<Utc>>,
}

impl Default for Badge {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            emoji: String::new(),
            description: String::new(),
            earned: true,
            earned_date: None,
        }
    }
}

/// Avatar slots that can be equipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvatarSlot {
    Hair,
    Clothes,
    Accessories,
    SkinTone,
    Pet,
}

/// Equipped avatar emoji per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Avatar {
    pub hair: String,
    pub clothes: String,
    pub accessories: String,
    pub skin_tone: String,
    pub pet: String,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            hair: "👧".to_string(),
            clothes: String::new(),
            accessories: String::new(),
            skin_tone: String::new(),
            pet: "🐰".to_string(),
        }
    }
}

impl Avatar {
    pub fn slot(&self, slot: AvatarSlot) -> &str {
        match slot {
            AvatarSlot::Hair => &self.hair,
            AvatarSlot::Clothes => &self.clothes,
            AvatarSlot::Accessories => &self.accessories,
            AvatarSlot::SkinTone => &self.skin_tone,
            AvatarSlot::Pet => &self.pet,
        }
    }

    pub fn set_slot(&mut self, slot: AvatarSlot, emoji: &str) {
        let target = match slot {
            AvatarSlot::Hair => &mut self.hair,
            AvatarSlot::Clothes => &mut self.clothes,
            AvatarSlot::Accessories => &mut self.accessories,
            AvatarSlot::SkinTone => &mut self.skin_tone,
            AvatarSlot::Pet => &mut self.pet,
        };
        *target = emoji.to_string();
    }
}

/// Player profile, economy and progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub name: String,
    /// Derived from xp; recomputed on load and after every xp change
    pub level: u32,
    pub xp: u32,
    pub coins: u32,
    pub stars: u32,
    #[serde(deserialize_with = "lenient::vec")]
    pub badges: Vec<Badge>,
    pub total_games_played: u32,
    pub avatar: Avatar,
    #[serde(deserialize_with = "lenient::vec")]
    pub inventory: Vec<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub progress: Vec<UserProgress>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
            level: 1,
            xp: 0,
            coins: STARTING_COINS,
            stars: 0,
            badges: Vec::new(),
            total_games_played: 0,
            avatar: Avatar::default(),
            inventory: Vec::new(),
            progress: Subject::DEFAULTS.iter().map(|s| UserProgress::new(*s)).collect(),
        }
    }
}

impl User {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    pub fn owns(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|i| i == item_id)
    }

    pub fn progress_for(&self, subject: Subject) -> Option<&UserProgress> {
        self.progress.iter().find(|p| p.subject == subject)
    }

    /// Progress entry for `subject`, created on first use
    pub fn progress_entry(&mut self, subject: Subject) -> &mut UserProgress {
        let idx = match self.progress.iter().position(|p| p.subject == subject) {
            Some(i) => i,
            None => {
                self.progress.push(UserProgress::new(subject));
                self.progress.len() - 1
            }
        };
        &mut self.progress[idx]
    }

    /// (correct, total) summed over every subject
    pub fn overall_counts(&self) -> (u32, u32) {
        self.progress.iter().fold((0, 0), |(c, t), p| {
            (c + p.correct_answers, t + p.total_questions)
        })
    }

    /// Add xp and return the new level if it went up
    pub fn gain_xp(&mut self, amount: u32) -> Option<u32> {
        let before = crate::calculate_level(self.xp);
        self.xp = self.xp.saturating_add(amount);
        self.level = crate::calculate_level(self.xp);
        (self.level > before).then_some(self.level)
    }

    /// Drop duplicate badges and inventory entries, fix derived fields
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.badges.retain(|b| seen.insert(b.id.clone()));
        let mut seen = std::collections::HashSet::new();
        self.inventory.retain(|i| seen.insert(i.clone()));
        for p in &mut self.progress {
            p.recompute();
        }
        self.level = crate::calculate_level(self.xp);
    }
}

/// The city sandbox: always `GRID_SIZE` x `GRID_SIZE` cell tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "Vec<Vec<String>>")]
pub struct CityGrid {
    cells: Vec<Vec<String>>,
}

impl Default for CityGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl CityGrid {
    pub fn empty() -> Self {
        Self {
            cells: vec![vec![String::new(); GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Accept rows only when they have the exact grid shape
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        if Self::has_grid_shape(&rows) {
            Self { cells: rows }
        } else {
            log::warn!(
                "City grid had {} rows, expected {}x{}; resetting",
                rows.len(),
                GRID_SIZE,
                GRID_SIZE
            );
            Self::empty()
        }
    }

    fn has_grid_shape(rows: &[Vec<String>]) -> bool {
        rows.len() == GRID_SIZE && rows.iter().all(|r| r.len() == GRID_SIZE)
    }

    pub fn is_well_formed(&self) -> bool {
        Self::has_grid_shape(&self.cells)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Write a cell; false when out of bounds
    pub fn set(&mut self, row: usize, col: usize, token: &str) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = token.to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.clear();
        }
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }
}

impl From<serde_json::Value> for CityGrid {
    fn from(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Vec<Vec<String>>>(value) {
            Ok(rows) => Self::from_rows(rows),
            Err(_) => {
                log::warn!("City grid was not a matrix of strings; resetting");
                Self::empty()
            }
        }
    }
}

impl From<CityGrid> for Vec<Vec<String>> {
    fn from(grid: CityGrid) -> Self {
        grid.cells
    }
}

/// Login bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameHistory {
    #[serde(deserialize_with = "lenient::date")]
    pub last_login: Option<NaiveDate>,
    pub daily_bonus_claimed: bool,
    pub streak_days: u32,
}

/// Complete persisted game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub user: User,
    pub city_grid: CityGrid,
    pub settings: Settings,
    pub game_history: GameHistory,
}

impl GameState {
    /// Fix everything that can be derived or reset without losing progress
    pub fn normalize(&mut self) {
        self.user.normalize();
        if !self.city_grid.is_well_formed() {
            self.city_grid = CityGrid::empty();
        }
    }

    pub fn badge_count(&self) -> u32 {
        self.user.badges.len() as u32
    }
}
