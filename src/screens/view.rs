//! Read-only snapshots of the active screen, serialized for the page

use chrono::NaiveDate;
use serde::Serialize;

use super::avatar::is_owned;
use super::world::{Availability, palette};
use super::{
    AvatarEditor, Feedback, KeypadSession, ProgressReport, PuzzleSession, QuizSession, Tile,
    WorldEditor,
};
use crate::content::catalog::{AVATAR_OPTIONS, SHOP_ITEMS};
use crate::content::puzzles::MATCHING_PAIRS;
use crate::content::{MatchingPair, PuzzleKind, QuizQuestion};
use crate::sim::state::AvatarSlot;
use crate::sim::{Avatar, GameState};

/// One matching card; `pair` is what a `Tile` carries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub pair: usize,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarChoice {
    pub id: &'static str,
    pub slot: AvatarSlot,
    pub emoji: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub owned: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub asset: &'static str,
    pub cost: u32,
    pub available: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub cost: u32,
    pub description: &'static str,
    pub owned: bool,
    pub affordable: bool,
}

/// Everything the page needs to draw the screen on display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScreenView {
    Menu {
        bonus_available: bool,
        streak_days: u32,
    },
    Quiz {
        question: QuizQuestion,
        number: u32,
        rounds: u32,
        score: u32,
        selected: Option<usize>,
        feedback: Option<Feedback>,
        complete: bool,
    },
    Keypad {
        equation: String,
        input: String,
        correct: u32,
        answered: u32,
        feedback: Option<Feedback>,
        complete: bool,
        summary: String,
    },
    Puzzles {
        kind: PuzzleKind,
        score: u32,
        boards_completed: u32,
        words: Vec<Card>,
        icons: Vec<Card>,
        selected: Vec<Tile>,
        scrambled: &'static str,
        hint: &'static str,
        sentence: &'static str,
        options: [&'static str; 4],
    },
    Avatar {
        preview: Avatar,
        has_changes: bool,
        options: Vec<AvatarChoice>,
    },
    World {
        selected: Option<&'static str>,
        status: String,
        palette: Vec<PaletteEntry>,
    },
    Shop {
        items: Vec<ShopEntry>,
    },
    Progress {
        report: ProgressReport,
    },
}

fn card(pair: &MatchingPair, label: &'static str) -> Card {
    Card {
        pair: MATCHING_PAIRS
            .iter()
            .position(|p| p.id == pair.id)
            .unwrap_or_default(),
        label,
    }
}

impl ScreenView {
    pub fn menu(state: &GameState, today: NaiveDate) -> Self {
        let history = &state.game_history;
        ScreenView::Menu {
            bonus_available: !history.daily_bonus_claimed && history.last_login == Some(today),
            streak_days: history.streak_days,
        }
    }

    pub fn quiz(quiz: &QuizSession) -> Self {
        ScreenView::Quiz {
            question: quiz.question().clone(),
            number: quiz.number(),
            rounds: quiz.rounds(),
            score: quiz.score(),
            selected: quiz.selected(),
            feedback: quiz.feedback().cloned(),
            complete: quiz.is_complete(),
        }
    }

    pub fn keypad(keypad: &KeypadSession) -> Self {
        let (correct, answered) = keypad.score();
        ScreenView::Keypad {
            equation: keypad.equation().equation.clone(),
            input: keypad.input().to_string(),
            correct,
            answered,
            feedback: keypad.feedback().cloned(),
            complete: keypad.is_complete(),
            summary: keypad.summary(),
        }
    }

    pub fn puzzles(puzzles: &PuzzleSession) -> Self {
        let spelling = puzzles.spelling_word();
        let blank = puzzles.fill_blank();
        ScreenView::Puzzles {
            kind: puzzles.kind(),
            score: puzzles.score(),
            boards_completed: puzzles.boards_completed(),
            words: puzzles.words().into_iter().map(|p| card(p, p.word)).collect(),
            icons: puzzles.icons().into_iter().map(|p| card(p, p.icon)).collect(),
            selected: puzzles.selected().to_vec(),
            scrambled: spelling.scrambled,
            hint: spelling.hint,
            sentence: blank.sentence,
            options: blank.options,
        }
    }

    pub fn avatar(editor: &AvatarEditor, state: &GameState) -> Self {
        let options = AVATAR_OPTIONS
            .iter()
            .map(|o| AvatarChoice {
                id: o.id,
                slot: o.slot,
                emoji: o.emoji,
                name: o.name,
                cost: o.cost,
                owned: is_owned(&state.user, o),
                selected: editor.is_selected(o),
            })
            .collect();
        ScreenView::Avatar {
            preview: editor.preview().clone(),
            has_changes: editor.has_changes(),
            options,
        }
    }

    pub fn world(editor: &WorldEditor, state: &GameState) -> Self {
        let palette = palette(state)
            .into_iter()
            .map(|(b, availability)| PaletteEntry {
                id: b.id,
                name: b.name,
                asset: b.asset,
                cost: b.cost,
                available: availability == Availability::Available,
                status: availability.to_string(),
            })
            .collect();
        ScreenView::World {
            selected: editor.selected().map(|b| b.id),
            status: editor.status(),
            palette,
        }
    }

    pub fn shop(state: &GameState) -> Self {
        let items = SHOP_ITEMS
            .iter()
            .map(|item| ShopEntry {
                id: item.id,
                name: item.name,
                emoji: item.emoji,
                cost: item.cost,
                description: item.description,
                owned: state.user.owns(item.id),
                affordable: state.user.coins >= item.cost,
            })
            .collect();
        ScreenView::Shop { items }
    }

    pub fn progress(state: &GameState) -> Self {
        ScreenView::Progress {
            report: ProgressReport::new(state),
        }
    }
}
