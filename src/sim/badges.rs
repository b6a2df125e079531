//! Achievement rules

use chrono::{DateTime, Utc};

use crate::content::catalog::{BADGES, BadgeDef, BadgeRule};
use crate::sim::state::{Badge, GameState, Subject};

fn correct_in(state: &GameState, subject: Subject) -> u32 {
    state
        .user
        .progress_for(subject)
        .map(|p| p.correct_answers)
        .unwrap_or(0)
}

fn qualifies(state: &GameState, rule: BadgeRule) -> bool {
    match rule {
        BadgeRule::MathCorrect(n) => correct_in(state, Subject::Mathematics) >= n,
        BadgeRule::LanguageCorrect(n) => correct_in(state, Subject::LanguageArts) >= n,
        BadgeRule::AnyBuilding => !state.city_grid.is_empty(),
        BadgeRule::GamesPlayed(n) => state.user.total_games_played >= n,
        BadgeRule::LoginStreak(n) => state.game_history.streak_days >= n,
    }
}

fn award(def: &BadgeDef, now: DateTime<Utc>) -> Badge {
    Badge {
        id: def.id.to_string(),
        name: def.name.to_string(),
        emoji: def.emoji.to_string(),
        description: def.description.to_string(),
        earned: true,
        earned_date: Some(now),
    }
}

/// Badges that qualify now and are not owned yet
pub fn check_badge_eligibility(state: &GameState, now: DateTime<Utc>) -> Vec<Badge> {
    BADGES
        .iter()
        .filter(|def| !state.user.has_badge(def.id))
        .filter(|def| qualifies(state, def.rule))
        .map(|def| award(def, now))
        .collect()
}
