//! The reducer: every state change is an `Action` applied to the full
//! previous state, producing the next state plus the events it caused.
//!
//! Rejected actions leave the state untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::SoundCue;
use crate::consts::{DAILY_BONUS_COINS, GRID_SIZE};
use crate::content::catalog::{ShopKind, avatar_option_by_id, building_by_id, shop_item_by_id};
use crate::settings::Settings;
use crate::sim::badges::check_badge_eligibility;
use crate::sim::state::{Badge, GameState, Subject, User};

/// A user intent, serialized as `{"type": "...", ...fields}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// One answered question (quiz or keypad)
    RecordAnswer {
        subject: Subject,
        correct: bool,
        xp: u32,
        coins: u32,
    },
    /// One solved puzzle step
    AwardPuzzle { xp: u32, coins: u32 },
    /// A mini-game round was completed
    FinishGame,
    /// App opened on `today`
    RegisterLogin { today: NaiveDate },
    /// Claim today's coins; `today` is the player's local calendar day
    ClaimDailyBonus { today: NaiveDate },
    Purchase { item_id: String },
    EquipAvatar { option_id: String },
    PlaceBuilding {
        building_id: String,
        row: usize,
        col: usize,
    },
    ClearTile { row: usize, col: usize },
    ClearCity,
    UpdateSettings(Settings),
}

/// Something the UI should react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    Sound { cue: SoundCue },
    BadgeEarned { badge: Badge },
    LeveledUp { level: u32 },
    Purchased { item_id: String },
    BonusClaimed { coins: u32 },
}

/// Why an action was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("Already owned: {0}")]
    AlreadyOwned(String),
    #[error("Not owned: {0}")]
    NotOwned(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Locked: need {required} badges, have {have}")]
    Locked { required: u32, have: u32 },
    #[error("Cell ({row}, {col}) is outside the city")]
    OutOfBounds { row: usize, col: usize },
    #[error("Daily bonus not available")]
    BonusUnavailable,
}

impl Rejection {
    /// Cue played when the action is refused
    pub fn cue(&self) -> Option<SoundCue> {
        match self {
            Rejection::AlreadyOwned(_) | Rejection::BonusUnavailable => None,
            _ => Some(SoundCue::Incorrect),
        }
    }
}

/// Result of a successful reduction
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

fn sound(events: &mut Vec<GameEvent>, cue: SoundCue) {
    events.push(GameEvent::Sound { cue });
}

fn reward(user: &mut User, xp: u32, coins: u32, events: &mut Vec<GameEvent>) {
    user.coins = user.coins.saturating_add(coins);
    if let Some(level) = user.gain_xp(xp) {
        events.push(GameEvent::LeveledUp { level });
        sound(events, SoundCue::LevelUp);
    }
}

fn charge(user: &mut User, cost: u32) -> Result<(), Rejection> {
    if user.coins < cost {
        return Err(Rejection::InsufficientFunds {
            needed: cost,
            available: user.coins,
        });
    }
    user.coins -= cost;
    Ok(())
}

fn in_bounds(row: usize, col: usize) -> Result<(), Rejection> {
    if row < GRID_SIZE && col < GRID_SIZE {
        Ok(())
    } else {
        Err(Rejection::OutOfBounds { row, col })
    }
}

fn register_login(state: &mut GameState, today: NaiveDate) {
    let history = &mut state.game_history;
    if history.last_login == Some(today) {
        return;
    }
    let consecutive = history.last_login.is_some() && history.last_login == today.pred_opt();
    history.streak_days = if consecutive { history.streak_days + 1 } else { 1 };
    history.daily_bonus_claimed = false;
    history.last_login = Some(today);
    log::info!("Login on {}, streak {} days", today, history.streak_days);
}

/// Apply `action` to `state` at time `now`
pub fn reduce(
    state: &GameState,
    action: &Action,
    now: DateTime<Utc>,
) -> Result<Transition, Rejection> {
    let mut next = state.clone();
    let mut events = Vec::new();
    let mut check_badges = false;

    match action {
        Action::RecordAnswer {
            subject,
            correct,
            xp,
            coins,
        } => {
            next.user.progress_entry(*subject).record(*correct);
            if *correct {
                next.user.stars += 1;
                sound(&mut events, SoundCue::Correct);
                reward(&mut next.user, *xp, *coins, &mut events);
            } else {
                sound(&mut events, SoundCue::Incorrect);
            }
            check_badges = true;
        }
        Action::AwardPuzzle { xp, coins } => {
            sound(&mut events, SoundCue::Correct);
            reward(&mut next.user, *xp, *coins, &mut events);
        }
        Action::FinishGame => {
            next.user.total_games_played += 1;
            check_badges = true;
        }
        Action::RegisterLogin { today } => {
            register_login(&mut next, *today);
            check_badges = true;
        }
        Action::ClaimDailyBonus { today } => {
            let history = &mut next.game_history;
            if history.daily_bonus_claimed || history.last_login != Some(*today) {
                return Err(Rejection::BonusUnavailable);
            }
            history.daily_bonus_claimed = true;
            next.user.coins = next.user.coins.saturating_add(DAILY_BONUS_COINS);
            events.push(GameEvent::BonusClaimed {
                coins: DAILY_BONUS_COINS,
            });
            sound(&mut events, SoundCue::Coin);
        }
        Action::Purchase { item_id } => {
            let item =
                shop_item_by_id(item_id).ok_or_else(|| Rejection::UnknownItem(item_id.clone()))?;
            if next.user.owns(item.id) {
                return Err(Rejection::AlreadyOwned(item_id.clone()));
            }
            charge(&mut next.user, item.cost)?;
            next.user.inventory.push(item.id.to_string());
            if let ShopKind::Avatar(slot) = item.kind {
                next.user.avatar.set_slot(slot, item.emoji);
            }
            events.push(GameEvent::Purchased {
                item_id: item.id.to_string(),
            });
            sound(&mut events, SoundCue::Coin);
        }
        Action::EquipAvatar { option_id } => {
            let option = avatar_option_by_id(option_id)
                .ok_or_else(|| Rejection::UnknownItem(option_id.clone()))?;
            if option.cost > 0 && !next.user.owns(option.id) {
                return Err(Rejection::NotOwned(option_id.clone()));
            }
            next.user.avatar.set_slot(option.slot, option.emoji);
            sound(&mut events, SoundCue::Click);
        }
        Action::PlaceBuilding {
            building_id,
            row,
            col,
        } => {
            let building = building_by_id(building_id)
                .ok_or_else(|| Rejection::UnknownItem(building_id.clone()))?;
            in_bounds(*row, *col)?;
            let have = next.badge_count();
            if !building.unlocked || have < building.required_badges {
                return Err(Rejection::Locked {
                    required: building.required_badges,
                    have,
                });
            }
            charge(&mut next.user, building.cost)?;
            next.city_grid.set(*row, *col, building.asset);
            sound(&mut events, SoundCue::Correct);
            check_badges = true;
        }
        Action::ClearTile { row, col } => {
            in_bounds(*row, *col)?;
            next.city_grid.set(*row, *col, "");
            sound(&mut events, SoundCue::Click);
        }
        Action::ClearCity => {
            next.city_grid.clear();
            sound(&mut events, SoundCue::Click);
        }
        Action::UpdateSettings(settings) => {
            next.settings = settings.clone();
        }
    }

    if check_badges {
        for badge in check_badge_eligibility(&next, now) {
            log::info!("Badge earned: {} {}", badge.emoji, badge.name);
            next.user.badges.push(badge.clone());
            events.push(GameEvent::BadgeEarned { badge });
        }
    }

    log::debug!("{:?} -> {} events", action, events.len());
    Ok(Transition {
        state: next,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use crate::sim::GameStore;
    use crate::sim::state::AvatarSlot;
    use proptest::prelude::any;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_792_139_400, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn apply(state: &GameState, action: Action) -> Transition {
        reduce(state, &action, now()).unwrap()
    }

    fn place(id: &str, row: usize, col: usize) -> Action {
        Action::PlaceBuilding {
            building_id: id.to_string(),
            row,
            col,
        }
    }

    fn buy(id: &str) -> Action {
        Action::Purchase {
            item_id: id.to_string(),
        }
    }

    fn sounds(events: &[GameEvent]) -> Vec<SoundCue> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sound { cue } => Some(*cue),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_correct_answer_rewards() {
        let t = apply(
            &GameState::default(),
            Action::RecordAnswer {
                subject: Subject::Mathematics,
                correct: true,
                xp: 50,
                coins: 10,
            },
        );
        let math = t.state.user.progress_for(Subject::Mathematics).unwrap();
        assert_eq!((math.correct_answers, math.total_questions), (1, 1));
        assert_eq!(t.state.user.xp, 50);
        assert_eq!(t.state.user.coins, 60);
        assert_eq!(t.state.user.stars, 1);
        assert_eq!(sounds(&t.events), vec![SoundCue::Correct]);
    }

    #[test]
    fn test_wrong_answer_counts_only_total() {
        let t = apply(
            &GameState::default(),
            Action::RecordAnswer {
                subject: Subject::LanguageArts,
                correct: false,
                xp: 50,
                coins: 10,
            },
        );
        let lang = t.state.user.progress_for(Subject::LanguageArts).unwrap();
        assert_eq!((lang.correct_answers, lang.total_questions), (0, 1));
        assert_eq!(t.state.user.xp, 0);
        assert_eq!(t.state.user.coins, 50);
        assert_eq!(sounds(&t.events), vec![SoundCue::Incorrect]);
    }

    #[test]
    fn test_level_up_event() {
        let mut state = GameState::default();
        state.user.xp = 1450;
        let t = apply(&state, Action::AwardPuzzle { xp: 50, coins: 10 });
        assert_eq!(t.state.user.level, 2);
        assert!(t.events.contains(&GameEvent::LeveledUp { level: 2 }));
        assert!(sounds(&t.events).contains(&SoundCue::LevelUp));
    }

    #[test]
    fn test_twentieth_math_answer_awards_math_star() {
        let mut state = GameState::default();
        let math = state.user.progress_entry(Subject::Mathematics);
        math.correct_answers = 19;
        math.total_questions = 19;
        let t = apply(
            &state,
            Action::RecordAnswer {
                subject: Subject::Mathematics,
                correct: true,
                xp: 0,
                coins: 0,
            },
        );
        assert!(t.state.user.has_badge("math-star"));
        let earned: Vec<_> = t
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BadgeEarned { .. }))
            .collect();
        assert_eq!(earned.len(), 1);
    }

    #[test]
    fn test_unaffordable_placement_changes_nothing() {
        let mut state = GameState::default();
        state.user.coins = 20;
        let err = reduce(&state, &place("park", 0, 0), now()).unwrap_err();
        assert_eq!(
            err,
            Rejection::InsufficientFunds {
                needed: 100,
                available: 20
            }
        );
        assert_eq!(err.cue(), Some(SoundCue::Incorrect));
        assert_eq!(state.user.coins, 20);
        assert!(state.city_grid.is_empty());
    }

    #[test]
    fn test_place_building() {
        let t = apply(&GameState::default(), place("tree", 3, 4));
        assert_eq!(t.state.user.coins, 30);
        assert_eq!(t.state.city_grid.get(3, 4), Some("/assets/tree.jpeg"));
        assert!(t.state.user.has_badge("city-builder"));

        // Second building overwrites, no second badge
        let t2 = apply(&t.state, place("road", 3, 4));
        assert_eq!(t2.state.city_grid.get(3, 4), Some("/assets/road.png"));
        assert_eq!(t2.state.user.coins, 20);
        assert!(!t2.events.iter().any(|e| matches!(e, GameEvent::BadgeEarned { .. })));
    }

    #[test]
    fn test_placement_rejections() {
        let mut state = GameState::default();
        state.user.coins = 1000;
        assert_eq!(
            reduce(&state, &place("school", 0, 0), now()),
            Err(Rejection::Locked {
                required: 5,
                have: 0
            })
        );
        assert_eq!(
            reduce(&state, &place("house", 10, 0), now()),
            Err(Rejection::OutOfBounds { row: 10, col: 0 })
        );
        assert_eq!(
            reduce(&state, &place("skyscraper", 0, 0), now()),
            Err(Rejection::UnknownItem("skyscraper".into()))
        );
    }

    #[test]
    fn test_clear_city_keeps_coins() {
        let mut state = GameState::default();
        state.user.coins = 500;
        let t = apply(&state, place("house", 0, 0));
        let t = apply(&t.state, place("park", 9, 9));
        let coins = t.state.user.coins;
        let cleared = apply(&t.state, Action::ClearCity);
        assert!(cleared.state.city_grid.is_empty());
        assert_eq!(cleared.state.city_grid.rows().len(), GRID_SIZE);
        assert_eq!(cleared.state.user.coins, coins);
        assert!(cleared.state.user.has_badge("city-builder"));
    }

    #[test]
    fn test_clear_tile_no_refund() {
        let t = apply(&GameState::default(), place("house", 1, 1));
        let t = apply(&t.state, Action::ClearTile { row: 1, col: 1 });
        assert_eq!(t.state.city_grid.get(1, 1), Some(""));
        assert_eq!(t.state.user.coins, 0);
    }

    #[test]
    fn test_purchase_paths() {
        let mut state = GameState::default();
        state.user.coins = 300;

        let t = apply(&state, buy("crown"));
        assert_eq!(t.state.user.coins, 150);
        assert!(t.state.user.owns("crown"));
        assert_eq!(t.state.user.avatar.accessories, "👑");

        // Second purchase is refused without charge or cue
        let err = reduce(&t.state, &buy("crown"), now()).unwrap_err();
        assert_eq!(err, Rejection::AlreadyOwned("crown".into()));
        assert_eq!(err.cue(), None);

        let err = reduce(&t.state, &buy("rocket"), now()).unwrap_err();
        assert!(matches!(err, Rejection::InsufficientFunds { needed: 500, .. }));

        let t = apply(&t.state, buy("fountain"));
        assert_eq!(t.state.user.coins, 0);
        assert!(t.state.user.owns("fountain"));
        assert_eq!(t.state.user.avatar.pet, "🐰");
    }

    #[test]
    fn test_equip_requires_ownership() {
        let state = GameState::default();
        let equip = |id: &str| Action::EquipAvatar {
            option_id: id.to_string(),
        };
        assert_eq!(
            reduce(&state, &equip("dragon"), now()),
            Err(Rejection::NotOwned("dragon".into()))
        );
        assert_eq!(
            reduce(&state, &equip("boy1"), now()),
            Err(Rejection::NotOwned("boy1".into()))
        );
        let t = apply(&state, equip("girl1"));
        assert_eq!(t.state.user.avatar.hair, "👧");
        let mut rich = state.clone();
        rich.user.inventory.push("dragon".into());
        let t = apply(&rich, equip("dragon"));
        assert_eq!(t.state.user.avatar.slot(AvatarSlot::Pet), "🐲");
        let t = apply(&t.state, equip("none"));
        assert_eq!(t.state.user.avatar.accessories, "");
    }

    #[test]
    fn test_login_streak() {
        let state = GameState::default();
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();

        let t = apply(&state, Action::RegisterLogin { today: day(1) });
        assert_eq!(t.state.game_history.streak_days, 1);
        let t = apply(&t.state, Action::RegisterLogin { today: day(2) });
        assert_eq!(t.state.game_history.streak_days, 2);
        // Same day again changes nothing
        let same = apply(&t.state, Action::RegisterLogin { today: day(2) });
        assert_eq!(same.state, t.state);
        // Gap resets
        let t = apply(&t.state, Action::RegisterLogin { today: day(5) });
        assert_eq!(t.state.game_history.streak_days, 1);
        assert_eq!(t.state.game_history.last_login, Some(day(5)));
    }

    #[test]
    fn test_seventh_day_earns_daily_player() {
        let mut state = GameState::default();
        for d in 1..=7 {
            let today = NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
            state = apply(&state, Action::RegisterLogin { today }).state;
        }
        assert_eq!(state.game_history.streak_days, 7);
        assert!(state.user.has_badge("daily-player"));
    }

    #[test]
    fn test_daily_bonus_once_per_day() {
        let state = GameState::default();
        let claim = Action::ClaimDailyBonus { today: today() };
        assert_eq!(reduce(&state, &claim, now()), Err(Rejection::BonusUnavailable));
        let t = apply(&state, Action::RegisterLogin { today: today() });
        assert_eq!(t.state.user.coins, 50);
        let t = apply(&t.state, claim.clone());
        assert_eq!(t.state.user.coins, 55);
        assert!(t.state.game_history.daily_bonus_claimed);
        assert_eq!(reduce(&t.state, &claim, now()), Err(Rejection::BonusUnavailable));
    }

    #[test]
    fn test_daily_bonus_follows_local_day() {
        // The caller's calendar day decides, not the UTC date of `now`
        let local = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let t = apply(&GameState::default(), Action::RegisterLogin { today: local });
        let t = apply(&t.state, Action::ClaimDailyBonus { today: local });
        assert_eq!(t.state.user.coins, 55);

        let t = apply(&GameState::default(), Action::RegisterLogin { today: local });
        assert_eq!(
            reduce(&t.state, &Action::ClaimDailyBonus { today: today() }, now()),
            Err(Rejection::BonusUnavailable)
        );
    }

    #[test]
    fn test_finish_game_counts() {
        let mut state = GameState::default();
        for _ in 0..10 {
            state = apply(&state, Action::FinishGame).state;
        }
        assert_eq!(state.user.total_games_played, 10);
        assert!(state.user.has_badge("puzzle-master"));
    }

    #[test]
    fn test_action_json_shape() {
        let json = r#"{"type":"placeBuilding","buildingId":"house","row":2,"col":3}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action, place("house", 2, 3));
        let json = serde_json::to_string(&Action::RegisterLogin { today: today() }).unwrap();
        assert!(json.contains(r#""today":"2026-10-16""#), "{}", json);
        let back: Action =
            serde_json::from_str(r#"{"type":"updateSettings","soundEnabled":false}"#).unwrap();
        assert!(matches!(back, Action::UpdateSettings(s) if !s.sound_enabled));
    }

    proptest! {
        #[test]
        fn prop_actions_keep_invariants(
            steps in proptest::collection::vec((0u8..9, any::<bool>(), 0usize..12, 0usize..12), 1..60)
        ) {
            let mut store = GameStore::load(MemoryStorage::new());
            for (kind, flag, row, col) in steps {
                let action = match kind {
                    0 => Action::RecordAnswer { subject: Subject::Mathematics, correct: flag, xp: 100, coins: 20 },
                    1 => Action::RecordAnswer { subject: Subject::LanguageArts, correct: flag, xp: 75, coins: 15 },
                    2 => place(if flag { "house" } else { "castle" }, row, col),
                    3 => Action::ClearTile { row, col },
                    4 => buy(if flag { "cat" } else { "crown" }),
                    5 => Action::FinishGame,
                    6 => Action::RegisterLogin { today: today() },
                    7 => Action::ClaimDailyBonus { today: today() },
                    _ => Action::ClearCity,
                };
                let before = store.state().clone();
                match store.apply(&action, now()) {
                    Ok(_) => {}
                    Err(rejection) => {
                        prop_assert_eq!(store.state(), &before);
                        if let Rejection::InsufficientFunds { needed, available } = rejection {
                            prop_assert_eq!(available, before.user.coins);
                            prop_assert!(available < needed);
                        }
                    }
                }
                prop_assert_eq!(&crate::persistence::load(store.storage()), store.state());
                let state = store.state();
                prop_assert!(state.user.xp >= before.user.xp);
                prop_assert!(state.city_grid.is_well_formed());
                prop_assert_eq!(state.user.level, crate::calculate_level(state.user.xp));
                for p in &state.user.progress {
                    prop_assert!(p.correct_answers <= p.total_questions);
                }
                let mut ids: Vec<_> = state.user.badges.iter().map(|b| b.id.clone()).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), state.user.badges.len());
            }
        }
    }
}
