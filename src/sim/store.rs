//! The single game-state record and its persistence

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::persistence;
use crate::platform::{Storage, StorageError};
use crate::settings::Settings;
use crate::sim::rules::{Action, GameEvent, Rejection, Transition, reduce};
use crate::sim::state::{CityGrid, GameHistory, GameState, User};

/// Top-level replacement: every present section replaces the old one whole
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatePatch {
    pub user: Option<User>,
    pub city_grid: Option<CityGrid>,
    pub settings: Option<Settings>,
    pub game_history: Option<GameHistory>,
}

impl GameStatePatch {
    fn apply_to(self, state: &mut GameState) {
        if let Some(user) = self.user {
            state.user = user;
        }
        if let Some(grid) = self.city_grid {
            state.city_grid = grid;
        }
        if let Some(settings) = self.settings {
            state.settings = settings;
        }
        if let Some(history) = self.game_history {
            state.game_history = history;
        }
    }
}

/// Owns the game state and writes it through to storage after each change
pub struct GameStore<S: Storage> {
    storage: S,
    state: GameState,
    /// Memory is ahead of storage
    dirty: bool,
}

impl<S: Storage> GameStore<S> {
    pub fn load(storage: S) -> Self {
        let state = persistence::load(&storage);
        Self {
            storage,
            state,
            dirty: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the state with `f(previous)`, repair it, and persist
    pub fn update<F>(&mut self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&GameState) -> GameState,
    {
        let mut next = f(&self.state);
        next.normalize();
        self.state = next;
        self.flush()
    }

    /// Shallow merge of top-level sections
    pub fn patch(&mut self, patch: GameStatePatch) -> Result<(), StorageError> {
        self.update(|prev| {
            let mut next = prev.clone();
            patch.apply_to(&mut next);
            next
        })
    }

    /// Reduce `action` into the state; a failed write is logged and retried
    /// on the next change
    pub fn apply(
        &mut self,
        action: &Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>, Rejection> {
        let Transition { state, events } = reduce(&self.state, action, now).inspect_err(|r| {
            log::warn!("Rejected {:?}: {}", action, r);
        })?;
        // Already logged by flush
        let _ = self.update(|_| state);
        Ok(events)
    }

    /// Write the current state
    pub fn flush(&mut self) -> Result<(), StorageError> {
        match persistence::save(&self.storage, &self.state) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save game: {}", e);
                self.dirty = true;
                Err(e)
            }
        }
    }

    /// Forget everything and start over
    pub fn reset(&mut self) -> Result<(), StorageError> {
        persistence::clear(&self.storage)?;
        self.update(|_| GameState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_SIZE, STORAGE_KEY};
    use crate::platform::MemoryStorage;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_792_139_400, 0).unwrap()
    }

    #[test]
    fn test_load_missing_is_default() {
        let store = GameStore::load(MemoryStorage::new());
        assert_eq!(store.state(), &GameState::default());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_update_persists() {
        let storage = MemoryStorage::new();
        let mut store = GameStore::load(&storage);
        store
            .update(|prev| {
                let mut next = prev.clone();
                next.user.name = "Ada".into();
                next
            })
            .unwrap();
        let reloaded = GameStore::load(&storage);
        assert_eq!(reloaded.state().user.name, "Ada");
    }

    #[test]
    fn test_update_repairs_grid_and_level() {
        let mut store = GameStore::load(MemoryStorage::new());
        store
            .update(|prev| {
                let mut next = prev.clone();
                next.city_grid = CityGrid::from_rows(vec![vec!["x".into(); 3]; 3]);
                next.user.xp = 4600;
                next
            })
            .unwrap();
        assert_eq!(store.state().city_grid.rows().len(), GRID_SIZE);
        assert!(store.state().city_grid.rows().iter().all(|r| r.len() == GRID_SIZE));
        assert_eq!(store.state().user.level, 4);
    }

    #[test]
    fn test_small_grid_on_load_becomes_empty() {
        let json = r#"{"cityGrid":[["a","b","c"],["d","e","f"],["g","h","i"]],"user":{"coins":7}}"#;
        let store = GameStore::load(MemoryStorage::with_item(STORAGE_KEY, json));
        assert!(store.state().city_grid.is_empty());
        assert_eq!(store.state().city_grid.rows().len(), GRID_SIZE);
        assert_eq!(store.state().user.coins, 7);
    }

    #[test]
    fn test_patch_replaces_sections_whole() {
        let mut store = GameStore::load(MemoryStorage::new());
        store
            .update(|prev| {
                let mut next = prev.clone();
                next.settings.sound_enabled = false;
                next
            })
            .unwrap();
        let patch: GameStatePatch =
            serde_json::from_str(r#"{"settings":{"nightMode":true}}"#).unwrap();
        store.patch(patch).unwrap();
        assert!(store.state().settings.night_mode);
        // Missing keys inside the section fall back to defaults, not old values
        assert!(store.state().settings.sound_enabled);
        assert_eq!(store.state().user, User::default());
    }

    #[test]
    fn test_failed_write_keeps_memory_ahead() {
        let storage = MemoryStorage::new();
        let mut store = GameStore::load(&storage);
        storage.set_fail_writes(true);

        let events = store.apply(&Action::FinishGame, now()).unwrap();
        assert!(events.is_empty());
        assert_eq!(store.state().user.total_games_played, 1);
        assert!(store.is_dirty());
        assert!(storage.is_empty());

        storage.set_fail_writes(false);
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(GameStore::load(&storage).state().user.total_games_played, 1);
    }

    #[test]
    fn test_rejected_action_not_saved() {
        let storage = MemoryStorage::new();
        let mut store = GameStore::load(&storage);
        let err = store
            .apply(
                &Action::Purchase {
                    item_id: "rocket".into(),
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, Rejection::InsufficientFunds { .. }));
        assert!(storage.is_empty());
        assert_eq!(store.state().user.coins, 50);
    }

    #[test]
    fn test_reset() {
        let storage = MemoryStorage::new();
        let mut store = GameStore::load(&storage);
        store.apply(&Action::FinishGame, now()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.state(), &GameState::default());
    }
}
