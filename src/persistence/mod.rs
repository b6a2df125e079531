//! Save/load of the game state document
//!
//! Loading never fails:
//! - missing entry or unparsable JSON → default state
//! - each field that fails to decode → that field's default
//! - list fields drop unreadable entries (see `lenient`)
//! - wrong-shaped city grid → empty grid

pub mod lenient;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::consts::STORAGE_KEY;
use crate::platform::{Storage, StorageError};
use crate::sim::GameState;

/// Decode a stored document, repairing whatever is broken
pub fn decode(json: &str) -> GameState {
    let root = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            log::warn!("Saved game is not a JSON object; starting fresh");
            return GameState::default();
        }
    };

    let mut state = GameState {
        user: section(&root, "user"),
        city_grid: section(&root, "cityGrid"),
        settings: section(&root, "settings"),
        game_history: section(&root, "gameHistory"),
    };
    state.normalize();
    state
}

fn section<T: Serialize + DeserializeOwned + Default>(root: &Map<String, Value>, key: &str) -> T {
    root.get(key).map(lenient::fields).unwrap_or_default()
}

pub fn encode(state: &GameState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(state)?)
}

/// Load the game state from storage
pub fn load<S: Storage + ?Sized>(storage: &S) -> GameState {
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(json)) => {
            let state = decode(&json);
            log::info!(
                "Loaded game for {} (level {}, {} coins)",
                state.user.name,
                state.user.level,
                state.user.coins
            );
            state
        }
        Ok(None) => {
            log::info!("No saved game found, starting fresh");
            GameState::default()
        }
        Err(e) => {
            log::warn!("Could not read saved game: {}", e);
            GameState::default()
        }
    }
}

/// Write the game state to storage
pub fn save<S: Storage + ?Sized>(storage: &S, state: &GameState) -> Result<(), StorageError> {
    let json = encode(state)?;
    storage.set_item(STORAGE_KEY, &json)?;
    log::debug!("Game saved ({} bytes)", json.len());
    Ok(())
}

/// Remove the saved game entirely
pub fn clear<S: Storage + ?Sized>(storage: &S) -> Result<(), StorageError> {
    storage.remove_item(STORAGE_KEY)?;
    log::info!("Saved game cleared");
    Ok(())
}
