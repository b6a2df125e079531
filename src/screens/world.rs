//! City builder palette and tile taps

use std::fmt;

use super::Effects;
use crate::audio::SoundCue;
use crate::content::Building;
use crate::content::catalog::{BUILDINGS, building_by_id};
use crate::sim::{Action, GameState};

/// Whether a palette entry can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Locked,
    NeedBadges(u32),
    NotEnoughCoins,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Locked => write!(f, "Locked"),
            Availability::NeedBadges(n) => write!(f, "Need {} badges", n),
            Availability::NotEnoughCoins => write!(f, "Not enough coins"),
        }
    }
}

pub fn availability(state: &GameState, building: &Building) -> Availability {
    if !building.unlocked {
        Availability::Locked
    } else if building.required_badges > state.badge_count() {
        Availability::NeedBadges(building.required_badges)
    } else if state.user.coins < building.cost {
        Availability::NotEnoughCoins
    } else {
        Availability::Available
    }
}

/// Every building with its current availability
pub fn palette(state: &GameState) -> Vec<(&'static Building, Availability)> {
    BUILDINGS
        .iter()
        .map(|b| (b, availability(state, b)))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct WorldEditor {
    selected: Option<&'static Building>,
}

impl WorldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&'static Building> {
        self.selected
    }

    /// Pick a building; locked ones cannot be picked, coins are checked on placement
    pub fn select(&mut self, state: &GameState, building_id: &str) -> Effects {
        let Some(building) = building_by_id(building_id) else {
            return Effects::none();
        };
        match availability(state, building) {
            Availability::Locked | Availability::NeedBadges(_) => Effects::none(),
            _ => {
                self.selected = Some(building);
                Effects::none().cue(SoundCue::Click)
            }
        }
    }

    /// Place the selected building
    pub fn tap(&self, row: usize, col: usize) -> Effects {
        match self.selected {
            Some(b) => Effects::none().dispatch(Action::PlaceBuilding {
                building_id: b.id.to_string(),
                row,
                col,
            }),
            None => Effects::none(),
        }
    }

    pub fn erase(&self, row: usize, col: usize) -> Effects {
        Effects::none().dispatch(Action::ClearTile { row, col })
    }

    pub fn clear_city(&self) -> Effects {
        Effects::none().dispatch(Action::ClearCity)
    }

    pub fn status(&self) -> String {
        match self.selected {
            Some(b) => format!("Selected: {} ({} coins)", b.name, b.cost),
            None => "Select a building from the palette!".to_string(),
        }
    }
}
