//! Avatar customizer with an unsaved preview

use super::Effects;
use crate::audio::SoundCue;
use crate::content::AvatarOption;
use crate::content::catalog::avatar_option_by_id;
use crate::sim::{Action, Avatar, GameState, User};

pub fn is_owned(user: &User, option: &AvatarOption) -> bool {
    option.cost == 0 || user.owns(option.id)
}

#[derive(Debug, Clone)]
pub struct AvatarEditor {
    saved: Avatar,
    preview: Avatar,
    /// Options picked since the last save, in order
    picks: Vec<&'static AvatarOption>,
}

impl AvatarEditor {
    pub fn new(state: &GameState) -> Self {
        Self {
            saved: state.user.avatar.clone(),
            preview: state.user.avatar.clone(),
            picks: Vec::new(),
        }
    }

    pub fn preview(&self) -> &Avatar {
        &self.preview
    }

    pub fn is_selected(&self, option: &AvatarOption) -> bool {
        self.preview.slot(option.slot) == option.emoji
    }

    pub fn has_changes(&self) -> bool {
        self.preview != self.saved
    }

    /// Try an option on; locked options are refused with a cue
    pub fn select(&mut self, state: &GameState, option_id: &str) -> Effects {
        let Some(option) = avatar_option_by_id(option_id) else {
            return Effects::none();
        };
        if !is_owned(&state.user, option) {
            return Effects::none().cue(SoundCue::Incorrect);
        }
        self.preview.set_slot(option.slot, option.emoji);
        self.picks.retain(|p| p.slot != option.slot);
        self.picks.push(option);
        Effects::none().cue(SoundCue::Click)
    }

    /// Commit the preview as equip actions
    pub fn save(&mut self) -> Effects {
        let mut fx = Effects::none().cue(SoundCue::Correct);
        for option in self.picks.drain(..) {
            fx = fx.dispatch(Action::EquipAvatar {
                option_id: option.id.to_string(),
            });
        }
        self.saved = self.preview.clone();
        fx
    }

    /// Back to the saved avatar
    pub fn reset(&mut self) -> Effects {
        self.preview = self.saved.clone();
        self.picks.clear();
        Effects::none().cue(SoundCue::Click)
    }
}
