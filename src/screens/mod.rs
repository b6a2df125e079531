//! Per-screen transient state
//!
//! A screen never touches the store. Each interaction returns `Effects`:
//! actions to dispatch, cues to play directly, and at most one deferred step.
//! The session runs them and routes timer events back to the screen.

pub mod avatar;
pub mod keypad;
pub mod progress;
pub mod puzzles;
pub mod quiz;
pub mod view;
pub mod world;

use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::sim::Action;

pub use avatar::AvatarEditor;
pub use keypad::KeypadSession;
pub use progress::ProgressReport;
pub use puzzles::{PuzzleSession, Tile};
pub use quiz::QuizSession;
pub use view::ScreenView;
pub use world::{Availability, WorldEditor};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Menu,
    Quiz,
    Keypad,
    Puzzles,
    Avatar,
    World,
    Shop,
    Progress,
}

/// Deferred screen steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Quiz feedback window over
    NextQuestion,
    /// Keypad feedback window over
    NextEquation,
    /// Matching selection shown long enough
    ClearSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay_ms: u64,
    pub event: TimerEvent,
}

/// What one interaction asks the session to do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub actions: Vec<Action>,
    pub cues: Vec<SoundCue>,
    pub deferred: Option<Deferred>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn dispatch(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn cue(mut self, cue: SoundCue) -> Self {
        self.cues.push(cue);
        self
    }

    pub fn after(mut self, delay_ms: u64, event: TimerEvent) -> Self {
        self.deferred = Some(Deferred { delay_ms, event });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.cues.is_empty() && self.deferred.is_none()
    }
}

/// Message shown after an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}
