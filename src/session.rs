//! One running game: store, injected services, timers and the active screen
//!
//! All mutation happens synchronously in an intent method or in `advance`,
//! which fires feedback-window timers. Leaving a screen cancels its timers.

use rand::SeedableRng;
use chrono::NaiveDate;
use rand_pcg::Pcg32;
use serde::Deserialize;

use crate::audio::{AudioSink, SoundCue};
use crate::content::PuzzleKind;
use crate::platform::{Clock, Storage, TimerQueue};
use crate::screens::{
    AvatarEditor, Effects, KeypadSession, ProgressReport, PuzzleSession, QuizSession, Screen,
    ScreenView, Tile, TimerEvent, WorldEditor,
};
use crate::sim::{Action, GameEvent, GameState, GameStore, Rejection};
use crate::tuning::Tuning;

/// Transient state of the screen on display
#[derive(Debug, Clone)]
pub enum ActiveScreen {
    Menu,
    Quiz(QuizSession),
    Keypad(KeypadSession),
    Puzzles(PuzzleSession),
    Avatar(AvatarEditor),
    World(WorldEditor),
    Shop,
    Progress,
}

impl ActiveScreen {
    pub fn kind(&self) -> Screen {
        match self {
            ActiveScreen::Menu => Screen::Menu,
            ActiveScreen::Quiz(_) => Screen::Quiz,
            ActiveScreen::Keypad(_) => Screen::Keypad,
            ActiveScreen::Puzzles(_) => Screen::Puzzles,
            ActiveScreen::Avatar(_) => Screen::Avatar,
            ActiveScreen::World(_) => Screen::World,
            ActiveScreen::Shop => Screen::Shop,
            ActiveScreen::Progress => Screen::Progress,
        }
    }

    pub fn view(&self, state: &GameState, today: NaiveDate) -> ScreenView {
        match self {
            ActiveScreen::Menu => ScreenView::menu(state, today),
            ActiveScreen::Quiz(q) => ScreenView::quiz(q),
            ActiveScreen::Keypad(k) => ScreenView::keypad(k),
            ActiveScreen::Puzzles(p) => ScreenView::puzzles(p),
            ActiveScreen::Avatar(a) => ScreenView::avatar(a, state),
            ActiveScreen::World(w) => ScreenView::world(w, state),
            ActiveScreen::Shop => ScreenView::shop(state),
            ActiveScreen::Progress => ScreenView::progress(state),
        }
    }
}

/// A player interaction, as sent by the page
///
/// JSON form: `{"type": "answerQuiz", "choice": 2}`. Intents aimed at a
/// screen that is not on display do nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    ClaimDailyBonus,
    Purchase { item_id: String },
    ToggleSound,
    ToggleNightMode,
    AnswerQuiz { choice: usize },
    RestartQuiz,
    PressDigit { digit: u8 },
    PressMinus,
    Backspace,
    ClearInput,
    SetInput { text: String },
    SubmitKeypad,
    SwitchPuzzle { kind: PuzzleKind },
    SelectTile { tile: Tile },
    SubmitSpelling { guess: String },
    SubmitFillBlank { guess: String },
    SelectAvatarOption { option_id: String },
    SaveAvatar,
    ResetAvatar,
    SelectBuilding { building_id: String },
    TapTile { row: usize, col: usize },
    EraseTile { row: usize, col: usize },
    ClearCity,
}

pub struct Session<S: Storage, A: AudioSink, C: Clock> {
    store: GameStore<S>,
    audio: A,
    clock: C,
    rng: Pcg32,
    tuning: Tuning,
    timers: TimerQueue<TimerEvent>,
    screen: ActiveScreen,
}

impl<S: Storage, A: AudioSink, C: Clock> Session<S, A, C> {
    pub fn new(storage: S, audio: A, clock: C, tuning: Tuning, seed: u64) -> Self {
        Self {
            store: GameStore::load(storage),
            audio,
            clock,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            timers: TimerQueue::new(),
            screen: ActiveScreen::Menu,
        }
    }

    /// Register today's login
    pub fn start(&mut self) -> Vec<GameEvent> {
        let today = self.clock.today();
        self.dispatch(Action::RegisterLogin { today })
            .unwrap_or_default()
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn store(&self) -> &GameStore<S> {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    /// Snapshot of the screen on display
    pub fn view(&self) -> ScreenView {
        self.screen.view(self.store.state(), self.clock.today())
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn play(&self, cue: SoundCue) {
        if self.store.state().settings.sound_enabled {
            self.audio.play(cue);
        }
    }

    /// Reduce an action into the store and play the cues it produced
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<GameEvent>, Rejection> {
        match self.store.apply(&action, self.clock.now()) {
            Ok(events) => {
                for event in &events {
                    if let GameEvent::Sound { cue } = event {
                        self.play(*cue);
                    }
                }
                Ok(events)
            }
            Err(rejection) => {
                if let Some(cue) = rejection.cue() {
                    self.play(cue);
                }
                Err(rejection)
            }
        }
    }

    /// Carry out what a screen asked for
    fn run(&mut self, fx: Effects) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for action in fx.actions {
            // Rejections were already logged and cued
            if let Ok(mut more) = self.dispatch(action) {
                events.append(&mut more);
            }
        }
        for cue in fx.cues {
            self.play(cue);
        }
        if let Some(d) = fx.deferred {
            self.timers.schedule(self.clock.now_ms(), d.delay_ms, d.event);
        }
        events
    }

    /// Switch screens, cancelling every pending timer
    pub fn navigate(&mut self, screen: Screen) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::debug!("Cancelled {} timers leaving {:?}", cancelled, self.screen.kind());
        }
        let state = self.store.state();
        self.screen = match screen {
            Screen::Menu => ActiveScreen::Menu,
            Screen::Quiz => ActiveScreen::Quiz(QuizSession::new(state, &self.tuning, &mut self.rng)),
            Screen::Keypad => {
                ActiveScreen::Keypad(KeypadSession::new(state, &self.tuning, &mut self.rng))
            }
            Screen::Puzzles => ActiveScreen::Puzzles(PuzzleSession::new(&self.tuning, &mut self.rng)),
            Screen::Avatar => ActiveScreen::Avatar(AvatarEditor::new(state)),
            Screen::World => ActiveScreen::World(WorldEditor::new()),
            Screen::Shop => ActiveScreen::Shop,
            Screen::Progress => ActiveScreen::Progress,
        };
        self.play(SoundCue::Click);
        log::debug!("Screen: {:?}", screen);
    }

    /// Fire every timer due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for event in self.timers.drain_due(now_ms) {
            let state = self.store.state();
            let fx = match (&mut self.screen, event) {
                (ActiveScreen::Quiz(quiz), TimerEvent::NextQuestion) => {
                    quiz.advance(state, &mut self.rng)
                }
                (ActiveScreen::Keypad(keypad), TimerEvent::NextEquation) => {
                    keypad.advance(state, &mut self.rng)
                }
                (ActiveScreen::Puzzles(puzzles), TimerEvent::ClearSelection) => {
                    puzzles.clear_selection();
                    Effects::none()
                }
                (screen, event) => {
                    log::warn!("Stale timer {:?} on {:?}", event, screen.kind());
                    Effects::none()
                }
            };
            events.extend(self.run(fx));
        }
        events
    }

    /// Fire timers due at the clock's current time
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        self.advance(now)
    }

    /// Route one page interaction to its screen
    pub fn perform(&mut self, intent: Intent) -> Result<Vec<GameEvent>, Rejection> {
        let events = match intent {
            Intent::ClaimDailyBonus => return self.claim_daily_bonus(),
            Intent::Purchase { item_id } => return self.purchase(&item_id),
            Intent::ToggleSound => self.toggle_sound(),
            Intent::ToggleNightMode => self.toggle_night_mode(),
            Intent::AnswerQuiz { choice } => self.answer_quiz(choice),
            Intent::RestartQuiz => {
                self.restart_quiz();
                Vec::new()
            }
            Intent::PressDigit { digit } => self.edit_keypad(|k| k.press_digit(digit)),
            Intent::PressMinus => self.edit_keypad(KeypadSession::press_minus),
            Intent::Backspace => self.edit_keypad(KeypadSession::backspace),
            Intent::ClearInput => self.edit_keypad(KeypadSession::clear_input),
            Intent::SetInput { text } => self.edit_keypad(|k| k.set_input(&text)),
            Intent::SubmitKeypad => self.submit_keypad(),
            Intent::SwitchPuzzle { kind } => self.switch_puzzle(kind),
            Intent::SelectTile { tile } => self.select_tile(tile),
            Intent::SubmitSpelling { guess } => self.submit_spelling(&guess),
            Intent::SubmitFillBlank { guess } => self.submit_fill_blank(&guess),
            Intent::SelectAvatarOption { option_id } => self.select_avatar_option(&option_id),
            Intent::SaveAvatar => self.save_avatar(),
            Intent::ResetAvatar => self.reset_avatar(),
            Intent::SelectBuilding { building_id } => self.select_building(&building_id),
            Intent::TapTile { row, col } => self.tap_tile(row, col),
            Intent::EraseTile { row, col } => self.erase_tile(row, col),
            Intent::ClearCity => self.clear_city(),
        };
        Ok(events)
    }

    fn edit_keypad(&mut self, edit: impl FnOnce(&mut KeypadSession)) -> Vec<GameEvent> {
        if let Some(keypad) = self.keypad_mut() {
            edit(keypad);
        }
        Vec::new()
    }

    // Menu and shop

    pub fn claim_daily_bonus(&mut self) -> Result<Vec<GameEvent>, Rejection> {
        let today = self.clock.today();
        self.dispatch(Action::ClaimDailyBonus { today })
    }

    pub fn purchase(&mut self, item_id: &str) -> Result<Vec<GameEvent>, Rejection> {
        self.dispatch(Action::Purchase {
            item_id: item_id.to_string(),
        })
    }

    pub fn toggle_sound(&mut self) -> Vec<GameEvent> {
        let settings = self.state().settings.toggled_sound();
        self.dispatch(Action::UpdateSettings(settings))
            .unwrap_or_default()
    }

    pub fn toggle_night_mode(&mut self) -> Vec<GameEvent> {
        let settings = self.state().settings.toggled_night_mode();
        self.dispatch(Action::UpdateSettings(settings))
            .unwrap_or_default()
    }

    pub fn progress_report(&self) -> ProgressReport {
        ProgressReport::new(self.state())
    }

    // Quiz

    pub fn quiz(&self) -> Option<&QuizSession> {
        match &self.screen {
            ActiveScreen::Quiz(q) => Some(q),
            _ => None,
        }
    }

    pub fn answer_quiz(&mut self, choice: usize) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Quiz(q) => q.answer(choice),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn restart_quiz(&mut self) {
        self.timers.cancel_all();
        let state = self.store.state();
        if let ActiveScreen::Quiz(q) = &mut self.screen {
            q.restart(state, &mut self.rng);
        }
    }

    // Keypad

    pub fn keypad(&self) -> Option<&KeypadSession> {
        match &self.screen {
            ActiveScreen::Keypad(k) => Some(k),
            _ => None,
        }
    }

    /// Input editing (digits, minus, backspace) goes straight to the buffer
    pub fn keypad_mut(&mut self) -> Option<&mut KeypadSession> {
        match &mut self.screen {
            ActiveScreen::Keypad(k) => Some(k),
            _ => None,
        }
    }

    pub fn submit_keypad(&mut self) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Keypad(k) => k.submit(),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    // Puzzles

    pub fn puzzles(&self) -> Option<&PuzzleSession> {
        match &self.screen {
            ActiveScreen::Puzzles(p) => Some(p),
            _ => None,
        }
    }

    pub fn switch_puzzle(&mut self, kind: PuzzleKind) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Puzzles(p) => p.switch(kind),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn select_tile(&mut self, tile: Tile) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Puzzles(p) => p.select(tile, &mut self.rng),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn submit_spelling(&mut self, guess: &str) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Puzzles(p) => p.submit_spelling(guess, &mut self.rng),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn submit_fill_blank(&mut self, guess: &str) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Puzzles(p) => p.submit_fill_blank(guess, &mut self.rng),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    // Avatar

    pub fn avatar(&self) -> Option<&AvatarEditor> {
        match &self.screen {
            ActiveScreen::Avatar(a) => Some(a),
            _ => None,
        }
    }

    pub fn select_avatar_option(&mut self, option_id: &str) -> Vec<GameEvent> {
        let state = self.store.state();
        let fx = match &mut self.screen {
            ActiveScreen::Avatar(a) => a.select(state, option_id),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn save_avatar(&mut self) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Avatar(a) => a.save(),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn reset_avatar(&mut self) -> Vec<GameEvent> {
        let fx = match &mut self.screen {
            ActiveScreen::Avatar(a) => a.reset(),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    // World

    pub fn world(&self) -> Option<&WorldEditor> {
        match &self.screen {
            ActiveScreen::World(w) => Some(w),
            _ => None,
        }
    }

    pub fn select_building(&mut self, building_id: &str) -> Vec<GameEvent> {
        let state = self.store.state();
        let fx = match &mut self.screen {
            ActiveScreen::World(w) => w.select(state, building_id),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn tap_tile(&mut self, row: usize, col: usize) -> Vec<GameEvent> {
        let fx = match &self.screen {
            ActiveScreen::World(w) => w.tap(row, col),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn erase_tile(&mut self, row: usize, col: usize) -> Vec<GameEvent> {
        let fx = match &self.screen {
            ActiveScreen::World(w) => w.erase(row, col),
            _ => return Vec::new(),
        };
        self.run(fx)
    }

    pub fn clear_city(&mut self) -> Vec<GameEvent> {
        let fx = match &self.screen {
            ActiveScreen::World(w) => w.clear_city(),
            _ => return Vec::new(),
        };
        self.run(fx)
    }
}
