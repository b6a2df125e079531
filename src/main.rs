//! LearnQuest entry point
//!
//! In the browser this exposes a small JSON API to the page; natively it
//! plays a scripted session against a save file so the rules can be
//! exercised without a UI.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use learnquest::audio::WebAudio;
    use learnquest::platform::{LocalStorage, SystemClock};
    use learnquest::screens::Screen;
    use learnquest::sim::Action;
    use learnquest::{Intent, Session, Tuning};

    type WebSession = Session<LocalStorage, WebAudio, SystemClock>;

    thread_local! {
        static APP: RefCell<Option<WebSession>> = const { RefCell::new(None) };
    }

    fn with_session<T>(f: impl FnOnce(&mut WebSession) -> T) -> Result<T, JsValue> {
        APP.with(|app| {
            app.borrow_mut()
                .as_mut()
                .map(f)
                .ok_or_else(|| JsValue::from_str("LearnQuest not booted"))
        })
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("LearnQuest starting...");
    }

    /// Load the saved game and register today's login
    #[wasm_bindgen]
    pub fn boot() -> Result<String, JsValue> {
        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut session = Session::new(storage, WebAudio::new(), SystemClock, Tuning::default(), seed);
        let events = session.start();
        APP.with(|app| *app.borrow_mut() = Some(session));
        to_json(&events)
    }

    /// Current game state document
    #[wasm_bindgen]
    pub fn state_json() -> Result<String, JsValue> {
        with_session(|s| to_json(s.state()))?
    }

    /// Apply a JSON action; returns the events, or throws the rejection message
    #[wasm_bindgen]
    pub fn dispatch_json(action: &str) -> Result<String, JsValue> {
        let action: Action =
            serde_json::from_str(action).map_err(|e| JsValue::from_str(&e.to_string()))?;
        with_session(|s| s.dispatch(action))?
            .map_err(|r| JsValue::from_str(&r.to_string()))
            .and_then(|events| to_json(&events))
    }

    /// Switch screens by name ("quiz", "keypad", "puzzles", ...)
    #[wasm_bindgen]
    pub fn navigate(screen: &str) -> Result<(), JsValue> {
        let screen: Screen = serde_json::from_value(serde_json::Value::from(screen))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        with_session(|s| s.navigate(screen))
    }

    /// Snapshot of the screen on display
    #[wasm_bindgen]
    pub fn screen_json() -> Result<String, JsValue> {
        with_session(|s| to_json(&s.view()))?
    }

    /// Apply a JSON screen intent; returns the events, or throws the rejection message
    #[wasm_bindgen]
    pub fn perform_json(intent: &str) -> Result<String, JsValue> {
        let intent: Intent =
            serde_json::from_str(intent).map_err(|e| JsValue::from_str(&e.to_string()))?;
        with_session(|s| s.perform(intent))?
            .map_err(|r| JsValue::from_str(&r.to_string()))
            .and_then(|events| to_json(&events))
    }

    /// Fire feedback timers that are due now; safe to call every frame
    #[wasm_bindgen]
    pub fn tick() -> Result<String, JsValue> {
        with_session(|s| to_json(&s.tick()))?
    }

    /// Fire timers due at `now_ms`, in milliseconds since the Unix epoch (`Date.now()`)
    #[wasm_bindgen]
    pub fn advance(now_ms: f64) -> Result<String, JsValue> {
        with_session(|s| to_json(&s.advance(now_ms.max(0.0) as u64)))?
    }

    /// Printable progress report
    #[wasm_bindgen]
    pub fn progress_report() -> Result<String, JsValue> {
        with_session(|s| s.progress_report().printable())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use learnquest::audio::NullAudio;
    use learnquest::hardware::{HardwareBridge, WriterLink};
    use learnquest::platform::{Clock, FileStorage, FixedClock, SystemClock};
    use learnquest::screens::{Screen, Tile};
    use learnquest::sim::GameEvent;
    use learnquest::{Session, Tuning};

    fn report(label: &str, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BadgeEarned { badge } => {
                    log::info!("{}: badge {} {}", label, badge.emoji, badge.name)
                }
                GameEvent::LeveledUp { level } => log::info!("{}: level {}", label, level),
                _ => {}
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let tuning = args
            .next()
            .map(|p| Tuning::load_file(&PathBuf::from(p)))
            .unwrap_or_default();
        let data_dir =
            std::env::var("LEARNQUEST_DATA").unwrap_or_else(|_| "learnquest-data".to_string());

        // Replayed time so feedback windows pass instantly
        let clock = FixedClock::new(SystemClock.now());
        let seed = clock.now_ms();
        let mut session = Session::new(FileStorage::new(&data_dir), NullAudio, &clock, tuning, seed);
        let mut controller = HardwareBridge::new();
        controller.connect(WriterLink::new(std::io::stdout()));

        report("login", &session.start());
        if session.claim_daily_bonus().is_ok() {
            log::info!("Daily bonus claimed");
        }

        session.navigate(Screen::Quiz);
        while session.quiz().is_some_and(|q| !q.is_complete()) {
            let Some(quiz) = session.quiz() else { break };
            let choice = quiz.question().correct_answer;
            log::info!("Q{}: {}", quiz.number(), quiz.question().question);
            let events = session.answer_quiz(choice);
            controller.react(&events);
            report("quiz", &events);
            clock.advance_ms(session.tuning().quiz_feedback_ms as i64);
            report("quiz", &session.tick());
        }

        session.navigate(Screen::Keypad);
        while session.keypad().is_some_and(|k| !k.is_complete()) {
            let Some(keypad) = session.keypad_mut() else { break };
            let answer = keypad.equation().answer;
            log::info!("{}", keypad.equation().equation);
            keypad.set_input(&answer.to_string());
            let events = session.submit_keypad();
            controller.react(&events);
            report("keypad", &events);
            clock.advance_ms(session.tuning().keypad_feedback_ms as i64);
            report("keypad", &session.tick());
        }

        session.navigate(Screen::Puzzles);
        for i in 0..learnquest::content::puzzles::MATCHING_PAIRS.len() {
            session.select_tile(Tile::Word(i));
            report("matching", &session.select_tile(Tile::Icon(i)));
            clock.advance_ms(session.tuning().matching_reset_ms as i64);
            session.tick();
        }

        session.navigate(Screen::World);
        session.select_building("house");
        report("world", &session.tap_tile(0, 0));

        session.navigate(Screen::Progress);
        println!("{}", session.progress_report().printable());
        controller.disconnect();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("LearnQuest (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
