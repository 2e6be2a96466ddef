//! Browser entry point
//!
//! JavaScript owns the animation frame loop and drawing. It forwards key
//! events and frame timestamps here and reads back JSON snapshots.

use wasm_bindgen::prelude::*;

use crate::display::{Display, DisplayError};
use crate::levels::GAME_LEVELS;
use crate::runner::FrameClock;
use crate::session::{Progress, Session};
use crate::settings::Settings;
use crate::sim::{Control, Input, State, is_pause_key};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Just Jump starting...");
}

/// Keeps the latest snapshot as JSON for the page to draw
#[derive(Default)]
struct JsonDisplay {
    snapshot: String,
}

impl Display for JsonDisplay {
    fn sync_state(&mut self, state: &State) -> Result<(), DisplayError> {
        self.snapshot = serde_json::to_string(&state.snapshot())
            .map_err(|e| DisplayError(e.to_string()))?;
        Ok(())
    }

    fn clear(&mut self) {
        self.snapshot.clear();
    }
}

/// A game session driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: Input,
    clock: FrameClock,
    display: JsonDisplay,
}

#[wasm_bindgen]
impl WebGame {
    /// Start the built-in levels; a zero seed picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<WebGame, JsValue> {
        let settings = Settings::load();
        let seed = match (settings.seed, seed) {
            (Some(seed), _) => seed,
            (None, 0) => js_sys::Date::now() as u64,
            (None, seed) => seed as u64,
        };
        let clock = FrameClock::new(settings.max_frame_step_ms);
        let session = Session::new(GAME_LEVELS, settings, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(WebGame {
            session,
            input: Input::default(),
            clock,
            display: JsonDisplay::default(),
        })
    }

    /// Forward a keydown; returns true when the key was used
    pub fn key_down(&mut self, key: &str) -> bool {
        if is_pause_key(key) {
            self.session.toggle_pause();
            // Resume without a jump over the paused time
            self.clock.reset();
            return true;
        }
        match Control::from_key(key) {
            Some(control) => {
                self.input.set(control, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.input.set(control, false);
                true
            }
            None => false,
        }
    }

    /// Advance to the frame timestamp `now_ms`
    ///
    /// Returns "playing", "paused", "won", "lost" or "finished".
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let Some(dt) = self.clock.tick(now_ms) else {
            return Ok("playing".to_string());
        };
        let progress = self
            .session
            .frame(dt, &self.input, &mut self.display)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(match progress {
            Progress::Playing => "playing",
            Progress::Paused => "paused",
            Progress::LevelEnded { status, .. } => status.as_str(),
            Progress::Finished { .. } => "finished",
        }
        .to_string())
    }

    /// Latest actor snapshot as JSON (empty between levels)
    pub fn snapshot_json(&self) -> String {
        self.display.snapshot.clone()
    }

    /// Current level grid as JSON
    pub fn level_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state().level())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn level_index(&self) -> usize {
        self.session.level_index()
    }

    pub fn lives(&self) -> u8 {
        self.session.lives()
    }

    /// None while playing, then whether every level was won
    pub fn outcome(&self) -> Option<bool> {
        self.session.outcome()
    }
}
