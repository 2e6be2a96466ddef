//! Just Jump - A tile-based platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level grid, actors, immutable state steps)
//! - `runner`: Frame clock and per-level run state machine
//! - `session`: Multi-level, multi-life game session
//! - `display`: Renderer seam and a text renderer
//! - `levels`: Built-in level plans
//! - `settings`: Data-driven configuration

pub mod display;
pub mod levels;
pub mod runner;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use display::{Display, DisplayError, render_text};
pub use runner::{FrameClock, LevelRun, RunPhase};
pub use session::{Progress, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Horizontal player speed (tiles/s), applied while left or right is held
    pub const PLAYER_X_SPEED: f32 = 7.0;
    /// Downward acceleration (tiles/s²)
    pub const GRAVITY: f32 = 30.0;
    /// Upward speed set by a jump impulse (tiles/s)
    pub const JUMP_SPEED: f32 = 17.0;

    /// Coin wobble angular speed (radians/s)
    pub const WOBBLE_SPEED: f32 = 8.0;
    /// Coin wobble amplitude (tiles)
    pub const WOBBLE_DIST: f32 = 0.07;

    /// Lava speeds per source character (tiles/s)
    pub const LAVA_HORIZONTAL_SPEED: f32 = 2.0;
    pub const LAVA_VERTICAL_SPEED: f32 = 2.0;
    pub const LAVA_DRIP_SPEED: f32 = 3.0;

    /// Largest frame delta fed to the simulation (ms), avoids jumps after a stall
    pub const MAX_FRAME_STEP_MS: f64 = 100.0;
    /// Time the level keeps animating after it is won or lost (s)
    pub const END_GRACE_SECS: f32 = 1.0;
    /// Lives at the start of every level
    pub const STARTING_LIVES: u8 = 3;
}
