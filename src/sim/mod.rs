//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - States are values; a step builds a new one
//! - Seeded RNG only (coin phases at parse time)
//! - Stable iteration order (actor list order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, Coin, Lava, Player};
pub use collision::{CellRange, rects_overlap};
pub use level::{Level, LevelError, Tile};
pub use state::{ActorSnapshot, Snapshot, State, Status};
pub use tick::{Control, Input, is_pause_key};
