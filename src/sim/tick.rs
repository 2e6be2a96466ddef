//! Simulation step
//!
//! Advances a `State` by one time step. Every actor moves against the same
//! pre-step snapshot, then hazards and pickups are resolved against the
//! moved player.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::collision::rects_overlap;
use super::level::Tile;
use super::state::{State, Status};

/// Controls held during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// A movement control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
}

impl Control {
    /// Map a browser key name to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            "ArrowUp" => Some(Control::Jump),
            _ => None,
        }
    }
}

/// Key that toggles pause (edge-triggered, separate from `Input`)
pub fn is_pause_key(key: &str) -> bool {
    matches!(key, "p" | "P")
}

impl Input {
    /// Record a key going down or up
    pub fn set(&mut self, control: Control, down: bool) {
        match control {
            Control::Left => self.left = down,
            Control::Right => self.right = down,
            Control::Jump => self.jump = down,
        }
    }

    pub fn held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
        }
    }
}

impl State {
    /// State `dt` seconds later
    ///
    /// A won or lost state is frozen: updating it returns an equal state.
    pub fn update(&self, dt: f32, input: &Input) -> State {
        if self.is_terminal() {
            return self.clone();
        }

        let actors: Vec<Actor> = self
            .actors()
            .iter()
            .map(|actor| actor.update(dt, self, input))
            .collect();
        let next = State::from_parts(self.shared_level().clone(), actors, self.status());

        let Some(player) = next.player() else {
            return next;
        };
        let (pos, size) = (player.pos, ActorKind::Player.size());

        if next.level().touches(pos, size, Tile::Lava) {
            return next.with_status(Status::Lost);
        }

        let touching: Vec<Actor> = next
            .actors()
            .iter()
            .filter(|a| a.kind() != ActorKind::Player && rects_overlap(a.pos(), a.size(), pos, size))
            .cloned()
            .collect();

        touching
            .iter()
            .fold(next, |state, actor| actor.collide(state))
    }
}
