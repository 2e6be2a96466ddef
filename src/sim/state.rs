//! Game state and core simulation types
//!
//! A `State` is a persistent value: stepping it builds a new `State` that
//! shares the same level and leaves the old one intact.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Player};
use super::level::Level;

/// Outcome of a level so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }

    /// Won and lost are final
    pub fn is_terminal(&self) -> bool {
        *self != Status::Playing
    }
}

/// Snapshot of a running level
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    level: Rc<Level>,
    actors: Vec<Actor>,
    status: Status,
}

impl State {
    /// Fresh state with the level's start actors
    pub fn start(level: Rc<Level>) -> Self {
        let actors = level.start_actors().to_vec();
        Self {
            level,
            actors,
            status: Status::Playing,
        }
    }

    pub(crate) fn from_parts(level: Rc<Level>, actors: Vec<Actor>, status: Status) -> Self {
        Self {
            level,
            actors,
            status,
        }
    }

    pub(crate) fn into_parts(self) -> (Rc<Level>, Vec<Actor>, Status) {
        (self.level, self.actors, self.status)
    }

    pub(crate) fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The level handle shared by every state of this run
    pub fn shared_level(&self) -> &Rc<Level> {
        &self.level
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The player actor (levels are validated to hold exactly one)
    pub fn player(&self) -> Option<&Player> {
        self.actors.iter().find_map(|a| match a {
            Actor::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn coins_left(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| a.kind() == ActorKind::Coin)
            .count()
    }

    /// Read-only view handed to renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level.clone(),
            status: self.status,
            actors: self
                .actors
                .iter()
                .map(|a| ActorSnapshot {
                    kind: a.kind(),
                    pos: a.pos(),
                    size: a.size(),
                })
                .collect(),
        }
    }
}

/// What a renderer needs to draw one actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Renderer-facing view of a state
///
/// The level grid is shared, not copied, and is left out of the JSON form:
/// the grid never changes during a level, so browser renderers fetch it
/// once and then receive only actors and status per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(skip)]
    pub level: Rc<Level>,
    pub status: Status,
    pub actors: Vec<ActorSnapshot>,
}
