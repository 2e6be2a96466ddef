//! Actors: the moving parts of a level
//!
//! Every actor is a plain value. `update` returns the actor one time step
//! later and never touches `self`; `collide` folds the effect of the player
//! touching this actor into a state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Level, Tile};
use super::state::{State, Status};
use super::tick::Input;
use crate::consts::*;

/// Actor variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Lava,
    Coin,
}

impl ActorKind {
    /// Bounding box size, shared by every actor of this kind
    pub const fn size(self) -> Vec2 {
        match self {
            // One and a half tiles tall
            ActorKind::Player => Vec2::new(0.8, 1.5),
            ActorKind::Lava => Vec2::new(1.0, 1.0),
            ActorKind::Coin => Vec2::new(0.6, 0.6),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Player => "player",
            ActorKind::Lava => "lava",
            ActorKind::Coin => "coin",
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub speed: Vec2,
}

impl Player {
    /// Spawn half a tile above the `@` cell so the feet rest on its bottom edge
    pub fn spawn(id: u32, cell: Vec2) -> Self {
        Self {
            id,
            pos: cell + Vec2::new(0.0, -0.5),
            speed: Vec2::ZERO,
        }
    }

    /// Advance one step. Motion is resolved per axis, horizontal first.
    pub fn update(&self, dt: f32, level: &Level, input: &Input) -> Self {
        let size = ActorKind::Player.size();

        let mut x_speed = 0.0;
        if input.left {
            x_speed -= PLAYER_X_SPEED;
        }
        if input.right {
            x_speed += PLAYER_X_SPEED;
        }

        let mut pos = self.pos;
        let moved_x = pos + Vec2::new(x_speed * dt, 0.0);
        if !level.touches(moved_x, size, Tile::Wall) {
            pos = moved_x;
        }

        let mut y_speed = self.speed.y + dt * GRAVITY;
        let moved_y = pos + Vec2::new(0.0, y_speed * dt);
        if !level.touches(moved_y, size, Tile::Wall) {
            pos = moved_y;
        } else if input.jump && y_speed > 0.0 {
            // Landed with jump held
            y_speed = -JUMP_SPEED;
        } else {
            y_speed = 0.0;
        }

        Self {
            id: self.id,
            pos,
            speed: Vec2::new(x_speed, y_speed),
        }
    }
}

/// A lava block. Bounces off walls, or drips back to `reset` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lava {
    pub id: u32,
    pub pos: Vec2,
    pub speed: Vec2,
    /// Return point for dripping lava
    pub reset: Option<Vec2>,
}

impl Lava {
    /// Build the lava variant for a plan character (`=`, `|` or `v`)
    pub fn spawn(id: u32, cell: Vec2, ch: char) -> Option<Self> {
        let (speed, reset) = match ch {
            '=' => (Vec2::new(LAVA_HORIZONTAL_SPEED, 0.0), None),
            '|' => (Vec2::new(0.0, LAVA_VERTICAL_SPEED), None),
            'v' => (Vec2::new(0.0, LAVA_DRIP_SPEED), Some(cell)),
            _ => return None,
        };
        Some(Self {
            id,
            pos: cell,
            speed,
            reset,
        })
    }

    pub fn is_dripping(&self) -> bool {
        self.reset.is_some()
    }

    pub fn update(&self, dt: f32, level: &Level) -> Self {
        let new_pos = self.pos + self.speed * dt;
        if !level.touches(new_pos, ActorKind::Lava.size(), Tile::Wall) {
            Self {
                pos: new_pos,
                ..self.clone()
            }
        } else if let Some(reset) = self.reset {
            Self {
                pos: reset,
                ..self.clone()
            }
        } else {
            Self {
                speed: -self.speed,
                ..self.clone()
            }
        }
    }
}

/// A collectible coin wobbling around its base position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub base_pos: Vec2,
    /// Wobble phase (radians)
    pub wobble: f32,
}

impl Coin {
    pub fn spawn(id: u32, cell: Vec2, wobble: f32) -> Self {
        let base_pos = cell + Vec2::new(0.2, 0.1);
        Self {
            id,
            pos: base_pos,
            base_pos,
            wobble,
        }
    }

    /// Coins never look at the grid, they only wobble inside their own cell
    pub fn update(&self, dt: f32) -> Self {
        let wobble = self.wobble + dt * WOBBLE_SPEED;
        let offset = wobble.sin() * WOBBLE_DIST;
        Self {
            id: self.id,
            pos: self.base_pos + Vec2::new(0.0, offset),
            base_pos: self.base_pos,
            wobble,
        }
    }
}

/// Any actor in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Actor {
    Player(Player),
    Lava(Lava),
    Coin(Coin),
}

impl Actor {
    pub fn id(&self) -> u32 {
        match self {
            Actor::Player(p) => p.id,
            Actor::Lava(l) => l.id,
            Actor::Coin(c) => c.id,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Player(_) => ActorKind::Player,
            Actor::Lava(_) => ActorKind::Lava,
            Actor::Coin(_) => ActorKind::Coin,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Actor::Player(p) => p.pos,
            Actor::Lava(l) => l.pos,
            Actor::Coin(c) => c.pos,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.kind().size()
    }

    /// Actor one step later, moved against the grid of `state`
    pub fn update(&self, dt: f32, state: &State, input: &Input) -> Actor {
        match self {
            Actor::Player(p) => Actor::Player(p.update(dt, state.level(), input)),
            Actor::Lava(l) => Actor::Lava(l.update(dt, state.level())),
            Actor::Coin(c) => Actor::Coin(c.update(dt)),
        }
    }

    /// Apply the player touching this actor
    pub fn collide(&self, state: State) -> State {
        match self {
            Actor::Player(_) => state,
            Actor::Lava(_) => state.with_status(Status::Lost),
            Actor::Coin(coin) => {
                let (level, actors, status) = state.into_parts();
                let actors: Vec<Actor> = actors.into_iter().filter(|a| a.id() != coin.id).collect();
                let cleared = !actors.iter().any(|a| a.kind() == ActorKind::Coin);
                let status = if cleared { Status::Won } else { status };
                State::from_parts(level, actors, status)
            }
        }
    }
}
