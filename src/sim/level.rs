//! Static level grid
//!
//! A level is parsed once from a human-readable plan. Background characters
//! become tiles; actor characters become start actors and leave an empty
//! tile behind:
//!
//! ```text
//! .  empty          @  player start
//! #  wall           o  coin
//! +  static lava    =  lava moving horizontally
//!                   |  lava moving vertically
//!                   v  dripping lava
//! ```

use std::f32::consts::TAU;
use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::actor::{Actor, ActorKind, Coin, Lava, Player};
use super::collision::CellRange;

/// Background classification of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Lava,
}

impl Tile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Wall => "wall",
            Tile::Lava => "lava",
        }
    }
}

impl FromStr for Tile {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(Tile::Empty),
            "wall" => Ok(Tile::Wall),
            "lava" => Ok(Tile::Lava),
            other => Err(LevelError::UnknownTileKind(other.to_string())),
        }
    }
}

/// Errors raised while building a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level plan has no rows")]
    Empty,
    #[error("row {row} is {found} characters wide, expected {expected}")]
    UnevenRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown character {ch:?} at row {row}, column {col}")]
    UnknownChar { ch: char, row: usize, col: usize },
    #[error("level plan has no player start")]
    MissingPlayer,
    #[error("level plan has {count} player starts, expected exactly one")]
    MultiplePlayers { count: usize },
    #[error("unknown tile kind {0:?}")]
    UnknownTileKind(String),
}

/// What a plan character turns into
enum Glyph {
    Tile(Tile),
    Player,
    Coin,
    Lava(char),
}

fn glyph(ch: char) -> Option<Glyph> {
    match ch {
        '.' => Some(Glyph::Tile(Tile::Empty)),
        '#' => Some(Glyph::Tile(Tile::Wall)),
        '+' => Some(Glyph::Tile(Tile::Lava)),
        '@' => Some(Glyph::Player),
        'o' => Some(Glyph::Coin),
        '=' | '|' | 'v' => Some(Glyph::Lava(ch)),
        _ => None,
    }
}

/// Immutable level backdrop plus the actors it starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    width: usize,
    height: usize,
    /// Tiles indexed `[row][col]`
    rows: Vec<Vec<Tile>>,
    start_actors: Vec<Actor>,
}

impl Level {
    /// Parse a plan, seeding coin wobble phases from `seed`
    pub fn parse(plan: &str, seed: u64) -> Result<Self, LevelError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::parse_with_rng(plan, &mut rng)
    }

    /// Parse a plan, drawing coin wobble phases from `rng`
    pub fn parse_with_rng<R: Rng>(plan: &str, rng: &mut R) -> Result<Self, LevelError> {
        let lines: Vec<&str> = plan
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let width = lines.first().ok_or(LevelError::Empty)?.chars().count();
        let mut rows = Vec::with_capacity(lines.len());
        let mut start_actors = Vec::new();
        let mut next_id = 0u32;

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::UnevenRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            let mut row = Vec::with_capacity(width);
            for (x, ch) in line.chars().enumerate() {
                let cell = Vec2::new(x as f32, y as f32);
                let actor = match glyph(ch) {
                    Some(Glyph::Tile(tile)) => {
                        row.push(tile);
                        continue;
                    }
                    Some(Glyph::Player) => Actor::Player(Player::spawn(next_id, cell)),
                    Some(Glyph::Coin) => {
                        Actor::Coin(Coin::spawn(next_id, cell, rng.random_range(0.0..TAU)))
                    }
                    Some(Glyph::Lava(ch)) => match Lava::spawn(next_id, cell, ch) {
                        Some(lava) => Actor::Lava(lava),
                        None => return Err(LevelError::UnknownChar { ch, row: y, col: x }),
                    },
                    None => return Err(LevelError::UnknownChar { ch, row: y, col: x }),
                };
                next_id += 1;
                start_actors.push(actor);
                row.push(Tile::Empty);
            }
            rows.push(row);
        }

        let players = start_actors
            .iter()
            .filter(|a| a.kind() == ActorKind::Player)
            .count();
        match players {
            0 => return Err(LevelError::MissingPlayer),
            1 => {}
            count => return Err(LevelError::MultiplePlayers { count }),
        }

        Ok(Self {
            width,
            height: rows.len(),
            rows,
            start_actors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile rows, top to bottom
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    /// Actors as placed by the plan, in row-major order
    pub fn start_actors(&self) -> &[Actor] {
        &self.start_actors
    }

    /// Tile at a grid cell; anything outside the map is a wall
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 {
            return Tile::Wall;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    /// Is the rectangle `[pos, pos + size)` touching any cell of kind `tile`?
    pub fn touches(&self, pos: Vec2, size: Vec2, tile: Tile) -> bool {
        CellRange::covering(pos, size)
            .cells()
            .any(|(x, y)| self.tile_at(x, y) == tile)
    }
}
