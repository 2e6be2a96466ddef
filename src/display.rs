//! Renderer seam
//!
//! The engine hands every new state to a `Display` and never reads anything
//! back. `render_text` draws a state as characters, in the same alphabet
//! level plans use.

use thiserror::Error;

use crate::sim::{ActorKind, CellRange, State, Tile};

/// A renderer failed to draw
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display failed: {0}")]
pub struct DisplayError(pub String);

/// Consumer of state snapshots
pub trait Display {
    /// Draw `state`
    fn sync_state(&mut self, state: &State) -> Result<(), DisplayError>;

    /// Tear down whatever was drawn for the current level
    fn clear(&mut self) {}
}

/// Renders nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn sync_state(&mut self, _state: &State) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Keeps the latest text rendering
#[derive(Debug, Default, Clone)]
pub struct TextDisplay {
    pub frame: String,
    pub frames_drawn: u64,
}

impl Display for TextDisplay {
    fn sync_state(&mut self, state: &State) -> Result<(), DisplayError> {
        self.frame = render_text(state);
        self.frames_drawn += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.frame.clear();
    }
}

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Wall => '#',
        Tile::Lava => '+',
    }
}

fn actor_char(kind: ActorKind) -> char {
    match kind {
        ActorKind::Player => '@',
        ActorKind::Lava => '*',
        ActorKind::Coin => 'o',
    }
}

/// Draw the grid with every actor stamped over the cells it covers
///
/// Later actors win where they overlap; the player is stamped last.
pub fn render_text(state: &State) -> String {
    let level = state.level();
    let mut grid: Vec<Vec<char>> = level
        .rows()
        .iter()
        .map(|row| row.iter().copied().map(tile_char).collect())
        .collect();

    let mut actors: Vec<_> = state.actors().iter().collect();
    actors.sort_by_key(|a| a.kind() == ActorKind::Player);

    for actor in actors {
        let ch = actor_char(actor.kind());
        for (x, y) in CellRange::covering(actor.pos(), actor.size()).cells() {
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = grid
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = ch;
            }
        }
    }

    let mut out = String::with_capacity((level.width() + 1) * level.height());
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}
