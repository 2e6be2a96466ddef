//! Axis-aligned collision helpers
//!
//! Everything in the grid world is a rectangle described by its top-left
//! corner and its size, both in tile units. Grid cells are unit squares
//! indexed by (column, row).

use glam::Vec2;

/// Half-open range of grid cells touched by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

impl CellRange {
    /// Cells covered by `[pos, pos + size)`, including partially covered ones
    pub fn covering(pos: Vec2, size: Vec2) -> Self {
        Self {
            x_start: pos.x.floor() as i32,
            x_end: (pos.x + size.x).ceil() as i32,
            y_start: pos.y.floor() as i32,
            y_end: (pos.y + size.y).ceil() as i32,
        }
    }

    /// Iterate cells row by row as (column, row)
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (x_start, x_end) = (self.x_start, self.x_end);
        (self.y_start..self.y_end).flat_map(move |y| (x_start..x_end).map(move |x| (x, y)))
    }

    pub fn is_empty(&self) -> bool {
        self.x_start >= self.x_end || self.y_start >= self.y_end
    }
}

/// Check whether two rectangles overlap
///
/// Strict on all four sides: rectangles that only share an edge do not
/// overlap.
#[inline]
pub fn rects_overlap(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    pos_a.x + size_a.x > pos_b.x
        && pos_a.x < pos_b.x + size_b.x
        && pos_a.y + size_a.y > pos_b.y
        && pos_a.y < pos_b.y + size_b.y
}
