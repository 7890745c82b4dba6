//! Brick grid generation
//!
//! Layouts are a pure function of the level number and field width.

use glam::Vec2;

use super::color::brick_color;
use super::state::{Brick, Field};
use crate::consts::*;

/// Number of brick rows for a level: one extra row every third level
pub fn rows_for_level(level: u32) -> u32 {
    BRICK_BASE_ROWS + level / 3
}

/// Hits a brick in `row` takes to break: 1, 2, then 3 for every deeper row
pub fn hits_for_row(row: u32) -> u32 {
    (row + 1).min(BRICK_MAX_HITS)
}

/// Build the brick grid for `level`, row-major from the top-left, with the
/// grid centered horizontally in the field.
pub fn build_level(level: u32, field: &Field) -> Vec<Brick> {
    let rows = rows_for_level(level);
    let cols = BRICK_COLUMNS;
    let stride = Vec2::new(BRICK_WIDTH + BRICK_PADDING, BRICK_HEIGHT + BRICK_PADDING);
    let grid_width = cols as f32 * stride.x - BRICK_PADDING;
    let origin = Vec2::new((field.width - grid_width) / 2.0, BRICK_OFFSET_TOP);
    let size = Vec2::new(BRICK_WIDTH, BRICK_HEIGHT);

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = origin + Vec2::new(col as f32, row as f32) * stride;
            bricks.push(Brick::new(pos, size, brick_color(row), hits_for_row(row)));
        }
    }

    log::debug!("Level {}: {} rows x {} cols", level, rows, cols);
    bricks
}
