//! Palette for bricks, power-ups and particles

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);
    /// Fallback for damaged bricks whose color has no damaged variant
    pub const DARK_GRAY: Color = Color::rgb(0x40, 0x40, 0x40);

    /// Same color with alpha scaled by `ratio` (clamped to 0..=1)
    pub fn faded(self, ratio: f32) -> Self {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            a: (ratio * 255.0).floor() as u8,
            ..self
        }
    }

    /// CSS color string (`#rrggbb` when opaque, `rgba(...)` otherwise)
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Brick row colors, cycled by row index
pub const BRICK_PALETTE: [Color; 6] = [
    Color::rgb(0xff, 0x00, 0x00), // red
    Color::rgb(0xff, 0x88, 0x00), // orange
    Color::rgb(0xff, 0xff, 0x00), // yellow
    Color::rgb(0x00, 0xff, 0x00), // green
    Color::rgb(0x00, 0x88, 0xff), // blue
    Color::rgb(0x88, 0x00, 0xff), // purple
];

/// Damaged variant of each palette entry, same order as [`BRICK_PALETTE`]
const DAMAGED_PALETTE: [Color; 6] = [
    Color::rgb(0x80, 0x00, 0x00),
    Color::rgb(0x80, 0x44, 0x00),
    Color::rgb(0x80, 0x80, 0x00),
    Color::rgb(0x00, 0x80, 0x00),
    Color::rgb(0x00, 0x44, 0x80),
    Color::rgb(0x44, 0x00, 0x80),
];

/// Color for a brick row
pub fn brick_color(row: u32) -> Color {
    BRICK_PALETTE[row as usize % BRICK_PALETTE.len()]
}

/// Color a brick takes after a non-lethal hit
pub fn damaged_color(color: Color) -> Color {
    BRICK_PALETTE
        .iter()
        .position(|c| *c == color)
        .map(|i| DAMAGED_PALETTE[i])
        .unwrap_or(Color::DARK_GRAY)
}
