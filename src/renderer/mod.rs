//! Frame rendering
//!
//! The game draws through [`RenderSink`], a minimal 2D surface: filled and
//! outlined rectangles, filled circles and text. [`draw_frame`] paints one
//! complete frame from the session state regardless of phase.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use crate::consts::PARTICLE_SIZE;
use crate::sim::{Color, GamePhase, GameState};

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A 2D drawing surface
pub trait RenderSink {
    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, align: TextAlign, color: Color);
}

pub const LABEL_FONT: &str = "12px Courier New";
pub const OVERLAY_FONT: &str = "48px Courier New";
pub const PAUSED_TEXT: &str = "PAUSED";
const OVERLAY_COLOR: Color = Color::rgba(0, 0, 0, 179);
/// Ball highlight square edge
const HIGHLIGHT_SIZE: f32 = 4.0;
/// Text baseline offset to sit visually centered in 12px boxes
const LABEL_BASELINE: f32 = 4.0;

/// Draw one frame
pub fn draw_frame(state: &GameState, sink: &mut impl RenderSink) {
    sink.clear(Color::BLACK);

    // Paddle
    let paddle = state.paddle.rect();
    sink.fill_rect(paddle.pos.x, paddle.pos.y, paddle.size.x, paddle.size.y, Color::CYAN);
    sink.stroke_rect(paddle.pos.x, paddle.pos.y, paddle.size.x, paddle.size.y, Color::WHITE);

    // Ball with a pixel highlight
    let ball = &state.ball;
    sink.fill_circle(ball.pos.x, ball.pos.y, ball.radius, Color::WHITE);
    sink.fill_rect(
        ball.pos.x - HIGHLIGHT_SIZE / 2.0,
        ball.pos.y - HIGHLIGHT_SIZE / 2.0,
        HIGHLIGHT_SIZE,
        HIGHLIGHT_SIZE,
        Color::YELLOW,
    );

    for brick in &state.bricks {
        let (pos, size) = (brick.pos, brick.size);
        sink.fill_rect(pos.x, pos.y, size.x, size.y, brick.color);
        sink.stroke_rect(pos.x, pos.y, size.x, size.y, Color::WHITE);
        if brick.hits > 1 {
            let center = brick.center();
            sink.fill_text(
                &brick.hits.to_string(),
                center.x,
                center.y + LABEL_BASELINE,
                LABEL_FONT,
                TextAlign::Center,
                Color::WHITE,
            );
        }
    }

    for power_up in &state.power_ups {
        let rect = power_up.rect();
        sink.fill_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, power_up.kind.color());
        sink.stroke_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, Color::WHITE);
        sink.fill_text(
            power_up.kind.glyph(),
            power_up.pos.x,
            power_up.pos.y + LABEL_BASELINE,
            LABEL_FONT,
            TextAlign::Center,
            Color::WHITE,
        );
    }

    for particle in &state.particles {
        sink.fill_rect(
            particle.pos.x - PARTICLE_SIZE / 2.0,
            particle.pos.y - PARTICLE_SIZE / 2.0,
            PARTICLE_SIZE,
            PARTICLE_SIZE,
            particle.color.faded(particle.life_ratio()),
        );
    }

    if state.phase == GamePhase::Paused {
        let field = &state.field;
        sink.fill_rect(0.0, 0.0, field.width, field.height, OVERLAY_COLOR);
        sink.fill_text(
            PAUSED_TEXT,
            field.width / 2.0,
            field.height / 2.0,
            OVERLAY_FONT,
            TextAlign::Center,
            Color::CYAN,
        );
    }
}
