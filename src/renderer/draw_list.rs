//! Recording render sink
//!
//! Captures draw calls as data, for headless runs and tests.

use super::{RenderSink, TextAlign};
use crate::sim::Color;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    StrokeRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    FillCircle { x: f32, y: f32, r: f32, color: Color },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        align: TextAlign,
        color: Color,
    },
}

/// Ordered list of draw calls
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Text of every `FillText` call, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderSink for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { x, y, r, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            align,
            color,
        });
    }
}
