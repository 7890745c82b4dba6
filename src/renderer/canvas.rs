//! Canvas 2D render sink (web only)

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{RenderSink, TextAlign};
use crate::sim::Color;

/// Draws onto a `<canvas>` 2D context
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        ctx.set_image_smoothing_enabled(false);
        ctx.set_line_width(1.0);
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }
}

impl RenderSink for CanvasSink {
    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, align: TextAlign, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(font);
        self.ctx.set_text_align(align.as_str());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
