//! Game settings
//!
//! Field size and gameplay tunables. Defaults reproduce the classic layout;
//! a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Field;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Gameplay ===
    /// Lives at session start
    pub start_lives: u32,
    /// Paddle pixels per tick per held key
    pub paddle_speed: f32,
    /// Chance (0-1) a destroyed brick drops a power-up
    pub powerup_drop_chance: f32,

    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            start_lives: START_LIVES,
            paddle_speed: PADDLE_SPEED,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        // The grid is 745px wide and the paddle band must fit the paddle
        let min_width = BRICK_COLUMNS as f32 * (BRICK_WIDTH + BRICK_PADDING) - BRICK_PADDING;
        if !self.field_width.is_finite() || self.field_width < min_width {
            log::warn!("field_width {} out of range", self.field_width);
            self.field_width = defaults.field_width;
        }
        if !self.field_height.is_finite() || self.field_height <= 0.0 {
            log::warn!("field_height {} out of range", self.field_height);
            self.field_height = defaults.field_height;
        }
        if self.start_lives == 0 {
            self.start_lives = defaults.start_lives;
        }
        if !self.paddle_speed.is_finite() || self.paddle_speed <= 0.0 {
            self.paddle_speed = defaults.paddle_speed;
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            self.powerup_drop_chance = defaults.powerup_drop_chance;
        }
        self
    }

    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }
}
