//! Pixel Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, level layout, per-frame tick)
//! - `game`: Session orchestrator driving update + render each frame
//! - `renderer`: 2D draw sink abstraction and frame drawing
//! - `platform`: Keyboard/pointer input state
//! - `ui`: Score/lives/level display sink
//! - `settings`: Data-driven field and gameplay configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the paddle's top edge to the field bottom at spawn
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Fraction of field height the paddle may roam in, measured from the bottom
    pub const PADDLE_BAND_FRACTION: f32 = 0.2;
    /// Expand power-up multiplier and width cap
    pub const PADDLE_EXPAND_FACTOR: f32 = 1.5;
    pub const PADDLE_MAX_WIDTH: f32 = 200.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Distance from the ball spawn point to the field bottom
    pub const BALL_SPAWN_BOTTOM_OFFSET: f32 = 100.0;
    /// Horizontal spawn velocity spread: vx = (r - 0.5) * spread
    pub const BALL_SPAWN_VX_SPREAD: f32 = 3.0;
    pub const BALL_SPAWN_VY: f32 = 2.0;
    /// Max paddle deflection (60 degrees)
    pub const PADDLE_MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Speed power-up multiplier
    pub const BALL_SPEED_BOOST: f32 = 1.2;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_COLUMNS: u32 = 10;
    pub const BRICK_BASE_ROWS: u32 = 5;
    pub const BRICK_MAX_HITS: u32 = 3;

    /// Scoring
    pub const SCORE_PER_BRICK_LEVEL: u64 = 10;
    pub const SCORE_LEVEL_BONUS: u64 = 100;
    pub const START_LIVES: u32 = 3;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;

    /// Particles
    pub const PARTICLE_BURST: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    /// Initial velocity spread per axis: v = (r - 0.5) * spread
    pub const PARTICLE_SPREAD: f32 = 8.0;
    pub const PARTICLE_SIZE: f32 = 2.0;
}
