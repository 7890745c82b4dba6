//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per display frame, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (layout order for bricks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod level;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Circle, Collider, Rect, circle_rect_overlap, overlaps, rect_rect_overlap};
pub use color::Color;
pub use level::build_level;
pub use rng::{GameRng, RandomSource};
pub use state::{
    Ball, Brick, BrickHit, Field, GamePhase, GameState, Paddle, Particle, PowerUp, PowerUpKind,
};
pub use tick::{GameEvent, HeldKeys, TickInput, apply_power_up, tick};
