//! Game state and core simulation types
//!
//! Everything the orchestrator mutates during a tick lives here, owned by
//! [`GameState`]. Nothing in this module is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Collider, Rect};
use super::color::Color;
use super::level::build_level;
use super::rng::RandomSource;
use super::tick::HeldKeys;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; only rendering runs
    Paused,
    /// Lives exhausted. Terminal until restart
    GameOver,
}

impl GamePhase {
    /// Pause toggle transition. Game over ignores the toggle.
    pub fn toggled(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        }
    }
}

/// Play field bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels moved per tick per held direction
    pub speed: f32,
}

impl Paddle {
    pub fn new(field: &Field, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                field.width / 2.0 - PADDLE_WIDTH / 2.0,
                field.height - PADDLE_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move by ±speed for every held direction, then clamp into the band:
    /// full field width horizontally, bottom 20% of the field vertically.
    pub fn steer(&mut self, keys: &HeldKeys, field: &Field) {
        if keys.left {
            self.pos.x -= self.speed;
        }
        if keys.right {
            self.pos.x += self.speed;
        }
        if keys.up {
            self.pos.y -= self.speed;
        }
        if keys.down {
            self.pos.y += self.speed;
        }
        self.clamp_to(field);
    }

    /// Clamp into the movement band. The upper bound wins if the band is
    /// narrower than the paddle.
    pub fn clamp_to(&mut self, field: &Field) {
        let max_x = field.width - self.size.x;
        self.pos.x = self.pos.x.min(max_x).max(0.0);

        let min_y = field.height - field.height * PADDLE_BAND_FRACTION;
        let max_y = field.height - self.size.y;
        self.pos.y = self.pos.y.min(max_y).max(min_y);
    }

    /// Expand power-up: widen by half, capped
    pub fn expand(&mut self) {
        self.size.x = (self.size.x * PADDLE_EXPAND_FACTOR).min(PADDLE_MAX_WIDTH);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A fresh ball at the spawn point with a random horizontal drift,
    /// always heading down first
    pub fn spawn(field: &Field, rng: &mut impl RandomSource) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        };
        ball.reset(field, rng);
        ball
    }

    pub fn reset(&mut self, field: &Field, rng: &mut impl RandomSource) {
        self.pos = Self::spawn_point(field);
        self.vel = Vec2::new((rng.next_f32() - 0.5) * BALL_SPAWN_VX_SPREAD, BALL_SPAWN_VY);
    }

    pub fn spawn_point(field: &Field) -> Vec2 {
        Vec2::new(field.width / 2.0, field.height - BALL_SPAWN_BOTTOM_OFFSET)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.pos,
            radius: self.radius,
        }
    }

    pub fn collider(&self) -> Collider {
        Collider::Circle(self.circle())
    }

    /// Redirect off the paddle. The hit offset across the paddle (0 = left
    /// edge, 1 = right edge) maps linearly to -60..+60 degrees from vertical.
    /// Speed is kept, and the ball always leaves upward.
    pub fn deflect_off(&mut self, paddle: &Rect) {
        let offset = ((self.pos.x - paddle.pos.x) / paddle.size.x).clamp(0.0, 1.0);
        let angle = (offset - 0.5) * 2.0 * PADDLE_MAX_BOUNCE_ANGLE;
        let speed = self.speed();
        self.vel = Vec2::new(angle.sin() * speed, -(angle.cos() * speed).abs());
    }

    /// Speed power-up
    pub fn boost(&mut self) {
        self.vel *= BALL_SPEED_BOOST;
    }
}

/// Outcome of striking a brick once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Hits remain; the brick now shows its damaged color
    Damaged,
    /// No hits left; the brick must be removed
    Destroyed,
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub hits: u32,
    pub max_hits: u32,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, color: Color, hits: u32) -> Self {
        Self {
            pos,
            size,
            color,
            hits,
            max_hits: hits,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Take one hit
    pub fn strike(&mut self) -> BrickHit {
        self.hits = self.hits.saturating_sub(1);
        if self.hits == 0 {
            BrickHit::Destroyed
        } else {
            self.color = super::color::damaged_color(self.color);
            BrickHit::Damaged
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Widen the paddle
    Expand,
    /// Speed the ball up
    Speed,
    /// Extra life
    Life,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Expand, PowerUpKind::Speed, PowerUpKind::Life];

    /// Pick a kind uniformly from a roll in `[0, 1)`. Out-of-range rolls
    /// are clamped onto the ends.
    pub fn from_roll(roll: f32) -> Self {
        let n = Self::ALL.len();
        let idx = if roll.is_finite() {
            ((roll * n as f32).floor().max(0.0) as usize).min(n - 1)
        } else {
            0
        };
        Self::ALL[idx]
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Expand => Color::GREEN,
            PowerUpKind::Speed => Color::RED,
            PowerUpKind::Life => Color::MAGENTA,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            PowerUpKind::Expand => "E",
            PowerUpKind::Speed => "S",
            PowerUpKind::Life => "L",
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(center: Vec2, rng: &mut impl RandomSource) -> Self {
        Self {
            pos: center,
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            size: Vec2::splat(POWERUP_SIZE),
            kind: PowerUpKind::from_roll(rng.next_f32()),
        }
    }

    /// Catch box, centered on `pos` where the square is drawn. Anchoring it
    /// at the top-left would shift the catch zone half a box off the sprite.
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    pub fn collider(&self) -> Collider {
        Collider::Rect(self.rect())
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Ticks left
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Color, rng: &mut impl RandomSource) -> Self {
        let vx = (rng.next_f32() - 0.5) * PARTICLE_SPREAD;
        let vy = (rng.next_f32() - 0.5) * PARTICLE_SPREAD;
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        }
    }

    /// Move, fall, age by one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining life as 0..=1, used for fading
    pub fn life_ratio(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Field,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active bricks in layout order
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Chance a destroyed brick drops a power-up
    pub drop_chance: f32,
    /// Ticks simulated while playing
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session at level 1 with a full brick grid
    pub fn new(settings: &Settings, rng: &mut impl RandomSource) -> Self {
        let field = settings.field();
        Self {
            field,
            score: 0,
            lives: settings.start_lives,
            level: 1,
            phase: GamePhase::Playing,
            paddle: Paddle::new(&field, settings.paddle_speed),
            ball: Ball::spawn(&field, rng),
            bricks: build_level(1, &field),
            power_ups: Vec::new(),
            particles: Vec::new(),
            drop_chance: settings.powerup_drop_chance,
            time_ticks: 0,
        }
    }

    /// Spawn a burst of particles at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: Color, rng: &mut impl RandomSource) {
        self.particles
            .extend((0..PARTICLE_BURST).map(|_| Particle::new(pos, color, rng)));
    }

    pub fn respawn_ball(&mut self, rng: &mut impl RandomSource) {
        self.ball.reset(&self.field, rng);
    }
}
