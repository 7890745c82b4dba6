//! Per-frame simulation tick
//!
//! One call advances the session by one display frame. The step order is
//! fixed: paddle, ball, walls, floor, paddle bounce, bricks, power-ups,
//! particles, level completion. Reordering changes tie-breaking.

use glam::Vec2;

use super::collision::{BounceAxis, bounce_axis, circle_rect_overlap, overlaps};
use super::color::Color;
use super::level::build_level;
use super::rng::RandomSource;
use super::state::{BrickHit, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Directional keys held down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HeldKeys,
    /// Pointer position in field space (tracked, not used for steering)
    pub pointer: Option<Vec2>,
    /// Pause toggle edge
    pub toggle_pause: bool,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WallBounce,
    PaddleHit,
    BrickDamaged { hits_left: u32 },
    BrickDestroyed { points: u64 },
    PowerUpSpawned(PowerUpKind),
    PowerUpCaught(PowerUpKind),
    LifeLost { lives_left: u32 },
    LevelCleared { level: u32, bonus: u64 },
    GameOver { final_score: u64 },
    Paused,
    Resumed,
}

/// Advance the game state by one frame.
///
/// Returns `true` when the simulation actually stepped (phase was playing).
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    // Handle pause toggle
    if input.toggle_pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return false;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return false;
    }

    state.time_ticks += 1;

    // 1. Paddle
    state.paddle.steer(&input.keys, &state.field);

    // 2. Ball
    state.ball.advance();

    // 3. Walls
    let ball = &mut state.ball;
    let mut wall_hits = 0;
    if ball.pos.x <= ball.radius || ball.pos.x >= state.field.width - ball.radius {
        ball.vel.x = -ball.vel.x;
        wall_hits += 1;
    }
    if ball.pos.y <= ball.radius {
        ball.vel.y = -ball.vel.y;
        wall_hits += 1;
    }
    let ball_pos = ball.pos;
    for _ in 0..wall_hits {
        state.spawn_burst(ball_pos, Color::CYAN, rng);
        events.push(GameEvent::WallBounce);
    }

    // 4. Floor
    if state.ball.pos.y > state.field.height {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver {
                final_score: state.score,
            });
        } else {
            state.respawn_ball(rng);
        }
    }

    // 5. Paddle bounce
    let paddle_rect = state.paddle.rect();
    if overlaps(&state.ball.collider(), &paddle_rect) {
        state.ball.deflect_off(&paddle_rect);
        let pos = state.ball.pos;
        state.spawn_burst(pos, Color::GREEN, rng);
        events.push(GameEvent::PaddleHit);
    }

    // 6. Bricks: first overlapping brick only
    resolve_brick_hit(state, rng, events);

    // 7. Power-ups
    update_power_ups(state, events);

    // 8. Particles
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.is_alive());

    // The ball is gone for good; no level rollover on the final tick
    if state.phase == GamePhase::GameOver {
        return true;
    }

    // 9. Level completion
    if state.bricks.is_empty() {
        state.level += 1;
        state.bricks = build_level(state.level, &state.field);
        state.respawn_ball(rng);
        let bonus = SCORE_LEVEL_BONUS * state.level as u64;
        state.score += bonus;
        events.push(GameEvent::LevelCleared {
            level: state.level,
            bonus,
        });
    }

    true
}

/// Resolve at most one brick per tick. The scan runs from the last brick
/// back, so the bottom row (nearest a rising ball) and the right-hand
/// column win ties.
fn resolve_brick_hit(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let circle = state.ball.circle();
    let Some(idx) = state
        .bricks
        .iter()
        .rposition(|b| circle_rect_overlap(&circle, &b.rect()))
    else {
        return;
    };

    match bounce_axis(circle.center, &state.bricks[idx].rect()) {
        BounceAxis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
        BounceAxis::Vertical => state.ball.vel.y = -state.ball.vel.y,
    }

    match state.bricks[idx].strike() {
        BrickHit::Damaged => {
            events.push(GameEvent::BrickDamaged {
                hits_left: state.bricks[idx].hits,
            });
        }
        BrickHit::Destroyed => {
            let brick = state.bricks.remove(idx);
            let points = SCORE_PER_BRICK_LEVEL * state.level as u64;
            state.score += points;
            events.push(GameEvent::BrickDestroyed { points });

            let center = brick.center();
            state.spawn_burst(center, brick.color, rng);

            if rng.next_f32() < state.drop_chance {
                let power_up = PowerUp::new(center, rng);
                events.push(GameEvent::PowerUpSpawned(power_up.kind));
                state.power_ups.push(power_up);
            }
        }
    }
}

/// Move power-ups, apply caught ones, drop the ones that fell out
fn update_power_ups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let paddle_rect = state.paddle.rect();
    let floor = state.field.height;
    let mut caught = Vec::new();

    state.power_ups.retain_mut(|p| {
        p.advance();
        if overlaps(&p.collider(), &paddle_rect) {
            caught.push(p.kind);
            false
        } else {
            p.pos.y <= floor
        }
    });

    for kind in caught {
        apply_power_up(state, kind);
        events.push(GameEvent::PowerUpCaught(kind));
    }
}

/// Apply a caught power-up's effect
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Expand => state.paddle.expand(),
        PowerUpKind::Speed => state.ball.boost(),
        PowerUpKind::Life => state.lives += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::Brick;
    use proptest::prelude::*;

    /// Session with the ball parked mid-field, clear of everything
    fn quiet_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), &mut ScriptedRng::constant(0.5));
        state.ball.pos = Vec2::new(400.0, 350.0);
        state.ball.vel = Vec2::new(0.0, 2.0);
        state
    }

    fn step(state: &mut GameState, rng: &mut ScriptedRng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        tick(state, &TickInput::default(), rng, &mut events);
        events
    }

    #[test]
    fn test_idle_tick_moves_ball_only() {
        let mut state = quiet_state();
        let paddle_before = state.paddle.pos;
        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(400.0, 352.0));
        assert_eq!(state.paddle.pos, paddle_before);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_side_wall_bounce() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(10.0, 300.0);
        state.ball.vel = Vec2::new(-3.0, 1.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.ball.vel, Vec2::new(3.0, 1.0));
        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert!(state.particles.iter().all(|p| p.color == Color::CYAN));
    }

    #[test]
    fn test_corner_bounce_flips_both_axes() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.ball.vel = Vec2::new(-3.0, -3.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
        assert_eq!(events, vec![GameEvent::WallBounce, GameEvent::WallBounce]);
        assert_eq!(state.particles.len(), 2 * PARTICLE_BURST);
        assert!(state.particles.iter().all(|p| p.color == Color::CYAN));
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = quiet_state();
        // Keep one far-away brick so the level does not clear
        state.bricks = vec![Brick::new(
            Vec2::new(780.0, 300.0),
            Vec2::new(1.0, 1.0),
            Color::RED,
            1,
        )];
        state.ball.pos = Vec2::new(400.0, 10.0);
        state.ball.vel = Vec2::new(1.0, -3.0);

        step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.ball.vel, Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_life_lost_respawns_ball() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(20.0, 599.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events[0], GameEvent::LifeLost { lives_left: 2 });
        assert_eq!(state.ball.vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_respawned_ball_checks_paddle_same_tick() {
        let mut state = quiet_state();
        // Paddle raised into the respawn point
        state.paddle.pos = Vec2::new(350.0, 490.0);
        state.ball.pos = Vec2::new(20.0, 599.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(
            events,
            vec![GameEvent::LifeLost { lives_left: 2 }, GameEvent::PaddleHit]
        );
        assert_eq!(state.ball.pos, Vec2::new(400.0, 500.0));
        assert_eq!(state.ball.vel, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_game_over_tick_still_ages_particles() {
        let mut state = quiet_state();
        state.lives = 1;
        state.spawn_burst(Vec2::new(400.0, 100.0), Color::WHITE, &mut ScriptedRng::constant(0.5));
        state.ball.pos = Vec2::new(20.0, 599.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.particles.iter().all(|p| p.life == PARTICLE_LIFE - 1));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = quiet_state();
        state.lives = 1;
        state.score = 420;
        state.ball.pos = Vec2::new(20.0, 599.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 420 }));
        // No respawn
        assert_eq!(state.ball.pos, Vec2::new(20.0, 601.0));

        // Further ticks are no-ops
        let before = state.ball.pos;
        assert!(step(&mut state, &mut ScriptedRng::constant(0.5)).is_empty());
        assert_eq!(state.ball.pos, before);
    }

    #[test]
    fn test_paddle_bounce_goes_up() {
        let mut state = quiet_state();
        let paddle = state.paddle.rect();
        state.ball.pos = Vec2::new(paddle.pos.x + 75.0, paddle.pos.y - 8.0);
        state.ball.vel = Vec2::new(1.0, 3.0);
        let speed = state.ball.speed();

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert!(events.contains(&GameEvent::PaddleHit));
        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.x > 0.0);
        assert!((state.ball.speed() - speed).abs() < 1e-4);
        assert!(state.particles.iter().all(|p| p.color == Color::GREEN));
    }

    #[test]
    fn test_brick_damage_keeps_count() {
        let mut state = quiet_state();
        // Bottom row brick (3 hits, blue), ball coming up from below
        let target = state.bricks[43].clone();
        state.ball.pos = Vec2::new(target.center().x, target.pos.y + target.size.y + 9.0);
        state.ball.vel = Vec2::new(0.0, -2.0);
        let count = state.bricks.len();

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(events, vec![GameEvent::BrickDamaged { hits_left: 2 }]);
        assert_eq!(state.bricks.len(), count);
        assert_eq!(state.bricks[43].hits, 2);
        assert_eq!(state.bricks[43].color, Color::rgb(0x00, 0x44, 0x80));
        assert_eq!(state.ball.vel, Vec2::new(0.0, 2.0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_brick_destroyed_scores_and_bursts() {
        let mut state = quiet_state();
        state.level = 2;
        let target = state.bricks[43].clone();
        state.bricks[43].hits = 1;
        state.ball.pos = Vec2::new(target.center().x, target.pos.y + target.size.y + 9.0);
        state.ball.vel = Vec2::new(0.0, -2.0);
        let count = state.bricks.len();

        // Roll 0.5 never drops a power-up at 10%
        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(events, vec![GameEvent::BrickDestroyed { points: 20 }]);
        assert_eq!(state.bricks.len(), count - 1);
        assert_eq!(state.score, 20);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_brick_drop_spawns_power_up_at_center() {
        let mut state = quiet_state();
        let target = state.bricks[40].clone();
        state.bricks[40].hits = 1;
        state.ball.pos = Vec2::new(target.center().x, target.pos.y + target.size.y + 7.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        // Particles take 16 rolls, then the drop roll and the kind roll
        let mut rolls = vec![0.5; 16];
        rolls.extend([0.05, 0.9]);
        let events = step(&mut state, &mut ScriptedRng::new(&rolls));

        assert!(events.contains(&GameEvent::PowerUpSpawned(PowerUpKind::Life)));
        assert_eq!(state.power_ups.len(), 1);
        // Spawned at the brick center, then fell one step in the same tick
        let p = &state.power_ups[0];
        assert_eq!(p.pos, target.center() + Vec2::new(0.0, POWERUP_FALL_SPEED));
    }

    #[test]
    fn test_only_one_brick_resolves() {
        let mut state = quiet_state();
        // Ball straddling the gap between bottom-row bricks 40 and 41
        state.bricks[40].hits = 1;
        state.bricks[41].hits = 1;
        let a = state.bricks[40].clone();
        let b = state.bricks[41].clone();
        state.ball.pos = Vec2::new(a.pos.x + a.size.x + 2.5, a.pos.y + a.size.y + 5.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(hits, 1);
        // The later brick in layout order went, its left neighbor stayed
        assert_eq!(state.bricks.len(), 49);
        assert_eq!(state.bricks[40].pos, a.pos);
        assert!(state.bricks.iter().all(|brick| brick.pos != b.pos));
    }

    #[test]
    fn test_lower_row_wins_in_vertical_gap() {
        let mut state = quiet_state();
        // Just under row 4's top edge, reaching into row 3 above it
        let near = state.bricks[43].clone();
        state.ball.pos = Vec2::new(near.center().x, near.pos.y - 1.5 + 1.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(events, vec![GameEvent::BrickDamaged { hits_left: 2 }]);
        assert_eq!(state.bricks[43].hits, 2);
        assert_eq!(state.bricks[33].hits, 3);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_expand_power_up_caps_at_max() {
        let mut state = quiet_state();
        state.paddle.size.x = 150.0;
        apply_power_up(&mut state, PowerUpKind::Expand);
        assert_eq!(state.paddle.size.x, 200.0);
    }

    #[test]
    fn test_speed_and_life_power_ups() {
        let mut state = quiet_state();
        state.ball.vel = Vec2::new(1.0, -2.0);
        apply_power_up(&mut state, PowerUpKind::Speed);
        assert!((state.ball.vel - Vec2::new(1.2, -2.4)).length() < 1e-5);

        apply_power_up(&mut state, PowerUpKind::Life);
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_power_up_caught_by_paddle() {
        let mut state = quiet_state();
        let paddle = state.paddle.rect();
        let mut p = PowerUp::new(Vec2::ZERO, &mut ScriptedRng::constant(0.0));
        p.pos = Vec2::new(paddle.center().x, paddle.pos.y - 10.0);
        state.power_ups.push(p);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert!(events.contains(&GameEvent::PowerUpCaught(PowerUpKind::Expand)));
        assert!(state.power_ups.is_empty());
        assert_eq!(state.paddle.size.x, 150.0);
    }

    #[test]
    fn test_power_up_catch_box_is_centered() {
        let mut state = quiet_state();
        let paddle = state.paddle.rect();
        let mut p = PowerUp::new(Vec2::ZERO, &mut ScriptedRng::constant(0.0));
        // After falling, the box's bottom edge rests on the paddle top
        p.pos = Vec2::new(paddle.center().x, paddle.pos.y - POWERUP_SIZE / 2.0 - POWERUP_FALL_SPEED);
        state.power_ups.push(p);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert!(events.is_empty());
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].rect().max().y, paddle.pos.y);
    }

    #[test]
    fn test_power_up_missed_falls_out() {
        let mut state = quiet_state();
        let mut p = PowerUp::new(Vec2::ZERO, &mut ScriptedRng::constant(0.5));
        p.pos = Vec2::new(20.0, 599.0);
        state.power_ups.push(p);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert!(state.power_ups.is_empty());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PowerUpCaught(_))));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = quiet_state();
        state.spawn_burst(Vec2::new(400.0, 100.0), Color::WHITE, &mut ScriptedRng::constant(0.5));
        let mut rng = ScriptedRng::constant(0.5);
        for _ in 0..PARTICLE_LIFE - 1 {
            step(&mut state, &mut rng);
        }
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        step(&mut state, &mut rng);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_level_clear_advances() {
        let mut state = quiet_state();
        state.score = 100;
        // One brick left, about to break
        state.bricks.truncate(1);
        let target = state.bricks[0].clone();
        state.ball.pos = Vec2::new(target.center().x, target.pos.y + target.size.y + 7.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        let events = step(&mut state, &mut ScriptedRng::constant(0.5));
        assert_eq!(state.level, 2);
        // 10 for the brick at level 1, 100 x 2 bonus
        assert_eq!(state.score, 100 + 10 + 200);
        assert_eq!(state.bricks.len(), 50);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 500.0));
        assert_eq!(
            events.last(),
            Some(&GameEvent::LevelCleared { level: 2, bonus: 200 })
        );
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = quiet_state();
        let mut rng = ScriptedRng::constant(0.5);
        let mut events = Vec::new();
        let toggle = TickInput {
            toggle_pause: true,
            ..Default::default()
        };

        assert!(!tick(&mut state, &toggle, &mut rng, &mut events));
        assert_eq!(state.phase, GamePhase::Paused);
        let pos = state.ball.pos;

        assert!(!tick(&mut state, &TickInput::default(), &mut rng, &mut events));
        assert_eq!(state.ball.pos, pos);

        assert!(tick(&mut state, &toggle, &mut rng, &mut events));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events, vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_held_keys_move_paddle() {
        let mut state = quiet_state();
        let start = state.paddle.pos;
        let input = TickInput {
            keys: HeldKeys {
                left: true,
                ..Default::default()
            },
            pointer: Some(Vec2::new(700.0, 590.0)),
            ..Default::default()
        };
        tick(&mut state, &input, &mut ScriptedRng::constant(0.5), &mut Vec::new());
        assert_eq!(state.paddle.pos, start - Vec2::new(PADDLE_SPEED, 0.0));
    }

    proptest! {
        #[test]
        fn prop_wall_bounce_keeps_speed(
            y in 150.0f32..450.0,
            vx in 0.5f32..6.0,
            vy in -6.0f32..6.0,
            right in any::<bool>(),
        ) {
            let mut state = quiet_state();
            let x = if right { 790.0 } else { 10.0 };
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(if right { vx } else { -vx }, vy);
            let before = state.ball.speed();

            step(&mut state, &mut ScriptedRng::constant(0.5));
            prop_assert!((state.ball.speed() - before).abs() < 1e-4);
        }

        #[test]
        fn prop_paddle_bounce_upward_same_speed(
            offset in 0.0f32..1.0,
            vx in -4.0f32..4.0,
            vy in 0.5f32..5.0,
        ) {
            let mut state = quiet_state();
            let paddle = state.paddle.rect();
            // Lands just above the paddle after advancing
            state.ball.pos = Vec2::new(
                paddle.pos.x + offset * paddle.size.x - vx,
                paddle.pos.y - 4.0 - vy,
            );
            state.ball.vel = Vec2::new(vx, vy);
            let before = state.ball.speed();

            let events = step(&mut state, &mut ScriptedRng::constant(0.5));
            prop_assert!(events.contains(&GameEvent::PaddleHit));
            prop_assert!(state.ball.vel.y <= 0.0);
            prop_assert!((state.ball.speed() - before).abs() < 1e-3);
        }
    }
}
