//! Session orchestrator
//!
//! [`Game`] owns the session state and its random source. The host calls
//! [`Game::frame`] once per display refresh: one simulation tick, a HUD push,
//! then a full redraw.

use crate::renderer::{RenderSink, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameRng, GameState, RandomSource, TickInput, tick};
use crate::ui::UiSink;

/// A running session
pub struct Game<R: RandomSource = GameRng> {
    settings: Settings,
    state: GameState,
    rng: R,
    /// Events from the most recent update
    events: Vec<GameEvent>,
}

impl Game<GameRng> {
    /// Begin a new session at level 1. Uses the configured seed, or the
    /// current time when none is set.
    pub fn start(settings: Settings) -> Self {
        let rng = GameRng::new(settings.seed.unwrap_or_else(time_seed));
        log::info!("Session starting with seed: {}", rng.seed());
        Self::with_rng(settings, rng)
    }
}

impl<R: RandomSource> Game<R> {
    /// Begin a new session drawing randomness from `rng`
    pub fn with_rng(settings: Settings, mut rng: R) -> Self {
        let settings = settings.sanitized();
        let state = GameState::new(&settings, &mut rng);
        Self {
            settings,
            state,
            rng,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Events produced by the last [`Game::update`]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Throw the session away and start over at level 1. The random source
    /// keeps its stream.
    pub fn restart(&mut self, ui: &mut impl UiSink) {
        self.state = GameState::new(&self.settings, &mut self.rng);
        self.events.clear();
        ui.hide_game_over();
        self.push_hud(ui);
        log::info!("Session restarted");
    }

    /// Flip between playing and paused. No effect after game over.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.state.phase = self.state.phase.toggled();
        log::debug!("Phase: {:?}", self.state.phase);
        self.state.phase
    }

    /// Run one simulation tick and push the HUD when anything ran
    pub fn update(&mut self, input: &TickInput, ui: &mut impl UiSink) {
        self.events.clear();
        let stepped = tick(&mut self.state, input, &mut self.rng, &mut self.events);

        for event in &self.events {
            match event {
                GameEvent::LifeLost { lives_left } => {
                    log::info!("Ball lost, {} lives left", lives_left)
                }
                GameEvent::LevelCleared { level, bonus } => log::info!(
                    "Level cleared! Now level {} (+{}), {} bricks",
                    level,
                    bonus,
                    self.state.bricks.len()
                ),
                GameEvent::PowerUpCaught(kind) => log::info!("Power-up caught: {:?}", kind),
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over, final score {}", final_score);
                    ui.show_game_over(*final_score);
                }
                GameEvent::Paused | GameEvent::Resumed => log::debug!("{:?}", event),
                _ => {}
            }
        }

        if stepped {
            self.push_hud(ui);
        }
    }

    /// Draw the current frame (any phase)
    pub fn render(&self, sink: &mut impl RenderSink) {
        draw_frame(&self.state, sink);
    }

    /// Host frame callback: update then render
    pub fn frame(&mut self, input: &TickInput, ui: &mut impl UiSink, sink: &mut impl RenderSink) {
        self.update(input, ui);
        self.render(sink);
    }

    fn push_hud(&self, ui: &mut impl UiSink) {
        ui.set_score(self.state.score);
        ui.set_lives(self.state.lives);
        ui.set_level(self.state.level);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
