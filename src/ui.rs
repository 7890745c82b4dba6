//! Score/lives/level display
//!
//! The session pushes values into a [`UiSink`] once per simulated frame.
//! The web build writes them into the DOM; headless runs keep a [`Hud`].

/// Receiver for HUD values
pub trait UiSink {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u32);
    fn set_level(&mut self, level: u32);
    fn show_game_over(&mut self, final_score: u64);
    /// Called when a new session starts
    fn hide_game_over(&mut self) {}
}

/// In-memory HUD mirror
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Final score while the game-over panel is up
    pub game_over: Option<u64>,
    /// Number of pushes received
    pub updates: u64,
}

impl UiSink for Hud {
    fn set_score(&mut self, score: u64) {
        self.score = score;
        self.updates += 1;
    }

    fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.game_over = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}
