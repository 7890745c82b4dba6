//! Platform input layer
//!
//! Host event handlers write key and pointer events into [`InputState`] as
//! they arrive. The game reads one [`TickInput`] snapshot per frame.

use glam::Vec2;

use crate::sim::{HeldKeys, TickInput};

/// A directional control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key code does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    TogglePause,
}

/// Map a DOM `KeyboardEvent.code` to an action. Arrows and WASD steer,
/// Space pauses.
pub fn key_action(code: &str) -> Option<KeyAction> {
    let action = match code {
        "ArrowLeft" | "KeyA" => KeyAction::Move(Direction::Left),
        "ArrowRight" | "KeyD" => KeyAction::Move(Direction::Right),
        "ArrowUp" | "KeyW" => KeyAction::Move(Direction::Up),
        "ArrowDown" | "KeyS" => KeyAction::Move(Direction::Down),
        "Space" => KeyAction::TogglePause,
        _ => return None,
    };
    Some(action)
}

/// Live input state shared with host event handlers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Held count per direction (two keys can map to one direction)
    held: [u8; 4],
    pointer: Option<Vec2>,
    pause_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(direction: Direction) -> usize {
        match direction {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Key pressed. `repeat` marks OS auto-repeat events.
    /// Returns true when the key is one the game uses.
    pub fn key_down(&mut self, code: &str, repeat: bool) -> bool {
        match key_action(code) {
            Some(KeyAction::Move(dir)) => {
                if !repeat {
                    let slot = &mut self.held[Self::slot(dir)];
                    *slot = slot.saturating_add(1);
                }
                true
            }
            Some(KeyAction::TogglePause) => {
                if !repeat {
                    self.pause_requested = true;
                }
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(KeyAction::Move(dir)) = key_action(code) {
            let slot = &mut self.held[Self::slot(dir)];
            *slot = slot.saturating_sub(1);
        }
    }

    /// Forget every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held = [0; 4];
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[Self::slot(direction)] > 0
    }

    /// Read the current state for one tick. Consumes the pause edge.
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            keys: HeldKeys {
                left: self.is_held(Direction::Left),
                right: self.is_held(Direction::Right),
                up: self.is_held(Direction::Up),
                down: self.is_held(Direction::Down),
            },
            pointer: self.pointer,
            toggle_pause: self.pause_requested,
        };
        self.pause_requested = false;
        input
    }
}
