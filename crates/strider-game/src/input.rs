//! Input adapter
//!
//! Turns raw winit events into one [`InputSnapshot`] per simulation tick, so
//! the controllers never see device state directly.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Locomotion actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    /// Release mouse capture
    Cancel,
}

/// Everything the controllers read from input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Movement axes, x = right, y = forward, each in `[-1, 1]`
    pub move_axes: Vec2,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Cancel went down this tick
    pub cancel_pressed: bool,
    /// Any mouse button went down this tick
    pub mouse_clicked: bool,
    /// Mouse motion in pixels since the last tick
    pub mouse_delta: Vec2,
    /// Wheel direction: 1 = up, -1 = down, 0 = none
    pub wheel: i32,
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::Escape, InputAction::Cancel);

        bindings
    }
}

impl InputBindings {
    /// Bind `key` to `action`, replacing any previous binding for that key
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Action bound to `key`, if any
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Input handler that processes raw events and accumulates per-tick state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Key bindings
    pub bindings: InputBindings,
    held: HashSet<InputAction>,
    just_pressed: HashSet<InputAction>,
    mouse_clicked: bool,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_action(key_code) else {
            return;
        };
        match state {
            ElementState::Pressed => self.press(action),
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }

    /// Handle a mouse button event. Any button counts as a click.
    pub fn handle_mouse_button(&mut self, _button: MouseButton, state: ElementState) {
        if state == ElementState::Pressed {
            self.mouse_clicked = true;
        }
    }

    /// Handle raw mouse movement
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
        };
    }

    fn axis(&self, positive: InputAction, negative: InputAction) -> f32 {
        let mut value = 0.0;
        if self.held.contains(&positive) {
            value += 1.0;
        }
        if self.held.contains(&negative) {
            value -= 1.0;
        }
        value
    }

    /// Build the snapshot for the coming tick
    pub fn snapshot(&self) -> InputSnapshot {
        let wheel = if self.scroll_delta > 0.0 {
            1
        } else if self.scroll_delta < 0.0 {
            -1
        } else {
            0
        };

        InputSnapshot {
            move_axes: Vec2::new(
                self.axis(InputAction::MoveRight, InputAction::MoveLeft),
                self.axis(InputAction::MoveForward, InputAction::MoveBackward),
            ),
            jump_pressed: self.just_pressed.contains(&InputAction::Jump),
            cancel_pressed: self.just_pressed.contains(&InputAction::Cancel),
            mouse_clicked: self.mouse_clicked,
            mouse_delta: self.mouse_delta,
            wheel,
        }
    }

    /// Clear edge-triggered and accumulated data (call after each tick)
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.mouse_clicked = false;
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(bindings.get_action(KeyCode::KeyW), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.get_action(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_axes_from_keys() {
        let mut input = InputHandler::new();
        input.handle_keyboard(key(KeyCode::KeyW), ElementState::Pressed);
        input.handle_keyboard(key(KeyCode::KeyD), ElementState::Pressed);
        assert_eq!(input.snapshot().move_axes, Vec2::new(1.0, 1.0));

        input.handle_keyboard(key(KeyCode::KeyA), ElementState::Pressed);
        assert_eq!(input.snapshot().move_axes, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_jump_is_an_edge() {
        let mut input = InputHandler::new();
        input.handle_keyboard(key(KeyCode::Space), ElementState::Pressed);
        assert!(input.snapshot().jump_pressed);

        input.end_frame();
        // Key repeat while held must not re-trigger
        input.handle_keyboard(key(KeyCode::Space), ElementState::Pressed);
        assert!(!input.snapshot().jump_pressed);
    }

    #[test]
    fn test_mouse_accumulates_until_end_frame() {
        let mut input = InputHandler::new();
        input.handle_mouse_motion((3.0, -1.0));
        input.handle_mouse_motion((2.0, 4.0));
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);

        let snapshot = input.snapshot();
        assert_eq!(snapshot.mouse_delta, Vec2::new(5.0, 3.0));
        assert_eq!(snapshot.wheel, -1);
        assert!(snapshot.mouse_clicked);

        input.end_frame();
        assert_eq!(input.snapshot(), InputSnapshot::default());
    }
}
