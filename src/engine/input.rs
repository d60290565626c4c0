// Keyboard input mapped to game actions
//
// Produces the two signals the player controller consumes each tick: a
// signed horizontal intent and edge-triggered jump/fire presses.

use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// All in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Fire,
}

/// Default keyboard bindings (WASD + arrows, space to jump, F to fire)
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyW, Action::Jump),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::Space, Action::Jump),
        (KeyCode::KeyF, Action::Fire),
    ]
}

/// Tracks which actions are held or were pressed this frame
#[derive(Debug)]
pub struct InputState {
    bindings: HashMap<KeyCode, Action>,
    held: HashSet<Action>,
    just_pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            held: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(action) = self.bindings.get(&key_code).copied() else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                if !event.repeat {
                    self.press(action);
                }
            }
            ElementState::Released => {
                self.release(action);
            }
        }
    }

    /// Register an action press directly (used by tests)
    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release directly
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Whether an action is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Whether an action was pressed since the last frame boundary
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Signed horizontal intent: -1.0 left, +1.0 right, 0.0 when idle
    /// or when both directions are held
    pub fn horizontal_accel(&self) -> f32 {
        let mut accel = 0.0;
        if self.is_held(Action::MoveLeft) {
            accel -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            accel += 1.0;
        }
        accel
    }

    /// End-of-frame cleanup; press edges only last one frame
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
