//! # Input Management
//!
//! Frame-coherent keyboard state. Raw key events arrive whenever the
//! platform delivers them; queries distinguish "held right now" from
//! "pressed since the previous frame", which is what edge-triggered
//! actions like animation triggers need.

use std::collections::HashSet;

/// Key codes for the keys the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    D,
    E,
    Q,
    S,
    W,
    Up,
    Down,
    Left,
    Right,
    Key1,
    Key2,
    Key3,
    Key4,
    Space,
    Escape,
}

/// Keyboard state with per-frame edge detection
///
/// Call [`begin_frame`] exactly once at the top of each frame, feed all
/// pending events through [`handle_key_input`], then query. A key held
/// across several frames reports [`is_down`] continuously but
/// [`just_pressed`] only on the frame its press event arrived.
///
/// [`begin_frame`]: InputManager::begin_frame
/// [`handle_key_input`]: InputManager::handle_key_input
/// [`is_down`]: InputManager::is_down
/// [`just_pressed`]: InputManager::just_pressed
#[derive(Debug, Default)]
pub struct InputManager {
    down: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear edge state carried over from the previous frame
    pub fn begin_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Record a key transition
    ///
    /// A press for a key already down is ignored, so platform key repeat
    /// does not retrigger edge-sensitive actions.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.down.insert(key) {
                self.just_pressed.insert(key);
            }
        } else {
            self.down.remove(&key);
        }
    }

    /// Whether `key` is currently held
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Whether `key` went from released to pressed this frame
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_edge_triggered_for_one_frame() {
        let mut input = InputManager::new();
        input.begin_frame();
        input.handle_key_input(KeyCode::Key1, true);
        assert!(input.is_down(KeyCode::Key1));
        assert!(input.just_pressed(KeyCode::Key1));

        input.begin_frame();
        assert!(input.is_down(KeyCode::Key1));
        assert!(!input.just_pressed(KeyCode::Key1));
    }

    #[test]
    fn key_repeat_does_not_retrigger() {
        let mut input = InputManager::new();
        input.begin_frame();
        input.handle_key_input(KeyCode::Space, true);
        input.begin_frame();
        input.handle_key_input(KeyCode::Space, true); // repeat from the platform
        assert!(!input.just_pressed(KeyCode::Space));
    }

    #[test]
    fn release_and_repress_triggers_again() {
        let mut input = InputManager::new();
        input.begin_frame();
        input.handle_key_input(KeyCode::Key2, true);
        input.begin_frame();
        input.handle_key_input(KeyCode::Key2, false);
        assert!(!input.is_down(KeyCode::Key2));

        input.begin_frame();
        input.handle_key_input(KeyCode::Key2, true);
        assert!(input.just_pressed(KeyCode::Key2));
    }
}
