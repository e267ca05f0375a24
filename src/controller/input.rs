//! Platform-independent key events and the binding table that maps
//! physical winit key codes onto them.

use winit::keyboard::KeyCode;

/// Logical keys the viewer reacts to. Everything else is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Key mapping configuration.
#[derive(Clone)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            quit: KeyCode::KeyQ,
        }
    }
}

impl KeyBindings {
    /// Translate a physical key code into a logical key, if bound.
    pub fn resolve(&self, code: KeyCode) -> Option<Key> {
        if code == self.forward {
            Some(Key::Forward)
        } else if code == self.back {
            Some(Key::Back)
        } else if code == self.left {
            Some(Key::Left)
        } else if code == self.right {
            Some(Key::Right)
        } else if code == self.quit {
            Some(Key::Quit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve_wasd_and_quit() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(KeyCode::KeyW), Some(Key::Forward));
        assert_eq!(bindings.resolve(KeyCode::KeyS), Some(Key::Back));
        assert_eq!(bindings.resolve(KeyCode::KeyA), Some(Key::Left));
        assert_eq!(bindings.resolve(KeyCode::KeyD), Some(Key::Right));
        assert_eq!(bindings.resolve(KeyCode::KeyQ), Some(Key::Quit));
        assert_eq!(bindings.resolve(KeyCode::KeyX), None);
    }
}
