use glam::Vec3;

use crate::controller::input::{Key, KeyAction};
use crate::model::{Camera, CAMERA_SPEED};

/// Owns the camera and the running flag, and maps key events onto them.
///
/// Forward/back drive the z axis, left/right the x axis. A press pins that
/// axis to `±speed`, the paired release zeroes it, so holding forward and
/// back together resolves to whichever was pressed last; releasing either
/// stops the axis. The quit key clears the running flag, which the outer
/// loop checks at the top of every iteration.
pub struct ViewerController {
    pub camera: Camera,
    pub running: bool,
    speed: f32,
}

impl ViewerController {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            running: true,
            speed: CAMERA_SPEED,
        }
    }

    /// Pure state transition: (velocity, key, action) -> new velocity, or
    /// the running flag for the quit key. No timers, no debouncing.
    pub fn on_key(&mut self, key: Key, action: KeyAction) {
        match (key, action) {
            (Key::Forward, KeyAction::Press) => self.camera.velocity.z = self.speed,
            (Key::Forward, KeyAction::Release) => self.camera.velocity.z = 0.0,
            (Key::Back, KeyAction::Press) => self.camera.velocity.z = -self.speed,
            (Key::Back, KeyAction::Release) => self.camera.velocity.z = 0.0,
            (Key::Left, KeyAction::Press) => self.camera.velocity.x = -self.speed,
            (Key::Left, KeyAction::Release) => self.camera.velocity.x = 0.0,
            (Key::Right, KeyAction::Press) => self.camera.velocity.x = self.speed,
            (Key::Right, KeyAction::Release) => self.camera.velocity.x = 0.0,
            (Key::Quit, KeyAction::Press) => self.running = false,
            (Key::Quit, KeyAction::Release) => {}
        }
    }

    /// Advance the camera by one tick and return the new position.
    pub fn advance_camera(&mut self) -> Vec3 {
        self.camera.advance();
        self.camera.position
    }
}

impl Default for ViewerController {
    fn default() -> Self {
        Self::new()
    }
}
