use glam::Vec3;

/// Units added to one velocity axis while its movement key is held.
pub const CAMERA_SPEED: f32 = 0.05;

/// Free-floating camera driven by per-tick velocity.
///
/// Velocity is a displacement per tick, not per second: each axis is always
/// exactly `-CAMERA_SPEED`, `0.0` or `+CAMERA_SPEED`, and `advance` applies
/// it once per rendered frame. Frame-rate variance therefore changes the
/// apparent speed; that coupling is intentional.
pub struct Camera {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    /// Apply one tick of movement.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_adds_velocity_once_per_tick() {
        let mut camera = Camera::new();
        camera.velocity = Vec3::new(CAMERA_SPEED, 0.0, -CAMERA_SPEED);

        for _ in 0..3 {
            camera.advance();
        }

        assert_eq!(camera.position.x, 3.0 * CAMERA_SPEED);
        assert_eq!(camera.position.y, 0.0);
        assert_eq!(camera.position.z, -3.0 * CAMERA_SPEED);
    }

    #[test]
    fn zero_velocity_leaves_position_unchanged() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(1.0, 2.0, 3.0);

        camera.advance();

        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
