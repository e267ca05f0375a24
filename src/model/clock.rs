use std::time::Instant;

/// Monotonic frame clock. The start timestamp is captured once, when the
/// render loop is initialized; elapsed time is reported in whole
/// milliseconds, truncated, matching the scalar the shader receives.
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock started, truncated to a whole number.
    pub fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic_and_non_negative() {
        let clock = FrameClock::start();
        let a = clock.elapsed_millis();
        let b = clock.elapsed_millis();
        assert!(b >= a);
    }

    #[test]
    fn elapsed_truncates_to_whole_milliseconds() {
        let clock = FrameClock::start();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(clock.elapsed_millis() >= 2);
    }
}
