pub mod camera;
pub mod clock;

pub use camera::{Camera, CAMERA_SPEED};
pub use clock::FrameClock;
