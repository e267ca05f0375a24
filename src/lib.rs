// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod picker;
pub mod preprocess;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;
