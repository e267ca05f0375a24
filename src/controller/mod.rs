pub mod input;
pub mod viewer;

pub use input::{Key, KeyAction, KeyBindings};
pub use viewer::ViewerController;
