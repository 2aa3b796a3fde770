//! State Module - Runtime input state
//!
//! - **Keyboard** - Event types and the trainer's key bindings
//! - **Mouse** - Event types and the HitGrid
//! - **Input** - crossterm conversion and polling

mod input;
mod keyboard;
mod mouse;

pub use input::*;
pub use keyboard::*;
pub use mouse::*;
