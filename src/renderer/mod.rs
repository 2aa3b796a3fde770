//! Renderer - FrameBuffer drawing and diffed terminal output.

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::{DiffRenderer, to_color};
