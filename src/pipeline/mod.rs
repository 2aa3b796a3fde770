//! Pipeline
//!
//! Connects the session to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! input event → TraceSession → signals → render effect → FrameSink
//!                                    ↘ structure / pointer effects → LayoutMapper
//! ```
//!
//! ## Key Design Principles
//!
//! - **Pure frame building**: [`build_frame`] reads no signals
//! - **Side effects in effects**: only the render effect touches the hit grid,
//!   the published geometry and the sink
//! - **Host-supplied time**: the settle timer is polled, never threaded

pub mod frame;
pub mod mount;
pub mod terminal;

pub use frame::{ARRAY_TOP, FrameResult, FrameView, TITLE, build_frame, pointer_color};
pub use mount::{FrameSink, GeometryHandle, TraceApp, run};
pub use terminal::{TerminalSetup, detect_terminal_size};
