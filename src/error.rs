//! Error types.
//!
//! Nothing a learner does can fail. These cover the ambient edges: terminal
//! I/O, a rejected [`TraceConfig`](crate::config::TraceConfig), and the layout
//! engine.

use std::io;

use thiserror::Error;

/// Why a [`TraceConfig`](crate::config::TraceConfig) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("initial data must contain at least one symbol")]
    EmptyData,

    #[error("pointer `{name}` starts at {index}, outside 0..{len}")]
    PointerOutOfBounds {
        name: &'static str,
        index: usize,
        len: usize,
    },

    #[error("box size must be at least 3x3 cells, got {width}x{height}")]
    BoxTooSmall { width: u16, height: u16 },

    #[error("minimum box width {min} exceeds box width {width}")]
    MinWidthExceedsWidth { min: u16, width: u16 },
}

/// Top-level error for the trainer.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("layout engine failed: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, TraceError>;
