//! # partition-trace
//!
//! Interactive terminal trainer for three-way (Dutch national flag)
//! partitioning.
//!
//! The learner swaps boxes by clicking two of them, then steps the `lt`, `i`
//! and `gt` pointers with explicit controls. Nothing checks whether the moves
//! follow the algorithm; the trainer only keeps the pointer markers lined up
//! under the right boxes as the row wraps and reflows.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity and [taffy](https://docs.rs/taffy) for layout.
//!
//! ## Modules
//!
//! - [`model`] - Items, the array model, pointer state, the session
//! - [`layout`] - Taffy layout of the box row, the layout mapper, the settle timer
//! - [`state`] - Keyboard and mouse events, hit grid, key bindings
//! - [`renderer`] - Frame buffer and diffed terminal output
//! - [`pipeline`] - Frame building, reactive effects, terminal lifecycle
//! - [`config`] / [`error`] - Session configuration and error types

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

pub use config::TraceConfig;
pub use error::{ConfigError, Result, TraceError};
pub use layout::{
    ArrayGeometry, ArrayLayoutStyle, Bounds, GeometryProvider, LayoutMapper, Marker,
    MarkerPlacement, SettleTimer, compute_array_layout,
};
pub use model::{
    Action, ActionOutcome, ArrayModel, ClickOutcome, Item, ItemId, PointerKind, PointerState,
    Pointers, TraceSession,
};
pub use pipeline::{FrameSink, TraceApp, run};
pub use renderer::{DiffRenderer, FrameBuffer};
pub use types::{Attr, Cell, Rgba};
