//! Layout Module
//!
//! Geometry for the box row and the mapping from pointer indices to marker
//! positions.
//!
//! # Architecture
//!
//! 1. [`compute_array_layout`] runs Taffy over the box row and returns an
//!    [`ArrayGeometry`] snapshot (container + per-box bounds)
//! 2. The host publishes the snapshot behind a shared handle after each frame
//! 3. [`LayoutMapper`] reads that handle through [`GeometryProvider`] and
//!    derives box width and marker placements
//! 4. [`SettleTimer`] defers a second measurement after swaps and resets

mod geometry;
mod mapper;
mod settle;
mod taffy_bridge;
mod text_measure;

pub use geometry::{Bounds, GeometryProvider};
pub use mapper::{LayoutMapper, Marker, MarkerPlacement};
pub use settle::SettleTimer;
pub use taffy_bridge::{ArrayGeometry, ArrayLayoutStyle, compute_array_layout};
pub use text_measure::{char_width, string_width, truncate_to_width};
