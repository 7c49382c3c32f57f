#![forbid(unsafe_code)]

//! Core primitives for panelkit.
//!
//! Everything above this crate measures in device-independent pixels. The
//! types here carry no behaviour beyond arithmetic so that every other layer
//! (grid placement, chrome stacking, scroll guarding) agrees on one geometry.

pub mod geometry;

pub use geometry::{Rect, Sides, Size};
