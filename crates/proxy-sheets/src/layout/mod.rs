//! Layout calculation for proxy sheets
//!
//! This module handles the geometry of both output documents:
//! - Print pages (fixed 3x3 grid sized for cutting)
//! - Overview sheet (one square grid scaled to fit every distinct card)
//!
//! Everything here is pure and works in millimetres relative to the
//! centered grid origin; rendering lives in `crate::render`.

mod overview;
mod print;
mod types;

pub use overview::*;
pub use print::*;
pub use types::*;
