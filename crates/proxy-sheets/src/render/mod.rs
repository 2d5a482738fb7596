//! Rendering of laid-out sheets
//!
//! This module turns layout results into drawn pages:
//! - `Surface`: the page-based drawing primitives the renderers need
//! - `PdfSurface`: a `Surface` that builds a PDF with lopdf
//! - Sheet renderers that walk print pages and the overview sheet

mod pdf;
mod sheets;
mod xobject;

pub use pdf::PdfSurface;
pub use sheets::*;

use crate::layout::Rect;
use crate::types::{Result, Rgb};
use std::path::Path;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Rgb,
    /// Outline colour; `None` paints the fill only
    pub stroke: Option<Rgb>,
}

impl RectStyle {
    pub fn fill(fill: Rgb) -> Self {
        Self { fill, stroke: None }
    }

    pub fn fill_and_stroke(fill: Rgb, stroke: Rgb) -> Self {
        Self {
            fill,
            stroke: Some(stroke),
        }
    }
}

/// A page-based drawing surface. All coordinates are millimetres.
///
/// Translations accumulate until `show_page`, which commits the current
/// page and starts a fresh one with the origin back at the page corner.
pub trait Surface {
    fn translate(&mut self, dx_mm: f32, dy_mm: f32);

    fn rect(&mut self, rect: Rect, style: RectStyle);

    /// Draw the image file stretched over `rect`
    fn image(&mut self, path: &Path, rect: Rect) -> Result<()>;

    /// Draw `text` with its baseline starting at (`x_mm`, `y_mm`)
    fn text(&mut self, x_mm: f32, y_mm: f32, text: &str, size_pt: f32, color: Rgb);

    fn show_page(&mut self);

    /// Pages committed so far
    fn page_count(&self) -> usize;
}
