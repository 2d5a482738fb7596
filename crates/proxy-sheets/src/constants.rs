//! Shared constants for proxy sheet generation
//!
//! Layout works in millimetres; the PDF surface converts to points at the
//! last moment.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Deck Lists
// =============================================================================

/// Largest copy count accepted on one deck line; larger lines are skipped
pub const MAX_CARD_COUNT: u32 = 999;

// =============================================================================
// Print Sheet
// =============================================================================

/// Columns (and rows) of the print grid
pub const PRINT_GRID_SIZE: usize = 3;

/// Cards on one print page
pub const CARDS_PER_PAGE: usize = PRINT_GRID_SIZE * PRINT_GRID_SIZE;

/// Default card size (mm)
pub const DEFAULT_CARD_WIDTH_MM: f32 = 63.0;
pub const DEFAULT_CARD_HEIGHT_MM: f32 = 88.0;

/// Default gap on each side of a card (mm)
pub const DEFAULT_HORIZONTAL_SPACING_MM: f32 = 1.0;
pub const DEFAULT_VERTICAL_SPACING_MM: f32 = 1.0;

// =============================================================================
// Overview Badge
// =============================================================================

/// Badge font size (points)
pub const DEFAULT_BADGE_FONT_SIZE_PT: f32 = 12.0;

/// Badge outline width (points)
pub const BADGE_STROKE_WIDTH: f32 = 1.0;

// =============================================================================
// Files
// =============================================================================

pub const IMAGE_EXTENSION: &str = "jpg";
pub const PRINT_SUFFIX: &str = "_print";
pub const OVERVIEW_SUFFIX: &str = "_overview";
pub const DOCUMENT_EXTENSION: &str = "pdf";
