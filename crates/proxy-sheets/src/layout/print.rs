//! Print page layout
//!
//! Cards are cut from a fixed 3x3 grid centered on the page. Each card keeps
//! a spacing gutter on both sides so the cut lines fall on the background.

use crate::constants::{CARDS_PER_PAGE, PRINT_GRID_SIZE};
use crate::deck::Deck;
use crate::options::ProxyOptions;

use super::{CardPlacement, GridPosition, Rect};

// =============================================================================
// Geometry
// =============================================================================

/// Physical dimensions shared by both documents (mm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    pub horizontal_spacing_mm: f32,
    pub vertical_spacing_mm: f32,
}

impl PageGeometry {
    pub fn from_options(options: &ProxyOptions) -> Self {
        let (page_width_mm, page_height_mm) = options.paper_size.dimensions_mm();
        Self {
            page_width_mm,
            page_height_mm,
            card_width_mm: options.card_width_mm,
            card_height_mm: options.card_height_mm,
            horizontal_spacing_mm: options.horizontal_spacing_mm,
            vertical_spacing_mm: options.vertical_spacing_mm,
        }
    }

    /// The whole physical sheet
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width_mm, self.page_height_mm)
    }

    /// Offset (left, bottom) that centers the 3x3 block on the page
    pub fn padding(&self) -> (f32, f32) {
        let grid = PRINT_GRID_SIZE as f32;
        let block_width = grid * (self.card_width_mm + 2.0 * self.horizontal_spacing_mm);
        let block_height = grid * (self.card_height_mm + 2.0 * self.vertical_spacing_mm);
        (
            (self.page_width_mm - block_width) / 2.0,
            (self.page_height_mm - block_height) / 2.0,
        )
    }

    /// Card rectangle for a grid cell, relative to the padding origin.
    ///
    /// The vertical gutter term is `(2 * row - 2)`, which puts every row two
    /// gutters lower than a symmetric grid would.
    pub fn cell(&self, pos: GridPosition) -> Rect {
        let col = pos.col as f32;
        let row = pos.row as f32;
        Rect::new(
            col * self.card_width_mm + 2.0 * col * self.horizontal_spacing_mm,
            row * self.card_height_mm + (2.0 * row - 2.0) * self.vertical_spacing_mm,
            self.card_width_mm,
            self.card_height_mm,
        )
    }
}

// =============================================================================
// Pages
// =============================================================================

/// One print page worth of cards
#[derive(Debug, Clone, PartialEq)]
pub struct PrintPage {
    pub index: usize,
    pub cards: Vec<CardPlacement>,
}

/// Number of print pages a deck of `deck_len` cards needs
pub fn print_page_count(deck_len: usize) -> usize {
    deck_len.div_ceil(CARDS_PER_PAGE)
}

/// Split the deck into pages of nine and place each card.
///
/// Cards fill the top row left to right, then the middle row, then the
/// bottom row.
pub fn layout_print_pages(deck: &Deck, geometry: &PageGeometry) -> Vec<PrintPage> {
    deck.cards()
        .chunks(CARDS_PER_PAGE)
        .enumerate()
        .map(|(index, chunk)| PrintPage {
            index,
            cards: chunk
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let grid_pos = GridPosition::top_down(i, PRINT_GRID_SIZE);
                    CardPlacement {
                        name: name.clone(),
                        grid_pos,
                        rect: geometry.cell(grid_pos),
                    }
                })
                .collect(),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
