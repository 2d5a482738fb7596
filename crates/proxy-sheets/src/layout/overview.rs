//! Overview sheet layout
//!
//! Every distinct card appears once on a single page, shrunk so the whole
//! square grid occupies roughly the same area as three print-size cards
//! across. Each card carries a badge with its copy count.

use crate::constants::PRINT_GRID_SIZE;
use crate::deck::Deck;

use super::{GridPosition, PageGeometry, Rect};

/// One distinct card on the overview sheet
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCell {
    pub name: String,
    pub count: u32,
    pub grid_pos: GridPosition,
    /// Card image area
    pub card: Rect,
    /// White box behind the count label
    pub badge: Rect,
    /// Baseline start of the count label
    pub label_origin: (f32, f32),
}

impl OverviewCell {
    pub fn label(&self) -> String {
        format!("{}x", self.count)
    }
}

/// The full overview page
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewSheet {
    /// Side length of the square grid
    pub multiplicator: usize,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    pub cells: Vec<OverviewCell>,
}

impl OverviewSheet {
    pub fn capacity(&self) -> usize {
        self.multiplicator * self.multiplicator
    }
}

/// Smallest grid side whose square holds `distinct` cards
pub fn overview_multiplicator(distinct: usize) -> usize {
    let root = distinct.isqrt();
    if root * root < distinct { root + 1 } else { root }
}

/// Lay out every distinct card of the deck, in first-appearance order
pub fn layout_overview(deck: &Deck, geometry: &PageGeometry) -> OverviewSheet {
    let distinct = deck.distinct();
    let multiplicator = overview_multiplicator(distinct.len());

    let (card_width_mm, card_height_mm) = if multiplicator == 0 {
        (geometry.card_width_mm, geometry.card_height_mm)
    } else {
        let scale = PRINT_GRID_SIZE as f32 / multiplicator as f32;
        (
            geometry.card_width_mm * scale,
            geometry.card_height_mm * scale,
        )
    };

    let cells = distinct
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let grid_pos = GridPosition::top_down(i, multiplicator);
            let (w, h) = (card_width_mm, card_height_mm);
            let x = grid_pos.col as f32 * w;
            let y = grid_pos.row as f32 * h;

            let badge = Rect::new(x + w / 10.0, y + h / 1.5, w / 4.0, h / 6.0);
            let label_origin = (badge.x + w / 20.0, badge.y + h / 20.0);

            OverviewCell {
                name: entry.name,
                count: entry.count,
                grid_pos,
                card: Rect::new(x, y, w, h),
                badge,
                label_origin,
            }
        })
        .collect();

    OverviewSheet {
        multiplicator,
        card_width_mm,
        card_height_mm,
        cells,
    }
}
