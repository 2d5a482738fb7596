//! Drawing print pages and the overview sheet onto a surface

use crate::layout::{OverviewSheet, PageGeometry, PrintPage, Rect};
use crate::resolve::ImageResolver;
use crate::types::Rgb;
use log::{debug, warn};

use super::{RectStyle, Surface};

/// What a render pass managed to draw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Pages committed to the surface
    pub pages: usize,
    /// Card images drawn
    pub images_drawn: usize,
    /// Distinct cards whose image was missing or unreadable, in first-seen order
    pub missing: Vec<String>,
}

impl RenderReport {
    fn record_missing(&mut self, name: &str) {
        if !self.missing.iter().any(|m| m == name) {
            self.missing.push(name.to_string());
        }
    }
}

/// Draw one card image, leaving the cell blank if the image is unusable
fn draw_card<S: Surface>(
    surface: &mut S,
    resolver: &ImageResolver,
    name: &str,
    rect: Rect,
    report: &mut RenderReport,
) {
    let Some(path) = resolver.resolve(name) else {
        warn!(
            "No image for {} at {}",
            name,
            resolver.path_for(name).display()
        );
        report.record_missing(name);
        return;
    };

    match surface.image(&path, rect) {
        Ok(()) => report.images_drawn += 1,
        Err(e) => {
            warn!("Skipping image for {}: {}", name, e);
            report.record_missing(name);
        }
    }
}

/// Render print pages: background fill, then up to nine cards, per page
pub fn render_print_document<S: Surface>(
    pages: &[PrintPage],
    geometry: &PageGeometry,
    page_fill: Rgb,
    resolver: &ImageResolver,
    surface: &mut S,
) -> RenderReport {
    let mut report = RenderReport::default();
    let (padding_left, padding_bottom) = geometry.padding();

    for page in pages {
        debug!("Print page {} ({} cards)", page.index + 1, page.cards.len());

        surface.rect(geometry.page_rect(), RectStyle::fill(page_fill));
        surface.translate(padding_left, padding_bottom);

        for card in &page.cards {
            draw_card(surface, resolver, &card.name, card.rect, &mut report);
        }

        surface.show_page();
    }

    report.pages = surface.page_count();
    report
}

/// Render the overview sheet as exactly one page
pub fn render_overview_document<S: Surface>(
    sheet: &OverviewSheet,
    geometry: &PageGeometry,
    badge_font_size_pt: f32,
    resolver: &ImageResolver,
    surface: &mut S,
) -> RenderReport {
    let mut report = RenderReport::default();
    let (padding_left, padding_bottom) = geometry.padding();

    debug!(
        "Overview {}x{} grid for {} cards",
        sheet.multiplicator,
        sheet.multiplicator,
        sheet.cells.len()
    );

    surface.translate(padding_left, padding_bottom);

    for cell in &sheet.cells {
        draw_card(surface, resolver, &cell.name, cell.card, &mut report);

        surface.rect(
            cell.badge,
            RectStyle::fill_and_stroke(Rgb::WHITE, Rgb::BLACK),
        );
        let (x, y) = cell.label_origin;
        surface.text(x, y, &cell.label(), badge_font_size_pt, Rgb::BLACK);
    }

    surface.show_page();

    report.pages = surface.page_count();
    report
}
