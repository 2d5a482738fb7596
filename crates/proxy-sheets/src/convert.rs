//! Deck-to-PDF conversion
//!
//! Layout and rendering are CPU-bound and run on the blocking pool; reading
//! the deck and writing the documents go through `tokio::fs`.

use crate::constants::{DOCUMENT_EXTENSION, OVERVIEW_SUFFIX, PRINT_SUFFIX};
use crate::deck::{Deck, load_deck};
use crate::layout::{PageGeometry, layout_overview, layout_print_pages};
use crate::options::ProxyOptions;
use crate::render::{
    PdfSurface, RenderReport, render_overview_document, render_print_document,
};
use crate::resolve::ImageResolver;
use crate::types::*;
use log::info;
use std::path::{Path, PathBuf};

/// Where the two documents for one deck are written
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub print: PathBuf,
    pub overview: PathBuf,
}

/// Output file names derived from the deck file name
pub fn output_paths(input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> OutputPaths {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_dir = output_dir.as_ref();

    OutputPaths {
        print: output_dir.join(format!("{}{}.{}", stem, PRINT_SUFFIX, DOCUMENT_EXTENSION)),
        overview: output_dir.join(format!(
            "{}{}.{}",
            stem, OVERVIEW_SUFFIX, DOCUMENT_EXTENSION
        )),
    }
}

/// Summary of a full conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub outputs: OutputPaths,
    pub cards: usize,
    pub distinct_cards: usize,
    pub print: RenderReport,
    pub overview: RenderReport,
}

impl ConversionReport {
    /// Distinct cards that were left blank in either document
    pub fn missing_images(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for name in self.print.missing.iter().chain(&self.overview.missing) {
            if !missing.contains(&name.as_str()) {
                missing.push(name);
            }
        }
        missing
    }
}

/// Render the print document to PDF bytes
pub fn print_sheet_bytes(deck: &Deck, options: &ProxyOptions) -> Result<(Vec<u8>, RenderReport)> {
    let geometry = PageGeometry::from_options(options);
    let resolver = ImageResolver::new(&options.images_dir);
    let pages = layout_print_pages(deck, &geometry);

    let mut surface = PdfSurface::new(geometry.page_width_mm, geometry.page_height_mm);
    let report = render_print_document(
        &pages,
        &geometry,
        options.page_fill,
        &resolver,
        &mut surface,
    );

    Ok((save_to_bytes(surface)?, report))
}

/// Render the overview document to PDF bytes
pub fn overview_sheet_bytes(
    deck: &Deck,
    options: &ProxyOptions,
) -> Result<(Vec<u8>, RenderReport)> {
    let geometry = PageGeometry::from_options(options);
    let resolver = ImageResolver::new(&options.images_dir);
    let sheet = layout_overview(deck, &geometry);

    let mut surface = PdfSurface::new(geometry.page_width_mm, geometry.page_height_mm);
    let report = render_overview_document(
        &sheet,
        &geometry,
        options.badge_font_size_pt,
        &resolver,
        &mut surface,
    );

    Ok((save_to_bytes(surface)?, report))
}

fn save_to_bytes(surface: PdfSurface) -> Result<Vec<u8>> {
    let mut doc = surface.finish();
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Write the print document for a deck
pub async fn write_print_sheet(
    deck: &Deck,
    options: &ProxyOptions,
    output_path: impl AsRef<Path>,
) -> Result<RenderReport> {
    let deck = deck.clone();
    let options = options.clone();

    let (bytes, report) =
        tokio::task::spawn_blocking(move || print_sheet_bytes(&deck, &options)).await??;

    write_document(output_path.as_ref(), bytes).await?;
    Ok(report)
}

/// Write the overview document for a deck
pub async fn write_overview_sheet(
    deck: &Deck,
    options: &ProxyOptions,
    output_path: impl AsRef<Path>,
) -> Result<RenderReport> {
    let deck = deck.clone();
    let options = options.clone();

    let (bytes, report) =
        tokio::task::spawn_blocking(move || overview_sheet_bytes(&deck, &options)).await??;

    write_document(output_path.as_ref(), bytes).await?;
    Ok(report)
}

async fn write_document(path: &Path, bytes: Vec<u8>) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ProxyError::SaveFailed {
            path: path.to_owned(),
            source,
        })?;
    info!("{} saved", path.display());
    Ok(())
}

/// Create the output directory and any missing parents
pub async fn create_output_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ProxyError::CreateDir {
            path: dir.to_owned(),
            source,
        })
}

/// Convert a deck list file into its print and overview documents.
///
/// The print document is fully written before the overview is started, so
/// a failed overview write never touches the print output.
pub async fn convert(deck_path: impl AsRef<Path>, options: &ProxyOptions) -> Result<ConversionReport> {
    options.validate()?;

    let deck_path = deck_path.as_ref();
    let deck = load_deck(deck_path).await?;
    let outputs = output_paths(deck_path, &options.output_dir);

    create_output_dir(&options.output_dir).await?;

    let print = write_print_sheet(&deck, options, &outputs.print).await?;
    let overview = write_overview_sheet(&deck, options, &outputs.overview).await?;

    Ok(ConversionReport {
        cards: deck.len(),
        distinct_cards: deck.distinct().len(),
        outputs,
        print,
        overview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_use_deck_stem() {
        let paths = output_paths("decks/My Deck.txt", "out");
        assert_eq!(paths.print, Path::new("out").join("My Deck_print.pdf"));
        assert_eq!(paths.overview, Path::new("out").join("My Deck_overview.pdf"));
    }

    #[test]
    fn test_output_paths_without_extension() {
        let paths = output_paths("burn", "");
        assert_eq!(paths.print, PathBuf::from("burn_print.pdf"));
    }

    #[test]
    fn test_missing_images_are_merged() {
        let report = ConversionReport {
            outputs: output_paths("a.txt", "out"),
            cards: 3,
            distinct_cards: 3,
            print: RenderReport {
                pages: 1,
                images_drawn: 1,
                missing: vec!["B".to_string(), "C".to_string()],
            },
            overview: RenderReport {
                pages: 1,
                images_drawn: 1,
                missing: vec!["C".to_string(), "B".to_string()],
            },
        };
        assert_eq!(report.missing_images(), ["B", "C"]);
    }
}
