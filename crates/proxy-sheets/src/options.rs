use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a conversion run needs to know about geometry and locations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProxyOptions {
    // Card geometry (mm)
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    pub horizontal_spacing_mm: f32,
    pub vertical_spacing_mm: f32,

    // Page
    pub paper_size: PaperSize,
    pub page_fill: Rgb,

    // Overview badge
    pub badge_font_size_pt: f32,

    // Locations
    pub decks_dir: PathBuf,
    pub images_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            card_width_mm: DEFAULT_CARD_WIDTH_MM,
            card_height_mm: DEFAULT_CARD_HEIGHT_MM,
            horizontal_spacing_mm: DEFAULT_HORIZONTAL_SPACING_MM,
            vertical_spacing_mm: DEFAULT_VERTICAL_SPACING_MM,
            paper_size: PaperSize::Letter,
            page_fill: Rgb::BLACK,
            badge_font_size_pt: DEFAULT_BADGE_FONT_SIZE_PT,
            decks_dir: PathBuf::from("decks"),
            images_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ProxyOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ProxyError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProxyError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// A grid that is larger than the page is allowed; it simply runs off
    /// the sheet.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.card_width_mm) || !is_positive(self.card_height_mm) {
            return Err(ProxyError::Config(
                "Card dimensions must be positive and finite".to_string(),
            ));
        }

        if !is_non_negative(self.horizontal_spacing_mm)
            || !is_non_negative(self.vertical_spacing_mm)
        {
            return Err(ProxyError::Config(
                "Card spacing must be finite and not negative".to_string(),
            ));
        }

        let (page_width, page_height) = self.paper_size.dimensions_mm();
        if !is_positive(page_width) || !is_positive(page_height) {
            return Err(ProxyError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }

        if !is_positive(self.badge_font_size_pt) {
            return Err(ProxyError::Config(
                "Badge font size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
