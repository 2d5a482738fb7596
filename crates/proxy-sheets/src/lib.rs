pub mod constants;
mod convert;
pub mod deck;
pub mod layout;
mod options;
pub mod render;
mod resolve;
mod types;

pub use convert::{
    ConversionReport, OutputPaths, convert, create_output_dir, output_paths, overview_sheet_bytes,
    print_sheet_bytes, write_overview_sheet, write_print_sheet,
};
pub use deck::{Deck, DeckEntry, load_deck, parse_deck_list};
pub use options::*;
pub use render::RenderReport;
pub use resolve::{ImageResolver, image_path};
pub use types::*;
