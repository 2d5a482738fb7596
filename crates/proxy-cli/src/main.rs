mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use proxy_fetch::{FetchOptions, ImageVersion, ScryfallSource};
use proxy_sheets::layout::{overview_multiplicator, print_page_count};
use proxy_sheets::{PaperSize, ProxyError, ProxyOptions, Rgb};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mtgproxy", about = "Print sheets of proxy cards from a deck list", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the print and overview PDFs for a deck
    Print {
        /// Deck list file name, looked up in the decks directory
        deck: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Use only images already in the cache
        #[arg(long)]
        no_fetch: bool,

        /// Image size to download
        #[arg(long, default_value = "large", value_enum)]
        image_version: ImageVersionArg,

        /// Delay between image downloads in milliseconds
        #[arg(long, default_value = "100")]
        request_delay_ms: u64,

        /// Write only the overview document
        #[arg(long)]
        summary_only: bool,
    },

    /// Show deck statistics without generating anything
    Summary {
        /// Deck list file name, looked up in the decks directory
        deck: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON options file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing deck lists
    #[arg(long)]
    decks_dir: Option<PathBuf>,

    /// Card image cache directory
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Directory for generated PDFs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Card width in mm
    #[arg(long)]
    card_width: Option<f32>,

    /// Card height in mm
    #[arg(long)]
    card_height: Option<f32>,

    /// Horizontal gap on each side of a card in mm
    #[arg(long)]
    h_spacing: Option<f32>,

    /// Vertical gap on each side of a card in mm
    #[arg(long)]
    v_spacing: Option<f32>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page background (#rrggbb, black, white, gray)
    #[arg(long)]
    fill: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    A4,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageVersionArg {
    Small,
    Normal,
    Large,
    Png,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::A4 => Self::A4,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<ImageVersionArg> for ImageVersion {
    fn from(arg: ImageVersionArg) -> Self {
        match arg {
            ImageVersionArg::Small => Self::Small,
            ImageVersionArg::Normal => Self::Normal,
            ImageVersionArg::Large => Self::Large,
            ImageVersionArg::Png => Self::Png,
        }
    }
}

impl SettingsArgs {
    async fn into_options(self) -> Result<ProxyOptions> {
        let mut options = match &self.config {
            Some(path) => ProxyOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ProxyOptions::default(),
        };

        if let Some(dir) = self.decks_dir {
            options.decks_dir = dir;
        }
        if let Some(dir) = self.images_dir {
            options.images_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            options.output_dir = dir;
        }
        if let Some(width) = self.card_width {
            options.card_width_mm = width;
        }
        if let Some(height) = self.card_height {
            options.card_height_mm = height;
        }
        if let Some(spacing) = self.h_spacing {
            options.horizontal_spacing_mm = spacing;
        }
        if let Some(spacing) = self.v_spacing {
            options.vertical_spacing_mm = spacing;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(fill) = &self.fill {
            options.page_fill = fill.parse::<Rgb>()?;
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = CliLogger::from_verbosity(cli.verbose).init() {
        eprintln!("Failed to initialise logging: {}", e);
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ProxyError>() {
                Some(ProxyError::SaveFailed { path, .. }) => eprintln!(
                    "Save of the file {} failed. If you have the PDF file opened, close it.",
                    path.display()
                ),
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Print {
            deck,
            settings,
            no_fetch,
            image_version,
            request_delay_ms,
            summary_only,
        } => {
            let options = settings.into_options().await?;
            let deck_path = options.decks_dir.join(&deck);

            if !no_fetch {
                let deck = proxy_sheets::load_deck(&deck_path).await?;
                let source = ScryfallSource::default().with_version(image_version.into());
                let fetch_options = FetchOptions {
                    request_delay: std::time::Duration::from_millis(request_delay_ms),
                };
                let report = proxy_fetch::fetch_missing_images(
                    &deck,
                    &options.images_dir,
                    source,
                    &fetch_options,
                )
                .await
                .with_context(|| {
                    format!("Failed to prepare image cache {}", options.images_dir.display())
                })?;

                if !report.fetched.is_empty() {
                    println!("Downloaded {} card images", report.fetched.len());
                }
                for failure in &report.failed {
                    println!("Image for {} not found: {}", failure.name, failure.reason);
                }
            }

            if summary_only {
                let deck = proxy_sheets::load_deck(&deck_path).await?;
                let outputs = proxy_sheets::output_paths(&deck_path, &options.output_dir);
                proxy_sheets::create_output_dir(&options.output_dir).await?;
                let report =
                    proxy_sheets::write_overview_sheet(&deck, &options, &outputs.overview)
                        .await?;

                println!("{} saved.", outputs.overview.display());
                print_missing(report.missing.iter().map(String::as_str).collect());
            } else {
                let report = proxy_sheets::convert(&deck_path, &options).await?;

                println!("{} saved.", report.outputs.print.display());
                println!("{} saved.", report.outputs.overview.display());
                print_missing(report.missing_images());
            }
        }

        Commands::Summary { deck, settings } => {
            let options = settings.into_options().await?;
            let deck_path = options.decks_dir.join(&deck);
            let deck = proxy_sheets::load_deck(&deck_path).await?;
            let distinct = deck.distinct();

            println!("Deck: {}", deck_path.display());
            println!("  Cards: {}", deck.len());
            println!("  Distinct cards: {}", distinct.len());
            println!("  Print pages: {}", print_page_count(deck.len()));
            let side = overview_multiplicator(distinct.len());
            println!("  Overview grid: {}x{}", side, side);
            for entry in &distinct {
                println!("  {:>4}x {}", entry.count, entry.name);
            }
        }
    }

    Ok(())
}

fn print_missing(missing: Vec<&str>) {
    if !missing.is_empty() {
        println!("Left blank ({} without image):", missing.len());
        for name in missing {
            println!("  {}", name);
        }
    }
}
