use crate::ImageSource;
use crate::types::*;
use log::{info, warn};
use proxy_sheets::{Deck, ImageResolver};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause between two requests to the source
    pub request_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(100),
        }
    }
}

/// Download every distinct card of the deck that has no cached image yet.
///
/// A card that cannot be fetched is reported, not returned as an error;
/// only failing to create the cache directory aborts.
pub async fn fetch_missing_images<S>(
    deck: &Deck,
    images_dir: impl AsRef<Path>,
    source: S,
    options: &FetchOptions,
) -> Result<FetchReport>
where
    S: ImageSource + Send + 'static,
{
    let images_dir = images_dir.as_ref().to_owned();
    tokio::fs::create_dir_all(&images_dir).await?;

    let names: Vec<String> = deck.distinct().into_iter().map(|e| e.name).collect();
    let options = options.clone();

    let report = tokio::task::spawn_blocking(move || {
        fetch_missing_images_blocking(&names, &images_dir, &source, &options)
    })
    .await?;

    Ok(report)
}

/// Synchronous core of `fetch_missing_images`; `images_dir` must exist
pub fn fetch_missing_images_blocking(
    names: &[String],
    images_dir: &Path,
    source: &impl ImageSource,
    options: &FetchOptions,
) -> FetchReport {
    let resolver = ImageResolver::new(images_dir);
    let missing = resolver.missing(names.iter().map(String::as_str));

    let distinct: HashSet<&String> = names.iter().collect();

    let mut report = FetchReport {
        already_cached: distinct.len() - missing.len(),
        ..Default::default()
    };

    for (i, name) in missing.into_iter().enumerate() {
        if i > 0 && !options.request_delay.is_zero() {
            std::thread::sleep(options.request_delay);
        }

        let path = resolver.path_for(&name);
        match fetch_one(source, &name, images_dir, &path) {
            Ok(()) => {
                info!("Downloaded image for {} to {}", name, path.display());
                report.fetched.push(name);
            }
            Err(e) => {
                warn!("Could not fetch image for {}: {}", name, e);
                report.failed.push(FetchFailure {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

fn fetch_one(
    source: &impl ImageSource,
    name: &str,
    images_dir: &Path,
    path: &Path,
) -> Result<()> {
    // Names with path separators or `..` would land outside the cache
    if path.parent() != Some(images_dir) {
        return Err(FetchError::UnsafeName(name.to_string()));
    }

    let bytes = source.fetch(name)?;

    let mut file = tempfile::NamedTempFile::new_in(images_dir)?;
    file.write_all(&bytes)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
