//! Mapping card names onto the local image cache

use crate::constants::IMAGE_EXTENSION;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expected cache path for a card; apostrophes never appear in file names
pub fn image_path(images_dir: impl AsRef<Path>, name: &str) -> PathBuf {
    let file_stem = name.replace('\'', "");
    images_dir
        .as_ref()
        .join(format!("{}.{}", file_stem, IMAGE_EXTENSION))
}

/// Looks card images up in a flat cache directory
#[derive(Debug, Clone)]
pub struct ImageResolver {
    images_dir: PathBuf,
}

impl ImageResolver {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Cache path for the card, whether or not it exists yet
    pub fn path_for(&self, name: &str) -> PathBuf {
        image_path(&self.images_dir, name)
    }

    /// Path to a cached image, if the file is present right now
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let path = self.path_for(name);
        path.is_file().then_some(path)
    }

    /// Distinct names without a cached image, in the order given
    pub fn missing<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter(|name| seen.insert(*name))
            .filter(|name| self.resolve(name).is_none())
            .map(str::to_string)
            .collect()
    }
}
