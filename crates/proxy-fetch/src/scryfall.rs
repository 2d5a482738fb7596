//! Card images from the Scryfall API
//!
//! `cards/named?exact=...&format=image` answers with a redirect straight to
//! the image file, so one request per card is enough.

use crate::types::{FetchError, Result};
use crate::ImageSource;
use std::io::Read;
use std::time::Duration;

pub const SCRYFALL_API: &str = "https://api.scryfall.com";

const USER_AGENT: &str = concat!("mtgproxy/", env!("CARGO_PKG_VERSION"));

/// Largest image body accepted (bytes)
const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

/// Image sizes offered by Scryfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageVersion {
    Small,
    Normal,
    #[default]
    Large,
    Png,
}

impl ImageVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageVersion::Small => "small",
            ImageVersion::Normal => "normal",
            ImageVersion::Large => "large",
            ImageVersion::Png => "png",
        }
    }
}

pub struct ScryfallSource {
    agent: ureq::Agent,
    base_url: String,
    version: ImageVersion,
}

impl Default for ScryfallSource {
    fn default() -> Self {
        Self::new(SCRYFALL_API)
    }
}

impl ScryfallSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: ImageVersion::default(),
        }
    }

    pub fn with_version(mut self, version: ImageVersion) -> Self {
        self.version = version;
        self
    }

    fn named_url(&self) -> String {
        format!("{}/cards/named", self.base_url)
    }
}

impl ImageSource for ScryfallSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let response = self
            .agent
            .get(&self.named_url())
            .query("exact", name)
            .query("format", "image")
            .query("version", self.version.as_str())
            .set("Accept", "image/*")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(404, _) => FetchError::NotFound(name.to_string()),
                e => FetchError::Http {
                    name: name.to_string(),
                    message: e.to_string(),
                },
            })?;

        if !response.content_type().starts_with("image/") {
            return Err(FetchError::Http {
                name: name.to_string(),
                message: format!("unexpected content type {}", response.content_type()),
            });
        }

        read_image_body(response.into_reader(), name, MAX_IMAGE_BYTES)
    }
}

/// Read a whole body, failing rather than truncating past `limit` bytes
fn read_image_body(reader: impl Read, name: &str, limit: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(FetchError::TooLarge {
            name: name.to_string(),
            limit,
        });
    }
    Ok(bytes)
}
