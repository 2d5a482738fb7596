use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Image for {0} not found")]
    NotFound(String),
    #[error("HTTP error fetching {name}: {message}")]
    Http { name: String, message: String },
    #[error("Image for {name} is larger than {limit} bytes")]
    TooLarge { name: String, limit: u64 },
    #[error("Card name {0:?} does not map to a file inside the image cache")]
    UnsafeName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// A card that could not be fetched, and why
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of filling the image cache for one deck
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    /// Distinct cards that already had an image
    pub already_cached: usize,
    /// Cards downloaded during this run
    pub fetched: Vec<String>,
    pub failed: Vec<FetchFailure>,
}
