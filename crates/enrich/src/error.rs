use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("wikimedia error: {0}")]
    Wikimedia(#[from] wikimedia::WikimediaError),

    #[error("search hit {pageid} has no fetched page record")]
    MissingPage { pageid: u64 },
}

pub type Result<T> = std::result::Result<T, EnrichError>;
