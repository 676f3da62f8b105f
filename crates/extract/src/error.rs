use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid extraction parameters: {0}")]
    InvalidParams(String),

    #[error("embedding request failed: {0}")]
    Embedding(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
