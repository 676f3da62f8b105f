use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikimediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("incomplete {endpoint} response: batchcomplete marker missing")]
    IncompleteResponse { endpoint: &'static str },

    #[error("unexpected {endpoint} response shape: {detail}")]
    UnexpectedShape {
        endpoint: &'static str,
        detail: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WikimediaError>;
