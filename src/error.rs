use thiserror::Error;

/// Failures while fetching from the listing API. Callers only ever show a
/// generic message; the variant is for logs and tests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request unsuccessful: {0}")]
    Unsuccessful(String),
}

/// Failures while loading the worker fixture at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse worker fixture: {0}")]
    Parse(#[from] serde_json::Error),
}
