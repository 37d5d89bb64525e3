use thiserror::Error;

/// Custom error type for API calls, allow us to differentiate between fatal errors and the
/// ones we can retry.
///
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error {status} {reason}: {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("Rate limited (429 Too Many Requests): {0}")]
    RateLimited(String),
    #[error("Still rate limited after {0} retries")]
    RetriesExhausted(usize),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Can not decode answer from {path}: {err}")]
    Decode { path: String, err: serde_json::Error },
    #[error("Missing API token")]
    NoToken,
    #[error("Invalid API token: {0}")]
    BadToken(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Errors from the output side.
///
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Can not write {0}: {1}")]
    Io(String, std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
