use thiserror::Error;

/// Why a suggestion fetch produced no result. The controller reacts to every
/// variant the same way; the distinction only matters for logs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("suggestion endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed suggestion payload: {0}")]
    MalformedPayload(String),
}
