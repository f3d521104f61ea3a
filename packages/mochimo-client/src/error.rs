use thiserror::Error;

/// Errors raised from [`crate::client::MochimoClient`].
///
/// This is an explicitly external collaborator: no retry, no backoff, no
/// interpretation of business-level failure beyond HTTP status and JSON
/// shape.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned status {0}")]
    Status(reqwest::StatusCode),
}
