//! Error type shared by every layer of the client.

use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

/// Errors surfaced to callers of [`crate::client::MyBmwClient`].
///
/// `401 Unauthorized` and `429 Too Many Requests` are never turned into a
/// [`ClientError::Status`]; they reach the caller as ordinary responses.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout or body-read failure from the underlying client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unexpected `4xx`/`5xx` response.
    #[error("server returned {status} for {url}")]
    Status {
        status: StatusCode,
        url: Url,
        body: Bytes,
    },

    /// The authentication handle could not produce a credential.
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Parse(String),
}

impl ClientError {
    /// Status code carried by a [`ClientError::Status`] or a reqwest status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Response body of a [`ClientError::Status`], for diagnostics.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            ClientError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ClientError {
    fn from(value: reqwest::header::InvalidHeaderValue) -> Self {
        ClientError::InvalidHeader(value.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderName> for ClientError {
    fn from(value: reqwest::header::InvalidHeaderName) -> Self {
        ClientError::InvalidHeader(value.to_string())
    }
}
