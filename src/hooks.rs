//! Response hooks run by [`crate::client::MyBmwClient`] on every response.
//!
//! Hooks are invoked in registration order once the body has been read. A
//! hook returning an error stops the chain and the error is handed to the
//! caller instead of the response.

use std::path::PathBuf;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::StatusCode;
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::headers::X_USER_AGENT;
use crate::models::CarBrand;
use crate::response::ApiResponse;

#[async_trait]
pub trait ResponseHook: Send + Sync {
    async fn on_response(&self, response: &ApiResponse) -> Result<(), ClientError>;
}

/// Plain functions and closures can be registered as hooks directly.
#[async_trait]
impl<F> ResponseHook for F
where
    F: Fn(&ApiResponse) -> Result<(), ClientError> + Send + Sync,
{
    async fn on_response(&self, response: &ApiResponse) -> Result<(), ClientError> {
        (self)(response)
    }
}

/// Name of the log file a response is written to.
///
/// The last segment of the request path, percent-decoded, followed by every
/// brand found in the request's `x-user-agent`, joined with `_`. All digits
/// in the result become `0`, so responses for different VINs share one file.
/// A decoded `/` becomes `_` so the name stays inside the log directory.
pub fn log_file_name(response: &ApiResponse) -> String {
    let request = response.request();
    let x_user_agent = request
        .headers
        .get(X_USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let segment = request.url.path().rsplit('/').next().unwrap_or_default();

    let mut parts = vec![percent_decode_str(segment).decode_utf8_lossy().into_owned()];
    parts.extend(
        CarBrand::iter()
            .map(|brand| brand.to_string())
            .filter(|brand| x_user_agent.contains(brand.as_str())),
    );

    parts
        .join("_")
        .chars()
        .map(|c| match c {
            '0'..='9' => '0',
            '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// Writes each response body to a file under `path`, overwriting earlier
/// responses with the same [`log_file_name`].
///
/// The body is written to a temporary file and renamed into place, so
/// concurrent responses sharing a name never interleave. Write failures are
/// logged and otherwise ignored.
pub struct LogResponseHook {
    path: PathBuf,
}

impl LogResponseHook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResponseHook for LogResponseHook {
    async fn on_response(&self, response: &ApiResponse) -> Result<(), ClientError> {
        let name = log_file_name(response);
        let file = self.path.join(&name);
        let partial = self.path.join(format!(".{name}.{}.tmp", Uuid::new_v4()));

        let written: std::io::Result<()> = async {
            tokio::fs::create_dir_all(&self.path).await?;
            tokio::fs::write(&partial, response.bytes()).await?;
            tokio::fs::rename(&partial, &file).await
        }
        .await;
        if written.is_err() {
            let _ = tokio::fs::remove_file(&partial).await;
        }

        match written {
            Ok(()) => debug!(file = %file.display(), bytes = response.bytes().len(), "Response logged"),
            Err(e) => warn!(file = %file.display(), error = %e, "Failed to log response"),
        }
        Ok(())
    }
}

/// Raises a [`ClientError::Status`] for `4xx`/`5xx` responses.
///
/// `401` is left for the authentication layer and `429` for caller backoff,
/// so both pass through as ordinary responses.
pub struct RaiseForStatusHook;

#[async_trait]
impl ResponseHook for RaiseForStatusHook {
    async fn on_response(&self, response: &ApiResponse) -> Result<(), ClientError> {
        let status = response.status();
        if response.is_error()
            && status != StatusCode::UNAUTHORIZED
            && status != StatusCode::TOO_MANY_REQUESTS
        {
            return Err(response.clone().into_status_error());
        }
        Ok(())
    }
}
