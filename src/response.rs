//! Fully buffered responses handed to hooks and callers.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ClientError;

/// The parts of the originating request a hook may inspect.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl RequestInfo {
    pub fn from_request(req: &reqwest::Request) -> Self {
        Self {
            method: req.method().clone(),
            url: req.url().clone(),
            headers: req.headers().clone(),
        }
    }
}

/// A response whose body has already been read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    request: RequestInfo,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(
        request: RequestInfo,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            request,
            url,
            status,
            headers,
            body,
        }
    }

    /// Reads the whole body of `response`.
    pub async fn read(
        request: RequestInfo,
        response: reqwest::Response,
    ) -> Result<Self, ClientError> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self::new(request, url, status, headers, body))
    }

    pub fn request(&self) -> &RequestInfo {
        &self.request
    }

    /// Final URL, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::Parse(format!("failed to parse response from {}: {e}", self.url))
        })
    }

    /// `true` for `4xx` and `5xx` statuses.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Converts the response into a [`ClientError::Status`].
    pub fn into_status_error(self) -> ClientError {
        ClientError::Status {
            status: self.status,
            url: self.url,
            body: self.body,
        }
    }
}
