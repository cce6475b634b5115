use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use super::Authentication;
use crate::error::ClientError;
use crate::fetch::client::HttpClient;

/// An [`HttpClient`] wrapper that asks an [`Authentication`] handle for the
/// current credential and sets it as the `Authorization` header.
///
/// An `Authorization` header already present on the request is replaced.
pub struct Authorized<C> {
    pub inner: C,
    pub authentication: Arc<dyn Authentication>,
}

impl<C> Authorized<C> {
    pub fn new(inner: C, authentication: Arc<dyn Authentication>) -> Self {
        Self {
            inner,
            authentication,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Authorized<C> {
    async fn execute(&self, mut req: reqwest::Request) -> Result<reqwest::Response, ClientError> {
        let value = self.authentication.authorization().await?;
        req.headers_mut().insert(AUTHORIZATION, value);
        self.inner.execute(req).await
    }
}
