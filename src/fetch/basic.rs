use std::time::Duration;

use super::client::HttpClient;
use crate::error::ClientError;
use async_trait::async_trait;

/// Timeout applied to every request issued by the vehicle API client.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Plain reqwest transport with the fixed request timeout.
///
/// Redirects are not followed; `3xx` responses reach the hooks and the caller
/// as they are.
#[derive(Clone)]
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self(client))
    }
}

impl From<reqwest::Client> for BasicClient {
    fn from(client: reqwest::Client) -> Self {
        Self(client)
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> Result<reqwest::Response, ClientError> {
        Ok(self.0.execute(req).await?)
    }
}
