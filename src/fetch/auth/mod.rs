//! Request authorization.
//!
//! [`Authentication`] is the handle a session is built around: it knows the
//! account's [`Region`] and produces the `Authorization` header value.
//! [`Authorized`] is the [`HttpClient`](crate::fetch::HttpClient) decorator
//! that stamps that value onto every outgoing request.

mod bearer;

pub use bearer::Authorized;

use async_trait::async_trait;
use reqwest::header::HeaderValue;

use crate::error::ClientError;
use crate::regions::Region;

/// Source of credentials for the vehicle API.
///
/// Implementations own token acquisition and refresh. `authorization` is
/// awaited before each request is sent and may itself perform network calls;
/// those calls do not pass through the client's response hooks.
#[async_trait]
pub trait Authentication: Send + Sync {
    /// Region the account is registered in.
    fn region(&self) -> Region;

    /// Full `Authorization` header value, e.g. `Bearer <token>`.
    async fn authorization(&self) -> Result<HeaderValue, ClientError>;
}

/// An [`Authentication`] backed by an already issued access token.
pub struct StaticToken {
    region: Region,
    header: HeaderValue,
}

impl StaticToken {
    pub fn new(region: Region, access_token: &str) -> Result<Self, ClientError> {
        if access_token.is_empty() {
            return Err(ClientError::Authentication(
                "access token must not be empty".to_string(),
            ));
        }
        let mut header = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
        header.set_sensitive(true);
        Ok(Self { region, header })
    }
}

#[async_trait]
impl Authentication for StaticToken {
    fn region(&self) -> Region {
        self.region
    }

    async fn authorization(&self) -> Result<HeaderValue, ClientError> {
        Ok(self.header.clone())
    }
}
