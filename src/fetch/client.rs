use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::error::ClientError;

/// Anything able to send a single request and hand back the raw response.
///
/// Decorators such as [`Authorized`](super::auth::Authorized) wrap another
/// `HttpClient` and adjust the request on the way through.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> Result<Response, ClientError>;
}
