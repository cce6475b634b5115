//! The configured vehicle API client.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Request};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::fetch::auth::Authorized;
use crate::fetch::{BasicClient, HTTP_TIMEOUT, HttpClient};
use crate::headers::default_headers;
use crate::hooks::{LogResponseHook, RaiseForStatusHook, ResponseHook};
use crate::models::CarBrand;
use crate::response::{ApiResponse, RequestInfo};

/// Pass-through options for [`MyBmwClient`].
///
/// `base_url` and `headers` replace the generated values wholesale when set.
/// `hooks` run before the client's own hooks.
#[derive(Default)]
pub struct ClientOptions {
    pub base_url: Option<Url>,
    pub headers: Option<HeaderMap>,
    pub hooks: Vec<Arc<dyn ResponseHook>>,
}

/// HTTP client for the vehicle API.
///
/// Every request is authorized through the session's
/// [`Authentication`](crate::fetch::auth::Authentication) handle, resolved
/// against the region's server, sent with the default headers and the fixed
/// timeout, and its response passed through the registered hooks:
/// caller hooks first, then response logging (when a log path is
/// configured), then status checking.
pub struct MyBmwClient<C = BasicClient> {
    config: Arc<ClientConfig>,
    transport: Authorized<C>,
    base_url: Url,
    headers: HeaderMap,
    hooks: Vec<Arc<dyn ResponseHook>>,
}

impl MyBmwClient<BasicClient> {
    pub fn new(
        config: impl Into<Arc<ClientConfig>>,
        brand: Option<CarBrand>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        Self::with_transport(config, brand, options, BasicClient::new()?)
    }
}

impl<C: HttpClient> MyBmwClient<C> {
    /// Builds a client on top of an arbitrary transport.
    pub fn with_transport(
        config: impl Into<Arc<ClientConfig>>,
        brand: Option<CarBrand>,
        options: ClientOptions,
        transport: C,
    ) -> Result<Self, ClientError> {
        let config = config.into();
        let transport = Authorized::new(transport, Arc::clone(config.authentication()));

        let mut base_url = match options.base_url {
            Some(url) => url,
            None => config.authentication().region().base_url()?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let headers = match options.headers {
            Some(headers) => headers,
            None => Self::default_headers_for(&config, brand)?,
        };

        let mut hooks = options.hooks;
        if let Some(path) = config.log_response_path() {
            hooks.push(Arc::new(LogResponseHook::new(path)));
        }
        hooks.push(Arc::new(RaiseForStatusHook));

        debug!(
            base_url = %base_url,
            hooks = hooks.len(),
            log_responses = config.log_response_path().is_some(),
            "Client configured"
        );

        Ok(Self {
            config,
            transport,
            base_url,
            headers,
            hooks,
        })
    }

    fn default_headers_for(
        config: &ClientConfig,
        brand: Option<CarBrand>,
    ) -> Result<HeaderMap, ClientError> {
        default_headers(
            brand.unwrap_or_default(),
            config.authentication().region(),
            config.use_metric_units(),
        )
    }

    /// Generates the default header set for this session, with a fresh
    /// correlation id.
    pub fn generate_default_header(&self, brand: Option<CarBrand>) -> Result<HeaderMap, ClientError> {
        Self::default_headers_for(&self.config, brand)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A request for `path`, appended to the base URL's path. Absolute URLs
    /// are used as given.
    pub fn request(&self, method: Method, path: &str) -> Result<Request, ClientError> {
        let url = match Url::parse(path) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url.join(path.trim_start_matches('/'))?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Request::new(method, url))
    }

    /// Sends `req` and runs the response hooks.
    ///
    /// Headers set on `req` take precedence over the client's headers.
    ///
    /// # Errors
    ///
    /// Transport failures, authorization failures, and any error raised by a
    /// hook, including [`ClientError::Status`] for unexpected `4xx`/`5xx`.
    #[tracing::instrument(skip_all, fields(method = %req.method(), url = %req.url()))]
    pub async fn execute(&self, mut req: Request) -> Result<ApiResponse, ClientError> {
        let mut headers = self.headers.clone();
        headers.extend(std::mem::take(req.headers_mut()));
        *req.headers_mut() = headers;
        *req.timeout_mut() = Some(HTTP_TIMEOUT);

        let request = RequestInfo::from_request(&req);
        let response = self.transport.execute(req).await?;
        let response = ApiResponse::read(request, response).await?;

        debug!(
            status = %response.status(),
            bytes = response.bytes().len(),
            "Response received"
        );

        for hook in &self.hooks {
            hook.on_response(&response).await?;
        }
        Ok(response)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(self.request(Method::GET, path)?).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        let mut req = self.request(Method::POST, path)?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| ClientError::Parse(format!("failed to serialize request body: {e}")))?;
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *req.body_mut() = Some(payload.into());
        self.execute(req).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(self.request(Method::DELETE, path)?).await
    }
}
