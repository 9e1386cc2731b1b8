//! HTTP transport abstraction for testability.
//!
//! The reporter, the team board and the update check all talk to the backend
//! through [`TrackTransport`], so they can be exercised with a recording fake
//! instead of a network. [`ReqwestTransport`] is the production
//! implementation.
//!
//! Any non-2xx status is an error ([`TransportError::Status`]).

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::TransportError;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body excerpt kept in a status error.
const MAX_ERROR_BODY: usize = 200;

/// One text field of a multipart form.
pub type FormField = (&'static str, String);

/// Trait for the HTTP exchanges the client makes with its backend.
pub trait TrackTransport: Send + Sync {
    /// POST a multipart/form-data body.
    fn post_form(
        &self,
        url: &str,
        fields: &[FormField],
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;

    /// POST a JSON body with `Content-Type: application/json`.
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;

    /// Plain GET.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Production transport backed by `reqwest`.
///
/// Every request carries `Cache-Control: no-store` so intermediaries never
/// answer position posts or feed reads from cache.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fieldtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn execute(
        &self,
        method: &'static str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, TransportError> {
        trace!(method, url, "HTTP request starting");

        let response = match request
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    method,
                    url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(TransportError::Request(e.to_string()));
            }
        };

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        if !status.is_success() {
            let excerpt: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            warn!(method, url, status = status.as_u16(), body = %excerpt, "HTTP error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        debug!(method, url, status = status.as_u16(), bytes = body.len(), "HTTP response received");
        Ok(body.to_vec())
    }
}

impl TrackTransport for ReqwestTransport {
    async fn post_form(&self, url: &str, fields: &[FormField]) -> Result<Vec<u8>, TransportError> {
        let form = fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(*name, value.clone())
            });

        self.execute("POST", url, self.client.post(url).multipart(form))
            .await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, TransportError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(json_body.to_string());

        self.execute("POST", url, request).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.execute("GET", url, self.client.get(url)).await
    }
}

/// Append query parameters to a URL, form-urlencoding the values.
pub fn url_with_query(url: &str, params: &[(&str, &str)]) -> Result<String, TransportError> {
    reqwest::Url::parse_with_params(url, params)
        .map(String::from)
        .map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))
}
