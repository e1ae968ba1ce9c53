//! HTTP request builder

use super::Response;
use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::{Duration, Instant};
use url::Url;

/// Builder for a single HTTP exchange.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Duration,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header from already-validated parts.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request and get a response.
    ///
    /// Performs exactly one exchange. Error statuses come back as a
    /// [`Response`]; only transport failures are errors here.
    pub async fn send(self) -> Result<Response> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let mut req = client
            .request(self.method.clone(), self.url.as_str())
            .timeout(self.timeout)
            .headers(self.headers);

        let body_size = self.body.as_ref().map(Vec::len);
        if let Some(body) = self.body {
            req = req.body(body);
        }

        tracing::debug!(
            method = %self.method,
            path = %self.url.path(),
            body_size,
            "Sending HTTP request"
        );

        let start = Instant::now();
        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.timeout)
            } else {
                connection_error(e)
            }
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(connection_error)?
            .to_vec();
        let elapsed = start.elapsed();

        tracing::debug!(
            method = %self.method,
            path = %self.url.path(),
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            body_size = body.len(),
            "HTTP response received"
        );

        Ok(Response::new(status, headers, body))
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// The request URL is left out of the message, which the retry classifier
/// scans for status codes.
fn connection_error(e: reqwest::Error) -> Error {
    Error::Connection(e.without_url().to_string())
}
