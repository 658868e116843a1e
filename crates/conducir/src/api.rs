//! API driver surface: uniform response wrapper and HTTP verb contract.
//!
//! Both API strategies wrap every engine response into [`ApiResponse`], so
//! assertion code never branches on which strategy produced it. The wrapper
//! never raises on 4xx/5xx status codes; assertions see the raw response.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::driver::AutomationDriver;
use crate::result::DriverResult;

/// Uniform HTTP response shape shared by both API strategies.
///
/// Constructible from parts so assertion helpers and tests can work with
/// responses without a live client.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from raw parts
    #[must_use]
    pub fn from_parts(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Drain a reqwest response into the uniform shape
    pub async fn from_response(response: reqwest::Response) -> DriverResult<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> DriverResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text (lossy UTF-8)
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// All response headers as name/value pairs
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Look up a header by name, case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Raw body bytes
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Per-request options: extra headers and query parameters
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers for this request
    pub headers: Vec<(String, String)>,
    /// Query string parameters
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Create empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// HTTP verb contract shared by both API strategies.
///
/// Navigation is implicit per-request for these strategies, so the
/// inherited `navigate_to` is a documented no-op and `find_element`
/// rejects with `UnsupportedOperation`.
#[async_trait]
pub trait ApiDriver: AutomationDriver {
    /// Perform a GET request
    async fn get(&self, endpoint: &str, options: RequestOptions) -> DriverResult<ApiResponse>;

    /// Perform a POST request with an optional JSON body
    async fn post(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse>;

    /// Perform a PUT request with an optional JSON body
    async fn put(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse>;

    /// Perform a DELETE request
    async fn delete(&self, endpoint: &str, options: RequestOptions) -> DriverResult<ApiResponse>;

    /// Perform a PATCH request with an optional JSON body
    async fn patch(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse>;
}

/// Join a configured base URL with an endpoint path.
///
/// Without a base, the endpoint must already be absolute.
#[must_use]
pub(crate) fn join_url(base: Option<&str>, endpoint: &str) -> String {
    match base {
        Some(base) if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") => {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        }
        _ => endpoint.to_string(),
    }
}

/// Execute one request through a reqwest client and wrap the response.
pub(crate) async fn send_request(
    client: &reqwest::Client,
    method: reqwest::Method,
    url: &str,
    body: Option<&Value>,
    options: &RequestOptions,
) -> DriverResult<ApiResponse> {
    let mut request = client.request(method, url);
    for (name, value) in &options.headers {
        request = request.header(name, value);
    }
    if !options.query.is_empty() {
        request = request.query(&options.query);
    }
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send().await?;
    ApiResponse::from_response(response).await
}
