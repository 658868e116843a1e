//! Hybrid API strategy: an engine-context HTTP client.
//!
//! The session is a reqwest client with the base URL and default JSON
//! headers bound at `initialize()`; individual requests only name their
//! endpoint. This mirrors a browser-engine request context, which is why
//! it is the default API strategy.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::api::{join_url, send_request, ApiDriver, ApiResponse, RequestOptions};
use crate::config::{ExecutionMode, FrameworkConfig};
use crate::driver::AutomationDriver;
use crate::locator::LocatorStore;
use crate::result::{DriverError, DriverResult};

/// Default API strategy with session-bound base URL and headers
#[derive(Debug, Default)]
pub struct HybridApiStrategy {
    client: Option<reqwest::Client>,
    base_url: Option<String>,
    locators: Option<LocatorStore>,
}

impl HybridApiStrategy {
    /// Create an unconnected strategy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self, operation: &'static str) -> DriverResult<&reqwest::Client> {
        self.client
            .as_ref()
            .ok_or(DriverError::NotInitialized { operation })
    }

    fn url(&self, endpoint: &str) -> String {
        join_url(self.base_url.as_deref(), endpoint)
    }
}

#[async_trait]
impl AutomationDriver for HybridApiStrategy {
    async fn initialize(&mut self, config: &FrameworkConfig) -> DriverResult<()> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let mut locators = LocatorStore::new(&config.locators_dir, ExecutionMode::Api);
        locators.load(None);

        self.client = Some(client);
        self.base_url = config.api_base_url.clone();
        self.locators = Some(locators);

        tracing::info!(base_url = ?self.base_url, "hybrid API session established");
        Ok(())
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.client = None;
        self.base_url = None;
        self.locators = None;
        Ok(())
    }

    /// No-op: API requests carry their full target, so there is nothing
    /// to navigate.
    async fn navigate_to(&mut self, url: &str) -> DriverResult<()> {
        tracing::debug!(url, "navigate_to ignored for API session");
        Ok(())
    }

    async fn load_locators(&mut self, page: &str) -> DriverResult<()> {
        let store = self
            .locators
            .as_mut()
            .ok_or(DriverError::NotInitialized {
                operation: "load_locators",
            })?;
        store.load(Some(page));
        Ok(())
    }

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Api
    }

    fn name(&self) -> &'static str {
        "HybridApiStrategy"
    }
}

#[async_trait]
impl ApiDriver for HybridApiStrategy {
    async fn get(&self, endpoint: &str, options: RequestOptions) -> DriverResult<ApiResponse> {
        let client = self.client("get")?;
        send_request(client, reqwest::Method::GET, &self.url(endpoint), None, &options).await
    }

    async fn post(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse> {
        let client = self.client("post")?;
        send_request(
            client,
            reqwest::Method::POST,
            &self.url(endpoint),
            body.as_ref(),
            &options,
        )
        .await
    }

    async fn put(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse> {
        let client = self.client("put")?;
        send_request(
            client,
            reqwest::Method::PUT,
            &self.url(endpoint),
            body.as_ref(),
            &options,
        )
        .await
    }

    async fn delete(&self, endpoint: &str, options: RequestOptions) -> DriverResult<ApiResponse> {
        let client = self.client("delete")?;
        send_request(
            client,
            reqwest::Method::DELETE,
            &self.url(endpoint),
            None,
            &options,
        )
        .await
    }

    async fn patch(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse> {
        let client = self.client("patch")?;
        send_request(
            client,
            reqwest::Method::PATCH,
            &self.url(endpoint),
            body.as_ref(),
            &options,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_element_is_unsupported_even_before_initialize() {
        let mut driver = HybridApiStrategy::new();
        let err = driver.find_element("login_button").await.unwrap_err();
        assert!(matches!(
            err,
            DriverError::UnsupportedOperation { operation, strategy }
                if operation == "find_element" && strategy == "HybridApiStrategy"
        ));
    }

    #[tokio::test]
    async fn test_capture_screenshot_is_unsupported() {
        let mut driver = HybridApiStrategy::new();
        driver.initialize(&FrameworkConfig::default()).await.unwrap();
        let err = driver.capture_screenshot("shot").await.unwrap_err();
        assert!(matches!(err, DriverError::UnsupportedOperation { .. }));
    }

    #[tokio::test]
    async fn test_verbs_before_initialize_fail() {
        let driver = HybridApiStrategy::new();
        let err = driver.get("/users", RequestOptions::new()).await.unwrap_err();
        assert!(matches!(
            err,
            DriverError::NotInitialized { operation } if operation == "get"
        ));
    }

    #[tokio::test]
    async fn test_navigate_to_is_a_noop() {
        let mut driver = HybridApiStrategy::new();
        driver.navigate_to("https://example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_endpoint_joined_against_session_base_url() {
        let mut driver = HybridApiStrategy::new();
        let config =
            FrameworkConfig::default().with_api_base_url("https://api.example.com/v1");
        driver.initialize(&config).await.unwrap();
        assert_eq!(driver.url("/users"), "https://api.example.com/v1/users");
    }

    #[tokio::test]
    async fn test_terminate_drops_session() {
        let mut driver = HybridApiStrategy::new();
        driver.initialize(&FrameworkConfig::default()).await.unwrap();
        driver.terminate().await.unwrap();
        assert!(driver.client("get").is_err());
        assert_eq!(driver.execution_mode(), ExecutionMode::Api);
    }
}
