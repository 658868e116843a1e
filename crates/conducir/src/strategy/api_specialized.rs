//! Specialized API strategy: a standalone HTTP client.
//!
//! Unlike the hybrid strategy, nothing is bound into the client beyond the
//! timeout: configured default headers are merged into every request
//! explicitly, ahead of per-request headers. Useful when a suite needs
//! header-level control (auth schemes, content negotiation) that a
//! session-bound context would hide.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{join_url, send_request, ApiDriver, ApiResponse, RequestOptions};
use crate::config::{ExecutionMode, FrameworkConfig};
use crate::driver::AutomationDriver;
use crate::locator::LocatorStore;
use crate::result::{DriverError, DriverResult};

/// Standalone-client API strategy with per-request header merging
#[derive(Debug, Default)]
pub struct SpecializedApiStrategy {
    client: Option<reqwest::Client>,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    locators: Option<LocatorStore>,
}

impl SpecializedApiStrategy {
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

    /// Configured defaults first, then the caller's headers, so a request
    /// can override a default by repeating the name.
    fn merge_options(&self, options: RequestOptions) -> RequestOptions {
        let mut merged = RequestOptions {
            headers: self.default_headers.clone(),
            query: options.query,
        };
        merged.headers.extend(options.headers);
        merged
    }
}

#[async_trait]
impl AutomationDriver for SpecializedApiStrategy {
    async fn initialize(&mut self, config: &FrameworkConfig) -> DriverResult<()> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let mut locators = LocatorStore::new(&config.locators_dir, ExecutionMode::Api);
        locators.load(None);

        self.client = Some(client);
        self.base_url = config.api_base_url.clone();
        self.default_headers = config.headers.clone();
        self.locators = Some(locators);

        tracing::info!(base_url = ?self.base_url, "specialized API session established");
        Ok(())
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.client = None;
        self.base_url = None;
        self.default_headers.clear();
        self.locators = None;
        Ok(())
    }

    /// No-op: API requests carry their full target.
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
        "SpecializedApiStrategy"
    }
}

#[async_trait]
impl ApiDriver for SpecializedApiStrategy {
    async fn get(&self, endpoint: &str, options: RequestOptions) -> DriverResult<ApiResponse> {
        let client = self.client("get")?;
        let options = self.merge_options(options);
        send_request(client, reqwest::Method::GET, &self.url(endpoint), None, &options).await
    }

    async fn post(
        &self,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> DriverResult<ApiResponse> {
        let client = self.client("post")?;
        let options = self.merge_options(options);
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
        let options = self.merge_options(options);
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
        let options = self.merge_options(options);
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
        let options = self.merge_options(options);
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
