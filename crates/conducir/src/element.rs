//! Unified element wrappers for the visual strategies.
//!
//! Both the Web (CDP) and Mobile (WebDriver) wrappers expose the same
//! interaction set, so a test written against one target family reads
//! identically against the other. Each wrapper pairs exactly one live
//! engine handle with the logical name used to obtain it; the name is for
//! diagnostics only and is never used for re-lookup. Handles are created
//! fresh on every `find_element` call and must be re-resolved after a page
//! transition.
//!
//! No wrapper method retries. Engine failures propagate to the caller with
//! the logical name attached for context.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::{DriverError, DriverResult};

/// Default timeout for `wait_for` (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval for `wait_for` (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for bounded element waits
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds, forwarded verbatim to the polling loop
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with the default timeout and polling interval
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }
}

/// Uniform interaction contract over one engine-native element handle
#[async_trait]
pub trait Element: Send + Sync {
    /// Logical name the element was looked up with (diagnostics only)
    fn logical_name(&self) -> &str;

    /// Click the element
    async fn click(&self) -> DriverResult<()>;

    /// Clear the element, then set `value`
    async fn fill(&self, value: &str) -> DriverResult<()>;

    /// Append `value` without clearing existing content
    async fn type_text(&self, value: &str) -> DriverResult<()>;

    /// Visible text content
    async fn text(&self) -> DriverResult<String>;

    /// Current input value
    async fn value(&self) -> DriverResult<String>;

    /// Whether the element is visible
    async fn is_visible(&self) -> DriverResult<bool>;

    /// Whether the element is enabled
    async fn is_enabled(&self) -> DriverResult<bool>;

    /// Read an attribute, `None` if absent
    async fn attribute(&self, name: &str) -> DriverResult<Option<String>>;

    /// Poll until the element is visible, within the caller's timeout.
    ///
    /// Engine failures during polling propagate immediately; only the
    /// not-yet-visible condition is retried.
    async fn wait_for(&self, options: WaitOptions) -> DriverResult<()> {
        let deadline =
            tokio::time::Instant::now() + Duration::from_millis(options.timeout_ms);
        loop {
            if self.is_visible().await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DriverError::Timeout {
                    ms: options.timeout_ms,
                });
            }
            tokio::time::sleep(Duration::from_millis(options.poll_interval_ms)).await;
        }
    }
}

impl std::fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("logical_name", &self.logical_name())
            .finish()
    }
}

// ============================================================================
// Web (CDP) element
// ============================================================================

/// Element wrapper over a chromiumoxide (CDP) element handle
pub struct WebElement {
    inner: chromiumoxide::element::Element,
    name: String,
}

impl WebElement {
    /// Wrap a live CDP element handle with its logical name
    #[must_use]
    pub fn new(inner: chromiumoxide::element::Element, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    fn engine_err(&self, error: impl std::fmt::Display) -> DriverError {
        DriverError::Element {
            name: self.name.clone(),
            message: error.to_string(),
        }
    }

    /// Call a JS function with the element bound as `this` and return the
    /// resulting value, if any.
    async fn eval_js(&self, function: &str) -> DriverResult<Option<serde_json::Value>> {
        let ret = self
            .inner
            .call_js_fn(function, false)
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(ret.result.value)
    }
}

impl std::fmt::Debug for WebElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebElement").field("name", &self.name).finish()
    }
}

#[async_trait]
impl Element for WebElement {
    fn logical_name(&self) -> &str {
        &self.name
    }

    async fn click(&self) -> DriverResult<()> {
        tracing::info!(element = %self.name, "clicking");
        self.inner.click().await.map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn fill(&self, value: &str) -> DriverResult<()> {
        tracing::info!(element = %self.name, "filling");
        self.inner.focus().await.map_err(|e| self.engine_err(e))?;
        self.eval_js(
            "function() { this.value = ''; \
             this.dispatchEvent(new Event('input', { bubbles: true })); }",
        )
        .await?;
        self.inner
            .type_str(value)
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn type_text(&self, value: &str) -> DriverResult<()> {
        tracing::info!(element = %self.name, "typing");
        self.inner.focus().await.map_err(|e| self.engine_err(e))?;
        self.inner
            .type_str(value)
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn text(&self) -> DriverResult<String> {
        let text = self
            .inner
            .inner_text()
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(text.unwrap_or_default())
    }

    async fn value(&self) -> DriverResult<String> {
        let value = self
            .eval_js("function() { return this.value === undefined ? '' : String(this.value); }")
            .await?;
        Ok(value
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    async fn is_visible(&self) -> DriverResult<bool> {
        let visible = self
            .eval_js(
                "function() { const rects = this.getClientRects(); \
                 return rects.length > 0 && \
                 window.getComputedStyle(this).visibility !== 'hidden'; }",
            )
            .await?;
        Ok(visible
            .as_ref()
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false))
    }

    async fn is_enabled(&self) -> DriverResult<bool> {
        let enabled = self
            .eval_js("function() { return this.disabled !== true; }")
            .await?;
        Ok(enabled
            .as_ref()
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }

    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        self.inner
            .attribute(name)
            .await
            .map_err(|e| self.engine_err(e))
    }
}

// ============================================================================
// Mobile (WebDriver) element
// ============================================================================

/// Element wrapper over a fantoccini (WebDriver/Appium) element handle
pub struct MobileElement {
    inner: fantoccini::elements::Element,
    name: String,
}

impl MobileElement {
    /// Wrap a live WebDriver element handle with its logical name
    #[must_use]
    pub fn new(inner: fantoccini::elements::Element, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    fn engine_err(&self, error: impl std::fmt::Display) -> DriverError {
        DriverError::Element {
            name: self.name.clone(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Debug for MobileElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobileElement")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl Element for MobileElement {
    fn logical_name(&self) -> &str {
        &self.name
    }

    async fn click(&self) -> DriverResult<()> {
        tracing::info!(element = %self.name, "clicking");
        self.inner
            .clone()
            .click()
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn fill(&self, value: &str) -> DriverResult<()> {
        tracing::info!(element = %self.name, "filling");
        self.inner
            .clone()
            .clear()
            .await
            .map_err(|e| self.engine_err(e))?;
        self.inner
            .clone()
            .send_keys(value)
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn type_text(&self, value: &str) -> DriverResult<()> {
        tracing::info!(element = %self.name, "typing");
        self.inner
            .clone()
            .send_keys(value)
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(())
    }

    async fn text(&self) -> DriverResult<String> {
        self.inner.text().await.map_err(|e| self.engine_err(e))
    }

    async fn value(&self) -> DriverResult<String> {
        let value = self
            .inner
            .prop("value")
            .await
            .map_err(|e| self.engine_err(e))?;
        Ok(value.unwrap_or_default())
    }

    async fn is_visible(&self) -> DriverResult<bool> {
        self.inner
            .is_displayed()
            .await
            .map_err(|e| self.engine_err(e))
    }

    async fn is_enabled(&self) -> DriverResult<bool> {
        self.inner
            .is_enabled()
            .await
            .map_err(|e| self.engine_err(e))
    }

    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        self.inner.attr(name).await.map_err(|e| self.engine_err(e))
    }
}
