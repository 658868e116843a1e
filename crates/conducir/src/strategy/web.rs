//! Web strategy: CDP-driven browser sessions via chromiumoxide.
//!
//! Local runs launch a Chromium process; cloud runs connect to a remote
//! grid over the provider's websocket endpoint with capabilities embedded
//! in the URL. Either way the strategy ends up holding one browser, one
//! page, and the event-handler task that chromiumoxide requires.

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::api::join_url;
use crate::capability::build_web_capabilities;
use crate::config::{CloudPlatform, ExecutionMode, FrameworkConfig};
use crate::driver::AutomationDriver;
use crate::element::{Element, WebElement};
use crate::locator::LocatorStore;
use crate::reporter::{NullSink, ScreenshotSink};
use crate::result::{DriverError, DriverResult};

const BROWSERSTACK_CDP_ENDPOINT: &str = "wss://cdp.browserstack.com/playwright";
const SAUCELABS_CDP_ENDPOINT: &str = "wss://ondemand.us-west-1.saucelabs.com/playwright/test";

/// Remote websocket URL for a cloud web session, capabilities included.
///
/// # Errors
///
/// Returns `UnknownCloudPlatform` for any non-local platform outside the
/// two supported providers. Callers branch on locality before asking for
/// a remote URL, so `Local` here is a session-establishment bug, not a
/// configuration error.
fn cloud_ws_url(config: &FrameworkConfig) -> DriverResult<String> {
    let caps = build_web_capabilities(config).to_string();
    let encoded = urlencoding::encode(&caps);
    match &config.cloud_platform {
        CloudPlatform::BrowserStack => Ok(format!("{BROWSERSTACK_CDP_ENDPOINT}?caps={encoded}")),
        CloudPlatform::SauceLabs => Ok(format!("{SAUCELABS_CDP_ENDPOINT}?caps={encoded}")),
        CloudPlatform::Unknown(platform) => Err(DriverError::UnknownCloudPlatform {
            platform: platform.clone(),
        }),
        CloudPlatform::Local => Err(DriverError::SessionEstablishment {
            message: "no remote endpoint exists for the local platform".to_string(),
        }),
    }
}

/// Browser automation strategy over CDP
pub struct WebStrategy {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    locators: Option<LocatorStore>,
    base_url: Option<String>,
    sink: Arc<dyn ScreenshotSink>,
}

impl WebStrategy {
    /// Create an unconnected strategy. No engine work happens until
    /// `initialize()`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            browser: None,
            page: None,
            handler_task: None,
            locators: None,
            base_url: None,
            sink: Arc::new(NullSink),
        }
    }

    /// Attach a screenshot sink; captured images are forwarded to it.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ScreenshotSink>) -> Self {
        self.sink = sink;
        self
    }

    fn page(&self, operation: &'static str) -> DriverResult<&Page> {
        self.page
            .as_ref()
            .ok_or(DriverError::NotInitialized { operation })
    }

    fn locators(&self, operation: &'static str) -> DriverResult<&LocatorStore> {
        self.locators
            .as_ref()
            .ok_or(DriverError::NotInitialized { operation })
    }

    async fn launch_local(config: &FrameworkConfig) -> DriverResult<(Browser, chromiumoxide::Handler)> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|message| DriverError::SessionEstablishment { message })?;

        Browser::launch(browser_config)
            .await
            .map_err(|e| DriverError::SessionEstablishment {
                message: e.to_string(),
            })
    }

    async fn connect_remote(
        config: &FrameworkConfig,
    ) -> DriverResult<(Browser, chromiumoxide::Handler)> {
        let url = cloud_ws_url(config)?;
        tracing::info!(platform = %config.cloud_platform, "connecting to remote browser grid");
        Browser::connect(url)
            .await
            .map_err(|e| DriverError::SessionEstablishment {
                message: e.to_string(),
            })
    }
}

impl Default for WebStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WebStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebStrategy")
            .field("initialized", &self.page.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AutomationDriver for WebStrategy {
    async fn initialize(&mut self, config: &FrameworkConfig) -> DriverResult<()> {
        if self.browser.is_some() {
            self.terminate().await?;
        }

        let (browser, mut handler) = match &config.cloud_platform {
            CloudPlatform::Local => Self::launch_local(config).await?,
            CloudPlatform::BrowserStack | CloudPlatform::SauceLabs => {
                Self::connect_remote(config).await?
            }
            CloudPlatform::Unknown(platform) => {
                return Err(DriverError::UnknownCloudPlatform {
                    platform: platform.clone(),
                });
            }
        };

        // chromiumoxide requires the handler stream to be driven for the
        // lifetime of the connection.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(error) = event {
                    tracing::warn!(%error, "browser handler error");
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(|e| {
            DriverError::SessionEstablishment {
                message: e.to_string(),
            }
        })?;

        let mut locators = LocatorStore::new(&config.locators_dir, ExecutionMode::Web);
        locators.load(None);

        self.browser = Some(browser);
        self.page = Some(page);
        self.handler_task = Some(handler_task);
        self.locators = Some(locators);
        self.base_url = config.base_url.clone();

        tracing::info!("web session established");
        Ok(())
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.page = None;
        if let Some(mut browser) = self.browser.take() {
            if let Err(error) = browser.close().await {
                tracing::warn!(%error, "browser close failed");
            }
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        self.locators = None;
        Ok(())
    }

    async fn navigate_to(&mut self, url: &str) -> DriverResult<()> {
        let target = join_url(self.base_url.as_deref(), url);

        tracing::info!(url = %target, "navigating");
        self.page("navigate_to")?
            .goto(target.as_str())
            .await
            .map_err(|e| DriverError::Navigation {
                url: target.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn find_element(&mut self, logical_name: &str) -> DriverResult<Box<dyn Element>> {
        let selector = self.locators("find_element")?.resolve(logical_name);
        let handle = self
            .page("find_element")?
            .find_element(selector.as_str())
            .await
            .map_err(|e| DriverError::Element {
                name: logical_name.to_string(),
                message: format!("selector '{selector}': {e}"),
            })?;
        Ok(Box::new(WebElement::new(handle, logical_name)))
    }

    async fn load_locators(&mut self, page: &str) -> DriverResult<()> {
        let store = self
            .locators
            .as_mut()
            .ok_or(DriverError::NotInitialized {
                operation: "load_locators",
            })?;
        store.load(Some(page));
        tracing::debug!(page, entries = store.len(), "locators reloaded");
        Ok(())
    }

    async fn capture_screenshot(&mut self, name: &str) -> DriverResult<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        let bytes = self
            .page("capture_screenshot")?
            .screenshot(params)
            .await
            .map_err(|e| DriverError::Screenshot {
                message: e.to_string(),
            })?;
        self.sink.attach(name, &bytes);
        Ok(bytes)
    }

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Web
    }

    fn name(&self) -> &'static str {
        "WebStrategy"
    }
}
