//! Framework configuration: execution modes, providers, and session settings.
//!
//! The configuration is an opaque, read-only capability object from the
//! strategies' point of view. Validation beyond enum parsing belongs to the
//! caller; strategies take what they need and ignore the rest.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::{DriverError, DriverResult};

/// Default request/session timeout (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default locator store root, relative to the working directory
pub const DEFAULT_LOCATORS_DIR: &str = "resources/locators";

/// Default local Appium server endpoint
pub const DEFAULT_APPIUM_URL: &str = "http://localhost:4723";

/// The platform family a test targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Browser automation
    #[default]
    Web,
    /// HTTP API automation
    Api,
    /// Mobile device automation
    Mobile,
}

impl ExecutionMode {
    /// Directory name used by the locator store for this mode
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Api => "api",
            Self::Mobile => "mobile",
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "api" => Ok(Self::Api),
            "mobile" => Ok(Self::Mobile),
            other => Err(DriverError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the two API strategies the factory instantiates for `api` mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    /// Engine-context strategy: base URL and default headers bound at init
    #[default]
    Hybrid,
    /// Standalone-client strategy: explicit timeout, raw status handling
    Specialized,
}

impl ApiProvider {
    /// Parse a provider string. Unknown values fall back to the hybrid
    /// default, matching the factory's dispatch behavior.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "specialized" | "axios" | "axios-specialized" => Self::Specialized,
            _ => Self::Hybrid,
        }
    }
}

/// Cloud execution platform for the visual strategies
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CloudPlatform {
    /// Run against a locally launched engine
    #[default]
    Local,
    /// BrowserStack remote grid
    BrowserStack,
    /// Sauce Labs remote grid
    SauceLabs,
    /// Configured value outside the supported set. Capability building
    /// degrades to base capabilities; session establishment refuses it.
    Unknown(String),
}

impl CloudPlatform {
    /// Parse a platform string. Never fails; unrecognized values are
    /// carried as `Unknown` so the failure surfaces where it matters.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "local" => Self::Local,
            "browserstack" => Self::BrowserStack,
            "saucelabs" => Self::SauceLabs,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this platform requires a remote connection
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl std::fmt::Display for CloudPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::BrowserStack => write!(f, "browserstack"),
            Self::SauceLabs => write!(f, "saucelabs"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Configuration consumed by strategies at `initialize()`
#[derive(Debug, Clone)]
pub struct FrameworkConfig {
    /// Default execution mode for the factory
    pub execution_mode: ExecutionMode,
    /// API strategy selection when mode is `api`
    pub api_provider: ApiProvider,
    /// Browser name for web capability payloads
    pub browser: String,
    /// Browser version for web capability payloads
    pub browser_version: Option<String>,
    /// Headless browser launch
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Chromium executable override for local launch
    pub chromium_path: Option<String>,
    /// Cloud platform for web/mobile sessions
    pub cloud_platform: CloudPlatform,
    /// Cloud account user name
    pub cloud_user: Option<String>,
    /// Cloud account access key
    pub cloud_key: Option<String>,
    /// Target operating system for cloud sessions
    pub os: Option<String>,
    /// Target OS version (or device name for mobile)
    pub os_version: Option<String>,
    /// Base URL for web navigation
    pub base_url: Option<String>,
    /// Base URL prefixed to API endpoints
    pub api_base_url: Option<String>,
    /// WebDriver endpoint for local mobile sessions
    pub appium_url: String,
    /// Request/session timeout
    pub timeout: Duration,
    /// Root directory of the locator store
    pub locators_dir: PathBuf,
    /// Extra default headers for the specialized API strategy
    pub headers: Vec<(String, String)>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Web,
            api_provider: ApiProvider::Hybrid,
            browser: "chromium".to_string(),
            browser_version: None,
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            cloud_platform: CloudPlatform::Local,
            cloud_user: None,
            cloud_key: None,
            os: None,
            os_version: None,
            base_url: None,
            api_base_url: None,
            appium_url: DEFAULT_APPIUM_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            locators_dir: PathBuf::from(DEFAULT_LOCATORS_DIR),
            headers: Vec::new(),
        }
    }
}

impl FrameworkConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `EXECUTION_MODE`, `API_PROVIDER`, `BROWSER`,
    /// `BROWSER_VERSION`, `HEADLESS`, `CLOUD_PLATFORM`, `CLOUD_USER`,
    /// `CLOUD_KEY`, `OS`, `OS_VERSION`, `BASE_URL`, `API_BASE_URL`,
    /// `APPIUM_URL`, `TIMEOUT_MS`, `LOCATORS_DIR`. Unset variables keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` if `EXECUTION_MODE` is set to a value
    /// outside `{web, api, mobile}`.
    pub fn from_env() -> DriverResult<Self> {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("EXECUTION_MODE") {
            config.execution_mode = mode.parse()?;
        }
        if let Ok(provider) = std::env::var("API_PROVIDER") {
            config.api_provider = ApiProvider::parse(&provider);
        }
        if let Ok(browser) = std::env::var("BROWSER") {
            config.browser = browser;
        }
        config.browser_version = std::env::var("BROWSER_VERSION").ok();
        if let Ok(headless) = std::env::var("HEADLESS") {
            config.headless = !matches!(headless.as_str(), "false" | "0" | "no");
        }
        if let Ok(platform) = std::env::var("CLOUD_PLATFORM") {
            config.cloud_platform = CloudPlatform::parse(&platform);
        }
        config.cloud_user = std::env::var("CLOUD_USER").ok();
        config.cloud_key = std::env::var("CLOUD_KEY").ok();
        config.os = std::env::var("OS").ok();
        config.os_version = std::env::var("OS_VERSION").ok();
        config.base_url = std::env::var("BASE_URL").ok();
        config.api_base_url = std::env::var("API_BASE_URL").ok();
        if let Ok(url) = std::env::var("APPIUM_URL") {
            config.appium_url = url;
        }
        if let Ok(ms) = std::env::var("TIMEOUT_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.timeout = Duration::from_millis(ms);
            }
        }
        if let Ok(dir) = std::env::var("LOCATORS_DIR") {
            config.locators_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Set the execution mode
    #[must_use]
    pub const fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Set the API provider
    #[must_use]
    pub const fn with_api_provider(mut self, provider: ApiProvider) -> Self {
        self.api_provider = provider;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the cloud platform
    #[must_use]
    pub fn with_cloud_platform(mut self, platform: CloudPlatform) -> Self {
        self.cloud_platform = platform;
        self
    }

    /// Set cloud credentials
    #[must_use]
    pub fn with_cloud_credentials(
        mut self,
        user: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.cloud_user = Some(user.into());
        self.cloud_key = Some(key.into());
        self
    }

    /// Set OS targeting
    #[must_use]
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    /// Set OS version / device name
    #[must_use]
    pub fn with_os_version(mut self, version: impl Into<String>) -> Self {
        self.os_version = Some(version.into());
        self
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the request/session timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the locator store root directory
    #[must_use]
    pub fn with_locators_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locators_dir = dir.into();
        self
    }

    /// Add a default header for the specialized API strategy
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod execution_mode_tests {
        use super::*;

        #[test]
        fn test_parse_known_modes() {
            assert_eq!("web".parse::<ExecutionMode>().unwrap(), ExecutionMode::Web);
            assert_eq!("api".parse::<ExecutionMode>().unwrap(), ExecutionMode::Api);
            assert_eq!(
                "mobile".parse::<ExecutionMode>().unwrap(),
                ExecutionMode::Mobile
            );
        }

        #[test]
        fn test_parse_unknown_mode_fails() {
            let err = "desktop".parse::<ExecutionMode>().unwrap_err();
            assert!(matches!(
                err,
                DriverError::UnsupportedMode { mode } if mode == "desktop"
            ));
        }

        #[test]
        fn test_parse_is_case_sensitive() {
            assert!("Web".parse::<ExecutionMode>().is_err());
        }

        #[test]
        fn test_display_round_trips() {
            for mode in [ExecutionMode::Web, ExecutionMode::Api, ExecutionMode::Mobile] {
                assert_eq!(mode.to_string().parse::<ExecutionMode>().unwrap(), mode);
            }
        }
    }

    mod api_provider_tests {
        use super::*;

        #[test]
        fn test_specialized_aliases() {
            assert_eq!(ApiProvider::parse("specialized"), ApiProvider::Specialized);
            assert_eq!(ApiProvider::parse("axios"), ApiProvider::Specialized);
            assert_eq!(
                ApiProvider::parse("axios-specialized"),
                ApiProvider::Specialized
            );
        }

        #[test]
        fn test_hybrid_is_default_for_anything_else() {
            assert_eq!(ApiProvider::parse("hybrid"), ApiProvider::Hybrid);
            assert_eq!(ApiProvider::parse("playwright-hybrid"), ApiProvider::Hybrid);
            assert_eq!(ApiProvider::parse("nonsense"), ApiProvider::Hybrid);
        }
    }

    mod cloud_platform_tests {
        use super::*;

        #[test]
        fn test_parse_known_platforms() {
            assert_eq!(CloudPlatform::parse("local"), CloudPlatform::Local);
            assert_eq!(
                CloudPlatform::parse("browserstack"),
                CloudPlatform::BrowserStack
            );
            assert_eq!(CloudPlatform::parse("saucelabs"), CloudPlatform::SauceLabs);
        }

        #[test]
        fn test_unknown_platform_is_carried_not_dropped() {
            let platform = CloudPlatform::parse("lambdatest");
            assert_eq!(platform, CloudPlatform::Unknown("lambdatest".to_string()));
            assert!(platform.is_remote());
            assert_eq!(platform.to_string(), "lambdatest");
        }

        #[test]
        fn test_local_is_not_remote() {
            assert!(!CloudPlatform::Local.is_remote());
            assert!(CloudPlatform::BrowserStack.is_remote());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = FrameworkConfig::default();
            assert_eq!(config.execution_mode, ExecutionMode::Web);
            assert_eq!(config.api_provider, ApiProvider::Hybrid);
            assert_eq!(config.browser, "chromium");
            assert!(config.headless);
            assert_eq!(config.cloud_platform, CloudPlatform::Local);
            assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
            assert_eq!(config.appium_url, DEFAULT_APPIUM_URL);
        }

        #[test]
        fn test_builder_chain() {
            let config = FrameworkConfig::new()
                .with_mode(ExecutionMode::Mobile)
                .with_cloud_platform(CloudPlatform::BrowserStack)
                .with_cloud_credentials("user", "key")
                .with_os("iOS")
                .with_os_version("17")
                .with_timeout(Duration::from_secs(5))
                .with_header("X-Test", "1");

            assert_eq!(config.execution_mode, ExecutionMode::Mobile);
            assert_eq!(config.cloud_platform, CloudPlatform::BrowserStack);
            assert_eq!(config.cloud_user.as_deref(), Some("user"));
            assert_eq!(config.cloud_key.as_deref(), Some("key"));
            assert_eq!(config.os.as_deref(), Some("iOS"));
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.headers.len(), 1);
        }

        #[test]
        fn test_with_viewport() {
            let config = FrameworkConfig::new().with_viewport(800, 600);
            assert_eq!(config.viewport_width, 800);
            assert_eq!(config.viewport_height, 600);
        }
    }
}
