//! Conducir: strategy-driven test automation core
//!
//! Conducir (Spanish: "to drive") hides which automation engine executes a
//! test behind one driver contract. Test code asks a factory for a driver,
//! talks to it through [`AutomationDriver`], and resolves elements by
//! logical name through a cascading locator store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CONDUCIR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────────┐   ┌──────────────────────┐ │
//! │  │ Test     │──►│ DriverFactory │──►│ WebStrategy    (CDP) │ │
//! │  │ Code     │   │ (config-      │   │ HybridApi     (HTTP) │ │
//! │  │          │   │  driven)      │   │ SpecializedApi(HTTP) │ │
//! │  └──────────┘   └───────────────┘   │ MobileStrategy (W3C) │ │
//! │        │                            └──────────────────────┘ │
//! │        ▼                                       │              │
//! │  ┌──────────────┐                    ┌──────────────────┐    │
//! │  │ LocatorStore │◄───────────────────│ Element wrappers │    │
//! │  │ global < mode│                    │ (Web / Mobile)   │    │
//! │  │  < page      │                    └──────────────────┘    │
//! │  └──────────────┘                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use conducir::{DriverFactory, ExecutionMode, FrameworkConfig};
//!
//! # async fn run() -> conducir::DriverResult<()> {
//! let config = FrameworkConfig::from_env()?.with_mode(ExecutionMode::Web);
//! let mut driver = DriverFactory::create(&config);
//!
//! driver.initialize(&config).await?;
//! driver.load_locators("login").await?;
//! driver.navigate_to("https://example.com/login").await?;
//!
//! let username = driver.find_element("username_input").await?;
//! username.fill("ada").await?;
//! driver.find_element("login_button").await?.click().await?;
//!
//! driver.terminate().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod api;
mod capability;
mod config;
mod driver;
mod element;
mod factory;
mod locator;
mod reporter;
mod result;

/// Concrete strategies behind the driver contract
pub mod strategy;

pub use api::{ApiDriver, ApiResponse, RequestOptions};
pub use capability::{build_mobile_config, build_web_capabilities};
pub use config::{
    ApiProvider, CloudPlatform, ExecutionMode, FrameworkConfig, DEFAULT_APPIUM_URL,
    DEFAULT_LOCATORS_DIR, DEFAULT_TIMEOUT_MS,
};
pub use driver::AutomationDriver;
pub use element::{
    Element, MobileElement, WaitOptions, WebElement, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
pub use factory::DriverFactory;
pub use locator::LocatorStore;
pub use reporter::{CollectingSink, NullSink, ScreenshotSink};
pub use result::{DriverError, DriverResult};
pub use strategy::{HybridApiStrategy, MobileStrategy, SpecializedApiStrategy, WebStrategy};
