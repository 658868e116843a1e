//! Driver factory: configuration-driven strategy selection.
//!
//! The factory is the single place that maps an execution mode (and, for
//! API mode, a provider) onto a concrete strategy. Construction is cheap
//! and infallible for every supported mode; session establishment is
//! deferred to `initialize()` on the returned driver.

use crate::api::ApiDriver;
use crate::config::{ApiProvider, ExecutionMode, FrameworkConfig};
use crate::driver::AutomationDriver;
use crate::result::DriverResult;
use crate::strategy::{HybridApiStrategy, MobileStrategy, SpecializedApiStrategy, WebStrategy};

/// Stateless constructor for automation drivers
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverFactory;

impl DriverFactory {
    /// Create a driver for the configuration's execution mode.
    #[must_use]
    pub fn create(config: &FrameworkConfig) -> Box<dyn AutomationDriver> {
        Self::create_with_mode(config.execution_mode, config)
    }

    /// Create a driver for an explicit mode, overriding the configuration.
    ///
    /// Total over the mode enum: every variant maps to a strategy, so
    /// adding a mode without a factory arm is a compile error.
    #[must_use]
    pub fn create_with_mode(
        mode: ExecutionMode,
        config: &FrameworkConfig,
    ) -> Box<dyn AutomationDriver> {
        tracing::debug!(%mode, "creating driver");
        match mode {
            ExecutionMode::Web => Box::new(WebStrategy::new()),
            ExecutionMode::Api => match config.api_provider {
                ApiProvider::Hybrid => Box::new(HybridApiStrategy::new()),
                ApiProvider::Specialized => Box::new(SpecializedApiStrategy::new()),
            },
            ExecutionMode::Mobile => Box::new(MobileStrategy::new()),
        }
    }

    /// Create a driver from a mode string, as read from configuration
    /// sources that are not statically typed.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` for anything outside `{web, api, mobile}`.
    pub fn create_from_name(
        mode: &str,
        config: &FrameworkConfig,
    ) -> DriverResult<Box<dyn AutomationDriver>> {
        let mode: ExecutionMode = mode.parse()?;
        Ok(Self::create_with_mode(mode, config))
    }

    /// Create an API driver with the verb surface exposed.
    ///
    /// The provider split is the same one `create` applies for API mode;
    /// this entry point just keeps the `ApiDriver` vtable.
    #[must_use]
    pub fn create_api(config: &FrameworkConfig) -> Box<dyn ApiDriver> {
        match config.api_provider {
            ApiProvider::Hybrid => Box::new(HybridApiStrategy::new()),
            ApiProvider::Specialized => Box::new(SpecializedApiStrategy::new()),
        }
    }
}
