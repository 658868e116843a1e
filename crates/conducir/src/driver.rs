//! The automation driver contract every strategy implements.
//!
//! Test code depends on this trait only. Which concrete strategy sits
//! behind it is the factory's decision, driven by configuration; swapping
//! targets (web, API, mobile) never touches test code.
//!
//! The lifecycle is: construct (cheap, no I/O), `initialize()` (session
//! establishment), operations, `terminate()`. Operations on a driver whose
//! session is not live fail with `NotInitialized` rather than panicking.
//! Operations a strategy has no semantics for fail with
//! `UnsupportedOperation` naming both the operation and the strategy.

use async_trait::async_trait;

use crate::config::{ExecutionMode, FrameworkConfig};
use crate::element::Element;
use crate::result::{DriverError, DriverResult};

/// Contract implemented by every automation strategy.
///
/// Default implementations reject the visual-only operations, so API
/// strategies only implement what they actually support.
#[async_trait]
pub trait AutomationDriver: Send {
    /// Establish the underlying session.
    ///
    /// Idempotence is not guaranteed; a second call on a live session
    /// re-establishes it (the previous session is torn down first where
    /// the engine requires it).
    async fn initialize(&mut self, config: &FrameworkConfig) -> DriverResult<()>;

    /// Tear down the session and release engine resources.
    ///
    /// Safe to call on an uninitialized or already-terminated driver.
    async fn terminate(&mut self) -> DriverResult<()>;

    /// Navigate to a URL (or equivalent for the target family).
    ///
    /// For API strategies navigation is implicit per-request, so this is
    /// a documented no-op.
    async fn navigate_to(&mut self, url: &str) -> DriverResult<()>;

    /// Resolve a logical name through the locator store and wrap the
    /// engine-native handle.
    ///
    /// Strategies without a visual surface reject this with
    /// `UnsupportedOperation`.
    async fn find_element(&mut self, logical_name: &str) -> DriverResult<Box<dyn Element>> {
        let _ = logical_name;
        Err(DriverError::unsupported("find_element", self.name()))
    }

    /// Re-load the locator store for a page context.
    async fn load_locators(&mut self, page: &str) -> DriverResult<()>;

    /// Capture a screenshot of the current view and return the raw bytes.
    ///
    /// The bytes are also forwarded to the attached screenshot sink under
    /// `name`. Strategies without a visual surface reject this.
    async fn capture_screenshot(&mut self, name: &str) -> DriverResult<Vec<u8>> {
        let _ = name;
        Err(DriverError::unsupported("capture_screenshot", self.name()))
    }

    /// The execution mode this strategy serves
    fn execution_mode(&self) -> ExecutionMode;

    /// Strategy name for diagnostics and dispatch assertions
    fn name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn AutomationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationDriver")
            .field("name", &self.name())
            .finish()
    }
}
