//! Concrete automation strategies behind the driver contract.
//!
//! One module per target family: CDP-driven browsers, two HTTP API
//! flavors, and WebDriver-driven mobile devices. The factory is the only
//! place that picks between them.

pub mod api_hybrid;
pub mod api_specialized;
pub mod mobile;
pub mod web;

pub use api_hybrid::HybridApiStrategy;
pub use api_specialized::SpecializedApiStrategy;
pub use mobile::MobileStrategy;
pub use web::WebStrategy;
