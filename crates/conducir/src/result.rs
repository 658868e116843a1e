//! Result and error types for Conducir.

use thiserror::Error;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur in the driver core
#[derive(Debug, Error)]
pub enum DriverError {
    /// Requested execution mode is outside the closed set {web, api, mobile}
    #[error("Unsupported execution mode: {mode}")]
    UnsupportedMode {
        /// The rejected mode string
        mode: String,
    },

    /// A contract method was invoked on a strategy with no semantics for it
    #[error("{operation}() is not supported by the {strategy} strategy")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
        /// Name of the strategy that rejected it
        strategy: &'static str,
    },

    /// An operation was called before `initialize()` established a session
    #[error("driver session not established: call initialize() before {operation}()")]
    NotInitialized {
        /// Name of the operation that required a live session
        operation: &'static str,
    },

    /// Underlying engine failed while establishing the session
    #[error("failed to establish session: {message}")]
    SessionEstablishment {
        /// Engine error message
        message: String,
    },

    /// A non-local cloud platform outside the two supported providers
    #[error("unknown cloud platform: {platform}")]
    UnknownCloudPlatform {
        /// The configured platform value
        platform: String,
    },

    /// Navigation failed
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// Target URL or activity
        url: String,
        /// Engine error message
        message: String,
    },

    /// Element lookup or interaction failed
    #[error("element operation on '{name}' failed: {message}")]
    Element {
        /// Logical name (or raw selector) of the element
        name: String,
        /// Engine error message
        message: String,
    },

    /// Bounded wait expired
    #[error("operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Screenshot capture failed
    #[error("screenshot failed: {message}")]
    Screenshot {
        /// Engine error message
        message: String,
    },

    /// HTTP request error from the API strategies
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DriverError {
    /// Construct an `UnsupportedOperation` error for a strategy
    #[must_use]
    pub fn unsupported(operation: &'static str, strategy: &'static str) -> Self {
        Self::UnsupportedOperation {
            operation,
            strategy,
        }
    }

    /// Construct a `NotInitialized` error for an operation
    #[must_use]
    pub fn not_initialized(operation: &'static str) -> Self {
        Self::NotInitialized { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_names_both_sides() {
        let err = DriverError::unsupported("find_element", "HybridApiStrategy");
        let msg = err.to_string();
        assert!(msg.contains("find_element"));
        assert!(msg.contains("HybridApiStrategy"));
    }

    #[test]
    fn test_unsupported_mode_message() {
        let err = DriverError::UnsupportedMode {
            mode: "desktop".to_string(),
        };
        assert!(err.to_string().contains("desktop"));
    }

    #[test]
    fn test_timeout_message_carries_ms() {
        let err = DriverError::Timeout { ms: 5000 };
        assert!(err.to_string().contains("5000"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DriverError = io.into();
        assert!(matches!(err, DriverError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: DriverError = parse.into();
        assert!(matches!(err, DriverError::Json(_)));
    }
}
