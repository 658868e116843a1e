//! Screenshot reporting seam.
//!
//! The driver core never persists images itself; `capture_screenshot`
//! forwards the raw bytes plus a name to whatever sink is attached.
//! Report fan-out (HTML reports, attachment uploads) lives behind this
//! trait, outside the core.

use std::sync::Mutex;

/// Receives captured screenshots from the visual strategies
pub trait ScreenshotSink: Send + Sync {
    /// Attach one captured image under a descriptive name
    fn attach(&self, name: &str, bytes: &[u8]);
}

/// Sink that drops everything (default when no reporter is attached)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ScreenshotSink for NullSink {
    fn attach(&self, _name: &str, _bytes: &[u8]) {}
}

/// Sink that records attachments in memory, for tests
#[derive(Debug, Default)]
pub struct CollectingSink {
    captured: Mutex<Vec<(String, usize)>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names and byte sizes of everything attached so far
    #[must_use]
    pub fn captured(&self) -> Vec<(String, usize)> {
        self.captured.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Whether a screenshot with `name` was attached
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.captured()
            .iter()
            .any(|(captured, _)| captured == name)
    }
}

impl ScreenshotSink for CollectingSink {
    fn attach(&self, name: &str, bytes: &[u8]) {
        if let Ok(mut captured) = self.captured.lock() {
            captured.push((name.to_string(), bytes.len()));
        }
    }
}
