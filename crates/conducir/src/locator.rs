//! Hierarchical locator store: cascading JSON selector inheritance.
//!
//! Logical element names are resolved to engine-specific selector strings
//! through three layers merged in strict precedence order:
//!
//! ```text
//! global.json  <  <mode>/common.json  <  <mode>/<page>.json
//! ```
//!
//! Later layers override earlier ones key-by-key. Every `load()` rebuilds
//! the active mapping from scratch; nothing from a previous page layer
//! survives a reload. Missing or malformed layer files are treated as empty
//! layers so a broken optional locator file cannot abort a run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ExecutionMode;

/// On-disk layout of one layer tier, relative to the store root
const GLOBAL_LAYER: &str = "global.json";

/// File name of the mode-common layer inside a mode directory
const COMMON_LAYER: &str = "common.json";

/// Active logical-name to selector mapping for one driver instance.
///
/// Each strategy owns its store, so concurrent driver instances never
/// observe each other's page context.
#[derive(Debug, Clone)]
pub struct LocatorStore {
    base_path: PathBuf,
    mode: ExecutionMode,
    active: HashMap<String, String>,
    current_page: Option<String>,
}

impl LocatorStore {
    /// Create a store rooted at `base_path` for one execution mode.
    /// No files are read until the first `load()`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, mode: ExecutionMode) -> Self {
        Self {
            base_path: base_path.into(),
            mode,
            active: HashMap::new(),
            current_page: None,
        }
    }

    /// Rebuild the active mapping for an optional page.
    ///
    /// Reads, in order, the global layer, the mode-common layer, and (when
    /// `page` is given) the page layer, then merges them left-to-right with
    /// last-wins override semantics. The previous mapping is discarded in
    /// full.
    pub fn load(&mut self, page: Option<&str>) {
        self.current_page = page.map(String::from);

        let mut merged = self.read_layer(Path::new(GLOBAL_LAYER));
        let common = PathBuf::from(self.mode.as_str()).join(COMMON_LAYER);
        merged.extend(self.read_layer(&common));

        if let Some(page) = page {
            let page_file = PathBuf::from(self.mode.as_str()).join(format!("{page}.json"));
            merged.extend(self.read_layer(&page_file));
        }

        self.active = merged;
    }

    /// Resolve a logical name to its selector string.
    ///
    /// Unknown names are returned unchanged, which lets tests pass a raw
    /// selector directly when no logical mapping exists. A typo in a
    /// logical name therefore surfaces later, from the engine.
    #[must_use]
    pub fn resolve(&self, logical_name: &str) -> String {
        self.active
            .get(logical_name)
            .cloned()
            .unwrap_or_else(|| logical_name.to_string())
    }

    /// Whether a logical name has an explicit mapping in the active layers
    #[must_use]
    pub fn contains(&self, logical_name: &str) -> bool {
        self.active.contains_key(logical_name)
    }

    /// Page the store was last loaded for, if any
    #[must_use]
    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    /// Execution mode the store serves
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Number of entries in the active mapping
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the active mapping is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Read one layer file, fail-open: missing or malformed files become
    /// an empty layer (with a warning for malformed content).
    fn read_layer(&self, relative: &Path) -> HashMap<String, String> {
        let path = self.base_path.join(relative);
        let Ok(data) = std::fs::read_to_string(&path) else {
            return HashMap::new();
        };

        match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(layer) => layer,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to parse locator file");
                HashMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_layer(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn store_with_layers() -> (TempDir, LocatorStore) {
        let dir = TempDir::new().unwrap();
        write_layer(
            dir.path(),
            "global.json",
            r##"{"key": "global", "logo": "#logo"}"##,
        );
        write_layer(
            dir.path(),
            "web/common.json",
            r#"{"key": "mode", "nav_bar": ".nav"}"#,
        );
        write_layer(
            dir.path(),
            "web/login.json",
            r##"{"key": "page", "username_input": "#user"}"##,
        );
        let store = LocatorStore::new(dir.path(), ExecutionMode::Web);
        (dir, store)
    }

    #[test]
    fn test_merge_precedence_page_wins() {
        let (_dir, mut store) = store_with_layers();
        store.load(Some("login"));
        assert_eq!(store.resolve("key"), "page");
    }

    #[test]
    fn test_merge_precedence_mode_wins_without_page() {
        let (_dir, mut store) = store_with_layers();
        store.load(None);
        assert_eq!(store.resolve("key"), "mode");
    }

    #[test]
    fn test_global_layer_survives_when_not_overridden() {
        let (_dir, mut store) = store_with_layers();
        store.load(Some("login"));
        assert_eq!(store.resolve("logo"), "#logo");
        assert_eq!(store.resolve("nav_bar"), ".nav");
        assert_eq!(store.resolve("username_input"), "#user");
    }

    #[test]
    fn test_fallback_identity_for_unknown_name() {
        let (_dir, mut store) = store_with_layers();
        store.load(Some("login"));
        assert_eq!(store.resolve("unknown_name"), "unknown_name");
        assert!(!store.contains("unknown_name"));
    }

    #[test]
    fn test_fail_open_when_all_files_absent() {
        let dir = TempDir::new().unwrap();
        let mut store = LocatorStore::new(dir.path(), ExecutionMode::Web);
        store.load(Some("missing_page"));
        assert!(store.is_empty());
        assert_eq!(store.resolve("anything"), "anything");
    }

    #[test]
    fn test_fail_open_on_malformed_json() {
        let dir = TempDir::new().unwrap();
        write_layer(dir.path(), "global.json", r##"{"ok": "#g"}"##);
        write_layer(dir.path(), "web/common.json", "{not valid json");
        let mut store = LocatorStore::new(dir.path(), ExecutionMode::Web);
        store.load(None);
        // Malformed layer contributes nothing; the healthy layer still loads.
        assert_eq!(store.resolve("ok"), "#g");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reload_discards_prior_page_layer() {
        let (dir, mut store) = store_with_layers();
        write_layer(dir.path(), "web/checkout.json", r##"{"pay_button": "#pay"}"##);

        store.load(Some("login"));
        assert_eq!(store.resolve("username_input"), "#user");

        store.load(Some("checkout"));
        // Prior page entries are gone, not merged additively.
        assert_eq!(store.resolve("username_input"), "username_input");
        assert_eq!(store.resolve("pay_button"), "#pay");
        assert_eq!(store.current_page(), Some("checkout"));
    }

    #[test]
    fn test_mode_directories_are_isolated() {
        let dir = TempDir::new().unwrap();
        write_layer(dir.path(), "web/common.json", r#"{"key": "web-value"}"#);
        write_layer(dir.path(), "mobile/common.json", r#"{"key": "mobile-value"}"#);

        let mut web = LocatorStore::new(dir.path(), ExecutionMode::Web);
        web.load(None);
        let mut mobile = LocatorStore::new(dir.path(), ExecutionMode::Mobile);
        mobile.load(None);

        assert_eq!(web.resolve("key"), "web-value");
        assert_eq!(mobile.resolve("key"), "mobile-value");
    }

    #[test]
    fn test_store_starts_empty_before_load() {
        let store = LocatorStore::new("does-not-exist", ExecutionMode::Api);
        assert!(store.is_empty());
        assert!(store.current_page().is_none());
        assert_eq!(store.mode(), ExecutionMode::Api);
    }
}
