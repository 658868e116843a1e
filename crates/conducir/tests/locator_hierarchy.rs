//! End-to-end tests for the cascading locator hierarchy
//!
//! These exercise the full three-layer merge against a real on-disk
//! locator tree, the way a suite repository would lay one out.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use conducir::{ExecutionMode, LocatorStore};
use tempfile::TempDir;

/// Route store diagnostics (e.g. the malformed-layer warning) into the
/// test harness output.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A locator tree shaped like a real suite repository: shared globals,
/// per-mode commons, and a handful of page files.
fn suite_tree() -> TempDir {
    init_tracing();
    let dir = TempDir::new().expect("temp locator tree");
    write(
        dir.path(),
        "global.json",
        r##"{
            "app_logo": "#logo",
            "toast_message": ".toast",
            "submit_button": "button[type='submit']"
        }"##,
    );
    write(
        dir.path(),
        "web/common.json",
        r##"{
            "nav_bar": "nav.main",
            "submit_button": "#web-submit"
        }"##,
    );
    write(
        dir.path(),
        "web/login.json",
        r##"{
            "username_input": "#user",
            "password_input": "#pass",
            "submit_button": "#login-submit"
        }"##,
    );
    write(
        dir.path(),
        "web/checkout.json",
        r##"{
            "pay_button": "#pay",
            "toast_message": ".checkout-toast"
        }"##,
    );
    write(
        dir.path(),
        "mobile/common.json",
        r##"{
            "nav_bar": "//android.widget.Toolbar",
            "submit_button": "//android.widget.Button[@text='Submit']"
        }"##,
    );
    dir
}

// ============================================================================
// Layer precedence
// ============================================================================

#[test]
fn test_page_layer_overrides_mode_and_global() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);

    store.load(Some("login"));
    assert_eq!(store.resolve("submit_button"), "#login-submit");
}

#[test]
fn test_mode_layer_overrides_global_without_page() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);

    store.load(None);
    assert_eq!(store.resolve("submit_button"), "#web-submit");
    assert_eq!(store.resolve("app_logo"), "#logo");
}

#[test]
fn test_unrelated_keys_flow_through_every_layer() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);

    store.load(Some("login"));
    assert_eq!(store.resolve("app_logo"), "#logo"); // global only
    assert_eq!(store.resolve("nav_bar"), "nav.main"); // mode only
    assert_eq!(store.resolve("username_input"), "#user"); // page only
}

// ============================================================================
// Page transitions
// ============================================================================

#[test]
fn test_switching_pages_swaps_the_page_layer_wholesale() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);

    store.load(Some("login"));
    assert_eq!(store.resolve("toast_message"), ".toast");

    store.load(Some("checkout"));
    assert_eq!(store.resolve("toast_message"), ".checkout-toast");
    assert_eq!(store.resolve("pay_button"), "#pay");
    // Login-only entries fall back to identity after the switch.
    assert_eq!(store.resolve("username_input"), "username_input");
    // Mode-level overrides are back in effect.
    assert_eq!(store.resolve("submit_button"), "#web-submit");
}

#[test]
fn test_unknown_page_degrades_to_mode_and_global_layers() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);

    store.load(Some("page-with-no-file"));
    assert_eq!(store.resolve("submit_button"), "#web-submit");
    assert_eq!(store.current_page(), Some("page-with-no-file"));
}

// ============================================================================
// Mode isolation and fallback
// ============================================================================

#[test]
fn test_modes_resolve_from_their_own_directories() {
    let tree = suite_tree();
    let mut web = LocatorStore::new(tree.path(), ExecutionMode::Web);
    let mut mobile = LocatorStore::new(tree.path(), ExecutionMode::Mobile);

    web.load(None);
    mobile.load(None);

    assert_eq!(web.resolve("nav_bar"), "nav.main");
    assert_eq!(
        mobile.resolve("nav_bar"),
        "//android.widget.Toolbar"
    );
    // Globals are shared across modes.
    assert_eq!(mobile.resolve("app_logo"), "#logo");
}

#[test]
fn test_raw_selectors_pass_through_untouched() {
    let tree = suite_tree();
    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);
    store.load(Some("login"));

    // A test may hand the driver a raw selector with no logical mapping.
    assert_eq!(store.resolve("div.ad-hoc > span"), "div.ad-hoc > span");
    assert!(!store.contains("div.ad-hoc > span"));
}

#[test]
fn test_broken_layer_file_does_not_poison_the_rest() {
    let tree = suite_tree();
    write(tree.path(), "web/broken.json", "{oops");

    let mut store = LocatorStore::new(tree.path(), ExecutionMode::Web);
    store.load(Some("broken"));

    // The malformed page layer contributes nothing; lower layers hold.
    assert_eq!(store.resolve("submit_button"), "#web-submit");
    assert_eq!(store.resolve("app_logo"), "#logo");
}
