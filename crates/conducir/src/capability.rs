//! Cloud capability builders for the two supported remote providers.
//!
//! Pure transformations from the framework configuration into
//! provider-shaped payloads. No I/O; the only non-deterministic input is
//! the date embedded in the build label.
//!
//! An unrecognized non-local platform yields base capabilities only (no
//! provider namespace) plus a warning; refusing to open a session for it
//! is the strategies' job.

use serde_json::{json, Value};

use crate::config::{CloudPlatform, FrameworkConfig};

/// Project label stamped into provider session metadata
const PROJECT_NAME: &str = "Conducir Framework";

fn build_label(prefix: &str) -> String {
    format!("{prefix} - {}", chrono::Local::now().format("%Y-%m-%d"))
}

/// Build a Playwright-grid-shaped capability payload for web sessions.
///
/// BrowserStack credentials and targeting land under `bstack:options`,
/// Sauce Labs under `sauce:options`. Local and unknown platforms produce
/// base capabilities only.
#[must_use]
pub fn build_web_capabilities(config: &FrameworkConfig) -> Value {
    let mut caps = json!({
        "browserName": config.browser,
    });
    if let Some(version) = &config.browser_version {
        caps["browserVersion"] = json!(version);
    }

    match &config.cloud_platform {
        CloudPlatform::BrowserStack => {
            caps["bstack:options"] = json!({
                "userName": config.cloud_user,
                "accessKey": config.cloud_key,
                "os": config.os.as_deref().unwrap_or("Windows"),
                "osVersion": config.os_version.as_deref().unwrap_or("11"),
                "projectName": PROJECT_NAME,
                "buildName": build_label("Build"),
                "sessionName": "Web Test",
            });
        }
        CloudPlatform::SauceLabs => {
            caps["sauce:options"] = json!({
                "username": config.cloud_user,
                "accessKey": config.cloud_key,
                "platformName": config.os.as_deref().unwrap_or("Windows 11"),
                "name": "Web Test",
                "build": build_label("Build"),
            });
        }
        CloudPlatform::Local => {}
        CloudPlatform::Unknown(platform) => {
            tracing::warn!(%platform, "unknown cloud platform; building base capabilities only");
        }
    }

    caps
}

/// Build a WebDriver session configuration for mobile sessions.
///
/// The whole session configuration is substituted for cloud runs: account
/// credentials at the top level, Appium capabilities nested under
/// `capabilities` with provider options appended.
#[must_use]
pub fn build_mobile_config(config: &FrameworkConfig) -> Value {
    let platform_name = config.os.as_deref().unwrap_or("Android");
    let automation_name = if platform_name.eq_ignore_ascii_case("ios") {
        "XCUITest"
    } else {
        "UiAutomator2"
    };

    let mut session = json!({
        "user": config.cloud_user,
        "key": config.cloud_key,
        "capabilities": {
            "platformName": platform_name,
            "appium:deviceName": config.os_version.as_deref().unwrap_or("Google Pixel 7"),
            "appium:automationName": automation_name,
        },
    });

    match &config.cloud_platform {
        CloudPlatform::BrowserStack => {
            session["capabilities"]["bstack:options"] = json!({
                "projectName": PROJECT_NAME,
                "buildName": build_label("Mobile Build"),
                "sessionName": "Mobile Test",
            });
        }
        CloudPlatform::SauceLabs => {
            session["capabilities"]["sauce:options"] = json!({
                "name": "Mobile Test",
                "build": build_label("Mobile Build"),
            });
        }
        CloudPlatform::Local => {}
        CloudPlatform::Unknown(platform) => {
            tracing::warn!(%platform, "unknown cloud platform; building base capabilities only");
        }
    }

    session
}
