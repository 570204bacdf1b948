//! Comprobar: browser-driven end-to-end testing for the storefront.
//!
//! Comprobar (Spanish: "to verify") logs a user into the storefront, searches
//! the product catalog, and verifies search results and counts. Browser
//! primitives stay delegated to an external automation library behind the
//! [`BrowserDriver`] trait; this crate adds only page objects, workflows, and
//! verification on top.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Test Scenario                                                 │
//! │      │                                                         │
//! │      ▼                                                         │
//! │  Step/Workflow Layer     (LoginSteps, SearchSteps)             │
//! │      │                                                         │
//! │      ▼                                                         │
//! │  Page Object Layer       (LoginPage, ProductsPage)             │
//! │      │                                                         │
//! │      ▼                                                         │
//! │  Element Action Layer    (ElementActions: resolve → act)       │
//! │      │                                                         │
//! │      ▼                                                         │
//! │  BrowserDriver boundary  (ChromiumDriver / in-process fakes)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows back up as extracted text, counts, and booleans; failures
//! propagate unchanged from the driver to the scenario.

#![warn(missing_docs)]

/// Element Action Layer: locator resolution plus driver calls
pub mod actions;

/// Verification primitives: outcomes, containment, label parsing
pub mod assertion;

/// Process configuration consumed once at scenario setup
pub mod config;

/// Abstract browser-automation boundary and its backends
pub mod driver;

/// Symbolic locators and their query rendering
pub mod locator;

/// Injected logging contexts over file + console sinks
pub mod logging;

/// Page objects for the storefront screens
pub mod pages;

/// Result and error types
mod result;

/// Business workflows composing page-object operations
pub mod steps;

/// Wait machinery: load states, URL patterns, wait options
pub mod wait;

pub use actions::{ElementActions, Target};
pub use assertion::{all_contain, missing_keyword, parse_showing_count, VerificationOutcome};
pub use config::{
    Credentials, ScenarioConfig, DEFAULT_BASE_URL, DEFAULT_EMAIL, DEFAULT_PASSWORD,
};
#[cfg(feature = "browser")]
pub use driver::ChromiumDriver;
pub use driver::{BrowserDriver, DriverConfig, ElementHandle, MockDriver};
pub use locator::{
    Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use logging::{dated_log_path, init_logging, LogConfig, LogContext};
pub use pages::{LoginPage, LoginState, ProductsPage, DASHBOARD_URL_MARKER};
pub use result::{ComprobarError, ComprobarResult};
pub use steps::{LoginSteps, SearchSteps};
pub use wait::{
    LoadState, UrlPattern, WaitOptions, WaitResult, DEFAULT_WAIT_TIMEOUT_MS,
    NETWORK_IDLE_THRESHOLD_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    pub use super::assertion::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::logging::*;
    pub use super::pages::*;
    pub use super::result::*;
    pub use super::steps::*;
    pub use super::wait::*;
}
