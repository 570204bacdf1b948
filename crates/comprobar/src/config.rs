//! Process configuration for a scenario run.
//!
//! Consumed once at scenario setup; nothing re-reads configuration mid-run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default storefront login URL
pub const DEFAULT_BASE_URL: &str = "https://rahulshettyacademy.com/client/#/auth/login";

/// Default login identifier for the shared test account
pub const DEFAULT_EMAIL: &str = "atulmysuru@gmail.com";

/// Default login secret for the shared test account
pub const DEFAULT_PASSWORD: &str = "India123#";

/// Immutable login credential pair, supplied externally at process start.
/// Lifetime: one test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login identifier (email)
    pub email: String,
    /// Login secret
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Display for Credentials {
    // The secret never appears in logs or reports
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / ********", self.email)
    }
}

/// Configuration for one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Base URL the scenario starts from (the login page)
    pub base_url: String,
    /// Login credentials
    pub credentials: Credentials,
    /// Run the browser headless
    pub headless: bool,
    /// Default timeout for element actions and waits, in milliseconds
    pub default_timeout_ms: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            headless: true,
            default_timeout_ms: crate::locator::DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ScenarioConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the default action timeout
    #[must_use]
    pub const fn with_default_timeout_ms(mut self, ms: u64) -> Self {
        self.default_timeout_ms = ms;
        self
    }

    /// Default timeout as a Duration
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}
