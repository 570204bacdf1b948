//! Wait mechanisms for navigation and page synchronization.
//!
//! The action layer and the driver backends share these types; the polling
//! itself happens at the driver boundary (the external automation library
//! already polls during a single wait call). A timed-out wait is terminal for
//! that operation and surfaces as a failure, never a silent retry.

use std::time::Duration;

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Network idle threshold (500ms without requests)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    #[default]
    Load,
    /// Wait for `DOMContentLoaded` event
    DomContentLoaded,
    /// Wait for network to be idle (no requests for 500ms)
    NetworkIdle,
}

impl LoadState {
    /// Get the event name for this load state
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
        }
    }

    /// Get default timeout for this load state
    #[must_use]
    pub const fn default_timeout_ms(&self) -> u64 {
        match self {
            Self::Load | Self::DomContentLoaded => 30_000,
            // Network idle can take longer
            Self::NetworkIdle => 60_000,
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: crate::locator::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// URL pattern for navigation waits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// URL contains the given substring
    Contains(String),
    /// Glob with a `**/suffix` shape: URL ends with the suffix
    Glob(String),
}

impl UrlPattern {
    /// Match a URL containing the given substring
    #[must_use]
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into())
    }

    /// Match a URL against a `**/suffix` glob
    #[must_use]
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob(pattern.into())
    }

    /// Check whether a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Contains(fragment) => url.contains(fragment.as_str()),
            Self::Glob(pattern) => {
                if let Some(suffix) = pattern.strip_prefix("**") {
                    url.trim_end_matches('/').ends_with(suffix.trim_end_matches('/'))
                } else {
                    url == pattern
                }
            }
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contains(fragment) => write!(f, "*{fragment}*"),
            Self::Glob(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// Result of a wait operation
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Whether the wait was successful
    pub success: bool,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a successful wait result
    #[must_use]
    pub fn success(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: true,
            elapsed,
            waited_for: waited_for.into(),
        }
    }

    /// Create a timeout wait result
    #[must_use]
    pub fn timeout(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            waited_for: waited_for.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod load_state_tests {
        use super::*;

        #[test]
        fn test_event_names() {
            assert_eq!(LoadState::Load.event_name(), "load");
            assert_eq!(LoadState::DomContentLoaded.event_name(), "domcontentloaded");
            assert_eq!(LoadState::NetworkIdle.event_name(), "networkidle");
        }

        #[test]
        fn test_network_idle_gets_longer_timeout() {
            assert_eq!(LoadState::Load.default_timeout_ms(), 30_000);
            assert_eq!(LoadState::NetworkIdle.default_timeout_ms(), 60_000);
        }
    }

    mod url_pattern_tests {
        use super::*;

        #[test]
        fn test_contains_matches() {
            let pattern = UrlPattern::contains("/dashboard/dash");
            assert!(pattern.matches("https://shop.example/client/#/dashboard/dash"));
            assert!(!pattern.matches("https://shop.example/client/#/auth/login"));
        }

        #[test]
        fn test_glob_suffix_matches() {
            let pattern = UrlPattern::glob("**/dashboard/dash");
            assert!(pattern.matches("https://shop.example/client/#/dashboard/dash"));
            assert!(pattern.matches("https://shop.example/client/#/dashboard/dash/"));
            assert!(!pattern.matches("https://shop.example/client/#/dashboard"));
        }

        #[test]
        fn test_glob_without_wildcard_is_exact() {
            let pattern = UrlPattern::glob("https://shop.example/");
            assert!(pattern.matches("https://shop.example/"));
            assert!(!pattern.matches("https://shop.example/other"));
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, 30_000);
            assert_eq!(opts.poll_interval_ms, 50);
        }

        #[test]
        fn test_builders() {
            let opts = WaitOptions::new().with_timeout(5_000).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_secs(5));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }
    }

    mod wait_result_tests {
        use super::*;

        #[test]
        fn test_success_and_timeout() {
            let ok = WaitResult::success(Duration::from_millis(12), "url");
            assert!(ok.success);
            let ko = WaitResult::timeout(Duration::from_millis(30_000), "url");
            assert!(!ko.success);
            assert_eq!(ko.waited_for, "url");
        }
    }
}
