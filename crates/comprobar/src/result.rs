//! Result and error types for Comprobar.

use thiserror::Error;

/// Result type for Comprobar operations
pub type ComprobarResult<T> = Result<T, ComprobarError>;

/// Errors that can occur in Comprobar
#[derive(Debug, Error)]
pub enum ComprobarError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element resolved for a locator within the timeout
    #[error("No element found for {selector} within {ms}ms")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Element resolved but never became actionable (visible + enabled)
    #[error("Element {selector} not interactable within {ms}ms")]
    NotInteractable {
        /// Selector that resolved
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Generic wait/navigation timeout
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Login did not reach the dashboard within the timeout
    #[error("Login did not reach the dashboard within {ms}ms (last URL: {last_url})")]
    LoginTimeout {
        /// Timeout in milliseconds
        ms: u64,
        /// URL observed when the wait expired
        last_url: String,
    },

    /// Verification mismatch
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Operation called in the wrong state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// The "Showing N results" label did not parse
    #[error("Could not parse results label: {label:?}")]
    LabelParse {
        /// Raw label text
        label: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
