//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Framework error
    #[error(transparent)]
    Comprobar(#[from] comprobar::ComprobarError),

    /// Browser support was not compiled in
    #[error("Browser support not compiled in. Rebuild with --features browser")]
    BrowserSupportMissing,

    /// One or more scenarios failed
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed {
        /// Number of failing scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Generic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_failed_display() {
        let err = CliError::ScenariosFailed {
            failed: 1,
            total: 4,
        };
        assert_eq!(err.to_string(), "1 of 4 scenarios failed");
    }

    #[test]
    fn test_comprobar_error_is_transparent() {
        let err: CliError = comprobar::ComprobarError::Timeout { ms: 30_000 }.into();
        assert!(err.to_string().contains("30000"));
    }
}
