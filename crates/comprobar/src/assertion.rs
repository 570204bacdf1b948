//! Verification primitives for search results and counts.

use crate::logging::LogContext;
use crate::result::{ComprobarError, ComprobarResult};
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of comparing an expectation against an observed value.
///
/// Logged, then discarded — nothing persists outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Whether the verification passed
    pub passed: bool,
    /// Human-readable description of what was verified
    pub description: String,
}

impl VerificationOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            passed: true,
            description: description.into(),
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn fail(description: impl Into<String>) -> Self {
        Self {
            passed: false,
            description: description.into(),
        }
    }

    /// Create an outcome from a boolean check
    #[must_use]
    pub fn from_check(description: impl Into<String>, passed: bool) -> Self {
        Self {
            passed,
            description: description.into(),
        }
    }

    /// Log this outcome as an `ASSERTION [PASSED|FAILED]` line and return
    /// whether it passed
    pub fn log(&self, log: &LogContext) -> bool {
        log.assertion(&self.description, self.passed);
        self.passed
    }

    /// Convert a failing outcome into an error, passing through on success
    pub fn into_result(self) -> ComprobarResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(ComprobarError::AssertionFailed {
                message: self.description,
            })
        }
    }
}

/// Case-insensitive containment over every name in a result set.
///
/// Vacuously **false** when the set is empty: "no results" must not count as
/// "all results matched".
#[must_use]
pub fn all_contain(names: &[String], keyword: &str) -> bool {
    if names.is_empty() {
        return false;
    }
    let needle = keyword.to_lowercase();
    names.iter().all(|name| name.to_lowercase().contains(&needle))
}

/// Names from the set that do NOT contain the keyword (case-insensitive)
#[must_use]
pub fn missing_keyword<'a>(names: &'a [String], keyword: &str) -> Vec<&'a str> {
    let needle = keyword.to_lowercase();
    names
        .iter()
        .filter(|name| !name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

fn showing_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Showing\s+(\d+)\s+results").unwrap())
}

/// Parse the count out of a "Showing N results" label.
///
/// The label is informational only; callers cross-check it against the
/// rendered card count rather than trusting it.
pub fn parse_showing_count(label: &str) -> ComprobarResult<usize> {
    showing_count_re()
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ComprobarError::LabelParse {
            label: label.to_string(),
        })
}
