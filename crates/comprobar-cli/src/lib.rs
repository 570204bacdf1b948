//! Comprobar CLI library.
//!
//! Command-line interface for running the storefront end-to-end scenarios
//! against a live browser.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::Cli;
pub use config::Verbosity;
pub use error::{CliError, CliResult};
pub use output::print_report;
pub use runner::{
    RunReport, ScenarioOutcome, ScenarioRunner, EXPECTED_DASHBOARD_RESULTS, SCENARIO_NAMES,
};
