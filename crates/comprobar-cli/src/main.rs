//! Comprobador: run the storefront end-to-end scenarios.
//!
//! ## Usage
//!
//! ```bash
//! comprobador                          # Run every scenario with defaults
//! comprobador --filter search          # Only the search scenarios
//! comprobador --url https://... --email qa@example.com --password secret
//! comprobador --headed -v              # Visible browser, verbose logs
//! ```

use clap::Parser;
use comprobar::{Credentials, LogConfig, ScenarioConfig};
use comprobar_cli::{print_report, Cli, CliError, CliResult, ScenarioRunner, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let log_config = LogConfig::new()
        .with_dir(&cli.log_dir)
        .with_console_level(verbosity.console_level());
    comprobar::init_logging(&log_config).map_err(CliError::Comprobar)?;

    let config = ScenarioConfig::new()
        .with_base_url(cli.url)
        .with_credentials(Credentials::new(cli.email, cli.password))
        .with_headless(!cli.headed)
        .with_default_timeout_ms(cli.timeout_ms);
    let runner = ScenarioRunner::new(config.clone()).with_filter(cli.filter);

    let report = run_scenarios(&config, &runner)?;
    print_report(&report);

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: report.failed_count(),
            total: report.total(),
        })
    }
}

#[cfg(feature = "browser")]
fn run_scenarios(
    config: &ScenarioConfig,
    runner: &ScenarioRunner,
) -> CliResult<comprobar_cli::RunReport> {
    use comprobar::{ChromiumDriver, DriverConfig};

    let driver_config = DriverConfig::new()
        .headless(config.headless)
        .navigation_timeout(config.default_timeout());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let driver = ChromiumDriver::launch(driver_config)
            .await
            .map_err(CliError::Comprobar)?;
        let report = runner.run(&driver).await;
        driver.close().await.map_err(CliError::Comprobar)?;
        Ok(report)
    })
}

#[cfg(not(feature = "browser"))]
fn run_scenarios(
    _config: &ScenarioConfig,
    _runner: &ScenarioRunner,
) -> CliResult<comprobar_cli::RunReport> {
    Err(CliError::BrowserSupportMissing)
}
