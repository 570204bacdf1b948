//! CLI argument definitions.

use clap::Parser;

/// Run the storefront end-to-end scenarios against a live browser
#[derive(Debug, Parser)]
#[command(name = "comprobador", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the storefront login page
    #[arg(long, env = "COMPROBAR_URL", default_value = comprobar::DEFAULT_BASE_URL)]
    pub url: String,

    /// Login identifier (email)
    #[arg(long, env = "COMPROBAR_EMAIL", default_value = comprobar::DEFAULT_EMAIL)]
    pub email: String,

    /// Login secret
    #[arg(long, env = "COMPROBAR_PASSWORD", default_value = comprobar::DEFAULT_PASSWORD)]
    pub password: String,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Default timeout for element actions and waits, in milliseconds
    #[arg(long, default_value_t = comprobar::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Directory for dated log files
    #[arg(long, default_value = "logs")]
    pub log_dir: String,

    /// Only run scenarios whose name contains this substring
    #[arg(long)]
    pub filter: Option<String>,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
