//! CLI configuration.

use comprobar::logging::LogLevelFilter;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Console log level for this verbosity
    #[must_use]
    pub const fn console_level(self) -> LogLevelFilter {
        match self {
            Self::Quiet => LogLevelFilter::WARN,
            Self::Normal => LogLevelFilter::INFO,
            Self::Verbose => LogLevelFilter::DEBUG,
            Self::Debug => LogLevelFilter::TRACE,
        }
    }

    /// Derive verbosity from the `-q`/`-v` flags
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Self::Quiet
        } else {
            match verbose {
                0 => Self::Normal,
                1 => Self::Verbose,
                _ => Self::Debug,
            }
        }
    }
}
