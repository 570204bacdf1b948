//! Logging facility for the test framework.
//!
//! Components do not reach into a process-wide logger registry; each one is
//! handed a [`LogContext`] at construction and emits through it. Lines go to
//! two sinks — the console at INFO and a dated append-only file at DEBUG —
//! formatted as `timestamp - [LEVEL] - [scope] - message`.

use crate::result::ComprobarResult;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use tracing_subscriber::filter::LevelFilter as LogLevelFilter;

/// Width of the step banner line
const STEP_BANNER_WIDTH: usize = 80;

/// Configuration for the logging sinks
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory for dated log files
    pub dir: PathBuf,
    /// Minimum level written to the console
    pub console_level: LevelFilter,
    /// Minimum level written to the log file
    pub file_level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            console_level: LevelFilter::INFO,
            file_level: LevelFilter::DEBUG,
        }
    }
}

impl LogConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log directory
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Set the console level
    #[must_use]
    pub const fn with_console_level(mut self, level: LevelFilter) -> Self {
        self.console_level = level;
        self
    }

    /// Set the file level
    #[must_use]
    pub const fn with_file_level(mut self, level: LevelFilter) -> Self {
        self.file_level = level;
        self
    }
}

/// Path of today's log file under `dir`
#[must_use]
pub fn dated_log_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d");
    dir.join(format!("automation_{stamp}.log"))
}

/// Install the global logging subscriber.
///
/// Idempotent: if a global subscriber is already installed (e.g. a previous
/// scenario in the same process), the call is a no-op.
pub fn init_logging(config: &LogConfig) -> ComprobarResult<()> {
    fs::create_dir_all(&config.dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dated_log_path(&config.dir))?;

    let file_layer = fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .with_filter(config.file_level);

    // RUST_LOG overrides the configured console level when present
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
    let console_layer = fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .with_filter(console_filter);

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();
    Ok(())
}

/// Event format: `timestamp - [LEVEL] - [scope] - message`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = LineVisitor::default();
        event.record(&mut fields);
        let scope = fields
            .scope
            .unwrap_or_else(|| event.metadata().target().to_string());
        writeln!(
            writer,
            "{} - [{}] - [{}] - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.metadata().level(),
            scope,
            fields.message
        )
    }
}

/// Visitor pulling the `scope` and `message` fields out of an event
#[derive(Default)]
struct LineVisitor {
    message: String,
    scope: Option<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "scope" => self.scope = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "scope" => self.scope = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

/// A named logging scope injected into a component at construction.
///
/// Cheap to clone; the scope name shows up as the `[scope]` segment of every
/// line the component emits.
#[derive(Debug, Clone)]
pub struct LogContext {
    scope: String,
}

impl LogContext {
    /// Create a context with the given scope name
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// The scope name
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Derive a context for a sub-component
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self::new(format!("{}::{name}", self.scope))
    }

    /// Log at DEBUG
    pub fn debug(&self, message: impl AsRef<str>) {
        tracing::debug!(scope = %self.scope, "{}", message.as_ref());
    }

    /// Log at INFO
    pub fn info(&self, message: impl AsRef<str>) {
        tracing::info!(scope = %self.scope, "{}", message.as_ref());
    }

    /// Log at WARN
    pub fn warn(&self, message: impl AsRef<str>) {
        tracing::warn!(scope = %self.scope, "{}", message.as_ref());
    }

    /// Log at ERROR
    pub fn error(&self, message: impl AsRef<str>) {
        tracing::error!(scope = %self.scope, "{}", message.as_ref());
    }

    /// Log a workflow step banner
    pub fn step(&self, description: impl AsRef<str>) {
        let banner = "=".repeat(STEP_BANNER_WIDTH);
        self.info(&banner);
        self.info(format!("STEP: {}", description.as_ref()));
        self.info(&banner);
    }

    /// Log an assertion outcome as `ASSERTION [PASSED|FAILED]: description`
    pub fn assertion(&self, description: impl AsRef<str>, passed: bool) {
        if passed {
            self.info(format!("ASSERTION [PASSED]: {}", description.as_ref()));
        } else {
            self.error(format!("ASSERTION [FAILED]: {}", description.as_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );
        tracing::subscriber::with_default(subscriber, f);
        buf.contents()
    }

    #[test]
    fn test_line_format_has_level_scope_and_message() {
        let out = capture(|| LogContext::new("LoginPage").info("Clicking login button"));
        assert!(out.contains(" - [INFO] - [LoginPage] - Clicking login button"));
    }

    #[test]
    fn test_assertion_lines() {
        let out = capture(|| {
            let log = LogContext::new("SearchSteps");
            log.assertion("all products contain 'iphone'", true);
            log.assertion("product count matches", false);
        });
        assert!(out.contains("ASSERTION [PASSED]: all products contain 'iphone'"));
        assert!(out.contains("[ERROR] - [SearchSteps] - ASSERTION [FAILED]: product count matches"));
    }

    #[test]
    fn test_step_banner() {
        let out = capture(|| LogContext::new("LoginSteps").step("Performing login"));
        assert!(out.contains("STEP: Performing login"));
        assert!(out.contains(&"=".repeat(STEP_BANNER_WIDTH)));
    }

    #[test]
    fn test_child_scope() {
        let log = LogContext::new("SearchSteps");
        assert_eq!(log.child("ProductsPage").scope(), "SearchSteps::ProductsPage");
    }

    #[test]
    fn test_dated_log_path_shape() {
        let path = dated_log_path(Path::new("logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("automation_"));
        assert!(name.ends_with(".log"));
        // automation_YYYYMMDD.log
        assert_eq!(name.len(), "automation_".len() + 8 + ".log".len());
    }

    #[test]
    fn test_init_logging_creates_log_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        let config = LogConfig::new().with_dir(&dir);
        init_logging(&config).unwrap();
        assert!(dir.is_dir());
        assert!(dated_log_path(&dir).exists());
    }
}
