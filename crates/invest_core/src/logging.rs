//! Core logging bootstrap and per-component event handles.
//!
//! # Responsibility
//! - Initialize the process-wide logger backend exactly once.
//! - Provide `EventLog`, the handle each repository/service receives at
//!   construction and emits its events through.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and sink.
//! - Logging initialization must not panic.
//! - Re-initialization with a different level or sink is rejected.
//! - Events use the `event=<name> module=<target> status=<status>` layout.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, warn};
use once_cell::sync::OnceCell;
use std::fmt::{Arguments, Display};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "invest";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;
const ROOT_TARGET: &str = "invest";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Destination of log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Rolling files inside an absolute directory.
    Directory(PathBuf),
    /// Unbuffered stderr, for interactive CLI use.
    Stderr,
}

impl LogSink {
    /// Builds a file sink, validating the directory path.
    ///
    /// # Errors
    /// - Returns an error when `log_dir` is empty or not absolute.
    pub fn directory(log_dir: &str) -> Result<Self, String> {
        normalize_log_dir(log_dir).map(Self::Directory)
    }

    fn describe(&self) -> String {
        match self {
            Self::Directory(dir) => dir.display().to_string(),
            Self::Stderr => "stderr".to_string(),
        }
    }
}

struct LoggingState {
    level: &'static str,
    sink: LogSink,
    _logger: LoggerHandle,
}

/// Initializes core logging with level and sink.
///
/// Returns `Ok(())` when logging is active, or a human-readable error string
/// when initialization fails.
///
/// # Invariants
/// - Calling this function repeatedly with the same `level` and `sink` is idempotent.
/// - Calling this function with a different `level` or `sink` is rejected.
/// - Initialization never panics.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when a directory sink cannot be created.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str, sink: LogSink) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return ensure_same_config(state, normalized_level, &sink);
    }

    let init_sink = sink.clone();
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = start_logger(normalized_level, &init_sink)?;

        install_panic_hook_once();

        info!(
            "event=app_start module={ROOT_TARGET} status=ok platform={} build_mode={} version={}",
            std::env::consts::OS,
            build_mode(),
            env!("CARGO_PKG_VERSION")
        );
        info!(
            "event=core_init module={ROOT_TARGET} status=ok level={} sink={}",
            normalized_level,
            init_sink.describe()
        );

        Ok(LoggingState {
            level: normalized_level,
            sink: init_sink,
            _logger: logger,
        })
    })?;

    ensure_same_config(state, normalized_level, &sink)
}

/// Returns active logging status metadata.
///
/// Returns `None` when logging has not been initialized.
pub fn logging_status() -> Option<(&'static str, LogSink)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.sink.clone()))
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, sink: &LogSink) -> Result<LoggerHandle, String> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match sink {
        LogSink::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        LogSink::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    };

    logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

fn ensure_same_config(
    state: &LoggingState,
    level: &'static str,
    sink: &LogSink,
) -> Result<(), String> {
    if &state.sink != sink {
        return Err(format!(
            "logging already initialized with sink `{}`; refusing to switch to `{}`",
            state.sink.describe(),
            sink.describe()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }
    Ok(())
}

/// Per-component logging handle.
///
/// Carries the log target (e.g. `invest::repo::assets`), so a flexi_logger level string
/// can raise or lower verbosity for one component, and renders every event in
/// the shared key/value layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    target: String,
}

impl EventLog {
    /// Root handle for the invest core.
    pub fn new() -> Self {
        Self {
            target: ROOT_TARGET.to_string(),
        }
    }

    /// Derives a handle for a sub-component.
    pub fn child(&self, name: &str) -> Self {
        Self {
            target: format!("{}::{name}", self.target),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn ok(&self, event: &str, detail: Arguments<'_>) {
        info!(
            target: self.target.as_str(),
            "event={event} module={} status=ok {detail}", self.target
        );
    }

    pub fn skipped(&self, event: &str, detail: Arguments<'_>) {
        warn!(
            target: self.target.as_str(),
            "event={event} module={} status=skipped {detail}", self.target
        );
    }

    pub fn failed(&self, event: &str, err: &dyn Display, detail: Arguments<'_>) {
        error!(
            target: self.target.as_str(),
            "event={event} module={} status=error {detail} error={}",
            self.target,
            sanitize_message(&err.to_string(), MAX_PANIC_PAYLOAD_CHARS * 2)
        );
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module={ROOT_TARGET} status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

// Payloads and store errors may echo user-entered names; keep them on one line.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
