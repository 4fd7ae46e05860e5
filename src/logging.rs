//! Logging functionality for clayceo
//!
//! This module provides utilities for configuring and working with logging
//! through the `tracing` crate.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "CLAYCEO_LOG";

/// Log levels supported by clayceo.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error logs only
    Error,
    /// Warning and error logs
    Warn,
    /// Info and above - analysis results and composed prompts
    Info,
    /// Debug and above - request construction and endpoints
    Debug,
    /// Everything, including raw model responses
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// Directive string understood by `EnvFilter`, scoped to this crate.
    pub fn directive(self) -> String {
        format!("clayceo={}", self.to_tracing_level())
    }
}

/// Initialize logging with a specific log level.
///
/// Call once at the start of the program. Subsequent calls are ignored.
///
/// ```no_run
/// use clayceo::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("Analyzer starting");
/// ```
///
/// Setting `CLAYCEO_LOG` takes precedence over `level`:
///
/// ```bash
/// CLAYCEO_LOG=debug cargo run --example analyze_pfp -- pfp.jpg
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    if tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .is_ok()
    {
        tracing::info!("clayceo logging initialized at level: {:?}", level);
    }
}

/// Initialize logging with a custom filter string.
///
/// ```no_run
/// use clayceo::logging::init_logging_with_filter;
///
/// init_logging_with_filter("clayceo=debug,clayceo::backend=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        eprintln!("Invalid filter string: {}, using default (info)", filter);
        EnvFilter::new(LogLevel::Info.directive())
    });

    if tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .is_ok()
    {
        tracing::info!("clayceo logging initialized with custom filter: {}", filter);
    }
}
