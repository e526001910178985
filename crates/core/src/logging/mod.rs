//! Logging bootstrap.
//!
//! Configures two independent rotating sinks, JSON-encoded by default:
//! the application log and a secondary channel for MCP traffic. Events
//! reach the MCP sink by logging with the [`MCP_TARGET`] target:
//!
//! ```ignore
//! tracing::info!(target: blueprint_core::logging::MCP_TARGET, session = %id, "tool call");
//! ```
//!
//! Everything else lands in the application sink. Files rotate daily and
//! writes go through non-blocking background workers; hold the returned
//! [`LoggingGuards`] for the lifetime of the process so buffered events
//! are flushed on shutdown.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, EnvFilter, Layer};

/// Target name routing events to the MCP sink.
pub const MCP_TARGET: &str = "mcp";

/// Target name routing events to the MCP sink.
///
/// Same value as [`MCP_TARGET`]; the constant form is what the tracing
/// macros' `target:` position needs.
pub fn mcp_target() -> &'static str {
    MCP_TARGET
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Directory receiving the rotated log files.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Application log file name prefix.
    #[serde(default = "default_app_file")]
    pub app_file: String,
    /// MCP channel log file name prefix.
    #[serde(default = "default_mcp_file")]
    pub mcp_file: String,
    /// Level directive used when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON-encoded lines (plain text when false).
    #[serde(default = "default_json")]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            app_file: default_app_file(),
            mcp_file: default_mcp_file(),
            level: default_level(),
            json: default_json(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_app_file() -> String {
    "blueprint.log".to_string()
}

fn default_mcp_file() -> String {
    "mcp.log".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    true
}

/// Guards keeping the non-blocking log writers alive.
///
/// Dropping the guards flushes and stops the background writers.
pub struct LoggingGuards {
    _app: WorkerGuard,
    _mcp: WorkerGuard,
}

/// Install the global subscriber with both rotating sinks.
///
/// Returns [`LoggingError::AlreadyInitialized`] if a global subscriber is
/// already set (e.g. on a second call).
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuards, LoggingError> {
    let app_appender = tracing_appender::rolling::daily(&config.dir, &config.app_file);
    let (app_writer, app_guard) = tracing_appender::non_blocking(app_appender);

    let mcp_appender = tracing_appender::rolling::daily(&config.dir, &config.mcp_file);
    let (mcp_writer, mcp_guard) = tracing_appender::non_blocking(mcp_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let app_filter = filter::filter_fn(|metadata| metadata.target() != MCP_TARGET);
    let mcp_filter = filter::filter_fn(|metadata| metadata.target() == MCP_TARGET);

    let (app_layer, mcp_layer) = if config.json {
        (
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(app_writer)
                .with_filter(app_filter)
                .boxed(),
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(mcp_writer)
                .with_filter(mcp_filter)
                .boxed(),
        )
    } else {
        (
            tracing_subscriber::fmt::layer()
                .with_writer(app_writer)
                .with_filter(app_filter)
                .boxed(),
            tracing_subscriber::fmt::layer()
                .with_writer(mcp_writer)
                .with_filter(mcp_filter)
                .boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(app_layer)
        .with(mcp_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LoggingGuards {
        _app: app_guard,
        _mcp: mcp_guard,
    })
}
