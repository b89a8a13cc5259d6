//! # Structured Logging Module
//!
//! This module sets up structured logging for security-mcp with the `tracing`
//! ecosystem. stdout carries the MCP protocol, so console output always goes
//! to stderr; an optional rolling file appender can be added alongside it.
//!
//! ## Features
//!
//! - Configurable log levels (trace, debug, info, warn, error)
//! - Plain or JSON output
//! - Hourly rolling log files with a retention limit
//! - Environment-based configuration (`RUST_LOG` wins over the configured level)
//! - Per-tool-call spans and external execution events
//!
//! ## Example
//!
//! ```rust,no_run
//! use security_mcp::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env()?;
//! let _guards = init_logging(&config)?;
//!
//! tracing::info!("Server started");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{Result, SecurityMcpError};
use crate::external::ExecutionResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Configuration for structured logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to write to stderr
    pub console: bool,
    /// Whether to output in JSON format
    pub json: bool,
    /// Log file path (optional)
    pub file_path: Option<PathBuf>,
    /// Number of rotated log files to keep
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            json: false,
            file_path: None,
            max_files: 5,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("SECURITY_MCP_LOG_LEVEL") {
            config.level = level.trim().to_lowercase();
        }

        if let Some(console) = lookup("SECURITY_MCP_LOG_CONSOLE") {
            config.console = console
                .trim()
                .parse::<bool>()
                .map_err(|_| SecurityMcpError::config("Invalid SECURITY_MCP_LOG_CONSOLE value"))?;
        }

        if let Some(json) = lookup("SECURITY_MCP_LOG_JSON") {
            config.json = json
                .trim()
                .parse::<bool>()
                .map_err(|_| SecurityMcpError::config("Invalid SECURITY_MCP_LOG_JSON value"))?;
        }

        if let Some(file_path) = lookup("SECURITY_MCP_LOG_FILE") {
            if !file_path.trim().is_empty() {
                config.file_path = Some(PathBuf::from(file_path.trim()));
            }
        }

        if let Some(max_files) = lookup("SECURITY_MCP_LOG_MAX_FILES") {
            config.max_files = max_files
                .trim()
                .parse::<usize>()
                .map_err(|_| SecurityMcpError::config("Invalid SECURITY_MCP_LOG_MAX_FILES value"))?;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(SecurityMcpError::config(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.max_files == 0 {
            return Err(SecurityMcpError::config("Max log files must be greater than 0"));
        }

        Ok(())
    }
}

/// Initialize structured logging with the given configuration
///
/// Returns worker guards that must stay alive for the duration of the
/// program, otherwise buffered file output is lost.
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>> {
    config.validate()?;

    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    if config.console {
        let console_layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .boxed()
        };
        layers.push(console_layer.with_filter(env_filter()).boxed());
    }

    if let Some(file_path) = &config.file_path {
        let directory = file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let prefix = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("security-mcp");

        let file_appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::HOURLY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(config.max_files)
            .build(directory)
            .map_err(|e| SecurityMcpError::config(format!("Failed to create log appender: {}", e)))?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed()
        };
        layers.push(file_layer.with_filter(env_filter()).boxed());
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| SecurityMcpError::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(
        level = %config.level,
        console = config.console,
        json = config.json,
        file_path = ?config.file_path,
        "Logging initialized"
    );

    Ok(guards)
}

/// Create a span for one tool call
pub fn tool_span(tool: &str, target: &str) -> tracing::Span {
    tracing::info_span!(
        "tool_call",
        tool = %tool,
        target = %target,
        start_time = %chrono::Utc::now().to_rfc3339()
    )
}

/// Log external tool execution
pub fn log_external_tool(program: &str, command: &str, duration_ms: u64, result: &ExecutionResult) {
    if result.timed_out {
        tracing::warn!(
            program = %program,
            command = %command,
            duration_ms = duration_ms,
            "External tool timed out"
        );
    } else if result.exit_code == 0 {
        tracing::debug!(
            program = %program,
            command = %command,
            duration_ms = duration_ms,
            stdout_bytes = result.stdout.len(),
            "External tool executed successfully"
        );
    } else {
        tracing::info!(
            program = %program,
            command = %command,
            duration_ms = duration_ms,
            exit_code = result.exit_code,
            "External tool exited with non-zero status"
        );
    }
}
