//! # Configuration Management
//!
//! Process-wide settings for security-mcp. A [`Config`] is built once at
//! startup, wrapped in an `Arc` and handed to every handler; nothing mutates
//! it afterwards.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults from [`constants`](crate::constants)
//! 2. A TOML file named by `SECURITY_MCP_CONFIG`
//! 3. Environment variables `SCAN_TIMEOUT`, `DEFAULT_INTENSITY`,
//!    `DIRB_WORDLIST` and `MAX_THREADS`
//!
//! ## Example
//!
//! ```rust
//! use security_mcp::config::Config;
//! use std::time::Duration;
//!
//! let config = Config::from_lookup(|key| match key {
//!     "SCAN_TIMEOUT" => Some("120".to_string()),
//!     _ => None,
//! })?;
//!
//! assert_eq!(config.scan_timeout, Duration::from_secs(120));
//! assert_eq!(config.max_threads, 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config_file::ConfigFile;
use crate::constants;
use crate::error::{Result, SecurityMcpError};
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "SECURITY_MCP_CONFIG";

/// Immutable server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default execution timeout for tool runs
    pub scan_timeout: Duration,
    /// nmap timing template used when a call gives none (e.g. `T3`)
    pub default_intensity: String,
    /// Wordlist passed to dirb when a call gives none
    pub dirb_wordlist: String,
    /// Upper bound for the dirb `-z` value
    pub max_threads: u32,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_timeout: Duration::from_secs(constants::DEFAULT_SCAN_TIMEOUT_SECS),
            default_intensity: constants::DEFAULT_INTENSITY.to_string(),
            dirb_wordlist: constants::DEFAULT_DIRB_WORDLIST.to_string(),
            max_threads: constants::DEFAULT_MAX_THREADS,
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(CONFIG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            ConfigFile::load_from_file(path.trim())?.apply(&mut config);
        }

        config.apply_env(&lookup)?;
        config.logging = LogConfig::from_lookup(&lookup)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timeout) = lookup("SCAN_TIMEOUT") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| SecurityMcpError::config("Invalid SCAN_TIMEOUT value"))?;
            self.scan_timeout = Duration::from_secs(secs);
        }

        if let Some(intensity) = lookup("DEFAULT_INTENSITY") {
            self.default_intensity = intensity.trim().to_string();
        }

        if let Some(wordlist) = lookup("DIRB_WORDLIST") {
            self.dirb_wordlist = wordlist.trim().to_string();
        }

        if let Some(max_threads) = lookup("MAX_THREADS") {
            self.max_threads = max_threads
                .trim()
                .parse::<u32>()
                .map_err(|_| SecurityMcpError::config("Invalid MAX_THREADS value"))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan_timeout.is_zero() {
            return Err(SecurityMcpError::config("Scan timeout must be greater than 0"));
        }

        if self.max_threads == 0 {
            return Err(SecurityMcpError::config("Max threads must be at least 1"));
        }

        if self.default_intensity.is_empty() {
            return Err(SecurityMcpError::config("Default intensity cannot be empty"));
        }

        if self.dirb_wordlist.is_empty() {
            return Err(SecurityMcpError::config("DIRB wordlist cannot be empty"));
        }

        self.logging.validate()
    }
}
