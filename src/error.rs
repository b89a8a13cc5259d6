//! # Error Handling
//!
//! This module provides the error taxonomy for security-mcp operations using
//! the `thiserror` crate. Input problems (empty targets, shell metacharacters,
//! missing parameters, disallowed tools) are detected before any process is
//! spawned and surface to callers as formatted text, never as protocol faults.
//!
//! Execution failures and timeouts are *not* errors: the executor folds them
//! into an [`ExecutionResult`](crate::external::ExecutionResult) so that every
//! launched process produces exactly one outcome.
//!
//! ## Example
//!
//! ```rust
//! use security_mcp::error::{SecurityMcpError, Result};
//!
//! fn require(name: &str, value: &str) -> Result<()> {
//!     if value.trim().is_empty() {
//!         return Err(SecurityMcpError::missing_parameter(name));
//!     }
//!     Ok(())
//! }
//!
//! let err = require("Search term", " ").unwrap_err();
//! assert_eq!(err.user_message(), "Error: Search term is required");
//! ```

use crate::validation::ValidationError;
use std::io;

/// Custom error types for security-mcp operations
#[derive(Debug, thiserror::Error)]
pub enum SecurityMcpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} is required")]
    MissingParameter(String),

    #[error("Tool '{tool}' not in allowed list: {allowed}")]
    ToolNotAllowed { tool: String, allowed: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Internal(String),
}

impl SecurityMcpError {
    /// Create a new missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new disallowed tool error
    pub fn tool_not_allowed(tool: impl Into<String>, allowed: &[&str]) -> Self {
        Self::ToolNotAllowed {
            tool: tool.into(),
            allowed: allowed.join(", "),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parsing error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Text shown to the caller after the failure marker.
    ///
    /// Validation failures read as plain sentences; everything else is
    /// prefixed with `Error: `.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Result type alias for security-mcp operations
pub type Result<T> = std::result::Result<T, SecurityMcpError>;
