//! # Graceful Shutdown Module
//!
//! Turns SIGINT and SIGTERM into cancellation of the MCP serve loop. The
//! listener cancels a [`CancellationToken`] shared with `serve_with_ct`.
//! Each tool call aborts its own task when the call is cancelled, which
//! kills that call's process group. Calls still running when the serve loop
//! ends are cleaned up when the runtime shuts down.
//!
//! ## Example
//!
//! ```rust,no_run
//! use security_mcp::shutdown::spawn_signal_listener;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let token = CancellationToken::new();
//!     let _listener = spawn_signal_listener(token.clone());
//!
//!     token.cancelled().await;
//!     println!("Shutting down");
//! }
//! ```

use crate::error::{Result, SecurityMcpError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Signal types that can trigger shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C)
    SigInt,
    /// SIGTERM (termination signal)
    SigTerm,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::SigInt => write!(f, "SIGINT"),
            ShutdownSignal::SigTerm => write!(f, "SIGTERM"),
        }
    }
}

/// Wait for the first termination signal
#[cfg(unix)]
pub async fn wait_for_signal() -> Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| SecurityMcpError::internal(format!("Failed to setup SIGINT handler: {}", e)))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| SecurityMcpError::internal(format!("Failed to setup SIGTERM handler: {}", e)))?;

    tokio::select! {
        _ = sigint.recv() => Ok(ShutdownSignal::SigInt),
        _ = sigterm.recv() => Ok(ShutdownSignal::SigTerm),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> Result<ShutdownSignal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| SecurityMcpError::internal(format!("Failed to setup Ctrl+C handler: {}", e)))?;
    Ok(ShutdownSignal::SigInt)
}

/// Cancel `token` when a termination signal arrives.
///
/// If the handlers cannot be installed the token is left alone and the
/// server runs until stdin closes.
pub fn spawn_signal_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            received = wait_for_signal() => match received {
                Ok(signal) => {
                    info!(signal = %signal, "Received shutdown signal, stopping server");
                    token.cancel();
                }
                Err(e) => error!(error = %e, "Signal handling unavailable"),
            },
            _ = token.cancelled() => {}
        }
    })
}
