//! # Utility Functions
//!
//! Host checks for the external programs the handlers shell out to.
//!
//! ## Example
//!
//! ```rust,no_run
//! use security_mcp::utils::missing_tools;
//!
//! for (tool, description) in missing_tools() {
//!     println!("{} is not installed ({})", tool, description);
//! }
//! ```

use crate::constants;
use crate::error::{Result, SecurityMcpError};
use std::process::Command;

/// Check if a binary exists in the system PATH
pub fn check_binary_in_path(bin: &str) -> bool {
    match Command::new("which").arg(bin).output() {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// Required tools that could not be found on PATH, with their descriptions
pub fn missing_tools() -> Vec<(&'static str, &'static str)> {
    constants::REQUIRED_TOOLS
        .iter()
        .copied()
        .filter(|(tool, _)| !check_binary_in_path(tool))
        .collect()
}

/// Check that every required external tool is installed.
///
/// A missing tool only degrades the matching operation, so callers decide
/// whether this is fatal.
pub fn check_dependencies() -> Result<()> {
    let missing: Vec<String> = missing_tools()
        .into_iter()
        .map(|(tool, description)| format!("{} ({})", tool, description))
        .collect();

    if !missing.is_empty() {
        return Err(SecurityMcpError::config(format!(
            "Missing required tools:\n  {}\n\nInstall with:\n  sudo apt install nmap nikto sqlmap wpscan dirb exploitdb  # Kali/Debian",
            missing.join("\n  ")
        )));
    }

    Ok(())
}
