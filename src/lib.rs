//! # security-mcp - Security Tools over the Model Context Protocol
//!
//! security-mcp exposes common penetration-testing tools (nmap, nikto,
//! sqlmap, wpscan, dirb, searchsploit, ping) as MCP tools over stdio. Each
//! call validates its input, composes a command line, runs it with a bounded
//! wait and returns the tool's output as text.
//!
//! Intended for educational use and authorized testing only.
//!
//! ## Features
//!
//! - **Eight Tools**: fixed-flag wrappers plus an allowlisted passthrough
//! - **Bounded Execution**: per-call timeouts with process-group cleanup
//! - **Input Screening**: shell metacharacter denylist on targets
//! - **Text Results**: failures are reported as text, never protocol errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use security_mcp::config::Config;
//! use security_mcp::external::nmap::NmapParams;
//! use security_mcp::handlers::{self, ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ToolContext::new(Config::load()?);
//!     let params = NmapParams {
//!         target: "scanme.nmap.org".to_string(),
//!         scan_type: "quick".to_string(),
//!         ..Default::default()
//!     };
//!
//!     println!("{}", handlers::nmap_scan(&ctx, params).await);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`server`]: MCP tool router and server metadata
//! - [`handlers`]: per-tool orchestration and response formatting
//! - [`external`]: command composition and the bounded executor
//! - [`validation`]: target screening and URL normalization
//! - [`config`]: environment and file configuration
//! - [`logging`]: `tracing` subscriber setup and execution events
//! - [`shutdown`]: signal-driven cancellation of the serve loop
//! - [`utils`]: host checks for required binaries
//! - [`error`]: error types
//! - [`constants`]: defaults, limits and response markers
//!
//! ## Security
//!
//! Command lines are interpreted by `sh`. The metacharacter denylist in
//! [`validation`] blocks the obvious chaining and substitution forms but not
//! argument splitting on whitespace, globbing or quoting. Run the server only
//! where its callers are trusted.

pub mod config;
pub mod config_file;
pub mod constants;
pub mod error;
pub mod external;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod shutdown;
pub mod utils;
pub mod validation;
