// security-mcp - security testing tools exposed over the Model Context Protocol

use colored::*;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use security_mcp::config::Config;
use security_mcp::config_file::ConfigFile;
use security_mcp::error::{Result, SecurityMcpError};
use security_mcp::handlers::ToolContext;
use security_mcp::server::SecurityServer;
use security_mcp::{constants, logging, shutdown, utils};
use std::env;
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Application entry point
#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_usage();
            process::exit(0);
        }
        Some("--version") | Some("-V") => {
            println!("security-mcp {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }
        Some("--check") => process::exit(print_tool_check()),
        Some("--print-config") | None => {}
        Some(other) => {
            eprintln!("{} unknown argument '{}'", "ERROR".red().bold(), other);
            print_usage();
            process::exit(1);
        }
    }

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    if args.get(1).map(String::as_str) == Some("--print-config") {
        match ConfigFile::from(&config).to_toml() {
            Ok(toml) => {
                print!("{}", toml);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{} {}", "ERROR".red().bold(), e);
                process::exit(1);
            }
        }
    }

    let _guards = match logging::init_logging(&config.logging) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!(error = %e, "Server terminated with an error");
        process::exit(1);
    }
}

/// Print usage information
fn print_usage() {
    eprintln!("{}", "usage: security-mcp [--help | --version | --check | --print-config]".bold());
    eprintln!("With no arguments the server speaks MCP over stdin/stdout.");
    eprintln!("Options:");
    eprintln!("  -h, --help          Show this message");
    eprintln!("  -V, --version       Print the version");
    eprintln!("  --check             Report which required tools are on PATH");
    eprintln!("  --print-config      Print the effective configuration as TOML");
    eprintln!("Environment:");
    eprintln!("  SCAN_TIMEOUT        Default execution timeout in seconds (default: 300)");
    eprintln!("  DEFAULT_INTENSITY   nmap timing template (default: T3)");
    eprintln!("  DIRB_WORDLIST       dirb wordlist (default: {})", constants::DEFAULT_DIRB_WORDLIST);
    eprintln!("  MAX_THREADS         Upper bound for dirb threads (default: 10)");
    eprintln!("  SECURITY_MCP_CONFIG Optional TOML file with the same settings");
    eprintln!("  SECURITY_MCP_LOG_LEVEL, SECURITY_MCP_LOG_JSON, SECURITY_MCP_LOG_FILE,");
    eprintln!("  SECURITY_MCP_LOG_CONSOLE, SECURITY_MCP_LOG_MAX_FILES  Logging settings");
}

/// Print the availability of every required tool; exit status 1 if any is missing
fn print_tool_check() -> i32 {
    let mut status = 0;
    for (tool, description) in constants::REQUIRED_TOOLS {
        if utils::check_binary_in_path(tool) {
            println!("{} {:<14} {}", "✓".green().bold(), tool, description);
        } else {
            println!("{} {:<14} {}", "✗".red().bold(), tool, description.dimmed());
            status = 1;
        }
    }
    status
}

/// Main application logic
async fn run(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        scan_timeout_secs = config.scan_timeout.as_secs(),
        default_intensity = %config.default_intensity,
        dirb_wordlist = %config.dirb_wordlist,
        max_threads = config.max_threads,
        "Starting security-mcp"
    );

    if let Err(e) = utils::check_dependencies() {
        warn!("{}", e);
    }

    let token = CancellationToken::new();
    let _listener = shutdown::spawn_signal_listener(token.clone());

    let server = SecurityServer::new(ToolContext::new(config));
    let service = server
        .serve_with_ct(stdio(), token)
        .await
        .map_err(|e| SecurityMcpError::transport(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| SecurityMcpError::internal(format!("Server task failed: {}", e)))?;

    info!(reason = ?reason, "Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_usage_doesnt_panic() {
        print_usage();
    }
}
