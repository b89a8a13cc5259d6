//! # Configuration Constants
//!
//! Defaults, limits and fixed vocabularies used throughout security-mcp.
//! Environment or file configuration overrides the `DEFAULT_*` values at
//! startup; everything else here is fixed.
//!
//! ## Categories
//!
//! - **Timeouts**: default and per-tool execution bounds
//! - **Limits**: thread and ping-count clamps
//! - **Validation**: the shell metacharacter denylist
//! - **Passthrough**: the allowlist for `custom_scan`
//! - **Markers**: the leading symbols of every response

/// Default execution timeout in seconds
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 300;

/// Timeout for exploit database lookups in seconds
pub const LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Timeout for network discovery in seconds
pub const DISCOVERY_TIMEOUT_SECS: u64 = 60;

/// Grace period between SIGTERM and SIGKILL for a timed-out child
pub const TERMINATION_GRACE_SECS: u64 = 5;

/// Default nmap timing template
pub const DEFAULT_INTENSITY: &str = "T3";

/// Default dirb wordlist
pub const DEFAULT_DIRB_WORDLIST: &str = "/usr/share/dirb/wordlists/common.txt";

/// Default upper bound for the dirb `-z` value
pub const DEFAULT_MAX_THREADS: u32 = 10;

/// Shell used to interpret composed command lines
pub const SHELL: &str = "sh";

/// Scheme prepended to web targets that carry none
pub const DEFAULT_URL_SCHEME: &str = "http://";

/// Ping sweep settings
pub mod ping {
    /// Echo requests sent when no count is given
    pub const DEFAULT_COUNT: u32 = 3;
    /// Lower bound for the echo request count
    pub const MIN_COUNT: u32 = 1;
    /// Upper bound for the echo request count
    pub const MAX_COUNT: u32 = 10;
}

/// Input validation
pub mod validation {
    /// Characters rejected anywhere in a target
    pub const UNSAFE_CHARACTERS: [char; 9] = [';', '&', '|', '`', '$', '(', ')', '<', '>'];
}

/// Programs reachable through `custom_scan`
pub const ALLOWED_CUSTOM_TOOLS: [&str; 9] = [
    "nmap", "nikto", "sqlmap", "wpscan", "dirb", "curl", "wget", "nc", "telnet",
];

/// Programs the handlers shell out to
pub const REQUIRED_TOOLS: [(&str, &str); 7] = [
    ("nmap", "Network scanning and discovery"),
    ("nikto", "Web server vulnerability scanning"),
    ("sqlmap", "SQL injection testing"),
    ("wpscan", "WordPress scanning"),
    ("dirb", "Web content brute forcing"),
    ("searchsploit", "Exploit database search"),
    ("ping", "Single host reachability"),
];

/// Response markers
pub mod markers {
    pub const FAILURE: &str = "❌";
    pub const NMAP: &str = "🔍";
    pub const NIKTO: &str = "🔒";
    pub const SQLMAP: &str = "💉";
    pub const WPSCAN: &str = "🌐";
    pub const DIRB: &str = "📁";
    pub const SEARCHSPLOIT: &str = "🔍";
    pub const DISCOVERY: &str = "🌐";
    pub const CUSTOM: &str = "⚡";
}
