use crate::config::Config;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters accepted by `nmap_scan`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NmapParams {
    /// Host, IP address or CIDR range to scan
    pub target: String,
    /// One of basic, quick, comprehensive, stealth, udp, version, os
    pub scan_type: String,
    /// Port list or range passed to -p (e.g. 22,80,443 or 1-1024)
    pub ports: String,
    /// Timing template 0-5 (T0-T5); defaults to the server setting
    pub timing: String,
}

impl Default for NmapParams {
    fn default() -> Self {
        Self {
            target: String::new(),
            scan_type: "basic".to_string(),
            ports: String::new(),
            timing: String::new(),
        }
    }
}

/// Mutually exclusive scan modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    Basic,
    Quick,
    Comprehensive,
    Stealth,
    Udp,
    Version,
    Os,
}

impl ScanType {
    /// Unrecognized names fall back to [`ScanType::Basic`]
    pub fn parse(name: &str) -> Self {
        match name {
            "quick" => Self::Quick,
            "comprehensive" => Self::Comprehensive,
            "stealth" => Self::Stealth,
            "udp" => Self::Udp,
            "version" => Self::Version,
            "os" => Self::Os,
            _ => Self::Basic,
        }
    }

    pub fn flags(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &[],
            Self::Quick => &["-F"],
            Self::Comprehensive => &["-sS", "-sV", "-O", "-A"],
            Self::Stealth => &["-sS", "-f"],
            Self::Udp => &["-sU", "--top-ports", "100"],
            Self::Version => &["-sV"],
            Self::Os => &["-O"],
        }
    }
}

/// `-T` flag for a timing label; `T4`, `t4` and `4` all give `-T4`
pub fn timing_flag(label: &str) -> String {
    let level = label
        .strip_prefix('T')
        .or_else(|| label.strip_prefix('t'))
        .unwrap_or(label);
    format!("-T{}", level)
}

impl NmapParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::validate_target(&self.target)?;

        let intensity = non_empty(&self.timing).unwrap_or(config.default_intensity.as_str());

        let mut command = CommandSpec::new("nmap")
            .arg(timing_flag(intensity))
            .args(ScanType::parse(&self.scan_type).flags().iter().copied());

        if let Some(ports) = non_empty(&self.ports) {
            command = command.arg("-p").arg(ports);
        }

        Ok(PreparedScan {
            target: target.to_string(),
            command: command.arg(target),
            timeout: config.scan_timeout,
        })
    }
}
