use crate::constants;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;

/// Parameters accepted by `ping_sweep`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PingSweepParams {
    /// Single host, CIDR range (10.0.0.0/24) or address range (10.0.0.1-20)
    pub target_range: String,
    /// Echo requests for a single host, 1-10
    pub count: String,
}

impl Default for PingSweepParams {
    fn default() -> Self {
        Self {
            target_range: String::new(),
            count: constants::ping::DEFAULT_COUNT.to_string(),
        }
    }
}

/// CIDR and dash ranges go to nmap; anything else is a single host
pub fn is_range(target: &str) -> bool {
    target.contains('/') || target.contains('-')
}

/// Echo request count: blank or non-numeric gives the default, numbers are
/// clamped into `[MIN_COUNT, MAX_COUNT]`
pub fn clamp_count(value: &str) -> u32 {
    match non_empty(value).map(str::parse::<i64>) {
        Some(Ok(count)) => count.clamp(
            i64::from(constants::ping::MIN_COUNT),
            i64::from(constants::ping::MAX_COUNT),
        ) as u32,
        _ => constants::ping::DEFAULT_COUNT,
    }
}

impl PingSweepParams {
    pub fn prepare(&self) -> Result<PreparedScan> {
        let target = validation::validate_target(&self.target_range)?;

        let command = if is_range(target) {
            CommandSpec::new("nmap").arg("-sn").arg(target)
        } else {
            CommandSpec::new("ping")
                .arg("-c")
                .arg(clamp_count(&self.count).to_string())
                .arg(target)
        };

        Ok(PreparedScan {
            target: target.to_string(),
            command,
            timeout: Duration::from_secs(constants::DISCOVERY_TIMEOUT_SECS),
        })
    }
}
