use crate::config::Config;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters accepted by `nikto_scan`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NiktoParams {
    /// Web server host or URL; http:// is assumed when no scheme is given
    pub target: String,
    /// Plugin selection passed to -Plugins
    pub plugins: String,
    /// Tuning categories passed to -Tuning (e.g. 123b)
    pub tuning: String,
}

impl NiktoParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::normalize_url(validation::validate_target(&self.target)?);

        let mut command = CommandSpec::new("nikto").args(["-h", target.as_str(), "-Format", "txt"]);

        if let Some(plugins) = non_empty(&self.plugins) {
            command = command.arg("-Plugins").arg(plugins);
        }

        if let Some(tuning) = non_empty(&self.tuning) {
            command = command.arg("-Tuning").arg(tuning);
        }

        Ok(PreparedScan {
            target,
            command,
            timeout: config.scan_timeout,
        })
    }
}
