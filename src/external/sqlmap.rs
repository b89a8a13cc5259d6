use crate::config::Config;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters accepted by `sqlmap_test`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SqlmapParams {
    /// URL to test, including the query string; http:// is assumed when no scheme is given
    pub target: String,
    /// Single parameter to test (-p)
    pub parameter: String,
    /// Injection techniques to use (e.g. BEUSTQ)
    pub technique: String,
    /// Database whose tables should be enumerated
    pub database: String,
}

impl SqlmapParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::normalize_url(validation::validate_target(&self.target)?);

        let mut command = CommandSpec::new("sqlmap")
            .args(["-u", target.as_str()])
            .args(["--batch", "--risk=1", "--level=1"]);

        if let Some(parameter) = non_empty(&self.parameter) {
            command = command.arg("-p").arg(parameter);
        }

        if let Some(technique) = non_empty(&self.technique) {
            command = command.arg(format!("--technique={}", technique));
        }

        if let Some(database) = non_empty(&self.database) {
            command = command.arg("-D").arg(database).arg("--tables");
        }

        Ok(PreparedScan {
            target,
            command,
            timeout: config.scan_timeout,
        })
    }
}
