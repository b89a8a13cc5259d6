use crate::constants;
use crate::error::{Result, SecurityMcpError};
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::non_empty;
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;

/// Parameters accepted by `searchsploit_lookup`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchsploitParams {
    /// Terms to search for (e.g. apache 2.4)
    pub search_term: String,
    /// Restrict results to a type (e.g. remote, local, webapps, dos)
    pub type_filter: String,
    /// "true" for an exact title match
    pub exact: String,
}

impl SearchsploitParams {
    pub fn prepare(&self) -> Result<PreparedScan> {
        if self.search_term.trim().is_empty() {
            return Err(SecurityMcpError::missing_parameter("Search term"));
        }

        let mut command = CommandSpec::new("searchsploit").arg(self.search_term.as_str());

        if let Some(type_filter) = non_empty(&self.type_filter) {
            command = command.arg(format!("--type={}", type_filter));
        }

        if self.exact.trim().eq_ignore_ascii_case("true") {
            command = command.arg("--exact");
        }

        Ok(PreparedScan {
            target: self.search_term.clone(),
            command,
            timeout: Duration::from_secs(constants::LOOKUP_TIMEOUT_SECS),
        })
    }
}
