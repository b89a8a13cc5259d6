use crate::config::Config;
use crate::constants;
use crate::error::{Result, SecurityMcpError};
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters accepted by `custom_scan`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomScanParams {
    /// Program to run: nmap, nikto, sqlmap, wpscan, dirb, curl, wget, nc or telnet
    pub tool: String,
    /// Target appended after the options
    pub target: String,
    /// Raw options placed between the program and the target
    pub options: String,
}

pub fn is_allowed_tool(tool: &str) -> bool {
    constants::ALLOWED_CUSTOM_TOOLS.contains(&tool)
}

impl CustomScanParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::validate_target(&self.target)?;

        if self.tool.trim().is_empty() {
            return Err(SecurityMcpError::missing_parameter("Tool name"));
        }

        if !is_allowed_tool(&self.tool) {
            return Err(SecurityMcpError::tool_not_allowed(
                self.tool.as_str(),
                &constants::ALLOWED_CUSTOM_TOOLS,
            ));
        }


        let mut command = CommandSpec::new(self.tool.as_str());
        if let Some(options) = non_empty(&self.options) {
            command = command.arg(options);
        }

        Ok(PreparedScan {
            target: target.to_string(),
            command: command.arg(target),
            timeout: config.scan_timeout,
        })
    }
}
