use crate::config::Config;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Enumeration used when the caller gives none: vulnerable plugins
pub const DEFAULT_ENUMERATE: &str = "vp";

/// Parameters accepted by `wpscan_test`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WpscanParams {
    /// WordPress site URL; http:// is assumed when no scheme is given
    pub target: String,
    /// Enumeration options (e.g. vp, ap, u, vt)
    pub enumerate: String,
    /// WPScan API token for vulnerability data
    pub api_token: String,
}

impl Default for WpscanParams {
    fn default() -> Self {
        Self {
            target: String::new(),
            enumerate: DEFAULT_ENUMERATE.to_string(),
            api_token: String::new(),
        }
    }
}

impl WpscanParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::normalize_url(validation::validate_target(&self.target)?);

        let enumerate = non_empty(&self.enumerate).unwrap_or(DEFAULT_ENUMERATE);

        let mut command = CommandSpec::new("wpscan")
            .args(["--url", target.as_str()])
            .args(["--enumerate", enumerate])
            .args(["--format", "cli"]);

        if let Some(token) = non_empty(&self.api_token) {
            command = command.arg("--api-token").secret_arg(token);
        }

        Ok(PreparedScan {
            target,
            command,
            timeout: config.scan_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enumeration() {
        let params = WpscanParams {
            target: "blog.example.com".to_string(),
            ..Default::default()
        };
        let scan = params.prepare(&Config::default()).unwrap();
        assert_eq!(
            scan.command.to_shell_line(),
            "wpscan --url http://blog.example.com --enumerate vp --format cli"
        );
    }

    #[test]
    fn test_blank_enumeration_falls_back() {
        let params = WpscanParams {
            target: "blog.example.com".to_string(),
            enumerate: " ".to_string(),
            ..Default::default()
        };
        let scan = params.prepare(&Config::default()).unwrap();
        assert!(scan.command.to_shell_line().contains("--enumerate vp"));
    }

    #[test]
    fn test_api_token_is_passed_but_redacted() {
        let params = WpscanParams {
            target: "https://blog.example.com".to_string(),
            enumerate: "u".to_string(),
            api_token: "s3cr3t".to_string(),
        };
        let scan = params.prepare(&Config::default()).unwrap();
        assert_eq!(
            scan.command.to_shell_line(),
            "wpscan --url https://blog.example.com --enumerate u --format cli --api-token s3cr3t"
        );
        assert!(!scan.command.redacted_line().contains("s3cr3t"));
    }
}
