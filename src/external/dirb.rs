use crate::config::Config;
use crate::error::Result;
use crate::external::{CommandSpec, PreparedScan};
use crate::validation::{self, non_empty};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters accepted by `dirb_scan`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DirbParams {
    /// Base URL to brute force; http:// is assumed when no scheme is given
    pub target: String,
    /// Wordlist path; defaults to the server setting
    pub wordlist: String,
    /// Extensions appended to every word (e.g. .php,.bak)
    pub extensions: String,
    /// Value for -z, capped at the server's thread limit
    pub threads: String,
}

/// `-z` value for a caller-supplied count: `None` when it is not a number,
/// otherwise clamped into `[1, max]`
pub fn clamp_threads(value: &str, max: u32) -> Option<u32> {
    let requested = non_empty(value)?.parse::<i64>().ok()?;
    let max = i64::from(max.max(1));
    Some(requested.clamp(1, max) as u32)
}

impl DirbParams {
    pub fn prepare(&self, config: &Config) -> Result<PreparedScan> {
        let target = validation::normalize_url(validation::validate_target(&self.target)?);

        let wordlist = non_empty(&self.wordlist).unwrap_or(config.dirb_wordlist.as_str());

        let mut command = CommandSpec::new("dirb").arg(target.as_str()).arg(wordlist);

        if let Some(extensions) = non_empty(&self.extensions) {
            command = command.arg("-X").arg(extensions);
        }

        if let Some(threads) = clamp_threads(&self.threads, config.max_threads) {
            command = command.arg("-z").arg(threads.to_string());
        }

        Ok(PreparedScan {
            target,
            command,
            timeout: config.scan_timeout,
        })
    }
}
