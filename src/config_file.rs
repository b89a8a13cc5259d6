use crate::config::Config;
use crate::error::{Result, SecurityMcpError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration structure for serialization/deserialization in config files
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub scan_timeout_secs: Option<u64>,
    pub default_intensity: Option<String>,
    pub dirb_wordlist: Option<String>,
    pub max_threads: Option<u32>,
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            scan_timeout_secs: Some(config.scan_timeout.as_secs()),
            default_intensity: Some(config.default_intensity.clone()),
            dirb_wordlist: Some(config.dirb_wordlist.clone()),
            max_threads: Some(config.max_threads),
        }
    }
}

impl ConfigFile {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SecurityMcpError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SecurityMcpError::parse(format!("Failed to parse config file: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SecurityMcpError::parse(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Overlay the values present in the file onto `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(secs) = self.scan_timeout_secs {
            config.scan_timeout = Duration::from_secs(secs);
        }
        if let Some(intensity) = &self.default_intensity {
            config.default_intensity = intensity.clone();
        }
        if let Some(wordlist) = &self.dirb_wordlist {
            config.dirb_wordlist = wordlist.clone();
        }
        if let Some(max_threads) = self.max_threads {
            config.max_threads = max_threads;
        }
    }
}
