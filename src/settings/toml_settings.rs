use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::generator::DEFAULT_VMESS_TAG_SUFFIX;
use crate::utils::http_std::{parse_proxy, FetchOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_none() -> String {
    "NONE".to_string()
}

fn default_vmess_output() -> String {
    "VMess_QuantumultX.conf".to_string()
}

fn default_vless_output() -> String {
    "VLESS_QuantumultX.conf".to_string()
}

fn default_vmess_tag_suffix() -> String {
    DEFAULT_VMESS_TAG_SUFFIX.to_string()
}

fn default_info_log_level() -> String {
    "info".to_string()
}

/// Runtime settings, read from an optional TOML file
///
/// Every key is optional:
///
/// ```toml
/// subscription_url = "https://example.com/api/v1/client/subscribe?token=..."
/// user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
/// timeout_secs = 30
/// proxy = "NONE"
/// vmess_output = "VMess_QuantumultX.conf"
/// vless_output = "VLESS_QuantumultX.conf"
/// vmess_tag_suffix = "-VMess"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub subscription_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `NONE` for a direct connection, otherwise a proxy URL
    #[serde(default = "default_none")]
    pub proxy: String,
    #[serde(default = "default_vmess_output")]
    pub vmess_output: String,
    #[serde(default = "default_vless_output")]
    pub vless_output: String,
    #[serde(default = "default_vmess_tag_suffix")]
    pub vmess_tag_suffix: String,
    #[serde(default = "default_info_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            subscription_url: String::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            proxy: default_none(),
            vmess_output: default_vmess_output(),
            vless_output: default_vless_output(),
            vmess_tag_suffix: default_vmess_tag_suffix(),
            log_level: default_info_log_level(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            proxy: parse_proxy(&self.proxy),
        }
    }
}
