//! Settings module for vless2quanx
//!
//! This module contains the runtime configuration and its TOML loader

pub mod toml_settings;

// Re-export settings struct
pub use toml_settings::{Settings, SettingsError};
