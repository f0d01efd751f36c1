//! TOML-based CLI configuration.
//!
//! Rendering preferences only -- timer state is never persisted. Stored at
//! `~/.config/countdown/config.toml`; a missing or unreadable file falls
//! back to defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Width of the progress bar in characters.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Render the progress bar next to the MM:SS readout.
    #[serde(default = "default_true")]
    pub show_bar: bool,
}

fn default_bar_width() -> usize {
    30
}

fn default_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            show_bar: default_true(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("countdown").join("config.toml"))
}

impl CliConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.bar_width, 30);
        assert!(config.show_bar);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: CliConfig = toml::from_str("bar_width = 10").unwrap();
        assert_eq!(config.bar_width, 10);
        assert!(config.show_bar);
    }
}
