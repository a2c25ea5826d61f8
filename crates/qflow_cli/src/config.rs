//! qflow.toml configuration handling

use anyhow::{Context, Result};
use qflow_core::Rect;
use qflow_widgets::NotifyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level simulation configuration (qflow.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct QFlowConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Simulated parent window
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_origin")]
    pub x: i32,
    #[serde(default = "default_origin")]
    pub y: i32,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

fn default_title() -> String {
    "QFlow".to_string()
}

fn default_origin() -> i32 {
    100
}

fn default_width() -> i32 {
    800
}

fn default_height() -> i32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x: default_origin(),
            y: default_origin(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl WindowConfig {
    pub fn geometry(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl QFlowConfig {
    /// Load configuration from a file, or from qflow.toml inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("qflow.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No configuration found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: QFlowConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qflow_widgets::{NotifyType, Position};

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("qflow.toml"),
            r#"
[window]
width = 1024

[notify]
type = "error"
position = "bottom-left"
duration_ms = 1500
"#,
        )
        .unwrap();

        let config = QFlowConfig::load(dir.path()).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.geometry(), Rect::new(100, 100, 1024, 600));
        assert_eq!(config.notify.kind, NotifyType::Error);
        assert_eq!(config.notify.position, Position::BottomLeft);
        assert_eq!(config.notify.duration_ms, 1500);
        assert_eq!(config.notify.notifications_limit, 7);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = QFlowConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No configuration found"));
    }

    #[test]
    fn test_invalid_value_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[notify]\nposition = \"middle\"\n").unwrap();

        let err = QFlowConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("custom.toml"));
    }

    #[test]
    fn test_to_toml_reloads() {
        let config = QFlowConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: QFlowConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
