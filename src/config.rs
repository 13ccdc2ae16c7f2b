//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend API base URL
    pub api_base_url: Option<String>,
    /// Email pre-filled on the login form
    pub login_email: Option<String>,
    /// ICP list sort field
    pub icp_sort_field: Option<String>,
    /// ICP list sort direction
    pub icp_sort_direction: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "resonate", "resonate-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Resolved backend address: env var first, then config, then default
    pub fn resolved_base_url(&self) -> String {
        std::env::var("RESONATE_API_URL")
            .ok()
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| crate::api::DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.login_email.is_none());
        assert!(config.icp_sort_field.is_none());
        assert!(config.icp_sort_direction.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("http://localhost:8000/api/v1".to_string()),
            login_email: Some("ada@example.com".to_string()),
            icp_sort_field: Some("name".to_string()),
            icp_sort_direction: Some("asc".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.api_base_url,
            Some("http://localhost:8000/api/v1".to_string())
        );
        assert_eq!(parsed.login_email, Some("ada@example.com".to_string()));
        assert_eq!(parsed.icp_sort_field, Some("name".to_string()));
        assert_eq!(parsed.icp_sort_direction, Some("asc".to_string()));
    }

    #[test]
    fn test_partial_serialization() {
        let config = TuiConfig {
            login_email: Some("ada@example.com".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.login_email, Some("ada@example.com".to_string()));
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let json = "{}";
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"login_email": "ada@example.com", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.login_email, Some("ada@example.com".to_string()));
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
