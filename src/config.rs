//! Configuration: catalog location, session and lead storage, hand-off numbers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration for gharbot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[derive(Default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub sessions: SessionsConfig,
    pub leads: LeadsConfig,
    pub handoff: HandoffConfig,
}

impl Config {
    /// Catalog CSV path with `~` expanded.
    pub fn catalog_path(&self) -> PathBuf {
        expand_home(&self.catalog.path)
    }

    /// Session directory with `~` expanded.
    pub fn sessions_dir(&self) -> PathBuf {
        expand_home(&self.sessions.dir)
    }

    /// Lead book path with `~` expanded.
    pub fn leads_path(&self) -> PathBuf {
        expand_home(&self.leads.path)
    }
}

fn expand_home(path: &str) -> PathBuf {
    if path.starts_with("~/") || path.starts_with("~\\") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "jaipur_properties.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionsConfig {
    pub dir: String,
    pub history_window: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            dir: "~/.gharbot/sessions".to_string(),
            history_window: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadsConfig {
    pub path: String,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            path: "~/.gharbot/leads.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandoffConfig {
    /// The operator's own number. Hand-off refuses to run while this is empty.
    pub operator_number: String,
    pub announcement: String,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            operator_number: String::new(),
            announcement: "New real estate lead from your property assistant. \
                           Please check the chat for details and call them back."
                .to_string(),
        }
    }
}

// ====== Config loading/saving ======

/// Load configuration from environment variables.
///
/// Priority:
/// 1. `GHARBOT_CONFIG` env var — full JSON config
/// 2. Individual env vars (merged on top of defaults)
/// 3. File fallback (`~/.gharbot/config.json`)
pub fn load_config_from_env() -> Config {
    // 1. Full JSON from GHARBOT_CONFIG
    if let Ok(json) = std::env::var("GHARBOT_CONFIG") {
        match serde_json::from_str::<Config>(&json) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!("Failed to parse GHARBOT_CONFIG: {}", e);
            }
        }
    }

    // 2. Start with file fallback, then overlay individual env vars
    let mut cfg = load_config(None);

    if let Ok(v) = std::env::var("GHARBOT_CATALOG") {
        cfg.catalog.path = v;
    }
    if let Ok(v) = std::env::var("GHARBOT_SESSIONS_DIR") {
        cfg.sessions.dir = v;
    }
    if let Ok(v) = std::env::var("GHARBOT_LEADS") {
        cfg.leads.path = v;
    }
    if let Ok(v) = std::env::var("GHARBOT_OPERATOR_NUMBER") {
        cfg.handoff.operator_number = v;
    }

    cfg
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gharbot")
        .join("config.json")
}

/// Get the gharbot data directory.
pub fn get_data_dir() -> PathBuf {
    let path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gharbot");
    std::fs::create_dir_all(&path).ok();
    path
}

/// Load configuration from file or create default.
pub fn load_config(config_path: Option<&Path>) -> Config {
    let path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(get_config_path);

    if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse config from {}: {}", path.display(), e);
                    tracing::warn!("Using default configuration.");
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config from {}: {}", path.display(), e);
                tracing::warn!("Using default configuration.");
            }
        }
    }

    Config::default()
}

/// Save configuration to file.
pub fn save_config(
    config: &Config,
    config_path: Option<&Path>,
) -> std::result::Result<(), ConfigError> {
    let path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(get_config_path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog.path, "jaipur_properties.csv");
        assert_eq!(cfg.sessions.history_window, 50);
        assert!(cfg.handoff.operator_number.is_empty());
        assert!(cfg.handoff.announcement.contains("real estate lead"));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let cfg = Config::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.catalog.path, cfg.catalog.path);
        assert_eq!(parsed.sessions.history_window, cfg.sessions.history_window);
    }

    #[test]
    fn test_config_camelcase_compat() {
        let json = r#"{
            "sessions": {
                "dir": "/var/lib/gharbot/sessions",
                "historyWindow": 20
            },
            "handoff": {
                "operatorNumber": "+918239794674"
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.sessions.dir, "/var/lib/gharbot/sessions");
        assert_eq!(cfg.sessions.history_window, 20);
        assert_eq!(cfg.handoff.operator_number, "+918239794674");
        // Untouched sections keep their defaults.
        assert_eq!(cfg.catalog.path, "jaipur_properties.csv");
    }

    #[test]
    fn test_path_expansion() {
        let cfg = Config::default();
        let dir = cfg.sessions_dir();
        assert!(!dir.to_str().unwrap().starts_with("~/"));
        let leads = cfg.leads_path();
        assert!(!leads.to_str().unwrap().starts_with("~/"));
    }

    #[test]
    fn test_save_and_load_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut cfg = Config::default();
        cfg.catalog.path = "test_properties.csv".to_string();
        save_config(&cfg, Some(&path)).unwrap();

        assert!(path.exists());
        let loaded = load_config(Some(&path));
        assert_eq!(loaded.catalog.path, "test_properties.csv");
    }

    #[test]
    fn test_load_config_missing_file() {
        let path = Path::new("/tmp/nonexistent_gharbot_test.json");
        let cfg = load_config(Some(path));
        assert_eq!(cfg.catalog.path, "jaipur_properties.csv");
    }

    #[test]
    fn test_load_config_from_env() {
        // Full JSON wins outright.
        let json = r#"{
            "handoff": { "operatorNumber": "+911111111111" }
        }"#;
        std::env::set_var("GHARBOT_CONFIG", json);
        let cfg = load_config_from_env();
        assert_eq!(cfg.handoff.operator_number, "+911111111111");
        std::env::remove_var("GHARBOT_CONFIG");

        // Individual vars overlay the defaults.
        std::env::set_var("GHARBOT_CATALOG", "other.csv");
        std::env::set_var("GHARBOT_OPERATOR_NUMBER", "+912222222222");
        let cfg = load_config_from_env();
        assert_eq!(cfg.catalog.path, "other.csv");
        assert_eq!(cfg.handoff.operator_number, "+912222222222");
        std::env::remove_var("GHARBOT_CATALOG");
        std::env::remove_var("GHARBOT_OPERATOR_NUMBER");
    }
}
