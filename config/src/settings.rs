//! Application settings management

use crate::PathManager;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Delays, in milliseconds, before scheduled page transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub after_login_ms: u64,
    pub after_signup_ms: u64,
    pub gate_redirect_ms: u64,
    pub after_logout_ms: u64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            after_login_ms: 600,
            after_signup_ms: 700,
            gate_redirect_ms: 700,
            after_logout_ms: 400,
        }
    }
}

/// Application settings stored in settings.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix of the storage slot names (`{namespace}_users` etc.)
    pub storage_namespace: String,
    /// Overrides `PathManager::store_dir()`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    pub navigation: NavigationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_namespace: "ticketapp".to_string(),
            store_dir: None,
            navigation: NavigationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the settings file, or return defaults if not found
    pub fn load() -> Self {
        match PathManager::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from a specific file. Missing or invalid files give defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&content).unwrap_or_default()
    }

    /// Save settings to the settings file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = PathManager::settings_path().context("Could not determine settings path")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// The directory holding the storage slots
    pub fn resolved_store_dir(&self) -> Option<PathBuf> {
        self.store_dir.clone().or_else(PathManager::store_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_settings_path() -> PathBuf {
        env::temp_dir()
            .join(format!("settings_test_{}", uuid::Uuid::new_v4()))
            .join("settings.toml")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(&temp_settings_path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.storage_namespace, "ticketapp");
        assert_eq!(settings.navigation.after_login_ms, 600);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_settings_path();
        let mut settings = Settings::default();
        settings.storage_namespace = "helpdesk".into();
        settings.store_dir = Some(PathBuf::from("/var/lib/helpdesk"));
        settings.navigation.gate_redirect_ms = 0;

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);

        // Clean up
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            storage_namespace = "demo"

            [navigation]
            after_logout_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(settings.storage_namespace, "demo");
        assert_eq!(settings.navigation.after_logout_ms, 0);
        assert_eq!(settings.navigation.after_signup_ms, 700);
        assert_eq!(settings.store_dir, None);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_settings_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "storage_namespace = [").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());

        // Clean up
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
