//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::TransformMode;

use super::history::DEFAULT_LIMIT;
use crate::error::EditorError;

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Keyboard shortcuts active
    #[serde(default = "default_true")]
    pub shortcuts_enabled: bool,
    /// Maximum undo steps kept (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Gizmo mode on startup
    #[serde(default)]
    pub transform_mode: TransformMode,
    /// Template loaded on startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_template: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            shortcuts_enabled: true,
            history_limit: DEFAULT_LIMIT,
            transform_mode: TransformMode::default(),
            startup_template: None,
        }
    }
}

impl AppSettings {
    /// Settings file in the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scene-studio", "scene-studio")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring settings at {}: {e}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), EditorError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert!(s.shortcuts_enabled);
        assert_eq!(s.history_limit, DEFAULT_LIMIT);
        assert_eq!(s.transform_mode, TransformMode::Translate);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let s: AppSettings = serde_json::from_str(r#"{"history_limit": 5}"#).unwrap();
        assert_eq!(s.history_limit, 5);
        assert!(s.shortcuts_enabled);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            shortcuts_enabled: false,
            history_limit: 10,
            transform_mode: TransformMode::Rotate,
            startup_template: Some("basic".into()),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            AppSettings::load_from(&path),
            Err(EditorError::Json(_))
        ));
    }
}
