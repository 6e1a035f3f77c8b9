//! Plugin settings.
//!
//! Stored as TOML in the user's config directory. Every field has a default, so
//! a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use scaler_core::{RaycastLayer, ScalerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE_NAME: &str = "grid_scaler.toml";

/// Settings loading/saving errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Placement and size of the dimension tooltip, in screen pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            offset_x: 30.0,
            offset_y: 30.0,
            width: 100.0,
            height: 30.0,
        }
    }
}

/// Grid scaler settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerSettings {
    /// Hold to drag a handle
    pub grab_key: String,
    /// Enables or disables the tool
    pub toggle_key: String,
    /// Snap step used when the editor grid is zero
    pub zero_step: f32,
    pub handle_screen_divisor: f32,
    pub handle_layer: u32,
    /// Identifier undo transactions are recorded under
    pub undo_key: String,
    pub tooltip: TooltipSettings,
}

impl Default for ScalerSettings {
    fn default() -> Self {
        let core = ScalerConfig::default();
        Self {
            grab_key: "Y".to_string(),
            toggle_key: "G".to_string(),
            zero_step: core.zero_step,
            handle_screen_divisor: core.handle_screen_divisor,
            handle_layer: core.handle_layer.0,
            undo_key: "Gizmo1".to_string(),
            tooltip: TooltipSettings::default(),
        }
    }
}

impl ScalerSettings {
    /// Load settings from a file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load from the default location, or defaults if there is none.
    pub fn load_default() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!("No config directory on this platform, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_error)?;
        log::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the default settings path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("grid_scaler");
            p.push(SETTINGS_FILE_NAME);
            p
        })
    }

    /// Gizmo tunables carried by these settings
    pub fn scaler_config(&self) -> ScalerConfig {
        ScalerConfig {
            zero_step: self.zero_step,
            handle_screen_divisor: self.handle_screen_divisor,
            handle_layer: RaycastLayer(self.handle_layer),
            ..ScalerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ScalerSettings::default();
        assert_eq!(settings.grab_key, "Y");
        assert_eq!(settings.undo_key, "Gizmo1");
        assert_eq!(settings.handle_layer, 31);
        assert_eq!(settings.tooltip.width, 100.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = ScalerSettings::from_toml(
            r#"
            grab_key = "F"
            zero_step = 0.01

            [tooltip]
            offset_x = 12.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.grab_key, "F");
        assert_eq!(settings.toggle_key, "G");
        assert_eq!(settings.zero_step, 0.01);
        assert_eq!(settings.tooltip.offset_x, 12.0);
        assert_eq!(settings.tooltip.offset_y, 30.0);
        assert_eq!(settings.scaler_config().zero_step, 0.01);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = ScalerSettings {
            handle_layer: 8,
            ..Default::default()
        };
        let text = settings.to_toml().unwrap();
        assert_eq!(ScalerSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file() {
        assert!(ScalerSettings::from_toml("grab_key = [").is_err());
        assert!(ScalerSettings::from_toml("zero_step = \"fast\"").is_err());
    }
}
