//! Ruler preferences
//!
//! Stored as YAML in the user's config directory.
//! Default location: ~/.config/ruler/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::SELECT_TOLERANCE_PIXEL;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerConfig {
    pub quick_play: QuickPlayConfig,
    pub playhead: PlayheadConfig,
    pub display: DisplayConfig,
    pub snap: SnapConfig,
}

/// Quick-play gesture preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickPlayConfig {
    /// Mirror the region being dragged into the time selection
    pub drag_selection: bool,
    /// Show hover tooltips over the timeline
    pub timeline_tooltips: bool,
}

impl Default for QuickPlayConfig {
    fn default() -> Self {
        Self {
            drag_selection: false,
            timeline_tooltips: true,
        }
    }
}

/// Play head preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayheadConfig {
    /// Keep the play head fixed and scroll the view under it
    pub pinned: bool,
    /// Horizontal position of the pinned head as a fraction of the track area
    pub pinned_fraction: f64,
}

impl Default for PlayheadConfig {
    fn default() -> Self {
        Self {
            pinned: false,
            pinned_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Scroll the view to follow playback
    pub auto_scroll: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { auto_scroll: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Pixel distance within which quick-play snaps to selection edges
    pub tolerance_px: i32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance_px: SELECT_TOLERANCE_PIXEL,
        }
    }
}

impl RulerConfig {
    /// Clamp out-of-range values loaded from disk
    pub fn validate(mut self) -> Self {
        let fraction = self.playhead.pinned_fraction;
        self.playhead.pinned_fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            PlayheadConfig::default().pinned_fraction
        };
        self.snap.tolerance_px = self.snap.tolerance_px.max(1);
        self
    }
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("ruler")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// A missing or unreadable file yields the defaults.
pub fn load_config(path: &Path) -> RulerConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return RulerConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<RulerConfig>(&contents) {
            Ok(config) => {
                let config = config.validate();
                log::info!(
                    "load_config: Loaded config - drag selection: {}, pinned: {} at {:.2}",
                    config.quick_play.drag_selection,
                    config.playhead.pinned,
                    config.playhead.pinned_fraction
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                RulerConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            RulerConfig::default()
        }
    }
}

/// Save configuration to a YAML file, creating the parent directory if needed
pub fn save_config(config: &RulerConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulerConfig::default();
        assert!(!config.quick_play.drag_selection);
        assert!(config.quick_play.timeline_tooltips);
        assert!(!config.playhead.pinned);
        assert_eq!(config.playhead.pinned_fraction, 0.5);
        assert!(config.display.auto_scroll);
        assert_eq!(config.snap.tolerance_px, 4);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "quick_play:\n  drag_selection: true\n";
        let config: RulerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.quick_play.drag_selection);
        assert!(config.quick_play.timeline_tooltips);
        assert_eq!(config.playhead.pinned_fraction, 0.5);
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = RulerConfig::default();
        config.playhead.pinned_fraction = 3.0;
        config.snap.tolerance_px = 0;
        let config = config.validate();
        assert_eq!(config.playhead.pinned_fraction, 1.0);
        assert_eq!(config.snap.tolerance_px, 1);

        let mut config = RulerConfig::default();
        config.playhead.pinned_fraction = f64::NAN;
        assert_eq!(config.validate().playhead.pinned_fraction, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("ruler-config-test-{}", std::process::id()));
        let path = dir.join("config.yaml");

        let mut config = RulerConfig::default();
        config.playhead.pinned = true;
        config.playhead.pinned_fraction = 0.25;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path);
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_or_invalid() {
        let missing = std::env::temp_dir().join("ruler-config-does-not-exist.yaml");
        assert_eq!(load_config(&missing), RulerConfig::default());

        let dir = std::env::temp_dir().join(format!("ruler-config-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "quick_play: [not, a, map").unwrap();
        assert_eq!(load_config(&path), RulerConfig::default());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
