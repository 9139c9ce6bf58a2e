// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, warn};

use crate::constants::{ShotCount, TimerSetting};
use crate::errors::{BoothError, BoothResult};
use crate::pipelines::photo::FilterType;

/// Directory name under the platform config/pictures roots
const APP_DIR: &str = "vintage-booth";

/// Configuration data that persists between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Filter preselected when the capture screen opens
    pub default_filter: FilterType,
    /// Countdown timer preselected when the capture screen opens
    pub default_timer: TimerSetting,
    /// Photo count preselected when the capture screen opens
    pub default_shots: ShotCount,
    /// Mirror captured stills horizontally (selfie orientation)
    pub mirror_preview: bool,
    /// Export directory override; defaults to the platform pictures folder
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filter: FilterType::default(),
            default_timer: TimerSetting::default(),
            default_shots: ShotCount::default(),
            mirror_preview: true, // Default to mirrored (selfie mode)
            export_dir: None,
        }
    }
}

impl Config {
    /// Load the persisted configuration
    ///
    /// A missing file yields the defaults; a malformed file is reported and
    /// ignored rather than blocking startup.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("No config directory available, using defaults");
            return Self::default();
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read config");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Save the configuration to disk
    pub fn save(&self) -> BoothResult<()> {
        let Some(path) = Self::config_path() else {
            return Err(BoothError::Config(
                "No config directory available".to_string(),
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BoothError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Where exported stills land: the configured override, or the platform
    /// pictures folder
    pub fn export_directory(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }
        dirs::picture_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(APP_DIR).join("config.json"))
    }
}
