use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use engine_logging::{engine_error, engine_info, engine_warn};
use medley_engine::write_atomic;
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = ".medley_settings.ron";

/// User-tunable settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub cookie_file: Option<PathBuf>,
    pub audio_only: bool,
    /// Height cap for video downloads; `None` means "Best".
    pub resolution_cap: Option<u16>,
    pub last_dest_dir: Option<PathBuf>,
    pub last_update_check: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cookie_file: None,
            audio_only: false,
            resolution_cap: Some(1080),
            last_dest_dir: None,
            last_update_check: None,
        }
    }
}

/// Loads settings from `{dir}/.medley_settings.ron`; any problem falls back
/// to defaults.
pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

/// Saves settings atomically next to the working directory.
pub fn save_settings(dir: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, SETTINGS_FILENAME, &content) {
        engine_error!("Failed to write settings to {:?}: {}", dir, err);
    }
}
