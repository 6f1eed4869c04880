use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::config::{
    DEFAULT_PLACE_SOUND, DEFAULT_TICK_INTERVAL_MS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    Difficulty, Playfield,
};
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "terminal-caterpillar";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-tunable game settings, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub window_width: f64,
    pub window_height: f64,
    pub tick_interval_ms: u64,
    pub sound: SoundSettings,
}

/// Item sound configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Sound file played whenever an item is placed.
    pub file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            sound: SoundSettings::default(),
        }
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from(DEFAULT_PLACE_SOUND),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.window_width, self.window_height)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Rejects window dimensions that are not finite and positive.
    pub fn validate(&self) -> Result<()> {
        let usable = |side: f64| side.is_finite() && side > 0.0;
        if usable(self.window_width) && usable(self.window_height) {
            Ok(())
        } else {
            Err(Error::InvalidWindow {
                width: self.window_width,
                height: self.window_height,
            })
        }
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `explicit`, or from the default location.
///
/// A missing default file yields the built-in defaults; an explicitly named
/// file must exist. Unreadable or malformed files are errors.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => load_settings_from_path(path, false),
        None => load_settings_from_path(&settings_path(), true),
    }
}

fn load_settings_from_path(path: &Path, missing_ok: bool) -> Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if missing_ok && e.kind() == io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(Error::SettingsRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<Settings>(&raw).map_err(|source| Error::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{Settings, load_settings_from_path};
    use crate::config::Difficulty;
    use crate::error::Error;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "difficulty": "hard", "sound": { "enabled": false } }"#);

        let settings = load_settings_from_path(&path, false).expect("load should succeed");

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(!settings.sound.enabled);
        assert_eq!(settings.window_width, 700.0);
        assert_eq!(settings.tick_interval(), Duration::from_millis(100));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_default_file_returns_defaults() {
        let path = unique_test_path("missing");

        let settings = load_settings_from_path(&path, true).expect("missing file should be Ok");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = unique_test_path("explicit");

        assert!(matches!(
            load_settings_from_path(&path, false),
            Err(Error::SettingsRead { .. })
        ));
    }

    #[test]
    fn malformed_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, r#"{ "difficulty": "impossible" }"#);

        assert!(matches!(
            load_settings_from_path(&path, true),
            Err(Error::SettingsParse { .. })
        ));

        cleanup_test_path(&path);
    }

    #[test]
    fn zero_tick_interval_is_clamped() {
        let settings = Settings {
            tick_interval_ms: 0,
            ..Settings::default()
        };

        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
        assert_eq!(settings.playfield().half_width(), 350.0);
    }

    #[test]
    fn degenerate_window_sizes_are_rejected() {
        let cases = [
            (0.0, 700.0),
            (700.0, -1.0),
            (f64::NAN, 700.0),
            (700.0, f64::INFINITY),
        ];

        for (width, height) in cases {
            let settings = Settings {
                window_width: width,
                window_height: height,
                ..Settings::default()
            };

            assert!(matches!(
                settings.validate(),
                Err(Error::InvalidWindow { .. })
            ));
        }

        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn negative_width_in_file_fails_validation() {
        let path = unique_test_path("negative");
        write_test_file(&path, r#"{ "window_width": -700.0 }"#);

        let settings = load_settings_from_path(&path, false).expect("load should succeed");

        assert!(settings.validate().is_err());
        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("caterpillar-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
