//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MatrixRainError, MatrixRainResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Title intro defaults.
    #[serde(default)]
    pub intro: IntroDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default title intro parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroDefaults {
    /// Window width in pixels.
    pub window_width: u32,

    /// Window height in pixels.
    pub window_height: u32,

    /// Display refresh rate driving playback ticks (Hz).
    pub tick_rate_hz: u32,

    /// Title text rendered into the synthetic source bitmap.
    pub title: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "matrixrain=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Whether to tag log lines with the emitting thread id.
    #[serde(default)]
    pub thread_ids: bool,
}

impl Default for IntroDefaults {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            tick_rate_hz: 30,
            title: "matrix".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            thread_ids: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path.
    ///
    /// A missing file yields defaults silently. An unreadable, malformed, or
    /// invalid file is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Ignoring config file");
                Self::default()
            }
        }
    }

    /// Read and validate config at `path`; `Ok(None)` if there is no file.
    pub fn read_from(path: &Path) -> MatrixRainResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Reject settings the intro cannot run with.
    pub fn validate(&self) -> MatrixRainResult<()> {
        let intro = &self.intro;
        if intro.window_width == 0 || intro.window_height == 0 {
            return Err(MatrixRainError::configuration(format!(
                "intro window {}x{} must be positive",
                intro.window_width, intro.window_height
            )));
        }
        if intro.tick_rate_hz == 0 {
            return Err(MatrixRainError::configuration(
                "intro tick rate must be positive",
            ));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> MatrixRainResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write pretty-printed config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> MatrixRainResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Config file location: `$MATRIXRAIN_CONFIG` if set, otherwise
/// `matrixrain/config.json` under the XDG config directory.
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("MATRIXRAIN_CONFIG") {
        return PathBuf::from(path);
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(std::env::temp_dir);
    base.join("matrixrain").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("matrixrain-config-{}-{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from(&scratch_path("missing"));
        assert_eq!(config.intro.window_width, 640);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut config = AppConfig::default();
        config.intro.window_width = 1024;
        config.intro.tick_rate_hz = 60;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.intro.window_width, 1024);
        assert_eq!(loaded.intro.tick_rate_hz, 60);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"logging":{"level":"debug","json":true}}"#).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.logging.level, "debug");
        assert!(loaded.logging.json);
        assert!(!loaded.logging.thread_ids);
        assert_eq!(loaded.intro.window_height, 480);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.intro.title, "matrix");
        assert!(matches!(
            AppConfig::read_from(&path),
            Err(MatrixRainError::Json(_))
        ));

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let path = scratch_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"intro":{"window_width":0,"window_height":480,"tick_rate_hz":30,"title":"x"}}"#).unwrap();

        assert!(matches!(
            AppConfig::read_from(&path),
            Err(MatrixRainError::Configuration { .. })
        ));
        assert_eq!(AppConfig::load_from(&path).intro.window_width, 640);

        let mut config = AppConfig::default();
        config.intro.tick_rate_hz = 0;
        assert!(config.save_to(&scratch_path("invalid-save")).is_err());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        assert!(AppConfig::read_from(&scratch_path("absent"))
            .unwrap()
            .is_none());
    }
}
