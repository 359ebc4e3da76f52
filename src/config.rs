use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::session::SessionOptions;
use crate::engine::{EngineOptions, DEFAULT_SEED_POOL_SIZE};
use crate::error::ConfigError;

/// Where the word list comes from and how starting words are drawn.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Word list file, most common word first. The bundled list when unset.
    pub path: Option<PathBuf>,
    /// Starting words are drawn from this many of the most common words.
    pub seed_pool_size: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            path: None,
            seed_pool_size: DEFAULT_SEED_POOL_SIZE,
        }
    }
}

/// Pacing of the computer player's replayed input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub step_delay_ms: u64,
    pub think_delay_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            step_delay_ms: 300,
            think_delay_ms: 50,
        }
    }
}

impl AutoplayConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            step_delay: Duration::from_millis(self.step_delay_ms),
            think_delay: Duration::from_millis(self.think_delay_ms),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the saved settings.
    pub settings_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            settings_dir: PathBuf::from("letter_path_data"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file for the terminal UI, which cannot log to the screen it draws.
    pub file: PathBuf,
    /// `tracing` filter directives, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("letter_path.log"),
            filter: "info".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dictionary: DictionaryConfig,
    pub autoplay: AutoplayConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dictionary.seed_pool_size == 0 {
            return Err(ConfigError::Validation(
                "dictionary.seed_pool_size must be > 0".into(),
            ));
        }
        if self.autoplay.step_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "autoplay.step_delay_ms must be > 0".into(),
            ));
        }
        if self.autoplay.think_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "autoplay.think_delay_ms must be <= 10000".into(),
            ));
        }
        if self.storage.settings_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.settings_dir must not be empty".into(),
            ));
        }
        if self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn engine_options(&self, rng_seed: Option<u64>) -> EngineOptions {
        EngineOptions {
            seed_pool_size: self.dictionary.seed_pool_size,
            rng_seed,
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[autoplay]
step_delay_ms = 20
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.autoplay.step_delay_ms, 20);
        assert_eq!(config.autoplay.think_delay_ms, 50);
        assert_eq!(config.dictionary.seed_pool_size, 1000);
        assert!(config.dictionary.path.is_none());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.storage.settings_dir, default.storage.settings_dir);
        assert_eq!(config.logging.filter, default.logging.filter);
    }

    #[test]
    fn test_validation_rejects_zero_seed_pool() {
        let mut config = AppConfig::default();
        config.dictionary.seed_pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_step_delay() {
        let mut config = AppConfig::default();
        config.autoplay.step_delay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_think_delay() {
        let mut config = AppConfig::default();
        config.autoplay.think_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_paths() {
        let mut config = AppConfig::default();
        config.storage.settings_dir = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.autoplay.step_delay_ms, 300);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[dictionary]
path = "words.txt"

[logging]
filter = "letter_path=debug"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.dictionary.path, Some(PathBuf::from("words.txt")));
        assert_eq!(config.logging.filter, "letter_path=debug");
        // Others are defaults
        assert_eq!(config.autoplay.think_delay_ms, 50);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[autoplay]\nstep_delay_ms = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
        std::fs::write(&path, "[autoplay\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_session_options_from_config() {
        let options = AutoplayConfig::default().session_options();
        assert_eq!(options.step_delay, Duration::from_millis(300));
        assert_eq!(options.think_delay, Duration::from_millis(50));
        assert_eq!(AppConfig::default().engine_options(Some(3)).rng_seed, Some(3));
    }
}
