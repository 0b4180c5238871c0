use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "drive";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEY_FILE_NAME: &str = "address.pem";

/// How command output is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log level filter (e.g. "warn", "debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the drive directory (~/.drive)
    pub drive_dir: PathBuf,
    /// Path to the locked address key PEM file
    pub key_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the drive directory path (custom or default ~/.drive)
    pub fn drive_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new drive state directory around an already locked,
    /// armored address key.
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
        armored_key: &str,
    ) -> Result<Self, StateError> {
        let drive_dir = Self::drive_dir(custom_path)?;

        if drive_dir.join(KEY_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&drive_dir)?;

        let key_path = drive_dir.join(KEY_FILE_NAME);
        fs::write(&key_path, armored_key)?;

        let config = config.unwrap_or_default();
        let config_path = drive_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            drive_dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the drive directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let drive_dir = Self::drive_dir(custom_path)?;

        if !drive_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let key_path = drive_dir.join(KEY_FILE_NAME);
        let config_path = drive_dir.join(CONFIG_FILE_NAME);

        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            drive_dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Configuration for a run: the stored config, or defaults when the drive
    /// directory has not been initialized. Any other load failure is returned.
    pub fn load_config(custom_path: Option<PathBuf>) -> Result<AppConfig, StateError> {
        match Self::load(custom_path) {
            Ok(state) => Ok(state.config),
            Err(StateError::NotInitialized | StateError::MissingFile(_)) => {
                Ok(AppConfig::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Read the armored, still locked address key
    pub fn read_key(&self) -> Result<String, StateError> {
        Ok(fs::read_to_string(&self.key_path)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("drive directory not initialized. Run 'drive init' first")]
    NotInitialized,

    #[error("drive directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("drive");

        let config = AppConfig {
            log_level: "debug".to_string(),
            output: OutputFormat::Compact,
        };
        let state = AppState::init(Some(dir.clone()), Some(config.clone()), "armored").unwrap();
        assert_eq!(state.key_path, dir.join(KEY_FILE_NAME));

        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.read_key().unwrap(), "armored");
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();

        AppState::init(Some(dir.clone()), None, "armored").unwrap();
        let result = AppState::init(Some(dir), None, "other");
        assert!(matches!(result, Err(StateError::AlreadyInitialized)));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = TempDir::new().unwrap();
        let result = AppState::load(Some(temp.path().join("missing")));
        assert!(matches!(result, Err(StateError::NotInitialized)));

        let result = AppState::load(Some(temp.path().to_path_buf()));
        assert!(matches!(result, Err(StateError::MissingFile(_))));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.output, OutputFormat::Pretty);
    }

    #[test]
    fn test_load_config_defaults_when_uninitialized() {
        let temp = TempDir::new().unwrap();
        let config = AppState::load_config(Some(temp.path().join("missing"))).unwrap();
        assert_eq!(config, AppConfig::default());

        let config = AppState::load_config(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_reports_malformed_toml() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        let state = AppState::init(Some(dir.clone()), None, "armored").unwrap();
        fs::write(&state.config_path, "log_level = [not toml").unwrap();

        let result = AppState::load_config(Some(dir));
        assert!(matches!(result, Err(StateError::TomlDe(_))));
    }

    #[test]
    fn test_load_config_reports_wrong_field_type() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        let state = AppState::init(Some(dir.clone()), None, "armored").unwrap();
        fs::write(&state.config_path, "output = \"fancy\"\n").unwrap();

        let result = AppState::load_config(Some(dir));
        assert!(matches!(result, Err(StateError::TomlDe(_))));
    }
}
