use scheda_core::NoteFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    fn set(&mut self, value: T, source: ConfigSource) {
        self.value = value;
        self.source = source;
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Label at the start of the "last weight" note
    pub note_label: ConfigValue<String>,
    /// Unit printed after weights
    pub weight_unit: ConfigValue<String>,
    /// strftime pattern for dates in the note
    pub date_format: ConfigValue<String>,
    /// Offset from UTC used when rendering note dates
    pub utc_offset_minutes: ConfigValue<i32>,
    /// Backend location of the plan document, used to print update paths
    pub plan_root: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    note_label: Option<String>,
    weight_unit: Option<String>,
    date_format: Option<String>,
    utc_offset_minutes: Option<i32>,
    plan_root: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let defaults = NoteFormat::default();
        let mut config = Self {
            note_label: ConfigValue::new(defaults.label, ConfigSource::Default),
            weight_unit: ConfigValue::new(defaults.unit, ConfigSource::Default),
            date_format: ConfigValue::new(defaults.date_format, ConfigSource::Default),
            utc_offset_minutes: ConfigValue::new(
                defaults.utc_offset_minutes,
                ConfigSource::Default,
            ),
            plan_root: ConfigValue::new("scheda".to_string(), ConfigSource::Default),
            config_file: None,
        };

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            tracing::debug!("Loaded config file {}", path.display());
            config.config_file = Some(path);
            config.apply_file(file_config);
        }

        config.apply_env()?;
        config.note_format().validate().map_err(|_| {
            ConfigError::InvalidValue("date_format".to_string(), config.date_format.value.clone())
        })?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(label) = file.note_label {
            self.note_label.set(label, ConfigSource::File);
        }
        if let Some(unit) = file.weight_unit {
            self.weight_unit.set(unit, ConfigSource::File);
        }
        if let Some(format) = file.date_format {
            self.date_format.set(format, ConfigSource::File);
        }
        if let Some(offset) = file.utc_offset_minutes {
            self.utc_offset_minutes.set(offset, ConfigSource::File);
        }
        if let Some(root) = file.plan_root {
            self.plan_root.set(root, ConfigSource::File);
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(label) = std::env::var("SCHEDA_NOTE_LABEL") {
            self.note_label.set(label, ConfigSource::Environment);
        }
        if let Ok(unit) = std::env::var("SCHEDA_WEIGHT_UNIT") {
            self.weight_unit.set(unit, ConfigSource::Environment);
        }
        if let Ok(format) = std::env::var("SCHEDA_DATE_FORMAT") {
            self.date_format.set(format, ConfigSource::Environment);
        }
        if let Ok(raw) = std::env::var("SCHEDA_UTC_OFFSET_MINUTES") {
            let offset = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("SCHEDA_UTC_OFFSET_MINUTES".to_string(), raw.clone())
            })?;
            self.utc_offset_minutes
                .set(offset, ConfigSource::Environment);
        }
        if let Ok(root) = std::env::var("SCHEDA_PLAN_ROOT") {
            self.plan_root.set(root, ConfigSource::Environment);
        }
        Ok(())
    }

    /// The note format described by this configuration.
    pub fn note_format(&self) -> NoteFormat {
        NoteFormat {
            label: self.note_label.value.clone(),
            unit: self.weight_unit.value.clone(),
            date_format: self.date_format.value.clone(),
            utc_offset_minutes: self.utc_offset_minutes.value,
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/scheda/
    /// - macOS: ~/Library/Application Support/scheda/
    /// - Windows: %APPDATA%/scheda/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scheda")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
