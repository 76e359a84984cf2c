//! Configuration errors and the startup report printed for them

use serde::Serialize;
use thiserror::Error;

/// Why a configuration could not be produced
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file {path} does not exist")]
    FileNotFound { path: String },

    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file is not valid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("{field} must be set")]
    MissingField { field: String },

    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Stable identifier for log filtering
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::Unreadable { .. } => "CONFIG_UNREADABLE",
            ConfigError::InvalidYaml(_) => "CONFIG_INVALID_YAML",
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }

    /// Dotted path of the offending setting, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::InvalidValue { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            ConfigError::FileNotFound { .. } => {
                Some("Run with --print-config > config.yaml to create one.".to_string())
            }
            ConfigError::Unreadable { .. } => {
                Some("Check the file permissions of the config path.".to_string())
            }
            ConfigError::InvalidYaml(_) => {
                Some("The --print-config output shows every supported key.".to_string())
            }
            ConfigError::MissingField { field } => {
                Some(format!("Give '{}' a non-empty value.", field))
            }
            ConfigError::InvalidValue { field, .. } if field == "logging.level" => {
                Some("Use one of off, error, warn, info, debug, trace.".to_string())
            }
            ConfigError::InvalidValue { .. } => None,
        }
    }

    /// Startup report for this error
    pub fn to_details(&self) -> ConfigErrorDetails {
        ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field: self.field().map(str::to_string),
            hint: self.hint(),
        }
    }
}

/// What `main` logs when configuration fails
#[derive(Debug, Clone, Serialize)]
pub struct ConfigErrorDetails {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
