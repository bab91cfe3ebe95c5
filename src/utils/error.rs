use thiserror::Error;

#[derive(Error, Debug)]
pub enum CffError {
    #[error("Unsupported field: {field}")]
    UnsupportedField { field: String },

    #[error("Cannot parse '{value}' as a date")]
    DateParse { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid CFF document: {message}")]
    InvalidDocument { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CffError {
    pub fn unsupported_field(field: impl Into<String>) -> Self {
        CffError::UnsupportedField {
            field: field.into(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CffError::UnsupportedField { field } => {
                format!("'{}' is not a field that can be read or written", field)
            }
            CffError::DateParse { value } => {
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", value)
            }
            CffError::IoError(e) => format!("File access failed: {}", e),
            CffError::YamlError(_) | CffError::InvalidDocument { .. } => {
                format!("The citation file could not be read: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CffError>;
