use thiserror::Error;

pub type Result<T> = std::result::Result<T, StowageError>;

#[derive(Debug, Error)]
pub enum StowageError {
    #[error("invalid size value: {0}")]
    InvalidSize(String),

    #[error("setting '{key}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown setting: '{0}'")]
    UnknownSetting(String),

    #[error("invalid value '{raw}' for setting '{key}': {reason}")]
    InvalidSettingValue {
        key: String,
        raw: String,
        reason: String,
    },

    #[error("schedule has no tasks")]
    NoTasks,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
