use thiserror::Error;

/// Errors raised while loading a level.
///
/// All of these are fatal: a level that fails to load is never partially
/// played.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Level data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No map for level {0}")]
    UnknownLevel(u32),

    #[error("Object {index} of group `{group}` is malformed: {reason}")]
    MalformedObject {
        group: String,
        index: usize,
        reason: String,
    },

    #[error("Expected exactly one player spawn point, found {0}")]
    PlayerSpawnCount(usize),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
