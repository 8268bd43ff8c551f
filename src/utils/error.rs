use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("No statistical records to select from")]
    EmptyInput,

    #[error("Version unavailable for source: {source_id}")]
    MissingVersion { source_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },
}

impl ForgeError {
    pub fn parse(message: impl Into<String>) -> Self {
        ForgeError::Parse {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        ForgeError::Processing {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
