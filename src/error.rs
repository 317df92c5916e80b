use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid record file '{path}': {reason}")]
    InvalidRecord { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ContractError {
    pub fn invalid_record(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;
