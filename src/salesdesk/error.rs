use crate::model::{EntityKind, RecordId};
use crate::validation::ValidationResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    /// The draft failed local validation. Nothing was sent to the remote.
    #[error("Validation failed: {}", .0.summary())]
    ValidationRejected(ValidationResult),

    /// The remote accepted the request but refused it (4xx other than 404).
    #[error("Rejected by remote: {0}")]
    RemoteValidationRejected(String),

    #[error("{kind} record not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl DeskError {
    pub fn not_found(kind: EntityKind, id: RecordId) -> Self {
        DeskError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeskError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
