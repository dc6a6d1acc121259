use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Structural violations of the block document model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid position for block {block_id}: {reason}")]
    InvalidPosition { block_id: String, reason: String },

    #[error("Invalid {block_type} data: {reason}")]
    InvalidData { block_type: String, reason: String },

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Invalid canvas config: {0}")]
    InvalidConfig(String),

    #[error("Invalid document JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Json(e.to_string())
    }
}
