//! Error types for the editor

use canvas_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid document: {0}")]
    Model(#[from] ModelError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Storage error: {0}")]
    Store(#[from] crate::document::StoreError),

    #[error("Block type {block_type} is not available on a {kind} canvas")]
    NotInPalette { block_type: String, kind: String },
}
