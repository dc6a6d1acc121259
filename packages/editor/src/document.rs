//! # Document Storage
//!
//! Collaborators the editor talks to at its edges:
//!
//! - [`DocumentStore`]: where canvas documents live between sessions
//! - [`ContextProvider`]: where the published page gets its record data
//!
//! Both are synchronous. A host with an async backend adapts them.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Save
//!   ↓      ↓      ↓
//! Store  History  Store
//! ```
//!
//! Stores treat the document as an opaque JSON blob; the only requirement is
//! an exact round trip.

use canvas_evaluator::ContextData;
use canvas_model::{CanvasDocument, ModelError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is invalid: {0}")]
    Invalid(#[from] ModelError),

    #[error("Invalid document key: {0:?}")]
    InvalidKey(String),

    #[error("No context available for {0}")]
    ContextUnavailable(String),
}

/// Persistence for canvas documents, keyed by resource or profile id
pub trait DocumentStore {
    /// `Ok(None)` when nothing has been saved under `key` yet
    fn load(&self, key: &str) -> Result<Option<CanvasDocument>, StoreError>;

    fn save(&mut self, key: &str, document: &CanvasDocument) -> Result<(), StoreError>;
}

/// Source of the record data shown on a published page
pub trait ContextProvider {
    fn fetch(&self, key: &str) -> Result<ContextData, StoreError>;
}

/// In-memory store holding serialized documents
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<CanvasDocument>, StoreError> {
        match self.documents.get(key) {
            Some(json) => Ok(Some(CanvasDocument::from_json(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, document: &CanvasDocument) -> Result<(), StoreError> {
        let json = document.to_json()?;
        self.documents.insert(key.to_string(), json);
        Ok(())
    }
}

/// One pretty-printed JSON file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl DocumentStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, key: &str) -> Result<Option<CanvasDocument>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            debug!(path = %path.display(), "No stored document");
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        let document = CanvasDocument::from_json(&json)?;
        info!(blocks = document.blocks.len(), "Loaded document");
        Ok(Some(document))
    }

    #[instrument(skip(self, document), fields(root = %self.root.display(), blocks = document.blocks.len()))]
    fn save(&mut self, key: &str, document: &CanvasDocument) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(&path, document.to_json_pretty()?)?;
        info!(path = %path.display(), "Saved document");
        Ok(())
    }
}

/// Context provider backed by a fixed map of records
#[derive(Debug, Default, Clone)]
pub struct StaticContextProvider {
    records: HashMap<String, ContextData>,
}

impl StaticContextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: impl Into<String>, context: ContextData) -> Self {
        self.records.insert(key.into(), context);
        self
    }
}

impl ContextProvider for StaticContextProvider {
    fn fetch(&self, key: &str) -> Result<ContextData, StoreError> {
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::ContextUnavailable(key.to_string()))
    }
}

/// Context provider for the editor: always the placeholder record
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderContext;

impl ContextProvider for PlaceholderContext {
    fn fetch(&self, _key: &str) -> Result<ContextData, StoreError> {
        Ok(ContextData::placeholder())
    }
}
