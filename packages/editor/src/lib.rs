//! # Canvas Editor
//!
//! Editing engine for freeform canvas documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: blocks, configs, JSON round trip     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + history + mutations       │
//! │  - Pointer gestures and block operations    │
//! │  - Bounded, coalescing undo/redo log        │
//! │  - Load/save through a DocumentStore        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: document + context → VDOM        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use canvas_editor::{EditorSurface, MemoryStore, Point};
//! use canvas_model::BlockType;
//!
//! let mut store = MemoryStore::new();
//! let mut surface = EditorSurface::new("resource-42");
//! surface.open(&store)?;
//!
//! let id = surface.add_block(BlockType::Text, Some(Point::new(40.0, 40.0)))?;
//! surface.update_data(id.as_str(), "text", serde_json::json!({ "content": "hello" }))?;
//! surface.undo();
//!
//! surface.save(&mut store)?;
//! ```

pub mod document;
mod errors;
pub mod history;
pub mod mutations;
pub mod pipeline;
pub mod session;

pub use document::{
    ContextProvider, DocumentStore, FileStore, MemoryStore, PlaceholderContext,
    StaticContextProvider, StoreError,
};
pub use errors::EditorError;
pub use history::{
    CanvasHistory, CanvasHistoryEntry, Clock, HistoryConfig, ManualClock, SystemClock,
    INITIAL_STATE_LABEL,
};
pub use mutations::{Mutation, MutationError, ReorderDirection, MAX_SCALE};
pub use pipeline::{Pipeline, PipelineResult};
pub use session::{
    EditorConfig, EditorSurface, Interaction, Modifiers, Point, ResizeHandle, ResizeMode,
    MIN_BLOCK_SIZE,
};
