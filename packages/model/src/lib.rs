//! # Canvas Model
//!
//! The block document model behind the freeform canvas editor.
//!
//! A canvas document is an ordered list of [`ContentBlock`]s (later blocks
//! paint on top of earlier ones) plus two document-level siblings:
//! [`CanvasConfig`] and [`PaywallConfig`].
//!
//! ## Tagged payloads
//!
//! A block's `type` and its `data` are a single sum type, [`BlockData`].
//! The wire tag is derived from the payload, so a block can never carry a
//! foreign payload:
//!
//! ```text
//! { "id": "a1-1", "type": "image", "position": {..}, "style": {..},
//!   "data": { "url": "..", "alt": "..", "objectFit": "cover", "borderRadius": 0 } }
//!        └──── BlockData::Image(ImageData { .. }) ────┘
//! ```
//!
//! Blocks whose wire tag is outside the closed set are kept as
//! [`BlockData::Unrecognized`] so they survive a load/save cycle and can be
//! rendered as inert placeholders.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use canvas_model::{BlockType, CanvasDocument, ContentBlock, IdGenerator};
//!
//! let mut ids = IdGenerator::new("resource/42");
//! let mut doc = CanvasDocument::default();
//! doc.blocks.push(ContentBlock::with_defaults(ids.new_id(), BlockType::Text));
//!
//! let json = doc.to_json()?;
//! let restored = CanvasDocument::from_json(&json)?;
//! assert_eq!(doc, restored);
//! ```

pub mod block;
pub mod data;
pub mod document;
pub mod error;
pub mod id_generator;
pub mod style;

pub use block::{BlockCategory, BlockId, BlockPosition, BlockType, ContentBlock, Height};
pub use data::*;
pub use document::{CanvasConfig, CanvasDocument, CanvasKind, PaywallConfig, DOCUMENT_VERSION};
pub use error::{ModelError, ModelResult};
pub use id_generator::{get_document_seed, IdGenerator};
pub use style::{Background, BackgroundPreset, BlockStyle, CornerRadius, Elevation, GradientStop};
