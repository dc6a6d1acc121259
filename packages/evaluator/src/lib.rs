//! # Canvas Evaluator
//!
//! Renders canvas documents to a virtual DOM.
//!
//! One renderer serves both the editor preview and the published page:
//!
//! ```text
//! CanvasDocument + ContextData ──► Evaluator ──► VirtualDomDocument
//!                                      │
//!                                      ├─ per block: exhaustive dispatch on BlockData
//!                                      ├─ ScaleTransform (content zoom inside the box)
//!                                      └─ AssetResolver (media URLs)
//! ```
//!
//! The editor passes [`ContextData::placeholder`]; the published page passes
//! the fetched record. Both produce the same markup structure.

pub mod assets;
pub mod context;
pub mod evaluator;
pub mod scaling;
pub mod utils;
pub mod vdom;
pub mod widgets;

#[cfg(test)]
mod tests_render;

#[cfg(test)]
mod tests_canvas;

pub use assets::{AssetResolver, CdnAssets, PassthroughAssets};
pub use context::{
    AgeRange, ContextData, CreatorSummary, Price, Rating, ResourceCard, ResourceSummary,
};
pub use evaluator::{render_obsolete_notice, render_unrecognized, Evaluator};
pub use scaling::{normalize_scale, ScaleTransform, MIN_SCALE};
pub use vdom::{CssRule, VNode, VirtualDomDocument};
