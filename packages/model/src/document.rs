//! # Canvas Document
//!
//! The unit handed to persistence: ordered blocks plus the document-level
//! [`CanvasConfig`] and [`PaywallConfig`]. Persistence treats it as an opaque
//! JSON blob; the only requirement is an exact round-trip.

use crate::block::{BlockType, ContentBlock};
use crate::error::ModelError;
use crate::style::Background;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current document format version
pub const DOCUMENT_VERSION: u32 = 1;

/// Which page a canvas lays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasKind {
    #[default]
    Resource,
    Profile,
}

/// Canvas-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub kind: CanvasKind,
    pub width: f64,
    pub min_height: f64,
    pub background: Background,
    /// Grid cell size used by snapping
    pub grid_size: Option<f64>,
    pub snap_to_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            kind: CanvasKind::Resource,
            width: 1200.0,
            min_height: 800.0,
            background: Background::color("#ffffff"),
            grid_size: Some(8.0),
            snap_to_grid: false,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ModelError::InvalidConfig(format!("canvas width must be > 0, got {}", self.width)));
        }
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "canvas min height must be >= 0, got {}",
                self.min_height
            )));
        }
        if let Some(grid) = self.grid_size {
            if !grid.is_finite() || grid <= 0.0 {
                return Err(ModelError::InvalidConfig(format!("grid size must be > 0, got {}", grid)));
            }
        }
        self.background.validate()
    }
}

/// Canvas-level purchase gate: everything at or below `gate_y` stays hidden
/// until the viewer has access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaywallConfig {
    pub enabled: bool,
    pub gate_y: f64,
    pub message: String,
    pub cta_label: String,
    pub blur_px: f64,
}

impl Default for PaywallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            gate_y: 600.0,
            message: "Purchase this resource to see everything inside".to_string(),
            cta_label: "Unlock".to_string(),
            blur_px: 8.0,
        }
    }
}

impl PaywallConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.gate_y.is_finite() || self.gate_y < 0.0 {
            return Err(ModelError::InvalidConfig(format!("paywall gate must be >= 0, got {}", self.gate_y)));
        }
        if !self.blur_px.is_finite() || self.blur_px < 0.0 {
            return Err(ModelError::InvalidConfig(format!("paywall blur must be >= 0, got {}", self.blur_px)));
        }
        Ok(())
    }
}

/// Serialized canvas: blocks in paint order plus document-level config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub config: CanvasConfig,
    #[serde(default)]
    pub paywall: PaywallConfig,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            blocks: Vec::new(),
            config: CanvasConfig::default(),
            paywall: PaywallConfig::default(),
        }
    }
}

impl CanvasDocument {
    pub fn new(blocks: Vec<ContentBlock>, config: CanvasConfig, paywall: PaywallConfig) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            blocks,
            config,
            paywall,
        }
    }

    /// Parse and validate a stored document
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let doc: CanvasDocument = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every block plus document-wide invariants
    pub fn validate(&self) -> Result<(), ModelError> {
        self.config.validate()?;
        self.paywall.validate()?;

        let mut seen = HashSet::new();
        for block in &self.blocks {
            if !seen.insert(&block.id) {
                return Err(ModelError::DuplicateBlockId(block.id.to_string()));
            }
            block.validate()?;
        }
        Ok(())
    }

    pub fn find_block(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id.as_str() == id)
    }

    /// Embedded paywall blocks that should be replaced by `PaywallConfig`
    pub fn legacy_paywall_blocks(&self) -> Vec<&ContentBlock> {
        self.blocks
            .iter()
            .filter(|b| b.block_type() == Some(BlockType::PaywallOverlay))
            .collect()
    }

    /// Blocks whose type this build does not know
    pub fn unrecognized_blocks(&self) -> Vec<&ContentBlock> {
        self.blocks.iter().filter(|b| b.block_type().is_none()).collect()
    }
}
