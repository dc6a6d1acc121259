//! # Block Mutations
//!
//! Semantic operations on the block list of a canvas.
//!
//! Every mutation is intent-preserving: it names one thing a user did
//! (moved a block, edited its content, sent it to the back). `apply` works on
//! an owned copy of the live blocks; the caller records the result as a
//! single history transaction labelled with [`Mutation::label`].
//!
//! ## Outcomes
//!
//! - `Ok(true)`: the block list changed
//! - `Ok(false)`: nothing to do (missing block, locked block, already in place)
//! - `Err(_)`: the mutation would break the document schema
//!
//! ## Locking
//!
//! A locked block cannot be moved, resized, scaled or deleted. Its content,
//! style, visibility, lock flag and paint order can still change.

use canvas_evaluator::{normalize_scale, MIN_SCALE};
use canvas_model::{BlockData, BlockId, BlockStyle, ContentBlock, Height, ModelError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for content zoom
pub const MAX_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReorderDirection {
    /// One step towards the viewer
    Forward,
    /// One step away from the viewer
    Backward,
    /// On top of everything
    Front,
    /// Below everything
    Back,
}

/// Semantic mutations on the block list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a block at `index` in paint order (`None` means on top)
    AddBlock {
        block: ContentBlock,
        index: Option<usize>,
    },

    RemoveBlock {
        block_id: BlockId,
    },

    MoveBlock {
        block_id: BlockId,
        x: f64,
        y: f64,
    },

    ResizeBlock {
        block_id: BlockId,
        width: f64,
        height: Height,
    },

    /// Content zoom; clamped into `MIN_SCALE..=MAX_SCALE`
    SetScale {
        block_id: BlockId,
        scale: f64,
    },

    UpdateStyle {
        block_id: BlockId,
        style: BlockStyle,
    },

    /// Replace the payload. `block_type` must match the block's own type.
    UpdateData {
        block_id: BlockId,
        block_type: String,
        data: serde_json::Value,
    },

    SetLocked {
        block_id: BlockId,
        locked: bool,
    },

    SetHidden {
        block_id: BlockId,
        hidden: bool,
    },

    Reorder {
        block_id: BlockId,
        direction: ReorderDirection,
    },

    /// Copy a block, shifted by `offset` on both axes, directly above the source
    DuplicateBlock {
        block_id: BlockId,
        new_id: BlockId,
        offset: f64,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block {block_id} is of type {expected}, got a {found} payload")]
    TypeMismatch {
        block_id: String,
        expected: String,
        found: String,
    },

    #[error("Block id already in use: {0}")]
    DuplicateBlockId(String),

    #[error("Block type {0} can no longer be added")]
    LegacyBlockType(String),

    #[error("Block type {0} is not supported")]
    UnsupportedBlockType(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl Mutation {
    /// History label of the transaction this mutation produces
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "Add block",
            Mutation::RemoveBlock { .. } => "Delete block",
            Mutation::MoveBlock { .. } => "Move block",
            Mutation::ResizeBlock { .. } => "Resize block",
            Mutation::SetScale { .. } => "Scale block",
            Mutation::UpdateStyle { .. } => "Edit style",
            Mutation::UpdateData { .. } => "Edit content",
            Mutation::SetLocked { locked: true, .. } => "Lock block",
            Mutation::SetLocked { locked: false, .. } => "Unlock block",
            Mutation::SetHidden { hidden: true, .. } => "Hide block",
            Mutation::SetHidden { hidden: false, .. } => "Show block",
            Mutation::Reorder { .. } => "Reorder block",
            Mutation::DuplicateBlock { .. } => "Duplicate block",
        }
    }

    /// Block the mutation targets
    pub fn block_id(&self) -> &BlockId {
        match self {
            Mutation::AddBlock { block, .. } => &block.id,
            Mutation::RemoveBlock { block_id }
            | Mutation::MoveBlock { block_id, .. }
            | Mutation::ResizeBlock { block_id, .. }
            | Mutation::SetScale { block_id, .. }
            | Mutation::UpdateStyle { block_id, .. }
            | Mutation::UpdateData { block_id, .. }
            | Mutation::SetLocked { block_id, .. }
            | Mutation::SetHidden { block_id, .. }
            | Mutation::Reorder { block_id, .. }
            | Mutation::DuplicateBlock { block_id, .. } => block_id,
        }
    }

    /// Apply to a block list in paint order
    pub fn apply(&self, blocks: &mut Vec<ContentBlock>) -> Result<bool, MutationError> {
        match self {
            Mutation::AddBlock { block, index } => Self::apply_add(blocks, block, *index),

            Mutation::RemoveBlock { block_id } => {
                let Some(index) = find(blocks, block_id) else {
                    return Ok(false);
                };
                if blocks[index].locked {
                    return Ok(false);
                }
                blocks.remove(index);
                Ok(true)
            }

            Mutation::MoveBlock { block_id, x, y } => Self::update_unlocked(blocks, block_id, |block| {
                block.position.x = *x;
                block.position.y = *y;
                block.position.validate(&block.id)?;
                Ok(())
            }),

            Mutation::ResizeBlock {
                block_id,
                width,
                height,
            } => Self::update_unlocked(blocks, block_id, |block| {
                block.position.width = *width;
                block.position.height = *height;
                block.position.validate(&block.id)?;
                Ok(())
            }),

            Mutation::SetScale { block_id, scale } => Self::update_unlocked(blocks, block_id, |block| {
                block.position.scale = clamp_scale(*scale);
                Ok(())
            }),

            Mutation::UpdateStyle { block_id, style } => Self::update(blocks, block_id, |block| {
                style.validate()?;
                block.style = style.clone();
                Ok(())
            }),

            Mutation::UpdateData {
                block_id,
                block_type,
                data,
            } => Self::update(blocks, block_id, |block| {
                let decoded = BlockData::from_parts(block_type, data.clone())?;
                if decoded.type_name() != block.data.type_name() {
                    return Err(MutationError::TypeMismatch {
                        block_id: block.id.to_string(),
                        expected: block.data.type_name().to_string(),
                        found: decoded.type_name().to_string(),
                    });
                }
                decoded.validate()?;
                block.data = decoded;
                Ok(())
            }),

            Mutation::SetLocked { block_id, locked } => Self::update(blocks, block_id, |block| {
                block.locked = *locked;
                Ok(())
            }),

            Mutation::SetHidden { block_id, hidden } => Self::update(blocks, block_id, |block| {
                block.hidden = *hidden;
                Ok(())
            }),

            Mutation::Reorder {
                block_id,
                direction,
            } => Ok(Self::apply_reorder(blocks, block_id, *direction)),

            Mutation::DuplicateBlock {
                block_id,
                new_id,
                offset,
            } => {
                let Some(index) = find(blocks, block_id) else {
                    return Ok(false);
                };
                if find(blocks, new_id).is_some() {
                    return Err(MutationError::DuplicateBlockId(new_id.to_string()));
                }
                let source = &blocks[index];
                if let Some(block_type) = source.block_type() {
                    if block_type.is_legacy() {
                        return Err(MutationError::LegacyBlockType(block_type.to_string()));
                    }
                }

                let mut copy = source.clone();
                copy.id = new_id.clone();
                copy.position.x += offset;
                copy.position.y += offset;
                copy.locked = false;
                copy.position.validate(&copy.id)?;
                blocks.insert(index + 1, copy);
                Ok(true)
            }
        }
    }

    fn apply_add(
        blocks: &mut Vec<ContentBlock>,
        block: &ContentBlock,
        index: Option<usize>,
    ) -> Result<bool, MutationError> {
        match block.block_type() {
            None => {
                return Err(MutationError::UnsupportedBlockType(
                    block.data.type_name().to_string(),
                ))
            }
            Some(block_type) if block_type.is_legacy() => {
                return Err(MutationError::LegacyBlockType(block_type.to_string()));
            }
            Some(_) => {}
        }
        if find(blocks, &block.id).is_some() {
            return Err(MutationError::DuplicateBlockId(block.id.to_string()));
        }
        block.validate()?;

        let index = index.unwrap_or(blocks.len()).min(blocks.len());
        blocks.insert(index, block.clone());
        Ok(true)
    }

    fn apply_reorder(blocks: &mut [ContentBlock], id: &BlockId, direction: ReorderDirection) -> bool {
        let Some(from) = find(blocks, id) else {
            return false;
        };
        let last = blocks.len() - 1;
        let to = match direction {
            ReorderDirection::Forward => (from + 1).min(last),
            ReorderDirection::Backward => from.saturating_sub(1),
            ReorderDirection::Front => last,
            ReorderDirection::Back => 0,
        };
        if to == from {
            return false;
        }
        if to > from {
            blocks[from..=to].rotate_left(1);
        } else {
            blocks[to..=from].rotate_right(1);
        }
        true
    }

    fn update<F>(blocks: &mut [ContentBlock], id: &BlockId, updater: F) -> Result<bool, MutationError>
    where
        F: FnOnce(&mut ContentBlock) -> Result<(), MutationError>,
    {
        let Some(index) = find(blocks, id) else {
            return Ok(false);
        };
        let mut block = blocks[index].clone();
        updater(&mut block)?;
        if block == blocks[index] {
            return Ok(false);
        }
        blocks[index] = block;
        Ok(true)
    }

    fn update_unlocked<F>(
        blocks: &mut [ContentBlock],
        id: &BlockId,
        updater: F,
    ) -> Result<bool, MutationError>
    where
        F: FnOnce(&mut ContentBlock) -> Result<(), MutationError>,
    {
        match find(blocks, id) {
            Some(index) if blocks[index].locked => Ok(false),
            _ => Self::update(blocks, id, updater),
        }
    }
}

/// Finite scale inside `MIN_SCALE..=MAX_SCALE`
pub fn clamp_scale(scale: f64) -> f64 {
    normalize_scale(scale).clamp(MIN_SCALE, MAX_SCALE)
}

fn find(blocks: &[ContentBlock], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|b| &b.id == id)
}
