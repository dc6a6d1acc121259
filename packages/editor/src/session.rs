//! # Editor Surface
//!
//! One editing session over one canvas document.
//!
//! The surface owns the history engine and the document-level config, plus
//! transient state that is never persisted: the selection, the id generator
//! and the in-flight pointer gesture.
//!
//! ```text
//! pointer_down ──► Dragging ──► pointer_move* ──► pointer_up ──► Idle
//! handle_down  ──► Resizing{Normal|Scaled} ──► pointer_move* ──► pointer_up
//! ```
//!
//! A gesture is one undo step: its first pointer move records an entry and
//! every later move overwrites it until `pointer_up`.

use crate::document::DocumentStore;
use crate::history::{CanvasHistory, Clock, HistoryConfig, RESIZE_LABEL};
use crate::mutations::{clamp_scale, Mutation, ReorderDirection};
use crate::EditorError;
use canvas_model::{
    BlockId, BlockPosition, BlockStyle, BlockType, CanvasConfig, CanvasDocument, ContentBlock,
    Height, IdGenerator, PaywallConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use crate::mutations::MAX_SCALE;
pub use canvas_evaluator::MIN_SCALE;

/// Smallest width or height a resize gesture can produce
pub const MIN_BLOCK_SIZE: f64 = 20.0;

/// Offset of a duplicated block from its source
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Settings an editing session starts from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub canvas: CanvasConfig,
}

/// Pointer position in document space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
        ResizeHandle::NW,
    ];

    fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }
}

/// Keys held when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Resize zooms the content instead of changing the box
    pub scale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeMode {
    Normal,
    Scaled,
}

/// In-flight pointer gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        block_id: BlockId,
        start: Point,
        origin: BlockPosition,
    },
    Resizing {
        block_id: BlockId,
        handle: ResizeHandle,
        mode: ResizeMode,
        start: Point,
        origin: BlockPosition,
    },
}

#[derive(Debug)]
pub struct EditorSurface {
    key: String,
    history: CanvasHistory,
    config: CanvasConfig,
    paywall: PaywallConfig,
    ids: IdGenerator,
    selection: Option<BlockId>,
    interaction: Interaction,
    saved_revision: u64,
    settings_dirty: bool,
}

impl EditorSurface {
    /// Blank canvas for the resource or profile `key`
    pub fn new(key: &str) -> Self {
        let history = CanvasHistory::new();
        let saved_revision = history.revision();
        Self {
            key: key.to_string(),
            history,
            config: CanvasConfig::default(),
            paywall: PaywallConfig::default(),
            ids: IdGenerator::new(key),
            selection: None,
            interaction: Interaction::Idle,
            saved_revision,
            settings_dirty: false,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.history = self.history.with_config(config.history);
        self.config = config.canvas;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.history = self.history.with_clock(clock);
        self
    }

    /// Replace the session's document with a stored one
    pub fn load(&mut self, document: CanvasDocument) -> Result<(), EditorError> {
        document.validate()?;

        for block in document.legacy_paywall_blocks() {
            warn!(block_id = %block.id, "Document contains an obsolete paywall block");
        }
        for block in document.unrecognized_blocks() {
            warn!(block_id = %block.id, block_type = block.data.type_name(), "Document contains an unrecognized block");
        }
        info!(key = %self.key, blocks = document.blocks.len(), "Loaded canvas");

        self.history.reset(document.blocks);
        self.config = document.config;
        self.paywall = document.paywall;
        self.selection = None;
        self.interaction = Interaction::Idle;
        self.mark_saved();
        Ok(())
    }

    /// Load `key` from `store`, keeping the blank canvas when nothing is stored
    pub fn open(&mut self, store: &dyn DocumentStore) -> Result<bool, EditorError> {
        match store.load(&self.key)? {
            Some(document) => {
                self.load(document)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist the current document. A failed save keeps every edit and the
    /// dirty flag.
    pub fn save(&mut self, store: &mut dyn DocumentStore) -> Result<(), EditorError> {
        let document = self.document();
        if let Err(e) = store.save(&self.key, &document) {
            warn!(key = %self.key, error = %e, "Failed to save canvas");
            return Err(e.into());
        }
        self.mark_saved();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Block operations
    // ------------------------------------------------------------------

    /// Apply one mutation as one history transaction
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        let mut blocks = self.history.blocks().to_vec();
        if !mutation.apply(&mut blocks)? {
            debug!(action = mutation.label(), block_id = %mutation.block_id(), "Mutation had no effect");
            return Ok(false);
        }
        self.history.replace_all(blocks, mutation.label());
        Ok(true)
    }

    /// Add a block with default size and data at `at` (origin when `None`)
    /// on top of every other block, and select it
    pub fn add_block(&mut self, block_type: BlockType, at: Option<Point>) -> Result<BlockId, EditorError> {
        if !BlockType::palette(self.config.kind).contains(&block_type) {
            return Err(EditorError::NotInPalette {
                block_type: block_type.to_string(),
                kind: format!("{:?}", self.config.kind).to_lowercase(),
            });
        }

        let id = self.ids.next_unique(self.history.blocks());
        let mut block = ContentBlock::with_defaults(id.clone(), block_type);
        let at = at.unwrap_or_default();
        block.position.x = self.snap(at.x);
        block.position.y = self.snap(at.y);

        self.apply(Mutation::AddBlock { block, index: None })?;
        self.selection = Some(id.clone());
        Ok(id)
    }

    pub fn remove_block(&mut self, id: &str) -> Result<bool, EditorError> {
        let removed = self.apply(Mutation::RemoveBlock {
            block_id: BlockId::from(id),
        })?;
        if removed && self.selection.as_ref().map(BlockId::as_str) == Some(id) {
            self.selection = None;
        }
        Ok(removed)
    }

    /// Copy a block directly above the source and select the copy
    pub fn duplicate_block(&mut self, id: &str) -> Result<Option<BlockId>, EditorError> {
        let new_id = self.ids.next_unique(self.history.blocks());
        let duplicated = self.apply(Mutation::DuplicateBlock {
            block_id: BlockId::from(id),
            new_id: new_id.clone(),
            offset: DUPLICATE_OFFSET,
        })?;
        if !duplicated {
            return Ok(None);
        }
        self.selection = Some(new_id.clone());
        Ok(Some(new_id))
    }

    pub fn toggle_lock(&mut self, id: &str) -> Result<bool, EditorError> {
        let Some(block) = self.block(id) else {
            return Ok(false);
        };
        let locked = !block.locked;
        self.apply(Mutation::SetLocked {
            block_id: BlockId::from(id),
            locked,
        })
    }

    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, EditorError> {
        let Some(block) = self.block(id) else {
            return Ok(false);
        };
        let hidden = !block.hidden;
        self.apply(Mutation::SetHidden {
            block_id: BlockId::from(id),
            hidden,
        })
    }

    pub fn reorder(&mut self, id: &str, direction: ReorderDirection) -> Result<bool, EditorError> {
        self.apply(Mutation::Reorder {
            block_id: BlockId::from(id),
            direction,
        })
    }

    pub fn update_style(&mut self, id: &str, style: BlockStyle) -> Result<bool, EditorError> {
        self.apply(Mutation::UpdateStyle {
            block_id: BlockId::from(id),
            style,
        })
    }

    /// Replace a block's payload; `block_type` must be the block's own type
    pub fn update_data(
        &mut self,
        id: &str,
        block_type: &str,
        data: serde_json::Value,
    ) -> Result<bool, EditorError> {
        self.apply(Mutation::UpdateData {
            block_id: BlockId::from(id),
            block_type: block_type.to_string(),
            data,
        })
    }

    pub fn set_scale(&mut self, id: &str, scale: f64) -> Result<bool, EditorError> {
        self.apply(Mutation::SetScale {
            block_id: BlockId::from(id),
            scale,
        })
    }

    /// Shift a block by a keyboard step
    pub fn nudge(&mut self, id: &str, dx: f64, dy: f64) -> Result<bool, EditorError> {
        let Some(block) = self.block(id) else {
            return Ok(false);
        };
        let (x, y) = (block.position.x + dx, block.position.y + dy);
        self.apply(Mutation::MoveBlock {
            block_id: BlockId::from(id),
            x,
            y,
        })
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Select a block and start dragging it. Locked blocks are selected only.
    pub fn pointer_down(&mut self, id: &str, point: Point) -> bool {
        self.end_gesture();
        if !point.is_finite() {
            warn!(block_id = id, "Ignoring pointer down at a non-finite point");
            return false;
        }
        let Some(block) = self.block(id) else {
            self.selection = None;
            return false;
        };
        let block_id = block.id.clone();
        let locked = block.locked;
        let origin = block.position;

        self.selection = Some(block_id.clone());
        if locked {
            return false;
        }
        self.interaction = Interaction::Dragging {
            block_id,
            start: point,
            origin,
        };
        self.history.begin_gesture();
        true
    }

    /// Start a resize from one of the eight handles
    pub fn handle_down(&mut self, id: &str, handle: ResizeHandle, point: Point, modifiers: Modifiers) -> bool {
        self.end_gesture();
        if !point.is_finite() {
            warn!(block_id = id, "Ignoring resize start at a non-finite point");
            return false;
        }
        let Some(block) = self.block(id) else {
            return false;
        };
        let block_id = block.id.clone();
        let locked = block.locked;
        let origin = block.position;

        self.selection = Some(block_id.clone());
        if locked {
            return false;
        }
        let mode = if modifiers.scale {
            ResizeMode::Scaled
        } else {
            ResizeMode::Normal
        };
        self.interaction = Interaction::Resizing {
            block_id,
            handle,
            mode,
            start: point,
            origin,
        };
        self.history.begin_gesture();
        true
    }

    /// Advance the current gesture. Returns whether the document changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            warn!("Ignoring pointer move to a non-finite point");
            return false;
        }
        match self.interaction.clone() {
            Interaction::Idle => false,

            Interaction::Dragging {
                block_id,
                start,
                origin,
            } => {
                let x = self.snap(origin.x + point.x - start.x);
                let y = self.snap(origin.y + point.y - start.y);
                self.history.move_block(block_id.as_str(), x, y)
            }

            Interaction::Resizing {
                block_id,
                handle,
                mode: ResizeMode::Normal,
                start,
                origin,
            } => {
                let next = self.resized(&origin, handle, point.x - start.x, point.y - start.y);
                self.history.mutate_one(
                    block_id.as_str(),
                    |block| {
                        block.position.x = next.x;
                        block.position.y = next.y;
                        block.position.width = next.width;
                        block.position.height = next.height;
                    },
                    RESIZE_LABEL,
                )
            }

            Interaction::Resizing {
                block_id,
                handle,
                mode: ResizeMode::Scaled,
                start,
                origin,
            } => {
                let ratio = scale_ratio(&origin, handle, point.x - start.x, point.y - start.y);
                let scale = clamp_scale(origin.scale * ratio);
                match self.apply(Mutation::SetScale { block_id, scale }) {
                    Ok(changed) => changed,
                    Err(e) => {
                        warn!(error = %e, "Scaled resize rejected");
                        false
                    }
                }
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        self.interaction = Interaction::Idle;
        self.history.end_gesture();
    }

    fn resized(&self, origin: &BlockPosition, handle: ResizeHandle, dx: f64, dy: f64) -> BlockPosition {
        let mut next = *origin;

        if handle.moves_right() {
            next.width = self.snap(origin.width + dx).max(MIN_BLOCK_SIZE);
        } else if handle.moves_left() {
            let right = origin.x + origin.width;
            next.x = self.snap(origin.x + dx).min(right - MIN_BLOCK_SIZE);
            next.width = right - next.x;
        }

        // content-sized blocks keep their automatic height
        if let Height::Px(height) = origin.height {
            if handle.moves_bottom() {
                next.height = Height::Px(self.snap(height + dy).max(MIN_BLOCK_SIZE));
            } else if handle.moves_top() {
                let bottom = origin.y + height;
                next.y = self.snap(origin.y + dy).min(bottom - MIN_BLOCK_SIZE);
                next.height = Height::Px(bottom - next.y);
            }
        }

        next
    }

    fn snap(&self, value: f64) -> f64 {
        match self.config.grid_size {
            Some(grid) if self.config.snap_to_grid && grid > 0.0 => (value / grid).round() * grid,
            _ => value,
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.undo();
        self.drop_stale_selection();
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.redo();
        self.drop_stale_selection();
        changed
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selection {
            if self.history.block(id).is_none() {
                self.selection = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Document
    // ------------------------------------------------------------------

    /// Snapshot to persist
    pub fn document(&self) -> CanvasDocument {
        CanvasDocument::new(
            self.history.blocks().to_vec(),
            self.config.clone(),
            self.paywall.clone(),
        )
    }

    pub fn is_dirty(&self) -> bool {
        self.settings_dirty || self.history.revision() != self.saved_revision
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = self.history.revision();
        self.settings_dirty = false;
    }

    /// Canvas settings are not part of the undo log
    pub fn set_canvas_config(&mut self, config: CanvasConfig) -> Result<(), EditorError> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.settings_dirty = true;
        }
        Ok(())
    }

    pub fn set_paywall(&mut self, paywall: PaywallConfig) -> Result<(), EditorError> {
        paywall.validate()?;
        if paywall != self.paywall {
            self.paywall = paywall;
            self.settings_dirty = true;
        }
        Ok(())
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selection = id
            .and_then(|id| self.block(id))
            .map(|block| block.id.clone());
    }

    pub fn selection(&self) -> Option<&BlockId> {
        self.selection.as_ref()
    }

    /// Block types that can be added to this canvas
    pub fn palette(&self) -> Vec<BlockType> {
        BlockType::palette(self.config.kind)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        self.history.blocks()
    }

    pub fn block(&self, id: &str) -> Option<&ContentBlock> {
        self.history.blocks().iter().find(|b| b.id.as_str() == id)
    }

    pub fn history(&self) -> &CanvasHistory {
        &self.history
    }

    pub fn canvas_config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn paywall(&self) -> &PaywallConfig {
        &self.paywall
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Changes with every edit, undo, redo and load
    pub fn revision(&self) -> u64 {
        self.history.revision()
    }
}

/// Zoom factor implied by dragging `handle` by (dx, dy)
fn scale_ratio(origin: &BlockPosition, handle: ResizeHandle, dx: f64, dy: f64) -> f64 {
    if handle.moves_right() {
        (origin.width + dx) / origin.width
    } else if handle.moves_left() {
        (origin.width - dx) / origin.width
    } else {
        match origin.height {
            Height::Px(h) if handle.moves_bottom() => (h + dy) / h,
            Height::Px(h) if handle.moves_top() => (h - dy) / h,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ManualClock;
    use canvas_model::CanvasKind;

    fn surface() -> (EditorSurface, ManualClock) {
        let clock = ManualClock::new(10_000);
        let surface = EditorSurface::new("resource/1").with_clock(clock.clone());
        (surface, clock)
    }

    #[test]
    fn test_add_block_selects_and_records() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Image, Some(Point::new(50.0, 60.0))).unwrap();

        assert_eq!(surface.selection(), Some(&id));
        assert_eq!(surface.history().undo_label(), None);
        assert_eq!(surface.history().entries()[0].action, "Add block");
        let block = surface.block(id.as_str()).unwrap();
        assert_eq!((block.position.x, block.position.y), (50.0, 60.0));
    }

    #[test]
    fn test_add_block_respects_palette() {
        let (mut surface, _) = surface();
        let err = surface.add_block(BlockType::ProfileHero, None).unwrap_err();
        assert!(matches!(err, EditorError::NotInPalette { .. }));

        let err = surface.add_block(BlockType::PaywallOverlay, None).unwrap_err();
        assert!(matches!(err, EditorError::NotInPalette { .. }));

        let mut config = surface.canvas_config().clone();
        config.kind = CanvasKind::Profile;
        surface.set_canvas_config(config).unwrap();
        assert!(surface.add_block(BlockType::ProfileHero, None).is_ok());
    }

    #[test]
    fn test_drag_coalesces_and_snaps() {
        let (mut surface, clock) = surface();
        let mut config = surface.canvas_config().clone();
        config.snap_to_grid = true;
        config.grid_size = Some(10.0);
        surface.set_canvas_config(config).unwrap();
        let id = surface.add_block(BlockType::Title, None).unwrap();

        clock.advance(1_000);
        assert!(surface.pointer_down(id.as_str(), Point::new(5.0, 5.0)));
        for step in 1..=4 {
            clock.advance(16);
            surface.pointer_move(Point::new(5.0 + step as f64 * 11.0, 5.0));
        }
        surface.pointer_up();

        assert_eq!(surface.history().len(), 2);
        assert_eq!(surface.block(id.as_str()).unwrap().position.x, 40.0);
        assert_eq!(surface.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_locked_block_selects_without_dragging() {
        let (mut surface, clock) = surface();
        let id = surface.add_block(BlockType::Title, None).unwrap();
        surface.toggle_lock(id.as_str()).unwrap();
        surface.select(None);

        clock.advance(1_000);
        assert!(!surface.pointer_down(id.as_str(), Point::new(0.0, 0.0)));
        assert_eq!(surface.selection(), Some(&id));
        assert!(!surface.pointer_move(Point::new(100.0, 100.0)));
        assert!(!surface.handle_down(id.as_str(), ResizeHandle::SE, Point::default(), Modifiers::default()));
        assert_eq!(surface.block(id.as_str()).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_resize_from_west_handle_keeps_right_edge() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Image, Some(Point::new(100.0, 100.0))).unwrap();

        surface.handle_down(id.as_str(), ResizeHandle::NW, Point::new(100.0, 100.0), Modifiers::default());
        surface.pointer_move(Point::new(140.0, 90.0));

        let position = surface.block(id.as_str()).unwrap().position;
        assert_eq!(position.x, 140.0);
        assert_eq!(position.width, 280.0);
        assert_eq!(position.y, 90.0);
        assert_eq!(position.height, Height::Px(250.0));
        assert_eq!(surface.history().undo_label(), Some(RESIZE_LABEL));
    }

    #[test]
    fn test_resize_enforces_minimum_size() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Image, None).unwrap();

        surface.handle_down(id.as_str(), ResizeHandle::SE, Point::new(320.0, 240.0), Modifiers::default());
        surface.pointer_move(Point::new(-500.0, -500.0));

        let position = surface.block(id.as_str()).unwrap().position;
        assert_eq!(position.width, MIN_BLOCK_SIZE);
        assert_eq!(position.height, Height::Px(MIN_BLOCK_SIZE));
    }

    #[test]
    fn test_auto_height_ignores_vertical_resize() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Text, None).unwrap();

        surface.handle_down(id.as_str(), ResizeHandle::SE, Point::new(400.0, 50.0), Modifiers::default());
        surface.pointer_move(Point::new(500.0, 300.0));

        let position = surface.block(id.as_str()).unwrap().position;
        assert_eq!(position.width, 500.0);
        assert_eq!(position.height, Height::Auto);
    }

    #[test]
    fn test_scaled_resize_changes_only_scale() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Image, None).unwrap();
        let before = surface.block(id.as_str()).unwrap().position;

        let modifiers = Modifiers { scale: true };
        surface.handle_down(id.as_str(), ResizeHandle::E, Point::new(320.0, 0.0), modifiers);
        surface.pointer_move(Point::new(480.0, 0.0));

        let after = surface.block(id.as_str()).unwrap().position;
        assert_eq!(after.scale, 1.5);
        assert_eq!(after.width, before.width);
        assert_eq!(after.height, before.height);

        surface.pointer_move(Point::new(-10_000.0, 0.0));
        assert_eq!(surface.block(id.as_str()).unwrap().position.scale, MIN_SCALE);
        surface.pointer_move(Point::new(10_000.0, 0.0));
        assert_eq!(surface.block(id.as_str()).unwrap().position.scale, MAX_SCALE);
    }

    #[test]
    fn test_undo_cancels_gesture() {
        let (mut surface, clock) = surface();
        let id = surface.add_block(BlockType::Title, None).unwrap();

        clock.advance(1_000);
        surface.pointer_down(id.as_str(), Point::default());
        surface.pointer_move(Point::new(30.0, 0.0));
        assert!(surface.undo());

        assert_eq!(surface.interaction(), &Interaction::Idle);
        assert!(!surface.pointer_move(Point::new(60.0, 0.0)));
        assert_eq!(surface.block(id.as_str()).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_undo_drops_selection_of_removed_block() {
        let (mut surface, clock) = surface();
        let id = surface.add_block(BlockType::Title, None).unwrap();
        clock.advance(1_000);
        let text = surface.add_block(BlockType::Text, None).unwrap();
        surface.select(Some(id.as_str()));

        surface.undo();
        assert_eq!(surface.selection(), Some(&id));
        surface.redo();

        surface.select(Some(text.as_str()));
        surface.undo();
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_duplicate_selects_copy() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Faq, Some(Point::new(10.0, 10.0))).unwrap();
        surface.add_block(BlockType::Text, None).unwrap();

        let copy = surface.duplicate_block(id.as_str()).unwrap().unwrap();

        assert_eq!(surface.selection(), Some(&copy));
        assert_eq!(surface.blocks()[1].id, copy);
        assert_eq!(surface.blocks()[1].position.x, 30.0);
        assert_eq!(surface.history().undo_label(), Some("Duplicate block"));
        assert_eq!(surface.duplicate_block("missing").unwrap(), None);
    }

    #[test]
    fn test_toggles_and_labels() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Title, None).unwrap();

        surface.toggle_visibility(id.as_str()).unwrap();
        assert!(surface.block(id.as_str()).unwrap().hidden);
        assert_eq!(surface.history().undo_label(), Some("Hide block"));

        surface.toggle_lock(id.as_str()).unwrap();
        assert_eq!(surface.history().undo_label(), Some("Lock block"));
        assert!(!surface.remove_block(id.as_str()).unwrap());

        surface.toggle_lock(id.as_str()).unwrap();
        assert_eq!(surface.history().undo_label(), Some("Unlock block"));
        assert!(surface.remove_block(id.as_str()).unwrap());
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_nudge_moves_by_step() {
        let (mut surface, _) = surface();
        let id = surface.add_block(BlockType::Title, Some(Point::new(10.0, 10.0))).unwrap();

        assert!(surface.nudge(id.as_str(), 1.0, -1.0).unwrap());
        let position = surface.block(id.as_str()).unwrap().position;
        assert_eq!((position.x, position.y), (11.0, 9.0));
        assert!(!surface.nudge("missing", 1.0, 0.0).unwrap());
    }

    #[test]
    fn test_dirty_tracking() {
        let (mut surface, _) = surface();
        assert!(!surface.is_dirty());

        surface.add_block(BlockType::Title, None).unwrap();
        assert!(surface.is_dirty());
        surface.mark_saved();
        assert!(!surface.is_dirty());

        let mut paywall = surface.paywall().clone();
        paywall.enabled = true;
        surface.set_paywall(paywall).unwrap();
        assert!(surface.is_dirty());
        assert_eq!(surface.history().len(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_document() {
        let (mut surface, _) = surface();
        let mut doc = CanvasDocument::default();
        doc.blocks.push(ContentBlock::with_defaults(BlockId::from("a"), BlockType::Title));
        doc.blocks.push(ContentBlock::with_defaults(BlockId::from("a"), BlockType::Text));

        assert!(matches!(surface.load(doc), Err(EditorError::Model(_))));
        assert!(surface.blocks().is_empty());
    }
}
