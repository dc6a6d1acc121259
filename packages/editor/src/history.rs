//! # Canvas History
//!
//! Owns the live block list and a bounded, linear undo/redo log of
//! whole-document snapshots.
//!
//! ## Design
//!
//! - Every transaction stores an owned copy of the full block list
//! - The live document is always `entries[current_index]`
//! - A new transaction discards everything after `current_index`
//! - When the log outgrows `max_entries`, the oldest entry is dropped
//! - Transactions with the same label arriving within the debounce window
//!   of the previous one overwrite the current entry instead of appending
//! - Inside a gesture (`begin_gesture` .. `end_gesture`) only the first
//!   transaction appends; the rest overwrite it however long the gesture takes
//! - A block that fails model validation is never recorded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = CanvasHistory::with_blocks(blocks);
//!
//! history.move_block("a1-1", 40.0, 40.0);
//! history.move_block("a1-1", 80.0, 40.0); // coalesced with the move above
//!
//! history.undo();
//! history.redo();
//! ```

use canvas_model::{BlockId, ContentBlock, Height};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Label of the entry created by `reset`
pub const INITIAL_STATE_LABEL: &str = "Initial state";
pub const MOVE_LABEL: &str = "Move block";
pub const RESIZE_LABEL: &str = "Resize block";

/// Source of transaction timestamps (epoch milliseconds)
pub trait Clock: fmt::Debug {
    fn now_ms(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    /// Upper bound on retained entries (at least 1)
    pub max_entries: usize,
    /// Same-label transactions closer together than this coalesce
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 50,
            debounce_ms: 300,
        }
    }
}

/// One snapshot in the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasHistoryEntry {
    pub blocks: Vec<ContentBlock>,
    /// Epoch milliseconds of the (last coalesced) transaction
    pub timestamp: u64,
    pub action: String,
}

/// Previous transaction, consulted for coalescing
#[derive(Debug, Clone)]
struct LastAction {
    label: String,
    at: u64,
}

#[derive(Debug)]
pub struct CanvasHistory {
    entries: Vec<CanvasHistoryEntry>,
    current_index: usize,
    config: HistoryConfig,
    clock: Box<dyn Clock>,
    last_action: Option<LastAction>,
    /// Open pointer gesture; `true` once it has recorded its entry
    gesture: Option<bool>,
    /// Bumped on every change of the live document
    revision: u64,
}

impl Default for CanvasHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasHistory {
    /// Empty log around an empty document
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current_index: 0,
            config: HistoryConfig::default(),
            clock: Box::new(SystemClock),
            last_action: None,
            gesture: None,
            revision: 0,
        }
    }

    /// Log with a single "Initial state" entry
    pub fn with_blocks(blocks: Vec<ContentBlock>) -> Self {
        let mut history = Self::new();
        history.reset(blocks);
        history
    }

    pub fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self.enforce_bound();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Set the live document verbatim, recording or coalescing an entry
    pub fn replace_all(&mut self, blocks: Vec<ContentBlock>, label: &str) {
        let now = self.clock.now_ms();
        self.revision += 1;

        let grouped = self.gesture == Some(true) && !self.entries.is_empty();
        if grouped || self.coalesces_with_previous(label, now) {
            let entry = &mut self.entries[self.current_index];
            entry.blocks = blocks;
            entry.timestamp = now;
            self.last_action = Some(LastAction {
                label: label.to_string(),
                at: now,
            });
            if self.gesture.is_some() {
                self.gesture = Some(true);
            }
            debug!(action = label, index = self.current_index, grouped, "Coalesced history entry");
            return;
        }

        if !self.entries.is_empty() {
            // redo branch becomes unreachable
            self.entries.truncate(self.current_index + 1);
        }

        self.entries.push(CanvasHistoryEntry {
            blocks,
            timestamp: now,
            action: label.to_string(),
        });
        self.current_index = self.entries.len() - 1;
        self.enforce_bound();

        self.last_action = Some(LastAction {
            label: label.to_string(),
            at: now,
        });
        if self.gesture.is_some() {
            self.gesture = Some(true);
        }

        debug!(
            action = label,
            index = self.current_index,
            entries = self.entries.len(),
            "Recorded history entry"
        );
    }

    /// Update one block through `updater`.
    ///
    /// Returns `false` without recording anything when `id` does not exist,
    /// the updater leaves the block unchanged, or the result is not a valid
    /// block.
    pub fn mutate_one<F>(&mut self, id: &str, updater: F, label: &str) -> bool
    where
        F: FnOnce(&mut ContentBlock),
    {
        let Some(index) = self.blocks().iter().position(|b| b.id.as_str() == id) else {
            debug!(block_id = id, action = label, "Mutation target not found");
            return false;
        };

        let mut blocks = self.blocks().to_vec();
        updater(&mut blocks[index]);
        if blocks[index] == self.blocks()[index] {
            return false;
        }
        if let Err(e) = blocks[index].validate() {
            warn!(block_id = id, action = label, error = %e, "Rejected invalid block update");
            return false;
        }

        self.replace_all(blocks, label);
        true
    }

    pub fn move_block(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.mutate_one(
            id,
            |block| {
                block.position.x = x;
                block.position.y = y;
            },
            MOVE_LABEL,
        )
    }

    pub fn resize(&mut self, id: &str, width: f64, height: Height) -> bool {
        self.mutate_one(
            id,
            |block| {
                block.position.width = width;
                block.position.height = height;
            },
            RESIZE_LABEL,
        )
    }

    /// Group every following transaction into one entry until `end_gesture`
    pub fn begin_gesture(&mut self) {
        self.gesture = Some(false);
    }

    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Step back one entry. No-op at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current_index -= 1;
        self.last_action = None;
        self.gesture = None;
        self.revision += 1;
        debug!(index = self.current_index, "Undo");
        true
    }

    /// Step forward one entry. No-op at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current_index += 1;
        self.last_action = None;
        self.gesture = None;
        self.revision += 1;
        debug!(index = self.current_index, "Redo");
        true
    }

    /// Discard the log and start over from `blocks`
    pub fn reset(&mut self, blocks: Vec<ContentBlock>) {
        let now = self.clock.now_ms();
        self.entries = vec![CanvasHistoryEntry {
            blocks,
            timestamp: now,
            action: INITIAL_STATE_LABEL.to_string(),
        }];
        self.current_index = 0;
        self.last_action = None;
        self.gesture = None;
        self.revision += 1;
    }

    fn coalesces_with_previous(&self, label: &str, now: u64) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        match &self.last_action {
            Some(last) => last.label == label && now.saturating_sub(last.at) < self.config.debounce_ms,
            None => false,
        }
    }

    fn enforce_bound(&mut self) {
        let max = self.config.max_entries.max(1);
        while self.entries.len() > max {
            self.entries.remove(0);
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The live document
    pub fn blocks(&self) -> &[ContentBlock] {
        self.entries
            .get(self.current_index)
            .map(|e| e.blocks.as_slice())
            .unwrap_or(&[])
    }

    pub fn block(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks().iter().find(|b| &b.id == id)
    }

    pub fn entries(&self) -> &[CanvasHistoryEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    /// Label of the transaction `undo` would revert
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            Some(self.entries[self.current_index].action.as_str())
        } else {
            None
        }
    }

    /// Label of the transaction `redo` would reapply
    pub fn redo_label(&self) -> Option<&str> {
        if self.can_redo() {
            Some(self.entries[self.current_index + 1].action.as_str())
        } else {
            None
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_model::BlockType;

    fn text_block(id: &str) -> ContentBlock {
        ContentBlock::with_defaults(BlockId::from(id), BlockType::Text)
    }

    fn history_with_clock(blocks: Vec<ContentBlock>) -> (CanvasHistory, ManualClock) {
        let clock = ManualClock::new(1_000);
        let mut history = CanvasHistory::new().with_clock(clock.clone());
        history.reset(blocks);
        (history, clock)
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = CanvasHistory::new();
        assert!(history.is_empty());
        assert!(history.blocks().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_label(), None);
    }

    #[test]
    fn test_reset_starts_with_initial_state() {
        let (history, _) = history_with_clock(vec![text_block("a")]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), 0);
        assert_eq!(history.entries()[0].action, INITIAL_STATE_LABEL);
        assert_eq!(history.entries()[0].timestamp, 1_000);
    }

    #[test]
    fn test_same_label_within_window_coalesces() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);

        for i in 1..=5 {
            clock.advance(50);
            assert!(history.move_block("a", i as f64 * 10.0, 0.0));
        }

        assert_eq!(history.len(), 2);
        assert_eq!(history.blocks()[0].position.x, 50.0);
        assert_eq!(history.entries()[1].timestamp, 1_250);
    }

    #[test]
    fn test_window_is_measured_from_previous_transaction() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);

        history.move_block("a", 10.0, 0.0);
        clock.advance(299);
        history.move_block("a", 20.0, 0.0);
        clock.advance(300);
        history.move_block("a", 30.0, 0.0);

        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_different_labels_never_coalesce() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);

        history.move_block("a", 10.0, 0.0);
        history.resize("a", 500.0, Height::Px(100.0));

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo_label(), Some(RESIZE_LABEL));
    }

    #[test]
    fn test_undo_clears_coalescing_memory() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);

        history.move_block("a", 10.0, 0.0);
        history.move_block("a", 20.0, 0.0);
        assert!(history.undo());

        // same label, no time elapsed, but must not overwrite the restored entry
        history.move_block("a", 99.0, 0.0);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].blocks[0].position.x, 0.0);
        assert_eq!(history.blocks()[0].position.x, 99.0);
    }

    #[test]
    fn test_new_transaction_truncates_redo() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);

        for x in [10.0, 20.0, 30.0] {
            clock.advance(1_000);
            history.move_block("a", x, 0.0);
        }
        history.undo();
        history.undo();
        assert!(history.can_redo());

        clock.advance(1_000);
        history.resize("a", 300.0, Height::Auto);

        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_bounded_growth_evicts_oldest() {
        let clock = ManualClock::new(0);
        let mut history = CanvasHistory::new()
            .with_config(HistoryConfig {
                max_entries: 3,
                debounce_ms: 300,
            })
            .with_clock(clock.clone());
        history.reset(vec![text_block("a")]);

        for x in 1..=10 {
            clock.advance(1_000);
            history.move_block("a", x as f64, 0.0);
            assert!(history.len() <= 3);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), 2);
        assert_eq!(history.entries()[0].blocks[0].position.x, 8.0);
    }

    #[test]
    fn test_snapshots_are_isolated() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);
        clock.advance(1_000);
        history.move_block("a", 10.0, 0.0);

        let mut live = history.blocks().to_vec();
        live[0].position.x = 999.0;

        assert_eq!(history.entries()[1].blocks[0].position.x, 10.0);
        assert_eq!(history.entries()[0].blocks[0].position.x, 0.0);
    }

    #[test]
    fn test_referential_miss_is_noop() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);
        let revision = history.revision();

        assert!(!history.move_block("missing", 1.0, 1.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.revision(), revision);
    }

    #[test]
    fn test_unchanged_update_records_nothing() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);
        assert!(!history.move_block("a", 0.0, 0.0));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_out_of_range_navigation_is_noop() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.current_index(), 0);
    }

    #[test]
    fn test_revision_tracks_live_document() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);
        let start = history.revision();

        clock.advance(1_000);
        history.move_block("a", 5.0, 5.0);
        history.undo();
        history.redo();

        assert_eq!(history.revision(), start + 3);
    }

    #[test]
    fn test_first_transaction_on_empty_log() {
        let mut history = CanvasHistory::new().with_clock(ManualClock::new(0));
        history.replace_all(vec![text_block("a")], "Add block");

        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_invalid_resize_is_not_recorded() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);
        let revision = history.revision();

        assert!(!history.resize("a", 0.0, Height::Px(-5.0)));
        assert!(!history.resize("a", 300.0, Height::Px(0.0)));

        assert_eq!(history.len(), 1);
        assert_eq!(history.revision(), revision);
        assert!(history.blocks()[0].validate().is_ok());
    }

    #[test]
    fn test_updater_breaking_invariants_is_rejected() {
        let (mut history, _) = history_with_clock(vec![text_block("a")]);

        assert!(!history.mutate_one("a", |b| b.position.scale = 0.0, "Scale block"));
        assert!(!history.move_block("a", f64::NAN, 10.0));
        assert!(!history.move_block("a", 10.0, f64::INFINITY));

        assert_eq!(history.len(), 1);
        assert_eq!(history.blocks()[0].position.scale, 1.0);
        assert_eq!(history.blocks()[0].position.x, 0.0);
    }

    #[test]
    fn test_gesture_groups_slow_transactions() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);

        history.begin_gesture();
        for i in 1..=3 {
            clock.advance(400);
            assert!(history.move_block("a", i as f64 * 10.0, 0.0));
        }
        history.end_gesture();

        assert_eq!(history.len(), 2);
        assert_eq!(history.blocks()[0].position.x, 30.0);

        assert!(history.undo());
        assert_eq!(history.blocks()[0].position.x, 0.0);
    }

    #[test]
    fn test_separate_gestures_get_separate_entries() {
        let (mut history, clock) = history_with_clock(vec![text_block("a")]);

        history.begin_gesture();
        clock.advance(1_000);
        history.move_block("a", 10.0, 0.0);
        history.end_gesture();

        history.begin_gesture();
        clock.advance(1_000);
        history.move_block("a", 20.0, 0.0);
        history.end_gesture();

        assert_eq!(history.len(), 3);
        assert!(!history.in_gesture());
    }
}
