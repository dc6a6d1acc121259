//! # Editing Pipeline
//!
//! Couples an editing session with the renderer: Mutate → Render.
//!
//! The pipeline keeps the last rendered document and only re-renders when
//! the session's revision moved (an edit, undo, redo or load) or the
//! canvas settings or context changed.

use crate::{EditorError, EditorSurface, Mutation};
use canvas_evaluator::{ContextData, Evaluator, VirtualDomDocument};
use tracing::debug;

/// Manages the edit → render pipeline
pub struct Pipeline {
    surface: EditorSurface,
    evaluator: Evaluator,
    context: ContextData,
    last_render: Option<CachedRender>,
}

struct CachedRender {
    revision: u64,
    settings: (canvas_model::CanvasConfig, canvas_model::PaywallConfig),
    vdom: VirtualDomDocument,
}

/// Result of applying a mutation through the pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub changed: bool,
    pub revision: u64,
    pub vdom: VirtualDomDocument,
}

impl Pipeline {
    /// Pipeline rendering with the editor's placeholder context
    pub fn new(surface: EditorSurface) -> Self {
        Self::with_context(surface, ContextData::placeholder())
    }

    pub fn with_context(surface: EditorSurface, context: ContextData) -> Self {
        Self {
            surface,
            evaluator: Evaluator::new(),
            context,
            last_render: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self.last_render = None;
        self
    }

    /// Apply a mutation and render the result
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let changed = self.surface.apply(mutation)?;
        let vdom = self.render().clone();
        Ok(PipelineResult {
            changed,
            revision: self.surface.revision(),
            vdom,
        })
    }

    /// Current render, reusing the cached one when nothing changed
    pub fn render(&mut self) -> &VirtualDomDocument {
        let revision = self.surface.revision();
        let settings = (
            self.surface.canvas_config().clone(),
            self.surface.paywall().clone(),
        );

        let stale = match &self.last_render {
            Some(cached) => cached.revision != revision || cached.settings != settings,
            None => true,
        };

        if stale {
            debug!(revision, "Re-rendering canvas");
            self.last_render = None;
        }

        let cached = self.last_render.get_or_insert_with(|| CachedRender {
            revision,
            settings,
            vdom: self
                .evaluator
                .render_canvas(&self.surface.document(), &self.context),
        });
        &cached.vdom
    }

    /// Render from scratch, dropping the cache
    pub fn full_render(&mut self) -> &VirtualDomDocument {
        self.last_render = None;
        self.render()
    }

    pub fn set_context(&mut self, context: ContextData) {
        if context != self.context {
            self.context = context;
            self.last_render = None;
        }
    }

    pub fn context(&self) -> &ContextData {
        &self.context
    }

    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    /// Mutable access to the session; the cache is keyed on its revision
    pub fn surface_mut(&mut self) -> &mut EditorSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> EditorSurface {
        self.surface
    }

    /// Whether the next `render` call will reuse the cached document
    pub fn is_cached(&self) -> bool {
        match &self.last_render {
            Some(cached) => {
                cached.revision == self.surface.revision()
                    && cached.settings.0 == *self.surface.canvas_config()
                    && cached.settings.1 == *self.surface.paywall()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ManualClock;
    use canvas_model::{BlockId, BlockType};

    fn pipeline() -> (Pipeline, ManualClock) {
        let clock = ManualClock::new(0);
        let surface = EditorSurface::new("resource/pipeline").with_clock(clock.clone());
        (Pipeline::new(surface), clock)
    }

    #[test]
    fn test_render_is_cached_until_revision_changes() {
        let (mut pipeline, clock) = pipeline();
        pipeline.surface_mut().add_block(BlockType::Title, None).unwrap();

        pipeline.render();
        assert!(pipeline.is_cached());

        clock.advance(1_000);
        let id = pipeline.surface().blocks()[0].id.clone();
        pipeline.surface_mut().nudge(id.as_str(), 5.0, 0.0).unwrap();
        assert!(!pipeline.is_cached());

        pipeline.render();
        assert!(pipeline.is_cached());

        pipeline.surface_mut().undo();
        assert!(!pipeline.is_cached());
    }

    #[test]
    fn test_settings_change_invalidates_cache() {
        let (mut pipeline, _) = pipeline();
        pipeline.render();

        let mut paywall = pipeline.surface().paywall().clone();
        paywall.enabled = true;
        pipeline.surface_mut().set_paywall(paywall).unwrap();

        assert!(!pipeline.is_cached());
        let vdom = pipeline.render();
        assert!(vdom.nodes[0].find_by_class("paywall-gate").is_some());
    }

    #[test]
    fn test_apply_mutation_returns_render() {
        let (mut pipeline, _) = pipeline();
        let id = pipeline.surface_mut().add_block(BlockType::Text, None).unwrap();

        let result = pipeline
            .apply_mutation(Mutation::SetHidden {
                block_id: id.clone(),
                hidden: true,
            })
            .unwrap();

        assert!(result.changed);
        assert!(result.vdom.nodes[0].children().is_empty());

        let result = pipeline
            .apply_mutation(Mutation::RemoveBlock {
                block_id: BlockId::from("missing"),
            })
            .unwrap();
        assert!(!result.changed);
    }
}
