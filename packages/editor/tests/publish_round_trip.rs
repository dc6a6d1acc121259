//! A canvas built in the editor, saved, reloaded and rendered for viewers
//! keeps the structure the editor showed.

use canvas_editor::{
    ContextProvider, EditorSurface, ManualClock, MemoryStore, Pipeline, Point,
    StaticContextProvider,
};
use canvas_evaluator::{ContextData, Evaluator, ResourceCard};
use canvas_model::{BlockType, CanvasDocument};
use serde_json::json;

fn published_context() -> ContextData {
    let mut ctx = ContextData::placeholder();
    ctx.resource_id = Some("res-9".to_string());
    ctx.resource.title = "Pond Dipping".to_string();
    ctx.resource.themes = vec!["Water".to_string()];
    ctx.creator.id = Some("creator-3".to_string());
    ctx.creator.display_name = "Sam".to_string();
    ctx.creator_resources = vec![ResourceCard::default(); 2];
    ctx.has_access = true;
    ctx
}

fn build_canvas() -> anyhow::Result<EditorSurface> {
    let clock = ManualClock::new(0);
    let mut surface = EditorSurface::new("res-9").with_clock(clock.clone());

    for (i, block_type) in surface.palette().into_iter().enumerate() {
        clock.advance(1_000);
        let id = surface.add_block(block_type, Some(Point::new(0.0, i as f64 * 200.0)))?;
        if i % 4 == 0 {
            surface.set_scale(id.as_str(), 0.75)?;
        }
    }

    let text = surface
        .blocks()
        .iter()
        .find(|b| b.block_type() == Some(BlockType::Text))
        .map(|b| b.id.clone())
        .ok_or_else(|| anyhow::anyhow!("no text block"))?;
    surface.update_data(text.as_str(), "text", json!({ "content": "Bring a net" }))?;
    Ok(surface)
}

#[test]
fn test_published_render_matches_editor_structure() -> anyhow::Result<()> {
    let mut surface = build_canvas()?;
    let mut store = MemoryStore::new();
    let evaluator = Evaluator::new();

    let editor_render = evaluator.render_canvas(&surface.document(), &ContextData::placeholder());
    surface.save(&mut store)?;

    let json = surface.document().to_json()?;
    let restored = CanvasDocument::from_json(&json)?;
    assert_eq!(restored, surface.document());

    let provider = StaticContextProvider::new().with_record("res-9", published_context());
    let published = evaluator.render_canvas(&restored, &provider.fetch("res-9")?);

    assert!(editor_render.same_shape(&published));
    assert_ne!(editor_render, published);
    Ok(())
}

#[test]
fn test_pipeline_render_matches_direct_render() -> anyhow::Result<()> {
    let surface = build_canvas()?;
    let document = surface.document();
    let mut pipeline = Pipeline::new(surface);

    let direct = Evaluator::new().render_canvas(&document, &ContextData::placeholder());
    assert_eq!(pipeline.render(), &direct);

    pipeline.set_context(published_context());
    assert!(pipeline.render().same_shape(&direct));
    Ok(())
}

#[test]
fn test_profile_canvas_round_trip() -> anyhow::Result<()> {
    let mut surface = EditorSurface::new("creator-3");
    let mut config = surface.canvas_config().clone();
    config.kind = canvas_model::CanvasKind::Profile;
    surface.set_canvas_config(config)?;

    surface.add_block(BlockType::ProfileHero, None)?;
    surface.add_block(BlockType::CreatorResourceGrid, Some(Point::new(0.0, 340.0)))?;
    surface.add_block(BlockType::SocialWidget, Some(Point::new(0.0, 900.0)))?;

    let restored = CanvasDocument::from_json(&surface.document().to_json()?)?;
    let evaluator = Evaluator::new();

    let editor = evaluator.render_canvas(&surface.document(), &ContextData::placeholder());
    let published = evaluator.render_canvas(&restored, &published_context());
    assert!(editor.same_shape(&published));
    Ok(())
}
