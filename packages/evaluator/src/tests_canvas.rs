// Whole-canvas rendering: layout, paint order, hidden blocks, paywall gate,
// scale handling and the publish round trip.

use crate::context::ContextData;
use crate::evaluator::Evaluator;
use crate::scaling::ScaleTransform;
use crate::vdom::VNode;
use canvas_model::{
    BlockId, BlockType, CanvasConfig, CanvasDocument, ContentBlock, Height, IdGenerator,
    PaywallConfig,
};

fn document() -> CanvasDocument {
    let mut ids = IdGenerator::new("resource/minibeasts");

    let mut title = ContentBlock::with_defaults(ids.new_id(), BlockType::Title);
    title.position.x = 40.0;
    title.position.y = 32.0;

    let mut text = ContentBlock::with_defaults(ids.new_id(), BlockType::Text);
    text.position.x = 40.0;
    text.position.y = 140.0;

    let mut cta = ContentBlock::with_defaults(ids.new_id(), BlockType::PurchaseCta);
    cta.position.x = 700.0;
    cta.position.y = 900.0;

    CanvasDocument::new(vec![title, text, cta], CanvasConfig::default(), PaywallConfig::default())
}

fn root(vdoc: &crate::vdom::VirtualDomDocument) -> &VNode {
    &vdoc.nodes[0]
}

#[test]
fn test_blocks_render_in_paint_order() {
    let doc = document();
    let vdoc = Evaluator::new().render_canvas(&doc, &ContextData::placeholder());

    let boxes = root(&vdoc).children();
    assert_eq!(boxes.len(), 3);
    for (i, (node, block)) in boxes.iter().zip(&doc.blocks).enumerate() {
        assert_eq!(node.attr("data-block-id"), Some(block.id.as_str()));
        assert_eq!(node.style("z-index"), Some((i + 1).to_string().as_str()));
        assert_eq!(node.style("position"), Some("absolute"));
    }

    let text_box = &boxes[1];
    assert_eq!(text_box.style("left"), Some("40px"));
    assert_eq!(text_box.style("top"), Some("140px"));
    assert_eq!(text_box.style("width"), Some("400px"));
    assert_eq!(text_box.style("height"), Some("auto"));
}

#[test]
fn test_canvas_grows_to_fit_content() {
    let doc = document();
    let vdoc = Evaluator::new().render_canvas(&doc, &ContextData::placeholder());

    // cta bottom: 900 + 160
    assert_eq!(root(&vdoc).style("min-height"), Some("1060px"));
    assert_eq!(root(&vdoc).style("width"), Some("1200px"));
    assert!(root(&vdoc).has_class("canvas--resource"));
}

#[test]
fn test_hidden_blocks_are_omitted() {
    let mut doc = document();
    doc.blocks[1].hidden = true;

    let evaluator = Evaluator::new();
    for ctx in [ContextData::placeholder(), ContextData::default()] {
        let vdoc = evaluator.render_canvas(&doc, &ctx);
        let ids: Vec<_> = root(&vdoc)
            .children()
            .iter()
            .filter_map(|n| n.attr("data-block-id"))
            .collect();
        assert_eq!(ids, vec![doc.blocks[0].id.as_str(), doc.blocks[2].id.as_str()]);
    }
}

#[test]
fn test_paywall_gate_shown_only_without_access() {
    let mut doc = document();
    doc.paywall = PaywallConfig {
        enabled: true,
        gate_y: 500.0,
        ..Default::default()
    };
    let evaluator = Evaluator::new();

    let locked = evaluator.render_canvas(&doc, &ContextData::placeholder());
    let gate = root(&locked).find_by_class("paywall-gate").unwrap();
    assert_eq!(gate.style("top"), Some("500px"));
    assert!(gate.text_content().contains("Unlock"));

    let mut ctx = ContextData::placeholder();
    ctx.has_access = true;
    let unlocked = evaluator.render_canvas(&doc, &ctx);
    assert!(root(&unlocked).find_by_class("paywall-gate").is_none());

    doc.paywall.enabled = false;
    let disabled = evaluator.render_canvas(&doc, &ContextData::placeholder());
    assert!(root(&disabled).find_by_class("paywall-gate").is_none());
}

#[test]
fn test_unit_scale_matches_untransformed_content() {
    let doc = document();
    let ctx = ContextData::placeholder();
    let evaluator = Evaluator::new();
    let block = &doc.blocks[1];
    assert_eq!(block.position.scale, 1.0);

    let boxed = evaluator.render_block_box(block, 0, &ctx);
    let content = evaluator.render_block(block, &ctx);

    assert_eq!(boxed.children(), &[content.clone()]);
    assert_eq!(ScaleTransform::new(1.0).apply(content.clone()), content);
    assert!(boxed.style("overflow").is_none());
}

#[test]
fn test_scaled_block_keeps_box_and_zooms_content() {
    let doc = document();
    let ctx = ContextData::placeholder();
    let mut block = doc.blocks[0].clone();
    block.position.scale = 0.5;

    let boxed = Evaluator::new().render_block_box(&block, 0, &ctx);

    assert_eq!(boxed.style("width"), Some("600px"));
    assert_eq!(boxed.style("height"), Some("80px"));
    assert_eq!(boxed.style("overflow"), Some("hidden"));

    let inner = &boxed.children()[0];
    assert!(inner.has_class("scale-inner"));
    assert_eq!(inner.style("width"), Some("200%"));
    assert_eq!(inner.style("transform"), Some("scale(0.5)"));
}

#[test]
fn test_publish_round_trip_preserves_structure() {
    let mut doc = document();
    doc.blocks[0].position.scale = 1.5;
    doc.blocks.push(ContentBlock::with_defaults(BlockId::from("grid"), BlockType::ImageGrid));
    let evaluator = Evaluator::new();

    let editor = evaluator.render_canvas(&doc, &ContextData::placeholder());

    let json = doc.to_json().unwrap();
    let restored = CanvasDocument::from_json(&json).unwrap();
    let mut ctx = ContextData::placeholder();
    ctx.resource_id = Some("res-1".to_string());
    ctx.resource.title = "Real title".to_string();
    let published = evaluator.render_canvas(&restored, &ctx);

    assert!(editor.same_shape(&published));
    assert_ne!(editor, published);
}

#[test]
fn test_auto_height_uses_estimate_for_canvas_size() {
    let mut block = ContentBlock::with_defaults(BlockId::from("t"), BlockType::Text);
    block.position.y = 2000.0;
    assert_eq!(block.position.height, Height::Auto);
    let doc = CanvasDocument::new(vec![block], CanvasConfig::default(), PaywallConfig::default());

    let vdoc = Evaluator::new().render_canvas(&doc, &ContextData::placeholder());

    assert_eq!(root(&vdoc).style("min-height"), Some("2120px"));
}

#[test]
fn test_base_styles_disable_inert_widgets() {
    let vdoc = Evaluator::new().render_canvas(&document(), &ContextData::placeholder());
    let rule = vdoc
        .styles
        .iter()
        .find(|r| r.selector.contains("data-interactive"))
        .unwrap();
    assert_eq!(rule.properties.get("pointer-events").map(String::as_str), Some("none"));
}
