// Per-block rendering: exhaustiveness, editor/published equivalence,
// inert widgets, legacy and unknown blocks.

use crate::context::{AgeRange, ContextData, Price, Rating, ResourceCard};
use crate::evaluator::Evaluator;
use crate::vdom::VNode;
use canvas_model::{BlockData, BlockId, BlockType, ContentBlock, ListData, TitleData};

fn published_context() -> ContextData {
    let mut ctx = ContextData::placeholder();
    ctx.resource_id = Some("res-42".to_string());
    ctx.resource.title = "Minibeast Safari".to_string();
    ctx.resource.age_range = AgeRange { min: 5, max: 8 };
    ctx.resource.duration_minutes = 90;
    ctx.resource.themes = vec![
        "Nature".to_string(),
        "Science".to_string(),
        "Outdoors".to_string(),
        "Insects".to_string(),
    ];
    ctx.resource.rating = Rating { average: 4.2, count: 31 };
    ctx.resource.price = Price { amount_cents: 0, currency: "USD".to_string() };
    ctx.creator.id = Some("creator-7".to_string());
    ctx.creator.display_name = "Ms. Rivera".to_string();
    ctx.creator.follower_count = 1200;
    // fewer resources than the placeholder supplies
    ctx.creator_resources = vec![ResourceCard {
        id: Some("res-42".to_string()),
        title: "Minibeast Safari".to_string(),
        thumbnail_url: "https://cdn.example/minibeast.png".to_string(),
        age_range: AgeRange { min: 5, max: 8 },
        price: Price { amount_cents: 350, currency: "EUR".to_string() },
        rating: Rating { average: 4.2, count: 31 },
    }];
    ctx.has_access = true;
    ctx
}

fn block(block_type: BlockType) -> ContentBlock {
    ContentBlock::with_defaults(BlockId::from(format!("b-{}", block_type)), block_type)
}

fn widgets(node: &VNode) -> Vec<&VNode> {
    let mut out = Vec::new();
    node.find_all_by_class("widget", &mut out);
    out
}

#[test]
fn test_every_type_renders_real_output() {
    let evaluator = Evaluator::new();
    let ctx = ContextData::placeholder();

    for block_type in BlockType::ALL {
        let node = evaluator.render_block(&block(block_type), &ctx);
        assert!(
            node.find_by_class("block-placeholder").is_none(),
            "{} rendered the unknown-type placeholder",
            block_type
        );
        assert!(node.tag().is_some(), "{} did not render an element", block_type);
    }
}

#[test]
fn test_unrecognized_type_renders_inert_placeholder() {
    let json = serde_json::json!({
        "id": "mystery",
        "type": "countdown-timer",
        "position": { "x": 0, "y": 0, "width": 200, "height": 50 },
        "data": { "until": "2031-01-01" }
    });
    let block: ContentBlock = serde_json::from_value(json).unwrap();

    let node = Evaluator::new().render_block(&block, &ContextData::placeholder());

    assert!(node.has_class("block-placeholder"));
    assert_eq!(node.attr("data-inert"), Some("true"));
    assert!(node.text_content().contains("countdown-timer"));
}

#[test]
fn test_legacy_paywall_renders_obsolete_notice() {
    let json = serde_json::json!({
        "id": "old",
        "type": "paywall",
        "position": { "x": 0, "y": 0, "width": 200, "height": 50 },
        "data": { "price": 500 }
    });
    let block: ContentBlock = serde_json::from_value(json).unwrap();

    let node = Evaluator::new().render_block(&block, &published_context());

    assert!(node.has_class("block-obsolete"));
    assert!(node.text_content().contains("Remove this block"));
    assert!(widgets(&node).is_empty());
}

#[test]
fn test_editor_and_published_renders_share_structure() {
    let evaluator = Evaluator::new();
    let editor_ctx = ContextData::placeholder();
    let published_ctx = published_context();

    for block_type in BlockType::ALL {
        let block = block(block_type);
        let editor = evaluator.render_block(&block, &editor_ctx);
        let published = evaluator.render_block(&block, &published_ctx);

        assert!(
            editor.same_shape(&published),
            "{} differs between editor and published mode:\n{:#?}\nvs\n{:#?}",
            block_type,
            editor,
            published
        );
    }
}

#[test]
fn test_published_render_substitutes_values() {
    let evaluator = Evaluator::new();
    let title = block(BlockType::Title);

    let editor = evaluator.render_block(&title, &ContextData::placeholder());
    let published = evaluator.render_block(&title, &published_context());

    assert!(editor.text_content().contains("Your resource title"));
    assert!(published.text_content().contains("Minibeast Safari"));
    assert!(published.text_content().contains("Ages 5-8"));
    assert!(published.text_content().contains("1 h 30 min"));
    assert!(published.text_content().contains("Nature · Science · Outdoors · Insects"));
}

#[test]
fn test_title_without_resource_title_uses_block_text() {
    let mut title = block(BlockType::Title);
    title.data = BlockData::Title(TitleData {
        text: "Welcome!".to_string(),
        level: 2,
        use_resource_title: false,
        show_age_range: false,
        show_duration: false,
        show_themes: false,
        ..Default::default()
    });

    let node = Evaluator::new().render_block(&title, &published_context());

    assert_eq!(node.children().len(), 1);
    assert_eq!(node.children()[0].tag(), Some("h2"));
    assert_eq!(node.text_content(), "Welcome!");
}

#[test]
fn test_widgets_are_inert_without_resource_id() {
    let evaluator = Evaluator::new();
    let cta = block(BlockType::PurchaseCta);

    let editor = evaluator.render_block(&cta, &ContextData::placeholder());
    let editor_widgets = widgets(&editor);
    assert!(!editor_widgets.is_empty());
    for widget in &editor_widgets {
        assert_eq!(widget.attr("data-interactive"), Some("false"));
        assert_eq!(widget.attr("aria-disabled"), Some("true"));
    }

    let published = evaluator.render_block(&cta, &published_context());
    let published_widgets = widgets(&published);
    assert_eq!(published_widgets.len(), editor_widgets.len());
    for widget in &published_widgets {
        assert_eq!(widget.attr("data-interactive"), Some("true"));
        assert_eq!(widget.attr("data-target"), Some("res-42"));
    }
}

#[test]
fn test_follow_button_keyed_on_creator_id() {
    let evaluator = Evaluator::new();
    let profile = block(BlockType::CreatorProfile);

    let mut ctx = published_context();
    ctx.creator.id = None;
    let node = evaluator.render_block(&profile, &ctx);

    let follow = node.find_by_class("widget-follow").unwrap();
    assert_eq!(follow.attr("data-interactive"), Some("false"));

    let node = evaluator.render_block(&profile, &published_context());
    let follow = node.find_by_class("widget-follow").unwrap();
    assert_eq!(follow.attr("data-interactive"), Some("true"));
    assert_eq!(follow.attr("data-target"), Some("creator-7"));
}

#[test]
fn test_resource_grid_renders_fixed_slots() {
    let evaluator = Evaluator::new();
    let grid = block(BlockType::CreatorResourceGrid);

    let node = evaluator.render_block(&grid, &published_context());
    let mut cards = Vec::new();
    node.find_all_by_class("resource-card", &mut cards);
    assert_eq!(cards.len(), 6);

    let mut empty = Vec::new();
    node.find_all_by_class("resource-card--empty", &mut empty);
    assert_eq!(empty.len(), 5);
    assert_eq!(cards[0].attr("data-resource-id"), Some("res-42"));
}

#[test]
fn test_list_structure_follows_block_data() {
    let mut list = block(BlockType::List);
    list.data = BlockData::List(ListData {
        title: String::new(),
        items: vec!["Glue".to_string(), "Tape".to_string()],
        bullet_style: canvas_model::BulletStyle::Number,
        is_checklist: true,
        columns: 2,
        ..Default::default()
    });

    let node = Evaluator::new().render_block(&list, &ContextData::placeholder());

    // no title heading, just the list
    assert_eq!(node.children().len(), 1);
    let ol = &node.children()[0];
    assert_eq!(ol.tag(), Some("ol"));
    assert_eq!(ol.style("column-count"), Some("2"));
    assert_eq!(ol.children().len(), 2);

    let mut boxes = Vec::new();
    node.find_all_by_class("check-box", &mut boxes);
    assert_eq!(boxes.len(), 2);
}

#[test]
fn test_rendering_does_not_touch_the_block() {
    let original = block(BlockType::Faq);
    let copy = original.clone();

    let _ = Evaluator::new().render_block(&copy, &published_context());

    assert_eq!(copy, original);
}

#[test]
fn test_rendering_is_deterministic() {
    let evaluator = Evaluator::new();
    let ctx = published_context();

    for block_type in BlockType::ALL {
        let block = block(block_type);
        assert_eq!(evaluator.render_block(&block, &ctx), evaluator.render_block(&block, &ctx));
    }
}

#[test]
fn test_asset_resolver_is_consulted() {
    let evaluator = Evaluator::with_asset_resolver(crate::assets::CdnAssets::new("https://cdn.test"));
    let mut image = block(BlockType::Image);
    image.data = BlockData::Image(canvas_model::ImageData {
        url: "uploads/frog.png".to_string(),
        alt: "A frog".to_string(),
        ..Default::default()
    });

    let node = evaluator.render_block(&image, &ContextData::placeholder());
    let img = &node.children()[0];

    assert_eq!(img.attr("src"), Some("https://cdn.test/uploads/frog.png"));
    assert_eq!(img.attr("alt"), Some("A frog"));
}
