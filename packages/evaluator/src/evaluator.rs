//! # Dual Renderer
//!
//! Pure `(block, context) -> VNode`. The editor preview and the published
//! page call the same functions; only the [`ContextData`] differs.
//!
//! Markup structure is a function of the block alone. Context values are
//! substituted into text and attribute values but never decide which
//! elements or attributes exist. Lists driven by context (creator
//! resources) render a fixed number of slots taken from block data.

use crate::assets::{AssetResolver, PassthroughAssets};
use crate::context::{duration_label, ContextData, ResourceCard};
use crate::scaling::ScaleTransform;
use crate::utils::{block_style_css, format_number, px};
use crate::vdom::{VNode, VirtualDomDocument};
use crate::widgets::{favorite_button, follow_button, rating_widget, share_button};
use canvas_model::{
    ActivityCardCarouselData, Alignment, BlockData, BulletStyle, CanvasDocument, ContentBlock,
    CreatorFeaturedResourceData, CreatorProfileData, CreatorResourceGridData, DownloadData,
    FaqData, Height, ImageCarouselData, ImageData, ImageGridData, LinkedListData, ListData,
    MaterialListData, ProfileHeroData, PurchaseCtaData, SeparatorData, SocialWidgetData,
    TextData, TitleData, VideoCarouselData, VideoData,
};
use tracing::{debug, info, instrument, warn};

/// Height assumed for `auto` boxes when sizing the canvas
pub const AUTO_HEIGHT_ESTIMATE: f64 = 120.0;

pub struct Evaluator {
    assets: Box<dyn AssetResolver>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            assets: Box::new(PassthroughAssets),
        }
    }

    pub fn with_asset_resolver(assets: impl AssetResolver + 'static) -> Self {
        Self {
            assets: Box::new(assets),
        }
    }

    fn asset(&self, url: &str) -> String {
        self.assets.resolve(url)
    }

    /// Render a whole canvas: root, block boxes in paint order, paywall gate
    #[instrument(skip_all, fields(kind = ?doc.config.kind, blocks = doc.blocks.len()))]
    pub fn render_canvas(&self, doc: &CanvasDocument, ctx: &ContextData) -> VirtualDomDocument {
        let config = &doc.config;
        let visible: Vec<&ContentBlock> = doc.blocks.iter().filter(|b| !b.hidden).collect();

        let content_bottom = visible
            .iter()
            .map(|b| {
                let height = b.position.height.px().unwrap_or(AUTO_HEIGHT_ESTIMATE);
                b.position.y + height
            })
            .fold(0.0_f64, f64::max);
        let height = config.min_height.max(content_bottom);

        let kind = match config.kind {
            canvas_model::CanvasKind::Resource => "resource",
            canvas_model::CanvasKind::Profile => "profile",
        };

        let mut root = VNode::element("div")
            .with_class(format!("canvas canvas--{}", kind))
            .with_style("position", "relative")
            .with_style("width", px(config.width))
            .with_style("min-height", px(height))
            .with_styles(crate::utils::background_css(&config.background));

        for (index, block) in doc.blocks.iter().enumerate() {
            if block.hidden {
                debug!(block_id = %block.id, "Skipping hidden block");
                continue;
            }
            root = root.with_child(self.render_block_box(block, index, ctx));
        }

        if doc.paywall.enabled && !ctx.has_access {
            debug!(gate_y = doc.paywall.gate_y, "Rendering paywall gate");
            root = root.with_child(self.render_paywall_gate(doc, ctx));
        }

        let mut vdoc = VirtualDomDocument::new();
        add_base_styles(&mut vdoc);
        vdoc.add_node(root);

        info!(rendered = visible.len(), "Canvas render complete");
        vdoc
    }

    /// Absolutely positioned box for one block, with its scale applied
    pub fn render_block_box(&self, block: &ContentBlock, index: usize, ctx: &ContextData) -> VNode {
        let position = &block.position;
        let transform = ScaleTransform::new(position.scale);
        let type_name = block.data.type_name();

        let height = match position.height {
            Height::Auto => "auto".to_string(),
            Height::Px(h) => px(h),
        };

        VNode::element("div")
            .with_class(format!("canvas-block canvas-block--{}", type_name))
            .with_key(block.id.as_str())
            .with_attr("data-block-id", block.id.as_str())
            .with_attr("data-block-type", type_name)
            .with_style("position", "absolute")
            .with_style("left", px(position.x))
            .with_style("top", px(position.y))
            .with_style("width", px(position.width))
            .with_style("height", height)
            .with_style("z-index", (index + 1).to_string())
            .with_styles(block_style_css(&block.style))
            .with_styles(transform.outer_styles())
            .with_child(transform.apply(self.render_block(block, ctx)))
    }

    /// Render a block's content. Never fails; unknown types render inert.
    pub fn render_block(&self, block: &ContentBlock, ctx: &ContextData) -> VNode {
        debug!(block_id = %block.id, block_type = block.data.type_name(), "Rendering block");

        match &block.data {
            BlockData::Title(data) => self.render_title(data, ctx),
            BlockData::Text(data) => self.render_text(data),
            BlockData::Image(data) => self.render_image(data),
            BlockData::ImageCarousel(data) => self.render_image_carousel(data),
            BlockData::VideoCarousel(data) => self.render_video_carousel(data),
            BlockData::Video(data) => self.render_video(data),
            BlockData::List(data) => self.render_list(data),
            BlockData::LinkedList(data) => self.render_linked_list(data),
            BlockData::PurchaseCta(data) => self.render_purchase_cta(data, ctx),
            BlockData::Separator(data) => self.render_separator(data),
            BlockData::CreatorProfile(data) => self.render_creator_profile(data, ctx),
            BlockData::ImageGrid(data) => self.render_image_grid(data),
            BlockData::Faq(data) => self.render_faq(data),
            BlockData::MaterialList(data) => self.render_material_list(data),
            BlockData::Download(data) => self.render_download(data, ctx),
            BlockData::PaywallOverlay(_) => {
                warn!(block_id = %block.id, "Rendering obsolete paywall block");
                render_obsolete_notice()
            }
            BlockData::ActivityCardCarousel(data) => self.render_activity_cards(data, ctx),
            BlockData::ProfileHero(data) => self.render_profile_hero(data, ctx),
            BlockData::CreatorResourceGrid(data) => self.render_resource_grid(data, ctx),
            BlockData::CreatorFeaturedResource(data) => self.render_featured_resource(data, ctx),
            BlockData::SocialWidget(data) => self.render_social_widget(data, ctx),
            BlockData::Unrecognized { block_type, .. } => {
                warn!(block_id = %block.id, block_type = %block_type, "Rendering placeholder for unrecognized block");
                render_unrecognized(block_type)
            }
        }
    }

    // ------------------------------------------------------------------
    // Text blocks
    // ------------------------------------------------------------------

    fn render_title(&self, data: &TitleData, ctx: &ContextData) -> VNode {
        let text = if data.use_resource_title {
            ctx.resource.title.as_str()
        } else {
            data.text.as_str()
        };

        let heading = VNode::element(format!("h{}", data.level))
            .with_class("title-text")
            .with_styles(typography(
                data.font_size,
                data.alignment,
                data.font_family.as_deref(),
                data.text_color.as_deref(),
            ))
            .with_child(VNode::text(text));

        let show_meta = data.show_age_range || data.show_duration || data.show_themes;
        let meta = VNode::element("div")
            .with_class("title-meta")
            .with_child_if(data.show_age_range, || {
                meta_chip("meta-age", ctx.resource.age_range.label())
            })
            .with_child_if(data.show_duration, || {
                meta_chip("meta-duration", duration_label(ctx.resource.duration_minutes))
            })
            .with_child_if(data.show_themes, || {
                meta_chip("meta-themes", ctx.resource.themes.join(" · "))
            });

        VNode::element("div")
            .with_class("block-title")
            .with_child(heading)
            .with_child_if(show_meta, || meta)
    }

    fn render_text(&self, data: &TextData) -> VNode {
        let paragraphs = data
            .content
            .split('\n')
            .map(|line| VNode::element("p").with_child(VNode::text(line)));

        VNode::element("div")
            .with_class("block-text")
            .with_styles(typography(
                data.font_size,
                data.alignment,
                data.font_family.as_deref(),
                data.text_color.as_deref(),
            ))
            .with_style("line-height", format_number(data.line_height))
            .with_children(paragraphs)
    }

    fn render_list(&self, data: &ListData) -> VNode {
        let (tag, bullet) = match data.bullet_style {
            BulletStyle::Number => ("ol", "number"),
            BulletStyle::Disc => ("ul", "disc"),
            BulletStyle::Check => ("ul", "check"),
            BulletStyle::Star => ("ul", "star"),
            BulletStyle::None => ("ul", "none"),
        };

        let items = data.items.iter().map(|item| {
            VNode::element("li")
                .with_class("list-item")
                .with_child_if(data.is_checklist, || {
                    VNode::element("span")
                        .with_class("check-box")
                        .with_attr("aria-hidden", "true")
                })
                .with_child(VNode::text(item.as_str()))
        });

        VNode::element("div")
            .with_class("block-list")
            .with_styles(typography(
                data.font_size,
                data.alignment,
                data.font_family.as_deref(),
                data.text_color.as_deref(),
            ))
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_child(
                VNode::element(tag)
                    .with_class(format!("list list--{}", bullet))
                    .with_style("column-count", data.columns.to_string())
                    .with_children(items),
            )
    }

    fn render_linked_list(&self, data: &LinkedListData) -> VNode {
        let links = data.links.iter().map(|link| {
            VNode::element("li").with_child(
                VNode::element("a")
                    .with_class("linked-item")
                    .with_attr("href", link.url.as_str())
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noopener noreferrer")
                    .with_child_if(data.show_icons, || {
                        VNode::element("span").with_class("icon icon-link")
                    })
                    .with_child(VNode::text(link.label.as_str())),
            )
        });

        let mut block = VNode::element("div").with_class("block-linked-list");
        if let Some(color) = &data.text_color {
            block = block.with_style("color", color.as_str());
        }
        block
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_child(VNode::element("ul").with_class("links").with_children(links))
    }

    fn render_separator(&self, data: &SeparatorData) -> VNode {
        VNode::element("hr")
            .with_class("block-separator")
            .with_style("border", "none")
            .with_style(
                "border-top",
                format!("{} {} {}", px(data.thickness), data.line_style.as_css(), data.color),
            )
            .with_style("margin", format!("{} 0", px(data.spacing)))
    }

    fn render_faq(&self, data: &FaqData) -> VNode {
        let items = data.items.iter().enumerate().map(|(i, item)| {
            let mut details = VNode::element("details").with_class("faq-item");
            if data.expand_first && i == 0 {
                details = details.with_attr("open", "");
            }
            details
                .with_child(
                    VNode::element("summary")
                        .with_class("faq-question")
                        .with_child(VNode::text(item.question.as_str())),
                )
                .with_child(
                    VNode::element("div")
                        .with_class("faq-answer")
                        .with_child(VNode::text(item.answer.as_str())),
                )
        });

        VNode::element("div")
            .with_class("block-faq")
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_children(items)
    }

    fn render_material_list(&self, data: &MaterialListData) -> VNode {
        let items = data.materials.iter().map(|material| {
            let quantity = material.quantity.as_deref().filter(|_| data.show_quantities);
            VNode::element("li")
                .with_class("material")
                .with_child(
                    VNode::element("span")
                        .with_class("material-name")
                        .with_child(VNode::text(material.name.as_str())),
                )
                .with_child_if(quantity.is_some(), || {
                    VNode::element("span")
                        .with_class("material-quantity")
                        .with_child(VNode::text(quantity.unwrap_or_default()))
                })
                .with_child_if(material.optional, || {
                    VNode::element("span")
                        .with_class("badge badge--optional")
                        .with_child(VNode::text("optional"))
                })
        });

        VNode::element("div")
            .with_class("block-material-list")
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_child(VNode::element("ul").with_class("materials").with_children(items))
    }

    // ------------------------------------------------------------------
    // Media blocks
    // ------------------------------------------------------------------

    fn image(&self, url: &str, alt: &str) -> VNode {
        VNode::element("img")
            .with_attr("src", self.asset(url))
            .with_attr("alt", alt)
            .with_attr("loading", "lazy")
    }

    fn render_image(&self, data: &ImageData) -> VNode {
        if data.url.is_empty() {
            return VNode::element("div")
                .with_class("block-image block-image--empty")
                .with_child(VNode::text("Add an image"));
        }

        VNode::element("div").with_class("block-image").with_child(
            self.image(&data.url, &data.alt)
                .with_style("width", "100%")
                .with_style("height", "100%")
                .with_style("object-fit", data.object_fit.as_css())
                .with_style("border-radius", px(data.border_radius)),
        )
    }

    fn render_image_carousel(&self, data: &ImageCarouselData) -> VNode {
        let slides = data.images.iter().map(|image| {
            VNode::element("figure")
                .with_class("carousel-slide")
                .with_child(self.image(&image.url, &image.alt))
                .with_child_if(image.caption.is_some(), || {
                    VNode::element("figcaption")
                        .with_child(VNode::text(image.caption.as_deref().unwrap_or_default()))
                })
        });

        let dots = (0..data.images.len()).map(|i| {
            VNode::element("button")
                .with_class("carousel-dot")
                .with_attr("type", "button")
                .with_attr("data-slide", i.to_string())
        });

        VNode::element("div")
            .with_class("block-image-carousel carousel")
            .with_attr("data-autoplay", data.autoplay.to_string())
            .with_attr("data-interval", data.interval_ms.to_string())
            .with_child(VNode::element("div").with_class("carousel-track").with_children(slides))
            .with_child_if(data.show_dots, || {
                VNode::element("div").with_class("carousel-dots").with_children(dots)
            })
    }

    fn render_video_carousel(&self, data: &VideoCarouselData) -> VNode {
        let slides = data.videos.iter().map(|video| {
            let mut player = VNode::element("video")
                .with_attr("src", self.asset(&video.url))
                .with_attr("controls", "")
                .with_attr("preload", "metadata");
            if let Some(thumbnail) = &video.thumbnail_url {
                player = player.with_attr("poster", self.asset(thumbnail));
            }
            VNode::element("div")
                .with_class("carousel-slide")
                .with_child(player)
                .with_child_if(!video.title.is_empty(), || {
                    VNode::element("p")
                        .with_class("video-title")
                        .with_child(VNode::text(video.title.as_str()))
                })
        });

        let arrow = |direction: &str| {
            VNode::element("button")
                .with_class(format!("carousel-arrow carousel-arrow--{}", direction))
                .with_attr("type", "button")
                .with_attr("data-direction", direction)
        };

        VNode::element("div")
            .with_class("block-video-carousel carousel")
            .with_child_if(data.show_arrows, || arrow("prev"))
            .with_child(VNode::element("div").with_class("carousel-track").with_children(slides))
            .with_child_if(data.show_arrows, || arrow("next"))
    }

    fn render_video(&self, data: &VideoData) -> VNode {
        if data.url.is_empty() {
            return VNode::element("div")
                .with_class("block-video block-video--empty")
                .with_child(VNode::text("Add a video"));
        }

        let mut player = VNode::element("video")
            .with_attr("src", self.asset(&data.url))
            .with_attr("playsinline", "")
            .with_style("width", "100%")
            .with_style("height", "100%");
        if let Some(poster) = &data.poster_url {
            player = player.with_attr("poster", self.asset(poster));
        }
        for (flag, enabled) in [
            ("autoplay", data.autoplay),
            ("muted", data.muted),
            ("loop", data.looped),
            ("controls", data.controls),
        ] {
            if enabled {
                player = player.with_attr(flag, "");
            }
        }

        VNode::element("div").with_class("block-video").with_child(player)
    }

    fn render_image_grid(&self, data: &ImageGridData) -> VNode {
        let cells = data.images.iter().map(|image| {
            VNode::element("div")
                .with_class("grid-cell")
                .with_child(self.image(&image.url, &image.alt))
        });

        VNode::element("div")
            .with_class("block-image-grid")
            .with_style("display", "grid")
            .with_style("grid-template-columns", format!("repeat({}, 1fr)", data.columns))
            .with_style("gap", px(data.gap))
            .with_children(cells)
    }

    fn render_activity_cards(&self, data: &ActivityCardCarouselData, ctx: &ContextData) -> VNode {
        let cards = data.cards.iter().map(|card| {
            VNode::element("article")
                .with_class("activity-card")
                .with_child_if(card.image_url.is_some(), || {
                    self.image(card.image_url.as_deref().unwrap_or_default(), &card.title)
                })
                .with_child(heading("h4", &card.title))
                .with_child_if(!card.description.is_empty(), || {
                    VNode::element("p").with_child(VNode::text(card.description.as_str()))
                })
                .with_child_if(card.duration_minutes.is_some(), || {
                    meta_chip("meta-duration", duration_label(card.duration_minutes.unwrap_or_default()))
                })
        });

        let meta = VNode::element("div")
            .with_class("activity-meta")
            .with_child(meta_chip("meta-age", ctx.resource.age_range.label()))
            .with_child(meta_chip("meta-duration", duration_label(ctx.resource.duration_minutes)));

        VNode::element("div")
            .with_class("block-activity-cards carousel")
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_child_if(data.show_resource_meta, || meta)
            .with_child(
                VNode::element("div")
                    .with_class("carousel-track")
                    .with_style(
                        "grid-auto-columns",
                        format!("calc(100% / {})", data.cards_per_view),
                    )
                    .with_children(cards),
            )
    }

    // ------------------------------------------------------------------
    // Commerce blocks
    // ------------------------------------------------------------------

    fn render_purchase_cta(&self, data: &PurchaseCtaData, ctx: &ContextData) -> VNode {
        let target = ctx.resource_id.as_deref();
        let interactive = target.is_some();

        let mut buy = VNode::element("button")
            .with_class("widget cta-button")
            .with_attr("type", "button")
            .with_attr("data-action", "purchase")
            .with_attr("data-target", target.unwrap_or_default())
            .with_attr("data-interactive", interactive.to_string())
            .with_attr("aria-disabled", (!interactive).to_string());
        if let Some(accent) = &data.accent_color {
            buy = buy.with_style("background", accent.as_str());
        }

        VNode::element("div")
            .with_class("block-purchase-cta")
            .with_child_if(data.show_price, || price_tag(&ctx.resource.price.label()))
            .with_child_if(data.show_rating, || rating_widget(&ctx.resource.rating, target))
            .with_child(buy.with_child(VNode::text(data.button_label.as_str())))
            .with_child(
                VNode::element("div")
                    .with_class("cta-actions")
                    .with_child_if(data.show_favorite, || favorite_button(target))
                    .with_child_if(data.show_share, || share_button(target)),
            )
    }

    fn render_download(&self, data: &DownloadData, ctx: &ContextData) -> VNode {
        let locked = data.requires_purchase && !ctx.has_access;
        let href = if locked || ctx.resource_id.is_none() {
            String::new()
        } else {
            self.asset(&data.file_url)
        };

        VNode::element("div")
            .with_class("block-download")
            .with_child(
                VNode::element("span")
                    .with_class("icon icon-file")
                    .with_attr("aria-hidden", "true"),
            )
            .with_child(
                VNode::element("div")
                    .with_class("download-info")
                    .with_child(
                        VNode::element("span")
                            .with_class("download-name")
                            .with_child(VNode::text(data.file_name.as_str())),
                    )
                    .with_child_if(data.file_size_bytes.is_some(), || {
                        VNode::element("span")
                            .with_class("download-size")
                            .with_child(VNode::text(file_size_label(
                                data.file_size_bytes.unwrap_or_default(),
                            )))
                    }),
            )
            .with_child(
                VNode::element("a")
                    .with_class("widget download-button")
                    .with_attr("href", href)
                    .with_attr("download", data.file_name.as_str())
                    .with_attr("data-locked", locked.to_string())
                    .with_attr("data-interactive", ctx.resource_id.is_some().to_string())
                    .with_child(VNode::text(data.label.as_str())),
            )
    }

    // ------------------------------------------------------------------
    // Creator blocks
    // ------------------------------------------------------------------

    fn avatar(&self, ctx: &ContextData) -> VNode {
        self.image(&ctx.creator.avatar_url, &ctx.creator.display_name)
            .with_class("avatar")
    }

    fn creator_stats(&self, ctx: &ContextData) -> VNode {
        let creator = &ctx.creator;
        VNode::element("ul")
            .with_class("creator-stats")
            .with_child(stat("followers", creator.follower_count.to_string()))
            .with_child(stat("resources", creator.resource_count.to_string()))
            .with_child(stat("rating", format!("{:.1}", creator.rating.average)))
    }

    fn render_creator_profile(&self, data: &CreatorProfileData, ctx: &ContextData) -> VNode {
        let creator = &ctx.creator;
        VNode::element("div")
            .with_class(format!("block-creator-profile layout--{}", data.layout.as_str()))
            .with_child_if(data.show_avatar, || self.avatar(ctx))
            .with_child(
                VNode::element("div")
                    .with_class("creator-info")
                    .with_child(heading("h3", &creator.display_name))
                    .with_child_if(data.show_bio, || {
                        VNode::element("p")
                            .with_class("creator-bio")
                            .with_child(VNode::text(creator.bio.as_str()))
                    })
                    .with_child_if(data.show_stats, || self.creator_stats(ctx)),
            )
            .with_child_if(data.show_follow_button, || follow_button(creator.id.as_deref()))
    }

    fn render_profile_hero(&self, data: &ProfileHeroData, ctx: &ContextData) -> VNode {
        let creator = &ctx.creator;
        VNode::element("section")
            .with_class("block-profile-hero")
            .with_style("text-align", data.alignment.as_css())
            .with_child_if(data.show_banner, || {
                VNode::element("div")
                    .with_class("hero-banner")
                    .with_style(
                        "background-image",
                        format!("url(\"{}\")", self.asset(&creator.banner_url)),
                    )
            })
            .with_child_if(data.show_avatar, || self.avatar(ctx))
            .with_child(heading("h1", &creator.display_name))
            .with_child_if(!data.tagline.is_empty(), || {
                VNode::element("p")
                    .with_class("hero-tagline")
                    .with_child(VNode::text(data.tagline.as_str()))
            })
            .with_child_if(data.show_stats, || self.creator_stats(ctx))
            .with_child(follow_button(creator.id.as_deref()))
    }

    fn resource_card(
        &self,
        card: Option<&ResourceCard>,
        show_price: bool,
        show_rating: bool,
    ) -> VNode {
        let empty = ResourceCard::default();
        let resource = card.unwrap_or(&empty);
        let target = resource.id.as_deref();

        let class = if card.is_some() {
            "resource-card"
        } else {
            "resource-card resource-card--empty"
        };

        VNode::element("article")
            .with_class(class)
            .with_attr("data-resource-id", target.unwrap_or_default())
            .with_child(self.image(&resource.thumbnail_url, &resource.title))
            .with_child(heading("h4", &resource.title))
            .with_child(meta_chip("meta-age", resource.age_range.label()))
            .with_child_if(show_price, || price_tag(&resource.price.label()))
            .with_child_if(show_rating, || rating_widget(&resource.rating, target))
    }

    fn render_resource_grid(&self, data: &CreatorResourceGridData, ctx: &ContextData) -> VNode {
        let slots = usize::from(data.max_items);
        let cards = (0..slots).map(|i| {
            self.resource_card(ctx.creator_resources.get(i), data.show_prices, data.show_ratings)
        });

        VNode::element("div")
            .with_class("block-resource-grid")
            .with_child_if(!data.title.is_empty(), || heading("h3", &data.title))
            .with_child(
                VNode::element("div")
                    .with_class("resource-grid")
                    .with_style("display", "grid")
                    .with_style("grid-template-columns", format!("repeat({}, 1fr)", data.columns))
                    .with_children(cards),
            )
    }

    fn render_featured_resource(
        &self,
        data: &CreatorFeaturedResourceData,
        ctx: &ContextData,
    ) -> VNode {
        let featured = match &data.resource_id {
            Some(id) => ctx
                .creator_resources
                .iter()
                .find(|r| r.id.as_deref() == Some(id.as_str()))
                .or_else(|| ctx.creator_resources.first()),
            None => ctx.creator_resources.first(),
        };
        let target = featured.and_then(|r| r.id.as_deref());

        VNode::element("div")
            .with_class("block-featured-resource")
            .with_child(self.resource_card(featured, data.show_price, data.show_rating))
            .with_child(
                VNode::element("div")
                    .with_class("featured-actions")
                    .with_child_if(data.show_favorite, || favorite_button(target))
                    .with_child_if(data.show_share, || share_button(target)),
            )
    }

    fn render_social_widget(&self, data: &SocialWidgetData, ctx: &ContextData) -> VNode {
        let size = px(data.icon_size);
        let links = data.links.iter().map(|link| {
            VNode::element("a")
                .with_class(format!("social-link social-link--{}", link.platform.as_str()))
                .with_attr("href", link.url.as_str())
                .with_attr("target", "_blank")
                .with_attr("rel", "noopener noreferrer")
                .with_attr("aria-label", link.platform.as_str())
                .with_style("width", size.clone())
                .with_style("height", size.clone())
                .with_child(
                    VNode::element("span")
                        .with_class(format!("icon icon-{}", link.platform.as_str())),
                )
        });

        VNode::element("div")
            .with_class(format!("block-social-widget layout--{}", data.layout.as_str()))
            .with_children(links)
            .with_child_if(data.show_share, || share_button(ctx.creator.id.as_deref()))
    }

    fn render_paywall_gate(&self, doc: &CanvasDocument, ctx: &ContextData) -> VNode {
        let paywall = &doc.paywall;
        let target = ctx.resource_id.as_deref();
        let interactive = target.is_some();

        VNode::element("div")
            .with_class("paywall-gate")
            .with_style("position", "absolute")
            .with_style("left", "0")
            .with_style("right", "0")
            .with_style("top", px(paywall.gate_y))
            .with_style("bottom", "0")
            .with_style("z-index", (doc.blocks.len() + 1).to_string())
            .with_style("backdrop-filter", format!("blur({})", px(paywall.blur_px)))
            .with_child(
                VNode::element("p")
                    .with_class("paywall-message")
                    .with_child(VNode::text(paywall.message.as_str())),
            )
            .with_child(
                VNode::element("button")
                    .with_class("widget paywall-cta")
                    .with_attr("type", "button")
                    .with_attr("data-action", "purchase")
                    .with_attr("data-target", target.unwrap_or_default())
                    .with_attr("data-interactive", interactive.to_string())
                    .with_attr("aria-disabled", (!interactive).to_string())
                    .with_child(VNode::text(paywall.cta_label.as_str())),
            )
    }
}

fn typography(
    font_size: f64,
    alignment: Alignment,
    font_family: Option<&str>,
    color: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut css = vec![
        ("font-size", px(font_size)),
        ("text-align", alignment.as_css().to_string()),
    ];
    if let Some(family) = font_family {
        css.push(("font-family", family.to_string()));
    }
    if let Some(color) = color {
        css.push(("color", color.to_string()));
    }
    css
}

fn heading(tag: &str, text: &str) -> VNode {
    VNode::element(tag).with_child(VNode::text(text))
}

fn meta_chip(class: &str, text: String) -> VNode {
    VNode::element("span")
        .with_class(format!("meta-chip {}", class))
        .with_child(VNode::text(text))
}

fn price_tag(label: &str) -> VNode {
    VNode::element("span")
        .with_class("price")
        .with_child(VNode::text(label))
}

fn stat(name: &str, value: String) -> VNode {
    VNode::element("li")
        .with_class(format!("stat stat--{}", name))
        .with_child(
            VNode::element("strong")
                .with_class("stat-value")
                .with_child(VNode::text(value)),
        )
        .with_child(
            VNode::element("span")
                .with_class("stat-label")
                .with_child(VNode::text(name)),
        )
}

fn file_size_label(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Notice shown in place of the embedded paywall block
pub fn render_obsolete_notice() -> VNode {
    VNode::element("div")
        .with_class("block-obsolete")
        .with_attr("role", "alert")
        .with_child(heading("strong", "This block is obsolete"))
        .with_child(VNode::element("p").with_child(VNode::text(
            "Paywalls are now set up in the canvas settings. Remove this block.",
        )))
}

/// Inert stand-in for a block type this build cannot render
pub fn render_unrecognized(block_type: &str) -> VNode {
    VNode::element("div")
        .with_class("block-placeholder")
        .with_attr("data-inert", "true")
        .with_attr("data-unknown-type", block_type)
        .with_child(VNode::text(format!("Unsupported block: {}", block_type)))
}

fn add_base_styles(vdoc: &mut VirtualDomDocument) {
    vdoc.add_style(".canvas", [("margin", "0 auto"), ("overflow", "hidden")]);
    vdoc.add_style(".canvas-block", [("box-sizing", "border-box")]);
    vdoc.add_style(
        ".widget[data-interactive=\"false\"]",
        [("pointer-events", "none"), ("cursor", "default")],
    );
    vdoc.add_style(
        ".block-placeholder",
        [
            ("border", "2px dashed #94a3b8"),
            ("color", "#64748b"),
            ("pointer-events", "none"),
        ],
    );
    vdoc.add_style(
        ".block-obsolete",
        [("border", "2px solid #f59e0b"), ("background", "#fffbeb")],
    );
    vdoc.add_style(".paywall-gate", [("display", "flex"), ("flex-direction", "column")]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size_label() {
        assert_eq!(file_size_label(512), "512 B");
        assert_eq!(file_size_label(4096), "4 KB");
        assert_eq!(file_size_label(3 * 1024 * 1024 / 2), "1.5 MB");
    }
}
