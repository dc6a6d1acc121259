//! # Block Payloads
//!
//! One payload struct per [`BlockType`], wrapped in the [`BlockData`] sum type.
//!
//! Payloads decode leniently and validate strictly:
//! - missing fields take the type's defaults (older documents keep loading)
//! - unknown fields are rejected (a foreign payload is a schema violation,
//!   never silently coerced)
//! - `validate()` checks the value ranges serde cannot express

use crate::block::BlockType;
use crate::error::ModelError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

/// Typed block content; the variant IS the block's type
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Title(TitleData),
    Text(TextData),
    Image(ImageData),
    ImageCarousel(ImageCarouselData),
    VideoCarousel(VideoCarouselData),
    Video(VideoData),
    List(ListData),
    LinkedList(LinkedListData),
    PurchaseCta(PurchaseCtaData),
    Separator(SeparatorData),
    CreatorProfile(CreatorProfileData),
    ImageGrid(ImageGridData),
    Faq(FaqData),
    MaterialList(MaterialListData),
    Download(DownloadData),
    PaywallOverlay(LegacyPaywallData),
    ActivityCardCarousel(ActivityCardCarouselData),
    ProfileHero(ProfileHeroData),
    CreatorResourceGrid(CreatorResourceGridData),
    CreatorFeaturedResource(CreatorFeaturedResourceData),
    SocialWidget(SocialWidgetData),
    /// Wire tag outside the closed set, kept verbatim
    Unrecognized {
        block_type: String,
        data: serde_json::Value,
    },
}

impl BlockData {
    /// Default payload for a type
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Title => BlockData::Title(TitleData::default()),
            BlockType::Text => BlockData::Text(TextData::default()),
            BlockType::Image => BlockData::Image(ImageData::default()),
            BlockType::ImageCarousel => BlockData::ImageCarousel(ImageCarouselData::default()),
            BlockType::VideoCarousel => BlockData::VideoCarousel(VideoCarouselData::default()),
            BlockType::Video => BlockData::Video(VideoData::default()),
            BlockType::List => BlockData::List(ListData::default()),
            BlockType::LinkedList => BlockData::LinkedList(LinkedListData::default()),
            BlockType::PurchaseCta => BlockData::PurchaseCta(PurchaseCtaData::default()),
            BlockType::Separator => BlockData::Separator(SeparatorData::default()),
            BlockType::CreatorProfile => BlockData::CreatorProfile(CreatorProfileData::default()),
            BlockType::ImageGrid => BlockData::ImageGrid(ImageGridData::default()),
            BlockType::Faq => BlockData::Faq(FaqData::default()),
            BlockType::MaterialList => BlockData::MaterialList(MaterialListData::default()),
            BlockType::Download => BlockData::Download(DownloadData::default()),
            BlockType::PaywallOverlay => BlockData::PaywallOverlay(LegacyPaywallData::default()),
            BlockType::ActivityCardCarousel => {
                BlockData::ActivityCardCarousel(ActivityCardCarouselData::default())
            }
            BlockType::ProfileHero => BlockData::ProfileHero(ProfileHeroData::default()),
            BlockType::CreatorResourceGrid => {
                BlockData::CreatorResourceGrid(CreatorResourceGridData::default())
            }
            BlockType::CreatorFeaturedResource => {
                BlockData::CreatorFeaturedResource(CreatorFeaturedResourceData::default())
            }
            BlockType::SocialWidget => BlockData::SocialWidget(SocialWidgetData::default()),
        }
    }

    /// Decode a payload for a wire tag.
    ///
    /// Unknown tags become [`BlockData::Unrecognized`]; a known tag with a
    /// payload of the wrong shape is an error.
    pub fn from_parts(type_name: &str, data: serde_json::Value) -> Result<Self, ModelError> {
        let Ok(block_type) = type_name.parse::<BlockType>() else {
            return Ok(BlockData::Unrecognized {
                block_type: type_name.to_string(),
                data,
            });
        };
        Self::decode(block_type, data)
    }

    /// Decode a payload for a known type
    pub fn decode(block_type: BlockType, data: serde_json::Value) -> Result<Self, ModelError> {
        let data = match data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        Ok(match block_type {
            BlockType::Title => BlockData::Title(payload(block_type, data)?),
            BlockType::Text => BlockData::Text(payload(block_type, data)?),
            BlockType::Image => BlockData::Image(payload(block_type, data)?),
            BlockType::ImageCarousel => BlockData::ImageCarousel(payload(block_type, data)?),
            BlockType::VideoCarousel => BlockData::VideoCarousel(payload(block_type, data)?),
            BlockType::Video => BlockData::Video(payload(block_type, data)?),
            BlockType::List => BlockData::List(payload(block_type, data)?),
            BlockType::LinkedList => BlockData::LinkedList(payload(block_type, data)?),
            BlockType::PurchaseCta => BlockData::PurchaseCta(payload(block_type, data)?),
            BlockType::Separator => BlockData::Separator(payload(block_type, data)?),
            BlockType::CreatorProfile => BlockData::CreatorProfile(payload(block_type, data)?),
            BlockType::ImageGrid => BlockData::ImageGrid(payload(block_type, data)?),
            BlockType::Faq => BlockData::Faq(payload(block_type, data)?),
            BlockType::MaterialList => BlockData::MaterialList(payload(block_type, data)?),
            BlockType::Download => BlockData::Download(payload(block_type, data)?),
            BlockType::PaywallOverlay => BlockData::PaywallOverlay(LegacyPaywallData(data)),
            BlockType::ActivityCardCarousel => {
                BlockData::ActivityCardCarousel(payload(block_type, data)?)
            }
            BlockType::ProfileHero => BlockData::ProfileHero(payload(block_type, data)?),
            BlockType::CreatorResourceGrid => {
                BlockData::CreatorResourceGrid(payload(block_type, data)?)
            }
            BlockType::CreatorFeaturedResource => {
                BlockData::CreatorFeaturedResource(payload(block_type, data)?)
            }
            BlockType::SocialWidget => BlockData::SocialWidget(payload(block_type, data)?),
        })
    }

    pub fn block_type(&self) -> Option<BlockType> {
        Some(match self {
            BlockData::Title(_) => BlockType::Title,
            BlockData::Text(_) => BlockType::Text,
            BlockData::Image(_) => BlockType::Image,
            BlockData::ImageCarousel(_) => BlockType::ImageCarousel,
            BlockData::VideoCarousel(_) => BlockType::VideoCarousel,
            BlockData::Video(_) => BlockType::Video,
            BlockData::List(_) => BlockType::List,
            BlockData::LinkedList(_) => BlockType::LinkedList,
            BlockData::PurchaseCta(_) => BlockType::PurchaseCta,
            BlockData::Separator(_) => BlockType::Separator,
            BlockData::CreatorProfile(_) => BlockType::CreatorProfile,
            BlockData::ImageGrid(_) => BlockType::ImageGrid,
            BlockData::Faq(_) => BlockType::Faq,
            BlockData::MaterialList(_) => BlockType::MaterialList,
            BlockData::Download(_) => BlockType::Download,
            BlockData::PaywallOverlay(_) => BlockType::PaywallOverlay,
            BlockData::ActivityCardCarousel(_) => BlockType::ActivityCardCarousel,
            BlockData::ProfileHero(_) => BlockType::ProfileHero,
            BlockData::CreatorResourceGrid(_) => BlockType::CreatorResourceGrid,
            BlockData::CreatorFeaturedResource(_) => BlockType::CreatorFeaturedResource,
            BlockData::SocialWidget(_) => BlockType::SocialWidget,
            BlockData::Unrecognized { .. } => return None,
        })
    }

    /// Wire tag, including the raw tag of unrecognized blocks
    pub fn type_name(&self) -> &str {
        match self {
            BlockData::Unrecognized { block_type, .. } => block_type,
            known => known.block_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let result = match self {
            BlockData::Title(d) => d.validate(),
            BlockData::Text(d) => d.validate(),
            BlockData::Image(d) => d.validate(),
            BlockData::ImageCarousel(d) => d.validate(),
            BlockData::VideoCarousel(_) => Ok(()),
            BlockData::Video(_) => Ok(()),
            BlockData::List(d) => d.validate(),
            BlockData::LinkedList(_) => Ok(()),
            BlockData::PurchaseCta(d) => d.validate(),
            BlockData::Separator(d) => d.validate(),
            BlockData::CreatorProfile(_) => Ok(()),
            BlockData::ImageGrid(d) => d.validate(),
            BlockData::Faq(_) => Ok(()),
            BlockData::MaterialList(_) => Ok(()),
            BlockData::Download(d) => d.validate(),
            BlockData::PaywallOverlay(_) => Ok(()),
            BlockData::ActivityCardCarousel(d) => d.validate(),
            BlockData::ProfileHero(_) => Ok(()),
            BlockData::CreatorResourceGrid(d) => d.validate(),
            BlockData::CreatorFeaturedResource(_) => Ok(()),
            BlockData::SocialWidget(d) => d.validate(),
            BlockData::Unrecognized { .. } => Ok(()),
        };

        result.map_err(|reason| ModelError::InvalidData {
            block_type: self.type_name().to_string(),
            reason,
        })
    }
}

impl Serialize for BlockData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockData::Title(d) => d.serialize(serializer),
            BlockData::Text(d) => d.serialize(serializer),
            BlockData::Image(d) => d.serialize(serializer),
            BlockData::ImageCarousel(d) => d.serialize(serializer),
            BlockData::VideoCarousel(d) => d.serialize(serializer),
            BlockData::Video(d) => d.serialize(serializer),
            BlockData::List(d) => d.serialize(serializer),
            BlockData::LinkedList(d) => d.serialize(serializer),
            BlockData::PurchaseCta(d) => d.serialize(serializer),
            BlockData::Separator(d) => d.serialize(serializer),
            BlockData::CreatorProfile(d) => d.serialize(serializer),
            BlockData::ImageGrid(d) => d.serialize(serializer),
            BlockData::Faq(d) => d.serialize(serializer),
            BlockData::MaterialList(d) => d.serialize(serializer),
            BlockData::Download(d) => d.serialize(serializer),
            BlockData::PaywallOverlay(d) => d.serialize(serializer),
            BlockData::ActivityCardCarousel(d) => d.serialize(serializer),
            BlockData::ProfileHero(d) => d.serialize(serializer),
            BlockData::CreatorResourceGrid(d) => d.serialize(serializer),
            BlockData::CreatorFeaturedResource(d) => d.serialize(serializer),
            BlockData::SocialWidget(d) => d.serialize(serializer),
            BlockData::Unrecognized { data, .. } => data.serialize(serializer),
        }
    }
}

fn payload<T: DeserializeOwned>(
    block_type: BlockType,
    data: serde_json::Value,
) -> Result<T, ModelError> {
    serde_json::from_value(data).map_err(|e| ModelError::InvalidData {
        block_type: block_type.as_str().to_string(),
        reason: e.to_string(),
    })
}

fn check_font_size(size: f64) -> Result<(), String> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(format!("font size must be > 0, got {}", size))
    }
}

fn check_columns(columns: u8) -> Result<(), String> {
    if (1..=6).contains(&columns) {
        Ok(())
    } else {
        Err(format!("columns must be within 1..=6, got {}", columns))
    }
}

// ============================================================================
// Shared enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

impl ObjectFit {
    pub fn as_css(&self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
            ObjectFit::Fill => "fill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulletStyle {
    #[default]
    Disc,
    Number,
    Check,
    Star,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Pinterest,
    Youtube,
    Tiktok,
    Website,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Pinterest => "pinterest",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Website => "website",
        }
    }
}

// ============================================================================
// Text blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TitleData {
    pub text: String,
    /// Heading level, 1..=6
    pub level: u8,
    pub alignment: Alignment,
    pub font_family: Option<String>,
    pub font_size: f64,
    pub text_color: Option<String>,
    /// Show the resource's title instead of `text`
    pub use_resource_title: bool,
    pub show_age_range: bool,
    pub show_duration: bool,
    pub show_themes: bool,
}

impl Default for TitleData {
    fn default() -> Self {
        Self {
            text: "Your title here".to_string(),
            level: 1,
            alignment: Alignment::Left,
            font_family: None,
            font_size: 40.0,
            text_color: None,
            use_resource_title: true,
            show_age_range: true,
            show_duration: true,
            show_themes: true,
        }
    }
}

impl TitleData {
    fn validate(&self) -> Result<(), String> {
        if !(1..=6).contains(&self.level) {
            return Err(format!("heading level must be within 1..=6, got {}", self.level));
        }
        check_font_size(self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TextData {
    pub content: String,
    pub font_size: f64,
    pub alignment: Alignment,
    pub font_family: Option<String>,
    pub text_color: Option<String>,
    pub line_height: f64,
}

impl Default for TextData {
    fn default() -> Self {
        Self {
            content: "Start typing...".to_string(),
            font_size: 16.0,
            alignment: Alignment::Left,
            font_family: None,
            text_color: None,
            line_height: 1.5,
        }
    }
}

impl TextData {
    fn validate(&self) -> Result<(), String> {
        check_font_size(self.font_size)?;
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(format!("line height must be > 0, got {}", self.line_height));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ListData {
    pub title: String,
    pub items: Vec<String>,
    pub bullet_style: BulletStyle,
    pub columns: u8,
    pub is_checklist: bool,
    pub font_size: f64,
    pub alignment: Alignment,
    pub font_family: Option<String>,
    pub text_color: Option<String>,
}

impl Default for ListData {
    fn default() -> Self {
        Self {
            title: "What's inside".to_string(),
            items: vec!["First item".to_string(), "Second item".to_string(), "Third item".to_string()],
            bullet_style: BulletStyle::Disc,
            columns: 1,
            is_checklist: false,
            font_size: 16.0,
            alignment: Alignment::Left,
            font_family: None,
            text_color: None,
        }
    }
}

impl ListData {
    fn validate(&self) -> Result<(), String> {
        check_columns(self.columns)?;
        check_font_size(self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LinkedListData {
    pub title: String,
    pub links: Vec<LinkItem>,
    pub show_icons: bool,
    pub text_color: Option<String>,
}

impl Default for LinkedListData {
    fn default() -> Self {
        Self {
            title: "Useful links".to_string(),
            links: vec![LinkItem {
                label: "Example link".to_string(),
                url: "https://example.com".to_string(),
            }],
            show_icons: true,
            text_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SeparatorData {
    pub thickness: f64,
    pub line_style: LineStyle,
    pub color: String,
    /// Vertical space above and below the line
    pub spacing: f64,
}

impl Default for SeparatorData {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            line_style: LineStyle::Solid,
            color: "#e2e8f0".to_string(),
            spacing: 8.0,
        }
    }
}

impl SeparatorData {
    fn validate(&self) -> Result<(), String> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(format!("thickness must be > 0, got {}", self.thickness));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(format!("spacing must be >= 0, got {}", self.spacing));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FaqData {
    pub title: String,
    pub items: Vec<FaqItem>,
    pub expand_first: bool,
}

impl Default for FaqData {
    fn default() -> Self {
        Self {
            title: "Frequently asked questions".to_string(),
            items: vec![FaqItem {
                question: "Which ages is this for?".to_string(),
                answer: "Describe the intended age range here.".to_string(),
            }],
            expand_first: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaterialItem {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MaterialListData {
    pub title: String,
    pub materials: Vec<MaterialItem>,
    pub show_quantities: bool,
}

impl Default for MaterialListData {
    fn default() -> Self {
        Self {
            title: "You will need".to_string(),
            materials: vec![
                MaterialItem { name: "Paper".to_string(), quantity: Some("2 sheets".to_string()), optional: false },
                MaterialItem { name: "Crayons".to_string(), quantity: None, optional: true },
            ],
            show_quantities: true,
        }
    }
}

// ============================================================================
// Media blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ImageData {
    pub url: String,
    pub alt: String,
    pub object_fit: ObjectFit,
    pub border_radius: f64,
}

impl Default for ImageData {
    fn default() -> Self {
        Self {
            url: String::new(),
            alt: String::new(),
            object_fit: ObjectFit::Cover,
            border_radius: 0.0,
        }
    }
}

impl ImageData {
    fn validate(&self) -> Result<(), String> {
        if !self.border_radius.is_finite() || self.border_radius < 0.0 {
            return Err(format!("border radius must be >= 0, got {}", self.border_radius));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CarouselImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ImageCarouselData {
    pub images: Vec<CarouselImage>,
    pub autoplay: bool,
    pub interval_ms: u32,
    pub show_dots: bool,
}

impl Default for ImageCarouselData {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            autoplay: false,
            interval_ms: 4000,
            show_dots: true,
        }
    }
}

impl ImageCarouselData {
    fn validate(&self) -> Result<(), String> {
        if self.interval_ms == 0 {
            return Err("autoplay interval must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VideoItem {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct VideoCarouselData {
    pub videos: Vec<VideoItem>,
    pub show_arrows: bool,
}

impl Default for VideoCarouselData {
    fn default() -> Self {
        Self {
            videos: Vec::new(),
            show_arrows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct VideoData {
    pub url: String,
    pub poster_url: Option<String>,
    pub autoplay: bool,
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub controls: bool,
}

impl Default for VideoData {
    fn default() -> Self {
        Self {
            url: String::new(),
            poster_url: None,
            autoplay: false,
            muted: false,
            looped: false,
            controls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GridImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ImageGridData {
    pub images: Vec<GridImage>,
    pub columns: u8,
    pub gap: f64,
}

impl Default for ImageGridData {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            columns: 3,
            gap: 8.0,
        }
    }
}

impl ImageGridData {
    fn validate(&self) -> Result<(), String> {
        check_columns(self.columns)?;
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(format!("gap must be >= 0, got {}", self.gap));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActivityCard {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ActivityCardCarouselData {
    pub title: String,
    pub cards: Vec<ActivityCard>,
    pub cards_per_view: u8,
    /// Prefix the carousel with the resource's age range and duration
    pub show_resource_meta: bool,
}

impl Default for ActivityCardCarouselData {
    fn default() -> Self {
        Self {
            title: "Activities".to_string(),
            cards: vec![ActivityCard {
                title: "Warm-up".to_string(),
                description: "A short activity to get started.".to_string(),
                image_url: None,
                duration_minutes: Some(10),
            }],
            cards_per_view: 3,
            show_resource_meta: true,
        }
    }
}

impl ActivityCardCarouselData {
    fn validate(&self) -> Result<(), String> {
        if !(1..=6).contains(&self.cards_per_view) {
            return Err(format!("cards per view must be within 1..=6, got {}", self.cards_per_view));
        }
        Ok(())
    }
}

// ============================================================================
// Commerce blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PurchaseCtaData {
    pub button_label: String,
    pub show_price: bool,
    pub show_rating: bool,
    pub show_favorite: bool,
    pub show_share: bool,
    pub accent_color: Option<String>,
}

impl Default for PurchaseCtaData {
    fn default() -> Self {
        Self {
            button_label: "Buy now".to_string(),
            show_price: true,
            show_rating: true,
            show_favorite: true,
            show_share: true,
            accent_color: None,
        }
    }
}

impl PurchaseCtaData {
    fn validate(&self) -> Result<(), String> {
        if self.button_label.trim().is_empty() {
            return Err("button label is empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DownloadData {
    pub label: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size_bytes: Option<u64>,
    pub requires_purchase: bool,
}

impl Default for DownloadData {
    fn default() -> Self {
        Self {
            label: "Download".to_string(),
            file_url: String::new(),
            file_name: "resource.pdf".to_string(),
            file_size_bytes: None,
            requires_purchase: true,
        }
    }
}

impl DownloadData {
    fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("download label is empty".to_string());
        }
        Ok(())
    }
}

/// Payload of the obsolete embedded paywall, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyPaywallData(pub serde_json::Value);

impl Default for LegacyPaywallData {
    fn default() -> Self {
        LegacyPaywallData(serde_json::Value::Object(Default::default()))
    }
}

// ============================================================================
// Creator blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CreatorProfileData {
    pub show_avatar: bool,
    pub show_bio: bool,
    pub show_stats: bool,
    pub show_follow_button: bool,
    pub layout: Layout,
}

impl Default for CreatorProfileData {
    fn default() -> Self {
        Self {
            show_avatar: true,
            show_bio: true,
            show_stats: true,
            show_follow_button: true,
            layout: Layout::Horizontal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProfileHeroData {
    pub tagline: String,
    pub show_avatar: bool,
    pub show_banner: bool,
    pub show_stats: bool,
    pub alignment: Alignment,
}

impl Default for ProfileHeroData {
    fn default() -> Self {
        Self {
            tagline: "Hands-on learning for curious kids".to_string(),
            show_avatar: true,
            show_banner: true,
            show_stats: true,
            alignment: Alignment::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CreatorResourceGridData {
    pub title: String,
    pub columns: u8,
    pub max_items: u8,
    pub show_prices: bool,
    pub show_ratings: bool,
}

impl Default for CreatorResourceGridData {
    fn default() -> Self {
        Self {
            title: "My resources".to_string(),
            columns: 3,
            max_items: 6,
            show_prices: true,
            show_ratings: true,
        }
    }
}

impl CreatorResourceGridData {
    fn validate(&self) -> Result<(), String> {
        check_columns(self.columns)?;
        if self.max_items == 0 {
            return Err("max items must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CreatorFeaturedResourceData {
    /// Resource to feature; the creator's first resource when unset
    pub resource_id: Option<String>,
    pub show_price: bool,
    pub show_rating: bool,
    pub show_favorite: bool,
    pub show_share: bool,
}

impl Default for CreatorFeaturedResourceData {
    fn default() -> Self {
        Self {
            resource_id: None,
            show_price: true,
            show_rating: true,
            show_favorite: true,
            show_share: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SocialWidgetData {
    pub links: Vec<SocialLink>,
    pub show_share: bool,
    pub icon_size: f64,
    pub layout: Layout,
}

impl Default for SocialWidgetData {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            show_share: true,
            icon_size: 24.0,
            layout: Layout::Horizontal,
        }
    }
}

impl SocialWidgetData {
    fn validate(&self) -> Result<(), String> {
        if !self.icon_size.is_finite() || self.icon_size <= 0.0 {
            return Err(format!("icon size must be > 0, got {}", self.icon_size));
        }
        Ok(())
    }
}
