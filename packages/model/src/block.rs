//! # Content Blocks
//!
//! The atomic unit of a canvas document.
//!
//! ## Wire format
//!
//! ```json
//! {
//!   "id": "5c1a2e-3",
//!   "type": "text",
//!   "position": { "x": 40, "y": 120, "width": 400, "height": "auto", "scale": 1 },
//!   "style": { "background": { "kind": "none" }, "cornerRadius": "medium", "elevation": "none" },
//!   "data": { "content": "hello", .. },
//!   "locked": true
//! }
//! ```
//!
//! `type` is not stored on [`ContentBlock`]; it is derived from [`BlockData`]
//! when serializing and decides which payload shape `data` is decoded into
//! when deserializing. Every deserialized block is validated.

use crate::data::BlockData;
use crate::document::CanvasKind;
use crate::error::ModelError;
use crate::style::BlockStyle;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque block identifier, stable for the block's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

/// The closed set of block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Title,
    Text,
    Image,
    ImageCarousel,
    VideoCarousel,
    Video,
    List,
    LinkedList,
    PurchaseCta,
    Separator,
    CreatorProfile,
    ImageGrid,
    Faq,
    MaterialList,
    Download,
    /// Embedded paywall block, superseded by the canvas-level `PaywallConfig`
    #[serde(alias = "paywall")]
    PaywallOverlay,
    ActivityCardCarousel,
    ProfileHero,
    CreatorResourceGrid,
    CreatorFeaturedResource,
    SocialWidget,
}

/// Palette grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    Content,
    Media,
    Commerce,
    Creator,
}

impl BlockType {
    pub const ALL: [BlockType; 21] = [
        BlockType::Title,
        BlockType::Text,
        BlockType::Image,
        BlockType::ImageCarousel,
        BlockType::VideoCarousel,
        BlockType::Video,
        BlockType::List,
        BlockType::LinkedList,
        BlockType::PurchaseCta,
        BlockType::Separator,
        BlockType::CreatorProfile,
        BlockType::ImageGrid,
        BlockType::Faq,
        BlockType::MaterialList,
        BlockType::Download,
        BlockType::PaywallOverlay,
        BlockType::ActivityCardCarousel,
        BlockType::ProfileHero,
        BlockType::CreatorResourceGrid,
        BlockType::CreatorFeaturedResource,
        BlockType::SocialWidget,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Title => "title",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::ImageCarousel => "image-carousel",
            BlockType::VideoCarousel => "video-carousel",
            BlockType::Video => "video",
            BlockType::List => "list",
            BlockType::LinkedList => "linked-list",
            BlockType::PurchaseCta => "purchase-cta",
            BlockType::Separator => "separator",
            BlockType::CreatorProfile => "creator-profile",
            BlockType::ImageGrid => "image-grid",
            BlockType::Faq => "faq",
            BlockType::MaterialList => "material-list",
            BlockType::Download => "download",
            BlockType::PaywallOverlay => "paywall-overlay",
            BlockType::ActivityCardCarousel => "activity-card-carousel",
            BlockType::ProfileHero => "profile-hero",
            BlockType::CreatorResourceGrid => "creator-resource-grid",
            BlockType::CreatorFeaturedResource => "creator-featured-resource",
            BlockType::SocialWidget => "social-widget",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::Title => "Title",
            BlockType::Text => "Text",
            BlockType::Image => "Image",
            BlockType::ImageCarousel => "Image carousel",
            BlockType::VideoCarousel => "Video carousel",
            BlockType::Video => "Video",
            BlockType::List => "List",
            BlockType::LinkedList => "Link list",
            BlockType::PurchaseCta => "Purchase button",
            BlockType::Separator => "Separator",
            BlockType::CreatorProfile => "Creator profile",
            BlockType::ImageGrid => "Image grid",
            BlockType::Faq => "FAQ",
            BlockType::MaterialList => "Material list",
            BlockType::Download => "Download",
            BlockType::PaywallOverlay => "Paywall (obsolete)",
            BlockType::ActivityCardCarousel => "Activity cards",
            BlockType::ProfileHero => "Profile hero",
            BlockType::CreatorResourceGrid => "Resource grid",
            BlockType::CreatorFeaturedResource => "Featured resource",
            BlockType::SocialWidget => "Social links",
        }
    }

    pub fn category(&self) -> BlockCategory {
        match self {
            BlockType::Title
            | BlockType::Text
            | BlockType::List
            | BlockType::LinkedList
            | BlockType::Separator
            | BlockType::Faq
            | BlockType::MaterialList => BlockCategory::Content,
            BlockType::Image
            | BlockType::ImageCarousel
            | BlockType::VideoCarousel
            | BlockType::Video
            | BlockType::ImageGrid
            | BlockType::ActivityCardCarousel => BlockCategory::Media,
            BlockType::PurchaseCta | BlockType::Download | BlockType::PaywallOverlay => {
                BlockCategory::Commerce
            }
            BlockType::CreatorProfile
            | BlockType::ProfileHero
            | BlockType::CreatorResourceGrid
            | BlockType::CreatorFeaturedResource
            | BlockType::SocialWidget => BlockCategory::Creator,
        }
    }

    /// Blocks that only make sense on a creator's profile page
    pub fn is_profile_only(&self) -> bool {
        matches!(
            self,
            BlockType::ProfileHero
                | BlockType::CreatorResourceGrid
                | BlockType::CreatorFeaturedResource
                | BlockType::SocialWidget
        )
    }

    /// Blocks that only make sense on a resource page
    pub fn is_resource_only(&self) -> bool {
        matches!(
            self,
            BlockType::PurchaseCta | BlockType::Download | BlockType::MaterialList
        )
    }

    /// Legacy types can still be loaded and rendered but not added
    pub fn is_legacy(&self) -> bool {
        matches!(self, BlockType::PaywallOverlay)
    }

    /// Types offered in the block palette for a canvas kind
    pub fn palette(kind: CanvasKind) -> Vec<BlockType> {
        BlockType::ALL
            .iter()
            .copied()
            .filter(|t| !t.is_legacy())
            .filter(|t| match kind {
                CanvasKind::Resource => !t.is_profile_only(),
                CanvasKind::Profile => !t.is_resource_only(),
            })
            .collect()
    }

    /// Box a freshly added block of this type gets
    pub fn default_size(&self) -> (f64, Height) {
        match self {
            BlockType::Title => (600.0, Height::Px(80.0)),
            BlockType::Text => (400.0, Height::Auto),
            BlockType::Image => (320.0, Height::Px(240.0)),
            BlockType::ImageCarousel => (640.0, Height::Px(360.0)),
            BlockType::VideoCarousel => (640.0, Height::Px(360.0)),
            BlockType::Video => (640.0, Height::Px(360.0)),
            BlockType::List => (400.0, Height::Auto),
            BlockType::LinkedList => (400.0, Height::Auto),
            BlockType::PurchaseCta => (360.0, Height::Px(160.0)),
            BlockType::Separator => (600.0, Height::Px(24.0)),
            BlockType::CreatorProfile => (480.0, Height::Px(180.0)),
            BlockType::ImageGrid => (640.0, Height::Px(420.0)),
            BlockType::Faq => (600.0, Height::Auto),
            BlockType::MaterialList => (400.0, Height::Auto),
            BlockType::Download => (360.0, Height::Px(96.0)),
            BlockType::PaywallOverlay => (600.0, Height::Px(120.0)),
            BlockType::ActivityCardCarousel => (720.0, Height::Px(320.0)),
            BlockType::ProfileHero => (1200.0, Height::Px(320.0)),
            BlockType::CreatorResourceGrid => (960.0, Height::Auto),
            BlockType::CreatorFeaturedResource => (480.0, Height::Px(400.0)),
            BlockType::SocialWidget => (320.0, Height::Px(64.0)),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "paywall" {
            return Ok(BlockType::PaywallOverlay);
        }
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}

/// Block height: fixed pixels or computed from content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    Auto,
    Px(f64),
}

impl Height {
    pub fn px(&self) -> Option<f64> {
        match self {
            Height::Auto => None,
            Height::Px(px) => Some(*px),
        }
    }
}

impl Serialize for Height {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Height::Auto => serializer.serialize_str("auto"),
            Height::Px(px) => serializer.serialize_f64(*px),
        }
    }
}

impl<'de> Deserialize<'de> for Height {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawHeight {
            Px(f64),
            Keyword(String),
        }

        match RawHeight::deserialize(deserializer)? {
            RawHeight::Px(px) => Ok(Height::Px(px)),
            RawHeight::Keyword(k) if k == "auto" => Ok(Height::Auto),
            RawHeight::Keyword(k) => Err(serde::de::Error::custom(format!(
                "expected a number or \"auto\", got \"{}\"",
                k
            ))),
        }
    }
}

/// Box geometry in document space (pixels at 1:1 zoom)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: Height,
    /// Content zoom, independent of the box size
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl BlockPosition {
    pub fn new(x: f64, y: f64, width: f64, height: Height) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale: 1.0,
        }
    }

    pub fn validate(&self, block_id: &BlockId) -> Result<(), ModelError> {
        let invalid = |reason: String| ModelError::InvalidPosition {
            block_id: block_id.to_string(),
            reason,
        };

        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(invalid(format!("non-finite origin ({}, {})", self.x, self.y)));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(invalid(format!("width must be > 0, got {}", self.width)));
        }
        if let Height::Px(h) = self.height {
            if !h.is_finite() || h <= 0.0 {
                return Err(invalid(format!("height must be > 0 or \"auto\", got {}", h)));
            }
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid(format!("scale must be > 0, got {}", self.scale)));
        }
        Ok(())
    }
}

/// A positioned, styled block of typed content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct ContentBlock {
    pub id: BlockId,
    pub position: BlockPosition,
    pub style: BlockStyle,
    pub data: BlockData,
    pub locked: bool,
    pub hidden: bool,
}

impl ContentBlock {
    /// Build a block, rejecting any structural violation
    pub fn new(
        id: BlockId,
        position: BlockPosition,
        style: BlockStyle,
        data: BlockData,
    ) -> Result<Self, ModelError> {
        let block = Self {
            id,
            position,
            style,
            data,
            locked: false,
            hidden: false,
        };
        block.validate()?;
        Ok(block)
    }

    /// A block of `block_type` with default size, style and data at the origin
    pub fn with_defaults(id: BlockId, block_type: BlockType) -> Self {
        let (width, height) = block_type.default_size();
        Self {
            id,
            position: BlockPosition::new(0.0, 0.0, width, height),
            style: BlockStyle::default(),
            data: BlockData::default_for(block_type),
            locked: false,
            hidden: false,
        }
    }

    /// `None` for blocks of an unrecognized type
    pub fn block_type(&self) -> Option<BlockType> {
        self.data.block_type()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.position.validate(&self.id)?;
        self.style.validate()?;
        self.data.validate()
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 5 + usize::from(self.locked) + usize::from(self.hidden);
        let mut state = serializer.serialize_struct("ContentBlock", len)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.data.type_name())?;
        state.serialize_field("position", &self.position)?;
        state.serialize_field("style", &self.style)?;
        state.serialize_field("data", &self.data)?;
        if self.locked {
            state.serialize_field("locked", &true)?;
        }
        if self.hidden {
            state.serialize_field("hidden", &true)?;
        }
        state.end()
    }
}

/// Untyped wire shape, decoded into a `ContentBlock` once `type` is known
#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    position: BlockPosition,
    #[serde(default)]
    style: BlockStyle,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    hidden: bool,
}

impl TryFrom<RawBlock> for ContentBlock {
    type Error = ModelError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let data = BlockData::from_parts(&raw.block_type, raw.data)?;
        let block = ContentBlock {
            id: raw.id,
            position: raw.position,
            style: raw.style,
            data,
            locked: raw.locked,
            hidden: raw.hidden,
        };
        block.validate()?;
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ImageData, TextData};
    use serde_json::json;

    #[test]
    fn test_every_type_defaults_to_a_valid_block() {
        for block_type in BlockType::ALL {
            let block = ContentBlock::with_defaults(BlockId::from("b-1"), block_type);
            assert!(block.validate().is_ok(), "{} default is invalid", block_type);
            assert_eq!(block.block_type(), Some(block_type));
        }
    }

    #[test]
    fn test_wire_tags_parse_back() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.as_str().parse::<BlockType>().unwrap(), block_type);
            let json = serde_json::to_value(block_type).unwrap();
            assert_eq!(json, block_type.as_str());
        }
        assert_eq!("paywall".parse::<BlockType>().unwrap(), BlockType::PaywallOverlay);
        assert!("carousel".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_serialize_block() {
        let mut block = ContentBlock::with_defaults(BlockId::from("b-1"), BlockType::Text);
        block.locked = true;

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "b-1");
        assert_eq!(json["type"], "text");
        assert_eq!(json["position"]["height"], "auto");
        assert_eq!(json["position"]["scale"], 1.0);
        assert_eq!(json["locked"], true);
        assert!(json.get("hidden").is_none());

        let back: ContentBlock = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_deserialize_typed_payload() {
        let json = json!({
            "id": "b-2",
            "type": "image",
            "position": { "x": 10, "y": 20, "width": 300, "height": 200 },
            "data": { "url": "https://cdn.example/cat.png", "alt": "A cat", "objectFit": "contain", "borderRadius": 8 }
        });

        let block: ContentBlock = serde_json::from_value(json).unwrap();
        assert_eq!(block.position.scale, 1.0);
        assert_eq!(block.position.height, Height::Px(200.0));
        match &block.data {
            BlockData::Image(ImageData { url, alt, .. }) => {
                assert_eq!(url, "https://cdn.example/cat.png");
                assert_eq!(alt, "A cat");
            }
            other => panic!("Expected image data, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_payload_rejected() {
        // text payload on an image block
        let json = json!({
            "id": "b-3",
            "type": "image",
            "position": { "x": 0, "y": 0, "width": 300, "height": 200 },
            "data": { "content": "hello" }
        });

        let result: Result<ContentBlock, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let json = json!({
            "id": "b-4",
            "type": "countdown-timer",
            "position": { "x": 0, "y": 0, "width": 300, "height": 60 },
            "data": { "until": "2030-01-01" }
        });

        let block: ContentBlock = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(block.block_type(), None);
        assert_eq!(block.data.type_name(), "countdown-timer");

        let back = serde_json::to_value(&block).unwrap();
        assert_eq!(back["type"], "countdown-timer");
        assert_eq!(back["data"], json["data"]);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let id = BlockId::from("b-5");
        let data = BlockData::Text(TextData::default());

        let zero_width = BlockPosition::new(0.0, 0.0, 0.0, Height::Auto);
        assert!(ContentBlock::new(id.clone(), zero_width, BlockStyle::default(), data.clone()).is_err());

        let mut zero_scale = BlockPosition::new(0.0, 0.0, 100.0, Height::Auto);
        zero_scale.scale = 0.0;
        assert!(ContentBlock::new(id.clone(), zero_scale, BlockStyle::default(), data.clone()).is_err());

        let bad_height = BlockPosition::new(0.0, 0.0, 100.0, Height::Px(-1.0));
        assert!(ContentBlock::new(id, bad_height, BlockStyle::default(), data).is_err());
    }

    #[test]
    fn test_height_keyword_must_be_auto() {
        let result: Result<Height, _> = serde_json::from_str("\"fit\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_palette_excludes_legacy_and_foreign_kinds() {
        let resource = BlockType::palette(CanvasKind::Resource);
        assert!(resource.contains(&BlockType::PurchaseCta));
        assert!(!resource.contains(&BlockType::ProfileHero));
        assert!(!resource.contains(&BlockType::PaywallOverlay));

        let profile = BlockType::palette(CanvasKind::Profile);
        assert!(profile.contains(&BlockType::SocialWidget));
        assert!(!profile.contains(&BlockType::Download));
    }
}
