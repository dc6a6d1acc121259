//! # Render Context
//!
//! Real-world values interpolated into blocks that display resource or
//! creator metadata.
//!
//! In the editor the context is [`ContextData::placeholder`]; on a published
//! page it is the record returned by the data-fetch collaborator. The
//! renderer never branches on which one it got.

use serde::{Deserialize, Serialize};

/// Values interpolated into metadata-bearing blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextData {
    /// Real resource id; its presence turns inert widgets interactive
    pub resource_id: Option<String>,
    pub resource: ResourceSummary,
    pub creator: CreatorSummary,
    pub creator_resources: Vec<ResourceCard>,
    /// Viewer may see content behind the canvas paywall
    pub has_access: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSummary {
    pub title: String,
    pub age_range: AgeRange,
    pub duration_minutes: u32,
    pub themes: Vec<String>,
    pub rating: Rating,
    pub price: Price,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatorSummary {
    /// Real creator id; its presence turns the follow button interactive
    pub id: Option<String>,
    pub display_name: String,
    pub avatar_url: String,
    pub banner_url: String,
    pub bio: String,
    pub follower_count: u32,
    pub resource_count: u32,
    pub rating: Rating,
}

/// Compact resource entry used by creator grids and featured blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceCard {
    pub id: Option<String>,
    pub title: String,
    pub thumbnail_url: String,
    pub age_range: AgeRange,
    pub price: Price,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn label(&self) -> String {
        if self.min == self.max {
            format!("Age {}", self.min)
        } else {
            format!("Ages {}-{}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

impl Rating {
    /// Whole stars to fill out of five
    pub fn filled_stars(&self) -> usize {
        if !self.average.is_finite() {
            return 0;
        }
        self.average.round().clamp(0.0, 5.0) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    pub amount_cents: u32,
    pub currency: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            amount_cents: 0,
            currency: "USD".to_string(),
        }
    }
}

impl Price {
    pub fn label(&self) -> String {
        if self.amount_cents == 0 {
            return "Free".to_string();
        }
        let amount = format!("{}.{:02}", self.amount_cents / 100, self.amount_cents % 100);
        match self.currency.as_str() {
            "USD" => format!("${}", amount),
            "EUR" => format!("€{}", amount),
            "GBP" => format!("£{}", amount),
            other => format!("{} {}", amount, other),
        }
    }
}

pub fn duration_label(minutes: u32) -> String {
    if minutes >= 60 && minutes % 60 == 0 {
        format!("{} h", minutes / 60)
    } else if minutes > 60 {
        format!("{} h {} min", minutes / 60, minutes % 60)
    } else {
        format!("{} min", minutes)
    }
}

/// Number of sample cards in the editor placeholder
pub const PLACEHOLDER_RESOURCE_COUNT: usize = 6;

impl ContextData {
    /// Values shown while authoring, before any real data exists
    pub fn placeholder() -> Self {
        let sample_price = Price {
            amount_cents: 499,
            currency: "USD".to_string(),
        };
        let sample_rating = Rating {
            average: 5.0,
            count: 12,
        };
        let sample_ages = AgeRange { min: 4, max: 7 };

        Self {
            resource_id: None,
            resource: ResourceSummary {
                title: "Your resource title".to_string(),
                age_range: sample_ages,
                duration_minutes: 30,
                themes: vec!["Theme one".to_string(), "Theme two".to_string()],
                rating: sample_rating,
                price: sample_price.clone(),
                thumbnail_url: String::new(),
            },
            creator: CreatorSummary {
                id: None,
                display_name: "Creator name".to_string(),
                avatar_url: String::new(),
                banner_url: String::new(),
                bio: "A short introduction about you and your resources.".to_string(),
                follower_count: 0,
                resource_count: PLACEHOLDER_RESOURCE_COUNT as u32,
                rating: sample_rating,
            },
            creator_resources: (1..=PLACEHOLDER_RESOURCE_COUNT)
                .map(|i| ResourceCard {
                    id: None,
                    title: format!("Resource {}", i),
                    thumbnail_url: String::new(),
                    age_range: sample_ages,
                    price: sample_price.clone(),
                    rating: sample_rating,
                })
                .collect(),
            has_access: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether resource widgets (favorite, rating, share) respond to input
    pub fn is_interactive(&self) -> bool {
        self.resource_id.is_some()
    }
}
