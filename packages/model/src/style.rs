//! Visual properties shared by every block type.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Shared block styling, independent of the block's type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    pub background: Background,
    pub corner_radius: CornerRadius,
    pub elevation: Elevation,
    /// Recolors elevation shadows to match the background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint_color: Option<String>,
}

/// Block or canvas background
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Background {
    #[default]
    None,
    Color {
        value: String,
    },
    Preset {
        name: BackgroundPreset,
    },
    Gradient {
        #[serde(default)]
        angle: f64,
        stops: Vec<GradientStop>,
    },
    /// Translucent frosted panel
    Glass {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tint: Option<String>,
        #[serde(default = "default_glass_blur")]
        blur: f64,
    },
}

fn default_glass_blur() -> f64 {
    12.0
}

impl Background {
    pub fn color(value: impl Into<String>) -> Self {
        Background::Color {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundPreset {
    Paper,
    Sunshine,
    Sky,
    Mint,
    Lavender,
    Peach,
}

/// One color stop; `position` is a percentage along the gradient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerRadius {
    None,
    Small,
    #[default]
    Medium,
    Large,
    Pill,
    Custom(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Elevation {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl BlockStyle {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.background.validate()?;

        if let CornerRadius::Custom(px) = self.corner_radius {
            if !px.is_finite() || px < 0.0 {
                return Err(ModelError::InvalidStyle(format!(
                    "corner radius must be a non-negative number, got {}",
                    px
                )));
            }
        }

        if let Some(tint) = &self.tint_color {
            if tint.trim().is_empty() {
                return Err(ModelError::InvalidStyle("tint color is empty".to_string()));
            }
        }

        Ok(())
    }
}

impl Background {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Background::None | Background::Preset { .. } => Ok(()),
            Background::Color { value } => {
                if value.trim().is_empty() {
                    Err(ModelError::InvalidStyle("background color is empty".to_string()))
                } else {
                    Ok(())
                }
            }
            Background::Gradient { angle, stops } => {
                if !angle.is_finite() {
                    return Err(ModelError::InvalidStyle("gradient angle is not finite".to_string()));
                }
                if stops.len() < 2 {
                    return Err(ModelError::InvalidStyle(format!(
                        "gradient needs at least 2 stops, got {}",
                        stops.len()
                    )));
                }
                for stop in stops {
                    if !(0.0..=100.0).contains(&stop.position) {
                        return Err(ModelError::InvalidStyle(format!(
                            "gradient stop position {} outside 0..=100",
                            stop.position
                        )));
                    }
                }
                Ok(())
            }
            Background::Glass { blur, .. } => {
                if !blur.is_finite() || *blur < 0.0 {
                    Err(ModelError::InvalidStyle(format!("glass blur must be >= 0, got {}", blur)))
                } else {
                    Ok(())
                }
            }
        }
    }
}
