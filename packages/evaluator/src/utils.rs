//! Shared utilities for turning model styling into CSS declarations
//!
//! Every function here is pure: the same style always yields the same
//! declarations, so editor and published output stay byte-comparable.

use canvas_model::{Background, BackgroundPreset, BlockStyle, CornerRadius, Elevation};

/// Format a number without a trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// Parse `#rgb` or `#rrggbb`
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| u8::from_str_radix(&c.to_string(), 16).ok());
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

pub fn preset_color(preset: BackgroundPreset) -> &'static str {
    match preset {
        BackgroundPreset::Paper => "#fffdf7",
        BackgroundPreset::Sunshine => "#fff4c2",
        BackgroundPreset::Sky => "#dff1ff",
        BackgroundPreset::Mint => "#dcf7ea",
        BackgroundPreset::Lavender => "#ece6ff",
        BackgroundPreset::Peach => "#ffe5d6",
    }
}

/// CSS declarations for a background
pub fn background_css(background: &Background) -> Vec<(&'static str, String)> {
    match background {
        Background::None => Vec::new(),
        Background::Color { value } => vec![("background", value.clone())],
        Background::Preset { name } => vec![("background", preset_color(*name).to_string())],
        Background::Gradient { angle, stops } => {
            let stops = stops
                .iter()
                .map(|s| format!("{} {}%", s.color, format_number(s.position)))
                .collect::<Vec<_>>()
                .join(", ");
            vec![(
                "background",
                format!("linear-gradient({}deg, {})", format_number(*angle), stops),
            )]
        }
        Background::Glass { tint, blur } => {
            let (r, g, b) = tint
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or((255, 255, 255));
            let filter = format!("blur({})", px(*blur));
            vec![
                ("background", format!("rgba({}, {}, {}, 0.55)", r, g, b)),
                ("backdrop-filter", filter.clone()),
                ("-webkit-backdrop-filter", filter),
            ]
        }
    }
}

pub fn corner_radius_css(radius: CornerRadius) -> String {
    match radius {
        CornerRadius::None => "0".to_string(),
        CornerRadius::Small => "4px".to_string(),
        CornerRadius::Medium => "12px".to_string(),
        CornerRadius::Large => "24px".to_string(),
        CornerRadius::Pill => "9999px".to_string(),
        CornerRadius::Custom(value) => px(value),
    }
}

/// Box shadow for an elevation, tinted when a tint color parses
pub fn shadow_css(elevation: Elevation, tint: Option<&str>) -> Option<String> {
    let (r, g, b) = tint.and_then(parse_hex_color).unwrap_or((15, 23, 42));
    let (offset, blur, alpha) = match elevation {
        Elevation::None => return None,
        Elevation::Low => (1, 3, 0.12),
        Elevation::Medium => (4, 12, 0.16),
        Elevation::High => (12, 32, 0.22),
    };
    Some(format!(
        "0 {}px {}px rgba({}, {}, {}, {})",
        offset, blur, r, g, b, alpha
    ))
}

/// All declarations a block's shared style contributes to its box
pub fn block_style_css(style: &BlockStyle) -> Vec<(&'static str, String)> {
    let mut css = background_css(&style.background);
    css.push(("border-radius", corner_radius_css(style.corner_radius)));
    if let Some(shadow) = shadow_css(style.elevation, style.tint_color.as_deref()) {
        css.push(("box-shadow", shadow));
    }
    css
}
