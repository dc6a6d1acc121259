//! # Scaling Transform
//!
//! Separates "resize" from "scale". Resizing changes the box and lets the
//! content reflow; scaling zooms the content as a unit inside an unchanged
//! box.
//!
//! A scaled block renders its content in an inner wrapper that is
//! `100/s %` wide and tall, then visually shrunk (or grown) by `s` from the
//! top-left corner. The wrapper therefore lays out exactly as an unscaled
//! block of size `box / s` would, and after the transform it covers the box
//! exactly. The outer box clips, so nothing leaks past the edges.

use crate::utils::format_number;
use crate::vdom::VNode;

/// Smallest effective scale; smaller or non-positive values clamp here
pub const MIN_SCALE: f64 = 0.05;

/// Clamp a stored scale into something renderable.
///
/// Non-finite values fall back to 1, non-positive ones clamp to
/// [`MIN_SCALE`].
pub fn normalize_scale(scale: f64) -> f64 {
    if !scale.is_finite() {
        1.0
    } else if scale < MIN_SCALE {
        MIN_SCALE
    } else {
        scale
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleTransform {
    Identity,
    Scaled { factor: f64 },
}

impl ScaleTransform {
    pub fn new(scale: f64) -> Self {
        let factor = normalize_scale(scale);
        if factor == 1.0 {
            ScaleTransform::Identity
        } else {
            ScaleTransform::Scaled { factor }
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ScaleTransform::Identity => 1.0,
            ScaleTransform::Scaled { factor } => *factor,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, ScaleTransform::Identity)
    }

    /// Inner wrapper size along each axis, as a percentage of the box
    pub fn inner_size_percent(&self) -> f64 {
        100.0 / self.factor()
    }

    /// Styles the block box needs to host this transform
    pub fn outer_styles(&self) -> Vec<(&'static str, String)> {
        match self {
            ScaleTransform::Identity => Vec::new(),
            ScaleTransform::Scaled { .. } => vec![("overflow", "hidden".to_string())],
        }
    }

    /// Wrap rendered content. Identity returns it untouched.
    pub fn apply(&self, content: VNode) -> VNode {
        match self {
            ScaleTransform::Identity => content,
            ScaleTransform::Scaled { factor } => {
                let size = format!("{}%", format_number(self.inner_size_percent()));
                VNode::element("div")
                    .with_class("scale-inner")
                    .with_style("width", size.clone())
                    .with_style("height", size)
                    .with_style("transform", format!("scale({})", format_number(*factor)))
                    .with_style("transform-origin", "top left")
                    .with_child(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_is_identity() {
        let content = VNode::element("p").with_child(VNode::text("hi"));
        let transform = ScaleTransform::new(1.0);

        assert!(transform.is_identity());
        assert!(transform.outer_styles().is_empty());
        assert_eq!(transform.apply(content.clone()), content);
    }

    #[test]
    fn test_half_scale_doubles_inner_box() {
        let transform = ScaleTransform::new(0.5);
        let wrapped = transform.apply(VNode::element("p"));

        assert_eq!(wrapped.style("width"), Some("200%"));
        assert_eq!(wrapped.style("height"), Some("200%"));
        assert_eq!(wrapped.style("transform"), Some("scale(0.5)"));
        assert_eq!(wrapped.style("transform-origin"), Some("top left"));
        assert_eq!(wrapped.children().len(), 1);
        assert_eq!(transform.outer_styles(), vec![("overflow", "hidden".to_string())]);
    }

    #[test]
    fn test_upscale_shrinks_inner_box() {
        let transform = ScaleTransform::new(2.0);
        assert_eq!(transform.inner_size_percent(), 50.0);
    }

    #[test]
    fn test_degenerate_scales() {
        assert_eq!(ScaleTransform::new(0.0).factor(), MIN_SCALE);
        assert_eq!(ScaleTransform::new(-3.0).factor(), MIN_SCALE);
        assert_eq!(ScaleTransform::new(f64::NAN), ScaleTransform::Identity);
        assert_eq!(ScaleTransform::new(f64::INFINITY), ScaleTransform::Identity);

        // clamped factor still produces a finite wrapper
        let wrapped = ScaleTransform::new(0.0).apply(VNode::element("p"));
        assert_eq!(wrapped.style("width"), Some("2000%"));
    }
}
