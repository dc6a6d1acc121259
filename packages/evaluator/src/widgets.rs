//! Interactive widgets shared by commerce and creator blocks.
//!
//! A widget renders the same chrome whether or not it can act: the editor
//! gets an inert copy (`data-interactive="false"`, `aria-disabled="true"`,
//! empty `data-target`) of exactly what the published page shows. Only
//! attribute values differ between the two, never the set of attributes.

use crate::context::Rating;
use crate::vdom::VNode;

/// What a widget acts on. `None` renders the inert variant.
pub type WidgetTarget<'a> = Option<&'a str>;

fn action_button(class: &str, action: &str, target: WidgetTarget<'_>) -> VNode {
    let interactive = target.is_some();
    VNode::element("button")
        .with_class(format!("widget {}", class))
        .with_attr("type", "button")
        .with_attr("data-action", action)
        .with_attr("data-target", target.unwrap_or_default())
        .with_attr("data-interactive", if interactive { "true" } else { "false" })
        .with_attr("aria-disabled", if interactive { "false" } else { "true" })
}

pub fn favorite_button(target: WidgetTarget<'_>) -> VNode {
    action_button("widget-favorite", "favorite", target)
        .with_attr("aria-label", "Add to favorites")
        .with_child(VNode::element("span").with_class("icon icon-heart"))
}

pub fn share_button(target: WidgetTarget<'_>) -> VNode {
    action_button("widget-share", "share", target)
        .with_attr("aria-label", "Share")
        .with_child(VNode::element("span").with_class("icon icon-share"))
}

pub fn follow_button(target: WidgetTarget<'_>) -> VNode {
    action_button("widget-follow", "follow", target).with_child(VNode::text("Follow"))
}

/// Five stars plus a review count; clicking opens the reviews
pub fn rating_widget(rating: &Rating, target: WidgetTarget<'_>) -> VNode {
    let filled = rating.filled_stars();
    let stars = (0..5).map(|i| {
        let class = if i < filled { "star star--filled" } else { "star" };
        VNode::element("span")
            .with_class(class)
            .with_child(VNode::text("★"))
    });

    action_button("widget-rating", "rate", target)
        .with_attr("aria-label", format!("Rated {:.1} out of 5", rating.average))
        .with_children(stars)
        .with_child(
            VNode::element("span")
                .with_class("rating-count")
                .with_child(VNode::text(format!("({})", rating.count))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_and_live_widgets_share_shape() {
        let inert = favorite_button(None);
        let live = favorite_button(Some("res-1"));

        assert!(inert.same_shape(&live));
        assert_eq!(inert.attr("data-interactive"), Some("false"));
        assert_eq!(inert.attr("aria-disabled"), Some("true"));
        assert_eq!(inert.attr("data-target"), Some(""));
        assert_eq!(live.attr("data-interactive"), Some("true"));
        assert_eq!(live.attr("data-target"), Some("res-1"));
    }

    #[test]
    fn test_rating_always_has_five_stars() {
        for average in [0.0, 2.4, 5.0] {
            let widget = rating_widget(&Rating { average, count: 7 }, None);
            let mut stars = Vec::new();
            widget.find_all_by_class("star", &mut stars);
            assert_eq!(stars.len(), 5);
        }

        let widget = rating_widget(&Rating { average: 3.0, count: 7 }, None);
        let mut filled = Vec::new();
        widget.find_all_by_class("star--filled", &mut filled);
        assert_eq!(filled.len(), 3);
        assert_eq!(
            widget.find_by_class("rating-count").map(|n| n.text_content()),
            Some("(7)".to_string())
        );
    }
}
