use crate::constants::LABEL_PREFIX_CHARS;
use crate::constants::MIN_LINK_WIDTH;
use crate::model::GraphNode;
use crate::model::NodeGroup;
use crate::utils::truncate_address;

pub const BACKGROUND_COLOR: &str = "#0d0e12";
pub const BORDER_COLOR: &str = "rgba(155, 135, 245, 0.2)";
pub const HEADER_COLOR: &str = "#0a0a14";
pub const HEADER_BORDER_COLOR: &str = "rgba(155, 135, 245, 0.1)";
pub const TEXT_COLOR: &str = "#D6BCFA";
pub const NODE_STROKE_COLOR: &str = "#ffffff";
pub const LINK_GRADIENT: [&str; 2] = ["#9b87f5", "#D6BCFA"];
pub const LINK_OPACITY: f64 = 0.6;
pub const TOOLTIP_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub radius: f64,
    pub color: &'static str,
    pub label: &'static str,
    pub labelled: bool,
}

pub fn node_style(group: NodeGroup) -> NodeStyle {
    match group {
        NodeGroup::Primary => NodeStyle {
            radius: 10.0,
            color: "#D6BCFA",
            label: "Main Address",
            labelled: true,
        },
        NodeGroup::Source => NodeStyle {
            radius: 7.0,
            color: "#9b87f5",
            label: "Input Address",
            labelled: false,
        },
        NodeGroup::Sink => NodeStyle {
            radius: 6.0,
            color: "#6E59A5",
            label: "Output Address",
            labelled: false,
        },
    }
}

/// Text drawn next to a node; only the primary address is labelled.
pub fn node_label(node: &GraphNode) -> Option<String> {
    node_style(node.group)
        .labelled
        .then(|| truncate_address(&node.id, LABEL_PREFIX_CHARS))
}

/// Stroke width grows with the square root of the transferred value.
pub fn link_width(value: f64) -> f64 {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    value.sqrt() * 0.5 + MIN_LINK_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_ordered_by_group() {
        let primary = node_style(NodeGroup::Primary).radius;
        let source = node_style(NodeGroup::Source).radius;
        let sink = node_style(NodeGroup::Sink).radius;

        assert!(primary > source && source > sink);
        assert!(sink > crate::constants::DEFAULT_NODE_RADIUS);
    }

    #[test]
    fn only_primary_is_labelled() {
        let primary = GraphNode {
            id: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
            group: NodeGroup::Primary,
        };
        let sink = GraphNode {
            id: "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy".to_string(),
            group: NodeGroup::Sink,
        };

        assert_eq!(node_label(&primary).as_deref(), Some("bc1qxy2k..."));
        assert_eq!(node_label(&sink), None);
    }

    #[test]
    fn link_width_is_monotonic_with_floor() {
        assert_eq!(link_width(0.0), MIN_LINK_WIDTH);
        assert_eq!(link_width(-3.0), MIN_LINK_WIDTH);
        assert_eq!(link_width(f64::NAN), MIN_LINK_WIDTH);
        assert_eq!(link_width(4.0), 1.5);
        assert!(link_width(0.01) < link_width(0.02));
    }
}
