//! The rendered element set: everything a surface needs to draw one frame.

use crate::constants::DEFAULT_NODE_RADIUS;
use crate::constants::HEADER_HEIGHT;
use crate::constants::LEGEND_OFFSET_X;
use crate::constants::LEGEND_OFFSET_Y;
use crate::constants::LEGEND_ROW_HEIGHT;
use crate::constants::TITLE;
use crate::layout::simulation::SimNode;
use crate::layout::style::link_width;
use crate::layout::style::node_label;
use crate::layout::style::node_style;
use crate::layout::surface::SurfaceSize;
use crate::layout::view::Point;
use crate::layout::view::ViewTransform;
use crate::model::GraphModel;
use crate::model::NodeGroup;
use crate::utils::format_btc;

#[derive(Debug, Clone, PartialEq)]
pub struct LinkElement {
    pub source: usize,
    pub target: usize,
    pub from: Point,
    pub to: Point,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeElement {
    pub id: String,
    pub group: NodeGroup,
    pub position: Point,
    pub radius: f64,
    pub color: &'static str,
    pub label: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub offset: Point,
    pub radius: f64,
    pub color: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub origin: Point,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    fn for_width(width: f64) -> Self {
        let entries = NodeGroup::ALL
            .iter()
            .enumerate()
            .map(|(row, group)| {
                let style = node_style(*group);
                LegendEntry {
                    offset: Point::new(0.0, row as f64 * LEGEND_ROW_HEIGHT),
                    radius: DEFAULT_NODE_RADIUS,
                    color: style.color,
                    label: style.label,
                }
            })
            .collect();

        Self {
            origin: Point::new(width - LEGEND_OFFSET_X, HEADER_HEIGHT + LEGEND_OFFSET_Y),
            entries,
        }
    }
}

/// Hover card, positioned in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub anchor: Point,
    pub title: &'static str,
    pub address: String,
    pub value: Option<f64>,
}

impl Tooltip {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.to_string(), self.address.clone()];
        if let Some(value) = self.value {
            lines.push(format!("Value: {}", format_btc(value)));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: SurfaceSize,
    pub title: &'static str,
    pub header_height: f64,
    /// Applied to links, nodes and legend
    pub transform: ViewTransform,
    pub links: Vec<LinkElement>,
    pub nodes: Vec<NodeElement>,
    pub legend: Legend,
    pub tooltip: Option<Tooltip>,
}

impl Scene {
    /// Element set for `model`. Positions stay at the origin until the first sync.
    pub fn build(
        model: &GraphModel,
        size: SurfaceSize,
    ) -> Self {
        let nodes = model
            .nodes()
            .map(|node| {
                let style = node_style(node.group);
                NodeElement {
                    id: node.id.clone(),
                    group: node.group,
                    position: Point::default(),
                    radius: style.radius,
                    color: style.color,
                    label: node_label(node),
                    selected: false,
                }
            })
            .collect();

        let links = model
            .link_positions()
            .map(|(source, target, link)| LinkElement {
                source,
                target,
                from: Point::default(),
                to: Point::default(),
                width: link_width(link.value),
            })
            .collect();

        Self {
            size,
            title: TITLE,
            header_height: HEADER_HEIGHT,
            transform: ViewTransform::IDENTITY,
            links,
            nodes,
            legend: Legend::for_width(size.width),
            tooltip: None,
        }
    }

    pub fn sync_positions(
        &mut self,
        sim_nodes: &[SimNode],
    ) {
        for (element, sim) in self.nodes.iter_mut().zip(sim_nodes) {
            element.position = sim.position();
        }
        for link in &mut self.links {
            if let (Some(source), Some(target)) = (sim_nodes.get(link.source), sim_nodes.get(link.target)) {
                link.from = source.position();
                link.to = target.position();
            }
        }
    }

    pub fn set_selected(
        &mut self,
        selected: Option<usize>,
    ) {
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            node.selected = Some(idx) == selected;
        }
    }

    /// Topmost node whose circle contains `world`. Later nodes are drawn on top.
    pub fn node_at(
        &self,
        world: Point,
    ) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.position.distance_to(world) <= node.radius)
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::build_graph;
    use crate::test_utils::fixtures::TestFixtures;

    fn scene() -> Scene {
        let model = build_graph(&TestFixtures::change_to_self_view());
        Scene::build(
            &model,
            SurfaceSize {
                width: 600.0,
                height: 400.0,
            },
        )
    }

    #[test]
    fn mirrors_model_order() {
        let scene = scene();
        let ids: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(scene.links.len(), 2);
        assert_eq!((scene.links[0].source, scene.links[0].target), (1, 0));
        assert_eq!(scene.nodes[0].label.as_deref(), Some("A..."));
        assert_eq!(scene.legend.origin, Point::new(450.0, 60.0));
        assert_eq!(scene.legend.entries[2].label, "Output Address");
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut scene = scene();
        let sims = vec![
            SimNode::at(Point::new(0.0, 0.0)),
            SimNode::at(Point::new(4.0, 0.0)),
            SimNode::at(Point::new(100.0, 0.0)),
        ];
        scene.sync_positions(&sims);

        assert_eq!(scene.node_at(Point::new(2.0, 0.0)), Some(1));
        assert_eq!(scene.node_at(Point::new(-9.0, 0.0)), Some(0));
        assert_eq!(scene.node_at(Point::new(50.0, 0.0)), None);
        assert_eq!(scene.links[1].to, Point::new(100.0, 0.0));
    }

    #[test]
    fn tooltip_value_line_is_optional() {
        let mut tooltip = Tooltip {
            anchor: Point::default(),
            title: "Input Address",
            address: "B".to_string(),
            value: None,
        };
        assert_eq!(tooltip.lines(), vec!["Input Address", "B"]);

        tooltip.value = Some(1.0);
        assert_eq!(tooltip.lines()[2], "Value: 1.00000000 BTC");
    }
}
