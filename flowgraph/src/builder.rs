use tracing::debug;

use crate::model::AddressView;
use crate::model::GraphModel;
use crate::model::NodeGroup;

/// Build the address graph for a view.
///
/// The queried address becomes the `Primary` node. Every input endpoint adds a
/// link into the primary address, including inputs that are the primary address
/// itself. Every output endpoint adds a link out of the primary address unless
/// the output pays back to the primary address. Nodes keep the group of their
/// first appearance.
pub fn build_graph(view: &AddressView) -> GraphModel {
    let mut graph = GraphModel::new();
    let primary = graph.add_node(&view.address, NodeGroup::Primary);

    for tx in &view.transactions {
        for input in &tx.inputs {
            let source = graph.add_node(&input.address, NodeGroup::Source);
            graph.connect(source, primary, input.value);
        }

        for output in &tx.outputs {
            let sink = graph.add_node(&output.address, NodeGroup::Sink);
            if output.address != view.address {
                graph.connect(primary, sink, output.value);
            }
        }
    }

    debug!(
        "builder::build_graph::{}::transactions::{}::nodes::{}::links::{}",
        view.address,
        view.transactions.len(),
        graph.node_count(),
        graph.link_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::GraphLink;
    use crate::model::GraphNode;
    use crate::test_utils::assertions::TestAssertions;
    use crate::test_utils::fixtures::TestFixtures;

    fn node(
        id: &str,
        group: NodeGroup,
    ) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            group,
        }
    }

    fn link(
        source: &str,
        target: &str,
        value: f64,
    ) -> GraphLink {
        GraphLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
        }
    }

    #[test]
    fn change_output_to_primary_is_suppressed() {
        let graph = build_graph(&TestFixtures::change_to_self_view());

        let nodes: Vec<GraphNode> = graph.nodes().cloned().collect();
        assert_eq!(
            nodes,
            vec![node("A", NodeGroup::Primary), node("B", NodeGroup::Source), node("C", NodeGroup::Sink)]
        );

        let links: Vec<GraphLink> = graph.links().cloned().collect();
        assert_eq!(links, vec![link("B", "A", 1.0), link("A", "C", 0.5)]);
    }

    #[test]
    fn empty_view_yields_lone_primary() {
        let graph = build_graph(&AddressView::new("A", vec![]));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("A").map(|n| n.group), Some(NodeGroup::Primary));
        assert_eq!(graph.link_count(), 0);
    }

    #[test]
    fn primary_as_input_keeps_self_link() {
        let graph = build_graph(&TestFixtures::self_spend_view());

        assert_eq!(graph.node("A").map(|n| n.group), Some(NodeGroup::Primary));
        let links: Vec<GraphLink> = graph.links().cloned().collect();
        assert_eq!(links, vec![link("A", "A", 2.0), link("A", "D", 1.5)]);
    }

    #[test]
    fn repeated_transfers_stay_parallel() {
        let graph = build_graph(&TestFixtures::repeated_payer_view(3));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 3);
        assert!(graph.links().all(|l| l.source == "B" && l.target == "A"));
    }

    #[test]
    fn later_roles_do_not_regroup() {
        let graph = build_graph(&TestFixtures::role_swap_view());

        // B first pays in, then receives; E first receives, then pays in
        assert_eq!(graph.node("B").map(|n| n.group), Some(NodeGroup::Source));
        assert_eq!(graph.node("E").map(|n| n.group), Some(NodeGroup::Sink));
        assert_eq!(graph.link_count(), 4);
    }

    #[test]
    fn fixtures_build_consistent_graphs() {
        let views = [
            TestFixtures::change_to_self_view(),
            TestFixtures::self_spend_view(),
            TestFixtures::repeated_payer_view(4),
            TestFixtures::role_swap_view(),
            TestFixtures::star_view(5),
        ];

        for view in &views {
            TestAssertions::assert_graph_consistent(view, &build_graph(view));
        }
    }
}
