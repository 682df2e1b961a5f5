use std::collections::HashSet;

use crate::model::AddressView;
use crate::model::GraphModel;
use crate::model::NodeGroup;

/// Custom assertions for graph-level invariants
pub struct TestAssertions;

impl TestAssertions {
    /// Assert that a graph built from `view` is internally consistent
    pub fn assert_graph_consistent(
        view: &AddressView,
        graph: &GraphModel,
    ) {
        let ids: Vec<&str> = graph.nodes().map(|node| node.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len(), "Graph holds duplicate node ids: {:?}", ids);

        // Exactly the addresses seen in the view
        let mut expected: HashSet<&str> = HashSet::new();
        expected.insert(view.address.as_str());
        for tx in &view.transactions {
            expected.extend(tx.inputs.iter().map(|input| input.address.as_str()));
            expected.extend(tx.outputs.iter().map(|output| output.address.as_str()));
        }
        assert_eq!(unique, expected, "Node set does not match the addresses in the view");

        assert_eq!(
            graph.node(&view.address).map(|node| node.group),
            Some(NodeGroup::Primary),
            "Primary address {} missing or regrouped",
            view.address
        );

        for link in graph.links() {
            assert!(graph.contains(&link.source), "Link source {} is not a node", link.source);
            assert!(graph.contains(&link.target), "Link target {} is not a node", link.target);
        }
    }
}
