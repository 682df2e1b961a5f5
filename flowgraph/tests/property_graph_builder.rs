use std::collections::HashMap;
use std::collections::HashSet;

use proptest::prelude::*;

use flowgraph::build_graph;
use flowgraph::model::AddressView;
use flowgraph::model::NodeGroup;
use flowgraph::model::Transaction;
use flowgraph::model::TransferEndpoint;

const PRIMARY: &str = "A";

/// Small address alphabet so that roles collide often
fn arbitrary_address() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]).prop_map(str::to_string)
}

fn arbitrary_endpoints() -> impl Strategy<Value = Vec<TransferEndpoint>> {
    prop::collection::vec(
        (arbitrary_address(), 0u64..=500_000_000u64)
            .prop_map(|(address, sats)| TransferEndpoint::new(address, sats as f64 / 1e8)),
        0..=4,
    )
}

fn arbitrary_view() -> impl Strategy<Value = AddressView> {
    prop::collection::vec((arbitrary_endpoints(), arbitrary_endpoints()), 0..=8).prop_map(|txs| {
        let transactions = txs
            .into_iter()
            .enumerate()
            .map(|(i, (inputs, outputs))| Transaction::new(format!("t{}", i), inputs, outputs))
            .collect();
        AddressView::new(PRIMARY, transactions)
    })
}

/// Group each address should keep: the role of its first appearance
fn expected_groups(view: &AddressView) -> HashMap<String, NodeGroup> {
    let mut groups = HashMap::new();
    groups.insert(view.address.clone(), NodeGroup::Primary);
    for tx in &view.transactions {
        for input in &tx.inputs {
            groups.entry(input.address.clone()).or_insert(NodeGroup::Source);
        }
        for output in &tx.outputs {
            groups.entry(output.address.clone()).or_insert(NodeGroup::Sink);
        }
    }
    groups
}

proptest! {
    /// Property: one node per distinct address, and every link endpoint is a node
    #[test]
    fn prop_nodes_unique_and_links_closed(view in arbitrary_view()) {
        let graph = build_graph(&view);

        let ids: Vec<&str> = graph.nodes().map(|node| node.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());
        prop_assert_eq!(ids.first().copied(), Some(PRIMARY));

        for link in graph.links() {
            prop_assert!(graph.contains(&link.source));
            prop_assert!(graph.contains(&link.target));
        }
    }

    /// Property: a node keeps the role it was first seen in
    #[test]
    fn prop_group_is_first_seen_role(view in arbitrary_view()) {
        let graph = build_graph(&view);
        let expected = expected_groups(&view);

        prop_assert_eq!(graph.node_count(), expected.len());
        for node in graph.nodes() {
            prop_assert_eq!(Some(&node.group), expected.get(&node.id));
        }
    }

    /// Property: one link per input, plus one per output not paying the primary back
    #[test]
    fn prop_link_count(view in arbitrary_view()) {
        let graph = build_graph(&view);
        let expected: usize = view
            .transactions
            .iter()
            .map(|tx| tx.inputs.len() + tx.outputs.iter().filter(|output| output.address != PRIMARY).count())
            .sum();

        prop_assert_eq!(graph.link_count(), expected);
    }

    /// Property: the only primary self-links come from inputs
    #[test]
    fn prop_change_outputs_make_no_self_loop(view in arbitrary_view()) {
        let graph = build_graph(&view);
        let self_inputs: usize = view
            .transactions
            .iter()
            .map(|tx| tx.inputs.iter().filter(|input| input.address == PRIMARY).count())
            .sum();
        let self_links = graph
            .links()
            .filter(|link| link.source == PRIMARY && link.target == PRIMARY)
            .count();

        prop_assert_eq!(self_links, self_inputs);
    }

    /// Property: identical input gives an identical graph
    #[test]
    fn prop_build_is_deterministic(view in arbitrary_view()) {
        let first = build_graph(&view);
        let second = build_graph(&view);

        prop_assert_eq!(first.to_export(), second.to_export());
        prop_assert!(first == second);
    }
}
