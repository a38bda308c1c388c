//! Property tests for graph statistics and DAG detection.

use pipedag::{analyze, Edge, Node};
use proptest::prelude::*;

/// Node ids drawn from a small alphabet so duplicates and hits are common.
fn node_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]", 0..12)
}

/// Edges over a slightly larger alphabet, so some endpoints are unknown.
fn edge_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-h]", "[a-h]"), 0..24)
}

fn build(ids: &[String], pairs: &[(String, String)]) -> (Vec<Node>, Vec<Edge>) {
    (
        ids.iter().map(|id| Node::new(id.as_str())).collect(),
        pairs
            .iter()
            .map(|(s, t)| Edge::new(s.as_str(), t.as_str()))
            .collect(),
    )
}

proptest! {
    #[test]
    fn counts_always_match_input_lengths(ids in node_ids(), pairs in edge_pairs()) {
        let (nodes, edges) = build(&ids, &pairs);

        let stats = analyze(&nodes, &edges).expect("well-formed input");

        prop_assert_eq!(stats.num_nodes, ids.len());
        prop_assert_eq!(stats.num_edges, pairs.len());
    }

    #[test]
    fn empty_node_list_is_always_a_dag(pairs in edge_pairs()) {
        let (_, edges) = build(&[], &pairs);

        prop_assert!(analyze(&[], &edges).expect("well-formed input").is_dag);
    }

    #[test]
    fn forward_only_edges_form_a_dag(
        len in 1usize..40,
        raw in prop::collection::vec((0usize..40, 0usize..40), 0..80),
    ) {
        let nodes: Vec<Node> = (0..len).map(|i| Node::new(format!("n{i}"))).collect();
        let edges: Vec<Edge> = raw
            .into_iter()
            .map(|(a, b)| (a % len, b % len))
            .filter(|(a, b)| a < b)
            .map(|(a, b)| Edge::new(format!("n{a}"), format!("n{b}")))
            .collect();

        prop_assert!(analyze(&nodes, &edges).expect("well-formed input").is_dag);
    }

    #[test]
    fn closing_a_chain_makes_it_cyclic(len in 1usize..40, extra in 0usize..10) {
        let mut nodes: Vec<Node> = (0..len).map(|i| Node::new(format!("n{i}"))).collect();
        let mut edges: Vec<Edge> = (1..len)
            .map(|i| Edge::new(format!("n{}", i - 1), format!("n{i}")))
            .collect();
        edges.push(Edge::new(format!("n{}", len - 1), "n0"));
        // Disconnected acyclic nodes do not change the verdict.
        nodes.extend((0..extra).map(|i| Node::new(format!("island{i}"))));

        let stats = analyze(&nodes, &edges).expect("well-formed input");

        prop_assert!(!stats.is_dag);
        prop_assert_eq!(stats.num_nodes, len + extra);
    }
}
