//! Graph statistics and DAG detection.
//!
//! Everything here is a pure function of the submitted nodes and edges: no I/O,
//! no shared state, identical results for identical input.
//!
//! ## Algorithm
//!
//! Acyclicity is decided with Kahn's algorithm. Every node starts at in-degree
//! zero; each edge whose endpoints are both known nodes adds one to its
//! target. A FIFO worklist is seeded with the zero in-degree nodes, and each
//! node popped from it releases its successors. The graph is acyclic exactly
//! when every declared node gets popped.
//!
//! Edges naming an unknown node are left out of the degree accounting but are
//! still counted in [`GraphStats::num_edges`].

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::trace;

use crate::error::{Result, ValidationError};
use crate::types::{Edge, GraphStats, Node, NodeId};

/// Statistics plus the edges that were left out of the cycle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Counts and verdict
    pub stats: GraphStats,
    /// Positions of edges naming an unknown node, in submission order
    pub unresolved: Vec<usize>,
}

/// Compute node/edge counts and the acyclicity verdict.
///
/// # Errors
///
/// Returns [`Error::Validation`](crate::Error::Validation) if a node lacks a
/// usable `id`, or an edge a usable `source`/`target`. No partial result is
/// produced in that case.
pub fn analyze(nodes: &[Node], edges: &[Edge]) -> Result<GraphStats> {
    inspect(nodes, edges).map(|analysis| analysis.stats)
}

/// Decide whether the graph formed by `nodes` and its resolvable `edges` is a DAG.
///
/// An empty node list is trivially acyclic and its edges are not inspected.
///
/// # Errors
///
/// Same as [`analyze`].
pub fn is_acyclic(nodes: &[Node], edges: &[Edge]) -> Result<bool> {
    inspect(nodes, edges).map(|analysis| analysis.stats.is_dag)
}

/// Analyze the graph in one pass, also reporting unresolved edges.
///
/// With no nodes every edge is unresolved; edges are then not validated.
///
/// # Errors
///
/// Same as [`analyze`].
pub fn inspect(nodes: &[Node], edges: &[Edge]) -> Result<Analysis> {
    if nodes.is_empty() {
        return Ok(Analysis {
            stats: GraphStats {
                num_nodes: 0,
                num_edges: edges.len(),
                is_dag: true,
            },
            unresolved: (0..edges.len()).collect(),
        });
    }

    let graph = PipelineGraph::build(nodes, edges)?;
    let visited = graph.kahn_visit_count();

    trace!(
        nodes = nodes.len(),
        edges = edges.len(),
        resolved_edges = graph.graph.edge_count(),
        visited,
        "Kahn traversal complete"
    );

    Ok(Analysis {
        stats: GraphStats {
            num_nodes: nodes.len(),
            num_edges: edges.len(),
            is_dag: visited == nodes.len(),
        },
        unresolved: graph.unresolved,
    })
}

/// Adjacency structure over the known node identifiers.
///
/// Edge weights are the positions of the edges in the submitted list.
struct PipelineGraph {
    graph: DiGraph<NodeId, usize>,
    unresolved: Vec<usize>,
}

impl PipelineGraph {
    fn build(nodes: &[Node], edges: &[Edge]) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

        // Duplicate ids share one graph node; `num_nodes` still counts both,
        // so such a graph can never reach a full visit count.
        for (index, node) in nodes.iter().enumerate() {
            let id = node
                .id()
                .map_err(|problem| ValidationError::node(index, Node::ID, problem))?;
            node_map
                .entry(id)
                .or_insert_with_key(|id| graph.add_node(id.clone()));
        }

        let mut unresolved = Vec::new();
        for (index, edge) in edges.iter().enumerate() {
            let source = edge
                .source()
                .map_err(|problem| ValidationError::edge(index, Edge::SOURCE, problem))?;
            let target = edge
                .target()
                .map_err(|problem| ValidationError::edge(index, Edge::TARGET, problem))?;

            match (node_map.get(&source), node_map.get(&target)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, index);
                }
                _ => unresolved.push(index),
            }
        }

        Ok(Self { graph, unresolved })
    }

    /// Run Kahn's algorithm and return how many nodes were dequeued.
    fn kahn_visit_count(&self) -> usize {
        let mut in_degree = vec![0usize; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            in_degree[edge.target().index()] += 1;
        }

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .collect();

        let mut visited = 0;
        while let Some(current) = queue.pop_front() {
            visited += 1;

            for edge in self.graph.edges(current) {
                let next = edge.target();
                in_degree[next.index()] -= 1;
                if in_degree[next.index()] == 0 {
                    queue.push_back(next);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Element, Error, Problem};
    use rstest::rstest;
    use serde_json::json;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id)).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    #[rstest]
    #[case::empty(&[], &[], true)]
    #[case::empty_nodes_ignore_edges(&[], &[("a", "b"), ("b", "a")], true)]
    #[case::single_node(&["a"], &[], true)]
    #[case::self_loop(&["a"], &[("a", "a")], false)]
    #[case::chain(&["a", "b", "c"], &[("a", "b"), ("b", "c")], true)]
    #[case::diamond(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")], true)]
    #[case::triangle(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")], false)]
    #[case::triangle_plus_isolated(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "a")], false)]
    #[case::two_cycle(&["a", "b"], &[("a", "b"), ("b", "a")], false)]
    #[case::parallel_edges(&["a", "b"], &[("a", "b"), ("a", "b")], true)]
    #[case::ghost_target(&["a"], &[("a", "ghost")], true)]
    #[case::ghost_source(&["a"], &[("ghost", "a")], true)]
    #[case::cycle_through_ghost_ignored(&["a", "b"], &[("a", "b"), ("b", "ghost"), ("ghost", "a")], true)]
    #[case::downstream_of_cycle(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c")], false)]
    fn acyclicity(
        #[case] node_ids: &[&str],
        #[case] edge_pairs: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let result = is_acyclic(&nodes(node_ids), &edges(edge_pairs)).expect("valid input");
        assert_eq!(result, expected);
    }

    #[test]
    fn counts_include_unresolved_edges() {
        let stats = analyze(&nodes(&["a"]), &edges(&[("a", "ghost")])).expect("valid input");

        assert_eq!(
            stats,
            GraphStats {
                num_nodes: 1,
                num_edges: 1,
                is_dag: true,
            }
        );
    }

    #[test]
    fn inspect_reports_unresolved_edges_with_stats() {
        let analysis = inspect(
            &nodes(&["a", "b"]),
            &edges(&[("a", "b"), ("b", "ghost"), ("ghost", "a")]),
        )
        .expect("valid input");

        assert_eq!(
            analysis,
            Analysis {
                stats: GraphStats {
                    num_nodes: 2,
                    num_edges: 3,
                    is_dag: true,
                },
                unresolved: vec![1, 2],
            }
        );
    }

    #[test]
    fn inspect_without_nodes_does_not_validate_edges() {
        let malformed: Edge = serde_json::from_value(json!({"label": "x"})).expect("object");

        let analysis = inspect(&[], &[malformed]).expect("edges are not inspected");

        assert!(analysis.stats.is_dag);
        assert_eq!(analysis.unresolved, vec![0]);
    }

    #[test]
    fn integer_ids_beyond_i64_resolve_edges() {
        let big = u64::MAX;
        let nodes = vec![Node::new(big), Node::new(1_i64)];
        let edges = vec![Edge::new(big, 1_i64), Edge::new(1_i64, big)];

        let analysis = inspect(&nodes, &edges).expect("valid input");

        assert!(!analysis.stats.is_dag);
        assert!(analysis.unresolved.is_empty());
    }

    #[test]
    fn duplicate_ids_are_counted_but_never_fully_visited() {
        let stats = analyze(&nodes(&["a", "a"]), &[]).expect("valid input");

        assert_eq!(stats.num_nodes, 2);
        assert!(!stats.is_dag);
    }

    #[test]
    fn integer_and_string_ids_do_not_match_each_other() {
        let nodes = vec![Node::new(1_i64), Node::new(2_i64)];
        let edges = vec![Edge::new(1_i64, 2_i64), Edge::new("2", "1")];

        let analysis = inspect(&nodes, &edges).expect("valid input");
        assert!(analysis.stats.is_dag);
        assert_eq!(analysis.unresolved, vec![1]);
    }

    #[test]
    fn metadata_is_not_inspected() {
        let nodes = vec![
            Node::new("in").with("data", json!({"nested": [1, 2, {"deep": null}]})),
            Node::new("out").with("type", "customOutput"),
        ];
        let edges = vec![Edge::new("in", "out").with("animated", true)];

        assert!(is_acyclic(&nodes, &edges).expect("valid input"));
    }

    #[test]
    fn node_without_id_is_a_validation_error() {
        let unnamed: Node = serde_json::from_value(json!({"label": "x"})).expect("object");
        let nodes = vec![Node::new("a"), unnamed];

        let err = analyze(&nodes, &[]).expect_err("missing id should fail");

        let Error::Validation(validation) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(validation.element, Element::Node);
        assert_eq!(validation.index, 1);
        assert_eq!(validation.field, "id");
        assert_eq!(validation.problem, Problem::Missing);
    }

    #[test]
    fn edge_with_bad_target_is_a_validation_error() {
        let edge: Edge =
            serde_json::from_value(json!({"source": "a", "target": 1.5})).expect("object");

        let err = analyze(&nodes(&["a"]), &[Edge::new("a", "a"), edge]).expect_err("should fail");

        let Error::Validation(validation) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(validation.element, Element::Edge);
        assert_eq!(validation.index, 1);
        assert_eq!(validation.field, "target");
        assert_eq!(validation.problem, Problem::InvalidType);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(id.as_str())).collect();
        let edges: Vec<Edge> = ids
            .windows(2)
            .map(|w| Edge::new(w[0].as_str(), w[1].as_str()))
            .collect();

        assert!(is_acyclic(&nodes, &edges).expect("valid input"));
    }
}
