//! Tests for edge selection.
use nagare::prelude::*;
use nagare::resolver::EdgeResolver;

fn graph(edges: Vec<Edge>) -> FlowGraph {
    let nodes = ["from", "x", "y", "z"]
        .into_iter()
        .map(|name| Node::new(name, "process"))
        .collect();
    FlowGraph::new(Flowchart::new(nodes, edges), &EngineConfig::default())
        .expect("Failed to index flowchart")
}

fn next_name(graph: &FlowGraph, condition: Option<bool>) -> Option<String> {
    let from = graph.find_node("from").unwrap();
    let response = NodeResponse {
        condition,
        ..Default::default()
    };
    EdgeResolver::new(graph)
        .next_node(from, &response)
        .map(|node| node.name.clone())
}

#[test]
fn test_condition_selects_matching_edge_regardless_of_order() {
    let forward = graph(vec![
        Edge::when("from", "x", true),
        Edge::when("from", "y", false),
    ]);
    let reversed = graph(vec![
        Edge::when("from", "y", false),
        Edge::when("from", "x", true),
    ]);

    for g in [&forward, &reversed] {
        assert_eq!(next_name(g, Some(true)).as_deref(), Some("x"));
        assert_eq!(next_name(g, Some(false)).as_deref(), Some("y"));
    }
}

#[test]
fn test_first_matching_edge_wins() {
    let g = graph(vec![
        Edge::new("from", "x"),
        Edge::new("from", "y"),
        Edge::when("from", "z", true),
    ]);

    assert_eq!(next_name(&g, Some(true)).as_deref(), Some("x"));
    assert_eq!(next_name(&g, None).as_deref(), Some("x"));
}

#[test]
fn test_unconditional_edge_accepts_any_condition() {
    let g = graph(vec![Edge::when("from", "x", true), Edge::new("from", "y")]);

    assert_eq!(next_name(&g, Some(false)).as_deref(), Some("y"));
    assert_eq!(next_name(&g, None).as_deref(), Some("y"));
}

#[test]
fn test_absent_condition_never_matches_conditional_edge() {
    let g = graph(vec![
        Edge::when("from", "x", true),
        Edge::when("from", "y", false),
    ]);

    assert_eq!(next_name(&g, None), None);
}

#[test]
fn test_no_outgoing_edges_terminates() {
    let g = graph(vec![Edge::new("x", "y")]);

    assert_eq!(next_name(&g, Some(true)), None);
}

#[test]
fn test_dangling_target_terminates() {
    let g = graph(vec![Edge::new("from", "ghost"), Edge::new("from", "x")]);

    // The dangling edge matches first and ends the run; later edges are not consulted
    assert_eq!(next_name(&g, None), None);
}

#[test]
fn test_dangling_target_rejected_in_strict_mode() {
    let config = EngineConfig::default().with_dangling_edges(DanglingEdgePolicy::Reject);
    let flowchart = Flowchart::new(
        vec![Node::new("from", "process")],
        vec![Edge::new("from", "ghost")],
    );

    let error = FlowGraph::new(flowchart, &config).unwrap_err();

    assert_eq!(
        error,
        FlowchartError::DanglingEdgeTarget {
            source_node: "from".to_string(),
            target_node: "ghost".to_string(),
        }
    );
}

#[test]
fn test_duplicate_names_last_wins() {
    let config = EngineConfig::default().with_duplicate_names(DuplicateNamePolicy::LastWins);
    let flowchart = Flowchart::new(
        vec![
            Node::new("a", "process").with_description("first"),
            Node::new("a", "process").with_description("second"),
        ],
        vec![],
    );

    let g = FlowGraph::new(flowchart, &config).unwrap();

    assert_eq!(g.find_node("a").unwrap().description, "second");
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.first_node().unwrap().description, "first");
}

#[test]
fn test_outgoing_edges_keep_declaration_order() {
    let g = graph(vec![
        Edge::new("from", "z"),
        Edge::new("x", "y"),
        Edge::new("from", "x"),
    ]);

    let targets: Vec<_> = g.outgoing_edges("from").map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["z", "x"]);
}
