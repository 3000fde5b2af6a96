//! Common test utilities for building flowcharts and tool registries.
use nagare::prelude::*;
use nagare::tool::args::{require_i64, require_str};

/// The age check used across the suite.
///
/// `start` greets, `decision` checks `age >= 18`, then `adult` or `child` ends the run.
#[allow(dead_code)]
pub fn age_flowchart(age: i64) -> Flowchart {
    Flowchart::new(
        vec![
            Node::new("start", "start")
                .with_id(1)
                .with_function("greet")
                .with_argument("name", "Ada"),
            Node::new("decision", "decision")
                .with_id(2)
                .with_function("check_age"),
            Node::new("adult", "process")
                .with_id(3)
                .with_function("adult_message"),
            Node::new("child", "process")
                .with_id(4)
                .with_function("child_message"),
        ],
        vec![
            Edge::new("start", "decision"),
            Edge::when("decision", "adult", true),
            Edge::when("decision", "child", false),
        ],
    )
    .with_variable("age", age)
}

/// Deterministic stand-ins for the demonstration tools.
#[allow(dead_code)]
pub fn age_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with_fn("greet", &["name"], |args| {
            Ok(NodeResponse::message(format!(
                "Hello, {}!",
                require_str(&args, "name")?
            )))
        })
        .with_fn("check_age", &["age"], |args| {
            Ok(NodeResponse::condition(require_i64(&args, "age")? >= 18))
        })
        .with_fn("adult_message", &[], |_| {
            Ok(NodeResponse::message("You are an adult. Exiting."))
        })
        .with_fn("child_message", &[], |_| {
            Ok(NodeResponse::message("You are a child. Trying again."))
        })
}

/// A straight line of `count` nodes, each calling `noop`.
#[allow(dead_code)]
pub fn chain_flowchart(count: usize) -> Flowchart {
    let nodes = (0..count)
        .map(|i| Node::new(format!("n{}", i), "process").with_function("noop"))
        .collect();
    let edges = (1..count)
        .map(|i| Edge::new(format!("n{}", i - 1), format!("n{}", i)))
        .collect();
    Flowchart::new(nodes, edges)
}

/// Two nodes pointing at each other with unconditional edges.
#[allow(dead_code)]
pub fn cycle_flowchart() -> Flowchart {
    Flowchart::new(
        vec![
            Node::new("ping", "process").with_function("noop"),
            Node::new("pong", "process").with_function("noop"),
        ],
        vec![Edge::new("ping", "pong"), Edge::new("pong", "ping")],
    )
}

#[allow(dead_code)]
pub fn noop_registry() -> ToolRegistry {
    ToolRegistry::new().with_fn("noop", &[], |_| Ok(NodeResponse::default()))
}

#[allow(dead_code)]
pub fn loaded_engine(flowchart: Flowchart, tools: ToolRegistry) -> Engine {
    let mut engine = Engine::new(tools);
    engine.load(flowchart).expect("Failed to load flowchart");
    engine
}
