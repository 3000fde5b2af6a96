//! # Nagare - Flowchart Execution Engine
//!
//! **Nagare** walks a directed graph of named nodes connected by conditional edges. Each node
//! may delegate its work to a registered *tool*; the tool's response decides which outgoing
//! edge is taken next. Flowcharts are authored elsewhere (spreadsheets, JSON, a visual editor)
//! and handed to the engine as an already-built [`flowchart::Flowchart`].
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Graph**: Parse your authoring format into your own structs and implement
//!     `IntoFlowchart`, or build a `Flowchart` directly from `Node`s and `Edge`s.
//! 2.  **Register Tools**: Fill a `ToolRegistry` with the functions your nodes name. Every tool
//!     declares the parameters it accepts and returns a `NodeResponse`.
//! 3.  **Execute**: Load the flowchart into an `Engine` and call `execute` to run to completion,
//!     or `next` to step through it one visible node at a time.
//! 4.  **Inspect**: Read the `ExecutionTrace` and the shared variables after the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//! use nagare::tool::args::{require_i64, require_str};
//!
//! fn main() -> Result<()> {
//!     // 1. Describe the graph.
//!     let flowchart = Flowchart::new(
//!         vec![
//!             Node::new("start", "start").with_function("greet").with_argument("name", "Ada"),
//!             Node::new("decision", "decision").with_function("check_age"),
//!             Node::new("adult", "process").with_function("adult_message"),
//!             Node::new("child", "process").with_function("child_message"),
//!         ],
//!         vec![
//!             Edge::new("start", "decision"),
//!             Edge::when("decision", "adult", true),
//!             Edge::when("decision", "child", false),
//!         ],
//!     )
//!     .with_variable("age", 20);
//!
//!     // 2. Register the tools the nodes refer to.
//!     let tools = ToolRegistry::new()
//!         .with_fn("greet", &["name"], |args| {
//!             Ok(NodeResponse::message(format!("Hello, {}!", require_str(&args, "name")?)))
//!         })
//!         .with_fn("check_age", &["age"], |args| {
//!             Ok(NodeResponse::condition(require_i64(&args, "age")? >= 18))
//!         })
//!         .with_fn("adult_message", &[], |_| Ok(NodeResponse::message("You are an adult.")))
//!         .with_fn("child_message", &[], |_| Ok(NodeResponse::message("You are a child.")));
//!
//!     // 3. Run it.
//!     let mut engine = Engine::new(tools);
//!     engine.load(flowchart)?;
//!     let last = engine.execute(None, None)?;
//!
//!     // 4. Inspect the outcome.
//!     println!("{}", TraceFormatter::format_path(engine.trace()));
//!     if let Some(message) = last.and_then(|response| response.message) {
//!         println!("-> {}", message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod flowchart;
pub mod prelude;
pub mod resolver;
pub mod tool;
pub mod trace;
pub mod value;
