//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nagare crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let artifact = FlowchartArtifact::from_file("path/to/flow.nagare")?;
//! let mut engine = Engine::new(ToolRegistry::new());
//! engine.load(artifact.into_flowchart())?;
//!
//! let last = engine.execute(None, None)?;
//! println!("Last response: {:?}", last);
//! println!("{}", TraceFormatter::format_trace(engine.trace()));
//! # Ok(())
//! # }
//! ```

// Engine and its collaborators
pub use crate::config::{DanglingEdgePolicy, DuplicateNamePolicy, EngineConfig};
pub use crate::engine::{CancellationFlag, Engine, EngineBuilder, RunStatus};
pub use crate::tool::{FnTool, NodeResponse, Tool, ToolRegistry, ToolResolver};

// Graph model
pub use crate::flowchart::{Edge, FlowGraph, Flowchart, FlowchartArtifact, IntoFlowchart, Node};
pub use crate::value::{Value, Variables};

// Error types
pub use crate::error::{ExecutionError, FlowchartError, LoadError, ToolError};

// Trace
pub use crate::trace::{ExecutionTrace, TraceEntry, TraceFormatter};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
