use crate::value::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a loader before the engine has anything to run.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Flowchart file '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Flowchart file '{}' is empty", .0.display())]
    EmptyInput(PathBuf),

    #[error("Flowchart does not match the expected schema: {0}")]
    MalformedSchema(String),

    #[error("Could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems found while indexing a flowchart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowchartError {
    #[error("Node name '{0}' is declared more than once")]
    DuplicateNodeName(String),

    #[error("Edge from '{source_node}' points to unknown node '{target_node}'")]
    DanglingEdgeTarget {
        source_node: String,
        target_node: String,
    },
}

/// Errors that can occur when converting a custom user format into a `Flowchart`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Failure to hand a converted flowchart to the engine.
#[derive(Error, Debug, Clone)]
pub enum LoadFailure {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Flowchart(#[from] FlowchartError),
}

/// A fault raised by a tool while it runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Argument '{name}' expected {expected}, but found value '{found}'")]
    InvalidArgument {
        name: String,
        expected: String,
        found: Value,
    },

    #[error("{0}")]
    Failed(String),
}

/// Errors that end a run in the failed state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Tool '{tool}' failed while executing node '{node}': {source}")]
    InvocationFailure {
        node: String,
        tool: String,
        #[source]
        source: ToolError,
    },

    #[error("Step limit of {limit} exceeded at node '{node}'")]
    StepLimitExceeded { limit: usize, node: String },

    #[error("Execution cancelled before node '{node}'")]
    Cancelled { node: String },
}

/// Errors raised while reading an engine configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while saving or loading a flowchart artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not access artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),
}
