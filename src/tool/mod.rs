use crate::error::ToolError;
use crate::value::Variables;
use ahash::AHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub mod args;
mod response;
#[cfg(feature = "sample-tools")]
pub mod samples;

pub use response::NodeResponse;

/// Defines the contract for a capability a node can delegate to.
pub trait Tool: Send + Sync {
    /// Names of the arguments this tool accepts. Anything else in the environment is dropped
    /// before `invoke` is called.
    fn parameters(&self) -> &[String];

    fn invoke(&self, args: Variables) -> Result<NodeResponse, ToolError>;
}

/// The single capability the engine needs from a tool registry.
pub trait ToolResolver {
    fn resolve(&self, name: &str) -> Option<&dyn Tool>;
}

impl<R: ToolResolver + ?Sized> ToolResolver for &R {
    fn resolve(&self, name: &str) -> Option<&dyn Tool> {
        (**self).resolve(name)
    }
}

type ToolFn = dyn Fn(Variables) -> Result<NodeResponse, ToolError> + Send + Sync;

/// Adapts a closure and a declared parameter list into a `Tool`.
pub struct FnTool {
    parameters: Vec<String>,
    func: Box<ToolFn>,
}

impl FnTool {
    pub fn new<F>(parameters: &[&str], func: F) -> Self
    where
        F: Fn(Variables) -> Result<NodeResponse, ToolError> + Send + Sync + 'static,
    {
        Self {
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            func: Box::new(func),
        }
    }
}

impl Tool for FnTool {
    fn parameters(&self) -> &[String] {
        &self.parameters
    }

    fn invoke(&self, args: Variables) -> Result<NodeResponse, ToolError> {
        (self.func)(args)
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// The default name-to-tool mapping.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: AHashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, name: &str, tool: impl Tool + 'static) -> Self {
        self.register(name, tool);
        self
    }

    pub fn with_fn<F>(self, name: &str, parameters: &[&str], func: F) -> Self
    where
        F: Fn(Variables) -> Result<NodeResponse, ToolError> + Send + Sync + 'static,
    {
        self.with_tool(name, FnTool::new(parameters, func))
    }

    /// Makes `alias` resolve to the tool already registered as `existing`.
    /// Unknown targets are ignored.
    pub fn with_alias(mut self, alias: &str, existing: &str) -> Self {
        match self.tools.get(existing).cloned() {
            Some(tool) => {
                self.tools.insert(alias.to_string(), tool);
            }
            None => warn!(alias, existing, "alias target is not registered"),
        }
        self
    }

    /// Registers a tool, replacing any previous tool with the same name.
    pub fn register(&mut self, name: &str, tool: impl Tool + 'static) {
        self.tools.insert(name.to_string(), Arc::new(tool));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolResolver for ToolRegistry {
    fn resolve(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
