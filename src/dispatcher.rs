use crate::error::ExecutionError;
use crate::flowchart::Node;
use crate::tool::{NodeResponse, Tool, ToolResolver};
use crate::trace::ExecutionTrace;
use crate::value::Variables;
use tracing::{debug, error, instrument, warn};

/// Resolves a node's function, invokes it, and folds the response back into the environment.
pub struct NodeDispatcher<'a, R: ToolResolver + ?Sized> {
    tools: &'a R,
}

impl<'a, R: ToolResolver + ?Sized> NodeDispatcher<'a, R> {
    pub fn new(tools: &'a R) -> Self {
        Self { tools }
    }

    /// Executes `node` against `variables` and records the outcome in `trace`.
    ///
    /// An unknown or absent function is not an error: it yields a diagnostic response and the
    /// run continues. A fault raised by the tool itself is returned as
    /// `ExecutionError::InvocationFailure` and nothing is recorded or merged.
    #[instrument(level = "trace", skip_all, fields(node = %node.name))]
    pub fn execute_node(
        &self,
        node: &Node,
        variables: &mut Variables,
        trace: &mut ExecutionTrace,
    ) -> Result<NodeResponse, ExecutionError> {
        let function = node.function.as_deref().unwrap_or_default();
        let response = match self.tools.resolve(function) {
            Some(tool) if !function.is_empty() => {
                let args = build_arguments(tool, variables, node.argument.as_ref());
                debug!(node = %node.name, tool = function, args = args.len(), "invoking tool");
                let response = tool.invoke(args).map_err(|source| {
                    error!(node = %node.name, tool = function, error = %source, "tool failed");
                    ExecutionError::InvocationFailure {
                        node: node.name.clone(),
                        tool: function.to_string(),
                        source,
                    }
                })?;
                if let Some(result) = &response.result {
                    for (name, value) in result {
                        variables.insert(name.clone(), value.clone());
                    }
                }
                response
            }
            _ => {
                warn!(node = %node.name, tool = function, "tool not found");
                NodeResponse::not_found(function)
            }
        };

        trace.record(node.name.clone(), response.clone());
        Ok(response)
    }
}

/// The shared variables overridden by the node's static arguments, restricted to the
/// parameters the tool declares.
pub fn build_arguments(
    tool: &dyn Tool,
    variables: &Variables,
    static_args: Option<&Variables>,
) -> Variables {
    tool.parameters()
        .iter()
        .filter_map(|param| {
            static_args
                .and_then(|args| args.get(param))
                .or_else(|| variables.get(param))
                .map(|value| (param.clone(), value.clone()))
        })
        .collect()
}
