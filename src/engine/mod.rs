use crate::config::EngineConfig;
use crate::dispatcher::NodeDispatcher;
use crate::error::{ExecutionError, FlowchartError, LoadFailure};
use crate::flowchart::{FlowGraph, Flowchart, IntoFlowchart, Node};
use crate::resolver::EdgeResolver;
use crate::tool::{NodeResponse, ToolRegistry, ToolResolver};
use crate::trace::ExecutionTrace;
use crate::value::{Value, Variables};
use std::fmt;
use tracing::{debug, info, instrument};

mod cancel;

pub use cancel::CancellationFlag;

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// No flowchart loaded, or loaded but not started.
    #[default]
    Idle,
    Running,
    /// Stopped on an unmatched edge or the requested end node.
    Completed,
    /// Stopped by a tool fault, the step budget, or cancellation.
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Idle => write!(f, "idle"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

enum StepOutcome {
    Advanced { response: NodeResponse, next: String },
    Halted(Option<NodeResponse>),
}

/// Walks a loaded flowchart, dispatching every node to a tool from `R`.
///
/// The engine owns the flowchart for the duration of a run, together with its name index and
/// the trace of the current run.
pub struct Engine<R: ToolResolver = ToolRegistry> {
    graph: Option<FlowGraph>,
    tools: R,
    config: EngineConfig,
    cancellation: CancellationFlag,
    trace: ExecutionTrace,
    status: RunStatus,
    steps: usize,
}

pub struct EngineBuilder<R: ToolResolver> {
    tools: R,
    config: EngineConfig,
    cancellation: CancellationFlag,
}

impl<R: ToolResolver> EngineBuilder<R> {
    pub fn new(tools: R) -> Self {
        Self {
            tools,
            config: EngineConfig::default(),
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn build(self) -> Engine<R> {
        Engine {
            graph: None,
            tools: self.tools,
            config: self.config,
            cancellation: self.cancellation,
            trace: ExecutionTrace::new(),
            status: RunStatus::Idle,
            steps: 0,
        }
    }
}

impl<R: ToolResolver> Engine<R> {
    pub fn new(tools: R) -> Self {
        EngineBuilder::new(tools).build()
    }

    pub fn builder(tools: R) -> EngineBuilder<R> {
        EngineBuilder::new(tools)
    }

    /// Indexes and takes ownership of `flowchart`.
    ///
    /// On failure any previously loaded flowchart is dropped and the engine is left idle, so
    /// later `execute`/`next` calls return `None`.
    pub fn load(&mut self, flowchart: Flowchart) -> Result<(), FlowchartError> {
        self.reset();
        let graph = FlowGraph::new(flowchart, &self.config)?;
        info!(nodes = graph.node_count(), "flowchart loaded");
        self.graph = Some(graph);
        Ok(())
    }

    /// Converts a custom format and loads the result.
    pub fn load_from(&mut self, source: impl IntoFlowchart) -> Result<(), LoadFailure> {
        self.reset();
        let flowchart = source.into_flowchart()?;
        Ok(self.load(flowchart)?)
    }

    /// Drops the loaded flowchart together with the previous run's trace and step count.
    fn reset(&mut self) {
        self.graph = None;
        self.status = RunStatus::Idle;
        self.trace.clear();
        self.steps = 0;
    }

    /// Hands the flowchart, including its run state, back to the caller.
    pub fn unload(&mut self) -> Option<Flowchart> {
        self.status = RunStatus::Idle;
        self.graph.take().map(FlowGraph::into_flowchart)
    }

    /// Runs from `start_name` (or the first node) until no edge can be taken or the cursor
    /// reaches `end_name`.
    ///
    /// An unresolvable start name falls back to the first declared node. The end node itself
    /// is not executed. Returns the last response, or `None` when nothing is loaded or the
    /// flowchart has no nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn execute(
        &mut self,
        start_name: Option<&str>,
        end_name: Option<&str>,
    ) -> Result<Option<NodeResponse>, ExecutionError> {
        let Some(graph) = self.graph.as_mut() else {
            debug!("execute called without a flowchart");
            return Ok(None);
        };

        let start = match start_name.and_then(|name| graph.find_node(name)) {
            Some(node) => node.name.clone(),
            None => {
                if let Some(name) = start_name {
                    debug!(start = name, "start node not found, using first node");
                }
                match graph.first_node() {
                    Some(node) => node.name.clone(),
                    None => return Ok(None),
                }
            }
        };

        info!(start = %start, end = ?end_name, "run started");
        graph.flowchart.current_node = Some(start);
        self.trace.clear();
        self.steps = 0;
        self.status = RunStatus::Running;

        loop {
            match self.step()? {
                StepOutcome::Advanced { response, next } => {
                    if end_name == Some(next.as_str()) {
                        self.status = RunStatus::Completed;
                        info!(steps = self.steps, end = %next, "run reached end node");
                        return Ok(Some(response));
                    }
                }
                StepOutcome::Halted(response) => {
                    info!(steps = self.steps, "run completed");
                    return Ok(response);
                }
            }
        }
    }

    /// Performs one user-visible transition.
    ///
    /// Executes the node under the cursor and advances. Decision nodes never hold the cursor:
    /// when the next node is a decision it is executed straight away, until the cursor rests
    /// on a non-decision node or the run ends. The first call after a load starts from the
    /// flowchart's `current_node` if it names a node, otherwise from the first node.
    #[allow(clippy::should_implement_trait)]
    #[instrument(level = "trace", skip(self))]
    pub fn next(&mut self) -> Result<Option<NodeResponse>, ExecutionError> {
        let Some(graph) = self.graph.as_mut() else {
            return Ok(None);
        };

        match self.status {
            RunStatus::Completed | RunStatus::Failed => return Ok(None),
            RunStatus::Running => {}
            RunStatus::Idle => {
                let start = match graph.current_node().or_else(|| graph.first_node()) {
                    Some(node) => node.name.clone(),
                    None => return Ok(None),
                };
                debug!(start = %start, "stepping started");
                graph.flowchart.current_node = Some(start);
                self.trace.clear();
                self.steps = 0;
                self.status = RunStatus::Running;
            }
        }

        loop {
            match self.step()? {
                StepOutcome::Advanced { response, next } => {
                    let transparent = self
                        .graph
                        .as_ref()
                        .and_then(|graph| graph.find_node(&next))
                        .is_some_and(|node| node.is_decision(&self.config.decision_type));
                    if !transparent {
                        return Ok(Some(response));
                    }
                    debug!(node = %next, "stepping through decision node");
                }
                StepOutcome::Halted(response) => return Ok(response),
            }
        }
    }

    /// Moves the cursor to `name` and makes the engine runnable again, also from a terminal
    /// state. Returns `false` if nothing is loaded or the name is unknown.
    pub fn seed(&mut self, name: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        if graph.find_node(name).is_none() {
            return false;
        }
        graph.flowchart.current_node = Some(name.to_string());
        self.steps = 0;
        self.status = RunStatus::Running;
        true
    }

    /// Executes the node under the cursor and resolves its successor.
    fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        let Self {
            graph,
            tools,
            config,
            cancellation,
            trace,
            status,
            steps,
        } = self;

        let Some(graph) = graph.as_mut() else {
            return Ok(StepOutcome::Halted(None));
        };
        let Some(position) = graph
            .flowchart
            .current_node
            .as_deref()
            .and_then(|name| graph.position(name))
        else {
            *status = RunStatus::Completed;
            return Ok(StepOutcome::Halted(graph.flowchart.return_value.clone()));
        };
        let node_name = graph.flowchart.nodes[position].name.clone();

        if cancellation.is_cancelled() {
            *status = RunStatus::Failed;
            info!(node = %node_name, "run cancelled");
            return Err(ExecutionError::Cancelled { node: node_name });
        }
        if let Some(limit) = config.max_steps {
            if *steps >= limit {
                *status = RunStatus::Failed;
                return Err(ExecutionError::StepLimitExceeded {
                    limit,
                    node: node_name,
                });
            }
        }
        *steps += 1;

        let flowchart = &mut graph.flowchart;
        let dispatched = NodeDispatcher::new(&*tools).execute_node(
            &flowchart.nodes[position],
            &mut flowchart.variables,
            trace,
        );
        let response = match dispatched {
            Ok(response) => response,
            Err(e) => {
                *status = RunStatus::Failed;
                return Err(e);
            }
        };
        flowchart.return_value = Some(response.clone());

        let next = EdgeResolver::new(graph)
            .next_node(&graph.flowchart.nodes[position], &response)
            .map(|node| node.name.clone());
        graph.flowchart.current_node = next.clone();

        match next {
            Some(next) => Ok(StepOutcome::Advanced { response, next }),
            None => {
                *status = RunStatus::Completed;
                Ok(StepOutcome::Halted(Some(response)))
            }
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The trace of the most recent run, kept after failures for diagnosis.
    pub fn trace(&self) -> &ExecutionTrace {
        &self.trace
    }

    pub fn flowchart(&self) -> Option<&Flowchart> {
        self.graph.as_ref().map(FlowGraph::flowchart)
    }

    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.graph.as_ref().and_then(|graph| graph.find_node(name))
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.graph.as_ref().and_then(FlowGraph::current_node)
    }

    pub fn variables(&self) -> Option<&Variables> {
        self.flowchart().map(|flowchart| &flowchart.variables)
    }

    /// Sets a shared variable on the loaded flowchart. Returns `false` if nothing is loaded.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.graph.as_mut() {
            Some(graph) => {
                graph
                    .flowchart
                    .variables
                    .insert(name.into(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn last_response(&self) -> Option<&NodeResponse> {
        self.flowchart()
            .and_then(|flowchart| flowchart.return_value.as_ref())
    }

    /// Number of nodes executed since the run was last started or seeded.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tools(&self) -> &R {
        &self.tools
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }
}
