use crate::tool::NodeResponse;
use crate::value::{Value, Variables};
use serde::{Deserialize, Serialize};

/// One step of the flowchart, optionally bound to a tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Informational only; navigation always goes through `name`.
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub function: Option<String>,
    /// Static arguments supplied by the graph author. These override shared variables.
    pub argument: Option<Variables>,
    pub description: String,
}

impl Node {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Adds a single static argument, creating the mapping if needed.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.argument
            .get_or_insert_with(Variables::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_decision(&self, decision_type: &str) -> bool {
        self.node_type == decision_type
    }
}

/// A directed, optionally conditioned transition between two named nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// `None` makes the edge unconditional.
    pub condition: Option<bool>,
    pub description: String,
}

impl Edge {
    /// An unconditional edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    /// An edge taken only when the executed node reports `condition`.
    pub fn when(source: impl Into<String>, target: impl Into<String>, condition: bool) -> Self {
        Self {
            condition: Some(condition),
            ..Self::new(source, target)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether a response reporting `reported` may take this edge.
    pub fn accepts(&self, reported: Option<bool>) -> bool {
        match self.condition {
            None => true,
            Some(expected) => reported == Some(expected),
        }
    }
}

/// The whole graph plus its run state.
///
/// The first node in `nodes` is the default start node. `current_node`, `variables` and
/// `return_value` are mutated by the engine while a run is in flight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flowchart {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub current_node: Option<String>,
    pub variables: Variables,
    pub return_value: Option<NodeResponse>,
}

impl Flowchart {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            ..Default::default()
        }
    }

    /// Seeds a variable before the first run.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// A copy holding only the authored graph, with all run state cleared.
    pub fn definition(&self) -> Self {
        Self::new(self.nodes.clone(), self.edges.clone())
    }
}
