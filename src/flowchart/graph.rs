use super::definition::{Edge, Flowchart, Node};
use crate::config::{DanglingEdgePolicy, DuplicateNamePolicy, EngineConfig};
use crate::error::FlowchartError;
use ahash::AHashMap;
use tracing::{debug, warn};

/// A loaded flowchart together with its name index.
///
/// The index is built once at construction. The node list itself is never reshaped afterwards,
/// so positions stay valid for the lifetime of the graph.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    pub(crate) flowchart: Flowchart,
    index: AHashMap<String, usize>,
}

impl FlowGraph {
    /// Indexes `flowchart`, applying the duplicate-name and dangling-edge policies from `config`.
    pub fn new(flowchart: Flowchart, config: &EngineConfig) -> Result<Self, FlowchartError> {
        let mut index = AHashMap::with_capacity(flowchart.nodes.len());
        for (position, node) in flowchart.nodes.iter().enumerate() {
            if index.insert(node.name.clone(), position).is_some() {
                match config.duplicate_names {
                    DuplicateNamePolicy::Reject => {
                        return Err(FlowchartError::DuplicateNodeName(node.name.clone()));
                    }
                    DuplicateNamePolicy::LastWins => {
                        warn!(node = %node.name, "duplicate node name, later declaration wins");
                    }
                }
            }
        }

        if config.dangling_edges == DanglingEdgePolicy::Reject {
            if let Some(edge) = flowchart
                .edges
                .iter()
                .find(|edge| !index.contains_key(&edge.target))
            {
                return Err(FlowchartError::DanglingEdgeTarget {
                    source_node: edge.source.clone(),
                    target_node: edge.target.clone(),
                });
            }
        }

        debug!(
            nodes = flowchart.nodes.len(),
            edges = flowchart.edges.len(),
            "flowchart indexed"
        );
        Ok(Self { flowchart, index })
    }

    pub fn flowchart(&self) -> &Flowchart {
        &self.flowchart
    }

    pub fn into_flowchart(self) -> Flowchart {
        self.flowchart
    }

    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.position(name).map(|position| &self.flowchart.nodes[position])
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn first_node(&self) -> Option<&Node> {
        self.flowchart.nodes.first()
    }

    pub fn node_count(&self) -> usize {
        self.flowchart.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowchart.nodes.is_empty()
    }

    /// Edges leaving `name`, in declaration order.
    pub fn outgoing_edges<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.flowchart
            .edges
            .iter()
            .filter(move |edge| edge.source == name)
    }

    /// The node the engine is positioned on, if any.
    pub fn current_node(&self) -> Option<&Node> {
        self.flowchart
            .current_node
            .as_deref()
            .and_then(|name| self.find_node(name))
    }
}
