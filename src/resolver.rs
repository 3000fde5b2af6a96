use crate::flowchart::{FlowGraph, Node};
use crate::tool::NodeResponse;
use tracing::{debug, instrument, warn};

/// Picks the single next node from the outgoing edges of the node just executed.
pub struct EdgeResolver<'a> {
    graph: &'a FlowGraph,
}

impl<'a> EdgeResolver<'a> {
    pub fn new(graph: &'a FlowGraph) -> Self {
        Self { graph }
    }

    /// Scans edges in declaration order and takes the first one leaving `node` whose
    /// condition is absent or equal to `response.condition`.
    ///
    /// Returns `None` when no edge matches, or when the matching edge names a node that does
    /// not exist. Both end the run normally.
    #[instrument(level = "trace", skip_all, fields(node = %node.name))]
    pub fn next_node(&self, node: &Node, response: &NodeResponse) -> Option<&'a Node> {
        let edge = self
            .graph
            .outgoing_edges(&node.name)
            .find(|edge| edge.accepts(response.condition));

        let Some(edge) = edge else {
            debug!(node = %node.name, condition = ?response.condition, "no matching edge");
            return None;
        };

        match self.graph.find_node(&edge.target) {
            Some(next) => {
                debug!(from = %node.name, to = %next.name, "edge taken");
                Some(next)
            }
            None => {
                warn!(from = %node.name, target = %edge.target, "edge target does not exist, terminating");
                None
            }
        }
    }
}
