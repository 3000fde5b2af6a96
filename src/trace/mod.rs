use crate::tool::NodeResponse;
use serde::{Deserialize, Serialize};

mod formatter;

pub use formatter::TraceFormatter;

/// One visited node and the response it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub node_name: String,
    pub response: NodeResponse,
}

/// The ordered record of every node visited during a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionTrace {
    entries: Vec<TraceEntry>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, node_name: impl Into<String>, response: NodeResponse) {
        self.entries.push(TraceEntry {
            node_name: node_name.into(),
            response,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// Visited node names in order.
    pub fn node_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.node_name.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ExecutionTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
