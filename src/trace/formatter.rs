use super::{ExecutionTrace, TraceEntry};
use crate::tool::NodeResponse;
use itertools::Itertools;

/// Formats execution traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// The visited path on one line, e.g. `start -> decision -> adult`.
    pub fn format_path(trace: &ExecutionTrace) -> String {
        trace.iter().map(|entry| entry.node_name.as_str()).join(" -> ")
    }

    /// One numbered line per visited node with everything its response reported.
    pub fn format_trace(trace: &ExecutionTrace) -> String {
        if trace.is_empty() {
            return "No nodes executed".to_string();
        }
        trace
            .iter()
            .enumerate()
            .map(|(step, entry)| Self::format_entry(step + 1, entry))
            .join("\n")
    }

    fn format_entry(step: usize, entry: &TraceEntry) -> String {
        let details = Self::format_response(&entry.response);
        if details.is_empty() {
            format!("{:>3}. {}", step, entry.node_name)
        } else {
            format!("{:>3}. {} | {}", step, entry.node_name, details)
        }
    }

    /// Format a response for display, omitting absent fields.
    pub fn format_response(response: &NodeResponse) -> String {
        let mut parts = Vec::new();
        if let Some(message) = &response.message {
            parts.push(format!("message: {}", message));
        }
        if let Some(condition) = response.condition {
            parts.push(format!("condition: {}", condition));
        }
        if let Some(result) = &response.result {
            // Sorted so the output is stable across runs
            let fields = result
                .iter()
                .sorted_by(|a, b| a.0.cmp(b.0))
                .map(|(name, value)| format!("{} = {}", name, value))
                .join(", ");
            parts.push(format!("result: {{{}}}", fields));
        }
        parts.join("; ")
    }
}
