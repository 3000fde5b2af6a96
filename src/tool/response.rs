use crate::value::{Value, Variables};
use serde::{Deserialize, Serialize};

/// What every tool invocation returns.
///
/// `result` is folded into the shared variables, `condition` is matched against edge
/// conditions, and `message` only ever reaches the trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeResponse {
    pub result: Option<Variables>,
    pub condition: Option<bool>,
    pub message: Option<String>,
}

impl NodeResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn condition(condition: bool) -> Self {
        Self {
            condition: Some(condition),
            ..Default::default()
        }
    }

    pub fn result(result: Variables) -> Self {
        Self {
            result: Some(result),
            ..Default::default()
        }
    }

    /// The synthetic response for a node whose function cannot be resolved.
    pub fn not_found(tool_name: &str) -> Self {
        Self::message(format!("tool '{}' not found", tool_name))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_condition(mut self, condition: bool) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Adds one key to the result mapping, creating it if needed.
    pub fn with_result(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.result
            .get_or_insert_with(Variables::new)
            .insert(name.into(), value.into());
        self
    }
}
