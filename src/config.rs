//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! max_steps = 500
//! decision_type = "decision"
//! duplicate_names = "reject"    # or "last_wins"
//! dangling_edges = "terminate"  # or "reject"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do when two nodes share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Fail the load with `FlowchartError::DuplicateNodeName`.
    #[default]
    Reject,
    /// Keep the later declaration in the index and log a warning.
    LastWins,
}

/// What to do with an edge whose target names no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingEdgePolicy {
    /// Accept at load time; taking the edge ends the run normally.
    #[default]
    Terminate,
    /// Fail the load with `FlowchartError::DanglingEdgeTarget`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound on node executions per run. `None` disables the budget.
    #[serde(default = "default_max_steps")]
    pub max_steps: Option<usize>,

    /// Node type tag that `next()` steps through without stopping.
    #[serde(default = "default_decision_type")]
    pub decision_type: String,

    #[serde(default)]
    pub duplicate_names: DuplicateNamePolicy,

    #[serde(default)]
    pub dangling_edges: DanglingEdgePolicy,
}

pub const DEFAULT_MAX_STEPS: usize = 10_000;

fn default_max_steps() -> Option<usize> {
    Some(DEFAULT_MAX_STEPS)
}

fn default_decision_type() -> String {
    "decision".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            decision_type: default_decision_type(),
            duplicate_names: DuplicateNamePolicy::default(),
            dangling_edges: DanglingEdgePolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_decision_type(mut self, decision_type: impl Into<String>) -> Self {
        self.decision_type = decision_type.into();
        self
    }

    pub fn with_duplicate_names(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_names = policy;
        self
    }

    pub fn with_dangling_edges(mut self, policy: DanglingEdgePolicy) -> Self {
        self.dangling_edges = policy;
        self
    }
}
