//! The JSON authoring format.
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "name": "start", "type": "start", "function": "greet",
//!               "argument": { "name": "Ada" } }],
//!   "edges": [{ "source": "start", "target": "decision", "condition": null }],
//!   "variables": { "age": 20 }
//! }
//! ```
//!
//! Older sheets spell `argument` as `augument`, and may give an edge target as the numeric `id`
//! of a node instead of its name. Both are accepted.

use super::conversion::IntoFlowchart;
use super::definition::{Edge, Flowchart, Node};
use crate::error::{ConversionError, LoadError};
use crate::value::{Variables, variables_from_json};
use ahash::AHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct JsonFlowchart {
    pub nodes: Vec<JsonNode>,
    #[serde(default)]
    pub edges: Vec<JsonEdge>,
    #[serde(default)]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct JsonNode {
    #[serde(default)]
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub function: Option<String>,
    #[serde(alias = "augument")]
    pub argument: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonEdge {
    pub source: Option<String>,
    pub target: Option<serde_json::Value>,
    pub condition: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl JsonFlowchart {
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|e| LoadError::MalformedSchema(e.to_string()))
    }
}

fn invalid(message: String) -> ConversionError {
    ConversionError::ValidationError(message)
}

fn convert_node(raw: JsonNode) -> Result<Node, ConversionError> {
    let name = raw
        .name
        .ok_or_else(|| invalid(format!("node {} has no name", raw.id)))?;
    let argument = match raw.argument {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(variables_from_json(value).ok_or_else(|| {
            invalid(format!("argument of node '{}' must be an object", name))
        })?),
    };
    Ok(Node {
        id: raw.id,
        name,
        node_type: raw.node_type.unwrap_or_else(|| "process".to_string()),
        function: raw.function.filter(|f| !f.is_empty()),
        argument,
        description: raw.description.unwrap_or_default(),
    })
}

/// Node names keyed by id. Ids claimed by more than one node map to `None`.
fn names_by_id(nodes: &[Node]) -> AHashMap<i64, Option<&str>> {
    let mut ids: AHashMap<i64, Option<&str>> = AHashMap::with_capacity(nodes.len());
    for node in nodes {
        ids.entry(node.id)
            .and_modify(|name| *name = None)
            .or_insert(Some(node.name.as_str()));
    }
    ids
}

fn resolve_target(
    source: &str,
    target: Option<serde_json::Value>,
    ids: &AHashMap<i64, Option<&str>>,
) -> Result<String, ConversionError> {
    match target {
        Some(serde_json::Value::String(name)) => Ok(name),
        Some(serde_json::Value::Number(number)) => {
            let id = number.as_i64().ok_or_else(|| {
                invalid(format!("edge from '{}' has non-integer target {}", source, number))
            })?;
            match ids.get(&id) {
                Some(Some(name)) => Ok(name.to_string()),
                Some(None) => Err(invalid(format!(
                    "edge from '{}' targets id {}, which several nodes share",
                    source, id
                ))),
                None => Err(invalid(format!(
                    "edge from '{}' targets id {}, which no node has",
                    source, id
                ))),
            }
        }
        _ => Err(invalid(format!("edge from '{}' has no target", source))),
    }
}

impl IntoFlowchart for JsonFlowchart {
    fn into_flowchart(self) -> Result<Flowchart, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(convert_node)
            .collect::<Result<Vec<_>, _>>()?;

        let edges = {
            let ids = names_by_id(&nodes);
            self.edges
                .into_iter()
                .map(|raw| {
                    let source = raw
                        .source
                        .ok_or_else(|| invalid("edge has no source".to_string()))?;
                    let target = resolve_target(&source, raw.target, &ids)?;
                    Ok(Edge {
                        source,
                        target,
                        condition: raw.condition,
                        description: raw.description.unwrap_or_default(),
                    })
                })
                .collect::<Result<Vec<_>, ConversionError>>()?
        };

        let variables: Variables = match self.variables {
            None | Some(serde_json::Value::Null) => Variables::new(),
            Some(value) => variables_from_json(value)
                .ok_or_else(|| invalid("variables must be an object".to_string()))?,
        };
        Ok(Flowchart {
            variables,
            ..Flowchart::new(nodes, edges)
        })
    }
}

/// Parses and converts a JSON document.
pub fn parse_json(content: &str) -> Result<Flowchart, LoadError> {
    let flowchart = JsonFlowchart::parse(content)?
        .into_flowchart()
        .map_err(|e| LoadError::MalformedSchema(e.to_string()))?;
    debug!(
        nodes = flowchart.nodes.len(),
        edges = flowchart.edges.len(),
        "parsed flowchart JSON"
    );
    Ok(flowchart)
}

/// Reads a JSON flowchart file, distinguishing a missing file from an empty or malformed one.
pub fn load_json(path: impl AsRef<Path>) -> Result<Flowchart, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(LoadError::EmptyInput(path.to_path_buf()));
    }
    parse_json(&content)
}
