use super::definition::Flowchart;
use crate::error::ConversionError;

/// A trait for custom data models that can be converted into a nagare `Flowchart`.
///
/// This is the extension point that keeps the engine format-agnostic. Spreadsheet rows, JSON
/// documents or anything else are parsed by the caller into their own structs, and this trait
/// provides the translation into the canonical graph.
///
/// # Example
///
/// ```rust,no_run
/// use nagare::error::ConversionError;
/// use nagare::flowchart::{Edge, Flowchart, IntoFlowchart, Node};
///
/// // 1. Define your custom structs for parsing your format.
/// struct Row { step: String, kind: String, call: Option<String>, next: Option<String> }
/// struct Sheet { rows: Vec<Row> }
///
/// // 2. Implement `IntoFlowchart` for your top-level struct.
/// impl IntoFlowchart for Sheet {
///     fn into_flowchart(self) -> Result<Flowchart, ConversionError> {
///         let mut nodes = Vec::new();
///         let mut edges = Vec::new();
///         for row in self.rows {
///             if let Some(next) = &row.next {
///                 edges.push(Edge::new(row.step.clone(), next.clone()));
///             }
///             let mut node = Node::new(row.step, row.kind);
///             node.function = row.call;
///             nodes.push(node);
///         }
///         Ok(Flowchart::new(nodes, edges))
///     }
/// }
/// ```
pub trait IntoFlowchart {
    /// Consumes the object and converts it into a runnable flowchart.
    fn into_flowchart(self) -> Result<Flowchart, ConversionError>;
}

impl IntoFlowchart for Flowchart {
    fn into_flowchart(self) -> Result<Flowchart, ConversionError> {
        Ok(self)
    }
}
