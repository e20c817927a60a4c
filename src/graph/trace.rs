//! Owned representation of a traced graph
//!
//! Framework adapters populate these types (usually through
//! [`TraceGraphBuilder`](super::builder::TraceGraphBuilder)); the exporter only reads them.

use std::fmt;

use indexmap::IndexMap;

use super::types::{AttributeValue, ValueType};

/// Ordered attribute map of a node, in the framework's enumeration order
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A value produced by a node or declared as a graph input
#[derive(Debug, Clone, PartialEq)]
pub struct TraceValue {
    /// Unique identifier within the graph
    pub unique_name: String,
    /// Type descriptor
    pub ty: ValueType,
}

impl TraceValue {
    /// Create a new value
    pub fn new(unique_name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            unique_name: unique_name.into(),
            ty,
        }
    }
}

/// An operation node of a traced graph
#[derive(Debug, Clone, PartialEq)]
pub struct TraceNode {
    /// Operation kind, e.g. `onnx::Conv`
    pub kind: String,
    /// Hierarchical scope of the module that issued the operation
    pub scope_name: String,
    /// Input value identifiers, in order
    pub inputs: Vec<String>,
    /// Output values; only the first is used unless configured otherwise
    pub outputs: Vec<TraceValue>,
    /// Node attributes
    pub attributes: AttributeMap,
}

impl TraceNode {
    /// First output value
    pub fn first_output(&self) -> Option<&TraceValue> {
        self.outputs.first()
    }

    /// Attribute names, in order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(|k| k.as_str())
    }

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// A traced computation graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceGraph {
    /// Graph-level inputs: the model input followed by parameters
    pub inputs: Vec<TraceValue>,
    /// Operation nodes, in execution order
    pub nodes: Vec<TraceNode>,
}

impl TraceGraph {
    /// Number of operation nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over operation nodes in order
    pub fn nodes(&self) -> impl Iterator<Item = &TraceNode> {
        self.nodes.iter()
    }

    /// Iterate over graph inputs in order
    pub fn inputs(&self) -> impl Iterator<Item = &TraceValue> {
        self.inputs.iter()
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &TraceValue) -> fmt::Result {
    write!(f, "%{} : {}", value.unique_name, value.ty)
}

impl fmt::Display for TraceGraph {
    /// IR-style listing, one line per node:
    ///
    /// ```text
    /// graph(%0 : Float(1, 3)
    ///       %1 : Float(4, 3)) {
    ///   %2 : Float(1, 4) = onnx::Gemm[alpha=1.0](%0, %1), scope: Net/Linear[fc]
    ///   return (%2);
    /// }
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("graph(")?;
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n      ")?;
            }
            write_value(f, input)?;
        }
        f.write_str(") {\n")?;

        for node in &self.nodes {
            f.write_str("  ")?;
            for (i, output) in node.outputs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, output)?;
            }
            write!(f, " = {}", node.kind)?;
            if !node.attributes.is_empty() {
                let attrs: Vec<String> = node
                    .attributes
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                write!(f, "[{}]", attrs.join(", "))?;
            }
            let inputs: Vec<String> = node.inputs.iter().map(|i| format!("%{}", i)).collect();
            writeln!(f, "({}), scope: {}", inputs.join(", "), node.scope_name)?;
        }

        let returns: Vec<String> = self
            .nodes
            .last()
            .and_then(|n| n.first_output())
            .map(|o| vec![format!("%{}", o.unique_name)])
            .unwrap_or_default();
        writeln!(f, "  return ({});", returns.join(", "))?;
        f.write_str("}")
    }
}
