//! Fluent construction of traced graphs
//!
//! Framework adapters and tests use [`TraceGraphBuilder`] to assemble a
//! [`TraceGraph`] without spelling out every struct field.

use super::trace::{AttributeMap, TraceGraph, TraceNode, TraceValue};
use super::types::{AttributeValue, ValueType};

/// Builder for a single [`TraceNode`]
#[derive(Debug)]
pub struct NodeBuilder {
    node: TraceNode,
}

impl NodeBuilder {
    /// Start a node of the given kind and scope
    pub fn new(kind: &str, scope_name: &str) -> Self {
        Self {
            node: TraceNode {
                kind: kind.to_string(),
                scope_name: scope_name.to_string(),
                inputs: Vec::new(),
                outputs: Vec::new(),
                attributes: AttributeMap::new(),
            },
        }
    }

    /// Append one input identifier
    pub fn input(mut self, unique_name: &str) -> Self {
        self.node.inputs.push(unique_name.to_string());
        self
    }

    /// Append several input identifiers
    pub fn inputs(mut self, unique_names: &[&str]) -> Self {
        self.node
            .inputs
            .extend(unique_names.iter().map(|s| s.to_string()));
        self
    }

    /// Append an output value
    pub fn output(mut self, unique_name: &str, ty: ValueType) -> Self {
        self.node.outputs.push(TraceValue::new(unique_name, ty));
        self
    }

    /// Set an attribute
    pub fn attr(mut self, name: &str, value: AttributeValue) -> Self {
        self.node.attributes.insert(name.to_string(), value);
        self
    }

    /// Finish the node
    pub fn build(self) -> TraceNode {
        self.node
    }
}

/// Builder for a [`TraceGraph`]
#[derive(Debug, Default)]
pub struct TraceGraphBuilder {
    graph: TraceGraph,
}

impl TraceGraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a graph-level input
    pub fn input(mut self, unique_name: &str, ty: ValueType) -> Self {
        self.graph.inputs.push(TraceValue::new(unique_name, ty));
        self
    }

    /// Append a node configured by `f`
    pub fn node<F>(mut self, kind: &str, scope_name: &str, f: F) -> Self
    where
        F: FnOnce(NodeBuilder) -> NodeBuilder,
    {
        self.graph
            .nodes
            .push(f(NodeBuilder::new(kind, scope_name)).build());
        self
    }

    /// Append an already built node
    pub fn push_node(mut self, node: TraceNode) -> Self {
        self.graph.nodes.push(node);
        self
    }

    /// Finish the graph
    pub fn build(self) -> TraceGraph {
        self.graph
    }
}
