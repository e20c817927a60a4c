//! Node flattening
//!
//! Turns a traced graph plus its resolved [`ScopeMap`] into an ordered list of
//! [`NodeRecord`]s, one per emitted node:
//!
//! 1. Operation nodes, in trace order. Nodes with an input missing from the
//!    scope map are dropped unless [`ExportOptions::drop_unresolved_nodes`] is off.
//! 2. Graph inputs, in declaration order, as `Parameter` records.
//!
//! # Example
//!
//! ```ignore
//! use trace_graphdef::flatten::flatten_graph;
//! use trace_graphdef::graph::build_scope_map;
//!
//! let scopes = build_scope_map(&graph, &options)?;
//! for record in flatten_graph(&graph, &scopes, &options)? {
//!     println!("{} = {}({:?})", record.name, record.op, record.inputs);
//! }
//! ```

pub mod attrs;

pub use attrs::{serialize_attributes, strip_single_quotes};

use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::export::ExportOptions;
use crate::graph::maps::considered_outputs;
use crate::graph::{qualified_name, ScopeMap, TraceGraph, TraceNode, UNUSED_SCOPE};
use crate::tensor::Shape;

/// Op name given to graph-input records
pub const PARAMETER_OP: &str = "Parameter";

/// One flattened graph node, ready for wire encoding
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Qualified name (`scope/id`)
    pub name: String,
    /// Operation kind
    pub op: String,
    /// Qualified input names, in order
    pub inputs: Vec<String>,
    /// Serialized attributes (or type descriptor for parameters)
    pub attr: String,
    /// Output shape, for tensor-typed outputs with recorded sizes
    pub output_shape: Option<Shape>,
}

/// Qualify every input of a node, or report the first unresolved one
fn qualify_inputs<'a>(node: &'a TraceNode, scope: &ScopeMap) -> Result<Vec<String>, &'a str> {
    node.inputs
        .iter()
        .map(|input| {
            scope
                .get(input)
                .map(|s| qualified_name(s, input))
                .ok_or(input.as_str())
        })
        .collect()
}

/// Flatten a single operation node
///
/// Returns an empty list when the node is dropped.
pub fn flatten_node(
    node: &TraceNode,
    scope: &ScopeMap,
    options: &ExportOptions,
) -> ExportResult<Vec<NodeRecord>> {
    let attr = serialize_attributes(&node.attributes);

    let inputs = match qualify_inputs(node, scope) {
        Ok(inputs) => inputs,
        Err(unresolved) if options.drop_unresolved_nodes => {
            debug!(
                "Dropping node '{}' in '{}': input '{}' has no scope",
                node.kind, node.scope_name, unresolved
            );
            return Ok(Vec::new());
        }
        Err(unresolved) => {
            return Err(ExportError::UnresolvedInput {
                kind: node.kind.clone(),
                input: unresolved.to_string(),
            })
        }
    };

    considered_outputs(node, options)?
        .iter()
        .map(|output| -> ExportResult<NodeRecord> {
            let output_scope = scope.get(&output.unique_name).ok_or_else(|| {
                ExportError::InvalidGraph(format!(
                    "output '{}' of node '{}' has no scope",
                    output.unique_name, node.kind
                ))
            })?;

            Ok(NodeRecord {
                name: qualified_name(output_scope, &output.unique_name),
                op: node.kind.clone(),
                inputs: inputs.clone(),
                attr: attr.clone(),
                output_shape: output.ty.sizes().cloned(),
            })
        })
        .collect()
}

/// Flatten a traced graph into node records
///
/// Operation-node records come first, followed by one `Parameter` record per
/// graph input. Graph inputs that no node claimed are named under
/// [`UNUSED_SCOPE`].
pub fn flatten_graph(
    graph: &TraceGraph,
    scope: &ScopeMap,
    options: &ExportOptions,
) -> ExportResult<Vec<NodeRecord>> {
    let mut records = Vec::with_capacity(graph.nodes.len() + graph.inputs.len());

    for node in &graph.nodes {
        records.extend(flatten_node(node, scope, options)?);
    }

    let emitted_nodes = records.len();

    for input in &graph.inputs {
        let input_scope = scope
            .get(&input.unique_name)
            .map(String::as_str)
            .unwrap_or(UNUSED_SCOPE);

        records.push(NodeRecord {
            name: qualified_name(input_scope, &input.unique_name),
            op: PARAMETER_OP.to_string(),
            inputs: Vec::new(),
            attr: input.ty.to_string(),
            output_shape: input.ty.sizes().cloned(),
        });
    }

    debug!(
        "Flattened {} of {} nodes and {} graph inputs",
        emitted_nodes,
        graph.nodes.len(),
        graph.inputs.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_scope_map, AttributeValue, TraceGraphBuilder, ValueType};
    use crate::tensor::{shape_from_sizes, Dim};

    fn flatten(graph: &TraceGraph, options: &ExportOptions) -> ExportResult<Vec<NodeRecord>> {
        let scope = build_scope_map(graph, options)?;
        flatten_graph(graph, &scope, options)
    }

    #[test]
    fn test_two_layer_records() {
        let graph = TraceGraphBuilder::new()
            .node("onnx::Constant", "layer1", |n| {
                n.output("a", ValueType::dynamic())
            })
            .node("onnx::Relu", "layer2", |n| {
                n.input("a").output("b", ValueType::dynamic())
            })
            .build();
        let records = flatten(&graph, &ExportOptions::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "layer1/a");
        assert!(records[0].inputs.is_empty());
        assert_eq!(records[1].name, "layer2/b");
        assert_eq!(records[1].op, "onnx::Relu");
        assert_eq!(records[1].inputs, vec!["layer1/a"]);
        assert_eq!(records[1].attr, "{}");
    }

    #[test]
    fn test_input_order_preserved() {
        let graph = TraceGraphBuilder::new()
            .input("0", ValueType::dynamic())
            .input("w", ValueType::dynamic())
            .input("b", ValueType::dynamic())
            .node("onnx::Gemm", "Net/Linear[fc]", |n| {
                n.inputs(&["0", "w", "b"]).output("1", ValueType::dynamic())
            })
            .build();
        let records = flatten(&graph, &ExportOptions::default()).unwrap();

        assert_eq!(
            records[0].inputs,
            vec!["input/0", "Net/Linear[fc]/w", "Net/Linear[fc]/b"]
        );
    }

    #[test]
    fn test_unresolved_node_dropped() {
        let graph = TraceGraphBuilder::new()
            .node("onnx::Relu", "net", |n| {
                n.input("ghost").output("1", ValueType::dynamic())
            })
            .node("onnx::Neg", "net", |n| {
                n.input("0").output("2", ValueType::dynamic())
            })
            .build();
        let records = flatten(&graph, &ExportOptions::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "net/2");
    }

    #[test]
    fn test_unresolved_node_error_when_not_dropping() {
        let graph = TraceGraphBuilder::new()
            .node("onnx::Relu", "net", |n| {
                n.input("ghost").output("1", ValueType::dynamic())
            })
            .build();
        let options = ExportOptions::default().drop_unresolved_nodes(false);
        let err = flatten(&graph, &options).unwrap_err();

        assert!(matches!(err, ExportError::UnresolvedInput { ref input, .. } if input == "ghost"));
    }

    #[test]
    fn test_tensor_output_shape() {
        let graph = TraceGraphBuilder::new()
            .node("onnx::Conv", "net", |n| {
                n.input("0")
                    .attr("group", AttributeValue::Int(1))
                    .output(
                        "1",
                        ValueType::tensor("Float", shape_from_sizes(&[1, 8, 32, 32])),
                    )
            })
            .node("prim::ListConstruct", "net", |n| {
                n.output("2", ValueType::other("ListType", "int[]"))
            })
            .build();
        let records = flatten(&graph, &ExportOptions::default()).unwrap();

        assert_eq!(
            records[0].output_shape,
            Some(shape_from_sizes(&[1, 8, 32, 32]))
        );
        assert_eq!(records[0].attr, "{ group : 1}");
        assert_eq!(records[1].output_shape, None);
    }

    #[test]
    fn test_graph_inputs_as_parameters() {
        let graph = TraceGraphBuilder::new()
            .input(
                "0",
                ValueType::tensor("Float", smallvec::smallvec![Dim::Unknown, Dim::Known(3)]),
            )
            .input("7", ValueType::tensor("Float", shape_from_sizes(&[3])))
            .node("onnx::Relu", "net", |n| {
                n.input("0").output("1", ValueType::dynamic())
            })
            .build();
        let records = flatten(&graph, &ExportOptions::default()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].op, "onnx::Relu");

        let input = &records[1];
        assert_eq!(input.name, "input/0");
        assert_eq!(input.op, PARAMETER_OP);
        assert!(input.inputs.is_empty());
        assert_eq!(input.attr, "Float(*, 3)");

        let unused = &records[2];
        assert_eq!(unused.name, "unused/7");
        assert_eq!(unused.op, PARAMETER_OP);
        assert_eq!(unused.output_shape, Some(shape_from_sizes(&[3])));
    }

    #[test]
    fn test_multiple_outputs_when_configured() {
        let graph = TraceGraphBuilder::new()
            .node("onnx::Split", "net", |n| {
                n.input("0")
                    .output("1", ValueType::tensor("Float", shape_from_sizes(&[2])))
                    .output("2", ValueType::tensor("Float", shape_from_sizes(&[3])))
            })
            .build();

        let first_only = flatten(&graph, &ExportOptions::default()).unwrap();
        assert_eq!(first_only.len(), 1);

        let all = flatten(&graph, &ExportOptions::default().first_output_only(false)).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name, "net/2");
        assert_eq!(all[1].inputs, vec!["input/0"]);
        assert_eq!(all[1].output_shape, Some(shape_from_sizes(&[3])));
    }
}
