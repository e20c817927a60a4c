//! Graph export entry point
//!
//! Drives a [`TracedModel`] through tracing and turns the result into a
//! TensorBoard [`GraphDef`]:
//!
//! 1. Trace the model in inference mode ([`InferenceGuard`])
//! 2. Run the framework's optimization pass
//! 3. Resolve scopes ([`build_scope_map`]) and flatten ([`flatten_graph`])
//! 4. Encode each [`NodeRecord`] as a `NodeDef`
//!
//! A runtime failure while tracing is not an error: it yields an empty graph
//! carrying only the producer version.
//!
//! # Example
//!
//! ```ignore
//! use trace_graphdef::export::{graph, ExportOptions};
//!
//! let graph_def = graph(&mut model, &input, &ExportOptions::default())?;
//! println!("Exported {} nodes", graph_def.node.len());
//! ```

pub mod guard;
pub mod options;

#[cfg(test)]
pub(crate) mod testing;

pub use guard::InferenceGuard;
pub use options::{ExportOptions, PRODUCER_VERSION, SCRATCH_FILE_NAME};

use std::collections::BTreeMap;
use std::io::Write;

use tracing::{info, warn};

use crate::error::{ExportResult, TraceError};
use crate::flatten::{flatten_graph, NodeRecord};
use crate::graph::{build_scope_map, TraceGraph};
use crate::io::EventWriter;
use crate::proto::{AttrValue, GraphDef, NodeDef, VersionDef};
use crate::tensor::shape_to_proto;
use crate::traits::TracedModel;

/// Attribute key holding the serialized node attributes
pub const ATTR_KEY: &str = "lanpa";

/// Attribute key holding the output shapes
pub const OUTPUT_SHAPES_KEY: &str = "_output_shapes";

/// Graph with no nodes, stamped with the configured producer version
pub fn empty_graph_def(options: &ExportOptions) -> GraphDef {
    GraphDef::with_producer(options.producer)
}

/// Encode a flattened record as a TensorBoard node
pub fn node_def_from_record(record: NodeRecord) -> NodeDef {
    let mut attr = BTreeMap::new();
    attr.insert(ATTR_KEY.to_string(), AttrValue::bytes(record.attr.into_bytes()));

    if let Some(shape) = &record.output_shape {
        attr.insert(
            OUTPUT_SHAPES_KEY.to_string(),
            AttrValue::shape_list(vec![shape_to_proto(shape)]),
        );
    }

    NodeDef {
        name: record.name,
        op: record.op,
        input: record.inputs,
        attr,
        ..Default::default()
    }
}

/// Convert an already traced and optimized graph
pub fn graph_from_trace(graph: &TraceGraph, options: &ExportOptions) -> ExportResult<GraphDef> {
    let scope = build_scope_map(graph, options)?;
    let records = flatten_graph(graph, &scope, options)?;

    Ok(GraphDef {
        node: records.into_iter().map(node_def_from_record).collect(),
        versions: Some(VersionDef {
            producer: options.producer,
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Trace `model` against `input` and export its graph
///
/// Errors from scope resolution and flattening, non-runtime trace errors, and
/// optimization failures are returned to the caller.
pub fn graph<M>(model: &mut M, input: &M::Input, options: &ExportOptions) -> ExportResult<GraphDef>
where
    M: TracedModel + ?Sized,
{
    let mut trace = {
        let mut guard = InferenceGuard::new(model);

        match guard.trace(input) {
            Ok(trace) => trace,
            Err(TraceError::Runtime(msg)) => {
                warn!("Tracing failed ({}), checking if it's an ONNX problem...", msg);
                if let Err(err) = guard.export_onnx(input, &options.scratch_path) {
                    warn!(
                        "ONNX export to '{}' failed too ({}), please report to the ONNX team",
                        options.scratch_path.display(),
                        err
                    );
                }
                warn!("No graph saved");
                return Ok(empty_graph_def(options));
            }
            Err(err) => return Err(err.into()),
        }
    };

    model.optimize(&mut trace, options.framework.optimize_call())?;

    if options.verbose {
        println!("{}", trace);
    }

    let graph_def = graph_from_trace(&trace, options)?;
    info!(
        "Exported {} nodes from {} traced operations",
        graph_def.node.len(),
        trace.node_count()
    );

    Ok(graph_def)
}

/// Export the graph of `model` into an event file
///
/// The graph is written even when tracing failed, as an empty graph.
pub fn add_graph<M, W>(
    writer: &mut EventWriter<W>,
    model: &mut M,
    input: &M::Input,
    options: &ExportOptions,
) -> ExportResult<GraphDef>
where
    M: TracedModel + ?Sized,
    W: Write,
{
    let graph_def = graph(model, input, options)?;
    writer.write_graph(&graph_def)?;
    Ok(graph_def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::framework::{FrameworkVersion, OptimizeCall};
    use crate::graph::{AttributeValue, TraceGraphBuilder, ValueType};
    use crate::tensor::shape_from_sizes;
    use super::testing::MockModel;

    fn two_layer_trace() -> TraceGraph {
        TraceGraphBuilder::new()
            .node("onnx::Constant", "layer1", |n| {
                n.output("a", ValueType::tensor("Float", shape_from_sizes(&[2, 2])))
            })
            .node("onnx::Relu", "layer2", |n| {
                n.input("a")
                    .attr("note", AttributeValue::String("it's".to_string()))
                    .output("b", ValueType::other("IntType", "int"))
            })
            .build()
    }

    #[test]
    fn test_graph_from_trace() {
        let graph_def = graph_from_trace(&two_layer_trace(), &ExportOptions::default()).unwrap();

        assert_eq!(graph_def.producer(), Some(PRODUCER_VERSION));
        assert_eq!(
            graph_def.node_names().collect::<Vec<_>>(),
            vec!["layer1/a", "layer2/b"]
        );

        let a = graph_def.get_node("layer1/a").unwrap();
        assert_eq!(a.op, "onnx::Constant");
        assert_eq!(a.get_attr_string(ATTR_KEY), Some("{}"));
        let shapes = a.get_attr_shapes(OUTPUT_SHAPES_KEY).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].sizes(), vec![2, 2]);

        let b = graph_def.get_node("layer2/b").unwrap();
        assert_eq!(b.input, vec!["layer1/a"]);
        assert_eq!(b.get_attr_string(ATTR_KEY), Some("{ note : \"it s\"}"));
        assert!(b.get_attr(OUTPUT_SHAPES_KEY).is_none());
    }

    #[test]
    fn test_graph_success() {
        let mut model = MockModel::with_trace(two_layer_trace());
        model.training = true;

        let graph_def = graph(&mut model, &(), &ExportOptions::default()).unwrap();

        assert_eq!(graph_def.node.len(), 2);
        assert_eq!(model.training_during_trace, Some(false));
        assert!(model.training);
        assert_eq!(
            model.optimize_calls,
            vec![OptimizeCall::WithExportFlag(false)]
        );
        assert!(model.onnx_exports.is_empty());
    }

    #[test]
    fn test_graph_verbose() {
        let mut model = MockModel::with_trace(two_layer_trace());
        let options = ExportOptions::default().verbose(true);

        let graph_def = graph(&mut model, &(), &options).unwrap();

        assert_eq!(graph_def.node.len(), 2);
        assert_eq!(model.optimize_calls.len(), 1);
    }

    #[test]
    fn test_graph_legacy_optimize_call() {
        let mut model = MockModel::with_trace(two_layer_trace());
        let options = ExportOptions::default().with_framework(FrameworkVersion::new(0, 3, 1));

        graph(&mut model, &(), &options).unwrap();

        assert_eq!(model.optimize_calls, vec![OptimizeCall::Legacy]);
    }

    #[test]
    fn test_trace_failure_yields_empty_graph() {
        let mut model = MockModel::failing(TraceError::Runtime("shape mismatch".to_string()));
        model.training = true;
        let options = ExportOptions::default().scratch_path("/tmp/trace_graphdef_scratch.pb");

        let graph_def = graph(&mut model, &(), &options).unwrap();

        assert!(graph_def.node.is_empty());
        assert_eq!(graph_def.producer(), Some(22));
        assert!(model.training);
        assert!(model.optimize_calls.is_empty());
        assert_eq!(
            model.onnx_exports,
            vec![std::path::PathBuf::from("/tmp/trace_graphdef_scratch.pb")]
        );
    }

    #[test]
    fn test_trace_failure_with_failing_onnx_export() {
        let mut model = MockModel::failing(TraceError::Runtime("boom".to_string()));
        model.onnx_result = Err(TraceError::Runtime("onnx boom".to_string()));

        let graph_def = graph(&mut model, &(), &ExportOptions::default()).unwrap();

        assert!(graph_def.node.is_empty());
        assert_eq!(model.onnx_exports.len(), 1);
    }

    #[test]
    fn test_invalid_argument_propagates() {
        let mut model = MockModel::failing(TraceError::InvalidArgument("bad input".to_string()));
        model.training = true;

        let err = graph(&mut model, &(), &ExportOptions::default()).unwrap_err();

        assert!(matches!(err, ExportError::Trace(TraceError::InvalidArgument(_))));
        assert!(model.training);
        assert!(model.onnx_exports.is_empty());
    }

    #[test]
    fn test_empty_scope_propagates() {
        let trace = TraceGraphBuilder::new()
            .node("onnx::Relu", "", |n| n.input("0").output("1", ValueType::dynamic()))
            .build();
        let mut model = MockModel::with_trace(trace);

        let err = graph(&mut model, &(), &ExportOptions::default()).unwrap_err();

        assert!(matches!(err, ExportError::EmptyScope { .. }));
    }

    #[test]
    fn test_add_graph() {
        let mut model = MockModel::with_trace(two_layer_trace());
        let mut writer = EventWriter::new(Vec::new());

        let graph_def =
            add_graph(&mut writer, &mut model, &(), &ExportOptions::default()).unwrap();

        assert_eq!(graph_def.node.len(), 2);
        assert!(!writer.get_ref().is_empty());
    }
}
