//! Example: export a traced model to TensorBoard
//!
//! This example plays the part of a framework adapter: a small two-layer
//! network "traces" itself into a [`TraceGraph`], and the result is written to
//! an event file that TensorBoard can display.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example export_graph -- runs/demo [--verbose] [--legacy] [--fail]
//! tensorboard --logdir runs
//! ```

use std::env;
use std::path::Path;

use trace_graphdef::prelude::*;
use trace_graphdef::tensor::shape_from_sizes;

/// Two fully connected layers with a ReLU in between
struct TwoLayerNet {
    training: bool,
    fail_trace: bool,
}

impl TracedModel for TwoLayerNet {
    type Input = [i64];

    fn is_training(&self) -> bool {
        self.training
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn trace(&mut self, input_shape: &[i64]) -> Result<TraceGraph, TraceError> {
        if self.fail_trace {
            return Err(TraceError::Runtime(
                "unsupported operator in forward()".to_string(),
            ));
        }
        let batch = input_shape.first().copied().unwrap_or(1);
        let features = input_shape.get(1).copied().unwrap_or(8);

        let float = |sizes: &[i64]| ValueType::tensor("Float", shape_from_sizes(sizes));

        Ok(TraceGraphBuilder::new()
            .input("0", float(&[batch, features]))
            .input("1", float(&[16, features]))
            .input("2", float(&[16]))
            .input("3", float(&[4, 16]))
            .input("4", float(&[4]))
            .node("onnx::Gemm", "TwoLayerNet/Linear[fc1]", |n| {
                n.inputs(&["0", "1", "2"])
                    .attr("alpha", AttributeValue::Float(1.0))
                    .attr("beta", AttributeValue::Float(1.0))
                    .attr("transB", AttributeValue::Int(1))
                    .output("5", float(&[batch, 16]))
            })
            .node("onnx::Relu", "TwoLayerNet/ReLU[act]", |n| {
                n.input("5").output("6", float(&[batch, 16]))
            })
            .node("onnx::Gemm", "TwoLayerNet/Linear[fc2]", |n| {
                n.inputs(&["6", "3", "4"])
                    .attr("alpha", AttributeValue::Float(1.0))
                    .attr("beta", AttributeValue::Float(1.0))
                    .attr("transB", AttributeValue::Int(1))
                    .output("7", float(&[batch, 4]))
            })
            .build())
    }

    fn export_onnx(&mut self, _input: &[i64], path: &Path) -> Result<(), TraceError> {
        Err(TraceError::Runtime(format!(
            "ONNX export to '{}' is not supported by this demo",
            path.display()
        )))
    }

    fn optimize(&mut self, _graph: &mut TraceGraph, _call: OptimizeCall) -> Result<(), TraceError> {
        Ok(())
    }
}

fn main() -> ExportResult<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <logdir> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --verbose  Print the traced graph");
        eprintln!("  --legacy   Treat the trace as coming from framework 0.3");
        eprintln!("  --fail     Simulate a tracing failure");
        std::process::exit(1);
    }

    let logdir = &args[1];

    // Parse options
    let verbose = args.contains(&"--verbose".to_string());
    let legacy = args.contains(&"--legacy".to_string());
    let fail = args.contains(&"--fail".to_string());

    let mut options = ExportOptions::default().verbose(verbose);
    if legacy {
        options = options.with_framework(FrameworkVersion::parse("0.3.1")?);
    }

    let mut model = TwoLayerNet {
        training: true,
        fail_trace: fail,
    };

    let input_shape: &[i64] = &[2, 8];
    let (path, mut writer) = create_event_file(logdir)?;
    let graph_def = add_graph(&mut writer, &mut model, input_shape, &options)?;

    println!("Graph written to {}", path.display());
    println!("  Producer: {:?}", graph_def.producer());
    println!("  Nodes: {}", graph_def.node.len());
    for node in &graph_def.node {
        println!("    {} = {}({})", node.name, node.op, node.input.join(", "));
    }
    println!("  Model back in training mode: {}", model.training);

    Ok(())
}
