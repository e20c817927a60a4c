//! Scripted model for exercising the export entry point

use std::path::{Path, PathBuf};

use crate::error::TraceError;
use crate::framework::OptimizeCall;
use crate::graph::TraceGraph;
use crate::traits::TracedModel;

/// Model whose trace outcome is fixed up front and whose calls are recorded
#[derive(Debug)]
pub(crate) struct MockModel {
    pub training: bool,
    pub trace_result: Result<TraceGraph, TraceError>,
    pub onnx_result: Result<(), TraceError>,
    pub mode_changes: Vec<bool>,
    pub training_during_trace: Option<bool>,
    pub onnx_exports: Vec<PathBuf>,
    pub optimize_calls: Vec<OptimizeCall>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::with_trace(TraceGraph::default())
    }

    pub fn with_trace(trace: TraceGraph) -> Self {
        Self {
            training: false,
            trace_result: Ok(trace),
            onnx_result: Ok(()),
            mode_changes: Vec::new(),
            training_during_trace: None,
            onnx_exports: Vec::new(),
            optimize_calls: Vec::new(),
        }
    }

    pub fn failing(err: TraceError) -> Self {
        Self {
            trace_result: Err(err),
            ..Self::new()
        }
    }
}

impl TracedModel for MockModel {
    type Input = ();

    fn is_training(&self) -> bool {
        self.training
    }

    fn set_training(&mut self, training: bool) {
        self.mode_changes.push(training);
        self.training = training;
    }

    fn trace(&mut self, _input: &()) -> Result<TraceGraph, TraceError> {
        self.training_during_trace = Some(self.training);
        self.trace_result.clone()
    }

    fn export_onnx(&mut self, _input: &(), path: &Path) -> Result<(), TraceError> {
        self.onnx_exports.push(path.to_path_buf());
        self.onnx_result.clone()
    }

    fn optimize(&mut self, _graph: &mut TraceGraph, call: OptimizeCall) -> Result<(), TraceError> {
        self.optimize_calls.push(call);
        Ok(())
    }
}
