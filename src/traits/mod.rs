//! Core traits for trace-graphdef
//!
//! Defines the interface a training framework implements so its models can be
//! exported.

use std::path::Path;

use crate::error::TraceError;
use crate::framework::OptimizeCall;
use crate::graph::TraceGraph;

/// A model that a training framework can trace
///
/// # Example
///
/// ```ignore
/// struct MyModel { training: bool }
///
/// impl TracedModel for MyModel {
///     type Input = Vec<f32>;
///
///     fn is_training(&self) -> bool { self.training }
///     fn set_training(&mut self, training: bool) { self.training = training }
///
///     fn trace(&mut self, input: &Self::Input) -> Result<TraceGraph, TraceError> {
///         // Run the model once and record its operations
///         todo!()
///     }
///
///     fn export_onnx(&mut self, input: &Self::Input, path: &Path) -> Result<(), TraceError> {
///         Err(TraceError::Runtime("ONNX export unsupported".into()))
///     }
///
///     fn optimize(&mut self, graph: &mut TraceGraph, call: OptimizeCall) -> Result<(), TraceError> {
///         Ok(())
///     }
/// }
/// ```
pub trait TracedModel {
    /// Representative input the model is run against
    type Input: ?Sized;

    /// Whether the model is in training mode
    fn is_training(&self) -> bool;

    /// Switch between training and inference mode
    fn set_training(&mut self, training: bool);

    /// Run the model once against `input` and capture its graph
    ///
    /// Failures raised while the framework executes the model are reported as
    /// [`TraceError::Runtime`].
    fn trace(&mut self, input: &Self::Input) -> Result<TraceGraph, TraceError>;

    /// Export the model to ONNX at `path`
    ///
    /// Only used to gather diagnostics after a failed trace.
    fn export_onnx(&mut self, input: &Self::Input, path: &Path) -> Result<(), TraceError>;

    /// Run the framework's trace optimization pass in place
    fn optimize(&mut self, graph: &mut TraceGraph, call: OptimizeCall) -> Result<(), TraceError>;
}
