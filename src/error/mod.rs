//! Error types for trace-graphdef
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Errors reported by a [`TracedModel`](crate::traits::TracedModel) implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// The framework failed while running or capturing the model.
    ///
    /// Recovered by [`graph`](crate::export::graph), which returns an empty graph.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The model or its input was rejected before tracing started
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Main error type for graph export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// A traced node carries an empty scope name
    #[error("Node '{kind}' producing '{output}' has empty scope name")]
    EmptyScope {
        /// Node kind
        kind: String,
        /// First output identifier (empty if the node has none)
        output: String,
    },

    /// A traced node has no outputs
    #[error("Node '{0}' has no outputs")]
    MissingOutput(String),

    /// A node input could not be resolved to a scope
    #[error("Input '{input}' of node '{kind}' has no resolved scope")]
    UnresolvedInput {
        /// Node kind
        kind: String,
        /// Unresolved input identifier
        input: String,
    },

    /// Framework tracing or optimization failed
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Invalid graph structure
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Framework version string could not be parsed
    #[error("Invalid framework version: {0}")]
    InvalidVersion(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Protobuf decode error
    #[error("Protobuf decode error: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    /// Protobuf encode error
    #[error("Protobuf encode error: {0}")]
    ProtoEncode(#[from] prost::EncodeError),
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
