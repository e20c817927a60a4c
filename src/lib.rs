//! # Trace GraphDef
//!
//! Converts computation graphs traced by a training framework into TensorBoard
//! `GraphDef` messages.
//!
//! This crate walks a traced graph, names every value after the module scope
//! that owns it, and emits one TensorBoard node per operation and graph input.
//!
//! ## Features
//!
//! - **Scope Resolution**: Map each traced value to a hierarchical `scope/id` name
//! - **Node Flattening**: Flat node records with serialized attributes and output shapes
//! - **Export**: Trace a model in inference mode and build the `GraphDef`
//! - **Event Files**: Write graphs where TensorBoard will find them
//!
//! ## Example
//!
//! ```ignore
//! use trace_graphdef::prelude::*;
//!
//! let graph_def = graph(&mut model, &input, &ExportOptions::default())?;
//! let (_, mut writer) = create_event_file("runs/exp1")?;
//! writer.write_graph(&graph_def)?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// ============================================================================
// Module declarations
// ============================================================================

pub mod error;
pub mod export;
pub mod flatten;
pub mod framework;
pub mod graph;
pub mod io;
pub mod proto;
pub mod tensor;
pub mod traits;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module - import commonly used types with `use trace_graphdef::prelude::*`
pub mod prelude {
    pub use crate::error::{ExportError, ExportResult, TraceError};
    pub use crate::export::{add_graph, graph, graph_from_trace, ExportOptions, InferenceGuard};
    pub use crate::flatten::{flatten_graph, NodeRecord};
    pub use crate::framework::{FrameworkVersion, OptimizeCall};
    pub use crate::graph::{
        build_scope_map, AttributeValue, ScopeMap, TraceGraph, TraceGraphBuilder, ValueType,
    };
    pub use crate::io::{create_event_file, load_graph_def, save_graph_def, EventWriter};
    pub use crate::proto::tensorboard::*;
    pub use crate::tensor::{Dim, Shape};
    pub use crate::traits::TracedModel;
}

// ============================================================================
// Crate-level re-exports
// ============================================================================

pub use error::{ExportError, ExportResult, TraceError};
pub use traits::TracedModel;

// ============================================================================
// Version information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer version stamped on exported graphs
pub use export::PRODUCER_VERSION;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_producer_version() {
        assert_eq!(PRODUCER_VERSION, 22);
    }
}
