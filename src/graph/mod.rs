//! Traced graph module
//!
//! This module provides the framework-neutral view of a traced model:
//!
//! - [`TraceGraph`]: graph inputs and operation nodes, in trace order
//! - [`types`]: value type descriptors and node attributes
//! - [`builder`]: fluent construction for framework adapters and tests
//! - [`maps`]: the scope map that names every value
//!
//! # Example
//!
//! ```ignore
//! use trace_graphdef::graph::{build_scope_map, TraceGraphBuilder, ValueType};
//!
//! let graph = TraceGraphBuilder::new()
//!     .input("0", ValueType::dynamic())
//!     .node("onnx::Relu", "Net/ReLU[act]", |n| n.input("0").output("1", ValueType::dynamic()))
//!     .build();
//!
//! let scopes = build_scope_map(&graph, &Default::default())?;
//! assert_eq!(scopes["1"], "Net/ReLU[act]");
//! ```
//!
//! # Scopes
//!
//! | Value | Scope |
//! |-------|-------|
//! | node output | scope of the producing node |
//! | node input (index >= 1) | scope of the last consuming node |
//! | primary input | `input` |
//! | unclaimed graph input | `unused` |

pub mod builder;
pub mod maps;
pub mod trace;
pub mod types;

// Re-export main types
pub use builder::{NodeBuilder, TraceGraphBuilder};
pub use maps::{
    build_scope_map, qualified_name, qualify, ScopeMap, INPUT_SCOPE, UNUSED_SCOPE,
};
pub use trace::{AttributeMap, TraceGraph, TraceNode, TraceValue};
pub use types::{AttributeValue, TensorType, ValueType, TENSOR_KIND};
