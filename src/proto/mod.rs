//! TensorBoard Protocol Buffer types
//!
//! This module re-exports the prost-generated TensorBoard graph schema.
//! The generated code is checked in so building the crate does not require `protoc`.
//! Additional extension methods are provided in the `extensions` submodule.

/// Generated TensorBoard protobuf types
#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod tensorboard {
    include!("tensorboard.rs");
}

// Re-export commonly used types at module level
pub use tensorboard::{AttrValue, Event, GraphDef, NodeDef, TensorShapeProto, VersionDef};

// Re-export submodules for nested types
pub use tensorboard::attr_value;
pub use tensorboard::event;
pub use tensorboard::tensor_shape_proto;

/// Extension methods for TensorBoard protobuf types
pub mod extensions;
