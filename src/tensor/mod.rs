//! Tensor utilities for traced graphs
//!
//! - Shape utilities (`shape`)

pub mod shape;

// Re-export commonly used items
pub use shape::{format_dims, shape_from_sizes, shape_to_proto, Dim, Shape, UNKNOWN_DIM_SIZE};
