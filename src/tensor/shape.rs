//! Shape utilities for traced tensors
//!
//! Dimension sizes reported by a trace may be concrete, unknown, or symbolic.

use std::fmt;

use smallvec::SmallVec;

use crate::proto::{tensor_shape_proto, TensorShapeProto};

/// Wire size used for dimensions without a concrete size
pub const UNKNOWN_DIM_SIZE: i64 = -1;

/// One dimension of a traced tensor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dim {
    /// Concrete size
    Known(i64),
    /// Size not resolved by the trace
    Unknown,
    /// Named symbolic size (e.g. a batch dimension)
    Symbolic(String),
}

impl Dim {
    /// Get the concrete size, if any
    pub fn size(&self) -> Option<i64> {
        match self {
            Dim::Known(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to a TensorShapeProto dimension
    pub fn to_proto(&self) -> tensor_shape_proto::Dim {
        match self {
            Dim::Known(n) => tensor_shape_proto::Dim {
                size: *n,
                name: String::new(),
            },
            Dim::Unknown => tensor_shape_proto::Dim {
                size: UNKNOWN_DIM_SIZE,
                name: String::new(),
            },
            Dim::Symbolic(name) => tensor_shape_proto::Dim {
                size: UNKNOWN_DIM_SIZE,
                name: name.clone(),
            },
        }
    }
}

impl From<i64> for Dim {
    fn from(n: i64) -> Self {
        Dim::Known(n)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Known(n) => write!(f, "{}", n),
            Dim::Unknown => f.write_str("*"),
            Dim::Symbolic(name) => f.write_str(name),
        }
    }
}

/// Dimension sizes of a tensor; most traced tensors have rank <= 4
pub type Shape = SmallVec<[Dim; 4]>;

/// Build a shape from concrete sizes
pub fn shape_from_sizes(sizes: &[i64]) -> Shape {
    sizes.iter().map(|&n| Dim::Known(n)).collect()
}

/// Convert a shape to a TensorShapeProto
pub fn shape_to_proto(shape: &[Dim]) -> TensorShapeProto {
    TensorShapeProto {
        dim: shape.iter().map(Dim::to_proto).collect(),
        unknown_rank: false,
    }
}

/// Format dimensions as a comma-separated list (`1, 3, *`)
pub fn format_dims(shape: &[Dim]) -> String {
    shape
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
