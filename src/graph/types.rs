//! Value types and node attributes of a traced graph

use std::fmt::{self, Write};

use crate::tensor::{format_dims, Shape};

/// Kind string reported for tensor-typed values
pub const TENSOR_KIND: &str = "TensorType";

/// Type of a tensor value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TensorType {
    /// Scalar type name (`Float`, `Long`, ...), if the trace recorded one
    pub scalar_type: Option<String>,
    /// Dimension sizes, if the trace recorded them
    pub sizes: Option<Shape>,
}

/// Type descriptor of a traced value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    /// Typed array
    Tensor(TensorType),
    /// Any non-array value (ints, lists, handles, ...)
    Other {
        /// Kind string, e.g. `IntType`
        kind: String,
        /// Printed form, e.g. `int`
        repr: String,
    },
}

impl ValueType {
    /// Complete tensor type with a scalar type and sizes
    pub fn tensor(scalar_type: &str, sizes: Shape) -> Self {
        ValueType::Tensor(TensorType {
            scalar_type: Some(scalar_type.to_string()),
            sizes: Some(sizes),
        })
    }

    /// Tensor type with nothing known about it
    pub fn dynamic() -> Self {
        ValueType::Tensor(TensorType::default())
    }

    /// Non-array type
    pub fn other(kind: &str, repr: &str) -> Self {
        ValueType::Other {
            kind: kind.to_string(),
            repr: repr.to_string(),
        }
    }

    /// Kind string of this type
    pub fn kind(&self) -> &str {
        match self {
            ValueType::Tensor(_) => TENSOR_KIND,
            ValueType::Other { kind, .. } => kind,
        }
    }

    /// Dimension sizes of a typed array, when recorded
    pub fn sizes(&self) -> Option<&Shape> {
        match self {
            ValueType::Tensor(t) => t.sizes.as_ref(),
            ValueType::Other { .. } => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Tensor(TensorType {
                scalar_type,
                sizes: Some(sizes),
            }) => write!(
                f,
                "{}({})",
                scalar_type.as_deref().unwrap_or("Tensor"),
                format_dims(sizes)
            ),
            ValueType::Tensor(TensorType {
                scalar_type: Some(scalar),
                sizes: None,
            }) => f.write_str(scalar),
            ValueType::Tensor(_) => f.write_str("Dynamic"),
            ValueType::Other { repr, .. } => f.write_str(repr),
        }
    }
}

/// Attribute attached to a traced node
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// `i`
    Int(i64),
    /// `f`
    Float(f64),
    /// `s`
    String(String),
    /// `is`
    Ints(Vec<i64>),
    /// `fs`
    Floats(Vec<f64>),
    /// `ss`
    Strings(Vec<String>),
    /// `t`, in the framework's printed form
    Tensor(String),
    /// `g`, in the framework's printed form
    Graph(String),
}

/// Write a quoted, escaped string literal
///
/// Single quotes are used unless the text holds a single quote and no double
/// quote. Control characters are written as `\n`, `\r`, `\t` or `\xNN`.
fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Write a float in shortest round-trip form with a signed, two-digit
/// exponent (`1e-05`, `1.5e+16`)
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    let text = format!("{:?}", v);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&text),
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str("]")
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write_float(f, *v),
            AttributeValue::String(s) => write_str_literal(f, s),
            AttributeValue::Ints(vs) => write_list(f, vs, |f, v| write!(f, "{}", v)),
            AttributeValue::Floats(vs) => write_list(f, vs, |f, v| write_float(f, *v)),
            AttributeValue::Strings(vs) => write_list(f, vs, |f, v| write_str_literal(f, v)),
            AttributeValue::Tensor(repr) | AttributeValue::Graph(repr) => f.write_str(repr),
        }
    }
}
