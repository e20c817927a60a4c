//! Attribute serialization
//!
//! TensorBoard escapes single quotes itself, so none may reach it.

use crate::graph::AttributeMap;

/// Replace every single quote with a space
pub fn strip_single_quotes(text: &str) -> String {
    text.replace('\'', " ")
}

/// Render a node's attributes as a display string
///
/// The map is printed as a literal in enumeration order
/// (`{'kernel_shape': [3, 3], 'group': 1}`) and then stripped of single quotes.
pub fn serialize_attributes(attributes: &AttributeMap) -> String {
    let entries: Vec<String> = attributes
        .iter()
        .map(|(name, value)| format!("'{}': {}", name, value))
        .collect();

    strip_single_quotes(&format!("{{{}}}", entries.join(", ")))
}
