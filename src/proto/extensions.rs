//! Extension methods for TensorBoard protobuf types
//!
//! Provides convenient helper methods for working with TensorBoard protobuf types.

use super::tensorboard::*;

// ============================================================================
// GraphDef extensions
// ============================================================================

impl GraphDef {
    /// Create an empty graph stamped with the given producer version
    pub fn with_producer(producer: i32) -> Self {
        Self {
            versions: Some(VersionDef {
                producer,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Get the producer version, if the graph carries one
    pub fn producer(&self) -> Option<i32> {
        self.versions.as_ref().map(|v| v.producer)
    }

    /// Find a node by name
    pub fn get_node(&self, name: &str) -> Option<&NodeDef> {
        self.node.iter().find(|n| n.name == name)
    }

    /// Iterate over node names in order
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.node.iter().map(|n| n.name.as_str())
    }
}

// ============================================================================
// NodeDef extensions
// ============================================================================

impl NodeDef {
    /// Get attribute by key
    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        self.attr.get(key)
    }

    /// Get a string attribute decoded as UTF-8
    pub fn get_attr_string(&self, key: &str) -> Option<&str> {
        self.get_attr(key)
            .and_then(|a| a.as_bytes())
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Get the shapes stored in a list attribute
    pub fn get_attr_shapes(&self, key: &str) -> Option<&[TensorShapeProto]> {
        self.get_attr(key).and_then(|a| a.as_shape_list())
    }
}

// ============================================================================
// AttrValue extensions
// ============================================================================

impl AttrValue {
    /// Create a string (bytes) attribute
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: Some(attr_value::Value::S(value.into())),
        }
    }

    /// Create a list attribute holding shapes
    pub fn shape_list(shapes: Vec<TensorShapeProto>) -> Self {
        Self {
            value: Some(attr_value::Value::List(attr_value::ListValue {
                shape: shapes,
                ..Default::default()
            })),
        }
    }

    /// Get the bytes payload of a string attribute
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.value {
            Some(attr_value::Value::S(s)) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// Get the shapes of a list attribute
    pub fn as_shape_list(&self) -> Option<&[TensorShapeProto]> {
        match &self.value {
            Some(attr_value::Value::List(list)) => Some(list.shape.as_slice()),
            _ => None,
        }
    }
}

// ============================================================================
// TensorShapeProto extensions
// ============================================================================

impl TensorShapeProto {
    /// Get the dimension sizes (-1 for unknown)
    pub fn sizes(&self) -> Vec<i64> {
        self.dim.iter().map(|d| d.size).collect()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Create a new NodeDef without attributes
pub fn make_node_def(op: &str, inputs: &[&str], name: &str) -> NodeDef {
    NodeDef {
        op: op.to_string(),
        input: inputs.iter().map(|s| s.to_string()).collect(),
        name: name.to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{shape_from_sizes, shape_to_proto};

    #[test]
    fn test_node_get_attr_string() {
        let mut node = make_node_def("aten::relu", &["input/0"], "layer/1");
        node.attr.insert("lanpa".to_string(), AttrValue::bytes("{}"));

        assert_eq!(node.get_attr_string("lanpa"), Some("{}"));
        assert_eq!(node.get_attr_string("missing"), None);
    }

    #[test]
    fn test_shape_list_attr() {
        let shape = shape_to_proto(&shape_from_sizes(&[1, 3, 224, 224]));
        let attr = AttrValue::shape_list(vec![shape]);
        let shapes = attr.as_shape_list().unwrap();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].sizes(), vec![1, 3, 224, 224]);
        assert!(attr.as_bytes().is_none());
    }

    #[test]
    fn test_graph_with_producer() {
        let graph = GraphDef::with_producer(22);
        assert_eq!(graph.producer(), Some(22));
        assert!(graph.node.is_empty());
        assert!(graph.get_node("anything").is_none());
    }
}
