//! Scope map type and builder
//!
//! The scope map assigns every value of a traced graph to the hierarchical
//! scope of the node that owns it, which yields readable `scope/id` names.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::export::ExportOptions;

use super::trace::{TraceGraph, TraceNode, TraceValue};

/// Scope forced onto the graph's primary input
pub const INPUT_SCOPE: &str = "input";

/// Scope given to graph inputs that no node claimed
pub const UNUSED_SCOPE: &str = "unused";

/// Type alias for scope map: value identifier → scope name
pub type ScopeMap = FxHashMap<String, String>;

/// Join a scope and an identifier into a qualified node name
pub fn qualified_name(scope: &str, unique_name: &str) -> String {
    format!("{}/{}", scope, unique_name)
}

/// Qualify an identifier through the scope map
pub fn qualify(scope: &ScopeMap, unique_name: &str) -> Option<String> {
    scope
        .get(unique_name)
        .map(|s| qualified_name(s, unique_name))
}

/// Outputs of a node that take part in naming
pub(crate) fn considered_outputs<'a>(
    node: &'a TraceNode,
    options: &ExportOptions,
) -> ExportResult<&'a [TraceValue]> {
    if node.outputs.is_empty() {
        return Err(ExportError::MissingOutput(node.kind.clone()));
    }
    if options.first_output_only {
        Ok(&node.outputs[..1])
    } else {
        Ok(&node.outputs)
    }
}

/// Build scope map from graph nodes
///
/// Nodes are visited in graph order and later nodes overwrite earlier claims.
/// Every input except the first is claimed by the consuming node, since input 0
/// is the node's receiver and keeps the scope of its producer. Outputs are
/// claimed by the producing node. The primary input is then forced to
/// [`INPUT_SCOPE`].
///
/// A node with an empty scope name means the trace is malformed and fails the
/// whole build with [`ExportError::EmptyScope`].
pub fn build_scope_map(graph: &TraceGraph, options: &ExportOptions) -> ExportResult<ScopeMap> {
    let mut map = ScopeMap::default();

    for node in &graph.nodes {
        if node.scope_name.is_empty() {
            return Err(ExportError::EmptyScope {
                kind: node.kind.clone(),
                output: node
                    .first_output()
                    .map(|o| o.unique_name.clone())
                    .unwrap_or_default(),
            });
        }

        for input in node.inputs.iter().skip(1) {
            map.insert(input.clone(), node.scope_name.clone());
        }

        for output in considered_outputs(node, options)? {
            map.insert(output.unique_name.clone(), node.scope_name.clone());
        }
    }

    map.insert(
        options.framework.primary_input_id().to_string(),
        INPUT_SCOPE.to_string(),
    );

    debug!(
        "Resolved scopes for {} values across {} nodes",
        map.len(),
        graph.node_count()
    );

    Ok(map)
}
