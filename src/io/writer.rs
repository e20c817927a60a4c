//! GraphDef writer
//!
//! Save exported graphs to files or bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;

use crate::error::{ExportError, ExportResult};
use crate::proto::GraphDef;

/// Save a GraphDef to a file
///
/// # Example
///
/// ```ignore
/// use trace_graphdef::io::save_graph_def;
///
/// save_graph_def(&graph_def, "model_graph.pb")?;
/// ```
pub fn save_graph_def<P: AsRef<Path>>(graph: &GraphDef, path: P) -> ExportResult<()> {
    let path = path.as_ref();

    let file = File::create(path).map_err(|e| {
        ExportError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        ))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&graph.encode_to_vec())?;
    writer.flush()?;

    Ok(())
}
