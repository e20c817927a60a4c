//! GraphDef I/O module
//!
//! This module provides functions for saving and loading exported graphs,
//! either as bare `GraphDef` protobufs or inside TensorBoard event files.
//!
//! # Example
//!
//! ```ignore
//! use trace_graphdef::io::{create_event_file, save_graph_def};
//!
//! // Bare protobuf
//! save_graph_def(&graph_def, "graph.pb")?;
//!
//! // Event file TensorBoard can load from `runs/`
//! let (path, mut writer) = create_event_file("runs/exp1")?;
//! writer.write_graph(&graph_def)?;
//! ```

pub mod event;
pub mod reader;
pub mod writer;

// Re-exports
pub use event::{
    create_event_file, event_file_name, host_name, masked_crc, read_record, write_record,
    EventWriter, FALLBACK_HOST, FILE_VERSION,
};
pub use reader::{graphs_from_events, load_graph_def, load_graph_def_from_bytes, read_events};
pub use writer::save_graph_def;
