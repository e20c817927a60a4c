//! GraphDef and event reader
//!
//! Load exported graphs back from files, bytes, or event files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use prost::Message;

use crate::error::{ExportError, ExportResult};
use crate::proto::{event, Event, GraphDef};

use super::event::read_record;

/// Load a GraphDef from a file path
pub fn load_graph_def<P: AsRef<Path>>(path: P) -> ExportResult<GraphDef> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        ExportError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })?;

    let mut buffer = Vec::new();
    BufReader::new(file).read_to_end(&mut buffer)?;

    load_graph_def_from_bytes(&buffer)
}

/// Load a GraphDef from bytes
pub fn load_graph_def_from_bytes(bytes: &[u8]) -> ExportResult<GraphDef> {
    Ok(GraphDef::decode(bytes)?)
}

/// Read every event of an event file
pub fn read_events<P: AsRef<Path>>(path: P) -> ExportResult<Vec<Event>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();

    while let Some(record) = read_record(&mut reader)? {
        events.push(Event::decode(record.as_slice())?);
    }

    Ok(events)
}

/// Extract the graphs stored in a sequence of events
pub fn graphs_from_events(events: &[Event]) -> ExportResult<Vec<GraphDef>> {
    events
        .iter()
        .filter_map(|e| match &e.what {
            Some(event::What::GraphDef(data)) => Some(load_graph_def_from_bytes(data)),
            _ => None,
        })
        .collect()
}
