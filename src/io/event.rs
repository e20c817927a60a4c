//! TensorBoard event files
//!
//! Event files are sequences of TFRecords, each holding one encoded [`Event`]:
//!
//! | Field | Size |
//! |-------|------|
//! | payload length (LE) | 8 bytes |
//! | masked CRC-32C of the length | 4 bytes |
//! | payload | length bytes |
//! | masked CRC-32C of the payload | 4 bytes |
//!
//! TensorBoard only picks up files whose name contains `tfevents`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message;
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::proto::{event, Event, GraphDef};

/// Version string of the first event in every file
pub const FILE_VERSION: &str = "brain.Event:2";

const CRC_MASK_DELTA: u32 = 0xa282_ead8;

/// Host name used when the system one is empty
pub const FALLBACK_HOST: &str = "localhost";

static FILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// CRC-32C of `data`, masked the way TFRecord stores checksums
pub fn masked_crc(data: &[u8]) -> u32 {
    let crc = crc32c::crc32c(data);
    ((crc >> 15) | (crc << 17)).wrapping_add(CRC_MASK_DELTA)
}

/// Write one TFRecord
pub fn write_record<W: Write>(writer: &mut W, data: &[u8]) -> std::io::Result<()> {
    let len = (data.len() as u64).to_le_bytes();
    writer.write_all(&len)?;
    writer.write_all(&masked_crc(&len).to_le_bytes())?;
    writer.write_all(data)?;
    writer.write_all(&masked_crc(data).to_le_bytes())?;
    Ok(())
}

fn read_u32<R: Read>(reader: &mut R) -> ExportResult<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read one TFRecord, or `None` at a clean end of input
pub fn read_record<R: Read>(reader: &mut R) -> ExportResult<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 8];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..])? {
            0 if filled == 0 => return Ok(None),
            0 => {
                return Err(ExportError::InvalidGraph(
                    "truncated record header".to_string(),
                ))
            }
            n => filled += n,
        }
    }

    if read_u32(reader)? != masked_crc(&len_buf) {
        return Err(ExportError::InvalidGraph(
            "record length checksum mismatch".to_string(),
        ));
    }

    let len = u64::from_le_bytes(len_buf);
    let expected = usize::try_from(len).map_err(|_| {
        ExportError::InvalidGraph(format!("record length {} does not fit in memory", len))
    })?;

    // The buffer only grows with bytes actually present in the input
    let mut data = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut data)?;
    if data.len() != expected {
        return Err(ExportError::InvalidGraph(format!(
            "truncated record payload: expected {} bytes, found {}",
            expected,
            data.len()
        )));
    }

    if read_u32(reader)? != masked_crc(&data) {
        return Err(ExportError::InvalidGraph(
            "record payload checksum mismatch".to_string(),
        ));
    }

    Ok(Some(data))
}

/// Seconds since the Unix epoch
fn wall_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Writer of events into a TFRecord stream
#[derive(Debug)]
pub struct EventWriter<W: Write> {
    inner: W,
}

impl<W: Write> EventWriter<W> {
    /// Wrap a sink; nothing is written yet
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Get a reference to the underlying sink
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the underlying sink
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the underlying sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write one event
    pub fn write_event(&mut self, event: &Event) -> ExportResult<()> {
        write_record(&mut self.inner, &event.encode_to_vec())?;
        Ok(())
    }

    /// Write the file version event that opens every event file
    pub fn write_file_version(&mut self) -> ExportResult<()> {
        self.write_event(&Event {
            wall_time: wall_time(),
            step: 0,
            what: Some(event::What::FileVersion(FILE_VERSION.to_string())),
        })
    }

    /// Write a graph event and flush
    pub fn write_graph(&mut self, graph: &GraphDef) -> ExportResult<()> {
        self.write_event(&Event {
            wall_time: wall_time(),
            step: 0,
            what: Some(event::What::GraphDef(graph.encode_to_vec())),
        })?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Event file name for a given creation time, host, process and sequence number
pub fn event_file_name(wall_secs: u64, host: &str, pid: u32, seq: u64) -> String {
    format!("events.out.tfevents.{}.{}.{}.{}", wall_secs, host, pid, seq)
}

/// Name of this machine, or [`FALLBACK_HOST`]
pub fn host_name() -> String {
    let host = gethostname::gethostname().to_string_lossy().into_owned();
    if host.is_empty() {
        FALLBACK_HOST.to_string()
    } else {
        host
    }
}

/// Create a new event file under `logdir` and write its version header
///
/// The directory is created if needed. An existing file is never reused:
/// on a name collision the next sequence number is tried.
pub fn create_event_file<P: AsRef<Path>>(
    logdir: P,
) -> ExportResult<(PathBuf, EventWriter<BufWriter<File>>)> {
    let logdir = logdir.as_ref();
    fs::create_dir_all(logdir)?;

    let host = host_name();
    let pid = std::process::id();
    let secs = wall_time() as u64;

    let (path, file) = loop {
        let seq = FILE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = logdir.join(event_file_name(secs, &host, pid, seq));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => break (path, file),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err.into()),
        }
    };

    let mut writer = EventWriter::new(BufWriter::new(file));
    writer.write_file_version()?;
    info!("Created event file '{}'", path.display());

    Ok((path, writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::extensions::make_node_def;

    #[test]
    fn test_masked_crc() {
        // CRC-32C("123456789") = 0xE3069283
        let crc: u32 = 0xE306_9283;
        let expected = ((crc >> 15) | (crc << 17)).wrapping_add(0xa282_ead8);
        assert_eq!(masked_crc(b"123456789"), expected);
    }

    #[test]
    fn test_record_framing() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"payload").unwrap();

        assert_eq!(buf.len(), 8 + 4 + 7 + 4);
        assert_eq!(&buf[..8], &7u64.to_le_bytes());

        let mut reader = buf.as_slice();
        assert_eq!(read_record(&mut reader).unwrap(), Some(b"payload".to_vec()));
        assert_eq!(read_record(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_corrupt_record() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"payload").unwrap();
        buf[14] ^= 0xff;

        assert!(read_record(&mut buf.as_slice()).is_err());
    }

    #[test]
    fn test_write_graph_event() {
        let mut graph = GraphDef::with_producer(22);
        graph.node.push(make_node_def("Parameter", &[], "input/0"));

        let mut writer = EventWriter::new(Vec::new());
        writer.write_file_version().unwrap();
        writer.write_graph(&graph).unwrap();

        let bytes = writer.into_inner();
        let mut reader = bytes.as_slice();

        let first = Event::decode(read_record(&mut reader).unwrap().unwrap().as_slice()).unwrap();
        assert_eq!(
            first.what,
            Some(event::What::FileVersion(FILE_VERSION.to_string()))
        );

        let second = Event::decode(read_record(&mut reader).unwrap().unwrap().as_slice()).unwrap();
        match second.what {
            Some(event::What::GraphDef(data)) => {
                let decoded = GraphDef::decode(data.as_slice()).unwrap();
                assert_eq!(decoded, graph);
            }
            other => panic!("expected graph event, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_record_length() {
        let len = (u64::MAX / 2).to_le_bytes();
        let mut buf = Vec::new();
        buf.extend_from_slice(&len);
        buf.extend_from_slice(&masked_crc(&len).to_le_bytes());
        buf.extend_from_slice(b"short");

        let result = read_record(&mut buf.as_slice());
        assert!(matches!(result, Err(ExportError::InvalidGraph(_))));
    }

    #[test]
    fn test_truncated_payload() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"payload").unwrap();
        buf.truncate(8 + 4 + 3);

        let result = read_record(&mut buf.as_slice());
        assert!(matches!(result, Err(ExportError::InvalidGraph(_))));
    }

    #[test]
    fn test_event_file_name() {
        assert_eq!(
            event_file_name(1672561234, "host", 42, 0),
            "events.out.tfevents.1672561234.host.42.0"
        );
    }

    #[test]
    fn test_host_name() {
        assert!(!host_name().is_empty());
    }

    #[test]
    fn test_create_event_file_twice() {
        let logdir = format!("/tmp/trace_graphdef_twice_{}", std::process::id());
        let graph = GraphDef::with_producer(22);

        let (first_path, mut first) = create_event_file(&logdir).unwrap();
        first.write_graph(&graph).unwrap();
        let (second_path, second) = create_event_file(&logdir).unwrap();
        drop(first);
        drop(second);

        assert_ne!(first_path, second_path);
        assert_eq!(fs::read_dir(&logdir).unwrap().count(), 2);

        let bytes = fs::read(&first_path).unwrap();
        let mut reader = bytes.as_slice();
        let mut events = 0;
        while read_record(&mut reader).unwrap().is_some() {
            events += 1;
        }
        assert_eq!(events, 2);

        fs::remove_dir_all(&logdir).ok();
    }

    #[test]
    fn test_create_event_file() {
        let logdir = format!("/tmp/trace_graphdef_logdir_{}", std::process::id());
        let (path, writer) = create_event_file(&logdir).unwrap();
        drop(writer);

        assert!(path.to_string_lossy().contains("tfevents"));
        let bytes = fs::read(&path).unwrap();
        let event = Event::decode(read_record(&mut bytes.as_slice()).unwrap().unwrap().as_slice())
            .unwrap();
        assert_eq!(
            event.what,
            Some(event::What::FileVersion(FILE_VERSION.to_string()))
        );

        fs::remove_dir_all(&logdir).ok();
    }
}
