//! JSONL transcript of adapter exchanges.
//!
//! Each [`ExchangeEvent`] becomes one JSON object per line carrying the
//! payload fields plus `type`, `seq` and `timestamp`.

use elmlink_application::{ExchangeEvent, ExchangeLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct Transcript {
    writer: BufWriter<File>,
    seq: u64,
}

/// Exchange logger appending to a JSONL file.
///
/// Appends to an existing file so consecutive sessions share one
/// transcript. Flushed after every line and on `Drop`.
pub struct JsonlExchangeLogger {
    transcript: Mutex<Transcript>,
    path: PathBuf,
}

impl JsonlExchangeLogger {
    /// Open (or create) the transcript at `path`, creating parent
    /// directories as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            transcript: Mutex::new(Transcript {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: ExchangeEvent, seq: u64) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let mut map = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("type".to_string(), Value::from(event.event_type));
    map.insert("seq".to_string(), Value::from(seq));
    map.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(map)
}

impl ExchangeLogger for JsonlExchangeLogger {
    fn log(&self, event: ExchangeEvent) {
        let Ok(mut transcript) = self.transcript.lock() else {
            return;
        };
        transcript.seq += 1;
        let line = record(event, transcript.seq);

        let _ = writeln!(transcript.writer, "{}", line);
        let _ = transcript.writer.flush();
    }
}

impl Drop for JsonlExchangeLogger {
    fn drop(&mut self) {
        if let Ok(mut transcript) = self.transcript.lock() {
            let _ = transcript.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmlink_application::ports::exchange_logger::{EVENT_RECEIVE, EVENT_WRITE};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange.jsonl");
        let logger = JsonlExchangeLogger::open(&path).unwrap();

        logger.log(ExchangeEvent::new(
            EVENT_WRITE,
            serde_json::json!({ "id": 1, "command": "21 0D 01" }),
        ));
        logger.log(ExchangeEvent::new(
            EVENT_RECEIVE,
            serde_json::json!({ "id": 1, "command": "21 0D 01", "frame": "61 0D 32\r\r" }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "write");
        assert_eq!(lines[0]["seq"], 1);
        assert_eq!(lines[0]["command"], "21 0D 01");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["type"], "receive");
        assert_eq!(lines[1]["seq"], 2);
        assert_eq!(lines[1]["frame"], "61 0D 32\r\r");
    }

    #[test]
    fn test_non_object_payload_nested_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange.jsonl");
        let logger = JsonlExchangeLogger::open(&path).unwrap();

        logger.log(ExchangeEvent::new("note", serde_json::json!("adapter reset")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "adapter reset");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("exchange.jsonl");

        for _ in 0..2 {
            let logger = JsonlExchangeLogger::open(&path).unwrap();
            logger.log(ExchangeEvent::new(EVENT_WRITE, serde_json::json!({ "id": 1 })));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("exchange.jsonl");
        assert!(JsonlExchangeLogger::open(path).is_err());
    }
}
