//! JSON-lines sink.
//!
//! One JSON object per sample. `time` carries the shared pass timestamp
//! in RFC 3339 for human consumption; `timestamp` stays the raw epoch
//! value the collector stamped.

use std::io::{self, Write};

use chrono::DateTime;
use serde::Serialize;
use tracing::warn;

use super::{MetricSink, OriginatorSample};

#[derive(Serialize)]
struct Record<'a> {
    time: String,
    #[serde(flatten)]
    sample: &'a OriginatorSample,
}

/// Sink writing one JSON object per line.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MetricSink for JsonSink<W> {
    fn dispatch(&mut self, sample: &OriginatorSample) {
        let time = DateTime::from_timestamp(sample.timestamp as i64, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let record = Record { time, sample };

        let result = serde_json::to_writer(&mut self.writer, &record)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            warn!("json write failed: {}", e);
        }
    }
}
