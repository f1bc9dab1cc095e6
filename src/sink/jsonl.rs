//! Newline-delimited JSON sink.
//!
//! Writes one JSON object per publish call, flushed per record so a
//! downstream reader sees each measurement as soon as it is emitted.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{Measurement, Sink, StatusEvent};

/// Wire record, tagged to distinguish measurements from status events.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Measurement(&'a Measurement),
    Status(&'a StatusEvent),
}

/// Sink writing newline-delimited JSON records to an underlying writer.
pub struct JsonlSink<W: Write> {
    out: W,
}

impl JsonlSink<std::io::Stdout> {
    /// JSONL sink on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, record).context("encoding sink record")?;
        self.out.write_all(b"\n").context("writing sink record")?;
        self.out.flush().context("flushing sink record")?;
        Ok(())
    }
}

impl<W: Write> Sink for JsonlSink<W> {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn publish(&mut self, measurement: &Measurement) -> Result<()> {
        self.write_record(&Record::Measurement(measurement))
    }

    fn publish_status(&mut self, event: &StatusEvent) -> Result<()> {
        self.write_record(&Record::Status(event))
    }
}
