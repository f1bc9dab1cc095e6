//! Recording sink used in tests.

use anyhow::{anyhow, Result};

use super::{Measurement, Sink, StatusEvent};

/// Sink that records everything published to it.
///
/// Can be scripted to start rejecting publishes after a number of recorded
/// measurements, for exercising the loop's fatal sink-error path.
#[derive(Default)]
pub struct RecordingSink {
    pub measurements: Vec<Measurement>,
    pub statuses: Vec<StatusEvent>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every publish once `n` measurements have been recorded.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }
}

impl Sink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn publish(&mut self, measurement: &Measurement) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.measurements.len() >= n) {
            return Err(anyhow!("sink rejected {}", measurement.name));
        }
        self.measurements.push(measurement.clone());
        Ok(())
    }

    fn publish_status(&mut self, event: &StatusEvent) -> Result<()> {
        self.statuses.push(event.clone());
        Ok(())
    }
}
