//! Publishing of decoded samples to a sink scope.

pub mod spec;

pub use spec::{MetricSpec, METRIC_SPECS, MISSING_VALUE, SENSOR_ID};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::frame::Sample;
use crate::sink::{Measurement, MeasurementMeta, Scope, Sink, StatusEvent, StatusKey};

/// Counters for one publish invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Fields published to the sink.
    pub published: usize,
    /// Metric table entries with no value in the sample.
    pub missing: usize,
}

/// Publish every resolvable field of `sample` to `scope`.
///
/// Emits one measurement per metric table entry, all stamped with the shared
/// `timestamp`. A table key absent from the sample (cannot occur for
/// parser-built samples) yields one `missing_field` status event and the
/// remaining fields are still published. Publish failures propagate; there
/// are no retries here.
pub fn publish_sample<S: Sink>(
    sink: &mut S,
    sample: &Sample,
    timestamp: DateTime<Utc>,
    scope: Scope,
    specs: &[MetricSpec],
) -> Result<PublishOutcome> {
    let mut outcome = PublishOutcome::default();

    for spec in specs {
        let Some(value) = sample.get(spec.key) else {
            sink.publish_status(&StatusEvent::new(
                StatusKey::MissingField,
                format!("sample has no value for field {}", spec.key),
            ))?;
            outcome.missing += 1;
            continue;
        };

        debug!(
            scope = %scope,
            name = spec.name,
            value,
            units = spec.units,
            timestamp = %timestamp,
            "publishing measurement",
        );

        sink.publish(&Measurement {
            name: spec.name,
            value,
            meta: MeasurementMeta {
                units: spec.units,
                sensor: SENSOR_ID,
                missing: MISSING_VALUE,
                description: spec.description,
            },
            scope,
            timestamp,
        })?;
        outcome.published += 1;
    }

    Ok(outcome)
}
