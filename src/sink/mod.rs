pub mod fake;
pub mod jsonl;

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Scope identifies the publishing destination for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Node,
    Beehive,
}

impl Scope {
    /// Returns the canonical scope tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Beehive => "beehive",
        }
    }

    /// Return all scopes in publish order (node before beehive).
    pub const fn all() -> &'static [Self] {
        &[Self::Node, Self::Beehive]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// StatusKey identifies the category of a diagnostic status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    /// The device produced no bytes for a full read timeout.
    DeviceError,
    /// A frame was read but failed to decode.
    ParsingError,
    /// A metric table key had no value in the sample at publish time.
    MissingField,
    /// An unclassified failure terminated the polling loop.
    AgentError,
}

impl StatusKey {
    /// Returns the canonical status key label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeviceError => "device_error",
            Self::ParsingError => "parsing_error",
            Self::MissingField => "missing_field",
            Self::AgentError => "agent_error",
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic event, distinct from measurement publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub key: StatusKey,
    pub detail: String,
}

impl StatusEvent {
    pub fn new(key: StatusKey, detail: impl Into<String>) -> Self {
        Self {
            key,
            detail: detail.into(),
        }
    }
}

/// Metadata attached to every published measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeasurementMeta {
    pub units: &'static str,
    pub sensor: &'static str,
    /// Sentinel string downstream consumers substitute for missing values.
    pub missing: &'static str,
    pub description: &'static str,
}

/// One decoded measurement bound for a publishing scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: &'static str,
    pub value: f64,
    pub meta: MeasurementMeta,
    pub scope: Scope,
    pub timestamp: DateTime<Utc>,
}

/// Sink consumes measurements and diagnostic status events.
///
/// Delivery semantics are the sink's own concern; the pipeline never retries
/// a failed publish.
pub trait Sink {
    /// Returns the sink's name for logging.
    fn name(&self) -> &'static str;

    /// Publish one measurement.
    fn publish(&mut self, measurement: &Measurement) -> Result<()>;

    /// Publish one diagnostic status event.
    fn publish_status(&mut self, event: &StatusEvent) -> Result<()>;
}
